// Export our modules for use in the binary and tests
pub mod anim;
pub mod api;
pub mod config;
pub mod domain;

pub use domain::CatalogKind;
