mod config;

pub use config::{debug_enabled, init_catalog_config, CatalogConfig};
