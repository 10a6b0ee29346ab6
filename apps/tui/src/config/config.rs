use crate::domain::CatalogKind;
use dotenv::dotenv;
use std::env;

use color_eyre::eyre::eyre;

pub const DEFAULT_FILMS_URL: &str = "https://ghibliapi.vercel.app/films";
pub const DEFAULT_CREATURES_URL: &str = "https://pokeapi.co/api/v2/pokemon";
pub const DEFAULT_SPRITE_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

const DEFAULT_PAGE_SIZE: u32 = 24;

/// Resolved catalog configuration, assembled from environment variables with
/// sensible defaults for both public APIs.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub source: CatalogKind,
    pub films_url: String,
    pub creatures_url: String,
    pub sprite_base: String,
    pub page_size: u32,
    pub offset: u32,
}

/// Initializes the application configuration
/// Reads `.env` first so CLI overrides and ambient variables both apply.
pub fn init_catalog_config() -> color_eyre::eyre::Result<CatalogConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let source = match env::var("CATALOG_SOURCE") {
        Ok(name) => CatalogKind::from_name(&name)
            .ok_or_else(|| eyre!("Unknown catalog source: {name}"))?,
        Err(_) => CatalogKind::Films,
    };

    let page_size = parse_env_u32("CATALOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
    if page_size == 0 {
        return Err(eyre!("CATALOG_PAGE_SIZE must be greater than zero"));
    }

    let offset = parse_env_u32("CATALOG_OFFSET", 0)?;

    Ok(CatalogConfig {
        source,
        films_url: env::var("FILMS_API_URL").unwrap_or_else(|_| DEFAULT_FILMS_URL.to_string()),
        creatures_url: env::var("CREATURES_API_URL")
            .unwrap_or_else(|_| DEFAULT_CREATURES_URL.to_string()),
        sprite_base: env::var("SPRITE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SPRITE_BASE.to_string()),
        page_size,
        offset,
    })
}

fn parse_env_u32(key: &str, default: u32) -> color_eyre::eyre::Result<u32> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| eyre!("Invalid value for {key}: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Whether diagnostic traces should be written to stderr
pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| value != "0")
}
