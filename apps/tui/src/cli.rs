use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "catalog-cards", version, about = "Catalog Cards TUI")]
pub struct CliArgs {
    /// Print the catalog and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Catalog to browse (films or creatures)
    #[arg(long, value_name = "KIND")]
    pub catalog: Option<String>,

    /// Number of items per load
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Offset of the first item to load
    #[arg(long, value_name = "N")]
    pub offset: Option<u32>,

    /// Override the films endpoint
    #[arg(long = "films-url", value_name = "URL")]
    pub films_url: Option<String>,

    /// Override the creatures endpoint
    #[arg(long = "creatures-url", value_name = "URL")]
    pub creatures_url: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(kind) = &self.catalog {
            std::env::set_var("CATALOG_SOURCE", kind);
        }
        if let Some(limit) = self.limit {
            std::env::set_var("CATALOG_PAGE_SIZE", limit.to_string());
        }
        if let Some(offset) = self.offset {
            std::env::set_var("CATALOG_OFFSET", offset.to_string());
        }
        if let Some(url) = &self.films_url {
            std::env::set_var("FILMS_API_URL", url);
        }
        if let Some(url) = &self.creatures_url {
            std::env::set_var("CREATURES_API_URL", url);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}
