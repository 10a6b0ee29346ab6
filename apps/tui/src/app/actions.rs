use crate::api::models::CatalogItem;
use crate::api::{ApiError, CatalogClient};
use crate::app::state::LoadOutcome;
use crate::config::init_catalog_config;
use crate::domain::CatalogKind;
use color_eyre::Result;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Side-effecting collaborators of the app: the catalog client plus the
/// pagination parameters the loader is invoked with. Input handlers never
/// talk to the network directly; they request loads and the event loop calls
/// in here.
pub struct AppActions {
    pub client: Option<CatalogClient>,
    pub kind: CatalogKind,
    pub page_size: u32,
    pub offset: u32,
}

impl AppActions {
    pub const fn new() -> Self {
        Self {
            client: None,
            kind: CatalogKind::Films,
            page_size: 24,
            offset: 0,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        let config = init_catalog_config()?;

        self.kind = config.source;
        self.page_size = config.page_size;
        self.offset = config.offset;
        self.client = Some(CatalogClient::new(
            config.films_url,
            config.creatures_url,
            config.sprite_base,
        ));

        Ok(())
    }

    /// Fires one load on the runtime and reports the outcome over `tx`.
    /// The optional delay lets a visual effect play out before the request
    /// goes on the wire. Spawned tasks are never aborted; the receiver
    /// applies outcomes in whatever order they arrive.
    pub fn spawn_load(
        &self,
        tx: &UnboundedSender<LoadOutcome>,
        offset: u32,
        delay: Option<Duration>,
    ) {
        let Some(client) = self.client.clone() else {
            let _ = tx.send(Err(ApiError::NotInitialized));
            return;
        };

        let kind = self.kind;
        let page_size = self.page_size;
        let tx = tx.clone();

        tokio::spawn(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let outcome = client.load(kind, page_size, offset).await;
            let _ = tx.send(outcome);
        });
    }

    /// One blocking load for headless mode.
    pub async fn load_once(&self) -> Result<Vec<CatalogItem>, ApiError> {
        match &self.client {
            Some(client) => client.load(self.kind, self.page_size, self.offset).await,
            None => Err(ApiError::NotInitialized),
        }
    }
}
