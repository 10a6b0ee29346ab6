use crate::api::models::{CatalogItem, CreaturePage, Film};
use crate::domain::CatalogKind;

/// Failures at the catalog boundary. All of them collapse into one
/// user-visible status line; the variants exist so diagnostics and tests can
/// tell transport, status, and parse problems apart.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog client not initialized")]
    NotInitialized,
}

/// HTTP client for both catalog endpoints. One GET per load, no retries,
/// no caching; callers own pagination state and pass the offset each time.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    films_url: String,
    creatures_url: String,
    sprite_base: String,
}

impl CatalogClient {
    pub fn new(films_url: String, creatures_url: String, sprite_base: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            films_url,
            creatures_url,
            sprite_base,
        }
    }

    pub async fn load(
        &self,
        kind: CatalogKind,
        page_size: u32,
        offset: u32,
    ) -> Result<Vec<CatalogItem>, ApiError> {
        match kind {
            CatalogKind::Films => self.load_films(page_size, offset).await,
            CatalogKind::Creatures => self.load_creatures(page_size, offset).await,
        }
    }

    async fn load_films(&self, page_size: u32, offset: u32) -> Result<Vec<CatalogItem>, ApiError> {
        let body = self.fetch_body(&self.films_url).await?;
        let films: Vec<Film> = serde_json::from_str(&body)?;

        // The films endpoint has no upstream pagination; the requested window
        // is applied after parsing.
        Ok(films
            .into_iter()
            .skip(offset as usize)
            .take(page_size as usize)
            .map(CatalogItem::from)
            .collect())
    }

    async fn load_creatures(
        &self,
        page_size: u32,
        offset: u32,
    ) -> Result<Vec<CatalogItem>, ApiError> {
        let url = creatures_page_url(&self.creatures_url, page_size, offset);
        let body = self.fetch_body(&url).await?;
        let page: CreaturePage = serde_json::from_str(&body)?;

        Ok(page
            .results
            .into_iter()
            .map(|summary| CatalogItem::from_creature(summary, &self.sprite_base))
            .collect())
    }

    async fn fetch_body(&self, url: &str) -> Result<String, ApiError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        Ok(response.text().await?)
    }
}

/// Paged URL for the creatures endpoint.
pub fn creatures_page_url(base: &str, limit: u32, offset: u32) -> String {
    format!("{}?limit={limit}&offset={offset}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::creatures_page_url;

    #[test]
    fn page_url_carries_limit_and_offset() {
        assert_eq!(
            creatures_page_url("https://pokeapi.co/api/v2/pokemon", 20, 60),
            "https://pokeapi.co/api/v2/pokemon?limit=20&offset=60"
        );
    }

    #[test]
    fn page_url_tolerates_trailing_slash() {
        assert_eq!(
            creatures_page_url("https://pokeapi.co/api/v2/pokemon/", 24, 0),
            "https://pokeapi.co/api/v2/pokemon?limit=24&offset=0"
        );
    }
}
