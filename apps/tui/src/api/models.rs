use serde::{Deserialize, Serialize};

/// One film record as returned by the films endpoint (a plain JSON array).
#[derive(Debug, Clone, Deserialize)]
pub struct Film {
    pub title: String,
    pub description: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    pub rt_score: String,
}

/// One creature reference inside the paged creatures envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatureSummary {
    pub name: String,
    pub url: String,
}

/// Paged envelope for the creatures endpoint.
#[derive(Debug, Deserialize)]
pub struct CreaturePage {
    pub results: Vec<CreatureSummary>,
}

/// Unified card record the renderer consumes, regardless of catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub title: String,
    pub meta: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<Film> for CatalogItem {
    fn from(film: Film) -> Self {
        Self {
            title: film.title,
            meta: format!(
                "Director: {} • Year: {} • Score: {}",
                film.director, film.release_date, film.rt_score
            ),
            description: film.description,
            image_url: None,
        }
    }
}

impl CatalogItem {
    /// Builds a creature card from its summary record. The numeric identifier
    /// lives in the trailing path segment of the summary URL and doubles as
    /// the sprite filename.
    pub fn from_creature(summary: CreatureSummary, sprite_base: &str) -> Self {
        let id = creature_id_from_url(&summary.url).unwrap_or_default();
        let (meta, image_url) = if id.is_empty() {
            (String::new(), None)
        } else {
            (display_number(id), Some(sprite_url(sprite_base, id)))
        };

        Self {
            title: title_case(&summary.name),
            meta,
            description: String::new(),
            image_url,
        }
    }
}

/// Extracts the identifier from the last non-empty path segment of a catalog
/// URL. Trailing slashes are common in the upstream payload and must not
/// shift the result.
pub fn creature_id_from_url(url: &str) -> Option<&str> {
    url.split('/').filter(|segment| !segment.is_empty()).last()
}

/// Display form of a numeric identifier, zero-padded to three digits.
/// Identifiers already three digits or longer render unchanged.
pub fn display_number(id: &str) -> String {
    format!("#{id:0>3}")
}

/// Sprite location for one creature, templated from the configured base path.
pub fn sprite_url(sprite_base: &str, id: &str) -> String {
    format!("{}/{id}.png", sprite_base.trim_end_matches('/'))
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
