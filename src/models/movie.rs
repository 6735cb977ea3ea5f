use serde::{Deserialize, Serialize};

/// A catalog entry as served to the client
///
/// Field names on the wire follow the catalog files the front-end already
/// consumes (`title_pt`, `sinopse`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Stable identifier, the only key used for favorites and de-duplication
    pub id: String,
    pub rank: u32,
    pub title_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_pt: Option<String>,
    pub year: i32,
    pub rating: f64,
    /// Comma-separated genre names (e.g. "Action, Crime, Drama")
    pub genre: String,
    #[serde(rename = "sinopse")]
    pub synopsis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
}

impl Movie {
    /// Localized title, falling back to the English one
    pub fn display_title(&self) -> &str {
        self.title_pt.as_deref().unwrap_or(&self.title_en)
    }

    /// First genre of the comma-separated list
    pub fn primary_genre(&self) -> &str {
        self.genre.split(',').next().unwrap_or_default().trim()
    }

    /// Text the keyword filter looks at: both titles, synopsis and genres
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title_pt.as_deref().unwrap_or_default(),
            self.title_en,
            self.synopsis,
            self.genre
        )
    }

    /// Text keyword matches are counted against when ranking
    pub fn relevance_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title_pt.as_deref().unwrap_or_default(),
            self.title_en,
            self.synopsis
        )
    }

    /// Narrower text used by the relaxed pass (synopsis excluded)
    pub fn title_genre_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title_pt.as_deref().unwrap_or_default(),
            self.title_en,
            self.genre
        )
    }
}
