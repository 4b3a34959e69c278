//! Painting records and the text helpers used to display them.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::lenient;

/// Painting identifier (SHA256(url)[0:16])
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaintingId(String);

impl PaintingId {
    /// Create a painting ID from an image URL
    pub fn from_url(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let result = hasher.finalize();

        // Take first 8 bytes (16 hex chars)
        Self(hex::encode(&result[..8]))
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaintingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single painting from the paintings document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Painting {
    /// Image URL (identity of the displayable item)
    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,

    /// Raw title, may carry markup or Wikidata label fragments
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,

    /// Artist display name, joins to `ArtistBio::name`
    #[serde(default, deserialize_with = "lenient::text")]
    pub artist: String,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub artist_birth: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub artist_death: Option<String>,

    /// Portrait of the artist embedded in the painting record
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub artist_image: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub year: Option<String>,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub genre: Vec<String>,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub movement: Vec<String>,

    /// Genre tags merged in from the artist record
    #[serde(default, deserialize_with = "lenient::tags")]
    pub artist_genre: Vec<String>,

    /// Movement tags merged in from the artist record
    #[serde(default, deserialize_with = "lenient::tags")]
    pub artist_movement: Vec<String>,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub categories: Vec<String>,

    /// Holding collection, e.g. "National Museum of Norway"
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub artist_gender: Option<String>,
}

impl Painting {
    /// Create a painting with just the fields the quiz needs
    pub fn new(artist: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Add a genre tag
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre.push(genre.into());
        self
    }

    /// Add a movement tag
    pub fn with_movement(mut self, movement: impl Into<String>) -> Self {
        self.movement.push(movement.into());
        self
    }

    /// A painting can be shown in the quiz only with both an artist and an image
    pub fn is_eligible(&self) -> bool {
        !self.artist.trim().is_empty() && !self.url.trim().is_empty()
    }

    /// Stable identifier derived from the image URL
    pub fn id(&self) -> PaintingId {
        PaintingId::from_url(&self.url)
    }

    /// Title with markup removed, suitable for alt text and captions
    pub fn display_title(&self) -> String {
        clean_title(&self.title)
    }
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\b(?:17|18|19|20|21)\d{2}\b").expect("year pattern is valid")
    })
}

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"label QS:[^,\s]+,"[^"\n]*""#).expect("label pattern is valid")
    })
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

fn space_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("space pattern is valid"))
}

/// First plausible year (1700-2199) in a date-like string
pub fn parse_year(date: &str) -> Option<i32> {
    year_pattern()
        .find(date)
        .and_then(|m| m.as_str().parse().ok())
}

/// Year portion of a date-like string for display, empty when none is found
pub fn year_only(date: Option<&str>) -> String {
    date.and_then(|d| year_pattern().find(d))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Strip Wikidata label fragments and HTML from a scraped title
pub fn clean_title(title: &str) -> String {
    let without_labels = label_pattern().replace_all(title, "");
    let without_tags = tag_pattern().replace_all(&without_labels, "");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    space_pattern().replace_all(&decoded, " ").trim().to_string()
}
