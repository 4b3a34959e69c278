//! Artist biography records.

use serde::{Deserialize, Serialize};

use super::lenient;
use super::painting::parse_year;

/// Biographical record for one artist, joined to paintings by exact name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistBio {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub birth_year: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub death_year: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub bio: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub self_portrait_url: Option<String>,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub awards: Vec<String>,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub movement: Vec<String>,

    #[serde(default, deserialize_with = "lenient::tags")]
    pub genre: Vec<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub gender: Option<String>,
}

impl ArtistBio {
    /// Create a bio with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the birth year
    pub fn with_birth_year(mut self, year: impl Into<String>) -> Self {
        self.birth_year = Some(year.into());
        self
    }

    /// Set the death year
    pub fn with_death_year(mut self, year: impl Into<String>) -> Self {
        self.death_year = Some(year.into());
        self
    }

    /// Add a movement tag
    pub fn with_movement(mut self, movement: impl Into<String>) -> Self {
        self.movement.push(movement.into());
        self
    }

    /// Add a genre tag
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre.push(genre.into());
        self
    }

    pub fn birth(&self) -> Option<i32> {
        self.birth_year.as_deref().and_then(parse_year)
    }

    pub fn death(&self) -> Option<i32> {
        self.death_year.as_deref().and_then(parse_year)
    }

    /// Year used to place the artist in an era: birth, else death
    pub fn era_year(&self) -> Option<i32> {
        self.birth().or_else(|| self.death())
    }

    /// Awards, movements and genres in display order
    pub fn tags(&self) -> Vec<&str> {
        self.awards
            .iter()
            .chain(&self.movement)
            .chain(&self.genre)
            .map(String::as_str)
            .collect()
    }
}
