//! In-memory catalog of paintings and artist bios.
//!
//! Loaded once per session and never mutated afterwards; shared read-only
//! behind an `Arc` by everything that needs it.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{ArtistBio, Painting};

/// Paintings plus the bio lookup, immutable after construction
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    paintings: Vec<Painting>,
    bios: Vec<ArtistBio>,
    /// Artist name -> index into `bios` (first record wins)
    bio_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, indexing bios by artist name
    pub fn new(paintings: Vec<Painting>, bios: Vec<ArtistBio>) -> Self {
        let mut bio_index = HashMap::with_capacity(bios.len());
        for (idx, bio) in bios.iter().enumerate() {
            bio_index.entry(bio.name.clone()).or_insert(idx);
        }

        Self {
            paintings,
            bios,
            bio_index,
        }
    }

    /// All paintings in document order, eligible or not
    pub fn paintings(&self) -> &[Painting] {
        &self.paintings
    }

    pub fn bios(&self) -> &[ArtistBio] {
        &self.bios
    }

    /// Bio for an artist, by exact name
    pub fn bio(&self, artist: &str) -> Option<&ArtistBio> {
        self.bio_index.get(artist).map(|&idx| &self.bios[idx])
    }

    /// Paintings that can be shown in the quiz
    pub fn eligible(&self) -> impl Iterator<Item = &Painting> {
        self.paintings.iter().filter(|p| p.is_eligible())
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }

    /// Every painting attributed to `artist`
    pub fn paintings_by<'a>(&'a self, artist: &'a str) -> impl Iterator<Item = &'a Painting> {
        self.paintings.iter().filter(move |p| p.artist == artist)
    }

    pub fn painting_count_for(&self, artist: &str) -> usize {
        self.paintings_by(artist).count()
    }

    /// Distinct non-empty artist names, in first-appearance order
    pub fn artists(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.paintings
            .iter()
            .map(|p| p.artist.as_str())
            .filter(|a| !a.trim().is_empty())
            .filter(|a| seen.insert(*a))
            .collect()
    }

    /// Every painting, shuffled, for the gallery view
    pub fn gallery<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Painting> {
        let mut shuffled: Vec<&Painting> = self.paintings.iter().collect();
        shuffled.shuffle(rng);
        shuffled
    }

    pub fn len(&self) -> usize {
        self.paintings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paintings.is_empty()
    }
}
