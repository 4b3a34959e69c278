//! Domain types for the quiz.
//!
//! This module contains the plain data the engine works on:
//! - Painting: a displayable item from the paintings document
//! - ArtistBio: optional biographical record per artist
//! - SessionEvent: what a quiz session reports to the view

pub mod bio;
pub mod events;
pub(crate) mod lenient;
pub mod painting;

// Re-export commonly used types
pub use bio::ArtistBio;
pub use events::{EventKind, SessionEvent};
pub use painting::{clean_title, parse_year, year_only, Painting, PaintingId};
