//! artquiz - Guess-the-painter quiz engine
//!
//! Shows a painting from a catalog and asks which of a handful of artists
//! painted it. Correct answers build a streak toward a target.
//!
//! # Architecture
//!
//! - The catalog is two JSON documents (paintings, artist bios) loaded from
//!   a directory or an HTTP base URL
//! - A declarative category table selects the pool questions are drawn from
//! - A session state machine owns the streak and emits events for the view
//! - An async controller feeds it commands and schedules the next question
//!
//! # Modules
//!
//! - `catalog`: Loading, lookup, artist profiles, diagnostics
//! - `core`: Categories, filter, sampler, session, controller
//! - `domain`: Data structures (Painting, ArtistBio, SessionEvent)
//! - `config`: Config file and environment settings
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Play in the terminal
//! artquiz play --category impressionism
//!
//! # Check the data
//! artquiz diagnose --output diagnostics.md
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::catalog::{load_catalog, Catalog, CatalogError, DocumentSource};
pub use crate::core::{Command, Phase, QuizController, QuizSession};
pub use crate::domain::{ArtistBio, EventKind, Painting, SessionEvent};
