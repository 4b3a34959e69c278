//! Painting catalog: loading, lookup and reporting.
//!
//! # Documents
//!
//! ```text
//! <data location>/
//! ├── paintings_merged.json     # Array of painting records (required)
//! └── artist_bios.json          # Array of artist bios (optional)
//! ```
//!
//! The location is a directory or an http(s) base URL.

pub mod diagnostics;
pub mod loader;
pub mod profile;
pub mod store;

pub use diagnostics::DiagnosticsReport;
pub use loader::{
    load_catalog, source_for, CatalogError, DirectorySource, DocumentSource, HttpSource,
    MemorySource,
};
pub use profile::{artist_directory, artist_profile, directory_columns, ArtistProfile, DirectoryEntry};
pub use store::Catalog;
