//! Catalog Loader Integration Tests
//!
//! Loading documents from a directory on disk.

use std::fs;

use artquiz::catalog::{load_catalog, DirectorySource, DocumentSource};
use artquiz::config::DataSettings;
use artquiz::CatalogError;
use async_trait::async_trait;
use tempfile::TempDir;

const PAINTINGS: &str = r#"[
    {
        "title": "Skrik",
        "artist": "Edvard Munch",
        "url": "https://img/skrik.jpg",
        "year": 1893,
        "genre": ["genre painting"],
        "movement": "Expressionism"
    },
    {
        "title": "<b>Vinter</b> label QS:Len,\"Vinter\"",
        "artist": "Harald Sohlberg",
        "url": "https://img/vinter.jpg",
        "genre": [null, "landscape", ""],
        "artist_gender": "male"
    },
    {
        "title": "Untitled",
        "artist": "",
        "url": "https://img/unknown.jpg"
    }
]"#;

const BIOS: &str = r#"[
    {"name": "Edvard Munch", "birth_year": "1863", "death_year": 1944, "movement": ["Expressionism"]},
    {"name": "Edvard Munch", "birth_year": "1900"}
]"#;

fn settings(dir: &TempDir) -> DataSettings {
    DataSettings {
        location: dir.path().display().to_string(),
        ..Default::default()
    }
}

fn write(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(name), body).unwrap();
}

#[tokio::test]
async fn test_load_from_directory() {
    let dir = TempDir::new().unwrap();
    write(&dir, "paintings_merged.json", PAINTINGS);
    write(&dir, "artist_bios.json", BIOS);

    let source = DirectorySource::new(dir.path());
    let catalog = load_catalog(&source, &settings(&dir)).await.unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.eligible_count(), 2);
    assert_eq!(catalog.paintings()[1].genre, vec!["landscape"]);
    assert_eq!(catalog.paintings()[1].display_title(), "Vinter");

    // First bio record wins
    let bio = catalog.bio("Edvard Munch").unwrap();
    assert_eq!(bio.birth(), Some(1863));
    assert_eq!(bio.death(), Some(1944));
}

#[tokio::test]
async fn test_missing_bios_file_is_tolerated() {
    let dir = TempDir::new().unwrap();
    write(&dir, "paintings_merged.json", PAINTINGS);

    let source = DirectorySource::new(dir.path());
    let catalog = load_catalog(&source, &settings(&dir)).await.unwrap();

    assert_eq!(catalog.len(), 3);
    assert!(catalog.bios().is_empty());
}

#[tokio::test]
async fn test_missing_paintings_file_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "artist_bios.json", BIOS);

    let source = DirectorySource::new(dir.path());
    let err = load_catalog(&source, &settings(&dir)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Fetch { .. }));
    assert!(err.to_string().contains("paintings_merged.json"));
}

#[tokio::test]
async fn test_malformed_paintings_file_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "paintings_merged.json", "[{\"artist\": ");

    let source = DirectorySource::new(dir.path());
    let err = load_catalog(&source, &settings(&dir)).await.unwrap_err();

    assert!(matches!(err, CatalogError::Parse { .. }));
}

/// A source whose documents never arrive
struct StalledSource;

#[async_trait]
impl DocumentSource for StalledSource {
    fn describe(&self) -> String {
        "stalled".to_string()
    }

    async fn fetch(&self, _name: &str) -> Result<String, CatalogError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_stalled_fetch_times_out() {
    let settings = DataSettings {
        fetch_timeout_seconds: 5,
        ..Default::default()
    };

    let err = load_catalog(&StalledSource, &settings).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::Timeout {
            name: "paintings_merged.json".to_string(),
            seconds: 5,
        }
    );
}
