//! Artist profile card and artist directory.

use serde::Serialize;

use crate::domain::{year_only, Painting};

use super::store::Catalog;

/// Everything the view shows about an artist after an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistProfile {
    pub name: String,
    /// "1863–1944", "1863–" or "–1944"
    pub lifespan: Option<String>,
    pub portrait_url: Option<String>,
    pub bio: Option<String>,
    /// Awards, movements and genres from the bio
    pub tags: Vec<String>,
    pub painting_count: usize,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    pub url: String,
    pub title: String,
}

/// One line of the artist directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub painting_count: usize,
}

/// Format a lifespan from two date-like strings, using years only
pub fn lifespan(birth: Option<&str>, death: Option<&str>) -> Option<String> {
    let birth = year_only(birth);
    let death = year_only(death);

    match (birth.is_empty(), death.is_empty()) {
        (false, false) => Some(format!("{birth}–{death}")),
        (false, true) => Some(format!("{birth}–")),
        (true, false) => Some(format!("–{death}")),
        (true, true) => None,
    }
}

/// Build the profile card for `name`.
///
/// With a bio, the card uses the bio. Without one, it falls back to the
/// fields embedded in `shown` (the painting on screen), or in the artist's
/// first painting when nothing is on screen.
pub fn artist_profile(catalog: &Catalog, name: &str, shown: Option<&Painting>) -> ArtistProfile {
    let paintings: Vec<&Painting> = catalog.paintings_by(name).collect();
    let thumbnails = paintings
        .iter()
        .filter(|p| !p.url.trim().is_empty())
        .map(|p| Thumbnail {
            url: p.url.clone(),
            title: p.display_title(),
        })
        .collect();

    let (lifespan, portrait_url, bio, tags) = match catalog.bio(name) {
        Some(bio) => (
            lifespan(bio.birth_year.as_deref(), bio.death_year.as_deref()),
            bio.self_portrait_url.clone(),
            bio.bio.clone(),
            bio.tags().into_iter().map(String::from).collect(),
        ),
        None => {
            let source = shown.or_else(|| paintings.first().copied());
            (
                source.and_then(|p| lifespan(p.artist_birth.as_deref(), p.artist_death.as_deref())),
                source.and_then(|p| p.artist_image.clone()),
                None,
                Vec::new(),
            )
        }
    };

    ArtistProfile {
        name: name.to_string(),
        lifespan,
        portrait_url,
        bio,
        tags,
        painting_count: paintings.len(),
        thumbnails,
    }
}

/// Distinct artists sorted alphabetically (case-insensitive) with counts
pub fn artist_directory(catalog: &Catalog) -> Vec<DirectoryEntry> {
    let mut entries: Vec<DirectoryEntry> = catalog
        .artists()
        .into_iter()
        .map(|name| DirectoryEntry {
            name: name.to_string(),
            painting_count: catalog.painting_count_for(name),
        })
        .collect();

    entries.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    entries
}

/// Split directory entries into `columns` columns of equal height
pub fn directory_columns(entries: &[DirectoryEntry], columns: usize) -> Vec<Vec<DirectoryEntry>> {
    let columns = columns.max(1);
    let per_column = entries.len().div_ceil(columns);

    (0..columns)
        .map(|col| {
            let start = (col * per_column).min(entries.len());
            let end = ((col + 1) * per_column).min(entries.len());
            entries[start..end].to_vec()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtistBio;

    #[test]
    fn test_lifespan_formats() {
        assert_eq!(lifespan(Some("1863"), Some("1944")), Some("1863–1944".to_string()));
        assert_eq!(lifespan(Some("12 Dec 1863"), None), Some("1863–".to_string()));
        assert_eq!(lifespan(None, Some("1944-01-23")), Some("–1944".to_string()));
        assert_eq!(lifespan(Some("?"), None), None);
    }

    #[test]
    fn test_profile_from_bio() {
        let mut bio = ArtistBio::new("Edvard Munch")
            .with_birth_year("1863")
            .with_death_year("1944")
            .with_movement("Expressionism");
        bio.bio = Some("Norwegian painter.".to_string());
        bio.self_portrait_url = Some("https://img/munch.jpg".to_string());

        let catalog = Catalog::new(
            vec![
                Painting::new("Edvard Munch", "u1").with_title("<i>Skrik</i>"),
                Painting::new("Edvard Munch", "u2"),
                Painting::new("Harriet Backer", "u3"),
            ],
            vec![bio],
        );

        let profile = artist_profile(&catalog, "Edvard Munch", None);
        assert_eq!(profile.lifespan.as_deref(), Some("1863–1944"));
        assert_eq!(profile.portrait_url.as_deref(), Some("https://img/munch.jpg"));
        assert_eq!(profile.tags, vec!["Expressionism"]);
        assert_eq!(profile.painting_count, 2);
        assert_eq!(profile.thumbnails[0].title, "Skrik");
    }

    #[test]
    fn test_profile_falls_back_to_painting_fields() {
        let mut shown = Painting::new("Kitty Kielland", "u1");
        shown.artist_birth = Some("1843-10-08".to_string());
        shown.artist_image = Some("https://img/kitty.jpg".to_string());

        let catalog = Catalog::new(vec![shown.clone()], vec![]);
        let profile = artist_profile(&catalog, "Kitty Kielland", Some(&shown));

        assert_eq!(profile.lifespan.as_deref(), Some("1843–"));
        assert_eq!(profile.portrait_url.as_deref(), Some("https://img/kitty.jpg"));
        assert!(profile.bio.is_none());
        assert!(profile.tags.is_empty());
    }

    #[test]
    fn test_directory_sorting_and_columns() {
        let catalog = Catalog::new(
            vec![
                Painting::new("harald Sohlberg", "u1"),
                Painting::new("Edvard Munch", "u2"),
                Painting::new("Edvard Munch", "u3"),
                Painting::new("Astrid Nørregaard", "u4"),
                Painting::new("", "u5"),
            ],
            vec![],
        );

        let entries = artist_directory(&catalog);
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Astrid Nørregaard", "Edvard Munch", "harald Sohlberg"]);
        assert_eq!(entries[1].painting_count, 2);

        let columns = directory_columns(&entries, 2);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].len(), 2);
        assert_eq!(columns[1].len(), 1);

        let empty = directory_columns(&[], 3);
        assert_eq!(empty.len(), 3);
        assert!(empty.iter().all(Vec::is_empty));
    }
}
