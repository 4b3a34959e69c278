//! Catalog health report.
//!
//! Counts per category, tag frequencies from the bios, bios without
//! paintings and the three kinds of duplicates the scrapers tend to produce.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::core::{CategoryCount, CollectionFilter};

use super::store::Catalog;

/// Sample size for duplicate listings
const SAMPLE: usize = 3;

/// Value and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frequency {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLine {
    pub id: String,
    pub label: String,
    pub counts: CategoryCount,
}

/// Full diagnostics for one catalog snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub total_paintings: usize,
    pub eligible_paintings: usize,
    pub distinct_artists: usize,
    pub total_bios: usize,
    pub categories: Vec<CategoryLine>,
    pub bio_genres: Vec<Frequency>,
    pub bio_movements: Vec<Frequency>,
    pub bio_awards: Vec<Frequency>,
    pub bios_without_paintings: Vec<String>,
    /// Repeated (artist, title, url) records
    pub exact_duplicates: Vec<Frequency>,
    pub url_duplicates: Vec<Frequency>,
    pub title_duplicates: Vec<Frequency>,
    pub painter_counts: Vec<Frequency>,
}

/// Count values, most frequent first; ties keep first-appearance order
fn frequencies<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<Frequency> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for value in values {
        let count = counts.entry(value).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }

    let mut result: Vec<Frequency> = order
        .into_iter()
        .map(|value| Frequency {
            value: value.to_string(),
            count: counts[value],
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

fn repeated(values: Vec<Frequency>) -> Vec<Frequency> {
    values.into_iter().filter(|f| f.count > 1).collect()
}

impl DiagnosticsReport {
    /// Analyze a catalog
    pub fn build(catalog: &Catalog, popular_top_n: usize) -> Self {
        let filter = CollectionFilter::new(catalog, popular_top_n);
        let categories = filter
            .category_counts()
            .into_iter()
            .map(|(category, counts)| CategoryLine {
                id: category.id.to_string(),
                label: category.label.to_string(),
                counts,
            })
            .collect();

        let bios = catalog.bios();
        let artists: HashSet<&str> = catalog.artists().into_iter().collect();

        let exact_keys: Vec<String> = catalog
            .paintings()
            .iter()
            .map(|p| format!("{}: \"{}\" <{}>", p.artist, p.title, p.url))
            .collect();

        Self {
            total_paintings: catalog.len(),
            eligible_paintings: catalog.eligible_count(),
            distinct_artists: artists.len(),
            total_bios: bios.len(),
            categories,
            bio_genres: frequencies(bios.iter().flat_map(|b| b.genre.iter().map(String::as_str))),
            bio_movements: frequencies(
                bios.iter().flat_map(|b| b.movement.iter().map(String::as_str)),
            ),
            bio_awards: frequencies(bios.iter().flat_map(|b| b.awards.iter().map(String::as_str))),
            bios_without_paintings: bios
                .iter()
                .filter(|b| !artists.contains(b.name.as_str()))
                .map(|b| b.name.clone())
                .collect(),
            exact_duplicates: repeated(frequencies(exact_keys.iter().map(String::as_str))),
            url_duplicates: repeated(frequencies(
                catalog
                    .paintings()
                    .iter()
                    .map(|p| p.url.as_str())
                    .filter(|u| !u.is_empty()),
            )),
            title_duplicates: repeated(frequencies(
                catalog
                    .paintings()
                    .iter()
                    .map(|p| p.title.as_str())
                    .filter(|t| !t.is_empty()),
            )),
            painter_counts: frequencies(
                catalog
                    .paintings()
                    .iter()
                    .map(|p| p.artist.as_str())
                    .filter(|a| !a.trim().is_empty()),
            ),
        }
    }

    /// Render as a Markdown document
    pub fn to_markdown(&self) -> String {
        let mut lines = vec!["# Art Data Diagnostics".to_string(), String::new()];

        lines.push("## Collection".to_string());
        lines.push(format!("- **Total paintings:** {}", self.total_paintings));
        lines.push(format!("- **Eligible paintings:** {}", self.eligible_paintings));
        lines.push(format!("- **Unique artists in paintings:** {}", self.distinct_artists));
        lines.push(format!("- **Artists in bios:** {}", self.total_bios));

        lines.push(String::new());
        lines.push("## Quiz Categories".to_string());
        for line in &self.categories {
            lines.push(format!("- **{}:** {}", line.label, line.counts));
        }

        for (title, values) in [
            ("All Genres (from bios)", &self.bio_genres),
            ("All Movements (from bios)", &self.bio_movements),
            ("All Awards (from bios)", &self.bio_awards),
        ] {
            lines.push(String::new());
            lines.push(format!("## {title}"));
            for f in values {
                lines.push(format!("- {}: {}", f.value, f.count));
            }
        }

        lines.push(String::new());
        lines.push(format!(
            "## Painters in bios with 0 paintings: {}",
            self.bios_without_paintings.len()
        ));
        if !self.bios_without_paintings.is_empty() {
            lines.push(self.bios_without_paintings.join(", "));
        }

        lines.push(String::new());
        lines.push("## Duplicate Analysis".to_string());
        for (label, values) in [
            ("Exact duplicates", &self.exact_duplicates),
            ("URL duplicates", &self.url_duplicates),
            ("Title duplicates", &self.title_duplicates),
        ] {
            lines.push(format!("- **{label}:** {}", values.len()));
            for f in values.iter().take(SAMPLE) {
                lines.push(format!("  - {}: {} times", f.value, f.count));
            }
        }

        lines.push(String::new());
        lines.push("## All Painters and Number of Paintings".to_string());
        for f in &self.painter_counts {
            lines.push(format!("- {}: {}", f.value, f.count));
        }

        lines.push(String::new());
        lines.join("\n")
    }
}
