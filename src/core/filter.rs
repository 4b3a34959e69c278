//! Valid painting pools and per-category statistics.
//!
//! Everything here is recomputed on demand. The registry is small and the
//! catalog stays in the low thousands, so there is no incremental cache.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::domain::Painting;

use super::categories::{self, CategoryDef, Classifier, CATEGORIES};

/// Size of a category: paintings and distinct painters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub count: usize,
    pub painter_count: usize,
}

impl CategoryCount {
    /// Count paintings and distinct artist names in a pool
    pub fn from_pool(pool: &[&Painting]) -> Self {
        let painters: HashSet<&str> = pool.iter().map(|p| p.artist.as_str()).collect();
        Self {
            count: pool.len(),
            painter_count: painters.len(),
        }
    }
}

impl fmt::Display for CategoryCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} paintings, {} painters", self.count, self.painter_count)
    }
}

/// Filters the catalog through the category classifier
#[derive(Debug, Clone)]
pub struct CollectionFilter<'a> {
    catalog: &'a Catalog,
    classifier: Classifier<'a>,
}

impl<'a> CollectionFilter<'a> {
    pub fn new(catalog: &'a Catalog, popular_top_n: usize) -> Self {
        Self {
            catalog,
            classifier: Classifier::new(catalog, popular_top_n),
        }
    }

    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Eligible paintings of a category, in catalog order.
    ///
    /// Unknown ids yield the full collection.
    pub fn valid_paintings(&self, category_id: &str) -> Vec<&'a Painting> {
        self.paintings_in(categories::resolve(category_id))
    }

    /// Eligible paintings matching `category`, in catalog order
    pub fn paintings_in(&self, category: &CategoryDef) -> Vec<&'a Painting> {
        self.catalog
            .eligible()
            .filter(|p| self.classifier.matches(p, category))
            .collect()
    }

    /// Counts for every registered category, in registry order
    pub fn category_counts(&self) -> Vec<(&'static CategoryDef, CategoryCount)> {
        CATEGORIES
            .iter()
            .map(|category| {
                let pool = self.paintings_in(category);
                (category, CategoryCount::from_pool(&pool))
            })
            .collect()
    }

    /// Categories worth offering in a selector: non-empty ones, plus the
    /// full collection which is always offered
    pub fn selectable_categories(&self) -> Vec<(&'static CategoryDef, CategoryCount)> {
        self.category_counts()
            .into_iter()
            .filter(|(category, count)| category.id == categories::ALL || count.count > 0)
            .collect()
    }

    /// Info bar figures for one category
    pub fn collection_info(&self, category_id: &str) -> CategoryCount {
        CategoryCount::from_pool(&self.valid_paintings(category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArtistBio;

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                Painting::new("A", "u1").with_genre("landscape"),
                Painting::new("B", "u2").with_genre("portrait"),
                Painting::new("C", ""),
                Painting::new("A", "u4").with_genre("Landscape painting"),
            ],
            vec![ArtistBio::new("B").with_birth_year("1840")],
        )
    }

    #[test]
    fn test_all_excludes_ineligible() {
        let catalog = sample_catalog();
        let filter = CollectionFilter::new(&catalog, 10);

        let all = filter.valid_paintings("all");
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|p| p.is_eligible()));
    }

    #[test]
    fn test_counts_and_painters() {
        let catalog = sample_catalog();
        let filter = CollectionFilter::new(&catalog, 10);

        let landscape = filter.collection_info("landscape");
        assert_eq!(landscape, CategoryCount { count: 2, painter_count: 1 });
        assert_eq!(landscape.to_string(), "2 paintings, 1 painters");

        let century = filter.collection_info("19thcentury");
        assert_eq!(century.count, 1);
    }

    #[test]
    fn test_selectable_always_includes_all() {
        let catalog = Catalog::new(vec![], vec![]);
        let filter = CollectionFilter::new(&catalog, 10);

        let selectable = filter.selectable_categories();
        assert_eq!(selectable.len(), 1);
        assert_eq!(selectable[0].0.id, "all");
        assert_eq!(selectable[0].1.count, 0);
    }

    #[test]
    fn test_selectable_hides_empty_categories() {
        let catalog = sample_catalog();
        let filter = CollectionFilter::new(&catalog, 10);

        let ids: Vec<_> = filter
            .selectable_categories()
            .iter()
            .map(|(c, _)| c.id)
            .collect();
        assert!(ids.contains(&"landscape"));
        assert!(ids.contains(&"portraits"));
        assert!(!ids.contains(&"expressionism"));
    }
}
