//! Category registry and the generic classifier that interprets it.
//!
//! Every category is one row in [`CATEGORIES`]: an id, a label and a
//! declarative [`Rule`]. There is no per-category code; [`Classifier`]
//! interprets the rule against the painting's own tags and the artist's bio.
//!
//! Classification never fails. Missing bios, empty tag lists and
//! unparseable years all mean "not a member".

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{ArtistBio, Painting};

/// Id of the category that matches every eligible painting
pub const ALL: &str = "all";

/// Where a keyword rule looks for tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagField {
    /// Painting genre, artist genre from the painting, bio genre
    Genre,

    /// Painting movement, artist movement from the painting, bio movement
    Movement,

    /// Holding collection of the painting
    Location,

    /// Artist gender from the painting or the bio
    Gender,
}

/// Half-open year range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year < self.end
    }
}

/// Membership rule for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum Rule {
    /// Every eligible painting
    Everything,

    /// Artist is among the most represented artists of the catalog
    Popular,

    /// Some tag from `fields` contains one of `keywords` (lowercase)
    Keywords {
        fields: &'static [TagField],
        keywords: &'static [&'static str],
    },

    /// Artist era year inside `range`, or a genre/movement tag containing
    /// one of `fallback` (lowercase)
    Era {
        range: YearRange,
        fallback: &'static [&'static str],
    },
}

/// One row of the category registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryDef {
    pub id: &'static str,
    pub label: &'static str,
    pub rule: Rule,
}

const GENRE: &[TagField] = &[TagField::Genre];
const MOVEMENT: &[TagField] = &[TagField::Movement];
const GENRE_AND_MOVEMENT: &[TagField] = &[TagField::Genre, TagField::Movement];

/// Fixed, ordered category registry
pub static CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        id: ALL,
        label: "Full Collection",
        rule: Rule::Everything,
    },
    CategoryDef {
        id: "popular",
        label: "Popular Painters",
        rule: Rule::Popular,
    },
    CategoryDef {
        id: "landscape",
        label: "Landscapes",
        rule: Rule::Keywords {
            fields: GENRE,
            keywords: &["landscape"],
        },
    },
    CategoryDef {
        id: "portraits",
        label: "Portraits",
        rule: Rule::Keywords {
            fields: GENRE,
            keywords: &["portrait"],
        },
    },
    CategoryDef {
        id: "romanticism",
        label: "Romanticism",
        rule: Rule::Keywords {
            fields: MOVEMENT,
            keywords: &["romanticism"],
        },
    },
    CategoryDef {
        id: "impressionism",
        label: "Impressionism",
        rule: Rule::Keywords {
            fields: MOVEMENT,
            keywords: &["impressionism"],
        },
    },
    CategoryDef {
        id: "expressionism",
        label: "Expressionism",
        rule: Rule::Keywords {
            fields: MOVEMENT,
            keywords: &["expressionism"],
        },
    },
    CategoryDef {
        id: "abstract",
        label: "Abstract",
        rule: Rule::Keywords {
            fields: GENRE,
            keywords: &["abstract"],
        },
    },
    CategoryDef {
        id: "mountains_nature",
        label: "Mountains & Nature",
        rule: Rule::Keywords {
            fields: GENRE_AND_MOVEMENT,
            keywords: &["mountain", "nature"],
        },
    },
    CategoryDef {
        id: "historical_nationalism",
        label: "Historical / Nationalism",
        rule: Rule::Keywords {
            fields: GENRE_AND_MOVEMENT,
            keywords: &["historical", "nationalism", "mythology"],
        },
    },
    CategoryDef {
        id: "19thcentury",
        label: "19th Century",
        rule: Rule::Era {
            range: YearRange::new(1800, 1900),
            fallback: &[],
        },
    },
    CategoryDef {
        id: "20thcentury",
        label: "20th Century",
        rule: Rule::Era {
            range: YearRange::new(1900, 2000),
            fallback: &["modern"],
        },
    },
    CategoryDef {
        id: "national_museum",
        label: "National Museum of Norway",
        rule: Rule::Keywords {
            fields: &[TagField::Location],
            keywords: &["national museum of norway"],
        },
    },
    CategoryDef {
        id: "women_painters",
        label: "Women Painters",
        rule: Rule::Keywords {
            fields: &[TagField::Gender],
            keywords: &["female"],
        },
    },
];

/// Look up a category by id
pub fn find(id: &str) -> Option<&'static CategoryDef> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Look up a category by id, falling back to the full collection
pub fn resolve(id: &str) -> &'static CategoryDef {
    find(id).unwrap_or_else(|| {
        debug!(category = id, "Unknown category, using full collection");
        all()
    })
}

/// The full collection category
pub fn all() -> &'static CategoryDef {
    &CATEGORIES[0]
}

/// Artists ranked by eligible painting count, most painted first.
///
/// Ties keep the order in which the artists first appear in the catalog.
pub fn ranked_artists(catalog: &Catalog) -> Vec<(&str, usize)> {
    let mut ranking: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for painting in catalog.eligible() {
        let artist = painting.artist.as_str();
        match positions.get(artist) {
            Some(&pos) => ranking[pos].1 += 1,
            None => {
                positions.insert(artist, ranking.len());
                ranking.push((artist, 1));
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    ranking
}

/// Pure category membership over one catalog snapshot
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    catalog: &'a Catalog,
    popular: HashSet<&'a str>,
}

impl<'a> Classifier<'a> {
    /// Build a classifier, ranking the `popular_top_n` most painted artists
    pub fn new(catalog: &'a Catalog, popular_top_n: usize) -> Self {
        let popular = ranked_artists(catalog)
            .into_iter()
            .take(popular_top_n)
            .map(|(artist, _)| artist)
            .collect();

        Self { catalog, popular }
    }

    /// Whether `painting` belongs to the category with `category_id`.
    ///
    /// Unknown ids behave like the full collection.
    pub fn classify(&self, painting: &Painting, category_id: &str) -> bool {
        self.matches(painting, resolve(category_id))
    }

    /// Whether `painting` belongs to `category`
    pub fn matches(&self, painting: &Painting, category: &CategoryDef) -> bool {
        if !painting.is_eligible() {
            return false;
        }

        let bio = self.catalog.bio(&painting.artist);

        match category.rule {
            Rule::Everything => true,
            Rule::Popular => self.popular.contains(painting.artist.as_str()),
            Rule::Keywords { fields, keywords } => {
                any_tag_matches(painting, bio, fields, keywords)
            }
            Rule::Era { range, fallback } => {
                let in_range = bio
                    .and_then(ArtistBio::era_year)
                    .is_some_and(|year| range.contains(year));

                in_range || any_tag_matches(painting, bio, GENRE_AND_MOVEMENT, fallback)
            }
        }
    }

    /// Names of the artists counted as popular
    pub fn popular_artists(&self) -> &HashSet<&'a str> {
        &self.popular
    }
}

fn any_tag_matches(
    painting: &Painting,
    bio: Option<&ArtistBio>,
    fields: &[TagField],
    keywords: &[&str],
) -> bool {
    if keywords.is_empty() {
        return false;
    }

    fields.iter().any(|&field| {
        tags_for(painting, bio, field).any(|tag| {
            let tag = tag.to_lowercase();
            keywords.iter().any(|keyword| tag.contains(keyword))
        })
    })
}

fn tags_for<'p>(
    painting: &'p Painting,
    bio: Option<&'p ArtistBio>,
    field: TagField,
) -> Box<dyn Iterator<Item = &'p str> + 'p> {
    let strs = |tags: &'p Vec<String>| tags.iter().map(String::as_str);

    match field {
        TagField::Genre => Box::new(
            strs(&painting.genre)
                .chain(strs(&painting.artist_genre))
                .chain(bio.into_iter().flat_map(move |b| strs(&b.genre))),
        ),
        TagField::Movement => Box::new(
            strs(&painting.movement)
                .chain(strs(&painting.artist_movement))
                .chain(bio.into_iter().flat_map(move |b| strs(&b.movement))),
        ),
        TagField::Location => Box::new(painting.location.as_deref().into_iter()),
        TagField::Gender => Box::new(
            painting
                .artist_gender
                .as_deref()
                .into_iter()
                .chain(bio.and_then(|b| b.gender.as_deref())),
        ),
    }
}
