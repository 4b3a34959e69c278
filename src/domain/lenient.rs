//! Tolerant field decoders for the catalog documents.
//!
//! The painting and bio documents are produced by scraping scripts, so the
//! same field shows up as a string, a number, a list or `null` depending on
//! the record. These helpers normalize all of that at the serde boundary.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<Option<String>>),
}

/// Required text field: `null` and numbers are accepted, missing becomes `""`
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_text).unwrap_or_default())
}

/// Optional text field: blank strings collapse to `None`
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value
        .map(Scalar::into_text)
        .filter(|s| !s.trim().is_empty()))
}

/// Tag list: a single string is a one-element list, blanks are dropped
pub fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    let tags = match value {
        None => Vec::new(),
        Some(OneOrMany::One(tag)) => vec![tag],
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
    };

    Ok(tags.into_iter().filter(|t| !t.trim().is_empty()).collect())
}
