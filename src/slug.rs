//! Slug derivation and the remediation mapping file

use crate::error::Result;
use crate::store::StoreRecord;
use serde::{Deserialize, Serialize};

/// One entry of the remediation mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugMapping {
    pub id: String,
    pub title: String,
    pub slug: String,
}

/// Lowercase, trim, spaces to hyphens, drop everything that is neither
/// alphanumeric nor a hyphen.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .trim()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

pub fn build_mappings(records: &[StoreRecord]) -> Vec<SlugMapping> {
    records
        .iter()
        .map(|record| SlugMapping {
            id: record.id.clone(),
            title: record.title.clone(),
            slug: slugify(&record.title),
        })
        .collect()
}

/// The mapping as the pretty-printed JSON array committed to the branch
pub fn mapping_file(mappings: &[SlugMapping]) -> Result<String> {
    Ok(serde_json::to_string_pretty(mappings)?)
}
