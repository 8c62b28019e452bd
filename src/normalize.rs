//! Normalization of raw scalar and multi-value configuration fields.

use serde::Deserialize;

/// A raw multi-value field as it appears in a step configuration.
///
/// Either a single whitespace-separated string or an array whose elements may be
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawList {
    Text(String),
    Items(Vec<Option<String>>),
}

impl From<&str> for RawList {
    fn from(value: &str) -> Self {
        RawList::Text(value.to_string())
    }
}

impl From<Vec<&str>> for RawList {
    fn from(values: Vec<&str>) -> Self {
        RawList::Items(values.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

/// Turn a raw multi-value field into its non-blank entries.
///
/// A string is split on any run of whitespace. Array elements are trimmed but
/// never split, so an element with embedded spaces stays one entry. Returns
/// `None` when nothing survives, which callers treat as "not configured".
pub fn normalize(raw: Option<&RawList>) -> Option<Vec<String>> {
    match raw? {
        RawList::Text(text) => {
            let items: Vec<String> = text.split_whitespace().map(str::to_string).collect();
            if items.is_empty() { None } else { Some(items) }
        }
        RawList::Items(items) => normalize_items(items),
    }
}

/// The array form of [`normalize`]: one entry per non-blank element, unsplit.
pub fn normalize_items(items: &[Option<String>]) -> Option<Vec<String>> {
    let items: Vec<String> = items
        .iter()
        .flatten()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    if items.is_empty() { None } else { Some(items) }
}

/// Trim a scalar field, mapping blank to absent.
pub fn normalize_scalar(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
