//! Query pipeline: filter, sort, paginate.
//!
//! # Responsibility
//! - Define the search request/response envelopes shared by all backends.
//! - Provide the pure pipeline stages used by the in-memory engine.
//!
//! # Invariants
//! - Stage order is fixed: filter -> sort -> paginate.
//! - `total` counts matches after filtering and before pagination.
//! - Bad query parameters are defaulted, never rejected.
//! - A stage that has nothing to do returns its input without visiting items.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Entity-supplied match rule: `(record, filter) -> keep?`.
pub type FilterFn<M> = Box<dyn Fn(&M, &str) -> bool + Send + Sync>;

/// Typed comparator registered for one sortable field.
pub type SortComparator<M> = Box<dyn Fn(&M, &M) -> Ordering + Send + Sync>;

/// Sort direction. Anything other than `asc` reads as descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses a raw query parameter without ever failing.
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

impl From<String> for SortDirection {
    fn from(value: String) -> Self {
        Self::from_param(&value)
    }
}

/// Search request accepted by `Repository::get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchInput {
    /// 1-indexed page. Missing, zero or unparsable means page 1.
    #[serde(deserialize_with = "lenient_positive")]
    pub page: Option<u32>,
    /// Page size. Missing, zero or unparsable means 15.
    #[serde(deserialize_with = "lenient_positive")]
    pub per_page: Option<u32>,
    /// Sort field; ignored unless registered as sortable.
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    /// Passed verbatim to the entity filter predicate.
    pub filter: Option<String>,
}

impl SearchInput {
    /// Effective page after defaulting.
    pub fn effective_page(&self) -> u32 {
        normalize_positive(self.page, DEFAULT_PAGE)
    }

    /// Effective page size after defaulting.
    pub fn effective_per_page(&self) -> u32 {
        normalize_positive(self.per_page, DEFAULT_PER_PAGE)
    }
}

/// Search result envelope.
///
/// Everything except `data` and `total` echoes the effective request so
/// callers can build pagination links without resending it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutput<M> {
    pub data: Vec<M>,
    pub total: usize,
    pub current_page: u32,
    pub per_page: u32,
    pub sort: Option<String>,
    pub sort_dir: Option<SortDirection>,
    pub filter: Option<String>,
}

/// Ordering applied when the caller names no sort field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSort {
    pub field: String,
    pub direction: SortDirection,
}

/// Whitelist of sortable fields mapped to typed comparators.
pub struct SortableFields<M> {
    fields: BTreeMap<String, SortComparator<M>>,
}

impl<M: 'static> SortableFields<M> {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Registers `name` with an explicit comparator (e.g. floats via `total_cmp`).
    pub fn with_comparator<C>(mut self, name: impl Into<String>, compare: C) -> Self
    where
        C: Fn(&M, &M) -> Ordering + Send + Sync + 'static,
    {
        self.fields.insert(name.into(), Box::new(compare));
        self
    }

    /// Registers `name` ordered by the natural ordering of an extracted key.
    pub fn with_key<K, F>(self, name: impl Into<String>, key: F) -> Self
    where
        K: Ord,
        F: Fn(&M) -> K + Send + Sync + 'static,
    {
        self.with_comparator(name, move |a, b| key(a).cmp(&key(b)))
    }

    pub fn comparator(&self, name: &str) -> Option<&SortComparator<M>> {
        self.fields.get(name)
    }
}

impl<M: 'static> Default for SortableFields<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive substring containment, the usual text filter rule.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter stage.
///
/// A missing filter returns `items` untouched and never calls `predicate`.
/// Any present value, empty included, goes to `predicate` as is.
pub fn apply_filter<'a, M, F>(items: Vec<&'a M>, filter: Option<&str>, predicate: F) -> Vec<&'a M>
where
    F: Fn(&M, &str) -> bool,
{
    let Some(filter) = filter else {
        return items;
    };

    items
        .into_iter()
        .filter(|item| predicate(*item, filter))
        .collect()
}

/// Sort stage.
///
/// Unregistered or missing `sort` returns `items` untouched. Direction
/// defaults to descending. Ties keep their input order.
pub fn apply_sort<'a, M>(
    mut items: Vec<&'a M>,
    sort: Option<&str>,
    sort_dir: Option<SortDirection>,
    fields: &SortableFields<M>,
) -> Vec<&'a M>
where
    M: 'static,
{
    let Some(compare) = sort.and_then(|name| fields.comparator(name)) else {
        return items;
    };

    match sort_dir.unwrap_or(SortDirection::Desc) {
        SortDirection::Asc => items.sort_by(|a, b| compare(*a, *b)),
        SortDirection::Desc => items.sort_by(|a, b| compare(*b, *a)),
    }
    items
}

/// Pagination stage. Out-of-range pages yield an empty slice.
pub fn apply_paginate<'a, M>(items: Vec<&'a M>, page: u32, per_page: u32) -> Vec<&'a M> {
    let per_page = per_page as usize;
    let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);
    items.into_iter().skip(start).take(per_page).collect()
}

/// Runs the full pipeline over `items` and shapes the output envelope.
///
/// `default_sort` only applies when the request names no sort field; its
/// direction only applies when the request names no direction either.
pub fn run_search<M, F>(
    items: &[M],
    input: &SearchInput,
    predicate: F,
    fields: &SortableFields<M>,
    default_sort: Option<&DefaultSort>,
) -> SearchOutput<M>
where
    M: Clone + 'static,
    F: Fn(&M, &str) -> bool,
{
    let current_page = input.effective_page();
    let per_page = input.effective_per_page();

    let (sort, sort_dir) = match (input.sort.as_deref(), default_sort) {
        (Some(field), _) => (Some(field), input.sort_dir),
        (None, Some(default)) => (
            Some(default.field.as_str()),
            input.sort_dir.or(Some(default.direction)),
        ),
        (None, None) => (None, input.sort_dir),
    };

    let filtered = apply_filter(items.iter().collect(), input.filter.as_deref(), predicate);
    let total = filtered.len();
    let ordered = apply_sort(filtered, sort, sort_dir, fields);
    let page = apply_paginate(ordered, current_page, per_page);

    SearchOutput {
        data: page.into_iter().cloned().collect(),
        total,
        current_page,
        per_page,
        sort: input.sort.clone(),
        sort_dir: input.sort_dir,
        filter: input.filter.clone(),
    }
}

/// Raw page parameter as it may arrive from JSON bodies or query strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPageParam {
    Number(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Reads a page parameter, mapping anything that is not a `u32` to `None`.
fn lenient_positive<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<RawPageParam>::deserialize(deserializer)?;
    Ok(match value {
        Some(RawPageParam::Number(number)) => u32::try_from(number).ok(),
        Some(RawPageParam::Text(text)) => text.trim().parse().ok(),
        Some(RawPageParam::Other(_)) | None => None,
    })
}

fn normalize_positive(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(0) | None => default,
        Some(value) => value,
    }
}
