//
//  bitbucket-lite
//  api/common/filters.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query filters for list endpoints.
//!
//! Filters are opaque to the client: keys such as `sort`, `pagelen`,
//! `target.branch`, `exclude` or `q` go to the server as they are given.
//! They are serialized in key order so the same filter map always produces
//! the same query string.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_lite::api::common::Filters;
//!
//! let filters = Filters::new()
//!     .with("sort", "-created_on")
//!     .with("pagelen", 20);
//!
//! assert_eq!(
//!     filters.to_query(),
//!     vec![
//!         ("pagelen".to_string(), "20".to_string()),
//!         ("sort".to_string(), "-created_on".to_string()),
//!     ]
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// A single filter value.
///
/// Enum-like values (pull request states, sort orders) convert into `Text`
/// through their `From` implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Sort order on a field, rendered the way Bitbucket expects (`-field` for
/// descending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Ascending(String),
    Descending(String),
}

impl SortOrder {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self::Ascending(field.into())
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::Descending(field.into())
    }
}

impl From<SortOrder> for FilterValue {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending(field) => FilterValue::Text(field),
            SortOrder::Descending(field) => FilterValue::Text(format!("-{field}")),
        }
    }
}

/// Ordered map of query parameters applied to the first request of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    entries: BTreeMap<String, FilterValue>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> Option<FilterValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Sets `key` only when it is not already present.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<FilterValue>) {
        self.entries.entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serializes the filters as query pairs in key order.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (key, value) in iter {
            filters.insert(key, value);
        }
        filters
    }
}

impl<K, V> Extend<(K, V)> for Filters
where
    K: Into<String>,
    V: Into<FilterValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Parses a `key=value` pair as given on the command line.
///
/// Integers in canonical form become [`FilterValue::Number`], `true`/`false`
/// become [`FilterValue::Flag`], everything else is text. Values such as
/// `007` or `+5` stay text so they reach the server unchanged. The value may
/// itself contain `=` (Bitbucket's `q` language uses it).
pub fn parse_filter(input: &str) -> Result<(String, FilterValue), String> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{input}': expected KEY=VALUE"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid filter '{input}': empty key"));
    }

    let value = if let Some(n) = value.parse::<i64>().ok().filter(|n| n.to_string() == value) {
        FilterValue::Number(n)
    } else if let Ok(flag) = value.parse::<bool>() {
        FilterValue::Flag(flag)
    } else {
        FilterValue::Text(value.to_string())
    };

    Ok((key.to_string(), value))
}
