//! Column matching between two datasets.
//!
//! [`build_mapping()`] pairs each column of the reference dataset with the
//! column of the other dataset that shares its normalized key. The result is
//! partial: reference columns without a counterpart are simply absent.
//!
//! When several columns of the other dataset normalize to the same key, the
//! last one wins. [`MappingReport`] surfaces the columns this shadows.

use std::collections::HashMap;

use serde::Serialize;

use crate::normalize::normalize_key;

/// Reference column -> source column, iterated in reference-column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl ColumnMapping {
    fn insert(&mut self, target: &str, source: &str) {
        match self.positions.get(target) {
            Some(&idx) => self.entries[idx].1 = source.to_string(),
            None => {
                self.positions.insert(target.to_string(), self.entries.len());
                self.entries.push((target.to_string(), source.to_string()));
            }
        }
    }

    /// Source column matched to `target`, if any.
    pub fn get(&self, target: &str) -> Option<&str> {
        self.positions
            .get(target)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, target: &str) -> bool {
        self.positions.contains_key(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(target, source)| (target.as_str(), source.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn build_mapping<A, B>(columns_a: &[A], columns_b: &[B]) -> ColumnMapping
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut by_key: HashMap<String, &str> = HashMap::with_capacity(columns_b.len());
    for column in columns_b {
        let column = column.as_ref();
        by_key.insert(normalize_key(column), column);
    }

    let mut mapping = ColumnMapping::default();
    for column in columns_a {
        let column = column.as_ref();
        match by_key.get(normalize_key(column).as_str()) {
            // An empty source name never counts as a match.
            Some(source) if !source.is_empty() => mapping.insert(column, source),
            _ => {}
        }
    }
    mapping
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedColumn {
    pub target: String,
    pub source: String,
}

/// Outcome of a mapping, from both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub matched: Vec<MatchedColumn>,
    /// Reference columns that will be null in every reconciled record.
    pub unmatched_targets: Vec<String>,
    /// Source columns with no place in the reconciled output.
    pub dropped_sources: Vec<String>,
}

impl MappingReport {
    pub fn new<A, B>(columns_a: &[A], columns_b: &[B], mapping: &ColumnMapping) -> Self
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let matched = mapping
            .iter()
            .map(|(target, source)| MatchedColumn {
                target: target.to_string(),
                source: source.to_string(),
            })
            .collect::<Vec<_>>();
        let unmatched_targets = columns_a
            .iter()
            .map(AsRef::as_ref)
            .filter(|column| !mapping.contains(column))
            .map(str::to_string)
            .collect();
        let dropped_sources = columns_b
            .iter()
            .map(AsRef::as_ref)
            .filter(|column| !matched.iter().any(|m| m.source == *column))
            .map(str::to_string)
            .collect();
        Self {
            matched,
            unmatched_targets,
            dropped_sources,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.unmatched_targets.is_empty() && self.dropped_sources.is_empty()
    }
}
