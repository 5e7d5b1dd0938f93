//! Per-request assignment of target fields to source columns.

use anyhow::{Context, Result};
use std::{collections::BTreeMap, io::Read};

use crate::table::Table;

/// The choice that leaves a target field unmapped.
pub const NONE_CHOICE: &str = "None";

/// Target field name -> source column name. Targets without an entry are unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: BTreeMap<String, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `target` to `source`, or unmap it when `source` is `None`.
    pub fn set(&mut self, target: impl Into<String>, source: Option<String>) {
        let target = target.into();
        match source {
            Some(source) => {
                self.entries.insert(target, source);
            }
            None => {
                self.entries.remove(&target);
            }
        }
    }

    pub fn with(mut self, target: impl Into<String>, source: impl Into<String>) -> Self {
        self.set(target, Some(source.into()));
        self
    }

    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.entries.get(target).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, s)| (t.as_str(), s.as_str()))
    }

    /// Apply `other` on top of `self`; entries in `other` win.
    pub fn merge(&mut self, other: ColumnMapping) {
        self.entries.extend(other.entries);
    }

    /// Entries whose source column does not exist in `table`.
    pub fn stale_entries<'a>(&'a self, table: &Table) -> Vec<(&'a str, &'a str)> {
        self.iter()
            .filter(|(_, source)| table.column(source).is_none())
            .collect()
    }

    /// Keys that are not one of `target_fields`.
    pub fn unknown_targets<'a>(&'a self, target_fields: &[&str]) -> Vec<&'a str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|t| !target_fields.contains(t))
            .collect()
    }

    /// Read a JSON object `{"<target>": "<source>" | "None" | null}`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let raw: BTreeMap<String, Option<String>> =
            serde_json::from_reader(reader).context("parsing mapping JSON")?;
        Ok(raw
            .into_iter()
            .filter_map(|(target, source)| {
                source
                    .filter(|s| s != NONE_CHOICE)
                    .map(|s| (target, s))
            })
            .collect())
    }
}

impl<T: Into<String>, S: Into<String>> FromIterator<(T, S)> for ColumnMapping {
    fn from_iter<I: IntoIterator<Item = (T, S)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(t, s)| (t.into(), s.into()))
                .collect(),
        }
    }
}

/// Parse a `TARGET=SOURCE` pair. The target may not contain `=`; the source may.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (target, source) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TARGET=SOURCE, got '{}'", s))?;
    let target = target.trim();
    if target.is_empty() {
        return Err(format!("missing target field in '{}'", s));
    }
    Ok((target.to_string(), source.to_string()))
}
