//! Canonical column mappings.
//!
//! A join between two tables that share column names leaves the output with
//! whatever suffixing scheme the join engine applies. A [`ColumnMapping`]
//! pins the post-join schema: it lists, in output order, which joined column
//! becomes which canonical column. Columns not listed are dropped.

use serde::{Deserialize, Serialize};

/// One `source -> target` entry of a [`ColumnMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    /// Column name as produced by the join.
    pub source: String,
    /// Canonical column name.
    pub target: String,
}

/// Ordered mapping from joined column names to a canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    renames: Vec<ColumnRename>,
}

impl ColumnMapping {
    /// Builds a mapping from `(source, target)` pairs in output order.
    #[must_use]
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            renames: pairs
                .iter()
                .map(|&(source, target)| ColumnRename {
                    source: source.to_string(),
                    target: target.to_string(),
                })
                .collect(),
        }
    }

    /// Mapping that keeps `columns` under their own names.
    #[must_use]
    pub fn identity<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            renames: columns
                .into_iter()
                .map(|column| ColumnRename {
                    source: column.as_ref().to_string(),
                    target: column.as_ref().to_string(),
                })
                .collect(),
        }
    }

    /// Appends the entries of `other` after those of `self`.
    #[must_use]
    pub fn then(mut self, other: ColumnMapping) -> Self {
        self.renames.extend(other.renames);
        self
    }

    /// Entries in output order.
    pub fn renames(&self) -> &[ColumnRename] {
        &self.renames
    }

    /// Canonical column names in output order.
    pub fn targets(&self) -> impl Iterator<Item = &str> + '_ {
        self.renames.iter().map(|rename| rename.target.as_str())
    }

    /// Returns the first source column missing from `available`.
    pub fn first_missing<'a, I>(&self, available: I) -> Option<&str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let available: Vec<&str> = available.into_iter().collect();
        self.renames
            .iter()
            .map(|rename| rename.source.as_str())
            .find(|source| !available.contains(source))
    }
}
