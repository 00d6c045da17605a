//! Configuration options for the merge pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How referendum rows are attached to the area lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinMode {
    /// Keep only rows whose department resolves to an area.
    #[default]
    Inner,
    /// Keep every referendum row; unresolved rows carry null area fields
    /// and are skipped by the aggregator.
    Left,
}

impl JoinMode {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for JoinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
