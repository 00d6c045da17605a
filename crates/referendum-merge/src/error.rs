//! Error types for the merge and aggregation stages.

use std::fmt;

use polars::prelude::{PolarsError, PolarsResult};
use thiserror::Error;

/// Pipeline stage an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Departments joined onto regions.
    AreaJoin,
    /// Referendum rows joined onto the area lookup.
    ResultJoin,
    /// Per-region sums.
    Aggregate,
}

impl Stage {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AreaJoin => "area join",
            Self::ResultJoin => "result join",
            Self::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while merging or aggregating tables.
///
/// An empty join result is not an error.
#[derive(Debug, Error)]
pub enum MergeError {
    /// An expected column is absent, before or after a join.
    #[error("{stage}: expected column '{column}' not found")]
    SchemaMismatch { stage: Stage, column: String },

    /// Both sides of a join carry a column the canonical schema needs unique.
    #[error("{stage}: column '{column}' exists on both sides of the join")]
    ColumnCollision { stage: Stage, column: String },

    /// The lookup side of a join has a repeated key.
    #[error("{stage}: duplicate key '{value}' in column '{column}'")]
    DuplicateKey {
        stage: Stage,
        column: String,
        value: String,
    },

    /// Failed DataFrame operation.
    #[error("{stage}: DataFrame operation failed: {source}")]
    DataFrame {
        stage: Stage,
        #[source]
        source: PolarsError,
    },
}

impl MergeError {
    /// Stage the error was raised in.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::SchemaMismatch { stage, .. }
            | Self::ColumnCollision { stage, .. }
            | Self::DuplicateKey { stage, .. }
            | Self::DataFrame { stage, .. } => *stage,
        }
    }
}

/// Result type for merge operations.
pub type Result<T> = std::result::Result<T, MergeError>;

/// Attaches the current stage to Polars errors.
pub trait StageContext<T> {
    fn in_stage(self, stage: Stage) -> Result<T>;
}

impl<T> StageContext<T> for PolarsResult<T> {
    fn in_stage(self, stage: Stage) -> Result<T> {
        self.map_err(|source| MergeError::DataFrame { stage, source })
    }
}
