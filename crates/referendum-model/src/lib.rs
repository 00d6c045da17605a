//! Table schemas and result types for the referendum map pipeline.
//!
//! # Module Organization
//!
//! - [`schema`]: column names of every source and derived table
//! - [`mapping`]: canonical column mappings applied after joins
//! - [`options`]: join mode selection
//! - [`result`]: typed per-region result rows

pub mod mapping;
pub mod options;
pub mod result;
pub mod schema;

pub use mapping::{ColumnMapping, ColumnRename};
pub use options::JoinMode;
pub use result::{RegionResult, VoteTotals};
pub use schema::{
    ABSTENTIONS, AREA_COLUMNS, CHOICE_A, CHOICE_B, CODE_DEP, CODE_REG, DEPARTMENT_CODE,
    DEPARTMENT_COLUMNS, GEOMETRY_NAME, NAME_DEP, NAME_REG, NULL_BALLOTS, RATIO, REFERENDUM_COLUMNS,
    REGION_COLUMNS, REGISTERED, SOURCE_CODE, SOURCE_NAME, SOURCE_REGION_CODE, VOTE_COLUMNS,
};
