//! Relational core of the referendum map pipeline.
//!
//! Three stages, each taking immutable frames and returning a new one:
//!
//! 1. [`merge_regions_and_departments`]: departments left-joined onto regions,
//!    projected onto `{code_reg, name_reg, code_dep, name_dep}`
//! 2. [`merge_referendum_and_areas`]: referendum rows joined onto that lookup
//!    on zero-padded department codes
//! 3. [`compute_referendum_result_by_regions`]: vote counts summed per region
//!
//! Errors carry the [`Stage`] they were raised in.

mod aggregate;
mod areas;
mod error;
mod frame;
mod results;

pub use aggregate::{compute_referendum_result_by_regions, region_results};
pub use areas::merge_regions_and_departments;
pub use error::{MergeError, Result, Stage, StageContext};
pub use results::merge_referendum_and_areas;
