//! Shared utilities for the referendum map workspace.
//!
//! - [`codes`]: identifier normalization (zero-padded department codes)
//! - [`polars`]: Polars `AnyValue` conversions and numeric parsing

pub mod codes;
pub mod polars;

pub use codes::{DEPARTMENT_CODE_WIDTH, pad_code, pad_department_code};
pub use polars::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_i64};
