//! Delimited source reading.

mod header;
mod reader;

pub use header::normalize_header;
pub use reader::{cast_count_columns, read_text_table, require_columns};
