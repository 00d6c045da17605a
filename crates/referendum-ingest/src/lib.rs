//! Source loading for the referendum map pipeline.
//!
//! Reads the three delimited sources (referendum results, regions,
//! departments) into Polars DataFrames. Every column is read as text so
//! department and region codes keep their leading zeros; only the vote-count
//! columns of the referendum source are converted to `Int64`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use referendum_ingest::{SourcePaths, load_data};
//!
//! let tables = load_data(&SourcePaths::in_dir(Path::new("data")))?;
//! println!("{}", tables.referendum.height());
//! ```

mod csv;
mod error;
mod sources;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{normalize_header, read_text_table};

// === Sources ===
pub use sources::{
    DEPARTMENTS_FILE, REFERENDUM_FILE, REGIONS_FILE, SourceFile, SourceKind, SourcePaths,
    SourceTables, load_data, load_source,
};
