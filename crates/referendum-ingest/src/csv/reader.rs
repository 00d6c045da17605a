//! Delimited file reading with identifier columns kept as text.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, DataType, NamedFrom, SerReader, Series};

use referendum_common::parse_i64;

use crate::error::{IngestError, Result};
use crate::sources::SourceKind;

use super::header::normalize_header;

fn open_error(kind: SourceKind, path: &Path, err: std::io::Error) -> IngestError {
    if err.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            source_kind: kind,
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            source_kind: kind,
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Checks that the source exists and is not UTF-16 encoded.
///
/// UTF-8 with or without BOM is accepted.
pub fn validate_source_file(path: &Path, kind: SourceKind) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(kind, path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        source_kind: kind,
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                source_kind: kind,
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                source_kind: kind,
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a delimited file into a DataFrame where every column is `String`.
///
/// Schema inference is disabled so codes such as `"01"` keep their leading
/// zero. Header names are trimmed and stripped of a UTF-8 BOM.
pub fn read_text_table(path: &Path, kind: SourceKind, separator: u8) -> Result<DataFrame> {
    validate_source_file(path, kind)?;

    let parse_error = |e: polars::prelude::PolarsError| IngestError::CsvParse {
        source_kind: kind,
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_error)?
        .finish()
        .map_err(parse_error)?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_header(name.as_str()))
        .collect();
    df.set_column_names(names)?;

    Ok(df)
}

/// Fails on the first column of `required` absent from `df`.
pub fn require_columns(df: &DataFrame, required: &[&str], kind: SourceKind, path: &Path) -> Result<()> {
    for column in required {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                source_kind: kind,
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Replaces text count columns with `Int64` columns.
///
/// Blank cells become null; any other non-integer value is an error naming
/// the column, the 1-based data row and the offending value.
pub fn cast_count_columns(df: &mut DataFrame, columns: &[&str], kind: SourceKind) -> Result<()> {
    for column in columns {
        let values = df.column(column)?;
        if values.dtype() == &DataType::Int64 {
            continue;
        }
        let text = values.str()?;
        let mut parsed: Vec<Option<i64>> = Vec::with_capacity(text.len());
        for (idx, value) in text.into_iter().enumerate() {
            match value {
                None => parsed.push(None),
                Some(raw) if raw.trim().is_empty() => parsed.push(None),
                Some(raw) => match parse_i64(raw) {
                    Some(number) => parsed.push(Some(number)),
                    None => {
                        return Err(IngestError::InvalidNumeric {
                            source_kind: kind,
                            column: (*column).to_string(),
                            row: idx + 1,
                            value: raw.to_string(),
                        });
                    }
                },
            }
        }
        df.with_column(Series::new((*column).into(), parsed))?;
    }
    Ok(())
}
