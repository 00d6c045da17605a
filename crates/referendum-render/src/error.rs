//! Error types for geometry loading and map rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading geometries or rendering the map.
#[derive(Debug, Error)]
pub enum RenderError {
    // === Geometry Source Errors ===
    /// Geometry file not found.
    #[error("geometry source not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the geometry file.
    #[error("failed to read geometry source {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Geometry file is not a valid GeoJSON feature collection.
    #[error("invalid GeoJSON in {path}: {source}")]
    GeoJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A feature lacks the property naming its region.
    #[error("feature {feature} has no '{property}' property")]
    MissingProperty {
        feature: usize,
        property: &'static str,
    },

    /// A feature geometry cannot be drawn.
    #[error("feature {feature} has invalid geometry: {reason}")]
    InvalidGeometry { feature: usize, reason: String },

    // === Table Errors ===
    /// Column expected by the renderer not found.
    #[error("column '{column}' not found in results table")]
    MissingColumn { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    // === Output Errors ===
    /// Failed to produce or write the rendered document.
    #[error("failed to write map {path}: {message}")]
    Write { path: PathBuf, message: String },
}

impl From<polars::prelude::PolarsError> for RenderError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
