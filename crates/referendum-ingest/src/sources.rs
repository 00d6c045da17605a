//! Source configuration and the all-or-nothing loader.

use std::fmt;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use referendum_model::{
    DEPARTMENT_COLUMNS, REFERENDUM_COLUMNS, REGION_COLUMNS, VOTE_COLUMNS,
};

use crate::csv::{cast_count_columns, read_text_table, require_columns};
use crate::error::Result;

/// Default file name of the referendum results source.
pub const REFERENDUM_FILE: &str = "referendum.csv";
/// Default file name of the regions reference source.
pub const REGIONS_FILE: &str = "regions.csv";
/// Default file name of the departments reference source.
pub const DEPARTMENTS_FILE: &str = "departments.csv";

/// Which of the three tabular sources a table or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Referendum,
    Regions,
    Departments,
}

impl SourceKind {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Referendum => "referendum",
            Self::Regions => "regions",
            Self::Departments => "departments",
        }
    }

    /// Columns the source must carry.
    #[must_use]
    pub const fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Referendum => &REFERENDUM_COLUMNS,
            Self::Regions => &REGION_COLUMNS,
            Self::Departments => &DEPARTMENT_COLUMNS,
        }
    }

    /// Columns parsed as integers after loading; everything else stays text.
    #[must_use]
    pub const fn count_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Referendum => &VOTE_COLUMNS,
            Self::Regions | Self::Departments => &[],
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Location and delimiter of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Field delimiter byte.
    pub separator: u8,
}

impl SourceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, separator: u8) -> Self {
        Self {
            path: path.into(),
            separator,
        }
    }
}

/// Explicit source locations passed to [`load_data`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePaths {
    pub referendum: SourceFile,
    pub regions: SourceFile,
    pub departments: SourceFile,
}

impl SourcePaths {
    /// Default file names inside `dir`: `referendum.csv` (`;`-delimited),
    /// `regions.csv` and `departments.csv` (`,`-delimited).
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            referendum: SourceFile::new(dir.join(REFERENDUM_FILE), b';'),
            regions: SourceFile::new(dir.join(REGIONS_FILE), b','),
            departments: SourceFile::new(dir.join(DEPARTMENTS_FILE), b','),
        }
    }

    fn file(&self, kind: SourceKind) -> &SourceFile {
        match kind {
            SourceKind::Referendum => &self.referendum,
            SourceKind::Regions => &self.regions,
            SourceKind::Departments => &self.departments,
        }
    }
}

/// The three loaded source tables.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub referendum: DataFrame,
    pub regions: DataFrame,
    pub departments: DataFrame,
}

/// Loads one source, checks its required columns and types its count columns.
pub fn load_source(file: &SourceFile, kind: SourceKind) -> Result<DataFrame> {
    let mut df = read_text_table(&file.path, kind, file.separator)?;
    require_columns(&df, kind.required_columns(), kind, &file.path)?;
    cast_count_columns(&mut df, kind.count_columns(), kind)?;
    debug!(
        source = %kind,
        path = %file.path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded source"
    );
    Ok(df)
}

/// Loads the referendum, regions and departments tables.
///
/// Loading is all-or-nothing: the first failing source aborts the load.
pub fn load_data(paths: &SourcePaths) -> Result<SourceTables> {
    let _span = info_span!("load").entered();

    let referendum = load_source(paths.file(SourceKind::Referendum), SourceKind::Referendum)?;
    let regions = load_source(paths.file(SourceKind::Regions), SourceKind::Regions)?;
    let departments = load_source(paths.file(SourceKind::Departments), SourceKind::Departments)?;

    info!(
        referendum_rows = referendum.height(),
        regions = regions.height(),
        departments = departments.height(),
        "sources loaded"
    );

    Ok(SourceTables {
        referendum,
        regions,
        departments,
    })
}
