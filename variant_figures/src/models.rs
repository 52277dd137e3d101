use std::path::PathBuf;

use polars::prelude::{DataFrame, PolarsError};
use thiserror::Error;

/// Named columns used after loading. Input files are positional
/// (`column_1`, `col_8`, ...); loaders rename them to these.
pub mod columns {
    /// Internal chromosome identifier (accession) shared by window tables and the chromosome map.
    pub const CHROM_ID: &str = "chrom_id";
    pub const ALIAS: &str = "alias";
    /// Canonical display name (`chr1`, `chrX`, `MT`, ...).
    pub const CHROMOSOME: &str = "chromosome";
    pub const START: &str = "start";
    pub const END: &str = "end";
    pub const COUNT: &str = "count";

    pub const REGION: &str = "region";
    pub const VARIANT_CLASS: &str = "variant_class";

    pub const SV_TYPE: &str = "sv_type";
    pub const METRIC: &str = "metric";
    pub const VALUE: &str = "value";

    pub const CEN_START: &str = "cen_start";
    pub const CEN_END: &str = "cen_end";

    pub const NORM_DENSITY: &str = "norm_density";
    pub const PERCENT_DENSITY: &str = "percent_density";
    pub const MIDPOINT: &str = "midpoint";
}

/// Resolved chromosome name of the mitochondrial genome.
pub const MITOCHONDRIAL: &str = "MT";

#[derive(Debug, Error)]
pub enum FigureError {
    /// Expected input file or directory is absent
    #[error("Input not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// A transform or an encoding references a column the table does not have
    #[error("Column `{column}` not found in {table}")]
    MissingColumn { column: String, table: String },

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Drawing backend failure
    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FigureError>;

/// A tab-separated input that loads into a table with named columns.
pub trait Dataset {
    fn load(&self) -> Result<DataFrame>;
}
