use std::path::PathBuf;

use polars::prelude::*;
use tracing::{info, warn};

use crate::helper_functions::{cast_columns, count_invalid_intervals, read_tsv, rename_columns};
use crate::models::columns::{CHROM_ID, COUNT, END, START};
use crate::models::{Dataset, Result};

/// Header-less per-window variant counts (`bedtools intersect -c` style):
/// chrom_id, start, end, count.
pub struct WindowCounts {
    pub path: PathBuf,
}

impl Dataset for WindowCounts {
    fn load(&self) -> Result<DataFrame> {
        let df = read_tsv(&self.path, false)?;
        let df = rename_columns(
            df,
            &[
                ("column_1", CHROM_ID),
                ("column_2", START),
                ("column_3", END),
                ("column_4", COUNT),
            ],
            "window counts",
        )?;
        let df = cast_columns(df, &[CHROM_ID], DataType::String)?;
        let df = cast_columns(df, &[START, END, COUNT], DataType::Float64)?;

        let invalid = count_invalid_intervals(&df)?;
        if invalid > 0 {
            warn!(
                "{} windows in {} have end <= start or a negative count",
                invalid,
                self.path.display()
            );
        }

        info!("Loaded {} windows from {}", df.height(), self.path.display());
        Ok(df)
    }
}
