//! Structural-variant summaries. Both files carry a header.

use std::path::PathBuf;

use polars::prelude::*;
use tracing::{info, warn};

use crate::helper_functions::{cast_columns, count_invalid_intervals, read_tsv, rename_columns};
use crate::models::columns::{CHROMOSOME, COUNT, END, METRIC, START, SV_TYPE, VALUE};
use crate::models::{Dataset, Result};

/// `SV_type_Median_Length.tsv`: one row per (SVTYPE, Metric) with its Value.
pub struct SvLengths {
    pub path: PathBuf,
}

impl Dataset for SvLengths {
    fn load(&self) -> Result<DataFrame> {
        let df = read_tsv(&self.path, true)?;
        let df = rename_columns(
            df,
            &[("SVTYPE", SV_TYPE), ("Metric", METRIC), ("Value", VALUE)],
            "SV lengths",
        )?;
        let df = cast_columns(df, &[SV_TYPE, METRIC], DataType::String)?;
        let df = cast_columns(df, &[VALUE], DataType::Float64)?;

        info!("Loaded {} SV length metrics", df.height());
        Ok(df)
    }
}

/// `merged_SV_df.tsv`: SV counts per 500 kb window, positions already in Mbp.
/// Besides `Chromosome` and `Type` the file keeps the positional names of
/// the table it was derived from.
pub struct SvWindows {
    pub path: PathBuf,
}

impl Dataset for SvWindows {
    fn load(&self) -> Result<DataFrame> {
        let df = read_tsv(&self.path, true)?;
        let df = rename_columns(
            df,
            &[
                ("Chromosome", CHROMOSOME),
                ("column_2", START),
                ("column_3", END),
                ("column_4", COUNT),
                ("Type", SV_TYPE),
            ],
            "SV windows",
        )?;
        let df = cast_columns(df, &[CHROMOSOME, SV_TYPE], DataType::String)?;
        let df = cast_columns(df, &[START, END, COUNT], DataType::Float64)?;

        let invalid = count_invalid_intervals(&df)?;
        if invalid > 0 {
            warn!("{} SV windows have end <= start or a negative count", invalid);
        }

        info!("Loaded {} SV windows", df.height());
        Ok(df)
    }
}
