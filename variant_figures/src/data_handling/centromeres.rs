use std::path::PathBuf;

use polars::prelude::*;
use tracing::{info, warn};

use crate::helper_functions::{cast_columns, read_tsv, rename_columns};
use crate::models::columns::{CEN_END, CEN_START, CHROMOSOME};
use crate::models::{Dataset, Result};

/// Header-less centromere BED: chromosome, start, end (bp).
pub struct Centromeres {
    pub path: PathBuf,
}

impl Dataset for Centromeres {
    fn load(&self) -> Result<DataFrame> {
        let df = read_tsv(&self.path, false)?;
        let df = rename_columns(
            df,
            &[("column_1", CHROMOSOME), ("column_2", CEN_START), ("column_3", CEN_END)],
            "centromeres",
        )?;
        let df = cast_columns(df, &[CHROMOSOME], DataType::String)?;
        let df = cast_columns(df, &[CEN_START, CEN_END], DataType::Float64)?;

        let distinct = df.column(CHROMOSOME)?.as_materialized_series().n_unique()?;
        if distinct != df.height() {
            warn!(
                "{} centromere rows for {} chromosomes in {}",
                df.height(),
                distinct,
                self.path.display()
            );
        }

        info!("Centromere intervals for {} chromosomes", distinct);
        Ok(df)
    }
}
