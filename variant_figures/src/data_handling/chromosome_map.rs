use std::path::PathBuf;

use polars::prelude::*;
use tracing::{error, info};

use crate::helper_functions::{cast_columns, read_tsv, rename_columns};
use crate::models::columns::{ALIAS, CHROMOSOME, CHROM_ID};
use crate::models::{Dataset, Result};

/// Header-less `Genome_text.tsv`: internal id, alias, display name.
pub struct ChromosomeMap {
    pub path: PathBuf,
}

impl Dataset for ChromosomeMap {
    fn load(&self) -> Result<DataFrame> {
        let df = match read_tsv(&self.path, false) {
            Ok(df) => df,
            Err(e) => {
                error!("Failed to read chromosome map: {}", e);
                return Err(e);
            }
        };

        let df = rename_columns(
            df,
            &[("column_1", CHROM_ID), ("column_2", ALIAS), ("column_3", CHROMOSOME)],
            "chromosome map",
        )?;
        let df = cast_columns(df, &[CHROM_ID, ALIAS, CHROMOSOME], DataType::String)?;

        info!("Chromosome map with {} entries", df.height());
        Ok(df)
    }
}
