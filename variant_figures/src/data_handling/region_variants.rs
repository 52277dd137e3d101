use std::path::PathBuf;

use polars::prelude::*;
use tracing::info;

use crate::helper_functions::{cast_columns, read_tsv, rename_columns};
use crate::models::columns::{REGION, VARIANT_CLASS};
use crate::models::{Dataset, Result};

/// Annotated variant table (`Variant.bed`, with header). `col_8` holds the
/// variant class and `col_14` the genomic region label.
pub struct RegionVariants {
    pub path: PathBuf,
}

impl Dataset for RegionVariants {
    fn load(&self) -> Result<DataFrame> {
        let df = read_tsv(&self.path, true)?;
        let df = rename_columns(
            df,
            &[("col_8", VARIANT_CLASS), ("col_14", REGION)],
            "region variants",
        )?;
        let df = cast_columns(df, &[VARIANT_CLASS, REGION], DataType::String)?;

        info!("Loaded {} annotated variants", df.height());
        Ok(df)
    }
}
