//! Centromere-relative tables for the faceted per-chromosome figures.
//!
//! Window coordinates and centromere intervals are expressed in megabases,
//! and density is normalised by the fixed 500 kb bin rather than the window
//! length.

use polars::prelude::*;
use tracing::debug;

use crate::helper_functions::require_columns;
use crate::models::columns::{
    CEN_END, CEN_START, CHROMOSOME, CHROM_ID, COUNT, END, MIDPOINT, NORM_DENSITY, PERCENT_DENSITY,
    START, SV_TYPE,
};
use crate::models::Result;
use crate::processing::density::resolve_chromosomes;
use crate::processing::labels::{relabel_breakends, zero_pad_chromosomes};

pub const BIN_SIZE_BP: f64 = 500_000.0;
pub const BP_PER_MBP: f64 = 1_000_000.0;

fn to_mbp(name: &str) -> Expr {
    (col(name).cast(DataType::Float64) / lit(BP_PER_MBP)).alias(name)
}

/// Centromere intervals rescaled from bp to Mbp.
pub fn centromeres_in_mbp(centromeres: &DataFrame) -> Result<LazyFrame> {
    require_columns(centromeres, &[CHROMOSOME, CEN_START, CEN_END], "centromeres")?;
    Ok(centromeres
        .clone()
        .lazy()
        .with_columns([to_mbp(CEN_START), to_mbp(CEN_END)]))
}

/// Density per fixed 500 kb bin plus the window midpoint.
pub fn bin_metrics(windows: LazyFrame) -> LazyFrame {
    let count = col(COUNT).cast(DataType::Float64);
    windows.with_columns([
        (count.clone() / lit(BIN_SIZE_BP)).alias(NORM_DENSITY),
        (count * lit(100.0) / lit(BIN_SIZE_BP)).alias(PERCENT_DENSITY),
        ((col(START) + col(END)) / lit(2.0)).alias(MIDPOINT),
    ])
}

/// Sort by chromosome and position, then zero-pad single-digit labels.
fn finish(lf: LazyFrame) -> Result<DataFrame> {
    let df = lf
        .sort(
            [CHROMOSOME, START],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;
    zero_pad_chromosomes(df)
}

/// Windows resolved to chromosome names, rescaled to Mbp and joined with
/// their chromosome's centromere.
pub fn centromere_relative_density(
    windows: &DataFrame,
    chr_map: &DataFrame,
    centromeres: &DataFrame,
) -> Result<DataFrame> {
    require_columns(windows, &[CHROM_ID, START, END, COUNT], "window counts")?;
    require_columns(chr_map, &[CHROM_ID, CHROMOSOME], "chromosome map")?;
    let centromeres = centromeres_in_mbp(centromeres)?;

    let cleaned = resolve_chromosomes(windows.clone().lazy(), chr_map)
        .with_columns([to_mbp(START), to_mbp(END)])
        .select([col(CHROMOSOME), col(START), col(END), col(COUNT)]);

    let joined = cleaned.join(
        centromeres,
        [col(CHROMOSOME)],
        [col(CHROMOSOME)],
        JoinArgs::new(JoinType::Inner),
    );

    let df = finish(bin_metrics(joined))?;
    debug!(
        "Centromere-relative density: {} of {} windows kept",
        df.height(),
        windows.height()
    );
    Ok(df)
}

/// SV windows (positions already in Mbp) joined with centromeres, with
/// breakends shown as translocations.
pub fn sv_trend_density(sv_windows: &DataFrame, centromeres: &DataFrame) -> Result<DataFrame> {
    require_columns(sv_windows, &[CHROMOSOME, START, END, COUNT, SV_TYPE], "SV windows")?;
    let centromeres = centromeres_in_mbp(centromeres)?;

    let joined = sv_windows.clone().lazy().join(
        centromeres,
        [col(CHROMOSOME)],
        [col(CHROMOSOME)],
        JoinArgs::new(JoinType::Inner),
    );

    let df = finish(bin_metrics(joined).with_column(relabel_breakends()))?;
    debug!("SV trend density: {} of {} windows kept", df.height(), sv_windows.height());
    Ok(df)
}
