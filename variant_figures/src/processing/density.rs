use polars::prelude::*;
use tracing::debug;

use crate::helper_functions::require_columns;
use crate::models::columns::{CHROMOSOME, CHROM_ID, COUNT, END, NORM_DENSITY, PERCENT_DENSITY, START};
use crate::models::{Result, MITOCHONDRIAL};

/// `count / (end - start)` as `norm_density` and its percentage as `percent_density`.
pub fn interval_density(windows: LazyFrame) -> LazyFrame {
    windows
        .with_column(
            (col(COUNT).cast(DataType::Float64)
                / (col(END) - col(START)).cast(DataType::Float64))
            .alias(NORM_DENSITY),
        )
        .with_column((col(NORM_DENSITY) * lit(100.0)).alias(PERCENT_DENSITY))
}

/// Inner join on `chrom_id` against the chromosome map, dropping the mitochondrial genome.
///
/// Windows whose `chrom_id` has no entry in the map are dropped.
pub fn resolve_chromosomes(windows: LazyFrame, chr_map: &DataFrame) -> LazyFrame {
    windows
        .join(
            chr_map.clone().lazy(),
            [col(CHROM_ID)],
            [col(CHROM_ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .filter(col(CHROMOSOME).neq(lit(MITOCHONDRIAL)))
}

/// Per-window variant density for the per-chromosome strip plots.
pub fn chromosome_density(windows: &DataFrame, chr_map: &DataFrame) -> Result<DataFrame> {
    require_columns(windows, &[CHROM_ID, START, END, COUNT], "window counts")?;
    require_columns(chr_map, &[CHROM_ID, CHROMOSOME], "chromosome map")?;

    let with_density = interval_density(windows.clone().lazy());
    let df = resolve_chromosomes(with_density, chr_map).collect()?;

    debug!(
        "Chromosome density: {} of {} windows kept after join and {} filter",
        df.height(),
        windows.height(),
        MITOCHONDRIAL
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn chr_map() -> DataFrame {
        df![
            "chrom_id" => &["NC_1", "NC_2", "NC_3", "NC_M"],
            "alias" => &["1", "2", "3", "MT"],
            "chromosome" => &["chr1", "chr2", "chr10", "MT"],
        ]
        .unwrap()
    }

    #[test]
    fn percent_density_matches_hand_computed_values() {
        let windows = df![
            "chrom_id" => &["NC_1", "NC_2", "NC_3"],
            "start" => &[0.0, 10_000.0, 40_000.0],
            "end" => &[10_000.0, 20_000.0, 50_000.0],
            "count" => &[50.0, 20.0, 0.0],
        ]
        .unwrap();

        let out = chromosome_density(&windows, &chr_map()).unwrap();
        let out = out
            .sort(["chrom_id"], SortMultipleOptions::default())
            .unwrap();

        let density: Vec<f64> = out.column("norm_density").unwrap().f64().unwrap().into_no_null_iter().collect();
        let percent: Vec<f64> = out.column("percent_density").unwrap().f64().unwrap().into_no_null_iter().collect();

        let expected_density = [0.005, 0.002, 0.0];
        let expected_percent = [0.5, 0.2, 0.0];
        for i in 0..3 {
            assert!((density[i] - expected_density[i]).abs() < 1e-12, "row {i}: {}", density[i]);
            assert!((percent[i] - expected_percent[i]).abs() < 1e-12, "row {i}: {}", percent[i]);
            assert!((percent[i] - density[i] * 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn mitochondrial_and_unmapped_windows_are_dropped() {
        let windows = df![
            "chrom_id" => &["NC_1", "NC_M", "NC_M", "unplaced_7", "NC_3"],
            "start" => &[0.0, 0.0, 10.0, 0.0, 0.0],
            "end" => &[10.0, 10.0, 20.0, 10.0, 10.0],
            "count" => &[1.0, 2.0, 3.0, 4.0, 5.0],
        ]
        .unwrap();

        let out = chromosome_density(&windows, &chr_map()).unwrap();
        assert_eq!(out.height(), 2);
        let chromosomes: Vec<&str> = out.column("chromosome").unwrap().str().unwrap().into_no_null_iter().collect();
        assert!(chromosomes.iter().all(|c| *c != "MT"));
    }

    #[test]
    fn missing_count_column_is_reported() {
        let windows = df![
            "chrom_id" => &["NC_1"],
            "start" => &[0.0],
            "end" => &[10.0],
        ]
        .unwrap();
        let err = chromosome_density(&windows, &chr_map()).unwrap_err();
        assert!(matches!(err, crate::models::FigureError::MissingColumn { .. }));
    }
}
