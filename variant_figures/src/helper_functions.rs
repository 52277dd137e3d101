use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, error, info};

use crate::models::columns::{COUNT, END, START};
use crate::models::{FigureError, Result};
use crate::processing::labels::natural_cmp;

pub fn project_root() -> PathBuf {
    match env::var_os("PROJECT_ROOT") {
        Some(val) => PathBuf::from(val),
        None => {
            // Fall back to current directory if PROJECT_ROOT not set
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

/// Read a tab-separated file. Without a header polars names the columns
/// `column_1`, `column_2`, ...
pub fn read_tsv(path: &Path, has_header: bool) -> Result<DataFrame> {
    if !path.is_file() {
        error!("Expected input {} is missing", path.display());
        return Err(FigureError::MissingInput(path.to_path_buf()));
    }

    info!("Reading data from {}", path.display());
    let df = CsvReadOptions::default()
        .with_has_header(has_header)
        .with_parse_options(CsvParseOptions::default().with_separator(b'\t'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!("Loaded {} rows, {} cols", df.height(), df.width());

    Ok(df)
}

pub fn require_columns(df: &DataFrame, required: &[&str], table: &str) -> Result<()> {
    let names = df.get_column_names();
    for &column in required {
        if !names.iter().any(|c| c.as_str() == column) {
            error!("Column `{}` missing from {} (has {:?})", column, table, names);
            return Err(FigureError::MissingColumn {
                column: column.to_string(),
                table: table.to_string(),
            });
        }
    }
    Ok(())
}

/// Rename positional columns to their named counterparts and keep only those.
pub fn rename_columns(mut df: DataFrame, mapping: &[(&str, &str)], table: &str) -> Result<DataFrame> {
    let sources: Vec<&str> = mapping.iter().map(|&(from, _)| from).collect();
    require_columns(&df, &sources, table)?;

    for &(from, to) in mapping {
        if from != to {
            df.rename(from, PlSmallStr::from(to))?;
        }
    }

    let keep: Vec<&str> = mapping.iter().map(|&(_, to)| to).collect();
    Ok(df.select(keep)?)
}

/// Cast `names` to the given dtype, leaving other columns untouched.
pub fn cast_columns(df: DataFrame, names: &[&str], dtype: DataType) -> Result<DataFrame> {
    let exprs: Vec<Expr> = names
        .iter()
        .map(|&name| col(name).cast(dtype.clone()))
        .collect();
    Ok(df.lazy().with_columns(exprs).collect()?)
}

/// Rows breaking `start < end` or `count >= 0`. Zero-length windows would
/// divide by zero in the density step.
pub fn count_invalid_intervals(df: &DataFrame) -> Result<usize> {
    let invalid = df
        .clone()
        .lazy()
        .filter(col(END).lt_eq(col(START)).or(col(COUNT).lt(lit(0.0))))
        .collect()?;
    Ok(invalid.height())
}

pub fn f64_values(df: &DataFrame, column: &str, table: &str) -> Result<Vec<Option<f64>>> {
    require_columns(df, &[column], table)?;
    let casted = df.column(column)?.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

pub fn str_values(df: &DataFrame, column: &str, table: &str) -> Result<Vec<Option<String>>> {
    require_columns(df, &[column], table)?;
    let casted = df.column(column)?.cast(&DataType::String)?;
    Ok(casted
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Unique non-null values of a column in natural (digit-aware) order.
pub fn natural_sorted_unique(df: &DataFrame, column: &str, table: &str) -> Result<Vec<String>> {
    let unique: HashSet<String> = str_values(df, column, table)?.into_iter().flatten().collect();
    let mut values: Vec<String> = unique.into_iter().collect();
    values.sort_by(|a, b| natural_cmp(a, b));
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use std::io::Write;

    #[test]
    fn read_tsv_generates_positional_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows.bed");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "NC_1\t0\t10000\t50").unwrap();
        writeln!(file, "NC_2\t0\t10000\t7").unwrap();

        let df = read_tsv(&path, false).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["column_1", "column_2", "column_3", "column_4"]);
    }

    #[test]
    fn read_tsv_missing_file_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_tsv(&dir.path().join("absent.bed"), false).unwrap_err();
        assert!(matches!(err, FigureError::MissingInput(_)));
    }

    #[test]
    fn rename_keeps_only_mapped_columns() {
        let df = df![
            "column_1" => &["a", "b"],
            "column_2" => &[1i64, 2],
            "column_9" => &[0i64, 0],
        ]
        .unwrap();
        let out = rename_columns(df, &[("column_1", "chrom_id"), ("column_2", "start")], "test").unwrap();
        let names: Vec<&str> = out.get_column_names().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["chrom_id", "start"]);
    }

    #[test]
    fn rename_reports_absent_source_column() {
        let df = df!["column_1" => &["a"]].unwrap();
        let err = rename_columns(df, &[("column_4", "count")], "window counts").unwrap_err();
        match err {
            FigureError::MissingColumn { column, table } => {
                assert_eq!(column, "column_4");
                assert_eq!(table, "window counts");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn invalid_intervals_are_counted() {
        let df = df![
            "start" => &[0.0, 10.0, 5.0],
            "end" => &[10.0, 5.0, 6.0],
            "count" => &[1.0, 1.0, -1.0],
        ]
        .unwrap();
        assert_eq!(count_invalid_intervals(&df).unwrap(), 2);
    }

    #[test]
    fn zero_length_windows_are_invalid() {
        let df = df![
            "start" => &[100.0, 0.0],
            "end" => &[100.0, 10000.0],
            "count" => &[5.0, 5.0],
        ]
        .unwrap();
        assert_eq!(count_invalid_intervals(&df).unwrap(), 1);
    }

    #[test]
    fn unique_values_are_naturally_sorted() {
        let df = df!["chromosome" => &["chr10", "chrX", "chr2", "chr1", "chr2"]].unwrap();
        let sorted = natural_sorted_unique(&df, "chromosome", "test").unwrap();
        assert_eq!(sorted, vec!["chr1", "chr2", "chr10", "chrX"]);
    }
}
