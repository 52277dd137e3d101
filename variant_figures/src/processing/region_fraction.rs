use polars::prelude::*;

use crate::helper_functions::require_columns;
use crate::models::columns::{COUNT, REGION, VARIANT_CLASS};
use crate::models::Result;

/// Number of variants per (region, variant class) pair.
pub fn count_by_region(variants: &DataFrame) -> Result<DataFrame> {
    require_columns(variants, &[REGION, VARIANT_CLASS], "region variants")?;
    let counts = variants
        .clone()
        .lazy()
        .group_by([col(REGION), col(VARIANT_CLASS)])
        .agg([len().cast(DataType::Float64).alias(COUNT)])
        .sort(
            [VARIANT_CLASS, REGION],
            SortMultipleOptions::default(),
        )
        .collect()?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn variants_are_counted_per_region_and_class() {
        let variants = df![
            "region" => &["Exon", "Intron", "Intron", "Exon", "Intergene", "Intron"],
            "variant_class" => &["SNP", "SNP", "SNP", "InDel", "InDel", "InDel"],
        ]
        .unwrap();

        let out = count_by_region(&variants).unwrap();
        assert_eq!(out.height(), 5);

        let classes: Vec<&str> = out.column("variant_class").unwrap().str().unwrap().into_no_null_iter().collect();
        let regions: Vec<&str> = out.column("region").unwrap().str().unwrap().into_no_null_iter().collect();
        let counts: Vec<f64> = out.column("count").unwrap().f64().unwrap().into_no_null_iter().collect();

        let rows: Vec<(&str, &str, f64)> = classes
            .into_iter()
            .zip(regions)
            .zip(counts)
            .map(|((c, r), n)| (c, r, n))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("InDel", "Exon", 1.0),
                ("InDel", "Intergene", 1.0),
                ("InDel", "Intron", 1.0),
                ("SNP", "Exon", 1.0),
                ("SNP", "Intron", 2.0),
            ]
        );
    }
}
