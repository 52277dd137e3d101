//! Label handling shared by the figure transforms: natural ordering of
//! chromosome names, zero-padding of single-digit chromosomes and the
//! structural-variant type relabel.

use std::cmp::Ordering;
use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;

use crate::models::columns::{CHROMOSOME, SV_TYPE};
use crate::models::Result;

/// Breakend code as emitted by the SV caller and its display synonym.
pub const BREAKEND_CODE: &str = "BND";
pub const TRANSLOCATION_LABEL: &str = "TRN";

static SINGLE_DIGIT_CHROMOSOME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chr(\d)\b").expect("static chromosome pattern"));

/// `chr1` -> `chr01`; anything else (including `chr01`, `chr10`, `chrX`) is returned unchanged.
pub fn pad_chromosome_label(label: &str) -> String {
    SINGLE_DIGIT_CHROMOSOME
        .replace(label, "chr0${1}")
        .into_owned()
}

/// Zero-pad the `chromosome` column so lexicographic order matches numeric order.
pub fn zero_pad_chromosomes(mut df: DataFrame) -> Result<DataFrame> {
    let padded: StringChunked = df
        .column(CHROMOSOME)?
        .str()?
        .into_iter()
        .map(|label| label.map(pad_chromosome_label))
        .collect();
    df.with_column(padded.with_name(PlSmallStr::from(CHROMOSOME)))?;
    Ok(df)
}

/// Rewrites `sv_type` values exactly equal to `BND` as `TRN`.
pub fn relabel_breakends() -> Expr {
    when(col(SV_TYPE).eq(lit(BREAKEND_CODE)))
        .then(lit(TRANSLOCATION_LABEL))
        .otherwise(col(SV_TYPE))
        .alias(SV_TYPE)
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (i, c) in s.char_indices() {
        let digit = c.is_ascii_digit();
        match in_digits {
            Some(prev) if prev != digit => {
                out.push(if prev { Chunk::Digits(&s[start..i]) } else { Chunk::Text(&s[start..i]) });
                start = i;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if let Some(prev) = in_digits {
        out.push(if prev { Chunk::Digits(&s[start..]) } else { Chunk::Text(&s[start..]) });
    }
    out
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a_trim = a.trim_start_matches('0');
    let b_trim = b.trim_start_matches('0');
    a_trim
        .len()
        .cmp(&b_trim.len())
        .then_with(|| a_trim.cmp(b_trim))
        // "1" before "01"
        .then_with(|| a.len().cmp(&b.len()))
}

/// Digit-aware string comparison: `chr2 < chr10`, and a number sorts before
/// text at the same position (`chr10 < chrX`).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digit_runs(x, y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn natural_order_of_chromosomes() {
        let mut labels = vec!["chrX", "chr10", "chr2", "chr1", "chrY", "chr22"];
        labels.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(labels, vec!["chr1", "chr2", "chr10", "chr22", "chrX", "chrY"]);
    }

    #[test]
    fn natural_order_handles_bare_numbers_and_padding() {
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("10", "X"), Ordering::Less);
        assert_eq!(natural_cmp("chr01", "chr2"), Ordering::Less);
        assert_eq!(natural_cmp("chr1", "chr01"), Ordering::Less);
        assert_eq!(natural_cmp("chr3", "chr3"), Ordering::Equal);
    }

    #[test]
    fn padding_only_touches_single_digits() {
        assert_eq!(pad_chromosome_label("chr1"), "chr01");
        assert_eq!(pad_chromosome_label("chr9"), "chr09");
        assert_eq!(pad_chromosome_label("chr10"), "chr10");
        assert_eq!(pad_chromosome_label("chrX"), "chrX");
        assert_eq!(pad_chromosome_label("chr1_random"), "chr1_random");
    }

    #[test]
    fn padding_is_idempotent() {
        for label in ["chr1", "chr01", "chr7", "chr12", "chrX", "MT"] {
            let once = pad_chromosome_label(label);
            assert_eq!(pad_chromosome_label(&once), once);
        }

        let df = df!["chromosome" => &["chr1", "chr11", "chrX"]].unwrap();
        let once = zero_pad_chromosomes(df).unwrap();
        let twice = zero_pad_chromosomes(once.clone()).unwrap();
        assert!(once.equals(&twice));
        let labels: Vec<&str> = once.column("chromosome").unwrap().str().unwrap().into_no_null_iter().collect();
        assert_eq!(labels, vec!["chr01", "chr11", "chrX"]);
    }

    #[test]
    fn breakend_relabel_matches_exactly() {
        let df = df!["sv_type" => &["BND", "DEL", "BNDX", "INS", "bnd"]].unwrap();
        let out = df.lazy().with_column(relabel_breakends()).collect().unwrap();
        let types: Vec<&str> = out.column("sv_type").unwrap().str().unwrap().into_no_null_iter().collect();
        assert_eq!(types, vec!["TRN", "DEL", "BNDX", "INS", "bnd"]);
    }
}
