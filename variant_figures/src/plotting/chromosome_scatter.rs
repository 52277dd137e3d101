use std::f64::consts::PI;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::helper_functions::{f64_values, str_values};
use crate::models::columns::{CHROMOSOME, PERCENT_DENSITY};
use crate::models::Result;
use crate::plotting::palettes::{pick, CATEGORY20B};
use crate::plotting::{
    category_label, category_order, category_range, padded_range, render_err, save_figure, Figure,
    RenderScale,
};

pub const PPI: u32 = 300;
pub const TITLE_ALL: &str = "Variant occurrence per chromosome with resolution of 10Kb";
pub const TITLE_HOMOZYGOUS: &str = "Homozygous variant occurrence per chromosome with resolution of 10Kb";
pub const TITLE_HETEROZYGOUS: &str = "Heterozygous variant occurrence per chromosome with resolution of 10Kb";

const TABLE: &str = "chromosome density";
const JITTER_SEED: u64 = 42;
const JITTER_SD: f64 = 0.12;
const JITTER_LIMIT: f64 = 0.4;

/// Strip plot of per-window percentage density, one column per chromosome.
#[derive(Debug, Clone)]
pub struct ChromosomeScatter {
    pub title: String,
    pub chromosomes: Vec<String>,
    /// (chromosome index, percent density)
    pub points: Vec<(usize, f64)>,
}

/// Standard normal sample (Box-Muller).
fn gaussian(rng: &mut StdRng) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

impl ChromosomeScatter {
    pub fn from_frame(df: &DataFrame, sorted_chromosomes: &[String], title: &str) -> Result<Self> {
        let chromosomes_col = str_values(df, CHROMOSOME, TABLE)?;
        let percent = f64_values(df, PERCENT_DENSITY, TABLE)?;

        let chromosomes = category_order(
            sorted_chromosomes,
            chromosomes_col.iter().flatten().map(String::as_str),
        );
        let points = chromosomes_col
            .iter()
            .zip(&percent)
            .filter_map(|(chromosome, value)| {
                let idx = chromosomes.iter().position(|c| Some(c) == chromosome.as_ref())?;
                Some((idx, (*value)?))
            })
            .collect();

        Ok(ChromosomeScatter {
            title: title.to_string(),
            chromosomes,
            points,
        })
    }

    /// Horizontal offsets within each column; seeded so both outputs match.
    pub fn jittered(&self) -> Vec<(f64, f64, usize)> {
        let mut rng = StdRng::seed_from_u64(JITTER_SEED);
        self.points
            .iter()
            .map(|&(idx, y)| {
                let offset = (gaussian(&mut rng) * JITTER_SD).clamp(-JITTER_LIMIT, JITTER_LIMIT);
                (idx as f64 + offset, y, idx)
            })
            .collect()
    }
}

impl Figure for ChromosomeScatter {
    fn size(&self) -> (u32, u32) {
        (160 + 36 * self.chromosomes.len().max(10) as u32, 480)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, scale: RenderScale) -> Result<()> {
        let n = self.chromosomes.len();
        let y_range = padded_range(self.points.iter().map(|p| p.1), 0.05, true);

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, scale.font(16))
            .margin(scale.px(12))
            .x_label_area_size(scale.px(70))
            .y_label_area_size(scale.px(70))
            .build_cartesian_2d(category_range(n), y_range)
            .map_err(render_err)?;

        let x_label_style = TextStyle::from(scale.font(11)).transform(FontTransform::Rotate270);
        chart
            .configure_mesh()
            .x_labels(n.max(1))
            .x_label_style(x_label_style)
            .x_label_formatter(&|v: &f64| category_label(&self.chromosomes, *v))
            .x_desc("Chromosome")
            .y_desc("Percentage of Variant")
            .label_style(scale.font(11))
            .axis_desc_style(scale.font(13))
            .draw()
            .map_err(render_err)?;

        let radius = scale.px(2);
        chart
            .draw_series(
                self.jittered()
                    .into_iter()
                    .map(|(x, y, idx)| Circle::new((x, y), radius, pick(CATEGORY20B, idx).filled())),
            )
            .map_err(render_err)?;

        Ok(())
    }
}

/// Figure 1B and the zygosity supplements.
pub fn plot_var_chr(
    df: &DataFrame,
    sorted_chromosomes: &[String],
    save_name: &str,
    title: &str,
    out_dir: &Path,
) -> Result<ChromosomeScatter> {
    let chart = ChromosomeScatter::from_frame(df, sorted_chromosomes, title)?;
    save_figure(&chart, out_dir, save_name, PPI)?;
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FigureError;
    use polars::df;

    fn order() -> Vec<String> {
        ["chr1", "chr2", "chr10", "chrX"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn points_follow_the_given_chromosome_order() {
        let df = df![
            "chromosome" => &["chr10", "chr1", "chrX", "chr1"],
            "percent_density" => &[0.5, 0.2, 0.1, 0.3],
        ]
        .unwrap();

        let chart = ChromosomeScatter::from_frame(&df, &order(), TITLE_ALL).unwrap();
        // chr2 has no windows here and is left out
        assert_eq!(chart.chromosomes, vec!["chr1", "chr10", "chrX"]);
        assert_eq!(chart.points, vec![(1, 0.5), (0, 0.2), (2, 0.1), (0, 0.3)]);
    }

    #[test]
    fn jitter_is_reproducible_and_bounded() {
        let df = df![
            "chromosome" => &["chr1"; 50],
            "percent_density" => &[1.0; 50],
        ]
        .unwrap();
        let chart = ChromosomeScatter::from_frame(&df, &order(), TITLE_ALL).unwrap();

        let first = chart.jittered();
        assert_eq!(first, chart.jittered());
        assert!(first.iter().all(|(x, _, _)| x.abs() <= JITTER_LIMIT));
        assert!(first.iter().any(|(x, _, _)| *x != 0.0));
    }

    #[test]
    fn missing_density_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let df = df!["chromosome" => &["chr1"], "norm_density" => &[0.1]].unwrap();

        let err = plot_var_chr(&df, &order(), "Figure1B", TITLE_ALL, dir.path()).unwrap_err();
        assert!(matches!(err, FigureError::MissingColumn { ref column, .. } if column == "percent_density"));
        assert!(!dir.path().join("Figure1B.svg").exists());
    }
}
