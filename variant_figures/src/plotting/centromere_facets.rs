use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::helper_functions::{f64_values, str_values};
use crate::models::columns::{CEN_END, CEN_START, CHROMOSOME, MIDPOINT, PERCENT_DENSITY};
use crate::models::Result;
use crate::plotting::facets::{draw_centromere, facet_areas, facet_chart, facet_ranges, facet_rows, FACET_COLUMNS};
use crate::plotting::palettes::{pick, CATEGORY20B};
use crate::plotting::{category_order, render_err, save_figure, Figure, RenderScale};

pub const PPI: u32 = 300;
pub const TITLE: &str = "Variant Distribution from Chromosomal End to Centromeric Region at 500 Kbp Resolution";
const TABLE: &str = "centromere-relative density";

const FACET_WIDTH: u32 = 280;
const FACET_HEIGHT: u32 = 190;
const TITLE_HEIGHT: u32 = 40;

#[derive(Debug, Clone)]
pub struct ChromosomeFacet {
    pub chromosome: String,
    /// (window midpoint in Mbp, percent density)
    pub points: Vec<(f64, f64)>,
    /// Centromere start/end in Mbp
    pub centromere: Option<(f64, f64)>,
}

/// One panel per chromosome with the window densities and the centromere box.
#[derive(Debug, Clone)]
pub struct CentromereFacets {
    pub title: String,
    pub facets: Vec<ChromosomeFacet>,
}

impl CentromereFacets {
    pub fn from_frame(df: &DataFrame, sorted_chromosomes: &[String]) -> Result<Self> {
        let chromosomes = str_values(df, CHROMOSOME, TABLE)?;
        let midpoints = f64_values(df, MIDPOINT, TABLE)?;
        let percent = f64_values(df, PERCENT_DENSITY, TABLE)?;
        let cen_start = f64_values(df, CEN_START, TABLE)?;
        let cen_end = f64_values(df, CEN_END, TABLE)?;

        let order = category_order(sorted_chromosomes, chromosomes.iter().flatten().map(String::as_str));
        let mut facets: Vec<ChromosomeFacet> = order
            .into_iter()
            .map(|chromosome| ChromosomeFacet {
                chromosome,
                points: Vec::new(),
                centromere: None,
            })
            .collect();

        for i in 0..df.height() {
            let Some(chromosome) = &chromosomes[i] else {
                continue;
            };
            let Some(facet) = facets.iter_mut().find(|f| &f.chromosome == chromosome) else {
                continue;
            };
            if let (Some(x), Some(y)) = (midpoints[i], percent[i]) {
                facet.points.push((x, y));
            }
            if facet.centromere.is_none() {
                if let (Some(start), Some(end)) = (cen_start[i], cen_end[i]) {
                    facet.centromere = Some((start, end));
                }
            }
        }

        Ok(CentromereFacets {
            title: TITLE.to_string(),
            facets,
        })
    }
}

impl Figure for CentromereFacets {
    fn size(&self) -> (u32, u32) {
        let rows = facet_rows(self.facets.len()) as u32;
        (FACET_WIDTH * FACET_COLUMNS as u32, TITLE_HEIGHT + FACET_HEIGHT * rows)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, scale: RenderScale) -> Result<()> {
        let root = root.titled(&self.title, scale.font(16)).map_err(render_err)?;

        for (i, (facet, area)) in self
            .facets
            .iter()
            .zip(facet_areas(&root, self.facets.len()))
            .enumerate()
        {
            let (x_range, y_range) = facet_ranges(
                facet.points.iter().map(|p| p.0),
                facet.points.iter().map(|p| p.1),
                facet.centromere,
            );
            let mut chart = facet_chart(
                &area,
                &facet.chromosome,
                x_range,
                y_range.clone(),
                "Percentage of Variant",
                scale,
            )?;

            if let Some(centromere) = facet.centromere {
                draw_centromere(&mut chart, centromere, &y_range, scale)?;
            }

            let color = pick(CATEGORY20B, i);
            let radius = scale.px(3);
            chart
                .draw_series(
                    facet
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), radius, color.filled())),
                )
                .map_err(render_err)?;
        }
        Ok(())
    }
}

/// Figure 2.
pub fn plot_var_per_chr(df: &DataFrame, sorted_chromosomes: &[String], save_name: &str, out_dir: &Path) -> Result<CentromereFacets> {
    let chart = CentromereFacets::from_frame(df, sorted_chromosomes)?;
    save_figure(&chart, out_dir, save_name, PPI)?;
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FigureError;
    use polars::df;

    fn table() -> DataFrame {
        df![
            "chromosome" => &["chr01", "chr01", "chr10", "chr02"],
            "midpoint" => &[0.25, 0.75, 1.25, 0.25],
            "percent_density" => &[0.01, 0.02, 0.05, 0.0],
            "cen_start" => &[120.0, 120.0, 40.0, 60.0],
            "cen_end" => &[125.0, 125.0, 42.5, 61.0],
        ]
        .unwrap()
    }

    #[test]
    fn rows_are_grouped_into_ordered_facets() {
        let order: Vec<String> = ["chr01", "chr02", "chr10"].iter().map(|s| s.to_string()).collect();
        let chart = CentromereFacets::from_frame(&table(), &order).unwrap();

        let names: Vec<&str> = chart.facets.iter().map(|f| f.chromosome.as_str()).collect();
        assert_eq!(names, vec!["chr01", "chr02", "chr10"]);
        assert_eq!(chart.facets[0].points, vec![(0.25, 0.01), (0.75, 0.02)]);
        assert_eq!(chart.facets[0].centromere, Some((120.0, 125.0)));
        assert_eq!(chart.facets[2].centromere, Some((40.0, 42.5)));
        assert_eq!(chart.size(), (840, 230));
    }

    #[test]
    fn missing_centromere_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let df = table().drop("cen_end").unwrap();

        let err = plot_var_per_chr(&df, &[], "Figure2", dir.path()).unwrap_err();
        assert!(matches!(err, FigureError::MissingColumn { ref column, .. } if column == "cen_end"));
        assert!(!dir.path().join("Figure2.png").exists());
    }
}
