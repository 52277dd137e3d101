use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::helper_functions::{f64_values, natural_sorted_unique, str_values};
use crate::models::columns::{CEN_END, CEN_START, CHROMOSOME, COUNT, START, SV_TYPE};
use crate::models::Result;
use crate::plotting::facets::{draw_centromere, facet_areas, facet_chart, facet_ranges, facet_rows, FACET_COLUMNS};
use crate::plotting::loess::{loess, DEFAULT_BANDWIDTH};
use crate::plotting::palettes::{pick, SET1};
use crate::plotting::{draw_legend, render_err, save_figure, Figure, RenderScale};

pub const PPI: u32 = 450;
pub const TITLE: &str = "Variant Distribution from Chromosomal End to Centromeric Region at 500 Kbp Resolution";
const TABLE: &str = "SV trend density";

const FACET_WIDTH: u32 = 360;
const FACET_HEIGHT: u32 = 250;
const TITLE_HEIGHT: u32 = 50;
const LEGEND_WIDTH: u32 = 90;
const POINT_OPACITY: f64 = 0.3;
const TREND_OPACITY: f64 = 0.75;

#[derive(Debug, Clone)]
pub struct SvFacet {
    pub chromosome: String,
    /// (SV type index, window start in Mbp, count)
    pub points: Vec<(usize, f64, f64)>,
    pub centromere: Option<(f64, f64)>,
    /// LOESS curve per SV type index present in this chromosome
    pub trends: Vec<(usize, Vec<(f64, f64)>)>,
}

/// Per-chromosome SV counts along the chromosome with a smoothed trend per type.
#[derive(Debug, Clone)]
pub struct SvTrendFacets {
    pub title: String,
    pub sv_types: Vec<String>,
    pub facets: Vec<SvFacet>,
}

impl SvTrendFacets {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let chromosomes = str_values(df, CHROMOSOME, TABLE)?;
        let types = str_values(df, SV_TYPE, TABLE)?;
        let starts = f64_values(df, START, TABLE)?;
        let counts = f64_values(df, COUNT, TABLE)?;
        let cen_start = f64_values(df, CEN_START, TABLE)?;
        let cen_end = f64_values(df, CEN_END, TABLE)?;

        // colour domain in plain lexicographic order
        let mut sv_types: Vec<String> = types.iter().flatten().cloned().collect();
        sv_types.sort();
        sv_types.dedup();

        let mut facets: Vec<SvFacet> = natural_sorted_unique(df, CHROMOSOME, TABLE)?
            .into_iter()
            .map(|chromosome| SvFacet {
                chromosome,
                points: Vec::new(),
                centromere: None,
                trends: Vec::new(),
            })
            .collect();

        for i in 0..df.height() {
            let (Some(chromosome), Some(sv_type)) = (&chromosomes[i], &types[i]) else {
                continue;
            };
            let Some(facet) = facets.iter_mut().find(|f| &f.chromosome == chromosome) else {
                continue;
            };
            let Some(type_idx) = sv_types.iter().position(|t| t == sv_type) else {
                continue;
            };
            if let (Some(x), Some(y)) = (starts[i], counts[i]) {
                facet.points.push((type_idx, x, y));
            }
            if facet.centromere.is_none() {
                if let (Some(start), Some(end)) = (cen_start[i], cen_end[i]) {
                    facet.centromere = Some((start, end));
                }
            }
        }

        for facet in facets.iter_mut() {
            facet.trends = (0..sv_types.len())
                .filter_map(|type_idx| {
                    let series: Vec<(f64, f64)> = facet
                        .points
                        .iter()
                        .filter(|p| p.0 == type_idx)
                        .map(|p| (p.1, p.2))
                        .collect();
                    (!series.is_empty()).then(|| (type_idx, loess(&series, DEFAULT_BANDWIDTH)))
                })
                .collect();
        }

        Ok(SvTrendFacets {
            title: TITLE.to_string(),
            sv_types,
            facets,
        })
    }
}

impl Figure for SvTrendFacets {
    fn size(&self) -> (u32, u32) {
        let rows = facet_rows(self.facets.len()) as u32;
        (
            FACET_WIDTH * FACET_COLUMNS as u32 + LEGEND_WIDTH,
            TITLE_HEIGHT + FACET_HEIGHT * rows,
        )
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, scale: RenderScale) -> Result<()> {
        let root = root.titled(&self.title, scale.font(20)).map_err(render_err)?;
        let (grid, legend_area) = root.split_horizontally(scale.px(FACET_WIDTH * FACET_COLUMNS as u32));

        for (facet, area) in self.facets.iter().zip(facet_areas(&grid, self.facets.len())) {
            let trend_values = facet.trends.iter().flat_map(|(_, curve)| curve.iter().map(|p| p.1));
            let (x_range, y_range) = facet_ranges(
                facet.points.iter().map(|p| p.1),
                facet.points.iter().map(|p| p.2).chain(trend_values),
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

            let radius = scale.px(3);
            chart
                .draw_series(facet.points.iter().map(|&(type_idx, x, y)| {
                    Circle::new((x, y), radius, pick(SET1, type_idx).mix(POINT_OPACITY).filled())
                }))
                .map_err(render_err)?;

            if let Some(centromere) = facet.centromere {
                draw_centromere(&mut chart, centromere, &y_range, scale)?;
            }

            for (type_idx, curve) in &facet.trends {
                let style = pick(SET1, *type_idx)
                    .mix(TREND_OPACITY)
                    .stroke_width(scale.px(4));
                chart
                    .draw_series(LineSeries::new(curve.iter().copied(), style))
                    .map_err(render_err)?;
            }
        }

        let entries: Vec<(String, RGBAColor)> = self
            .sv_types
            .iter()
            .enumerate()
            .map(|(i, sv_type)| (sv_type.clone(), pick(SET1, i).to_rgba()))
            .collect();
        draw_legend(&legend_area, None, &entries, scale)
    }
}

/// Figure 4.
pub fn plot_trend_per_chr(df: &DataFrame, save_name: &str, out_dir: &Path) -> Result<SvTrendFacets> {
    let chart = SvTrendFacets::from_frame(df)?;
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
            "chromosome" => &["chr10", "chr01", "chr01", "chr01", "chr01", "chr01"],
            "start" => &[2.0, 0.0, 0.5, 1.0, 1.5, 0.0],
            "count" => &[1.0, 4.0, 3.0, 2.0, 1.0, 7.0],
            "sv_type" => &["INS", "TRN", "TRN", "TRN", "TRN", "DEL"],
            "cen_start" => &[40.0, 120.0, 120.0, 120.0, 120.0, 120.0],
            "cen_end" => &[42.5, 125.0, 125.0, 125.0, 125.0, 125.0],
        ]
        .unwrap()
    }

    #[test]
    fn facets_hold_points_and_per_type_trends() {
        let chart = SvTrendFacets::from_frame(&table()).unwrap();

        assert_eq!(chart.sv_types, vec!["DEL", "INS", "TRN"]);
        let names: Vec<&str> = chart.facets.iter().map(|f| f.chromosome.as_str()).collect();
        assert_eq!(names, vec!["chr01", "chr10"]);

        let chr01 = &chart.facets[0];
        assert_eq!(chr01.points.len(), 5);
        assert_eq!(chr01.centromere, Some((120.0, 125.0)));
        let trend_types: Vec<usize> = chr01.trends.iter().map(|t| t.0).collect();
        assert_eq!(trend_types, vec![0, 2]);

        // four collinear TRN points: the trend follows the line
        let (_, trn) = &chr01.trends[1];
        for (x, y) in trn {
            assert!((y - (4.0 - 2.0 * x)).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_type_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let df = table().drop("sv_type").unwrap();
        let err = plot_trend_per_chr(&df, "Figure4", dir.path()).unwrap_err();
        assert!(matches!(err, FigureError::MissingColumn { ref column, .. } if column == "sv_type"));
        assert!(!dir.path().join("Figure4.svg").exists());
    }
}
