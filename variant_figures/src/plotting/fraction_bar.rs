use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::helper_functions::{f64_values, str_values};
use crate::models::columns::{COUNT, REGION, VARIANT_CLASS};
use crate::models::Result;
use crate::plotting::palettes::{pick, PASTEL1};
use crate::plotting::{
    category_label, category_order, category_range, draw_legend, render_err, save_figure, Figure,
    RenderScale,
};

pub const PPI: u32 = 300;
pub const TITLE: &str = "Fraction of Genetic Variants across Different Genomic Regions";
const TABLE: &str = "region counts";

/// Legend text for a region code.
pub fn region_display_label(region: &str) -> &str {
    match region {
        "Lnc_RNA" => "lnc RNA",
        other => other,
    }
}

/// Horizontal bars, one per variant class, stacked by region and normalised to 100 %.
#[derive(Debug, Clone)]
pub struct FractionChart {
    /// Top to bottom.
    pub classes: Vec<String>,
    /// Stack and legend order.
    pub regions: Vec<String>,
    /// `shares[class][region]` in percent of the class total.
    pub shares: Vec<Vec<f64>>,
}

impl FractionChart {
    pub fn from_frame(df: &DataFrame, sorted_classes: &[String]) -> Result<Self> {
        let class_values = str_values(df, VARIANT_CLASS, TABLE)?;
        let region_values = str_values(df, REGION, TABLE)?;
        let counts = f64_values(df, COUNT, TABLE)?;

        let classes = category_order(sorted_classes, class_values.iter().flatten().map(String::as_str));
        let regions = category_order(&[], region_values.iter().flatten().map(String::as_str));

        let mut shares = vec![vec![0.0; regions.len()]; classes.len()];
        for ((class, region), count) in class_values.iter().zip(&region_values).zip(&counts) {
            let (Some(class), Some(region), Some(count)) = (class, region, count) else {
                continue;
            };
            let ci = classes.iter().position(|c| c == class);
            let ri = regions.iter().position(|r| r == region);
            if let (Some(ci), Some(ri)) = (ci, ri) {
                shares[ci][ri] += count;
            }
        }

        for row in shares.iter_mut() {
            let total: f64 = row.iter().sum();
            if total > 0.0 {
                row.iter_mut().for_each(|v| *v = *v * 100.0 / total);
            }
        }

        Ok(FractionChart {
            classes,
            regions,
            shares,
        })
    }
}

impl Figure for FractionChart {
    fn size(&self) -> (u32, u32) {
        (760, 120 + 40 * self.classes.len().max(3) as u32)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, scale: RenderScale) -> Result<()> {
        let root = root.titled(TITLE, scale.font(16)).map_err(render_err)?;
        let (plot_area, legend_area) = root.split_horizontally(scale.px(600));

        let n = self.classes.len();
        // first class at the top
        let labels: Vec<String> = self.classes.iter().rev().cloned().collect();

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(scale.px(10))
            .x_label_area_size(scale.px(40))
            .y_label_area_size(scale.px(90))
            .build_cartesian_2d(0.0..100.0, category_range(n))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&|v: &f64| category_label(&labels, *v))
            .x_desc("Fraction [%]")
            .label_style(scale.font(11))
            .axis_desc_style(scale.font(12))
            .draw()
            .map_err(render_err)?;

        let mut offsets = vec![0.0; n];
        for (ri, _) in self.regions.iter().enumerate() {
            let color = pick(PASTEL1, ri);
            let bars: Vec<Rectangle<(f64, f64)>> = self
                .shares
                .iter()
                .enumerate()
                .map(|(ci, row)| {
                    let y = (n - 1 - ci) as f64;
                    let x0 = offsets[ci];
                    let x1 = x0 + row[ri];
                    offsets[ci] = x1;
                    Rectangle::new([(x0, y - 0.4), (x1, y + 0.4)], color.filled())
                })
                .collect();
            chart.draw_series(bars).map_err(render_err)?;
        }

        let entries: Vec<(String, RGBAColor)> = self
            .regions
            .iter()
            .enumerate()
            .map(|(ri, region)| (region_display_label(region).to_string(), pick(PASTEL1, ri).to_rgba()))
            .collect();
        draw_legend(&legend_area, Some("Region"), &entries, scale)
    }
}

/// Figure 1A.
pub fn plot_fraction(df: &DataFrame, sorted_classes: &[String], save_name: &str, out_dir: &Path) -> Result<FractionChart> {
    let chart = FractionChart::from_frame(df, sorted_classes)?;
    save_figure(&chart, out_dir, save_name, PPI)?;
    Ok(chart)
}
