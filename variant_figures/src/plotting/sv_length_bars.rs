use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::DataFrame;

use crate::helper_functions::{f64_values, str_values};
use crate::models::columns::{METRIC, SV_TYPE, VALUE};
use crate::models::Result;
use crate::plotting::palettes::{pick, SET1};
use crate::plotting::{
    category_label, category_order, category_range, draw_legend, padded_range, render_err, save_figure,
    Figure, RenderScale,
};

pub const PPI: u32 = 300;
pub const MEDIAN_LENGTH: &str = "Median Length (bp)";
pub const TOTAL_LENGTH: &str = "Total Length (Mbp)";
/// Panel and colour order.
pub const METRICS: [&str; 2] = [MEDIAN_LENGTH, TOTAL_LENGTH];

const TABLE: &str = "SV lengths";
const BAR_OPACITY: f64 = 0.7;
const BAR_HALF_WIDTH: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct LengthPanel {
    pub metric: String,
    /// (SV type index, value)
    pub bars: Vec<(usize, f64)>,
}

/// Median and total SV length per type, side by side.
#[derive(Debug, Clone)]
pub struct SvLengthChart {
    pub sv_types: Vec<String>,
    pub panels: Vec<LengthPanel>,
}

impl SvLengthChart {
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        let types = str_values(df, SV_TYPE, TABLE)?;
        let metrics = str_values(df, METRIC, TABLE)?;
        let values = f64_values(df, VALUE, TABLE)?;

        let sv_types = category_order(&[], types.iter().flatten().map(String::as_str));
        let panels = METRICS
            .iter()
            .map(|&metric| {
                let bars = types
                    .iter()
                    .zip(&metrics)
                    .zip(&values)
                    .filter(|((_, m), _)| m.as_deref() == Some(metric))
                    .filter_map(|((t, _), v)| {
                        let idx = sv_types.iter().position(|s| Some(s) == t.as_ref())?;
                        Some((idx, (*v)?))
                    })
                    .collect();
                LengthPanel {
                    metric: metric.to_string(),
                    bars,
                }
            })
            .collect();

        Ok(SvLengthChart { sv_types, panels })
    }
}

impl Figure for SvLengthChart {
    fn size(&self) -> (u32, u32) {
        let panel_width = 120 + 50 * self.sv_types.len().max(3) as u32;
        (2 * panel_width + 180, 380)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, scale: RenderScale) -> Result<()> {
        let (width, _) = root.dim_in_pixel();
        let (plots, legend_area) = root.split_horizontally(width.saturating_sub(scale.px(180)));
        let n = self.sv_types.len();

        for (mi, (panel, area)) in self.panels.iter().zip(plots.split_evenly((1, 2))).enumerate() {
            let color = pick(SET1, mi).mix(BAR_OPACITY);
            let y_range = padded_range(panel.bars.iter().map(|b| b.1), 0.08, true);

            let mut chart = ChartBuilder::on(&area)
                .caption(" ", scale.font(14))
                .margin(scale.px(10))
                .x_label_area_size(scale.px(40))
                .y_label_area_size(scale.px(64))
                .build_cartesian_2d(category_range(n), y_range)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_labels(n.max(1))
                .x_label_formatter(&|v: &f64| category_label(&self.sv_types, *v))
                .x_desc("SV Type")
                .y_desc(panel.metric.as_str())
                .label_style(scale.font(11))
                .axis_desc_style(scale.font(12))
                .draw()
                .map_err(render_err)?;

            chart
                .draw_series(panel.bars.iter().map(|&(idx, value)| {
                    let x = idx as f64;
                    Rectangle::new([(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, value)], color.filled())
                }))
                .map_err(render_err)?;
        }

        let entries: Vec<(String, RGBAColor)> = METRICS
            .iter()
            .enumerate()
            .map(|(mi, metric)| (metric.to_string(), pick(SET1, mi).mix(BAR_OPACITY)))
            .collect();
        draw_legend(&legend_area, None, &entries, scale)
    }
}

/// Figure 3B-C.
pub fn plot_sv_chart(df: &DataFrame, save_name: &str, out_dir: &Path) -> Result<SvLengthChart> {
    let chart = SvLengthChart::from_frame(df)?;
    save_figure(&chart, out_dir, save_name, PPI)?;
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FigureError;
    use polars::df;

    #[test]
    fn metrics_are_split_into_panels() {
        let df = df![
            "sv_type" => &["INS", "DEL", "DEL", "INS", "INV"],
            "metric" => &[MEDIAN_LENGTH, MEDIAN_LENGTH, TOTAL_LENGTH, TOTAL_LENGTH, MEDIAN_LENGTH],
            "value" => &[310.0, 280.0, 12.5, 9.0, 1500.0],
        ]
        .unwrap();

        let chart = SvLengthChart::from_frame(&df).unwrap();
        assert_eq!(chart.sv_types, vec!["DEL", "INS", "INV"]);
        assert_eq!(chart.panels[0].metric, MEDIAN_LENGTH);
        assert_eq!(chart.panels[0].bars, vec![(1, 310.0), (0, 280.0), (2, 1500.0)]);
        assert_eq!(chart.panels[1].bars, vec![(0, 12.5), (1, 9.0)]);
    }

    #[test]
    fn missing_value_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let df = df!["sv_type" => &["DEL"], "metric" => &[MEDIAN_LENGTH]].unwrap();
        let err = plot_sv_chart(&df, "Figure3BC", dir.path()).unwrap_err();
        assert!(matches!(err, FigureError::MissingColumn { ref column, .. } if column == "value"));
    }
}
