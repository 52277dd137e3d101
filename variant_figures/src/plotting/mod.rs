//! Figure rendering. Every figure is extracted from its table into a chart
//! struct first (so a missing encoded column fails before any file is
//! created), then drawn twice: once to SVG at nominal size and once to PNG
//! rasterised at `ppi / 72` times that size.

use std::collections::HashSet;
use std::ops::Range;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::DrawingBackend;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use tracing::info;

use crate::models::{FigureError, Result};
use crate::processing::labels::natural_cmp;

pub mod palettes;
pub mod loess;
pub mod facets;
pub mod fraction_bar;
pub mod chromosome_scatter;
pub mod centromere_facets;
pub mod sv_length_bars;
pub mod sv_trend_facets;

/// Pixel density a CSS pixel corresponds to in the SVG output.
const BASE_PPI: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderScale {
    factor: f64,
}

impl RenderScale {
    pub const VECTOR: RenderScale = RenderScale { factor: 1.0 };

    pub fn for_ppi(ppi: u32) -> Self {
        RenderScale {
            factor: ppi as f64 / BASE_PPI,
        }
    }

    pub fn px(&self, value: u32) -> u32 {
        ((value as f64) * self.factor).round().max(1.0) as u32
    }

    pub fn font(&self, size: u32) -> (&'static str, u32) {
        ("sans-serif", self.px(size))
    }
}

pub trait Figure {
    /// Nominal (SVG) canvas size.
    fn size(&self) -> (u32, u32);

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, scale: RenderScale) -> Result<()>;
}

pub(crate) fn render_err<E: std::fmt::Display>(e: E) -> FigureError {
    FigureError::Render(e.to_string())
}

/// Write `<stem>.svg` and `<stem>.png` into `out_dir`.
pub fn save_figure<F: Figure>(figure: &F, out_dir: &Path, stem: &str, ppi: u32) -> Result<Vec<PathBuf>> {
    let (width, height) = figure.size();

    let svg_path = out_dir.join(format!("{stem}.svg"));
    {
        let root = SVGBackend::new(&svg_path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        figure.draw(&root, RenderScale::VECTOR)?;
        root.present().map_err(render_err)?;
    }
    info!("Saved {}", svg_path.display());

    let scale = RenderScale::for_ppi(ppi);
    let png_path = out_dir.join(format!("{stem}.png"));
    {
        let root = BitMapBackend::new(&png_path, (scale.px(width), scale.px(height))).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        figure.draw(&root, scale)?;
        root.present().map_err(render_err)?;
    }
    info!("Saved {} at {} ppi", png_path.display(), ppi);

    Ok(vec![svg_path, png_path])
}

/// Categories in the requested order, restricted to those observed, with
/// observed values missing from the order appended in natural order.
pub(crate) fn category_order<'a>(requested: &[String], observed: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let unique: HashSet<&str> = observed.into_iter().collect();
    let mut seen: Vec<&str> = unique.into_iter().collect();
    seen.sort_by(|a, b| natural_cmp(a, b));

    let mut order: Vec<String> = requested
        .iter()
        .filter(|c| seen.contains(&c.as_str()))
        .cloned()
        .collect();
    for value in seen {
        if !order.iter().any(|c| c == value) {
            order.push(value.to_string());
        }
    }
    order
}

/// Tick label for a categorical axis laid out on integer positions.
pub(crate) fn category_label(categories: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

pub(crate) fn category_range(n: usize) -> Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

/// Data range with `pad` of its span added on both sides.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64, include_zero: bool) -> Range<f64> {
    let (mut lo, mut hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if (hi - lo).abs() < 1e-9 {
        return (lo - 1.0)..(hi + 1.0);
    }
    let span = (hi - lo) * pad;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - span };
    lo..(hi + span)
}

/// Swatch legend in pixel coordinates of `area`.
pub(crate) fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    title: Option<&str>,
    entries: &[(String, RGBAColor)],
    scale: RenderScale,
) -> Result<()> {
    let x = scale.px(8) as i32;
    let swatch = scale.px(12) as i32;
    let line = scale.px(20) as i32;
    let mut y = scale.px(30) as i32;

    if let Some(title) = title {
        area.draw(&Text::new(title.to_string(), (x, y), scale.font(13)))
            .map_err(render_err)?;
        y += line;
    }
    for (label, color) in entries {
        area.draw(&Rectangle::new([(x, y), (x + swatch, y + swatch)], color.filled()))
            .map_err(render_err)?;
        area.draw(&Text::new(label.clone(), (x + swatch + scale.px(6) as i32, y), scale.font(12)))
            .map_err(render_err)?;
        y += line;
    }
    Ok(())
}
