//! Shared layout for the per-chromosome facet grids: three panels per row,
//! independent axes per panel, and a dashed box marking the centromere.

use std::ops::Range;

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::models::Result;
use crate::plotting::palettes::CENTROMERE_GREY;
use crate::plotting::{padded_range, render_err, RenderScale};

pub const FACET_COLUMNS: usize = 3;
const DASHES_PER_SIDE: usize = 24;

pub type FacetChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn facet_rows(n: usize) -> usize {
    n.div_ceil(FACET_COLUMNS).max(1)
}

pub(crate) fn facet_areas<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, n: usize) -> Vec<DrawingArea<DB, Shift>> {
    root.split_evenly((facet_rows(n), FACET_COLUMNS))
}

/// x covers both the data and the centromere; y starts at zero.
pub(crate) fn facet_ranges(
    xs: impl IntoIterator<Item = f64>,
    ys: impl IntoIterator<Item = f64>,
    centromere: Option<(f64, f64)>,
) -> (Range<f64>, Range<f64>) {
    let mut x_values: Vec<f64> = xs.into_iter().collect();
    if let Some((start, end)) = centromere {
        x_values.push(start);
        x_values.push(end);
    }
    (padded_range(x_values, 0.03, false), padded_range(ys, 0.08, true))
}

pub(crate) fn facet_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    caption: &str,
    x: Range<f64>,
    y: Range<f64>,
    y_desc: &str,
    scale: RenderScale,
) -> Result<FacetChart<'a, DB>> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, scale.font(16))
        .margin(scale.px(8))
        .x_label_area_size(scale.px(36))
        .y_label_area_size(scale.px(52))
        .build_cartesian_2d(x, y)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(5)
        .x_desc("Position (Mbp)")
        .y_desc(y_desc)
        .label_style(scale.font(10))
        .axis_desc_style(scale.font(11))
        .draw()
        .map_err(render_err)?;

    Ok(chart)
}

/// Every other piece of the segment split into `2 * dashes` parts.
pub(crate) fn dash_segments(from: (f64, f64), to: (f64, f64), dashes: usize) -> Vec<Vec<(f64, f64)>> {
    let pieces = (2 * dashes).max(1);
    let at = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
    (0..pieces)
        .step_by(2)
        .map(|i| vec![at(i as f64 / pieces as f64), at((i + 1) as f64 / pieces as f64)])
        .collect()
}

pub(crate) fn draw_centromere<DB: DrawingBackend>(
    chart: &mut FacetChart<'_, DB>,
    (start, end): (f64, f64),
    y: &Range<f64>,
    scale: RenderScale,
) -> Result<()> {
    let style = CENTROMERE_GREY.stroke_width(scale.px(1));
    let corners = [
        (start, y.start),
        (end, y.start),
        (end, y.end),
        (start, y.end),
        (start, y.start),
    ];
    let dashes: Vec<Vec<(f64, f64)>> = corners
        .windows(2)
        .flat_map(|side| dash_segments(side[0], side[1], DASHES_PER_SIDE))
        .collect();

    chart
        .draw_series(dashes.into_iter().map(|segment| PathElement::new(segment, style)))
        .map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_three_columns() {
        assert_eq!(facet_rows(0), 1);
        assert_eq!(facet_rows(3), 1);
        assert_eq!(facet_rows(4), 2);
        assert_eq!(facet_rows(21), 7);
    }

    #[test]
    fn dashes_alternate_along_the_side() {
        let dashes = dash_segments((0.0, 0.0), (4.0, 0.0), 2);
        assert_eq!(
            dashes,
            vec![vec![(0.0, 0.0), (1.0, 0.0)], vec![(2.0, 0.0), (3.0, 0.0)]]
        );
    }

    #[test]
    fn x_range_includes_centromere() {
        let (x, y) = facet_ranges(vec![1.0, 2.0], vec![0.5, 1.0], Some((10.0, 12.0)));
        assert!(x.start < 1.0 && x.end > 12.0);
        assert_eq!(y.start, 0.0);
    }
}
