//! Locally weighted linear regression for the per-type trend lines.

/// Fraction of points in each local fit.
pub const DEFAULT_BANDWIDTH: f64 = 0.3;

fn tricube(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u * u;
        t * t * t
    }
}

/// Smoothed `(x, y)` evaluated at every input x, sorted by x. Inputs with
/// fewer than three finite points are returned sorted but unsmoothed.
pub fn loess(points: &[(f64, f64)], bandwidth: f64) -> Vec<(f64, f64)> {
    let mut sorted: Vec<(f64, f64)> = points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    if n < 3 {
        return sorted;
    }
    let k = ((bandwidth * n as f64).floor() as usize).clamp(2, n);

    let mut fitted = Vec::with_capacity(n);
    let mut lo = 0;
    for &(x, y) in &sorted {
        // slide the k-nearest-neighbour window right while that brings it closer to x
        while lo + k < n && sorted[lo + k].0 - x < x - sorted[lo].0 {
            lo += 1;
        }
        let window = &sorted[lo..lo + k];
        let max_dist = (x - window[0].0).max(window[k - 1].0 - x);

        let (mut sw, mut swx, mut swy, mut swxx, mut swxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for &(wx, wy) in window {
            let w = if max_dist > 0.0 {
                tricube((wx - x).abs() / max_dist)
            } else {
                1.0
            };
            sw += w;
            swx += w * wx;
            swy += w * wy;
            swxx += w * wx * wx;
            swxy += w * wx * wy;
        }

        let value = if sw <= 0.0 {
            y
        } else {
            let denom = sw * swxx - swx * swx;
            if denom.abs() <= 1e-12 * sw * sw.max(swxx) {
                swy / sw
            } else {
                let slope = (sw * swxy - swx * swy) / denom;
                let intercept = (swy - slope * swx) / sw;
                intercept + slope * x
            }
        };
        fitted.push((x, value));
    }
    fitted
}
