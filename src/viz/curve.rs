//! Line shapes between data points (`monotone`, `linear`, `step*`).

use crate::models::Interpolation;

/// Samples per segment when drawing a monotone curve.
const MONOTONE_STEPS: usize = 12;

/// Expand `points` (sorted by x) into the polyline drawn for `kind`.
pub fn interpolate(points: &[(f64, f64)], kind: Interpolation) -> Vec<(f64, f64)> {
    if points.len() < 2 {
        return points.to_vec();
    }
    match kind {
        Interpolation::Linear => points.to_vec(),
        Interpolation::Monotone => monotone(points),
        Interpolation::Step => step(points, 0.5),
        Interpolation::StepBefore => step(points, 0.0),
        Interpolation::StepAfter => step(points, 1.0),
    }
}

/// Split a row-ordered series at missing values; each run is drawn on its own.
pub fn runs(points: impl IntoIterator<Item = Option<(f64, f64)>>) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut cur = Vec::new();
    for p in points {
        match p {
            Some(p) => cur.push(p),
            None if !cur.is_empty() => out.push(std::mem::take(&mut cur)),
            None => {}
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// Horizontal-then-vertical steps; `t` places the riser between two points
/// (0 = at the start, 1 = at the end).
fn step(points: &[(f64, f64)], t: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(points.len() * 3);
    out.push(points[0]);
    for w in points.windows(2) {
        let (x0, y0) = w[0];
        let (x1, y1) = w[1];
        let xm = x0 + (x1 - x0) * t;
        out.push((xm, y0));
        out.push((xm, y1));
        out.push((x1, y1));
    }
    out
}

/// Monotone cubic Hermite interpolation (Fritsch–Carlson tangents): never
/// overshoots the data between two points.
fn monotone(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let n = points.len();
    let secants: Vec<f64> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].0 - w[0].0;
            if dx == 0.0 { 0.0 } else { (w[1].1 - w[0].1) / dx }
        })
        .collect();

    let mut tangents = vec![0.0; n];
    tangents[0] = secants[0];
    tangents[n - 1] = secants[n - 2];
    for i in 1..n - 1 {
        let (a, b) = (secants[i - 1], secants[i]);
        tangents[i] = if a * b <= 0.0 { 0.0 } else { (a + b) / 2.0 };
    }
    for i in 0..n - 1 {
        let s = secants[i];
        if s == 0.0 {
            tangents[i] = 0.0;
            tangents[i + 1] = 0.0;
            continue;
        }
        let (a, b) = (tangents[i] / s, tangents[i + 1] / s);
        let h = a.hypot(b);
        if h > 3.0 {
            let k = 3.0 / h;
            tangents[i] = k * a * s;
            tangents[i + 1] = k * b * s;
        }
    }

    let mut out = Vec::with_capacity((n - 1) * MONOTONE_STEPS + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let dx = x1 - x0;
        for s in 1..=MONOTONE_STEPS {
            let t = s as f64 / MONOTONE_STEPS as f64;
            let (t2, t3) = (t * t, t * t * t);
            let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
            let h10 = t3 - 2.0 * t2 + t;
            let h01 = -2.0 * t3 + 3.0 * t2;
            let h11 = t3 - t2;
            let y = h00 * y0 + h10 * dx * tangents[i] + h01 * y1 + h11 * dx * tangents[i + 1];
            out.push((x0 + dx * t, y));
        }
    }
    out
}
