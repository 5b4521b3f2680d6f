//! Axis extents: auto ranges from data plus explicit `domain` overrides.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{AxisScale, DomainBound, Row};
use crate::render::{field, AxisElement, CartesianPlot, Mark, MarkBands};

static BOUND_EXPR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(dataMin|dataMax)\s*(?:([+-])\s*(\d+(?:\.\d+)?))?\s*$")
        .expect("valid domain regex")
});

/// Evaluate one domain bound against the data extent.
///
/// Accepts numbers, numeric strings and `dataMin`/`dataMax` with an optional
/// `+ n` / `- n` offset. Anything else yields `None` (the auto bound is used).
pub fn eval_bound(bound: &DomainBound, data_min: f64, data_max: f64) -> Option<f64> {
    match bound {
        DomainBound::Value(v) => Some(*v),
        DomainBound::Expr(s) => {
            if let Ok(v) = s.trim().parse::<f64>() {
                return Some(v);
            }
            let caps = BOUND_EXPR.captures(s)?;
            let base = if &caps[1] == "dataMin" {
                data_min
            } else {
                data_max
            };
            let offset = match (caps.get(2), caps.get(3)) {
                (Some(sign), Some(n)) => {
                    let n: f64 = n.as_str().parse().ok()?;
                    if sign.as_str() == "-" { -n } else { n }
                }
                _ => 0.0,
            };
            Some(base + offset)
        }
    }
}

/// Final `(min, max)` for an axis.
///
/// `data` is the raw extent (`None` when the axis has no values). Auto ranges
/// are padded by 5 %, include 0 when `include_zero` and never collapse to a
/// single point.
pub fn resolve_range(
    data: Option<(f64, f64)>,
    domain: Option<(&DomainBound, &DomainBound)>,
    include_zero: bool,
) -> (f64, f64) {
    let (dmin, dmax) = data.unwrap_or((0.0, 1.0));
    let (mut lo, mut hi) = (dmin, dmax);
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    } else {
        let pad = (hi - lo) * 0.05;
        if !(include_zero && lo == 0.0) {
            lo -= pad;
        }
        if !(include_zero && hi == 0.0) {
            hi += pad;
        }
    }

    if let Some((lo_b, hi_b)) = domain {
        if let Some(v) = eval_bound(lo_b, dmin, dmax) {
            lo = v;
        }
        if let Some(v) = eval_bound(hi_b, dmin, dmax) {
            hi = v;
        }
        if hi <= lo {
            hi = lo + 1.0;
        }
    }
    (lo, hi)
}

/// Horizontal scale of a cartesian plot.
#[derive(Debug, Clone, PartialEq)]
pub enum XScale {
    /// One slot per row, centered on the row index.
    Category(Vec<String>),
    Numeric { min: f64, max: f64 },
}

impl XScale {
    pub fn for_plot(plot: &CartesianPlot<'_>) -> Self {
        let axis = plot.x_axes.first();
        let key = axis.and_then(|a| a.data_key);
        let numeric = axis.is_some_and(|a| a.scale == AxisScale::Number);
        if numeric && let Some(key) = key {
            let (min, max) = resolve_range(
                extent(plot.data.iter().filter_map(|r| field(r, key))),
                axis.and_then(|a| a.domain),
                false,
            );
            return XScale::Numeric { min, max };
        }
        XScale::Category(
            plot.data
                .iter()
                .map(|r| {
                    key.and_then(|k| r.get(k))
                        .map(|v| v.label())
                        .unwrap_or_default()
                })
                .collect(),
        )
    }

    pub fn range(&self) -> (f64, f64) {
        match self {
            XScale::Category(labels) => (-0.5, labels.len().max(1) as f64 - 0.5),
            XScale::Numeric { min, max } => (*min, *max),
        }
    }

    /// x coordinate of row `idx`; numeric scales read `key` from the row.
    pub fn position(&self, idx: usize, row: &Row, key: Option<&str>) -> Option<f64> {
        match self {
            XScale::Category(_) => Some(idx as f64),
            XScale::Numeric { .. } => key.and_then(|k| field(row, k)),
        }
    }

    /// Width of one category slot in axis units.
    pub fn slot_width(&self, plot: &CartesianPlot<'_>) -> f64 {
        match self {
            XScale::Category(_) => 1.0,
            XScale::Numeric { .. } => {
                let key = plot.x_axes.first().and_then(|a| a.data_key);
                let mut xs: Vec<f64> = plot
                    .data
                    .iter()
                    .filter_map(|r| key.and_then(|k| field(r, k)))
                    .collect();
                xs.sort_by(f64::total_cmp);
                xs.windows(2)
                    .map(|w| w[1] - w[0])
                    .filter(|d| *d > 0.0)
                    .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.min(d))))
                    .unwrap_or(1.0)
            }
        }
    }

    pub fn tick_label(&self, x: f64) -> String {
        match self {
            XScale::Category(labels) => {
                let i = x.round();
                if (x - i).abs() > 1e-6 || i < 0.0 {
                    return String::new();
                }
                labels.get(i as usize).cloned().unwrap_or_default()
            }
            XScale::Numeric { .. } => super::util::format_tick(x),
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Range of the y axis at `axis_idx`, over every mark drawn against it.
///
/// `bands` is the plot's `stack_layout()`.
pub fn y_range(
    plot: &CartesianPlot<'_>,
    axis_idx: usize,
    axis: Option<&AxisElement<'_>>,
    bands: &[MarkBands],
) -> (f64, f64) {
    let mut values: Vec<f64> = Vec::new();
    let mut include_zero = false;
    for (idx, mark) in plot.marks.iter().enumerate() {
        if plot.y_axis_index(mark) != axis_idx {
            continue;
        }
        match mark {
            Mark::Bar(_) | Mark::Area(_) => {
                include_zero = true;
                if let Some(mb) = bands.iter().find(|b| b.mark == idx) {
                    for b in mb.bands.iter().flatten() {
                        values.push(b.lower);
                        values.push(b.upper);
                    }
                }
            }
            Mark::Line(_) | Mark::Scatter(_) => {
                values.extend(plot.data.iter().filter_map(|r| field(r, mark.data_key())));
            }
        }
    }
    resolve_range(
        extent(values.into_iter()),
        axis.and_then(|a| a.domain),
        include_zero,
    )
}
