//! Line, bar, area, scatter and composed plots.
//!
//! Every cartesian plot is drawn on a dual-coordinate chart: marks bound to
//! the second y axis use the secondary coordinate (right side); when there is
//! only one y axis the secondary one is never configured.

use anyhow::Result;
use plotters::chart::DualCoordChartContext;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::FontFamily;

use super::curve::{interpolate, runs};
use super::scale::{XScale, y_range};
use super::util::{
    GRID_GRAY, TEXT_GRAY, compute_label_area_px, css_color, format_tick, parse_dash,
    parse_hex_color,
};
use crate::models::{Margin, Tag};
use crate::render::{field, AreaMark, BarMark, CartesianPlot, LineMark, Mark, MarkBands, ScatterMark};

type Coord2d = Cartesian2d<RangedCoordf64, RangedCoordf64>;
type Chart<'a, DB> = DualCoordChartContext<'a, DB, Coord2d, Coord2d>;

const TICK_FONT_PX: u32 = 12;
const GROUP_WIDTH: f64 = 0.8;

/// Draw `plot` into `area` (legend already split off).
pub fn draw_cartesian<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    plot: &CartesianPlot<'_>,
    margin: Margin,
) -> Result<()> {
    let xscale = XScale::for_plot(plot);
    let (x0, x1) = xscale.range();
    let bands = plot.stack_layout();

    let primary_axis = plot.y_axes.first();
    let secondary_axis = plot.y_axes.get(1);
    let (y0, y1) = y_range(plot, 0, primary_axis, &bands);
    let (s0, s1) = match secondary_axis {
        Some(axis) => y_range(plot, 1, Some(axis), &bands),
        None => (y0, y1),
    };

    let ticks = |axis: Option<&crate::render::AxisElement<'_>>| {
        axis.and_then(|a| a.tick_count).unwrap_or(5).max(2) as usize
    };
    let hidden = |axis: Option<&crate::render::AxisElement<'_>>| axis.is_some_and(|a| a.hidden);
    let x_axis = plot.x_axes.first();

    let left_w = if hidden(primary_axis) {
        0
    } else {
        compute_label_area_px(y0, y1, ticks(primary_axis), TICK_FONT_PX)
    };
    let right_w = match secondary_axis {
        Some(a) if !a.hidden => compute_label_area_px(s0, s1, ticks(secondary_axis), TICK_FONT_PX),
        _ => 0,
    };

    let px = |v: Option<f64>| v.unwrap_or(5.0).max(0.0).round() as u32;
    let mut chart: Chart<'_, DB> = ChartBuilder::on(area)
        .margin_top(px(margin.top).max(8))
        .margin_right(px(margin.right).max(8))
        .margin_bottom(px(margin.bottom))
        .margin_left(px(margin.left))
        .x_label_area_size(if hidden(x_axis) { 0 } else { 28 })
        .y_label_area_size(left_w)
        .right_y_label_area_size(right_w)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .set_secondary_coord(x0..x1, s0..s1);

    let x_fmt = |v: &f64| xscale.tick_label(*v);
    let y_fmt = |v: &f64| format_tick(*v);
    let x_labels = match &xscale {
        XScale::Category(labels) => labels.len().max(1),
        XScale::Numeric { .. } => ticks(x_axis),
    };

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_labels(x_labels)
            .y_labels(ticks(primary_axis))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .label_style((FontFamily::SansSerif, TICK_FONT_PX).into_font().color(&TEXT_GRAY))
            .axis_desc_style((FontFamily::SansSerif, TICK_FONT_PX + 1))
            .axis_style(GRID_GRAY.stroke_width(1))
            .light_line_style(TRANSPARENT);
        match &plot.grid {
            Some(grid) => {
                let color = grid
                    .stroke
                    .and_then(parse_hex_color)
                    .unwrap_or(GRID_GRAY)
                    .mix(grid.opacity.unwrap_or(1.0));
                mesh.bold_line_style(color.stroke_width(1));
            }
            None => {
                mesh.disable_mesh();
            }
        }
        if hidden(x_axis) {
            mesh.disable_x_axis();
        }
        if hidden(primary_axis) {
            mesh.disable_y_axis();
        }
        if let Some(label) = x_axis.and_then(|a| a.label) {
            mesh.x_desc(label);
        }
        if let Some(label) = primary_axis.and_then(|a| a.label) {
            mesh.y_desc(label);
        }
        mesh.draw().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    if let Some(axis) = secondary_axis.filter(|a| !a.hidden) {
        let mut right = chart.configure_secondary_axes();
        right
            .y_labels(ticks(Some(axis)))
            .y_label_formatter(&y_fmt)
            .label_style((FontFamily::SansSerif, TICK_FONT_PX).into_font().color(&TEXT_GRAY))
            .axis_style(GRID_GRAY.stroke_width(1));
        if let Some(label) = axis.label {
            right.y_desc(label);
        }
        right.draw().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    let columns = BarColumns::new(plot);
    let plot_px_w = chart.plotting_area().dim_in_pixel().0.max(1) as f64;
    let units_per_px = (x1 - x0) / plot_px_w;
    let slot = xscale.slot_width(plot);

    for (idx, mark) in plot.marks.iter().enumerate() {
        let secondary = secondary_axis.is_some() && plot.y_axis_index(mark) == 1;
        let mark_bands = bands.iter().find(|b| b.mark == idx);
        match mark {
            Mark::Line(m) => draw_line(&mut chart, secondary, plot, &xscale, m, idx)?,
            Mark::Bar(m) => {
                let geometry = BarGeometry {
                    slot,
                    units_per_px,
                    column: columns.column_for(idx, m),
                    columns: columns.len(),
                };
                draw_bars(&mut chart, secondary, plot, &xscale, m, idx, mark_bands, geometry)?
            }
            Mark::Area(m) => draw_area(&mut chart, secondary, plot, &xscale, m, idx, mark_bands)?,
            Mark::Scatter(m) => draw_scatter(&mut chart, secondary, plot, &xscale, m, idx)?,
        }
    }
    Ok(())
}

/// Route a series to the primary or secondary coordinate.
fn draw_on<DB, E, S>(chart: &mut Chart<'_, DB>, secondary: bool, series: S) -> Result<()>
where
    DB: DrawingBackend,
    S: IntoIterator<Item = E>,
    E: Drawable<DB>,
    for<'b> &'b E: PointCollection<'b, (f64, f64)>,
{
    let res = if secondary {
        chart.draw_secondary_series(series).map(|_| ())
    } else {
        chart.draw_series(series).map(|_| ())
    };
    res.map_err(|e| anyhow::anyhow!("{:?}", e))
}

fn x_key<'a>(plot: &CartesianPlot<'a>) -> Option<&'a str> {
    plot.x_axes.first().and_then(|a| a.data_key)
}

fn draw_line<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    secondary: bool,
    plot: &CartesianPlot<'_>,
    xscale: &XScale,
    mark: &LineMark<'_>,
    idx: usize,
) -> Result<()> {
    let key = x_key(plot);
    let style = css_color(mark.stroke, idx)
        .mix(mark.opacity.unwrap_or(1.0))
        .stroke_width(mark.stroke_width.round().max(1.0) as u32);
    let dash = mark.dash.and_then(parse_dash);

    let points = plot.data.iter().enumerate().map(|(i, row)| {
        let x = xscale.position(i, row, key)?;
        field(row, mark.data_key).map(|y| (x, y))
    });
    for run in runs(points) {
        let path = interpolate(&run, mark.interpolation);
        match dash {
            Some((size, spacing)) => {
                draw_on(chart, secondary, DashedLineSeries::new(path, size, spacing, style))?
            }
            None => draw_on(chart, secondary, std::iter::once(PathElement::new(path, style)))?,
        }
        if run.len() == 1 {
            let dot = Circle::new(run[0], 2, style.color.filled());
            draw_on(chart, secondary, std::iter::once(dot))?;
        }
    }
    Ok(())
}

/// Bar columns inside one category slot: one per stack id (per y axis) and
/// one per unstacked bar series, in series order.
struct BarColumns<'a> {
    keys: Vec<(Option<(&'a Tag, Option<&'a Tag>)>, usize)>,
}

impl<'a> BarColumns<'a> {
    fn new(plot: &CartesianPlot<'a>) -> Self {
        let mut keys: Vec<(Option<(&'a Tag, Option<&'a Tag>)>, usize)> = Vec::new();
        for (idx, mark) in plot.marks.iter().enumerate() {
            let Mark::Bar(bar) = mark else { continue };
            let stack_key = bar.stack.map(|s| (s, bar.y_axis));
            let known = stack_key.is_some() && keys.iter().any(|(k, _)| *k == stack_key);
            if !known {
                keys.push((stack_key, idx));
            }
        }
        Self { keys }
    }

    fn len(&self) -> usize {
        self.keys.len().max(1)
    }

    /// Stacked bars share the column of their stack; others own one.
    fn column_for(&self, mark_idx: usize, bar: &BarMark<'a>) -> usize {
        let stack_key = bar.stack.map(|s| (s, bar.y_axis));
        self.keys
            .iter()
            .position(|(k, first)| match stack_key {
                Some(_) => *k == stack_key,
                None => *first == mark_idx,
            })
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
struct BarGeometry {
    slot: f64,
    units_per_px: f64,
    column: usize,
    columns: usize,
}

#[allow(clippy::too_many_arguments)]
fn draw_bars<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    secondary: bool,
    plot: &CartesianPlot<'_>,
    xscale: &XScale,
    mark: &BarMark<'_>,
    idx: usize,
    bands: Option<&MarkBands>,
    geo: BarGeometry,
) -> Result<()> {
    let Some(bands) = bands else {
        return Ok(());
    };
    let column = geo.column;
    let col_w = geo.slot * GROUP_WIDTH / geo.columns as f64;
    let mut bar_w = col_w * 0.9;
    if let Some(px) = mark.bar_size {
        bar_w = bar_w.min(px * geo.units_per_px);
    }
    if let Some(px) = mark.max_bar_size {
        bar_w = bar_w.min(px * geo.units_per_px);
    }

    let style = css_color(mark.fill, idx)
        .mix(mark.opacity.unwrap_or(1.0))
        .filled();
    let key = x_key(plot);
    let rects: Vec<Rectangle<(f64, f64)>> = plot
        .data
        .iter()
        .zip(bands.bands.iter())
        .enumerate()
        .filter_map(|(i, (row, band))| {
            let band = (*band)?;
            let center = xscale.position(i, row, key)?;
            let col_center =
                center - geo.slot * GROUP_WIDTH / 2.0 + col_w * (column as f64 + 0.5);
            Some(Rectangle::new(
                [
                    (col_center - bar_w / 2.0, band.lower),
                    (col_center + bar_w / 2.0, band.upper),
                ],
                style,
            ))
        })
        .collect();
    draw_on(chart, secondary, rects)
}

fn draw_area<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    secondary: bool,
    plot: &CartesianPlot<'_>,
    xscale: &XScale,
    mark: &AreaMark<'_>,
    idx: usize,
    bands: Option<&MarkBands>,
) -> Result<()> {
    let Some(bands) = bands else {
        return Ok(());
    };
    let key = x_key(plot);
    let fill = css_color(mark.fill, idx).mix(mark.fill_opacity).filled();
    let stroke = css_color(mark.stroke, idx).stroke_width(2);

    let slices = plot
        .data
        .iter()
        .zip(bands.bands.iter())
        .enumerate()
        .map(|(i, (row, band))| {
            let x = xscale.position(i, row, key)?;
            band.map(|b| (x, b.lower, b.upper))
        });

    let mut cur: Vec<(f64, f64, f64)> = Vec::new();
    let mut groups: Vec<Vec<(f64, f64, f64)>> = Vec::new();
    for s in slices {
        match s {
            Some(s) => cur.push(s),
            None if !cur.is_empty() => groups.push(std::mem::take(&mut cur)),
            None => {}
        }
    }
    if !cur.is_empty() {
        groups.push(cur);
    }

    for group in groups {
        let upper: Vec<(f64, f64)> = group.iter().map(|(x, _, u)| (*x, *u)).collect();
        let lower: Vec<(f64, f64)> = group.iter().map(|(x, l, _)| (*x, *l)).collect();
        let upper = interpolate(&upper, mark.interpolation);
        let lower = interpolate(&lower, mark.interpolation);

        let mut poly = upper.clone();
        poly.extend(lower.iter().rev());
        draw_on(chart, secondary, std::iter::once(Polygon::new(poly, fill)))?;
        draw_on(chart, secondary, std::iter::once(PathElement::new(upper, stroke)))?;
    }
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    secondary: bool,
    plot: &CartesianPlot<'_>,
    xscale: &XScale,
    mark: &ScatterMark<'_>,
    idx: usize,
) -> Result<()> {
    let style = css_color(mark.fill, idx)
        .mix(mark.opacity.unwrap_or(1.0))
        .filled();
    let dots: Vec<Circle<(f64, f64), i32>> = plot
        .data
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let x = xscale.position(i, row, mark.x_key)?;
            let y = field(row, mark.data_key)?;
            Some(Circle::new((x, y), 4, style))
        })
        .collect();
    draw_on(chart, secondary, dots)
}
