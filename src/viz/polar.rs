//! Pie and radar charts, drawn directly in pixel space.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};

use super::text::truncate_to_width;
use super::util::{GRID_GRAY, TEXT_GRAY, css_color};
use crate::render::{field, PiePlot, RadarPlot};

const LABEL_FONT_PX: u32 = 12;
/// Room kept around a pie for its outside labels.
const LABEL_GUTTER: f64 = 22.0;
const RADAR_RINGS: usize = 5;

/// Point at `angle` (radians, counter-clockwise from 3 o'clock) on a circle.
pub fn polar_point(center: (f64, f64), radius: f64, angle: f64) -> (i32, i32) {
    (
        (center.0 + radius * angle.cos()).round() as i32,
        (center.1 - radius * angle.sin()).round() as i32,
    )
}

/// Outline of a ring sector between `start` and `end` (radians). An inner
/// radius of 0 gives a plain wedge.
pub fn sector_points(
    center: (f64, f64),
    inner: f64,
    outer: f64,
    start: f64,
    end: f64,
) -> Vec<(i32, i32)> {
    let sweep = end - start;
    let steps = ((sweep.abs() / TAU) * 96.0).ceil().max(2.0) as usize;
    let arc = |r: f64| {
        (0..=steps)
            .map(move |i| start + sweep * i as f64 / steps as f64)
            .map(move |a| polar_point(center, r, a))
    };

    let mut pts: Vec<(i32, i32)> = arc(outer).collect();
    if inner > 0.0 {
        let mut inner_arc: Vec<(i32, i32)> = arc(inner).collect();
        inner_arc.reverse();
        pts.extend(inner_arc);
    } else {
        pts.push(polar_point(center, 0.0, 0.0));
    }
    pts
}

fn map_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

pub fn draw_pie<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, pie: &PiePlot<'_>) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as f64, h as f64);
    let center = (pie.cx.resolve(w), pie.cy.resolve(h));
    let max_r = (w.min(h) / 2.0 - LABEL_GUTTER).max(8.0);
    let outer = pie.outer_radius.min(max_r);
    let inner = pie.inner_radius.clamp(0.0, outer);

    let label_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX)).color(&TEXT_GRAY);

    let mut angle = 0.0;
    for (idx, wedge) in pie.wedges.iter().enumerate() {
        let sweep = wedge.fraction * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let color = css_color(wedge.color, idx);
        area.draw(&Polygon::new(
            sector_points(center, inner, outer, angle, angle + sweep),
            color.filled(),
        ))
        .map_err(map_err)?;
        if pie.wedges.len() > 1 {
            let edge = vec![polar_point(center, inner, angle), polar_point(center, outer, angle)];
            area.draw(&PathElement::new(edge, WHITE.stroke_width(1)))
                .map_err(map_err)?;
        }

        let mid = angle + sweep / 2.0;
        let tick = vec![
            polar_point(center, outer, mid),
            polar_point(center, outer + 8.0, mid),
        ];
        area.draw(&PathElement::new(tick, color.stroke_width(1)))
            .map_err(map_err)?;

        let right_side = mid.cos() >= 0.0;
        let anchor = if right_side { HPos::Left } else { HPos::Right };
        let (lx, ly) = polar_point(center, outer + 11.0, mid);
        let room = if right_side { w - lx as f64 } else { lx as f64 };
        let text = truncate_to_width(&wedge.label, LABEL_FONT_PX, room.max(24.0) as u32);
        area.draw(&Text::new(
            text,
            (lx, ly),
            label_style.pos(Pos::new(anchor, VPos::Center)),
        ))
        .map_err(map_err)?;

        angle += sweep;
    }
    Ok(())
}

pub fn draw_radar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    radar: &RadarPlot<'_>,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as f64, h as f64);
    let center = (w / 2.0, h / 2.0);
    let radius = (w.min(h) / 2.0 * 0.8 - 8.0).max(8.0);
    let spokes = radar.data.len();
    if spokes == 0 {
        return Ok(());
    }
    // first spoke points up, the rest go clockwise
    let spoke_angle = |i: usize| FRAC_PI_2 - TAU * i as f64 / spokes as f64;

    let max_value = radar
        .marks
        .iter()
        .flat_map(|m| radar.data.iter().filter_map(move |r| field(r, m.data_key)))
        .fold(0.0_f64, f64::max);
    let max_value = if max_value > 0.0 { max_value } else { 1.0 };

    for ring in 1..=RADAR_RINGS {
        let r = radius * ring as f64 / RADAR_RINGS as f64;
        let mut pts: Vec<(i32, i32)> = (0..spokes)
            .map(|i| polar_point(center, r, spoke_angle(i)))
            .collect();
        pts.push(pts[0]);
        area.draw(&PathElement::new(pts, GRID_GRAY.stroke_width(1)))
            .map_err(map_err)?;
    }

    let label_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX)).color(&TEXT_GRAY);
    for (i, row) in radar.data.iter().enumerate() {
        let a = spoke_angle(i);
        let spoke = vec![polar_point(center, 0.0, a), polar_point(center, radius, a)];
        area.draw(&PathElement::new(spoke, GRID_GRAY.stroke_width(1)))
            .map_err(map_err)?;

        let name = row.get(radar.angle_key).map(|v| v.label()).unwrap_or_default();
        let hpos = if a.cos() > 0.1 {
            HPos::Left
        } else if a.cos() < -0.1 {
            HPos::Right
        } else {
            HPos::Center
        };
        let vpos = if a.sin() > 0.1 {
            VPos::Bottom
        } else if a.sin() < -0.1 {
            VPos::Top
        } else {
            VPos::Center
        };
        area.draw(&Text::new(
            name,
            polar_point(center, radius + 6.0, a),
            label_style.pos(Pos::new(hpos, vpos)),
        ))
        .map_err(map_err)?;
    }

    for (idx, mark) in radar.marks.iter().enumerate() {
        let pts: Vec<(i32, i32)> = radar
            .data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let v = field(row, mark.data_key).unwrap_or(0.0).max(0.0);
                polar_point(center, radius * v / max_value, spoke_angle(i))
            })
            .collect();
        let fill = css_color(mark.fill, idx).mix(mark.fill_opacity);
        area.draw(&Polygon::new(pts.clone(), fill.filled()))
            .map_err(map_err)?;
        let mut outline = pts;
        outline.push(outline[0]);
        area.draw(&PathElement::new(
            outline,
            css_color(mark.stroke, idx).stroke_width(2),
        ))
        .map_err(map_err)?;
    }
    Ok(())
}
