//! Drawing: turn a [`RenderedChart`] into **SVG** or **PNG** output, or into an
//! RGB buffer for the desktop viewer.
//!
//! - Cartesian charts with up to two y axes (secondary on the right)
//! - Stacked bars and areas from [`CartesianPlot::stack_layout`](crate::render::CartesianPlot::stack_layout)
//! - Pie/donut and radar charts drawn in pixel space
//! - Legend band at the top or bottom, or a column on the right
//! - Unsupported kinds draw their placeholder text

pub mod cartesian;
pub mod curve;
pub mod legend;
pub mod polar;
pub mod scale;
pub mod text;
pub mod util;

use anyhow::{Context, Result};
use log::debug;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;

use crate::models::{IconType, VerticalAlign};
use crate::render::{ChartBody, LegendElement, Mark, RenderedChart};
use legend::{LegendItem, RIGHT_PANEL_PX, draw_legend, estimate_band_height_px};
use util::{TEXT_GRAY, css_color, parse_hex_color};

/// Narrowest canvas ever produced.
pub const MIN_WIDTH_PX: u32 = 120;
/// Largest width or height ever produced, whatever the payload asks for.
pub const MAX_SIDE_PX: u32 = 8192;
/// Height of the title band in file output.
pub const TITLE_BAND_PX: u32 = 32;

/// One-time registration of the bundled font for the `ab_glyph` text path,
/// which does not discover system fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Pixel size of the chart area: the configured width resolved against
/// `container_width_px` by the configured height. Both sides are clamped:
/// width to [`MIN_WIDTH_PX`]..=[`MAX_SIDE_PX`], height to 1..=[`MAX_SIDE_PX`].
pub fn chart_size(view: &RenderedChart<'_>, container_width_px: u32) -> (u32, u32) {
    let w = view
        .container
        .width
        .resolve(container_width_px as f64)
        .round();
    // NaN fails both comparisons and lands on the minimum
    let w = if w >= MAX_SIDE_PX as f64 {
        MAX_SIDE_PX
    } else if w >= MIN_WIDTH_PX as f64 {
        w as u32
    } else {
        MIN_WIDTH_PX
    };
    (w, view.container.height.clamp(1, MAX_SIDE_PX))
}

fn titled_size(view: &RenderedChart<'_>, container_width_px: u32) -> (u32, u32) {
    let (w, h) = chart_size(view, container_width_px);
    if view.title.trim().is_empty() {
        (w, h)
    } else {
        (w, h + TITLE_BAND_PX)
    }
}

/// Draw to an in-memory SVG document, title included.
pub fn render_svg(view: &RenderedChart<'_>, container_width_px: u32) -> Result<String> {
    ensure_fonts_registered();
    let size = titled_size(view, container_width_px);
    let mut out = String::new();
    {
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        draw_chart(root, view, true)?;
    }
    Ok(out)
}

/// Draw to `path`: `.svg` selects the SVG backend, anything else PNG.
pub fn render_to_file<P: AsRef<Path>>(
    view: &RenderedChart<'_>,
    path: P,
    container_width_px: u32,
) -> Result<()> {
    ensure_fonts_registered();
    let path = path.as_ref();
    let size = titled_size(view, container_width_px);
    debug!("drawing chart {:?} to {} at {:?}", view.key, path.display(), size);

    let drawn = if path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_chart(root, view, true)
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_chart(root, view, true)
    };
    drawn.with_context(|| format!("drawing chart {:?} to {}", view.key, path.display()))
}

/// Draw into a packed RGB buffer (no title band); returns the buffer and its size.
pub fn render_rgb(view: &RenderedChart<'_>, container_width_px: u32) -> Result<(Vec<u8>, (u32, u32))> {
    ensure_fonts_registered();
    let (w, h) = chart_size(view, container_width_px);
    let mut buf = vec![255u8; (w as usize) * (h as usize) * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_chart(root, view, false)?;
    }
    Ok((buf, (w, h)))
}

fn legend_items(body: &ChartBody<'_>, legend: &LegendElement) -> Vec<LegendItem> {
    let item = |label: &str, color: &str, idx: usize, default_icon: IconType| LegendItem {
        label: label.to_string(),
        color: css_color(color, idx).to_rgba(),
        icon: legend.icon.unwrap_or(default_icon),
    };
    match body {
        ChartBody::Pie(pie) => pie
            .wedges
            .iter()
            .enumerate()
            .map(|(i, w)| item(&w.name, w.color, i, IconType::Rect))
            .collect(),
        ChartBody::Radar(radar) => radar
            .marks
            .iter()
            .enumerate()
            .map(|(i, m)| item(&m.label, m.stroke, i, IconType::Rect))
            .collect(),
        ChartBody::Unsupported(_) => Vec::new(),
        cartesian => cartesian
            .cartesian()
            .map(|plot| {
                plot.marks
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        let icon = match m {
                            Mark::Line(_) | Mark::Area(_) => IconType::Line,
                            Mark::Bar(_) => IconType::Rect,
                            Mark::Scatter(_) => IconType::Circle,
                        };
                        item(m.label(), m.color(), i, icon)
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn legend_of<'b>(body: &'b ChartBody<'_>) -> Option<&'b LegendElement> {
    match body {
        ChartBody::Pie(p) => p.legend.as_ref(),
        ChartBody::Radar(r) => r.legend.as_ref(),
        ChartBody::Unsupported(_) => None,
        other => other.cartesian().and_then(|p| p.legend.as_ref()),
    }
}

/// Shared drawing routine behind every backend.
pub fn draw_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    view: &RenderedChart<'_>,
    with_title: bool,
) -> Result<()> {
    let background = view
        .container
        .background
        .and_then(parse_hex_color)
        .unwrap_or(WHITE);
    root.fill(&background)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let area = if with_title && !view.title.trim().is_empty() {
        let (w, _) = root.dim_in_pixel();
        let title = text::truncate_to_width(view.title, 16, w.saturating_sub(16));
        let (band, rest) = root.split_vertically(TITLE_BAND_PX);
        band.draw(&Text::new(
            title,
            (12, (TITLE_BAND_PX / 2) as i32),
            TextStyle::from((FontFamily::SansSerif, 16))
                .pos(Pos::new(HPos::Left, VPos::Center))
                .color(&TEXT_GRAY),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        rest
    } else {
        root
    };

    let body = &view.container.body;
    if let ChartBody::Unsupported(message) = body {
        let (w, h) = area.dim_in_pixel();
        area.draw(&Text::new(
            message.as_str(),
            ((w / 2) as i32, (h / 2) as i32),
            TextStyle::from((FontFamily::SansSerif, 14))
                .pos(Pos::new(HPos::Center, VPos::Center))
                .color(&TEXT_GRAY),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        return area.present().map_err(|e| anyhow::anyhow!("{:?}", e));
    }

    let (w, h) = area.dim_in_pixel();
    let items = legend_of(body)
        .map(|l| legend_items(body, l))
        .unwrap_or_default();
    let align = legend_of(body).map(|l| l.align);

    // legend bands start at the plot's left edge
    let start_x = match body {
        ChartBody::Pie(_) | ChartBody::Radar(_) => 12,
        _ => 12 + view.container.margin.left.unwrap_or(5.0) as i32 + 40,
    };
    let (plot_area, legend_area) = match align {
        Some(_) if items.is_empty() => (area, None),
        Some(VerticalAlign::Middle) => {
            let panel = RIGHT_PANEL_PX.min(w / 3);
            let (plot, legend) = area.split_horizontally(w.saturating_sub(panel));
            (plot, Some(legend))
        }
        Some(align) => {
            let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
            let fixed = legend_of(body).and_then(|l| l.height).map(|h| h.round() as i32);
            let band = fixed
                .unwrap_or_else(|| estimate_band_height_px(&labels, start_x, w as i32))
                .clamp(16, (h as i32 / 2).max(16)) as u32;
            if align == VerticalAlign::Top {
                let (legend, plot) = area.split_vertically(band);
                (plot, Some(legend))
            } else {
                let (plot, legend) = area.split_vertically(h.saturating_sub(band));
                (plot, Some(legend))
            }
        }
        None => (area, None),
    };

    match body {
        ChartBody::Pie(pie) => polar::draw_pie(&plot_area, pie)?,
        ChartBody::Radar(radar) => polar::draw_radar(&plot_area, radar)?,
        other => {
            if let Some(plot) = other.cartesian() {
                cartesian::draw_cartesian(&plot_area, plot, view.container.margin)?;
            }
        }
    }

    if let Some(legend_area) = &legend_area {
        let right = align == Some(VerticalAlign::Middle);
        draw_legend(legend_area, &items, right, start_x)?;
    }

    plot_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
