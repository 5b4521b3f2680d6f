//! Utility functions for drawing: CSS colors, dash patterns, tick labels, label gutters.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;
use crate::render::palette_color;

/// Axis, tick and legend text.
pub static TEXT_GRAY: RGBColor = RGBColor(80, 80, 80);
/// Grid lines when the payload gives no stroke.
pub static GRID_GRAY: RGBColor = RGBColor(204, 204, 204);

/// Parse `#rgb` / `#rrggbb` (case-insensitive) into an RGB color.
pub fn parse_hex_color(s: &str) -> Option<RGBColor> {
    let hex = s.trim().strip_prefix('#')?;
    let channel = |h: &str| u8::from_str_radix(h, 16).ok();
    match hex.len() {
        6 => Some(RGBColor(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some(RGBColor(it.next()??, it.next()??, it.next()??))
        }
        _ => None,
    }
}

/// Resolve a configured color, falling back to the palette slot `idx` when the
/// string is not a hex color (named CSS colors are not supported).
pub fn css_color(s: &str, idx: usize) -> RGBColor {
    parse_hex_color(s)
        .or_else(|| parse_hex_color(palette_color(idx)))
        .unwrap_or(RGBColor(136, 132, 216))
}

/// First two numbers of an SVG dash array (`"5 5"`, `"3,3"`) as (dash, gap) pixels.
/// A single number is used for both.
pub fn parse_dash(pattern: &str) -> Option<(u32, u32)> {
    let nums: Vec<u32> = pattern
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.parse::<f64>().ok())
        .filter(|v| *v > 0.0)
        .map(|v| v.round().max(1.0) as u32)
        .collect();
    match nums.as_slice() {
        [] => None,
        [d] => Some((*d, *d)),
        [d, g, ..] => Some((*d, *g)),
    }
}

/// Tick label: thousands separators for whole numbers (`1,200`), up to two
/// decimals otherwise.
pub fn format_tick(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    let a = v.abs();
    if (v - v.round()).abs() < 1e-9 || a >= 100.0 {
        let n = v.round() as i64;
        n.to_formatted_string(&Locale::en)
    } else if a >= 10.0 {
        format!("{:.1}", v)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').to_string()
    }
}

/// Width (px) of the y label gutter needed for ticks sampled across `min..max`.
pub fn compute_label_area_px(min: f64, max: f64, ticks: usize, font_px: u32) -> u32 {
    let mut widest = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let s = format_tick(min + (max - min) * t);
        widest = widest.max(estimate_text_width_px(&s, font_px));
    }
    widest.saturating_add(18).clamp(36, 120)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#8884d8"), Some(RGBColor(0x88, 0x84, 0xd8)));
        assert_eq!(parse_hex_color("#FFF"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex_color("steelblue"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(css_color("nope", 1), RGBColor(0x82, 0xca, 0x9d));
    }

    #[test]
    fn dash_patterns() {
        assert_eq!(parse_dash("3 3"), Some((3, 3)));
        assert_eq!(parse_dash("5,10"), Some((5, 10)));
        assert_eq!(parse_dash("4"), Some((4, 4)));
        assert_eq!(parse_dash(""), None);
    }

    #[test]
    fn tick_formatting() {
        assert_eq!(format_tick(1200.0), "1,200");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-45000.0), "-45,000");
        assert_eq!(format_tick(12.34), "12.3");
        assert_eq!(format_tick(4.5), "4.5");
        assert_eq!(format_tick(0.25), "0.25");
    }

    #[test]
    fn label_area_is_clamped() {
        let narrow = compute_label_area_px(0.0, 1.0, 5, 12);
        let wide = compute_label_area_px(0.0, 9.0e12, 5, 12);
        assert!(narrow >= 36);
        assert!(wide <= 120);
        assert!(wide > narrow);
    }
}
