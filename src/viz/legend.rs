//! Legend layout and drawing.
//!
//! Top/bottom legends are a band laid out like a table: items are packed
//! greedily into rows, then every row shares the same column x positions.
//! `verticalAlign: middle` puts a single-column legend on the right.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, wrap_text_to_width};
use super::util::TEXT_GRAY;
use crate::models::IconType;

pub const FONT_PX: u32 = 12;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 4;
const PAD_BAND: i32 = 6;
const ICON_W: i32 = 14;
const ICON_GAP: i32 = 6;
const TRAILING_GAP: i32 = 14;
const MIN_SLOT: i32 = 48;

/// Width of the right-hand legend column.
pub const RIGHT_PANEL_PX: u32 = 140;

/// One legend entry.
#[derive(Debug, Clone)]
pub struct LegendItem {
    pub label: String,
    pub color: RGBAColor,
    pub icon: IconType,
}

struct BandLayout {
    rows: Vec<Vec<usize>>,
    col_x: Vec<i32>,
    text_caps: Vec<u32>,
}

fn block_w(text_w: i32) -> i32 {
    ICON_W + ICON_GAP + text_w + TRAILING_GAP
}

fn band_layout(labels: &[&str], start_x: i32, total_w: i32) -> BandLayout {
    let usable = total_w - PAD_BAND;
    let per_item_cap = ((usable - start_x) as f32 * 0.4).max(100.0) as i32;

    let packed_w = |label: &str, cap: i32| -> i32 {
        let lines = wrap_text_to_width(label, FONT_PX, cap.max(40) as u32);
        let widest = lines
            .iter()
            .map(|s| estimate_text_width_px(s, FONT_PX) as i32)
            .max()
            .unwrap_or(0);
        block_w(widest)
    };

    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut x = start_x;
    for (i, label) in labels.iter().enumerate() {
        let cap = ((usable - x).max(40) - block_w(0)).min(per_item_cap);
        let mut w = packed_w(label, cap);
        if x + w > usable && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = start_x;
            w = packed_w(label, ((usable - start_x) - block_w(0)).min(per_item_cap));
        }
        x += w;
        cur.push(i);
    }
    if !cur.is_empty() {
        rows.push(cur);
    }

    let cols = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let mut slot_w = vec![MIN_SLOT; cols];
    for row in &rows {
        for (ci, &i) in row.iter().enumerate() {
            let w = block_w(estimate_text_width_px(labels[i], FONT_PX) as i32);
            slot_w[ci] = slot_w[ci].max(w);
        }
    }
    if start_x + slot_w.iter().sum::<i32>() > usable {
        let uniform = ((usable - start_x) / cols as i32).max(MIN_SLOT);
        slot_w = vec![uniform; cols];
    }

    let mut col_x = Vec::with_capacity(cols);
    let mut acc = start_x;
    for w in &slot_w {
        col_x.push(acc);
        acc += w;
    }
    let text_caps = slot_w
        .iter()
        .map(|w| (w - block_w(0)).max(40) as u32)
        .collect();

    BandLayout {
        rows,
        col_x,
        text_caps,
    }
}

fn row_height(labels: &[&str], row: &[usize], caps: &[u32]) -> i32 {
    row.iter()
        .enumerate()
        .map(|(ci, &i)| {
            let lines = wrap_text_to_width(labels[i], FONT_PX, caps[ci]);
            lines.len().max(1) as i32 * LINE_H
        })
        .max()
        .unwrap_or(LINE_H)
}

/// Height (px) a top/bottom legend band needs for `labels`.
pub fn estimate_band_height_px(labels: &[&str], start_x: i32, total_w: i32) -> i32 {
    if labels.is_empty() {
        return 0;
    }
    let layout = band_layout(labels, start_x, total_w);
    let rows_h: i32 = layout
        .rows
        .iter()
        .map(|r| row_height(labels, r, &layout.text_caps))
        .sum();
    let gaps = ROW_GAP * (layout.rows.len() as i32 - 1).max(0);
    PAD_BAND * 2 + rows_h + gaps
}

/// Draw the legend `items` into `area`.
///
/// `right_panel` selects the single-column layout; otherwise the band layout
/// starts at `start_x` (the plot's left edge).
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[LegendItem],
    right_panel: bool,
    start_x: i32,
) -> Result<()> {
    let (w, _) = area.dim_in_pixel();
    let style = TextStyle::from((FontFamily::SansSerif, FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Center))
        .color(&TEXT_GRAY);

    if right_panel {
        let text_x = 8 + ICON_W + ICON_GAP;
        let cap = (w as i32 - text_x - 4).max(40) as u32;
        let mut y = PAD_BAND * 3;
        for item in items {
            let lines = wrap_text_to_width(&item.label, FONT_PX, cap);
            let block_h = lines.len().max(1) as i32 * LINE_H;
            draw_icon(area, (8, y + LINE_H / 2), item)?;
            for (li, line) in lines.iter().enumerate() {
                let cy = y + li as i32 * LINE_H + LINE_H / 2;
                area.draw(&Text::new(line.as_str(), (text_x, cy), style.clone()))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
            y += block_h + ROW_GAP;
        }
        return Ok(());
    }

    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    let layout = band_layout(&labels, start_x, w as i32);
    let mut y_top = PAD_BAND;
    for row in &layout.rows {
        let row_h = row_height(&labels, row, &layout.text_caps);
        let y_center = y_top + row_h / 2;
        for (ci, &i) in row.iter().enumerate() {
            let item = &items[i];
            let x = layout.col_x[ci];
            draw_icon(area, (x, y_center), item)?;

            let lines = wrap_text_to_width(&item.label, FONT_PX, layout.text_caps[ci]);
            let top = y_center - (lines.len().max(1) as i32 * LINE_H) / 2;
            for (li, line) in lines.iter().enumerate() {
                let cy = top + li as i32 * LINE_H + LINE_H / 2;
                area.draw(&Text::new(
                    line.as_str(),
                    (x + ICON_W + ICON_GAP, cy),
                    style.clone(),
                ))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
        }
        y_top += row_h + ROW_GAP;
    }
    Ok(())
}

/// Legend glyph occupying `ICON_W` pixels starting at `left`.
fn draw_icon<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    (left, y): (i32, i32),
    item: &LegendItem,
) -> Result<()> {
    let c = item.color;
    let r = 5;
    let x = left + ICON_W / 2;
    let res = match item.icon {
        IconType::Line => area.draw(&PathElement::new(
            vec![(left, y), (left + ICON_W, y)],
            c.stroke_width(3),
        )),
        IconType::Circle => area.draw(&Circle::new((x, y), r, c.filled())),
        IconType::Diamond => area.draw(&Polygon::new(
            vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)],
            c.filled(),
        )),
        IconType::Triangle => area.draw(&Polygon::new(
            vec![(x, y - r), (x + r, y + r), (x - r, y + r)],
            c.filled(),
        )),
        IconType::Cross => area
            .draw(&PathElement::new(vec![(x - r, y), (x + r, y)], c.stroke_width(2)))
            .and_then(|_| {
                area.draw(&PathElement::new(
                    vec![(x, y - r), (x, y + r)],
                    c.stroke_width(2),
                ))
            }),
        IconType::Square => area.draw(&Rectangle::new(
            [(x - r, y - r), (x + r, y + r)],
            c.filled(),
        )),
        IconType::Rect | IconType::Star | IconType::Wye => area.draw(&Rectangle::new(
            [(left, y - r + 1), (left + ICON_W, y + r - 1)],
            c.filled(),
        )),
    };
    res.map_err(|e| anyhow::anyhow!("{:?}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_height_grows_with_items() {
        let few = ["Revenue", "Profit"];
        let many = [
            "Revenue", "Profit", "Expenses", "Marketing Spend", "Customer Count",
            "Churn Rate", "Net Promoter Score", "Average Order Value",
        ];
        let h_few = estimate_band_height_px(&few, 40, 600);
        let h_many = estimate_band_height_px(&many, 40, 300);
        assert!(h_few >= LINE_H);
        assert!(h_many > h_few);
        assert_eq!(estimate_band_height_px(&[], 40, 600), 0);
    }

    #[test]
    fn columns_align_across_rows() {
        let labels = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"];
        let layout = band_layout(&labels, 10, 300);
        assert!(layout.rows.len() > 1);
        assert_eq!(layout.col_x[0], 10);
        assert!(layout.col_x.windows(2).all(|w| w[1] > w[0]));
    }
}
