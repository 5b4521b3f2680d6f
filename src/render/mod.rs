//! Chart renderer: a pure mapping from one [`ChartConfig`] to a visual tree.
//!
//! - Dispatch is a function of `config.kind` only
//! - Missing axes are synthesized (category `name` for x, plain number for y)
//! - Series without a color take `PALETTE[index % 10]`
//! - Grid, tooltip and legend are present unless `show: false`
//! - Unknown or reserved kinds become an `Unsupported` placeholder, never an error
//!
//! Drawing the tree is the job of [`crate::viz`].

pub mod types;

pub use types::{
    AreaMark, AxisElement, Band, BarMark, CartesianPlot, ChartBody, Container, GridElement,
    LegendElement, LineMark, Mark, MarkBands, PiePlot, RadarMark, RadarPlot, RenderedChart,
    ScatterMark, TooltipElement, Wedge,
};

use crate::models::{
    AxisConfig, AxisDomain, AxisScale, ChartConfig, ChartKind, Dimension, Interpolation,
    Orientation, Row, SeriesConfig, SeriesShape, Tag, VerticalAlign,
};
use log::warn;
use std::collections::HashMap;

/// Fallback series colors, cycled by series position.
pub const PALETTE: [&str; 10] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#0088fe", "#00c49f", "#ffbb28", "#ff8042",
    "#8dd1e1", "#d084d0",
];

/// Palette color for the series (or pie row) at `idx`.
#[inline]
pub fn palette_color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

/// Numeric value of `key` in `row`, if present and numeric.
pub fn field(row: &Row, key: &str) -> Option<f64> {
    row.get(key).and_then(|v| v.as_f64())
}

/// Render one chart configuration.
pub fn render(config: &ChartConfig) -> RenderedChart<'_> {
    let body = match &config.kind {
        ChartKind::Line => ChartBody::Line(cartesian(config)),
        ChartKind::Bar => ChartBody::Bar(cartesian(config)),
        ChartKind::Area => ChartBody::Area(cartesian(config)),
        ChartKind::Scatter => ChartBody::Scatter(cartesian(config)),
        ChartKind::Composed => ChartBody::Composed(cartesian(config)),
        ChartKind::Pie => ChartBody::Pie(pie(config)),
        ChartKind::Radar => ChartBody::Radar(radar(config)),
        other => {
            warn!("chart {:?}: unsupported chart type {:?}", config.id, other.as_str());
            ChartBody::Unsupported(format!("Unsupported chart type: {}", other))
        }
    };

    RenderedChart {
        key: &config.id,
        title: &config.title,
        container: Container {
            width: config.layout.width.unwrap_or(Dimension::Percent(100.0)),
            height: config.layout.height,
            margin: config.layout.margin.unwrap_or_default(),
            background: config.styling.as_ref().and_then(|s| s.background.as_deref()),
            body,
        },
    }
}

fn shown(flag: Option<bool>) -> bool {
    flag != Some(false)
}

fn grid(config: &ChartConfig) -> Option<GridElement<'_>> {
    let g = config.grid();
    if !shown(g.and_then(|g| g.show)) {
        return None;
    }
    Some(GridElement {
        dash: g.and_then(|g| g.stroke_dasharray.as_deref()).unwrap_or("3 3"),
        stroke: g.and_then(|g| g.stroke.as_deref()),
        opacity: g.and_then(|g| g.opacity),
    })
}

fn tooltip(config: &ChartConfig) -> Option<TooltipElement<'_>> {
    let t = config.tooltip();
    if !shown(t.and_then(|t| t.show)) {
        return None;
    }
    Some(TooltipElement {
        separator: t.and_then(|t| t.separator.as_deref()).unwrap_or(" : "),
    })
}

fn legend(config: &ChartConfig) -> Option<LegendElement> {
    let l = config.legend();
    if !shown(l.and_then(|l| l.show)) {
        return None;
    }
    Some(LegendElement {
        align: l.and_then(|l| l.vertical_align).unwrap_or(VerticalAlign::Bottom),
        height: l.and_then(|l| l.height),
        icon: l.and_then(|l| l.icon_type),
    })
}

fn axis_element(axis: &AxisConfig, is_x: bool) -> AxisElement<'_> {
    let (default_scale, default_orientation) = if is_x {
        (AxisScale::Category, Orientation::Bottom)
    } else {
        (AxisScale::Number, Orientation::Left)
    };
    AxisElement {
        id: if is_x {
            axis.x_axis_id.as_ref()
        } else {
            axis.y_axis_id.as_ref()
        },
        data_key: axis.data_key.as_deref(),
        scale: axis.scale.unwrap_or(default_scale),
        domain: match &axis.domain {
            Some(AxisDomain::Range(lo, hi)) => Some((lo, hi)),
            Some(AxisDomain::Auto) | None => None,
        },
        tick_count: axis.tick_count,
        label: axis.label.as_deref(),
        orientation: axis.orientation.unwrap_or(default_orientation),
        hidden: axis.hide.unwrap_or(false),
    }
}

fn x_axes(config: &ChartConfig) -> Vec<AxisElement<'_>> {
    match config.x_axes() {
        Some(axes) => axes.iter().map(|a| axis_element(a, true)).collect(),
        None => vec![AxisElement {
            id: None,
            data_key: Some("name"),
            scale: AxisScale::Category,
            domain: None,
            tick_count: None,
            label: None,
            orientation: Orientation::Bottom,
            hidden: false,
        }],
    }
}

fn y_axes(config: &ChartConfig) -> Vec<AxisElement<'_>> {
    match config.y_axes() {
        Some(axes) => axes.iter().map(|a| axis_element(a, false)).collect(),
        None => vec![AxisElement {
            id: None,
            data_key: None,
            scale: AxisScale::Number,
            domain: None,
            tick_count: None,
            label: None,
            orientation: Orientation::Left,
            hidden: false,
        }],
    }
}

/// `stroke`, then `fill`, then the palette slot of this series.
fn base_color(series: &SeriesConfig, idx: usize) -> &str {
    series
        .stroke
        .as_deref()
        .or(series.fill.as_deref())
        .unwrap_or_else(|| palette_color(idx))
}

fn display_name(series: &SeriesConfig) -> String {
    series
        .name
        .clone()
        .unwrap_or_else(|| series.data_key.clone())
}

fn numbered_name(series: &SeriesConfig, idx: usize) -> String {
    series
        .name
        .clone()
        .unwrap_or_else(|| format!("Series {}", idx + 1))
}

fn line_mark(series: &SeriesConfig, idx: usize, interpolation: Interpolation) -> LineMark<'_> {
    let color = base_color(series, idx);
    LineMark {
        data_key: &series.data_key,
        label: display_name(series),
        stroke: series.stroke.as_deref().unwrap_or(color),
        stroke_width: series.stroke_width.unwrap_or(2.0),
        dash: series.stroke_dasharray.as_deref(),
        opacity: series.opacity,
        interpolation,
        y_axis: series.y_axis_id.as_ref(),
    }
}

fn bar_mark(series: &SeriesConfig, idx: usize) -> BarMark<'_> {
    let color = base_color(series, idx);
    BarMark {
        data_key: &series.data_key,
        label: display_name(series),
        fill: series.fill.as_deref().unwrap_or(color),
        opacity: series.opacity,
        stack: series.stack_id.as_ref(),
        y_axis: series.y_axis_id.as_ref(),
        bar_size: series.bar.bar_size,
        max_bar_size: series.bar.max_bar_size,
    }
}

fn area_mark<'a>(
    series: &'a SeriesConfig,
    idx: usize,
    interpolation: Interpolation,
    stack: Option<&'a Tag>,
) -> AreaMark<'a> {
    let color = base_color(series, idx);
    AreaMark {
        data_key: &series.data_key,
        label: display_name(series),
        stroke: series.stroke.as_deref().unwrap_or(color),
        fill: series.fill.as_deref().unwrap_or(color),
        fill_opacity: series.opacity.unwrap_or(0.6),
        interpolation,
        stack,
        y_axis: series.y_axis_id.as_ref(),
    }
}

fn mark<'a>(
    kind: &ChartKind,
    series: &'a SeriesConfig,
    idx: usize,
    x_key: Option<&'a str>,
) -> Option<Mark<'a>> {
    let own = series.interpolation.unwrap_or(Interpolation::Monotone);
    match kind {
        ChartKind::Line => Some(Mark::Line(line_mark(series, idx, own))),
        ChartKind::Bar => Some(Mark::Bar(bar_mark(series, idx))),
        ChartKind::Area => Some(Mark::Area(area_mark(
            series,
            idx,
            own,
            series.stack_id.as_ref(),
        ))),
        ChartKind::Scatter => Some(Mark::Scatter(ScatterMark {
            x_key,
            data_key: &series.data_key,
            label: numbered_name(series, idx),
            fill: series.fill.as_deref().unwrap_or(base_color(series, idx)),
            opacity: series.opacity,
            y_axis: series.y_axis_id.as_ref(),
        })),
        ChartKind::Composed => {
            let custom = series.custom.as_ref();
            let interpolation = custom
                .and_then(|c| c.interpolation)
                .or(series.interpolation)
                .unwrap_or(Interpolation::Monotone);
            let shape = custom
                .and_then(|c| c.chart_type)
                .unwrap_or(SeriesShape::Line);
            Some(match shape {
                SeriesShape::Bar => Mark::Bar(bar_mark(series, idx)),
                SeriesShape::Area => Mark::Area(area_mark(series, idx, interpolation, None)),
                SeriesShape::Line => Mark::Line(LineMark {
                    // composed lines ignore dash and opacity
                    dash: None,
                    opacity: None,
                    ..line_mark(series, idx, interpolation)
                }),
            })
        }
        _ => None,
    }
}

fn cartesian(config: &ChartConfig) -> CartesianPlot<'_> {
    let x_axes = x_axes(config);
    let x_key = x_axes.first().and_then(|a| a.data_key);
    let marks = config
        .series
        .iter()
        .enumerate()
        .filter_map(|(idx, s)| mark(&config.kind, s, idx, x_key))
        .collect();
    CartesianPlot {
        data: &config.data,
        x_axes,
        y_axes: y_axes(config),
        grid: grid(config),
        tooltip: tooltip(config),
        legend: legend(config),
        marks,
    }
}

fn pie(config: &ChartConfig) -> PiePlot<'_> {
    // Pie charts read only their first series.
    let series = config.series.first();
    let data_key = series.map(|s| s.data_key.as_str());
    let name_key = series
        .and_then(|s| s.custom.as_ref())
        .and_then(|c| c.name_key.as_deref())
        .unwrap_or("name");

    let values: Vec<f64> = config
        .data
        .iter()
        .map(|row| data_key.and_then(|k| field(row, k)).unwrap_or(0.0))
        .collect();
    let total: f64 = values.iter().sum();

    let wedges = if series.is_some() {
        config
            .data
            .iter()
            .zip(values.iter())
            .enumerate()
            .map(|(idx, (row, &value))| {
                let name = row.get(name_key).map(|v| v.label()).unwrap_or_default();
                let fraction = if total > 0.0 { value / total } else { 0.0 };
                Wedge {
                    label: format!("{}: {}%", name, (fraction * 100.0).round() as i64),
                    name,
                    value,
                    fraction,
                    color: row
                        .get("fill")
                        .and_then(|v| v.as_str())
                        .unwrap_or_else(|| palette_color(idx)),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let geometry = series.map(|s| &s.pie);
    PiePlot {
        data_key,
        name_key,
        cx: geometry
            .and_then(|g| g.cx)
            .unwrap_or(Dimension::Percent(50.0)),
        cy: geometry
            .and_then(|g| g.cy)
            .unwrap_or(Dimension::Percent(50.0)),
        inner_radius: geometry.and_then(|g| g.inner_radius).unwrap_or(0.0),
        outer_radius: geometry.and_then(|g| g.outer_radius).unwrap_or(80.0),
        wedges,
        tooltip: tooltip(config),
        legend: legend(config),
    }
}

fn radar(config: &ChartConfig) -> RadarPlot<'_> {
    let marks = config
        .series
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let color = base_color(s, idx);
            RadarMark {
                data_key: &s.data_key,
                label: numbered_name(s, idx),
                stroke: s.stroke.as_deref().unwrap_or(color),
                fill: s.fill.as_deref().unwrap_or(color),
                fill_opacity: s.opacity.unwrap_or(0.6),
            }
        })
        .collect();
    RadarPlot {
        data: &config.data,
        angle_key: "subject",
        marks,
        tooltip: tooltip(config),
        legend: legend(config),
    }
}

impl<'a> CartesianPlot<'a> {
    /// Bands for every bar and area mark.
    ///
    /// Marks sharing a stack id (on the same y axis) accumulate in series
    /// order, so the first one sits at the bottom. Missing values count as 0
    /// inside a stack and are gaps outside one.
    pub fn stack_layout(&self) -> Vec<MarkBands> {
        let rows = self.data.len();
        let mut running: HashMap<(&Tag, Option<&Tag>), Vec<f64>> = HashMap::new();
        let mut out = Vec::new();

        for (idx, mark) in self.marks.iter().enumerate() {
            if !matches!(mark, Mark::Bar(_) | Mark::Area(_)) {
                continue;
            }
            let key = mark.data_key();
            let bands = match mark.stack() {
                Some(stack) => {
                    let cum = running
                        .entry((stack, mark.y_axis()))
                        .or_insert_with(|| vec![0.0; rows]);
                    self.data
                        .iter()
                        .zip(cum.iter_mut())
                        .map(|(row, base)| {
                            let lower = *base;
                            *base += field(row, key).unwrap_or(0.0);
                            Some(Band {
                                lower,
                                upper: *base,
                            })
                        })
                        .collect()
                }
                None => self
                    .data
                    .iter()
                    .map(|row| field(row, key).map(|v| Band { lower: 0.0, upper: v }))
                    .collect(),
            };
            out.push(MarkBands { mark: idx, bands });
        }
        out
    }

    /// Index of the y axis a mark is drawn against: the axis whose id matches
    /// the mark's `yAxisId`, else the first one.
    pub fn y_axis_index(&self, mark: &Mark<'_>) -> usize {
        mark.y_axis()
            .and_then(|id| self.y_axes.iter().position(|a| a.id == Some(id)))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{
        composed_chart, pie_chart, row, stacked_bar_chart, ChartConfigBuilder, SeriesSpec,
    };
    use crate::models::{Scalar, SeriesConfig, Styling, TooltipConfig};

    fn rows() -> Vec<Row> {
        vec![
            row([
                ("name", Scalar::from("Jan")),
                ("a", Scalar::from(1)),
                ("b", Scalar::from(2)),
                ("c", Scalar::from(3)),
                ("subject", Scalar::from("Speed")),
            ]),
            row([
                ("name", Scalar::from("Feb")),
                ("a", Scalar::from(10)),
                ("b", Scalar::from(20)),
                ("c", Scalar::from(30)),
                ("subject", Scalar::from("Range")),
            ]),
        ]
    }

    fn config(kind: ChartKind, series: Vec<SeriesConfig>) -> ChartConfig {
        ChartConfigBuilder::new(kind, "id", "Title")
            .with_data(rows())
            .with_multiple_series(series)
            .build()
            .unwrap()
    }

    #[test]
    fn every_supported_kind_yields_its_primitive() {
        let cases = [
            (ChartKind::Line, "LineChart"),
            (ChartKind::Bar, "BarChart"),
            (ChartKind::Area, "AreaChart"),
            (ChartKind::Scatter, "ScatterChart"),
            (ChartKind::Composed, "ComposedChart"),
            (ChartKind::Pie, "PieChart"),
            (ChartKind::Radar, "RadarChart"),
        ];
        for (kind, name) in cases {
            let cfg = config(kind.clone(), vec![SeriesConfig::new("a")]);
            let view = render(&cfg);
            assert_eq!(view.container.body.primitive_name(), name, "{kind}");
            let non_empty = match &view.container.body {
                ChartBody::Pie(p) => !p.wedges.is_empty(),
                ChartBody::Radar(r) => !r.marks.is_empty(),
                ChartBody::Unsupported(_) => false,
                other => !other.cartesian().unwrap().marks.is_empty(),
            };
            assert!(non_empty, "{kind} rendered an empty tree");
        }
    }

    #[test]
    fn unsupported_kinds_render_placeholder() {
        for (tag, expected) in [
            ("treemap", "Unsupported chart type: treemap"),
            ("funnel", "Unsupported chart type: funnel"),
            ("sankey", "Unsupported chart type: sankey"),
        ] {
            let cfg = config(ChartKind::from(tag), vec![SeriesConfig::new("a")]);
            let view = render(&cfg);
            assert_eq!(view.container.body, ChartBody::Unsupported(expected.to_string()));
        }

        let missing: ChartConfig = serde_json::from_str(r#"{"id":"m"}"#).unwrap();
        assert_eq!(
            render(&missing).container.body,
            ChartBody::Unsupported("Unsupported chart type: ".to_string())
        );
    }

    #[test]
    fn palette_cycles_by_series_position() {
        let series: Vec<SeriesConfig> = (0..12).map(|_| SeriesConfig::new("a")).collect();
        let cfg = config(ChartKind::Line, series);
        let view = render(&cfg);
        let plot = view.container.body.cartesian().unwrap();
        for (idx, mark) in plot.marks.iter().enumerate() {
            assert_eq!(mark.color(), PALETTE[idx % PALETTE.len()]);
        }
        assert_eq!(plot.marks[10].color(), "#8884d8");
    }

    #[test]
    fn explicit_colors_win_over_palette() {
        let cfg = config(
            ChartKind::Bar,
            vec![
                SeriesConfig::new("a"),
                SeriesConfig::new("b").stroke("#123456"),
                SeriesConfig::new("c").fill("#abcdef"),
            ],
        );
        let view = render(&cfg);
        let marks = &view.container.body.cartesian().unwrap().marks;
        assert_eq!(marks[0].color(), PALETTE[0]);
        // a bar with only a stroke is filled with the stroke color
        assert_eq!(marks[1].color(), "#123456");
        assert_eq!(marks[2].color(), "#abcdef");
    }

    #[test]
    fn stacked_series_accumulate_in_order() {
        let specs = [
            SeriesSpec::new("a", "A", "#111111"),
            SeriesSpec::new("b", "B", "#222222"),
            SeriesSpec::new("c", "C", "#333333"),
        ];
        let cfg = stacked_bar_chart("s", "S", rows(), &specs, "name")
            .build()
            .unwrap();
        let view = render(&cfg);
        let plot = view.container.body.cartesian().unwrap();
        let layout = plot.stack_layout();
        assert_eq!(layout.len(), 3);

        let band = |m: usize, r: usize| layout[m].bands[r].unwrap();
        assert_eq!(band(0, 1), Band { lower: 0.0, upper: 10.0 });
        assert_eq!(band(1, 1), Band { lower: 10.0, upper: 30.0 });
        assert_eq!(band(2, 1), Band { lower: 30.0, upper: 60.0 });
        assert_eq!(band(2, 0), Band { lower: 3.0, upper: 6.0 });
    }

    #[test]
    fn unstacked_bars_start_at_zero_and_gap_on_missing() {
        let cfg = config(
            ChartKind::Bar,
            vec![SeriesConfig::new("a"), SeriesConfig::new("missing")],
        );
        let view = render(&cfg);
        let layout = view.container.body.cartesian().unwrap().stack_layout();
        assert_eq!(layout[0].bands[1], Some(Band { lower: 0.0, upper: 10.0 }));
        assert!(layout[1].bands.iter().all(Option::is_none));
    }

    #[test]
    fn pie_labels_use_rounded_percentages() {
        let data = vec![
            row([("name", Scalar::from("X")), ("value", Scalar::from(400))]),
            row([("name", Scalar::from("Y")), ("value", Scalar::from(100))]),
        ];
        let cfg = pie_chart("p", "P", data, "value", "name").build().unwrap();
        let view = render(&cfg);
        let ChartBody::Pie(pie) = &view.container.body else {
            panic!("expected pie");
        };
        let labels: Vec<&str> = pie.wedges.iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, ["X: 80%", "Y: 20%"]);
        assert_eq!(pie.wedges[0].color, PALETTE[0]);
        assert_eq!(pie.outer_radius, 80.0);
    }

    #[test]
    fn pie_uses_row_fill_and_first_series_only() {
        let data = vec![
            row([
                ("name", Scalar::from("Desktop")),
                ("value", Scalar::from(3)),
                ("fill", Scalar::from("#0088FE")),
            ]),
            row([("name", Scalar::from("Mobile")), ("value", Scalar::from(1))]),
        ];
        let cfg = ChartConfigBuilder::new(ChartKind::Pie, "p", "P")
            .with_data(data)
            .with_series(SeriesConfig::new("value"))
            .with_series(SeriesConfig::new("ignored"))
            .build()
            .unwrap();
        let view = render(&cfg);
        let ChartBody::Pie(pie) = &view.container.body else {
            panic!("expected pie");
        };
        assert_eq!(pie.data_key, Some("value"));
        assert_eq!(pie.wedges[0].color, "#0088FE");
        assert_eq!(pie.wedges[1].color, PALETTE[1]);
        assert_eq!(pie.wedges[0].label, "Desktop: 75%");
    }

    #[test]
    fn composed_series_pick_their_shape() {
        let cfg = composed_chart("c", "C", rows(), "name")
            .with_series(SeriesConfig::new("a").shape(SeriesShape::Bar).on_y_axis("left"))
            .with_series(SeriesConfig::new("b").shape(SeriesShape::Area))
            .with_series(SeriesConfig::new("c").on_y_axis("right"))
            .build()
            .unwrap();
        let view = render(&cfg);
        let ChartBody::Composed(plot) = &view.container.body else {
            panic!("expected composed");
        };
        assert!(matches!(plot.marks[0], Mark::Bar(_)));
        assert!(matches!(plot.marks[1], Mark::Area(_)));
        assert!(matches!(plot.marks[2], Mark::Line(_)));
        assert_eq!(plot.y_axes.len(), 2);
        assert_eq!(plot.y_axis_index(&plot.marks[2]), 1);
        assert_eq!(plot.y_axis_index(&plot.marks[0]), 0);
    }

    #[test]
    fn composed_interpolation_precedence_and_unstacked_areas() {
        let own_only = SeriesConfig::new("a").interpolation(Interpolation::Step);
        let mut both = SeriesConfig::new("b")
            .shape(SeriesShape::Area)
            .interpolation(Interpolation::Step)
            .stack("s1");
        if let Some(custom) = both.custom.as_mut() {
            custom.interpolation = Some(Interpolation::Linear);
        }
        let cfg = composed_chart("c", "C", rows(), "name")
            .with_series(own_only)
            .with_series(both)
            .with_series(SeriesConfig::new("c"))
            .build()
            .unwrap();
        let view = render(&cfg);
        let plot = view.container.body.cartesian().unwrap();

        let Mark::Line(first) = &plot.marks[0] else {
            panic!("expected line");
        };
        assert_eq!(first.interpolation, Interpolation::Step);

        let Mark::Area(area) = &plot.marks[1] else {
            panic!("expected area");
        };
        assert_eq!(area.interpolation, Interpolation::Linear);
        assert_eq!(area.stack, None);

        let Mark::Line(last) = &plot.marks[2] else {
            panic!("expected line");
        };
        assert_eq!(last.interpolation, Interpolation::Monotone);
    }

    #[test]
    fn default_axes_are_synthesized() {
        let cfg = config(ChartKind::Line, vec![SeriesConfig::new("a")]);
        let view = render(&cfg);
        let plot = view.container.body.cartesian().unwrap();
        assert_eq!(plot.x_axes.len(), 1);
        assert_eq!(plot.x_axes[0].data_key, Some("name"));
        assert_eq!(plot.x_axes[0].scale, AxisScale::Category);
        assert_eq!(plot.y_axes[0].scale, AxisScale::Number);
        assert_eq!(plot.y_axes[0].data_key, None);
        assert_eq!(view.container.width, Dimension::Percent(100.0));
        assert_eq!(view.container.height, 300);
    }

    #[test]
    fn decorations_hide_only_on_explicit_false() {
        let mut cfg = config(ChartKind::Line, vec![SeriesConfig::new("a")]);
        cfg.styling = None;
        let view = render(&cfg);
        let plot = view.container.body.cartesian().unwrap();
        assert!(plot.grid.is_some() && plot.tooltip.is_some() && plot.legend.is_some());
        assert_eq!(plot.grid.as_ref().unwrap().dash, "3 3");

        cfg.styling = Some(Styling {
            tooltip: Some(TooltipConfig {
                show: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        });
        let view = render(&cfg);
        let plot = view.container.body.cartesian().unwrap();
        assert!(plot.tooltip.is_none());
        assert!(plot.grid.is_some() && plot.legend.is_some());
    }

    #[test]
    fn radar_and_scatter_default_names() {
        let cfg = config(ChartKind::Radar, vec![SeriesConfig::new("a"), SeriesConfig::new("b")]);
        let view = render(&cfg);
        let ChartBody::Radar(radar) = &view.container.body else {
            panic!("expected radar");
        };
        assert_eq!(radar.angle_key, "subject");
        assert_eq!(radar.marks[1].label, "Series 2");
        assert_eq!(radar.marks[0].fill_opacity, 0.6);

        let cfg = config(ChartKind::Scatter, vec![SeriesConfig::new("a").named("Points")]);
        let view = render(&cfg);
        assert_eq!(view.container.body.cartesian().unwrap().marks[0].label(), "Points");
    }
}
