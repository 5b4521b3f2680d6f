//! The visual tree produced by [`super::render`].
//!
//! Everything here borrows from the [`ChartConfig`](crate::models::ChartConfig)
//! it was rendered from; a tree is cheap to rebuild and is never mutated.

use crate::models::{
    AxisScale, Dimension, DomainBound, IconType, Interpolation, Margin, Orientation, Row, Tag,
    VerticalAlign,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart<'a> {
    /// Stable key (the chart id).
    pub key: &'a str,
    pub title: &'a str,
    pub container: Container<'a>,
}

/// Responsive wrapper: stretches to `width`, fixed `height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<'a> {
    pub width: Dimension,
    pub height: u32,
    pub margin: Margin,
    pub background: Option<&'a str>,
    pub body: ChartBody<'a>,
}

/// Exactly one top-level chart primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody<'a> {
    Line(CartesianPlot<'a>),
    Bar(CartesianPlot<'a>),
    Area(CartesianPlot<'a>),
    Scatter(CartesianPlot<'a>),
    Composed(CartesianPlot<'a>),
    Pie(PiePlot<'a>),
    Radar(RadarPlot<'a>),
    /// Placeholder text shown instead of a chart.
    Unsupported(String),
}

impl<'a> ChartBody<'a> {
    pub fn primitive_name(&self) -> &'static str {
        match self {
            ChartBody::Line(_) => "LineChart",
            ChartBody::Bar(_) => "BarChart",
            ChartBody::Area(_) => "AreaChart",
            ChartBody::Scatter(_) => "ScatterChart",
            ChartBody::Composed(_) => "ComposedChart",
            ChartBody::Pie(_) => "PieChart",
            ChartBody::Radar(_) => "RadarChart",
            ChartBody::Unsupported(_) => "Unsupported",
        }
    }

    pub fn cartesian(&self) -> Option<&CartesianPlot<'a>> {
        match self {
            ChartBody::Line(p)
            | ChartBody::Bar(p)
            | ChartBody::Area(p)
            | ChartBody::Scatter(p)
            | ChartBody::Composed(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisElement<'a> {
    pub id: Option<&'a Tag>,
    pub data_key: Option<&'a str>,
    pub scale: AxisScale,
    /// `None` for `"auto"` or when no domain was configured.
    pub domain: Option<(&'a DomainBound, &'a DomainBound)>,
    pub tick_count: Option<u32>,
    pub label: Option<&'a str>,
    pub orientation: Orientation,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridElement<'a> {
    pub dash: &'a str,
    pub stroke: Option<&'a str>,
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipElement<'a> {
    pub separator: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendElement {
    pub align: VerticalAlign,
    pub height: Option<f64>,
    pub icon: Option<IconType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMark<'a> {
    pub data_key: &'a str,
    pub label: String,
    pub stroke: &'a str,
    pub stroke_width: f64,
    pub dash: Option<&'a str>,
    pub opacity: Option<f64>,
    pub interpolation: Interpolation,
    pub y_axis: Option<&'a Tag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark<'a> {
    pub data_key: &'a str,
    pub label: String,
    pub fill: &'a str,
    pub opacity: Option<f64>,
    pub stack: Option<&'a Tag>,
    pub y_axis: Option<&'a Tag>,
    pub bar_size: Option<f64>,
    pub max_bar_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaMark<'a> {
    pub data_key: &'a str,
    pub label: String,
    pub stroke: &'a str,
    pub fill: &'a str,
    pub fill_opacity: f64,
    pub interpolation: Interpolation,
    pub stack: Option<&'a Tag>,
    pub y_axis: Option<&'a Tag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterMark<'a> {
    /// Field read for x (the first x axis' key).
    pub x_key: Option<&'a str>,
    /// Field read for y (the series' key).
    pub data_key: &'a str,
    pub label: String,
    pub fill: &'a str,
    pub opacity: Option<f64>,
    pub y_axis: Option<&'a Tag>,
}

/// One visual primitive of a cartesian chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark<'a> {
    Line(LineMark<'a>),
    Bar(BarMark<'a>),
    Area(AreaMark<'a>),
    Scatter(ScatterMark<'a>),
}

impl<'a> Mark<'a> {
    pub fn data_key(&self) -> &'a str {
        match self {
            Mark::Line(m) => m.data_key,
            Mark::Bar(m) => m.data_key,
            Mark::Area(m) => m.data_key,
            Mark::Scatter(m) => m.data_key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Mark::Line(m) => &m.label,
            Mark::Bar(m) => &m.label,
            Mark::Area(m) => &m.label,
            Mark::Scatter(m) => &m.label,
        }
    }

    /// Color shown in the legend.
    pub fn color(&self) -> &'a str {
        match self {
            Mark::Line(m) => m.stroke,
            Mark::Bar(m) => m.fill,
            Mark::Area(m) => m.fill,
            Mark::Scatter(m) => m.fill,
        }
    }

    pub fn y_axis(&self) -> Option<&'a Tag> {
        match self {
            Mark::Line(m) => m.y_axis,
            Mark::Bar(m) => m.y_axis,
            Mark::Area(m) => m.y_axis,
            Mark::Scatter(m) => m.y_axis,
        }
    }

    pub fn stack(&self) -> Option<&'a Tag> {
        match self {
            Mark::Bar(m) => m.stack,
            Mark::Area(m) => m.stack,
            _ => None,
        }
    }
}

/// Lower/upper extent of one bar segment or area slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
}

/// Per-row bands of one bar or area mark. `None` marks a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkBands {
    pub mark: usize,
    pub bands: Vec<Option<Band>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartesianPlot<'a> {
    pub data: &'a [Row],
    pub x_axes: Vec<AxisElement<'a>>,
    pub y_axes: Vec<AxisElement<'a>>,
    pub grid: Option<GridElement<'a>>,
    pub tooltip: Option<TooltipElement<'a>>,
    pub legend: Option<LegendElement>,
    pub marks: Vec<Mark<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge<'a> {
    pub name: String,
    pub value: f64,
    /// Share of the total in `0.0..=1.0`.
    pub fraction: f64,
    pub color: &'a str,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePlot<'a> {
    pub data_key: Option<&'a str>,
    pub name_key: &'a str,
    pub cx: Dimension,
    pub cy: Dimension,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub wedges: Vec<Wedge<'a>>,
    pub tooltip: Option<TooltipElement<'a>>,
    pub legend: Option<LegendElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarMark<'a> {
    pub data_key: &'a str,
    pub label: String,
    pub stroke: &'a str,
    pub fill: &'a str,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarPlot<'a> {
    pub data: &'a [Row],
    /// Field naming each spoke.
    pub angle_key: &'static str,
    pub marks: Vec<RadarMark<'a>>,
    pub tooltip: Option<TooltipElement<'a>>,
    pub legend: Option<LegendElement>,
}
