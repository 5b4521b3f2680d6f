//! Fluent construction of [`ChartConfig`] values.
//!
//! ```
//! use chartdash::builder::{ChartConfigBuilder, row};
//! use chartdash::models::{AxisConfig, ChartKind, Scalar, SeriesConfig};
//!
//! let config = ChartConfigBuilder::new(ChartKind::Bar, "sales", "Sales")
//!     .with_data(vec![row([("name", Scalar::from("Jan")), ("sales", Scalar::from(10))])])
//!     .with_x_axis(AxisConfig::category("name"))
//!     .with_series(SeriesConfig::new("sales").fill("#82ca9d"))
//!     .build()
//!     .unwrap();
//! assert_eq!(config.series.len(), 1);
//! ```
//!
//! `build` enforces exactly two invariants: non-empty `data` and non-empty
//! `series`. Every other field is left as given; defaults are the renderer's job.

use crate::models::{
    AxisConfig, Axes, ChartConfig, ChartKind, Dimension, GridConfig, Interpolation, Layout,
    LegendConfig, Margin, Options, Orientation, Row, Scalar, SeriesConfig, SeriesCustom, Styling,
    Tag, TooltipConfig, VerticalAlign,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Chart data is required")]
    MissingData,
    #[error("At least one series is required")]
    MissingSeries,
}

/// Partial layout merged over the current one by [`ChartConfigBuilder::with_layout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutPatch {
    pub width: Option<Dimension>,
    pub height: Option<u32>,
    pub margin: Option<Margin>,
}

/// Build a data row from `(field, value)` pairs.
pub fn row<'a>(pairs: impl IntoIterator<Item = (&'a str, Scalar)>) -> Row {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[derive(Debug, Clone)]
pub struct ChartConfigBuilder {
    config: ChartConfig,
}

impl ChartConfigBuilder {
    pub fn new(kind: impl Into<ChartKind>, id: &str, title: &str) -> Self {
        let config = ChartConfig {
            kind: kind.into(),
            id: id.to_string(),
            title: title.to_string(),
            layout: Layout::default(),
            data: Vec::new(),
            axes: None,
            series: Vec::new(),
            styling: Some(Styling {
                background: None,
                grid: Some(GridConfig {
                    show: Some(true),
                    stroke_dasharray: Some("3 3".into()),
                    ..Default::default()
                }),
                tooltip: Some(TooltipConfig {
                    show: Some(true),
                    ..Default::default()
                }),
                legend: Some(LegendConfig {
                    show: Some(true),
                    ..Default::default()
                }),
            }),
            options: None,
        };
        Self { config }
    }

    pub fn with_data(mut self, data: Vec<Row>) -> Self {
        self.config.data = data;
        self
    }

    pub fn with_layout(mut self, patch: LayoutPatch) -> Self {
        let layout = &mut self.config.layout;
        if patch.width.is_some() {
            layout.width = patch.width;
        }
        if let Some(h) = patch.height {
            layout.height = h;
        }
        if patch.margin.is_some() {
            layout.margin = patch.margin;
        }
        self
    }

    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.axes()
            .x_axis
            .get_or_insert_with(Vec::new)
            .push(axis);
        self
    }

    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.axes()
            .y_axis
            .get_or_insert_with(Vec::new)
            .push(axis);
        self
    }

    pub fn with_series(mut self, series: SeriesConfig) -> Self {
        self.config.series.push(series);
        self
    }

    pub fn with_multiple_series(mut self, series: impl IntoIterator<Item = SeriesConfig>) -> Self {
        self.config.series.extend(series);
        self
    }

    pub fn with_grid(mut self, show: bool, stroke_dasharray: &str, stroke: Option<&str>) -> Self {
        self.styling().grid = Some(GridConfig {
            show: Some(show),
            stroke_dasharray: Some(stroke_dasharray.to_string()),
            stroke: stroke.map(str::to_string),
            opacity: None,
        });
        self
    }

    /// Replace the tooltip settings; `show` wins over `options.show`.
    pub fn with_tooltip(mut self, show: bool, options: TooltipConfig) -> Self {
        self.styling().tooltip = Some(TooltipConfig {
            show: Some(show),
            ..options
        });
        self
    }

    /// Replace the legend settings; `show` wins over `options.show`.
    pub fn with_legend(mut self, show: bool, options: LegendConfig) -> Self {
        self.styling().legend = Some(LegendConfig {
            show: Some(show),
            ..options
        });
        self
    }

    /// Merge keys into the free-form options bag (later keys overwrite).
    pub fn with_options(mut self, options: Options) -> Self {
        self.config
            .options
            .get_or_insert_with(Options::new)
            .extend(options);
        self
    }

    pub fn build(self) -> Result<ChartConfig, BuildError> {
        if self.config.data.is_empty() {
            return Err(BuildError::MissingData);
        }
        if self.config.series.is_empty() {
            return Err(BuildError::MissingSeries);
        }
        Ok(self.config)
    }

    fn axes(&mut self) -> &mut Axes {
        self.config.axes.get_or_insert_with(Axes::default)
    }

    fn styling(&mut self) -> &mut Styling {
        self.config.styling.get_or_insert_with(Styling::default)
    }
}

/// One series of a multi-series preset.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    pub data_key: String,
    pub name: String,
    pub color: String,
}

impl SeriesSpec {
    pub fn new(data_key: &str, name: &str, color: &str) -> Self {
        Self {
            data_key: data_key.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

fn category_value_axes(builder: ChartConfigBuilder, x_key: &str) -> ChartConfigBuilder {
    builder
        .with_x_axis(AxisConfig::category(x_key))
        .with_y_axis(AxisConfig::number())
}

/// Single-series line chart.
pub fn line_chart(
    id: &str,
    title: &str,
    data: Vec<Row>,
    data_key: &str,
    x_key: &str,
) -> ChartConfigBuilder {
    category_value_axes(
        ChartConfigBuilder::new(ChartKind::Line, id, title).with_data(data),
        x_key,
    )
    .with_series(
        SeriesConfig::new(data_key)
            .stroke("#8884d8")
            .stroke_width(2.0)
            .interpolation(Interpolation::Monotone),
    )
}

/// Line chart with one line per [`SeriesSpec`].
pub fn multi_line_chart(
    id: &str,
    title: &str,
    data: Vec<Row>,
    series: &[SeriesSpec],
    x_key: &str,
) -> ChartConfigBuilder {
    let builder = category_value_axes(
        ChartConfigBuilder::new(ChartKind::Line, id, title).with_data(data),
        x_key,
    );
    builder.with_multiple_series(series.iter().map(|s| {
        SeriesConfig::new(&s.data_key)
            .named(&s.name)
            .stroke(&s.color)
            .stroke_width(2.0)
            .interpolation(Interpolation::Monotone)
    }))
}

/// Single-series bar chart.
pub fn bar_chart(
    id: &str,
    title: &str,
    data: Vec<Row>,
    data_key: &str,
    x_key: &str,
) -> ChartConfigBuilder {
    category_value_axes(
        ChartConfigBuilder::new(ChartKind::Bar, id, title).with_data(data),
        x_key,
    )
    .with_series(SeriesConfig::new(data_key).fill("#82ca9d"))
}

/// Bar chart whose series all share the stack `stack1`, stacked in the given order.
pub fn stacked_bar_chart(
    id: &str,
    title: &str,
    data: Vec<Row>,
    series: &[SeriesSpec],
    x_key: &str,
) -> ChartConfigBuilder {
    let builder = category_value_axes(
        ChartConfigBuilder::new(ChartKind::Bar, id, title).with_data(data),
        x_key,
    );
    builder.with_multiple_series(series.iter().map(|s| {
        SeriesConfig::new(&s.data_key)
            .named(&s.name)
            .fill(&s.color)
            .stack("stack1")
    }))
}

/// Pie chart over `data_key`, naming wedges by `name_key`.
pub fn pie_chart(
    id: &str,
    title: &str,
    data: Vec<Row>,
    data_key: &str,
    name_key: &str,
) -> ChartConfigBuilder {
    let mut series = SeriesConfig::new(data_key);
    series.pie.cx = Some(Dimension::Percent(50.0));
    series.pie.cy = Some(Dimension::Percent(50.0));
    series.pie.outer_radius = Some(80.0);
    series.custom = Some(SeriesCustom {
        name_key: Some(name_key.to_string()),
        ..Default::default()
    });
    ChartConfigBuilder::new(ChartKind::Pie, id, title)
        .with_data(data)
        .with_series(series)
        .with_legend(
            true,
            LegendConfig {
                vertical_align: Some(VerticalAlign::Bottom),
                ..Default::default()
            },
        )
}

/// Composed chart skeleton with a category x axis and `left`/`right` value
/// axes. It has no series; add them with [`SeriesConfig::shape`].
pub fn composed_chart(id: &str, title: &str, data: Vec<Row>, x_key: &str) -> ChartConfigBuilder {
    ChartConfigBuilder::new(ChartKind::Composed, id, title)
        .with_data(data)
        .with_x_axis(AxisConfig::category(x_key))
        .with_y_axis(AxisConfig {
            y_axis_id: Some(Tag::from("left")),
            ..AxisConfig::number()
        })
        .with_y_axis(AxisConfig {
            y_axis_id: Some(Tag::from("right")),
            orientation: Some(Orientation::Right),
            ..AxisConfig::number()
        })
}

/// Scatter chart of `y_key` against `x_key`, both numeric.
pub fn scatter_chart(
    id: &str,
    title: &str,
    data: Vec<Row>,
    x_key: &str,
    y_key: &str,
) -> ChartConfigBuilder {
    ChartConfigBuilder::new(ChartKind::Scatter, id, title)
        .with_data(data)
        .with_x_axis(AxisConfig::number_keyed(x_key))
        .with_y_axis(AxisConfig::number_keyed(y_key))
        .with_series(SeriesConfig::new(y_key).fill("#ff7300"))
}
