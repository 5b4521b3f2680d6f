//! Chart configuration model.
//!
//! These types mirror the JSON payload a dashboard receives. Field names are
//! camelCase on the wire. Everything optional stays optional here: defaults are
//! applied by the renderer, not at parse or build time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One data row: field name to scalar. There is no declared schema.
pub type Row = BTreeMap<String, Scalar>;

/// Free-form extension bag (`options`).
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Decode an optional field, treating a value of the wrong shape (an unknown
/// enum tag, an object where a flag was expected) as absent so renderer
/// defaults apply.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Chart type tag.
///
/// `Treemap` and `Funnel` are reserved: they parse, but the renderer turns
/// them into the unsupported placeholder. Any other tag is kept verbatim in
/// `Unknown` so the placeholder can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartKind {
    Line,
    Bar,
    Area,
    Pie,
    Scatter,
    Radar,
    Composed,
    Treemap,
    Funnel,
    Unknown(String),
}

impl ChartKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Area => "area",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::Composed => "composed",
            ChartKind::Treemap => "treemap",
            ChartKind::Funnel => "funnel",
            ChartKind::Unknown(s) => s.as_str(),
        }
    }
}

impl Default for ChartKind {
    fn default() -> Self {
        ChartKind::Unknown(String::new())
    }
}

impl From<String> for ChartKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "line" => ChartKind::Line,
            "bar" => ChartKind::Bar,
            "area" => ChartKind::Area,
            "pie" => ChartKind::Pie,
            "scatter" => ChartKind::Scatter,
            "radar" => ChartKind::Radar,
            "composed" => ChartKind::Composed,
            "treemap" => ChartKind::Treemap,
            "funnel" => ChartKind::Funnel,
            _ => ChartKind::Unknown(s),
        }
    }
}

impl From<&str> for ChartKind {
    fn from(s: &str) -> Self {
        ChartKind::from(s.to_string())
    }
}

impl From<ChartKind> for String {
    fn from(k: ChartKind) -> Self {
        k.as_str().to_string()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell value inside a data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric view of the value; text and booleans are not coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Human-readable form used for category ticks, wedge names and tooltips.
    pub fn label(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(v) => format_number(*v),
            Scalar::Text(s) => s.clone(),
        }
    }
}

/// Whole numbers print without a fractional part (`4000`, not `4000.0`).
pub fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Scalar::Number(v as f64)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// A width or position: either a percentage of the container or pixels.
///
/// Accepts `"50%"`, `"300px"`, `"300"` and bare JSON numbers (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Percent(f64),
    Pixels(f64),
}

impl Dimension {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(p) = s.strip_suffix('%') {
            return p.trim().parse::<f64>().ok().map(Dimension::Percent);
        }
        let px = s.strip_suffix("px").unwrap_or(s);
        px.trim().parse::<f64>().ok().map(Dimension::Pixels)
    }

    /// Resolve against a container extent in pixels.
    pub fn resolve(&self, container_px: f64) -> f64 {
        match *self {
            Dimension::Percent(p) => container_px * p / 100.0,
            Dimension::Pixels(px) => px,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Dimension::Percent(p) => write!(f, "{}%", format_number(p)),
            Dimension::Pixels(px) => write!(f, "{}px", format_number(px)),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Dimension::Percent(_) => serializer.serialize_str(&self.to_string()),
            Dimension::Pixels(px) => serializer.serialize_f64(px),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};
        struct DimensionVisitor;

        impl<'de> Visitor<'de> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a pixel number or a string like \"50%\" or \"300px\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Dimension::Pixels(v as f64))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Dimension::Pixels(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Dimension::Pixels(v))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                Dimension::parse(s).ok_or_else(|| E::custom(format!("invalid dimension: {s:?}")))
            }
        }

        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// Identifier that the payload may spell as a string or a number
/// (`yAxisId: "left"`, `yAxisId: 1`, `stackId: "1"`). Normalized to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tag(pub String);

impl Tag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag(s.to_string())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};
        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = Tag;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a string or number identifier")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Tag(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Tag(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Tag(format_number(v)))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                Ok(Tag(s.to_string()))
            }
        }

        deserializer.deserialize_any(TagVisitor)
    }
}

/// Outer chart margins in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    pub height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: None,
            height: 300,
            margin: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Number,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Top,
    Bottom,
    Left,
    Right,
}

/// One end of an explicit axis domain: a literal or an expression such as
/// `"dataMax + 500"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainBound {
    Value(f64),
    Expr(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDomain", into = "RawDomain")]
pub enum AxisDomain {
    Auto,
    Range(DomainBound, DomainBound),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawDomain {
    Keyword(String),
    Pair((DomainBound, DomainBound)),
}

impl TryFrom<RawDomain> for AxisDomain {
    type Error = String;

    fn try_from(raw: RawDomain) -> Result<Self, Self::Error> {
        match raw {
            RawDomain::Keyword(k) if k == "auto" => Ok(AxisDomain::Auto),
            RawDomain::Keyword(k) => Err(format!("unsupported axis domain keyword: {k:?}")),
            RawDomain::Pair((lo, hi)) => Ok(AxisDomain::Range(lo, hi)),
        }
    }
}

impl From<AxisDomain> for RawDomain {
    fn from(d: AxisDomain) -> Self {
        match d {
            AxisDomain::Auto => RawDomain::Keyword("auto".into()),
            AxisDomain::Range(lo, hi) => RawDomain::Pair((lo, hi)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisScale>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub domain: Option<AxisDomain>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<u32>,
    /// Kept for round-tripping; formatter strings are not interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_id: Option<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<Tag>,
}

impl AxisConfig {
    pub fn category(data_key: &str) -> Self {
        Self {
            data_key: Some(data_key.to_string()),
            scale: Some(AxisScale::Category),
            ..Default::default()
        }
    }

    pub fn number() -> Self {
        Self {
            scale: Some(AxisScale::Number),
            ..Default::default()
        }
    }

    pub fn number_keyed(data_key: &str) -> Self {
        Self {
            data_key: Some(data_key.to_string()),
            scale: Some(AxisScale::Number),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    #[serde(rename = "xAxis", default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Vec<AxisConfig>>,
    #[serde(rename = "yAxis", default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Vec<AxisConfig>>,
}

/// Line/area interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolation {
    Monotone,
    Linear,
    Step,
    StepBefore,
    StepAfter,
}

/// Per-series geometry picked inside a composed chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesShape {
    Bar,
    Area,
    Line,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieGeometry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cx: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cy: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarGeometry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_bar_size: Option<f64>,
}

/// The series `custom` record. Only the keys the renderer understands are
/// kept; anything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesCustom {
    /// Composed charts: which primitive this series becomes (default line).
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<SeriesShape>,
    /// Composed charts: interpolation override.
    #[serde(rename = "type", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub interpolation: Option<Interpolation>,
    /// Pie charts: field holding the wedge name (default `name`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_key: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label_line: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub data_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub interpolation: Option<Interpolation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<Tag>,
    #[serde(flatten)]
    pub pie: PieGeometry,
    #[serde(flatten)]
    pub bar: BarGeometry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<SeriesCustom>,
}

impl SeriesConfig {
    pub fn new(data_key: &str) -> Self {
        Self {
            data_key: data_key.to_string(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn stroke(mut self, color: &str) -> Self {
        self.stroke = Some(color.to_string());
        self
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn stroke_width(mut self, w: f64) -> Self {
        self.stroke_width = Some(w);
        self
    }

    pub fn dashed(mut self, pattern: &str) -> Self {
        self.stroke_dasharray = Some(pattern.to_string());
        self
    }

    pub fn opacity(mut self, o: f64) -> Self {
        self.opacity = Some(o);
        self
    }

    pub fn interpolation(mut self, i: Interpolation) -> Self {
        self.interpolation = Some(i);
        self
    }

    pub fn stack(mut self, id: &str) -> Self {
        self.stack_id = Some(Tag::from(id));
        self
    }

    pub fn on_y_axis(mut self, id: &str) -> Self {
        self.y_axis_id = Some(Tag::from(id));
        self
    }

    /// Composed charts: render this series as `shape`.
    pub fn shape(mut self, shape: SeriesShape) -> Self {
        self.custom.get_or_insert_with(Default::default).chart_type = Some(shape);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TooltipConfig {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_formatter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    Line,
    Rect,
    Circle,
    Cross,
    Diamond,
    Square,
    Star,
    Triangle,
    Wye,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegendConfig {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<IconType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Styling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendConfig>,
}

/// One chart's full description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(rename = "type", default)]
    pub kind: ChartKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub data: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axes: Option<Axes>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<Styling>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl ChartConfig {
    pub fn grid(&self) -> Option<&GridConfig> {
        self.styling.as_ref().and_then(|s| s.grid.as_ref())
    }

    pub fn tooltip(&self) -> Option<&TooltipConfig> {
        self.styling.as_ref().and_then(|s| s.tooltip.as_ref())
    }

    pub fn legend(&self) -> Option<&LegendConfig> {
        self.styling.as_ref().and_then(|s| s.legend.as_ref())
    }

    pub fn x_axes(&self) -> Option<&[AxisConfig]> {
        self.axes.as_ref().and_then(|a| a.x_axis.as_deref())
    }

    pub fn y_axes(&self) -> Option<&[AxisConfig]> {
        self.axes.as_ref().and_then(|a| a.y_axis.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_composed_chart_config() {
        let sample = r##"
        {
          "type": "composed",
          "title": "Sales Volume vs Conversion Rate",
          "id": "composed-sales-conversion",
          "layout": { "height": 350, "width": "50%" },
          "data": [
            { "month": "Jan", "sales": 590, "conversion": 4.5 },
            { "month": "Feb", "sales": 868, "conversion": 5.2 }
          ],
          "axes": {
            "xAxis": [{ "dataKey": "month", "type": "category" }],
            "yAxis": [
              { "yAxisId": "left", "type": "number" },
              { "yAxisId": 2, "type": "number", "orientation": "right", "domain": [0, "dataMax + 500"] }
            ]
          },
          "series": [
            { "dataKey": "sales", "fill": "#8884d8", "yAxisId": "left", "custom": { "chartType": "bar" } },
            { "dataKey": "conversion", "strokeWidth": 3, "yAxisId": 2,
              "custom": { "chartType": "line", "type": "monotone", "somethingElse": 1 } }
          ],
          "styling": { "legend": { "show": true, "verticalAlign": "top" } }
        }"##;

        let cfg: ChartConfig = serde_json::from_str(sample).unwrap();
        assert_eq!(cfg.kind, ChartKind::Composed);
        assert_eq!(cfg.layout.height, 350);
        assert_eq!(cfg.layout.width, Some(Dimension::Percent(50.0)));
        assert_eq!(cfg.data[0].get("sales"), Some(&Scalar::Number(590.0)));
        assert_eq!(cfg.data[1].get("month"), Some(&Scalar::Text("Feb".into())));

        let y = cfg.y_axes().unwrap();
        assert_eq!(y[1].y_axis_id, Some(Tag::from("2")));
        assert_eq!(
            y[1].domain,
            Some(AxisDomain::Range(
                DomainBound::Value(0.0),
                DomainBound::Expr("dataMax + 500".into())
            ))
        );

        let custom = cfg.series[1].custom.as_ref().unwrap();
        assert_eq!(custom.chart_type, Some(SeriesShape::Line));
        assert_eq!(custom.interpolation, Some(Interpolation::Monotone));
        assert_eq!(cfg.series[1].stroke_width, Some(3.0));
    }

    #[test]
    fn unknown_and_missing_types_are_kept() {
        let cfg: ChartConfig =
            serde_json::from_str(r#"{"type":"sankey","id":"a","series":[],"data":[]}"#).unwrap();
        assert_eq!(cfg.kind, ChartKind::Unknown("sankey".into()));

        let cfg: ChartConfig = serde_json::from_str(r#"{"id":"b"}"#).unwrap();
        assert_eq!(cfg.kind, ChartKind::Unknown(String::new()));
        assert_eq!(cfg.layout.height, 300);
        assert!(cfg.series.is_empty());

        let cfg: ChartConfig = serde_json::from_str(r#"{"type":"funnel"}"#).unwrap();
        assert_eq!(cfg.kind, ChartKind::Funnel);
    }

    #[test]
    fn pie_geometry_is_flattened() {
        let s: SeriesConfig = serde_json::from_str(
            r#"{"dataKey":"value","cx":"50%","cy":200,"innerRadius":40,"outerRadius":120,
                "custom":{"nameKey":"label"}}"#,
        )
        .unwrap();
        assert_eq!(s.pie.cx, Some(Dimension::Percent(50.0)));
        assert_eq!(s.pie.cy, Some(Dimension::Pixels(200.0)));
        assert_eq!(s.pie.inner_radius, Some(40.0));
        assert_eq!(s.pie.outer_radius, Some(120.0));
        assert_eq!(s.custom.unwrap().name_key.as_deref(), Some("label"));
    }

    #[test]
    fn dimension_parsing() {
        assert_eq!(Dimension::parse("50%"), Some(Dimension::Percent(50.0)));
        assert_eq!(Dimension::parse("320px"), Some(Dimension::Pixels(320.0)));
        assert_eq!(Dimension::parse(" 200 "), Some(Dimension::Pixels(200.0)));
        assert_eq!(Dimension::parse("wide"), None);
        assert_eq!(Dimension::Percent(50.0).resolve(1000.0), 500.0);
    }

    #[test]
    fn auto_domain_and_bad_keyword() {
        let a: AxisConfig = serde_json::from_str(r#"{"domain":"auto"}"#).unwrap();
        assert_eq!(a.domain, Some(AxisDomain::Auto));
        let a: AxisConfig =
            serde_json::from_str(r#"{"domain":"tight","type":"log","dataKey":"x"}"#).unwrap();
        assert_eq!(a.domain, None);
        assert_eq!(a.scale, None);
        assert_eq!(a.data_key.as_deref(), Some("x"));
    }

    #[test]
    fn off_list_series_values_fall_back_to_defaults() {
        let s: SeriesConfig = serde_json::from_str(
            r#"{"dataKey":"v","type":"natural",
                "custom":{"chartType":"scatter","type":"basis","label":{"fill":"red"},"nameKey":"n"}}"#,
        )
        .unwrap();
        assert_eq!(s.interpolation, None);
        let custom = s.custom.unwrap();
        assert_eq!(custom.chart_type, None);
        assert_eq!(custom.interpolation, None);
        assert_eq!(custom.label, None);
        assert_eq!(custom.name_key.as_deref(), Some("n"));

        let legend: LegendConfig =
            serde_json::from_str(r#"{"show":"yes","verticalAlign":"center","iconType":"hexagon"}"#)
                .unwrap();
        assert_eq!(legend, LegendConfig::default());
    }

    #[test]
    fn scalar_labels() {
        assert_eq!(Scalar::from(4000).label(), "4000");
        assert_eq!(Scalar::from(4.5).label(), "4.5");
        assert_eq!(Scalar::from("Q1").label(), "Q1");
        assert_eq!(Scalar::from("Q1").as_f64(), None);
    }

    #[test]
    fn config_serializes_back_to_camel_case() {
        let cfg = ChartConfig {
            kind: ChartKind::Bar,
            id: "x".into(),
            series: vec![SeriesConfig::new("sales").stack("s1")],
            ..Default::default()
        };
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["type"], "bar");
        assert_eq!(v["series"][0]["dataKey"], "sales");
        assert_eq!(v["series"][0]["stackId"], "s1");
        assert!(v["series"][0].get("cx").is_none());
    }
}
