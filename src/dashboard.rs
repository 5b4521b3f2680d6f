//! Dashboard payload and load session.
//!
//! A payload is what the data source returns: a title, insight text with key
//! metrics, one table and the chart list. Chart entries arrive either as bare
//! [`ChartConfig`] objects or wrapped as `{ id, type, title, data, config }`.
//!
//! [`DashboardSession`] tracks overlapping refreshes so that the most recently
//! *issued* request wins, not the one that happens to finish last.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{ChartConfig, ChartKind, Row, Scalar};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
}

/// Direction of a metric's change, read off its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `+…` is up; anything else (including an empty string) is down.
    pub fn of(change: &str) -> Self {
        if change.trim_start().starts_with('+') {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMetric {
    pub label: String,
    pub value: String,
    pub change: String,
}

impl KeyMetric {
    pub fn new(label: &str, value: &str, change: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            change: change.to_string(),
        }
    }

    pub fn trend(&self) -> Trend {
        Trend::of(&self.change)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Insights {
    pub summary: String,
    pub key_metrics: Vec<KeyMetric>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableData {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl TableData {
    /// Trend of a row's last cell, which holds the growth figure.
    pub fn row_trend(row: &[Scalar]) -> Option<Trend> {
        row.last().map(|cell| Trend::of(&cell.label()))
    }
}

/// Wrapped chart entry: `{ id, type, title, data, config }`.
#[derive(Deserialize)]
struct WrappedChart {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<ChartKind>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    data: Vec<Row>,
    config: ChartConfig,
}

impl From<WrappedChart> for ChartConfig {
    // the inner config wins; the outer fields only fill what it left empty
    fn from(w: WrappedChart) -> Self {
        let mut config = w.config;
        if config.id.is_empty() {
            config.id = w.id;
        }
        if config.title.is_empty() {
            config.title = w.title;
        }
        if config.kind == ChartKind::default()
            && let Some(kind) = w.kind
        {
            config.kind = kind;
        }
        if config.data.is_empty() {
            config.data = w.data;
        }
        config
    }
}

/// Decode one chart list entry. An entry that does not decode becomes a
/// placeholder chart naming the error, so the rest of the dashboard still loads.
fn decode_chart(idx: usize, entry: serde_json::Value) -> ChartConfig {
    let decoded = if entry.get("config").is_some_and(|c| c.is_object()) {
        serde_json::from_value::<WrappedChart>(entry.clone()).map(ChartConfig::from)
    } else {
        serde_json::from_value::<ChartConfig>(entry.clone())
    };
    decoded.unwrap_or_else(|err| {
        let text = |key: &str| {
            entry
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        warn!("chart #{} could not be decoded: {}", idx + 1, err);
        ChartConfig {
            id: text("id"),
            title: text("title"),
            kind: ChartKind::Unknown(format!("invalid ({err})")),
            ..Default::default()
        }
    })
}

fn deserialize_charts<'de, D>(deserializer: D) -> Result<Vec<ChartConfig>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| decode_chart(idx, entry))
        .collect())
}

/// Everything one dashboard view shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(default)]
    pub dashboard_config: DashboardConfig,
    #[serde(default)]
    pub insights: Insights,
    #[serde(default)]
    pub table_data: TableData,
    #[serde(default, deserialize_with = "deserialize_charts")]
    pub charts: Vec<ChartConfig>,
}

impl DashboardPayload {
    pub fn title(&self) -> &str {
        &self.dashboard_config.title
    }

    /// Problems worth a warning. None of them stops rendering: each chart
    /// still gets a slot, possibly showing the placeholder.
    pub fn lint(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for (idx, chart) in self.charts.iter().enumerate() {
            let name = if chart.id.is_empty() {
                format!("chart #{}", idx + 1)
            } else {
                format!("chart {:?}", chart.id)
            };
            if chart.id.is_empty() {
                out.push(format!("{name} has no id"));
            } else if !seen.insert(chart.id.as_str()) {
                out.push(format!("{name}: duplicate id"));
            }
            if chart.data.is_empty() {
                out.push(format!("{name} has no data"));
            }
            if chart.series.is_empty() {
                out.push(format!("{name} has no series"));
            }
            if !is_drawable(&chart.kind) {
                out.push(format!("{name}: unsupported chart type {:?}", chart.kind.as_str()));
            }
        }
        out
    }
}

fn is_drawable(kind: &ChartKind) -> bool {
    !matches!(
        kind,
        ChartKind::Treemap | ChartKind::Funnel | ChartKind::Unknown(_)
    )
}

/// Where a loaded payload came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    /// Built-in data shown because the fetch failed.
    Fallback { reason: String },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub payload: DashboardPayload,
    pub origin: DataOrigin,
}

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(Arc<LoadOutcome>),
    Failed(String),
}

/// Load state plus a request counter.
#[derive(Debug, Default)]
pub struct DashboardSession {
    state: LoadState,
    generation: u64,
    /// Last successful load, kept visible while a refresh is in flight.
    last: Option<Arc<LoadOutcome>>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// The most recent successful load, if any. Shared with the state, so
    /// cloning the `Arc` is all a caller holding it across frames needs.
    pub fn current(&self) -> Option<&Arc<LoadOutcome>> {
        self.last.as_ref()
    }

    /// Start a request; the returned ticket must accompany its result.
    pub fn begin_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        debug!("refresh #{} started", self.generation);
        self.generation
    }

    /// Apply the result of request `ticket`. Returns `false` (and changes
    /// nothing) when a newer request has been issued since.
    pub fn complete(&mut self, ticket: u64, result: anyhow::Result<LoadOutcome>) -> bool {
        if ticket != self.generation {
            debug!(
                "dropping stale result of refresh #{} (latest is #{})",
                ticket, self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(outcome) => {
                for w in outcome.payload.lint() {
                    warn!("{}", w);
                }
                let outcome = Arc::new(outcome);
                self.last = Some(Arc::clone(&outcome));
                LoadState::Loaded(outcome)
            }
            Err(e) => LoadState::Failed(format!("{:#}", e)),
        };
        true
    }
}
