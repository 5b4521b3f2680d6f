use chartdash::dashboard::{DashboardPayload, Trend};
use chartdash::models::{ChartKind, Dimension};
use chartdash::render::{ChartBody, render};
use chartdash::storage;

/// A payload in the wrapped chart shape, with a mix of valid and broken charts.
const WRAPPED: &str = r##"
{
  "dashboardConfig": { "title": "Advanced Sales Analytics Dashboard" },
  "insights": {
    "summary": "Q2 was strong.",
    "keyMetrics": [
      { "label": "Total Revenue", "value": "$278,000", "change": "+12.5%" },
      { "label": "Returns", "value": "41", "change": "-3.0%" }
    ],
    "recommendations": ["Focus on Electronics"]
  },
  "tableData": {
    "title": "Top Products",
    "headers": ["Product", "Units", "Growth"],
    "rows": [["iPhone 15", 200, "+15%"], ["Case", 12, "-2%"]]
  },
  "charts": [
    {
      "id": "enhanced-market-share", "type": "pie", "title": "Market Share",
      "data": [],
      "config": {
        "type": "pie", "id": "enhanced-market-share", "title": "Market Share",
        "layout": { "height": 400, "width": "50%" },
        "data": [
          { "name": "Desktop", "value": 400, "fill": "#0088FE" },
          { "name": "Mobile", "value": 100 }
        ],
        "series": [{ "dataKey": "value", "innerRadius": 40, "outerRadius": 120,
                     "custom": { "nameKey": "name", "label": true, "labelLine": false } }],
        "styling": { "legend": { "show": true, "verticalAlign": "bottom", "height": 36 } }
      }
    },
    { "type": "heatmap", "id": "h", "title": "Heat", "data": [{ "v": 1 }],
      "series": [{ "dataKey": "v" }] },
    { "type": "line", "id": "empty", "title": "Empty", "data": [], "series": [] }
  ]
}"##;

#[test]
fn wrapped_payload_renders_and_lints() {
    let payload: DashboardPayload = serde_json::from_str(WRAPPED).unwrap();
    assert_eq!(payload.charts.len(), 3);

    let pie = &payload.charts[0];
    assert_eq!(pie.kind, ChartKind::Pie);
    assert_eq!(pie.layout.width, Some(Dimension::Percent(50.0)));
    match render(pie).container.body {
        ChartBody::Pie(p) => {
            assert_eq!(p.wedges.len(), 2);
            assert_eq!(p.wedges[0].label, "Desktop: 80%");
            assert_eq!(p.wedges[0].color, "#0088FE");
            assert_eq!(p.inner_radius, 40.0);
        }
        other => panic!("expected pie, got {}", other.primitive_name()),
    }

    match render(&payload.charts[1]).container.body {
        ChartBody::Unsupported(text) => assert_eq!(text, "Unsupported chart type: heatmap"),
        other => panic!("expected placeholder, got {}", other.primitive_name()),
    }

    // an empty chart still renders, just with nothing in it
    assert!(render(&payload.charts[2]).container.body.cartesian().is_some());

    let warnings = payload.lint();
    assert!(warnings.iter().any(|w| w.contains("heatmap")));
    assert!(warnings.iter().any(|w| w.contains("\"empty\" has no data")));
}

#[test]
fn metric_and_table_trends() {
    let payload: DashboardPayload = serde_json::from_str(WRAPPED).unwrap();
    let trends: Vec<Trend> = payload.insights.key_metrics.iter().map(|m| m.trend()).collect();
    assert_eq!(trends, [Trend::Up, Trend::Down]);

    let rows = &payload.table_data.rows;
    assert_eq!(rows[0][1].label(), "200");
    assert_eq!(
        chartdash::dashboard::TableData::row_trend(&rows[1]),
        Some(Trend::Down)
    );
}

#[test]
fn missing_sections_default_to_empty() {
    let payload: DashboardPayload =
        serde_json::from_str(r#"{"dashboardConfig":{"title":"Bare"},"charts":[]}"#).unwrap();
    assert_eq!(payload.title(), "Bare");
    assert!(payload.insights.summary.is_empty());
    assert!(payload.table_data.headers.is_empty());
    assert!(payload.lint().is_empty());
}

#[test]
fn payload_survives_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p.json");
    let payload: DashboardPayload = serde_json::from_str(WRAPPED).unwrap();
    storage::save_payload_json(&payload, &path).unwrap();
    let back = storage::load_payload_json(&path).unwrap();
    assert_eq!(back, payload);
}

/// One good chart next to charts carrying values outside the known sets.
const OFF_LIST: &str = r##"
{
  "dashboardConfig": { "title": "Mixed" },
  "charts": [
    { "type": "line", "id": "good", "data": [{ "name": "Jan", "v": 1 }],
      "series": [{ "dataKey": "v" }] },
    { "type": "composed", "id": "odd-shape", "data": [{ "name": "Jan", "v": 1 }],
      "series": [{ "dataKey": "v", "custom": { "chartType": "scatter" } }] },
    { "type": "line", "id": "odd-curve", "data": [{ "name": "Jan", "v": 1 }],
      "series": [{ "dataKey": "v", "type": "natural" }] },
    { "type": "pie", "id": "odd-label", "data": [{ "name": "A", "v": 1 }],
      "series": [{ "dataKey": "v", "custom": { "label": { "fill": "red" } } }],
      "styling": { "legend": { "iconType": "hexagon", "verticalAlign": "center" } } },
    { "type": "bar", "id": "broken", "title": "Broken", "data": 7, "series": [] }
  ]
}"##;

#[test]
fn off_list_values_degrade_per_chart() {
    use chartdash::models::Interpolation;
    use chartdash::render::Mark;

    let payload: DashboardPayload = serde_json::from_str(OFF_LIST).unwrap();
    assert_eq!(payload.charts.len(), 5);
    assert_eq!(payload.charts[0].kind, ChartKind::Line);

    // unknown composed shape draws as a line, unknown curve as monotone
    let view = render(&payload.charts[1]);
    let plot = view.container.body.cartesian().unwrap();
    match &plot.marks[0] {
        Mark::Line(line) => assert_eq!(line.interpolation, Interpolation::Monotone),
        other => panic!("expected line, got {:?}", other),
    }
    let view = render(&payload.charts[2]);
    match &view.container.body.cartesian().unwrap().marks[0] {
        Mark::Line(line) => assert_eq!(line.interpolation, Interpolation::Monotone),
        other => panic!("expected line, got {:?}", other),
    }

    assert!(matches!(render(&payload.charts[3]).container.body, ChartBody::Pie(_)));

    // the undecodable entry keeps its slot as a placeholder
    let broken = &payload.charts[4];
    assert_eq!(broken.id, "broken");
    assert_eq!(broken.title, "Broken");
    match render(broken).container.body {
        ChartBody::Unsupported(text) => assert!(text.contains("invalid")),
        other => panic!("expected placeholder, got {}", other.primitive_name()),
    }
    assert!(payload.lint().iter().any(|w| w.contains("\"broken\"")));
}
