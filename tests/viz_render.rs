use chartdash::builder::{ChartConfigBuilder, SeriesSpec, bar_chart, row};
use chartdash::fixture::fallback_payload;
use chartdash::models::{ChartKind, Dimension, Row, Scalar, SeriesConfig};
use chartdash::render::render;
use chartdash::viz;
use std::fs;

fn quarters() -> Vec<Row> {
    [("Q1", 50000), ("Q2", 65000), ("Q3", 78000), ("Q4", 85000)]
        .iter()
        .map(|(q, v)| row([("quarter", Scalar::from(*q)), ("revenue", Scalar::from(*v))]))
        .collect()
}

#[test]
fn every_fixture_chart_renders_to_svg() {
    let payload = fallback_payload().unwrap();
    for chart in &payload.charts {
        let view = render(chart);
        let svg = viz::render_svg(&view, 900).unwrap();
        assert!(svg.starts_with("<svg"), "chart {} did not produce svg", chart.id);
        let first_word = chart.title.split_whitespace().next().unwrap();
        assert!(svg.contains(first_word), "title missing for {}", chart.id);
    }
}

#[test]
fn legend_and_tick_labels_reach_the_svg() {
    let payload = fallback_payload().unwrap();
    let pie = payload.charts.iter().find(|c| c.kind == ChartKind::Pie).unwrap();
    let svg = viz::render_svg(&render(pie), 900).unwrap();
    for name in ["Desktop", "Mobile", "Tablet", "Smart TV"] {
        assert!(svg.contains(name), "missing wedge {name}");
    }

    let bars = bar_chart("rev", "Revenue Growth", quarters(), "revenue", "quarter")
        .build()
        .unwrap();
    let svg = viz::render_svg(&render(&bars), 800).unwrap();
    assert!(svg.contains("Q3"));
    // thousands separators on the value axis
    assert!(svg.contains("80,000") || svg.contains("60,000") || svg.contains("40,000"));
}

#[test]
fn unsupported_kind_draws_placeholder() {
    let cfg = ChartConfigBuilder::new(ChartKind::Funnel, "f", "Funnel")
        .with_data(quarters())
        .with_series(SeriesConfig::new("revenue"))
        .build()
        .unwrap();
    let svg = viz::render_svg(&render(&cfg), 600).unwrap();
    assert!(svg.contains("Unsupported chart type: funnel"));
}

#[test]
fn png_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stacked.png");
    let cfg = chartdash::builder::stacked_bar_chart(
        "s",
        "Stacked",
        vec![
            row([("c", Scalar::from("A")), ("x", Scalar::from(3)), ("y", Scalar::from(4))]),
            row([("c", Scalar::from("B")), ("x", Scalar::from(1)), ("y", Scalar::from(2))]),
        ],
        &[
            SeriesSpec::new("x", "X", "#8884d8"),
            SeriesSpec::new("y", "Y", "#82ca9d"),
        ],
        "c",
    )
    .build()
    .unwrap();
    viz::render_to_file(&render(&cfg), &path, 640).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.len() > 8);
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn rgb_buffer_matches_resolved_size() {
    let mut cfg = bar_chart("rev", "Revenue", quarters(), "revenue", "quarter")
        .build()
        .unwrap();
    cfg.layout.width = Some(Dimension::Percent(50.0));
    cfg.layout.height = 240;
    let view = render(&cfg);
    assert_eq!(viz::chart_size(&view, 1000), (500, 240));

    let (buf, (w, h)) = viz::render_rgb(&view, 1000).unwrap();
    assert_eq!((w, h), (500, 240));
    assert_eq!(buf.len(), 500 * 240 * 3);
    // white background survives somewhere in the corner
    assert_eq!(&buf[0..3], &[255, 255, 255]);
}

#[test]
fn narrow_widths_are_clamped() {
    let cfg = bar_chart("rev", "Revenue", quarters(), "revenue", "quarter")
        .build()
        .unwrap();
    let view = render(&cfg);
    assert_eq!(viz::chart_size(&view, 40).0, viz::MIN_WIDTH_PX);
    assert!(viz::render_svg(&view, 40).is_ok());
}

#[test]
fn oversized_layouts_are_clamped() {
    let mut cfg = bar_chart("rev", "Revenue", quarters(), "revenue", "quarter")
        .build()
        .unwrap();
    cfg.layout.height = 4_000_000_000;
    cfg.layout.width = Some(Dimension::Pixels(1e9));
    let view = render(&cfg);
    assert_eq!(viz::chart_size(&view, 1000), (viz::MAX_SIDE_PX, viz::MAX_SIDE_PX));

    cfg.layout.width = Some(Dimension::Percent(f64::NAN));
    cfg.layout.height = 0;
    let view = render(&cfg);
    assert_eq!(viz::chart_size(&view, 1000), (viz::MIN_WIDTH_PX, 1));
}
