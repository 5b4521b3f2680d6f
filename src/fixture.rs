//! Built-in dashboard shown when the data source cannot be reached.

use crate::builder::{
    BuildError, ChartConfigBuilder, LayoutPatch, SeriesSpec, composed_chart, multi_line_chart,
    pie_chart, row, scatter_chart, stacked_bar_chart,
};
use crate::dashboard::{DashboardConfig, DashboardPayload, Insights, KeyMetric, TableData};
use crate::models::{
    AxisConfig, AxisDomain, ChartKind, DomainBound, Interpolation, LegendConfig, Row, Scalar,
    SeriesConfig, SeriesShape, VerticalAlign,
};

pub const FALLBACK_TITLE: &str = "Sales Analytics Dashboard";

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

fn height(px: u32) -> LayoutPatch {
    LayoutPatch {
        height: Some(px),
        ..Default::default()
    }
}

fn legend_top() -> LegendConfig {
    LegendConfig {
        vertical_align: Some(VerticalAlign::Top),
        ..Default::default()
    }
}

/// Rows keyed `month` plus one numeric column per name in `cols`.
fn monthly(cols: [&str; 3], values: [[f64; 3]; 6]) -> Vec<Row> {
    MONTHS
        .iter()
        .zip(values)
        .map(|(m, v)| {
            row([
                ("month", Scalar::from(*m)),
                (cols[0], Scalar::from(v[0])),
                (cols[1], Scalar::from(v[1])),
                (cols[2], Scalar::from(v[2])),
            ])
        })
        .collect()
}

fn insights() -> Insights {
    Insights {
        summary: "Sales performance shows strong growth in Q2 with Electronics leading category \
                  performance. Multi-channel analysis reveals mobile conversion improvement \
                  opportunities."
            .to_string(),
        key_metrics: vec![
            KeyMetric::new("Total Revenue", "$278,000", "+12.5%"),
            KeyMetric::new("Active Customers", "1,247", "+8.2%"),
            KeyMetric::new("Avg Order Value", "$223", "+5.1%"),
            KeyMetric::new("Conversion Rate", "3.4%", "+0.8%"),
        ],
        recommendations: [
            "Focus marketing efforts on Electronics category",
            "Investigate Q1 performance dip for improvement opportunities",
            "Consider expanding Product A market share",
            "Monitor customer satisfaction correlation with sales",
            "Optimize mobile conversion funnel",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
}

fn table() -> TableData {
    let rows = [
        ["iPhone 15", "$45,000", "200", "$45,000", "+15%"],
        ["MacBook Pro", "$38,000", "95", "$38,000", "+8%"],
        ["iPad Air", "$22,000", "150", "$22,000", "+12%"],
        ["AirPods Pro", "$18,000", "360", "$18,000", "+25%"],
        ["Apple Watch", "$15,000", "125", "$15,000", "+6%"],
    ];
    TableData {
        title: "Top Products Performance".to_string(),
        headers: ["Product", "Sales", "Units", "Revenue", "Growth"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| Scalar::from(*c)).collect())
            .collect(),
    }
}

/// The complete offline payload. Only fails if one of the charts below
/// stops satisfying the builder's invariants.
pub fn fallback_payload() -> Result<DashboardPayload, BuildError> {
    let mut trend = multi_line_chart(
        "multi-series-performance",
        "Revenue & Profit Trend",
        monthly(
            ["revenue", "profit", "expenses"],
            [
                [4000.0, 1200.0, 2800.0],
                [3000.0, 900.0, 2100.0],
                [5000.0, 1800.0, 3200.0],
                [4500.0, 1600.0, 2900.0],
                [6000.0, 2200.0, 3800.0],
                [5500.0, 2000.0, 3500.0],
            ],
        ),
        &[
            SeriesSpec::new("revenue", "Revenue", "#8884d8"),
            SeriesSpec::new("profit", "Profit", "#82ca9d"),
            SeriesSpec::new("expenses", "Expenses", "#ff7c7c"),
        ],
        "month",
    )
    .with_layout(height(320))
    .with_legend(true, legend_top())
    .build()?;
    trend.series[0].stroke_width = Some(3.0);
    trend.series[2].stroke_dasharray = Some("5 5".to_string());
    if let Some(y) = trend.axes.as_mut().and_then(|a| a.y_axis.as_mut()) {
        y[0].domain = Some(AxisDomain::Range(
            DomainBound::Value(0.0),
            DomainBound::Expr("dataMax + 500".to_string()),
        ));
    }

    let conversion = composed_chart(
        "composed-sales-conversion",
        "Sales Volume vs Conversion Rate",
        monthly(
            ["sales", "conversion", "visitors"],
            [
                [590.0, 4.5, 1200.0],
                [868.0, 5.2, 1800.0],
                [1397.0, 6.8, 2100.0],
                [1480.0, 7.2, 2300.0],
                [1520.0, 6.9, 2200.0],
                [1400.0, 7.5, 2000.0],
            ],
        ),
        "month",
    )
    .with_layout(height(350))
    .with_series(
        SeriesConfig::new("sales")
            .named("Sales Volume")
            .fill("#8884d8")
            .on_y_axis("left")
            .shape(SeriesShape::Bar),
    )
    .with_series(
        SeriesConfig::new("visitors")
            .named("Visitors")
            .fill("#82ca9d")
            .opacity(0.7)
            .on_y_axis("left")
            .shape(SeriesShape::Bar),
    )
    .with_series(
        SeriesConfig::new("conversion")
            .named("Conversion Rate %")
            .stroke("#ff7300")
            .stroke_width(3.0)
            .interpolation(Interpolation::Monotone)
            .on_y_axis("right")
            .shape(SeriesShape::Line),
    )
    .with_legend(true, legend_top())
    .build()?;

    let shares: Vec<Row> = [
        ("Desktop", 400, "#0088FE"),
        ("Mobile", 300, "#00C49F"),
        ("Tablet", 200, "#FFBB28"),
        ("Smart TV", 100, "#FF8042"),
    ]
    .iter()
    .map(|(name, value, fill)| {
        row([
            ("name", Scalar::from(*name)),
            ("value", Scalar::from(*value)),
            ("fill", Scalar::from(*fill)),
        ])
    })
    .collect();
    let mut market = pie_chart(
        "enhanced-market-share",
        "Enhanced Market Share Distribution",
        shares,
        "value",
        "name",
    )
    .with_layout(height(400))
    .build()?;
    market.series[0].name = Some("Market Share".to_string());
    market.series[0].pie.inner_radius = Some(40.0);
    market.series[0].pie.outer_radius = Some(120.0);

    let channels = ChartConfigBuilder::new(
        ChartKind::Area,
        "stacked-revenue-channels",
        "Revenue by Channel (Stacked)",
    )
    .with_layout(height(320))
    .with_data(monthly(
        ["online", "retail", "wholesale"],
        [
            [2400.0, 1600.0, 1000.0],
            [1398.0, 1200.0, 800.0],
            [3800.0, 1800.0, 1200.0],
            [3908.0, 1900.0, 1100.0],
            [4800.0, 2200.0, 1400.0],
            [3490.0, 2100.0, 1300.0],
        ],
    ))
    .with_x_axis(AxisConfig::category("month"))
    .with_y_axis(AxisConfig::number())
    .with_multiple_series(
        [
            ("online", "Online", "#8884d8"),
            ("retail", "Retail", "#82ca9d"),
            ("wholesale", "Wholesale", "#ffc658"),
        ]
        .iter()
        .map(|(key, name, color)| {
            SeriesConfig::new(key)
                .named(name)
                .stack("1")
                .fill(color)
                .stroke(color)
        }),
    )
    .with_legend(true, legend_top())
    .build()?;

    let categories: Vec<Row> = [
        ("Electronics", 12000, 8000, 4000),
        ("Clothing", 8000, 6000, 3000),
        ("Books", 6000, 4000, 2000),
        ("Home", 9000, 7000, 3500),
    ]
    .iter()
    .map(|(category, online, retail, wholesale)| {
        row([
            ("category", Scalar::from(*category)),
            ("online", Scalar::from(*online)),
            ("retail", Scalar::from(*retail)),
            ("wholesale", Scalar::from(*wholesale)),
        ])
    })
    .collect();
    let breakdown = stacked_bar_chart(
        "category-breakdown",
        "Category Performance by Channel",
        categories,
        &[
            SeriesSpec::new("online", "Online", "#8884d8"),
            SeriesSpec::new("retail", "Retail", "#82ca9d"),
            SeriesSpec::new("wholesale", "Wholesale", "#ffc658"),
        ],
        "category",
    )
    .with_layout(height(320))
    .with_legend(true, legend_top())
    .build()?;

    let regions: Vec<Row> = [
        (8.5, 12000, "North"),
        (7.2, 8000, "South"),
        (9.1, 15000, "East"),
        (6.8, 6000, "West"),
        (8.9, 13500, "Central"),
        (7.8, 10500, "Northwest"),
        (8.3, 11200, "Southeast"),
    ]
    .iter()
    .map(|(satisfaction, sales, region)| {
        row([
            ("satisfaction", Scalar::from(*satisfaction)),
            ("sales", Scalar::from(*sales)),
            ("region", Scalar::from(*region)),
        ])
    })
    .collect();
    let mut satisfaction = scatter_chart(
        "enhanced-customer-satisfaction",
        "Customer Satisfaction vs Sales Performance",
        regions,
        "satisfaction",
        "sales",
    )
    .with_layout(height(350))
    .build()?;
    satisfaction.series[0].name = Some("Regional Performance".to_string());
    satisfaction.series[0].opacity = Some(0.8);
    if let Some(axes) = satisfaction.axes.as_mut() {
        if let Some(x) = axes.x_axis.as_mut() {
            x[0].domain = Some(AxisDomain::Range(DomainBound::Value(6.0), DomainBound::Value(10.0)));
            x[0].label = Some("Customer Satisfaction Score".to_string());
        }
        if let Some(y) = axes.y_axis.as_mut() {
            y[0].domain = Some(AxisDomain::Range(
                DomainBound::Value(0.0),
                DomainBound::Expr("dataMax + 1000".to_string()),
            ));
            y[0].label = Some("Sales ($)".to_string());
        }
    }

    let scores: Vec<Row> = [
        ("Quality", 86, 90),
        ("Price", 72, 80),
        ("Support", 64, 85),
        ("Delivery", 91, 88),
        ("Usability", 78, 85),
        ("Features", 69, 75),
    ]
    .iter()
    .map(|(subject, current, target)| {
        row([
            ("subject", Scalar::from(*subject)),
            ("current", Scalar::from(*current)),
            ("target", Scalar::from(*target)),
        ])
    })
    .collect();
    let experience = ChartConfigBuilder::new(
        ChartKind::Radar,
        "customer-experience",
        "Customer Experience Scores",
    )
    .with_layout(height(350))
    .with_data(scores)
    .with_series(
        SeriesConfig::new("current")
            .named("Current")
            .stroke("#8884d8")
            .fill("#8884d8")
            .opacity(0.6),
    )
    .with_series(
        SeriesConfig::new("target")
            .named("Target")
            .stroke("#82ca9d")
            .fill("#82ca9d")
            .opacity(0.3),
    )
    .build()?;

    Ok(DashboardPayload {
        dashboard_config: DashboardConfig {
            title: FALLBACK_TITLE.to_string(),
        },
        insights: insights(),
        table_data: table(),
        charts: vec![
            trend,
            conversion,
            market,
            channels,
            breakdown,
            satisfaction,
            experience,
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Trend;
    use crate::render::{ChartBody, render};

    #[test]
    fn fallback_has_every_drawable_kind() {
        let p = fallback_payload().unwrap();
        assert_eq!(p.title(), FALLBACK_TITLE);
        let kinds: Vec<&str> = p.charts.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["line", "composed", "pie", "area", "bar", "scatter", "radar"]
        );
        assert!(p.lint().is_empty(), "{:?}", p.lint());
        for chart in &p.charts {
            assert!(!matches!(render(chart).container.body, ChartBody::Unsupported(_)));
        }
    }

    #[test]
    fn fallback_insights_and_table() {
        let p = fallback_payload().unwrap();
        assert_eq!(p.insights.key_metrics.len(), 4);
        assert!(p.insights.key_metrics.iter().all(|m| m.trend() == Trend::Up));
        assert_eq!(p.insights.recommendations.len(), 5);
        assert_eq!(p.table_data.headers.len(), 5);
        assert_eq!(p.table_data.rows.len(), 5);
        assert_eq!(p.table_data.rows[3][0], Scalar::from("AirPods Pro"));
    }

    #[test]
    fn fallback_survives_a_json_round_trip() {
        let p = fallback_payload().unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: DashboardPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
