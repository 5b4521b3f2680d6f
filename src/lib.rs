//! chartdash
//!
//! A lightweight Rust library for turning declarative chart configurations into
//! analytics dashboards. Pairs with the `chartdash` CLI and the `chartdash-gui`
//! desktop viewer.
//!
//! ### Features
//! - Typed chart configuration model (line, bar, area, pie, scatter, radar, composed)
//! - Fluent, validating `ChartConfigBuilder` plus presets for common shapes
//! - Pure renderer from configuration to a visual tree
//! - SVG/PNG output of that tree via `plotters`
//! - Dashboard payload fetch with a built-in offline fallback
//!
//! ### Example
//! ```no_run
//! use chartdash::builder::{line_chart, row};
//! use chartdash::models::Scalar;
//!
//! let data = vec![
//!     row([("name", Scalar::from("Jan")), ("value", Scalar::from(4000))]),
//!     row([("name", Scalar::from("Feb")), ("value", Scalar::from(3000))]),
//! ];
//! let config = line_chart("sales", "Sales", data, "value", "name").build()?;
//! let view = chartdash::render::render(&config);
//! chartdash::viz::render_to_file(&view, "sales.svg", 800)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod builder;
pub mod dashboard;
pub mod fixture;
pub mod models;
pub mod panel;
pub mod render;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use builder::{BuildError, ChartConfigBuilder};
pub use models::{ChartConfig, ChartKind, Row, Scalar};
