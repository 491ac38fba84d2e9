//! # Repository report renderer
//!
//! `report_charts` turns pre-aggregated repository statistics into a static
//! HTML report: five Chart.js charts, a commit forest drawn as SVG (with
//! optional PNG snapshots), and a collapsible AI-analysis panel with insight
//! cards.
//!
//! ## Example
//!
//! ```no_run
//! use report_charts::{generate_report, RenderConfig};
//!
//! let mut config = RenderConfig::new("stats.json");
//! config.branches = Some("branches.json".into());
//! let outcome = generate_report(&config).unwrap();
//! println!("wrote {:?}", outcome.index);
//! ```

pub mod charts;
pub mod config;
pub mod curve;
pub mod data;
pub mod error;
pub mod forest;
pub mod html;
pub mod layout;
pub mod markdown;
pub mod messages;
pub mod page;
pub mod panel;
pub mod render;
pub mod report;
pub mod svg;
pub mod text;
pub mod view;

pub use config::RenderConfig;
pub use error::{ReportError, Result};
pub use report::{generate_report, ForestStatus, ReportOutcome};
