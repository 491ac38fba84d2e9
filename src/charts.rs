//! Chart.js configurations built from a [`StatsBundle`].
//!
//! The structs here serialize to exactly the object Chart.js takes as its second
//! constructor argument. The only extension is `options.plugins.tooltip.titles`,
//! which the page script turns into a tooltip title callback.

use crate::data::{AuthorStat, DayStat, FileStat, HourStat, StatsBundle, TimelinePoint};
use crate::messages::Messages;
use crate::page::{ElementId, ReportPage};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// Author doughnut and file bars share this palette.
pub const AUTHOR_PALETTE: [&str; 10] = [
    "#667eea", "#764ba2", "#f093fb", "#f5576c", "#4facfe", "#00f2fe", "#43e97b", "#38f9d7",
    "#ffecd2", "#fcb69f",
];

pub const DAILY_PALETTE: [&str; 7] = [
    "rgba(255, 99, 132, 0.8)",
    "rgba(54, 162, 235, 0.8)",
    "rgba(255, 205, 86, 0.8)",
    "rgba(75, 192, 192, 0.8)",
    "rgba(153, 102, 255, 0.8)",
    "rgba(255, 159, 64, 0.8)",
    "rgba(199, 199, 199, 0.8)",
];

const ACCENT: &str = "#667eea";
const ACCENT_AREA: &str = "rgba(102, 126, 234, 0.1)";
const ACCENT_BAR: &str = "rgba(102, 126, 234, 0.8)";

/// Files beyond this many entries are left out of the files chart.
pub const FILES_CHART_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Doughnut,
    Line,
    Bar,
    PolarArea,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Fill {
    Solid(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Fill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scales: BTreeMap<String, Axis>,
    #[serde(skip_serializing_if = "Plugins::is_empty")]
    pub plugins: Plugins,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            animation: None,
            index_axis: None,
            scales: BTreeMap::new(),
            plugins: Plugins::default(),
        }
    }
}

impl ChartOptions {
    fn zero_based(axis: &str) -> Self {
        let mut options = ChartOptions::default();
        options
            .scales
            .insert(axis.to_string(), Axis { begin_at_zero: true });
        options
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Animation {
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Plugins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

impl Plugins {
    fn is_empty(&self) -> bool {
        self.legend.is_none() && self.tooltip.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
}

impl Legend {
    fn bottom() -> Self {
        Legend {
            position: Some("bottom".to_string()),
            display: None,
        }
    }

    fn hidden() -> Self {
        Legend {
            position: None,
            display: Some(false),
        }
    }
}

/// Per-point tooltip titles, indexed like the chart labels.
#[derive(Debug, Clone, Serialize)]
pub struct Tooltip {
    pub titles: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSlot {
    Authors,
    Timeline,
    Hourly,
    Daily,
    Files,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 5] = [
        ChartSlot::Authors,
        ChartSlot::Timeline,
        ChartSlot::Hourly,
        ChartSlot::Daily,
        ChartSlot::Files,
    ];

    pub fn element_id(self) -> ElementId {
        match self {
            ChartSlot::Authors => ElementId::AuthorsChart,
            ChartSlot::Timeline => ElementId::TimelineChart,
            ChartSlot::Hourly => ElementId::HourlyChart,
            ChartSlot::Daily => ElementId::DailyChart,
            ChartSlot::Files => ElementId::FilesChart,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartSlot::Authors => "Authors",
            ChartSlot::Timeline => "Timeline",
            ChartSlot::Hourly => "Hourly",
            ChartSlot::Daily => "Daily",
            ChartSlot::Files => "Files",
        }
    }
}

/// What `init_charts` did, plus the bundle it was handed for later consumers.
#[derive(Debug)]
pub struct ChartOutcome<'a> {
    pub drawn: Vec<ChartSlot>,
    pub skipped: Vec<ChartSlot>,
    pub cached: Option<&'a StatsBundle>,
}

struct ValidStats<'a> {
    authors: &'a [AuthorStat],
    hourly: &'a [HourStat],
    daily: &'a [DayStat],
    timeline: &'a [TimelinePoint],
    files: &'a [FileStat],
}

impl<'a> ValidStats<'a> {
    fn from_bundle(stats: &'a StatsBundle) -> Option<Self> {
        Some(ValidStats {
            authors: stats.authors.as_deref()?,
            hourly: stats.hourly.as_deref()?,
            daily: stats.daily.as_deref()?,
            timeline: stats.timeline.as_deref()?,
            files: stats.files.as_deref().unwrap_or_default(),
        })
    }

    fn len(&self, slot: ChartSlot) -> usize {
        match slot {
            ChartSlot::Authors => self.authors.len(),
            ChartSlot::Timeline => self.timeline.len(),
            ChartSlot::Hourly => self.hourly.len(),
            ChartSlot::Daily => self.daily.len(),
            ChartSlot::Files => self.files.len(),
        }
    }
}

fn cycled(palette: &[&str], count: usize) -> Vec<String> {
    palette
        .iter()
        .cycle()
        .take(count)
        .map(|c| (*c).to_string())
        .collect()
}

/// Final path segment, e.g. `src/app/main.rs` -> `main.rs`.
pub fn basename(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, base)| base)
}

pub fn authors_chart(authors: &[AuthorStat]) -> ChartConfig {
    let mut options = ChartOptions {
        animation: Some(Animation { duration: 800 }),
        ..ChartOptions::default()
    };
    options.plugins.legend = Some(Legend::bottom());

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: authors.iter().map(|a| a.name.clone()).collect(),
            datasets: vec![Dataset {
                label: None,
                data: authors.iter().map(|a| a.commit_count).collect(),
                background_color: Fill::PerPoint(cycled(&AUTHOR_PALETTE, authors.len())),
                border_color: None,
                fill: None,
                tension: None,
            }],
        },
        options,
    }
}

pub fn timeline_chart(timeline: &[TimelinePoint]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: timeline.iter().map(|t| t.date.clone()).collect(),
            datasets: vec![Dataset {
                label: Some("Commits".to_string()),
                data: timeline.iter().map(|t| t.count).collect(),
                background_color: Fill::Solid(ACCENT_AREA.to_string()),
                border_color: Some(ACCENT.to_string()),
                fill: Some(true),
                tension: Some(0.4),
            }],
        },
        options: ChartOptions::zero_based("y"),
    }
}

pub fn hourly_chart(hourly: &[HourStat]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: hourly.iter().map(|h| format!("{}:00", h.hour)).collect(),
            datasets: vec![Dataset {
                label: Some("Commits".to_string()),
                data: hourly.iter().map(|h| h.count).collect(),
                background_color: Fill::Solid(ACCENT_BAR.to_string()),
                border_color: None,
                fill: None,
                tension: None,
            }],
        },
        options: ChartOptions::zero_based("y"),
    }
}

pub fn daily_chart(daily: &[DayStat]) -> ChartConfig {
    let mut options = ChartOptions::default();
    options.plugins.legend = Some(Legend::bottom());

    ChartConfig {
        kind: ChartKind::PolarArea,
        data: ChartData {
            labels: daily.iter().map(|d| d.day.clone()).collect(),
            datasets: vec![Dataset {
                label: None,
                data: daily.iter().map(|d| d.count).collect(),
                background_color: Fill::PerPoint(cycled(&DAILY_PALETTE, daily.len())),
                border_color: None,
                fill: None,
                tension: None,
            }],
        },
        options,
    }
}

/// Horizontal bars for the first [`FILES_CHART_LIMIT`] files, labelled by basename.
pub fn files_chart(files: &[FileStat], dataset_label: &str) -> ChartConfig {
    let shown = &files[..files.len().min(FILES_CHART_LIMIT)];

    let mut options = ChartOptions::zero_based("x");
    options.index_axis = Some("y".to_string());
    options.plugins.legend = Some(Legend::hidden());
    options.plugins.tooltip = Some(Tooltip {
        titles: shown.iter().map(|f| f.name.clone()).collect(),
    });

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: shown.iter().map(|f| basename(&f.name).to_string()).collect(),
            datasets: vec![Dataset {
                label: Some(dataset_label.to_string()),
                data: shown.iter().map(|f| f.count).collect(),
                background_color: Fill::PerPoint(cycled(&AUTHOR_PALETTE, shown.len())),
                border_color: None,
                fill: None,
                tension: None,
            }],
        },
        options,
    }
}

/// Binds one chart per present, non-empty slot.
///
/// A bundle missing any of the four mandatory arrays leaves the page untouched.
pub fn init_charts<'a>(
    page: &mut ReportPage,
    stats: Option<&'a StatsBundle>,
    messages: &Messages,
) -> ChartOutcome<'a> {
    let mut outcome = ChartOutcome {
        drawn: Vec::new(),
        skipped: Vec::new(),
        cached: stats,
    };

    let Some(valid) = stats.and_then(ValidStats::from_bundle) else {
        error!("Invalid chart data provided: authors, hourly, daily and timeline are all required");
        outcome.skipped.extend(ChartSlot::ALL);
        return outcome;
    };

    info!(
        authors = valid.authors.len(),
        timeline = valid.timeline.len(),
        files = valid.files.len(),
        "Initializing charts"
    );

    for slot in ChartSlot::ALL {
        let id = slot.element_id();
        if !page.has(id) || valid.len(slot) == 0 {
            warn!("{} chart: no data or element not found", slot.name());
            outcome.skipped.push(slot);
            continue;
        }

        let config = match slot {
            ChartSlot::Authors => authors_chart(valid.authors),
            ChartSlot::Timeline => timeline_chart(valid.timeline),
            ChartSlot::Hourly => hourly_chart(valid.hourly),
            ChartSlot::Daily => daily_chart(valid.daily),
            ChartSlot::Files => files_chart(valid.files, messages.modifications),
        };
        page.set_chart(id, config);
        outcome.drawn.push(slot);
    }

    outcome
}
