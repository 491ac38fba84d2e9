use crate::data::{Branch, CommitNode};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;
use tracing::warn;

/// Lane colors, picked by branch index.
pub const BRANCH_PALETTE: [&str; 8] = [
    "#007bff", "#28a745", "#dc3545", "#ffc107", "#17a2b8", "#6f42c1", "#fd7e14", "#20c997",
];

pub const COMMIT_RADIUS: f32 = 4.0;
pub const MERGE_RADIUS: f32 = 6.0;
pub const COMMIT_FILL: &str = "#28a745";
pub const COMMIT_STROKE: &str = "#1e7e34";
pub const MERGE_FILL: &str = "#dc3545";
pub const MERGE_STROKE: &str = "#c82333";

const TARGET_TICKS: i64 = 10;

pub fn branch_color(index: usize) -> &'static str {
    BRANCH_PALETTE[index % BRANCH_PALETTE.len()]
}

#[derive(Debug, Clone, Copy)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Space around the plotting area; the left side holds the lane labels.
pub const FOREST_MARGIN: Margin = Margin {
    top: 40.0,
    right: 40.0,
    bottom: 40.0,
    left: 100.0,
};

#[derive(Debug, Clone, Copy)]
pub struct ForestOptions {
    pub width: f32,
    pub height: f32,
}

impl Default for ForestOptions {
    fn default() -> Self {
        ForestOptions {
            width: 800.0,
            height: 500.0,
        }
    }
}

pub struct PositionedCommit<'a> {
    pub commit: &'a CommitNode,
    pub timestamp: DateTime<Utc>,
    pub x: f32,
    pub y: f32,
    pub lane: usize,
    pub radius: f32,
}

impl PositionedCommit<'_> {
    pub fn fill(&self) -> &'static str {
        if self.commit.is_merge {
            MERGE_FILL
        } else {
            COMMIT_FILL
        }
    }

    pub fn stroke(&self) -> &'static str {
        if self.commit.is_merge {
            MERGE_STROKE
        } else {
            COMMIT_STROKE
        }
    }
}

/// A branch that has at least one commit, with the points its line passes through.
pub struct Lane {
    pub name: String,
    pub index: usize,
    pub y: f32,
    pub color: &'static str,
    pub points: Vec<(f32, f32)>,
}

pub struct DateTick {
    pub x: f32,
    pub label: String,
}

/// Commit forest geometry in inner (margin-relative) coordinates.
pub struct ForestLayout<'a> {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
    pub inner_width: f32,
    pub inner_height: f32,
    pub axis_y: f32,
    pub branch_names: Vec<String>,
    pub lanes: Vec<Lane>,
    pub commits: Vec<PositionedCommit<'a>>,
    pub ticks: Vec<DateTick>,
    time_start: DateTime<Utc>,
    time_end: DateTime<Utc>,
    lane_count: usize,
}

impl<'a> ForestLayout<'a> {
    pub fn from_graph(
        commit_graph: &'a [CommitNode],
        branches: &[Branch],
        options: ForestOptions,
    ) -> Self {
        let margin = FOREST_MARGIN;
        let inner_width = options.width - margin.left - margin.right;
        let inner_height = options.height - margin.top - margin.bottom;

        // Later duplicates win, matching a name -> index map built in list order
        let branch_index: HashMap<&str, usize> = branches
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.as_str(), i))
            .collect();

        let mut dated: Vec<(&CommitNode, DateTime<Utc>)> = commit_graph
            .iter()
            .filter_map(|c| match c.timestamp() {
                Some(ts) => Some((c, ts)),
                None => {
                    warn!(hash = %c.hash, date = %c.date, "Skipping commit with unparseable date");
                    None
                }
            })
            .collect();
        // Stable: commits sharing a timestamp keep their input order
        dated.sort_by_key(|(_, ts)| *ts);

        let time_start = dated.first().map_or_else(Utc::now, |(_, ts)| *ts);
        let time_end = dated.last().map_or(time_start, |(_, ts)| *ts);

        let mut layout = ForestLayout {
            width: options.width,
            height: options.height,
            margin,
            inner_width,
            inner_height,
            axis_y: inner_height - 30.0,
            branch_names: branches.iter().map(|b| b.name.clone()).collect(),
            lanes: Vec::new(),
            commits: Vec::new(),
            ticks: Vec::new(),
            time_start,
            time_end,
            lane_count: branches.len(),
        };

        layout.commits = dated
            .into_iter()
            .map(|(commit, timestamp)| {
                let lane = branch_index.get(commit.branch.as_str()).copied().unwrap_or(0);
                PositionedCommit {
                    commit,
                    timestamp,
                    x: layout.time_to_x(&timestamp),
                    y: layout.lane_to_y(lane),
                    lane,
                    radius: if commit.is_merge {
                        MERGE_RADIUS
                    } else {
                        COMMIT_RADIUS
                    },
                }
            })
            .collect();

        layout.lanes = branches
            .iter()
            .enumerate()
            .filter_map(|(index, branch)| {
                let y = layout.lane_to_y(index);
                let points: Vec<(f32, f32)> = layout
                    .commits
                    .iter()
                    .filter(|pc| pc.commit.branch == branch.name)
                    .map(|pc| (pc.x, y))
                    .collect();
                if points.is_empty() {
                    return None;
                }
                Some(Lane {
                    name: branch.name.clone(),
                    index,
                    y,
                    color: branch_color(index),
                    points,
                })
            })
            .collect();

        layout.ticks = if layout.commits.is_empty() {
            Vec::new()
        } else {
            time_ticks(time_start, time_end)
                .into_iter()
                .map(|t| DateTick {
                    x: layout.time_to_x(&t),
                    label: t.format("%Y-%m-%d").to_string(),
                })
                .collect()
        };

        layout
    }

    /// Map a timestamp onto `[0, inner_width]`; a zero-length range maps to the middle.
    pub fn time_to_x(&self, ts: &DateTime<Utc>) -> f32 {
        let total = (self.time_end - self.time_start).num_milliseconds();
        if total == 0 {
            return self.inner_width / 2.0;
        }
        let elapsed = (*ts - self.time_start).num_milliseconds() as f32;
        elapsed / total as f32 * self.inner_width
    }

    /// Lane 0 sits lowest, the last branch highest.
    pub fn lane_to_y(&self, lane: usize) -> f32 {
        let bottom = self.inner_height - 100.0;
        let top = 50.0;
        let span = self.lane_count as f32 - 1.0;
        if span == 0.0 {
            return (bottom + top) / 2.0;
        }
        bottom + lane as f32 / span * (top - bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickInterval {
    Minutes(i64),
    Hours(i64),
    Days(u32),
    Weeks,
    Months(u32),
    Years(i32),
}

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const YEAR: i64 = 365 * DAY;

const INTERVALS: [(TickInterval, i64); 14] = [
    (TickInterval::Minutes(1), MINUTE),
    (TickInterval::Minutes(5), 5 * MINUTE),
    (TickInterval::Minutes(15), 15 * MINUTE),
    (TickInterval::Minutes(30), 30 * MINUTE),
    (TickInterval::Hours(1), HOUR),
    (TickInterval::Hours(3), 3 * HOUR),
    (TickInterval::Hours(6), 6 * HOUR),
    (TickInterval::Hours(12), 12 * HOUR),
    (TickInterval::Days(1), DAY),
    (TickInterval::Days(2), 2 * DAY),
    (TickInterval::Weeks, 7 * DAY),
    (TickInterval::Months(1), 30 * DAY),
    (TickInterval::Months(3), 90 * DAY),
    (TickInterval::Years(1), YEAR),
];

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 1, 2 or 5 times a power of ten, no smaller than `raw`.
fn nice_step(raw: f64) -> i32 {
    let mut power = 1.0;
    while power * 10.0 <= raw {
        power *= 10.0;
    }
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * power)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * power);
    step.max(1.0) as i32
}

impl TickInterval {
    fn choose(span_secs: i64) -> Self {
        let target = span_secs as f64 / TARGET_TICKS as f64;
        let i = INTERVALS.partition_point(|(_, secs)| (*secs as f64) <= target);
        if i == INTERVALS.len() {
            return TickInterval::Years(nice_step(target / YEAR as f64));
        }
        if i == 0 {
            return INTERVALS[0].0;
        }
        let (lower, lower_secs) = INTERVALS[i - 1];
        let (upper, upper_secs) = INTERVALS[i];
        if target / (lower_secs as f64) < (upper_secs as f64) / target {
            lower
        } else {
            upper
        }
    }

    /// First tick at or after `t`.
    fn ceil(self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TickInterval::Minutes(n) => ceil_seconds(t, n * MINUTE),
            TickInterval::Hours(n) => ceil_seconds(t, n * HOUR),
            TickInterval::Days(_) | TickInterval::Weeks => {
                let mut date = t.date_naive();
                if midnight(date) < t {
                    date = date.succ_opt()?;
                }
                while !self.accepts(date) {
                    date = date.succ_opt()?;
                }
                Some(midnight(date))
            }
            TickInterval::Months(_) => {
                let mut first = NaiveDate::from_ymd_opt(t.year(), t.month(), 1)?;
                if midnight(first) < t {
                    first = next_month(first)?;
                }
                while !self.accepts(first) {
                    first = next_month(first)?;
                }
                Some(midnight(first))
            }
            TickInterval::Years(_) => {
                let mut year = t.year();
                if midnight(NaiveDate::from_ymd_opt(year, 1, 1)?) < t {
                    year += 1;
                }
                let mut first = NaiveDate::from_ymd_opt(year, 1, 1)?;
                while !self.accepts(first) {
                    first = NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)?;
                }
                Some(midnight(first))
            }
        }
    }

    fn next(self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TickInterval::Minutes(n) => Some(t + Duration::seconds(n * MINUTE)),
            TickInterval::Hours(n) => Some(t + Duration::seconds(n * HOUR)),
            _ => self.ceil(t + Duration::seconds(1)),
        }
    }

    fn accepts(self, date: NaiveDate) -> bool {
        match self {
            TickInterval::Days(n) => (date.day() - 1) % n == 0,
            TickInterval::Weeks => date.weekday() == chrono::Weekday::Sun,
            TickInterval::Months(n) => date.day() == 1 && (date.month() - 1) % n == 0,
            TickInterval::Years(n) => date.ordinal() == 1 && date.year().rem_euclid(n) == 0,
            TickInterval::Minutes(_) | TickInterval::Hours(_) => true,
        }
    }
}

fn ceil_seconds(t: DateTime<Utc>, step: i64) -> Option<DateTime<Utc>> {
    let secs = t.timestamp();
    let mut c = secs.div_euclid(step) * step;
    if c < secs || (c == secs && t.timestamp_subsec_nanos() > 0) {
        c += step;
    }
    Utc.timestamp_opt(c, 0).single()
}

fn next_month(first: NaiveDate) -> Option<NaiveDate> {
    if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
}

/// Calendar-aligned ticks across `[start, end]`, roughly ten of them.
fn time_ticks(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    if end <= start {
        return vec![start];
    }
    let interval = TickInterval::choose((end - start).num_seconds());

    let mut ticks = Vec::new();
    let mut current = interval.ceil(start);
    while let Some(t) = current {
        if t > end || ticks.len() > 100 {
            break;
        }
        ticks.push(t);
        current = interval.next(t);
    }
    ticks
}
