use crate::error::{ReportError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorStat {
    pub name: String,
    pub commit_count: u64,
    pub percentage: f64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HourStat {
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayStat {
    pub day: String,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimelinePoint {
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileStat {
    pub name: String,
    pub count: u64,
}

/// Headline numbers shown as stat cards above the charts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Summary {
    pub total_commits: u64,
    pub contributors: u64,
    pub active_days: u64,
    pub first_commit: String,
    pub last_commit: String,
}

/// Pre-aggregated statistics produced by the analytics backend.
///
/// The four mandatory arrays are optional here so that a bundle missing one of
/// them still parses; chart initialization is what rejects it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StatsBundle {
    pub authors: Option<Vec<AuthorStat>>,
    pub hourly: Option<Vec<HourStat>>,
    pub daily: Option<Vec<DayStat>>,
    pub timeline: Option<Vec<TimelinePoint>>,
    pub files: Option<Vec<FileStat>>,
    pub summary: Option<Summary>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Branch {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitNode {
    pub hash: String,
    #[serde(default)]
    pub short_hash: String,
    pub branch: String,
    #[serde(default)]
    pub author: String,
    pub date: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_merge: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parents: Vec<String>,
}

impl CommitNode {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BranchGraphBundle {
    pub branches: Option<Vec<Branch>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub commit_graph: Vec<CommitNode>,
}

/// Reads a missing or `null` array as empty; the backend writes nil slices as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` (both read as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_stats(path: &Path) -> Result<StatsBundle> {
    read_json(path)
}

pub fn load_branch_graph(path: &Path) -> Result<BranchGraphBundle> {
    read_json(path)
}

pub fn load_analysis(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_stats_field_names_are_pascal_case() {
        let json = r#"{
            "authors": [{"Name": "alice", "CommitCount": 7, "Percentage": 70.0}],
            "hourly": [{"Hour": 9, "Count": 3}],
            "daily": [{"Day": "Monday", "Count": 4}],
            "timeline": [{"Date": "2024-03-01", "Count": 2}]
        }"#;
        let stats: StatsBundle = serde_json::from_str(json).unwrap();
        let authors = stats.authors.unwrap();
        assert_eq!(authors[0].name, "alice");
        assert_eq!(authors[0].commit_count, 7);
        assert_eq!(authors[0].additions, 0);
        assert!(stats.files.is_none());
    }

    #[test]
    fn test_missing_arrays_still_parse() {
        let stats: StatsBundle = serde_json::from_str(r#"{"authors": []}"#).unwrap();
        assert!(stats.hourly.is_none());
        assert!(stats.timeline.is_none());
    }

    #[test]
    fn test_null_arrays_read_as_empty() {
        let json = r#"{
            "branches": [{"name": "main"}],
            "commit_graph": [
                {"hash": "a1", "branch": "main", "date": "2024-01-01", "parents": null}
            ]
        }"#;
        let graph: BranchGraphBundle = serde_json::from_str(json).unwrap();
        assert_eq!(graph.commit_graph.len(), 1);
        assert!(graph.commit_graph[0].parents.is_empty());

        let graph: BranchGraphBundle =
            serde_json::from_str(r#"{"branches": null, "commit_graph": null}"#).unwrap();
        assert!(graph.branches.is_none());
        assert!(graph.commit_graph.is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-05-01T10:30:00+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);

        let plain = parse_timestamp("2024-05-01 10:30:00").unwrap();
        assert_eq!(plain.hour(), 10);

        let day = parse_timestamp("2024-05-01").unwrap();
        assert_eq!((day.month(), day.day(), day.hour()), (5, 1, 0));

        assert!(parse_timestamp("yesterday").is_none());
    }
}
