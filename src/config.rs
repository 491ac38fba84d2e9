use crate::layout::ForestOptions;
use crate::messages::Language;
use crate::page::ElementId;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Report sections that can be left out of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Authors,
    Timeline,
    Hourly,
    Daily,
    Files,
    Forest,
    Analysis,
}

impl Section {
    /// Elements that disappear from the page with this section.
    pub fn elements(self) -> &'static [ElementId] {
        match self {
            Section::Authors => &[ElementId::AuthorsChart],
            Section::Timeline => &[ElementId::TimelineChart],
            Section::Hourly => &[ElementId::HourlyChart],
            Section::Daily => &[ElementId::DailyChart],
            Section::Files => &[ElementId::FilesChart],
            Section::Forest => &[
                ElementId::CommitForest,
                ElementId::CommitInfo,
                ElementId::CommitDetails,
                ElementId::ZoomIn,
                ElementId::ZoomOut,
                ElementId::ResetView,
                ElementId::BranchFilter,
            ],
            Section::Analysis => &[
                ElementId::AiAnalysisContent,
                ElementId::AiAnalysisIcon,
                ElementId::AiAnalysisData,
                ElementId::KeyInsights,
            ],
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "report-charts",
    about = "Render a repository statistics report as a static HTML page"
)]
pub struct RenderConfig {
    /// Path to the statistics JSON bundle
    #[arg(long)]
    pub stats: PathBuf,

    /// Path to the branch graph JSON bundle
    #[arg(long)]
    pub branches: Option<PathBuf>,

    /// Path to a Markdown file with the AI analysis
    #[arg(long)]
    pub analysis: Option<PathBuf>,

    /// Directory that receives index.html
    #[arg(short, long, default_value = "report")]
    pub output_dir: PathBuf,

    /// Project name shown in the page header
    #[arg(long)]
    pub project: Option<String>,

    /// Language of the page text
    #[arg(long, value_enum, default_value_t = Language::En)]
    pub language: Language,

    /// Commit forest width
    #[arg(long, default_value_t = 800.0)]
    pub forest_width: f32,

    /// Commit forest height
    #[arg(long, default_value_t = 500.0)]
    pub forest_height: f32,

    /// Leave a section out of the page (repeatable)
    #[arg(long, value_enum)]
    pub omit: Vec<Section>,

    /// Output directory for forest PNG snapshots
    #[arg(long)]
    pub png_dir: Option<PathBuf>,

    /// TrueType font for labels in PNG snapshots
    #[arg(long)]
    pub font: Option<PathBuf>,
}

impl RenderConfig {
    /// A configuration with defaults for everything but the stats bundle.
    pub fn new(stats: impl Into<PathBuf>) -> Self {
        RenderConfig {
            stats: stats.into(),
            branches: None,
            analysis: None,
            output_dir: PathBuf::from("report"),
            project: None,
            language: Language::En,
            forest_width: 800.0,
            forest_height: 500.0,
            omit: Vec::new(),
            png_dir: None,
            font: None,
        }
    }

    pub fn forest_options(&self) -> ForestOptions {
        ForestOptions {
            width: self.forest_width,
            height: self.forest_height,
        }
    }

    pub fn omitted_elements(&self) -> Vec<ElementId> {
        self.omit
            .iter()
            .flat_map(|section| section.elements().iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = RenderConfig::parse_from(["report-charts", "--stats", "stats.json"]);
        assert_eq!(config.stats, PathBuf::from("stats.json"));
        assert_eq!(config.output_dir, PathBuf::from("report"));
        assert_eq!(config.language, Language::En);
        assert!(config.omit.is_empty());
        assert_eq!(config.forest_options().width, 800.0);
    }

    #[test]
    fn test_parse_repeated_omit() {
        let config = RenderConfig::parse_from([
            "report-charts",
            "--stats",
            "s.json",
            "--omit",
            "files",
            "--omit",
            "analysis",
            "--language",
            "zh",
        ]);
        assert_eq!(config.omit, vec![Section::Files, Section::Analysis]);
        assert_eq!(config.language, Language::Zh);
        let omitted = config.omitted_elements();
        assert!(omitted.contains(&ElementId::FilesChart));
        assert!(omitted.contains(&ElementId::KeyInsights));
        assert!(!omitted.contains(&ElementId::CommitForest));
    }
}
