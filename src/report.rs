use crate::charts::{self, ChartSlot};
use crate::config::RenderConfig;
use crate::data::{self, BranchGraphBundle, StatsBundle};
use crate::error::{ReportError, Result};
use crate::forest::{self, ForestOutcome, ForestScript};
use crate::html::{self, ReportDocument};
use crate::messages::Messages;
use crate::page::{ElementId, ReportPage};
use crate::panel::{self, AnalysisPanel};
use crate::render;
use crate::text::TextRenderer;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// How far the commit forest got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestStatus {
    Skipped,
    Placeholder,
    Drawn { lanes: usize, commits: usize },
}

/// Summary of one generation run.
#[derive(Debug)]
pub struct ReportOutcome {
    pub index: PathBuf,
    pub charts: Vec<ChartSlot>,
    pub forest: ForestStatus,
    pub insights: Option<usize>,
    pub snapshots: Vec<PathBuf>,
}

/// Loads the inputs named by `config` and writes `index.html` (plus PNG
/// snapshots when requested).
pub fn generate_report(config: &RenderConfig) -> Result<ReportOutcome> {
    let messages = Messages::for_language(config.language);

    info!("Loading statistics from {:?}...", config.stats);
    let stats: StatsBundle = data::load_stats(&config.stats)?;

    let graph: Option<BranchGraphBundle> = config.branches.as_deref().and_then(|path| {
        match data::load_branch_graph(path) {
            Ok(graph) => {
                info!(
                    "Loaded {} commits, {} branches",
                    graph.commit_graph.len(),
                    graph.branches.as_ref().map_or(0, Vec::len)
                );
                Some(graph)
            }
            Err(e) => {
                warn!(error = %e, "Branch graph unavailable, skipping commit forest");
                None
            }
        }
    });

    let analysis = config
        .analysis
        .as_deref()
        .and_then(|path| match data::load_analysis(path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(error = %e, "Analysis text unavailable, showing placeholder");
                None
            }
        });

    let mut page = ReportPage::standard().without(&config.omitted_elements());

    let chart_outcome = charts::init_charts(&mut page, Some(&stats), messages);
    let forest_outcome =
        forest::init_commit_forest(&mut page, graph.as_ref(), config.forest_options(), messages);

    // The body is rendered up front; the page itself opens collapsed.
    let mut panel = AnalysisPanel::new(analysis, messages);
    if page.has(ElementId::AiAnalysisContent) {
        panel.open();
        if let Some(body) = panel.body() {
            page.set_markup(ElementId::AiAnalysisContent, body.to_string());
        }
        panel.toggle();
    }
    let insights = panel::populate_key_insights(&mut page, &panel, chart_outcome.cached, messages);

    let forest_script = forest_outcome
        .layout()
        .map(|layout| ForestScript::from_layout(layout, messages));
    let branch_names: Vec<String> = match forest_outcome.layout() {
        Some(layout) => layout.branch_names.clone(),
        None => graph
            .as_ref()
            .and_then(|g| g.branches.as_ref())
            .map(|b| b.iter().map(|b| b.name.clone()).collect())
            .unwrap_or_default(),
    };

    fs::create_dir_all(&config.output_dir).map_err(|source| ReportError::Write {
        path: config.output_dir.clone(),
        source,
    })?;
    let index = config.output_dir.join("index.html");

    let doc = ReportDocument {
        messages,
        page: &page,
        project: config.project.as_deref(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        stats: chart_outcome.cached,
        panel: &panel,
        forest: forest_script.as_ref(),
        branch_names: &branch_names,
        forest_size: (config.forest_width, config.forest_height),
    };
    write_index(&index, &doc)?;
    info!("Report written to {:?}", index);

    let snapshots = match (&config.png_dir, forest_outcome.layout()) {
        (Some(dir), Some(layout)) => {
            let text = config
                .font
                .as_deref()
                .map(TextRenderer::from_file)
                .transpose()?;
            let paths = render::render_snapshots(layout, text.as_ref(), dir)?;
            info!("Wrote {} forest snapshots to {:?}", paths.len(), dir);
            paths
        }
        (Some(_), None) => {
            warn!("No forest was drawn; skipping PNG snapshots");
            Vec::new()
        }
        (None, _) => Vec::new(),
    };

    let forest = match &forest_outcome {
        ForestOutcome::Skipped => ForestStatus::Skipped,
        ForestOutcome::Placeholder => ForestStatus::Placeholder,
        ForestOutcome::Drawn(layout) => ForestStatus::Drawn {
            lanes: layout.lanes.len(),
            commits: layout.commits.len(),
        },
    };

    Ok(ReportOutcome {
        index,
        charts: chart_outcome.drawn,
        forest,
        insights,
        snapshots,
    })
}

fn write_index(path: &std::path::Path, doc: &ReportDocument) -> Result<()> {
    let to_error = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    html::write(&mut writer, doc).map_err(to_error)?;
    writer.flush().map_err(to_error)
}
