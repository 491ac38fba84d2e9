use crate::data::BranchGraphBundle;
use crate::layout::{ForestLayout, ForestOptions};
use crate::messages::Messages;
use crate::page::{ElementId, ReportPage};
use crate::svg;
use crate::view::{self, BranchSelection, InteractionSettings};
use serde::Serialize;
use tracing::{error, info};

pub enum ForestOutcome<'a> {
    /// Nothing to draw, or nowhere to draw it.
    Skipped,
    /// The commit graph was empty; only the placeholder text was drawn.
    Placeholder,
    Drawn(ForestLayout<'a>),
}

impl<'a> ForestOutcome<'a> {
    pub fn layout(&self) -> Option<&ForestLayout<'a>> {
        match self {
            ForestOutcome::Drawn(layout) => Some(layout),
            _ => None,
        }
    }
}

/// Hover and click content for one drawn commit, indexed like `data-commit`.
#[derive(Debug, Serialize)]
pub struct CommitPopup {
    pub tooltip: String,
    pub details: String,
}

/// Everything the page script needs to make the forest interactive.
#[derive(Debug, Serialize)]
pub struct ForestScript {
    pub settings: InteractionSettings,
    pub commits: Vec<CommitPopup>,
}

impl ForestScript {
    pub fn from_layout(layout: &ForestLayout, messages: &Messages) -> Self {
        let commits = layout
            .commits
            .iter()
            .map(|pc| CommitPopup {
                tooltip: view::tooltip_html(pc.commit, &pc.timestamp, messages),
                details: view::details_html(pc.commit, &pc.timestamp, messages),
            })
            .collect();
        ForestScript {
            settings: InteractionSettings::default(),
            commits,
        }
    }
}

/// Lays out the branch graph and draws it into the forest element.
pub fn init_commit_forest<'a>(
    page: &mut ReportPage,
    graph: Option<&'a BranchGraphBundle>,
    options: ForestOptions,
    messages: &Messages,
) -> ForestOutcome<'a> {
    let Some((graph, branches)) = graph.and_then(|g| g.branches.as_deref().map(|b| (g, b))) else {
        info!("No branch data available for forest chart");
        return ForestOutcome::Skipped;
    };

    if !page.has(ElementId::CommitForest) {
        error!("Forest SVG element not found");
        return ForestOutcome::Skipped;
    }

    info!(
        branches = branches.len(),
        commits = graph.commit_graph.len(),
        "Initializing commit forest"
    );

    let layout = ForestLayout::from_graph(&graph.commit_graph, branches, options);
    if layout.commits.is_empty() {
        page.set_markup(
            ElementId::CommitForest,
            svg::placeholder_markup(options.width, options.height, messages.no_commit_data),
        );
        return ForestOutcome::Placeholder;
    }

    page.set_markup(
        ElementId::CommitForest,
        svg::forest_markup(&layout, &BranchSelection::All),
    );
    ForestOutcome::Drawn(layout)
}
