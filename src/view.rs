//! Interaction of the commit forest: zoom limits, branch filter opacities, and
//! the text shown on hover and click.

use crate::data::CommitNode;
use crate::messages::Messages;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MIN_SCALE: f32 = 0.5;
pub const MAX_SCALE: f32 = 3.0;
pub const ZOOM_STEP: f32 = 1.5;

/// Opacities with no branch selected.
pub const LINE_OPACITY: f32 = 0.7;
pub const NODE_OPACITY: f32 = 1.0;
pub const LABEL_OPACITY: f32 = 1.0;

/// Opacities for elements outside the selected branch.
pub const DIMMED_LINE_OPACITY: f32 = 0.1;
pub const DIMMED_NODE_OPACITY: f32 = 0.1;
pub const DIMMED_LABEL_OPACITY: f32 = 0.3;

/// Value of the filter option that shows every branch.
pub const ALL_BRANCHES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BranchSelection {
    #[default]
    All,
    Branch(String),
}

impl BranchSelection {
    fn pick(&self, branch: &str, normal: f32, dimmed: f32) -> f32 {
        match self {
            BranchSelection::All => normal,
            BranchSelection::Branch(selected) if selected == branch => 1.0,
            BranchSelection::Branch(_) => dimmed,
        }
    }

    pub fn line_opacity(&self, branch: &str) -> f32 {
        self.pick(branch, LINE_OPACITY, DIMMED_LINE_OPACITY)
    }

    pub fn node_opacity(&self, branch: &str) -> f32 {
        self.pick(branch, NODE_OPACITY, DIMMED_NODE_OPACITY)
    }

    pub fn label_opacity(&self, branch: &str) -> f32 {
        self.pick(branch, LABEL_OPACITY, DIMMED_LABEL_OPACITY)
    }
}

/// Constants the page script needs to replay zoom and filtering.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionSettings {
    pub scale_extent: [f32; 2],
    pub zoom_step: f32,
    pub line_opacity: f32,
    pub node_opacity: f32,
    pub label_opacity: f32,
    pub dimmed_line_opacity: f32,
    pub dimmed_node_opacity: f32,
    pub dimmed_label_opacity: f32,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        InteractionSettings {
            scale_extent: [MIN_SCALE, MAX_SCALE],
            zoom_step: ZOOM_STEP,
            line_opacity: LINE_OPACITY,
            node_opacity: NODE_OPACITY,
            label_opacity: LABEL_OPACITY,
            dimmed_line_opacity: DIMMED_LINE_OPACITY,
            dimmed_node_opacity: DIMMED_NODE_OPACITY,
            dimmed_label_opacity: DIMMED_LABEL_OPACITY,
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Floating tooltip shown while hovering a commit.
pub fn tooltip_html(commit: &CommitNode, ts: &DateTime<Utc>, msg: &Messages) -> String {
    let message = if commit.message.is_empty() {
        &commit.short_hash
    } else {
        &commit.message
    };
    format!(
        "<div><strong>{}:</strong> {}</div>\
         <div><strong>{}:</strong> {}</div>\
         <div><strong>{}:</strong> {}</div>\
         <div><strong>{}:</strong> {}</div>",
        msg.branch,
        html_escape(&commit.branch),
        msg.author,
        html_escape(&commit.author),
        msg.time,
        format_time(ts),
        msg.message,
        html_escape(message),
    )
}

/// Persistent detail panel shown after clicking a commit.
pub fn details_html(commit: &CommitNode, ts: &DateTime<Utc>, msg: &Messages) -> String {
    let message = if commit.message.is_empty() {
        msg.no_message.to_string()
    } else {
        html_escape(&commit.message)
    };
    let mut html = format!(
        "<h4>{}</h4>\
         <p><strong>{}:</strong> {}</p>\
         <p><strong>{}:</strong> {}</p>\
         <p><strong>{}:</strong> {}</p>\
         <p><strong>{}:</strong> {}</p>\
         <p><strong>{}:</strong> {}</p>\
         <p><strong>{}:</strong> {}</p>\
         <p><strong>{}:</strong> {}</p>",
        msg.commit_details,
        msg.branch,
        html_escape(&commit.branch),
        msg.hash,
        html_escape(&commit.hash),
        msg.short_hash,
        html_escape(&commit.short_hash),
        msg.author,
        html_escape(&commit.author),
        msg.time,
        format_time(ts),
        msg.message,
        message,
        msg.merge_commit,
        if commit.is_merge { msg.yes } else { msg.no },
    );
    if !commit.parents.is_empty() {
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>",
            msg.parents,
            html_escape(&commit.parents.join(", "))
        ));
    }
    html
}
