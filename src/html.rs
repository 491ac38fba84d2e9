//! Writes the report page: stat cards, chart canvases, the commit forest and
//! the analysis panel, with chart configs and forest popups embedded as JSON.

use crate::charts::basename;
use crate::data::StatsBundle;
use crate::forest::ForestScript;
use crate::messages::Messages;
use crate::page::{ElementId, ReportPage};
use crate::panel::AnalysisPanel;
use crate::view::{html_escape, ALL_BRANCHES};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js";
const STYLE: &str = include_str!("../assets/report.css");
const SCRIPT: &str = include_str!("../assets/report.js");

/// Everything the page needs besides the element contents held by the page.
pub struct ReportDocument<'a> {
    pub messages: &'a Messages,
    pub page: &'a ReportPage,
    pub project: Option<&'a str>,
    pub generated_at: String,
    pub stats: Option<&'a StatsBundle>,
    pub panel: &'a AnalysisPanel,
    pub forest: Option<&'a ForestScript>,
    pub branch_names: &'a [String],
    pub forest_size: (f32, f32),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageText<'a> {
    chart_library_missing: &'a str,
}

/// JSON safe to place inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> io::Result<String> {
    let json = serde_json::to_string(value).map_err(io::Error::other)?;
    Ok(json.replace("</", "<\\/"))
}

pub fn write<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    let msg = doc.messages;
    let page = doc.page;

    let charts: BTreeMap<&str, _> = page
        .charts()
        .map(|(id, chart)| (id.as_str(), chart))
        .collect();
    let charts_json = script_json(&charts)?;
    let forest_json = match doc.forest {
        Some(script) => script_json(script)?,
        None => "null".to_string(),
    };
    let text_json = script_json(&PageText {
        chart_library_missing: msg.chart_library_missing,
    })?;

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{chart_js}"></script>
    <style>
{style}
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <h1>{title}</h1>
        <div class="subtitle">
"#,
        lang = msg.html_lang,
        title = html_escape(msg.report_title),
        chart_js = CHART_JS,
        style = STYLE,
    )?;
    if let Some(project) = doc.project {
        writeln!(writer, "            <h2>{}</h2>", html_escape(project))?;
    }
    writeln!(
        writer,
        "            <p>{}: {}</p>\n        </div>\n    </div>",
        msg.generated_on,
        html_escape(&doc.generated_at)
    )?;

    write_summary(writer, doc)?;
    write_charts(writer, doc)?;
    write_files(writer, doc)?;
    write_forest(writer, doc)?;
    write_analysis(writer, doc)?;

    write!(
        writer,
        r#"</div>
<script>
const reportCharts = {charts_json};
const forestData = {forest_json};
const reportText = {text_json};
</script>
<script>
{script}
</script>
</body>
</html>
"#,
        script = SCRIPT,
    )?;
    Ok(())
}

fn write_summary<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    let Some(summary) = doc.stats.and_then(|s| s.summary.as_ref()) else {
        return Ok(());
    };
    let msg = doc.messages;
    write!(
        writer,
        r#"    <div class="summary">
        <div class="stat-card"><h3>{}</h3><div class="stat-number">{}</div></div>
        <div class="stat-card"><h3>{}</h3><div class="stat-number">{}</div></div>
        <div class="stat-card"><h3>{}</h3><div class="stat-number">{}</div></div>
        <div class="stat-card"><h3>{}</h3><div class="stat-text">{} {} {}</div></div>
    </div>
"#,
        msg.total_commits,
        summary.total_commits,
        msg.contributors,
        summary.contributors,
        msg.active_days,
        summary.active_days,
        msg.active_period,
        html_escape(&summary.first_commit),
        msg.period_to,
        html_escape(&summary.last_commit),
    )
}

fn write_canvas<W: Write>(writer: &mut W, id: ElementId, heading: &str) -> io::Result<()> {
    write!(
        writer,
        r#"        <div class="chart-container">
            <h3>{heading}</h3>
            <canvas id="{id}"></canvas>
"#,
        id = id.as_str(),
    )
}

fn write_charts<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    let msg = doc.messages;
    let page = doc.page;
    let grid = [
        (ElementId::AuthorsChart, msg.top_contributors),
        (ElementId::TimelineChart, msg.commit_timeline),
        (ElementId::HourlyChart, msg.hourly_activity),
        (ElementId::DailyChart, msg.daily_activity),
    ];
    if !grid.iter().any(|(id, _)| page.has(*id)) {
        return Ok(());
    }

    writeln!(writer, "    <div class=\"charts-grid\">")?;
    for (id, heading) in grid {
        if !page.has(id) {
            continue;
        }
        write_canvas(writer, id, heading)?;
        if id == ElementId::AuthorsChart {
            write_authors_list(writer, doc)?;
        }
        writeln!(writer, "        </div>")?;
    }
    writeln!(writer, "    </div>")
}

fn write_authors_list<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    let authors = doc
        .stats
        .and_then(|s| s.authors.as_deref())
        .unwrap_or_default();
    if authors.is_empty() {
        return Ok(());
    }
    writeln!(writer, "            <div class=\"authors-list\">")?;
    for author in authors {
        writeln!(
            writer,
            "                <div class=\"author-item\"><span class=\"author-name\">{}</span>\
             <span class=\"author-stats\">{} {} ({:.1}%) \
             <span class=\"author-changes\">+{} -{}</span></span></div>",
            html_escape(&author.name),
            author.commit_count,
            doc.messages.commits,
            author.percentage,
            author.additions,
            author.deletions,
        )?;
    }
    writeln!(writer, "            </div>")
}

fn write_files<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    if !doc.page.has(ElementId::FilesChart) {
        return Ok(());
    }
    write!(
        writer,
        r#"    <div class="files-section">
        <h3>{heading}</h3>
        <div class="chart-container files-chart"><canvas id="{id}"></canvas></div>
"#,
        heading = doc.messages.most_modified_files,
        id = ElementId::FilesChart.as_str(),
    )?;
    let files = doc
        .stats
        .and_then(|s| s.files.as_deref())
        .unwrap_or_default();
    if !files.is_empty() {
        writeln!(writer, "        <div class=\"files-list\">")?;
        for file in files {
            writeln!(
                writer,
                "            <div class=\"file-item\"><span class=\"file-name\" title=\"{}\">{}</span>\
                 <span class=\"file-count\">{}</span></div>",
                html_escape(&file.name),
                html_escape(basename(&file.name)),
                file.count,
            )?;
        }
        writeln!(writer, "        </div>")?;
    }
    writeln!(writer, "    </div>")
}

fn write_forest<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    let page = doc.page;
    if !page.has(ElementId::CommitForest) {
        return Ok(());
    }
    let msg = doc.messages;
    let (width, height) = doc.forest_size;

    writeln!(writer, "    <div class=\"forest-section\">\n        <h3>{}</h3>", msg.commit_forest)?;
    writeln!(writer, "        <div class=\"forest-controls\">")?;
    for (id, label) in [
        (ElementId::ZoomIn, msg.zoom_in),
        (ElementId::ZoomOut, msg.zoom_out),
        (ElementId::ResetView, msg.reset_view),
    ] {
        if page.has(id) {
            writeln!(writer, "            <button id=\"{}\">{}</button>", id.as_str(), label)?;
        }
    }
    if page.has(ElementId::BranchFilter) {
        writeln!(
            writer,
            "            <select id=\"{}\">\n                <option value=\"{}\">{}</option>",
            ElementId::BranchFilter.as_str(),
            ALL_BRANCHES,
            msg.all_branches
        )?;
        for name in doc.branch_names {
            let name = html_escape(name);
            writeln!(writer, "                <option value=\"{name}\">{name}</option>")?;
        }
        writeln!(writer, "            </select>")?;
    }
    writeln!(writer, "        </div>")?;

    writeln!(
        writer,
        "        <svg id=\"{}\" viewBox=\"0 0 {width} {height}\" preserveAspectRatio=\"xMidYMid meet\">{}</svg>",
        ElementId::CommitForest.as_str(),
        page.markup(ElementId::CommitForest).unwrap_or_default(),
    )?;

    if page.has(ElementId::CommitInfo) {
        writeln!(
            writer,
            "        <div id=\"{}\" class=\"commit-info\"><div id=\"{}\"></div></div>",
            ElementId::CommitInfo.as_str(),
            ElementId::CommitDetails.as_str(),
        )?;
    }
    writeln!(writer, "    </div>")
}

fn write_analysis<W: Write>(writer: &mut W, doc: &ReportDocument) -> io::Result<()> {
    let page = doc.page;
    if !page.has(ElementId::AiAnalysisContent) {
        return Ok(());
    }
    let msg = doc.messages;
    let panel = doc.panel;
    let state = if panel.is_expanded() { " expanded" } else { "" };

    write!(
        writer,
        r#"    <div class="ai-analysis">
        <div class="ai-header" onclick="toggleAIAnalysis()">
            <h3>🤖 {title}</h3>
            <span id="{icon_id}" class="ai-toggle-icon{state}">{icon}</span>
        </div>
"#,
        title = msg.ai_analysis_title,
        icon_id = ElementId::AiAnalysisIcon.as_str(),
        icon = panel.icon(),
    )?;

    if let Some(cards) = page.markup(ElementId::KeyInsights) {
        write!(
            writer,
            r#"        <h4>{heading}</h4>
        <div id="{id}" class="key-insights">{cards}</div>
"#,
            heading = msg.key_insights,
            id = ElementId::KeyInsights.as_str(),
        )?;
    }

    writeln!(
        writer,
        "        <div id=\"{}\" class=\"ai-content{state}\">{}</div>",
        ElementId::AiAnalysisContent.as_str(),
        page.markup(ElementId::AiAnalysisContent).unwrap_or_default(),
    )?;

    if let (true, Some(text)) = (page.has(ElementId::AiAnalysisData), panel.text()) {
        writeln!(
            writer,
            "        <div id=\"{}\" hidden>{}</div>",
            ElementId::AiAnalysisData.as_str(),
            html_escape(text),
        )?;
    }
    writeln!(writer, "    </div>")
}
