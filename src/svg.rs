use crate::curve::{self, fmt, SvgPathData};
use crate::layout::{ForestLayout, FOREST_MARGIN};
use crate::view::{html_escape, BranchSelection};

/// Inner markup of the forest `<svg>`: lanes, labels, commits and the time axis.
///
/// The outer `forest-viewport` group is what the page script zooms and pans.
pub fn forest_markup(layout: &ForestLayout, selection: &BranchSelection) -> String {
    let mut svg = String::from("<g class=\"forest-viewport\">\n");
    svg.push_str(&format!(
        r#"<g transform="translate({},{})">"#,
        fmt(layout.margin.left),
        fmt(layout.margin.top)
    ));
    svg.push('\n');

    for lane in &layout.lanes {
        let mut d = SvgPathData::default();
        curve::monotone_x(&mut d, &lane.points);
        svg.push_str(&format!(
            r#"<path class="branch-line" data-branch="{branch}" data-lane="{index}" d="{d}" stroke="{color}" stroke-width="3" fill="none" opacity="{opacity}"/>"#,
            branch = html_escape(&lane.name),
            index = lane.index,
            d = d.into_string(),
            color = lane.color,
            opacity = selection.line_opacity(&lane.name),
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text class="branch-label" data-branch="{branch}" x="-10" y="{y}" dy="0.35em" text-anchor="end" font-size="12" font-weight="bold" fill="{color}" opacity="{opacity}">{branch}</text>"#,
            branch = html_escape(&lane.name),
            y = fmt(lane.y),
            color = lane.color,
            opacity = selection.label_opacity(&lane.name),
        ));
        svg.push('\n');
    }

    for (i, pc) in layout.commits.iter().enumerate() {
        svg.push_str(&format!(
            r#"<circle class="commit-node" data-branch="{branch}" data-commit="{i}" cx="{x}" cy="{y}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="2" opacity="{opacity}"/>"#,
            branch = html_escape(&pc.commit.branch),
            x = fmt(pc.x),
            y = fmt(pc.y),
            r = fmt(pc.radius),
            fill = pc.fill(),
            stroke = pc.stroke(),
            opacity = selection.node_opacity(&pc.commit.branch),
        ));
        svg.push('\n');
    }

    svg.push_str(&axis_markup(layout));
    svg.push_str("</g>\n</g>\n");
    svg
}

fn axis_markup(layout: &ForestLayout) -> String {
    let mut axis = format!(
        r#"<g class="x-axis" transform="translate(0,{})" font-size="10" fill="none">"#,
        fmt(layout.axis_y)
    );
    axis.push('\n');
    axis.push_str(&format!(
        r#"<path class="domain" stroke="currentColor" d="M0,6V0H{}V6"/>"#,
        fmt(layout.inner_width)
    ));
    axis.push('\n');
    for tick in &layout.ticks {
        axis.push_str(&format!(
            r#"<g class="tick" transform="translate({},0)"><line stroke="currentColor" y2="6"/><text fill="currentColor" y="9" dx="-.8em" dy=".15em" text-anchor="end" transform="rotate(-45)">{}</text></g>"#,
            fmt(tick.x),
            html_escape(&tick.label)
        ));
        axis.push('\n');
    }
    axis.push_str("</g>\n");
    axis
}

/// Shown instead of the forest when there are no commits to draw.
pub fn placeholder_markup(width: f32, height: f32, message: &str) -> String {
    let inner_width = width - FOREST_MARGIN.left - FOREST_MARGIN.right;
    let inner_height = height - FOREST_MARGIN.top - FOREST_MARGIN.bottom;
    format!(
        "<g transform=\"translate({},{})\">\n\
         <text class=\"forest-placeholder\" x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"16\" fill=\"#666\">{}</text>\n\
         </g>\n",
        fmt(FOREST_MARGIN.left),
        fmt(FOREST_MARGIN.top),
        fmt(inner_width / 2.0),
        fmt(inner_height / 2.0),
        html_escape(message)
    )
}
