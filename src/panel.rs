//! The collapsible AI-analysis panel and the insight cards derived next to it.

use crate::data::StatsBundle;
use crate::markdown;
use crate::messages::Messages;
use crate::page::{ElementId, ReportPage};
use crate::view::html_escape;
use tracing::debug;

const MAX_INSIGHTS: usize = 4;

const ACTIVITY_KEYWORDS: [&str; 4] = ["活跃", "频繁", "active", "frequent"];
const COLLABORATION_KEYWORDS: [&str; 4] = ["协作", "团队", "collaborat", "team"];

/// Collapsible panel whose body is rendered on first expansion only.
#[derive(Debug)]
pub struct AnalysisPanel {
    text: Option<String>,
    placeholder: String,
    expanded: bool,
    body: Option<String>,
    renders: usize,
}

impl AnalysisPanel {
    pub fn new(text: Option<String>, messages: &Messages) -> Self {
        AnalysisPanel {
            text: text.filter(|t| !t.is_empty()),
            placeholder: messages.no_analysis.to_string(),
            expanded: false,
            body: None,
            renders: 0,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn icon(&self) -> &'static str {
        if self.expanded {
            "▲"
        } else {
            "▼"
        }
    }

    /// Flips the panel; opening it renders the body unless that already happened.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        if self.expanded {
            self.render();
        }
        self.expanded
    }

    /// Opens the panel without closing it when already open.
    pub fn open(&mut self) {
        if !self.expanded {
            self.toggle();
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    fn render(&mut self) {
        if self.body.is_some() {
            return;
        }
        let inner = match &self.text {
            Some(text) if markdown::is_available() => markdown::to_html(text),
            Some(text) => markdown::preformatted(text),
            None => format!("<p>{}</p>", html_escape(&self.placeholder)),
        };
        debug!(bytes = inner.len(), "Rendered analysis panel");
        self.body = Some(format!("<div class=\"ai-analysis-rendered\">{inner}</div>"));
        self.renders += 1;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightCard {
    pub icon: &'static str,
    pub title: String,
    pub value: String,
}

impl InsightCard {
    fn to_html(&self) -> String {
        format!(
            "<div class=\"insight-card\">\
             <span class=\"insight-icon\">{}</span>\
             <span class=\"insight-title\">{}</span>\
             <span class=\"insight-value\">{}</span>\
             </div>",
            self.icon,
            html_escape(&self.title),
            html_escape(&self.value)
        )
    }
}

/// Up to four cards: top author, busiest day, then keyword-triggered cards.
pub fn extract_key_insights(
    text: &str,
    stats: Option<&StatsBundle>,
    messages: &Messages,
) -> Vec<InsightCard> {
    let mut insights = Vec::new();

    if let Some(top) = stats.and_then(|s| s.authors.as_ref()).and_then(|a| a.first()) {
        insights.push(InsightCard {
            icon: "👨‍💻",
            title: messages.insight_top_contributor.to_string(),
            value: format!("{} ({:.1}%)", top.name, top.percentage),
        });
    }

    let timeline = stats.and_then(|s| s.timeline.as_deref()).unwrap_or_default();
    if let Some(first) = timeline.first() {
        // first wins on ties
        let busiest = timeline
            .iter()
            .fold(first, |max, day| if day.count > max.count { day } else { max });
        insights.push(InsightCard {
            icon: "📈",
            title: messages.insight_busiest_day.to_string(),
            value: busiest.date.clone(),
        });
    }

    let lowered = text.to_lowercase();
    if ACTIVITY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        insights.push(InsightCard {
            icon: "⚡",
            title: messages.insight_pace.to_string(),
            value: messages.insight_pace_value.to_string(),
        });
    }
    if COLLABORATION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        insights.push(InsightCard {
            icon: "🤝",
            title: messages.insight_collaboration.to_string(),
            value: messages.insight_collaboration_value.to_string(),
        });
    }

    insights.truncate(MAX_INSIGHTS);
    insights
}

/// Writes the insight cards into `keyInsights`. Returns the number of cards,
/// or `None` when the page has no analysis data or no insights container.
pub fn populate_key_insights(
    page: &mut ReportPage,
    panel: &AnalysisPanel,
    stats: Option<&StatsBundle>,
    messages: &Messages,
) -> Option<usize> {
    if !page.has(ElementId::AiAnalysisData) || !page.has(ElementId::KeyInsights) {
        return None;
    }

    let insights = extract_key_insights(panel.text().unwrap_or_default(), stats, messages);
    let html: String = insights.iter().map(InsightCard::to_html).collect();
    page.set_markup(ElementId::KeyInsights, html);
    Some(insights.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AuthorStat, TimelinePoint};
    use crate::messages::Language;

    fn messages() -> &'static Messages {
        Messages::for_language(Language::En)
    }

    fn stats() -> StatsBundle {
        StatsBundle {
            authors: Some(vec![AuthorStat {
                name: "alice".to_string(),
                commit_count: 42,
                percentage: 61.234,
                additions: 0,
                deletions: 0,
            }]),
            timeline: Some(vec![
                TimelinePoint {
                    date: "2024-01-01".to_string(),
                    count: 3,
                },
                TimelinePoint {
                    date: "2024-01-02".to_string(),
                    count: 9,
                },
                TimelinePoint {
                    date: "2024-01-03".to_string(),
                    count: 9,
                },
            ]),
            ..StatsBundle::default()
        }
    }

    #[test]
    fn test_toggle_renders_once() {
        let mut panel = AnalysisPanel::new(Some("# Findings".to_string()), messages());
        assert_eq!(panel.icon(), "▼");

        panel.open();
        let first = panel.body().unwrap().to_string();
        panel.open();

        assert!(panel.is_expanded());
        assert_eq!(panel.render_count(), 1);
        assert_eq!(panel.body().unwrap(), first);
        assert_eq!(panel.icon(), "▲");
    }

    #[test]
    fn test_reopening_does_not_rerender() {
        let mut panel = AnalysisPanel::new(Some("text".to_string()), messages());
        assert!(panel.toggle());
        assert!(!panel.toggle());
        assert!(panel.toggle());
        assert_eq!(panel.render_count(), 1);
    }

    #[test]
    fn test_placeholder_without_text() {
        let mut panel = AnalysisPanel::new(None, messages());
        panel.toggle();
        assert_eq!(
            panel.body().unwrap(),
            "<div class=\"ai-analysis-rendered\"><p>No AI analysis available</p></div>"
        );
    }

    #[test]
    fn test_only_empty_text_counts_as_missing() {
        assert!(AnalysisPanel::new(Some(String::new()), messages()).text().is_none());
        assert_eq!(
            AnalysisPanel::new(Some("  \n".to_string()), messages()).text(),
            Some("  \n")
        );
    }

    #[test]
    fn test_insights_order_and_truncation() {
        let stats = stats();
        let cards = extract_key_insights(
            "The team is very active and collaborates frequently.",
            Some(&stats),
            messages(),
        );
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, "alice (61.2%)");
        // first of the tied maxima
        assert_eq!(cards[1].value, "2024-01-02");
        assert_eq!(cards[2].title, "Development pace");
        assert_eq!(cards[3].title, "Collaboration");
    }

    #[test]
    fn test_chinese_keywords() {
        let cards = extract_key_insights("团队协作良好", None, messages());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Collaboration");
    }

    #[test]
    fn test_no_stats_no_keywords() {
        assert!(extract_key_insights("nothing here", None, messages()).is_empty());
    }

    #[test]
    fn test_populate_requires_elements() {
        let panel = AnalysisPanel::new(Some("active".to_string()), messages());
        let stats = stats();

        let mut page = ReportPage::standard().without(&[ElementId::AiAnalysisData]);
        assert_eq!(populate_key_insights(&mut page, &panel, Some(&stats), messages()), None);
        assert!(page.is_pristine());

        let mut page = ReportPage::standard();
        assert_eq!(populate_key_insights(&mut page, &panel, Some(&stats), messages()), Some(3));
        let html = page.markup(ElementId::KeyInsights).unwrap();
        assert_eq!(html.matches("insight-card").count(), 3);
    }
}
