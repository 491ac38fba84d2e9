//! Typed model of the report document.
//!
//! Every component looks up its target by [`ElementId`] and skips its work when
//! the element is not part of the page.

use crate::charts::ChartConfig;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    AuthorsChart,
    TimelineChart,
    HourlyChart,
    DailyChart,
    FilesChart,
    CommitForest,
    AiAnalysisContent,
    AiAnalysisIcon,
    AiAnalysisData,
    KeyInsights,
    CommitInfo,
    CommitDetails,
    ZoomIn,
    ZoomOut,
    ResetView,
    BranchFilter,
}

impl ElementId {
    pub const ALL: [ElementId; 16] = [
        ElementId::AuthorsChart,
        ElementId::TimelineChart,
        ElementId::HourlyChart,
        ElementId::DailyChart,
        ElementId::FilesChart,
        ElementId::CommitForest,
        ElementId::AiAnalysisContent,
        ElementId::AiAnalysisIcon,
        ElementId::AiAnalysisData,
        ElementId::KeyInsights,
        ElementId::CommitInfo,
        ElementId::CommitDetails,
        ElementId::ZoomIn,
        ElementId::ZoomOut,
        ElementId::ResetView,
        ElementId::BranchFilter,
    ];

    /// The DOM id the element carries in the written page.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::AuthorsChart => "authorsChart",
            ElementId::TimelineChart => "timelineChart",
            ElementId::HourlyChart => "hourlyChart",
            ElementId::DailyChart => "dailyChart",
            ElementId::FilesChart => "filesChart",
            ElementId::CommitForest => "commitForest",
            ElementId::AiAnalysisContent => "aiAnalysis-content",
            ElementId::AiAnalysisIcon => "aiAnalysis-icon",
            ElementId::AiAnalysisData => "aiAnalysisData",
            ElementId::KeyInsights => "keyInsights",
            ElementId::CommitInfo => "commitInfo",
            ElementId::CommitDetails => "commitDetails",
            ElementId::ZoomIn => "zoomIn",
            ElementId::ZoomOut => "zoomOut",
            ElementId::ResetView => "resetView",
            ElementId::BranchFilter => "branchFilter",
        }
    }

    fn empty_element(self) -> Element {
        match self {
            ElementId::AuthorsChart
            | ElementId::TimelineChart
            | ElementId::HourlyChart
            | ElementId::DailyChart
            | ElementId::FilesChart => Element::Canvas(None),
            ElementId::CommitForest => Element::Svg(None),
            ElementId::ZoomIn
            | ElementId::ZoomOut
            | ElementId::ResetView
            | ElementId::BranchFilter => Element::Control,
            _ => Element::Container(None),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Element {
    /// A `<canvas>` that receives at most one chart.
    Canvas(Option<ChartConfig>),
    /// An `<svg>` whose markup is produced in Rust.
    Svg(Option<String>),
    /// A block element with generated inner HTML.
    Container(Option<String>),
    /// A button or select the page script attaches listeners to.
    Control,
}

impl Element {
    fn is_empty(&self) -> bool {
        match self {
            Element::Canvas(chart) => chart.is_none(),
            Element::Svg(markup) | Element::Container(markup) => markup.is_none(),
            Element::Control => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportPage {
    elements: BTreeMap<ElementId, Element>,
}

impl ReportPage {
    /// A page carrying every element the report knows about.
    pub fn standard() -> Self {
        Self::with_elements(&ElementId::ALL)
    }

    pub fn with_elements(ids: &[ElementId]) -> Self {
        let elements = ids.iter().map(|id| (*id, id.empty_element())).collect();
        ReportPage { elements }
    }

    /// Remove elements, e.g. for sections left out of the report.
    pub fn without(mut self, ids: &[ElementId]) -> Self {
        for id in ids {
            self.elements.remove(id);
        }
        self
    }

    pub fn has(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// True when nothing has been drawn into any element yet.
    pub fn is_pristine(&self) -> bool {
        self.elements.values().all(Element::is_empty)
    }

    pub fn chart(&self, id: ElementId) -> Option<&ChartConfig> {
        match self.elements.get(&id) {
            Some(Element::Canvas(chart)) => chart.as_ref(),
            _ => None,
        }
    }

    /// Binds a chart to a canvas. Returns false when no such canvas exists.
    pub fn set_chart(&mut self, id: ElementId, chart: ChartConfig) -> bool {
        match self.elements.get_mut(&id) {
            Some(Element::Canvas(slot)) => {
                *slot = Some(chart);
                true
            }
            _ => false,
        }
    }

    pub fn charts(&self) -> impl Iterator<Item = (ElementId, &ChartConfig)> {
        self.elements.iter().filter_map(|(id, el)| match el {
            Element::Canvas(Some(chart)) => Some((*id, chart)),
            _ => None,
        })
    }

    pub fn markup(&self, id: ElementId) -> Option<&str> {
        match self.elements.get(&id) {
            Some(Element::Svg(markup) | Element::Container(markup)) => markup.as_deref(),
            _ => None,
        }
    }

    /// Replaces the inner markup of an svg or container element.
    pub fn set_markup(&mut self, id: ElementId, markup: String) -> bool {
        match self.elements.get_mut(&id) {
            Some(Element::Svg(slot) | Element::Container(slot)) => {
                *slot = Some(markup);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_page_has_every_element() {
        let page = ReportPage::standard();
        for id in ElementId::ALL {
            assert!(page.has(id), "missing {}", id.as_str());
        }
        assert!(page.is_pristine());
    }

    #[test]
    fn test_without_removes_elements() {
        let page = ReportPage::standard().without(&[ElementId::FilesChart]);
        assert!(!page.has(ElementId::FilesChart));
        assert!(page.has(ElementId::AuthorsChart));
    }

    #[test]
    fn test_markup_only_lands_in_markup_elements() {
        let mut page = ReportPage::standard();
        assert!(!page.set_markup(ElementId::AuthorsChart, "<p/>".into()));
        assert!(page.set_markup(ElementId::KeyInsights, "<p/>".into()));
        assert_eq!(page.markup(ElementId::KeyInsights), Some("<p/>"));
        assert!(!page.is_pristine());
    }
}
