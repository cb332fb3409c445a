//! Deterministic mapping from controller state to what the operator sees.
//!
//! Nothing here can fail: every service payload that made it past the
//! boundary renders, including unknown risk levels and out-of-range scores.

use protocol::{AnalysisResult, RiskLevel};

use crate::controller::RequestState;

pub const FAILURE_NOTICE: &str = "Analysis failed. Check the connection and submit again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn from_level(level: &RiskLevel) -> Self {
        match level {
            RiskLevel::Danger => Self::High,
            RiskLevel::Warning => Self::Medium,
            RiskLevel::Safe | RiskLevel::Unrecognized(_) => Self::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub label: &'static str,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub severity: Severity,
    pub level_label: String,
    pub score_label: String,
    pub confidence_label: Option<String>,
    pub sections: Vec<Section>,
    pub notes: Vec<Note>,
}

impl ResultPanel {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let mut sections = Vec::new();
        push_section(&mut sections, "Detected Patterns", &result.detected_patterns);
        push_section(&mut sections, "Recommendations", &result.recommendations);

        let mut notes = Vec::new();
        push_note(&mut notes, "ML reasoning", result.ml_reasoning.as_deref());
        push_note(&mut notes, "LLM reasoning", result.llm_reasoning.as_deref());

        Self {
            severity: Severity::from_level(&result.risk_level),
            level_label: result.risk_level.as_str().to_uppercase(),
            score_label: format_score(result.risk_score),
            confidence_label: result.confidence.map(format_score),
            sections,
            notes,
        }
    }

    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.title == title)
    }
}

fn push_section(sections: &mut Vec<Section>, title: &'static str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    sections.push(Section {
        title,
        items: items.to_vec(),
    });
}

fn push_note(notes: &mut Vec<Note>, label: &'static str, text: Option<&str>) {
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        return;
    };
    notes.push(Note {
        label,
        text: text.to_string(),
    });
}

/// Score as a percentage with one decimal place. No clamping.
///
/// Ties round away from zero (`0.0125` is `1.3%`), unlike `{:.1}` which rounds
/// them to even.
pub fn format_score(score: f64) -> String {
    let tenths = (score * 100.0 * 10.0).round();
    format!("{:.1}%", tenths / 10.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateView {
    Empty,
    Analyzing,
    Failed { notice: &'static str },
    Result(ResultPanel),
}

impl StateView {
    pub fn panel(&self) -> Option<&ResultPanel> {
        match self {
            Self::Result(panel) => Some(panel),
            _ => None,
        }
    }
}

pub fn present_state(state: &RequestState) -> StateView {
    match state {
        RequestState::Idle => StateView::Empty,
        RequestState::Pending => StateView::Analyzing,
        RequestState::Failed(_) => StateView::Failed {
            notice: FAILURE_NOTICE,
        },
        RequestState::Success(result) => StateView::Result(ResultPanel::from_result(result)),
    }
}

/// Plain-text rendering used by headless mode.
pub fn render_plain(panel: &ResultPanel) -> String {
    let mut lines = vec![
        format!("Risk Level: {}", panel.level_label),
        format!("Risk Score: {}", panel.score_label),
    ];
    if let Some(confidence) = &panel.confidence_label {
        lines.push(format!("Confidence: {confidence}"));
    }
    for section in &panel.sections {
        lines.push(String::new());
        lines.push(format!("{}:", section.title));
        lines.extend(section.items.iter().map(|item| format!("  - {item}")));
    }
    for note in &panel.notes {
        lines.push(String::new());
        lines.push(format!("{}: {}", note.label, note.text));
    }
    lines.join("\n")
}
