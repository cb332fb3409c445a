use analyst_console::ResultPanel;
use ratatui::text::{Line, Span};
use std::time::Duration;

use super::text::{display_width, sanitize_text_for_tui, wrap_text_lines};
use super::theme::{Theme, ValueStyle};

const BULLET: &str = "  • ";

/// Pre-wrapped lines of the result panel, so the caller knows the total height.
pub(super) fn format_result_panel(
    theme: &Theme,
    panel: &ResultPanel,
    width: u16,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("Risk Level: ", theme.key_style()),
        Span::styled(
            sanitize_text_for_tui(&panel.level_label),
            theme.severity_style(panel.severity),
        ),
    ]));
    lines.extend(kv_lines(
        theme,
        "Risk Score",
        panel.score_label.clone(),
        ValueStyle::Important,
        width,
    ));
    if let Some(confidence) = &panel.confidence_label {
        lines.extend(kv_lines(
            theme,
            "Confidence",
            confidence.clone(),
            ValueStyle::Normal,
            width,
        ));
    }

    for section in &panel.sections {
        lines.push(Line::default());
        lines.push(Line::styled(format!("{}:", section.title), theme.accent_style()));
        let item_width = (width.max(1) as usize)
            .saturating_sub(display_width(BULLET))
            .max(1);
        for item in &section.items {
            let wrapped = wrap_text_lines(&sanitize_text_for_tui(item), item_width);
            for (idx, segment) in wrapped.into_iter().enumerate() {
                let prefix = if idx == 0 {
                    BULLET.to_string()
                } else {
                    " ".repeat(display_width(BULLET))
                };
                lines.push(Line::from(vec![
                    Span::styled(prefix, theme.key_style()),
                    Span::styled(segment, theme.value_style(ValueStyle::Normal)),
                ]));
            }
        }
    }

    if !panel.notes.is_empty() {
        lines.push(Line::default());
    }
    for note in &panel.notes {
        lines.extend(kv_lines(
            theme,
            note.label,
            note.text.clone(),
            ValueStyle::Dim,
            width,
        ));
    }
    lines
}

pub(super) fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}

fn kv_lines(
    theme: &Theme,
    key: &str,
    value: String,
    level: ValueStyle,
    width: u16,
) -> Vec<Line<'static>> {
    let value = sanitize_text_for_tui(&value);
    let key_label = format!("{key}: ");
    let key_width = display_width(&key_label);
    let value_width = (width.max(1) as usize).saturating_sub(key_width).max(1);
    let indent = " ".repeat(key_width);
    wrap_text_lines(&value, value_width)
        .into_iter()
        .enumerate()
        .map(|(idx, segment)| {
            let head = if idx == 0 {
                key_label.clone()
            } else {
                indent.clone()
            };
            Line::from(vec![
                Span::styled(head, theme.key_style()),
                Span::styled(segment, theme.value_style(level)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{AnalysisResult, RiskLevel};

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn panel() -> ResultPanel {
        ResultPanel::from_result(&AnalysisResult {
            risk_level: RiskLevel::Danger,
            risk_score: 0.95,
            detected_patterns: vec!["urgency language".to_string()],
            recommendations: vec!["Do not respond".to_string(), "Report as phishing".to_string()],
            confidence: None,
            ml_reasoning: Some("ML model detected 1 fraud indicators".to_string()),
            llm_reasoning: None,
        })
    }

    #[test]
    fn panel_lines_follow_presentation_order() {
        let theme = Theme::dark();
        let lines: Vec<String> = format_result_panel(&theme, &panel(), 80)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(lines[0], "Risk Level: DANGER");
        assert_eq!(lines[1], "Risk Score: 95.0%");
        let patterns = lines.iter().position(|l| l == "Detected Patterns:").unwrap();
        let recs = lines.iter().position(|l| l == "Recommendations:").unwrap();
        assert!(patterns < recs);
        assert_eq!(lines[recs + 1], "  • Do not respond");
        assert_eq!(lines[recs + 2], "  • Report as phishing");
        assert!(lines.last().unwrap().starts_with("ML reasoning: "));
    }

    #[test]
    fn danger_level_uses_high_severity_color() {
        let theme = Theme::dark();
        let lines = format_result_panel(&theme, &panel(), 80);
        assert_eq!(
            lines[0].spans[1].style,
            theme.severity_style(analyst_console::Severity::High)
        );
    }

    #[test]
    fn narrow_width_wraps_items_with_indent() {
        let theme = Theme::dark();
        let lines: Vec<String> = format_result_panel(&theme, &panel(), 12)
            .iter()
            .map(line_text)
            .collect();
        assert!(lines.iter().any(|l| l == "  • urgency "));
        assert!(lines.iter().any(|l| l == "    language"));
    }

    #[test]
    fn service_escape_sequences_are_not_rendered() {
        let theme = Theme::dark();
        let panel = ResultPanel::from_result(&AnalysisResult {
            risk_level: RiskLevel::Warning,
            risk_score: 0.4,
            detected_patterns: vec!["\u{1b}[31mlink shortener\u{1b}[0m".to_string()],
            recommendations: Vec::new(),
            confidence: None,
            ml_reasoning: None,
            llm_reasoning: None,
        });
        let lines: Vec<String> = format_result_panel(&theme, &panel, 80)
            .iter()
            .map(line_text)
            .collect();
        assert!(lines.iter().any(|l| l == "  • link shortener"));
        assert!(lines.iter().all(|l| !l.contains("[31m")));
    }

    #[test]
    fn elapsed_has_one_decimal() {
        assert_eq!(format_elapsed(Duration::from_millis(2340)), "2.3s");
    }
}
