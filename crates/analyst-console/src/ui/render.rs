use analyst_console::{present_state, AnalysisController, StateView};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph};

use super::app::{AppState, HealthView};
use super::format::{format_elapsed, format_result_panel};
use super::text::{sanitize_text_for_tui, wrap_text_lines};
use super::theme::{Theme, ValueStyle};

const INPUT_HEIGHT: u16 = 8;

pub(crate) fn draw_ui(
    frame: &mut ratatui::Frame,
    app: &mut AppState,
    controller: &AnalysisController,
) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], &theme, app);
    draw_input(frame, chunks[1], &theme, app, controller);
    draw_result(frame, chunks[2], &theme, app, controller);
    draw_footer(frame, chunks[3], &theme, app, controller);
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, theme: &Theme, app: &AppState) {
    let (health, health_style) = match &app.health {
        HealthView::Checking => ("checking".to_string(), theme.value_style(ValueStyle::Dim)),
        HealthView::Healthy => ("healthy".to_string(), theme.value_style(ValueStyle::Important)),
        HealthView::Degraded(status) => (sanitize_text_for_tui(status), theme.warn_style()),
        HealthView::Unreachable => ("unreachable".to_string(), theme.error_style()),
    };
    let line = Line::from(vec![
        Span::styled("Service: ", theme.key_style()),
        Span::styled(app.base_url.clone(), theme.value_style(ValueStyle::Important)),
        Span::styled("  Health: ", theme.key_style()),
        Span::styled(health, health_style),
    ]);
    let header = Paragraph::new(line).block(theme.block("TrustStep Fraud Analysis"));
    frame.render_widget(header, area);
}

fn draw_input(
    frame: &mut ratatui::Frame,
    area: Rect,
    theme: &Theme,
    app: &AppState,
    controller: &AnalysisController,
) {
    let block = theme.block("Message or transaction details");
    let inner = block.inner(area);
    let text = if app.input.is_empty() {
        Text::styled(
            "Paste suspicious message here...",
            theme.value_style(ValueStyle::Dim),
        )
    } else {
        let mut wrapped = wrap_text_lines(
            &sanitize_text_for_tui(&app.input),
            inner.width.max(1) as usize,
        );
        let visible = inner.height.max(1) as usize;
        if wrapped.len() > visible {
            wrapped.drain(..wrapped.len() - visible);
        }
        let style = if controller.current_state().is_pending() {
            theme.value_style(ValueStyle::Dim)
        } else {
            theme.value_style(ValueStyle::Normal)
        };
        Text::styled(wrapped.join("\n"), style)
    };
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_result(
    frame: &mut ratatui::Frame,
    area: Rect,
    theme: &Theme,
    app: &mut AppState,
    controller: &AnalysisController,
) {
    frame.render_widget(Clear, area);
    match present_state(controller.current_state()) {
        StateView::Empty => {
            let widget = Paragraph::new(Line::styled(
                "no analysis yet",
                theme.value_style(ValueStyle::Dim),
            ))
            .block(theme.block("Results"));
            frame.render_widget(widget, area);
        }
        StateView::Analyzing => {
            let elapsed = controller
                .pending_elapsed()
                .map(format_elapsed)
                .unwrap_or_default();
            let widget = Paragraph::new(Line::from(vec![
                Span::styled("Analyzing... ", theme.warn_style()),
                Span::styled(elapsed, theme.value_style(ValueStyle::Dim)),
            ]))
            .block(theme.block("Results"));
            frame.render_widget(widget, area);
        }
        StateView::Failed { notice } => {
            let widget = Paragraph::new(Line::styled(notice, theme.error_style()))
                .block(theme.block("Status"));
            frame.render_widget(widget, area);
        }
        StateView::Result(panel) => {
            let block = theme.severity_block("Results", panel.severity);
            let inner = block.inner(area);
            let lines = format_result_panel(theme, &panel, inner.width);
            app.set_result_metrics(lines.len(), inner.height);
            let widget = Paragraph::new(Text::from(lines))
                .block(block)
                .scroll((app.result_scroll as u16, 0));
            frame.render_widget(widget, area);
        }
    }
}

fn draw_footer(
    frame: &mut ratatui::Frame,
    area: Rect,
    theme: &Theme,
    app: &AppState,
    controller: &AnalysisController,
) {
    let analyze_style = if controller.can_submit(&app.input) {
        theme.accent_style()
    } else {
        theme.value_style(ValueStyle::Dim)
    };
    let analyze_label = if controller.current_state().is_pending() {
        "Enter=analyzing...  "
    } else {
        "Enter=analyze  "
    };
    let mut spans = vec![
        Span::styled(analyze_label, analyze_style),
        Span::styled(
            "Alt+Enter=newline  Ctrl+U=clear  Ctrl+L=reset  PgUp/PgDn=scroll  Esc=quit  ",
            theme.help_style(),
        ),
    ];
    if app.confirm_quit {
        spans.push(Span::styled(
            "press Esc again to quit  ",
            theme.warn_style(),
        ));
    }
    let footer = Paragraph::new(Line::from(spans)).block(theme.block("Controls"));
    frame.render_widget(footer, area);
}
