use analyst_console::AnalysisController;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::AppState;

/// Returns `true` when the console should exit.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    controller: &mut AnalysisController,
) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.confirm_quit {
        match key.code {
            KeyCode::Esc => return true,
            _ => app.confirm_quit = false,
        }
    }

    match key.code {
        KeyCode::Esc => app.confirm_quit = true,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => app.push_text("\n"),
        KeyCode::Enter => match controller.submit(&app.input) {
            Ok(_) => app.scroll_to_top(),
            Err(err) => {
                tracing::debug!(event = "ui.submit.inert", reason = err.kind());
            }
        },
        KeyCode::Char('u') if ctrl => app.clear_input(),
        KeyCode::Char('l') if ctrl => {
            controller.reset();
            app.scroll_to_top();
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(app.page_size()),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::Tab => app.push_text("\t"),
        KeyCode::Char(ch) if !ctrl => {
            let mut buf = [0u8; 4];
            app.push_text(ch.encode_utf8(&mut buf));
        }
        _ => {}
    }
    false
}

pub(crate) fn handle_paste(text: &str, app: &mut AppState) {
    app.confirm_quit = false;
    app.push_text(text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyst_console::{Config, RequestState};
    use analyst_console::{AnalysisError, ScoringService};
    use async_trait::async_trait;
    use protocol::{AnalysisRequest, AnalysisResult, HealthStatus};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    struct Unreachable;

    #[async_trait]
    impl ScoringService for Unreachable {
        async fn analyze(&self, _: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
            Err(AnalysisError::NetworkFailure("refused".to_string()))
        }

        async fn health(&self) -> Result<HealthStatus, AnalysisError> {
            Err(AnalysisError::NetworkFailure("refused".to_string()))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn controller() -> (AnalysisController, mpsc::Receiver<analyst_console::AnalysisEvent>) {
        let (tx, rx) = mpsc::channel(4);
        (
            AnalysisController::new(Arc::new(Unreachable), &Config::default(), tx),
            rx,
        )
    }

    #[tokio::test]
    async fn enter_with_empty_input_is_inert() {
        let (mut controller, _rx) = controller();
        let mut app = AppState::default();
        assert!(!handle_key_event(key(KeyCode::Enter), &mut app, &mut controller));
        assert_eq!(controller.current_state(), &RequestState::Idle);
    }

    #[tokio::test]
    async fn typing_then_enter_submits() {
        let (mut controller, mut rx) = controller();
        let mut app = AppState::default();
        for ch in "hi".chars() {
            handle_key_event(key(KeyCode::Char(ch)), &mut app, &mut controller);
        }
        handle_key_event(key(KeyCode::Enter), &mut app, &mut controller);
        assert_eq!(controller.current_state(), &RequestState::Pending);
        assert_eq!(app.input, "hi");

        let event = rx.recv().await.expect("event");
        controller.apply(event);
        assert!(matches!(
            controller.current_state(),
            RequestState::Failed(AnalysisError::NetworkFailure(_))
        ));
    }

    #[tokio::test]
    async fn alt_enter_inserts_newline() {
        let (mut controller, _rx) = controller();
        let mut app = AppState::default();
        app.push_text("line one");
        let alt_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT);
        handle_key_event(alt_enter, &mut app, &mut controller);
        assert_eq!(app.input, "line one\n");
        assert_eq!(controller.current_state(), &RequestState::Idle);
    }

    #[tokio::test]
    async fn escape_twice_quits() {
        let (mut controller, _rx) = controller();
        let mut app = AppState::default();
        assert!(!handle_key_event(key(KeyCode::Esc), &mut app, &mut controller));
        assert!(app.confirm_quit);
        assert!(handle_key_event(key(KeyCode::Esc), &mut app, &mut controller));
    }

    #[tokio::test]
    async fn other_key_cancels_quit() {
        let (mut controller, _rx) = controller();
        let mut app = AppState::default();
        handle_key_event(key(KeyCode::Esc), &mut app, &mut controller);
        handle_key_event(key(KeyCode::Char('x')), &mut app, &mut controller);
        assert!(!app.confirm_quit);
        assert_eq!(app.input, "x");
    }
}
