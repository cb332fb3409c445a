use analyst_console::AnalysisError;
use protocol::HealthStatus;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum HealthView {
    #[default]
    Checking,
    Healthy,
    Degraded(String),
    Unreachable,
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) base_url: String,
    pub(crate) health: HealthView,
    pub(crate) input: String,
    pub(crate) result_scroll: usize,
    pub(crate) result_max_scroll: usize,
    pub(crate) result_total_lines: usize,
    pub(crate) result_view_height: u16,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(base_url: String) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub(crate) fn set_health(&mut self, health: Result<HealthStatus, AnalysisError>) {
        self.health = match health {
            Ok(status) if status.is_healthy() => HealthView::Healthy,
            Ok(status) => HealthView::Degraded(status.status),
            Err(_) => HealthView::Unreachable,
        };
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.input.push_str(&normalized);
    }

    pub(crate) fn pop_char(&mut self) {
        self.input.pop();
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
    }

    pub(crate) fn set_result_metrics(&mut self, total_lines: usize, view_height: u16) {
        let total_lines = total_lines.max(1);
        self.result_total_lines = total_lines;
        self.result_view_height = view_height;
        self.result_max_scroll = total_lines.saturating_sub(view_height as usize);
        if self.result_scroll > self.result_max_scroll {
            self.result_scroll = self.result_max_scroll;
        }
    }

    pub(crate) fn scroll_down(&mut self, lines: usize) {
        self.result_scroll = (self.result_scroll + lines).min(self.result_max_scroll);
    }

    pub(crate) fn scroll_up(&mut self, lines: usize) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.result_scroll = 0;
    }

    pub(crate) fn page_size(&self) -> usize {
        let height = self.result_view_height.max(1) as usize;
        height.saturating_sub(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn pasted_line_endings_are_normalized() {
        let mut app = AppState::default();
        app.push_text("Dear customer,\r\nyour account\ris locked");
        assert_eq!(app.input, "Dear customer,\nyour account\nis locked");
        app.pop_char();
        assert!(app.input.ends_with("locke"));
    }

    #[test]
    fn scroll_is_bounded_by_metrics() {
        let mut app = AppState::default();
        app.set_result_metrics(30, 10);
        app.scroll_down(100);
        assert_eq!(app.result_scroll, 20);
        app.set_result_metrics(12, 10);
        assert_eq!(app.result_scroll, 2);
        app.scroll_up(5);
        assert_eq!(app.result_scroll, 0);
        assert_eq!(app.page_size(), 9);
    }

    #[test]
    fn health_check_outcomes() {
        let mut app = AppState::default();
        assert_eq!(app.health, HealthView::Checking);
        app.set_health(Ok(HealthStatus {
            status: "healthy".to_string(),
        }));
        assert_eq!(app.health, HealthView::Healthy);
        app.set_health(Ok(HealthStatus {
            status: "loading".to_string(),
        }));
        assert_eq!(app.health, HealthView::Degraded("loading".to_string()));
        app.set_health(Err(AnalysisError::NetworkFailure("refused".to_string())));
        assert_eq!(app.health, HealthView::Unreachable);
        app.set_health(Ok(HealthStatus {
            status: "healthy".to_string(),
        }));
        app.set_health(Err(AnalysisError::Timeout(Duration::from_secs(30))));
        assert_eq!(app.health, HealthView::Unreachable);
    }
}
