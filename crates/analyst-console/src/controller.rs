use protocol::{AnalysisRequest, AnalysisResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::{AnalysisDefaults, Config};
use crate::error::AnalysisError;
use crate::service::ScoringService;

pub type RequestId = Uuid;

/// Lifecycle of the latest analysis. Only one outcome is ever kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Success(AnalysisResult),
    Failed(AnalysisError),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }
}

/// Completion of a request task, delivered back to the owner of the controller.
#[derive(Debug)]
pub struct AnalysisEvent {
    pub id: RequestId,
    pub outcome: Result<AnalysisResult, AnalysisError>,
}

struct InFlight {
    id: RequestId,
    cancel: CancellationToken,
    started_at: Instant,
}

pub struct AnalysisController {
    service: Arc<dyn ScoringService>,
    deadline: Duration,
    defaults: AnalysisDefaults,
    events: mpsc::Sender<AnalysisEvent>,
    state: RequestState,
    in_flight: Option<InFlight>,
}

impl AnalysisController {
    pub fn new(
        service: Arc<dyn ScoringService>,
        config: &Config,
        events: mpsc::Sender<AnalysisEvent>,
    ) -> Self {
        Self {
            service,
            deadline: config.service.request_timeout(),
            defaults: config.analysis.clone(),
            events,
            state: RequestState::Idle,
            in_flight: None,
        }
    }

    pub fn current_state(&self) -> &RequestState {
        &self.state
    }

    pub fn can_submit(&self, text: &str) -> bool {
        !text.is_empty() && !self.state.is_pending()
    }

    pub fn pending_elapsed(&self) -> Option<Duration> {
        self.in_flight
            .as_ref()
            .map(|in_flight| in_flight.started_at.elapsed())
    }

    /// Starts an analysis of `text`. Must be called from within a tokio runtime.
    ///
    /// Empty text and a request already in flight are rejected without touching
    /// the current state.
    pub fn submit(&mut self, text: &str) -> Result<RequestId, AnalysisError> {
        if text.is_empty() {
            tracing::debug!(event = "analysis.submit.rejected", reason = "empty_input");
            return Err(AnalysisError::EmptyInput);
        }
        if self.state.is_pending() {
            tracing::debug!(event = "analysis.submit.rejected", reason = "request_in_flight");
            return Err(AnalysisError::RequestInFlight);
        }

        let id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        let request = AnalysisRequest::new(text)
            .with_context(self.defaults.context.clone())
            .with_amount(self.defaults.amount);

        tracing::info!(
            event = "analysis.request.sent",
            request_id = %id,
            text_len = text.len(),
            deadline_ms = self.deadline.as_millis() as u64,
        );
        spawn_request(
            Arc::clone(&self.service),
            request,
            id,
            self.deadline,
            cancel.clone(),
            self.events.clone(),
        );

        self.in_flight = Some(InFlight {
            id,
            cancel,
            started_at: Instant::now(),
        });
        self.state = RequestState::Pending;
        Ok(id)
    }

    /// Settles the pending request. Returns `false` for events that no longer
    /// belong to the pending request.
    pub fn apply(&mut self, event: AnalysisEvent) -> bool {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.id == event.id);
        if !matches {
            tracing::debug!(event = "analysis.response.stale", request_id = %event.id);
            return false;
        }
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };
        let elapsed_ms = in_flight.started_at.elapsed().as_millis() as u64;

        self.state = match event.outcome {
            Ok(result) => {
                if !result.score_in_range() {
                    tracing::warn!(
                        event = "analysis.response.score_out_of_range",
                        request_id = %event.id,
                        risk_score = result.risk_score,
                    );
                }
                tracing::info!(
                    event = "analysis.response.success",
                    request_id = %event.id,
                    risk_level = %result.risk_level,
                    risk_score = result.risk_score,
                    elapsed_ms,
                );
                RequestState::Success(result)
            }
            Err(err) => {
                tracing::warn!(
                    event = "analysis.response.failed",
                    request_id = %event.id,
                    kind = err.kind(),
                    error = %err,
                    elapsed_ms,
                );
                RequestState::Failed(err)
            }
        };
        true
    }

    /// Drops back to `Idle`, cancelling any request still in flight.
    pub fn reset(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
            tracing::info!(event = "analysis.request.cancelled", request_id = %in_flight.id);
        }
        self.state = RequestState::Idle;
    }
}

impl Drop for AnalysisController {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}

fn spawn_request(
    service: Arc<dyn ScoringService>,
    request: AnalysisRequest,
    id: RequestId,
    deadline: Duration,
    cancel: CancellationToken,
    events: mpsc::Sender<AnalysisEvent>,
) {
    tokio::spawn(async move {
        let outcome = tokio::select! {
            _ = cancel.cancelled() => Err(AnalysisError::Cancelled),
            outcome = tokio::time::timeout(deadline, service.analyze(&request)) => {
                match outcome {
                    Ok(outcome) => outcome,
                    Err(_) => Err(AnalysisError::Timeout(deadline)),
                }
            }
        };
        if events.send(AnalysisEvent { id, outcome }).await.is_err() {
            tracing::debug!(event = "analysis.response.dropped", request_id = %id);
        }
    });
}
