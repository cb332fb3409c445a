use analyst_console::presentation::{render_plain, ResultPanel};
use analyst_console::{AnalysisController, AnalysisError, Config, RequestState, ScoringService};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs one analysis through the controller and prints the result panel.
pub(crate) async fn run_once(
    service: Arc<dyn ScoringService>,
    config: &Config,
    text: &str,
) -> anyhow::Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel(1);
    let mut controller = AnalysisController::new(service, config, event_tx);
    controller.submit(text)?;

    while controller.current_state().is_pending() {
        let Some(event) = event_rx.recv().await else {
            anyhow::bail!("analysis task ended without a result");
        };
        controller.apply(event);
    }

    match controller.current_state() {
        RequestState::Success(result) => {
            println!("{}", render_plain(&ResultPanel::from_result(result)));
            Ok(())
        }
        RequestState::Failed(err) => Err(failure(err)),
        RequestState::Idle | RequestState::Pending => {
            anyhow::bail!("analysis did not settle")
        }
    }
}

fn failure(err: &AnalysisError) -> anyhow::Error {
    anyhow::anyhow!("analysis failed ({}): {}", err.kind(), err)
}
