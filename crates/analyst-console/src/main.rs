mod cli;
mod headless;
mod logging;
mod ui;

use analyst_console::{
    check_health, AnalysisController, AnalysisEvent, Config, HttpScoringService, ScoringService,
};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::cli::Args;
use crate::logging::init_tracing;
use crate::ui::{
    draw_ui, handle_key_event, handle_paste, restore_terminal, setup_terminal, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let interactive = args.text.is_none();
    let _file_guard = init_tracing(&args.log_dir, args.log_to_stderr && !interactive)?;

    let config = build_config(&args)?;
    let service: Arc<dyn ScoringService> = Arc::new(
        HttpScoringService::new(&config.service).context("failed to build http client")?,
    );
    tracing::info!(
        event = "console.start",
        base_url = %config.service.base_url,
        timeout_ms = config.service.timeout_ms,
        interactive,
    );

    if let Some(text) = args.text.as_deref() {
        return headless::run_once(service, &config, text).await;
    }
    run_tui(service, &config).await
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.service.base_url = base_url.clone();
    }
    if args.context.is_some() {
        config.analysis.context = args.context.clone();
    }
    if args.amount.is_some() {
        config.analysis.amount = args.amount;
    }
    config.validate()?;
    Ok(config)
}

async fn run_tui(service: Arc<dyn ScoringService>, config: &Config) -> anyhow::Result<()> {
    let (event_tx, mut event_rx) = mpsc::channel::<AnalysisEvent>(16);
    let mut controller = AnalysisController::new(Arc::clone(&service), config, event_tx);
    let mut app = AppState::new(config.service.base_url.clone());

    let (health_tx, health_rx) = oneshot::channel();
    let mut health_rx = Some(health_rx);
    let health_deadline = config.service.request_timeout();
    tokio::spawn(async move {
        let health = check_health(service.as_ref(), health_deadline).await;
        match &health {
            Ok(status) => tracing::info!(event = "service.health", status = %status.status),
            Err(err) => tracing::warn!(event = "service.health.failed", error = %err),
        }
        let _ = health_tx.send(health);
    });

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(100);
    let outcome: anyhow::Result<()> = loop {
        while let Ok(event) = event_rx.try_recv() {
            if controller.apply(event) {
                app.scroll_to_top();
            }
        }
        if let Some(rx) = health_rx.as_mut() {
            match rx.try_recv() {
                Ok(health) => {
                    app.set_health(health);
                    health_rx = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
                Err(oneshot::error::TryRecvError::Closed) => health_rx = None,
            }
        }

        if let Err(err) = terminal.draw(|frame| draw_ui(frame, &mut app, &controller)) {
            break Err(err.into());
        }

        match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => {
                    if handle_key_event(key, &mut app, &mut controller) {
                        break Ok(());
                    }
                }
                Ok(Event::Paste(text)) => handle_paste(&text, &mut app),
                Ok(_) => {}
                Err(err) => break Err(err.into()),
            },
            Ok(false) => {}
            Err(err) => break Err(err.into()),
        }
    };

    controller.reset();
    restore_terminal(&mut terminal)?;
    tracing::info!(event = "console.stop");
    outcome
}
