pub mod config;
pub mod controller;
pub mod error;
pub mod presentation;
pub mod service;

pub use config::Config;
pub use controller::{AnalysisController, AnalysisEvent, RequestId, RequestState};
pub use error::AnalysisError;
pub use presentation::{present_state, ResultPanel, Severity, StateView};
pub use service::{check_health, HttpScoringService, ScoringService};
