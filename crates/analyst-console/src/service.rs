use async_trait::async_trait;
use protocol::{AnalysisRequest, AnalysisResult, HealthStatus, ANALYZE_PATH, HEALTH_PATH};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::error::AnalysisError;

/// The remote fraud scoring service, seen as a single request/response call.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;

    async fn health(&self) -> Result<HealthStatus, AnalysisError>;
}

pub struct HttpScoringService {
    client: Client,
    analyze_url: String,
    health_url: String,
}

impl HttpScoringService {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .build()?;
        let analyze_url = join_base_path(&config.base_url, ANALYZE_PATH)?;
        let health_url = join_base_path(&config.base_url, HEALTH_PATH)?;
        Ok(Self {
            client,
            analyze_url,
            health_url,
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let response = self
            .client
            .post(&self.analyze_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(
                    event = "service.analyze.transport_error",
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    error = %err,
                );
                AnalysisError::NetworkFailure(err.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AnalysisError::NetworkFailure(err.to_string()))?;
        tracing::debug!(
            event = "service.analyze.response",
            status = status.as_u16(),
            body_len = body.len(),
        );
        if !status.is_success() {
            return Err(AnalysisError::BadResponse(format!("status {status}")));
        }

        protocol::decode_analysis(&body)
            .map_err(|err| AnalysisError::BadResponse(format!("invalid body: {err}")))
    }

    async fn health(&self) -> Result<HealthStatus, AnalysisError> {
        let response = self
            .client
            .get(&self.health_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AnalysisError::NetworkFailure(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::BadResponse(format!("status {status}")));
        }
        response
            .json::<HealthStatus>()
            .await
            .map_err(|err| AnalysisError::BadResponse(err.to_string()))
    }
}

/// Health check bounded by `deadline`; expiry is reported as a timeout.
pub async fn check_health(
    service: &dyn ScoringService,
    deadline: Duration,
) -> Result<HealthStatus, AnalysisError> {
    match tokio::time::timeout(deadline, service.health()).await {
        Ok(health) => health,
        Err(_) => Err(AnalysisError::Timeout(deadline)),
    }
}

pub fn join_base_path(base: &str, path: &str) -> anyhow::Result<String> {
    let base = base.trim();
    if base.is_empty() {
        anyhow::bail!("base_url is empty");
    }
    let normalized_base = base.trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}
