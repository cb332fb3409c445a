use serde::{Deserialize, Serialize};

pub mod risk;

pub use risk::RiskLevel;

pub const ANALYZE_PATH: &str = "/api/v1/fraud/analyze";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRequest {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            amount: None,
        }
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    pub fn with_amount(mut self, amount: Option<f64>) -> Self {
        self.amount = amount;
        self
    }
}

/// Body returned by the scoring service on success.
///
/// Only `risk_level` and `risk_score` are required; every other field may be
/// absent or `null`, and unknown fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    pub risk_level: String,
    pub risk_score: f64,
    #[serde(default)]
    pub detected_patterns: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub ml_reasoning: Option<String>,
    #[serde(default)]
    pub llm_reasoning: Option<String>,
}

/// A response that passed boundary validation. Fields are taken as the service
/// sent them; level and score are never reconciled against each other.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub risk_score: f64,
    pub detected_patterns: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: Option<f64>,
    pub ml_reasoning: Option<String>,
    pub llm_reasoning: Option<String>,
}

impl AnalysisResult {
    pub fn score_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.risk_score)
    }
}

impl From<AnalysisResponse> for AnalysisResult {
    fn from(response: AnalysisResponse) -> Self {
        Self {
            risk_level: RiskLevel::parse(&response.risk_level),
            risk_score: response.risk_score,
            detected_patterns: response.detected_patterns.unwrap_or_default(),
            recommendations: response.recommendations.unwrap_or_default(),
            confidence: response.confidence,
            ml_reasoning: response.ml_reasoning,
            llm_reasoning: response.llm_reasoning,
        }
    }
}

pub fn decode_analysis(body: &str) -> Result<AnalysisResult, serde_json::Error> {
    let response: AnalysisResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
