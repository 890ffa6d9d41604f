//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Configuration for an [`crate::IngestionPipeline`].
///
/// Everything the legacy deployment hard-coded at module level lives
/// here instead: the fixed user identity, the expected CSV header, the
/// accepted file extensions, and the fallback threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Fixed identity the readings are recorded under.
    pub user_id: String,

    /// Exact expected header fields, in order, case-sensitive.
    pub expected_header: Vec<String>,

    /// Accepted file extensions, lowercase, without the dot.
    pub allowed_extensions: Vec<String>,

    /// Threshold used when the caller does not supply one.
    pub default_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            user_id: "demo-user".to_string(),
            expected_header: vec!["Date".to_string(), "Usage".to_string()],
            allowed_extensions: vec!["csv".to_string(), "txt".to_string()],
            default_threshold: 30.0,
        }
    }
}
