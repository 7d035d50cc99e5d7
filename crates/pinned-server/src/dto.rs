use serde::{Deserialize, Serialize};

/// Query parameters of `GET /api/repos`.
#[derive(Debug, Deserialize)]
pub struct ReposQuery {
    /// Profile to look up. Required; its absence is a 400.
    pub username: Option<String>,

    /// Skip the cache and re-run the extraction pipeline.
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
