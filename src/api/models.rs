use serde::{Deserialize, Serialize};

use crate::data_models::ProjectLink;

/// Both fields are optional so a missing value reaches the handler and is
/// answered with 400 instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub projects: Vec<ProjectLink>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
