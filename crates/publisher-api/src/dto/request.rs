//! Query-string DTOs with validation.
//!
//! Parameter names are camelCase. The older names `interval`, `targetDb`
//! and `handleToken` are accepted as aliases.

use serde::Deserialize;
use validator::Validate;

/// Query for `GET /api/publish/smart`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishSmartQuery {
    /// Block until the job finishes.
    #[serde(default)]
    pub wait: bool,
    /// Poll interval while waiting.
    #[serde(default, alias = "interval")]
    #[validate(range(min = 1, message = "poll interval must be at least 1 ms"))]
    pub poll_interval_ms: Option<u64>,
    /// Target store.
    #[serde(default, alias = "targetDb")]
    #[validate(length(min = 1, message = "target store must not be empty"))]
    pub target_store: Option<String>,
}

/// Query for `GET /api/publish/republish-all-languages`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RepublishQuery {
    /// Target store.
    #[serde(default, alias = "targetDb")]
    #[validate(length(min = 1, message = "target store must not be empty"))]
    pub target_store: Option<String>,
}

/// Query for `GET /api/publish/item`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishItemQuery {
    /// Path of the item to publish.
    #[validate(length(min = 1, message = "item path is required"))]
    pub item_path: String,
    /// Include descendants.
    pub deep: bool,
    /// Block until the job finishes.
    #[serde(default)]
    pub wait: bool,
    /// Poll interval while waiting.
    #[serde(default, alias = "interval")]
    #[validate(range(min = 1, message = "poll interval must be at least 1 ms"))]
    pub poll_interval_ms: Option<u64>,
    /// Target store.
    #[serde(default, alias = "targetDb")]
    #[validate(length(min = 1, message = "target store must not be empty"))]
    pub target_store: Option<String>,
}

/// Query for `GET /api/publish/edge-item`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishEdgeItemQuery {
    /// Path of the item to publish.
    #[validate(length(min = 1, message = "item path is required"))]
    pub item_path: String,
    /// Include descendants.
    pub children: bool,
    /// Block until the job finishes.
    #[serde(default)]
    pub wait: bool,
    /// Skip items whose published revision is current.
    #[serde(default)]
    pub smart: bool,
    /// Include related items.
    #[serde(default)]
    pub related: bool,
    /// Poll interval while waiting.
    #[serde(default, alias = "interval")]
    #[validate(range(min = 1, message = "poll interval must be at least 1 ms"))]
    pub poll_interval_ms: Option<u64>,
    /// Target store.
    #[serde(default, alias = "targetDb")]
    #[validate(length(min = 1, message = "target store must not be empty"))]
    pub target_store: Option<String>,
}

/// Query for `GET /api/publish/result`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResultQuery {
    /// Handle returned by a publish call. Anything else reports as malformed.
    #[serde(default, alias = "handleToken")]
    pub handle_string: String,
}
