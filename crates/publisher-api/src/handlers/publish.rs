//! Publish handlers.
//!
//! Each handler answers HTTP 200 with an envelope. A query string that does
//! not parse or validate becomes an unsuccessful envelope, never an HTTP
//! error.

use std::time::Duration;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use tracing::debug;
use validator::Validate;

use publisher_core::types::{PublishRequest, PublishScope};
use publisher_service::publish::operation;
use publisher_service::{Completion, PublishResponse, ReportResponse, WaitOptions};

use crate::dto::request::{
    PublishEdgeItemQuery, PublishItemQuery, PublishResultQuery, PublishSmartQuery, RepublishQuery,
};
use crate::state::AppState;

/// GET /api/publish/smart
pub async fn publish_smart(
    State(state): State<AppState>,
    query: Result<Query<PublishSmartQuery>, QueryRejection>,
) -> Json<PublishResponse> {
    let query = match accept(operation::PUBLISH_SMART, query) {
        Ok(query) => query,
        Err(rejected) => return rejected,
    };

    let target = query
        .target_store
        .unwrap_or_else(|| state.config.publishing.default_target.clone());
    let request = publish_request(&state, target, PublishScope::SiteSmart);
    let completion = wait_mode(&state, query.wait, query.poll_interval_ms);

    Json(state.publish_service.publish(request, completion).await)
}

/// GET /api/publish/republish-all-languages
pub async fn republish_all_languages(
    State(state): State<AppState>,
    query: Result<Query<RepublishQuery>, QueryRejection>,
) -> Json<PublishResponse> {
    let query = match accept(operation::REPUBLISH_ALL_LANGUAGES, query) {
        Ok(query) => query,
        Err(rejected) => return rejected,
    };

    let target = query
        .target_store
        .unwrap_or_else(|| state.config.publishing.edge_target.clone());
    let request = publish_request(&state, target, PublishScope::SiteRepublishAll);

    Json(
        state
            .publish_service
            .publish(request, Completion::Detach)
            .await,
    )
}

/// GET /api/publish/item
pub async fn publish_item(
    State(state): State<AppState>,
    query: Result<Query<PublishItemQuery>, QueryRejection>,
) -> Json<PublishResponse> {
    let query = match accept(operation::PUBLISH_ITEM, query) {
        Ok(query) => query,
        Err(rejected) => return rejected,
    };

    let target = query
        .target_store
        .unwrap_or_else(|| state.config.publishing.default_target.clone());
    let scope = PublishScope::Item {
        path: query.item_path,
        deep: query.deep,
    };
    let request = publish_request(&state, target, scope);
    let completion = wait_mode(&state, query.wait, query.poll_interval_ms);

    Json(state.publish_service.publish(request, completion).await)
}

/// GET /api/publish/edge-item
pub async fn publish_edge_item(
    State(state): State<AppState>,
    query: Result<Query<PublishEdgeItemQuery>, QueryRejection>,
) -> Json<PublishResponse> {
    let query = match accept(operation::PUBLISH_EDGE_ITEM, query) {
        Ok(query) => query,
        Err(rejected) => return rejected,
    };

    let target = query
        .target_store
        .unwrap_or_else(|| state.config.publishing.edge_target.clone());
    let scope = PublishScope::EdgeItem {
        path: query.item_path,
        children: query.children,
        smart: query.smart,
        related: query.related,
    };
    let request = publish_request(&state, target, scope);
    let completion = wait_mode(&state, query.wait, query.poll_interval_ms);

    Json(state.publish_service.publish(request, completion).await)
}

/// GET /api/publish/result
///
/// Always successful; unknown or malformed handles are reported through
/// the sentinel values in the body.
pub async fn publish_result(
    State(state): State<AppState>,
    query: Result<Query<PublishResultQuery>, QueryRejection>,
) -> Json<ReportResponse> {
    let token = match query {
        Ok(Query(query)) => query.handle_string,
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Unreadable publish result query");
            String::new()
        }
    };

    Json(state.publish_service.publish_result(&token).await)
}

/// Unwrap and validate a query, or build the unsuccessful envelope for it.
fn accept<T: Validate>(
    label: &str,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, Json<PublishResponse>> {
    let Query(query) =
        query.map_err(|rejection| Json(PublishResponse::rejected(label, rejection.body_text())))?;
    query
        .validate()
        .map_err(|e| Json(PublishResponse::rejected(label, e)))?;
    Ok(query)
}

fn publish_request(state: &AppState, target_store: String, scope: PublishScope) -> PublishRequest {
    let publishing = &state.config.publishing;
    PublishRequest {
        source_store: publishing.source_store.clone(),
        target_store,
        languages: vec![publishing.current_language.clone()],
        scope,
    }
}

fn wait_mode(state: &AppState, wait: bool, poll_interval_ms: Option<u64>) -> Completion {
    if !wait {
        return Completion::Detach;
    }

    let publishing = &state.config.publishing;
    let interval = poll_interval_ms.unwrap_or(publishing.default_poll_interval_ms);
    let options = WaitOptions::new(Duration::from_millis(interval))
        .with_timeout(publishing.wait_timeout_seconds.map(Duration::from_secs));
    Completion::Wait(options)
}
