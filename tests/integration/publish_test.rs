//! Integration tests for the publish endpoints.

use http::StatusCode;

use publisher_core::types::JobHandle;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_smart_publish_returns_handle() {
    let app = TestApp::new();

    let response = app.get("/api/publish/smart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.success());
    let handle = response.handle();
    assert!(handle.ends_with(";publisher-test"));
    assert_eq!(
        response.log(),
        vec![
            "PublishSmart: Start".to_string(),
            format!("Handle: {handle}"),
            "PublishSmart: End".to_string(),
        ]
    );

    let status = app.wait_finished(&handle).await;
    assert_eq!(status.body["result"], "False");
    assert_eq!(status.body["processed"], "3");
    assert_eq!(status.body["messages"], "web/en: 3 published, 0 unchanged");
    assert_eq!(app.backend.published_revision("web", "/content/home", "en"), Some(1));
}

#[tokio::test]
async fn test_smart_publish_waits_for_completion() {
    let app = TestApp::new();

    let response = app.get("/api/publish/smart?wait=true&pollIntervalMs=5").await;

    assert!(response.success());
    assert_eq!(response.body["outcome"], "completed");
    assert_eq!(
        response.log(),
        vec!["PublishSmart: Start", "PublishSmart: Wait"]
    );
    assert!(app.backend.published_revision("web", "/content", "en").is_some());

    // Nothing changed, so a second smart publish copies nothing.
    let again = app.get("/api/publish/smart?wait=true&pollIntervalMs=5").await;
    let status = app.result(&again.handle()).await;
    assert_eq!(status.body["processed"], "0");
    assert_eq!(status.body["messages"], "web/en: 0 published, 3 unchanged");
}

#[tokio::test]
async fn test_legacy_parameter_names_accepted() {
    let app = TestApp::new();

    let response = app
        .get("/api/publish/smart?wait=true&interval=5&targetDb=experienceedge")
        .await;

    assert!(response.success());
    assert!(
        app.backend
            .published_revision("experienceedge", "/content/home", "en")
            .is_some()
    );
    assert!(app.backend.published_revision("web", "/content/home", "en").is_none());
}

#[tokio::test]
async fn test_missing_item_creates_no_job() {
    let app = TestApp::new();

    let response = app
        .get("/api/publish/item?itemPath=/content/missing&deep=true")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.success());
    assert!(response.body.get("handle").is_none());
    let log = response.log();
    assert_eq!(log[0], "PublishItem: Start");
    assert!(log[1].contains("no such item at path /content/missing"));
    assert_eq!(app.backend.submissions(), 0);
}

#[tokio::test]
async fn test_item_publish_respects_deep_flag() {
    let app = TestApp::new();

    let response = app
        .get("/api/publish/item?itemPath=/content/home&deep=false&wait=true&pollIntervalMs=5")
        .await;

    assert!(response.success());
    assert!(app.backend.published_revision("web", "/content/home", "en").is_some());
    assert!(app.backend.published_revision("web", "/content/home/news", "en").is_none());
    assert!(app.backend.published_revision("web", "/content", "en").is_none());
}

#[tokio::test]
async fn test_republish_submits_single_job_for_all_languages() {
    let app = TestApp::new();

    let response = app.get("/api/publish/republish-all-languages").await;

    assert!(response.success());
    assert_eq!(app.backend.submissions(), 1);

    let status = app.wait_finished(&response.handle()).await;
    assert_eq!(status.body["processed"], "6");
    for language in ["en", "fr"] {
        assert!(
            app.backend
                .published_revision("experienceedge", "/content/home/news", language)
                .is_some()
        );
    }
}

#[tokio::test]
async fn test_edge_item_publish_lists_targets() {
    let app = TestApp::new();

    let response = app
        .get("/api/publish/edge-item?itemPath=/content/home&children=true&related=true")
        .await;

    assert!(response.success());
    let log = response.log();
    assert_eq!(log[0], "PublishEdgeItem: Start");
    assert_eq!(log[2], "PublishEdgeItem: End");
    assert_eq!(log[3], "Targets: web, experienceedge");

    app.wait_finished(&response.handle()).await;
    for path in ["/content", "/content/home", "/content/home/news"] {
        assert!(
            app.backend
                .published_revision("experienceedge", path, "en")
                .is_some()
        );
    }
}

#[tokio::test]
async fn test_unknown_target_is_validation_fault() {
    let app = TestApp::new();

    let response = app.get("/api/publish/smart?targetStore=preview").await;

    assert!(!response.success());
    assert!(response.log()[1].contains("no such store: preview"));
    assert_eq!(app.backend.submissions(), 0);
}

#[tokio::test]
async fn test_unparsable_query_is_unsuccessful_envelope() {
    let app = TestApp::new();

    let response = app.get("/api/publish/item?itemPath=/content&deep=maybe").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.success());
    assert_eq!(response.log()[0], "PublishItem: Start");
    assert_eq!(app.backend.submissions(), 0);
}

#[tokio::test]
async fn test_missing_required_parameter_is_unsuccessful_envelope() {
    let app = TestApp::new();

    let response = app.get("/api/publish/edge-item?itemPath=/content").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.success());
    assert_eq!(app.backend.submissions(), 0);
}

#[tokio::test]
async fn test_zero_poll_interval_rejected() {
    let app = TestApp::new();

    let response = app.get("/api/publish/smart?wait=true&pollIntervalMs=0").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.success());
    assert_eq!(app.backend.submissions(), 0);
}

#[tokio::test]
async fn test_result_for_malformed_handle() {
    let app = TestApp::new();

    for uri in [
        "/api/publish/result?handleString=garbage",
        "/api/publish/result",
    ] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.success());
        for field in ["state", "result", "processed", "messages"] {
            assert_eq!(response.body[field], "null");
        }
        assert_eq!(response.log().first().map(String::as_str), Some("PublishResult: Start"));
        assert_eq!(response.log().last().map(String::as_str), Some("PublishResult: End"));
    }
}

#[tokio::test]
async fn test_result_for_unknown_job() {
    let app = TestApp::new();
    let handle = JobHandle::new("publisher-test").to_string();

    let response = app
        .get(&format!(
            "/api/publish/result?handleToken={}",
            handle.replace(';', "%3B")
        ))
        .await;

    assert!(response.success());
    assert_eq!(response.body["state"], "Exception");
    assert_eq!(response.body["result"], handle.as_str());
    assert_eq!(response.body["processed"], "null");
    assert_eq!(response.body["messages"], "null");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}
