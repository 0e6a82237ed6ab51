//! Integration tests for [`RemotionClient`] over a scripted invoker.

use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use serde_json::{json, Map};

use remotion_core::error::CoreError;
use remotion_lambda::test_helpers::{test_config, ScriptedInvoker};
use remotion_lambda::{LambdaError, PollConfig, RemotionClient, RenderParams, RenderResponse};

fn fast_poll(max_attempts: u32) -> PollConfig {
    PollConfig {
        interval: Duration::from_millis(1),
        max_attempts,
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// A complete configuration yields a client exposing the configured settings.
#[test]
fn client_builds_from_complete_config() {
    let client = RemotionClient::new(&test_config(), ScriptedInvoker::new()).unwrap();

    assert_eq!(client.region(), "us-east-1");
    assert_eq!(client.function_name(), "remotion-render-test");
    assert!(client.serve_url().ends_with("/index.html"));
}

/// An unsupported region is rejected before any invocation.
#[test]
fn client_rejects_unknown_region() {
    let mut config = test_config();
    config.region = "atlantis-1".into();

    let err = RemotionClient::new(&config, ScriptedInvoker::new())
        .err()
        .expect("unknown region should be rejected");
    assert_matches!(err, LambdaError::Core(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// render_media_on_lambda
// ---------------------------------------------------------------------------

/// A render request reaches the configured function as a `start` payload.
#[tokio::test]
async fn render_sends_start_payload_to_configured_function() {
    let invoker = ScriptedInvoker::new().reply(json!({
        "renderId": "r-1",
        "bucketName": "remotionlambda-test",
    }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let mut data = Map::new();
    data.insert("hi".into(), json!("there"));
    client
        .render_media_on_lambda(&RenderParams::new("main").with_data(data))
        .await
        .unwrap();

    let calls = client.invoker().calls();
    assert_eq!(calls.len(), 1);
    let (function_name, payload) = &calls[0];
    assert_eq!(function_name, "remotion-render-test");
    assert_eq!(payload["type"], "start");
    assert_eq!(payload["composition"], "main");
    assert_eq!(payload["region"], "us-east-1");
    assert_eq!(payload["serveUrl"], test_config().serve_url);
    assert_eq!(payload["inputProps"]["payload"], r#"{"hi":"there"}"#);
}

/// `renderId` and `bucketName` are decoded; extra reply fields are ignored.
#[tokio::test]
async fn render_decodes_response_fields() {
    let invoker = ScriptedInvoker::new().reply(json!({
        "renderId": "8hfxlw",
        "bucketName": "remotionlambda-abc",
        "cloudWatchLogs": "https://console.aws.amazon.com/...",
    }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let response = client
        .render_media_on_lambda(&RenderParams::new("main"))
        .await
        .unwrap();

    assert_eq!(
        response,
        Some(RenderResponse {
            render_id: "8hfxlw".into(),
            bucket_name: "remotionlambda-abc".into(),
        })
    );
}

/// A `null` reply to a render request yields `None`.
#[tokio::test]
async fn render_with_empty_reply_is_none() {
    let invoker = ScriptedInvoker::new().reply_raw(b"null".to_vec());
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let response = client
        .render_media_on_lambda(&RenderParams::new("main"))
        .await
        .unwrap();
    assert!(response.is_none());
}

/// A Remotion error envelope becomes `LambdaError::Function`.
#[tokio::test]
async fn render_surfaces_function_errors() {
    let invoker = ScriptedInvoker::new().reply(json!({
        "type": "error",
        "message": "Version mismatch",
    }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let err = client
        .render_media_on_lambda(&RenderParams::new("main"))
        .await
        .unwrap_err();
    assert_matches!(err, LambdaError::Function(msg) if msg == "Version mismatch");
}

/// `with_version` changes the version sent in payloads.
#[tokio::test]
async fn custom_version_is_sent() {
    let invoker = ScriptedInvoker::new();
    let client = RemotionClient::new(&test_config(), invoker)
        .unwrap()
        .with_version("4.0.100");

    client
        .render_media_on_lambda(&RenderParams::new("main"))
        .await
        .unwrap();

    assert_eq!(client.invoker().calls()[0].1["version"], "4.0.100");
}

/// A version from the configuration is sent with start and status payloads.
#[tokio::test]
async fn config_version_is_sent() {
    let mut config = test_config();
    config.version = Some("4.0.100".into());
    let client = RemotionClient::new(&config, ScriptedInvoker::new()).unwrap();

    client
        .render_media_on_lambda(&RenderParams::new("main"))
        .await
        .unwrap();
    client.get_render_progress("r-1", "b").await.unwrap();

    assert_eq!(client.version(), "4.0.100");
    let calls = client.invoker().calls();
    assert_eq!(calls[0].1["version"], "4.0.100");
    assert_eq!(calls[1].1["version"], "4.0.100");
}

/// Without an override the client speaks the default protocol version.
#[test]
fn default_version_applies_without_override() {
    let client = RemotionClient::new(&test_config(), ScriptedInvoker::new()).unwrap();
    assert_eq!(client.version(), remotion_lambda::params::DEFAULT_PROTOCOL_VERSION);
}

// ---------------------------------------------------------------------------
// get_render_progress
// ---------------------------------------------------------------------------

/// A progress request is a `status` payload naming the render and bucket.
#[tokio::test]
async fn progress_sends_status_payload() {
    let invoker = ScriptedInvoker::new().reply(json!({ "overallProgress": 0.5 }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let progress = client
        .get_render_progress("r-1", "remotionlambda-test")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(progress.overall_progress.as_f64(), Some(0.5));
    let (_, payload) = &client.invoker().calls()[0];
    assert_eq!(payload["type"], "status");
    assert_eq!(payload["renderId"], "r-1");
    assert_eq!(payload["bucketName"], "remotionlambda-test");
    assert_eq!(payload["functionName"], "remotion-render-test");
}

/// An empty object reply to a progress request yields `None`.
#[tokio::test]
async fn progress_with_empty_object_is_none() {
    let invoker = ScriptedInvoker::new().reply(json!({}));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let progress = client.get_render_progress("r-1", "b").await.unwrap();
    assert!(progress.is_none());
}

// ---------------------------------------------------------------------------
// wait_for_render
// ---------------------------------------------------------------------------

/// Polling skips empty replies and returns the first `done` snapshot.
#[tokio::test]
async fn wait_returns_first_done_snapshot() {
    let invoker = ScriptedInvoker::new()
        .reply(json!({ "overallProgress": 0.1, "done": false }))
        .reply_raw(Vec::new())
        .reply(json!({ "overallProgress": 1.0, "done": true, "outputFile": "https://out.mp4" }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let progress = client
        .wait_for_render("r-1", "b", &fast_poll(10))
        .await
        .unwrap();

    assert!(progress.done);
    assert_eq!(progress.output_file.as_deref(), Some("https://out.mp4"));
    assert_eq!(client.invoker().calls().len(), 3);
}

/// Polling waits one interval before the first progress request.
#[tokio::test]
async fn wait_sleeps_before_first_request() {
    let invoker = ScriptedInvoker::new().reply(json!({ "overallProgress": 1.0, "done": true }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();
    let config = PollConfig {
        interval: Duration::from_millis(30),
        max_attempts: 1,
    };

    let started = Instant::now();
    client.wait_for_render("r-1", "b", &config).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(client.invoker().calls().len(), 1);
}

/// Polling stops at the first snapshot reporting a fatal error.
#[tokio::test]
async fn wait_stops_on_fatal_error() {
    let invoker = ScriptedInvoker::new().reply(json!({
        "overallProgress": 0.3,
        "fatalErrorEncountered": true,
        "errors": [{ "message": "chunk 2 failed" }],
    }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let err = client
        .wait_for_render("r-9", "b", &fast_poll(10))
        .await
        .unwrap_err();

    assert_matches!(err, LambdaError::Fatal { render_id } if render_id == "r-9");
    assert_eq!(client.invoker().calls().len(), 1);
}

/// Polling gives up after `max_attempts` unfinished snapshots.
#[tokio::test]
async fn wait_times_out_after_max_attempts() {
    let invoker = ScriptedInvoker::new()
        .reply(json!({ "overallProgress": 0.1 }))
        .reply(json!({ "overallProgress": 0.2 }))
        .reply(json!({ "overallProgress": 0.3 }));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let err = client
        .wait_for_render("r-1", "b", &fast_poll(3))
        .await
        .unwrap_err();

    assert_matches!(err, LambdaError::Timeout { attempts: 3, .. });
    assert_eq!(client.invoker().calls().len(), 3);
}

/// An invocation failure ends polling with that error.
#[tokio::test]
async fn wait_propagates_invoke_failures() {
    let invoker = ScriptedInvoker::new().fail(LambdaError::Invoke("throttled".into()));
    let client = RemotionClient::new(&test_config(), invoker).unwrap();

    let err = client
        .wait_for_render("r-1", "b", &fast_poll(5))
        .await
        .unwrap_err();
    assert_matches!(err, LambdaError::Invoke(_));
}
