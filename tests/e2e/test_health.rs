use crate::e2e::helpers;

use helpers::provider_mocks::{mock_voices, mock_voices_failure};
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &mut TestContext) {
    let response = ctx.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_when_provider_answers(ctx: &mut TestContext) {
    mock_voices(&ctx.provider, 1).await;

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(body.get("tts").and_then(|v| v.as_str()), Some("available"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_ready_when_provider_fails(ctx: &mut TestContext) {
    mock_voices_failure(&ctx.provider, 401).await;

    let response = ctx.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("not_ready"));
    assert_eq!(body.get("tts").and_then(|v| v.as_str()), Some("unavailable"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_share_voice_cache_with_readiness(ctx: &mut TestContext) {
    mock_voices(&ctx.provider, 1).await;

    ctx.client
        .get("/health/ready")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
    ctx.client
        .get("/api/tts/voices")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    ctx.provider.verify().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &mut TestContext) {
    let response = ctx.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    mock_voices(&ctx.provider, 1).await;
    let response = ctx.client.get("/health/ready").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_handle_concurrent_health_checks(ctx: &mut TestContext) {
    let client = &ctx.client;

    let responses = futures::future::join_all((0..10).map(|_| client.get("/health"))).await;

    for response in responses {
        response.unwrap().assert_status(StatusCode::OK);
    }
}
