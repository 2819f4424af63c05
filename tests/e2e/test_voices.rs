use crate::e2e::helpers;

use helpers::provider_mocks::{mock_voices, mock_voices_failure};
use helpers::TestContext;
use hyper::StatusCode;
use murph_voice::domain::tts::Voice;
use pretty_assertions::assert_eq;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_voices_in_gateway_shape(ctx: &mut TestContext) {
    mock_voices(&ctx.provider, 1).await;

    let response = ctx.client.get("/api/tts/voices").await.unwrap();
    response.assert_status(StatusCode::OK);

    let voices: Vec<Voice> = response.json().unwrap();
    assert_eq!(
        voices,
        vec![
            Voice {
                id: "21m00Tcm4TlvDq8ikWAM".to_string(),
                name: "Rachel".to_string(),
                category: "premade".to_string(),
            },
            Voice {
                id: "AZnzlk1XvdvUeBnXmlld".to_string(),
                name: "Domi".to_string(),
                category: "premade".to_string(),
            },
        ]
    );

    // Provider-only fields are not passed through
    let first = &response.body.as_ref().unwrap()[0];
    assert!(first.get("labels").is_none());
    assert!(first.get("voice_id").is_none());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeat_requests_from_cache(ctx: &mut TestContext) {
    // Provider answers exactly once
    mock_voices(&ctx.provider, 1).await;

    for _ in 0..3 {
        ctx.client
            .get("/api/tts/voices")
            .await
            .unwrap()
            .assert_status(StatusCode::OK);
    }

    ctx.provider.verify().await;
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_catalog_failure(ctx: &mut TestContext) {
    mock_voices_failure(&ctx.provider, 500).await;

    let response = ctx.client.get("/api/tts/voices").await.unwrap();

    response
        .assert_status(StatusCode::BAD_GATEWAY)
        .assert_error_message("Failed to fetch voices");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_retry_catalog_after_failure(ctx: &mut TestContext) {
    mock_voices_failure(&ctx.provider, 503).await;

    ctx.client
        .get("/api/tts/voices")
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_GATEWAY);

    // Provider recovers; the failure was not cached
    ctx.provider.reset().await;
    mock_voices(&ctx.provider, 1).await;

    ctx.client
        .get("/api/tts/voices")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
}
