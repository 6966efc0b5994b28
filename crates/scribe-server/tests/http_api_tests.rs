use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::json;

use scribe_llm::{
    CompletionError, CompletionProvider, Continuation, ContinuationRequest,
    Result as LlmResult,
};
use scribe_server::{api_config, AppState};

struct StubProvider {
    response: Result<&'static str, &'static str>,
}

impl StubProvider {
    fn ok(text: &'static str) -> Arc<Self> {
        Arc::new(Self { response: Ok(text) })
    }

    fn failing(reason: &'static str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(reason),
        })
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, _request: &ContinuationRequest) -> LlmResult<Continuation> {
        match self.response {
            Ok(text) => Ok(Continuation {
                text: text.to_string(),
            }),
            Err(reason) => Err(CompletionError::Api(reason.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

async fn call(
    provider: Arc<StubProvider>,
    body: serde_json::Value,
) -> (actix_web::http::StatusCode, serde_json::Value) {
    let state = web::Data::new(AppState::new(provider));
    let app = test::init_service(App::new().app_data(state).configure(api_config)).await;
    let request = test::TestRequest::post()
        .uri("/api/v1/continue")
        .set_json(body)
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status();
    let body: serde_json::Value = test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn continue_returns_completion() {
    let (status, body) = call(
        StubProvider::ok("and the rain began."),
        json!({ "text": "The sky darkened" }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["continued_text"], "and the rain began.");
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn continue_accepts_custom_token_budget() {
    let (status, _body) = call(
        StubProvider::ok("short"),
        json!({ "text": "The sky darkened", "max_tokens": 40 }),
    )
    .await;

    assert_eq!(status, 200);
}

#[actix_web::test]
async fn continue_rejects_empty_text() {
    let (status, body) = call(StubProvider::ok("unused"), json!({ "text": "   " })).await;

    assert_eq!(status, 400);
    assert_eq!(body["continued_text"], "");
    assert!(body["error"].as_str().unwrap().contains("non-empty"));
}

#[actix_web::test]
async fn continue_rejects_zero_token_budget() {
    let (status, body) = call(
        StubProvider::ok("unused"),
        json!({ "text": "draft", "max_tokens": 0 }),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("positive"));
}

#[actix_web::test]
async fn continue_surfaces_provider_failures_as_500() {
    let (status, body) = call(
        StubProvider::failing("model unavailable"),
        json!({ "text": "draft" }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["continued_text"], "");
    assert!(body["error"].as_str().unwrap().contains("model unavailable"));
}

#[actix_web::test]
async fn health_reports_static_status() {
    let state = web::Data::new(AppState::new(StubProvider::ok("unused")));
    let app = test::init_service(App::new().app_data(state).configure(api_config)).await;
    let request = test::TestRequest::get()
        .uri("/api/v1/health")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "scribe-server");
}
