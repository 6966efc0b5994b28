use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use scribe_llm::ContinuationRequest;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContinueRequest {
    pub text: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ContinueResponse {
    pub continued_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContinueResponse {
    fn success(text: String) -> Self {
        Self {
            continued_text: text,
            error: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            continued_text: String::new(),
            error: Some(message.into()),
        }
    }
}

pub async fn handler(
    state: web::Data<AppState>,
    req: web::Json<ContinueRequest>,
) -> impl Responder {
    if req.text.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ContinueResponse::failure("text must be a non-empty string"));
    }
    if req.max_tokens == Some(0) {
        return HttpResponse::BadRequest()
            .json(ContinueResponse::failure("max_tokens must be positive"));
    }

    let mut request = ContinuationRequest::new(req.text.clone());
    if let Some(max_tokens) = req.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }

    match state.provider.complete(&request).await {
        Ok(continuation) => HttpResponse::Ok().json(ContinueResponse::success(continuation.text)),
        Err(error) => {
            log::error!("continuation request failed: {}", error);
            HttpResponse::InternalServerError().json(ContinueResponse::failure(error.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_request_deserializes_with_max_tokens() {
        let json = r#"{ "text": "Once upon a time", "max_tokens": 80 }"#;
        let request: ContinueRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.text, "Once upon a time");
        assert_eq!(request.max_tokens, Some(80));
    }

    #[test]
    fn continue_request_deserializes_without_max_tokens() {
        let json = r#"{ "text": "Once upon a time" }"#;
        let request: ContinueRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.max_tokens, None);
    }

    #[test]
    fn success_response_omits_error_field() {
        let json =
            serde_json::to_string(&ContinueResponse::success("and then".to_string())).unwrap();
        assert_eq!(json, r#"{"continued_text":"and then"}"#);
    }

    #[test]
    fn failure_response_carries_error_message() {
        let json = serde_json::to_string(&ContinueResponse::failure("boom")).unwrap();
        assert_eq!(json, r#"{"continued_text":"","error":"boom"}"#);
    }
}
