/// Inference client — the single point of entry for all text-generation calls in TalentScout.
///
/// No other module talks to the hosted inference endpoint directly. Callers depend on the
/// `TextGenerator` trait so the endpoint can be stubbed in tests.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unexpected inference response: {0}")]
    UnexpectedResponse(String),
}

/// What the inference endpoint answered with, when it answered at all.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceReply {
    /// Success status. Holds the first candidate's `generated_text` (empty when absent).
    Generated(String),
    /// Non-success status. Holds the error payload exactly as the endpoint returned it.
    Rejected { status: u16, payload: Value },
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<InferenceReply, LlmError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Hosted text-generation endpoint authenticated with a bearer token.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl InferenceClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    /// Single request, no retries.
    async fn generate(&self, prompt: &str) -> Result<InferenceReply, LlmError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Inference API response ({}): {}", status, body);

        if !status.is_success() {
            warn!("Inference API returned {}", status);
            return Ok(InferenceReply::Rejected {
                status: status.as_u16(),
                payload: parse_error_payload(&body),
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        Ok(InferenceReply::Generated(first_generated_text(&value)?))
    }
}

/// Pulls `[0].generated_text` out of a success body. A missing field reads as empty text;
/// anything other than a non-empty list is a malformed reply.
fn first_generated_text(value: &Value) -> Result<String, LlmError> {
    let first = value
        .as_array()
        .and_then(|candidates| candidates.first())
        .ok_or_else(|| {
            LlmError::UnexpectedResponse(format!("expected a list of generations, got {value}"))
        })?;

    Ok(first
        .get("generated_text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string())
}

/// Error bodies are usually JSON objects; anything else is kept as a plain string.
fn parse_error_payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        http::{header::AUTHORIZATION, HeaderMap, StatusCode},
        routing::post,
        Router,
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    /// Authorization header and raw body of every request the local endpoint received.
    type Received = Arc<Mutex<Vec<(Option<String>, String)>>>;

    /// Serves `status` + `body` on a local port for every POST to `/models/test`.
    async fn local_endpoint(status: StatusCode, body: &'static str) -> (String, Received) {
        let received = Received::default();
        let log = Arc::clone(&received);
        let app = Router::new().route(
            "/models/test",
            post(move |headers: HeaderMap, request: String| {
                let log = Arc::clone(&log);
                async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    log.lock().unwrap().push((auth, request));
                    (status, body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/models/test"), received)
    }

    fn client(url: String) -> InferenceClient {
        InferenceClient::new(url, "test-key".to_string(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_first_generated_text_reads_first_candidate() {
        let value = json!([
            {"generated_text": "What is ownership?"},
            {"generated_text": "ignored"}
        ]);
        assert_eq!(first_generated_text(&value).unwrap(), "What is ownership?");
    }

    #[test]
    fn test_first_generated_text_missing_field_is_empty() {
        let value = json!([{"score": 0.3}]);
        assert_eq!(first_generated_text(&value).unwrap(), "");
    }

    #[test]
    fn test_first_generated_text_rejects_objects() {
        let value = json!({"error": "Model is loading"});
        let err = first_generated_text(&value).unwrap_err();
        assert!(matches!(err, LlmError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_first_generated_text_rejects_empty_list() {
        assert!(first_generated_text(&json!([])).is_err());
    }

    #[test]
    fn test_parse_error_payload_json() {
        let payload = parse_error_payload(r#"{"error":"Model is loading","estimated_time":20.0}"#);
        assert_eq!(payload["error"], "Model is loading");
    }

    #[test]
    fn test_parse_error_payload_plain_text() {
        let payload = parse_error_payload("Bad Gateway");
        assert_eq!(payload, Value::String("Bad Gateway".to_string()));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(InferenceRequest { inputs: "hello" }).unwrap();
        assert_eq!(body, json!({"inputs": "hello"}));
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_token_and_inputs() {
        let (url, received) = local_endpoint(
            StatusCode::OK,
            r#"[{"generated_text":"In no more than 250 words, what is a borrow?"}]"#,
        )
        .await;

        let reply = client(url).generate("Explain borrowing").await.unwrap();

        assert_eq!(
            reply,
            InferenceReply::Generated("In no more than 250 words, what is a borrow?".to_string())
        );
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let (auth, body) = &received[0];
        assert_eq!(auth.as_deref(), Some("Bearer test-key"));
        let body: Value = serde_json::from_str(body).unwrap();
        assert_eq!(body, json!({"inputs": "Explain borrowing"}));
    }

    #[tokio::test]
    async fn test_generate_rejected_with_json_payload() {
        let (url, _) = local_endpoint(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":"Model is loading","estimated_time":20.0}"#,
        )
        .await;

        match client(url).generate("prompt").await.unwrap() {
            InferenceReply::Rejected { status, payload } => {
                assert_eq!(status, 503);
                assert_eq!(payload["error"], "Model is loading");
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejected_with_plain_text_payload() {
        let (url, _) = local_endpoint(StatusCode::BAD_GATEWAY, "Bad Gateway").await;

        let reply = client(url).generate("prompt").await.unwrap();

        assert_eq!(
            reply,
            InferenceReply::Rejected {
                status: 502,
                payload: Value::String("Bad Gateway".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_generate_success_with_object_body_is_unexpected() {
        let (url, _) = local_endpoint(StatusCode::OK, r#"{"generated_text":"not a list"}"#).await;

        let err = client(url).generate("prompt").await.unwrap_err();

        assert!(matches!(err, LlmError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_generate_success_with_invalid_json_is_parse_error() {
        let (url, _) = local_endpoint(StatusCode::OK, "<html>oops</html>").await;

        let err = client(url).generate("prompt").await.unwrap_err();

        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test]
    async fn test_generate_unreachable_endpoint_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/models/test"))
            .generate("prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Http(_)));
    }
}
