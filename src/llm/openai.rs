use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::OpenAiConfig;

/// Chat-completion seam; the summarizer only sees this trait so tests can
/// swap in the mock.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the first choice's message content.
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, OpenAiError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: HttpClient,
    cfg: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(cfg: OpenAiConfig) -> Result<Self, OpenAiError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(OpenAiError::http)?;
        Ok(Self { http, cfg })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'))
    }

    fn build_api_request(&self, messages: &[ChatMessage]) -> ApiChatCompletionRequest {
        ApiChatCompletionRequest {
            model: self.cfg.model.clone(),
            temperature: self.cfg.temperature,
            top_p: self.cfg.top_p,
            messages: messages
                .iter()
                .map(|m| ApiChatMessage {
                    role: m.role.as_api_str().to_string(),
                    content: Some(m.content.clone()),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, OpenAiError> {
        if messages.is_empty() {
            return Err(OpenAiError::EmptyMessages);
        }

        let api_request = self.build_api_request(&messages);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.cfg.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(OpenAiError::http)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(OpenAiError::http)?;

        if !status.is_success() {
            let api_err = serde_json::from_slice::<ApiErrorEnvelope>(&bytes)
                .ok()
                .map(|env| env.error);
            return Err(OpenAiError::Api {
                status,
                error: api_err.unwrap_or_default(),
            });
        }

        let parsed: ApiChatCompletionResponse =
            serde_json::from_slice(&bytes).map_err(OpenAiError::Decode)?;

        parsed
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .ok_or(OpenAiError::EmptyChoices)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl ChatRole {
    fn as_api_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug)]
pub enum OpenAiError {
    EmptyMessages,
    Http(reqwest::Error),
    Timeout,
    Api { status: StatusCode, error: ApiErrorBody },
    EmptyChoices,
    Decode(serde_json::Error),
}

impl OpenAiError {
    fn http(err: reqwest::Error) -> Self {
        if err.is_timeout() { OpenAiError::Timeout } else { OpenAiError::Http(err) }
    }
}

impl std::fmt::Display for OpenAiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenAiError::EmptyMessages => {
                write!(f, "chat completion requires at least one message")
            }
            OpenAiError::Http(err) => write!(f, "http error: {err}"),
            OpenAiError::Timeout => write!(f, "request timed out"),
            OpenAiError::Api { status, error } => {
                write!(f, "api error {status}: {}", error.message)
            }
            OpenAiError::EmptyChoices => {
                write!(f, "response contained no completion choices")
            }
            OpenAiError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for OpenAiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OpenAiError::Http(err) => Some(err),
            OpenAiError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Default for ApiErrorBody {
    fn default() -> Self {
        Self { message: "unknown error".to_string(), r#type: None, param: None, code: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Clone, Serialize)]
struct ApiChatCompletionRequest {
    model: String,
    temperature: f32,
    top_p: f32,
    messages: Vec<ApiChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiChatCompletionResponse {
    choices: Vec<ApiChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiChatChoice {
    message: ApiChatMessage,
}

/// Test double: canned completions in FIFO order, every request recorded.
#[cfg(test)]
#[derive(Default)]
pub struct MockClient {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, OpenAiError>>>,
    calls: std::sync::Mutex<Vec<Vec<ChatMessage>>>,
}

#[cfg(test)]
impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, resp: Result<String, OpenAiError>) {
        self.responses.lock().unwrap().push_back(resp);
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl LlmClient for MockClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, OpenAiError> {
        self.calls.lock().unwrap().push(messages);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("mock client response queue is empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_cfg(base_url: String) -> OpenAiConfig {
        OpenAiConfig {
            api_key: "sk-test".into(),
            base_url,
            model: "gpt-3.5-turbo".into(),
            temperature: 0.7,
            top_p: 0.5,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn build_request_serializes_model_and_sampling_params() {
        let client = OpenAiClient::new(test_cfg("https://api.openai.com/v1".into())).unwrap();
        let api_request = client.build_api_request(&[
            ChatMessage::new(ChatRole::System, "You are helpful."),
            ChatMessage::new(ChatRole::User, "Hello"),
        ]);
        let value = serde_json::to_value(&api_request).unwrap();

        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["top_p"], 0.5);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "Hello");
    }

    #[tokio::test]
    async fn chat_completion_sends_bearer_auth_and_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.7,
                "top_p": 0.5,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "- Price rose"}}]
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(test_cfg(format!("{}/v1", server.uri()))).unwrap();
        let content = client
            .chat_completion(vec![ChatMessage::new(ChatRole::User, "Summarize this")])
            .await
            .unwrap();
        assert_eq!(content, "- Price rose");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Incorrect API key provided"}
            })))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(test_cfg(format!("{}/v1", server.uri()))).unwrap();
        let err = client
            .chat_completion(vec![ChatMessage::new(ChatRole::User, "hi")])
            .await
            .unwrap_err();
        match err {
            OpenAiError::Api { status, error } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(error.message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(test_cfg(format!("{}/v1", server.uri()))).unwrap();
        let err = client
            .chat_completion(vec![ChatMessage::new(ChatRole::User, "hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, OpenAiError::EmptyChoices));
    }

    #[tokio::test]
    async fn empty_message_list_is_rejected_locally() {
        let client = OpenAiClient::new(test_cfg("https://api.openai.com/v1".into())).unwrap();
        let err = client.chat_completion(Vec::new()).await.unwrap_err();
        assert!(matches!(err, OpenAiError::EmptyMessages));
    }

    #[tokio::test]
    async fn mock_client_replays_queue_and_records_calls() {
        let mock = MockClient::new();
        mock.push_response(Ok("first".into()));
        mock.push_response(Ok("second".into()));

        let msgs = vec![ChatMessage::new(ChatRole::User, "one")];
        assert_eq!(mock.chat_completion(msgs.clone()).await.unwrap(), "first");
        assert_eq!(
            mock.chat_completion(vec![ChatMessage::new(ChatRole::Assistant, "two")])
                .await
                .unwrap(),
            "second"
        );
        assert_eq!(mock.calls().len(), 2);
        assert_eq!(mock.calls()[0], msgs);
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = OpenAiError::Api {
            status: StatusCode::BAD_REQUEST,
            error: ApiErrorBody {
                message: "bad request".into(),
                r#type: Some("invalid_request_error".into()),
                param: None,
                code: None,
            },
        };
        assert_eq!(format!("{err}"), "api error 400 Bad Request: bad request");
    }
}
