//! DashScope-compatible HTTP client
//!
//! Thin wire adapter for the two model services the pipeline consumes:
//! multimodal vision analysis and chat-style text generation. The request
//! and response shapes follow the DashScope generation API:
//!
//! ```text
//! POST {base_url}/services/aigc/text-generation/generation
//! {"model":"qwen-turbo","input":{"messages":[...]},"parameters":{"result_format":"message","temperature":0.8}}
//! ```
//!
//! Every call is bounded by a configured deadline and retried exactly once
//! on transport failure or timeout; API errors are deterministic and are
//! surfaced immediately.

use async_trait::async_trait;
use listguard_core::ServiceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// External service settings, constructed once and passed into the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// API key for the model service
    #[serde(default)]
    pub api_key: String,

    /// Service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model id for vision analysis
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Model id for copy generation
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Sampling temperature for generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-call deadline in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            vision_model: default_vision_model(),
            generation_model: default_generation_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://dashscope.aliyuncs.com/api/v1".to_string()
}

fn default_vision_model() -> String {
    "qwen-vl-plus".to_string()
}

fn default_generation_model() -> String {
    "qwen-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_timeout_secs() -> u64 {
    30
}

/// External vision-analysis capability
#[async_trait]
pub trait VisionService: Send + Sync {
    /// Ask the vision model to read an image under the given instruction,
    /// returning the raw model content.
    async fn describe_image(
        &self,
        image_ref: &str,
        instruction: &str,
    ) -> Result<String, ServiceError>;
}

/// External text-generation capability
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Run one prompt through the generation model, returning the raw
    /// generated text.
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

/// HTTP client implementing both service traits against a DashScope-style API
pub struct DashScopeClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl DashScopeClient {
    /// Create a client from explicit service configuration
    pub fn new(config: ServiceConfig) -> listguard_core::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| listguard_core::Error::internal(format!("http client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// POST a JSON body with the configured deadline and a single retry on
    /// retryable failures.
    async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let deadline = self.timeout();
        let mut attempts = 0;

        loop {
            attempts += 1;
            let err = match tokio::time::timeout(deadline, self.send(url, body)).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => e,
                Err(_) => ServiceError::Timeout(deadline),
            };

            if attempts < 2 && err.is_retryable() {
                warn!(url, error = %err, "service call failed, retrying once");
                continue;
            }
            return Err(err);
        }
    }

    async fn send<B, T>(&self, url: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(url, status = status.as_u16(), "service call succeeded");
            response
                .json::<T>()
                .await
                .map_err(|e| ServiceError::Transport(format!("invalid response body: {}", e)))
        } else {
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            Err(ServiceError::Api {
                status: status.as_u16(),
                code: body.code,
                message: body.message,
            })
        }
    }
}

#[async_trait]
impl VisionService for DashScopeClient {
    async fn describe_image(
        &self,
        image_ref: &str,
        instruction: &str,
    ) -> Result<String, ServiceError> {
        let url = format!(
            "{}/services/aigc/multimodal-generation/generation",
            self.config.base_url
        );
        let request = VisionRequest {
            model: &self.config.vision_model,
            input: VisionInput {
                messages: vec![VisionMessage {
                    role: "user",
                    content: vec![
                        VisionFragment::Image { image: image_ref },
                        VisionFragment::Text { text: instruction },
                    ],
                }],
            },
        };

        let response: VisionResponse = self.post_json(&url, &request).await?;
        response
            .output
            .choices
            .into_iter()
            .next()
            .and_then(|choice| {
                choice
                    .message
                    .content
                    .into_iter()
                    .find_map(|fragment| fragment.text)
            })
            .ok_or(ServiceError::EmptyResponse)
    }
}

#[async_trait]
impl GenerationService for DashScopeClient {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = format!(
            "{}/services/aigc/text-generation/generation",
            self.config.base_url
        );
        let request = GenerationRequest {
            model: &self.config.generation_model,
            input: MessagesInput {
                messages: vec![TextMessage {
                    role: "user",
                    content: prompt,
                }],
            },
            parameters: GenerationParameters {
                result_format: "message",
                temperature: self.config.temperature,
            },
        };

        let response: GenerationResponse = self.post_json(&url, &request).await?;
        response
            .output
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ServiceError::EmptyResponse)
    }
}

// =============================================================================
// Wire structures
// =============================================================================

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    input: MessagesInput<'a>,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct MessagesInput<'a> {
    messages: Vec<TextMessage<'a>>,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct GenerationParameters {
    result_format: &'static str,
    temperature: f32,
}

#[derive(Serialize)]
struct VisionRequest<'a> {
    model: &'a str,
    input: VisionInput<'a>,
}

#[derive(Serialize)]
struct VisionInput<'a> {
    messages: Vec<VisionMessage<'a>>,
}

#[derive(Serialize)]
struct VisionMessage<'a> {
    role: &'a str,
    content: Vec<VisionFragment<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum VisionFragment<'a> {
    Image { image: &'a str },
    Text { text: &'a str },
}

#[derive(Deserialize)]
struct GenerationResponse {
    output: GenerationOutput,
}

#[derive(Deserialize)]
struct GenerationOutput {
    #[serde(default)]
    choices: Vec<GenerationChoice>,
}

#[derive(Deserialize)]
struct GenerationChoice {
    message: GenerationMessage,
}

#[derive(Deserialize)]
struct GenerationMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct VisionResponse {
    output: VisionOutput,
}

#[derive(Deserialize)]
struct VisionOutput {
    #[serde(default)]
    choices: Vec<VisionChoice>,
}

#[derive(Deserialize)]
struct VisionChoice {
    message: VisionResponseMessage,
}

#[derive(Deserialize)]
struct VisionResponseMessage {
    #[serde(default)]
    content: Vec<VisionResponseFragment>,
}

#[derive(Deserialize)]
struct VisionResponseFragment {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_request_wire_shape() {
        let request = GenerationRequest {
            model: "qwen-turbo",
            input: MessagesInput {
                messages: vec![TextMessage {
                    role: "user",
                    content: "hello",
                }],
            },
            parameters: GenerationParameters {
                result_format: "message",
                temperature: 0.8,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "qwen-turbo");
        assert_eq!(json["input"]["messages"][0]["content"], "hello");
        assert_eq!(json["parameters"]["result_format"], "message");
    }

    #[test]
    fn test_vision_request_carries_image_then_text() {
        let request = VisionRequest {
            model: "qwen-vl-plus",
            input: VisionInput {
                messages: vec![VisionMessage {
                    role: "user",
                    content: vec![
                        VisionFragment::Image { image: "img.jpg" },
                        VisionFragment::Text { text: "读取文字" },
                    ],
                }],
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        let content = &json["input"]["messages"][0]["content"];
        assert_eq!(content[0]["image"], "img.jpg");
        assert_eq!(content[1]["text"], "读取文字");
    }

    #[test]
    fn test_vision_response_parses_text_fragment() {
        let body = r#"{"output":{"choices":[{"message":{"role":"assistant","content":[{"text":"享受美味"}]}}]}}"#;
        let response: VisionResponse = serde_json::from_str(body).unwrap();
        let text = response.output.choices[0].message.content[0]
            .text
            .as_deref();
        assert_eq!(text, Some("享受美味"));
    }

    #[test]
    fn test_generation_response_parses_content() {
        let body = r#"{"output":{"choices":[{"message":{"role":"assistant","content":"三个标题"}}]}}"#;
        let response: GenerationResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.output.choices[0].message.content, "三个标题");
    }

    #[test]
    fn test_config_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.vision_model, "qwen-vl-plus");
        assert_eq!(config.generation_model, "qwen-turbo");
        assert_eq!(config.timeout_secs, 30);
    }
}
