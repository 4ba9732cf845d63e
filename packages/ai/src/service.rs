// ABOUTME: AI service for text, structured and document-reading calls to a Messages API
// ABOUTME: Handles API requests, response parsing, markdown fence stripping and usage logging

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use taxify_config::{Config, DEFAULT_AI_API_URL, DEFAULT_MODEL};
use thiserror::Error;
use tracing::{error, info};

use crate::data_uri::DataUri;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Extraction should be as deterministic as the model allows
const STRUCTURED_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("Empty response")]
    EmptyResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    Image { source: Base64Source },
    Document { source: Base64Source },
}

#[derive(Debug, Serialize)]
struct Base64Source {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: String,
    data: String,
}

impl ContentPart {
    fn from_document(document: &DataUri) -> Self {
        let source = Base64Source {
            source_type: "base64",
            media_type: document.media_type().to_string(),
            data: document.data().to_string(),
        };
        if document.is_pdf() {
            ContentPart::Document { source }
        } else {
            ContentPart::Image { source }
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[allow(dead_code)]
    id: String,
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// Strip markdown code fences (```json ... ```) around a model reply
pub fn strip_code_fences(text: &str) -> &str {
    let cleaned_text = text.trim();
    if !cleaned_text.starts_with("```") {
        return cleaned_text;
    }
    // Skip the opening fence line, then cut at the closing fence
    let start = cleaned_text.find('\n').map(|i| i + 1).unwrap_or(cleaned_text.len());
    let end = cleaned_text[start..]
        .rfind("```")
        .map(|i| i + start)
        .unwrap_or(cleaned_text.len());
    cleaned_text[start..end].trim()
}

/// AI service for making generation calls
pub struct AIService {
    client: Client,
    api_key: Option<String>,
    model: String,
    api_url: String,
}

impl AIService {
    /// Create HTTP client with timeout configuration
    fn create_client(request_timeout: Duration, connect_timeout: Duration) -> AIServiceResult<Client> {
        Ok(Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?)
    }

    /// Creates a service from the runtime configuration
    pub fn from_config(config: &Config) -> AIServiceResult<Self> {
        if config.api_key.is_none() {
            info!("ANTHROPIC_API_KEY not set - AI features will fall back to static text");
        }
        if config.model != DEFAULT_MODEL {
            info!("Using custom model: {}", config.model);
        }

        Ok(Self {
            client: Self::create_client(config.request_timeout, config.connect_timeout)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            api_url: config.api_url.clone(),
        })
    }

    /// Creates a new AI service instance with a specific API key and model
    pub fn with_api_key_and_model(api_key: String, model: String) -> AIServiceResult<Self> {
        Ok(Self {
            client: Self::create_client(Duration::from_secs(120), Duration::from_secs(10))?,
            api_key: Some(api_key),
            model,
            api_url: DEFAULT_AI_API_URL.to_string(),
        })
    }

    /// Point the service at a different Messages endpoint
    pub fn with_endpoint(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send(&self, request: MessagesRequest) -> AIServiceResult<AIResponse<String>> {
        let api_key = self.api_key.as_ref().ok_or(AIServiceError::NoApiKey)?;

        info!(
            "Making AI API request: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("AI API request timed out");
                    AIServiceError::ApiError(
                        "Request timed out. The AI service may be overloaded or unavailable."
                            .to_string(),
                    )
                } else if e.is_connect() {
                    error!("Failed to connect to AI API: {}", e);
                    AIServiceError::ApiError(format!(
                        "Connection failed: {}. Please check your internet connection.",
                        e
                    ))
                } else {
                    error!("AI API request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("AI API error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let api_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        info!(
            "AI API usage: input_tokens={}, output_tokens={}",
            api_response.usage.input_tokens, api_response.usage.output_tokens
        );

        // Concatenate the text blocks; tool or thinking blocks carry no answer text
        let texts: Vec<String> = api_response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect();
        if texts.is_empty() {
            return Err(AIServiceError::InvalidResponse);
        }

        Ok(AIResponse {
            data: texts.join(""),
            usage: api_response.usage,
        })
    }

    fn user_message(content: MessageContent) -> Vec<Message> {
        vec![Message {
            role: "user".to_string(),
            content,
        }]
    }

    fn parse_structured<T: for<'de> Deserialize<'de>>(text: &str) -> AIServiceResult<T> {
        let json_text = strip_code_fences(text);
        if json_text.is_empty() {
            return Err(AIServiceError::EmptyResponse);
        }
        serde_json::from_str(json_text).map_err(|e| {
            error!(
                "JSON parsing failed: {}. JSON snippet: {}",
                e,
                json_text.chars().take(500).collect::<String>()
            );
            AIServiceError::ParseError(format!("Failed to parse JSON: {}", e))
        })
    }

    /// Makes a structured generation call
    /// The prompt should request JSON output and the response will be parsed
    pub async fn generate_structured<T: for<'de> Deserialize<'de>>(
        &self,
        prompt: String,
        system_prompt: Option<String>,
    ) -> AIServiceResult<AIResponse<T>> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: STRUCTURED_TEMPERATURE,
            messages: Self::user_message(MessageContent::Text(prompt)),
            system: system_prompt,
        };

        let response = self.send(request).await?;
        Ok(AIResponse {
            data: Self::parse_structured(&response.data)?,
            usage: response.usage,
        })
    }

    /// Structured generation over an attached image or PDF
    pub async fn generate_structured_from_document<T: for<'de> Deserialize<'de>>(
        &self,
        document: &DataUri,
        instruction: String,
        system_prompt: Option<String>,
    ) -> AIServiceResult<AIResponse<T>> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: STRUCTURED_TEMPERATURE,
            messages: Self::user_message(MessageContent::Parts(vec![
                ContentPart::from_document(document),
                ContentPart::Text { text: instruction },
            ])),
            system: system_prompt,
        };

        let response = self.send(request).await?;
        Ok(AIResponse {
            data: Self::parse_structured(&response.data)?,
            usage: response.usage,
        })
    }

    /// Makes a text generation call
    pub async fn generate_text(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        max_tokens: Option<u32>,
    ) -> AIServiceResult<AIResponse<String>> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: DEFAULT_TEMPERATURE,
            messages: Self::user_message(MessageContent::Text(prompt)),
            system: system_prompt,
        };

        self.send(request).await
    }
}
