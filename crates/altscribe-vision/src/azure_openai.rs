//! Azure OpenAI chat-completions generator for image alt-text

use altscribe_core::constants::DESCRIPTION_MAX_TOKENS;
use altscribe_core::{Config, GeneratedDescription, SignedAccessUrl};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use crate::generator::DescriptionGenerator;
use crate::prompts::{ALT_TEXT_INSTRUCTION, SYSTEM_PROMPT};

/// Connection settings for one Azure OpenAI deployment
#[derive(Clone)]
pub struct AzureOpenAiConfig {
    /// Resource endpoint (e.g., "https://my-resource.openai.azure.com/")
    pub endpoint: String,
    pub api_key: String,
    /// Deployment name of the vision-capable model
    pub deployment: String,
    pub api_version: String,
}

impl AzureOpenAiConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            endpoint: config
                .openai_endpoint()
                .context("AZURE_OPENAI_ENDPOINT not configured")?
                .to_string(),
            api_key: config
                .openai_api_key()
                .context("AZURE_OPENAI_API_KEY not configured")?
                .to_string(),
            deployment: config.openai_deployment().to_string(),
            api_version: config.openai_api_version().to_string(),
        })
    }
}

/// Azure OpenAI alt-text generator
pub struct AzureOpenAiDescriber {
    http_client: reqwest::Client,
    config: AzureOpenAiConfig,
}

impl Debug for AzureOpenAiDescriber {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AzureOpenAiDescriber")
            .field("endpoint", &self.config.endpoint)
            .field("deployment", &self.config.deployment)
            .finish()
    }
}

// Chat Completions request/response structures
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
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
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl AzureOpenAiDescriber {
    pub fn new(config: AzureOpenAiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client for Azure OpenAI")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }

    fn build_request(image_url: &SignedAccessUrl) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: ALT_TEXT_INSTRUCTION.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl {
                                url: image_url.as_str().to_string(),
                            },
                        },
                    ]),
                },
            ],
            max_tokens: DESCRIPTION_MAX_TOKENS,
        }
    }
}

#[async_trait]
impl DescriptionGenerator for AzureOpenAiDescriber {
    async fn describe(&self, image_url: &SignedAccessUrl) -> Result<GeneratedDescription> {
        let start = std::time::Instant::now();
        let body = Self::build_request(image_url);

        tracing::debug!(
            deployment = %self.config.deployment,
            image = %image_url.canonical(),
            "Sending alt-text request to Azure OpenAI"
        );

        let response = self
            .http_client
            .post(self.completions_url())
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send request to Azure OpenAI")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Prefer the structured error message when the service sends one
            if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(&error_text) {
                if let Some(error_obj) = error_json.get("error") {
                    let error_message = error_obj
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or("Unknown Azure OpenAI error");
                    let error_code = error_obj
                        .get("code")
                        .and_then(|t| t.as_str())
                        .unwrap_or("api_error");
                    return Err(anyhow::anyhow!(
                        "Azure OpenAI error ({}): {} - Status: {}",
                        error_code,
                        error_message,
                        status
                    ));
                }
            }

            return Err(anyhow::anyhow!(
                "Azure OpenAI request failed: {} - {}",
                status,
                error_text
            ));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse Azure OpenAI response")?;

        let description = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context("No description in Azure OpenAI response")?;

        tracing::info!(
            deployment = %self.config.deployment,
            image = %image_url.canonical(),
            prompt_tokens = completion.usage.as_ref().map(|u| u.prompt_tokens),
            completion_tokens = completion.usage.as_ref().map(|u| u.completion_tokens),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Alt-text generated"
        );

        Ok(GeneratedDescription {
            url: image_url.canonical().to_string(),
            description,
        })
    }
}
