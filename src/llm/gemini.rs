use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::llm::provider::LLMProvider;
use crate::models::{Completion, CompletionRequest, Message, Part, Role, ToolCall, ToolSpec};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    temperature: f32,
    base_url: String,
}

#[derive(Serialize)]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<GeminiTool>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

#[derive(Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiTool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<GeminiError>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: Option<String>, temperature: f32) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| crate::config::DEFAULT_MODEL.to_string()),
            temperature,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request(&self, request: CompletionRequest) -> GeminiRequest {
        let tools = if request.tools.is_empty() {
            Vec::new()
        } else {
            vec![GeminiTool {
                function_declarations: request.tools.into_iter().map(to_declaration).collect(),
            }]
        };

        GeminiRequest {
            system_instruction: request.system.map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(text),
                    ..Default::default()
                }],
            }),
            contents: request.messages.into_iter().map(to_content).collect(),
            tools,
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: 8192,
            },
        }
    }
}

fn to_declaration(spec: ToolSpec) -> FunctionDeclaration {
    FunctionDeclaration {
        name: spec.name,
        description: spec.description,
        parameters: spec.parameters,
    }
}

fn to_content(message: Message) -> GeminiContent {
    let role = match message.role {
        Role::User => "user",
        Role::Model => "model",
    };

    let parts = message
        .parts
        .into_iter()
        .map(|part| match part {
            Part::Text(text) => GeminiPart {
                text: Some(text),
                ..Default::default()
            },
            Part::ToolCall(call) => GeminiPart {
                function_call: Some(FunctionCall {
                    name: call.name,
                    args: call.arguments,
                }),
                ..Default::default()
            },
            Part::ToolResult { name, content } => GeminiPart {
                function_response: Some(FunctionResponse {
                    name,
                    // Gemini only accepts an object here
                    response: match content {
                        Value::Object(map) => Value::Object(map),
                        other => serde_json::json!({ "result": other }),
                    },
                }),
                ..Default::default()
            },
        })
        .collect();

    GeminiContent {
        role: Some(role.to_string()),
        parts,
    }
}

fn parse_completion(response: GeminiResponse) -> Result<Completion> {
    if let Some(error) = response.error {
        return Err(Error::LLMApi(error.message));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| Error::LLMApi("Gemini returned no candidates".to_string()))?;

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

    let calls: Vec<ToolCall> = parts
        .iter()
        .filter_map(|p| p.function_call.as_ref())
        .map(|fc| ToolCall {
            name: fc.name.clone(),
            arguments: fc.args.clone(),
        })
        .collect();

    if !calls.is_empty() {
        return Ok(Completion::ToolCalls(calls));
    }

    let text = parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");

    if text.trim().is_empty() {
        return Err(Error::LLMApi(format!(
            "Empty response from Gemini (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(Completion::Text(text))
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        tracing::debug!(
            "Sending ~{} tokens to {} ({} tools)",
            request.estimate_tokens(),
            self.model,
            request.tools.len()
        );

        let body = self.build_request(request);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::LLMApi(format!(
                "Gemini API error ({}): {}",
                status, body
            )));
        }

        let result: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::LLMApi(format!("Failed to parse Gemini response: {}", e)))?;

        parse_completion(result)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
