//! AWS Bedrock advisory engine — Converse API with tool use.
//!
//! Declares the 3 capability tools (lookup_user, lookup_plant,
//! fetch_forecast) to the model and runs the tool-invocation loop until
//! the model produces a final answer, then parses the expected
//! `{details, summary}` JSON out of the reply text.

use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput, Message, StopReason, SystemContentBlock, Tool,
    ToolConfiguration, ToolInputSchema, ToolResultBlock, ToolResultContentBlock,
    ToolSpecification, ToolUseBlock,
};
use aws_smithy_types::{Document, Number as SmithyNumber};
use serde_json::{Value, json};
use std::sync::Arc;

use gt_advisor_tools::{PlantStore, ToolContext, ToolRegistry};
use gt_protocol::AdvisoryResult;

use super::{AdvisoryEngine, EngineError};

/// System prompt for the gardening advisor. The workflow wording is a
/// contract with the instruction template the boundary synthesizes.
const SYSTEM_PROMPT: &str = r#"You are a highly knowledgeable Gardening Weather Advisor with database lookup and weather forecast capabilities. Your goal is to provide tailored weather-related advice for a user's specific plants based on current and forecast conditions.

Workflow:

1. When the request provides a user_id (e.g. "Give me plant advice for user_id testuser1"), you MUST first call lookup_user to get the registered latitude, longitude, and plants list. If the user directly provides coordinates and plant IDs, skip this step.

2. For each plant ID in the list, call lookup_plant to get its specific requirements. Call it once per plant ID. If a lookup reports an error, note it and continue with the other plants. If the user has no plants registered, inform them and stop.

3. Once you have coordinates, call fetch_forecast to get current weather and the hourly forecast.

4. For each plant, compare current and forecast conditions against the plant's requirements (temperature range, frost tolerance, humidity, wind tolerance, watering needs, common weather risks, protection methods). Only mention conditions that require attention or action; if conditions are ideal for a plant, say so in one sentence without listing every metric.

Respond with ONLY a JSON object with exactly two attributes (no markdown, no explanation):
{
    "details": {
        "Plant Name 1": "Specific advice for this plant...",
        "Plant Name 2": "Specific advice for this plant..."
    },
    "summary": "A concise summary of the overall advice and current conditions."
}

The details object must be keyed by plant common name. Handle errors gracefully inside this structure and keep a helpful, knowledgeable tone."#;

/// Configuration for the Bedrock advisory engine.
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    /// Bedrock model ID (e.g., "amazon.nova-lite-v1:0").
    pub model_id: String,
    /// Upper bound on tool-invocation rounds per request.
    pub max_tool_rounds: usize,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            model_id: "amazon.nova-lite-v1:0".into(),
            max_tool_rounds: 8,
        }
    }
}

/// Bedrock Converse advisory engine with the default capability set.
pub struct BedrockAdvisor {
    client: BedrockClient,
    config: BedrockConfig,
    registry: ToolRegistry,
    store: Arc<dyn PlantStore>,
    http: reqwest::Client,
    forecast_base_url: String,
}

impl BedrockAdvisor {
    /// Create a new engine with a pre-built Bedrock client.
    pub fn new(
        client: BedrockClient,
        config: BedrockConfig,
        store: Arc<dyn PlantStore>,
        forecast_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config,
            registry: ToolRegistry::with_defaults(),
            store,
            http: reqwest::Client::new(),
            forecast_base_url: forecast_base_url.into(),
        }
    }

    /// Declare the registry's tools to the Converse API.
    fn tool_config(&self) -> Result<ToolConfiguration, EngineError> {
        let mut builder = ToolConfiguration::builder();
        for tool in self.registry.iter() {
            let spec = ToolSpecification::builder()
                .name(tool.name())
                .description(tool.description())
                .input_schema(ToolInputSchema::Json(json_to_document(
                    &tool.parameters_schema(),
                )))
                .build()
                .map_err(|e| EngineError::Backend(format!("failed to build tool spec: {e}")))?;
            builder = builder.tools(Tool::ToolSpec(spec));
        }
        builder
            .build()
            .map_err(|e| EngineError::Backend(format!("failed to build tool config: {e}")))
    }

    /// Execute one model-requested tool call and package its output.
    async fn invoke_tool(&self, tool_use: &ToolUseBlock) -> Result<Value, EngineError> {
        let name = tool_use.name();
        let args = document_to_json(tool_use.input());

        let Some(tool) = self.registry.get(name) else {
            tracing::warn!(tool = %name, "model requested unknown tool");
            return Ok(json!({
                "success": false,
                "error": format!("unknown tool: {name}"),
            }));
        };

        let ctx = ToolContext {
            store: self.store.as_ref(),
            http: &self.http,
            forecast_base_url: &self.forecast_base_url,
        };

        tracing::debug!(tool = %name, "executing capability tool");
        let output = tool.execute(args, &ctx).await?;
        Ok(output.to_json())
    }
}

#[async_trait::async_trait]
impl AdvisoryEngine for BedrockAdvisor {
    async fn advise(&self, instruction: &str) -> Result<AdvisoryResult, EngineError> {
        let tool_config = self.tool_config()?;

        let first = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(instruction.to_string()))
            .build()
            .map_err(|e| EngineError::Backend(format!("failed to build message: {e}")))?;
        let mut messages = vec![first];

        for _round in 0..self.config.max_tool_rounds {
            let response = self
                .client
                .converse()
                .model_id(&self.config.model_id)
                .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
                .set_messages(Some(messages.clone()))
                .tool_config(tool_config.clone())
                .send()
                .await
                .map_err(|e| EngineError::Backend(format!("bedrock converse error: {e}")))?;

            let stop_reason = response.stop_reason().clone();
            let output = response.output().ok_or_else(|| {
                EngineError::Backend("no output in bedrock response".into())
            })?;
            let reply = match output {
                ConverseOutput::Message(msg) => msg.clone(),
                _ => {
                    return Err(EngineError::Backend(
                        "unexpected output shape in bedrock response".into(),
                    ));
                }
            };
            messages.push(reply.clone());

            if stop_reason == StopReason::ToolUse {
                let mut result_blocks = Vec::new();
                for block in reply.content() {
                    if let ContentBlock::ToolUse(tool_use) = block {
                        let output = self.invoke_tool(tool_use).await?;
                        let result_block = ToolResultBlock::builder()
                            .tool_use_id(tool_use.tool_use_id())
                            .content(ToolResultContentBlock::Json(json_to_document(&output)))
                            .build()
                            .map_err(|e| {
                                EngineError::Backend(format!("failed to build tool result: {e}"))
                            })?;
                        result_blocks.push(ContentBlock::ToolResult(result_block));
                    }
                }

                let results_message = Message::builder()
                    .role(ConversationRole::User)
                    .set_content(Some(result_blocks))
                    .build()
                    .map_err(|e| EngineError::Backend(format!("failed to build message: {e}")))?;
                messages.push(results_message);
                continue;
            }

            let text = reply
                .content()
                .iter()
                .find_map(|block| {
                    if let ContentBlock::Text(t) = block {
                        Some(t.clone())
                    } else {
                        None
                    }
                })
                .ok_or_else(|| EngineError::Backend("no text in bedrock reply".into()))?;

            return Ok(parse_advisory(&text));
        }

        Err(EngineError::Backend(format!(
            "tool loop did not settle within {} rounds",
            self.config.max_tool_rounds
        )))
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}

/// Parse the model's final text into an advisory result.
///
/// The model is instructed to emit `{details, summary}` JSON, but that
/// is not guaranteed: anything unparseable becomes the summary verbatim
/// with empty details.
fn parse_advisory(raw: &str) -> AdvisoryResult {
    let json_str = extract_json(raw);
    match serde_json::from_str::<AdvisoryResult>(json_str) {
        Ok(mut result) => {
            if result.details.is_null() {
                result.details = json!({});
            }
            result
        }
        Err(_) => AdvisoryResult::new(raw.trim(), json!({})),
    }
}

/// Extract JSON from model output that may be wrapped in markdown code
/// blocks.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    // Try ```json ... ``` first
    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    // Try ``` ... ```
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    // Assume raw JSON
    trimmed
}

/// Convert plain JSON into a Smithy document (tool schemas and results).
fn json_to_document(value: &Value) -> Document {
    match value {
        Value::Null => Document::Null,
        Value::Bool(b) => Document::Bool(*b),
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(SmithyNumber::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(SmithyNumber::NegInt(i))
            } else {
                Document::Number(SmithyNumber::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        Value::String(s) => Document::String(s.clone()),
        Value::Array(items) => Document::Array(items.iter().map(json_to_document).collect()),
        Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

/// Convert a Smithy document back into plain JSON (tool arguments).
fn document_to_json(doc: &Document) -> Value {
    match doc {
        Document::Null => Value::Null,
        Document::Bool(b) => Value::Bool(*b),
        Document::Number(n) => match n {
            SmithyNumber::PosInt(u) => Value::from(*u),
            SmithyNumber::NegInt(i) => Value::from(*i),
            SmithyNumber::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        },
        Document::String(s) => Value::String(s.clone()),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}
