use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Instruction template handed to the advisory engine when the caller
/// supplied an identifier. The wording is a contract with the engine's
/// system prompt and must not drift.
pub const ADVICE_INSTRUCTION_TEMPLATE: &str = "Give me plant advice for user_id ";

/// Which invocation shape delivered the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Raw invocation payload, no HTTP envelope.
    Direct,
    /// HTTP-gateway proxy event (httpMethod/path/headers/body).
    Gateway,
}

/// A parsed, transport-neutral request.
///
/// Exactly one of `user_id` / `instruction`'s origin applies: when the
/// caller supplied an identifier, `instruction` is synthesized from it;
/// a free-form instruction (direct transport only) is passed through
/// unchanged and `user_id` stays `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRequest {
    /// Invocation shape this request arrived on.
    pub transport: Transport,
    /// Validated, trimmed caller identifier (if one was supplied).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Instruction for the advisory engine.
    pub instruction: String,
    /// Correlation ID threaded through logs and every render (UUIDv7).
    pub request_id: Uuid,
}

impl NormalizedRequest {
    /// Build a request from a validated identifier, synthesizing the
    /// engine instruction from the fixed template.
    pub fn for_identifier(transport: Transport, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            transport,
            instruction: format!("{ADVICE_INSTRUCTION_TEMPLATE}{user_id}"),
            user_id: Some(user_id),
            request_id: Uuid::now_v7(),
        }
    }

    /// Build a request from a caller-supplied free-form instruction.
    pub fn for_instruction(transport: Transport, instruction: impl Into<String>) -> Self {
        Self {
            transport,
            user_id: None,
            instruction: instruction.into(),
            request_id: Uuid::now_v7(),
        }
    }

    /// Thread an externally generated correlation ID through this
    /// request (the dispatcher mints one before parsing so that early
    /// failures share it).
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }
}
