//! Advisory engine abstraction.
//!
//! Turns an instruction ("Give me plant advice for user_id …") plus the
//! declared capability set into a structured recommendation. The
//! boundary treats the engine as a black box with one terminal outcome
//! per invocation: a result or a failure.

pub mod bedrock;
pub mod mock;

use async_trait::async_trait;

use gt_advisor_tools::ToolError;
use gt_protocol::AdvisoryResult;

/// How an advisory invocation failed.
///
/// Tool failures keep their typed variants end to end; only the engine
/// backend itself reports failures as opaque text (that channel crosses
/// a service boundary and has no richer shape to offer).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Typed failure raised by a capability tool.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Opaque failure text from the engine backend or its model.
    #[error("{0}")]
    Backend(String),
}

/// Trait for advisory engines.
#[async_trait]
pub trait AdvisoryEngine: Send + Sync {
    /// Produce advice for the given instruction. One attempt per
    /// request; retry policy, if any, lives behind this seam.
    async fn advise(&self, instruction: &str) -> Result<AdvisoryResult, EngineError>;

    /// Engine name (for logging).
    fn name(&self) -> &str;
}

pub use bedrock::{BedrockAdvisor, BedrockConfig};
pub use mock::MockAdvisor;
