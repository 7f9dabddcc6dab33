//! Capability tools the GreenThumb advisory engine may invoke.
//!
//! Provides a `PlantStore` abstraction over the two backing data tables
//! (DynamoDB in production, in-memory mock in tests) and the 3 declared
//! capabilities: lookup_user, lookup_plant, fetch_forecast.

pub mod error;
pub mod mock;
pub mod store;
pub mod tools;
pub mod types;

// Re-export key types for convenience
pub use error::{ToolError, ToolResult};
pub use mock::MockStore;
pub use store::{DynamoStore, PlantStore};
pub use tools::ToolRegistry;
pub use types::{AdvisorTool, ToolContext, ToolOutput, UserRecord};
