//! lookup_plant — fetch one plant definition from the plant
//! definitions table.
//!
//! Unlike lookup_user, every failure here is non-terminal: a missing or
//! unreadable plant is reported back to the engine, which continues
//! with the user's other plants.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ToolError, ToolResult};
use crate::types::{AdvisorTool, ToolContext, ToolOutput};

pub struct LookupPlant;

#[async_trait]
impl AdvisorTool for LookupPlant {
    fn name(&self) -> &str {
        "lookup_plant"
    }

    fn description(&self) -> &str {
        "Look up detailed care requirements for a single plant by its plant ID"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "plant_id": {
                    "type": "string",
                    "description": "The ID of the plant to fetch"
                }
            },
            "required": ["plant_id"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> ToolResult<ToolOutput> {
        let plant_id = args["plant_id"]
            .as_str()
            .ok_or_else(|| ToolError::Other("missing 'plant_id' argument".into()))?;

        let item = match ctx.store.get_plant(plant_id).await {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(plant_id = %plant_id, error = %e, "plant lookup failed");
                return Ok(ToolOutput::failure(
                    self.name(),
                    format!("A database error occurred while fetching plant data for '{plant_id}'."),
                ));
            }
        };

        let Some(item) = item else {
            return Ok(ToolOutput::failure(
                self.name(),
                format!("No plant data found for plant ID '{plant_id}'."),
            ));
        };

        let common_name = item["common_name"].as_str().unwrap_or("unknown").to_string();
        tracing::debug!(plant_id = %plant_id, common_name = %common_name, "plant data found");

        Ok(ToolOutput::success(
            self.name(),
            item,
            format!("Found plant data for '{plant_id}' ({common_name})"),
        ))
    }
}
