//! lookup_user — fetch a user's location and plant list from the user
//! data table.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ToolError, ToolResult};
use crate::types::{AdvisorTool, ToolContext, ToolOutput};

pub struct LookupUser;

#[async_trait]
impl AdvisorTool for LookupUser {
    fn name(&self) -> &str {
        "lookup_user"
    }

    fn description(&self) -> &str {
        "Look up a user's registered latitude, longitude, and list of plant IDs"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "The ID of the user whose location and plant list is to be fetched"
                }
            },
            "required": ["user_id"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> ToolResult<ToolOutput> {
        let user_id = args["user_id"]
            .as_str()
            .ok_or_else(|| ToolError::Other("missing 'user_id' argument".into()))?;

        // A missing user is terminal: the whole request classifies as
        // not-found, so propagate instead of replying to the model.
        let record = ctx
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| ToolError::UserNotFound(user_id.to_string()))?;

        let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
            tracing::warn!(user_id = %user_id, "user record has incomplete location");
            return Ok(ToolOutput::failure(
                self.name(),
                format!("Location data is incomplete for user ID '{user_id}'."),
            ));
        };

        let plant_count = record.plants.len();
        tracing::debug!(user_id = %user_id, plant_count, "user data found");

        Ok(ToolOutput::success(
            self.name(),
            json!({
                "latitude": latitude,
                "longitude": longitude,
                "plants": record.plants,
            }),
            format!("Found user data for '{user_id}': {plant_count} registered plants"),
        ))
    }
}
