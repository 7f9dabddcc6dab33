//! Plant data store abstraction — user and plant lookups by identifier.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use crate::error::{ToolError, ToolResult};
use crate::types::UserRecord;

/// Abstraction over the two backing data tables.
///
/// Analogous to `LogSource` in the log tooling sense — enables mocking
/// for tests and swappable backends.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// Fetch a user's registered location and plant list.
    /// `Ok(None)` means no record exists for that identifier.
    async fn get_user(&self, user_id: &str) -> ToolResult<Option<UserRecord>>;

    /// Fetch the full attribute item for a single plant definition.
    async fn get_plant(&self, plant_id: &str) -> ToolResult<Option<Value>>;
}

/// DynamoDB-backed store over the user and plant definition tables.
pub struct DynamoStore {
    client: DynamoClient,
    user_table: String,
    plant_table: String,
}

impl DynamoStore {
    pub fn new(
        client: DynamoClient,
        user_table: impl Into<String>,
        plant_table: impl Into<String>,
    ) -> Self {
        Self {
            client,
            user_table: user_table.into(),
            plant_table: plant_table.into(),
        }
    }
}

#[async_trait]
impl PlantStore for DynamoStore {
    async fn get_user(&self, user_id: &str) -> ToolResult<Option<UserRecord>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.user_table)
            .key("user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(map_store_error)?;

        let Some(item) = response.item else {
            return Ok(None);
        };

        let latitude = item
            .get("latitude")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok());
        let longitude = item
            .get("longitude")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse().ok());
        let plants = item
            .get("plants")
            .and_then(|v| v.as_l().ok())
            .map(|list| {
                list.iter()
                    .filter_map(|v| v.as_s().ok().cloned())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(UserRecord {
            latitude,
            longitude,
            plants,
        }))
    }

    async fn get_plant(&self, plant_id: &str) -> ToolResult<Option<Value>> {
        let response = self
            .client
            .get_item()
            .table_name(&self.plant_table)
            .key("plant_id", AttributeValue::S(plant_id.to_string()))
            .send()
            .await
            .map_err(map_store_error)?;

        Ok(response.item.map(|item| {
            Value::Object(
                item.iter()
                    .map(|(k, v)| (k.clone(), attribute_to_json(v)))
                    .collect(),
            )
        }))
    }
}

/// Map a DynamoDB SDK error to a typed tool error.
///
/// Modeled variants map directly; everything else falls back to
/// substring inspection of the SDK's error text (the opaque channel).
fn map_store_error(e: SdkError<GetItemError>) -> ToolError {
    let service_err = e.into_service_error();
    if service_err.is_provisioned_throughput_exceeded_exception()
        || service_err.is_request_limit_exceeded()
    {
        return ToolError::Throttled(service_err.to_string());
    }

    let text = service_err.to_string();
    let lower = text.to_lowercase();
    if lower.contains("accessdenied") || lower.contains("unauthorized") {
        ToolError::AccessDenied(text)
    } else if lower.contains("throttling") {
        ToolError::Throttled(text)
    } else if lower.contains("validation") {
        ToolError::Validation(text)
    } else {
        ToolError::Store(text)
    }
}

/// Convert a DynamoDB attribute value to plain JSON.
fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => match n.parse::<f64>().ok().and_then(serde_json::Number::from_f64)
        {
            Some(num) => Value::Number(num),
            None => Value::String(n.clone()),
        },
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), attribute_to_json(v)))
                .collect(),
        ),
        AttributeValue::Ss(set) => {
            Value::Array(set.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| match n.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                    Some(num) => Value::Number(num),
                    None => Value::String(n.clone()),
                })
                .collect(),
        ),
        _ => Value::Null,
    }
}
