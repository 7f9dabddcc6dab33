//! fetch_forecast — HTTP GET against an Open-Meteo-compatible forecast
//! endpoint for the user's coordinates.

use async_trait::async_trait;
use serde_json::json;

use crate::error::{ToolError, ToolResult};
use crate::types::{AdvisorTool, ToolContext, ToolOutput};

/// Current-conditions fields requested from the forecast API.
const CURRENT_FIELDS: &str = "temperature_2m,wind_speed_10m,relative_humidity_2m";
/// Hourly forecast fields requested from the forecast API.
const HOURLY_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,wind_speed_10m,precipitation,temperature_80m";

pub struct FetchForecast;

#[async_trait]
impl AdvisorTool for FetchForecast {
    fn name(&self) -> &str {
        "fetch_forecast"
    }

    fn description(&self) -> &str {
        "Fetch current weather and hourly forecast for a latitude/longitude"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "latitude": {
                    "type": "number",
                    "description": "Latitude in decimal degrees"
                },
                "longitude": {
                    "type": "number",
                    "description": "Longitude in decimal degrees"
                }
            },
            "required": ["latitude", "longitude"]
        })
    }

    async fn execute(
        &self,
        args: serde_json::Value,
        ctx: &ToolContext<'_>,
    ) -> ToolResult<ToolOutput> {
        let latitude = args["latitude"]
            .as_f64()
            .ok_or_else(|| ToolError::Other("missing 'latitude' argument".into()))?;
        let longitude = args["longitude"]
            .as_f64()
            .ok_or_else(|| ToolError::Other("missing 'longitude' argument".into()))?;

        let url = format!(
            "{}/v1/forecast?latitude={latitude}&longitude={longitude}&current={CURRENT_FIELDS}&hourly={HOURLY_FIELDS}",
            ctx.forecast_base_url.trim_end_matches('/'),
        );

        let response = ctx
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::Forecast(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Forecast(format!(
                "forecast endpoint returned HTTP {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ToolError::Forecast(format!("invalid forecast payload: {e}")))?;

        tracing::debug!(latitude, longitude, "forecast fetched");

        Ok(ToolOutput::success(
            self.name(),
            body,
            format!("Fetched forecast for lat {latitude}, lon {longitude}"),
        ))
    }
}
