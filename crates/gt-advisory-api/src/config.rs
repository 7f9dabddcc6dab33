//! Advisory API server configuration.

use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// AWS region for Bedrock and DynamoDB (BEDROCK_REGION env var).
    #[serde(default = "default_region")]
    pub aws_region: String,
    /// Bedrock model ID (BEDROCK_MODEL_ID env var).
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// User data table name (USER_DATA_TABLE_NAME env var).
    #[serde(default = "default_user_table")]
    pub user_table: String,
    /// Plant definitions table name (PLANT_DEFINITIONS_TABLE_NAME env var).
    #[serde(default = "default_plant_table")]
    pub plant_table: String,
    /// Base URL of the forecast API (FORECAST_BASE_URL env var).
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Enable the AWS Bedrock engine (BEDROCK_ENABLED env var); when
    /// off, a canned sample advisor serves requests.
    #[serde(default)]
    pub bedrock_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_region() -> String {
    "eu-west-2".to_string()
}

fn default_model_id() -> String {
    "amazon.nova-lite-v1:0".to_string()
}

fn default_user_table() -> String {
    "plant_database_users".to_string()
}

fn default_plant_table() -> String {
    "garden_plants".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(region) = std::env::var("BEDROCK_REGION") {
            config.aws_region = region;
        }
        if let Ok(model_id) = std::env::var("BEDROCK_MODEL_ID") {
            config.model_id = model_id;
        }
        if let Ok(table) = std::env::var("USER_DATA_TABLE_NAME") {
            config.user_table = table;
        }
        if let Ok(table) = std::env::var("PLANT_DEFINITIONS_TABLE_NAME") {
            config.plant_table = table;
        }
        if let Ok(url) = std::env::var("FORECAST_BASE_URL") {
            config.forecast_base_url = url;
        }
        config.bedrock_enabled = std::env::var("BEDROCK_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        config
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            aws_region: default_region(),
            model_id: default_model_id(),
            user_table: default_user_table(),
            plant_table: default_plant_table(),
            forecast_base_url: default_forecast_base_url(),
            bedrock_enabled: false,
        }
    }
}
