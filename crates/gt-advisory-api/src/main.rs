//! GreenThumb Advisory API — plant advisory boundary server.
//!
//! Accepts raw invocation events (direct or gateway shape) on a single
//! endpoint, dispatches them through the advisory engine, and renders
//! the transport-appropriate response.

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use gt_advisor_tools::DynamoStore;
use gt_advisory_api::config::ApiConfig;
use gt_advisory_api::engine::{BedrockAdvisor, BedrockConfig};
use gt_advisory_api::routes;
use gt_advisory_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gt-advisory-api starting");

    let config = ApiConfig::from_env();

    // Wire the Bedrock engine if enabled, otherwise serve canned advice.
    let state = if config.bedrock_enabled {
        tracing::info!(region = %config.aws_region, model_id = %config.model_id, "using bedrock engine");
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;
        let dynamo = aws_sdk_dynamodb::Client::new(&aws_config);
        let bedrock = aws_sdk_bedrockruntime::Client::new(&aws_config);
        let store = Arc::new(DynamoStore::new(
            dynamo,
            config.user_table.clone(),
            config.plant_table.clone(),
        ));
        let advisor = BedrockAdvisor::new(
            bedrock,
            BedrockConfig {
                model_id: config.model_id.clone(),
                ..BedrockConfig::default()
            },
            store,
            config.forecast_base_url.clone(),
        );
        AppState::new(Arc::new(advisor))
    } else {
        tracing::warn!("BEDROCK_ENABLED not set — using canned sample advisor");
        AppState::with_sample_engine()
    };

    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
