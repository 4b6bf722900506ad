use aws_wafv2_providers::{client::load_sdk_config, entrypoint, export::wafv2::SdkConfig, Config};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

use aws_config as _;
use aws_sdk_wafv2 as _;
use serde as _;
use uuid as _;
use wafv2_macros as _;

async fn handler(sdk_config: &SdkConfig, event: LambdaEvent<Value>) -> Result<Value, Error> {
    tracing::debug!(request_id = %event.context.request_id, "received invocation");
    Ok(entrypoint::handle_raw_event(sdk_config, event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        // the log group already names the function
        .with_target(false)
        // CloudWatch adds the ingestion time
        .without_time()
        .init();

    let sdk_config = load_sdk_config(&config).await;
    tracing::info!(endpoint_url = ?config.endpoint_url, "provider starting");

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let sdk_config = &sdk_config;
        async move { handler(sdk_config, event).await }
    }))
    .await
}
