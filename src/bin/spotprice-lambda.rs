//! AWS Lambda entry point for API Gateway (or direct) invocations
//!
//! Build with `--features lambda`. The SDK config and region catalog source
//! are loaded once per cold start; each event gets its own lookup.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use spotprice::config::Config;
use spotprice::event::GatewayEvent;
use spotprice::logging::{init_logging, LogLevel};
use spotprice::{Ec2SourceProvider, PriceService};
use tracing::debug;

async fn function_handler(
    event: LambdaEvent<Value>,
    service: &PriceService<Ec2SourceProvider>,
) -> Result<String, Error> {
    debug!("{}", event.payload);
    let gateway_event: GatewayEvent = serde_json::from_value(event.payload)?;
    Ok(service.handle_event(&gateway_event).await?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load(None)?;
    let level = LogLevel::from_env()?
        .or(config.logging.level)
        .unwrap_or_default();
    init_logging(level, config.logging.json);

    let provider = Ec2SourceProvider::from_config(&config).await;
    let service = PriceService::new(provider).with_deadline(config.deadline());
    let service = &service;

    run(service_fn(move |event| async move {
        function_handler(event, service).await
    }))
    .await
}
