use csv_preprocess_core::contract::HandlerResponse;
use csv_preprocess_lambda::adapters::s3::S3ObjectStore;
use csv_preprocess_lambda::config::PreprocessConfig;
use csv_preprocess_lambda::handlers::preprocess::handle_preprocess_event;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

struct RuntimeDependencies {
    config: PreprocessConfig,
    store: S3ObjectStore,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<HandlerResponse, Error> {
    handle_preprocess_event(event.payload, &deps.config, &deps.store).map_err(Error::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_current_span(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = PreprocessConfig::from_env().map_err(|error| {
        tracing::error!(event = "configuration_invalid", error = %error, "{error}");
        Error::from(error)
    })?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config,
        store: S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config)),
    };

    tracing::info!(
        event = "runtime_started",
        processed_bucket = %deps.config.processed_bucket,
        raw_prefix = %deps.config.raw_prefix,
        processed_prefix = %deps.config.processed_prefix,
        "preprocessor ready"
    );

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
