// This is the Lambda bootstrap entry point for the Worker function

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use readaloud::core::config::AppConfig;
use readaloud::{FileProcessor, PollySynthesizer, ProcessingError, S3Store};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    readaloud::setup_logging();

    let config = AppConfig::from_env()
        .map_err(ProcessingError::Config)
        .map_err(|e| {
            error!("{}", e);
            Error::from(e)
        })?;
    info!(
        language_code = %config.language_code,
        audio_encoding = %config.audio_encoding,
        engine = %config.engine,
        "Starting readaloud worker"
    );

    // Clients are built once per cold start and shared by every invocation.
    let shared_config = aws_config::load_from_env().await;
    let store = S3Store::from_conf(&shared_config);
    let speech = PollySynthesizer::from_conf(&shared_config, &config.engine);
    let processor = FileProcessor::new(store, speech, config);
    let processor = &processor;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        readaloud::worker::handler(processor, event).await
    }))
    .await
}
