/// readaloud - turns text files uploaded to S3 into spoken audio with Amazon Polly.
///
/// The worker Lambda is subscribed to `ObjectCreated` notifications on a
/// bucket. For every uploaded object it:
/// 1. Downloads the object and decodes it as UTF-8 text
/// 2. Picks the first Polly voice whose primary language is the configured one
/// 3. Synthesizes the whole text in a single request
/// 4. Uploads the audio next to the source as `<key>_output.mp3`
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - S3 for both the source text and the synthesized audio
/// - Amazon Polly for the voice catalog and speech synthesis
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use readaloud::core::config::AppConfig;
/// use readaloud::core::models::ChangeNotification;
/// use readaloud::{FileProcessor, PollySynthesizer, S3Store};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     readaloud::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let shared_config = aws_config::load_from_env().await;
///     let processor = FileProcessor::new(
///         S3Store::from_conf(&shared_config),
///         PollySynthesizer::from_conf(&shared_config, &config.engine),
///         config,
///     );
///
///     let outcome = processor
///         .process(&ChangeNotification::new("my-bucket", "notes.txt"))
///         .await?;
///     println!("{outcome:?}");
///     Ok(())
/// }
/// ```
// Module declarations
pub mod clients;
pub mod core;
pub mod errors;
pub mod worker;

pub use clients::{ObjectStore, PollySynthesizer, S3Store, SpeechSynthesizer};
pub use errors::ProcessingError;
pub use worker::FileProcessor;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless; later
/// calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// readaloud::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
