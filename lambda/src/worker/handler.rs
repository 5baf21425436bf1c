#![allow(clippy::missing_errors_doc)]
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info};

use super::process::FileProcessor;
use crate::clients::{ObjectStore, SpeechSynthesizer};
use crate::core::models::ChangeNotification;

/// Lambda handler for the worker entrypoint. Parses the storage notification
/// and processes each named object in order, stopping at the first failure.
pub async fn function_handler<S, T>(
    processor: &FileProcessor<S, T>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error>
where
    S: ObjectStore,
    T: SpeechSynthesizer,
{
    info!(
        request_id = %event.context.request_id,
        "Worker Lambda received storage event payload: {:?}",
        event.payload
    );

    let notifications = ChangeNotification::from_event(&event.payload).map_err(|e| {
        error!(kind = e.kind(), "Failed to parse storage event: {}", e);
        Error::from(e)
    })?;

    if notifications.is_empty() {
        info!("Storage event names no objects; nothing to do");
    }

    let mut outcomes = Vec::with_capacity(notifications.len());
    for notification in &notifications {
        let outcome = processor.process(notification).await.map_err(|e| {
            error!(
                kind = e.kind(),
                bucket = %notification.bucket,
                key = %notification.key,
                "Failed to process object: {}",
                e
            );
            Error::from(e)
        })?;
        outcomes.push(outcome);
    }

    Ok(json!({ "results": outcomes }))
}

pub use self::function_handler as handler;
