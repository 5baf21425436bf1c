use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProcessingError;

/// Fixed suffix appended to a source key to name its synthesized audio.
pub const OUTPUT_SUFFIX: &str = "_output.mp3";

/// Derives the output object key for a source object key.
#[must_use]
pub fn output_key(source_key: &str) -> String {
    format!("{source_key}{OUTPUT_SUFFIX}")
}

/// Whether a key names an object this handler would have written.
#[must_use]
pub fn is_output_key(key: &str) -> bool {
    key.ends_with(OUTPUT_SUFFIX)
}

const S3_TEST_EVENT: &str = "s3:TestEvent";

/// A single "object created or overwritten" notice from the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub bucket: String,
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct S3Event {
    #[serde(rename = "Records")]
    records: Vec<S3EventRecord>,
}

#[derive(Debug, Deserialize)]
struct S3EventRecord {
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: S3Bucket,
    object: S3Object,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: String,
}

// Storage-change payload carrying `bucket` and `name`; anything else is ignored.
#[derive(Debug, Deserialize)]
struct StorageObjectData {
    bucket: String,
    name: String,
}

impl ChangeNotification {
    #[must_use]
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Extracts notifications from a trigger payload.
    ///
    /// Accepts an S3 event notification (`Records[].s3`), a flat
    /// `{ "bucket", "name" }` object, or the same object wrapped in a
    /// `data` envelope. S3 keys arrive form-encoded and are decoded here.
    /// The `s3:TestEvent` S3 sends when notifications are first configured
    /// yields no notifications.
    ///
    /// # Errors
    ///
    /// Returns `ProcessingError::InvalidEvent` if the payload matches none of
    /// these shapes or names an empty bucket or key.
    pub fn from_event(payload: &Value) -> Result<Vec<Self>, ProcessingError> {
        if is_s3_test_event(payload) {
            return Ok(Vec::new());
        }

        let notifications = if payload.get("Records").is_some() {
            let event: S3Event = serde_json::from_value(payload.clone())?;
            event
                .records
                .into_iter()
                .map(|record| {
                    let key = decode_s3_key(&record.s3.object.key)?;
                    Ok(Self::new(record.s3.bucket.name, key))
                })
                .collect::<Result<Vec<_>, ProcessingError>>()?
        } else {
            let data = payload.get("data").unwrap_or(payload);
            let object: StorageObjectData = serde_json::from_value(data.clone())?;
            vec![Self::new(object.bucket, object.name)]
        };

        if notifications.is_empty() {
            return Err(ProcessingError::InvalidEvent(
                "event contains no records".to_string(),
            ));
        }
        if let Some(bad) = notifications
            .iter()
            .find(|n| n.bucket.is_empty() || n.key.is_empty())
        {
            return Err(ProcessingError::InvalidEvent(format!(
                "notification must name a bucket and a key (bucket='{}', key='{}')",
                bad.bucket, bad.key
            )));
        }

        Ok(notifications)
    }

    #[must_use]
    pub fn output_key(&self) -> String {
        output_key(&self.key)
    }
}

#[must_use]
pub fn is_s3_test_event(payload: &Value) -> bool {
    payload.get("Event").and_then(Value::as_str) == Some(S3_TEST_EVENT)
}

// S3 encodes spaces as '+' on top of regular percent-encoding.
fn decode_s3_key(raw: &str) -> Result<String, ProcessingError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ProcessingError::InvalidEvent(format!("object key '{raw}' is not valid UTF-8: {e}")))
}

/// One entry of the speech service's voice catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDescriptor {
    pub name: String,
    pub language_codes: Vec<String>,
}

impl VoiceDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, language_codes: &[&str]) -> Self {
        Self {
            name: name.into(),
            language_codes: language_codes.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    #[must_use]
    pub fn primary_language_code(&self) -> Option<&str> {
        self.language_codes.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    Mp3,
    OggVorbis,
    Pcm,
}

impl AudioEncoding {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::OggVorbis => "ogg_vorbis",
            AudioEncoding::Pcm => "pcm",
        }
    }

    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::OggVorbis => "audio/ogg",
            AudioEncoding::Pcm => "audio/pcm",
        }
    }
}

impl fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mp3" => Ok(AudioEncoding::Mp3),
            "ogg_vorbis" | "ogg" => Ok(AudioEncoding::OggVorbis),
            "pcm" => Ok(AudioEncoding::Pcm),
            other => Err(format!("unsupported audio encoding '{other}'")),
        }
    }
}

/// Audio returned by the speech service, written verbatim to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Result of handling one notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Synthesized {
        bucket: String,
        source_key: String,
        output_key: String,
        voice: String,
        audio_bytes: usize,
    },
    Skipped {
        bucket: String,
        source_key: String,
        reason: String,
    },
}
