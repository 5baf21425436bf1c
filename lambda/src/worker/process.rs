use tracing::{info, warn};

use crate::clients::{ObjectStore, SpeechSynthesizer};
use crate::core::config::AppConfig;
use crate::core::models::{ChangeNotification, ProcessOutcome, is_output_key};
use crate::core::voice::{VoiceCache, select_voice};
use crate::errors::ProcessingError;

/// Turns one uploaded text object into one synthesized audio object.
///
/// Built once per process; holds no per-invocation state apart from the
/// optional voice cache.
pub struct FileProcessor<S, T> {
    store: S,
    speech: T,
    config: AppConfig,
    voice_cache: VoiceCache,
}

impl<S, T> FileProcessor<S, T>
where
    S: ObjectStore,
    T: SpeechSynthesizer,
{
    pub fn new(store: S, speech: T, config: AppConfig) -> Self {
        let voice_cache = VoiceCache::new(config.voice_cache_ttl);
        Self {
            store,
            speech,
            config,
            voice_cache,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn speech(&self) -> &T {
        &self.speech
    }

    /// Fetch, decode, pick a voice, synthesize, then upload to
    /// `<key>_output.mp3`. Nothing is written unless every earlier step
    /// succeeded.
    ///
    /// # Errors
    ///
    /// `StorageAccess` for fetch or upload failures, `Decode` when the object
    /// is not UTF-8 and lossy decoding is off, `VoiceNotFound` when no
    /// catalog entry matches the configured language, `Synthesis` for speech
    /// service failures.
    pub async fn process(
        &self,
        notification: &ChangeNotification,
    ) -> Result<ProcessOutcome, ProcessingError> {
        let bucket = notification.bucket.as_str();
        let key = notification.key.as_str();

        if self.config.skip_output_objects && is_output_key(key) {
            info!(bucket, key, "Skipping object that is itself a synthesis output");
            return Ok(ProcessOutcome::Skipped {
                bucket: bucket.to_string(),
                source_key: key.to_string(),
                reason: "object is a synthesis output".to_string(),
            });
        }

        info!(bucket, key, "Fetching source object");
        let raw = self.store.fetch(bucket, key).await?;
        let text = decode_text(raw, key, self.config.lossy_decoding)?;

        #[cfg(feature = "debug-logs")]
        info!("Decoded source text:\n{}", text);

        #[cfg(not(feature = "debug-logs"))]
        info!(bucket, key, chars = text.chars().count(), "Decoded source text");

        let language_code = self.config.language_code.as_str();
        let voice_name = self.resolve_voice(language_code).await?;
        info!(voice = %voice_name, language_code, "Selected voice");

        let audio = match self
            .speech
            .synthesize(&text, &voice_name, language_code, self.config.audio_encoding)
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                self.voice_cache.invalidate();
                return Err(e);
            }
        };

        let output_key = notification.output_key();
        let audio_bytes = audio.bytes.len();
        self.store
            .store(bucket, &output_key, audio.bytes, &audio.content_type)
            .await?;

        info!(
            bucket,
            output_key = %output_key,
            audio_bytes,
            "Synthesized speech uploaded to {}",
            output_key
        );

        Ok(ProcessOutcome::Synthesized {
            bucket: bucket.to_string(),
            source_key: key.to_string(),
            output_key,
            voice: voice_name,
            audio_bytes,
        })
    }

    async fn resolve_voice(&self, language_code: &str) -> Result<String, ProcessingError> {
        if let Some(cached) = self.voice_cache.get(language_code) {
            return Ok(cached);
        }

        let catalog = self.speech.list_voices().await?;
        let voice = select_voice(&catalog, language_code)?;
        self.voice_cache.put(language_code, &voice.name);
        Ok(voice.name.clone())
    }
}

// Strict by default: undecodable bytes fail the invocation. Lossy mode
// replaces them with U+FFFD instead.
fn decode_text(raw: Vec<u8>, key: &str, lossy: bool) -> Result<String, ProcessingError> {
    match String::from_utf8(raw) {
        Ok(text) => Ok(text),
        Err(e) if lossy => {
            warn!(key, "Source object is not valid UTF-8; replacing invalid sequences");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
        Err(e) => Err(ProcessingError::Decode(format!("{key}: {}", e.utf8_error()))),
    }
}
