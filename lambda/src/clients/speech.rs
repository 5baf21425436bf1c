//! Speech synthesis client module
//!
//! Encapsulates the Amazon Polly voice catalog and synthesis calls.

use async_trait::async_trait;
use aws_sdk_polly::Client as PollyClient;
use aws_sdk_polly::error::DisplayErrorContext;
use aws_sdk_polly::types::{Engine, LanguageCode, OutputFormat, Voice, VoiceId};
use tracing::debug;

use crate::core::models::{AudioEncoding, SynthesizedAudio, VoiceDescriptor};
use crate::errors::ProcessingError;

/// Speech collaborator: voice catalog listing and one-shot synthesis.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Lists every available voice in provider order.
    ///
    /// # Errors
    ///
    /// Returns `ProcessingError::Synthesis` if the catalog query fails.
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, ProcessingError>;

    /// # Errors
    ///
    /// Returns `ProcessingError::Synthesis` if the service rejects or fails
    /// the request.
    async fn synthesize(
        &self,
        text: &str,
        voice_name: &str,
        language_code: &str,
        encoding: AudioEncoding,
    ) -> Result<SynthesizedAudio, ProcessingError>;
}

fn output_format(encoding: AudioEncoding) -> OutputFormat {
    match encoding {
        AudioEncoding::Mp3 => OutputFormat::Mp3,
        AudioEncoding::OggVorbis => OutputFormat::OggVorbis,
        AudioEncoding::Pcm => OutputFormat::Pcm,
    }
}

/// Maps a Polly catalog entry to a `VoiceDescriptor`. The voice's own
/// `language_code` comes first, so it is the primary code; additional
/// codes follow in catalog order. Entries without an id are dropped.
#[must_use]
pub fn voice_descriptor(voice: &Voice) -> Option<VoiceDescriptor> {
    let id = voice.id()?;
    let language_codes = voice
        .language_code()
        .into_iter()
        .chain(voice.additional_language_codes())
        .map(|code| code.as_str().to_string())
        .collect();
    Some(VoiceDescriptor {
        name: id.as_str().to_string(),
        language_codes,
    })
}

/// `SpeechSynthesizer` backed by Amazon Polly.
#[derive(Debug, Clone)]
pub struct PollySynthesizer {
    client: PollyClient,
    engine: Engine,
}

impl PollySynthesizer {
    #[must_use]
    pub fn new(client: PollyClient, engine: &str) -> Self {
        Self {
            client,
            engine: Engine::from(engine),
        }
    }

    #[must_use]
    pub fn from_conf(shared_config: &aws_config::SdkConfig, engine: &str) -> Self {
        Self::new(PollyClient::new(shared_config), engine)
    }
}

#[async_trait]
impl SpeechSynthesizer for PollySynthesizer {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, ProcessingError> {
        let mut catalog = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .describe_voices()
                .engine(self.engine.clone())
                .include_additional_language_codes(true)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    ProcessingError::Synthesis(format!(
                        "Failed to list voices: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            catalog.extend(output.voices().iter().filter_map(voice_descriptor));

            match output.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!("Voice catalog contains {} voices", catalog.len());
        Ok(catalog)
    }

    async fn synthesize(
        &self,
        text: &str,
        voice_name: &str,
        language_code: &str,
        encoding: AudioEncoding,
    ) -> Result<SynthesizedAudio, ProcessingError> {
        let output = self
            .client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice_name))
            .language_code(LanguageCode::from(language_code))
            .output_format(output_format(encoding))
            .engine(self.engine.clone())
            .send()
            .await
            .map_err(|e| {
                ProcessingError::Synthesis(format!(
                    "Polly rejected synthesis with voice {voice_name}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let content_type = output
            .content_type()
            .map_or_else(|| encoding.content_type().to_string(), str::to_string);

        let data = output.audio_stream.collect().await.map_err(|e| {
            ProcessingError::Synthesis(format!("Failed to read synthesized audio: {e}"))
        })?;

        Ok(SynthesizedAudio {
            bytes: data.into_bytes().to_vec(),
            content_type,
        })
    }
}
