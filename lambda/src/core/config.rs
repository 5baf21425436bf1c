use std::env;
use std::time::Duration;

use super::models::AudioEncoding;

pub const DEFAULT_LANGUAGE_CODE: &str = "nb-NO";
pub const DEFAULT_ENGINE: &str = "standard";

const SUPPORTED_ENGINES: &[&str] = &["standard", "neural", "long-form", "generative"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub language_code: String,
    pub audio_encoding: AudioEncoding,
    pub engine: String,
    pub voice_cache_ttl: Option<Duration>,
    pub skip_output_objects: bool,
    pub lossy_decoding: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            audio_encoding: AudioEncoding::Mp3,
            engine: DEFAULT_ENGINE.to_string(),
            voice_cache_ttl: None,
            skip_output_objects: false,
            lossy_decoding: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset or blank
    /// variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let audio_encoding = match var("TTS_AUDIO_ENCODING") {
            Some(raw) => raw
                .parse::<AudioEncoding>()
                .map_err(|e| format!("TTS_AUDIO_ENCODING: {}", e))?,
            None => defaults.audio_encoding,
        };

        let engine = match var("TTS_ENGINE") {
            Some(raw) => {
                let engine = raw.to_ascii_lowercase();
                if !SUPPORTED_ENGINES.contains(&engine.as_str()) {
                    return Err(format!("TTS_ENGINE: unsupported engine '{}'", raw));
                }
                engine
            }
            None => defaults.engine,
        };

        let voice_cache_ttl = match var("VOICE_CACHE_TTL_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|e| format!("VOICE_CACHE_TTL_SECS: {}", e))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let skip_output_objects = match var("SKIP_OUTPUT_OBJECTS") {
            Some(raw) => parse_bool("SKIP_OUTPUT_OBJECTS", &raw)?,
            None => defaults.skip_output_objects,
        };

        let lossy_decoding = match var("LOSSY_DECODING") {
            Some(raw) => parse_bool("LOSSY_DECODING", &raw)?,
            None => defaults.lossy_decoding,
        };

        Ok(Self {
            language_code: var("TTS_LANGUAGE_CODE").unwrap_or(defaults.language_code),
            audio_encoding,
            engine,
            voice_cache_ttl,
            skip_output_objects,
            lossy_decoding,
        })
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(format!("{}: expected a boolean, got '{}'", name, raw)),
    }
}
