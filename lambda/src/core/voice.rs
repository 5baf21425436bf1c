//! Voice catalog scanning and the optional resolved-voice cache.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use super::models::VoiceDescriptor;
use crate::errors::ProcessingError;

/// Returns the first voice, in catalog order, whose primary language code
/// equals `language_code`.
///
/// When several voices share the language code, whichever the provider lists
/// first wins. No voice is pinned.
///
/// # Errors
///
/// Returns `ProcessingError::VoiceNotFound` if no entry matches.
pub fn select_voice<'a>(
    catalog: &'a [VoiceDescriptor],
    language_code: &str,
) -> Result<&'a VoiceDescriptor, ProcessingError> {
    catalog
        .iter()
        .find(|voice| voice.primary_language_code() == Some(language_code))
        .ok_or_else(|| ProcessingError::VoiceNotFound(language_code.to_string()))
}

#[derive(Debug)]
struct CachedVoice {
    language_code: String,
    voice_name: String,
    resolved_at: Instant,
}

/// Process-lifetime cache of the voice resolved for a language code.
///
/// A cache built with `VoiceCache::disabled()` never stores anything, so every
/// invocation queries the catalog.
#[derive(Debug)]
pub struct VoiceCache {
    ttl: Option<Duration>,
    entry: Mutex<Option<CachedVoice>>,
}

impl VoiceCache {
    #[must_use]
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.ttl.is_some()
    }

    #[must_use]
    pub fn get(&self, language_code: &str) -> Option<String> {
        let ttl = self.ttl?;
        let mut entry = self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match entry.as_ref() {
            Some(cached)
                if cached.language_code == language_code && cached.resolved_at.elapsed() < ttl =>
            {
                Some(cached.voice_name.clone())
            }
            Some(_) => {
                debug!("Voice cache entry expired or for another language; dropping it");
                *entry = None;
                None
            }
            None => None,
        }
    }

    pub fn put(&self, language_code: &str, voice_name: &str) {
        if self.ttl.is_none() {
            return;
        }
        let mut entry = self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *entry = Some(CachedVoice {
            language_code: language_code.to_string(),
            voice_name: voice_name.to_string(),
            resolved_at: Instant::now(),
        });
    }

    pub fn invalidate(&self) {
        let mut entry = self.entry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *entry = None;
    }
}

impl Default for VoiceCache {
    fn default() -> Self {
        Self::disabled()
    }
}
