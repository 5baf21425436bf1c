#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use readaloud::core::config::AppConfig;
use readaloud::core::models::{AudioEncoding, SynthesizedAudio, VoiceDescriptor};
use readaloud::{FileProcessor, ObjectStore, ProcessingError, SpeechSynthesizer};

/// In-memory object store keyed by (bucket, key).
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), (Vec<u8>, String)>>,
    pub fetches: AtomicUsize,
    pub stores: AtomicUsize,
}

impl MemoryStore {
    pub fn with_object(bucket: &str, key: &str, bytes: &[u8]) -> Self {
        let store = Self::default();
        store.insert(bucket, key, bytes, "text/plain");
        store
    }

    pub fn insert(&self, bucket: &str, key: &str, bytes: &[u8], content_type: &str) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            (bytes.to_vec(), content_type.to_string()),
        );
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(bytes, _)| bytes.clone())
    }

    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .map(|(_, ct)| ct.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, ProcessingError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.get(bucket, key).ok_or_else(|| {
            ProcessingError::StorageAccess(format!("NoSuchKey: s3://{bucket}/{key}"))
        })
    }

    async fn store(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ProcessingError> {
        self.stores.fetch_add(1, Ordering::SeqCst);
        self.insert(bucket, key, &bytes, content_type);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisCall {
    pub text: String,
    pub voice_name: String,
    pub language_code: String,
    pub encoding: AudioEncoding,
}

/// Scripted speech service that records every call.
pub struct FakeSpeech {
    voices: Mutex<Vec<VoiceDescriptor>>,
    synthesis_error: Mutex<Option<String>>,
    pub list_calls: AtomicUsize,
    pub synthesis_calls: Mutex<Vec<SynthesisCall>>,
}

impl FakeSpeech {
    pub fn new(voices: Vec<VoiceDescriptor>) -> Self {
        Self {
            voices: Mutex::new(voices),
            synthesis_error: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            synthesis_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_voices(&self, voices: Vec<VoiceDescriptor>) {
        *self.voices.lock().unwrap() = voices;
    }

    pub fn fail_synthesis(&self, message: Option<&str>) {
        *self.synthesis_error.lock().unwrap() = message.map(str::to_string);
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.synthesis_calls.lock().unwrap().clone()
    }
}

/// Fake audio derived from the request so overwrites are observable.
pub fn fake_audio(voice_name: &str, text: &str) -> Vec<u8> {
    let mut bytes = b"ID3".to_vec();
    bytes.extend_from_slice(voice_name.as_bytes());
    bytes.push(b':');
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn list_voices(&self) -> Result<Vec<VoiceDescriptor>, ProcessingError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.voices.lock().unwrap().clone())
    }

    async fn synthesize(
        &self,
        text: &str,
        voice_name: &str,
        language_code: &str,
        encoding: AudioEncoding,
    ) -> Result<SynthesizedAudio, ProcessingError> {
        self.synthesis_calls.lock().unwrap().push(SynthesisCall {
            text: text.to_string(),
            voice_name: voice_name.to_string(),
            language_code: language_code.to_string(),
            encoding,
        });
        if let Some(message) = self.synthesis_error.lock().unwrap().clone() {
            return Err(ProcessingError::Synthesis(message));
        }
        Ok(SynthesizedAudio {
            bytes: fake_audio(voice_name, text),
            content_type: encoding.content_type().to_string(),
        })
    }
}

pub fn catalog() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor::new("A", &["en-US"]),
        VoiceDescriptor::new("B", &["nb-NO"]),
        VoiceDescriptor::new("C", &["nb-NO"]),
    ]
}

pub fn processor(store: MemoryStore, speech: FakeSpeech) -> FileProcessor<MemoryStore, FakeSpeech> {
    FileProcessor::new(store, speech, AppConfig::default())
}
