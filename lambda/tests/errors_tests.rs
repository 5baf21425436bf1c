use std::error::Error;
use readaloud::errors::ProcessingError;

#[test]
fn test_processing_error_implements_error_trait() {
    // Verify ProcessingError implements the Error trait
    fn assert_error<T: Error + Send + Sync>(_: &T) {}

    let error = ProcessingError::InvalidEvent("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_processing_error_display() {
    let error = ProcessingError::StorageAccess("NoSuchKey".to_string());
    assert_eq!(format!("{error}"), "Failed to access object storage: NoSuchKey");

    let error = ProcessingError::VoiceNotFound("nb-NO".to_string());
    assert_eq!(format!("{error}"), "No voice found for language code nb-NO");

    let error = ProcessingError::Decode("notes.txt: invalid utf-8".to_string());
    assert_eq!(
        format!("{error}"),
        "Source object is not valid UTF-8: notes.txt: invalid utf-8"
    );

    let error = ProcessingError::Synthesis("Throttled".to_string());
    assert_eq!(format!("{error}"), "Failed to synthesize speech: Throttled");
}

#[test]
fn test_processing_error_kind() {
    assert_eq!(ProcessingError::StorageAccess(String::new()).kind(), "storage_access");
    assert_eq!(ProcessingError::Decode(String::new()).kind(), "decode");
    assert_eq!(ProcessingError::VoiceNotFound(String::new()).kind(), "voice_not_found");
    assert_eq!(ProcessingError::Synthesis(String::new()).kind(), "synthesis");
    assert_eq!(ProcessingError::InvalidEvent(String::new()).kind(), "invalid_event");
    assert_eq!(ProcessingError::Config(String::new()).kind(), "config");
}

#[test]
fn test_processing_error_from_serde_json() {
    let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let processing_err: ProcessingError = err.into();

    match processing_err {
        ProcessingError::InvalidEvent(msg) => assert!(!msg.is_empty()),
        _ => panic!("Unexpected error type"),
    }
}
