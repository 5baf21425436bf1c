//! Client modules for external API interactions

pub mod speech;
pub mod storage;

pub use speech::{PollySynthesizer, SpeechSynthesizer};
pub use storage::{ObjectStore, S3Store};
