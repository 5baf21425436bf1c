//! Worker Lambda handler and file processing

pub mod handler;
pub mod process;

// Re-export the main handler for convenience
pub use handler::handler;
pub use process::FileProcessor;
