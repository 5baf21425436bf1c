//! Domain types, configuration and voice selection

pub mod config;
pub mod models;
pub mod voice;
