//! Channel sync module

pub mod orchestrator;

pub use orchestrator::{ChannelOrchestrator, RunSummary};
