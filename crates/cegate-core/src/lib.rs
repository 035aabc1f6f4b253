//! cegate Core Library
//!
//! Evaluation orchestration and gatekeeping for continuous-evaluation
//! model release gates.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod gate;
pub mod history;
pub mod key;
pub mod logging;
pub mod manifest;
pub mod metrics;
pub mod orchestrator;
