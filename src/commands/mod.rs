//! CLI commands for cegate

pub mod dispatch;
pub mod format;
pub mod history;
pub mod key;
pub mod run;
