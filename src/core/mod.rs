//! Core launch logic.
//!
//! This module contains:
//! - Launcher: task definition lookup and task start
//! - Handler: the Lambda function body and runtime loop

pub mod handler;
pub mod launcher;

// Re-export commonly used types
pub use handler::{handle, run_lambda};
pub use launcher::{LaunchError, Launcher};
