//! Domain types for the launcher.
//!
//! Request and result shapes for a single task launch.

pub mod launch;

// Re-export commonly used types
pub use launch::{
    LaunchFailure, LaunchReport, LaunchType, LaunchedTask, NetworkSettings, RunTaskOutcome,
    RunTaskRequest, DEFAULT_CLUSTER, PLATFORM_VERSION, TASK_COUNT,
};
