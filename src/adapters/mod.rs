//! Adapter interfaces for external systems.
//!
//! The only external system is the container orchestration API. The
//! [`TaskService`] trait is the seam between the launcher and ECS, so the
//! launch logic can run against a fake in tests.

pub mod ecs;

use async_trait::async_trait;

use crate::core::LaunchError;
use crate::domain::{RunTaskOutcome, RunTaskRequest};

// Re-export the ECS adapter
pub use ecs::EcsTaskService;

/// Operations consumed from the orchestration API
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Human-readable service name
    fn name(&self) -> &str;

    /// Task definition ARNs for a family prefix, newest first
    async fn list_task_definitions(&self, family_prefix: &str) -> Result<Vec<String>, LaunchError>;

    /// Start tasks as described by `request`
    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskOutcome, LaunchError>;
}
