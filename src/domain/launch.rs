//! Launch request and result types.
//!
//! These mirror the parts of the ECS `RunTask` contract this function
//! touches. They are plain data; the adapter translates them to and from
//! the SDK types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cluster every task is started on
pub const DEFAULT_CLUSTER: &str = "default";

/// Fargate platform version requested for every launch
pub const PLATFORM_VERSION: &str = "LATEST";

/// Number of tasks started per invocation
pub const TASK_COUNT: i32 = 1;

/// How the task is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaunchType {
    Fargate,
}

impl LaunchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchType::Fargate => "FARGATE",
        }
    }
}

impl std::fmt::Display for LaunchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// awsvpc network settings for the task's elastic network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSettings {
    pub subnets: Vec<String>,
    pub security_groups: Vec<String>,
    /// Fargate tasks in a public subnet need a public IP to pull images
    pub assign_public_ip: bool,
}

impl NetworkSettings {
    /// Single subnet, single security group, public IP enabled
    pub fn public(subnet: impl Into<String>, security_group: impl Into<String>) -> Self {
        Self {
            subnets: vec![subnet.into()],
            security_groups: vec![security_group.into()],
            assign_public_ip: true,
        }
    }
}

/// Parameters for one `RunTask` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunTaskRequest {
    pub cluster: String,
    pub launch_type: LaunchType,
    pub platform_version: String,
    pub task_definition: String,
    pub count: i32,
    pub network: NetworkSettings,
}

/// A task ECS accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchedTask {
    pub task_arn: String,
    pub last_status: Option<String>,
    pub desired_status: Option<String>,
}

/// A placement failure reported by ECS instead of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchFailure {
    pub arn: Option<String>,
    pub reason: Option<String>,
    pub detail: Option<String>,
}

impl std::fmt::Display for LaunchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason.as_deref().unwrap_or("unknown reason"))?;
        if let Some(arn) = &self.arn {
            write!(f, " ({})", arn)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

/// Raw result of a `RunTask` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunTaskOutcome {
    pub tasks: Vec<LaunchedTask>,
    pub failures: Vec<LaunchFailure>,
}

impl RunTaskOutcome {
    /// ECS placed at least one task
    pub fn started(&self) -> bool {
        !self.tasks.is_empty()
    }
}

/// What an invocation did. Returned to the Lambda caller as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReport {
    pub task_definition_arn: String,
    pub cluster: String,
    pub tasks: Vec<LaunchedTask>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<LaunchFailure>,
    pub launched_at: DateTime<Utc>,
}

impl LaunchReport {
    pub fn new(request: &RunTaskRequest, outcome: RunTaskOutcome) -> Self {
        Self {
            task_definition_arn: request.task_definition.clone(),
            cluster: request.cluster.clone(),
            tasks: outcome.tasks,
            failures: outcome.failures,
            launched_at: Utc::now(),
        }
    }

    /// ARNs of the started tasks
    pub fn task_arns(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.task_arn.as_str()).collect()
    }
}
