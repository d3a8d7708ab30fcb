//! Task launcher.
//!
//! Looks up the newest task definition for the configured family and
//! starts exactly one Fargate task from it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::adapters::TaskService;
use crate::config::LaunchConfig;
use crate::domain::{
    LaunchFailure, LaunchReport, LaunchType, RunTaskRequest, PLATFORM_VERSION, TASK_COUNT,
};

/// Errors that stop a launch
#[derive(Debug, Clone, Error)]
pub enum LaunchError {
    #[error("environment variable '{0}' not set")]
    MissingEnvironment(&'static str),

    #[error("no task definitions found for task family '{family}'")]
    NoTaskDefinition { family: String },

    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    #[error("task '{task_definition}' was not started: {}", join_failures(.failures))]
    TaskNotStarted {
        task_definition: String,
        failures: Vec<LaunchFailure>,
    },
}

fn join_failures(failures: &[LaunchFailure]) -> String {
    if failures.is_empty() {
        return "no tasks returned".to_string();
    }
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Launches the newest task definition of a family
pub struct Launcher {
    service: Arc<dyn TaskService>,
    config: LaunchConfig,
}

impl Launcher {
    pub fn new(service: Arc<dyn TaskService>, config: LaunchConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// ARN of the most recent task definition in the family
    #[instrument(skip(self), fields(family = %self.config.family_prefix))]
    pub async fn latest_task_definition(&self) -> Result<String, LaunchError> {
        let arns = self
            .service
            .list_task_definitions(&self.config.family_prefix)
            .await?;

        match arns.into_iter().next() {
            Some(arn) => {
                info!(%arn, "Found most recent task definition");
                Ok(arn)
            }
            None => {
                warn!("No task definition ARNs found for family");
                Err(LaunchError::NoTaskDefinition {
                    family: self.config.family_prefix.clone(),
                })
            }
        }
    }

    /// The `RunTask` parameters for `task_definition`
    pub fn build_request(&self, task_definition: impl Into<String>) -> RunTaskRequest {
        RunTaskRequest {
            cluster: self.config.cluster.clone(),
            launch_type: LaunchType::Fargate,
            platform_version: PLATFORM_VERSION.to_string(),
            task_definition: task_definition.into(),
            count: TASK_COUNT,
            network: self.config.network(),
        }
    }

    /// Look up the newest task definition and start one task from it
    #[instrument(skip(self), fields(service = %self.service.name(), cluster = %self.config.cluster))]
    pub async fn launch(&self) -> Result<LaunchReport, LaunchError> {
        let arn = self.latest_task_definition().await?;
        let request = self.build_request(arn);

        let outcome = self.service.run_task(&request).await.map_err(|e| {
            warn!(task_definition = %request.task_definition, error = %e, "Error while starting task");
            e
        })?;

        if !outcome.started() {
            let err = LaunchError::TaskNotStarted {
                task_definition: request.task_definition.clone(),
                failures: outcome.failures,
            };
            warn!(error = %err, "Task launch rejected");
            return Err(err);
        }

        for failure in &outcome.failures {
            warn!(%failure, "Partial launch failure");
        }

        let report = LaunchReport::new(&request, outcome);
        info!(
            task_definition = %report.task_definition_arn,
            tasks = ?report.task_arns(),
            "Task started"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LaunchError::MissingEnvironment("SUBNET").to_string(),
            "environment variable 'SUBNET' not set"
        );
        assert_eq!(
            LaunchError::NoTaskDefinition {
                family: "certificate-renewal".to_string()
            }
            .to_string(),
            "no task definitions found for task family 'certificate-renewal'"
        );
        assert_eq!(
            LaunchError::Api {
                operation: "RunTask",
                message: "AccessDeniedException".to_string()
            }
            .to_string(),
            "RunTask failed: AccessDeniedException"
        );
    }

    #[test]
    fn test_not_started_message_lists_failures() {
        let err = LaunchError::TaskNotStarted {
            task_definition: "arn:td/x:1".to_string(),
            failures: vec![
                LaunchFailure {
                    arn: None,
                    reason: Some("RESOURCE:CPU".to_string()),
                    detail: None,
                },
                LaunchFailure {
                    arn: None,
                    reason: Some("AGENT".to_string()),
                    detail: None,
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "task 'arn:td/x:1' was not started: RESOURCE:CPU; AGENT"
        );

        let empty = LaunchError::TaskNotStarted {
            task_definition: "arn:td/x:1".to_string(),
            failures: vec![],
        };
        assert_eq!(
            empty.to_string(),
            "task 'arn:td/x:1' was not started: no tasks returned"
        );
    }
}
