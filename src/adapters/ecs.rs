//! ECS adapter backed by the AWS SDK.
//!
//! Credentials and region come from the standard AWS config chain
//! (environment, profile, or the Lambda execution role).

use async_trait::async_trait;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types::{
    AssignPublicIp, AwsVpcConfiguration, Failure, LaunchType as EcsLaunchType,
    NetworkConfiguration, SortOrder, Task,
};
use aws_sdk_ecs::Client;
use tracing::{debug, warn};

use super::TaskService;
use crate::core::LaunchError;
use crate::domain::{LaunchFailure, LaunchType, LaunchedTask, RunTaskOutcome, RunTaskRequest};

const LIST_TASK_DEFINITIONS: &str = "ListTaskDefinitions";
const RUN_TASK: &str = "RunTask";

/// [`TaskService`] over the ECS API
#[derive(Debug, Clone)]
pub struct EcsTaskService {
    client: Client,
}

impl EcsTaskService {
    /// Wrap a pre-built ECS client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS config chain
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

fn api_error(operation: &'static str, err: impl std::error::Error) -> LaunchError {
    LaunchError::Api {
        operation,
        message: DisplayErrorContext(&err).to_string(),
    }
}

fn network_configuration(request: &RunTaskRequest) -> Result<NetworkConfiguration, LaunchError> {
    let assign_public_ip = if request.network.assign_public_ip {
        AssignPublicIp::Enabled
    } else {
        AssignPublicIp::Disabled
    };

    let awsvpc = AwsVpcConfiguration::builder()
        .set_subnets(Some(request.network.subnets.clone()))
        .set_security_groups(Some(request.network.security_groups.clone()))
        .assign_public_ip(assign_public_ip)
        .build()
        .map_err(|e| api_error(RUN_TASK, e))?;

    Ok(NetworkConfiguration::builder()
        .awsvpc_configuration(awsvpc)
        .build())
}

fn launch_type(launch_type: LaunchType) -> EcsLaunchType {
    match launch_type {
        LaunchType::Fargate => EcsLaunchType::Fargate,
    }
}

fn launched_task(task: &Task) -> Option<LaunchedTask> {
    Some(LaunchedTask {
        task_arn: task.task_arn()?.to_string(),
        last_status: task.last_status().map(str::to_string),
        desired_status: task.desired_status().map(str::to_string),
    })
}

/// Tasks ECS returned. A task without an ARN cannot be reported and is skipped.
fn launched_tasks(tasks: &[Task]) -> Vec<LaunchedTask> {
    tasks
        .iter()
        .filter_map(|task| {
            let launched = launched_task(task);
            if launched.is_none() {
                warn!(
                    last_status = ?task.last_status(),
                    task_definition = ?task.task_definition_arn(),
                    "RunTask returned a task without an ARN, skipping it"
                );
            }
            launched
        })
        .collect()
}

fn launch_failure(failure: &Failure) -> LaunchFailure {
    LaunchFailure {
        arn: failure.arn().map(str::to_string),
        reason: failure.reason().map(str::to_string),
        detail: failure.detail().map(str::to_string),
    }
}

#[async_trait]
impl TaskService for EcsTaskService {
    fn name(&self) -> &str {
        "ecs"
    }

    async fn list_task_definitions(&self, family_prefix: &str) -> Result<Vec<String>, LaunchError> {
        // Only the newest ARN is used, so the first page is enough.
        let output = self
            .client
            .list_task_definitions()
            .family_prefix(family_prefix)
            .sort(SortOrder::Desc)
            .send()
            .await
            .map_err(|e| api_error(LIST_TASK_DEFINITIONS, e))?;

        let arns = output.task_definition_arns().to_vec();
        debug!(family = %family_prefix, count = arns.len(), "Listed task definitions");
        Ok(arns)
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskOutcome, LaunchError> {
        let output = self
            .client
            .run_task()
            .cluster(&request.cluster)
            .launch_type(launch_type(request.launch_type))
            .platform_version(&request.platform_version)
            .task_definition(&request.task_definition)
            .count(request.count)
            .network_configuration(network_configuration(request)?)
            .send()
            .await
            .map_err(|e| api_error(RUN_TASK, e))?;

        Ok(RunTaskOutcome {
            tasks: launched_tasks(output.tasks()),
            failures: output.failures().iter().map(launch_failure).collect(),
        })
    }
}
