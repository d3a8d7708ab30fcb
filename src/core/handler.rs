//! Lambda function handler.
//!
//! Each invocation validates the environment, then runs one launch. The
//! event payload is ignored; the function is normally triggered by a
//! schedule rule.

use std::sync::Arc;

use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::{EcsTaskService, TaskService};
use crate::config::LaunchConfig;
use crate::domain::LaunchReport;

use super::launcher::{LaunchError, Launcher};

/// Handle one invocation, reading configuration through `lookup`
pub async fn handle<F>(
    service: Arc<dyn TaskService>,
    lookup: F,
    event: LambdaEvent<Value>,
) -> Result<LaunchReport, LaunchError>
where
    F: Fn(&str) -> Option<String>,
{
    info!(request_id = %event.context.request_id, "Starting");

    let config = LaunchConfig::from_lookup(lookup).map_err(|e| {
        error!("{}", e);
        e
    })?;

    Launcher::new(service, config).launch().await
}

/// Run the Lambda runtime loop until the runtime shuts the process down.
///
/// The ECS client is built once and shared by warm invocations.
pub async fn run_lambda() -> Result<(), lambda_runtime::Error> {
    let service: Arc<dyn TaskService> = Arc::new(EcsTaskService::from_env().await);

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let service = Arc::clone(&service);
        async move {
            handle(service, |key| std::env::var(key).ok(), event)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
}
