//! Shared test fixtures: an in-memory TaskService that records calls.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use renewal_launcher::domain::{LaunchFailure, LaunchedTask, RunTaskOutcome, RunTaskRequest};
use renewal_launcher::{LaunchError, TaskService};

/// What `run_task` should answer with
pub enum RunBehavior {
    Start,
    /// One task started, plus these failures
    Partial(Vec<LaunchFailure>),
    Reject(Vec<LaunchFailure>),
    Fail(&'static str),
}

pub const STARTED_TASK_ARN: &str = "arn:aws:ecs:eu-central-1:123456789012:task/default/abc";

fn started_task() -> LaunchedTask {
    LaunchedTask {
        task_arn: STARTED_TASK_ARN.to_string(),
        last_status: Some("PROVISIONING".to_string()),
        desired_status: Some("RUNNING".to_string()),
    }
}

pub struct FakeTaskService {
    definitions: Vec<String>,
    run_behavior: RunBehavior,
    list_error: Option<&'static str>,
    pub listed_families: Mutex<Vec<String>>,
    pub run_requests: Mutex<Vec<RunTaskRequest>>,
}

impl FakeTaskService {
    pub fn new(definitions: &[&str]) -> Self {
        Self {
            definitions: definitions.iter().map(|s| s.to_string()).collect(),
            run_behavior: RunBehavior::Start,
            list_error: None,
            listed_families: Mutex::new(Vec::new()),
            run_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_run_behavior(mut self, behavior: RunBehavior) -> Self {
        self.run_behavior = behavior;
        self
    }

    /// Make `list_task_definitions` fail with this message
    pub fn with_list_error(mut self, message: &'static str) -> Self {
        self.list_error = Some(message);
        self
    }

    pub fn run_requests(&self) -> Vec<RunTaskRequest> {
        self.run_requests.lock().unwrap().clone()
    }

    pub fn listed_families(&self) -> Vec<String> {
        self.listed_families.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskService for FakeTaskService {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_task_definitions(&self, family_prefix: &str) -> Result<Vec<String>, LaunchError> {
        self.listed_families
            .lock()
            .unwrap()
            .push(family_prefix.to_string());

        if let Some(message) = self.list_error {
            return Err(LaunchError::Api {
                operation: "ListTaskDefinitions",
                message: message.to_string(),
            });
        }
        Ok(self.definitions.clone())
    }

    async fn run_task(&self, request: &RunTaskRequest) -> Result<RunTaskOutcome, LaunchError> {
        self.run_requests.lock().unwrap().push(request.clone());

        match &self.run_behavior {
            RunBehavior::Start => Ok(RunTaskOutcome {
                tasks: vec![started_task()],
                failures: vec![],
            }),
            RunBehavior::Partial(failures) => Ok(RunTaskOutcome {
                tasks: vec![started_task()],
                failures: failures.clone(),
            }),
            RunBehavior::Reject(failures) => Ok(RunTaskOutcome {
                tasks: vec![],
                failures: failures.clone(),
            }),
            RunBehavior::Fail(message) => Err(LaunchError::Api {
                operation: "RunTask",
                message: message.to_string(),
            }),
        }
    }
}

/// Lookup over a fixed set of variables
pub fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
