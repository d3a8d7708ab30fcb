//! renewal-launcher - start the certificate renewal task on ECS Fargate
//!
//! An AWS Lambda function that looks up the newest task definition of a
//! task family and starts exactly one task from it on the `default`
//! cluster, in the subnet and security group given by the environment.
//!
//! # Modules
//!
//! - `adapters`: Orchestration API seam (`TaskService`) and the ECS adapter
//! - `config`: Environment-driven launch configuration
//! - `core`: Launch logic and the Lambda handler
//! - `domain`: Request and report types
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Inside Lambda (or explicitly)
//! renewal-launcher lambda
//!
//! # Local one-shot launch
//! SUBNET=subnet-0abc SECURITY_GROUP=sg-0def renewal-launcher launch
//!
//! # Which task definition would be used
//! renewal-launcher resolve --subnet subnet-0abc --security-group sg-0def
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{EcsTaskService, TaskService};
pub use config::LaunchConfig;
pub use crate::core::{LaunchError, Launcher};
pub use domain::{LaunchReport, RunTaskRequest};
