//! Command-line interface for renewal-launcher.
//!
//! Provides the Lambda runtime entry point plus commands for launching,
//! resolving the task definition, and inspecting configuration locally.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::adapters::{EcsTaskService, TaskService};
use crate::config::{LaunchConfig, ENV_SECURITY_GROUP, ENV_SUBNET, ENV_TASK_FAMILY_PREFIX};
use crate::core::{run_lambda, Launcher};

/// Set by the Lambda execution environment
pub const ENV_LAMBDA_RUNTIME_API: &str = "AWS_LAMBDA_RUNTIME_API";

/// renewal-launcher - start the certificate renewal task on Fargate
#[derive(Parser, Debug)]
#[command(name = "renewal-launcher")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve Lambda invocations (default inside the Lambda environment)
    Lambda,

    /// Launch the task once and print the report
    Launch {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Print the newest task definition ARN without launching
    Resolve {
        #[command(flatten)]
        launch: LaunchArgs,
    },

    /// Show resolved configuration (debug)
    Config {
        #[command(flatten)]
        launch: LaunchArgs,
    },
}

/// Launch settings; each flag falls back to its environment variable
#[derive(Args, Debug, Clone, Default)]
pub struct LaunchArgs {
    /// Subnet for the task's network interface
    #[arg(long, env = "SUBNET")]
    pub subnet: Option<String>,

    /// Security group for the task's network interface
    #[arg(long, env = "SECURITY_GROUP")]
    pub security_group: Option<String>,

    /// Task family prefix (default: certificate-renewal)
    #[arg(long, env = "TASK_FAMILY_PREFIX")]
    pub family_prefix: Option<String>,
}

impl LaunchArgs {
    /// Resolve into a launch configuration
    pub fn resolve(&self) -> Result<LaunchConfig> {
        LaunchConfig::from_lookup(|key| match key {
            ENV_SUBNET => self.subnet.clone(),
            ENV_SECURITY_GROUP => self.security_group.clone(),
            ENV_TASK_FAMILY_PREFIX => self.family_prefix.clone(),
            _ => None,
        })
        .context("Invalid launch configuration")
    }
}

/// True when running under the Lambda runtime API
pub fn in_lambda() -> bool {
    std::env::var_os(ENV_LAMBDA_RUNTIME_API).is_some()
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Lambda) => serve().await,
            None if in_lambda() => serve().await,
            None => {
                anyhow::bail!("No command given. Run with --help to see available commands")
            }
            Some(Commands::Launch { launch }) => launch_once(&launch).await,
            Some(Commands::Resolve { launch }) => resolve(&launch).await,
            Some(Commands::Config { launch }) => show_config(&launch),
        }
    }
}

async fn launcher(args: &LaunchArgs) -> Result<Launcher> {
    let config = args.resolve()?;
    let service: Arc<dyn TaskService> = Arc::new(EcsTaskService::from_env().await);
    Ok(Launcher::new(service, config))
}

/// Run the Lambda runtime loop
async fn serve() -> Result<()> {
    run_lambda()
        .await
        .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))
}

/// Launch one task and print the report as JSON
async fn launch_once(args: &LaunchArgs) -> Result<()> {
    let launcher = launcher(args).await?;
    let report = launcher.launch().await.context("Task launch failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Print the task definition a launch would use
async fn resolve(args: &LaunchArgs) -> Result<()> {
    let launcher = launcher(args).await?;
    let arn = launcher
        .latest_task_definition()
        .await
        .context("Task definition lookup failed")?;

    println!("{}", arn);
    Ok(())
}

/// Show the resolved configuration
fn show_config(args: &LaunchArgs) -> Result<()> {
    let config = args.resolve()?;

    println!("Subnet:         {}", config.subnet);
    println!("Security group: {}", config.security_group);
    println!("Task family:    {}", config.family_prefix);
    println!("Cluster:        {}", config.cluster);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_launch_flags() {
        let cli = Cli::try_parse_from([
            "renewal-launcher",
            "launch",
            "--subnet",
            "subnet-9",
            "--security-group",
            "sg-9",
            "--family-prefix",
            "renewal-test",
        ])
        .unwrap();

        let Some(Commands::Launch { launch }) = cli.command else {
            panic!("expected launch command");
        };
        let config = launch.resolve().unwrap();
        assert_eq!(config.subnet, "subnet-9");
        assert_eq!(config.security_group, "sg-9");
        assert_eq!(config.family_prefix, "renewal-test");
    }

    #[test]
    fn test_resolve_requires_subnet() {
        let args = LaunchArgs {
            subnet: None,
            security_group: Some("sg-1".to_string()),
            family_prefix: None,
        };
        let err = args.resolve().unwrap_err();
        assert!(format!("{:#}", err).contains("'SUBNET' not set"));
    }
}
