//! Launch configuration.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (local runs only, see `cli`)
//! 2. Environment variables (SUBNET, SECURITY_GROUP, TASK_FAMILY_PREFIX)
//! 3. Defaults (task family prefix, cluster)
//!
//! SUBNET and SECURITY_GROUP have no default. The task runs in awsvpc mode
//! and ECS rejects a launch without both.

use serde::Serialize;
use tracing::warn;

use crate::core::LaunchError;
use crate::domain::{NetworkSettings, DEFAULT_CLUSTER};

pub const ENV_SUBNET: &str = "SUBNET";
pub const ENV_SECURITY_GROUP: &str = "SECURITY_GROUP";
pub const ENV_TASK_FAMILY_PREFIX: &str = "TASK_FAMILY_PREFIX";

/// Task family used when TASK_FAMILY_PREFIX is not set
pub const DEFAULT_TASK_FAMILY_PREFIX: &str = "certificate-renewal";

/// Resolved configuration for one launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchConfig {
    /// Subnet the task's network interface is placed in
    pub subnet: String,
    /// Security group attached to the task's network interface
    pub security_group: String,
    /// Task family prefix to look up definitions for
    pub family_prefix: String,
    /// Target cluster
    pub cluster: String,
}

impl LaunchConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, LaunchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LaunchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let subnet = get(ENV_SUBNET).ok_or(LaunchError::MissingEnvironment(ENV_SUBNET))?;
        let security_group =
            get(ENV_SECURITY_GROUP).ok_or(LaunchError::MissingEnvironment(ENV_SECURITY_GROUP))?;

        let family_prefix = get(ENV_TASK_FAMILY_PREFIX).unwrap_or_else(|| {
            warn!(
                "Environment variable {} not set, using default task family prefix '{}'",
                ENV_TASK_FAMILY_PREFIX, DEFAULT_TASK_FAMILY_PREFIX
            );
            DEFAULT_TASK_FAMILY_PREFIX.to_string()
        });

        Ok(Self {
            subnet,
            security_group,
            family_prefix,
            cluster: DEFAULT_CLUSTER.to_string(),
        })
    }

    /// Network settings for the task: this subnet and group, public IP on
    pub fn network(&self) -> NetworkSettings {
        NetworkSettings::public(&self.subnet, &self.security_group)
    }
}
