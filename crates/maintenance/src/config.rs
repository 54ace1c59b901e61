//! Maintenance window configuration (environment driven).

use thiserror::Error;

/// Warehouse cluster whose inbound replication must be paused.
pub const CLUSTER_ID_ENV: &str = "REDSHIFT_CLUSTER_ID";

/// Scheduled pipeline to activate once replication is stopped.
pub const PIPELINE_ID_ENV: &str = "DATA_PIPELINE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is missing")]
    MissingVariable(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceConfig {
    pub cluster_id: String,
    pub pipeline_id: String,
}

impl MaintenanceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Both variables are required; an empty value counts as missing. The
    /// cluster id is checked first.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVariable(name))
        };

        Ok(Self {
            cluster_id: require(CLUSTER_ID_ENV)?,
            pipeline_id: require(PIPELINE_ID_ENV)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_both_variables() {
        let config = MaintenanceConfig::from_lookup(lookup(&[
            (CLUSTER_ID_ENV, "warehouse-1"),
            (PIPELINE_ID_ENV, "df-123"),
        ]))
        .unwrap();
        assert_eq!(config.cluster_id, "warehouse-1");
        assert_eq!(config.pipeline_id, "df-123");
    }

    #[test]
    fn missing_cluster_is_reported_first() {
        let err = MaintenanceConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVariable(CLUSTER_ID_ENV));
        assert_eq!(err.to_string(), "REDSHIFT_CLUSTER_ID environment variable is missing");
    }

    #[test]
    fn empty_pipeline_counts_as_missing() {
        let err = MaintenanceConfig::from_lookup(lookup(&[
            (CLUSTER_ID_ENV, "warehouse-1"),
            (PIPELINE_ID_ENV, ""),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::MissingVariable(PIPELINE_ID_ENV));
    }
}
