//! Maintenance window choreography.
//!
//! ```text
//! find warehouse target endpoints
//!   -> find tasks on those endpoints
//!   -> stop running tasks
//!   -> activate pipeline
//!   -> describe pipeline
//! ```
//!
//! Steps run sequentially; the first service error aborts the window.

use thiserror::Error;

use crate::config::{ConfigError, MaintenanceConfig};
use crate::service::{PipelineService, ReplicationService, ServiceError, TaskStatus};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaintenanceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("service call failed: {0}")]
    Service(#[from] ServiceError),
}

/// Outcome of a completed maintenance window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceReport {
    pub cluster_id: String,
    pub pipeline_id: String,
    pub stopped_tasks: Vec<String>,
}

impl core::fmt::Display for MaintenanceReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "DMS Tasks targeting {} were stopped, and pipeline {} started.",
            self.cluster_id, self.pipeline_id
        )
    }
}

/// Pause replication into the configured cluster and start the pipeline.
pub fn run_maintenance_window(
    config: &MaintenanceConfig,
    replication: &dyn ReplicationService,
    pipelines: &dyn PipelineService,
) -> Result<MaintenanceReport, MaintenanceError> {
    let cluster_id = config.cluster_id.as_str();
    tracing::info!(cluster_id, "looking for replication endpoints using cluster");

    let endpoint_arns: Vec<String> = replication
        .list_endpoints()?
        .into_iter()
        .filter(|e| e.targets_cluster(cluster_id))
        .map(|e| e.arn)
        .collect();
    tracing::info!(endpoints = endpoint_arns.len(), "found endpoints targeting cluster");

    let tasks = if endpoint_arns.is_empty() {
        Vec::new()
    } else {
        replication.list_tasks(&endpoint_arns)?
    };

    let mut stopped_tasks = Vec::new();
    for task in tasks.into_iter().filter(|t| t.status == TaskStatus::Running) {
        replication.stop_task(&task.arn)?;
        tracing::info!(task = %task.arn, "stopped replication task");
        stopped_tasks.push(task.arn);
    }

    pipelines.activate(&config.pipeline_id)?;
    let description = pipelines.describe(&config.pipeline_id)?;
    tracing::info!(pipeline = %description.id, state = ?description.state, "pipeline activated");

    let report = MaintenanceReport {
        cluster_id: config.cluster_id.clone(),
        pipeline_id: config.pipeline_id.clone(),
        stopped_tasks,
    };
    tracing::info!("{report}");
    Ok(report)
}

/// Handler entry point: read configuration from `lookup`, run the window and
/// return its summary line.
///
/// Configuration is validated before any service is called.
pub fn handle(
    lookup: impl Fn(&str) -> Option<String>,
    replication: &dyn ReplicationService,
    pipelines: &dyn PipelineService,
) -> Result<String, MaintenanceError> {
    let config = MaintenanceConfig::from_lookup(lookup)?;
    let report = run_maintenance_window(&config, replication, pipelines)?;
    Ok(report.to_string())
}

/// [`handle`] configured from the process environment.
pub fn handle_from_env(
    replication: &dyn ReplicationService,
    pipelines: &dyn PipelineService,
) -> Result<String, MaintenanceError> {
    let config = MaintenanceConfig::from_env()?;
    let report = run_maintenance_window(&config, replication, pipelines)?;
    Ok(report.to_string())
}
