//! Service seams used by the maintenance window.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointType {
    Source,
    Target,
}

/// Replication endpoint as reported by the replication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub arn: String,
    pub endpoint_type: EndpointType,
    /// Endpoint name; warehouse targets are named `redshift`.
    pub name: String,
    /// Host the endpoint connects to (the cluster id for warehouse targets).
    pub server_name: String,
}

impl Endpoint {
    /// Whether this endpoint loads into the given warehouse cluster.
    pub fn targets_cluster(&self, cluster_id: &str) -> bool {
        self.endpoint_type == EndpointType::Target
            && self.name == "redshift"
            && self.server_name == cluster_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Stopping,
    Stopped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationTask {
    pub arn: String,
    pub source_endpoint_arn: String,
    pub target_endpoint_arn: String,
    pub status: TaskStatus,
}

impl ReplicationTask {
    pub fn uses_endpoint(&self, endpoint_arn: &str) -> bool {
        self.source_endpoint_arn == endpoint_arn || self.target_endpoint_arn == endpoint_arn
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Scheduled,
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDescription {
    pub id: String,
    pub state: PipelineState,
    pub activations: u32,
}

/// Failure reported by an external service call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("{operation} rejected: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Replication (change-data-capture) task service.
pub trait ReplicationService: Send + Sync {
    fn list_endpoints(&self) -> Result<Vec<Endpoint>, ServiceError>;

    /// Tasks attached to any of `endpoint_arns`.
    fn list_tasks(&self, endpoint_arns: &[String]) -> Result<Vec<ReplicationTask>, ServiceError>;

    fn stop_task(&self, task_arn: &str) -> Result<(), ServiceError>;
}

/// Scheduled data pipeline service.
pub trait PipelineService: Send + Sync {
    fn activate(&self, pipeline_id: &str) -> Result<(), ServiceError>;

    fn describe(&self, pipeline_id: &str) -> Result<PipelineDescription, ServiceError>;
}
