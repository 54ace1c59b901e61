//! Warehouse maintenance window.
//!
//! Stops the replication tasks that load into a warehouse cluster, then
//! activates a scheduled pipeline against it. Cloud services are reached
//! through the [`ReplicationService`] and [`PipelineService`] traits so the
//! choreography can run against in-memory implementations in tests and dev.

pub mod config;
pub mod in_memory;
pub mod service;
pub mod window;

pub use config::{CLUSTER_ID_ENV, ConfigError, MaintenanceConfig, PIPELINE_ID_ENV};
pub use in_memory::{InMemoryPipelineService, InMemoryReplicationService};
pub use service::{
    Endpoint, EndpointType, PipelineDescription, PipelineService, PipelineState,
    ReplicationService, ReplicationTask, ServiceError, TaskStatus,
};
pub use window::{
    MaintenanceError, MaintenanceReport, handle, handle_from_env, run_maintenance_window,
};
