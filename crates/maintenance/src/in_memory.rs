use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::service::{
    Endpoint, PipelineDescription, PipelineService, PipelineState, ReplicationService,
    ReplicationTask, ServiceError, TaskStatus,
};

fn poisoned() -> ServiceError {
    ServiceError::Unavailable("lock poisoned".to_string())
}

/// In-memory replication service.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryReplicationService {
    endpoints: RwLock<Vec<Endpoint>>,
    tasks: RwLock<Vec<ReplicationTask>>,
}

impl InMemoryReplicationService {
    pub fn new(endpoints: Vec<Endpoint>, tasks: Vec<ReplicationTask>) -> Self {
        Self {
            endpoints: RwLock::new(endpoints),
            tasks: RwLock::new(tasks),
        }
    }

    /// Snapshot of all tasks, in insertion order.
    pub fn tasks(&self) -> Result<Vec<ReplicationTask>, ServiceError> {
        Ok(self.tasks.read().map_err(|_| poisoned())?.clone())
    }
}

impl ReplicationService for InMemoryReplicationService {
    fn list_endpoints(&self) -> Result<Vec<Endpoint>, ServiceError> {
        Ok(self.endpoints.read().map_err(|_| poisoned())?.clone())
    }

    fn list_tasks(&self, endpoint_arns: &[String]) -> Result<Vec<ReplicationTask>, ServiceError> {
        let tasks = self.tasks.read().map_err(|_| poisoned())?;
        Ok(tasks
            .iter()
            .filter(|t| endpoint_arns.iter().any(|arn| t.uses_endpoint(arn)))
            .cloned()
            .collect())
    }

    fn stop_task(&self, task_arn: &str) -> Result<(), ServiceError> {
        let mut tasks = self.tasks.write().map_err(|_| poisoned())?;
        let task = tasks
            .iter_mut()
            .find(|t| t.arn == task_arn)
            .ok_or_else(|| ServiceError::NotFound(task_arn.to_string()))?;

        if task.status != TaskStatus::Running {
            return Err(ServiceError::Rejected {
                operation: "stop_task",
                message: format!("task {task_arn} is not running"),
            });
        }
        task.status = TaskStatus::Stopped;
        Ok(())
    }
}

/// In-memory pipeline service keyed by pipeline id.
#[derive(Debug, Default)]
pub struct InMemoryPipelineService {
    pipelines: RwLock<HashMap<String, PipelineDescription>>,
}

impl InMemoryPipelineService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scheduled (not yet activated) pipeline.
    pub fn with_pipeline(mut self, pipeline_id: impl Into<String>) -> Self {
        let id = pipeline_id.into();
        self.pipelines
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                id.clone(),
                PipelineDescription {
                    id,
                    state: PipelineState::Scheduled,
                    activations: 0,
                },
            );
        self
    }
}

impl PipelineService for InMemoryPipelineService {
    fn activate(&self, pipeline_id: &str) -> Result<(), ServiceError> {
        let mut pipelines = self.pipelines.write().map_err(|_| poisoned())?;
        let pipeline = pipelines
            .get_mut(pipeline_id)
            .ok_or_else(|| ServiceError::NotFound(pipeline_id.to_string()))?;
        pipeline.state = PipelineState::Active;
        pipeline.activations += 1;
        Ok(())
    }

    fn describe(&self, pipeline_id: &str) -> Result<PipelineDescription, ServiceError> {
        self.pipelines
            .read()
            .map_err(|_| poisoned())?
            .get(pipeline_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(pipeline_id.to_string()))
    }
}
