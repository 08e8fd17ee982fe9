use std::sync::Arc;

use chrono::Utc;

use crate::foundation::core::AspectRatio;
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::jobs::job::{JobId, JobStatus, RenderJob};
use crate::jobs::store::{JobStore, MemoryJobStore};

/// Error string recorded when a job is cancelled rather than crashing.
pub const CANCELLED_BY_USER: &str = "cancelled by user";

/// Lifecycle transition requests. Workers and the UI both speak this
/// vocabulary; the coordinator decides what each event may do.
#[derive(Clone, Debug, PartialEq)]
pub enum JobEvent {
    Started,
    Progress(u8),
    Completed { output: String },
    Failed { error: String },
    Cancelled,
}

/// Owns all job state transitions. Every mutation flows through
/// [`RenderCoordinator::apply`], so the lifecycle invariants hold no
/// matter which thread drives the job.
#[derive(Clone)]
pub struct RenderCoordinator {
    store: Arc<dyn JobStore>,
}

impl RenderCoordinator {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryJobStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn JobStore> {
        &self.store
    }

    /// Register a fresh queued job. Each trigger gets its own record;
    /// re-rendering a project never reuses an earlier job's state.
    #[tracing::instrument(skip(self))]
    pub fn queue(&self, project_id: &str, aspect: AspectRatio) -> ShowreelResult<RenderJob> {
        let job = RenderJob::queued(project_id, aspect);
        tracing::info!(job_id = %job.id, "queued render job");
        self.store.insert(job.clone())?;
        Ok(job)
    }

    pub fn get(&self, id: &JobId) -> ShowreelResult<RenderJob> {
        self.store.get(id)
    }

    pub fn list(&self) -> ShowreelResult<Vec<RenderJob>> {
        self.store.list()
    }

    pub fn for_project(&self, project_id: &str) -> ShowreelResult<Vec<RenderJob>> {
        self.store.for_project(project_id)
    }

    /// Apply one lifecycle event and return the updated snapshot.
    ///
    /// Terminal jobs absorb late worker events without complaint, so a
    /// worker racing a cancellation cannot corrupt the record. Only
    /// [`JobEvent::Cancelled`] on a terminal job reports a conflict.
    #[tracing::instrument(skip(self))]
    pub fn apply(&self, id: &JobId, event: JobEvent) -> ShowreelResult<RenderJob> {
        let mut outcome = Ok(());
        let snapshot = self.store.update(id, &mut |job| {
            outcome = transition(job, &event);
        })?;
        outcome?;
        Ok(snapshot)
    }

    pub fn start(&self, id: &JobId) -> ShowreelResult<RenderJob> {
        self.apply(id, JobEvent::Started)
    }

    pub fn progress(&self, id: &JobId, pct: u8) -> ShowreelResult<RenderJob> {
        self.apply(id, JobEvent::Progress(pct))
    }

    pub fn complete(&self, id: &JobId, output: impl Into<String>) -> ShowreelResult<RenderJob> {
        self.apply(id, JobEvent::Completed {
            output: output.into(),
        })
    }

    pub fn fail(&self, id: &JobId, error: impl Into<String>) -> ShowreelResult<RenderJob> {
        self.apply(id, JobEvent::Failed {
            error: error.into(),
        })
    }

    pub fn cancel(&self, id: &JobId) -> ShowreelResult<RenderJob> {
        self.apply(id, JobEvent::Cancelled)
    }
}

/// The state machine proper. Checks happen before any field is touched,
/// so a rejected event leaves the job exactly as it was.
fn transition(job: &mut RenderJob, event: &JobEvent) -> ShowreelResult<()> {
    if job.status.is_terminal() {
        return match event {
            JobEvent::Cancelled => Err(ShowreelError::job_lifecycle(format!(
                "job '{}' is already {}",
                job.id, job.status
            ))),
            // Late worker events after completion or cancellation are dropped.
            _ => Ok(()),
        };
    }

    match event {
        JobEvent::Started => {
            if job.status != JobStatus::Queued {
                return Err(ShowreelError::job_lifecycle(format!(
                    "job '{}' cannot start from status '{}'",
                    job.id, job.status
                )));
            }
            job.status = JobStatus::Rendering;
            job.started_at = Some(Utc::now());
        }
        JobEvent::Progress(pct) => {
            if job.status != JobStatus::Rendering {
                return Err(ShowreelError::job_lifecycle(format!(
                    "job '{}' cannot report progress while '{}'",
                    job.id, job.status
                )));
            }
            // Monotone: late or out-of-order reports never roll back.
            job.progress = job.progress.max((*pct).min(100));
        }
        JobEvent::Completed { output } => {
            if job.status != JobStatus::Rendering {
                return Err(ShowreelError::job_lifecycle(format!(
                    "job '{}' cannot complete without starting",
                    job.id
                )));
            }
            job.status = JobStatus::Completed;
            job.progress = 100;
            job.output = Some(output.clone());
            job.completed_at = Some(Utc::now());
        }
        JobEvent::Failed { error } => {
            job.status = JobStatus::Failed;
            job.error = Some(error.clone());
            job.completed_at = Some(Utc::now());
        }
        JobEvent::Cancelled => {
            job.status = JobStatus::Failed;
            job.error = Some(CANCELLED_BY_USER.to_string());
            job.completed_at = Some(Utc::now());
        }
    }
    Ok(())
}
