use std::collections::HashMap;
use std::sync::RwLock;

use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::jobs::job::{JobId, RenderJob};

/// Persistence boundary for render jobs. Reads hand out owned snapshots
/// so callers never hold a lock across their own work.
pub trait JobStore: Send + Sync {
    fn insert(&self, job: RenderJob) -> ShowreelResult<()>;

    fn get(&self, id: &JobId) -> ShowreelResult<RenderJob>;

    /// Mutate one job under the store's lock and return the updated
    /// snapshot. The closure runs at most once.
    fn update(&self, id: &JobId, apply: &mut dyn FnMut(&mut RenderJob)) -> ShowreelResult<RenderJob>;

    /// All jobs, oldest queued first.
    fn list(&self) -> ShowreelResult<Vec<RenderJob>>;

    fn remove(&self, id: &JobId) -> ShowreelResult<()>;

    fn for_project(&self, project_id: &str) -> ShowreelResult<Vec<RenderJob>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|job| job.project_id == project_id)
            .collect())
    }
}

/// Process-local store backing the default coordinator.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<JobId, RenderJob>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ShowreelError {
    ShowreelError::Other(anyhow::anyhow!("job store lock poisoned"))
}

impl JobStore for MemoryJobStore {
    fn insert(&self, job: RenderJob) -> ShowreelResult<()> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        jobs.insert(job.id.clone(), job);
        Ok(())
    }

    fn get(&self, id: &JobId) -> ShowreelResult<RenderJob> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        jobs.get(id)
            .cloned()
            .ok_or_else(|| ShowreelError::JobNotFound(id.to_string()))
    }

    fn update(&self, id: &JobId, apply: &mut dyn FnMut(&mut RenderJob)) -> ShowreelResult<RenderJob> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| ShowreelError::JobNotFound(id.to_string()))?;
        apply(job);
        Ok(job.clone())
    }

    fn list(&self) -> ShowreelResult<Vec<RenderJob>> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        let mut all: Vec<RenderJob> = jobs.values().cloned().collect();
        all.sort_by(|a, b| a.queued_at.cmp(&b.queued_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    fn remove(&self, id: &JobId) -> ShowreelResult<()> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        jobs.remove(id)
            .map(|_| ())
            .ok_or_else(|| ShowreelError::JobNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::AspectRatio;

    #[test]
    fn insert_then_get_returns_snapshot() {
        let store = MemoryJobStore::new();
        let job = RenderJob::queued("p1", AspectRatio::Wide);
        store.insert(job.clone()).unwrap();
        assert_eq!(store.get(&job.id).unwrap(), job);
    }

    #[test]
    fn missing_job_is_an_error() {
        let store = MemoryJobStore::new();
        let err = store.get(&JobId("nope".into())).unwrap_err();
        assert!(err.to_string().contains("render job not found"));
    }

    #[test]
    fn update_mutates_in_place() {
        let store = MemoryJobStore::new();
        let job = RenderJob::queued("p1", AspectRatio::Square);
        store.insert(job.clone()).unwrap();

        let updated = store.update(&job.id, &mut |j| j.progress = 40).unwrap();
        assert_eq!(updated.progress, 40);
        assert_eq!(store.get(&job.id).unwrap().progress, 40);
    }

    #[test]
    fn for_project_filters() {
        let store = MemoryJobStore::new();
        store.insert(RenderJob::queued("a", AspectRatio::Wide)).unwrap();
        store.insert(RenderJob::queued("b", AspectRatio::Wide)).unwrap();
        store.insert(RenderJob::queued("a", AspectRatio::Vertical)).unwrap();

        assert_eq!(store.for_project("a").unwrap().len(), 2);
        assert_eq!(store.for_project("b").unwrap().len(), 1);
        assert!(store.for_project("c").unwrap().is_empty());
    }

    #[test]
    fn remove_forgets_the_job() {
        let store = MemoryJobStore::new();
        let job = RenderJob::queued("p1", AspectRatio::Wide);
        store.insert(job.clone()).unwrap();
        store.remove(&job.id).unwrap();
        assert!(store.get(&job.id).is_err());
        assert!(store.remove(&job.id).is_err());
    }
}
