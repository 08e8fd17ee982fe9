//! Render job tracking: queue, progress, cancellation. The evaluator
//! itself stays pure; this layer is the mutable edge around it.

pub mod coordinator;
pub mod job;
pub mod runner;
pub mod store;

pub use coordinator::{CANCELLED_BY_USER, JobEvent, RenderCoordinator};
pub use job::{JobId, JobStatus, RenderJob};
pub use runner::run_render_job;
pub use store::{JobStore, MemoryJobStore};
