use crate::composition::Composition;
use crate::eval::{ComposedFrame, compose_frame};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::ShowreelResult;
use crate::jobs::coordinator::RenderCoordinator;
use crate::jobs::job::{JobId, JobStatus, RenderJob};

/// Receives each evaluated frame in order. An encoder, a preview
/// channel, or a test collector all fit behind this.
pub type FrameSink<'a> = &'a mut dyn FnMut(&ComposedFrame) -> ShowreelResult<()>;

/// Drive one queued job through the whole composition, feeding every
/// frame to `sink` and reporting progress along the way.
///
/// Cancellation is polled between frames: when the job leaves the
/// rendering state the walk stops and the current snapshot is returned
/// without an error. Evaluation and sink failures mark the job failed
/// and propagate.
#[tracing::instrument(skip(coordinator, comp, output, sink))]
pub fn run_render_job(
    coordinator: &RenderCoordinator,
    id: &JobId,
    comp: &Composition,
    output: impl Into<String>,
    sink: FrameSink<'_>,
) -> ShowreelResult<RenderJob> {
    let job = coordinator.start(id)?;
    if job.status != JobStatus::Rendering {
        // Cancelled while still queued; Started was absorbed.
        return Ok(job);
    }

    let total = comp.total_frames();
    let mut last_pct = 0u8;
    for f in 0..total {
        if f > 0 {
            let job = coordinator.get(id)?;
            if job.status != JobStatus::Rendering {
                tracing::info!(frame = f, "render job stopped mid-walk");
                return Ok(job);
            }
        }

        let frame = match compose_frame(comp, FrameIndex(f)) {
            Ok(frame) => frame,
            Err(err) => {
                coordinator.fail(id, err.to_string())?;
                return Err(err);
            }
        };
        if let Err(err) = sink(&frame) {
            coordinator.fail(id, err.to_string())?;
            return Err(err);
        }

        let pct = (((f + 1) * 100) / total) as u8;
        if pct != last_pct {
            coordinator.progress(id, pct)?;
            last_pct = pct;
        }
    }

    coordinator.complete(id, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::ProjectBuilder;
    use crate::foundation::core::AspectRatio;
    use crate::foundation::error::ShowreelError;

    fn one_second_comp() -> Composition {
        let project = ProjectBuilder::new("runner-test", 1.0)
            .word("hello", 0.1, 0.5)
            .build()
            .unwrap();
        Composition::new(project, AspectRatio::Wide).unwrap()
    }

    #[test]
    fn walks_every_frame_and_completes() {
        let comp = one_second_comp();
        let c = RenderCoordinator::in_memory();
        let job = c.queue("runner-test", AspectRatio::Wide).unwrap();

        let mut frames = Vec::new();
        let done = run_render_job(&c, &job.id, &comp, "out.mp4", &mut |f| {
            frames.push(f.frame);
            Ok(())
        })
        .unwrap();

        assert_eq!(frames.len(), comp.total_frames() as usize);
        assert_eq!(frames.first().map(|f| f.0), Some(0));
        assert_eq!(done.status, JobStatus::Completed);
        assert_eq!(done.progress, 100);
        assert_eq!(done.output.as_deref(), Some("out.mp4"));
    }

    #[test]
    fn sink_failure_marks_the_job_failed() {
        let comp = one_second_comp();
        let c = RenderCoordinator::in_memory();
        let job = c.queue("runner-test", AspectRatio::Wide).unwrap();

        let mut seen = 0u32;
        let result = run_render_job(&c, &job.id, &comp, "out.mp4", &mut |_| {
            seen += 1;
            if seen > 5 {
                Err(ShowreelError::evaluation("sink full"))
            } else {
                Ok(())
            }
        });

        assert!(result.is_err());
        let snapshot = c.get(&job.id).unwrap();
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert!(snapshot.error.as_deref().unwrap_or("").contains("sink full"));
    }

    #[test]
    fn running_a_cancelled_job_is_a_quiet_no_op() {
        let comp = one_second_comp();
        let c = RenderCoordinator::in_memory();
        let job = c.queue("runner-test", AspectRatio::Wide).unwrap();
        c.cancel(&job.id).unwrap();

        let mut called = false;
        let snapshot = run_render_job(&c, &job.id, &comp, "out.mp4", &mut |_| {
            called = true;
            Ok(())
        })
        .unwrap();

        assert!(!called);
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert_eq!(
            snapshot.error.as_deref(),
            Some(crate::jobs::coordinator::CANCELLED_BY_USER)
        );
    }

    #[test]
    fn mid_walk_cancellation_stops_the_walk() {
        let comp = one_second_comp();
        let c = RenderCoordinator::in_memory();
        let job = c.queue("runner-test", AspectRatio::Wide).unwrap();

        // Cancel from inside the sink, as a UI thread would from outside.
        let c2 = c.clone();
        let id = job.id.clone();
        let mut seen = 0u64;
        let snapshot = run_render_job(&c, &job.id, &comp, "out.mp4", &mut |_| {
            seen += 1;
            if seen == 3 {
                c2.cancel(&id).unwrap();
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(seen, 3);
        assert_eq!(snapshot.status, JobStatus::Failed);
        assert!(snapshot.progress < 100);
    }
}
