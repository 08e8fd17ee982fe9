use showreel::{AspectRatio, Composition, Project, RenderCoordinator, run_render_job};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/showcase.json");
    let project: Project = serde_json::from_str(s)?;
    let comp = Composition::new(project, AspectRatio::Vertical)?;

    let coordinator = RenderCoordinator::in_memory();
    let job = coordinator.queue("showcase", AspectRatio::Vertical)?;

    let mut frames = 0u64;
    let done = run_render_job(&coordinator, &job.id, &comp, "showcase.mp4", &mut |_| {
        frames += 1;
        Ok(())
    })?;

    println!(
        "job {}: {} after {} frames, progress {}",
        done.id, done.status, frames, done.progress
    );
    Ok(())
}
