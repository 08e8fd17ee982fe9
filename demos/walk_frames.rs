use showreel::{AspectRatio, Composition, FrameIndex, Project, compose_frame, fingerprint_frame};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/showcase.json");
    let project: Project = serde_json::from_str(s)?;
    let comp = Composition::new(project, AspectRatio::Wide)?;

    for f in [0u64, 60, 95, 210, 300, 359] {
        let frame = compose_frame(&comp, FrameIndex(f))?;
        println!(
            "frame {f}: {} layers, fingerprint {}",
            frame.layers.len(),
            fingerprint_frame(&frame)
        );
    }

    Ok(())
}
