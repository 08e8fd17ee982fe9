use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use showreel::{
    AspectRatio, Composition, FrameIndex, Project, RenderCoordinator, compose_frame,
    compose_range_par, fingerprint_frame, fingerprint_range, run_render_job,
};

#[derive(Parser, Debug)]
#[command(name = "showreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a project file: timing, tracks, element counts.
    Inspect(InspectArgs),
    /// Evaluate a single frame and emit its state as JSON.
    Frame(FrameArgs),
    /// Queue a render job and walk every frame, optionally to JSON Lines.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output shape.
    #[arg(long, default_value_t = AspectRatio::Wide)]
    aspect: AspectRatio,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output shape.
    #[arg(long, default_value_t = AspectRatio::Wide)]
    aspect: AspectRatio,

    /// Output JSON Lines path; evaluate without writing when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Evaluate frames across a thread pool instead of walking them.
    #[arg(long)]
    parallel: bool,

    /// Thread cap for --parallel; all cores when omitted.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn read_project_json(path: &Path) -> anyhow::Result<Project> {
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    let r = BufReader::new(f);
    let project: Project = serde_json::from_reader(r).with_context(|| "parse project JSON")?;
    Ok(project)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let project = read_project_json(&args.in_path)?;
    // Binding validates and normalizes; the aspect does not change timing.
    let comp = Composition::new(project, AspectRatio::Wide)?;
    let p = comp.project();

    println!("project:      {}", p.id);
    println!(
        "duration:     {}s at {}/{} fps ({} frames)",
        p.duration_sec,
        p.fps.num,
        p.fps.den,
        comp.total_frames()
    );
    println!("seed:         {}", p.seed);

    let words = p.transcript.as_ref().map_or(0, |t| t.words.len());
    println!("transcript:   {words} words");
    match &p.captions {
        Some(c) => println!(
            "captions:     {:?}, window {}, anchor {:.2}",
            c.variant, c.window_size, c.position_frac
        ),
        None => println!("captions:     off"),
    }
    println!(
        "camera:       {} keyframes{}",
        p.camera.keyframes.len(),
        if p.camera.drift.is_some() { ", drift" } else { "" }
    );
    match &p.grade {
        Some(g) => match g.preset {
            Some(preset) => println!("grade:        {preset:?} at {:.2}", g.intensity),
            None => println!("grade:        custom at {:.2}", g.intensity),
        },
        None => println!("grade:        off"),
    }
    println!("b-roll:       {} clips", p.broll.len());
    println!("callouts:     {}", p.callouts.len());
    println!("lower thirds: {}", p.lower_thirds.len());
    println!("sfx:          {}", p.sound_effects.len());
    println!("music:        {} tracks", p.music.len());

    println!("outputs:");
    for aspect in AspectRatio::ALL {
        let r = aspect.resolution();
        println!("  {:<6} {}x{}", aspect.as_str(), r.width, r.height);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let project = read_project_json(&args.in_path)?;
    let comp = Composition::new(project, args.aspect)?;
    let state = compose_frame(&comp, FrameIndex(args.frame))?;

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &state).context("write frame JSON")?;
            w.write_all(b"\n")?;
            w.flush()?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &state).context("write frame JSON")?;
            w.write_all(b"\n")?;
        }
    }
    eprintln!("fingerprint {}", fingerprint_frame(&state));
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let project = read_project_json(&args.in_path)?;
    let comp = Composition::new(project, args.aspect)?;

    let coordinator = RenderCoordinator::in_memory();
    let job = coordinator.queue(&comp.project().id, args.aspect)?;
    let output = match &args.out {
        Some(p) => p.display().to_string(),
        None => "discarded".to_string(),
    };

    let mut frames = Vec::with_capacity(comp.total_frames() as usize);
    let done = if args.parallel {
        // Batch evaluation has no per-frame walk to hook into, so the
        // lifecycle is driven directly around it.
        coordinator.start(&job.id)?;
        let pool = build_thread_pool(args.threads)?;
        match pool.install(|| compose_range_par(&comp, comp.frame_range())) {
            Ok(batch) => {
                frames = batch;
                coordinator.complete(&job.id, output)?
            }
            Err(err) => {
                coordinator.fail(&job.id, err.to_string())?;
                return Err(err.into());
            }
        }
    } else {
        run_render_job(&coordinator, &job.id, &comp, output, &mut |frame| {
            frames.push(frame.clone());
            Ok(())
        })?
    };
    let fingerprint = fingerprint_range(&frames);

    if let Some(out) = &args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
        let mut w = BufWriter::new(f);
        for frame in &frames {
            serde_json::to_writer(&mut w, frame).context("write frame JSON line")?;
            w.write_all(b"\n")?;
        }
        w.flush()?;
        eprintln!("wrote {}", out.display());
    }

    let r = comp.resolution();
    eprintln!(
        "job {}: {}, progress {}%",
        done.id, done.status, done.progress
    );
    eprintln!(
        "evaluated {} frames ({}, {}x{})",
        frames.len(),
        comp.aspect().as_str(),
        r.width,
        r.height
    );
    eprintln!("fingerprint {fingerprint}");
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> anyhow::Result<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().context("build rayon thread pool")
}
