use rayon::prelude::*;

use crate::{
    animation::Spring,
    audio::{AudioFrame, AudioSchedule},
    camera::{CameraFrame, camera_at},
    captions::resolve_window,
    composition::{
        Composition, Project,
        model::{
            BRollClip, BRollKind, CaptionVariant, LowerThird, OverlayStyle, Placement,
            SlideDirection, TextCallout,
        },
    },
    effects::{
        FilterPipeline, resolve_grade,
        styles::{CharPose, OverlayState, StyleCtx, style_state},
    },
    foundation::{
        core::{Affine, Fps, FrameIndex, FrameRange, Resolution, Rgba8, Vec2},
        error::{ShowreelError, ShowreelResult},
        math::{Rng64, stable_hash64},
    },
};

/// Complete declarative state of one output frame: the layer stack in
/// paint order plus the audio events of the frame's interval.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ComposedFrame {
    pub frame: FrameIndex,
    pub time_sec: f64,
    pub resolution: Resolution,
    pub layers: Vec<Layer>,
    pub audio: AudioFrame,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    pub z: i32,
    #[serde(flatten)]
    pub content: LayerContent,
}

/// What a layer paints. The base footage layer is always present; the
/// others appear only while their element is on screen.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "layer", rename_all = "kebab-case")]
pub enum LayerContent {
    Base {
        camera: CameraFrame,
        transform: Affine,
        filters: FilterPipeline,
    },
    #[serde(rename = "b-roll")]
    BRoll {
        id: String,
        source: String,
        kind: BRollKind,
        placement: Placement,
        state: OverlayState,
    },
    Callout {
        id: String,
        text: String,
        color: Rgba8,
        position: Vec2,
        rotation_deg: f64,
        shake_px: Vec2,
        state: OverlayState,
    },
    LowerThird {
        id: String,
        name: String,
        title: String,
        accent: Rgba8,
        state: OverlayState,
    },
    Captions {
        words: Vec<CaptionWord>,
        position_frac: f64,
    },
}

/// One word of the on-screen caption window.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionWord {
    pub text: String,
    pub active: bool,
    pub color: Rgba8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pose: Option<CharPose>,
}

// Z bands, base to captions. Elements within a band keep authoring order.
const Z_BASE: i32 = 0;
const Z_BROLL: i32 = 10;
const Z_CALLOUT: i32 = 30;
const Z_LOWER_THIRD: i32 = 40;
const Z_CAPTIONS: i32 = 50;

const SHAKE_AMPLITUDE_PX: f64 = 4.0;
const WORD_POP_RISE_PCT: f64 = 1.5;

/// Evaluate one frame of the composition.
#[tracing::instrument(skip(comp))]
pub fn compose_frame(comp: &Composition, frame: FrameIndex) -> ShowreelResult<ComposedFrame> {
    let schedule = AudioSchedule::build(comp.project(), comp.project().duration_sec);
    compose_with_schedule(comp, &schedule, frame)
}

/// Evaluate `range`, which must lie within the composition.
#[tracing::instrument(skip(comp))]
pub fn compose_range(comp: &Composition, range: FrameRange) -> ShowreelResult<Vec<ComposedFrame>> {
    check_range(comp, range)?;
    let schedule = AudioSchedule::build(comp.project(), comp.project().duration_sec);
    (range.start.0..range.end.0)
        .map(|f| compose_with_schedule(comp, &schedule, FrameIndex(f)))
        .collect()
}

/// [`compose_range`] fanned out across the rayon pool. Frames are
/// independent, so the output is identical to the sequential path.
#[tracing::instrument(skip(comp))]
pub fn compose_range_par(
    comp: &Composition,
    range: FrameRange,
) -> ShowreelResult<Vec<ComposedFrame>> {
    check_range(comp, range)?;
    let schedule = AudioSchedule::build(comp.project(), comp.project().duration_sec);
    (range.start.0..range.end.0)
        .into_par_iter()
        .map(|f| compose_with_schedule(comp, &schedule, FrameIndex(f)))
        .collect()
}

fn check_range(comp: &Composition, range: FrameRange) -> ShowreelResult<()> {
    if range.end.0 > comp.total_frames() {
        return Err(ShowreelError::evaluation(
            "frame range exceeds composition bounds",
        ));
    }
    Ok(())
}

fn compose_with_schedule(
    comp: &Composition,
    schedule: &AudioSchedule,
    frame: FrameIndex,
) -> ShowreelResult<ComposedFrame> {
    if frame.0 >= comp.total_frames() {
        return Err(ShowreelError::evaluation("frame is out of bounds"));
    }

    let project = comp.project();
    let fps = project.fps;
    let time_sec = fps.frames_to_secs(frame.0);
    let resolution = comp.resolution();

    let mut layers = vec![base_layer(project, resolution, frame, time_sec)];
    for (index, clip) in project.broll.iter().enumerate() {
        if let Some(layer) = broll_layer(project, clip, index, frame) {
            layers.push(layer);
        }
    }
    for (index, callout) in project.callouts.iter().enumerate() {
        if let Some(layer) = callout_layer(project, callout, index, frame) {
            layers.push(layer);
        }
    }
    for (index, third) in project.lower_thirds.iter().enumerate() {
        if let Some(layer) = lower_third_layer(project, third, index, frame) {
            layers.push(layer);
        }
    }
    if let Some(layer) = captions_layer(project, time_sec) {
        layers.push(layer);
    }

    layers.sort_by_key(|l| l.z);

    Ok(ComposedFrame {
        frame,
        time_sec,
        resolution,
        layers,
        audio: schedule.audio_at(fps, frame),
    })
}

fn base_layer(
    project: &Project,
    resolution: Resolution,
    frame: FrameIndex,
    time_sec: f64,
) -> Layer {
    let camera = camera_at(&project.camera, project.duration_sec, time_sec);
    let filters = project
        .grade
        .as_ref()
        .map(|g| resolve_grade(g, frame.0, project.fps))
        .unwrap_or_default();
    Layer {
        z: Z_BASE,
        content: LayerContent::Base {
            camera,
            transform: camera.to_affine(resolution),
            filters,
        },
    }
}

/// Element-local frame and length for a `[start_sec, end_sec)` window.
fn local_window(fps: Fps, frame: FrameIndex, start_sec: f64, end_sec: f64) -> (i64, u64) {
    let start = fps.secs_to_frames_floor(start_sec.max(0.0));
    let end = fps.secs_to_frames_floor(end_sec.max(0.0));
    (frame.0 as i64 - start as i64, end.saturating_sub(start))
}

fn broll_layer(
    project: &Project,
    clip: &BRollClip,
    index: usize,
    frame: FrameIndex,
) -> Option<Layer> {
    let (local_frame, total_frames) = local_window(
        project.fps,
        frame,
        clip.start_sec,
        clip.start_sec + clip.duration_sec,
    );
    let ctx = StyleCtx {
        local_frame,
        total_frames,
        fps: project.fps,
        seed: stable_hash64(project.seed, &clip.id),
        text_len: 0,
    };
    let mut state = style_state(&clip.style, &ctx);
    if !state.visible {
        return None;
    }
    state.opacity = (state.opacity * clip.opacity).clamp(0.0, 1.0);
    state.scale *= clip.scale;
    state.translate_pct += clip.pan;

    Some(Layer {
        z: Z_BROLL + index as i32,
        content: LayerContent::BRoll {
            id: clip.id.clone(),
            source: clip.source.clone(),
            kind: clip.kind,
            placement: clip.placement,
            state,
        },
    })
}

fn callout_layer(
    project: &Project,
    callout: &TextCallout,
    index: usize,
    frame: FrameIndex,
) -> Option<Layer> {
    let (local_frame, total_frames) =
        local_window(project.fps, frame, callout.start_sec, callout.end_sec);
    let seed = stable_hash64(project.seed, &callout.id);
    let ctx = StyleCtx {
        local_frame,
        total_frames,
        fps: project.fps,
        seed,
        text_len: callout.text.chars().count(),
    };
    let state = style_state(&callout.style, &ctx);
    if !state.visible {
        return None;
    }

    let shake_px = if callout.shake {
        // Salted so the shake stream stays uncorrelated with the noise the
        // style itself draws from (seed, frame), e.g. glitch jitter.
        let mut rng = Rng64::for_frame(stable_hash64(seed, "shake"), local_frame as u64);
        Vec2::new(
            rng.next_range(-SHAKE_AMPLITUDE_PX, SHAKE_AMPLITUDE_PX),
            rng.next_range(-SHAKE_AMPLITUDE_PX, SHAKE_AMPLITUDE_PX),
        )
    } else {
        Vec2::ZERO
    };

    Some(Layer {
        z: Z_CALLOUT + index as i32,
        content: LayerContent::Callout {
            id: callout.id.clone(),
            text: callout.text.clone(),
            color: callout.color,
            position: callout.position,
            rotation_deg: callout.rotation_deg,
            shake_px,
            state,
        },
    })
}

fn lower_third_layer(
    project: &Project,
    third: &LowerThird,
    index: usize,
    frame: FrameIndex,
) -> Option<Layer> {
    let (local_frame, total_frames) =
        local_window(project.fps, frame, third.start_sec, third.end_sec);
    let ctx = StyleCtx {
        local_frame,
        total_frames,
        fps: project.fps,
        seed: stable_hash64(project.seed, &third.id),
        text_len: third.name.chars().count(),
    };
    // Lower thirds always ride in and out on the slide-up treatment.
    let state = style_state(
        &OverlayStyle::Slide {
            direction: SlideDirection::Up,
        },
        &ctx,
    );
    if !state.visible {
        return None;
    }

    Some(Layer {
        z: Z_LOWER_THIRD + index as i32,
        content: LayerContent::LowerThird {
            id: third.id.clone(),
            name: third.name.clone(),
            title: third.title.clone(),
            accent: third.accent,
            state,
        },
    })
}

fn captions_layer(project: &Project, time_sec: f64) -> Option<Layer> {
    let track = project.captions.as_ref()?;
    let transcript = project.transcript.as_ref()?;
    let window = resolve_window(&transcript.words, time_sec, track.window_size)?;

    let mut words = Vec::with_capacity(window.len());
    for i in window.indices() {
        let word = &transcript.words[i];
        let active = i == window.active;
        let highlighted = match track.variant {
            CaptionVariant::Karaoke => i <= window.active,
            CaptionVariant::Plain | CaptionVariant::Bounce => active && track.highlight_current,
        };
        let pose = (track.variant == CaptionVariant::Bounce && active)
            .then(|| word_pop(time_sec - word.start_sec));
        words.push(CaptionWord {
            text: word.text.clone(),
            active,
            color: if highlighted {
                track.highlight_color
            } else {
                track.base_color
            },
            pose,
        });
    }

    Some(Layer {
        z: Z_CAPTIONS,
        content: LayerContent::Captions {
            words,
            position_frac: track.position_frac,
        },
    })
}

/// Spring pop applied to the word that just became active.
fn word_pop(age_sec: f64) -> CharPose {
    let pos = Spring::BOUNCE.position(age_sec.max(0.0));
    CharPose {
        offset_y_pct: WORD_POP_RISE_PCT * (1.0 - pos),
        scale: 0.8 + 0.2 * pos,
        opacity: 1.0,
    }
}
