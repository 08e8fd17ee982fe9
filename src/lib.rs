//! Showreel is a declarative video-composition timeline engine.
//!
//! A [`Project`] describes time-stamped edit operations over a clip:
//! word-timed captions, camera keyframes, b-roll cutaways, text
//! callouts, lower thirds, a color grade and audio tracks. Binding it
//! to an output shape yields a [`Composition`], and [`compose_frame`]
//! evaluates the full layered visual and audio state of any frame.
//!
//! # Pipeline overview
//!
//! 1. **Author**: build a [`Project`] by hand, through
//!    [`ProjectBuilder`], or from JSON.
//! 2. **Bind**: `Project + AspectRatio -> Composition` (validated once,
//!    output resolution fixed).
//! 3. **Evaluate**: `Composition + FrameIndex -> ComposedFrame` (the
//!    layer stack plus audio state of one frame).
//! 4. **Orchestrate** (optional): track long renders through
//!    [`RenderCoordinator`] and [`run_render_job`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: the same composition and frame index
//!   always produce the same [`ComposedFrame`], across runs and across
//!   sequential or parallel evaluation.
//! - **No IO in evaluation**: media is referenced by source string;
//!   nothing is decoded, rasterized or mixed here.
#![forbid(unsafe_code)]

pub mod animation;
pub mod audio;
pub mod camera;
pub mod captions;
pub mod composition;
pub mod effects;
pub mod eval;
pub mod foundation;
pub mod jobs;

pub use animation::ease::Ease;
pub use animation::keyframes::{Keyframe, Keyframes, Lerp};
pub use animation::spring::Spring;
pub use audio::schedule::{AudioFrame, AudioSchedule, MusicState, SfxTrigger};
pub use camera::motion::{CameraFrame, camera_at, drift_at, effective_keyframes};
pub use captions::timing::{WORD_END_GRACE_SEC, WordWindow, resolve_window};
pub use composition::dsl::ProjectBuilder;
pub use composition::model::{
    BRollClip, BRollKind, BlendMode, CameraKeyframe, CameraTrack, CaptionTrack, CaptionVariant,
    ColorGradeSpec, Composition, Corner, DriftConfig, GradeConfig, GradePreset, LowerThird,
    MusicTrack, OverlayStyle, Placement, Project, SlideDirection, SoundEffect, TextCallout,
    Transcript, TranscriptWord,
};
pub use effects::grade::{FilterOp, FilterPipeline, OverlayPass, resolve_grade};
pub use effects::styles::{CharPose, OverlayState, StyleCtx, TextProgress, style_state};
pub use eval::compositor::{
    CaptionWord, ComposedFrame, Layer, LayerContent, compose_frame, compose_range,
    compose_range_par,
};
pub use eval::fingerprint::{FrameFingerprint, fingerprint_frame, fingerprint_range};
pub use foundation::core::{
    Affine, AspectRatio, Fps, FrameIndex, FrameRange, Point, Rect, Resolution, Rgba8, Vec2,
};
pub use foundation::error::{ShowreelError, ShowreelResult};
pub use jobs::coordinator::{CANCELLED_BY_USER, JobEvent, RenderCoordinator};
pub use jobs::job::{JobId, JobStatus, RenderJob};
pub use jobs::runner::run_render_job;
pub use jobs::store::{JobStore, MemoryJobStore};
