use std::f64::consts::TAU;

use crate::{
    animation::{Ease, Spring},
    composition::model::{OverlayStyle, SlideDirection},
    foundation::{core::Fps, core::Vec2, math::Rng64},
};

/// Evaluation context for one overlay on one frame. `local_frame` is
/// relative to the element's start and may be negative before it.
#[derive(Clone, Copy, Debug)]
pub struct StyleCtx {
    pub local_frame: i64,
    pub total_frames: u64,
    pub fps: Fps,
    /// Per-element seed, fixed for the element's whole lifetime.
    pub seed: u64,
    /// Character count of the rendered text, for per-character styles.
    pub text_len: usize,
}

/// Typewriter progress: how much of the text is revealed, and whether
/// the caret is lit on this frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextProgress {
    pub shown_chars: usize,
    pub cursor_on: bool,
}

/// Per-character pose for styles that animate characters independently.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CharPose {
    pub offset_y_pct: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Resolved visual state of an overlay on one frame. Translation is in
/// percent of the frame dimensions so renderers of any resolution can
/// apply it directly.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayState {
    pub visible: bool,
    pub opacity: f64,
    pub translate_pct: Vec2,
    pub scale: f64,
    pub blur_px: f64,
    pub glow: f64,
    pub jitter_px: Vec2,
    pub rgb_split_px: f64,
    /// Horizontal clip fraction, 1.0 when fully uncovered.
    pub reveal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chars: Option<Vec<CharPose>>,
    pub uppercase: bool,
    pub heavy_shadow: bool,
}

impl OverlayState {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            opacity: 0.0,
            ..Self::shown()
        }
    }

    fn shown() -> Self {
        Self {
            visible: true,
            opacity: 1.0,
            translate_pct: Vec2::ZERO,
            scale: 1.0,
            blur_px: 0.0,
            glow: 0.0,
            jitter_px: Vec2::ZERO,
            rgb_split_px: 0.0,
            reveal: 1.0,
            text: None,
            chars: None,
            uppercase: false,
            heavy_shadow: false,
        }
    }
}

const RAMP_SECS: f64 = 0.5;
const REVEAL_SECS: f64 = 0.8;
const SLIDE_OFFSET_PCT: f64 = 12.0;
const SLAM_START_SCALE: f64 = 5.0;
const SLAM_START_BLUR_PX: f64 = 20.0;
const BOUNCE_STAGGER_FRAMES: i64 = 2;
const BOUNCE_DROP_PCT: f64 = 6.0;
const CURSOR_BLINK_HZ: f64 = 2.0;
const NEON_PULSE_HZ: f64 = 1.2;

/// Entry/exit ramp length in frames. Scales with fps and shrinks for
/// short-lived overlays so the two ramps cannot swallow the hold.
fn ramp_frames(ctx: &StyleCtx) -> f64 {
    let nominal = (RAMP_SECS * ctx.fps.as_f64()).round();
    nominal.min((ctx.total_frames / 4) as f64).max(1.0)
}

/// Linear entry and exit ramps, each in [0, 1]. Entry reaches 1 once the
/// overlay has held for a ramp; exit falls to 0 at the final frame.
fn ramps(ctx: &StyleCtx) -> (f64, f64) {
    let ramp = ramp_frames(ctx);
    let f = ctx.local_frame as f64;
    let entry = ((f + 1.0) / ramp).clamp(0.0, 1.0);
    let exit = ((ctx.total_frames as f64 - f) / ramp).clamp(0.0, 1.0);
    (entry, exit)
}

fn elapsed_secs(ctx: &StyleCtx) -> f64 {
    ctx.fps.frames_to_secs(ctx.local_frame.max(0) as u64)
}

/// Overlay state for `style` at `ctx`. Pure: the same inputs always
/// produce the same state, including for the noise-driven styles.
pub fn style_state(style: &OverlayStyle, ctx: &StyleCtx) -> OverlayState {
    if ctx.local_frame < 0 || ctx.total_frames == 0 || ctx.local_frame as u64 >= ctx.total_frames {
        return OverlayState::hidden();
    }

    let (entry, exit) = ramps(ctx);
    let mut state = OverlayState::shown();

    match *style {
        OverlayStyle::Fade => {
            state.opacity = entry * exit;
        }
        OverlayStyle::Slide { direction } => {
            let from = match direction {
                SlideDirection::Left => Vec2::new(-SLIDE_OFFSET_PCT, 0.0),
                SlideDirection::Right => Vec2::new(SLIDE_OFFSET_PCT, 0.0),
                SlideDirection::Up => Vec2::new(0.0, SLIDE_OFFSET_PCT),
            };
            // Eases in from `from`, then keeps travelling out the far side.
            let settle = 1.0 - Ease::EaseOut.apply(entry);
            let depart = 1.0 - Ease::EaseOut.apply(exit);
            state.translate_pct = from * settle - from * depart;
            state.opacity = entry * exit;
        }
        OverlayStyle::Zoom => {
            let settled = Spring::SETTLE.position(elapsed_secs(ctx));
            state.scale = 1.2 + (1.0 - 1.2) * settled;
            state.opacity = entry * exit;
        }
        OverlayStyle::Slam => {
            let pos = Spring::SLAM.position(elapsed_secs(ctx));
            state.scale = SLAM_START_SCALE + (1.0 - SLAM_START_SCALE) * pos;
            state.blur_px = (SLAM_START_BLUR_PX * (1.0 - pos)).max(0.0);
            state.opacity = exit;
            state.uppercase = true;
            state.heavy_shadow = true;
        }
        OverlayStyle::Bounce => {
            let mut chars = Vec::with_capacity(ctx.text_len);
            for i in 0..ctx.text_len {
                let local = ctx.local_frame - (i as i64) * BOUNCE_STAGGER_FRAMES;
                if local < 0 {
                    chars.push(CharPose {
                        offset_y_pct: BOUNCE_DROP_PCT,
                        scale: 0.5,
                        opacity: 0.0,
                    });
                    continue;
                }
                let t = ctx.fps.frames_to_secs(local as u64);
                let pos = Spring::BOUNCE.position(t);
                chars.push(CharPose {
                    offset_y_pct: BOUNCE_DROP_PCT * (1.0 - pos),
                    scale: 0.5 + 0.5 * pos,
                    opacity: ((local + 1) as f64 / 4.0).clamp(0.0, 1.0),
                });
            }
            state.chars = Some(chars);
            state.opacity = exit;
        }
        OverlayStyle::Typewriter { chars_per_sec } => {
            let elapsed = elapsed_secs(ctx);
            let cps = chars_per_sec.max(0.0);
            let shown = ((elapsed * cps).floor() as usize).min(ctx.text_len);
            let cursor_on = if shown < ctx.text_len {
                true
            } else {
                (elapsed * CURSOR_BLINK_HZ * 2.0).floor() as u64 % 2 == 0
            };
            state.text = Some(TextProgress {
                shown_chars: shown,
                cursor_on,
            });
            state.opacity = exit;
        }
        OverlayStyle::Glitch => {
            let mut rng = Rng64::for_frame(ctx.seed, ctx.local_frame as u64);
            state.jitter_px = Vec2::new(rng.next_range(-3.0, 3.0), rng.next_range(-2.0, 2.0));
            let split_roll = rng.next_f64_01();
            let split_amt = rng.next_range(1.0, 6.0);
            state.rgb_split_px = if split_roll < 0.35 { split_amt } else { 0.0 };
            let flicker = if rng.next_f64_01() < 0.08 { 0.55 } else { 1.0 };
            state.opacity = entry * exit * flicker;
        }
        OverlayStyle::Reveal => {
            let reveal_frames = (REVEAL_SECS * ctx.fps.as_f64())
                .round()
                .min((ctx.total_frames / 2) as f64)
                .max(1.0);
            let p = ((ctx.local_frame as f64 + 1.0) / reveal_frames).clamp(0.0, 1.0);
            state.reveal = Ease::EaseInOut.apply(p);
            state.opacity = exit;
        }
        OverlayStyle::Neon => {
            state.glow = 0.7 + 0.3 * (TAU * NEON_PULSE_HZ * elapsed_secs(ctx)).sin();
            state.opacity = entry * exit;
        }
        OverlayStyle::Fire => {
            let mut rng = Rng64::for_frame(ctx.seed, ctx.local_frame as u64);
            state.glow = 0.8 + 0.4 * rng.next_f64_01();
            state.scale = 1.0 + 0.02 * (rng.next_f64_01() - 0.5);
            state.jitter_px = Vec2::new(0.0, rng.next_range(-1.5, 0.0));
            state.opacity = entry * exit;
        }
    }

    state.opacity = state.opacity.clamp(0.0, 1.0);
    state
}
