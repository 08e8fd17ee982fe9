use crate::{
    audio::AudioFrame,
    composition::model::{BRollKind, BlendMode, Corner, Placement},
    effects::{
        grade::{FilterOp, FilterPipeline},
        styles::{CharPose, OverlayState},
    },
    eval::compositor::{ComposedFrame, Layer, LayerContent},
    foundation::{core::Rgba8, math::Fnv1a64},
};

/// 128-bit digest of one evaluated frame. Equal digests mean the frames
/// are interchangeable for caching and regression comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Digest every field that affects what the frame looks or sounds like.
pub fn fingerprint_frame(frame: &ComposedFrame) -> FrameFingerprint {
    let mut h = PairHasher::new();
    h.u64(frame.frame.0);
    h.f64(frame.time_sec);
    h.u32(frame.resolution.width);
    h.u32(frame.resolution.height);
    h.u64(frame.layers.len() as u64);
    for layer in &frame.layers {
        write_layer(&mut h, layer);
    }
    write_audio(&mut h, &frame.audio);
    h.finish()
}

/// Order-sensitive digest over a frame sequence.
pub fn fingerprint_range<'a, I>(frames: I) -> FrameFingerprint
where
    I: IntoIterator<Item = &'a ComposedFrame>,
{
    let mut h = PairHasher::new();
    let mut count = 0u64;
    for frame in frames {
        let fp = fingerprint_frame(frame);
        h.u64(fp.hi);
        h.u64(fp.lo);
        count += 1;
    }
    h.u64(count);
    h.finish()
}

// Two independently seeded FNV-1a streams fed identical bytes.
struct PairHasher {
    a: Fnv1a64,
    b: Fnv1a64,
}

impl PairHasher {
    fn new() -> Self {
        Self {
            a: Fnv1a64::new(0xcbf2_9ce4_8422_2325),
            b: Fnv1a64::new(0x9ae1_6a3b_2f90_404f),
        }
    }

    fn bytes(&mut self, v: &[u8]) {
        self.a.write_bytes(v);
        self.b.write_bytes(v);
    }

    fn u8(&mut self, v: u8) {
        self.bytes(&[v]);
    }

    fn bool(&mut self, v: bool) {
        self.u8(u8::from(v));
    }

    fn u32(&mut self, v: u32) {
        self.bytes(&v.to_le_bytes());
    }

    fn u64(&mut self, v: u64) {
        self.bytes(&v.to_le_bytes());
    }

    fn i64(&mut self, v: i64) {
        self.u64(v as u64);
    }

    fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    fn str(&mut self, s: &str) {
        self.u64(s.len() as u64);
        self.bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        FrameFingerprint {
            hi: self.a.finish(),
            lo: self.b.finish(),
        }
    }
}

fn write_layer(h: &mut PairHasher, layer: &Layer) {
    h.i64(i64::from(layer.z));
    match &layer.content {
        LayerContent::Base {
            camera,
            transform,
            filters,
        } => {
            h.u8(0);
            h.f64(camera.scale);
            h.f64(camera.pan_x);
            h.f64(camera.pan_y);
            for c in transform.as_coeffs() {
                h.f64(c);
            }
            write_filters(h, filters);
        }
        LayerContent::BRoll {
            id,
            source,
            kind,
            placement,
            state,
        } => {
            h.u8(1);
            h.str(id);
            h.str(source);
            h.u8(match kind {
                BRollKind::Video => 0,
                BRollKind::Image => 1,
            });
            write_placement(h, *placement);
            write_state(h, state);
        }
        LayerContent::Callout {
            id,
            text,
            color,
            position,
            rotation_deg,
            shake_px,
            state,
        } => {
            h.u8(2);
            h.str(id);
            h.str(text);
            write_color(h, *color);
            h.f64(position.x);
            h.f64(position.y);
            h.f64(*rotation_deg);
            h.f64(shake_px.x);
            h.f64(shake_px.y);
            write_state(h, state);
        }
        LayerContent::LowerThird {
            id,
            name,
            title,
            accent,
            state,
        } => {
            h.u8(3);
            h.str(id);
            h.str(name);
            h.str(title);
            write_color(h, *accent);
            write_state(h, state);
        }
        LayerContent::Captions {
            words,
            position_frac,
        } => {
            h.u8(4);
            h.u64(words.len() as u64);
            for word in words {
                h.str(&word.text);
                h.bool(word.active);
                write_color(h, word.color);
                match word.pose {
                    Some(pose) => {
                        h.u8(1);
                        write_char_pose(h, pose);
                    }
                    None => h.u8(0),
                }
            }
            h.f64(*position_frac);
        }
    }
}

fn write_state(h: &mut PairHasher, state: &OverlayState) {
    h.bool(state.visible);
    h.f64(state.opacity);
    h.f64(state.translate_pct.x);
    h.f64(state.translate_pct.y);
    h.f64(state.scale);
    h.f64(state.blur_px);
    h.f64(state.glow);
    h.f64(state.jitter_px.x);
    h.f64(state.jitter_px.y);
    h.f64(state.rgb_split_px);
    h.f64(state.reveal);
    match state.text {
        Some(text) => {
            h.u8(1);
            h.u64(text.shown_chars as u64);
            h.bool(text.cursor_on);
        }
        None => h.u8(0),
    }
    match &state.chars {
        Some(chars) => {
            h.u8(1);
            h.u64(chars.len() as u64);
            for pose in chars {
                write_char_pose(h, *pose);
            }
        }
        None => h.u8(0),
    }
    h.bool(state.uppercase);
    h.bool(state.heavy_shadow);
}

fn write_char_pose(h: &mut PairHasher, pose: CharPose) {
    h.f64(pose.offset_y_pct);
    h.f64(pose.scale);
    h.f64(pose.opacity);
}

fn write_filters(h: &mut PairHasher, filters: &FilterPipeline) {
    h.u64(filters.ops.len() as u64);
    for op in &filters.ops {
        let (tag, value) = match *op {
            FilterOp::Brightness(v) => (0u8, v),
            FilterOp::Contrast(v) => (1, v),
            FilterOp::Saturate(v) => (2, v),
            FilterOp::HueRotate(v) => (3, v),
            FilterOp::Sepia(v) => (4, v),
            FilterOp::Grayscale(v) => (5, v),
            FilterOp::Invert(v) => (6, v),
        };
        h.u8(tag);
        h.f64(value);
    }
    match filters.overlay {
        Some(overlay) => {
            h.u8(1);
            write_color(h, overlay.color);
            h.u8(match overlay.blend {
                BlendMode::Overlay => 0,
                BlendMode::SoftLight => 1,
                BlendMode::Multiply => 2,
                BlendMode::Screen => 3,
            });
            h.f64(overlay.opacity);
        }
        None => h.u8(0),
    }
    match filters.vignette {
        Some(v) => {
            h.u8(1);
            h.f64(v);
        }
        None => h.u8(0),
    }
}

fn write_placement(h: &mut PairHasher, placement: Placement) {
    match placement {
        Placement::Fullscreen => h.u8(0),
        Placement::PipCorner { corner } => {
            h.u8(1);
            h.u8(match corner {
                Corner::TopLeft => 0,
                Corner::TopRight => 1,
                Corner::BottomLeft => 2,
                Corner::BottomRight => 3,
            });
        }
    }
}

fn write_audio(h: &mut PairHasher, audio: &AudioFrame) {
    h.u64(audio.triggers.len() as u64);
    for trigger in &audio.triggers {
        h.str(&trigger.id);
        h.str(&trigger.source);
        h.f64(trigger.volume);
    }
    h.u64(audio.music.len() as u64);
    for bed in &audio.music {
        h.str(&bed.source);
        h.f64(bed.gain);
    }
}

fn write_color(h: &mut PairHasher, color: Rgba8) {
    let [r, g, b, a] = <[u8; 4]>::from(color);
    h.bytes(&[r, g, b, a]);
}
