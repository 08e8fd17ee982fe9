use crate::{
    animation::Ease,
    foundation::core::{AspectRatio, FrameIndex, FrameRange, Fps, Resolution, Rgba8, Vec2},
    foundation::error::{ShowreelError, ShowreelResult},
};

/// Smallest scale a camera keyframe may carry after normalization.
pub(crate) const MIN_CAMERA_SCALE: f64 = 0.01;

/// The long-lived aggregate root of one editing session: transcript plus
/// every authored edit list, exactly as the editor stores it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Project {
    pub id: String,
    pub duration_sec: f64,
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// Global determinism seed; every noisy effect derives its stream here.
    #[serde(default)]
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Transcript>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captions: Option<CaptionTrack>,
    #[serde(default)]
    pub camera: CameraTrack,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<ColorGradeSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub broll: Vec<BRollClip>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub callouts: Vec<TextCallout>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lower_thirds: Vec<LowerThird>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sound_effects: Vec<SoundEffect>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub music: Vec<MusicTrack>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Transcript {
    pub words: Vec<TranscriptWord>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TranscriptWord {
    pub text: String,
    pub start_sec: f64,
    pub end_sec: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl Transcript {
    /// Build a transcript, restoring time order and dropping words whose
    /// timing is unusable.
    pub fn new(words: Vec<TranscriptWord>) -> Self {
        let mut t = Self { words };
        t.normalize();
        t
    }

    pub(crate) fn normalize(&mut self) {
        self.words.retain(|w| {
            w.start_sec.is_finite() && w.end_sec.is_finite() && w.end_sec >= w.start_sec
        });
        for w in &mut self.words {
            if !w.confidence.is_finite() {
                w.confidence = 1.0;
            }
        }
        self.words
            .sort_by(|a, b| a.start_sec.total_cmp(&b.start_sec));
    }
}

/// Caption rendering choices for the transcript overlay.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CaptionTrack {
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_true")]
    pub highlight_current: bool,
    #[serde(default = "default_caption_base")]
    pub base_color: Rgba8,
    #[serde(default = "default_caption_highlight")]
    pub highlight_color: Rgba8,
    #[serde(default)]
    pub variant: CaptionVariant,
    /// Vertical anchor of the caption block as a fraction of frame height.
    #[serde(default = "default_caption_position")]
    pub position_frac: f64,
}

impl Default for CaptionTrack {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            highlight_current: true,
            base_color: default_caption_base(),
            highlight_color: default_caption_highlight(),
            variant: CaptionVariant::default(),
            position_frac: default_caption_position(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionVariant {
    #[default]
    Plain,
    /// Active word pops with a spring scale.
    Bounce,
    /// Words at or before the active one take the highlight color.
    Karaoke,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct CameraTrack {
    #[serde(default)]
    pub keyframes: Vec<CameraKeyframe>,
    /// Keyframe-free ambient motion, used when no keyframes are authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift: Option<DriftConfig>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraKeyframe {
    pub time_sec: f64,
    #[serde(default = "default_camera_scale")]
    pub scale: f64,
    #[serde(default)]
    pub pan_x: f64,
    #[serde(default)]
    pub pan_y: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl CameraTrack {
    pub(crate) fn normalize(&mut self) {
        self.keyframes.retain(|k| {
            k.time_sec.is_finite()
                && k.scale.is_finite()
                && k.pan_x.is_finite()
                && k.pan_y.is_finite()
        });
        for k in &mut self.keyframes {
            if k.scale <= 0.0 {
                k.scale = MIN_CAMERA_SCALE;
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DriftConfig {
    #[serde(default = "default_drift_intensity")]
    pub intensity: f64,
    #[serde(default = "default_drift_speed")]
    pub speed: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            intensity: default_drift_intensity(),
            speed: default_drift_speed(),
        }
    }
}

/// Entrance/exit animation contract for overlays. One closed set shared
/// by b-roll, callouts and caption styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OverlayStyle {
    #[default]
    Fade,
    Slide {
        #[serde(default)]
        direction: SlideDirection,
    },
    Zoom,
    Slam,
    Bounce,
    Typewriter {
        #[serde(default = "default_chars_per_sec")]
        chars_per_sec: f64,
    },
    Glitch,
    Reveal,
    Neon,
    Fire,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideDirection {
    Left,
    Right,
    #[default]
    Up,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BRollClip {
    pub id: String,
    pub source: String,
    #[serde(default)]
    pub kind: BRollKind,
    pub start_sec: f64,
    pub duration_sec: f64,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_overlay_scale")]
    pub scale: f64,
    #[serde(default)]
    pub pan: Vec2,
    #[serde(default)]
    pub placement: Placement,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BRollKind {
    #[default]
    Video,
    Image,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    #[default]
    Fullscreen,
    PipCorner {
        corner: Corner,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextCallout {
    pub id: String,
    pub text: String,
    pub start_sec: f64,
    pub end_sec: f64,
    /// Anchor as fractions of frame width/height.
    #[serde(default = "default_callout_position")]
    pub position: Vec2,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default = "default_caption_base")]
    pub color: Rgba8,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub shake: bool,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LowerThird {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub start_sec: f64,
    pub end_sec: f64,
    #[serde(default = "default_accent")]
    pub accent: Rgba8,
}

/// A named look, an explicit override record, or both; the override wins
/// field-by-field over the preset.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ColorGradeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<GradePreset>,
    #[serde(default)]
    pub config: GradeConfig,
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    #[serde(default)]
    pub animate_in: bool,
}

/// Percentage values follow the editor's filter convention: 100 is the
/// identity for brightness/contrast/saturation, 0 for everything else.
/// An absent field contributes no filter stage at all, which is distinct
/// from a present field at its neutral value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue_rotate_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sepia: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_color: Option<Rgba8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_blend: Option<BlendMode>,
    /// Vignette strength in [0, 1]; `None` means no vignette pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vignette: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradePreset {
    Cinematic,
    Vintage,
    Cold,
    Noir,
    Vibrant,
    Dreamy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Overlay,
    SoftLight,
    Multiply,
    Screen,
}

/// One-shot sound cue with no envelope.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SoundEffect {
    pub id: String,
    pub source: String,
    pub start_sec: f64,
    #[serde(default = "default_volume")]
    pub volume: f64,
}

/// Continuous bed with linear fade ramps at both ends.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MusicTrack {
    pub source: String,
    #[serde(default)]
    pub start_sec: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_sec: Option<f64>,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub fade_in_sec: f64,
    #[serde(default)]
    pub fade_out_sec: f64,
}

impl Project {
    /// Empty project skeleton; everything else is opt-in.
    pub fn new(id: impl Into<String>, duration_sec: f64) -> Self {
        Self {
            id: id.into(),
            duration_sec,
            fps: Fps::DEFAULT,
            seed: 0,
            transcript: None,
            captions: None,
            camera: CameraTrack::default(),
            grade: None,
            broll: Vec::new(),
            callouts: Vec::new(),
            lower_thirds: Vec::new(),
            sound_effects: Vec::new(),
            music: Vec::new(),
        }
    }

    pub fn validate(&self) -> ShowreelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ShowreelError::validation("project id must be non-empty"));
        }
        if !self.duration_sec.is_finite() || self.duration_sec <= 0.0 {
            return Err(ShowreelError::validation("duration_sec must be > 0"));
        }
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ShowreelError::validation("fps must have num>0 and den>0"));
        }

        if let Some(captions) = &self.captions {
            if captions.window_size == 0 {
                return Err(ShowreelError::validation(
                    "caption window_size must be >= 1",
                ));
            }
            if !(0.0..=1.0).contains(&captions.position_frac) {
                return Err(ShowreelError::validation(
                    "caption position_frac must be within [0, 1]",
                ));
            }
        }

        for clip in &self.broll {
            if clip.id.trim().is_empty() {
                return Err(ShowreelError::validation("b-roll clip id must be non-empty"));
            }
            if clip.source.trim().is_empty() {
                return Err(ShowreelError::validation(format!(
                    "b-roll clip '{}' source must be non-empty",
                    clip.id
                )));
            }
            if !clip.start_sec.is_finite() || !clip.duration_sec.is_finite() {
                return Err(ShowreelError::validation(format!(
                    "b-roll clip '{}' has non-finite timing",
                    clip.id
                )));
            }
            if clip.duration_sec <= 0.0 {
                return Err(ShowreelError::validation(format!(
                    "b-roll clip '{}' duration_sec must be > 0",
                    clip.id
                )));
            }
            if !(0.0..=1.0).contains(&clip.opacity) {
                return Err(ShowreelError::validation(format!(
                    "b-roll clip '{}' opacity must be within [0, 1]",
                    clip.id
                )));
            }
        }

        for callout in &self.callouts {
            validate_window("callout", &callout.id, callout.start_sec, callout.end_sec)?;
        }
        for third in &self.lower_thirds {
            if third.name.trim().is_empty() {
                return Err(ShowreelError::validation(format!(
                    "lower third '{}' name must be non-empty",
                    third.id
                )));
            }
            validate_window("lower third", &third.id, third.start_sec, third.end_sec)?;
        }

        for sfx in &self.sound_effects {
            if sfx.source.trim().is_empty() {
                return Err(ShowreelError::validation(format!(
                    "sound effect '{}' source must be non-empty",
                    sfx.id
                )));
            }
            if !sfx.start_sec.is_finite() {
                return Err(ShowreelError::validation(format!(
                    "sound effect '{}' start_sec must be finite",
                    sfx.id
                )));
            }
            if !(0.0..=1.0).contains(&sfx.volume) {
                return Err(ShowreelError::validation(format!(
                    "sound effect '{}' volume must be within [0, 1]",
                    sfx.id
                )));
            }
        }

        for (i, track) in self.music.iter().enumerate() {
            if track.source.trim().is_empty() {
                return Err(ShowreelError::validation(format!(
                    "music track #{i} source must be non-empty"
                )));
            }
            if !track.start_sec.is_finite() {
                return Err(ShowreelError::validation(format!(
                    "music track #{i} start_sec must be finite"
                )));
            }
            if let Some(end) = track.end_sec
                && (!end.is_finite() || end < track.start_sec)
            {
                return Err(ShowreelError::validation(format!(
                    "music track #{i} has end before start"
                )));
            }
            if !(0.0..=1.0).contains(&track.volume) {
                return Err(ShowreelError::validation(format!(
                    "music track #{i} volume must be within [0, 1]"
                )));
            }
            if track.fade_in_sec < 0.0 || track.fade_out_sec < 0.0 {
                return Err(ShowreelError::validation(format!(
                    "music track #{i} fade durations must be >= 0"
                )));
            }
        }

        if let Some(grade) = &self.grade
            && !grade.intensity.is_finite()
        {
            return Err(ShowreelError::validation("grade intensity must be finite"));
        }

        Ok(())
    }

    /// Defensive cleanup applied when a project is packaged for rendering:
    /// transcript re-ordered, unusable keyframes dropped, non-positive
    /// camera scales clamped.
    pub(crate) fn normalized(mut self) -> Self {
        if let Some(t) = self.transcript.as_mut() {
            t.normalize();
        }
        self.camera.normalize();
        self
    }
}

fn validate_window(kind: &str, id: &str, start: f64, end: f64) -> ShowreelResult<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ShowreelError::validation(format!(
            "{kind} '{id}' has non-finite timing"
        )));
    }
    if end < start {
        return Err(ShowreelError::validation(format!(
            "{kind} '{id}' has end before start"
        )));
    }
    Ok(())
}

/// One exportable variant: a validated, normalized project snapshot bound
/// to an aspect ratio. Taken at render-trigger time; later edits to the
/// live project do not reach through it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CompositionInput")]
pub struct Composition {
    project: Project,
    aspect: AspectRatio,
}

#[derive(serde::Deserialize)]
struct CompositionInput {
    project: Project,
    aspect: AspectRatio,
}

impl TryFrom<CompositionInput> for Composition {
    type Error = ShowreelError;

    fn try_from(v: CompositionInput) -> Result<Self, Self::Error> {
        Composition::new(v.project, v.aspect)
    }
}

impl Composition {
    pub fn new(project: Project, aspect: AspectRatio) -> ShowreelResult<Self> {
        let project = project.normalized();
        project.validate()?;
        Ok(Self { project, aspect })
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    pub fn resolution(&self) -> Resolution {
        self.aspect.resolution()
    }

    pub fn total_frames(&self) -> u64 {
        let frames = (self.project.duration_sec * self.project.fps.as_f64()).round();
        (frames as u64).max(1)
    }

    pub fn frame_range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }
}

fn default_fps() -> Fps {
    Fps::DEFAULT
}

fn default_confidence() -> f64 {
    1.0
}

fn default_window_size() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_caption_base() -> Rgba8 {
    Rgba8::WHITE
}

fn default_caption_highlight() -> Rgba8 {
    Rgba8::new(250, 204, 21, 255)
}

fn default_caption_position() -> f64 {
    0.8
}

fn default_camera_scale() -> f64 {
    1.0
}

fn default_drift_intensity() -> f64 {
    1.0
}

fn default_drift_speed() -> f64 {
    1.0
}

fn default_chars_per_sec() -> f64 {
    15.0
}

fn default_opacity() -> f64 {
    1.0
}

fn default_overlay_scale() -> f64 {
    1.0
}

fn default_callout_position() -> Vec2 {
    Vec2::new(0.5, 0.4)
}

fn default_accent() -> Rgba8 {
    Rgba8::new(56, 189, 248, 255)
}

fn default_intensity() -> f64 {
    1.0
}

fn default_volume() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_project() -> Project {
        serde_json::from_str(r#"{ "id": "p1", "duration_sec": 10.0 }"#).unwrap()
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let p = minimal_project();
        assert_eq!(p.fps, Fps::DEFAULT);
        assert_eq!(p.seed, 0);
        assert!(p.transcript.is_none());
        assert!(p.camera.keyframes.is_empty());
        assert!(p.broll.is_empty());
        p.validate().unwrap();
    }

    #[test]
    fn overlay_style_serde_shapes() {
        let slide: OverlayStyle =
            serde_json::from_str(r#"{ "kind": "slide", "direction": "left" }"#).unwrap();
        assert_eq!(
            slide,
            OverlayStyle::Slide {
                direction: SlideDirection::Left
            }
        );

        let fade: OverlayStyle = serde_json::from_str(r#"{ "kind": "fade" }"#).unwrap();
        assert_eq!(fade, OverlayStyle::Fade);

        let tw: OverlayStyle = serde_json::from_str(r#"{ "kind": "typewriter" }"#).unwrap();
        assert_eq!(
            tw,
            OverlayStyle::Typewriter {
                chars_per_sec: 15.0
            }
        );
    }

    #[test]
    fn json_roundtrip_preserves_edits() {
        let mut p = minimal_project();
        p.captions = Some(CaptionTrack::default());
        p.callouts.push(TextCallout {
            id: "c1".into(),
            text: "WOW".into(),
            start_sec: 1.0,
            end_sec: 3.0,
            position: Vec2::new(0.5, 0.3),
            style: OverlayStyle::Slam,
            color: Rgba8::WHITE,
            rotation_deg: -4.0,
            shake: true,
        });
        let s = serde_json::to_string_pretty(&p).unwrap();
        let back: Project = serde_json::from_str(&s).unwrap();
        assert_eq!(back.callouts.len(), 1);
        assert_eq!(back.callouts[0].style, OverlayStyle::Slam);
        assert!(back.callouts[0].shake);
    }

    #[test]
    fn validate_rejects_bad_windows() {
        let mut p = minimal_project();
        p.callouts.push(TextCallout {
            id: "c1".into(),
            text: "x".into(),
            start_sec: 5.0,
            end_sec: 2.0,
            position: default_callout_position(),
            style: OverlayStyle::Fade,
            color: Rgba8::WHITE,
            rotation_deg: 0.0,
            shake: false,
        });
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_caption_window() {
        let mut p = minimal_project();
        p.captions = Some(CaptionTrack {
            window_size: 0,
            ..CaptionTrack::default()
        });
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_broll_source() {
        let mut p = minimal_project();
        p.broll.push(BRollClip {
            id: "b1".into(),
            source: "  ".into(),
            kind: BRollKind::Image,
            start_sec: 0.0,
            duration_sec: 2.0,
            style: OverlayStyle::Fade,
            opacity: 1.0,
            scale: 1.0,
            pan: Vec2::ZERO,
            placement: Placement::Fullscreen,
        });
        assert!(p.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_levels() {
        let mut p = minimal_project();
        p.broll.push(BRollClip {
            id: "b1".into(),
            source: "clip.mp4".into(),
            kind: BRollKind::Video,
            start_sec: 0.0,
            duration_sec: 2.0,
            style: OverlayStyle::Fade,
            opacity: 1.4,
            scale: 1.0,
            pan: Vec2::ZERO,
            placement: Placement::Fullscreen,
        });
        assert!(p.validate().is_err());

        let mut p = minimal_project();
        p.sound_effects.push(SoundEffect {
            id: "s1".into(),
            source: "boom.wav".into(),
            start_sec: 1.0,
            volume: -0.1,
        });
        assert!(p.validate().is_err());
    }

    #[test]
    fn composition_normalizes_transcript_and_camera() {
        let mut p = minimal_project();
        p.transcript = Some(Transcript {
            words: vec![
                TranscriptWord {
                    text: "world".into(),
                    start_sec: 1.0,
                    end_sec: 2.0,
                    confidence: 0.9,
                },
                TranscriptWord {
                    text: "hello".into(),
                    start_sec: 0.0,
                    end_sec: 1.0,
                    confidence: f64::NAN,
                },
                TranscriptWord {
                    text: "bogus".into(),
                    start_sec: f64::NAN,
                    end_sec: 2.0,
                    confidence: 1.0,
                },
            ],
        });
        p.camera.keyframes.push(CameraKeyframe {
            time_sec: 2.0,
            scale: -1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            ease: Ease::Linear,
        });

        let comp = Composition::new(p, AspectRatio::Wide).unwrap();
        let words = &comp.project().transcript.as_ref().unwrap().words;
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "hello");
        assert_eq!(words[0].confidence, 1.0);
        assert_eq!(comp.project().camera.keyframes[0].scale, MIN_CAMERA_SCALE);
    }

    #[test]
    fn total_frames_rounds_from_duration() {
        let p = minimal_project();
        let comp = Composition::new(p, AspectRatio::Vertical).unwrap();
        assert_eq!(comp.total_frames(), 300);
        assert_eq!(comp.resolution().width, 1080);
        assert!(comp.frame_range().contains(FrameIndex(299)));
        assert!(!comp.frame_range().contains(FrameIndex(300)));
    }
}
