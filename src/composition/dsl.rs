use crate::{
    animation::Ease,
    composition::model::{
        BRollClip, CameraKeyframe, CaptionTrack, ColorGradeSpec, DriftConfig, LowerThird,
        MusicTrack, Project, SoundEffect, TextCallout, Transcript, TranscriptWord,
    },
    foundation::core::Fps,
    foundation::error::ShowreelResult,
};

/// Fluent assembly of a [`Project`]. `build` validates the result, so a
/// builder chain either yields a renderable project or a precise error.
pub struct ProjectBuilder {
    project: Project,
}

impl ProjectBuilder {
    pub fn new(id: impl Into<String>, duration_sec: f64) -> Self {
        Self {
            project: Project::new(id, duration_sec),
        }
    }

    pub fn fps(mut self, fps: Fps) -> Self {
        self.project.fps = fps;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.project.seed = seed;
        self
    }

    pub fn transcript(mut self, transcript: Transcript) -> Self {
        self.project.transcript = Some(transcript);
        self
    }

    /// Append one transcript word, creating the transcript on first use.
    pub fn word(mut self, text: impl Into<String>, start_sec: f64, end_sec: f64) -> Self {
        let t = self.project.transcript.get_or_insert_default();
        t.words.push(TranscriptWord {
            text: text.into(),
            start_sec,
            end_sec,
            confidence: 1.0,
        });
        self
    }

    pub fn captions(mut self, captions: CaptionTrack) -> Self {
        self.project.captions = Some(captions);
        self
    }

    pub fn camera_key(mut self, time_sec: f64, scale: f64, pan_x: f64, pan_y: f64) -> Self {
        self.project.camera.keyframes.push(CameraKeyframe {
            time_sec,
            scale,
            pan_x,
            pan_y,
            ease: Ease::EaseInOut,
        });
        self
    }

    pub fn camera_keyframe(mut self, key: CameraKeyframe) -> Self {
        self.project.camera.keyframes.push(key);
        self
    }

    pub fn drift(mut self, drift: DriftConfig) -> Self {
        self.project.camera.drift = Some(drift);
        self
    }

    pub fn grade(mut self, grade: ColorGradeSpec) -> Self {
        self.project.grade = Some(grade);
        self
    }

    pub fn broll(mut self, clip: BRollClip) -> Self {
        self.project.broll.push(clip);
        self
    }

    pub fn callout(mut self, callout: TextCallout) -> Self {
        self.project.callouts.push(callout);
        self
    }

    pub fn lower_third(mut self, third: LowerThird) -> Self {
        self.project.lower_thirds.push(third);
        self
    }

    pub fn sound_effect(mut self, sfx: SoundEffect) -> Self {
        self.project.sound_effects.push(sfx);
        self
    }

    pub fn music(mut self, track: MusicTrack) -> Self {
        self.project.music.push(track);
        self
    }

    pub fn build(self) -> ShowreelResult<Project> {
        self.project.validate()?;
        Ok(self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::model::{CaptionVariant, OverlayStyle};
    use crate::foundation::core::{Rgba8, Vec2};

    #[test]
    fn builder_assembles_a_valid_project() {
        let project = ProjectBuilder::new("demo", 10.0)
            .seed(42)
            .word("hello", 0.0, 0.5)
            .word("world", 0.5, 1.0)
            .captions(CaptionTrack {
                window_size: 3,
                variant: CaptionVariant::Bounce,
                ..CaptionTrack::default()
            })
            .camera_key(2.0, 1.4, -5.0, 0.0)
            .callout(TextCallout {
                id: "c1".into(),
                text: "boom".into(),
                start_sec: 1.0,
                end_sec: 2.5,
                position: Vec2::new(0.5, 0.3),
                style: OverlayStyle::Slam,
                color: Rgba8::WHITE,
                rotation_deg: 0.0,
                shake: false,
            })
            .build()
            .unwrap();

        assert_eq!(project.transcript.as_ref().unwrap().words.len(), 2);
        assert_eq!(project.camera.keyframes.len(), 1);
        assert_eq!(project.callouts.len(), 1);
    }

    #[test]
    fn builder_surfaces_validation_errors() {
        let err = ProjectBuilder::new("  ", 10.0).build().unwrap_err();
        assert!(err.to_string().contains("project id"));

        let err = ProjectBuilder::new("demo", 0.0).build().unwrap_err();
        assert!(err.to_string().contains("duration_sec"));
    }
}
