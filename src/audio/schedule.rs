use crate::{
    composition::model::Project,
    foundation::core::{Fps, FrameIndex},
};

/// A music bed clamped onto the timeline. Times are absolute seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct MusicSegment {
    pub source: String,
    pub timeline_start_sec: f64,
    pub timeline_end_sec: f64,
    pub volume: f64,
    pub fade_in_sec: f64,
    pub fade_out_sec: f64,
}

impl MusicSegment {
    /// Gain at `t_sec`: 0 outside the window, otherwise the track volume
    /// shaped by linear fade ramps at both ends.
    pub fn gain_at(&self, t_sec: f64) -> f64 {
        if t_sec < self.timeline_start_sec || t_sec >= self.timeline_end_sec {
            return 0.0;
        }
        let mut gain = self.volume;
        if self.fade_in_sec > 0.0 {
            let rel = t_sec - self.timeline_start_sec;
            gain *= (rel / self.fade_in_sec).clamp(0.0, 1.0);
        }
        if self.fade_out_sec > 0.0 {
            let rem = (self.timeline_end_sec - t_sec).max(0.0);
            gain *= (rem / self.fade_out_sec).clamp(0.0, 1.0);
        }
        gain
    }
}

/// A one-shot cue kept on the schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct SfxCue {
    pub id: String,
    pub source: String,
    pub start_sec: f64,
    pub volume: f64,
}

/// One-shot effects that start during this frame's interval.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SfxTrigger {
    pub id: String,
    pub source: String,
    pub volume: f64,
}

/// A music bed audible on this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MusicState {
    pub source: String,
    pub gain: f64,
}

/// Audio portion of an evaluated frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AudioFrame {
    pub triggers: Vec<SfxTrigger>,
    pub music: Vec<MusicState>,
}

/// All audio events of a project, normalized against the timeline once so
/// per-frame queries stay cheap.
#[derive(Clone, Debug, Default)]
pub struct AudioSchedule {
    music: Vec<MusicSegment>,
    cues: Vec<SfxCue>,
}

impl AudioSchedule {
    /// Music windows are clamped to `[0, duration_sec]` and silent or
    /// empty entries dropped. Cues outside the timeline are dropped, the
    /// rest sorted by start then id so frame output order is stable.
    pub fn build(project: &Project, duration_sec: f64) -> Self {
        let mut music = Vec::new();
        for track in &project.music {
            if track.volume <= 0.0 {
                continue;
            }
            let start = track.start_sec.max(0.0);
            let end = track.end_sec.unwrap_or(duration_sec).min(duration_sec);
            if end <= start {
                continue;
            }
            music.push(MusicSegment {
                source: track.source.clone(),
                timeline_start_sec: start,
                timeline_end_sec: end,
                volume: track.volume,
                fade_in_sec: track.fade_in_sec,
                fade_out_sec: track.fade_out_sec,
            });
        }

        let mut cues: Vec<SfxCue> = project
            .sound_effects
            .iter()
            .filter(|s| s.volume > 0.0 && s.start_sec >= 0.0 && s.start_sec < duration_sec)
            .map(|s| SfxCue {
                id: s.id.clone(),
                source: s.source.clone(),
                start_sec: s.start_sec,
                volume: s.volume,
            })
            .collect();
        cues.sort_by(|a, b| {
            a.start_sec
                .total_cmp(&b.start_sec)
                .then_with(|| a.id.cmp(&b.id))
        });

        Self { music, cues }
    }

    pub fn music(&self) -> &[MusicSegment] {
        &self.music
    }

    pub fn cues(&self) -> &[SfxCue] {
        &self.cues
    }

    /// Audio state for one frame. A cue triggers on exactly the frame
    /// whose interval `[t, t + 1/fps)` contains its start time.
    pub fn audio_at(&self, fps: Fps, frame: FrameIndex) -> AudioFrame {
        let t0 = fps.frames_to_secs(frame.0);
        let t1 = fps.frames_to_secs(frame.0 + 1);

        let triggers = self
            .cues
            .iter()
            .filter(|c| c.start_sec >= t0 && c.start_sec < t1)
            .map(|c| SfxTrigger {
                id: c.id.clone(),
                source: c.source.clone(),
                volume: c.volume,
            })
            .collect();

        let music = self
            .music
            .iter()
            .filter_map(|seg| {
                let gain = seg.gain_at(t0);
                (gain > 0.0).then(|| MusicState {
                    source: seg.source.clone(),
                    gain,
                })
            })
            .collect();

        AudioFrame { triggers, music }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::model::{MusicTrack, SoundEffect};

    fn project_with_audio() -> Project {
        let mut project = Project::new("p", 10.0);
        project.music.push(MusicTrack {
            source: "bed.mp3".to_string(),
            start_sec: 0.0,
            end_sec: None,
            volume: 0.8,
            fade_in_sec: 2.0,
            fade_out_sec: 2.0,
        });
        project.sound_effects.push(SoundEffect {
            id: "whoosh".to_string(),
            source: "whoosh.wav".to_string(),
            start_sec: 1.0,
            volume: 1.0,
        });
        project
    }

    #[test]
    fn music_gain_ramps_at_both_ends() {
        let schedule = AudioSchedule::build(&project_with_audio(), 10.0);
        let bed = &schedule.music()[0];
        assert_eq!(bed.gain_at(0.0), 0.0);
        assert!((bed.gain_at(1.0) - 0.4).abs() < 1e-12);
        assert!((bed.gain_at(5.0) - 0.8).abs() < 1e-12);
        assert!((bed.gain_at(9.0) - 0.4).abs() < 1e-12);
        assert_eq!(bed.gain_at(10.0), 0.0);
    }

    #[test]
    fn open_ended_music_is_clamped_to_duration() {
        let schedule = AudioSchedule::build(&project_with_audio(), 10.0);
        assert_eq!(schedule.music()[0].timeline_end_sec, 10.0);
    }

    #[test]
    fn cue_triggers_on_exactly_one_frame() {
        let schedule = AudioSchedule::build(&project_with_audio(), 10.0);
        let mut hits = Vec::new();
        for f in 0..300u64 {
            let frame = schedule.audio_at(Fps::DEFAULT, FrameIndex(f));
            if !frame.triggers.is_empty() {
                hits.push(f);
            }
        }
        assert_eq!(hits, vec![30]);
    }

    #[test]
    fn cue_at_time_zero_lands_on_frame_zero() {
        let mut project = project_with_audio();
        project.sound_effects[0].start_sec = 0.0;
        let schedule = AudioSchedule::build(&project, 10.0);
        let frame = schedule.audio_at(Fps::DEFAULT, FrameIndex(0));
        assert_eq!(frame.triggers.len(), 1);
        assert_eq!(frame.triggers[0].id, "whoosh");
    }

    #[test]
    fn cues_outside_timeline_are_dropped() {
        let mut project = project_with_audio();
        project.sound_effects.push(SoundEffect {
            id: "late".to_string(),
            source: "late.wav".to_string(),
            start_sec: 12.0,
            volume: 1.0,
        });
        project.sound_effects.push(SoundEffect {
            id: "early".to_string(),
            source: "early.wav".to_string(),
            start_sec: -1.0,
            volume: 1.0,
        });
        let schedule = AudioSchedule::build(&project, 10.0);
        assert_eq!(schedule.cues().len(), 1);
    }

    #[test]
    fn simultaneous_cues_are_ordered_by_id() {
        let mut project = project_with_audio();
        project.sound_effects.push(SoundEffect {
            id: "a-first".to_string(),
            source: "a.wav".to_string(),
            start_sec: 1.0,
            volume: 1.0,
        });
        let schedule = AudioSchedule::build(&project, 10.0);
        let frame = schedule.audio_at(Fps::DEFAULT, FrameIndex(30));
        assert_eq!(frame.triggers.len(), 2);
        assert_eq!(frame.triggers[0].id, "a-first");
        assert_eq!(frame.triggers[1].id, "whoosh");
    }

    #[test]
    fn silent_music_is_dropped() {
        let mut project = project_with_audio();
        project.music[0].volume = 0.0;
        let schedule = AudioSchedule::build(&project, 10.0);
        assert!(schedule.music().is_empty());
    }
}
