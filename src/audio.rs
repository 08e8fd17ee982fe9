//! Audio scheduling. No decoding or mixing happens here; evaluation
//! reports which cues fire and how loud each bed plays per frame.

pub mod schedule;

pub use schedule::{AudioFrame, AudioSchedule, MusicState, SfxTrigger};
