//! Virtual camera motion. Keyframed pan and zoom with synthesized
//! boundary keyframes, plus ambient drift for unkeyed shots.

pub mod motion;

pub use motion::{CameraFrame, camera_at, drift_at, effective_keyframes};
