pub mod ease;
pub mod keyframes;
pub mod spring;

pub use ease::Ease;
pub use keyframes::{Keyframe, Keyframes, Lerp};
pub use spring::Spring;
