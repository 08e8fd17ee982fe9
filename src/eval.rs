//! Deterministic frame evaluation: a [`crate::composition::Composition`]
//! in, the declarative layer stack and audio state of one frame out.

pub mod compositor;
pub mod fingerprint;

pub use compositor::{
    CaptionWord, ComposedFrame, Layer, LayerContent, compose_frame, compose_range,
    compose_range_par,
};
pub use fingerprint::{FrameFingerprint, fingerprint_frame, fingerprint_range};
