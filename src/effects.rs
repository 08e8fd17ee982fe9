//! Frame-level visual treatments: overlay entrance/exit styles and the
//! color grade resolver.

pub mod grade;
pub mod styles;

pub use grade::{FilterOp, FilterPipeline, OverlayPass, resolve_grade};
pub use styles::{CharPose, OverlayState, StyleCtx, TextProgress, style_state};
