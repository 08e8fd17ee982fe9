pub mod timing;

pub use timing::{WORD_END_GRACE_SEC, WordWindow, resolve_window};
