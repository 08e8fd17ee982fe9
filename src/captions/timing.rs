use crate::composition::model::TranscriptWord;

/// Grace appended to each word's end so the highlight bridges the small
/// silences between consecutive words.
pub const WORD_END_GRACE_SEC: f64 = 0.1;

/// Resolved caption window: indices into the transcript word list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordWindow {
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    /// Absolute index of the active word; always within `start..end`.
    pub active: usize,
}

impl WordWindow {
    pub fn indices(self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Resolve which words are on screen at `current_sec`.
///
/// The active word is the latest one whose span has started, provided
/// `current_sec` still falls inside `[start, end + grace)`. The window is
/// centered on the active word and clipped to the transcript bounds, so
/// the active word is always inside it. With no active word there is no
/// caption this frame; a non-finite `current_sec` resolves nothing.
///
/// `words` must be ordered by `start_sec` ascending (project
/// normalization guarantees this); the scan is then equivalent to a
/// linear pass over the list.
pub fn resolve_window(
    words: &[TranscriptWord],
    current_sec: f64,
    window_size: usize,
) -> Option<WordWindow> {
    if words.is_empty() || window_size == 0 || !current_sec.is_finite() {
        return None;
    }

    let mut candidate: Option<usize> = None;
    for (i, w) in words.iter().enumerate() {
        if w.start_sec > current_sec {
            break;
        }
        candidate = Some(i);
    }
    let active = candidate?;
    if current_sec >= words[active].end_sec + WORD_END_GRACE_SEC {
        return None;
    }

    let start = active.saturating_sub(window_size / 2);
    let end = (start + window_size).min(words.len());
    Some(WordWindow { start, end, active })
}
