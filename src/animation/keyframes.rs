use kurbo::Vec2;

use crate::animation::ease::Ease;

/// Linear interpolation between two values of the same type.
pub trait Lerp {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (f64::from(*a) + (f64::from(*b) - f64::from(*a)) * t) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(Lerp::lerp(&a.x, &b.x, t), Lerp::lerp(&a.y, &b.y, t))
    }
}

/// One control point on a property timeline. `ease` shapes the segment
/// that arrives at this keyframe, not the one leaving it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe<T> {
    pub time_sec: f64,
    pub value: T,
    pub ease: Ease,
}

impl<T> Keyframe<T> {
    pub fn new(time_sec: f64, value: T, ease: Ease) -> Self {
        Self {
            time_sec,
            value,
            ease,
        }
    }
}

/// A normalized, time-sorted keyframe list.
///
/// Construction is defensive: keyframes with a non-finite time are
/// dropped, ordering is restored with a stable sort, and of several
/// keyframes sharing one timestamp the last one wins.
#[derive(Clone, Debug, Default)]
pub struct Keyframes<T> {
    keys: Vec<Keyframe<T>>,
}

impl<T: Lerp + Clone> Keyframes<T> {
    pub fn new(mut keys: Vec<Keyframe<T>>) -> Self {
        keys.retain(|k| k.time_sec.is_finite());
        keys.sort_by(|a, b| a.time_sec.total_cmp(&b.time_sec));

        let mut deduped: Vec<Keyframe<T>> = Vec::with_capacity(keys.len());
        for k in keys {
            match deduped.last_mut() {
                Some(prev) if prev.time_sec == k.time_sec => *prev = k,
                _ => deduped.push(k),
            }
        }
        Self { keys: deduped }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    /// Interpolated value at `t` seconds.
    ///
    /// Outside the keyed range the value clamps to the nearest boundary
    /// keyframe; there is no extrapolation. Inside a segment, linear
    /// progress is shaped by the destination keyframe's easing before the
    /// lerp. Returns `None` only for an empty list.
    pub fn sample(&self, t: f64) -> Option<T> {
        if self.keys.is_empty() {
            return None;
        }

        let idx = self.keys.partition_point(|k| k.time_sec <= t);
        if idx == 0 {
            return Some(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Some(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.time_sec - a.time_sec;
        if denom <= 0.0 {
            return Some(b.value.clone());
        }
        let p = (t - a.time_sec) / denom;
        let eased = b.ease.apply(p);
        Some(T::lerp(&a.value, &b.value, eased))
    }
}
