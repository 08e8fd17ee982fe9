use std::f64::consts::TAU;

use crate::{
    animation::{Ease, Keyframe, Keyframes, Lerp},
    composition::model::{CameraKeyframe, CameraTrack, DriftConfig, MIN_CAMERA_SCALE},
    foundation::core::{Affine, Resolution, Vec2},
};

/// Camera state for one frame. Pan values are percentages of the frame
/// dimensions, matching the editor's `translate(x%, y%)` convention.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CameraFrame {
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl CameraFrame {
    pub const NEUTRAL: CameraFrame = CameraFrame {
        scale: 1.0,
        pan_x: 0.0,
        pan_y: 0.0,
    };

    /// `scale(s) translate(panX%, panY%)` around the frame center.
    pub fn to_affine(self, resolution: Resolution) -> Affine {
        let center = resolution.center().to_vec2();
        let pan_px = Vec2::new(
            self.pan_x / 100.0 * f64::from(resolution.width),
            self.pan_y / 100.0 * f64::from(resolution.height),
        );
        Affine::translate(center)
            * Affine::scale(self.scale)
            * Affine::translate(pan_px)
            * Affine::translate(-center)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CameraPose {
    scale: f64,
    pan: Vec2,
}

impl Lerp for CameraPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        CameraPose {
            scale: Lerp::lerp(&a.scale, &b.scale, t),
            // Trait-qualified: kurbo's inherent `Vec2::lerp` takes `self`
            // by value and would shadow the by-ref impl here.
            pan: Lerp::lerp(&a.pan, &b.pan, t),
        }
    }
}

fn neutral_key(time_sec: f64) -> CameraKeyframe {
    CameraKeyframe {
        time_sec,
        scale: 1.0,
        pan_x: 0.0,
        pan_y: 0.0,
        ease: Ease::Linear,
    }
}

/// The keyframe list actually interpolated over `[0, duration_sec]`.
///
/// Authored keyframes are re-sorted, then bounded: a neutral keyframe is
/// synthesized at time 0 when the first real one starts later, and the
/// last real keyframe is carried forward to `duration_sec` when it ends
/// earlier. Interpolation is therefore total over the timeline.
pub fn effective_keyframes(track: &CameraTrack, duration_sec: f64) -> Vec<CameraKeyframe> {
    let mut keys = track.keyframes.clone();
    keys.sort_by(|a, b| a.time_sec.total_cmp(&b.time_sec));

    if keys.is_empty() {
        return vec![neutral_key(0.0), neutral_key(duration_sec)];
    }

    if keys[0].time_sec > 0.0 {
        keys.insert(0, neutral_key(0.0));
    }
    if let Some(last) = keys.last().copied()
        && last.time_sec < duration_sec
    {
        keys.push(CameraKeyframe {
            time_sec: duration_sec,
            ..last
        });
    }
    keys
}

/// Camera state at `t_sec`.
///
/// With authored keyframes, scale and both pan channels are read from one
/// bracketing segment with one eased progress. Without keyframes the
/// optional ambient drift takes over; otherwise the camera is static.
pub fn camera_at(track: &CameraTrack, duration_sec: f64, t_sec: f64) -> CameraFrame {
    if track.keyframes.is_empty() {
        return match track.drift {
            Some(drift) => drift_at(drift, t_sec),
            None => CameraFrame::NEUTRAL,
        };
    }

    let keys = effective_keyframes(track, duration_sec)
        .into_iter()
        .map(|k| {
            Keyframe::new(
                k.time_sec,
                CameraPose {
                    scale: k.scale,
                    pan: Vec2::new(k.pan_x, k.pan_y),
                },
                k.ease,
            )
        })
        .collect();

    match Keyframes::new(keys).sample(t_sec) {
        Some(pose) => CameraFrame {
            scale: pose.scale.max(MIN_CAMERA_SCALE),
            pan_x: pose.pan.x,
            pan_y: pose.pan.y,
        },
        None => CameraFrame::NEUTRAL,
    }
}

const DRIFT_SCALE_AMP: f64 = 0.015;
const DRIFT_PAN_X_AMP: f64 = 1.2;
const DRIFT_PAN_Y_AMP: f64 = 0.8;

/// Low-amplitude sinusoidal wander so an unkeyed shot never looks frozen.
/// Distinct frequencies and phases per channel keep the path from
/// degenerating into a visible circle.
pub fn drift_at(cfg: DriftConfig, t_sec: f64) -> CameraFrame {
    let intensity = cfg.intensity.max(0.0);
    let speed = cfg.speed.max(0.0);
    CameraFrame {
        scale: 1.0 + DRIFT_SCALE_AMP * intensity * (TAU * 0.050 * speed * t_sec).sin(),
        pan_x: DRIFT_PAN_X_AMP * intensity * (TAU * 0.033 * speed * t_sec + 1.3).sin(),
        pan_y: DRIFT_PAN_Y_AMP * intensity * (TAU * 0.041 * speed * t_sec + 2.1).cos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(time_sec: f64, scale: f64, pan_x: f64, pan_y: f64, ease: Ease) -> CameraKeyframe {
        CameraKeyframe {
            time_sec,
            scale,
            pan_x,
            pan_y,
            ease,
        }
    }

    #[test]
    fn boundary_keyframes_are_synthesized() {
        let track = CameraTrack {
            keyframes: vec![key(5.0, 2.0, 0.0, 0.0, Ease::Linear)],
            drift: None,
        };
        let keys = effective_keyframes(&track, 10.0);
        assert_eq!(keys.len(), 3);
        assert_eq!((keys[0].time_sec, keys[0].scale), (0.0, 1.0));
        assert_eq!((keys[1].time_sec, keys[1].scale), (5.0, 2.0));
        assert_eq!((keys[2].time_sec, keys[2].scale), (10.0, 2.0));

        assert_eq!(camera_at(&track, 10.0, 0.0).scale, 1.0);
        assert_eq!(camera_at(&track, 10.0, 10.0).scale, 2.0);
        assert_eq!(camera_at(&track, 10.0, 2.5).scale, 1.5);
    }

    #[test]
    fn channels_share_segment_and_eased_progress() {
        let track = CameraTrack {
            keyframes: vec![
                key(0.0, 1.0, 0.0, 0.0, Ease::Linear),
                key(10.0, 3.0, 50.0, -20.0, Ease::EaseIn),
            ],
            drift: None,
        };
        // Halfway: eased progress is 0.5^3 = 0.125 on every channel.
        let frame = camera_at(&track, 10.0, 5.0);
        assert!((frame.scale - 1.25).abs() < 1e-12);
        assert!((frame.pan_x - 6.25).abs() < 1e-12);
        assert!((frame.pan_y + 2.5).abs() < 1e-12);
    }

    #[test]
    fn no_keyframes_no_drift_is_static() {
        let track = CameraTrack::default();
        assert_eq!(camera_at(&track, 10.0, 3.0), CameraFrame::NEUTRAL);
    }

    #[test]
    fn drift_is_deterministic_and_bounded() {
        let cfg = DriftConfig {
            intensity: 1.0,
            speed: 1.0,
        };
        for frame in 0..300u64 {
            let t = frame as f64 / 30.0;
            let a = drift_at(cfg, t);
            let b = drift_at(cfg, t);
            assert_eq!(a, b);
            assert!((a.scale - 1.0).abs() <= DRIFT_SCALE_AMP + 1e-12);
            assert!(a.pan_x.abs() <= DRIFT_PAN_X_AMP + 1e-12);
            assert!(a.pan_y.abs() <= DRIFT_PAN_Y_AMP + 1e-12);
        }
    }

    #[test]
    fn drift_intensity_scales_amplitude() {
        let calm = drift_at(
            DriftConfig {
                intensity: 0.5,
                speed: 1.0,
            },
            3.7,
        );
        let full = drift_at(
            DriftConfig {
                intensity: 1.0,
                speed: 1.0,
            },
            3.7,
        );
        assert!((full.pan_x - 2.0 * calm.pan_x).abs() < 1e-12);
        assert!(((full.scale - 1.0) - 2.0 * (calm.scale - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn affine_pans_in_pixels_and_scales_about_center() {
        let res = Resolution {
            width: 1000,
            height: 500,
        };
        let pan_only = CameraFrame {
            scale: 1.0,
            pan_x: 10.0,
            pan_y: 8.0,
        };
        assert_eq!(
            pan_only.to_affine(res),
            Affine::translate(Vec2::new(100.0, 40.0))
        );

        let zoomed = CameraFrame {
            scale: 2.0,
            pan_x: 0.0,
            pan_y: 0.0,
        };
        let center = res.center();
        let mapped = zoomed.to_affine(res) * center;
        assert!((mapped - center).hypot() < 1e-9);
    }
}
