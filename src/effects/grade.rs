use crate::{
    composition::model::{BlendMode, ColorGradeSpec, GradeConfig, GradePreset},
    foundation::core::{Fps, Rgba8},
};

/// One filter stage, in the editor's CSS-filter units: percent for
/// everything except `HueRotate`, which is degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", content = "value", rename_all = "kebab-case")]
pub enum FilterOp {
    Brightness(f64),
    Contrast(f64),
    Saturate(f64),
    HueRotate(f64),
    Sepia(f64),
    Grayscale(f64),
    Invert(f64),
}

/// Full-frame tint drawn over the graded image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OverlayPass {
    pub color: Rgba8,
    pub blend: BlendMode,
    pub opacity: f64,
}

/// Resolved grade for one frame: filter stages in canonical order, then
/// the optional overlay and vignette passes.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FilterPipeline {
    pub ops: Vec<FilterOp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayPass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vignette: Option<f64>,
}

impl FilterPipeline {
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty() && self.overlay.is_none() && self.vignette.is_none()
    }
}

/// Canonical field values for each named look.
pub fn preset_config(preset: GradePreset) -> GradeConfig {
    match preset {
        GradePreset::Cinematic => GradeConfig {
            brightness: Some(98.0),
            contrast: Some(112.0),
            saturation: Some(108.0),
            overlay_color: Some(Rgba8::new(16, 46, 62, 255)),
            overlay_blend: Some(BlendMode::SoftLight),
            vignette: Some(0.25),
            ..GradeConfig::default()
        },
        GradePreset::Vintage => GradeConfig {
            brightness: Some(105.0),
            contrast: Some(90.0),
            saturation: Some(80.0),
            sepia: Some(40.0),
            vignette: Some(0.4),
            ..GradeConfig::default()
        },
        GradePreset::Cold => GradeConfig {
            contrast: Some(105.0),
            saturation: Some(90.0),
            hue_rotate_deg: Some(-10.0),
            overlay_color: Some(Rgba8::new(64, 120, 255, 255)),
            overlay_blend: Some(BlendMode::Overlay),
            ..GradeConfig::default()
        },
        GradePreset::Noir => GradeConfig {
            brightness: Some(95.0),
            contrast: Some(130.0),
            grayscale: Some(100.0),
            vignette: Some(0.5),
            ..GradeConfig::default()
        },
        GradePreset::Vibrant => GradeConfig {
            brightness: Some(105.0),
            contrast: Some(110.0),
            saturation: Some(160.0),
            ..GradeConfig::default()
        },
        GradePreset::Dreamy => GradeConfig {
            brightness: Some(108.0),
            contrast: Some(88.0),
            saturation: Some(92.0),
            overlay_color: Some(Rgba8::new(255, 214, 230, 255)),
            overlay_blend: Some(BlendMode::SoftLight),
            vignette: Some(0.15),
            ..GradeConfig::default()
        },
    }
}

/// Preset values with the explicit config overriding field-by-field.
pub fn merged_config(spec: &ColorGradeSpec) -> GradeConfig {
    let preset = spec.preset.map(preset_config).unwrap_or_default();
    let over = &spec.config;
    GradeConfig {
        brightness: over.brightness.or(preset.brightness),
        contrast: over.contrast.or(preset.contrast),
        saturation: over.saturation.or(preset.saturation),
        hue_rotate_deg: over.hue_rotate_deg.or(preset.hue_rotate_deg),
        sepia: over.sepia.or(preset.sepia),
        grayscale: over.grayscale.or(preset.grayscale),
        invert: over.invert.or(preset.invert),
        overlay_color: over.overlay_color.or(preset.overlay_color),
        overlay_blend: over.overlay_blend.or(preset.overlay_blend),
        vignette: over.vignette.or(preset.vignette),
    }
}

const GRADE_RAMP_SECS: f64 = 1.0;

fn effective_intensity(spec: &ColorGradeSpec, frame: u64, fps: Fps) -> f64 {
    let base = spec.intensity.clamp(0.0, 1.0);
    if !spec.animate_in {
        return base;
    }
    let ramp = (GRADE_RAMP_SECS * fps.as_f64()).round().max(1.0);
    base * (frame as f64 / ramp).clamp(0.0, 1.0)
}

fn toward(neutral: f64, value: f64, intensity: f64) -> f64 {
    neutral + (value - neutral) * intensity
}

/// The grade as applied on `frame`.
///
/// Every present field yields a stage, pulled toward its identity value
/// by the effective intensity; an absent field yields none, so a config
/// with `contrast: 100` and one without `contrast` resolve differently.
/// Overlay and vignette become their own passes, scaled by the same
/// intensity.
pub fn resolve_grade(spec: &ColorGradeSpec, frame: u64, fps: Fps) -> FilterPipeline {
    let merged = merged_config(spec);
    let eff = effective_intensity(spec, frame, fps);

    let mut ops = Vec::new();
    if let Some(v) = merged.brightness {
        ops.push(FilterOp::Brightness(toward(100.0, v, eff)));
    }
    if let Some(v) = merged.contrast {
        ops.push(FilterOp::Contrast(toward(100.0, v, eff)));
    }
    if let Some(v) = merged.saturation {
        ops.push(FilterOp::Saturate(toward(100.0, v, eff)));
    }
    if let Some(v) = merged.hue_rotate_deg {
        ops.push(FilterOp::HueRotate(toward(0.0, v, eff)));
    }
    if let Some(v) = merged.sepia {
        ops.push(FilterOp::Sepia(toward(0.0, v, eff)));
    }
    if let Some(v) = merged.grayscale {
        ops.push(FilterOp::Grayscale(toward(0.0, v, eff)));
    }
    if let Some(v) = merged.invert {
        ops.push(FilterOp::Invert(toward(0.0, v, eff)));
    }

    FilterPipeline {
        ops,
        overlay: merged.overlay_color.map(|color| OverlayPass {
            color,
            blend: merged.overlay_blend.unwrap_or_default(),
            opacity: eff,
        }),
        vignette: merged.vignette.map(|v| v * eff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with(config: GradeConfig) -> ColorGradeSpec {
        ColorGradeSpec {
            preset: None,
            config,
            intensity: 1.0,
            animate_in: false,
        }
    }

    #[test]
    fn absent_field_differs_from_neutral_field() {
        let neutral_contrast = spec_with(GradeConfig {
            contrast: Some(100.0),
            ..GradeConfig::default()
        });
        let resolved = resolve_grade(&neutral_contrast, 0, Fps::DEFAULT);
        assert_eq!(resolved.ops, vec![FilterOp::Contrast(100.0)]);

        let empty = spec_with(GradeConfig::default());
        let resolved = resolve_grade(&empty, 0, Fps::DEFAULT);
        assert!(resolved.is_identity());
    }

    #[test]
    fn override_wins_over_preset_per_field() {
        let spec = ColorGradeSpec {
            preset: Some(GradePreset::Noir),
            config: GradeConfig {
                brightness: Some(105.0),
                ..GradeConfig::default()
            },
            intensity: 1.0,
            animate_in: false,
        };
        let merged = merged_config(&spec);
        assert_eq!(merged.brightness, Some(105.0));
        assert_eq!(merged.grayscale, Some(100.0));
        assert_eq!(merged.contrast, Some(130.0));
        assert_eq!(merged.saturation, None);
    }

    #[test]
    fn intensity_pulls_stages_toward_identity() {
        let spec = ColorGradeSpec {
            preset: Some(GradePreset::Vibrant),
            config: GradeConfig::default(),
            intensity: 0.5,
            animate_in: false,
        };
        let resolved = resolve_grade(&spec, 0, Fps::DEFAULT);
        assert_eq!(
            resolved.ops,
            vec![
                FilterOp::Brightness(102.5),
                FilterOp::Contrast(105.0),
                FilterOp::Saturate(130.0),
            ]
        );
    }

    #[test]
    fn animate_in_ramps_but_keeps_stages_present() {
        let spec = ColorGradeSpec {
            preset: Some(GradePreset::Vibrant),
            config: GradeConfig::default(),
            intensity: 1.0,
            animate_in: true,
        };
        let at_start = resolve_grade(&spec, 0, Fps::DEFAULT);
        assert_eq!(at_start.ops[2], FilterOp::Saturate(100.0));

        let halfway = resolve_grade(&spec, 15, Fps::DEFAULT);
        assert_eq!(halfway.ops[2], FilterOp::Saturate(130.0));

        let full = resolve_grade(&spec, 45, Fps::DEFAULT);
        assert_eq!(full.ops[2], FilterOp::Saturate(160.0));
    }

    #[test]
    fn overlay_and_vignette_scale_with_intensity() {
        let spec = ColorGradeSpec {
            preset: Some(GradePreset::Cinematic),
            config: GradeConfig::default(),
            intensity: 0.5,
            animate_in: false,
        };
        let resolved = resolve_grade(&spec, 0, Fps::DEFAULT);
        let overlay = resolved.overlay.unwrap();
        assert_eq!(overlay.blend, BlendMode::SoftLight);
        assert_eq!(overlay.opacity, 0.5);
        assert_eq!(resolved.vignette, Some(0.125));
    }

    #[test]
    fn hue_rotate_lerps_through_zero() {
        let spec = ColorGradeSpec {
            preset: Some(GradePreset::Cold),
            config: GradeConfig::default(),
            intensity: 0.5,
            animate_in: false,
        };
        let resolved = resolve_grade(&spec, 0, Fps::DEFAULT);
        assert!(resolved.ops.contains(&FilterOp::HueRotate(-5.0)));
    }
}
