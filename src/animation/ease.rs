/// Easing curves for keyframe segments and transition windows.
///
/// Names mirror the editor's easing vocabulary. Deserialization is
/// tolerant: an unrecognized name degrades to [`Ease::Linear`] instead of
/// failing the whole project parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Ease {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Ease {
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Ease::Linear,
            "ease-in" => Ease::EaseIn,
            "ease-out" => Ease::EaseOut,
            "ease-in-out" => Ease::EaseInOut,
            _ => Ease::Linear,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::EaseIn => "ease-in",
            Ease::EaseOut => "ease-out",
            Ease::EaseInOut => "ease-in-out",
        }
    }

    /// Remap linear progress to eased progress. Input is clamped to [0, 1].
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::EaseIn => t * t * t,
            Ease::EaseOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Ease::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

impl From<String> for Ease {
    fn from(s: String) -> Self {
        Ease::from_name(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for e in [Ease::Linear, Ease::EaseIn, Ease::EaseOut, Ease::EaseInOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
        }
    }

    #[test]
    fn cubic_midpoints() {
        assert_eq!(Ease::Linear.apply(0.5), 0.5);
        assert_eq!(Ease::EaseIn.apply(0.5), 0.125);
        assert_eq!(Ease::EaseOut.apply(0.5), 0.875);
        assert_eq!(Ease::EaseInOut.apply(0.5), 0.5);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::EaseIn.apply(-2.0), 0.0);
        assert_eq!(Ease::EaseOut.apply(3.0), 1.0);
    }

    #[test]
    fn unknown_names_fall_back_to_linear() {
        assert_eq!(Ease::from_name("bounce-elastic"), Ease::Linear);
        let parsed: Ease = serde_json::from_str("\"ease-in-out\"").unwrap();
        assert_eq!(parsed, Ease::EaseInOut);
        let fallback: Ease = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(fallback, Ease::Linear);
    }

    #[test]
    fn serializes_kebab_case_names() {
        let json = serde_json::to_string(&Ease::EaseIn).unwrap();
        assert_eq!(json, "\"ease-in\"");
    }
}
