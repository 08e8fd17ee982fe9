use crate::foundation::error::{ShowreelError, ShowreelResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    pub start: FrameIndex,
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    pub fn new(start: FrameIndex, end: FrameIndex) -> ShowreelResult<Self> {
        if start.0 > end.0 {
            return Err(ShowreelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> ShowreelResult<Self> {
        if den == 0 {
            return Err(ShowreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ShowreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// The fixed delivery rate the editor authors against.
    pub const DEFAULT: Fps = Fps { num: 30, den: 1 };

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Output frame shape class. The resolution table is a boundary contract
/// shared bit-exactly with the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Vertical,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:5")]
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Wide,
        AspectRatio::Vertical,
        AspectRatio::Square,
        AspectRatio::Portrait,
    ];

    pub fn resolution(self) -> Resolution {
        match self {
            AspectRatio::Wide => Resolution {
                width: 1920,
                height: 1080,
            },
            AspectRatio::Vertical => Resolution {
                width: 1080,
                height: 1920,
            },
            AspectRatio::Square => Resolution {
                width: 1080,
                height: 1080,
            },
            AspectRatio::Portrait => Resolution {
                width: 1080,
                height: 1350,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Vertical => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Portrait => "4:5",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = ShowreelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(AspectRatio::Wide),
            "9:16" => Ok(AspectRatio::Vertical),
            "1:1" => Ok(AspectRatio::Square),
            "4:5" => Ok(AspectRatio::Portrait),
            other => Err(ShowreelError::validation(format!(
                "unknown aspect ratio '{other}' (expected one of 16:9, 9:16, 1:1, 4:5)"
            ))),
        }
    }
}

/// Straight (non-premultiplied) RGBA8, the color form the declarative
/// frame state hands to the rendering backend. Serialized as a compact
/// `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Rgba8::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
