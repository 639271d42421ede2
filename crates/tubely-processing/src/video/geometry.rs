//! Orientation classification from pixel dimensions.

use std::fmt::{Display, Formatter, Result as FmtResult};

const LANDSCAPE_RATIOS: [(u32, u32); 4] = [(16, 9), (4, 3), (3, 2), (21, 9)];
const PORTRAIT_RATIOS: [(u32, u32); 3] = [(9, 16), (3, 4), (2, 3)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
    Other,
    Unknown,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
            Orientation::Other => "other",
            Orientation::Unknown => "unknown",
        }
    }

    /// Key prefix under which assets of this orientation are published.
    ///
    /// Only landscape and portrait get their own prefix; everything else shares `other`.
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square | Orientation::Other | Orientation::Unknown => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Reduce `width:height` to lowest terms. `None` when either side is zero.
pub fn reduce_aspect_ratio(width: u32, height: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let divisor = gcd(width, height);
    Some((width / divisor, height / divisor))
}

/// `"16:9"` style rendering for logs.
pub fn format_aspect_ratio(width: u32, height: u32) -> String {
    match reduce_aspect_ratio(width, height) {
        Some((w, h)) => format!("{}:{}", w, h),
        None => "unknown".to_string(),
    }
}

/// Classify a frame geometry.
///
/// Recognized ratios win; otherwise the longer side decides.
pub fn classify(width: u32, height: u32) -> Orientation {
    let Some(ratio) = reduce_aspect_ratio(width, height) else {
        return Orientation::Unknown;
    };

    if LANDSCAPE_RATIOS.contains(&ratio) {
        return Orientation::Landscape;
    }
    if PORTRAIT_RATIOS.contains(&ratio) {
        return Orientation::Portrait;
    }
    if ratio == (1, 1) {
        return Orientation::Square;
    }

    match width.cmp(&height) {
        std::cmp::Ordering::Greater => Orientation::Landscape,
        std::cmp::Ordering::Less => Orientation::Portrait,
        std::cmp::Ordering::Equal => Orientation::Other,
    }
}
