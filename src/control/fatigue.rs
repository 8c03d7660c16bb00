//! Fatigue classification from the normalized pressure trend.

use core::fmt;

/// Discrete severity.  The discriminants are wire-level codes, not ranks:
/// they are reported and keyed on literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FatigueLevel {
    Fresh = 0,
    Slight = 1,
    Mild = 2,
    Moderate = 4,
    Marked = 8,
    Exhausted = 10,
}

impl FatigueLevel {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Fresh),
            1 => Some(Self::Slight),
            2 => Some(Self::Mild),
            4 => Some(Self::Moderate),
            8 => Some(Self::Marked),
            10 => Some(Self::Exhausted),
            _ => None,
        }
    }
}

impl fmt::Display for FatigueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

/// Lower bounds, highest first.  Anything below the last row is
/// [`FatigueLevel::Exhausted`].
const THRESHOLDS: [(f32, FatigueLevel); 5] = [
    (0.9, FatigueLevel::Fresh),
    (0.8, FatigueLevel::Slight),
    (0.7, FatigueLevel::Mild),
    (0.6, FatigueLevel::Moderate),
    (0.5, FatigueLevel::Marked),
];

/// Map `current_average / baseline` to a fatigue level.  First matching
/// threshold wins.
pub fn classify(normalized: f32) -> FatigueLevel {
    THRESHOLDS
        .iter()
        .find(|(min, _)| normalized >= *min)
        .map_or(FatigueLevel::Exhausted, |&(_, level)| level)
}
