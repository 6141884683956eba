use core::fmt;

use ClockError::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Digit value outside of `0..=9`
    InvalidDigit(u8),
    /// A glyph set must contain exactly ten shapes
    GlyphCount(usize),
    VertexCount { digit: u8, len: usize },
    NonFiniteVertex { digit: u8, index: usize },
    InvalidTime,
    InvalidSlotCount(usize),
    InvalidAnimationWindow,
    SurfaceTooSmall,
}

pub type ClockResult<T> = Result<T, ClockError>;

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidDigit(d) => write!(f, "digit {} is not in 0..=9", d),
            GlyphCount(n) => write!(f, "expected 10 glyphs, got {}", n),
            VertexCount { digit, len } => write!(f, "glyph {} has {} coordinates", digit, len),
            NonFiniteVertex { digit, index } => write!(f, "glyph {} has a non-finite coordinate at {}", digit, index),
            InvalidTime => write!(f, "time of day out of range"),
            InvalidSlotCount(n) => write!(f, "cannot assemble {} slots (4 or 6)", n),
            InvalidAnimationWindow => write!(f, "animation must fit inside a positive interval"),
            SurfaceTooSmall => write!(f, "pixel buffer smaller than the surface"),
        }
    }
}
