#![no_std]
extern crate alloc;

pub mod error;
pub mod glyph;
pub mod animator;
pub mod phase;
pub mod assembly;
pub mod rendering;
pub mod clock;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use {
    error::ClockError,
    error::ClockResult,
    glyph::GlyphLibrary,
    glyph::DigitShape,
    animator::DigitAnimator,
    phase::phases_at,
    phase::TimeOfDay,
    phase::TimeSource,
    assembly::assemble,
    assembly::AssembledPath,
    clock::ClockFace,
    clock::ClockConfig,
    clock::DisplayMode,
};
