use crate::error::{ClockError::InvalidSlotCount, ClockResult};
use crate::glyph::{Couple, DigitShape, Float, SEGMENT_COUNT};
use crate::phase::SLOT_COUNT;

use wizdraw::push_cubic_bezier_segments;

use vek::bezier::CubicBezier2;

use alloc::vec::Vec;

/// Horizontal offset of each slot, left to right.
pub const SHIFTS: [Float; SLOT_COUNT] = [0.0, 300.0, 800.0, 1100.0, 1600.0, 1900.0];

/// Logical drawing box of the six-digit face
pub const FIELD: Couple = Couple::new(2380.0, 550.0);
/// Logical drawing box of the four-digit (ambient) face
pub const AMBIENT_FIELD: Couple = Couple::new(1580.0, 550.0);

/// Hours and minutes only
pub const AMBIENT_SLOTS: usize = 4;
pub const FULL_SLOTS: usize = SLOT_COUNT;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Couple),
    CubicTo(Couple, Couple, Couple),
}

/// One glyph, already shifted into its slot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Subpath {
    pub start: Couple,
    pub curves: [CubicBezier2<Float>; SEGMENT_COUNT],
}

impl Subpath {
    fn new(shape: &DigitShape, shift: Float) -> Self {
        let shape = shape.translated(shift);
        let mut curves = [CubicBezier2 {
            start: shape.start(),
            ctrl0: shape.start(),
            ctrl1: shape.start(),
            end: shape.start(),
        }; SEGMENT_COUNT];

        for (curve, segment) in curves.iter_mut().zip(shape.segments()) {
            *curve = segment;
        }

        Self {
            start: shape.start(),
            curves,
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
        let head = core::iter::once(PathCommand::MoveTo(self.start));
        let tail = self.curves.iter().map(|c| PathCommand::CubicTo(c.ctrl0, c.ctrl1, c.end));
        head.chain(tail)
    }

    /// Polyline approximation, in the same coordinate space.
    pub fn flatten(&self, tolerance: Float, flat: &mut Vec<Couple>) {
        flat.clear();
        for curve in &self.curves {
            push_cubic_bezier_segments::<8>(curve, tolerance, flat);
        }
    }

    pub fn map<F: Fn(Couple) -> Couple>(&self, f: F) -> Self {
        let mut curves = self.curves;
        for c in curves.iter_mut() {
            c.start = f(c.start);
            c.ctrl0 = f(c.ctrl0);
            c.ctrl1 = f(c.ctrl1);
            c.end = f(c.end);
        }

        Self {
            start: f(self.start),
            curves,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPath {
    subpaths: Vec<Subpath>,
}

impl AssembledPath {
    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn len(&self) -> usize {
        self.subpaths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = PathCommand> + '_ {
        self.subpaths.iter().flat_map(|s| s.commands())
    }
}

/// Lays out the first `visible` slots side by side.
pub fn assemble(shapes: &[DigitShape; SLOT_COUNT], visible: usize) -> ClockResult<AssembledPath> {
    if visible != AMBIENT_SLOTS && visible != FULL_SLOTS {
        return Err(InvalidSlotCount(visible));
    }

    let subpaths = shapes
        .iter()
        .zip(SHIFTS.iter())
        .take(visible)
        .map(|(shape, shift)| Subpath::new(shape, *shift))
        .collect();

    Ok(AssembledPath { subpaths })
}
