use crate::error::{ClockError::*, ClockResult};

use vek::bezier::CubicBezier2;

pub type Float = f32;
pub type Couple = vek::vec::repr_c::vec2::Vec2<Float>;
pub const C_ZERO: Couple = Couple::new(0.0, 0.0);

/// Cubic segments per glyph
pub const SEGMENT_COUNT: usize = 4;
/// Start point plus three points per segment
pub const POINT_COUNT: usize = 1 + 3 * SEGMENT_COUNT;
/// Flat coordinate count of one glyph
pub const VERTEX_COUNT: usize = 2 * POINT_COUNT;

pub const DIGIT_COUNT: usize = 10;

/// One closed-topology outline: a start point followed by
/// `SEGMENT_COUNT` cubic segments (ctrl0, ctrl1, end).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DigitShape {
    points: [Couple; POINT_COUNT],
}

impl DigitShape {
    pub const fn from_points(points: [Couple; POINT_COUNT]) -> Self {
        Self { points }
    }

    /// `digit` is only used to report errors.
    pub fn from_vertices(digit: u8, vertices: &[Float]) -> ClockResult<Self> {
        if vertices.len() != VERTEX_COUNT {
            return Err(VertexCount { digit, len: vertices.len() });
        }

        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(NonFiniteVertex { digit, index });
        }

        let mut points = [C_ZERO; POINT_COUNT];
        for (point, xy) in points.iter_mut().zip(vertices.chunks_exact(2)) {
            *point = Couple::new(xy[0], xy[1]);
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Couple; POINT_COUNT] {
        &self.points
    }

    pub fn start(&self) -> Couple {
        self.points[0]
    }

    pub fn vertices(&self) -> [Float; VERTEX_COUNT] {
        let mut vertices = [0.0; VERTEX_COUNT];
        for (xy, point) in vertices.chunks_exact_mut(2).zip(self.points.iter()) {
            xy[0] = point.x;
            xy[1] = point.y;
        }
        vertices
    }

    /// Segments in drawing order, each starting where the previous ended.
    pub fn segments(&self) -> impl Iterator<Item = CubicBezier2<Float>> + '_ {
        (0..SEGMENT_COUNT).map(move |s| {
            let k = 1 + s * 3;
            CubicBezier2 {
                start: self.points[k - 1],
                ctrl0: self.points[k],
                ctrl1: self.points[k + 1],
                end: self.points[k + 2],
            }
        })
    }

    pub fn translated(&self, dx: Float) -> Self {
        let mut points = self.points;
        points.iter_mut().for_each(|p| p.x += dx);
        Self { points }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlyphLibrary {
    shapes: [DigitShape; DIGIT_COUNT],
}

impl GlyphLibrary {
    /// The compiled-in digit set.
    pub fn builtin() -> ClockResult<Self> {
        let mut slices: [&[Float]; DIGIT_COUNT] = [&[]; DIGIT_COUNT];
        for (slice, digit) in slices.iter_mut().zip(DIGITS.iter()) {
            *slice = &digit[..];
        }
        Self::load(&slices)
    }

    /// Checks that all ten glyphs share the same topology before accepting them.
    pub fn load(glyphs: &[&[Float]]) -> ClockResult<Self> {
        if glyphs.len() != DIGIT_COUNT {
            return Err(GlyphCount(glyphs.len()));
        }

        let mut shapes = [DigitShape::from_points([C_ZERO; POINT_COUNT]); DIGIT_COUNT];
        for (d, (shape, vertices)) in shapes.iter_mut().zip(glyphs).enumerate() {
            *shape = DigitShape::from_vertices(d as u8, vertices)?;
        }

        log::debug!("loaded {} glyphs of {} segments", DIGIT_COUNT, SEGMENT_COUNT);
        Ok(Self { shapes })
    }

    pub fn shape_of(&self, digit: u8) -> ClockResult<&DigitShape> {
        self.shapes.get(digit as usize).ok_or(InvalidDigit(digit))
    }

    pub fn shapes(&self) -> &[DigitShape; DIGIT_COUNT] {
        &self.shapes
    }
}

#[rustfmt::skip]
static DIGITS: [[Float; VERTEX_COUNT]; DIGIT_COUNT] = [
    // 0
    [130.0,  25.0,
      60.0,  25.0,   10.0, 140.0,   10.0, 275.0,
      10.0, 410.0,   60.0, 525.0,  130.0, 525.0,
     200.0, 525.0,  250.0, 410.0,  250.0, 275.0,
     250.0, 140.0,  200.0,  25.0,  130.0,  25.0],
    // 1
    [ 60.0, 110.0,
      90.0,  90.0,  130.0,  60.0,  150.0,  25.0,
     150.0, 108.0,  150.0, 192.0,  150.0, 275.0,
     150.0, 358.0,  150.0, 442.0,  150.0, 525.0,
     150.0, 525.0,  150.0, 525.0,  150.0, 525.0],
    // 2
    [ 20.0, 130.0,
      20.0,  70.0,   70.0,  25.0,  130.0,  25.0,
     195.0,  25.0,  240.0,  75.0,  240.0, 140.0,
     240.0, 250.0,   60.0, 420.0,   15.0, 525.0,
      90.0, 525.0,  175.0, 525.0,  250.0, 525.0],
    // 3
    [ 25.0,  80.0,
      80.0,  10.0,  215.0,  15.0,  215.0, 130.0,
     215.0, 215.0,  160.0, 265.0,  100.0, 265.0,
     185.0, 265.0,  240.0, 320.0,  240.0, 400.0,
     240.0, 520.0,   80.0, 560.0,   20.0, 470.0],
    // 4
    [190.0, 525.0,
     190.0, 358.0,  190.0, 192.0,  190.0,  25.0,
     130.0, 140.0,   70.0, 255.0,   15.0, 370.0,
      95.0, 370.0,  170.0, 370.0,  250.0, 370.0,
     250.0, 370.0,  250.0, 370.0,  250.0, 370.0],
    // 5
    [225.0,  25.0,
     165.0,  25.0,  110.0,  25.0,   50.0,  25.0,
      45.0, 100.0,   40.0, 175.0,   35.0, 250.0,
     120.0, 200.0,  245.0, 240.0,  245.0, 390.0,
     245.0, 530.0,   80.0, 560.0,   25.0, 470.0],
    // 6
    [215.0,  40.0,
     110.0,   0.0,   15.0, 150.0,   15.0, 330.0,
      15.0, 450.0,   60.0, 525.0,  130.0, 525.0,
     200.0, 525.0,  245.0, 460.0,  245.0, 390.0,
     245.0, 270.0,   60.0, 240.0,   20.0, 340.0],
    // 7
    [ 15.0,  90.0,
      15.0,  68.0,   15.0,  47.0,   15.0,  25.0,
      90.0,  25.0,  170.0,  25.0,  245.0,  25.0,
     190.0, 180.0,  130.0, 350.0,  100.0, 525.0,
     100.0, 525.0,  100.0, 525.0,  100.0, 525.0],
    // 8
    [130.0, 265.0,
      30.0, 250.0,   30.0,  25.0,  130.0,  25.0,
     230.0,  25.0,  230.0, 250.0,  130.0, 265.0,
      10.0, 280.0,   10.0, 525.0,  130.0, 525.0,
     250.0, 525.0,  250.0, 280.0,  130.0, 265.0],
    // 9
    [ 45.0, 510.0,
     150.0, 550.0,  245.0, 400.0,  245.0, 220.0,
     245.0, 100.0,  200.0,  25.0,  130.0,  25.0,
      60.0,  25.0,   15.0,  90.0,   15.0, 160.0,
      15.0, 280.0,  200.0, 310.0,  240.0, 210.0],
];
