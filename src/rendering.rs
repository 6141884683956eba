use crate::assembly::AssembledPath;
use crate::error::{ClockError::SurfaceTooSmall, ClockResult};
use crate::glyph::{Couple, Float};

use wizdraw::stroke;

use vek::vec::Vec2;

#[allow(unused_imports)]
use num_traits::real::Real;

use rgb::RGBA8;

use alloc::vec::Vec;

/// Curve flattening tolerance, in pixels
const TOLERANCE: Float = 0.6;

/// Maps a logical field onto a pixel surface, scaled to fit and centered.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    scale: Float,
    offset: Couple,
}

impl Viewport {
    /// `inset` is removed from every side of the surface first.
    pub fn fit(field: Couple, w: usize, h: usize, inset: Float) -> Self {
        let avail = Couple::new(w as Float - 2.0 * inset, h as Float - 2.0 * inset);
        let avail = Couple::new(avail.x.max(0.0), avail.y.max(0.0));
        let scale = match field.x > 0.0 && field.y > 0.0 {
            true => (avail.x / field.x).min(avail.y / field.y),
            false => 0.0,
        };

        let used = field * scale;
        let offset = Couple::new(
            inset + (avail.x - used.x) / 2.0,
            inset + (avail.y - used.y) / 2.0,
        );

        Self { scale, offset }
    }

    pub fn scale(&self) -> Float {
        self.scale
    }

    pub fn apply(&self, point: Couple) -> Couple {
        point * self.scale + self.offset
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeStyle {
    pub foreground: RGBA8,
    pub background: RGBA8,
    /// In logical units
    pub width: Float,
    pub antialias: bool,
}

/// Clears the surface to the background color, then strokes every subpath.
///
/// `dst` holds `h` rows of `stride` pixels, `mask` must hold `w * h` bytes.
pub fn render<const SSAA: usize>(
    path: &AssembledPath,
    viewport: &Viewport,
    style: &StrokeStyle,
    dst: &mut [RGBA8],
    mask: &mut [u8],
    w: usize,
    h: usize,
    stride: usize,
) -> ClockResult<()> {
    if w == 0 || h == 0 {
        return Ok(());
    }

    if stride < w || dst.len() < stride * (h - 1) + w || mask.len() < w * h {
        return Err(SurfaceTooSmall);
    }

    let mask = &mut mask[..w * h];
    let mask_size = Vec2::new(w, h);
    let width = style.width * viewport.scale();

    let mut i = 0;
    for _ in 0..h {
        dst[i..][..w].fill(style.background);
        i += stride;
    }

    let mut flat = Vec::new();
    for subpath in path.subpaths() {
        subpath.map(|p| viewport.apply(p)).flatten(TOLERANCE, &mut flat);

        mask.fill(0);
        stroke::<SSAA>(&flat, mask, mask_size, width);

        let mut mask = mask.iter();
        let mut line = 0;
        for _ in 0..h {
            for x in 0..w {
                let q = *mask.next().unwrap_or(&0);
                let q = match style.antialias {
                    true => q,
                    false if q >= 128 => 255,
                    false => 0,
                };

                if q != 0 {
                    blend_pixel(&mut dst[line + x], style.foreground, q);
                }
            }
            line += stride;
        }
    }

    log::trace!("stroked {} subpaths on {}x{}", path.len(), w, h);
    Ok(())
}

#[inline(always)]
pub fn blend_pixel(dst_pixel: &mut RGBA8, src_pixel: RGBA8, mask_alpha: u8) {
    if src_pixel.a == 255 && mask_alpha == 255 {
        *dst_pixel = src_pixel;
    } else {
        let src_alpha = ((src_pixel.a as u32) * (mask_alpha as u32)) / 255;
        let u8_max = u8::MAX as u32;
        let dst_alpha = u8_max - src_alpha;

        let for_each = |src, dst: &mut u8| {
            let src_scaled = (src as u32) * src_alpha;
            let dst_scaled = (*dst as u32) * dst_alpha;
            *dst = ((src_scaled + dst_scaled) / u8_max) as u8;
        };

        for_each(src_pixel.r, &mut dst_pixel.r);
        for_each(src_pixel.g, &mut dst_pixel.g);
        for_each(src_pixel.b, &mut dst_pixel.b);
        for_each(src_pixel.a, &mut dst_pixel.a);
    }
}
