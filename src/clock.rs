use crate::animator::DigitAnimator;
use crate::assembly::{assemble, AssembledPath, AMBIENT_FIELD, AMBIENT_SLOTS, FIELD, FULL_SLOTS};
use crate::error::ClockResult;
use crate::glyph::{Couple, DigitShape, Float, GlyphLibrary};
use crate::phase::{phases_at, PhaseTriple, Slot, TimeOfDay, TimeSource, SLOT_COUNT};
use crate::rendering::{render, StrokeStyle, Viewport};

use rgb::RGBA8;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    Interactive,
    /// Low-power display: hours and minutes, no transitions
    Ambient {
        low_bit: bool,
        burn_in_protection: bool,
    },
}

impl DisplayMode {
    pub fn is_ambient(self) -> bool {
        matches!(self, DisplayMode::Ambient { .. })
    }

    pub fn visible_slots(self) -> usize {
        match self {
            DisplayMode::Interactive => FULL_SLOTS,
            DisplayMode::Ambient { .. } => AMBIENT_SLOTS,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub foreground: RGBA8,
    pub background: RGBA8,
}

const BLACK: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };
const WHITE: RGBA8 = RGBA8 { r: 255, g: 255, b: 255, a: 255 };

/// Seconds of cycle and seconds of morph, per slot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationWindow {
    pub interval: Float,
    pub duration: Float,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClockConfig {
    pub interactive: Palette,
    pub ambient: Palette,
    /// logical units
    pub stroke_width: Float,
    /// pixels, only with burn-in protection
    pub burn_in_inset: Float,
    /// redraw cadence hint for interactive mode
    pub frame_interval_ms: u32,
    /// indexed like `Slot::ALL`
    pub windows: [AnimationWindow; SLOT_COUNT],
}

impl Default for ClockConfig {
    fn default() -> Self {
        let window = |interval, duration| AnimationWindow { interval, duration };
        Self {
            interactive: Palette { foreground: BLACK, background: WHITE },
            ambient: Palette { foreground: WHITE, background: BLACK },
            stroke_width: 10.0,
            burn_in_inset: 10.0,
            frame_interval_ms: 50,
            windows: [
                window(36000.0, 5.0),
                window(3600.0, 5.0),
                window(600.0, 5.0),
                window(60.0, 5.0),
                window(10.0, 2.0),
                window(1.0, 1.0),
            ],
        }
    }
}

/// Everything the host needs to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub path: AssembledPath,
    /// logical box the path lives in
    pub field: Couple,
    pub style: StrokeStyle,
    /// pixels to keep clear around the face
    pub inset: Float,
}

impl Frame {
    pub fn viewport(&self, w: usize, h: usize) -> Viewport {
        Viewport::fit(self.field, w, h, self.inset)
    }

    pub fn render<const SSAA: usize>(
        &self,
        dst: &mut [RGBA8],
        mask: &mut [u8],
        w: usize,
        h: usize,
        stride: usize,
    ) -> ClockResult<()> {
        render::<SSAA>(&self.path, &self.viewport(w, h), &self.style, dst, mask, w, h, stride)
    }
}

/// Time-to-outline pipeline. Holds no per-frame state.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFace {
    glyphs: GlyphLibrary,
    animators: [DigitAnimator; SLOT_COUNT],
    config: ClockConfig,
}

impl ClockFace {
    pub fn new(config: ClockConfig) -> ClockResult<Self> {
        Self::with_glyphs(config, GlyphLibrary::builtin()?)
    }

    pub fn with_glyphs(config: ClockConfig, glyphs: GlyphLibrary) -> ClockResult<Self> {
        let mut animators = [DigitAnimator::new(1.0, 1.0)?; SLOT_COUNT];
        for (animator, window) in animators.iter_mut().zip(config.windows.iter()) {
            *animator = DigitAnimator::new(window.interval, window.duration)?;
        }

        log::debug!("clock face ready, {} ms interactive cadence", config.frame_interval_ms);
        Ok(Self { glyphs, animators, config })
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn glyphs(&self) -> &GlyphLibrary {
        &self.glyphs
    }

    pub fn animator(&self, slot: Slot) -> &DigitAnimator {
        &self.animators[slot.index()]
    }

    /// Interpolated glyph of every slot; ambient mode holds the current digits.
    pub fn shapes_at(&self, time: TimeOfDay, mode: DisplayMode) -> ClockResult<[DigitShape; SLOT_COUNT]> {
        let phases = phases_at(time);
        let mut shapes = [*self.glyphs.shape_of(0)?; SLOT_COUNT];

        for ((shape, phase), animator) in shapes.iter_mut().zip(phases.iter()).zip(self.animators.iter()) {
            let current = self.glyphs.shape_of(phase.current)?;
            *shape = match mode {
                DisplayMode::Interactive => {
                    let next = self.glyphs.shape_of(phase.next)?;
                    animator.update(current, next, phase.ratio())
                }
                DisplayMode::Ambient { .. } => animator.hold(current),
            };
        }

        Ok(shapes)
    }

    pub fn path_at(&self, time: TimeOfDay, mode: DisplayMode) -> ClockResult<AssembledPath> {
        assemble(&self.shapes_at(time, mode)?, mode.visible_slots())
    }

    pub fn frame(&self, time: TimeOfDay, mode: DisplayMode) -> ClockResult<Frame> {
        let path = self.path_at(time, mode)?;
        let config = &self.config;

        let (palette, field, antialias, inset) = match mode {
            DisplayMode::Interactive => (config.interactive, FIELD, true, 0.0),
            DisplayMode::Ambient { low_bit, burn_in_protection } => (
                config.ambient,
                AMBIENT_FIELD,
                !low_bit,
                if burn_in_protection { config.burn_in_inset } else { 0.0 },
            ),
        };

        log::trace!("frame at {:?}, {} subpaths", time, path.len());

        Ok(Frame {
            path,
            field,
            style: StrokeStyle {
                foreground: palette.foreground,
                background: palette.background,
                width: config.stroke_width,
                antialias,
            },
            inset,
        })
    }

    /// Samples `source` once and builds the frame from that single reading.
    pub fn tick<S: TimeSource + ?Sized>(&self, source: &S, mode: DisplayMode) -> ClockResult<Frame> {
        self.frame(source.now(), mode)
    }

    /// `None` means redraw on demand only.
    pub fn next_frame_delay(&self, mode: DisplayMode) -> Option<u32> {
        match mode {
            DisplayMode::Interactive => Some(self.config.frame_interval_ms),
            DisplayMode::Ambient { .. } => None,
        }
    }

    pub fn log_phases(&self, time: TimeOfDay) {
        log::info!(    "|    SLOT     | CUR | NEXT |  RATIO  |  MORPH  |");

        let phases: [PhaseTriple; SLOT_COUNT] = phases_at(time);
        for (slot, phase) in Slot::ALL.iter().zip(phases.iter()) {
            let morph = self.animators[slot.index()].morph_ratio(phase.ratio());
            log::info!(
                "| {:^11} | {:^3} | {:^4} | {:^7.4} | {:^7.4} |",
                slot.as_text(),
                phase.current,
                phase.next,
                phase.ratio(),
                morph,
            );
        }
    }
}
