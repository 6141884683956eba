use crate::*;
use crate::animator::{clamp_ratio, ease};
use crate::assembly::{PathCommand, AMBIENT_SLOTS, SHIFTS};
use crate::error::ClockError::*;
use crate::glyph::{Couple, Float, POINT_COUNT, VERTEX_COUNT};
use crate::phase::{PhaseTriple, Slot};
use crate::rendering::{blend_pixel, Viewport};

use alloc::vec;
use alloc::vec::Vec;

use rgb::RGBA8;

#[allow(unused_imports)]
use num_traits::real::Real;

fn time(h: u8, m: u8, s: u8, ms: u16) -> TimeOfDay {
    TimeOfDay::new(h, m, s, ms).unwrap()
}

fn library() -> GlyphLibrary {
    GlyphLibrary::builtin().unwrap()
}

fn phase(t: TimeOfDay, slot: Slot) -> PhaseTriple {
    phases_at(t)[slot.index()]
}

fn close(a: Float, b: Float) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn every_glyph_has_the_same_vertex_count() {
    let lib = library();
    for d in 0..10 {
        let shape = lib.shape_of(d).unwrap();
        assert_eq!(shape.vertices().len(), VERTEX_COUNT);
        assert_eq!(shape.segments().count(), 4);
    }
    assert_eq!(VERTEX_COUNT, 26);
}

#[test]
fn out_of_range_digit_is_rejected() {
    assert_eq!(library().shape_of(10), Err(InvalidDigit(10)));
    assert_eq!(library().shape_of(255), Err(InvalidDigit(255)));
}

#[test]
fn malformed_glyph_sets_fail_at_load() {
    let good = library().shape_of(0).unwrap().vertices();
    let short = &good[..VERTEX_COUNT - 2];

    let mut glyphs: Vec<&[Float]> = vec![&good[..]; 10];
    assert!(GlyphLibrary::load(&glyphs).is_ok());

    glyphs[7] = short;
    assert_eq!(
        GlyphLibrary::load(&glyphs),
        Err(VertexCount { digit: 7, len: VERTEX_COUNT - 2 }),
    );

    assert_eq!(GlyphLibrary::load(&glyphs[..9]), Err(GlyphCount(9)));

    let mut broken = good;
    broken[5] = Float::NAN;
    glyphs[7] = &broken[..];
    assert_eq!(
        GlyphLibrary::load(&glyphs),
        Err(NonFiniteVertex { digit: 7, index: 5 }),
    );
}

#[test]
fn vertices_round_trip_through_points() {
    let lib = library();
    let two = lib.shape_of(2).unwrap();
    let rebuilt = DigitShape::from_vertices(2, &two.vertices()).unwrap();
    assert_eq!(&rebuilt, two);
    assert_eq!(two.start(), Couple::new(20.0, 130.0));
}

#[test]
fn segments_are_chained() {
    let lib = library();
    for shape in lib.shapes() {
        let mut previous_end = shape.start();
        for segment in shape.segments() {
            assert_eq!(segment.start, previous_end);
            previous_end = segment.end;
        }
    }
}

#[test]
fn animator_holds_current_before_the_window() {
    let lib = library();
    let (three, four) = (lib.shape_of(3).unwrap(), lib.shape_of(4).unwrap());
    let animator = DigitAnimator::new(60.0, 5.0).unwrap();
    let start = animator.animation_start_ratio();
    assert!(close(start, 55.0 / 60.0));

    for ratio in [0.0, 0.25, 0.5, start] {
        assert_eq!(&animator.update(three, four, ratio), three);
    }
}

#[test]
fn animator_converges_exactly() {
    let lib = library();
    let animator = DigitAnimator::new(10.0, 2.0).unwrap();
    for d in 0..10u8 {
        let current = lib.shape_of(d).unwrap();
        let next = lib.shape_of((d + 1) % 10).unwrap();
        assert_eq!(&animator.update(current, next, 1.0), next);
    }
}

#[test]
fn animator_blends_halfway() {
    let lib = library();
    let (zero, eight) = (lib.shape_of(0).unwrap(), lib.shape_of(8).unwrap());
    let animator = DigitAnimator::new(1.0, 1.0).unwrap();
    let mid = animator.update(zero, eight, 0.5);

    for i in 0..POINT_COUNT {
        let expected = (zero.points()[i] + eight.points()[i]) / 2.0;
        assert!(close(mid.points()[i].x, expected.x));
        assert!(close(mid.points()[i].y, expected.y));
    }
}

#[test]
fn animator_clamps_out_of_range_ratios() {
    let lib = library();
    let (five, six) = (lib.shape_of(5).unwrap(), lib.shape_of(6).unwrap());
    let animator = DigitAnimator::new(60.0, 5.0).unwrap();

    assert_eq!(&animator.update(five, six, -0.3), five);
    assert_eq!(&animator.update(five, six, Float::NAN), five);
    assert_eq!(&animator.update(five, six, 1.7), six);
    assert_eq!(clamp_ratio(2.0), 1.0);
}

#[test]
fn same_digit_blend_is_a_no_op() {
    let lib = library();
    let nine = lib.shape_of(9).unwrap();
    let animator = DigitAnimator::new(1.0, 1.0).unwrap();
    assert_eq!(&animator.update(nine, nine, 0.37), nine);
    assert_eq!(&animator.hold(nine), nine);
}

#[test]
fn invalid_animation_windows() {
    assert_eq!(DigitAnimator::new(0.0, 0.0), Err(InvalidAnimationWindow));
    assert_eq!(DigitAnimator::new(5.0, 6.0), Err(InvalidAnimationWindow));
    assert_eq!(DigitAnimator::new(5.0, -1.0), Err(InvalidAnimationWindow));
    assert_eq!(DigitAnimator::new(Float::INFINITY, 1.0), Err(InvalidAnimationWindow));
    assert_eq!(DigitAnimator::new(1.0, 1.0).unwrap().animation_start_ratio(), 0.0);
}

#[test]
fn easing_is_monotonic() {
    let mut prev = ease(0.0);
    for i in 1..=1000 {
        let val = ease(i as Float / 1000.0);
        assert!(val >= prev, "non-monotonic at {}: {} > {}", i, prev, val);
        prev = val;
    }
}

#[test]
fn easing_starts_and_ends_at_rest() {
    assert_eq!(ease(0.0), 0.0);
    assert_eq!(ease(1.0), 1.0);
    assert!(close(ease(0.5), 0.5));

    let h = 1e-3;
    let start_slope = (ease(h) - ease(0.0)) / h;
    let end_slope = (ease(1.0) - ease(1.0 - h)) / h;
    assert!(start_slope.abs() < 1e-2, "slope at 0: {}", start_slope);
    assert!(end_slope.abs() < 1e-2, "slope at 1: {}", end_slope);
}

#[test]
fn end_to_end_afternoon() {
    let t = time(12, 34, 56, 500);

    let su = phase(t, Slot::SecondUnits);
    assert_eq!((su.current, su.next), (6, 7));
    assert_eq!(su.ratio(), 0.5);

    let st = phase(t, Slot::SecondTens);
    assert_eq!((st.current, st.next), (5, 0));
    assert_eq!((st.elapsed, st.window), (6500, 10_000));
    assert!(close(st.ratio(), 0.65));

    let mu = phase(t, Slot::MinuteUnits);
    assert_eq!((mu.current, mu.next), (4, 5));
    assert!(close(mu.ratio(), 56_500.0 / 60_000.0));

    let mt = phase(t, Slot::MinuteTens);
    assert_eq!((mt.current, mt.next), (3, 4));
    assert_eq!(mt.elapsed, 4 * 60_000 + 56_500);

    let hu = phase(t, Slot::HourUnits);
    assert_eq!((hu.current, hu.next), (2, 3));
    assert!(close(hu.ratio(), (34.0 * 60_000.0 + 56_500.0) / 3_600_000.0));

    let ht = phase(t, Slot::HourTens);
    assert_eq!((ht.current, ht.next), (1, 2));
    assert_eq!(ht.window, 36_000_000);
}

#[test]
fn last_hour_of_the_day_uses_the_short_window() {
    let t = time(23, 59, 59, 0);
    let ht = phase(t, Slot::HourTens);
    assert_eq!((ht.current, ht.next), (2, 0));
    assert_eq!(ht.window, 14_400_000);

    let hu = phase(t, Slot::HourUnits);
    assert_eq!((hu.current, hu.next), (3, 0));

    // 22h still takes the generic branch
    let ht = phase(time(22, 59, 59, 999), Slot::HourTens);
    assert_eq!(ht.window, 36_000_000);
    let hu = phase(time(22, 59, 59, 999), Slot::HourUnits);
    assert_eq!(hu.next, 3);
}

#[test]
fn midnight_carry() {
    let before = phases_at(time(23, 59, 59, 999));
    let digits: Vec<(u8, u8)> = before.iter().map(|p| (p.current, p.next)).collect();
    assert_eq!(digits, vec![(2, 0), (3, 0), (5, 0), (9, 0), (5, 0), (9, 0)]);
    for p in before.iter() {
        assert!(p.ratio() >= 0.999 && p.ratio() < 1.0, "{:?}", p);
    }

    let one_ms_later = time(23, 59, 59, 999).millis_of_day() as i64 + 1;
    let after = phases_at(TimeOfDay::from_unix_millis(one_ms_later, 0));
    for (p, b) in after.iter().zip(before.iter()) {
        assert_eq!(p.ratio(), 0.0);
        assert_eq!(p.current, b.next);
    }
}

#[test]
fn other_carries_line_up() {
    let before = phases_at(time(9, 59, 59, 999));
    let after = phases_at(time(10, 0, 0, 0));
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.next, a.current);
        assert_eq!(a.ratio(), 0.0);
    }
}

#[test]
fn ratios_stay_below_one_all_day() {
    for minute_of_day in (0..24 * 60).step_by(7) {
        let ms = minute_of_day * 60_000 + 59_999;
        for p in phases_at(TimeOfDay::from_millis_of_day(ms).unwrap()).iter() {
            assert!(p.elapsed < p.window, "{:?}", p);
            assert!(p.current < 10 && p.next < 10);
        }
    }
}

#[test]
fn phases_are_a_pure_function() {
    let t = time(7, 8, 9, 10);
    assert_eq!(phases_at(t), phases_at(t));
}

#[test]
fn time_of_day_conversions() {
    assert_eq!(TimeOfDay::new(24, 0, 0, 0), Err(InvalidTime));
    assert_eq!(TimeOfDay::new(0, 60, 0, 0), Err(InvalidTime));
    assert_eq!(TimeOfDay::new(0, 0, 0, 1000), Err(InvalidTime));
    assert_eq!(TimeOfDay::from_millis_of_day(86_400_000), Err(InvalidTime));

    let t = time(12, 34, 56, 500);
    assert_eq!(TimeOfDay::from_millis_of_day(t.millis_of_day()), Ok(t));

    // 2021-01-01T00:00:00Z
    let epoch = 1_609_459_200_000;
    assert_eq!(TimeOfDay::from_unix_millis(epoch, 0), TimeOfDay::MIDNIGHT);
    assert_eq!(TimeOfDay::from_unix_millis(epoch + 1500, 120), time(2, 0, 1, 500));
    assert_eq!(TimeOfDay::from_unix_millis(epoch, -300), time(19, 0, 0, 0));
    assert_eq!(TimeOfDay::from_unix_millis(-1, 0), time(23, 59, 59, 999));
}

#[test]
fn assembly_shifts_every_slot() {
    let lib = library();
    let shapes = [*lib.shape_of(1).unwrap(); 6];
    let path = assemble(&shapes, 6).unwrap();
    assert_eq!(path.len(), 6);

    for (subpath, shift) in path.subpaths().iter().zip(SHIFTS.iter()) {
        let start = shapes[0].start();
        assert_eq!(subpath.start, Couple::new(start.x + shift, start.y));
        assert_eq!(subpath.curves[3].end.y, shapes[0].points()[12].y);
    }

    let commands: Vec<PathCommand> = path.commands().collect();
    assert_eq!(commands.len(), 6 * 5);
    assert!(matches!(commands[0], PathCommand::MoveTo(_)));
    assert!(matches!(commands[5], PathCommand::MoveTo(_)));
    assert!(matches!(commands[4], PathCommand::CubicTo(..)));
}

#[test]
fn ambient_assembly_ignores_seconds() {
    let lib = library();
    let mut shapes = [*lib.shape_of(0).unwrap(); 6];
    let full = assemble(&shapes, 6).unwrap();

    shapes[4] = *lib.shape_of(7).unwrap();
    shapes[5] = *lib.shape_of(8).unwrap();
    let ambient = assemble(&shapes, AMBIENT_SLOTS).unwrap();

    assert_eq!(ambient.len(), 4);
    assert_eq!(ambient.subpaths(), &full.subpaths()[..4]);
    assert_eq!(ambient.commands().count(), 4 * 5);
}

#[test]
fn assembly_rejects_other_slot_counts() {
    let shapes = [*library().shape_of(0).unwrap(); 6];
    assert_eq!(assemble(&shapes, 5), Err(InvalidSlotCount(5)));
    assert_eq!(assemble(&shapes, 0), Err(InvalidSlotCount(0)));
}

#[test]
fn face_interactive_frame() {
    let face = ClockFace::new(ClockConfig::default()).unwrap();
    let t = time(12, 34, 56, 500);
    let frame = face.frame(t, DisplayMode::Interactive).unwrap();

    assert_eq!(frame.path.len(), 6);
    assert_eq!(frame.style.width, 10.0);
    assert!(frame.style.antialias);
    assert_eq!(face.next_frame_delay(DisplayMode::Interactive), Some(50));

    // second-units is mid-morph at .5 s with a one-second window
    let shapes = face.shapes_at(t, DisplayMode::Interactive).unwrap();
    let lib = face.glyphs();
    assert_ne!(&shapes[5], lib.shape_of(6).unwrap());
    assert_ne!(&shapes[5], lib.shape_of(7).unwrap());
    // minute-units is inside its last five seconds, the slots above it are not
    assert_ne!(&shapes[3], lib.shape_of(4).unwrap());
    assert_eq!(&shapes[2], lib.shape_of(3).unwrap());
    assert_eq!(&shapes[1], lib.shape_of(2).unwrap());
}

#[test]
fn face_ambient_frame() {
    let face = ClockFace::new(ClockConfig::default()).unwrap();
    let mode = DisplayMode::Ambient { low_bit: true, burn_in_protection: true };
    let t = time(23, 59, 59, 900);
    let frame = face.frame(t, mode).unwrap();

    assert_eq!(frame.path.len(), 4);
    assert!(!frame.style.antialias);
    assert_eq!(frame.inset, 10.0);
    assert_eq!(frame.style.background, RGBA8::new(0, 0, 0, 255));
    assert_eq!(face.next_frame_delay(mode), None);

    let lib = face.glyphs();
    let shapes = face.shapes_at(t, mode).unwrap();
    for (shape, digit) in shapes.iter().zip([2, 3, 5, 9]) {
        assert_eq!(shape, lib.shape_of(digit).unwrap());
    }
}

#[test]
fn face_tick_reads_the_source() {
    let face = ClockFace::new(ClockConfig::default()).unwrap();
    let t = time(1, 2, 3, 4);
    assert_eq!(face.tick(&t, DisplayMode::Interactive), face.frame(t, DisplayMode::Interactive));
}

#[test]
fn face_rejects_bad_windows() {
    let mut config = ClockConfig::default();
    config.windows[2].duration = 0.0;
    assert_eq!(ClockFace::new(config), Err(InvalidAnimationWindow));
}

#[test]
fn viewport_centers_the_field() {
    let v = Viewport::fit(Couple::new(200.0, 100.0), 400, 400, 0.0);
    assert_eq!(v.scale(), 2.0);
    assert_eq!(v.apply(Couple::new(0.0, 0.0)), Couple::new(0.0, 100.0));
    assert_eq!(v.apply(Couple::new(200.0, 100.0)), Couple::new(400.0, 300.0));

    let v = Viewport::fit(Couple::new(200.0, 100.0), 420, 420, 10.0);
    assert_eq!(v.scale(), 2.0);
    assert_eq!(v.apply(Couple::new(0.0, 0.0)), Couple::new(10.0, 110.0));
}

#[test]
fn blend_pixel_mixes() {
    let mut px = RGBA8::new(255, 255, 255, 255);
    blend_pixel(&mut px, RGBA8::new(0, 0, 0, 255), 255);
    assert_eq!(px, RGBA8::new(0, 0, 0, 255));

    let mut px = RGBA8::new(255, 255, 255, 255);
    blend_pixel(&mut px, RGBA8::new(0, 0, 0, 255), 0);
    assert_eq!(px, RGBA8::new(255, 255, 255, 255));
}

#[test]
fn render_checks_buffer_sizes() {
    let face = ClockFace::new(ClockConfig::default()).unwrap();
    let frame = face.frame(TimeOfDay::MIDNIGHT, DisplayMode::Interactive).unwrap();
    let (w, h) = (64, 16);

    let mut dst = vec![RGBA8::default(); w * h - 1];
    let mut mask = vec![0u8; w * h];
    assert_eq!(frame.render::<4>(&mut dst, &mut mask, w, h, w), Err(SurfaceTooSmall));

    let mut dst = vec![RGBA8::default(); w * h];
    let mut small_mask = vec![0u8; w];
    assert_eq!(frame.render::<4>(&mut dst, &mut small_mask, w, h, w), Err(SurfaceTooSmall));
}

#[test]
fn render_paints_background_and_strokes() {
    let face = ClockFace::new(ClockConfig::default()).unwrap();
    let frame = face.frame(time(8, 8, 8, 0), DisplayMode::Interactive).unwrap();
    let (w, h) = (238, 55);

    let mut dst = vec![RGBA8::default(); w * h];
    let mut mask = vec![0u8; w * h];
    frame.render::<4>(&mut dst, &mut mask, w, h, w).unwrap();

    let white = RGBA8::new(255, 255, 255, 255);
    assert_eq!(dst[0], white);
    assert!(dst.iter().any(|px| *px != white));
}
