use crate::error::{ClockError::InvalidTime, ClockResult};
use crate::glyph::Float;

const MS_PER_SECOND: u32 = 1000;
const MS_PER_MINUTE: u32 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u32 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u32 = 24 * MS_PER_HOUR;

pub const SLOT_COUNT: usize = 6;

/// Wall-clock reading with millisecond resolution, already in local time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0, second: 0, millisecond: 0 };

    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> ClockResult<Self> {
        match hour < 24 && minute < 60 && second < 60 && millisecond < 1000 {
            true => Ok(Self { hour, minute, second, millisecond }),
            false => Err(InvalidTime),
        }
    }

    pub fn from_millis_of_day(ms: u32) -> ClockResult<Self> {
        if ms >= MS_PER_DAY {
            return Err(InvalidTime);
        }

        Ok(Self {
            hour: (ms / MS_PER_HOUR) as u8,
            minute: (ms % MS_PER_HOUR / MS_PER_MINUTE) as u8,
            second: (ms % MS_PER_MINUTE / MS_PER_SECOND) as u8,
            millisecond: (ms % MS_PER_SECOND) as u16,
        })
    }

    /// `offset_minutes` is positive east of UTC.
    pub fn from_unix_millis(unix_ms: i64, offset_minutes: i32) -> Self {
        let local = unix_ms + (offset_minutes as i64) * (MS_PER_MINUTE as i64);
        let ms = local.rem_euclid(MS_PER_DAY as i64) as u32;
        Self {
            hour: (ms / MS_PER_HOUR) as u8,
            minute: (ms % MS_PER_HOUR / MS_PER_MINUTE) as u8,
            second: (ms % MS_PER_MINUTE / MS_PER_SECOND) as u8,
            millisecond: (ms % MS_PER_SECOND) as u16,
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    pub fn millis_of_day(&self) -> u32 {
        self.hour as u32 * MS_PER_HOUR
            + self.minute as u32 * MS_PER_MINUTE
            + self.second as u32 * MS_PER_SECOND
            + self.millisecond as u32
    }
}

/// Host-side clock, sampled once per tick.
pub trait TimeSource {
    fn now(&self) -> TimeOfDay;
}

impl TimeSource for TimeOfDay {
    fn now(&self) -> TimeOfDay {
        *self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    HourTens,
    HourUnits,
    MinuteTens,
    MinuteUnits,
    SecondTens,
    SecondUnits,
}

impl Slot {
    /// Left to right
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::HourTens,
        Slot::HourUnits,
        Slot::MinuteTens,
        Slot::MinuteUnits,
        Slot::SecondTens,
        Slot::SecondUnits,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_text(self) -> &'static str {
        match self {
            Slot::HourTens => "HourTens",
            Slot::HourUnits => "HourUnits",
            Slot::MinuteTens => "MinuteTens",
            Slot::MinuteUnits => "MinuteUnits",
            Slot::SecondTens => "SecondTens",
            Slot::SecondUnits => "SecondUnits",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PhaseTriple {
    pub current: u8,
    pub next: u8,
    /// milliseconds spent in the current value's window
    pub elapsed: u32,
    /// length of that window in milliseconds
    pub window: u32,
}

impl PhaseTriple {
    fn new(current: u8, next: u8, elapsed: u32, window: u32) -> Self {
        Self { current, next, elapsed, window }
    }

    /// In `[0, 1)`
    pub fn ratio(&self) -> Float {
        (self.elapsed as f64 / self.window as f64) as Float
    }
}

fn next_digit(current: u8, max: u8) -> u8 {
    (current + 1) % max
}

/// Splits `time` into one phase per slot, ordered like [`Slot::ALL`].
///
/// Ratios are the fraction of the window during which the slot keeps its
/// current value, so each one resets exactly when the slot's digit changes.
/// At 23h the hour-units digit wraps to 0 instead of 4 and the hour-tens
/// window shrinks to the four hours 20..24.
pub fn phases_at(time: TimeOfDay) -> [PhaseTriple; SLOT_COUNT] {
    let TimeOfDay { hour, minute, second, millisecond } = time;
    let ms = millisecond as u32;

    let second_units = second % 10;
    let second_tens = second / 10;
    let minute_units = minute % 10;
    let minute_tens = minute / 10;
    let hour_units = hour % 10;
    let hour_tens = hour / 10;

    let in_minute = second as u32 * MS_PER_SECOND + ms;
    let in_hour = minute as u32 * MS_PER_MINUTE + in_minute;
    let in_hour_tens = hour_units as u32 * MS_PER_HOUR + in_hour;

    let (hour_units_next, hour_tens_window) = match hour {
        23 => (0, 4 * MS_PER_HOUR),
        _ => (next_digit(hour_units, 10), 10 * MS_PER_HOUR),
    };

    [
        PhaseTriple::new(hour_tens, next_digit(hour_tens, 3), in_hour_tens, hour_tens_window),
        PhaseTriple::new(hour_units, hour_units_next, in_hour, MS_PER_HOUR),
        PhaseTriple::new(
            minute_tens,
            next_digit(minute_tens, 6),
            minute_units as u32 * MS_PER_MINUTE + in_minute,
            10 * MS_PER_MINUTE,
        ),
        PhaseTriple::new(minute_units, next_digit(minute_units, 10), in_minute, MS_PER_MINUTE),
        PhaseTriple::new(
            second_tens,
            next_digit(second_tens, 6),
            second_units as u32 * MS_PER_SECOND + ms,
            10 * MS_PER_SECOND,
        ),
        PhaseTriple::new(second_units, next_digit(second_units, 10), ms, MS_PER_SECOND),
    ]
}
