//! Time abstraction traits for platform-agnostic timing.
//!
//! Everything in this crate reads time through [`TimeInstant`], so the same
//! detectors and schedulers run against a SysTick counter on hardware and a
//! hand-advanced clock in tests. [`Timestamp`] is the millisecond counter the
//! firmware uses.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Milliseconds(pub u32);

impl TimeDuration for Milliseconds {
    const ZERO: Self = Milliseconds(0);

    fn as_millis(&self) -> u64 {
        u64::from(self.0)
    }

    fn from_millis(millis: u64) -> Self {
        Milliseconds(u32::try_from(millis).unwrap_or(u32::MAX))
    }
}

/// Milliseconds since startup.
///
/// Wraps after ~49.7 days; [`TimeInstant::duration_since`] uses wrapping
/// subtraction so intervals stay correct across the wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(pub u32);

impl Timestamp {
    /// Returns the instant as milliseconds since startup.
    pub fn as_millis(&self) -> u32 {
        self.0
    }

    /// Returns this instant moved forward by `millis`, wrapping on overflow.
    pub fn wrapping_add_millis(self, millis: u32) -> Self {
        Timestamp(self.0.wrapping_add(millis))
    }
}

impl TimeInstant for Timestamp {
    type Duration = Milliseconds;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Milliseconds(self.0.wrapping_sub(earlier.0))
    }
}
