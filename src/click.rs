//! Debounced multi-click gesture detection.
//!
//! A [`ClickDetector`] turns a sampled touch level into discrete
//! [`ClickEvent`]s. A press counts as a click when it is released within
//! `click_max_length`; the clicks collected so far are reported as one event
//! once the input has stayed released for longer than `click_timeout`.
//!
//! ```text
//!  touched  ┌──┐   ┌──┐
//!           │  │   │  │
//! released ─┘  └───┘  └──────────────── event { num_clicks: 2 }
//!            <max   <max  > timeout ^
//! ```

use crate::config::{CLICK_MAX_LENGTH_MS, CLICK_TIMEOUT_MS};
use crate::time::{TimeDuration, TimeInstant};

/// Trait for abstracting touch inputs.
///
/// Implement this for a capacitive touch pad, a GPIO button or anything else
/// that reads as a boolean level.
pub trait TouchSensor {
    /// Returns `true` while the input is touched.
    fn is_touched(&mut self) -> bool;
}

/// A finalized gesture: how many quick clicks were coalesced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClickEvent {
    pub num_clicks: u32,
}

/// Click timing thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickConfig<D: TimeDuration> {
    /// Presses held this long or longer do not count.
    pub click_max_length: D,

    /// Released idle time after which the gesture is reported.
    pub click_timeout: D,
}

impl<D: TimeDuration> ClickConfig<D> {
    pub fn new(click_max_length: D, click_timeout: D) -> Self {
        Self {
            click_max_length,
            click_timeout,
        }
    }
}

impl<D: TimeDuration> Default for ClickConfig<D> {
    fn default() -> Self {
        Self::new(
            D::from_millis(u64::from(CLICK_MAX_LENGTH_MS)),
            D::from_millis(u64::from(CLICK_TIMEOUT_MS)),
        )
    }
}

/// Per-input multi-click recognizer.
///
/// The detector has no error states: every boolean sample is valid and the
/// worst outcome of odd input is "no event".
#[derive(Debug, Clone)]
pub struct ClickDetector<I: TimeInstant> {
    config: ClickConfig<I::Duration>,
    last_state: bool,
    last_edge_time: I,
    click_count: u32,
}

impl<I: TimeInstant> ClickDetector<I> {
    /// Creates a detector for an input currently reading `initial_state`.
    pub fn new(config: ClickConfig<I::Duration>, initial_state: bool, now: I) -> Self {
        Self {
            config,
            last_state: initial_state,
            last_edge_time: now,
            click_count: 0,
        }
    }

    /// Feeds one sample and returns a finalized gesture, if any.
    pub fn poll(&mut self, touched: bool, now: I) -> Option<ClickEvent> {
        let since_edge = now.duration_since(self.last_edge_time).as_millis();
        let mut event = None;

        if touched != self.last_state {
            if !touched && since_edge < self.config.click_max_length.as_millis() {
                self.click_count = self.click_count.saturating_add(1);
            }
            self.last_edge_time = now;
        } else if !touched
            && since_edge > self.config.click_timeout.as_millis()
            && self.click_count > 0
        {
            event = Some(ClickEvent {
                num_clicks: self.click_count,
            });
            self.click_count = 0;
        }

        self.last_state = touched;
        event
    }

    /// Reads `sensor` and feeds the sample to [`poll`](Self::poll).
    pub fn poll_sensor<S: TouchSensor>(&mut self, sensor: &mut S, now: I) -> Option<ClickEvent> {
        let touched = sensor.is_touched();
        self.poll(touched, now)
    }

    /// Clicks collected in the current, not yet reported, gesture.
    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    /// Level seen by the most recent poll.
    pub fn is_touched(&self) -> bool {
        self.last_state
    }

    pub fn config(&self) -> &ClickConfig<I::Duration> {
        &self.config
    }
}
