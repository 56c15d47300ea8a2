//! Short LED flashes acknowledging a gesture.

use crate::bank::LedBank;
use crate::color::{BLACK, Color};
use crate::config::{BLINK_DURATION_MS, BLINK_INTENSITY, GLOBAL_BRIGHTNESS, NUM_PIXELS};
use crate::time::{TimeDuration, TimeInstant};
use smart_leds::{RGB8, SmartLedsWrite};

use super::millis;

/// Tracks one timed flash.
#[derive(Debug, Clone, Copy)]
pub struct Blinker<I: TimeInstant> {
    intensity: f32,
    duration: I::Duration,
    started: Option<I>,
}

impl<I: TimeInstant> Blinker<I> {
    pub fn new(intensity: f32, duration: I::Duration) -> Self {
        Self {
            intensity,
            duration,
            started: None,
        }
    }

    /// Fills `bank` with `color` and starts timing the flash.
    pub fn start<const N: usize>(&mut self, bank: &mut LedBank<N>, color: Color, now: I) {
        bank.fill(color, self.intensity);
        self.started = Some(now);
    }

    /// Turns `bank` off once the flash has lasted its duration.
    ///
    /// Returns `true` on the call that turned it off.
    pub fn expire<const N: usize>(&mut self, bank: &mut LedBank<N>, now: I) -> bool {
        let Some(started) = self.started else {
            return false;
        };

        if now.duration_since(started).as_millis() < self.duration.as_millis() {
            return false;
        }

        bank.fill(BLACK, self.intensity);
        self.started = None;
        true
    }

    pub fn is_active(&self) -> bool {
        self.started.is_some()
    }
}

impl<I: TimeInstant> Default for Blinker<I> {
    fn default() -> Self {
        Self::new(BLINK_INTENSITY, millis(BLINK_DURATION_MS))
    }
}

/// The LED side of a gesture app: bus, bank and blinker together.
pub struct Feedback<W, I: TimeInstant> {
    bus: W,
    bank: LedBank<NUM_PIXELS>,
    blinker: Blinker<I>,
}

impl<W, I> Feedback<W, I>
where
    W: SmartLedsWrite<Color = RGB8>,
    I: TimeInstant,
{
    /// Takes the bus and blanks it.
    pub fn new(bus: W, blinker: Blinker<I>) -> Self {
        let mut feedback = Self {
            bus,
            bank: LedBank::new(),
            blinker,
        };
        feedback.show();
        feedback
    }

    /// Flashes every pixel with `color`.
    pub fn flash(&mut self, color: Color, now: I) {
        self.blinker.start(&mut self.bank, color, now);
        self.show();
    }

    /// Ends an expired flash. Run this as a periodic task.
    pub fn tick(&mut self, now: I) {
        if self.blinker.expire(&mut self.bank, now) {
            self.show();
        }
    }

    pub fn bank(&self) -> &LedBank<NUM_PIXELS> {
        &self.bank
    }

    pub fn bus(&self) -> &W {
        &self.bus
    }

    pub fn is_flashing(&self) -> bool {
        self.blinker.is_active()
    }

    fn show(&mut self) {
        self.bank.show(&mut self.bus, GLOBAL_BRIGHTNESS);
    }
}
