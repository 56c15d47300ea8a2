//! Touch-controlled flashlight.
//!
//! - Pad 1: cycle intensity 100 % → 66 % → 33 % → off.
//! - Pad 2: cycle through solid colors and then a rainbow. Ignored while the
//!   light is (nearly) off so the mode cannot change unseen.

use crate::bank::LedBank;
use crate::click::TouchSensor;
use crate::color::{BLUE, Color, GREEN, ORANGE, PURPLE, RED, WHITE, YELLOW, colorwheel};
use crate::config::{
    GLOBAL_BRIGHTNESS, NUM_PIXELS, RAINBOW_RENDER_INTERVAL_MS, SOLID_RENDER_INTERVAL_MS,
};
use crate::scheduler::{Scheduler, Task, TaskSlot};
use crate::time::{TimeInstant, TimeSource};
use smart_leds::{RGB8, SmartLedsWrite};

use super::{Gesture, GestureHandler, TouchPad, TouchPads, millis};

pub const COLORS: [Color; 7] = [WHITE, RED, ORANGE, YELLOW, GREEN, BLUE, PURPLE];
pub const INTENSITIES: [f32; 4] = [1.0, 0.66, 0.33, 0.0];

/// Color changes are ignored at or below this intensity.
const MIN_VISIBLE_INTENSITY: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Index into [`COLORS`].
    Solid(usize),
    Rainbow,
}

impl Mode {
    pub fn next(self) -> Self {
        match self {
            Mode::Solid(index) if index + 1 < COLORS.len() => Mode::Solid(index + 1),
            Mode::Solid(_) => Mode::Rainbow,
            Mode::Rainbow => Mode::Solid(0),
        }
    }
}

pub struct Flashlight<W> {
    bus: W,
    bank: LedBank<NUM_PIXELS>,
    mode: Mode,
    intensity_index: usize,
    rainbow_offset: u8,
}

impl<W: SmartLedsWrite<Color = RGB8>> Flashlight<W> {
    /// Starts solid white at full intensity.
    pub fn new(bus: W) -> Self {
        Self {
            bus,
            bank: LedBank::new(),
            mode: Mode::Solid(0),
            intensity_index: 0,
            rainbow_offset: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn intensity(&self) -> f32 {
        INTENSITIES[self.intensity_index]
    }

    pub fn bank(&self) -> &LedBank<NUM_PIXELS> {
        &self.bank
    }

    pub fn bus(&self) -> &W {
        &self.bus
    }

    /// Renders the solid color, if that mode is active.
    pub fn render_solid(&mut self) {
        let Mode::Solid(index) = self.mode else {
            return;
        };

        self.bank.fill(COLORS[index], self.intensity());
        self.bank.show(&mut self.bus, GLOBAL_BRIGHTNESS);
    }

    /// Renders one rainbow frame and advances it, if that mode is active.
    pub fn render_rainbow(&mut self) {
        if self.mode != Mode::Rainbow {
            return;
        }

        let intensity = self.intensity();
        for led in 0..NUM_PIXELS {
            let spread = (led * 256 / NUM_PIXELS) as u8;
            self.bank
                .set(led, colorwheel(spread.wrapping_add(self.rainbow_offset)), intensity);
        }
        self.bank.show(&mut self.bus, GLOBAL_BRIGHTNESS);
        self.rainbow_offset = self.rainbow_offset.wrapping_add(1);
    }

    /// The app's task table: pads on every tick, solid every 100 ms,
    /// rainbow every 10 ms.
    ///
    /// `solid` and `rainbow` are normally thin wrappers around
    /// [`render_solid`](Self::render_solid) and
    /// [`render_rainbow`](Self::render_rainbow).
    pub fn tasks<'a, A, B, I, S, R>(
        pads: &'a mut TouchPads<A, B, I>,
        solid: &'a mut S,
        rainbow: &'a mut R,
    ) -> [TaskSlot<'a, Self, I>; 3]
    where
        A: TouchSensor,
        B: TouchSensor,
        I: TimeInstant,
        S: Task<Self, I> + 'a,
        R: Task<Self, I> + 'a,
    {
        [
            TaskSlot::always(pads),
            TaskSlot::every(millis(SOLID_RENDER_INTERVAL_MS), solid),
            TaskSlot::every(millis(RAINBOW_RENDER_INTERVAL_MS), rainbow),
        ]
    }

    /// Runs the app forever on [`tasks`](Self::tasks).
    pub fn run<A, B, I, T>(&mut self, pads: &mut TouchPads<A, B, I>, clock: &T) -> !
    where
        A: TouchSensor,
        B: TouchSensor,
        I: TimeInstant,
        T: TimeSource<I>,
    {
        let mut solid = |app: &mut Self, _now: I| app.render_solid();
        let mut rainbow = |app: &mut Self, _now: I| app.render_rainbow();
        let mut scheduler: Scheduler<'_, Self, I, 3> =
            Scheduler::new(clock.now(), Self::tasks(pads, &mut solid, &mut rainbow));

        scheduler.run(self, clock)
    }
}

impl<W, I> GestureHandler<I> for Flashlight<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    I: TimeInstant,
{
    fn on_gesture(&mut self, gesture: Gesture, _now: I) {
        match gesture.pad {
            TouchPad::One => {
                self.intensity_index = (self.intensity_index + 1) % INTENSITIES.len();
                info!("intensity {}", self.intensity());
            }
            TouchPad::Two => {
                if self.intensity() <= MIN_VISIBLE_INTENSITY {
                    return;
                }
                self.mode = self.mode.next();
                match self.mode {
                    Mode::Solid(index) => info!("solid color {}", index),
                    Mode::Rainbow => info!("rainbow"),
                }
            }
        }
    }
}
