//! LED control over the serial console.
//!
//! Bytes are assembled into lines, each line is parsed with
//! [`parse_line`](crate::protocol::parse_line) and its valid segments are
//! applied to the bank in order. The bus is refreshed after every line that
//! changed something.

use crate::bank::LedBank;
use crate::config::{GLOBAL_BRIGHTNESS, NUM_PIXELS, SERIAL_DEFAULT_INTENSITY, SERIAL_LINE_CAPACITY};
use crate::protocol::LineBuffer;
use crate::scheduler::{Scheduler, TaskSlot};
use crate::time::{TimeInstant, TimeSource};
use smart_leds::{RGB8, SmartLedsWrite};

/// Non-blocking serial receiver boundary.
pub trait SerialRx {
    /// Returns the next received byte, or `None` if nothing is pending.
    fn read_byte(&mut self) -> Option<u8>;
}

pub struct SerialControl<R, W> {
    rx: R,
    bus: W,
    bank: LedBank<NUM_PIXELS>,
    line: LineBuffer<SERIAL_LINE_CAPACITY>,
}

impl<R, W> SerialControl<R, W>
where
    R: SerialRx,
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Takes the receiver and bus, and blanks the bus.
    pub fn new(rx: R, bus: W) -> Self {
        let mut app = Self {
            rx,
            bus,
            bank: LedBank::with_intensity(SERIAL_DEFAULT_INTENSITY),
            line: LineBuffer::new(),
        };
        app.bank.show(&mut app.bus, GLOBAL_BRIGHTNESS);
        app
    }

    /// Drains pending bytes, at most one line's worth per call.
    ///
    /// Returns how many command segments were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;

        for _ in 0..=SERIAL_LINE_CAPACITY {
            let Some(byte) = self.rx.read_byte() else {
                break;
            };

            if let Some(line) = self.line.push(byte) {
                let count = self.bank.apply_line(line);
                debug!("applied {} segments", count);
                if count > 0 {
                    self.bank.show(&mut self.bus, GLOBAL_BRIGHTNESS);
                }
                applied += count;
            }
        }

        applied
    }

    pub fn bank(&self) -> &LedBank<NUM_PIXELS> {
        &self.bank
    }

    pub fn bus(&self) -> &W {
        &self.bus
    }

    /// Polls the receiver on every tick, forever.
    pub fn run<I, T>(&mut self, clock: &T) -> !
    where
        I: TimeInstant,
        T: TimeSource<I>,
    {
        let mut receive = |app: &mut Self, _now: I| {
            app.poll();
        };
        let mut scheduler: Scheduler<'_, Self, I, 1> =
            Scheduler::new(clock.now(), [TaskSlot::always(&mut receive)]);

        scheduler.run(self, clock)
    }
}
