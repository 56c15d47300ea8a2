//! Device applications built from the core pieces.
//!
//! Every touch app follows the same shape: a [`TouchPads`] task polls both
//! pads and hands finished gestures to the app through [`GestureHandler`];
//! the app owns the LED bank and bus and reacts by matching on the gesture.
//! The detectors never call back into the app.

pub mod blink;
pub mod clipboard;
pub mod flashlight;
pub mod serial;
pub mod volume;

pub use blink::{Blinker, Feedback};
pub use clipboard::{ClipboardHelper, Keyboard, Modifier, Shortcut};
pub use flashlight::{Flashlight, Mode};
pub use serial::{SerialControl, SerialRx};
pub use volume::{MediaKey, MediaKeys, VolumeControl};

use crate::click::{ClickConfig, ClickDetector, TouchSensor};
use crate::scheduler::Task;
use crate::time::{TimeDuration, TimeInstant};

/// The two touch pads of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchPad {
    One,
    Two,
}

/// A finished gesture on a specific pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Gesture {
    pub pad: TouchPad,
    pub num_clicks: u32,
}

/// Receives gestures from the input task.
pub trait GestureHandler<I: TimeInstant> {
    fn on_gesture(&mut self, gesture: Gesture, now: I);
}

/// Both touch pads with their click detectors.
pub struct TouchPads<A, B, I: TimeInstant> {
    one: A,
    two: B,
    one_clicks: ClickDetector<I>,
    two_clicks: ClickDetector<I>,
}

impl<A: TouchSensor, B: TouchSensor, I: TimeInstant> TouchPads<A, B, I> {
    /// Binds a detector to each pad, seeded with the pad's current level.
    pub fn new(mut one: A, mut two: B, config: ClickConfig<I::Duration>, now: I) -> Self {
        let one_clicks = ClickDetector::new(config, one.is_touched(), now);
        let two_clicks = ClickDetector::new(config, two.is_touched(), now);

        Self {
            one,
            two,
            one_clicks,
            two_clicks,
        }
    }

    /// Samples both pads, returning the gestures that finished.
    pub fn poll(&mut self, now: I) -> [Option<Gesture>; 2] {
        let one = self.one_clicks.poll_sensor(&mut self.one, now).map(|event| Gesture {
            pad: TouchPad::One,
            num_clicks: event.num_clicks,
        });
        let two = self.two_clicks.poll_sensor(&mut self.two, now).map(|event| Gesture {
            pad: TouchPad::Two,
            num_clicks: event.num_clicks,
        });

        [one, two]
    }

    pub fn detector(&self, pad: TouchPad) -> &ClickDetector<I> {
        match pad {
            TouchPad::One => &self.one_clicks,
            TouchPad::Two => &self.two_clicks,
        }
    }
}

impl<C, A, B, I> Task<C, I> for TouchPads<A, B, I>
where
    C: GestureHandler<I>,
    A: TouchSensor,
    B: TouchSensor,
    I: TimeInstant,
{
    fn run(&mut self, ctx: &mut C, now: I) {
        for gesture in self.poll(now).into_iter().flatten() {
            debug!("pad {} clicked {} times", pad_number(gesture.pad), gesture.num_clicks);
            ctx.on_gesture(gesture, now);
        }
    }
}

fn pad_number(pad: TouchPad) -> u8 {
    match pad {
        TouchPad::One => 1,
        TouchPad::Two => 2,
    }
}

/// Converts a millisecond constant into the app's duration type.
pub(crate) fn millis<D: TimeDuration>(ms: u32) -> D {
    D::from_millis(u64::from(ms))
}
