//! Media volume control from the touch pads.
//!
//! - Pad 1: one click raises the volume, two clicks play/pause.
//! - Pad 2: one click lowers the volume, two clicks mute.

use crate::click::TouchSensor;
use crate::color::{BLUE, GREEN, RED, WHITE};
use crate::config::{BLINK_INTERVAL_MS, BUTTON_POLL_INTERVAL_MS};
use crate::scheduler::{Scheduler, TaskSlot};
use crate::time::{TimeInstant, TimeSource};
use smart_leds::{RGB8, SmartLedsWrite};

use super::{Feedback, Gesture, GestureHandler, TouchPad, TouchPads, millis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediaKey {
    VolumeUp,
    VolumeDown,
    PlayPause,
    Mute,
}

/// Consumer-control HID boundary. Transport errors are handled internally.
pub trait MediaKeys {
    fn send(&mut self, key: MediaKey);
}

pub struct VolumeControl<M, W, I: TimeInstant> {
    media: M,
    feedback: Feedback<W, I>,
}

impl<M, W, I> VolumeControl<M, W, I>
where
    M: MediaKeys,
    W: SmartLedsWrite<Color = RGB8>,
    I: TimeInstant,
{
    pub fn new(media: M, feedback: Feedback<W, I>) -> Self {
        Self { media, feedback }
    }

    pub fn feedback(&self) -> &Feedback<W, I> {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback<W, I> {
        &mut self.feedback
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn run<A, B, T>(&mut self, pads: &mut TouchPads<A, B, I>, clock: &T) -> !
    where
        A: TouchSensor,
        B: TouchSensor,
        T: TimeSource<I>,
    {
        let mut blink = |app: &mut Self, now: I| app.feedback_mut().tick(now);
        let mut scheduler: Scheduler<'_, Self, I, 2> = Scheduler::new(
            clock.now(),
            [
                TaskSlot::every(millis(BUTTON_POLL_INTERVAL_MS), pads),
                TaskSlot::every(millis(BLINK_INTERVAL_MS), &mut blink),
            ],
        );

        scheduler.run(self, clock)
    }
}

impl<M, W, I> GestureHandler<I> for VolumeControl<M, W, I>
where
    M: MediaKeys,
    W: SmartLedsWrite<Color = RGB8>,
    I: TimeInstant,
{
    fn on_gesture(&mut self, gesture: Gesture, now: I) {
        let (key, color) = match (gesture.pad, gesture.num_clicks) {
            (TouchPad::One, 1) => (MediaKey::VolumeUp, RED),
            (TouchPad::One, 2) => (MediaKey::PlayPause, WHITE),
            (TouchPad::Two, 1) => (MediaKey::VolumeDown, GREEN),
            (TouchPad::Two, 2) => (MediaKey::Mute, BLUE),
            _ => return,
        };

        self.media.send(key);
        self.feedback.flash(color, now);
    }
}
