//! Copy/cut/paste from the touch pads.
//!
//! - Pad 1: one click copies, two clicks cut.
//! - Pad 2: one click pastes, two clicks switch between Command (macOS)
//!   and Control (Windows/Linux) shortcuts.

use crate::click::TouchSensor;
use crate::color::{BLUE, GREEN, RED, YELLOW};
use crate::config::{BLINK_INTERVAL_MS, BUTTON_POLL_INTERVAL_MS};
use crate::scheduler::{Scheduler, TaskSlot};
use crate::time::{TimeInstant, TimeSource};
use smart_leds::{RGB8, SmartLedsWrite};

use super::{Feedback, Gesture, GestureHandler, TouchPad, TouchPads, millis};

/// Shortcut modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modifier {
    Command,
    Control,
}

impl Modifier {
    pub fn toggled(self) -> Self {
        match self {
            Modifier::Command => Modifier::Control,
            Modifier::Control => Modifier::Command,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shortcut {
    Copy,
    Cut,
    Paste,
}

/// Keyboard HID boundary.
///
/// Implementations press and release `modifier` + the shortcut's key.
/// Transport errors are handled internally.
pub trait Keyboard {
    fn send(&mut self, modifier: Modifier, shortcut: Shortcut);
}

pub struct ClipboardHelper<K, W, I: TimeInstant> {
    keyboard: K,
    feedback: Feedback<W, I>,
    modifier: Modifier,
}

impl<K, W, I> ClipboardHelper<K, W, I>
where
    K: Keyboard,
    W: SmartLedsWrite<Color = RGB8>,
    I: TimeInstant,
{
    pub fn new(keyboard: K, feedback: Feedback<W, I>) -> Self {
        Self {
            keyboard,
            feedback,
            modifier: Modifier::Command,
        }
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    pub fn feedback(&self) -> &Feedback<W, I> {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback<W, I> {
        &mut self.feedback
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    /// Runs the app forever: pads every 10 ms, blink expiry every 10 ms.
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

impl<K, W, I> GestureHandler<I> for ClipboardHelper<K, W, I>
where
    K: Keyboard,
    W: SmartLedsWrite<Color = RGB8>,
    I: TimeInstant,
{
    fn on_gesture(&mut self, gesture: Gesture, now: I) {
        match (gesture.pad, gesture.num_clicks) {
            (TouchPad::One, 1) => {
                self.keyboard.send(self.modifier, Shortcut::Copy);
                self.feedback.flash(YELLOW, now);
            }
            (TouchPad::One, 2) => {
                self.keyboard.send(self.modifier, Shortcut::Cut);
                self.feedback.flash(RED, now);
            }
            (TouchPad::Two, 1) => {
                self.keyboard.send(self.modifier, Shortcut::Paste);
                self.feedback.flash(GREEN, now);
            }
            (TouchPad::Two, 2) => {
                self.modifier = self.modifier.toggled();
                info!(
                    "shortcut modifier: {}",
                    match self.modifier {
                        Modifier::Command => "command",
                        Modifier::Control => "control",
                    }
                );
                self.feedback.flash(BLUE, now);
            }
            _ => {}
        }
    }
}
