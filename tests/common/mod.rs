//! Shared test infrastructure for trinkey-touch integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use smart_leds::{RGB8, SmartLedsWrite};
use trinkey_touch::apps::{Keyboard, MediaKey, MediaKeys, Modifier, SerialRx, Shortcut};
use trinkey_touch::{TimeSource, Timestamp, TouchSensor};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock clock with controllable time advancement
pub struct MockClock {
    current_time: Cell<Timestamp>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Timestamp(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(current.wrapping_add_millis(millis));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(Timestamp(millis));
    }
}

impl TimeSource<Timestamp> for MockClock {
    fn now(&self) -> Timestamp {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Touch Pad
// ============================================================================

/// Touch level shared between the test and the pad it drives
#[derive(Clone, Default)]
pub struct MockTouch {
    level: Rc<Cell<bool>>,
}

impl MockTouch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, touched: bool) {
        self.level.set(touched);
    }
}

impl TouchSensor for MockTouch {
    fn is_touched(&mut self) -> bool {
        self.level.get()
    }
}

// ============================================================================
// Mock LED Bus
// ============================================================================

pub type Frame = heapless::Vec<RGB8, 4>;

/// Mock LED bus that records every written frame
#[derive(Default)]
pub struct MockBus {
    frames: heapless::Vec<Frame, 64>,
    failing: bool,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus whose writes always fail
    pub fn failing() -> Self {
        Self {
            frames: heapless::Vec::new(),
            failing: true,
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl SmartLedsWrite for MockBus {
    type Error = ();
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.failing {
            return Err(());
        }

        let frame: Frame = iterator.into_iter().map(Into::into).take(4).collect();
        let _ = self.frames.push(frame);
        Ok(())
    }
}

// ============================================================================
// Mock Serial Receiver
// ============================================================================

/// Receive queue shared between the test and the app.
#[derive(Clone, Default)]
pub struct MockRx {
    pending: Rc<RefCell<VecDeque<u8>>>,
}

impl MockRx {
    pub fn feed(&self, bytes: &[u8]) {
        self.pending.borrow_mut().extend(bytes);
    }

    /// Bytes not yet read by the app
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl SerialRx for MockRx {
    fn read_byte(&mut self) -> Option<u8> {
        self.pending.borrow_mut().pop_front()
    }
}

// ============================================================================
// Mock HID
// ============================================================================

#[derive(Default)]
pub struct MockKeyboard {
    pub sent: Vec<(Modifier, Shortcut)>,
}

impl Keyboard for MockKeyboard {
    fn send(&mut self, modifier: Modifier, shortcut: Shortcut) {
        self.sent.push((modifier, shortcut));
    }
}

#[derive(Default)]
pub struct MockMedia {
    pub sent: Vec<MediaKey>,
}

impl MediaKeys for MockMedia {
    fn send(&mut self, key: MediaKey) {
        self.sent.push(key);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// True if every pixel of the frame is off
pub fn frame_is_dark(frame: &Frame) -> bool {
    frame.iter().all(|p| p.r == 0 && p.g == 0 && p.b == 0)
}

/// Compare two intensities with floating-point tolerance
pub fn intensity_equal(a: f32, b: f32) -> bool {
    const EPSILON: f32 = 0.0001;
    (a - b).abs() < EPSILON
}
