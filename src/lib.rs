#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ClickDetector`**: Turns a sampled touch level into "N clicks" gestures
//! - **`Scheduler`**: Runs a fixed set of interval-gated tasks on one thread, in order
//! - **`Task`**: Anything that can act given the current time; closures qualify
//! - **`LedCommand`**: One decoded `leds:color:intensity` protocol segment
//! - **`parse_line`**: Decodes a command line, one `Result` per segment
//! - **`LedBank`**: Per-LED colors and intensities that commands update
//! - **`encode`**: Builds a protocol line from host operator tokens (`std` only)
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`TouchSensor`**: Trait to implement for your touch inputs
//!
//! Colors are 8-bit `Srgb<u8>` values. Rendering goes through any
//! `smart_leds::SmartLedsWrite` driver.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

mod fmt;

pub mod apps;
pub mod bank;
pub mod click;
pub mod color;
pub mod config;
#[cfg(feature = "std")]
pub mod encoder;
#[cfg(feature = "std")]
pub mod host;
pub mod protocol;
pub mod scheduler;
pub mod time;

pub use bank::LedBank;
pub use click::{ClickConfig, ClickDetector, ClickEvent, TouchSensor};
pub use color::{Color, ColorCode, colorwheel, scale};
#[cfg(feature = "std")]
pub use encoder::{EncodeError, EncodeErrorKind, encode};
pub use protocol::{LedCommand, LedSet, LineBuffer, ParseError, parse_command, parse_line};
pub use scheduler::{ScheduledTask, Scheduler, Task, TaskSlot};
pub use time::{Milliseconds, TimeDuration, TimeInstant, TimeSource, Timestamp};
