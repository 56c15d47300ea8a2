//! Device and host configuration constants.

// ---------------------------------------------------------------------------
// Hardware
// ---------------------------------------------------------------------------
/// Number of pixels on the LED bus.
pub const NUM_PIXELS: usize = 4;

/// Global LED bus brightness (0-255), about 20 %.
pub const GLOBAL_BRIGHTNESS: u8 = 51;

// ---------------------------------------------------------------------------
// Click detection (milliseconds)
// ---------------------------------------------------------------------------
/// A press must be released within this time to count as a click.
pub const CLICK_MAX_LENGTH_MS: u32 = 200;

/// Idle time after the last release before a gesture is reported.
pub const CLICK_TIMEOUT_MS: u32 = 200;

// ---------------------------------------------------------------------------
// Task intervals (milliseconds)
// ---------------------------------------------------------------------------
pub const BUTTON_POLL_INTERVAL_MS: u32 = 10;
pub const BLINK_INTERVAL_MS: u32 = 10;
pub const SOLID_RENDER_INTERVAL_MS: u32 = 100;
pub const RAINBOW_RENDER_INTERVAL_MS: u32 = 10;

// ---------------------------------------------------------------------------
// Feedback blink
// ---------------------------------------------------------------------------
pub const BLINK_DURATION_MS: u32 = 50;
pub const BLINK_INTENSITY: f32 = 0.1;

// ---------------------------------------------------------------------------
// Serial control
// ---------------------------------------------------------------------------
/// Intensity every LED starts at in the serial control app.
pub const SERIAL_DEFAULT_INTENSITY: f32 = 0.5;

/// Longest accepted command line, in bytes, excluding the terminator.
///
/// The host encoder refuses to build longer lines.
pub const SERIAL_LINE_CAPACITY: usize = 256;

// ---------------------------------------------------------------------------
// Host CLI
// ---------------------------------------------------------------------------
pub const DEFAULT_BAUD: u32 = 115_200;
pub const DEFAULT_DEVICE: &str = "/dev/ttyACM0";
