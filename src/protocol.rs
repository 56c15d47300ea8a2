//! Line-oriented LED command protocol (device side).
//!
//! A line is one or more comma-separated segments of the form
//! `leds:color:intensity`:
//!
//! - `leds` - one or more digits `1`..=pixel count, no separator (`"24"` is
//!   LEDs 2 and 4).
//! - `color` - a short code from [`ColorCode`], or empty to leave colors alone.
//! - `intensity` - `0`..=`10` in steps of 10 %, or empty to leave it alone.
//!   The field may be omitted entirely (`"4:blk"`).
//!
//! Segments are parsed independently. A malformed segment yields an error
//! for that segment only; its siblings are still returned.

use crate::color::{Color, ColorCode};
use heapless::String;

/// Set of 0-based LED indices addressed by one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedSet(u16);

impl LedSet {
    /// Largest index a set can hold.
    pub const MAX_INDEX: usize = 15;

    pub const fn empty() -> Self {
        LedSet(0)
    }

    /// Returns the set with `index` added. Indices above `MAX_INDEX` are ignored.
    pub fn with(self, index: usize) -> Self {
        if index > Self::MAX_INDEX {
            return self;
        }
        LedSet(self.0 | (1 << index))
    }

    pub fn contains(&self, index: usize) -> bool {
        index <= Self::MAX_INDEX && self.0 & (1 << index) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..=Self::MAX_INDEX).filter(move |&index| self.contains(index))
    }
}

impl FromIterator<usize> for LedSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        iter.into_iter().fold(LedSet::empty(), LedSet::with)
    }
}

/// One decoded protocol segment.
///
/// `None` fields leave the corresponding LED state unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedCommand {
    pub targets: LedSet,
    pub color: Option<Color>,
    pub intensity: Option<f32>,
}

/// Why a protocol segment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Fewer than two fields, or a non-empty field after the intensity.
    FieldCount,

    /// The LED field is empty.
    MissingLeds,

    /// An LED digit is not a digit, is zero, or exceeds the pixel count.
    InvalidLed,

    /// The color is not a known short code.
    UnknownColor,

    /// The intensity is not a number in `0..=10`.
    InvalidIntensity,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::FieldCount => write!(f, "expected leds:color:intensity"),
            ParseError::MissingLeds => write!(f, "no leds given"),
            ParseError::InvalidLed => write!(f, "led out of range"),
            ParseError::UnknownColor => write!(f, "unknown color code"),
            ParseError::InvalidIntensity => write!(f, "intensity must be 0-10"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Highest intensity step on the wire; maps to `1.0`.
pub const MAX_INTENSITY_STEP: u8 = 10;

/// Parses every segment of `line` for a device with `pixel_count` LEDs.
///
/// Surrounding whitespace and line terminators are ignored.
pub fn parse_line(
    line: &str,
    pixel_count: usize,
) -> impl Iterator<Item = Result<LedCommand, ParseError>> + '_ {
    line.trim()
        .split(',')
        .map(move |segment| parse_command(segment, pixel_count))
}

/// Parses one `leds:color:intensity` segment.
pub fn parse_command(segment: &str, pixel_count: usize) -> Result<LedCommand, ParseError> {
    let mut fields = segment.split(':');

    let leds = fields.next().unwrap_or_default();
    let color = fields.next().ok_or(ParseError::FieldCount)?;
    let intensity = fields.next().unwrap_or_default();
    if fields.any(|extra| !extra.is_empty()) {
        return Err(ParseError::FieldCount);
    }

    Ok(LedCommand {
        targets: parse_leds(leds, pixel_count)?,
        color: parse_color(color)?,
        intensity: parse_intensity(intensity)?,
    })
}

fn parse_leds(field: &str, pixel_count: usize) -> Result<LedSet, ParseError> {
    if field.is_empty() {
        return Err(ParseError::MissingLeds);
    }

    let mut targets = LedSet::empty();
    for digit in field.chars() {
        let led = digit.to_digit(10).ok_or(ParseError::InvalidLed)? as usize;
        if led == 0 || led > pixel_count {
            return Err(ParseError::InvalidLed);
        }
        targets = targets.with(led - 1);
    }

    Ok(targets)
}

fn parse_color(field: &str) -> Result<Option<Color>, ParseError> {
    if field.is_empty() {
        return Ok(None);
    }

    ColorCode::from_short(field)
        .map(|code| Some(code.color()))
        .ok_or(ParseError::UnknownColor)
}

fn parse_intensity(field: &str) -> Result<Option<f32>, ParseError> {
    if field.is_empty() {
        return Ok(None);
    }

    let step = parse_step(field).ok_or(ParseError::InvalidIntensity)?;
    Ok(Some(f32::from(step) / f32::from(MAX_INTENSITY_STEP)))
}

/// One or two ASCII digits with a value of at most [`MAX_INTENSITY_STEP`].
pub(crate) fn parse_step(field: &str) -> Option<u8> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    field
        .parse::<u8>()
        .ok()
        .filter(|&step| step <= MAX_INTENSITY_STEP)
}

/// Accumulates serial bytes into command lines.
///
/// A line ends at `\r` or `\n`. Lines longer than `CAP` bytes, or containing
/// non-ASCII bytes, are dropped whole up to and including their terminator.
#[derive(Debug, Default)]
pub struct LineBuffer<const CAP: usize> {
    line: String<CAP>,
    discarding: bool,
    ready: bool,
}

impl<const CAP: usize> LineBuffer<CAP> {
    pub fn new() -> Self {
        Self {
            line: String::new(),
            discarding: false,
            ready: false,
        }
    }

    /// Appends one byte, returning the finished line when `byte` terminates it.
    ///
    /// Empty lines are skipped. The returned line is cleared on the next push.
    pub fn push(&mut self, byte: u8) -> Option<&str> {
        if self.ready {
            self.line.clear();
            self.ready = false;
        }

        if byte == b'\r' || byte == b'\n' {
            let discarded = core::mem::replace(&mut self.discarding, false);
            if discarded || self.line.is_empty() {
                self.line.clear();
                return None;
            }
            self.ready = true;
            return Some(self.line.as_str());
        }

        if self.discarding {
            return None;
        }

        if !byte.is_ascii() || self.line.push(char::from(byte)).is_err() {
            warn!("discarding serial line: too long or not ascii");
            self.line.clear();
            self.discarding = true;
        }

        None
    }

    /// Bytes buffered for the line in progress.
    pub fn len(&self) -> usize {
        if self.ready { 0 } else { self.line.len() }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::RED;

    #[test]
    fn two_field_segment_leaves_intensity() {
        let cmd = parse_command("4:blk", 4).unwrap();
        assert_eq!(cmd.targets, LedSet::empty().with(3));
        assert_eq!(cmd.intensity, None);
    }

    #[test]
    fn trailing_empty_fields_are_accepted() {
        let cmd = parse_command("1:r::", 4).unwrap();
        assert_eq!(cmd.color, Some(RED));
        assert_eq!(parse_command("1:r::5", 4), Err(ParseError::FieldCount));
    }

    #[test]
    fn single_field_is_rejected() {
        assert_eq!(parse_command("12", 4), Err(ParseError::FieldCount));
        assert_eq!(parse_command("", 4), Err(ParseError::FieldCount));
    }

    #[test]
    fn led_digits_are_range_checked() {
        assert_eq!(parse_command("0:r:", 4), Err(ParseError::InvalidLed));
        assert_eq!(parse_command("5:r:", 4), Err(ParseError::InvalidLed));
        assert_eq!(parse_command("1a:r:", 4), Err(ParseError::InvalidLed));
        assert_eq!(parse_command(":r:", 4), Err(ParseError::MissingLeds));
        assert!(parse_command("5:r:", 8).is_ok());
    }

    #[test]
    fn intensity_steps() {
        assert_eq!(parse_step("0"), Some(0));
        assert_eq!(parse_step("07"), Some(7));
        assert_eq!(parse_step("10"), Some(10));
        assert_eq!(parse_step("11"), None);
        assert_eq!(parse_step("100"), None);
        assert_eq!(parse_step("+5"), None);
        assert_eq!(parse_step("-1"), None);
    }

    #[test]
    fn duplicate_leds_collapse() {
        let cmd = parse_command("2212::3", 4).unwrap();
        assert_eq!(cmd.targets.len(), 2);
        assert!(cmd.targets.iter().eq([0, 1]));
    }

    #[test]
    fn line_buffer_splits_on_terminators() {
        let mut buffer = LineBuffer::<16>::new();
        for &b in b"1:r:" {
            assert_eq!(buffer.push(b), None);
        }
        assert_eq!(buffer.push(b'8'), None);
        assert_eq!(buffer.push(b'\r'), Some("1:r:8"));
        assert_eq!(buffer.push(b'\n'), None);
        assert!(buffer.is_empty());
    }

    #[test]
    fn line_buffer_drops_overlong_lines() {
        let mut buffer = LineBuffer::<4>::new();
        for &b in b"1234:r:" {
            assert_eq!(buffer.push(b), None);
        }
        assert_eq!(buffer.push(b'\r'), None);
        for &b in b"1:g" {
            buffer.push(b);
        }
        assert_eq!(buffer.push(b'\n'), Some("1:g"));
    }
}
