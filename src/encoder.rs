//! Host-side command encoder.
//!
//! Turns operator tokens such as `red`, `13:red,5` or `all:off` into one
//! protocol line. Encoding is all-or-nothing: the first bad token aborts the
//! whole call and no line is produced.

use crate::color::ColorCode;
use strum::VariantArray;
use crate::config::{NUM_PIXELS, SERIAL_LINE_CAPACITY};
use crate::protocol::MAX_INTENSITY_STEP;

/// What was wrong with a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// Not a color name and not of the form `leds:fields`.
    Malformed,

    /// An LED is not a number from 1 to the pixel count.
    InvalidLed,

    /// A field is empty.
    MissingField,

    /// A numeric field is above 10.
    InvalidIntensity,

    /// A field is neither numeric nor a known color name.
    UnknownColor,

    /// No tokens were given.
    Empty,

    /// The encoded line does not fit the device's line buffer.
    TooLong,
}

/// A rejected token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    pub token: String,
    pub kind: EncodeErrorKind,
}

impl EncodeError {
    fn new(token: &str, kind: EncodeErrorKind) -> Self {
        Self {
            token: token.to_owned(),
            kind,
        }
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == EncodeErrorKind::Empty {
            write!(f, "no commands given")?;
        } else if self.kind == EncodeErrorKind::TooLong {
            write!(
                f,
                "encoded line is {} bytes, the device accepts at most {}; send fewer commands",
                self.token.len(),
                SERIAL_LINE_CAPACITY
            )?;
        } else {
            write!(f, "error with command \"{}\": ", self.token)?;
            match self.kind {
                EncodeErrorKind::Malformed => {
                    write!(f, "expected a color or leds:color,intensity")?
                }
                EncodeErrorKind::InvalidLed => {
                    write!(f, "led must be a number from 1-{} or \"all\"", NUM_PIXELS)?
                }
                EncodeErrorKind::MissingField => write!(f, "specify a color, intensity or both")?,
                EncodeErrorKind::InvalidIntensity => {
                    write!(f, "intensity must be between 0 and 10")?
                }
                EncodeErrorKind::UnknownColor => {
                    write!(f, "specify a color and/or intensity value")?
                }
                EncodeErrorKind::Empty | EncodeErrorKind::TooLong => {}
            }
        }
        write!(f, "\nvalid colors are: {}", color_names().join(", "))
    }
}

impl std::error::Error for EncodeError {}

/// Every accepted color name, sorted, including the `off` alias.
pub fn color_names() -> Vec<&'static str> {
    let mut names: Vec<_> = ColorCode::VARIANTS.iter().map(|c| c.name()).collect();
    names.push("off");
    names.sort_unstable();
    names
}

/// Encodes `tokens` into one comma-joined protocol line.
///
/// Fails with [`EncodeErrorKind::TooLong`] if the line would not fit
/// [`SERIAL_LINE_CAPACITY`].
///
/// Later tokens are applied after earlier ones on the device, so
/// `["black", "12:red,10"]` clears everything and then lights LEDs 1 and 2.
pub fn encode<S: AsRef<str>>(tokens: &[S]) -> Result<String, EncodeError> {
    if tokens.is_empty() {
        return Err(EncodeError::new("", EncodeErrorKind::Empty));
    }

    let segments = tokens
        .iter()
        .map(|token| encode_token(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let line = segments.join(",");
    if line.len() > SERIAL_LINE_CAPACITY {
        return Err(EncodeError {
            token: line,
            kind: EncodeErrorKind::TooLong,
        });
    }

    Ok(line)
}

/// Encodes a single token into one protocol segment.
pub fn encode_token(token: &str) -> Result<String, EncodeError> {
    if let Some(code) = ColorCode::from_name(token) {
        return Ok(format!("{}:{}:", all_leds(), code.short()));
    }

    let (leds, fields) = token
        .split_once(':')
        .filter(|(_, fields)| !fields.contains(':'))
        .ok_or_else(|| EncodeError::new(token, EncodeErrorKind::Malformed))?;

    let leds = encode_leds(token, leds)?;

    let mut color = "";
    let mut intensity = None;
    for field in fields.split(',') {
        if field.is_empty() {
            return Err(EncodeError::new(token, EncodeErrorKind::MissingField));
        }

        if field.bytes().all(|b| b.is_ascii_digit()) {
            let step = field
                .parse::<u32>()
                .ok()
                .filter(|&step| step <= u32::from(MAX_INTENSITY_STEP))
                .ok_or_else(|| EncodeError::new(token, EncodeErrorKind::InvalidIntensity))?;
            intensity = Some(step);
        } else if let Some(code) = ColorCode::from_name(field) {
            color = code.short();
        } else {
            return Err(EncodeError::new(token, EncodeErrorKind::UnknownColor));
        }
    }

    let intensity = intensity.map(|step| step.to_string()).unwrap_or_default();
    Ok(format!("{}:{}:{}", leds, color, intensity))
}

fn all_leds() -> String {
    (1..=NUM_PIXELS).map(|led| led.to_string()).collect()
}

fn encode_leds(token: &str, leds: &str) -> Result<String, EncodeError> {
    if leds == "all" {
        return Ok(all_leds());
    }

    let valid = !leds.is_empty()
        && leds
            .chars()
            .all(|c| c.to_digit(10).is_some_and(|led| (1..=NUM_PIXELS as u32).contains(&led)));

    if valid {
        Ok(leds.to_owned())
    } else {
        Err(EncodeError::new(token, EncodeErrorKind::InvalidLed))
    }
}
