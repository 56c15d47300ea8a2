//! Host CLI arguments and the serial write.

use crate::config::{DEFAULT_BAUD, DEFAULT_DEVICE};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: trinkeyctl [--baud BAUD] [--device DEVICE] COMMAND...

Control the LEDs of a 4-pixel touch device over its serial port.

commands:
  COLOR               set every LED to COLOR, e.g. \"red\" or \"off\"
  LEDS:FIELD[,FIELD]  LEDS is digits 1-4 or \"all\"; each FIELD is a color
                      or an intensity 0-10, e.g. \"13:red,5\" or \"24:10\"

Commands are applied in order: \"black 12:red,10\" clears every LED and then
sets LEDs 1 and 2 to red at full intensity.

options:
  --baud BAUD         baud rate (default 115200); accepted for
                      compatibility, the USB CDC-ACM port ignores it
  --device DEVICE     serial device (default /dev/ttyACM0)
  -h, --help          show this help";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostArgs {
    pub baud: u32,
    pub device: PathBuf,
    pub commands: Vec<String>,
}

/// What to do after parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Run(HostArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A flag was given without its value.
    MissingValue(&'static str),

    /// `--baud` is not a positive integer.
    InvalidBaud(String),

    /// An unrecognized `--flag`.
    UnknownFlag(String),

    /// No command tokens.
    NoCommands,
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::MissingValue(flag) => write!(f, "{} needs a value", flag),
            ArgError::InvalidBaud(value) => write!(f, "invalid baud rate \"{}\"", value),
            ArgError::UnknownFlag(flag) => write!(f, "unknown option \"{}\"", flag),
            ArgError::NoCommands => write!(f, "at least one command is required"),
        }
    }
}

impl std::error::Error for ArgError {}

impl HostArgs {
    /// Parses arguments, not including the program name.
    pub fn parse<I, S>(args: I) -> Result<Invocation, ArgError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut baud = DEFAULT_BAUD;
        let mut device = PathBuf::from(DEFAULT_DEVICE);
        let mut commands = Vec::new();

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag.to_owned(), Some(value.to_owned())),
                _ => (arg.clone(), None),
            };

            match flag.as_str() {
                "-h" | "--help" => return Ok(Invocation::Help),
                "--baud" => {
                    let value = inline
                        .or_else(|| args.next())
                        .ok_or(ArgError::MissingValue("--baud"))?;
                    baud = value
                        .parse()
                        .ok()
                        .filter(|&baud| baud > 0)
                        .ok_or(ArgError::InvalidBaud(value))?;
                }
                "--device" => {
                    let value = inline
                        .or_else(|| args.next())
                        .ok_or(ArgError::MissingValue("--device"))?;
                    device = PathBuf::from(value);
                }
                "--" => commands.extend(args.by_ref()),
                _ if flag.starts_with("--") => return Err(ArgError::UnknownFlag(flag)),
                _ => commands.push(arg),
            }
        }

        if commands.is_empty() {
            return Err(ArgError::NoCommands);
        }

        Ok(Invocation::Run(HostArgs {
            baud,
            device,
            commands,
        }))
    }
}

/// Writes `line` followed by a carriage return to the serial device.
///
/// The device enumerates as a USB CDC-ACM port, which ignores the line
/// rate, so `baud` is only reported.
pub fn send_line(device: &std::path::Path, baud: u32, line: &str) -> std::io::Result<()> {
    let mut port = OpenOptions::new().write(true).open(device)?;
    port.write_all(format!("{}\r", line).as_bytes())?;
    port.flush()?;
    info!("sent {} bytes at {} baud", line.len() + 1, baud);
    Ok(())
}
