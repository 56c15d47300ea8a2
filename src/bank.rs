//! Persistent per-LED state on the device.
//!
//! An [`LedBank`] remembers a base color and an intensity for every pixel.
//! [`LedCommand`]s update either or both; rendering combines them with
//! [`scale`] and hands the result to a `smart_leds` driver.

use crate::color::{BLACK, Color, scale, to_rgb8};
use crate::protocol::{LedCommand, parse_line};
use smart_leds::{RGB8, SmartLedsWrite, brightness};

/// Colors and intensities for `N` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LedBank<const N: usize> {
    colors: [Color; N],
    intensities: [f32; N],
}

impl<const N: usize> LedBank<N> {
    /// All pixels black at zero intensity.
    pub fn new() -> Self {
        Self::with_intensity(0.0)
    }

    /// All pixels black at `intensity`.
    pub fn with_intensity(intensity: f32) -> Self {
        Self {
            colors: [BLACK; N],
            intensities: [intensity; N],
        }
    }

    /// Applies one command. Targets beyond `N` are ignored.
    pub fn apply(&mut self, command: &LedCommand) {
        for led in command.targets.iter().filter(|&led| led < N) {
            if let Some(color) = command.color {
                self.colors[led] = color;
            }
            if let Some(intensity) = command.intensity {
                self.intensities[led] = intensity;
            }
        }
    }

    /// Parses `line` and applies its valid segments in order.
    ///
    /// Malformed segments are logged and skipped. Returns how many segments
    /// were applied.
    pub fn apply_line(&mut self, line: &str) -> usize {
        let mut applied = 0;

        for (index, result) in parse_line(line, N).enumerate() {
            match result {
                Ok(command) => {
                    self.apply(&command);
                    applied += 1;
                }
                Err(err) => {
                    warn!("dropping segment {}: {}", index, err);
                }
            }
        }

        applied
    }

    /// Sets every pixel to `color` at `intensity`.
    pub fn fill(&mut self, color: Color, intensity: f32) {
        self.colors = [color; N];
        self.intensities = [intensity; N];
    }

    pub fn set(&mut self, led: usize, color: Color, intensity: f32) {
        if led < N {
            self.colors[led] = color;
            self.intensities[led] = intensity;
        }
    }

    pub fn color(&self, led: usize) -> Option<Color> {
        self.colors.get(led).copied()
    }

    pub fn intensity(&self, led: usize) -> Option<f32> {
        self.intensities.get(led).copied()
    }

    pub fn colors(&self) -> &[Color; N] {
        &self.colors
    }

    /// Displayed color of each pixel: base color scaled by its intensity.
    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.colors
            .iter()
            .zip(self.intensities.iter())
            .map(|(&color, &intensity)| scale(color, intensity))
    }

    /// Writes the bank to an LED bus at global `level` (0-255).
    ///
    /// A failed write is logged and dropped; the next show retries from the
    /// bank, which is unaffected.
    pub fn show<W>(&self, bus: &mut W, level: u8) -> bool
    where
        W: SmartLedsWrite<Color = RGB8>,
    {
        match bus.write(brightness(self.pixels().map(to_rgb8), level)) {
            Ok(()) => true,
            Err(_) => {
                warn!("led bus write failed");
                false
            }
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> Default for LedBank<N> {
    fn default() -> Self {
        Self::new()
    }
}
