//! Colors, the protocol color alphabet and intensity scaling.
//!
//! Colors are 8-bit sRGB triples (`palette::Srgb<u8>`). Intensity is a scalar
//! in `0.0..=1.0` applied uniformly to every channel by [`scale`].

use palette::Srgb;
use smart_leds::RGB8;
use strum::{EnumProperty, EnumString, IntoStaticStr, VariantArray};

/// An 8-bit RGB color.
pub type Color = Srgb<u8>;

pub const RED: Color = Srgb::new(255, 0, 0);
pub const YELLOW: Color = Srgb::new(255, 150, 0);
pub const ORANGE: Color = Srgb::new(255, 40, 0);
pub const GREEN: Color = Srgb::new(0, 255, 0);
pub const TEAL: Color = Srgb::new(0, 255, 120);
pub const CYAN: Color = Srgb::new(0, 255, 255);
pub const BLUE: Color = Srgb::new(0, 0, 255);
pub const PURPLE: Color = Srgb::new(180, 0, 255);
pub const MAGENTA: Color = Srgb::new(255, 0, 20);
pub const WHITE: Color = Srgb::new(255, 255, 255);
pub const BLACK: Color = Srgb::new(0, 0, 0);
pub const GOLD: Color = Srgb::new(255, 222, 30);
pub const PINK: Color = Srgb::new(242, 90, 255);
pub const AQUA: Color = Srgb::new(50, 255, 255);
pub const JADE: Color = Srgb::new(0, 255, 40);
pub const AMBER: Color = Srgb::new(255, 100, 0);
pub const OLD_LACE: Color = Srgb::new(253, 245, 230);

/// Scales every channel of `color` by `intensity`, truncating toward zero.
///
/// `intensity` is clamped to `0.0..=1.0` first, so `scale(c, 0.0)` is black
/// and `scale(c, 1.0)` is `c`.
pub fn scale(color: Color, intensity: f32) -> Color {
    let intensity = intensity.clamp(0.0, 1.0);
    let channel = |value: u8| (f32::from(value) * intensity) as u8;

    Srgb::new(
        channel(color.red),
        channel(color.green),
        channel(color.blue),
    )
}

/// Position on a red → green → blue → red color wheel.
pub fn colorwheel(pos: u8) -> Color {
    match pos {
        0..=84 => Srgb::new(255 - pos * 3, pos * 3, 0),
        85..=169 => {
            let pos = pos - 85;
            Srgb::new(0, 255 - pos * 3, pos * 3)
        }
        _ => {
            let pos = pos - 170;
            Srgb::new(pos * 3, 0, 255 - pos * 3)
        }
    }
}

/// Converts a color to the pixel type LED bus drivers consume.
#[inline]
pub fn to_rgb8(color: Color) -> RGB8 {
    RGB8 {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

/// The closed color alphabet shared by the device protocol and the host CLI.
///
/// Each code has a case-sensitive short form used on the wire and a long
/// name typed by the host operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, VariantArray, EnumString, IntoStaticStr, EnumProperty,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorCode {
    #[strum(serialize = "r", props(name = "red"))]
    Red,
    #[strum(serialize = "y", props(name = "yellow"))]
    Yellow,
    #[strum(serialize = "o", props(name = "orange"))]
    Orange,
    #[strum(serialize = "g", props(name = "green"))]
    Green,
    #[strum(serialize = "t", props(name = "teal"))]
    Teal,
    #[strum(serialize = "c", props(name = "cyan"))]
    Cyan,
    #[strum(serialize = "b", props(name = "blue"))]
    Blue,
    #[strum(serialize = "p", props(name = "purple"))]
    Purple,
    #[strum(serialize = "m", props(name = "magenta"))]
    Magenta,
    #[strum(serialize = "w", props(name = "white"))]
    White,
    #[strum(serialize = "blk", props(name = "black"))]
    Black,
    #[strum(serialize = "au", props(name = "gold"))]
    Gold,
    #[strum(serialize = "pk", props(name = "pink"))]
    Pink,
    #[strum(serialize = "h2o", props(name = "aqua"))]
    Aqua,
    #[strum(serialize = "j", props(name = "jade"))]
    Jade,
    #[strum(serialize = "a", props(name = "amber"))]
    Amber,
    #[strum(serialize = "ol", props(name = "oldlace"))]
    OldLace,
}

impl ColorCode {
    /// Short code sent over the serial line.
    pub fn short(self) -> &'static str {
        self.into()
    }

    /// Long name accepted by the host CLI.
    pub fn name(self) -> &'static str {
        self.get_str("name").unwrap_or_default()
    }

    pub fn color(self) -> Color {
        match self {
            ColorCode::Red => RED,
            ColorCode::Yellow => YELLOW,
            ColorCode::Orange => ORANGE,
            ColorCode::Green => GREEN,
            ColorCode::Teal => TEAL,
            ColorCode::Cyan => CYAN,
            ColorCode::Blue => BLUE,
            ColorCode::Purple => PURPLE,
            ColorCode::Magenta => MAGENTA,
            ColorCode::White => WHITE,
            ColorCode::Black => BLACK,
            ColorCode::Gold => GOLD,
            ColorCode::Pink => PINK,
            ColorCode::Aqua => AQUA,
            ColorCode::Jade => JADE,
            ColorCode::Amber => AMBER,
            ColorCode::OldLace => OLD_LACE,
        }
    }

    /// Looks up a wire short code.
    pub fn from_short(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// Looks up a host long name. `off` is an alias for black.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "off" {
            return Some(ColorCode::Black);
        }
        Self::VARIANTS.iter().copied().find(|c| c.name() == name)
    }
}
