#![forbid(unsafe_code)]

//! Color values, SGR color sequences, and 256-color palette math.

use std::io::{self, Write};

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The sixteen standard ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Ansi16 {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl Ansi16 {
    /// All sixteen colors in index order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// Palette index (0-15).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Look up a color by palette index.
    #[must_use]
    pub fn from_u8(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Human-readable name, as used by the demo screens.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "bright black",
            Self::BrightRed => "bright red",
            Self::BrightGreen => "bright green",
            Self::BrightYellow => "bright yellow",
            Self::BrightBlue => "bright blue",
            Self::BrightMagenta => "bright magenta",
            Self::BrightCyan => "bright cyan",
            Self::BrightWhite => "bright white",
        }
    }
}

/// A color at any fidelity the catalogue can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default color (SGR 39 / 49).
    #[default]
    Default,
    /// One of the sixteen standard colors.
    Ansi16(Ansi16),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit color.
    Rgb(Rgb),
}

impl Color {
    /// Create a true-color value.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// Resolve to RGB using the xterm default palette.
    ///
    /// `Default` has no fixed value and resolves to `None`.
    #[must_use]
    pub fn to_rgb(self) -> Option<Rgb> {
        match self {
            Self::Default => None,
            Self::Ansi16(color) => Some(ANSI16_PALETTE[color.as_u8() as usize]),
            Self::Indexed(index) => Some(ansi256_to_rgb(index)),
            Self::Rgb(rgb) => Some(rgb),
        }
    }
}

impl From<Ansi16> for Color {
    fn from(color: Ansi16) -> Self {
        Self::Ansi16(color)
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

// =============================================================================
// SGR color sequences
// =============================================================================

/// Default foreground: `CSI 39 m`
pub const FG_DEFAULT: &[u8] = b"\x1b[39m";

/// Default background: `CSI 49 m`
pub const BG_DEFAULT: &[u8] = b"\x1b[49m";

/// Write the foreground sequence for `color`.
///
/// 30-37 / 90-97 for the sixteen colors, `38;5;n` for indexed,
/// `38;2;r;g;b` for RGB.
pub fn fg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(FG_DEFAULT),
        Color::Ansi16(c) => {
            let index = c.as_u8();
            let code = if index < 8 { 30 + index } else { 90 + index - 8 };
            write!(w, "\x1b[{code}m")
        }
        Color::Indexed(index) => write!(w, "\x1b[38;5;{index}m"),
        Color::Rgb(Rgb { r, g, b }) => write!(w, "\x1b[38;2;{r};{g};{b}m"),
    }
}

/// Write the background sequence for `color`.
///
/// 40-47 / 100-107 for the sixteen colors, `48;5;n` for indexed,
/// `48;2;r;g;b` for RGB.
pub fn bg<W: Write>(w: &mut W, color: Color) -> io::Result<()> {
    match color {
        Color::Default => w.write_all(BG_DEFAULT),
        Color::Ansi16(c) => {
            let index = c.as_u8();
            let code = if index < 8 { 40 + index } else { 100 + index - 8 };
            write!(w, "\x1b[{code}m")
        }
        Color::Indexed(index) => write!(w, "\x1b[48;5;{index}m"),
        Color::Rgb(Rgb { r, g, b }) => write!(w, "\x1b[48;2;{r};{g};{b}m"),
    }
}

/// Write default foreground.
#[inline]
pub fn fg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(FG_DEFAULT)
}

/// Write default background.
#[inline]
pub fn bg_default<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(BG_DEFAULT)
}

// =============================================================================
// 256-color palette
// =============================================================================

/// First index of the 6x6x6 color cube.
pub const CUBE_START: u8 = 16;

/// First index of the 24-step grayscale ramp.
pub const GRAYSCALE_START: u8 = 232;

/// Channel levels of the color cube.
pub const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const ANSI16_PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(229, 229, 229),
    Rgb::new(127, 127, 127),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(92, 92, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Palette index of a cube cell; each coordinate is clamped to 0..=5.
#[must_use]
pub fn cube_index(r: u8, g: u8, b: u8) -> u8 {
    CUBE_START + 36 * r.min(5) + 6 * g.min(5) + b.min(5)
}

/// Palette index of a grayscale step; `level` is clamped to 0..=23.
#[must_use]
pub fn grayscale_index(level: u8) -> u8 {
    GRAYSCALE_START + level.min(23)
}

/// Convert a 256-color index to RGB.
#[must_use]
pub fn ansi256_to_rgb(index: u8) -> Rgb {
    if index < CUBE_START {
        return ANSI16_PALETTE[index as usize];
    }
    if index >= GRAYSCALE_START {
        let gray = 8 + 10 * (index - GRAYSCALE_START);
        return Rgb::new(gray, gray, gray);
    }
    let idx = index - CUBE_START;
    let r = idx / 36;
    let g = (idx / 6) % 6;
    let b = idx % 6;
    Rgb::new(
        CUBE_LEVELS[r as usize],
        CUBE_LEVELS[g as usize],
        CUBE_LEVELS[b as usize],
    )
}

/// Nearest 256-color index for an RGB value (cube or grayscale ramp).
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return CUBE_START;
        }
        if r > 248 {
            return 231;
        }
        return GRAYSCALE_START + ((r - 8) / 10).min(23);
    }
    cube_index(level_index(r), level_index(g), level_index(b))
}

// Midpoints between the uneven cube levels: 48, 115, 155, 195, 235.
fn level_index(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}
