#![forbid(unsafe_code)]

//! Cursor motion, visibility, shape, and the cursor-position request.
//!
//! Coordinates are 1-based, as on the wire. They are passed through without
//! validation; terminals clamp out-of-range values themselves.

use std::io::{self, Write};

/// Cursor position request (DSR 6): `CSI 6 n`
///
/// The terminal answers with `CSI row ; col R`.
pub const REQUEST_POSITION: &[u8] = b"\x1b[6n";

/// Cursor home: `CSI H`
pub const HOME: &[u8] = b"\x1b[H";

/// DEC cursor save: `ESC 7` (DECSC)
pub const SAVE: &[u8] = b"\x1b7";

/// DEC cursor restore: `ESC 8` (DECRC)
pub const RESTORE: &[u8] = b"\x1b8";

/// SCO cursor save: `CSI s`
pub const SCO_SAVE: &[u8] = b"\x1b[s";

/// SCO cursor restore: `CSI u`
pub const SCO_RESTORE: &[u8] = b"\x1b[u";

/// Hide cursor: `CSI ? 25 l`
pub const HIDE: &[u8] = b"\x1b[?25l";

/// Show cursor: `CSI ? 25 h`
pub const SHOW: &[u8] = b"\x1b[?25h";

/// Start cursor blinking: `CSI ? 12 h`
pub const BLINK_ON: &[u8] = b"\x1b[?12h";

/// Stop cursor blinking: `CSI ? 12 l`
pub const BLINK_OFF: &[u8] = b"\x1b[?12l";

/// CUP (Cursor Position): `CSI row ; col H`
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{row};{col}H")
}

/// CHA (Cursor Horizontal Absolute): `CSI col G`
pub fn cha<W: Write>(w: &mut W, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{col}G")
}

/// VPA (Vertical Position Absolute): `CSI row d`
pub fn vpa<W: Write>(w: &mut W, row: u16) -> io::Result<()> {
    write!(w, "\x1b[{row}d")
}

// Relative motions share one shape: nothing for 0, the short form for 1.
fn relative<W: Write>(w: &mut W, n: u16, final_byte: char) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => write!(w, "\x1b[{final_byte}"),
        _ => write!(w, "\x1b[{n}{final_byte}"),
    }
}

/// CUU (Cursor Up): `CSI n A`
pub fn cuu<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    relative(w, n, 'A')
}

/// CUD (Cursor Down): `CSI n B`
pub fn cud<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    relative(w, n, 'B')
}

/// CUF (Cursor Forward): `CSI n C`
pub fn cuf<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    relative(w, n, 'C')
}

/// CUB (Cursor Back): `CSI n D`
pub fn cub<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    relative(w, n, 'D')
}

/// CNL (Cursor Next Line): `CSI n E`
pub fn cnl<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    relative(w, n, 'E')
}

/// CPL (Cursor Previous Line): `CSI n F`
pub fn cpl<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    relative(w, n, 'F')
}

/// Cursor shapes selectable with DECSCUSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// Terminal default (0).
    #[default]
    Default,
    /// Blinking block (1).
    BlinkingBlock,
    /// Steady block (2).
    SteadyBlock,
    /// Blinking underline (3).
    BlinkingUnderline,
    /// Steady underline (4).
    SteadyUnderline,
    /// Blinking bar (5).
    BlinkingBar,
    /// Steady bar (6).
    SteadyBar,
}

impl CursorShape {
    /// All shapes in parameter order.
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::BlinkingBlock,
        Self::SteadyBlock,
        Self::BlinkingUnderline,
        Self::SteadyUnderline,
        Self::BlinkingBar,
        Self::SteadyBar,
    ];

    /// DECSCUSR parameter.
    #[must_use]
    pub const fn param(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::BlinkingBlock => 1,
            Self::SteadyBlock => 2,
            Self::BlinkingUnderline => 3,
            Self::SteadyUnderline => 4,
            Self::BlinkingBar => 5,
            Self::SteadyBar => 6,
        }
    }

    /// Short label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::BlinkingBlock => "blinking block",
            Self::SteadyBlock => "steady block",
            Self::BlinkingUnderline => "blinking underline",
            Self::SteadyUnderline => "steady underline",
            Self::BlinkingBar => "blinking bar",
            Self::SteadyBar => "steady bar",
        }
    }
}

/// DECSCUSR (Set Cursor Style): `CSI n SP q`
pub fn set_shape<W: Write>(w: &mut W, shape: CursorShape) -> io::Result<()> {
    write!(w, "\x1b[{} q", shape.param())
}

/// Write the cursor position request.
#[inline]
pub fn request_position<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(REQUEST_POSITION)
}

/// Write cursor save (DECSC).
#[inline]
pub fn save<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SAVE)
}

/// Write cursor restore (DECRC).
#[inline]
pub fn restore<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(RESTORE)
}

/// Write hide cursor.
#[inline]
pub fn hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(HIDE)
}

/// Write show cursor.
#[inline]
pub fn show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SHOW)
}
