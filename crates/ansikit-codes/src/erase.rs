#![forbid(unsafe_code)]

//! Erase, insert, and delete sequences.

use std::io::{self, Write};

/// Region cleared by [`erase_display`]; the discriminant is the ED parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseDisplayMode {
    /// Cursor position through the bottom-right cell.
    ToEnd = 0,
    /// Top-left cell through the cursor position.
    ToStart = 1,
    /// Every visible cell.
    All = 2,
    /// Saved lines above the screen. Not every terminal honors it.
    Scrollback = 3,
}

/// Clear part of the screen with `CSI Ps J`. Mode 0 is sent without a parameter.
pub fn erase_display<W: Write>(w: &mut W, mode: EraseDisplayMode) -> io::Result<()> {
    write_erase(w, mode as u8, b'J')
}

/// Region cleared by [`erase_line`]; the discriminant is the EL parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseLineMode {
    /// Cursor position through the last column.
    ToEnd = 0,
    /// First column through the cursor position.
    ToStart = 1,
    /// The whole cursor row.
    All = 2,
}

/// Clear part of the cursor row with `CSI Ps K`. Mode 0 is sent without a parameter.
pub fn erase_line<W: Write>(w: &mut W, mode: EraseLineMode) -> io::Result<()> {
    write_erase(w, mode as u8, b'K')
}

fn write_erase<W: Write>(w: &mut W, param: u8, final_byte: u8) -> io::Result<()> {
    match param {
        0 => w.write_all(&[0x1b, b'[', final_byte]),
        n => w.write_all(&[0x1b, b'[', b'0' + n, final_byte]),
    }
}

/// ECH (Erase Character): `CSI n X`
pub fn erase_chars<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}X")
}

/// ICH (Insert Character): `CSI n @`
pub fn insert_chars<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}@")
}

/// DCH (Delete Character): `CSI n P`
pub fn delete_chars<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}P")
}

/// IL (Insert Line): `CSI n L`
pub fn insert_lines<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}L")
}

/// DL (Delete Line): `CSI n M`
pub fn delete_lines<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}M")
}
