#![forbid(unsafe_code)]

//! Escape-sequence catalogue: pure byte generation for ANSI/VT100/xterm terminals.
//!
//! Every helper either is a `&'static [u8]` constant or has the shape
//! `fn name<W: Write>(w: &mut W, ...) -> io::Result<()>`. Nothing here keeps
//! state or talks to a terminal; the caller owns the sink.
//!
//! # Sequence Reference
//!
//! | Category | Sequence | Module |
//! |----------|----------|--------|
//! | CSI | `ESC [ n m` | [`sgr`], [`color`] |
//! | CSI | `ESC [ row ; col H` | [`cursor`] |
//! | CSI | `ESC [ 6 n` | [`cursor`] |
//! | CSI | `ESC [ n J` / `ESC [ n K` | [`erase`] |
//! | CSI | `ESC [ top ; bottom r` | [`screen`] |
//! | CSI | `ESC [ ? 1049 h/l` | [`screen`] |
//! | OSC | `ESC ] 2 ; title BEL` | [`screen`] |
//! | ESC | `ESC H` / `CSI n g` | [`tabs`] |

use std::io;

pub mod color;
pub mod cursor;
pub mod erase;
pub mod screen;
pub mod sgr;
pub mod tabs;

/// Escape byte (`0x1b`).
pub const ESC: u8 = 0x1b;

/// Control Sequence Introducer as text (`ESC [`).
pub const CSI: &str = "\x1b[";

/// Operating System Command introducer as text (`ESC ]`).
pub const OSC: &str = "\x1b]";

/// Bell, used as the OSC terminator.
pub const BEL: &str = "\x07";

/// Run a writer-style helper against an in-memory buffer and return the text.
///
/// ```
/// use ansikit_codes::{cursor, render};
///
/// assert_eq!(render(|w| cursor::cup(w, 3, 5)), "\x1b[3;5H");
/// ```
#[must_use]
pub fn render<F>(f: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
{
    let mut buf = Vec::new();
    // Writes into a Vec cannot fail.
    let _ = f(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_collects_bytes() {
        assert_eq!(render(|w| io::Write::write_all(w, b"abc")), "abc");
    }

    #[test]
    fn introducers_are_byte_exact() {
        assert_eq!(CSI.as_bytes(), &[ESC, b'[']);
        assert_eq!(OSC.as_bytes(), &[ESC, b']']);
        assert_eq!(BEL.as_bytes(), &[0x07]);
    }
}
