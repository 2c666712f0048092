#![forbid(unsafe_code)]

//! Tab stop control.

use std::io::{self, Write};

/// HTS (Horizontal Tab Set) at the cursor column: `ESC H`
pub const SET_TAB_STOP: &[u8] = b"\x1bH";

/// TBC 0, clear the tab stop at the cursor column: `CSI 0 g`
pub const CLEAR_TAB_STOP: &[u8] = b"\x1b[0g";

/// TBC 3, clear all tab stops: `CSI 3 g`
pub const CLEAR_ALL_TAB_STOPS: &[u8] = b"\x1b[3g";

/// CHT (Cursor Horizontal Tab) forward `n` stops: `CSI n I`
pub fn tab_forward<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}I")
}

/// CBT (Cursor Backward Tab) back `n` stops: `CSI n Z`
pub fn tab_backward<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}Z")
}
