#![forbid(unsafe_code)]

//! Screen-level control: alternate buffer, scrolling margins, window
//! title and size, column mode, resets.

use std::io::{self, Write};

// =============================================================================
// Alternate buffer
// =============================================================================

/// Enter alternate buffer with cursor save: `CSI ? 1049 h`
pub const ALT_BUFFER_ENTER: &[u8] = b"\x1b[?1049h";

/// Leave alternate buffer and restore cursor: `CSI ? 1049 l`
pub const ALT_BUFFER_LEAVE: &[u8] = b"\x1b[?1049l";

/// Legacy alternate buffer switch: `CSI ? 47 h`
pub const ALT_BUFFER_ENTER_LEGACY: &[u8] = b"\x1b[?47h";

/// Legacy alternate buffer restore: `CSI ? 47 l`
pub const ALT_BUFFER_LEAVE_LEGACY: &[u8] = b"\x1b[?47l";

/// Write alternate buffer enter.
#[inline]
pub fn alt_buffer_enter<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_BUFFER_ENTER)
}

/// Write alternate buffer leave.
#[inline]
pub fn alt_buffer_leave<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_BUFFER_LEAVE)
}

// =============================================================================
// Scrolling
// =============================================================================

/// Reset scrolling margins to the full screen: `CSI r`
pub const RESET_SCROLL_REGION: &[u8] = b"\x1b[r";

/// Index (move down, scrolling at the bottom margin): `ESC D`
pub const INDEX: &[u8] = b"\x1bD";

/// Reverse index (move up, scrolling at the top margin): `ESC M`
pub const REVERSE_INDEX: &[u8] = b"\x1bM";

/// DECSTBM (Set Top and Bottom Margins): `CSI top ; bottom r`
///
/// Lines are 1-based and inclusive.
pub fn set_scroll_region<W: Write>(w: &mut W, top: u16, bottom: u16) -> io::Result<()> {
    write!(w, "\x1b[{top};{bottom}r")
}

/// Write reset scroll region.
#[inline]
pub fn reset_scroll_region<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(RESET_SCROLL_REGION)
}

/// SU (Scroll Up): `CSI n S`
pub fn scroll_up<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}S")
}

/// SD (Scroll Down): `CSI n T`
pub fn scroll_down<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}T")
}

// =============================================================================
// Window (OSC and xterm window ops)
// =============================================================================

/// Set window title: `OSC 2 ; title BEL`
///
/// Control characters in `title` are dropped so the text cannot terminate
/// the sequence early.
pub fn set_window_title<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    write!(w, "\x1b]2;{}\x07", sanitize_osc(title))
}

/// Set icon name and window title: `OSC 0 ; title BEL`
pub fn set_icon_and_title<W: Write>(w: &mut W, title: &str) -> io::Result<()> {
    write!(w, "\x1b]0;{}\x07", sanitize_osc(title))
}

fn sanitize_osc(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Resize the window in character cells: `CSI 8 ; rows ; cols t`
pub fn resize_window<W: Write>(w: &mut W, rows: u16, cols: u16) -> io::Result<()> {
    write!(w, "\x1b[8;{rows};{cols}t")
}

/// DECCOLM 132-column mode: `CSI ? 3 h`
pub const COLUMNS_132: &[u8] = b"\x1b[?3h";

/// DECCOLM 80-column mode: `CSI ? 3 l`
pub const COLUMNS_80: &[u8] = b"\x1b[?3l";

// =============================================================================
// Resets
// =============================================================================

/// RIS (full reset): `ESC c`
pub const FULL_RESET: &[u8] = b"\x1bc";

/// DECSTR (soft reset): `CSI ! p`
pub const SOFT_RESET: &[u8] = b"\x1b[!p";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    #[test]
    fn alt_buffer_bytes() {
        assert_eq!(render(alt_buffer_enter), "\x1b[?1049h");
        assert_eq!(render(alt_buffer_leave), "\x1b[?1049l");
    }

    #[test]
    fn scroll_region_bytes() {
        assert_eq!(render(|w| set_scroll_region(w, 5, 20)), "\x1b[5;20r");
        assert_eq!(render(reset_scroll_region), "\x1b[r");
    }

    #[test]
    fn scroll_counts() {
        assert_eq!(render(|w| scroll_up(w, 3)), "\x1b[3S");
        assert_eq!(render(|w| scroll_down(w, 1)), "\x1b[1T");
        assert_eq!(render(|w| scroll_up(w, 0)), "");
        assert_eq!(render(|w| scroll_down(w, 0)), "");
    }

    #[test]
    fn window_title_is_osc_2() {
        assert_eq!(render(|w| set_window_title(w, "demo")), "\x1b]2;demo\x07");
        assert_eq!(render(|w| set_icon_and_title(w, "x")), "\x1b]0;x\x07");
    }

    #[test]
    fn window_title_drops_control_chars() {
        assert_eq!(
            render(|w| set_window_title(w, "a\x07b\x1bc")),
            "\x1b]2;abc\x07"
        );
    }

    #[test]
    fn resize_window_bytes() {
        assert_eq!(render(|w| resize_window(w, 24, 80)), "\x1b[8;24;80t");
    }
}
