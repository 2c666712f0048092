#![forbid(unsafe_code)]

//! SGR (Select Graphic Rendition) attribute sequences.
//!
//! Each attribute has an "on" code and a matching "off" code. Bold and dim
//! share the off code 22, so turning one off turns both off.

use std::io::{self, Write};

use bitflags::bitflags;

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// On/off code pair for one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SgrCodes {
    /// Enable code.
    pub on: u8,
    /// Disable code.
    pub off: u8,
}

/// Bold (1 / 22).
pub const SGR_BOLD: SgrCodes = SgrCodes { on: 1, off: 22 };
/// Dim (2 / 22).
pub const SGR_DIM: SgrCodes = SgrCodes { on: 2, off: 22 };
/// Italic (3 / 23).
pub const SGR_ITALIC: SgrCodes = SgrCodes { on: 3, off: 23 };
/// Underline (4 / 24).
pub const SGR_UNDERLINE: SgrCodes = SgrCodes { on: 4, off: 24 };
/// Blink (5 / 25).
pub const SGR_BLINK: SgrCodes = SgrCodes { on: 5, off: 25 };
/// Reverse video (7 / 27).
pub const SGR_REVERSE: SgrCodes = SgrCodes { on: 7, off: 27 };
/// Hidden (8 / 28).
pub const SGR_HIDDEN: SgrCodes = SgrCodes { on: 8, off: 28 };
/// Strikethrough (9 / 29).
pub const SGR_STRIKETHROUGH: SgrCodes = SgrCodes { on: 9, off: 29 };

bitflags! {
    /// Set of text attributes that can be emitted in one SGR sequence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const BOLD = 0b0000_0001;
        const DIM = 0b0000_0010;
        const ITALIC = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const BLINK = 0b0001_0000;
        const REVERSE = 0b0010_0000;
        const HIDDEN = 0b0100_0000;
        const STRIKETHROUGH = 0b1000_0000;
    }
}

/// Ordered table of (attribute, codes) used for emission.
pub const ATTRIBUTE_TABLE: [(Attributes, SgrCodes); 8] = [
    (Attributes::BOLD, SGR_BOLD),
    (Attributes::DIM, SGR_DIM),
    (Attributes::ITALIC, SGR_ITALIC),
    (Attributes::UNDERLINE, SGR_UNDERLINE),
    (Attributes::BLINK, SGR_BLINK),
    (Attributes::REVERSE, SGR_REVERSE),
    (Attributes::HIDDEN, SGR_HIDDEN),
    (Attributes::STRIKETHROUGH, SGR_STRIKETHROUGH),
];

/// Codes for a single attribute flag, `None` for empty or combined sets.
#[must_use]
pub fn codes_for(attr: Attributes) -> Option<SgrCodes> {
    ATTRIBUTE_TABLE
        .iter()
        .find(|(flag, _)| *flag == attr)
        .map(|(_, codes)| *codes)
}

/// Write `CSI n m` for a single numeric code.
pub fn sgr_code<W: Write>(w: &mut W, code: u8) -> io::Result<()> {
    write!(w, "\x1b[{code}m")
}

/// Write one SGR sequence enabling every attribute in `attrs`.
///
/// Emits nothing for an empty set.
pub fn sgr_on<W: Write>(w: &mut W, attrs: Attributes) -> io::Result<()> {
    write_joined(w, attrs, |codes| codes.on)
}

/// Write one SGR sequence disabling every attribute in `attrs`.
///
/// Bold and dim both map to 22; the code is written once.
pub fn sgr_off<W: Write>(w: &mut W, attrs: Attributes) -> io::Result<()> {
    write_joined(w, attrs, |codes| codes.off)
}

fn write_joined<W: Write>(
    w: &mut W,
    attrs: Attributes,
    pick: impl Fn(SgrCodes) -> u8,
) -> io::Result<()> {
    if attrs.is_empty() {
        return Ok(());
    }
    let mut codes: Vec<u8> = Vec::with_capacity(8);
    for (flag, pair) in ATTRIBUTE_TABLE {
        let code = pick(pair);
        if attrs.contains(flag) && !codes.contains(&code) {
            codes.push(code);
        }
    }
    w.write_all(b"\x1b[")?;
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            w.write_all(b";")?;
        }
        write!(w, "{code}")?;
    }
    w.write_all(b"m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render;

    #[test]
    fn reset_bytes() {
        assert_eq!(render(sgr_reset), "\x1b[0m");
    }

    #[test]
    fn single_attribute_on_off() {
        assert_eq!(render(|w| sgr_on(w, Attributes::ITALIC)), "\x1b[3m");
        assert_eq!(render(|w| sgr_off(w, Attributes::ITALIC)), "\x1b[23m");
    }

    #[test]
    fn combined_attributes_in_table_order() {
        let attrs = Attributes::UNDERLINE | Attributes::BOLD | Attributes::ITALIC;
        assert_eq!(render(|w| sgr_on(w, attrs)), "\x1b[1;3;4m");
    }

    #[test]
    fn bold_and_dim_share_off_code() {
        let attrs = Attributes::BOLD | Attributes::DIM;
        assert_eq!(render(|w| sgr_off(w, attrs)), "\x1b[22m");
    }

    #[test]
    fn empty_set_emits_nothing() {
        assert_eq!(render(|w| sgr_on(w, Attributes::empty())), "");
        assert_eq!(render(|w| sgr_off(w, Attributes::empty())), "");
    }

    #[test]
    fn codes_for_single_flags() {
        assert_eq!(codes_for(Attributes::REVERSE), Some(SGR_REVERSE));
        assert_eq!(codes_for(Attributes::HIDDEN), Some(SGR_HIDDEN));
        assert_eq!(codes_for(Attributes::BOLD | Attributes::DIM), None);
        assert_eq!(codes_for(Attributes::empty()), None);
    }
}
