#![forbid(unsafe_code)]

//! Demo screens.
//!
//! Each screen draws below the banner the menu has already printed and
//! returns; the menu then waits for Enter.

pub mod color;
pub mod cursor;
pub mod input;
pub mod screen;
pub mod text;

use std::io::Write;

use ansikit::{ByteSource, RawModeControl, Result, Terminal};

/// Identifier for each demo screen, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    CursorMovement,
    Erase,
    TextAttributes,
    Colors16,
    Palette256,
    TrueColor,
    StyleNesting,
    ScrollRegion,
    AlternateBuffer,
    WindowTitle,
    TabStops,
    CursorShapes,
    CursorQuery,
    ViewportSize,
    RawKeyboard,
}

impl ScreenId {
    pub const ALL: [Self; 15] = [
        Self::CursorMovement,
        Self::Erase,
        Self::TextAttributes,
        Self::Colors16,
        Self::Palette256,
        Self::TrueColor,
        Self::StyleNesting,
        Self::ScrollRegion,
        Self::AlternateBuffer,
        Self::WindowTitle,
        Self::TabStops,
        Self::CursorShapes,
        Self::CursorQuery,
        Self::ViewportSize,
        Self::RawKeyboard,
    ];

    /// Screen for a 1-based menu number.
    #[must_use]
    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CursorMovement => "Cursor movement",
            Self::Erase => "Erase",
            Self::TextAttributes => "Text attributes",
            Self::Colors16 => "16 colors",
            Self::Palette256 => "256 colors",
            Self::TrueColor => "True color",
            Self::StyleNesting => "Style nesting",
            Self::ScrollRegion => "Scroll region",
            Self::AlternateBuffer => "Alternate buffer",
            Self::WindowTitle => "Window title",
            Self::TabStops => "Tab stops",
            Self::CursorShapes => "Cursor shapes",
            Self::CursorQuery => "Cursor query",
            Self::ViewportSize => "Viewport size",
            Self::RawKeyboard => "Raw keyboard",
        }
    }

    /// One-line description for the menu.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::CursorMovement => "absolute and relative motion",
            Self::Erase => "erase in display and line",
            Self::TextAttributes => "SGR attributes on and off",
            Self::Colors16 => "standard and bright colors",
            Self::Palette256 => "color cube and grayscale",
            Self::TrueColor => "24-bit gradients",
            Self::StyleNesting => "stacked styles",
            Self::ScrollRegion => "DECSTBM margins",
            Self::AlternateBuffer => "second screen",
            Self::WindowTitle => "OSC 2",
            Self::TabStops => "HTS, TBC, CHT, CBT",
            Self::CursorShapes => "DECSCUSR",
            Self::CursorQuery => "ESC[6n round trip",
            Self::ViewportSize => "columns and rows",
            Self::RawKeyboard => "byte-by-byte input",
        }
    }
}

/// Draw `id`.
pub fn run<B, W, S>(term: &mut Terminal<B, W, S>, id: ScreenId) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    match id {
        ScreenId::CursorMovement => cursor::movement(term),
        ScreenId::Erase => text::erase(term),
        ScreenId::TextAttributes => text::attributes(term),
        ScreenId::Colors16 => color::ansi16(term),
        ScreenId::Palette256 => color::palette256(term),
        ScreenId::TrueColor => color::true_color(term),
        ScreenId::StyleNesting => text::nesting(term),
        ScreenId::ScrollRegion => screen::scroll_region(term),
        ScreenId::AlternateBuffer => screen::alternate_buffer(term),
        ScreenId::WindowTitle => screen::window_title(term),
        ScreenId::TabStops => text::tab_stops(term),
        ScreenId::CursorShapes => cursor::shapes(term),
        ScreenId::CursorQuery => cursor::query(term),
        ScreenId::ViewportSize => screen::viewport(term),
        ScreenId::RawKeyboard => input::raw_keyboard(term),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numbers_map_in_menu_order() {
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(1), Some(ScreenId::CursorMovement));
        assert_eq!(ScreenId::from_number(15), Some(ScreenId::RawKeyboard));
        assert_eq!(ScreenId::from_number(16), None);
    }

    #[test]
    fn titles_are_unique() {
        let titles: HashSet<_> = ScreenId::ALL.iter().map(|id| id.title()).collect();
        assert_eq!(titles.len(), ScreenId::ALL.len());
    }
}
