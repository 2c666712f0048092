#![forbid(unsafe_code)]

//! Viewport size and cursor position value types.

use std::fmt;

/// Visible terminal area in character cells.
///
/// A zero in either field means the size is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewportSize {
    /// Columns.
    pub width: u16,
    /// Lines.
    pub height: u16,
}

impl ViewportSize {
    /// The "unavailable" size.
    pub const UNKNOWN: Self = Self::new(0, 0);

    /// Create a new size.
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions were actually reported.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for ViewportSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 1-based cursor location, row first as in the `CSI row ; col R` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    /// Line, starting at 1.
    pub row: u16,
    /// Column, starting at 1.
    pub column: u16,
}

impl CursorPosition {
    /// Top-left corner; also the fallback for failed queries.
    pub const ORIGIN: Self = Self { row: 1, column: 1 };

    /// Create a position. Zero coordinates are raised to 1.
    #[must_use]
    pub fn new(row: u16, column: u16) -> Self {
        Self {
            row: row.max(1),
            column: column.max(1),
        }
    }
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_size() {
        assert!(!ViewportSize::UNKNOWN.is_known());
        assert!(!ViewportSize::new(80, 0).is_known());
        assert!(ViewportSize::new(80, 24).is_known());
        assert_eq!(ViewportSize::default(), ViewportSize::UNKNOWN);
    }

    #[test]
    fn position_is_one_based() {
        assert_eq!(CursorPosition::new(0, 0), CursorPosition::ORIGIN);
        assert_eq!(CursorPosition::new(12, 34).row, 12);
        assert_eq!(CursorPosition::new(12, 34).column, 34);
        assert_eq!(CursorPosition::default(), CursorPosition::ORIGIN);
    }

    #[test]
    fn display() {
        assert_eq!(ViewportSize::new(80, 24).to_string(), "80x24");
        assert_eq!(CursorPosition::new(3, 9).to_string(), "row 3, column 9");
    }
}
