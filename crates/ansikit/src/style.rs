#![forbid(unsafe_code)]

//! Wrapping text in matching style start/end sequences.
//!
//! Every [`TextStyle`] has a start sequence and an end sequence that undoes
//! only that style (`22` for bold/dim, `39` for the foreground, and so on), so
//! styles nest without a full reset in between.
//!
//! ```
//! use ansikit::style::{StyledText, TextStyle};
//! use ansikit_codes::color::{Ansi16, Color};
//!
//! let s = StyledText::new("hi")
//!     .with(TextStyle::Bold)
//!     .with(TextStyle::Foreground(Color::Ansi16(Ansi16::Red)))
//!     .render()
//!     .unwrap();
//! assert_eq!(s, "\x1b[1m\x1b[31mhi\x1b[39m\x1b[22m");
//! ```

use std::fmt;
use std::io::{self, Write};

use ansikit_codes::color::{self, Color};
use ansikit_codes::render;
use ansikit_codes::sgr::{self, Attributes};

use crate::error::{Result, TerminalError};

const EMPTY_TEXT: &str = "styled text must not be empty";

/// One text style with a start and a matching end sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
    Foreground(Color),
    Background(Color),
}

impl TextStyle {
    /// The attribute styles, in SGR code order.
    pub const ATTRIBUTES: [Self; 8] = [
        Self::Bold,
        Self::Dim,
        Self::Italic,
        Self::Underline,
        Self::Blink,
        Self::Reverse,
        Self::Hidden,
        Self::Strikethrough,
    ];

    fn attribute(self) -> Option<Attributes> {
        match self {
            Self::Bold => Some(Attributes::BOLD),
            Self::Dim => Some(Attributes::DIM),
            Self::Italic => Some(Attributes::ITALIC),
            Self::Underline => Some(Attributes::UNDERLINE),
            Self::Blink => Some(Attributes::BLINK),
            Self::Reverse => Some(Attributes::REVERSE),
            Self::Hidden => Some(Attributes::HIDDEN),
            Self::Strikethrough => Some(Attributes::STRIKETHROUGH),
            Self::Foreground(_) | Self::Background(_) => None,
        }
    }

    pub fn write_start<W: Write>(self, w: &mut W) -> io::Result<()> {
        match self {
            Self::Foreground(c) => color::fg(w, c),
            Self::Background(c) => color::bg(w, c),
            other => match other.attribute() {
                Some(attrs) => sgr::sgr_on(w, attrs),
                None => Ok(()),
            },
        }
    }

    pub fn write_end<W: Write>(self, w: &mut W) -> io::Result<()> {
        match self {
            Self::Foreground(_) => color::fg_default(w),
            Self::Background(_) => color::bg_default(w),
            other => match other.attribute() {
                Some(attrs) => sgr::sgr_off(w, attrs),
                None => Ok(()),
            },
        }
    }

    /// Start sequence as text.
    #[must_use]
    pub fn start(self) -> String {
        render(|w| self.write_start(w))
    }

    /// End sequence as text.
    #[must_use]
    pub fn end(self) -> String {
        render(|w| self.write_end(w))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Blink => "blink",
            Self::Reverse => "reverse",
            Self::Hidden => "hidden",
            Self::Strikethrough => "strikethrough",
            Self::Foreground(_) => "foreground",
            Self::Background(_) => "background",
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Surround `text` with the start and end of `style`.
///
/// Empty text is rejected with [`TerminalError::InvalidArgument`].
pub fn wrap(style: TextStyle, text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(TerminalError::InvalidArgument(EMPTY_TEXT));
    }
    Ok(format!("{}{text}{}", style.start(), style.end()))
}

/// Paint `text` in a foreground color.
///
/// Unlike [`wrap`], empty text is accepted and yields an empty string with
/// no escape sequences at all.
#[must_use]
pub fn colorize(text: &str, color: Color) -> String {
    if text.is_empty() {
        return String::new();
    }
    let style = TextStyle::Foreground(color);
    format!("{}{text}{}", style.start(), style.end())
}

/// Text with a stack of styles.
///
/// Styles open in the order they were added and close in reverse, so the
/// last style added sits closest to the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledText<'a> {
    text: &'a str,
    styles: Vec<TextStyle>,
}

impl<'a> StyledText<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            styles: Vec::new(),
        }
    }

    /// Add a style inside the ones already applied.
    #[must_use]
    pub fn with(mut self, style: TextStyle) -> Self {
        self.styles.push(style);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.with(TextStyle::Bold)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.with(TextStyle::Italic)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.with(TextStyle::Underline)
    }

    #[must_use]
    pub fn fg(self, color: Color) -> Self {
        self.with(TextStyle::Foreground(color))
    }

    #[must_use]
    pub fn bg(self, color: Color) -> Self {
        self.with(TextStyle::Background(color))
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.text
    }

    #[must_use]
    pub fn styles(&self) -> &[TextStyle] {
        &self.styles
    }

    /// Write starts, text, then ends in reverse order.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<()> {
        if self.text.is_empty() {
            return Err(TerminalError::InvalidArgument(EMPTY_TEXT));
        }
        for style in &self.styles {
            style.write_start(w)?;
        }
        w.write_all(self.text.as_bytes())?;
        for style in self.styles.iter().rev() {
            style.write_end(w)?;
        }
        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansikit_codes::color::Ansi16;

    #[test]
    fn wrap_uses_matching_end_codes() {
        assert_eq!(wrap(TextStyle::Bold, "x").unwrap(), "\x1b[1mx\x1b[22m");
        assert_eq!(
            wrap(TextStyle::Underline, "x").unwrap(),
            "\x1b[4mx\x1b[24m"
        );
        assert_eq!(
            wrap(TextStyle::Background(Color::Indexed(200)), "x").unwrap(),
            "\x1b[48;5;200mx\x1b[49m"
        );
    }

    #[test]
    fn wrap_rejects_empty_text() {
        for style in TextStyle::ATTRIBUTES {
            assert!(matches!(
                wrap(style, ""),
                Err(TerminalError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn colorize_tolerates_empty_text() {
        assert_eq!(colorize("", Color::Ansi16(Ansi16::Red)), "");
        assert_eq!(
            colorize("ok", Color::Ansi16(Ansi16::Green)),
            "\x1b[32mok\x1b[39m"
        );
    }

    #[test]
    fn nested_styles_unwind_in_reverse() {
        let s = StyledText::new("t")
            .underline()
            .fg(Color::rgb(1, 2, 3))
            .bg(Color::Ansi16(Ansi16::BrightBlack))
            .render()
            .unwrap();
        assert_eq!(
            s,
            "\x1b[4m\x1b[38;2;1;2;3m\x1b[100mt\x1b[49m\x1b[39m\x1b[24m"
        );
    }

    #[test]
    fn unstyled_text_renders_plain() {
        assert_eq!(StyledText::new("plain").render().unwrap(), "plain");
    }

    #[test]
    fn styled_text_rejects_empty() {
        assert!(matches!(
            StyledText::new("").bold().render(),
            Err(TerminalError::InvalidArgument(_))
        ));
    }

    #[test]
    fn start_and_end_per_attribute() {
        let pairs: Vec<(String, String)> = TextStyle::ATTRIBUTES
            .iter()
            .map(|s| (s.start(), s.end()))
            .collect();
        assert_eq!(pairs[0], ("\x1b[1m".into(), "\x1b[22m".into()));
        assert_eq!(pairs[7], ("\x1b[9m".into(), "\x1b[29m".into()));
    }
}
