#![forbid(unsafe_code)]

//! The menu loop and the small text helpers the screens share.

use std::io::Write;

use ansikit::{ByteSource, RawModeControl, Result, Terminal};
use unicode_width::UnicodeWidthStr;

use crate::screens::{self, ScreenId};

/// Width the banner and menu are laid out for.
pub const MENU_WIDTH: usize = 64;

/// What the user typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// A 1-based entry within range.
    Entry(usize),
    Quit,
    Invalid,
}

/// Interpret one line of menu input against `count` entries.
#[must_use]
pub fn parse_choice(input: &str, count: usize) -> Choice {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Entry(n),
        _ => Choice::Invalid,
    }
}

// ── Text helpers ─────────────────────────────────────────────────────────

/// Pad `text` with spaces to `width` display columns.
#[must_use]
pub fn pad_right(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - used))
}

/// Center `text` within `width` display columns, extra space on the right.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    let left = (width - used) / 2;
    pad_right(&format!("{}{text}", " ".repeat(left)), width)
}

/// A title centered between two rules.
#[must_use]
pub fn banner(title: &str, width: usize) -> String {
    let rule = "=".repeat(width);
    format!("{rule}\r\n{}\r\n{rule}", center(title, width))
}

/// Escape bytes made readable (`ESC` shown as `^[`).
#[must_use]
pub fn visible(sequence: &str) -> String {
    sequence
        .chars()
        .map(|c| match c {
            '\x1b' => "^[".to_string(),
            '\x07' => "^G".to_string(),
            c => c.to_string(),
        })
        .collect()
}

// ── Input ────────────────────────────────────────────────────────────────

/// Print `text` and read one line. `None` at end of input.
pub fn prompt<B, W, S>(term: &mut Terminal<B, W, S>, text: &str) -> Result<Option<String>>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.print(text)?;
    term.read_line()
}

/// Ask until the user picks an entry in `1..=count` or quits.
///
/// `None` for `q` and at end of input.
pub fn read_choice<B, W, S>(term: &mut Terminal<B, W, S>, count: usize) -> Result<Option<usize>>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    loop {
        let Some(line) = prompt(term, &format!("Select 1-{count} (q to quit): "))? else {
            return Ok(None);
        };
        match parse_choice(&line, count) {
            Choice::Entry(n) => return Ok(Some(n)),
            Choice::Quit => return Ok(None),
            Choice::Invalid => {
                tracing::debug!(input = %line, "rejected menu input");
                term.println(&format!("'{}' is not a number from 1 to {count}.", line.trim()))?;
            }
        }
    }
}

/// Wait for Enter. `false` at end of input.
pub fn pause<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<bool>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    Ok(prompt(term, "Press Enter to continue...")?.is_some())
}

// ── Loop ─────────────────────────────────────────────────────────────────

fn draw_menu<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.clear_screen()?;
    term.println(&banner("ansikit demo", MENU_WIDTH))?;
    term.println("")?;
    for (i, id) in ScreenId::ALL.iter().enumerate() {
        let label = pad_right(id.title(), 20);
        term.println(&format!("  {:>2}. {label}{}", i + 1, id.summary()))?;
    }
    term.println("")
}

/// Show one screen under its banner and wait for Enter.
///
/// `false` when input ended before the user pressed Enter.
pub fn run_screen<B, W, S>(term: &mut Terminal<B, W, S>, id: ScreenId) -> Result<bool>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    tracing::info!(screen = id.title(), "showing screen");
    term.clear_screen()?;
    term.println(&banner(id.title(), MENU_WIDTH))?;
    term.println("")?;
    screens::run(term, id)?;
    term.reset_style()?;
    term.println("")?;
    pause(term)
}

/// Menu until the user quits or input ends.
pub fn run_menu<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    loop {
        draw_menu(term)?;
        let Some(n) = read_choice(term, ScreenId::ALL.len())? else {
            break;
        };
        let Some(id) = ScreenId::from_number(n) else {
            continue;
        };
        if !run_screen(term, id)? {
            break;
        }
    }
    tracing::info!("menu closed");
    term.clear_screen()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_accepts_range_and_quit() {
        assert_eq!(parse_choice(" 3 ", 15), Choice::Entry(3));
        assert_eq!(parse_choice("15", 15), Choice::Entry(15));
        assert_eq!(parse_choice("Q", 15), Choice::Quit);
        assert_eq!(parse_choice("0", 15), Choice::Invalid);
        assert_eq!(parse_choice("16", 15), Choice::Invalid);
        assert_eq!(parse_choice("two", 15), Choice::Invalid);
        assert_eq!(parse_choice("", 15), Choice::Invalid);
    }

    #[test]
    fn pad_right_counts_display_columns() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("日本", 6), "日本  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }

    #[test]
    fn center_puts_extra_space_on_the_right() {
        assert_eq!(center("ab", 7), "  ab   ");
        assert_eq!(center("abc", 3), "abc");
    }

    #[test]
    fn banner_has_rules_around_title() {
        let b = banner("hi", 6);
        let lines: Vec<&str> = b.split("\r\n").collect();
        assert_eq!(lines, ["======", "  hi  ", "======"]);
    }

    #[test]
    fn visible_replaces_control_bytes() {
        assert_eq!(visible("\x1b[1mx\x1b]2;t\x07"), "^[[1mx^[]2;t^G");
    }
}
