#![forbid(unsafe_code)]

//! Erasing, attributes, nested styles and tab stops.

use std::io::Write;

use ansikit::codes::color::{Ansi16, Color};
use ansikit::codes::erase::{self, EraseDisplayMode, EraseLineMode};
use ansikit::codes::tabs;
use ansikit::style::{StyledText, TextStyle, wrap};
use ansikit::{ByteSource, RawModeControl, Result, Terminal};

use crate::menu::{pad_right, visible};

const TOP: u16 = 5;
const FILL_COLUMN: u16 = 4;
const CUT_COLUMN: u16 = 24;

fn fill<B, W, S>(term: &mut Terminal<B, W, S>, row: u16) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.print_at(row, FILL_COLUMN, &"#".repeat(40))
}

pub fn erase<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.println("Each row was filled with '#', then erased from column 24.")?;

    let lines = [
        (EraseLineMode::ToEnd, "EL 0: cursor to end of line"),
        (EraseLineMode::ToStart, "EL 1: start of line to cursor"),
        (EraseLineMode::All, "EL 2: whole line"),
    ];
    let mut row = TOP + 1;
    for (mode, label) in lines {
        fill(term, row)?;
        term.move_to(row, CUT_COLUMN)?;
        term.erase_line(mode)?;
        term.print_at(row, 48, label)?;
        row += 1;
    }

    fill(term, row)?;
    term.move_to(row, CUT_COLUMN)?;
    term.write_sequence(|w| erase::erase_chars(w, 8))?;
    term.print_at(row, 48, "ECH 8: eight characters")?;

    let block = row + 2;
    for r in block..block + 3 {
        fill(term, r)?;
    }
    term.move_to(block + 1, CUT_COLUMN)?;
    term.erase_display(EraseDisplayMode::ToEnd)?;
    term.print_at(
        block + 4,
        1,
        "ED 0 from the middle row cleared everything after the cursor.",
    )?;
    term.move_to(block + 5, 1)
}

pub fn attributes<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    for style in TextStyle::ATTRIBUTES {
        let sample = wrap(style, &pad_right(style.label(), 16))?;
        let codes = format!("{} ... {}", visible(&style.start()), visible(&style.end()));
        term.println(&format!("  {sample}  {codes}"))?;
    }
    term.println("")?;
    term.println("Hidden text is there; select it to see it.")
}

pub fn nesting<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    let samples = [
        StyledText::new("bold red")
            .bold()
            .fg(Color::Ansi16(Ansi16::Red)),
        StyledText::new("italic underline on blue")
            .italic()
            .underline()
            .bg(Color::Ansi16(Ansi16::Blue)),
        StyledText::new("everything at once")
            .bold()
            .italic()
            .underline()
            .fg(Color::rgb(255, 200, 0))
            .bg(Color::Indexed(236)),
    ];
    for text in &samples {
        term.print("  ")?;
        term.write_styled(text)?;
        term.println("")?;
        term.println(&format!("    {}", visible(&text.render()?)))?;
    }
    term.println("")?;
    term.println("Styles open in the order applied and close in reverse.")
}

pub fn tab_stops<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    let width = match term.viewport_size()? {
        size if size.is_known() => size.width,
        _ => 80,
    };
    let row = TOP + 1;

    term.write_bytes(tabs::CLEAR_ALL_TAB_STOPS)?;
    for col in [12, 30, 50] {
        term.move_to(row, col)?;
        term.write_bytes(tabs::SET_TAB_STOP)?;
    }
    term.move_to(row, 1)?;
    term.print("start\tcol 12\tcol 30\tcol 50")?;
    term.move_to(row + 1, 1)?;
    term.write_sequence(|w| tabs::tab_forward(w, 3))?;
    term.print("<- CHT 3")?;
    term.write_sequence(|w| tabs::tab_backward(w, 2))?;
    term.print("CBT 2")?;

    // Back to the usual stop every eight columns.
    term.write_bytes(tabs::CLEAR_ALL_TAB_STOPS)?;
    for col in (9..=width).step_by(8) {
        term.move_to(row + 2, col)?;
        term.write_bytes(tabs::SET_TAB_STOP)?;
    }
    term.move_to(row + 3, 1)?;
    term.println("a\tb\tc\td  <- default stops restored")
}
