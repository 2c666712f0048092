#![forbid(unsafe_code)]

//! Cursor motion, shapes and the position query.

use std::io::Write;

use ansikit::codes::cursor::CursorShape;
use ansikit::{ByteSource, CursorReport, RawModeControl, Result, Terminal};

use crate::menu::prompt;

/// Rows 1-4 hold the banner.
const TOP: u16 = 5;

pub fn movement<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.print_at(TOP, 4, "A  <- CUP to row 5, column 4")?;
    term.move_to(TOP + 2, 4)?;
    term.print("B")?;
    term.move_down(2)?;
    term.move_forward(6)?;
    term.print("C  <- down 2, forward 6")?;
    term.move_up(1)?;
    term.move_back(10)?;
    term.print("D  <- up 1, back 10")?;

    term.save_cursor()?;
    term.print_at(TOP + 7, 4, "E  <- printed after saving the cursor at D")?;
    term.restore_cursor()?;
    term.print(" (restored)")?;

    term.move_to(TOP + 9, 1)?;
    term.hide_cursor()?;
    let answered = prompt(term, "Cursor hidden. Press Enter to show it again...")?;
    term.show_cursor()?;
    if answered.is_some() {
        term.println("Cursor visible.")?;
    }
    Ok(())
}

pub fn shapes<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.println("DECSCUSR changes the cursor shape where the terminal supports it.")?;
    term.println("")?;
    for shape in CursorShape::ALL {
        term.set_cursor_shape(shape)?;
        let line = format!("  {} ({}). Enter for the next shape: ", shape.label(), shape.param());
        if prompt(term, &line)?.is_none() {
            break;
        }
    }
    term.set_cursor_shape(CursorShape::Default)
}

pub fn query<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.print_at(TOP + 2, 10, "X")?;
    let report = term.query_cursor_position();
    term.move_to(TOP + 4, 1)?;
    term.println("Printed X at row 7, column 10, then sent ESC[6n.")?;
    match &report {
        CursorReport::Reported(pos) => {
            term.println(&format!(
                "Terminal answered: row {}, column {}",
                pos.row, pos.column
            ))?;
        }
        CursorReport::Fallback(reason) => {
            term.println(&format!(
                "No usable answer ({reason}); using {}",
                report.position()
            ))?;
        }
    }
    Ok(())
}
