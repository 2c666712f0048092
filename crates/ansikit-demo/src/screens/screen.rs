#![forbid(unsafe_code)]

//! Whole-screen features: scrolling margins, the alternate buffer, the
//! window title and the viewport size.

use std::io::Write;

use ansikit::{ByteSource, RawModeControl, Result, Terminal};

use crate::menu::{MENU_WIDTH, banner, pause};

const TOP: u16 = 5;
const REGION_TOP: u16 = TOP + 2;
const REGION_BOTTOM: u16 = TOP + 8;

/// Title set when the window title screen finishes.
pub const DEMO_TITLE: &str = "ansikit demo";

pub fn scroll_region<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.print_at(TOP, 1, "-- above the region, stays put --")?;
    term.print_at(REGION_BOTTOM + 1, 1, "-- below the region, stays put --")?;

    term.set_scroll_region(REGION_TOP, REGION_BOTTOM)?;
    term.move_to(REGION_TOP, 1)?;
    for n in 1..=15 {
        if n > 1 {
            term.print("\r\n")?;
        }
        term.print(&format!("scrolling line {n}"))?;
    }
    term.scroll_down(2)?;
    term.print_at(REGION_TOP, 1, "SD 2 opened two blank lines at the top")?;
    term.reset_scroll_region()?;

    term.move_to(REGION_BOTTOM + 3, 1)?;
    term.println(&format!(
        "Fifteen lines scrolled inside rows {REGION_TOP}-{REGION_BOTTOM}."
    ))
}

pub fn alternate_buffer<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.println("Switching to the alternate buffer...")?;
    term.enter_alternate_buffer()?;
    term.clear_screen()?;
    term.println(&banner("Alternate buffer", MENU_WIDTH))?;
    term.println("")?;
    term.println("This is a separate screen. The menu and your scrollback are")?;
    term.println("still there underneath.")?;
    term.println("")?;
    let result = pause(term);
    term.leave_alternate_buffer()?;
    result?;
    term.println("Back on the main buffer, contents intact.")
}

pub fn window_title<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    let title = "ansikit: hello from OSC 2";
    term.set_window_title(title)?;
    term.println(&format!("Window title set to \"{title}\"."))?;
    if pause(term)? {
        term.set_window_title(DEMO_TITLE)?;
        term.println(&format!("Title is now \"{DEMO_TITLE}\"."))?;
    }
    Ok(())
}

pub fn viewport<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    let size = term.viewport_size()?;
    if !size.is_known() {
        term.println("The viewport size could not be determined.")?;
        return Ok(());
    }

    let (w, h) = (size.width, size.height);
    term.save_cursor()?;
    term.print_at(1, 1, "+")?;
    term.print_at(1, w, "+")?;
    term.print_at(h, 1, "+")?;
    term.print_at(h, w, "+")?;
    term.restore_cursor()?;
    term.println(&format!(
        "Viewport is {size} ({w} columns, {h} rows); corners marked with '+'."
    ))
}
