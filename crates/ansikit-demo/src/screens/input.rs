#![forbid(unsafe_code)]

//! Raw keyboard echo.

use std::io::{self, Write};

use ansikit::{ByteSource, RawModeControl, Result, Terminal, TerminalError};

const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;

/// One line describing an input byte.
#[must_use]
pub fn describe_byte(byte: u8) -> String {
    let shown = match byte {
        0x1b => "ESC".to_string(),
        0x7f => "DEL".to_string(),
        b if b < 0x20 => format!("Ctrl-{}", char::from(b + 0x40)),
        b if b.is_ascii() => format!("'{}'", char::from(b)),
        _ => "non-ASCII".to_string(),
    };
    format!("0x{byte:02x} {byte:>3}  {shown}")
}

pub fn raw_keyboard<B, W, S>(term: &mut Terminal<B, W, S>) -> Result<()>
where
    B: RawModeControl,
    W: Write,
    S: ByteSource,
{
    term.println("Keys arrive one byte at a time without echo. q, Ctrl-C or Ctrl-D stops.")?;
    term.println("")?;

    let mut raw = term.raw_mode()?;
    let mut count = 0usize;
    loop {
        let byte = match raw.read_key() {
            Ok(byte) => byte,
            Err(TerminalError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err),
        };
        count += 1;
        raw.println(&format!("  {}", describe_byte(byte)))?;
        if matches!(byte, b'q' | CTRL_C | CTRL_D) {
            break;
        }
    }
    raw.finish()?;
    tracing::debug!(count, "raw keyboard screen read bytes");
    term.println(&format!("Back in cooked mode after {count} bytes."))
}
