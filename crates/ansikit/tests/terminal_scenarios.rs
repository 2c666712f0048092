//! End-to-end scenarios for the terminal facade over scripted backends.
//!
//! Nothing here touches a real terminal: output goes to a `Vec<u8>`, input
//! comes from in-memory bytes, and the Windows backend runs on a fake
//! console.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use ansikit::codes::color::{Ansi16, Color};
use ansikit::platform::{ConsoleApi, ConsoleModes, WindowsBackend};
use ansikit::style::{StyledText, TextStyle, colorize, wrap};
use ansikit::{
    CursorPosition, CursorReport, FallbackReason, PlatformKind, RawModeControl, RawModeSession,
    ReaderBytes, Terminal, TerminalConfig, TerminalError, ViewportSize,
};

// ── Fake Windows console ─────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct SharedConsole {
    input: Rc<Cell<u32>>,
    output: Rc<Cell<u32>>,
    size: ViewportSize,
}

impl SharedConsole {
    fn new() -> Self {
        Self {
            input: Rc::new(Cell::new(0x01f7)),
            output: Rc::new(Cell::new(0x0003)),
            size: ViewportSize::new(120, 30),
        }
    }
}

impl ConsoleApi for SharedConsole {
    fn input_mode(&self) -> io::Result<u32> {
        Ok(self.input.get())
    }

    fn set_input_mode(&self, mode: u32) -> io::Result<()> {
        self.input.set(mode);
        Ok(())
    }

    fn output_mode(&self) -> io::Result<u32> {
        Ok(self.output.get())
    }

    fn set_output_mode(&self, mode: u32) -> io::Result<()> {
        self.output.set(mode);
        Ok(())
    }

    fn window_size(&self) -> io::Result<ViewportSize> {
        Ok(self.size)
    }
}

// ── Backend whose enable always fails ────────────────────────────────────

#[derive(Debug, Default)]
struct DeniedBackend;

impl RawModeControl for DeniedBackend {
    type Saved = ();

    fn kind(&self) -> PlatformKind {
        PlatformKind::Windows
    }

    fn enable_raw_mode(&mut self) -> ansikit::Result<RawModeSession<()>> {
        Err(TerminalError::platform(
            "SetConsoleMode(input)",
            io::ErrorKind::PermissionDenied.into(),
        ))
    }

    fn disable_raw_mode(&mut self, session: RawModeSession<()>) -> ansikit::Result<()> {
        session.into_saved();
        Ok(())
    }

    fn restore_cooked(&mut self) -> ansikit::Result<()> {
        Ok(())
    }

    fn terminal_size(&self) -> ansikit::Result<ViewportSize> {
        Ok(ViewportSize::UNKNOWN)
    }

    fn is_raw(&self) -> bool {
        false
    }
}

fn windows_terminal(
    console: SharedConsole,
    input: &'static [u8],
) -> Terminal<WindowsBackend<SharedConsole>, Vec<u8>, ReaderBytes<&'static [u8]>> {
    Terminal::from_parts(
        WindowsBackend::new(console),
        Vec::new(),
        ReaderBytes::new(input),
        TerminalConfig::default(),
    )
}

#[test]
fn windows_cursor_query_restores_console_modes() {
    let console = SharedConsole::new();
    let mut term = windows_terminal(console.clone(), b"\x1b[12;34R");

    let report = term.query_cursor_position();

    assert_eq!(
        report,
        CursorReport::Reported(CursorPosition { row: 12, column: 34 })
    );
    assert_eq!(console.input.get(), 0x01f7);
    assert_eq!(console.output.get(), 0x0003);
    assert!(!term.backend().is_raw());
}

#[test]
fn windows_raw_scope_applies_and_reverts_masks() {
    let console = SharedConsole::new();
    let mut term = windows_terminal(console.clone(), b"");
    {
        let raw = term.raw_mode().unwrap();
        assert!(raw.backend().is_raw());
        assert_eq!(console.input.get() & 0x0007, 0);
        assert_ne!(console.input.get() & 0x0200, 0);
        assert_ne!(console.output.get() & 0x0004, 0);
    }
    assert_eq!(console.input.get(), 0x01f7);
    assert_eq!(console.output.get(), 0x0003);
    assert!(!term.backend().is_raw());
}

#[test]
fn windows_session_snapshot_matches_console() {
    let console = SharedConsole::new();
    let mut backend = WindowsBackend::new(console.clone());
    let session = backend.enable_raw_mode().unwrap();
    assert_eq!(
        *session.saved(),
        ConsoleModes {
            input: 0x01f7,
            output: 0x0003
        }
    );
    backend.disable_raw_mode(session).unwrap();
    assert!(!backend.is_raw());
}

#[test]
fn viewport_twice_returns_same_size() {
    let mut term = windows_terminal(SharedConsole::new(), b"");
    let first = term.viewport_size().unwrap();
    let second = term.viewport_size().unwrap();
    assert_eq!(first, ViewportSize::new(120, 30));
    assert_eq!(first, second);
}

#[test]
fn denied_raw_mode_falls_back_without_reading() {
    let mut term = Terminal::from_parts(
        DeniedBackend,
        Vec::new(),
        ReaderBytes::new(&b"\x1b[3;3R"[..]),
        TerminalConfig::default(),
    );
    let report = term.query_cursor_position();
    assert_eq!(
        report,
        CursorReport::Fallback(FallbackReason::Io(io::ErrorKind::PermissionDenied))
    );
    assert_eq!(report.position(), CursorPosition::ORIGIN);
    assert!(term.writer().is_empty());
    assert!(matches!(
        term.raw_mode().map(|_| ()),
        Err(TerminalError::Platform { .. })
    ));
}

#[test]
fn posix_terminal_on_missing_tty_degrades() {
    let config = TerminalConfig {
        tty_path: "/nonexistent/ansikit-tty".into(),
        ..TerminalConfig::default()
    };
    let backend = ansikit::PlatformBackend::for_os("Linux", &config).unwrap();
    let mut term = Terminal::from_parts(
        backend,
        Vec::new(),
        ReaderBytes::new(&b"\x1b[24;80R\x1b[7;1R"[..]),
        config,
    );

    assert_eq!(term.viewport_size().unwrap(), ViewportSize::new(80, 24));
    assert_eq!(term.cursor_position(), CursorPosition::new(7, 1));
    assert!(!term.backend().is_raw());
}

#[test]
fn styled_output_through_facade() {
    let mut term = windows_terminal(SharedConsole::new(), b"");
    let text = StyledText::new("warn")
        .bold()
        .fg(Color::Ansi16(Ansi16::Yellow));
    term.write_styled(&text).unwrap();
    assert_eq!(
        String::from_utf8_lossy(term.writer()),
        "\x1b[1m\x1b[33mwarn\x1b[39m\x1b[22m"
    );
}

#[test]
fn empty_text_contracts_differ_by_operation() {
    assert!(matches!(
        wrap(TextStyle::Italic, ""),
        Err(TerminalError::InvalidArgument(_))
    ));
    assert_eq!(colorize("", Color::Indexed(196)), "");

    let mut term = windows_terminal(SharedConsole::new(), b"");
    assert!(matches!(
        term.print_at(5, 5, ""),
        Err(TerminalError::InvalidArgument(_))
    ));
    assert!(term.write_styled(&StyledText::new("")).is_err());
}

#[test]
fn os_selection_is_case_insensitive() {
    for name in ["WINDOWS", "Microsoft Windows 11", "windows"] {
        assert_eq!(
            PlatformKind::from_os_name(name).unwrap(),
            PlatformKind::Windows
        );
    }
    for name in ["LINUX", "Linux 6.8", "linux"] {
        assert_eq!(PlatformKind::from_os_name(name).unwrap(), PlatformKind::Posix);
    }
    assert!(matches!(
        Terminal::for_os("Darwin"),
        Err(TerminalError::UnsupportedPlatform(_))
    ));
}
