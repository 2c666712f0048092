#![forbid(unsafe_code)]

//! Cursor-position request/reply exchange.
//!
//! The request `ESC [ 6 n` is written to the output stream and the terminal
//! answers on the input stream with `ESC [ row ; col R`. Bytes are read one at
//! a time into a [`ReplyBuffer`] (ESC becomes [`REPLY_ESC_MARKER`]) until the
//! first `R`, then the whole text is matched against `␛[<digits>;<digits>R`.
//!
//! Nothing here returns an error. A reply that fails to arrive or to match
//! degrades to [`CursorReport::Fallback`], whose position is (1,1).
//!
//! Raw mode is the caller's job: without it the reply is echoed and held back
//! until Enter. [`crate::Terminal::query_cursor_position`] wraps the exchange in
//! a raw-mode session.
//!
//! # Timeouts
//!
//! With `reply_timeout: None` (the default) the read blocks until `R`
//! arrives, forever if the terminal never answers. Pass a timeout through
//! [`QueryConfig`] to bound the whole exchange.

use std::fmt;
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use ansikit_codes::cursor::{REQUEST_POSITION, RESTORE, SAVE};
use ansikit_codes::{ESC, cursor};

use crate::config::QueryConfig;
use crate::geometry::{CursorPosition, ViewportSize};

/// Stand-in for ESC in the accumulated reply text.
///
/// No other byte maps to it: `char::from(u8)` stays within U+0000..=U+00FF.
pub const REPLY_ESC_MARKER: char = '\u{241B}';

/// Byte that ends the read loop, wherever it appears.
pub const REPLY_TERMINATOR: u8 = b'R';

/// Coordinate used to push the cursor into the bottom-right corner.
const FAR_CORNER: u16 = 999;

// =============================================================================
// Byte sources
// =============================================================================

/// Single-byte reads with an optional wait bound.
pub trait ByteSource {
    /// Next byte, or `Ok(None)` if `timeout` expired first.
    ///
    /// `None` for `timeout` blocks until a byte arrives. End of input is an
    /// [`io::ErrorKind::UnexpectedEof`] error.
    fn next_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        (**self).next_byte(timeout)
    }
}

/// Blocking byte source over any reader. Timeouts are ignored.
#[derive(Debug)]
pub struct ReaderBytes<R> {
    inner: R,
}

impl<R: Read> ReaderBytes<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderBytes<R> {
    fn next_byte(&mut self, _timeout: Option<Duration>) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Unbuffered bytes from the process's standard input.
///
/// On Unix this polls fd 0 and reads it directly, so nothing past the reply
/// is swallowed into a userspace buffer. Elsewhere a relay thread reads
/// stdin and hands bytes over a channel.
#[derive(Debug, Default)]
pub struct StdinBytes {
    #[cfg(not(unix))]
    relay: Option<std::sync::mpsc::Receiver<io::Result<u8>>>,
}

impl StdinBytes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(unix)]
impl ByteSource for StdinBytes {
    fn next_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
        use std::os::fd::{AsFd, AsRawFd};

        let stdin = io::stdin();
        if let Some(timeout) = timeout {
            let timeout_ms = poll_timeout_ms(timeout);
            let mut fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
            match poll(&mut fds, PollTimeout::from(timeout_ms)) {
                Ok(0) | Err(nix::errno::Errno::EINTR) => return Ok(None),
                Ok(_) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let mut byte = [0u8; 1];
        match nix::unistd::read(stdin.as_raw_fd(), &mut byte) {
            Ok(0) => Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(_) => Ok(Some(byte[0])),
            Err(nix::errno::Errno::EINTR) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Milliseconds for `poll(2)`, rounded up so a sub-millisecond remainder
/// still waits instead of returning at once.
#[cfg(unix)]
fn poll_timeout_ms(timeout: Duration) -> u16 {
    let millis = timeout.as_nanos().div_ceil(1_000_000);
    millis.try_into().unwrap_or(u16::MAX)
}

#[cfg(not(unix))]
impl StdinBytes {
    fn relay(&mut self) -> io::Result<&std::sync::mpsc::Receiver<io::Result<u8>>> {
        if self.relay.is_none() {
            let (tx, rx) = std::sync::mpsc::channel();
            std::thread::Builder::new()
                .name("ansikit-stdin".into())
                .spawn(move || {
                    for byte in io::stdin().lock().bytes() {
                        let failed = byte.is_err();
                        if tx.send(byte).is_err() || failed {
                            break;
                        }
                    }
                })?;
            self.relay = Some(rx);
        }
        self.relay
            .as_ref()
            .ok_or_else(|| io::Error::other("stdin relay missing"))
    }
}

#[cfg(not(unix))]
impl ByteSource for StdinBytes {
    fn next_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
        use std::sync::mpsc::RecvTimeoutError;

        let rx = self.relay()?;
        let received = match timeout {
            Some(timeout) => match rx.recv_timeout(timeout) {
                Ok(byte) => byte,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(io::ErrorKind::UnexpectedEof.into());
                }
            },
            None => rx
                .recv()
                .map_err(|_| io::Error::from(io::ErrorKind::UnexpectedEof))?,
        };
        received.map(Some)
    }
}

// =============================================================================
// Reply accumulation and parsing
// =============================================================================

/// Reply text collected so far, with ESC replaced by [`REPLY_ESC_MARKER`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyBuffer {
    text: String,
}

impl ReplyBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one byte. Returns `true` when it was the terminator.
    pub fn push(&mut self, byte: u8) -> bool {
        if byte == ESC {
            self.text.push(REPLY_ESC_MARKER);
        } else {
            self.text.push(char::from(byte));
        }
        byte == REPLY_TERMINATOR
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Match a complete reply such as `␛[12;34R`, where `␛` is
/// [`REPLY_ESC_MARKER`].
///
/// The first group is the row and the second the column. Both must be
/// non-empty runs of ASCII digits with a value in `1..=65535`; anything else,
/// including leading or trailing bytes, fails.
#[must_use]
pub fn parse_cursor_reply(text: &str) -> Option<CursorPosition> {
    let body = text
        .strip_prefix(REPLY_ESC_MARKER)?
        .strip_prefix('[')?
        .strip_suffix(char::from(REPLY_TERMINATOR))?;
    let (row, column) = body.split_once(';')?;
    Some(CursorPosition {
        row: parse_coordinate(row)?,
        column: parse_coordinate(column)?,
    })
}

fn parse_coordinate(digits: &str) -> Option<u16> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u16>().ok().filter(|&v| v > 0)
}

// =============================================================================
// Reports
// =============================================================================

/// Why a query fell back to (1,1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The text up to the terminator did not match the reply grammar.
    Malformed(String),
    /// The configured reply timeout expired.
    TimedOut,
    /// Writing the request or reading the reply failed.
    Io(io::ErrorKind),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(text) => write!(f, "malformed reply {text:?}"),
            Self::TimedOut => f.write_str("no reply before the timeout"),
            Self::Io(kind) => write!(f, "i/o failure ({kind})"),
        }
    }
}

/// Outcome of a cursor-position query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorReport {
    /// The terminal answered with a well-formed reply.
    Reported(CursorPosition),
    /// The query failed; the position is [`CursorPosition::ORIGIN`].
    Fallback(FallbackReason),
}

impl CursorReport {
    /// The reported position, or (1,1) for a fallback.
    #[must_use]
    pub fn position(&self) -> CursorPosition {
        match self {
            Self::Reported(pos) => *pos,
            Self::Fallback(_) => CursorPosition::ORIGIN,
        }
    }

    #[must_use]
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Reported(_))
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Reported(_) => None,
            Self::Fallback(reason) => Some(reason),
        }
    }
}

// =============================================================================
// Exchange
// =============================================================================

/// Read bytes up to the first `R` and parse them.
///
/// `timeout` bounds the whole read, not each byte.
pub fn read_cursor_reply<S: ByteSource>(source: &mut S, timeout: Option<Duration>) -> CursorReport {
    let deadline = timeout.map(|t| Instant::now() + t);
    let mut reply = ReplyBuffer::new();

    loop {
        let remaining = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    tracing::debug!(partial = reply.as_str(), "cursor reply timed out");
                    return CursorReport::Fallback(FallbackReason::TimedOut);
                }
                Some(deadline - now)
            }
            None => None,
        };

        match source.next_byte(remaining) {
            Ok(Some(byte)) => {
                if reply.push(byte) {
                    break;
                }
            }
            Ok(None) => continue,
            Err(err) => {
                tracing::debug!(error = %err, partial = reply.as_str(), "cursor reply read failed");
                return CursorReport::Fallback(FallbackReason::Io(err.kind()));
            }
        }
    }

    match parse_cursor_reply(reply.as_str()) {
        Some(pos) => {
            tracing::debug!(row = pos.row, column = pos.column, "cursor position reported");
            CursorReport::Reported(pos)
        }
        None => {
            tracing::debug!(reply = reply.as_str(), "malformed cursor reply");
            CursorReport::Fallback(FallbackReason::Malformed(reply.into_string()))
        }
    }
}

/// Write `ESC [ 6 n`, flush, and read the reply.
pub fn query_cursor<W, S>(out: &mut W, source: &mut S, config: &QueryConfig) -> CursorReport
where
    W: Write,
    S: ByteSource,
{
    if let Err(err) = out.write_all(REQUEST_POSITION).and_then(|()| out.flush()) {
        tracing::debug!(error = %err, "cursor request write failed");
        return CursorReport::Fallback(FallbackReason::Io(err.kind()));
    }
    read_cursor_reply(source, config.reply_timeout)
}

/// Write the viewport probe: save cursor, jump to the far corner, request
/// the position, restore the cursor.
pub fn write_viewport_probe<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(SAVE)?;
    cursor::cup(out, FAR_CORNER, FAR_CORNER)?;
    out.write_all(REQUEST_POSITION)?;
    out.write_all(RESTORE)?;
    out.flush()
}

/// Measure the viewport by clamping the cursor to the bottom-right corner.
///
/// The reply's column is the width and its row the height. `None` when the
/// exchange fell back.
pub fn probe_viewport<W, S>(out: &mut W, source: &mut S, config: &QueryConfig) -> Option<ViewportSize>
where
    W: Write,
    S: ByteSource,
{
    if let Err(err) = write_viewport_probe(out) {
        tracing::debug!(error = %err, "viewport probe write failed");
        return None;
    }
    match read_cursor_reply(source, config.reply_timeout) {
        CursorReport::Reported(pos) => Some(ViewportSize::new(pos.column, pos.row)),
        CursorReport::Fallback(reason) => {
            tracing::debug!(%reason, "viewport probe fell back");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn report_for(bytes: &[u8]) -> CursorReport {
        read_cursor_reply(&mut ReaderBytes::new(bytes), None)
    }

    /// Source that replays a script; `None` entries act as expired waits.
    struct ScriptedBytes {
        script: VecDeque<Option<u8>>,
        timeouts_seen: Vec<Option<Duration>>,
    }

    impl ScriptedBytes {
        fn new(script: impl IntoIterator<Item = Option<u8>>) -> Self {
            Self {
                script: script.into_iter().collect(),
                timeouts_seen: Vec::new(),
            }
        }
    }

    impl ByteSource for ScriptedBytes {
        fn next_byte(&mut self, timeout: Option<Duration>) -> io::Result<Option<u8>> {
            self.timeouts_seen.push(timeout);
            match self.script.pop_front() {
                Some(Some(byte)) => Ok(Some(byte)),
                Some(None) => {
                    if let Some(t) = timeout {
                        std::thread::sleep(t.min(Duration::from_millis(5)));
                    }
                    Ok(None)
                }
                None => Err(io::ErrorKind::UnexpectedEof.into()),
            }
        }
    }

    #[test]
    fn well_formed_reply_is_row_then_column() {
        assert_eq!(
            report_for(b"\x1b[12;34R"),
            CursorReport::Reported(CursorPosition { row: 12, column: 34 })
        );
    }

    #[test]
    fn parse_accepts_only_exact_grammar() {
        assert_eq!(
            parse_cursor_reply("␛[1;1R"),
            Some(CursorPosition::ORIGIN)
        );
        assert_eq!(
            parse_cursor_reply("␛[65535;80R"),
            Some(CursorPosition { row: 65535, column: 80 })
        );
        for text in [
            "", "␛[", "␛[;R", "␛[12R", "␛[12;R", "␛[;34R", "␛[12;34", "[12;34R", "␛]12;34R",
            "x␛[12;34R", "␛[12;34Rx", "␛[1;2;3R", "␛[+1;2R", "␛[1 ;2R", "␛[0;5R", "␛[5;0R",
            "␛[65536;1R", "␛[١;2R",
        ] {
            assert_eq!(parse_cursor_reply(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn esc_becomes_marker() {
        let mut buf = ReplyBuffer::new();
        assert!(buf.is_empty());
        for &b in b"\x1b[3;4" {
            assert!(!buf.push(b));
        }
        assert!(buf.push(b'R'));
        assert_eq!(buf.as_str(), "␛[3;4R");
    }

    #[cfg(unix)]
    #[test]
    fn poll_timeout_rounds_up() {
        assert_eq!(poll_timeout_ms(Duration::ZERO), 0);
        assert_eq!(poll_timeout_ms(Duration::from_micros(1)), 1);
        assert_eq!(poll_timeout_ms(Duration::from_micros(999)), 1);
        assert_eq!(poll_timeout_ms(Duration::from_micros(1_001)), 2);
        assert_eq!(poll_timeout_ms(Duration::from_millis(500)), 500);
        assert_eq!(poll_timeout_ms(Duration::from_secs(3600)), u16::MAX);
    }

    #[test]
    fn literal_caret_is_not_an_introducer() {
        let report = report_for(b"^[12;34R");
        assert_eq!(
            report,
            CursorReport::Fallback(FallbackReason::Malformed("^[12;34R".into()))
        );
        assert_eq!(report.position(), CursorPosition::ORIGIN);
        assert_eq!(parse_cursor_reply("^[12;34R"), None);
    }

    #[test]
    fn no_byte_maps_to_the_marker() {
        for byte in (0..=u8::MAX).filter(|&b| b != ESC) {
            let mut buf = ReplyBuffer::new();
            buf.push(byte);
            assert!(!buf.as_str().contains(REPLY_ESC_MARKER), "byte {byte:#04x}");
        }
    }

    #[test]
    fn malformed_replies_fall_back_to_origin() {
        for bytes in [
            &b"\x1b[1x;2R"[..],
            b"\x1b]12;34R",
            b"[12;34R",
            b"typed\x1b[5;5R",
        ] {
            let report = report_for(bytes);
            assert!(
                matches!(report.fallback_reason(), Some(FallbackReason::Malformed(_))),
                "{bytes:?} gave {report:?}"
            );
            assert_eq!(report.position(), CursorPosition::ORIGIN);
        }
    }

    #[test]
    fn early_terminator_stops_the_read() {
        let mut source = ReaderBytes::new(&b"\x1bR5;5R"[..]);
        let report = read_cursor_reply(&mut source, None);
        assert_eq!(
            report,
            CursorReport::Fallback(FallbackReason::Malformed("␛R".into()))
        );
        let rest = source.into_inner();
        assert_eq!(rest, b"5;5R");
    }

    #[test]
    fn missing_terminator_is_an_io_fallback() {
        let report = report_for(b"\x1b[12;34");
        assert_eq!(
            report,
            CursorReport::Fallback(FallbackReason::Io(io::ErrorKind::UnexpectedEof))
        );
        assert!(!report.is_reported());
    }

    #[test]
    fn default_config_waits_without_a_bound() {
        let mut source = ScriptedBytes::new(b"\x1b[2;3R".iter().copied().map(Some));
        let mut out = Vec::new();
        let report = query_cursor(&mut out, &mut source, &QueryConfig::default());
        assert_eq!(report.position(), CursorPosition::new(2, 3));
        assert!(source.timeouts_seen.iter().all(Option::is_none));
        assert_eq!(out, REQUEST_POSITION);
    }

    #[test]
    fn silent_terminal_times_out_when_bounded() {
        let mut source = ScriptedBytes::new(std::iter::repeat_n(None, 64));
        let config = QueryConfig::with_timeout(Duration::from_millis(20));
        let report = query_cursor(&mut Vec::new(), &mut source, &config);
        assert_eq!(report, CursorReport::Fallback(FallbackReason::TimedOut));
        assert_eq!(report.position(), CursorPosition::ORIGIN);
        assert!(source.timeouts_seen.iter().all(Option::is_some));
    }

    #[test]
    fn expired_waits_are_retried_before_the_deadline() {
        let mut script: Vec<Option<u8>> = vec![None, None];
        script.extend(b"\x1b[7;8R".iter().copied().map(Some));
        let mut source = ScriptedBytes::new(script);
        let report = read_cursor_reply(&mut source, Some(Duration::from_secs(5)));
        assert_eq!(report.position(), CursorPosition::new(7, 8));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn request_write_failure_falls_back() {
        let mut source = ReaderBytes::new(&b"\x1b[2;2R"[..]);
        let report = query_cursor(&mut BrokenPipe, &mut source, &QueryConfig::default());
        assert_eq!(
            report,
            CursorReport::Fallback(FallbackReason::Io(io::ErrorKind::BrokenPipe))
        );
    }

    #[test]
    fn viewport_probe_sequence() {
        let mut out = Vec::new();
        let mut source = ReaderBytes::new(&b"\x1b[40;132R"[..]);
        let size = probe_viewport(&mut out, &mut source, &QueryConfig::default());
        assert_eq!(size, Some(ViewportSize::new(132, 40)));
        assert_eq!(out, b"\x1b7\x1b[999;999H\x1b[6n\x1b8");
    }

    #[test]
    fn viewport_probe_fallback_is_none() {
        let mut source = ReaderBytes::new(&b"garbageR"[..]);
        assert_eq!(
            probe_viewport(&mut Vec::new(), &mut source, &QueryConfig::default()),
            None
        );
    }

    #[test]
    fn fallback_reason_display() {
        assert_eq!(
            FallbackReason::Malformed("␛[xR".into()).to_string(),
            "malformed reply \"␛[xR\""
        );
        assert_eq!(
            FallbackReason::TimedOut.to_string(),
            "no reply before the timeout"
        );
    }
}
