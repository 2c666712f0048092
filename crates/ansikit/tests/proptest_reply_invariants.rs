//! Property-based invariants for the cursor-position reply protocol.
//!
//! 1. Every well-formed reply parses to (row, column) in that order.
//! 2. Arbitrary input never panics; a fallback always reports (1,1).
//! 3. A non-digit anywhere in a numeric group fails the match.
//! 4. Leading bytes before the introducer fail the match.
//! 5. The read stops at the first `R`, leaving later bytes unread.
//! 6. Every ESC byte, and nothing else, becomes a marker in the accumulated text.
//! 7. A literal `^` in place of ESC never parses.

use ansikit::cursor_query::{
    CursorReport, FallbackReason, REPLY_ESC_MARKER, ReaderBytes, ReplyBuffer, parse_cursor_reply,
    read_cursor_reply,
};
use ansikit::{CursorPosition, QueryConfig};
use proptest::prelude::*;

proptest! {
    #[test]
    fn well_formed_replies_round_trip(row in 1u16..=u16::MAX, col in 1u16..=u16::MAX) {
        let bytes = format!("\x1b[{row};{col}R").into_bytes();
        let report = read_cursor_reply(&mut ReaderBytes::new(&bytes[..]), None);
        prop_assert_eq!(report, CursorReport::Reported(CursorPosition { row, column: col }));
    }
}

proptest! {
    #[test]
    fn arbitrary_input_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let report = read_cursor_reply(&mut ReaderBytes::new(&bytes[..]), QueryConfig::default().reply_timeout);
        if !report.is_reported() {
            prop_assert_eq!(report.position(), CursorPosition::ORIGIN);
        }
    }
}

proptest! {
    #[test]
    fn non_digits_in_groups_fail(
        row in 1u16..=9999,
        col in 1u16..=9999,
        junk in "[a-zA-Z :<=>?.,+-]",
        in_row in any::<bool>(),
    ) {
        let text = if in_row {
            format!("{REPLY_ESC_MARKER}[{row}{junk};{col}R")
        } else {
            format!("{REPLY_ESC_MARKER}[{row};{junk}{col}R")
        };
        prop_assert_eq!(parse_cursor_reply(&text), None);
    }
}

proptest! {
    #[test]
    fn leading_bytes_fail(prefix in "[a-zA-Z0-9]{1,8}", row in 1u16..=500, col in 1u16..=500) {
        // An R in the prefix would end the read early; either way it falls back.
        let bytes = format!("{prefix}\x1b[{row};{col}R").into_bytes();
        let report = read_cursor_reply(&mut ReaderBytes::new(&bytes[..]), None);
        let is_malformed = matches!(report, CursorReport::Fallback(FallbackReason::Malformed(_)));
        prop_assert!(is_malformed);
    }
}

proptest! {
    #[test]
    fn read_stops_at_first_terminator(tail in proptest::collection::vec(any::<u8>(), 0..16)) {
        let mut bytes = b"\x1b[4;2R".to_vec();
        bytes.extend_from_slice(&tail);
        let mut source = ReaderBytes::new(&bytes[..]);
        let report = read_cursor_reply(&mut source, None);
        prop_assert_eq!(report.position(), CursorPosition::new(4, 2));
        prop_assert_eq!(source.into_inner(), &tail[..]);
    }
}

proptest! {
    #[test]
    fn esc_bytes_become_markers(
        bytes in proptest::collection::vec(
            prop_oneof![Just(0x1bu8), Just(b'^'), any::<u8>().prop_filter("terminator", |&b| b != b'R')],
            0..32,
        )
    ) {
        let mut buf = ReplyBuffer::new();
        for &b in &bytes {
            prop_assert!(!buf.push(b));
        }
        let escs = bytes.iter().filter(|&&b| b == 0x1b).count();
        let markers = buf.as_str().chars().filter(|&c| c == REPLY_ESC_MARKER).count();
        prop_assert_eq!(markers, escs);
        prop_assert!(!buf.as_str().contains('\x1b'));
    }
}

proptest! {
    #[test]
    fn caret_introducer_falls_back(row in 1u16..=u16::MAX, col in 1u16..=u16::MAX) {
        let bytes = format!("^[{row};{col}R").into_bytes();
        let report = read_cursor_reply(&mut ReaderBytes::new(&bytes[..]), None);
        let is_malformed = matches!(report, CursorReport::Fallback(FallbackReason::Malformed(_)));
        prop_assert!(is_malformed);
        prop_assert_eq!(report.position(), CursorPosition::ORIGIN);
    }
}
