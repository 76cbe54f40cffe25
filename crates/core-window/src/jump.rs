//! Jump to a decimal offset literal near the cursor.
//!
//! Binary formats frequently carry offsets printed in ASCII (archive
//! indexes, textual headers). `jump_to` scans a small window around the
//! cursor for a decimal digit run, treats it as a target offset, and moves
//! there, remembering where it came from so `jump_back` can return.

use super::Window;
use std::io::{Read, Seek};

/// Bytes inspected on each side of the cursor.
const SCAN_HALF: usize = 50;

/// ASCII whitespace as it appears in binary files; NUL padding counts.
fn is_white(b: u8) -> bool {
    matches!(b, 0x00 | 0x09 | 0x0a | 0x0d | 0x20)
}

impl<S: Read + Seek> Window<S> {
    /// Parse a decimal integer literal at or after the cursor and jump to
    /// that offset.
    ///
    /// The scan window is `SCAN_HALF` bytes before and after the cursor
    /// (clipped at the buffer start, zero padded past the end). Starting at
    /// the window center, whitespace is skipped forward, then the digit run
    /// around the scan point is expanded in both directions. Nothing happens
    /// when no digit is found, the run touches the window edge (it may
    /// continue out of view), the literal overflows, or the value lies
    /// outside `(0, length)`.
    ///
    /// On success the previous `(cursor, offset)` is pushed for `jump_back`
    /// and the viewport is placed a third of a screen above the target row.
    pub fn jump_to(&mut self) {
        let start = self.cursor.saturating_sub(SCAN_HALF as u64);
        let Ok((_, bytes)) = self.read_bytes(start, 2 * SCAN_HALF) else {
            return;
        };
        let mut i = SCAN_HALF;
        while i < bytes.len() && is_white(bytes[i]) {
            i += 1;
        }
        if i == bytes.len() || !bytes[i].is_ascii_digit() {
            return;
        }
        while i > 0 && bytes[i - 1].is_ascii_digit() {
            i -= 1;
        }
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == bytes.len() {
            // the run may continue past the scan window; too ambiguous to act
            return;
        }
        let literal = std::str::from_utf8(&bytes[i..j]).expect("digit run is ascii");
        let Ok(target) = literal.parse::<i64>() else {
            return;
        };
        if target <= 0 || target as u64 >= self.length {
            return;
        }
        let target = target as u64;
        tracing::debug!(target: "window.jump", from = self.cursor, to = target, "jump_to");
        self.stack.push((self.cursor, self.offset));
        self.cursor = target;
        self.offset =
            (target - target % self.width).saturating_sub(self.height / 3 * self.width);
    }
}

impl<S> Window<S> {
    /// Return to the position saved by the most recent `jump_to`.
    pub fn jump_back(&mut self) {
        if let Some((cursor, offset)) = self.stack.pop() {
            tracing::debug!(target: "window.jump", to = cursor, "jump_back");
            self.cursor = cursor;
            self.offset = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// 200 spaces with `literal` written at `at`.
    fn source_with(at: usize, literal: &[u8]) -> Vec<u8> {
        let mut content = vec![b' '; 200];
        content[at..at + literal.len()].copy_from_slice(literal);
        content
    }

    fn window(content: Vec<u8>) -> Window<Cursor<Vec<u8>>> {
        Window::new(Cursor::new(content), "t", 4, 16).unwrap()
    }

    #[test]
    fn jumps_to_literal_under_cursor() {
        let mut w = window(source_with(100, b"42"));
        w.cursor_next(100);
        w.jump_to();
        assert_eq!(w.cursor(), 42);
        // viewport lands a third of a screen above the target row
        assert_eq!(w.offset(), 32 - 16);
        assert_eq!(w.jump_depth(), 1);
    }

    #[test]
    fn jump_back_restores_position() {
        let mut w = window(source_with(100, b"42"));
        w.cursor_next(101); // cursor on the '2'
        let (cursor, offset) = (w.cursor(), w.offset());
        w.jump_to();
        assert_eq!(w.cursor(), 42);
        w.jump_back();
        assert_eq!((w.cursor(), w.offset()), (cursor, offset));
        assert_eq!(w.jump_depth(), 0);
    }

    #[test]
    fn jump_back_on_empty_stack_is_noop() {
        let mut w = window(source_with(0, b"7"));
        w.cursor_next(9);
        w.jump_back();
        assert_eq!(w.cursor(), 9);
    }

    #[test]
    fn skips_whitespace_before_literal() {
        let mut w = window(source_with(100, b"55"));
        w.cursor_next(96); // a few spaces before the digits
        w.jump_to();
        assert_eq!(w.cursor(), 55);
    }

    #[test]
    fn walks_back_into_literal() {
        // NUL padding counts as whitespace too
        let mut content = vec![0u8; 20_000];
        content[99..104].copy_from_slice(b"12345");
        let mut w = window(content);
        w.cursor_next(101); // inside the run
        w.jump_to();
        assert_eq!(w.cursor(), 12_345, "whole run parsed, not just the tail");
    }

    #[test]
    fn out_of_range_target_does_nothing() {
        let mut w = window(source_with(100, b"9999"));
        w.cursor_next(100);
        w.jump_to();
        assert_eq!(w.cursor(), 100);
        assert_eq!(w.jump_depth(), 0);
    }

    #[test]
    fn zero_target_does_nothing() {
        let mut w = window(source_with(100, b"0"));
        w.cursor_next(100);
        w.jump_to();
        assert_eq!(w.cursor(), 100);
    }

    #[test]
    fn non_digit_under_cursor_does_nothing() {
        let mut w = window(source_with(100, b"x42"));
        w.cursor_next(100);
        w.jump_to();
        assert_eq!(w.cursor(), 100);
    }

    #[test]
    fn run_touching_scan_edge_is_ambiguous() {
        let mut content = vec![b' '; 200];
        for b in content.iter_mut().skip(148) {
            *b = b'1';
        }
        let mut w = window(content);
        w.cursor_next(148);
        w.jump_to();
        assert_eq!(w.cursor(), 148, "run reaches the window edge");
        assert_eq!(w.jump_depth(), 0);
    }

    #[test]
    fn overflowing_literal_does_nothing() {
        let mut w = window(source_with(100, b"99999999999999999999"));
        w.cursor_next(100);
        w.jump_to();
        assert_eq!(w.cursor(), 100);
    }

    #[test]
    fn jumps_nest_and_unwind_in_order() {
        let mut content = vec![b' '; 200];
        content[100..102].copy_from_slice(b"60");
        content[60..62].copy_from_slice(b"30");
        let mut w = window(content);
        w.cursor_next(100);
        w.jump_to();
        assert_eq!(w.cursor(), 60);
        w.jump_to();
        assert_eq!(w.cursor(), 30);
        assert_eq!(w.jump_depth(), 2);
        w.jump_back();
        assert_eq!(w.cursor(), 60);
        w.jump_back();
        assert_eq!(w.cursor(), 100);
    }
}
