//! Line buffer tests

use libcm_console::console::line_buffer::{LineBuffer, STRING_TERMINATION_CHARACTER};

#[test]
fn test_line_buffer_push() {
    let mut buf = LineBuffer::<20>::new();

    for &b in b"$HELP" {
        assert!(buf.push(b));
    }

    assert_eq!(buf.as_bytes(), b"$HELP");
    assert_eq!(buf.len(), 5);
}

#[test]
fn test_line_buffer_keeps_terminator_slot() {
    let mut buf = LineBuffer::<4>::new();

    assert!(buf.push(b'A'));
    assert!(buf.push(b'B'));
    assert!(buf.push(b'C'));
    assert!(!buf.has_room());
    assert!(!buf.push(b'D'));

    assert_eq!(buf.as_bytes(), b"ABC");
}

#[test]
fn test_line_buffer_complete_rewinds() {
    let mut buf = LineBuffer::<8>::new();
    buf.push(b'$');
    buf.push(b'X');

    assert_eq!(buf.complete(), b"$X");
    assert!(buf.is_empty());

    buf.push(b'Y');
    assert_eq!(buf.as_bytes(), b"Y");
}

#[test]
fn test_line_buffer_complete_empty() {
    let mut buf = LineBuffer::<8>::new();

    assert_eq!(buf.complete(), b"");
    assert!(buf.is_empty());
}

#[test]
fn test_terminator_is_nul() {
    assert_eq!(STRING_TERMINATION_CHARACTER, 0);
}
