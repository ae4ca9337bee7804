use super::*;
use crate::internal::test_utils::assert;

#[test]
fn peek_and_advance() {
    let mut cur = Cursor::new("abc");
    assert!(cur.peek(0) == 'a');
    assert!(cur.peek(1) == 'b');
    cur.advance();
    assert!(cur.peek(0) == 'b');
    cur.advance();
    cur.advance();
    assert!(cur.peek(0) == EMPTY);
    assert!(cur.peek(5) == EMPTY);
}

#[test]
fn overwrite_nul_truncates_shared_buffer() {
    let start = Cursor::new("abcdef");
    let mut at_d = start.clone();
    at_d.advance();
    at_d.advance();
    at_d.advance(); // pos = 3, at 'd'
    at_d.overwrite_nul();

    // `start` shares the same buffer, so it now sees a truncated string.
    assert!(start.to_string() == "abc");
    assert!(start.slice(10) == "abc");
    assert!(at_d.peek(0) == EMPTY);
}

#[test]
fn slice_stops_at_nul_or_end() {
    let cur = Cursor::new("hello");
    assert!(cur.slice(3) == "hel");
    assert!(cur.slice(100) == "hello");
}

#[test]
fn ptr_diff_between_shared_cursors() {
    let a = Cursor::new("abcdef");
    let mut b = a.clone();
    b.advance();
    b.advance();
    assert!(b.ptr_diff(&a) == 2);
    assert!(a.ptr_diff(&b) == -2);
}

#[test]
fn to_string_from_current_position() {
    let mut cur = Cursor::new("hello world");
    for _ in 0..6 {
        cur.advance();
    }
    assert!(cur.to_string() == "world");
}
