use super::*;
use crate::internal::test_utils::{assert, assert_let};

#[test]
fn splits_on_whitespace() {
    assert!(split("-a -b   -c").unwrap() == vec!["-a", "-b", "-c"]);
}

#[test]
fn single_and_double_quoted_words() {
    assert!(split("'a b' \"c d\"").unwrap() == vec!["a b", "c d"]);
}

#[test]
fn backslash_escapes_next_char_unquoted() {
    assert!(split("a\\ b").unwrap() == vec!["a b"]);
}

#[test]
fn backslash_newline_is_a_continuation_and_vanishes() {
    assert!(split("foo\\\nbar").unwrap() == vec!["foobar"]);
}

#[test]
fn double_quote_recognizes_limited_escapes() {
    assert!(split(r#""a\"b\\c\$d\`e\nf""#).unwrap() == vec!["a\"b\\c$d`e\\nf"]);
}

#[test]
fn double_quote_keeps_other_backslashes_literal() {
    assert!(split(r#""a\zb""#).unwrap() == vec!["a\\zb"]);
}

#[test]
fn single_quote_is_fully_literal() {
    assert!(split(r#"'a\zb "c'"#).unwrap() == vec!["a\\zb \"c"]);
}

#[test]
fn bare_dash_i_fuses_with_its_path_preserving_the_gap() {
    assert!(split("-I  include/dir --other").unwrap() == vec!["-I  include/dir", "--other"]);
}

#[test]
fn dash_i_glued_to_its_path_is_not_affected_by_fusion() {
    assert!(split("-Iinclude/dir").unwrap() == vec!["-Iinclude/dir"]);
}

#[test]
fn hash_starts_a_comment_only_at_token_boundary() {
    assert!(split("-a #comment\n-b").unwrap() == vec!["-a", "-b"]);
}

#[test]
fn hash_mid_token_is_literal() {
    assert!(split("-a#b").unwrap() == vec!["-a#b"]);
}

#[test]
fn escaped_quote_inside_double_quote_does_not_close_it() {
    assert!(split(r#""a\"b""#).unwrap() == vec!["a\"b"]);
}

#[test]
fn empty_or_blank_input_fails() {
    assert_let!(Err(Error::Empty) = split(""));
    assert_let!(Err(Error::Empty) = split("   \n\t"));
}

#[test]
fn trailing_backslash_fails() {
    assert_let!(Err(Error::TrailingBackslash) = split("foo\\"));
}

#[test]
fn unterminated_double_quote_fails() {
    assert_let!(Err(Error::UnterminatedQuote('"')) = split("\"foo"));
}

#[test]
fn unterminated_single_quote_fails() {
    assert_let!(Err(Error::UnterminatedQuote('\'')) = split("'foo"));
}
