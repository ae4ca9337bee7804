use super::*;
use crate::internal::test_utils::{assert, assert_let};

#[test]
fn get_char_and_unget_char() {
    let mut loader = TextLoader::from_str("ab");
    assert!(loader.get_char() == Some('a'));
    loader.unget_char('a').unwrap();
    assert!(loader.get_char() == Some('a'));
    assert!(loader.get_char() == Some('b'));
    assert!(loader.get_char() == None);
}

#[test]
fn unget_char_mismatch_fails() {
    let mut loader = TextLoader::from_str("ab");
    loader.get_char();
    assert_let!(Err(Error::UngetMismatch('z', Some('a'))) = loader.unget_char('z'));
}

fn read_all_lines(input: &str) -> Vec<String> {
    let mut loader = TextLoader::from_str(input);
    let reader = LineReader::new();
    let mut lines = vec![];
    while let Some(line) = reader.read_line(&mut loader).unwrap() {
        lines.push(line);
    }
    lines
}

#[test]
fn plain_lines() {
    assert!(read_all_lines("foo\nbar\n") == vec!["foo", "bar"]);
}

#[test]
fn last_line_without_trailing_newline() {
    assert!(read_all_lines("foo\nbar") == vec!["foo", "bar"]);
}

#[test]
fn empty_input_has_no_lines() {
    assert!(read_all_lines("").is_empty());
}

#[test]
fn comment_is_stripped() {
    assert!(read_all_lines("foo # a comment\nbar\n") == vec!["foo ", "bar"]);
}

#[test]
fn comment_only_line_without_trailing_newline() {
    assert!(read_all_lines("foo\n# just a comment") == vec!["foo", ""]);
}

#[test]
fn backslash_newline_is_a_line_continuation() {
    assert!(read_all_lines("foo \\\nbar\n") == vec!["foo bar"]);
}

#[test]
fn backslash_hash_is_literal() {
    assert!(read_all_lines("foo \\# bar\n") == vec!["foo # bar"]);
}

#[test]
fn backslash_other_char_kept_literally() {
    assert!(read_all_lines("a\\zb\n") == vec!["a\\zb"]);
}

#[test]
fn trailing_backslash_at_eof() {
    assert!(read_all_lines("foo\\") == vec!["foo\\"]);
}

#[test]
fn default_state_consumes_lf_then_cr_pair() {
    // \n immediately followed by \r is consumed as one terminator.
    assert!(read_all_lines("foo\n\rbar\n") == vec!["foo", "bar"]);
}

#[test]
fn default_state_does_not_special_case_bare_cr() {
    // A lone \r (not following \n) is just a literal char in default state,
    // this is the documented CRLF asymmetry.
    assert!(read_all_lines("foo\rbar\n") == vec!["foo\rbar"]);
}

#[test]
fn quoted_state_handles_crlf_in_either_order() {
    assert!(read_all_lines("foo\\\r\nbar\n") == vec!["foobar"]);
    assert!(read_all_lines("foo\\\n\rbar\n") == vec!["foobar"]);
}
