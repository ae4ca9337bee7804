use std::cmp::Ordering;

use super::*;
use crate::internal::test_utils::{assert, assert_let};

#[test]
fn equal_strings_compare_equal() {
    assert!(compare("1.2.3", "1.2.3") == Ordering::Equal);
}

#[test]
fn leading_zeros_are_ignored_in_digit_segments() {
    assert!(compare("0010", "10") == Ordering::Equal);
}

#[test]
fn digit_segment_outranks_alphabetic_segment() {
    assert!(compare("1", "zzz") == Ordering::Greater);
}

#[test]
fn non_alphanumeric_runs_are_skipped() {
    assert!(compare("abc.0012", "abc**12") == Ordering::Equal);
}

#[test]
fn leading_zeros_with_prefix_word() {
    assert!(compare("123abc", "0000123abc") == Ordering::Equal);
}

#[test]
fn compare_is_antisymmetric() {
    for (a, b) in [("1.2", "1.3"), ("2.0", "1.9"), ("foo", "bar")] {
        assert!(compare(a, b) == compare(b, a).reverse());
    }
}

#[test]
fn longer_digit_segment_wins_after_stripping_zeros() {
    assert!(compare("1.10", "1.9") == Ordering::Greater);
}

#[test]
fn shorter_side_with_trailing_segment_is_less() {
    assert!(compare("1.2", "1.2.1") == Ordering::Less);
}

#[test]
fn any_predicate_matches_everything() {
    let p = VersionPredicate::parse_user_arg("foo").unwrap();
    assert!(p.op == Op::Any);
    assert!(p.test("0.0.1"));
    assert!(p.test("99.0"));
}

#[test]
fn parse_user_arg_with_operator() {
    let p = VersionPredicate::parse_user_arg("foo >= 1.2").unwrap();
    assert!(p.name == "foo");
    assert!(p.op == Op::Ge);
    assert!(p.test("1.2"));
    assert!(p.test("2.0"));
    assert!(!p.test("1.1"));
}

#[test]
fn parse_user_arg_rejects_wrong_token_count() {
    assert_let!(Err(Error::InvalidUserArg(_)) = VersionPredicate::parse_user_arg("foo >="));
    assert_let!(Err(Error::InvalidUserArg(_)) = VersionPredicate::parse_user_arg("a b c d"));
}

#[test]
fn parse_user_arg_rejects_unknown_operator() {
    assert_let!(Err(Error::InvalidUserArg(_)) = VersionPredicate::parse_user_arg("foo ~= 1.2"));
}

#[test]
fn parse_module_list_handles_comma_and_whitespace() {
    let preds = VersionPredicate::parse_module_list("foo >= 1.2, bar", "x.pc").unwrap();
    assert!(preds.len() == 2);
    assert!(preds[0].name == "foo");
    assert!(preds[0].op == Op::Ge);
    assert!(preds[0].version == "1.2");
    assert!(preds[1].name == "bar");
    assert!(preds[1].op == Op::Any);
}

#[test]
fn parse_module_list_without_operator() {
    let preds = VersionPredicate::parse_module_list("foo bar baz", "x.pc").unwrap();
    assert!(preds.iter().map(|p| p.name.as_str()).collect::<Vec<_>>() == vec!["foo", "bar", "baz"]);
}

#[test]
fn parse_module_list_operator_without_version_fails() {
    assert_let!(
        Err(Error::OperatorWithoutVersion(name, file)) =
            VersionPredicate::parse_module_list("foo >=", "x.pc")
    );
    assert!(name == "foo");
    assert!(file == "x.pc");
}

#[test]
fn parse_module_list_unknown_operator_fails() {
    assert_let!(
        Err(Error::UnknownOperator(op, name, file)) =
            VersionPredicate::parse_module_list("foo == 1.2", "x.pc")
    );
    assert!(op == "==");
    assert!(name == "foo");
    assert!(file == "x.pc");
}

#[test]
fn parse_module_list_empty_name_fails() {
    assert_let!(Err(Error::EmptyName(file)) = VersionPredicate::parse_module_list("foo,, bar", "x.pc"));
    assert!(file == "x.pc");
}

#[test]
fn display_renders_with_and_without_operator() {
    let any = VersionPredicate { name: "foo".into(), op: Op::Any, version: String::new() };
    assert!(any.to_string() == "foo");

    let with_op = VersionPredicate { name: "foo".into(), op: Op::Ge, version: "1.2".into() };
    assert!(with_op.to_string() == "foo >= 1.2");
}
