use std::path::PathBuf;
use std::rc::Rc;

use indoc::indoc;

use super::*;
use crate::internal::test_utils::{assert, assert_let};
use crate::text::TextLoader;

fn parse_str(text: &str) -> Result<Package, Error> {
    let pkg = Package::new("test".into(), PathBuf::from("/tmp/test.pc"), 1);
    let mut loader = TextLoader::from_str(text);
    parse(pkg, &mut loader, false)
}

#[test]
fn parses_basic_fields() {
    let pkg = parse_str(indoc! {"
        Name: Test
        Version: 1.0
        Description: A test package
        Cflags: -a -b -c
    "})
    .unwrap();

    assert!(pkg.name == "Test");
    assert!(pkg.version == "1.0");
    assert!(pkg.description == "A test package");
    assert!(pkg.cflags.len() == 3);
}

#[test]
fn unknown_tags_are_skipped() {
    let pkg = parse_str(indoc! {"
        Name: Test
        Version: 1.0
        Description: A test package
        Foo: bar
    "})
    .unwrap();
    assert!(pkg.name == "Test");
}

#[test]
fn variable_definitions_and_substitution() {
    let pkg = parse_str(indoc! {"
        prefix = /usr
        Name: Test
        Version: 1.0
        Description: ${prefix}/share
    "})
    .unwrap();
    assert!(pkg.description == "/usr/share");
}

#[test]
fn dollar_dollar_escapes_to_single_dollar() {
    let pkg = parse_str(indoc! {"
        Name: Test
        Version: 1.0
        Description: cost is $$5
    "})
    .unwrap();
    assert!(pkg.description == "cost is $5");
}

#[test]
fn undefined_variable_fails() {
    let err = parse_str(indoc! {"
        Name: Test
        Version: 1.0
        Description: ${missing}
    "})
    .unwrap_err();
    assert_let!(Error::UndefinedVariable(name, path) = err);
    assert!(name == "missing");
    assert!(path == "/tmp/test.pc");
}

#[test]
fn duplicate_variable_fails() {
    let err = parse_str(indoc! {"
        a = 1
        a = 2
        Name: Test
        Version: 1.0
        Description: d
    "})
    .unwrap_err();
    assert_let!(Error::DuplicateVariable(name, _) = err);
    assert!(name == "a");
}

#[test]
fn duplicate_name_field_fails() {
    let err = parse_str(indoc! {"
        Name: A
        Name: B
        Version: 1.0
        Description: d
    "})
    .unwrap_err();
    assert_let!(Error::DuplicateField("Name", _) = err);
}

#[test]
fn duplicate_cflags_only_fails_if_first_was_nonempty() {
    let pkg = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Cflags:
        Cflags: -a
    "})
    .unwrap();
    assert!(pkg.cflags.len() == 1);

    let err = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Cflags: -a
        Cflags: -b
    "})
    .unwrap_err();
    assert_let!(Error::DuplicateField("Cflags", _) = err);
}

#[test]
fn duplicate_libs_fails_even_if_first_was_empty() {
    let err = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Libs:
        Libs: -la
    "})
    .unwrap_err();
    assert_let!(Error::DuplicateField("Libs", _) = err);
}

#[test]
fn libs_are_also_added_to_private_libs() {
    let pkg = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Libs: -la
        Libs.private: -lb
    "})
    .unwrap();
    assert!(pkg.libs.len() == 1);
    assert!(pkg.private_libs.len() == 2);
}

#[test]
fn requires_is_overwritten_not_rejected_on_duplicate() {
    let pkg = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Requires: foo
        Requires: bar
    "})
    .unwrap();
    assert!(pkg.requires_entries.len() == 1);
    assert!(pkg.requires_entries[0].name == "bar");
}

#[test]
fn ignore_private_reqs_drops_requires_private() {
    let pkg_text = "Name: A\nVersion: 1.0\nDescription: d\nRequires.private: foo\n";
    let pkg = Package::new("test".into(), PathBuf::from("/tmp/test.pc"), 1);
    let mut loader = TextLoader::from_str(pkg_text);
    let pkg = parse(pkg, &mut loader, true).unwrap();
    assert!(pkg.requires_private_entries.is_empty());
}

#[test]
fn conflicts_tolerates_later_empty_after_nonempty() {
    let pkg = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Conflicts: foo
        Conflicts:
    "})
    .unwrap();
    assert!(pkg.conflicts.len() == 1);
}

#[test]
fn conflicts_fails_on_second_nonempty_occurrence() {
    let err = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Conflicts: foo
        Conflicts: bar
    "})
    .unwrap_err();
    assert_let!(Error::DuplicateField("Conflicts", _) = err);
}

#[test]
fn conflicts_fails_when_first_was_empty() {
    let err = parse_str(indoc! {"
        Name: A
        Version: 1.0
        Description: d
        Conflicts:
        Conflicts: foo
    "})
    .unwrap_err();
    assert_let!(Error::DuplicateField("Conflicts", _) = err);
}

#[test]
fn verify_fails_on_missing_field() {
    let pkg = Package::new("foo".into(), PathBuf::from("/tmp/foo.pc"), 1);
    let err = verify(&pkg).unwrap_err();
    assert_let!(Error::MissingField(key, "Name") = err);
    assert!(key == "foo");
}

fn make_dep(key: &str, version: &str, url: Option<&str>) -> Rc<Package> {
    let mut pkg = Package::new(key.into(), PathBuf::from(format!("/tmp/{key}.pc")), 1);
    pkg.name = key.into();
    pkg.version = version.into();
    pkg.description = "dep".into();
    pkg.url = url.map(String::from);
    Rc::new(pkg)
}

#[test]
fn verify_fails_on_required_version_mismatch() {
    let mut pkg = Package::new("root".into(), PathBuf::from("/tmp/root.pc"), 1);
    pkg.name = "root".into();
    pkg.version = "1.0".into();
    pkg.description = "d".into();

    let dep = make_dep("foo", "1.0", Some("http://example.com"));
    pkg.required_versions.insert("foo".into(), VersionPredicate::parse_user_arg("foo >= 2.0").unwrap());
    pkg.requires_private = vec![dep];

    let err = verify(&pkg).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Package 'root' requires 'foo >= 2.0' but version of foo is 1.0"));
    assert!(msg.contains("http://example.com"));
}

#[test]
fn verify_detects_transitive_conflict() {
    let mut pkg = Package::new("conflicts-foo".into(), PathBuf::from("/tmp/conflicts-foo.pc"), 1);
    pkg.name = "conflicts-foo".into();
    pkg.version = "1.0".into();
    pkg.description = "d".into();
    pkg.conflicts = vec![VersionPredicate::parse_user_arg("foo >= 1.2.3").unwrap()];

    let foo = make_dep("foo", "1.2.4", None);
    let mut bar = Package::new("bar".into(), PathBuf::from("/tmp/bar.pc"), 1);
    bar.name = "bar".into();
    bar.version = "1.0".into();
    bar.description = "d".into();
    bar.requires_private = vec![foo];
    let bar = Rc::new(bar);

    pkg.requires_private = vec![bar];

    let err = verify(&pkg).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Version '1.2.4' of foo creates a conflict"));
    assert!(msg.contains("conflicts with conflicts-foo '1.0'"));
}

#[test]
fn verify_conflict_message_names_the_declared_name_not_the_cache_key() {
    let mut pkg = Package::new("conflicts-foo".into(), PathBuf::from("/tmp/conflicts-foo.pc"), 1);
    pkg.name = "conflicts-foo".into();
    pkg.version = "1.0".into();
    pkg.description = "d".into();
    pkg.conflicts = vec![VersionPredicate::parse_user_arg("openssl >= 1.2.3").unwrap()];

    let mut openssl = Package::new("openssl".into(), PathBuf::from("/tmp/openssl.pc"), 1);
    openssl.name = "OpenSSL".into();
    openssl.version = "1.2.4".into();
    openssl.description = "d".into();
    pkg.requires_private = vec![Rc::new(openssl)];

    let err = verify(&pkg).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Version '1.2.4' of OpenSSL creates a conflict"));
}
