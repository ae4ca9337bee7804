use std::fs;

use tempfile::tempdir;

use super::*;
use crate::internal::test_utils::{assert, assert_let};

fn write_pc(dir: &std::path::Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn loads_package_from_search_path() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "foo.pc", "Name: Foo\nVersion: 1.0\nDescription: d\n");

    let config: Config = [dir.path()].into_iter().collect();
    let mut resolver = Resolver::new(&config, false);
    let pkg = resolver.load("foo", true).unwrap().unwrap();
    assert!(pkg.name == "Foo");
    assert!(pkg.path_position == 1);
    assert!(pkg.pc_file.is_absolute());
}

#[test]
fn missing_required_module_fails() {
    let config = Config::new();
    let mut resolver = Resolver::new(&config, false);
    let err = resolver.load("nope", true).unwrap_err();
    assert_let!(Error::NotFound(name) = err);
    assert!(name == "nope");
}

#[test]
fn missing_module_without_must_exist_returns_none() {
    let config = Config::new();
    let mut resolver = Resolver::new(&config, false);
    assert!(resolver.load("nope", false).unwrap().is_none());
}

#[test]
fn explicit_filename_uses_basename_as_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cflags-abc.pc");
    fs::write(&path, "Name: X\nVersion: 1\nDescription: X\n").unwrap();

    let config = Config::new();
    let mut resolver = Resolver::new(&config, false);
    let pkg = resolver.load(path.to_str().unwrap(), true).unwrap().unwrap();
    assert!(pkg.key == "cflags-abc");
    assert!(pkg.path_position == 0);
}

#[test]
fn missing_dependency_reports_requirer() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "root.pc", "Name: Root\nVersion: 1\nDescription: d\nRequires: missing\n");

    let config: Config = [dir.path()].into_iter().collect();
    let mut resolver = Resolver::new(&config, false);
    let err = resolver.load("root", true).unwrap_err();
    assert_let!(Error::MissingDependency { dep, requirer } = err);
    assert!(dep == "missing");
    assert!(requirer == "Root");
}

#[test]
fn prefers_uninstalled_variant() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "foo.pc", "Name: Installed\nVersion: 1\nDescription: d\n");
    write_pc(dir.path(), "foo-uninstalled.pc", "Name: Uninstalled\nVersion: 1\nDescription: d\n");

    let config: Config = [dir.path()].into_iter().collect();
    let mut resolver = Resolver::new(&config, false);
    let pkg = resolver.load("foo", true).unwrap().unwrap();
    assert!(pkg.name == "Uninstalled");
    assert!(pkg.uninstalled);
}

#[test]
fn files_tracks_only_referenced_packages() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "foo.pc", "Name: Foo\nVersion: 1\nDescription: d\n");

    let config: Config = [dir.path()].into_iter().collect();
    let mut resolver = Resolver::new(&config, false);
    resolver.load("foo", true).unwrap();

    let files = resolver.files();
    assert!(files.len() == 1);
    assert!(files[0].ends_with("foo.pc"));
}

#[test]
fn last_filename_specified_package_wins_in_cache() {
    let dir = tempdir().unwrap();
    let alt_dir = dir.path().join("alt");
    fs::create_dir_all(&alt_dir).unwrap();
    write_pc(dir.path(), "foo.pc", "Name: FromSearchPath\nVersion: 1\nDescription: d\n");
    write_pc(&alt_dir, "foo.pc", "Name: FromFilename\nVersion: 1\nDescription: d\n");

    let config: Config = [dir.path()].into_iter().collect();
    let mut resolver = Resolver::new(&config, false);

    let by_plain_name = resolver.load("foo", true).unwrap().unwrap();
    assert!(by_plain_name.name == "FromSearchPath");

    // A filename load computes the same cache key ("foo", the shared
    // basename) as the plain-name load above, even though its literal
    // requested name differs, so it overwrites the earlier cache slot.
    let alt_path = alt_dir.join("foo.pc");
    resolver.load(alt_path.to_str().unwrap(), true).unwrap();

    // A later plain-name lookup now hits that overwritten cache slot
    // instead of re-walking the search path: the filename load wins.
    let by_plain_name_again = resolver.load("foo", true).unwrap().unwrap();
    assert!(by_plain_name_again.name == "FromFilename");
}

#[test]
fn transitive_requires_are_resolved_and_merged_into_private() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "bar.pc", "Name: Bar\nVersion: 1\nDescription: d\n");
    write_pc(dir.path(), "foo.pc", "Name: Foo\nVersion: 1\nDescription: d\nRequires: bar\n");

    let config: Config = [dir.path()].into_iter().collect();
    let mut resolver = Resolver::new(&config, false);
    let pkg = resolver.load("foo", true).unwrap().unwrap();
    assert!(pkg.requires.len() == 1);
    assert!(pkg.requires_private.len() == 1);
    assert!(pkg.requires_private[0].name == "Bar");
}
