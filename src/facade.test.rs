use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::*;
use crate::internal::test_utils::assert;

fn write_pc(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn basic_query() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "cflags-abc.pc", "Name:X\nVersion:1\nDescription:X\nCflags: -a -b -c\n");

    let config: Config = [dir.path()].into_iter().collect();
    let pkgconf = PkgConfig::new(config);
    let result = pkgconf.cflags(&["cflags-abc"]).unwrap();
    assert!(result.flags == vec!["-a", "-b", "-c"]);
    assert!(result.files.len() == 1);
}

#[test]
fn include_sort_query() {
    let dir = tempdir().unwrap();
    write_pc(
        dir.path(),
        "cflags-i-other.pc",
        "Name:X\nVersion:1\nDescription:X\nCflags: -isystem isystem/option -idirafter idirafter/option -I  include/dir --other\n",
    );

    let config: Config = [dir.path()].into_iter().collect();
    let pkgconf = PkgConfig::new(config);
    let result = pkgconf.cflags(&["cflags-i-other"]).unwrap();
    assert!(
        result.flags
            == vec![
                "--other",
                "-I  include/dir",
                "-isystem",
                "isystem/option",
                "-idirafter",
                "idirafter/option",
            ]
    );
}

#[test]
fn path_ordering_query() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = dir.path().join("d2");
    fs::create_dir_all(&d1).unwrap();
    fs::create_dir_all(&d2).unwrap();
    write_pc(&d1, "mod1.pc", "Name:X\nVersion:1\nDescription:X\nCflags: --other1 --another1 -Iinclude/d1 -isystem s1\n");
    write_pc(&d2, "mod2.pc", "Name:X\nVersion:1\nDescription:X\nCflags: --other2 --another2 -Iinclude/d2 -isystem s2\n");

    let config: Config = [dir.path(), d1.as_path(), d2.as_path()].into_iter().collect();
    let pkgconf = PkgConfig::new(config);
    let result = pkgconf.cflags(&["mod2", "mod1"]).unwrap();
    assert!(
        result.flags
            == vec![
                "--other2",
                "--another2",
                "--other1",
                "--another1",
                "-Iinclude/d1",
                "-isystem",
                "s1",
                "-Iinclude/d2",
                "-isystem",
                "s2",
            ]
    );
}

#[test]
fn static_closure_query() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "public.pc", "Name:Public\nVersion:1\nDescription:d\nLibs: -L/lib/public -lpublic\n");
    write_pc(dir.path(), "private.pc", "Name:Private\nVersion:1\nDescription:d\nLibs: -L/lib/private -lprivate\n");
    write_pc(
        dir.path(),
        "req-pubpriv.pc",
        "Name:ReqPubPriv\nVersion:1\nDescription:d\nRequires: public\nRequires.private: private\nLibs: -L/lib/pubpriv -lreq\n",
    );

    let config: Config = [dir.path()].into_iter().collect();
    let pkgconf = PkgConfig::new(config);
    let result = pkgconf.static_libs(&["req-pubpriv"]).unwrap();
    assert!(
        result.flags
            == vec!["-L/lib/pubpriv", "-L/lib/private", "-L/lib/public", "-lreq", "-lprivate", "-lpublic"]
    );
}

#[test]
fn version_mismatch_query() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "cflags-abc.pc", "Name:X\nVersion:1.2.3\nDescription:X\n");

    let config: Config = [dir.path()].into_iter().collect();
    let pkgconf = PkgConfig::new(config);
    let err = pkgconf.cflags(&["cflags-abc < 1.2.3"]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Requested 'cflags-abc < 1.2.3' but version of cflags-abc is 1.2.3"));
}

#[test]
fn transitive_conflict_query() {
    let dir = tempdir().unwrap();
    write_pc(dir.path(), "foo.pc", "Name:foo\nVersion:1.2.4\nDescription:d\n");
    write_pc(dir.path(), "bar.pc", "Name:bar\nVersion:1\nDescription:d\nRequires.private: foo\n");
    write_pc(
        dir.path(),
        "conflicts-foo.pc",
        "Name:conflicts-foo\nVersion:1\nDescription:d\nRequires: bar\nConflicts: foo >= 1.2.3\n",
    );

    let config: Config = [dir.path()].into_iter().collect();
    let pkgconf = PkgConfig::new(config);
    let err = pkgconf.cflags(&["conflicts-foo"]).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Version '1.2.4' of foo creates a conflict"));
}
