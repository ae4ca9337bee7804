use std::path::PathBuf;

use super::*;
use crate::internal::test_utils::assert;

fn flag(class: FlagClass, args: &[&str]) -> Flag {
    Flag::new(class, args.iter().map(|s| s.to_string()).collect())
}

fn pkg(key: &str, path_position: usize) -> Package {
    let mut p = Package::new(key.into(), PathBuf::from(format!("/tmp/{key}.pc")), path_position);
    p.name = key.into();
    p.version = "1".into();
    p.description = "d".into();
    p
}

fn tokens_of(flags: &[&str]) -> Vec<String> {
    flags.iter().map(|s| s.to_string()).collect()
}

#[test]
fn cflags_emits_other_before_sorted_include() {
    let mut p = pkg("cflags-i-other", 1);
    p.cflags = vec![
        flag(FlagClass::CflagsI, &["-isystem", "isystem/option"]),
        flag(FlagClass::CflagsI, &["-idirafter", "idirafter/option"]),
        flag(FlagClass::CflagsI, &["-I  include/dir"]),
        flag(FlagClass::CflagsOther, &["--other"]),
    ];
    let roots = vec![Rc::new(p)];

    let out = merge(&roots, QueryKind::Cflags);
    assert!(
        out == tokens_of(&[
            "--other",
            "-I  include/dir",
            "-isystem",
            "isystem/option",
            "-idirafter",
            "idirafter/option",
        ])
    );
}

#[test]
fn cflags_include_flags_are_sorted_by_path_position_across_packages() {
    let mut mod1 = pkg("mod1", 2);
    mod1.cflags = vec![
        flag(FlagClass::CflagsOther, &["--other1"]),
        flag(FlagClass::CflagsOther, &["--another1"]),
        flag(FlagClass::CflagsI, &["-Iinclude/d1"]),
        flag(FlagClass::CflagsI, &["-isystem", "s1"]),
    ];
    let mut mod2 = pkg("mod2", 3);
    mod2.cflags = vec![
        flag(FlagClass::CflagsOther, &["--other2"]),
        flag(FlagClass::CflagsOther, &["--another2"]),
        flag(FlagClass::CflagsI, &["-Iinclude/d2"]),
        flag(FlagClass::CflagsI, &["-isystem", "s2"]),
    ];

    let roots = vec![Rc::new(mod2), Rc::new(mod1)];
    let out = merge(&roots, QueryKind::Cflags);

    assert!(
        out == tokens_of(&[
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
        ])
    );
}

#[test]
fn static_libs_includes_private_closure() {
    let mut pubpriv = pkg("req-pubpriv", 1);
    pubpriv.requires_entries.clear();

    let public = Rc::new({
        let mut p = pkg("public", 1);
        p.libs = vec![flag(FlagClass::LibsL, &["-L/lib/public"]), flag(FlagClass::LibsSmallL, &["-lpublic"])];
        p.private_libs = p.libs.clone();
        p
    });
    let private = Rc::new({
        let mut p = pkg("private", 1);
        p.libs = vec![];
        p.private_libs = vec![flag(FlagClass::LibsL, &["-L/lib/private"]), flag(FlagClass::LibsSmallL, &["-lprivate"])];
        p
    });

    pubpriv.requires = vec![Rc::clone(&public)];
    pubpriv.private_libs = vec![flag(FlagClass::LibsL, &["-L/lib/pubpriv"]), flag(FlagClass::LibsSmallL, &["-lreq"])];
    pubpriv.requires_private = vec![Rc::clone(&private), Rc::clone(&public)];

    let roots = vec![Rc::new(pubpriv)];
    let out = merge(&roots, QueryKind::StaticLibs);

    assert!(
        out == tokens_of(&[
            "-L/lib/pubpriv",
            "-L/lib/private",
            "-L/lib/public",
            "-lreq",
            "-lprivate",
            "-lpublic",
        ])
    );
}

#[test]
fn consecutive_equal_flags_are_deduped() {
    let mut p = pkg("foo", 1);
    p.cflags = vec![
        flag(FlagClass::CflagsOther, &["-a"]),
        flag(FlagClass::CflagsOther, &["-a"]),
        flag(FlagClass::CflagsOther, &["-b"]),
    ];
    let roots = vec![Rc::new(p)];
    let out = merge(&roots, QueryKind::Cflags);
    assert!(out == tokens_of(&["-a", "-b"]));
}

#[test]
fn libs_query_does_not_include_private_libs() {
    let mut p = pkg("foo", 1);
    p.libs = vec![flag(FlagClass::LibsSmallL, &["-lpub"])];
    p.private_libs = vec![flag(FlagClass::LibsSmallL, &["-lpub"]), flag(FlagClass::LibsSmallL, &["-lpriv"])];
    let roots = vec![Rc::new(p)];
    let out = merge(&roots, QueryKind::Libs);
    assert!(out == tokens_of(&["-lpub"]));
}
