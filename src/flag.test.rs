use super::*;
use crate::internal::test_utils::assert;

fn toks(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

#[test]
fn classifies_include_flag() {
    let flags = classify_cflags(&toks(&["-Iinclude/dir"]));
    assert!(flags == vec![Flag::new(FlagClass::CflagsI, toks(&["-Iinclude/dir"]))]);
}

#[test]
fn classifies_fused_bare_include_flag() {
    let flags = classify_cflags(&toks(&["-I  include/dir"]));
    assert!(flags == vec![Flag::new(FlagClass::CflagsI, toks(&["-I  include/dir"]))]);
}

#[test]
fn classifies_two_token_include_flags() {
    let flags = classify_cflags(&toks(&["-isystem", "s1", "-idirafter", "d1"]));
    assert!(
        flags
            == vec![
                Flag::new(FlagClass::CflagsI, toks(&["-isystem", "s1"])),
                Flag::new(FlagClass::CflagsI, toks(&["-idirafter", "d1"])),
            ]
    );
}

#[test]
fn lone_trailing_isystem_is_cflags_other() {
    let flags = classify_cflags(&toks(&["-isystem"]));
    assert!(flags == vec![Flag::new(FlagClass::CflagsOther, toks(&["-isystem"]))]);
}

#[test]
fn other_cflags_are_passed_through() {
    let flags = classify_cflags(&toks(&["--other"]));
    assert!(flags == vec![Flag::new(FlagClass::CflagsOther, toks(&["--other"]))]);
}

#[test]
fn classifies_small_l_and_big_l() {
    let flags = classify_libs(&toks(&["-lfoo", "-L/lib"]));
    assert!(
        flags
            == vec![
                Flag::new(FlagClass::LibsSmallL, toks(&["-lfoo"])),
                Flag::new(FlagClass::LibsL, toks(&["-L/lib"])),
            ]
    );
}

#[test]
fn lib_colon_prefix_is_not_small_l() {
    let flags = classify_libs(&toks(&["-lib:foo.lib"]));
    assert!(flags == vec![Flag::new(FlagClass::LibsOther, toks(&["-lib:foo.lib"]))]);
}

#[test]
fn framework_flag_consumes_its_argument() {
    let flags = classify_libs(&toks(&["-framework", "CoreFoundation"]));
    assert!(flags == vec![Flag::new(FlagClass::LibsOther, toks(&["-framework", "CoreFoundation"]))]);
}
