use std::path::PathBuf;

use super::*;
use crate::internal::test_utils::assert;

#[test]
fn new_package_has_empty_fields() {
    let pkg = Package::new("foo".into(), PathBuf::from("/tmp/foo.pc"), 1);
    assert!(pkg.key == "foo");
    assert!(pkg.path_position == 1);
    assert!(pkg.name.is_empty());
    assert!(pkg.cflags.is_empty());
    assert!(pkg.requires.is_empty());
}
