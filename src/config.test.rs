use super::*;
use crate::internal::test_utils::assert;

#[test]
fn builder_appends_in_order() {
    let mut config = Config::new();
    config.add_search_path("/a").add_search_path("/b");
    assert!(config.search_paths() == [PathBuf::from("/a"), PathBuf::from("/b")]);
}

#[test]
fn with_search_paths_replaces() {
    let mut config = Config::new();
    config.add_search_path("/a");
    config.with_search_paths(["/x", "/y"]);
    assert!(config.search_paths() == [PathBuf::from("/x"), PathBuf::from("/y")]);
}

#[test]
fn from_iterator() {
    let config: Config = ["/a", "/b"].into_iter().collect();
    assert!(config.search_paths() == [PathBuf::from("/a"), PathBuf::from("/b")]);
}
