//! Query configuration.

use std::path::{Path, PathBuf};

/// Configures a [`PkgConfig`](crate::PkgConfig) instance.
///
/// The only recognized option is an ordered list of directories consulted,
/// in order, for module-by-name lookups.
#[derive(Debug, Clone, Default)]
pub struct Config {
    search_paths: Vec<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory to the end of the search path.
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.search_paths.push(path.into());
        self
    }

    /// Replaces the whole search path.
    pub fn with_search_paths<I, P>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl<P: AsRef<Path>> FromIterator<P> for Config {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut config = Self::new();
        config.with_search_paths(iter.into_iter().map(|p| p.as_ref().to_path_buf()));
        config
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod test;
