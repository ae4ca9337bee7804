//! Locates `.pc` modules by name, loads and caches them, and recursively
//! resolves their `Requires`/`Requires.private` dependencies.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::package::{parser, Package};
use crate::text::TextLoader;

/// The key under which the synthetic `pkg-config` package is pre-populated
/// in every fresh [`PackageCache`], so `.pc` files may declare a dependency
/// on it like any other module.
pub const SYNTHETIC_PKG_CONFIG_KEY: &str = "pkg-config";

#[derive(Debug, Error)]
pub enum Error {
    #[error("Package \"{0}\" was not found in the PkgConfig searchPath")]
    NotFound(String),

    #[error("Package '{dep}', required by '{requirer}', not found")]
    MissingDependency { dep: String, requirer: String },

    #[error(transparent)]
    Text(#[from] crate::text::Error),

    #[error(transparent)]
    Parse(#[from] parser::Error),
}

/// Holds every package loaded during a single top-level query, keyed by the
/// module's computed basename `key`. Pre-populated with a synthetic
/// `pkg-config` entry. Discarded when the query returns.
pub struct PackageCache {
    entries: HashMap<String, Rc<Package>>,
}

impl PackageCache {
    pub fn new() -> Self {
        let mut pkg = Package::new(
            SYNTHETIC_PKG_CONFIG_KEY.to_string(),
            PathBuf::from("<builtin>/pkg-config.pc"),
            0,
        );
        pkg.name = "pkg-config".to_string();
        pkg.version = "0.29.2".to_string();
        pkg.description = "pkg-config is a system for managing library compile/link flags".to_string();
        pkg.url = Some("https://gitlab.freedesktop.org/pkg-config/pkg-config".to_string());

        let mut entries = HashMap::new();
        entries.insert(SYNTHETIC_PKG_CONFIG_KEY.to_string(), Rc::new(pkg));
        Self { entries }
    }

    fn get(&self, key: &str) -> Option<Rc<Package>> {
        self.entries.get(key).cloned()
    }

    fn insert(&mut self, key: String, pkg: Rc<Package>) {
        if self.entries.contains_key(&key) {
            warn!(%key, "overwriting a previously cached package with the same key");
        }
        self.entries.insert(key, pkg);
    }
}

impl Default for PackageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves modules against a [`Config`]'s search path for a single query,
/// caching packages as they're loaded.
pub struct Resolver<'a> {
    config: &'a Config,
    cache: PackageCache,
    /// Whether `Requires.private` should be silently dropped while parsing,
    /// as the `libs` query wants.
    ignore_private_reqs: bool,
    /// Keys of every package actually returned by `load`, as opposed to
    /// merely present in `cache` (which always carries the synthetic
    /// `pkg-config` entry regardless of whether it was referenced).
    touched: HashSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a Config, ignore_private_reqs: bool) -> Self {
        Self { config, cache: PackageCache::new(), ignore_private_reqs, touched: HashSet::new() }
    }

    /// Absolute paths of every `.pc` file actually loaded (or referenced via
    /// the cache) during this query, with no duplicates.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .touched
            .iter()
            .filter_map(|key| self.cache.get(key))
            .map(|pkg| pkg.pc_file.clone())
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Implements the `load` algorithm: cache lookup by the literal `name`
    /// given, `-uninstalled` preference, search-path walk, recursive
    /// dependency resolution and verification.
    pub fn load(&mut self, name: &str, must_exist: bool) -> Result<Option<Rc<Package>>, Error> {
        if let Some(pkg) = self.cache.get(name) {
            debug!(name, "package already in cache");
            self.touched.insert(pkg.key.clone());
            return Ok(Some(pkg));
        }

        if let Some(stem) = name.strip_suffix(".pc") {
            let path = PathBuf::from(name);
            if !path.is_file() {
                return if must_exist { Err(Error::NotFound(name.to_string())) } else { Ok(None) };
            }
            let key = Path::new(stem)
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| stem.to_string());
            return self.load_from_path(path, key, 0);
        }

        if !name.ends_with("-uninstalled") {
            let uninstalled_name = format!("{name}-uninstalled");
            if let Some(pkg) = self.load(&uninstalled_name, false)? {
                debug!(name, "preferring -uninstalled package");
                return Ok(Some(pkg));
            }
        }

        for (i, dir) in self.config.search_paths().iter().enumerate() {
            let candidate = dir.join(format!("{name}.pc"));
            if candidate.is_file() {
                return self.load_from_path(candidate, name.to_string(), i + 1);
            }
        }

        if must_exist {
            Err(Error::NotFound(name.to_string()))
        } else {
            Ok(None)
        }
    }

    fn load_from_path(
        &mut self,
        path: PathBuf,
        key: String,
        path_position: usize,
    ) -> Result<Option<Rc<Package>>, Error> {
        let abs_path = path.canonicalize().unwrap_or(path);
        debug!(path = %abs_path.display(), "loading .pc file");

        let mut package = Package::new(key.clone(), abs_path.clone(), path_position);
        if let Some(dir) = abs_path.parent() {
            package.vars.insert("pcfiledir".to_string(), dir.to_string_lossy().into_owned());
        }
        if abs_path.to_string_lossy().contains("uninstalled.pc") {
            package.uninstalled = true;
        }

        let mut loader = TextLoader::load(&abs_path)?;
        let mut package = parser::parse(package, &mut loader, self.ignore_private_reqs)?;

        let requires_entries = package.requires_entries.clone();
        for pred in requires_entries {
            let dep = self.require(&pred.name, &package.name)?;
            package.required_versions.insert(dep.key.clone(), pred);
            package.requires.push(dep);
        }
        let requires_private_entries = package.requires_private_entries.clone();
        for pred in requires_private_entries {
            let dep = self.require(&pred.name, &package.name)?;
            package.required_versions.insert(dep.key.clone(), pred);
            package.requires_private.push(dep);
        }
        package.requires_private.extend(package.requires.iter().cloned());

        parser::verify(&package)?;

        let package = Rc::new(package);
        self.touched.insert(key.clone());
        self.cache.insert(key, Rc::clone(&package));
        Ok(Some(package))
    }

    fn require(&mut self, dep_name: &str, requirer: &str) -> Result<Rc<Package>, Error> {
        self.load(dep_name, false)?.ok_or_else(|| Error::MissingDependency {
            dep: dep_name.to_string(),
            requirer: requirer.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "resolver.test.rs"]
mod test;
