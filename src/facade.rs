//! Public entry point: `cflags`, `libs` and `staticLibs` queries.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;
use crate::merger::{self, QueryKind};
use crate::package::parser;
use crate::resolver::{self, Resolver};
use crate::version::{self, VersionPredicate};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    VersionPredicate(#[from] version::Error),

    #[error(transparent)]
    Resolve(#[from] resolver::Error),

    #[error(transparent)]
    Parse(#[from] parser::Error),

    #[error("Requested '{requested}' but version of {name} is {version}")]
    RequestedVersionMismatch { requested: String, name: String, version: String },
}

/// The result of a query: the ordered token sequence plus every `.pc` file
/// read while computing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryResult {
    pub flags: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Computes compiler/linker flags for named modules.
pub struct PkgConfig {
    config: Config,
}

impl PkgConfig {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn cflags(&self, names: &[impl AsRef<str>]) -> Result<QueryResult, QueryError> {
        self.query(names, QueryKind::Cflags, false)
    }

    pub fn libs(&self, names: &[impl AsRef<str>]) -> Result<QueryResult, QueryError> {
        self.query(names, QueryKind::Libs, true)
    }

    pub fn static_libs(&self, names: &[impl AsRef<str>]) -> Result<QueryResult, QueryError> {
        self.query(names, QueryKind::StaticLibs, false)
    }

    fn query(
        &self,
        exprs: &[impl AsRef<str>],
        kind: QueryKind,
        ignore_private_reqs: bool,
    ) -> Result<QueryResult, QueryError> {
        let mut resolver = Resolver::new(&self.config, ignore_private_reqs);
        let mut roots = Vec::with_capacity(exprs.len());

        for expr in exprs {
            let expr = expr.as_ref();
            let predicate = VersionPredicate::parse_user_arg(expr)?;
            let pkg = resolver.load(&predicate.name, true)?.expect("must_exist load never returns None");

            if !predicate.test(&pkg.version) {
                return Err(QueryError::RequestedVersionMismatch {
                    requested: expr.to_string(),
                    name: predicate.name.clone(),
                    version: pkg.version.clone(),
                });
            }
            roots.push(pkg);
        }

        let flags = merger::merge(&roots, kind);
        let files = resolver.files();
        Ok(QueryResult { flags, files })
    }
}

#[cfg(test)]
#[path = "facade.test.rs"]
mod test;
