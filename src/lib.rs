//! Computes compiler and linker flags for named modules by parsing
//! `pkg-config` `.pc` metadata files, following `Requires`/`Conflicts`
//! declarations and version constraints the way the reference `pkg-config`
//! tool does.
//!
//! The entry point is [`PkgConfig`]; see its `cflags`/`libs`/`static_libs`
//! methods.

// Every module here uses one flat `thiserror` enum per error domain rather
// than boxing to shrink `Result`'s `Err` arm; consistent with how errors are
// modeled throughout this crate.
#![allow(clippy::result_large_err)]

pub mod arg_splitter;
pub mod config;
pub mod facade;
pub mod flag;
pub mod merger;
pub mod package;
pub mod resolver;
pub mod text;
pub mod version;

mod cursor;
mod internal;

pub use config::Config;
pub use facade::{PkgConfig, QueryError, QueryResult};
pub use package::Package;
