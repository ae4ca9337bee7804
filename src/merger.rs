//! Builds the final ordered token sequence for a query: expand the
//! dependency DAG, classify and filter flags, sort include/library paths by
//! search-path position, and strip consecutive duplicates.

use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::flag::{Flag, FlagClass};
use crate::package::Package;

/// Which of the three public queries is being run, and how it should be
/// merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Cflags,
    Libs,
    StaticLibs,
}

impl QueryKind {
    fn include_private(self) -> bool {
        match self {
            QueryKind::Cflags => true,
            QueryKind::Libs => false,
            QueryKind::StaticLibs => true,
        }
    }

    fn source(self, pkg: &Package) -> &[Flag] {
        match self {
            QueryKind::Cflags => &pkg.cflags,
            QueryKind::Libs => &pkg.libs,
            QueryKind::StaticLibs => &pkg.private_libs,
        }
    }

    /// Passes to run in order: a class mask plus whether that pass should be
    /// stable-sorted by the owning package's `path_position`.
    fn passes(self) -> [(&'static [FlagClass], bool); 2] {
        match self {
            QueryKind::Cflags => {
                [(&[FlagClass::CflagsOther], false), (&[FlagClass::CflagsI], true)]
            }
            QueryKind::Libs | QueryKind::StaticLibs => [
                (&[FlagClass::LibsL], true),
                (&[FlagClass::LibsOther, FlagClass::LibsSmallL], false),
            ],
        }
    }
}

/// Computes the final flattened token sequence for `roots` (in the order the
/// user requested them) under `query`.
pub fn merge(roots: &[Rc<Package>], query: QueryKind) -> Vec<String> {
    let expanded = expand(roots, query.include_private());

    let mut sorted = expanded.clone();
    sorted.sort_by_key(|pkg| pkg.path_position);

    let mut tokens = Vec::new();
    for (classes, sort_by_path) in query.passes() {
        let order = if sort_by_path { &sorted } else { &expanded };
        let mut matched: Vec<(usize, &Flag)> = Vec::new();
        for (idx, pkg) in order.iter().enumerate() {
            for flag in query.source(pkg) {
                if classes.contains(&flag.class) {
                    matched.push((idx, flag));
                }
            }
        }
        // Within a path-sorted pass, single-token flags (plain `-I`/`-L`)
        // sort ahead of two-token ones (`-idirafter`/`-isystem`/`-framework`)
        // within the same package, since the latter widen the search scope
        // and must not shift ahead of an explicit directory flag.
        if sort_by_path {
            matched.sort_by_key(|&(idx, f)| (idx, f.args.len() > 1));
        }

        let mut last: Option<&Flag> = None;
        for (_, flag) in matched {
            if last == Some(flag) {
                continue;
            }
            tokens.extend(flag.args.iter().cloned());
            last = Some(flag);
        }
    }
    tokens
}

/// Post-order expansion of the dependency DAG: for each root in reverse
/// request order, recurse into its dependencies (reversed), then prepend the
/// root itself if not already visited.
fn expand(roots: &[Rc<Package>], include_private: bool) -> Vec<Rc<Package>> {
    let mut visited = HashSet::new();
    let mut expanded = VecDeque::new();

    for root in roots.iter().rev() {
        visit(root, include_private, &mut visited, &mut expanded);
    }
    expanded.into_iter().collect()
}

fn visit(
    pkg: &Rc<Package>,
    include_private: bool,
    visited: &mut HashSet<String>,
    expanded: &mut VecDeque<Rc<Package>>,
) {
    let deps: &[Rc<Package>] = if include_private { &pkg.requires_private } else { &pkg.requires };
    for dep in deps.iter().rev() {
        visit(dep, include_private, visited, expanded);
    }
    if visited.insert(pkg.key.clone()) {
        expanded.push_front(Rc::clone(pkg));
    }
}

#[cfg(test)]
#[path = "merger.test.rs"]
mod test;
