//! Parses a stream of logical lines from a `.pc` file into a [`Package`].

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::arg_splitter;
use crate::flag;
use crate::internal::macros::bail;
use crate::text::{LineReader, TextLoader};
use crate::version::{self, VersionPredicate};

use super::Package;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Text(#[from] crate::text::Error),

    #[error("Couldn't parse {0} field into an argument vector: {1}")]
    ArgSplit(&'static str, #[source] arg_splitter::Error),

    #[error(transparent)]
    VersionPredicate(#[from] version::Error),

    #[error("Package '{0}' has no {1}: field")]
    MissingField(String, &'static str),

    #[error("{0} field occurs more than once in '{1}'")]
    DuplicateField(&'static str, String),

    #[error("Duplicate definition of variable '{0}' in '{1}'")]
    DuplicateVariable(String, String),

    #[error("Variable '{0}' not defined in '{1}'")]
    UndefinedVariable(String, String),

    #[error("Package '{requirer}' requires '{predicate}' but version of {required_name} is {required_version}{suggestion}")]
    RequiredVersionMismatch {
        requirer: String,
        predicate: String,
        required_name: String,
        required_version: String,
        suggestion: String,
    },

    #[error("Version '{version}' of {name} creates a conflict. ({predicate} conflicts with {self_key} '{self_version}')")]
    Conflict {
        version: String,
        name: String,
        predicate: String,
        self_key: String,
        self_version: String,
    },
}

fn tag_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z0-9_.]+)\s*(:|=)\s*(.*)$").unwrap())
}

/// Parses the logical lines read from `pc_file` (via `loader`) into a
/// [`Package`] with `key`/`pc_file`/`path_position` already set.
///
/// `ignore_private_reqs` silently drops `Requires.private`, used by the Libs
/// query where private transitive requirements are undesired.
pub(crate) fn parse(
    mut package: Package,
    loader: &mut TextLoader,
    ignore_private_reqs: bool,
) -> Result<Package, Error> {
    let reader = LineReader::new();
    let path = package.pc_file_display();

    let mut cflags_seen = false;
    let mut libs_seen = false;
    let mut libs_private_seen = false;
    let mut conflicts_seen = false;
    let mut name_seen = false;
    let mut version_seen = false;
    let mut description_seen = false;
    let mut url_seen = false;

    while let Some(line) = reader.read_line(loader)? {
        let line = line.trim();
        let Some(caps) = tag_line_re().captures(line) else {
            continue;
        };
        let tag = &caps[1];
        let sep = &caps[2];
        let rest = caps[3].trim();

        if sep == "=" {
            if package.vars.contains_key(tag) {
                return Err(Error::DuplicateVariable(tag.to_string(), path.clone()));
            }
            let value = substitute(rest, &package, &path)?;
            package.vars.insert(tag.to_string(), value);
            continue;
        }

        match tag {
            "Name" => {
                if name_seen {
                    bail!(Error::DuplicateField("Name", path.clone()));
                }
                name_seen = true;
                package.name = substitute(rest, &package, &path)?;
            }
            "Version" => {
                if version_seen {
                    bail!(Error::DuplicateField("Version", path.clone()));
                }
                version_seen = true;
                package.version = substitute(rest, &package, &path)?;
            }
            "Description" => {
                if description_seen {
                    bail!(Error::DuplicateField("Description", path.clone()));
                }
                description_seen = true;
                package.description = substitute(rest, &package, &path)?;
            }
            "URL" => {
                if url_seen {
                    bail!(Error::DuplicateField("URL", path.clone()));
                }
                url_seen = true;
                package.url = Some(substitute(rest, &package, &path)?);
            }
            "Cflags" | "CFlags" => {
                if cflags_seen && !package.cflags.is_empty() {
                    bail!(Error::DuplicateField("Cflags", path.clone()));
                }
                cflags_seen = true;
                let value = substitute(rest, &package, &path)?;
                package.cflags = flag::classify_cflags(&split_args(&value, "Cflags")?);
            }
            "Libs" => {
                if libs_seen {
                    bail!(Error::DuplicateField("Libs", path.clone()));
                }
                libs_seen = true;
                let value = substitute(rest, &package, &path)?;
                let flags = flag::classify_libs(&split_args(&value, "Libs")?);
                package.libs = flags.clone();
                package.private_libs.extend(flags);
            }
            "Libs.private" => {
                if libs_private_seen {
                    bail!(Error::DuplicateField("Libs.private", path.clone()));
                }
                libs_private_seen = true;
                let value = substitute(rest, &package, &path)?;
                let flags = flag::classify_libs(&split_args(&value, "Libs.private")?);
                package.private_libs.extend(flags);
            }
            "Requires" => {
                let value = substitute(rest, &package, &path)?;
                package.requires_entries = VersionPredicate::parse_module_list(&value, &path)?;
            }
            "Requires.private" => {
                if ignore_private_reqs {
                    continue;
                }
                let value = substitute(rest, &package, &path)?;
                package.requires_private_entries = VersionPredicate::parse_module_list(&value, &path)?;
            }
            "Conflicts" => {
                let value = substitute(rest, &package, &path)?;
                let parsed = VersionPredicate::parse_module_list(&value, &path)?;
                if conflicts_seen {
                    if package.conflicts.is_empty() || !parsed.is_empty() {
                        bail!(Error::DuplicateField("Conflicts", path.clone()));
                    }
                    // Tolerated: a later empty Conflicts after a non-empty one.
                } else {
                    conflicts_seen = true;
                    package.conflicts = parsed;
                }
            }
            _ => {} // unknown tags are ignored for forward compatibility
        }
    }

    Ok(package)
}

fn split_args(value: &str, field: &'static str) -> Result<Vec<String>, Error> {
    if value.trim().is_empty() {
        return Ok(vec![]);
    }
    arg_splitter::split(value).map_err(|e| Error::ArgSplit(field, e))
}

/// Resolves `$$` and `${var}` within a single field value.
fn substitute(value: &str, package: &Package, path: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c2 in chars.by_ref() {
                    if c2 == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c2);
                }
                if !closed {
                    out.push_str("${");
                    out.push_str(&name);
                    continue;
                }
                match package.vars.get(&name) {
                    Some(v) => out.push_str(v),
                    None => return Err(Error::UndefinedVariable(name, path.to_string())),
                }
            }
            _ => out.push('$'),
        }
    }
    Ok(out)
}

/// Checks required-version predicates and transitive conflicts once
/// `requires`/`requires_private`/`required_versions` have been filled in by
/// the resolver.
pub(crate) fn verify(package: &Package) -> Result<(), Error> {
    if package.name.is_empty() {
        bail!(Error::MissingField(package.key.clone(), "Name"));
    }
    if package.version.is_empty() {
        bail!(Error::MissingField(package.key.clone(), "Version"));
    }
    if package.description.is_empty() {
        bail!(Error::MissingField(package.key.clone(), "Description"));
    }

    for dep in &package.requires_private {
        if let Some(pred) = package.required_versions.get(&dep.key) {
            if !pred.test(&dep.version) {
                let suggestion = match &dep.url {
                    Some(url) => format!("\nYou may find new versions of {} at {}", dep.name, url),
                    None => String::new(),
                };
                return Err(Error::RequiredVersionMismatch {
                    requirer: package.name.clone(),
                    predicate: pred.to_string(),
                    required_name: dep.name.clone(),
                    required_version: dep.version.clone(),
                    suggestion,
                });
            }
        }
    }

    for entry in transitive_closure(&package.requires_private) {
        for pred in &package.conflicts {
            if pred.name == entry.key && pred.test(&entry.version) {
                return Err(Error::Conflict {
                    version: entry.version.clone(),
                    name: entry.name.clone(),
                    predicate: pred.to_string(),
                    self_key: package.key.clone(),
                    self_version: package.version.clone(),
                });
            }
        }
    }

    Ok(())
}

fn transitive_closure(roots: &[Rc<Package>]) -> Vec<Rc<Package>> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    let mut stack: Vec<Rc<Package>> = roots.to_vec();

    while let Some(p) = stack.pop() {
        if visited.insert(p.key.clone()) {
            stack.extend(p.requires_private.iter().cloned());
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
#[path = "parser.test.rs"]
mod test;
