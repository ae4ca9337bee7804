//! RPM-style version comparison and version predicates.

use std::fmt;

use thiserror::Error;

use crate::internal::macros::bail;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("Comparison operator but no version after package name '{0}' in file '{1}'")]
    OperatorWithoutVersion(String, String),

    #[error("Unknown version comparison operator '{0}' after package name '{1}' in file '{2}'")]
    UnknownOperator(String, String, String),

    #[error("Empty package name in Requires or Conflicts in file '{0}'")]
    EmptyName(String),

    #[error("invalid version predicate argument '{0}'")]
    InvalidUserArg(String),
}

/// Compares two version strings the way RPM's `rpmvercmp` does: walk both
/// strings skipping non-alphanumeric runs, compare digit segments
/// numerically and alphabetic segments lexically, with digit segments always
/// outranking alphabetic ones.
pub fn compare(a: &str, b: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    if a == b {
        return Ordering::Equal;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    loop {
        while i < a.len() && !a[i].is_ascii_alphanumeric() {
            i += 1;
        }
        while j < b.len() && !b[j].is_ascii_alphanumeric() {
            j += 1;
        }

        if i >= a.len() || j >= b.len() {
            break;
        }

        if a[i].is_ascii_digit() && !b[j].is_ascii_digit() {
            return Ordering::Greater;
        }
        if !a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            return Ordering::Less;
        }

        if a[i].is_ascii_digit() {
            let start_a = i;
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            let start_b = j;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            let seg_a = &a[start_a..i];
            let seg_b = &b[start_b..j];
            let seg_a = strip_leading_zeros(seg_a);
            let seg_b = strip_leading_zeros(seg_b);
            match seg_a.len().cmp(&seg_b.len()) {
                Ordering::Equal => {
                    let ord = seg_a.iter().collect::<String>().cmp(&seg_b.iter().collect::<String>());
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                other => return other,
            }
        } else {
            let start_a = i;
            while i < a.len() && a[i].is_ascii_alphabetic() {
                i += 1;
            }
            let start_b = j;
            while j < b.len() && b[j].is_ascii_alphabetic() {
                j += 1;
            }
            let seg_a: String = a[start_a..i].iter().collect();
            let seg_b: String = b[start_b..j].iter().collect();
            let ord = seg_a.cmp(&seg_b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
    }

    let a_rest = i < a.len();
    let b_rest = j < b.len();
    a_rest.cmp(&b_rest)
}

fn strip_leading_zeros(seg: &[char]) -> &[char] {
    match seg.iter().position(|&c| c != '0') {
        Some(pos) => &seg[pos..],
        None => &seg[seg.len() - 1..],
    }
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Any,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Op::Eq),
            "!=" => Some(Op::Ne),
            "<" => Some(Op::Lt),
            "<=" => Some(Op::Le),
            ">" => Some(Op::Gt),
            ">=" => Some(Op::Ge),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Any => "",
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// A `{name, op, version}` constraint, e.g. `foo >= 1.2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPredicate {
    pub name: String,
    pub op: Op,
    pub version: String,
}

impl VersionPredicate {
    /// Does `v` satisfy this predicate?
    pub fn test(&self, v: &str) -> bool {
        if self.op == Op::Any {
            return true;
        }
        use std::cmp::Ordering::*;
        let ord = compare(v, &self.version);
        match self.op {
            Op::Any => true,
            Op::Eq => ord == Equal,
            Op::Ne => ord != Equal,
            Op::Lt => ord == Less,
            Op::Le => ord != Greater,
            Op::Gt => ord == Greater,
            Op::Ge => ord != Less,
        }
    }

    /// Parses a user-supplied module expression, e.g. `"foo"` or
    /// `"foo >= 1.2"`.
    pub fn parse_user_arg(arg: &str) -> Result<Self, Error> {
        let tokens: Vec<&str> = arg.split_whitespace().collect();
        match tokens.as_slice() {
            [name] => Ok(Self { name: name.to_string(), op: Op::Any, version: String::new() }),
            [name, op, version] => {
                let op = Op::parse(op).ok_or_else(|| Error::InvalidUserArg(arg.to_string()))?;
                Ok(Self { name: name.to_string(), op, version: version.to_string() })
            }
            _ => Err(Error::InvalidUserArg(arg.to_string())),
        }
    }

    /// Parses the comma-/whitespace-separated module list found in a `.pc`
    /// file's `Requires`/`Requires.private`/`Conflicts` field.
    pub fn parse_module_list(list: &str, pc_file: &str) -> Result<Vec<Self>, Error> {
        #[derive(PartialEq)]
        enum State {
            Outside,
            InName,
            BeforeOp,
            InOp,
            AfterOp,
            InVersion,
        }

        let mut predicates = Vec::new();
        let mut state = State::Outside;
        let mut name = String::new();
        let mut op = String::new();
        let mut version = String::new();

        let flush = |name: &mut String,
                     op: &mut String,
                     version: &mut String,
                     predicates: &mut Vec<Self>|
         -> Result<(), Error> {
            if name.is_empty() {
                bail!(Error::EmptyName(pc_file.to_string()));
            }
            if !op.is_empty() && version.is_empty() {
                return Err(Error::OperatorWithoutVersion(name.clone(), pc_file.to_string()));
            }
            let parsed_op = if op.is_empty() {
                Op::Any
            } else {
                Op::parse(op).ok_or_else(|| {
                    Error::UnknownOperator(op.clone(), name.clone(), pc_file.to_string())
                })?
            };
            predicates.push(Self { name: std::mem::take(name), op: parsed_op, version: std::mem::take(version) });
            op.clear();
            Ok(())
        };

        let is_sep = |c: char| c == ',' || c.is_whitespace();
        let is_op_char = |c: char| matches!(c, '=' | '!' | '<' | '>');

        // Tracks whether we've already crossed one comma since the last name
        // character; seeing a second one with nothing but whitespace between
        // means an entry was left empty, e.g. "foo,, bar".
        let mut comma_seen = false;

        for c in list.chars() {
            match state {
                State::Outside => {
                    if c == ',' {
                        if comma_seen {
                            bail!(Error::EmptyName(pc_file.to_string()));
                        }
                        comma_seen = true;
                    } else if !c.is_whitespace() {
                        comma_seen = false;
                        name.push(c);
                        state = State::InName;
                    }
                }
                State::InName => {
                    if c == ',' {
                        comma_seen = true;
                        state = State::BeforeOp;
                    } else if c.is_whitespace() {
                        state = State::BeforeOp;
                    } else if is_op_char(c) {
                        op.push(c);
                        state = State::InOp;
                    } else {
                        name.push(c);
                    }
                }
                State::BeforeOp => {
                    if c == ',' {
                        if comma_seen {
                            bail!(Error::EmptyName(pc_file.to_string()));
                        }
                        comma_seen = true;
                    } else if c.is_whitespace() {
                        // keep waiting
                    } else if is_op_char(c) {
                        op.push(c);
                        state = State::InOp;
                    } else {
                        flush(&mut name, &mut op, &mut version, &mut predicates)?;
                        comma_seen = false;
                        name.push(c);
                        state = State::InName;
                    }
                }
                State::InOp => {
                    if is_op_char(c) {
                        op.push(c);
                    } else if is_sep(c) {
                        state = State::AfterOp;
                    } else {
                        version.push(c);
                        state = State::InVersion;
                    }
                }
                State::AfterOp => {
                    if is_sep(c) {
                        continue;
                    } else {
                        version.push(c);
                        state = State::InVersion;
                    }
                }
                State::InVersion => {
                    if is_sep(c) {
                        flush(&mut name, &mut op, &mut version, &mut predicates)?;
                        comma_seen = c == ',';
                        state = State::Outside;
                    } else {
                        version.push(c);
                    }
                }
            }
        }
        match state {
            State::Outside => {}
            _ => flush(&mut name, &mut op, &mut version, &mut predicates)?,
        }
        Ok(predicates)
    }
}

impl fmt::Display for VersionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.op == Op::Any {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {} {}", self.name, self.op, self.version)
        }
    }
}

#[cfg(test)]
#[path = "version.test.rs"]
mod test;
