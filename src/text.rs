//! Reading `.pc` file contents and assembling them into logical lines.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::internal::macros::bail;

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read file '{1}'")]
    ReadFile(#[source] io::Error, std::path::PathBuf),

    #[error("ungetChar called with '{0}' but the last char returned was {1:?}")]
    UngetMismatch(char, Option<char>),
}

////////////////////////////////////////////////////////////////////////////////

/// Reads a file's full contents once and exposes it as a char stream with
/// single-character pushback.
pub(crate) struct TextLoader {
    chars: Vec<char>,
    pos: usize,
    pushback: Option<char>,
    last_returned: Option<char>,
}

impl TextLoader {
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::ReadFile(e, path.to_owned()))?;
        Ok(Self::from_str(&text))
    }

    pub(crate) fn from_str(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
            pushback: None,
            last_returned: None,
        }
    }

    /// Returns the next character, or `None` at EOF.
    pub(crate) fn get_char(&mut self) -> Option<char> {
        let c = if let Some(c) = self.pushback.take() {
            Some(c)
        } else {
            let c = self.chars.get(self.pos).copied();
            if c.is_some() {
                self.pos += 1;
            }
            c
        };
        self.last_returned = c;
        c
    }

    /// Pushes a single character back so the next `get_char` returns it
    /// again. `c` must equal the char most recently returned by `get_char`.
    pub(crate) fn unget_char(&mut self, c: char) -> Result<(), Error> {
        if self.last_returned != Some(c) {
            bail!(Error::UngetMismatch(c, self.last_returned));
        }
        self.pushback = Some(c);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////

enum LineState {
    Default,
    Comment,
    /// Just consumed a `\` outside of a comment.
    Quoted,
}

/// Assembles logical lines from a [`TextLoader`], joining physical lines on
/// trailing `\` continuation and stripping `#` comments.
///
/// The CRLF handling is intentionally asymmetric between the default and
/// quoted states (see module docs / SPEC_FULL.md §9): in the default state
/// only a `\n` immediately followed by `\r` is treated as a single line
/// terminator, while in the quoted (continuation) state either order of
/// `\r`/`\n` is recognized. This mirrors the reference tool and is covered
/// by tests; it is not a bug to "fix".
pub(crate) struct LineReader;

impl LineReader {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Reads one logical line. Returns `Ok(None)` when there are no more
    /// lines (the loader was already at EOF with nothing pending).
    pub(crate) fn read_line(&self, loader: &mut TextLoader) -> Result<Option<String>, Error> {
        let mut line = String::new();
        let mut state = LineState::Default;
        let mut made_progress = false;

        loop {
            let Some(c) = loader.get_char() else {
                if state_is_quoted(&state) {
                    line.push('\\');
                }
                return Ok(if made_progress || !line.is_empty() {
                    Some(line)
                } else {
                    None
                });
            };
            made_progress = true;

            match state {
                LineState::Default => match c {
                    '#' => state = LineState::Comment,
                    '\\' => state = LineState::Quoted,
                    '\n' => {
                        consume_companion(loader, '\r')?;
                        return Ok(Some(line));
                    }
                    _ => line.push(c),
                },
                LineState::Comment => {
                    if c == '\n' {
                        consume_companion(loader, '\r')?;
                        return Ok(Some(line));
                    }
                    // else: discard
                }
                LineState::Quoted => match c {
                    '#' => {
                        line.push('#');
                        state = LineState::Default;
                    }
                    '\r' => {
                        consume_companion(loader, '\n')?;
                        state = LineState::Default;
                    }
                    '\n' => {
                        consume_companion(loader, '\r')?;
                        state = LineState::Default;
                    }
                    other => {
                        line.push('\\');
                        line.push(other);
                        state = LineState::Default;
                    }
                },
            }
        }
    }
}

fn state_is_quoted(state: &LineState) -> bool {
    matches!(state, LineState::Quoted)
}

/// Peeks the next char; if it equals `companion`, consumes it. Otherwise
/// pushes it back for the next read.
fn consume_companion(loader: &mut TextLoader, companion: char) -> Result<(), Error> {
    if let Some(c) = loader.get_char() {
        if c != companion {
            loader.unget_char(c)?;
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
#[path = "text.test.rs"]
mod test;
