//! Shell-style argument splitting: tokenizing a `Cflags`/`Libs` field body
//! into words, then unquoting each word.

use thiserror::Error;

use crate::cursor::Cursor;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("Text ended just after a '\\' character")]
    TrailingBackslash,

    #[error("Text ended before matching quote was found for `{0}`")]
    UnterminatedQuote(char),

    #[error("Text was empty (or contained only whitespace)")]
    Empty,
}

#[derive(PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
    Backslash,
    Comment,
    /// A bare `-I` token just hit whitespace: consume the whitespace run
    /// verbatim instead of delimiting, so it stays fused with the path that
    /// follows (preserving the exact gap between them).
    IncludeGap,
    /// Consuming the path word following a bare `-I`'s whitespace gap, still
    /// part of the same token.
    IncludeWord,
}

/// Splits `text` into unquoted, unescaped argument words.
pub fn split(text: &str) -> Result<Vec<String>, Error> {
    tokenize(text)?.into_iter().map(|tok| unquote(&tok)).collect()
}

/// Phase 1: walk the input and produce raw tokens, still containing their
/// quote characters and escape backslashes verbatim (except a backslash
/// immediately followed by a newline, a line continuation, which is dropped).
fn tokenize(text: &str) -> Result<Vec<String>, Error> {
    let mut cur = Cursor::new(text);
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut quote = Quote::None;

    loop {
        if cur.is_at_end() {
            break;
        }
        let c = cur.peek(0);

        match quote {
            Quote::Backslash => {
                if c != '\n' {
                    token.push('\\');
                    token.push(c);
                }
                quote = Quote::None;
            }
            Quote::Comment => {
                if c == '\n' {
                    quote = Quote::None;
                }
            }
            Quote::IncludeGap => {
                token.push(c);
                if !matches!(c, '\n' | ' ' | '\t') {
                    quote = Quote::IncludeWord;
                }
            }
            Quote::IncludeWord => {
                if matches!(c, '\n' | ' ' | '\t') {
                    tokens.push(std::mem::take(&mut token));
                    quote = Quote::None;
                } else {
                    token.push(c);
                }
            }
            Quote::Double => {
                token.push(c);
                if c == '"' && trailing_backslashes(&token[..token.len() - 1]) % 2 == 0 {
                    quote = Quote::None;
                }
            }
            Quote::Single => {
                token.push(c);
                if c == '\'' {
                    quote = Quote::None;
                }
            }
            Quote::None => match c {
                '\n' | ' ' | '\t' => {
                    if token == "-I" {
                        token.push(c);
                        quote = Quote::IncludeGap;
                    } else if !token.is_empty() {
                        tokens.push(std::mem::take(&mut token));
                    }
                }
                '\'' => {
                    token.push(c);
                    quote = Quote::Single;
                }
                '"' => {
                    token.push(c);
                    quote = Quote::Double;
                }
                '\\' => quote = Quote::Backslash,
                '#' if token.is_empty() => quote = Quote::Comment,
                _ => token.push(c),
            },
        }
        cur.advance();
    }

    match quote {
        Quote::Backslash => return Err(Error::TrailingBackslash),
        Quote::Double => return Err(Error::UnterminatedQuote('"')),
        Quote::Single => return Err(Error::UnterminatedQuote('\'')),
        Quote::None | Quote::Comment | Quote::IncludeGap | Quote::IncludeWord => {}
    }
    if !token.is_empty() {
        tokens.push(token);
    }
    if tokens.is_empty() {
        return Err(Error::Empty);
    }
    Ok(tokens)
}

fn trailing_backslashes(s: &str) -> usize {
    s.chars().rev().take_while(|&c| c == '\\').count()
}

/// Phase 2: resolve escapes and quoting within a single raw token.
fn unquote(token: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\n') => {}
                Some(other) => out.push(other),
                None => return Err(Error::TrailingBackslash),
            },
            '"' => loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some('\n') => {}
                        Some(e @ ('"' | '\\' | '`' | '$')) => out.push(e),
                        Some(other) => {
                            out.push('\\');
                            out.push(other);
                        }
                        None => return Err(Error::UnterminatedQuote('"')),
                    },
                    Some(other) => out.push(other),
                    None => return Err(Error::UnterminatedQuote('"')),
                }
            },
            '\'' => loop {
                match chars.next() {
                    Some('\'') => break,
                    Some(other) => out.push(other),
                    None => return Err(Error::UnterminatedQuote('\'')),
                }
            },
            other => out.push(other),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "arg_splitter.test.rs"]
mod test;
