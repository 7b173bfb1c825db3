//! Shell-like splitting of a raw line into tokens, and the reverse.
//!
//! The quoting rules are a small subset of POSIX shell:
//! - Whitespace outside quotes separates tokens.
//! - `'...'` keeps everything inside literally.
//! - `"..."` keeps everything inside, except that `\"` and `\\` are unescaped.
//! - Outside quotes, `\` escapes the next character.
//! - Adjacent fragments without whitespace between form a single token,
//!   so `a"b c"` is `ab c` and `''` is an empty token.
use std::borrow::Cow;

use crate::Result;
use crate::error::ErrorKind;

/// Where we are inside a token. Quote states carry the byte offset of the
/// opening quote for error reporting.
#[derive(Debug, Clone, Copy)]
enum State {
    Plain,
    Single(usize),
    Double(usize),
}

/// Split a line into tokens.
///
/// Fails with [`ErrorKind::UnterminatedQuote`] on unbalanced quotes, or
/// [`ErrorKind::DanglingEscape`] if the line ends with an unquoted `\`.
pub fn split(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    // `Some` once the current token has started, even if it is still empty.
    let mut cur: Option<String> = None;
    let mut state = State::Plain;
    let mut chars = line.char_indices();

    while let Some((pos, ch)) = chars.next() {
        match state {
            State::Single(_) => match ch {
                '\'' => state = State::Plain,
                _ => push(&mut cur, ch),
            },
            State::Double(_) => match ch {
                '"' => state = State::Plain,
                '\\' => match chars.next() {
                    Some((_, c @ ('"' | '\\'))) => push(&mut cur, c),
                    Some((_, c)) => {
                        push(&mut cur, '\\');
                        push(&mut cur, c);
                    }
                    // Reported as an unterminated quote below.
                    None => break,
                },
                _ => push(&mut cur, ch),
            },
            State::Plain => match ch {
                '\'' => {
                    cur.get_or_insert_default();
                    state = State::Single(pos);
                }
                '"' => {
                    cur.get_or_insert_default();
                    state = State::Double(pos);
                }
                '\\' => match chars.next() {
                    Some((_, c)) => push(&mut cur, c),
                    None => return Err(ErrorKind::DanglingEscape.with_input("\\").with_offset(pos)),
                },
                c if c.is_whitespace() => tokens.extend(cur.take()),
                c => push(&mut cur, c),
            },
        }
    }

    match state {
        State::Plain => {
            tokens.extend(cur);
            tracing::trace!(?tokens, "split line");
            Ok(tokens)
        }
        State::Single(pos) => Err(ErrorKind::UnterminatedQuote.with_input("'").with_offset(pos)),
        State::Double(pos) => Err(ErrorKind::UnterminatedQuote.with_input("\"").with_offset(pos)),
    }
}

fn push(cur: &mut Option<String>, ch: char) {
    cur.get_or_insert_default().push(ch);
}

/// Quote a single token so that [`split`] gives it back unchanged.
///
/// Tokens consisting only of "safe" ASCII characters are returned as-is.
pub fn quote(token: &str) -> Cow<'_, str> {
    fn is_safe(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b"-_./:=@,+%^".contains(&b)
    }

    if !token.is_empty() && token.bytes().all(is_safe) {
        return Cow::Borrowed(token);
    }

    let mut out = String::with_capacity(token.len() + 2);
    out.push('\'');
    for ch in token.chars() {
        if ch == '\'' {
            // Close, escaped quote, reopen.
            out.push_str(r"'\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    Cow::Owned(out)
}

/// Join tokens into a line, quoting where necessary.
pub fn join<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, tok) in tokens.into_iter().enumerate() {
        if i != 0 {
            out.push(' ');
        }
        out.push_str(&quote(tok.as_ref()));
    }
    out
}
