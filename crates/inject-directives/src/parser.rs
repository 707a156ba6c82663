//! Directive syntax scanning.
//!
//! Finds `name(argument)` and `{@name: argument}` invocations within a single
//! line. The scanner only recognises shape; whether a name is registered is
//! decided by the caller.

use crate::{DirectiveSyntax, SyntaxSet};

/// Directive invocation found in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedDirective<'a> {
    pub(crate) name: &'a str,
    /// Argument with surrounding whitespace trimmed.
    pub(crate) arg: &'a str,
    pub(crate) syntax: DirectiveSyntax,
}

/// Find the next directive in `line` at or after byte offset `from`.
///
/// Returns the directive with its byte range `start..end` in `line`.
/// Inline code spans are stepped over when `skip_code` is set.
pub(crate) fn next_directive(
    line: &str,
    from: usize,
    syntax: SyntaxSet,
    skip_code: bool,
) -> Option<(ParsedDirective<'_>, usize, usize)> {
    let bytes = line.as_bytes();
    let mut pos = from;

    while pos < bytes.len() {
        let b = bytes[pos];

        if b == b'`' && skip_code {
            pos = skip_code_span(bytes, pos);
            continue;
        }

        if b == b'{' && syntax.accepts(DirectiveSyntax::Embed) {
            if let Some((directive, consumed)) = parse_embed(&line[pos..]) {
                return Some((directive, pos, pos + consumed));
            }
        } else if is_name_start(b) && (pos == 0 || !is_word_byte(bytes[pos - 1])) {
            let name_end = pos + name_len(&bytes[pos..]);
            if syntax.accepts(DirectiveSyntax::Call)
                && let Some((arg, consumed)) = parse_parens(&line[name_end..])
            {
                let directive = ParsedDirective {
                    name: &line[pos..name_end],
                    arg: arg.trim(),
                    syntax: DirectiveSyntax::Call,
                };
                return Some((directive, pos, name_end + consumed));
            }
            // A name never starts inside another name.
            pos = name_end;
            continue;
        }

        pos += 1;
    }

    None
}

/// Check if a name is a valid directive name.
///
/// Valid names start with an ASCII letter or `_` and continue with ASCII
/// alphanumerics, `_` or `-`.
pub(crate) fn is_valid_directive_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.first().is_some_and(|&b| is_name_start(b)) && name_len(bytes) == bytes.len()
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Bytes that glue onto a following name, e.g. the `x` in `xinjectImage(..)`.
fn is_word_byte(b: u8) -> bool {
    is_name_byte(b) || !b.is_ascii()
}

fn name_len(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| is_name_byte(b)).count()
}

fn blank_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count()
}

/// Parse a parenthesised argument: `(argument)`.
///
/// Nested parentheses must balance. Returns (argument, `bytes_consumed`).
fn parse_parens(s: &str) -> Option<(&str, usize)> {
    if !s.starts_with('(') {
        return None;
    }

    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], i + 1));
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse an embed invocation: `{@name: argument}`.
///
/// Returns (directive, `bytes_consumed`).
fn parse_embed(s: &str) -> Option<(ParsedDirective<'_>, usize)> {
    if !s.starts_with("{@") {
        return None;
    }

    let bytes = s.as_bytes();
    let mut pos = 2 + blank_len(&bytes[2..]);

    if !bytes.get(pos).is_some_and(|&b| is_name_start(b)) {
        return None;
    }
    let name_start = pos;
    pos += name_len(&bytes[pos..]);
    let name = &s[name_start..pos];

    pos += blank_len(&bytes[pos..]);
    if bytes.get(pos) != Some(&b':') {
        return None;
    }
    pos += 1;

    let arg_start = pos;
    let mut depth = 1usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let directive = ParsedDirective {
                        name,
                        arg: s[arg_start..pos].trim(),
                        syntax: DirectiveSyntax::Embed,
                    };
                    return Some((directive, pos + 1));
                }
            }
            _ => {}
        }
        pos += 1;
    }

    None
}

/// Step over an inline code span starting at `start`.
///
/// A span closes at the next backtick run of the same length. An unmatched
/// run is literal text and only the run itself is skipped.
fn skip_code_span(bytes: &[u8], start: usize) -> usize {
    let run = |at: usize| bytes[at..].iter().take_while(|&&b| b == b'`').count();

    let open = run(start);
    let mut pos = start + open;
    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            let close = run(pos);
            if close == open {
                return pos + close;
            }
            pos += close;
        } else {
            pos += 1;
        }
    }

    start + open
}
