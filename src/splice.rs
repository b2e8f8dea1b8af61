//! Locating the `<name> = { ... }` assignment inside free-form text.
//!
//! The span is found by a word-boundary identifier scan followed by a
//! depth-counted brace scan. Regex brace matching cannot pair nested braces,
//! and config literals routinely contain nested objects, so the scan counts
//! depth instead — and is string-aware, so braces inside quoted values do
//! not affect it.

use crate::error::EnvServeError;

/// Byte span of the object literal (both braces included) within raw text.
///
/// Everything before `start` and from `end` on is inert surrounding text the
/// writer preserves verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn as_str<'a>(&self, raw: &'a str) -> &'a str {
        &raw[self.start..self.end]
    }
}

/// Find the first `<global_name> = { ... }` assignment in `raw`.
///
/// Returns `Ok(None)` when no such assignment exists. An assignment whose
/// braces never balance is a format error. The locator is re-run by the
/// writer against its own text snapshot; callers must not assume read and
/// write saw identical text.
pub fn locate(raw: &str, global_name: &str) -> Result<Option<Region>, EnvServeError> {
    if global_name.is_empty() {
        return Ok(None);
    }
    for (idx, _) in raw.match_indices(global_name) {
        if !is_word_boundary(raw, idx, global_name.len()) {
            continue;
        }
        let Some(open) = assignment_open_brace(raw, idx + global_name.len()) else {
            continue;
        };
        let end = scan_balanced(raw, open)?;
        return Ok(Some(Region { start: open, end }));
    }
    Ok(None)
}

/// Whole-identifier match: `myappConfig` must not match `appConfig`.
fn is_word_boundary(raw: &str, start: usize, len: usize) -> bool {
    let before = raw[..start].chars().next_back();
    let after = raw[start + len..].chars().next();
    !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// From just past the identifier, accept `\s* = \s* {` and return the byte
/// offset of the opening brace.
fn assignment_open_brace(raw: &str, from: usize) -> Option<usize> {
    let mut rest = raw[from..].char_indices().skip_while(|(_, c)| c.is_whitespace());
    let (_, eq) = rest.next()?;
    if eq != '=' {
        return None;
    }
    let mut rest = rest.skip_while(|(_, c)| c.is_whitespace());
    let (offset, brace) = rest.next()?;
    (brace == '{').then_some(from + offset)
}

/// Depth-counted scan from the opening brace to its matching close.
///
/// Quoted sections (single, double, or backtick) are skipped so that braces
/// inside string values do not change the depth.
fn scan_balanced(raw: &str, open: usize) -> Result<usize, EnvServeError> {
    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut chars = raw[open..].char_indices();

    while let Some((offset, c)) = chars.next() {
        match in_string {
            Some(quote) => match c {
                '\\' => {
                    chars.next();
                }
                _ if c == quote => in_string = None,
                _ => {}
            },
            None => match c {
                '\'' | '"' | '`' => in_string = Some(c),
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(open + offset + 1);
                    }
                }
                _ => {}
            },
        }
    }

    Err(EnvServeError::ConfigFormat {
        reason: "unbalanced braces in config literal".into(),
    })
}
