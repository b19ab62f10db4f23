//! Quote-aware label list scanning.
//!
//! A naive `split(',')` breaks on values such as `path="/a,b"`, so segments
//! are cut only on commas outside double quotes. Inside quotes, `\"`, `\\`
//! and `\n` are unescaped.

use std::collections::BTreeMap;

/// Why a label list was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSyntax {
    UnbalancedQuotes,
    MissingEquals,
    InvalidName,
    UnquotedValue,
    TrailingText,
}

impl LabelSyntax {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelSyntax::UnbalancedQuotes => "unbalanced quotes",
            LabelSyntax::MissingEquals => "expected key=\"value\"",
            LabelSyntax::InvalidName => "invalid label name",
            LabelSyntax::UnquotedValue => "label value must be quoted",
            LabelSyntax::TrailingText => "unexpected text after closing quote",
        }
    }
}

/// Parse the text between `{` and `}` into a sorted label map.
///
/// Empty segments (e.g. a trailing comma) are skipped. A repeated key keeps
/// the last value.
pub fn parse_label_list(body: &str) -> Result<BTreeMap<String, String>, LabelSyntax> {
    let mut labels = BTreeMap::new();

    for segment in split_segments(body)? {
        if segment.trim().is_empty() {
            continue;
        }

        let (key, raw_value) = segment.split_once('=').ok_or(LabelSyntax::MissingEquals)?;
        let key = key.trim();
        if !is_label_name(key) {
            return Err(LabelSyntax::InvalidName);
        }

        let value = unquote(raw_value.trim())?;
        if let Some(prev) = labels.insert(key.to_string(), value) {
            tracing::debug!(label = %key, previous = %prev, "duplicate label key, keeping last");
        }
    }

    Ok(labels)
}

/// Split on commas that are not inside a quoted value.
pub fn split_segments(body: &str) -> Result<Vec<&str>, LabelSyntax> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                if let Some(seg) = body.get(start..i) {
                    out.push(seg);
                }
                start = i + 1;
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err(LabelSyntax::UnbalancedQuotes);
    }
    if let Some(seg) = body.get(start..) {
        out.push(seg);
    }
    Ok(out)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_label_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unquote(raw: &str) -> Result<String, LabelSyntax> {
    let inner = raw.strip_prefix('"').ok_or(LabelSyntax::UnquotedValue)?;

    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '"' => {
                let rest = inner.get(i + 1..).unwrap_or_default();
                if !rest.trim().is_empty() {
                    return Err(LabelSyntax::TrailingText);
                }
                return Ok(value);
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, '"')) => value.push('"'),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => return Err(LabelSyntax::UnbalancedQuotes),
            },
            c => value.push(c),
        }
    }

    Err(LabelSyntax::UnbalancedQuotes)
}
