//! Sample line recognition and decoding (panic-free).
//!
//! Recognition rules:
//! - Form A (`Labeled`): `<name>{<label-list>}[ <value> [<timestamp>]]`
//! - Form B (`Bare`): `<name>[ <value> [<timestamp>]]`
//! - Form A is tried first; a line matching neither is `InvalidFormat`.
//! - Never index (`line[0]`): walk `char_indices` and slice with `get`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GoodTelError, Result};
use crate::exposition::labels::{parse_label_list, LabelSyntax};

/// Value recorded when a line carries no value token.
pub const DEFAULT_VALUE: &str = "0";

/// One decoded exposition line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    /// Metric name.
    pub name: String,
    /// Labels, sorted by name (last duplicate wins).
    pub labels: BTreeMap<String, String>,
    /// Value token as written, or `"0"` when absent.
    pub value: String,
    /// The trimmed source line.
    pub raw: String,
}

/// Result of the two-case recognizer, borrowing from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineForm<'a> {
    /// `name{...} value`; `labels` is the text between the braces.
    Labeled {
        name: &'a str,
        labels: &'a str,
        value: Option<&'a str>,
    },
    /// `name value`
    Bare { name: &'a str, value: Option<&'a str> },
}

/// Classify a line into one of the two sample forms.
///
/// Unbalanced quotes inside a brace block fail with `InvalidLabelSyntax`;
/// anything else that matches neither form fails with `InvalidFormat`.
pub fn recognize(line_no: usize, line: &str) -> Result<LineForm<'_>> {
    match try_labeled(line) {
        Ok(Some(form)) => return Ok(form),
        Ok(None) => {}
        Err(reason) => return Err(label_error(line_no, line, reason)),
    }

    try_bare(line).ok_or_else(|| GoodTelError::InvalidFormat {
        line: line_no,
        text: line.to_string(),
    })
}

/// Decode one non-blank, non-comment line into a `Sample`.
pub fn decode_line(line_no: usize, line: &str) -> Result<Sample> {
    let line = line.trim();

    let (name, labels, value) = match recognize(line_no, line)? {
        LineForm::Labeled { name, labels, value } => {
            let labels = parse_label_list(labels)
                .map_err(|reason| label_error(line_no, line, reason))?;
            (name, labels, value)
        }
        LineForm::Bare { name, value } => (name, BTreeMap::new(), value),
    };

    Ok(Sample {
        name: name.to_string(),
        labels,
        value: value.unwrap_or(DEFAULT_VALUE).to_string(),
        raw: line.to_string(),
    })
}

fn label_error(line_no: usize, line: &str, reason: LabelSyntax) -> GoodTelError {
    GoodTelError::InvalidLabelSyntax {
        line: line_no,
        text: line.to_string(),
        reason: reason.as_str(),
    }
}

fn try_labeled(line: &str) -> std::result::Result<Option<LineForm<'_>>, LabelSyntax> {
    let Some((name, rest)) = split_name(line) else {
        return Ok(None);
    };
    let Some(body) = rest.strip_prefix('{') else {
        return Ok(None);
    };

    // Closing brace must sit outside quotes; `\"` does not toggle.
    let mut in_quotes = false;
    let mut escaped = false;
    let mut close = None;
    for (i, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '}' if !in_quotes => {
                close = Some(i);
                break;
            }
            _ => {}
        }
    }

    let Some(close) = close else {
        if in_quotes {
            return Err(LabelSyntax::UnbalancedQuotes);
        }
        return Ok(None);
    };

    let (Some(labels), Some(tail)) = (body.get(..close), body.get(close + 1..)) else {
        return Ok(None);
    };

    Ok(parse_tail(tail).map(|value| LineForm::Labeled { name, labels, value }))
}

fn try_bare(line: &str) -> Option<LineForm<'_>> {
    let (name, rest) = split_name(line)?;
    parse_tail(rest).map(|value| LineForm::Bare { name, value })
}

/// Split off a leading metric name (`[A-Za-z_:][A-Za-z0-9_:]*`).
fn split_name(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_' || first == ':') {
        return None;
    }

    let end = line
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || c == '_' || c == ':'))
        .map(|(i, _)| i)
        .unwrap_or(line.len());

    Some((line.get(..end)?, line.get(end..)?))
}

/// Parse what follows the name or label block.
///
/// `None` means the form does not match; `Some(None)` means no value.
fn parse_tail(tail: &str) -> Option<Option<&str>> {
    if tail.trim().is_empty() {
        return Some(None);
    }
    if !tail.starts_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = tail.split_whitespace();
    let value = tokens.next()?;
    if !is_value_token(value) {
        return None;
    }
    if let Some(ts) = tokens.next() {
        if !is_timestamp_token(ts) {
            return None;
        }
    }
    if tokens.next().is_some() {
        return None;
    }

    Some(Some(value))
}

fn is_value_token(s: &str) -> bool {
    const SPECIAL: [&str; 4] = ["NaN", "Inf", "+Inf", "-Inf"];
    if SPECIAL.iter().any(|sp| s.eq_ignore_ascii_case(sp)) {
        return true;
    }
    s.chars().any(|c| c.is_ascii_digit())
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
}

fn is_timestamp_token(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
