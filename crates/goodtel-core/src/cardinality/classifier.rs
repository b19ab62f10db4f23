//! Label-name shape rules for well-known unbounded identifiers.
//!
//! Rules are compiled once into an ordered `Vec`; `classify` returns the
//! first match in declaration order, built-ins first, then operator rules
//! from configuration. Matching is case-insensitive.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{GoodTelError, Result};

/// Kind of unbounded value a label name suggests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Idiom {
    UserIdentifier,
    Email,
    IpAddress,
    Timestamp,
    Uuid,
    RequestScopedId,
    UrlPath,
    FilesystemId,
    /// Operator-supplied rule, identified by its tag.
    Custom(String),
}

impl Idiom {
    /// Stable machine tag.
    pub fn tag(&self) -> &str {
        match self {
            Idiom::UserIdentifier => "user_id",
            Idiom::Email => "email",
            Idiom::IpAddress => "ip_address",
            Idiom::Timestamp => "timestamp",
            Idiom::Uuid => "uuid",
            Idiom::RequestScopedId => "request_id",
            Idiom::UrlPath => "url_path",
            Idiom::FilesystemId => "filesystem_id",
            Idiom::Custom(tag) => tag,
        }
    }

    /// Remediation text attached to a flagged label.
    pub fn advice(&self) -> String {
        match self {
            Idiom::UserIdentifier => {
                "remove the label; record user identifiers in logs instead".into()
            }
            Idiom::Email => "remove the label; email addresses belong in logs, not metrics".into(),
            Idiom::IpAddress => "remove the label or aggregate by network, zone or region".into(),
            Idiom::Timestamp => "remove the label; samples are already timestamped".into(),
            Idiom::Uuid => "remove the label; unique identifiers belong in logs or traces".into(),
            Idiom::RequestScopedId => "remove the label; correlate requests through traces".into(),
            Idiom::UrlPath => "replace with a templated route or handler label".into(),
            Idiom::FilesystemId => "remove the label; aggregate at pool or cluster level".into(),
            Idiom::Custom(tag) => format!("remove the label (matches operator rule `{tag}`)"),
        }
    }
}

impl fmt::Display for Idiom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Idiom::UserIdentifier => f.write_str("user identifier"),
            Idiom::Email => f.write_str("email address"),
            Idiom::IpAddress => f.write_str("IP address"),
            Idiom::Timestamp => f.write_str("timestamp"),
            Idiom::Uuid => f.write_str("UUID/GUID"),
            Idiom::RequestScopedId => f.write_str("per-request identifier"),
            Idiom::UrlPath => f.write_str("raw URL path"),
            Idiom::FilesystemId => f.write_str("filesystem identifier"),
            Idiom::Custom(tag) => write!(f, "`{tag}` value"),
        }
    }
}

impl Serialize for Idiom {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Operator rule as written in configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraPattern {
    pub tag: String,
    pub pattern: String,
}

/// Compiled rule.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub idiom: Idiom,
    regex: Regex,
}

impl PatternRule {
    pub fn new(idiom: Idiom, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                GoodTelError::BadRequest(format!(
                    "invalid label pattern `{pattern}` ({}): {e}",
                    idiom.tag()
                ))
            })?;
        Ok(Self { idiom, regex })
    }

    pub fn is_match(&self, label_name: &str) -> bool {
        self.regex.is_match(label_name)
    }
}

fn builtin_rules() -> [(Idiom, &'static str); 8] {
    [
        (
            Idiom::UserIdentifier,
            r"^(user|username|uid|userid|login)$|(^|_)(user|account|customer|member)_?(id|name)$",
        ),
        (Idiom::Email, r"(^|_)e_?mail(_?addr(ess)?)?$"),
        (
            Idiom::IpAddress,
            r"(^|_)ip(_?addr(ess)?|v[46])?$|^(client|remote|source|src|peer)_?addr(ess)?$",
        ),
        (
            Idiom::Timestamp,
            r"(^|_)(timestamp|ts|epoch|unix_?time|datetime)$|^(time|date)$|_at$",
        ),
        (Idiom::Uuid, r"(^|_)(uuid|guid)$"),
        (
            Idiom::RequestScopedId,
            r"(^|_)(session|trace|span|request|req|correlation|transaction|txn|message|msg)_?id$",
        ),
        (
            Idiom::UrlPath,
            r"(^|_)(url|uri)(_?path)?$|^(full|raw|request|query)_?(path|string)$",
        ),
        (
            Idiom::FilesystemId,
            r"(^|_)(inode|ino)$|(^|_)(file|volume|vol|disk|block)_?id$|^vol$",
        ),
    ]
}

/// Ordered, immutable rule table.
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
}

impl PatternTable {
    /// Built-in rules only.
    pub fn builtin() -> Result<Self> {
        Self::with_extra(&[])
    }

    /// Built-in rules followed by operator rules, in that order.
    pub fn with_extra(extra: &[ExtraPattern]) -> Result<Self> {
        let mut rules = Vec::with_capacity(8 + extra.len());
        for (idiom, pattern) in builtin_rules() {
            rules.push(PatternRule::new(idiom, pattern)?);
        }
        for e in extra {
            rules.push(PatternRule::new(Idiom::Custom(e.tag.clone()), &e.pattern)?);
        }
        Ok(Self { rules })
    }

    /// Table made only of the given rules (no built-ins).
    pub fn from_rules(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    /// First matching idiom, by table order.
    pub fn classify(&self, label_name: &str) -> Option<&Idiom> {
        self.rules
            .iter()
            .find(|r| r.is_match(label_name))
            .map(|r| &r.idiom)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
