//! Version specifiers as written in dependency declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// A version constraint attached to a requested package.
///
/// Parsed from the operator syntax used by package indexes (`==1.0.1`,
/// `>=2.0`, `~=1.4.2`, `*`). A bare version without an operator is not a
/// valid specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum VersionSpecifier {
    Any,
    Exact(Version),
    NotEqual(Version),
    Less(Version),
    LessEq(Version),
    Greater(Version),
    GreaterEq(Version),
    Compatible(Version),
}

impl VersionSpecifier {
    /// Parses a specifier, returning `None` when the syntax is not recognized.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec == "*" {
            return Some(Self::Any);
        }

        let (op, operand) = if let Some(rest) = spec.strip_prefix("==") {
            ("==", rest)
        } else if let Some(rest) = spec.strip_prefix("!=") {
            ("!=", rest)
        } else if let Some(rest) = spec.strip_prefix("<=") {
            ("<=", rest)
        } else if let Some(rest) = spec.strip_prefix(">=") {
            (">=", rest)
        } else if let Some(rest) = spec.strip_prefix("~=") {
            ("~=", rest)
        } else if let Some(rest) = spec.strip_prefix('<') {
            ("<", rest)
        } else if let Some(rest) = spec.strip_prefix('>') {
            (">", rest)
        } else {
            return None;
        };

        let operand = operand.trim();
        if operand.is_empty() {
            return None;
        }
        let version = Version::parse(operand);

        match op {
            "==" => Some(Self::Exact(version)),
            "!=" => Some(Self::NotEqual(version)),
            "<" => Some(Self::Less(version)),
            "<=" => Some(Self::LessEq(version)),
            ">" => Some(Self::Greater(version)),
            ">=" => Some(Self::GreaterEq(version)),
            // `~=` needs at least two release components to define its
            // upper bound (`~=1` has no meaning).
            "~=" if version.release().len() >= 2 => Some(Self::Compatible(version)),
            _ => None,
        }
    }

    pub fn matches(&self, version: &Version) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(v) => version == v,
            Self::NotEqual(v) => version != v,
            Self::Less(v) => version < v,
            Self::LessEq(v) => version <= v,
            Self::Greater(v) => version > v,
            Self::GreaterEq(v) => version >= v,
            Self::Compatible(v) => version >= v && *version < compatible_upper_bound(v),
        }
    }

    /// The pinned version when the specifier locks exactly one, else `None`.
    pub fn locked(&self) -> Option<&Version> {
        match self {
            Self::Exact(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact(v) => write!(f, "=={v}"),
            Self::NotEqual(v) => write!(f, "!={v}"),
            Self::Less(v) => write!(f, "<{v}"),
            Self::LessEq(v) => write!(f, "<={v}"),
            Self::Greater(v) => write!(f, ">{v}"),
            Self::GreaterEq(v) => write!(f, ">={v}"),
            Self::Compatible(v) => write!(f, "~={v}"),
        }
    }
}

impl From<VersionSpecifier> for String {
    fn from(spec: VersionSpecifier) -> Self {
        spec.to_string()
    }
}

impl TryFrom<String> for VersionSpecifier {
    type Error = InvalidSpecifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(InvalidSpecifier(value))
    }
}

/// Raised when deserializing a specifier string that fails to parse.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid version specifier `{0}`")]
pub struct InvalidSpecifier(pub String);

/// Exclusive upper bound implied by `~=`: drop the last release component
/// and increment the new last one, so `~=1.4.2` allows `<1.5`.
fn compatible_upper_bound(lower: &Version) -> Version {
    let mut release = lower.release();
    release.pop();
    if let Some(last) = release.last_mut() {
        *last += 1;
    }
    let text = release
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(".");
    Version::parse(&text)
}
