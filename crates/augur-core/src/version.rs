//! Registry version parsing and comparison.
//!
//! Registry versions are compared segment-wise rather than lexically:
//! - Segments split on `.`, `-`, `_` and on digit/letter boundaries
//! - Numeric segments compare as numbers
//! - Pre-release qualifiers order as
//!   `dev` < `alpha` < `beta` < `rc` < `""` (release) < `post`
//! - Trailing zero segments are insignificant (`1.0` equals `1.0.0`)

use std::cmp::Ordering;
use std::fmt;

/// A parsed registry version with comparable segments.
///
/// The original text is preserved; ordering and equality work over the
/// parsed segments, so `Version` deliberately does not implement `Hash`.
#[derive(Debug, Clone)]
pub struct Version {
    pub original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Qualifier(QualifierKind),
    Text(String),
}

/// Well-known version qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum QualifierKind {
    Dev,
    Alpha,
    Beta,
    Rc,
    Release,
    Post,
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let segments = parse_segments(version);
        Self {
            original: version.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// True when any segment marks a pre-release (`dev`, `alpha`, `beta`, `rc`).
    pub fn is_prerelease(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Qualifier(q) if *q < QualifierKind::Release))
    }

    /// The leading numeric release components, e.g. `[1, 4, 2]` for `1.4.2rc1`.
    pub fn release(&self) -> Vec<u64> {
        self.segments
            .iter()
            .map_while(|s| match s {
                Segment::Numeric(n) => Some(*n),
                _ => None,
            })
            .collect()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let a = self.segments.get(i);
            let b = other.segments.get(i);
            let ord = compare_segments(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(_) => Ordering::Greater,
        Segment::Qualifier(q) => q.cmp(&QualifierKind::Release),
        Segment::Text(s) if s.is_empty() => Ordering::Equal,
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Qualifier(a), Segment::Qualifier(b)) => a.cmp(b),
        (Segment::Numeric(_), Segment::Qualifier(_)) => Ordering::Greater,
        (Segment::Qualifier(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Segment::Qualifier(q), Segment::Text(_)) => {
            if *q >= QualifierKind::Release {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Segment::Text(_), Segment::Qualifier(q)) => {
            if *q >= QualifierKind::Release {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        if ch == '.' || ch == '-' || ch == '_' {
            if !current.is_empty() {
                segments.push(classify(&current));
                current.clear();
            }
            continue;
        }
        // Split compact forms like `1.0a1` or `2rc3` at digit/letter edges.
        if let Some(last) = current.chars().last() {
            if last.is_ascii_digit() != ch.is_ascii_digit() {
                segments.push(classify(&current));
                current.clear();
            }
        }
        current.push(ch);
    }
    if !current.is_empty() {
        segments.push(classify(&current));
    }

    segments
}

fn classify(token: &str) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    match token.to_lowercase().as_str() {
        "dev" => Segment::Qualifier(QualifierKind::Dev),
        "a" | "alpha" => Segment::Qualifier(QualifierKind::Alpha),
        "b" | "beta" => Segment::Qualifier(QualifierKind::Beta),
        "c" | "rc" | "pre" | "preview" => Segment::Qualifier(QualifierKind::Rc),
        "" | "final" | "release" => Segment::Qualifier(QualifierKind::Release),
        "post" | "r" | "rev" => Segment::Qualifier(QualifierKind::Post),
        _ => Segment::Text(token.to_string()),
    }
}
