//! Core data types for the Augur dependency stack advisor.
//!
//! This crate defines the fundamental values a resolution attempt is made of:
//! package identities (concrete name/version/index triples), registry version
//! ordering, version specifiers, and the rich candidate descriptors that
//! directly-requested packages are registered under.
//!
//! This crate is intentionally free of async code and network I/O.

/// Default package index assumed by callers that do not configure one.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple";

pub mod candidate;
pub mod identity;
pub mod specifier;
pub mod version;
