//! Direct candidate descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::PackageIdentity;
use crate::specifier::VersionSpecifier;
use crate::version::Version;

/// A directly requested package as declared by the user.
///
/// A candidate carries the declared constraint rather than a resolved
/// version. Resolution pins the candidate by giving it an exact specifier,
/// at which point [`Candidate::identity`] yields the concrete build it
/// stands for. A candidate whose specifier is not exact has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub specifier: VersionSpecifier,
    pub index_url: String,
    #[serde(default)]
    pub develop: bool,
}

impl Candidate {
    pub fn new(
        name: impl Into<String>,
        specifier: VersionSpecifier,
        index_url: impl Into<String>,
        develop: bool,
    ) -> Self {
        Self {
            name: name.into(),
            specifier,
            index_url: index_url.into(),
            develop,
        }
    }

    /// A candidate already pinned to one exact version.
    pub fn locked(
        name: impl Into<String>,
        version: &str,
        index_url: impl Into<String>,
        develop: bool,
    ) -> Self {
        Self {
            name: name.into(),
            specifier: VersionSpecifier::Exact(Version::parse(version)),
            index_url: index_url.into(),
            develop,
        }
    }

    pub fn locked_version(&self) -> Option<&str> {
        self.specifier.locked().map(Version::as_str)
    }

    /// The concrete build this candidate resolves to, when pinned.
    pub fn identity(&self) -> Option<PackageIdentity> {
        self.locked_version()
            .map(|version| PackageIdentity::new(self.name.clone(), version, self.index_url.clone()))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.specifier {
            VersionSpecifier::Any => write!(f, "{} ({})", self.name, self.index_url),
            spec => write!(f, "{}{} ({})", self.name, spec, self.index_url),
        }
    }
}
