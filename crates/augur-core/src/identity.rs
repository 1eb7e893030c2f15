use std::fmt;

use serde::{Deserialize, Serialize};

/// One concrete package build: a name at an exact version from one index.
///
/// Identity is the full triple: the same name and version published on two
/// different indexes are two distinct builds. Values are never mutated after
/// construction; the resolution engine hands out references and clones only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
    pub index_url: String,
}

impl PackageIdentity {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        index_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            index_url: index_url.into(),
        }
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=={} ({})", self.name, self.version, self.index_url)
    }
}
