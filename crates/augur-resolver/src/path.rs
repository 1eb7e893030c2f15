//! Resolved dependency paths.

use std::fmt;

use augur_core::identity::PackageIdentity;

/// One resolved dependency chain, root first.
///
/// The identity at position 0 is the directly requested package the chain
/// was resolved for; everything after it is transitive. A path is never
/// empty, which [`ResolutionPath::new`] enforces at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionPath {
    identities: Vec<PackageIdentity>,
}

impl ResolutionPath {
    /// Builds a path from an ordered chain, returning `None` when empty.
    pub fn new(identities: Vec<PackageIdentity>) -> Option<Self> {
        if identities.is_empty() {
            return None;
        }
        Some(Self { identities })
    }

    /// The direct package this chain supports.
    pub fn root(&self) -> &PackageIdentity {
        &self.identities[0]
    }

    pub fn identities(&self) -> &[PackageIdentity] {
        &self.identities
    }

    /// Everything below the root, in resolution order.
    pub fn transitive(&self) -> &[PackageIdentity] {
        &self.identities[1..]
    }

    pub fn contains(&self, identity: &PackageIdentity) -> bool {
        self.identities.iter().any(|id| id == identity)
    }
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, identity) in self.identities.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{identity}")?;
        }
        Ok(())
    }
}
