use augur_core::identity::PackageIdentity;
use miette::Diagnostic;
use thiserror::Error;

/// Refusal to remove an identity that some requested package cannot lose.
///
/// Removal is transactional: when this error is returned, the resolution
/// state the call started from is still intact.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("cannot remove {identity}: package `{package_name}` would be left without any candidate")]
#[diagnostic(help(
    "the resolution state is unchanged; reject the whole stack in the calling unit instead"
))]
pub struct CannotRemove {
    pub identity: PackageIdentity,
    pub package_name: String,
}

impl CannotRemove {
    pub fn new(identity: PackageIdentity, package_name: impl Into<String>) -> Self {
        Self {
            identity,
            package_name: package_name.into(),
        }
    }
}
