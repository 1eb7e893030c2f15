use augur_core::identity::PackageIdentity;
use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by pipeline units.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    /// A unit found an identity unacceptable and its policy forbids
    /// continuing the attempt with it.
    #[error("unit `{unit}` rejects {identity}: {reason}")]
    #[diagnostic(help(
        "this resolution attempt cannot produce an advisable stack; explore different candidates"
    ))]
    NotAcceptable {
        unit: &'static str,
        identity: PackageIdentity,
        reason: String,
    },

    /// A unit's configuration failed to parse or is inconsistent.
    #[error("configuration error: {message}")]
    #[diagnostic(help("check the unit configuration TOML"))]
    Configuration { message: String },
}
