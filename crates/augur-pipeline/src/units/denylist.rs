use augur_core::identity::PackageIdentity;
use augur_core::version::Version;
use augur_resolver::context::ResolutionContext;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::unit::PipelineUnit;

/// Deny list parsed from TOML:
///
/// ```toml
/// enforce = true
///
/// [[deny]]
/// name = "six"
/// version = "1.7.0"
/// index = "https://pypi.org/simple"
/// ```
///
/// `version` and `index` are optional; an entry with only a `name` denies
/// every resolved version of that package. With `enforce` unset, entries
/// that cannot be removed are kept and logged instead of failing the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DenylistConfig {
    #[serde(default)]
    pub deny: Vec<DenyEntry>,

    #[serde(default)]
    pub enforce: bool,
}

/// One denied package, optionally narrowed to a version and an index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenyEntry {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub index: Option<String>,
}

impl DenylistConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, PipelineError> {
        toml::from_str(content).map_err(|e| PipelineError::Configuration {
            message: format!("failed to parse deny list: {e}"),
        })
    }
}

impl DenyEntry {
    /// Version narrowing compares parsed versions, so `1.0` denies `1.0.0`.
    pub fn matches(&self, identity: &PackageIdentity) -> bool {
        if self.name != identity.name {
            return false;
        }
        if let Some(version) = &self.version {
            if Version::parse(version) != Version::parse(&identity.version) {
                return false;
            }
        }
        if let Some(index) = &self.index {
            if index != &identity.index_url {
                return false;
            }
        }
        true
    }
}

/// Removes resolved identities matching an explicit rejection list.
#[derive(Debug)]
pub struct DenylistUnit {
    config: DenylistConfig,
}

impl DenylistUnit {
    pub fn new(config: DenylistConfig) -> Self {
        Self { config }
    }

    fn denied_identities(&self, ctx: &ResolutionContext) -> Vec<PackageIdentity> {
        let mut denied = Vec::new();
        for identity in ctx.direct_identities() {
            if self.config.deny.iter().any(|entry| entry.matches(&identity)) {
                denied.push(identity);
            }
        }
        for identity in ctx.transitive_identities() {
            if self.config.deny.iter().any(|entry| entry.matches(identity)) {
                denied.push(identity.clone());
            }
        }
        denied
    }
}

impl PipelineUnit for DenylistUnit {
    fn name(&self) -> &'static str {
        "denylist"
    }

    fn run(&mut self, ctx: &mut ResolutionContext) -> Result<(), PipelineError> {
        for identity in self.denied_identities(ctx) {
            match ctx.remove_identity(&identity) {
                Ok(()) => tracing::debug!("Removed denied package {identity}"),
                Err(err) if self.config.enforce => {
                    return Err(PipelineError::NotAcceptable {
                        unit: self.name(),
                        identity,
                        reason: format!(
                            "denied, and removal would starve `{}`",
                            err.package_name
                        ),
                    });
                }
                Err(err) => {
                    tracing::warn!("Keeping denied package {identity}: {err}");
                }
            }
        }
        Ok(())
    }
}
