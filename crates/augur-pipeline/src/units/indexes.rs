use augur_core::identity::PackageIdentity;
use augur_resolver::context::ResolutionContext;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::unit::PipelineUnit;

/// Allowed package indexes parsed from TOML:
///
/// ```toml
/// allowed = ["https://pypi.org/simple"]
/// ```
///
/// An empty list imposes no restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllowedIndexesConfig {
    #[serde(default)]
    pub allowed: Vec<String>,
}

impl AllowedIndexesConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, PipelineError> {
        toml::from_str(content).map_err(|e| PipelineError::Configuration {
            message: format!("failed to parse allowed indexes: {e}"),
        })
    }

    pub fn allows(&self, index_url: &str) -> bool {
        self.allowed.is_empty() || self.allowed.iter().any(|allowed| allowed == index_url)
    }
}

/// Removes every identity resolved from an index outside the allowed set.
///
/// Refusals are always fatal here: a stack that cannot let go of a
/// forbidden index cannot be advised at all.
#[derive(Debug)]
pub struct AllowedIndexesUnit {
    config: AllowedIndexesConfig,
}

impl AllowedIndexesUnit {
    pub fn new(config: AllowedIndexesConfig) -> Self {
        Self { config }
    }

    fn forbidden_identities(&self, ctx: &ResolutionContext) -> Vec<PackageIdentity> {
        let mut forbidden = Vec::new();
        for identity in ctx.direct_identities() {
            if !self.config.allows(&identity.index_url) {
                forbidden.push(identity);
            }
        }
        for identity in ctx.transitive_identities() {
            if !self.config.allows(&identity.index_url) {
                forbidden.push(identity.clone());
            }
        }
        forbidden
    }
}

impl PipelineUnit for AllowedIndexesUnit {
    fn name(&self) -> &'static str {
        "allowed-indexes"
    }

    fn run(&mut self, ctx: &mut ResolutionContext) -> Result<(), PipelineError> {
        for identity in self.forbidden_identities(ctx) {
            if let Err(err) = ctx.remove_identity(&identity) {
                return Err(PipelineError::NotAcceptable {
                    unit: self.name(),
                    identity,
                    reason: format!(
                        "resolved from a non-allowed index, and removal would starve `{}`",
                        err.package_name
                    ),
                });
            }
            tracing::debug!("Removed {identity}: index not allowed");
        }
        Ok(())
    }
}
