//! Resolution state for one advisory attempt.
//!
//! A [`ResolutionContext`] tracks two things: the competing candidates
//! registered for each directly requested package, and the resolved
//! dependency paths that justify them. Registration only grows the state;
//! [`ResolutionContext::remove_identity`] is the only shrinking operation
//! and the place where the consistency rules live.

use std::collections::{BTreeMap, HashSet};

use augur_core::candidate::Candidate;
use augur_core::identity::PackageIdentity;

use crate::error::CannotRemove;
use crate::path::ResolutionPath;

/// Candidate registry plus path multiset for a single resolution attempt.
///
/// Standing invariant: every package name with registered candidates keeps
/// at least one of them through every successful mutation. Removal is
/// copy-then-commit, so a refused removal leaves the state untouched.
///
/// One context serves one attempt and is discarded afterward. Exploring
/// alternative branches in parallel means cloning the context per branch;
/// nothing in here is shared or synchronized.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    direct: BTreeMap<String, Vec<Candidate>>,
    paths: Vec<ResolutionPath>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a candidate under its package name.
    ///
    /// Multiple candidates per name are normal; no uniqueness check is made.
    pub fn register_direct_candidate(&mut self, candidate: Candidate) {
        self.direct
            .entry(candidate.name.clone())
            .or_default()
            .push(candidate);
    }

    /// Appends resolved paths.
    ///
    /// Roots are not checked against the registry; candidates and paths may
    /// arrive in either order.
    pub fn add_paths(&mut self, paths: Vec<ResolutionPath>) {
        self.paths.extend(paths);
    }

    /// Removes one resolved identity and everything that depended on it.
    ///
    /// Every path containing `target` at any position goes away as a unit.
    /// A direct candidate locked to `target` goes away with its paths, and
    /// any other direct candidate that loses its last supporting path is
    /// removed in cascade. If either the target's own name or any cascade
    /// would leave a registered name without candidates, the call fails
    /// with [`CannotRemove`] and the state stays exactly as it was.
    ///
    /// Removing an identity that is present nowhere is a no-op success.
    pub fn remove_identity(&mut self, target: &PackageIdentity) -> Result<(), CannotRemove> {
        // A directly registered target must leave a differently-pinned
        // sibling behind, otherwise its name starves right here.
        if let Some(candidates) = self.direct.get(&target.name) {
            let is_registered = candidates
                .iter()
                .any(|c| c.identity().as_ref() == Some(target));
            let siblings = candidates
                .iter()
                .filter(|c| c.identity().as_ref() != Some(target))
                .count();
            if is_registered && siblings == 0 {
                return Err(CannotRemove::new(target.clone(), target.name.clone()));
            }
        }

        // Survivors are computed aside; nothing is committed until the
        // starvation check over the whole would-be state has passed.
        let surviving_paths: Vec<ResolutionPath> = self
            .paths
            .iter()
            .filter(|path| !path.contains(target))
            .cloned()
            .collect();

        let roots_before: HashSet<&PackageIdentity> =
            self.paths.iter().map(ResolutionPath::root).collect();
        let roots_after: HashSet<&PackageIdentity> =
            surviving_paths.iter().map(ResolutionPath::root).collect();

        let mut surviving_direct: BTreeMap<String, Vec<Candidate>> = BTreeMap::new();
        for (name, candidates) in &self.direct {
            let kept: Vec<Candidate> = candidates
                .iter()
                .filter(|candidate| match candidate.identity() {
                    Some(id) if &id == target => false,
                    // A candidate that held at least one rooted path and
                    // would hold none is a cascade casualty. One that never
                    // had rooted paths is untouched by this removal.
                    Some(id) => !(roots_before.contains(&id) && !roots_after.contains(&id)),
                    None => true,
                })
                .cloned()
                .collect();
            if kept.is_empty() {
                return Err(CannotRemove::new(target.clone(), name.clone()));
            }
            surviving_direct.insert(name.clone(), kept);
        }

        self.paths = surviving_paths;
        self.direct = surviving_direct;
        Ok(())
    }

    /// All surviving direct candidates, grouped by name in name order.
    pub fn direct_candidates(&self) -> Vec<&Candidate> {
        self.direct.values().flatten().collect()
    }

    /// The locked identities of surviving direct candidates.
    ///
    /// Candidates not yet pinned to an exact version contribute nothing.
    pub fn direct_identities(&self) -> Vec<PackageIdentity> {
        self.direct
            .values()
            .flatten()
            .filter_map(Candidate::identity)
            .collect()
    }

    /// Every identity appearing below a path root, first seen first,
    /// each at most once.
    pub fn transitive_identities(&self) -> Vec<&PackageIdentity> {
        let mut seen = HashSet::new();
        let mut identities = Vec::new();
        for path in &self.paths {
            for identity in path.transitive() {
                if seen.insert(identity) {
                    identities.push(identity);
                }
            }
        }
        identities
    }

    /// Transitive identities dressed up as pinned candidates.
    ///
    /// A projection for callers that want one uniform candidate view; the
    /// engine does not store these.
    pub fn transitive_candidates(&self) -> Vec<Candidate> {
        self.transitive_identities()
            .into_iter()
            .map(|id| Candidate::locked(id.name.as_str(), &id.version, id.index_url.as_str(), false))
            .collect()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn paths(&self) -> &[ResolutionPath] {
        &self.paths
    }

    /// The surviving paths that include `identity` at any position.
    pub fn paths_containing(&self, identity: &PackageIdentity) -> Vec<&ResolutionPath> {
        self.paths
            .iter()
            .filter(|path| path.contains(identity))
            .collect()
    }
}
