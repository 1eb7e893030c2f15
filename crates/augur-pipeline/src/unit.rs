use augur_resolver::context::ResolutionContext;

use crate::error::PipelineError;

/// One step of the advisory pipeline.
///
/// Units run in sequence over a single mutable [`ResolutionContext`]. A unit
/// that finds an identity unacceptable asks the engine to remove it. When
/// the engine refuses because the removal would starve a requested package,
/// the unit must treat the identity as still present: it either carries on
/// and leaves the verdict to later stages (soft policy) or fails the whole
/// attempt with [`PipelineError::NotAcceptable`] (hard policy). A unit never
/// assumes a refused removal took effect.
pub trait PipelineUnit {
    fn name(&self) -> &'static str;

    fn run(&mut self, ctx: &mut ResolutionContext) -> Result<(), PipelineError>;
}
