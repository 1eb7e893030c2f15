//! Pipeline unit boundary of the augur advisor.
//!
//! Units inspect the resolution state and ask the engine to drop identities
//! they find unacceptable. The engine may refuse a removal to protect a
//! requested package; how a unit reacts to that refusal is its policy, and
//! the contract lives on [`unit::PipelineUnit`].

pub mod error;
pub mod unit;
pub mod units;
