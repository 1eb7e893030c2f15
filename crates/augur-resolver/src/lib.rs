//! Resolution state engine: dependency path bookkeeping, transactional
//! identity removal with starvation checks, and rich/bare candidate views.
//!
//! The engine itself stays quiet. It reports refusals through error values
//! and leaves logging and policy decisions to its callers.

pub mod context;
pub mod error;
pub mod path;
