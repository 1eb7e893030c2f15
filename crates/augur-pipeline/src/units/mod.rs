//! Built-in filtering units.

pub mod denylist;
pub mod indexes;
