//! Site content resolution.
//!
//! Everything the public site renders goes through this module: the
//! hard-coded defaults table, the merge resolver that fills gaps in the
//! stored configuration, and the catalog resolver that picks service cards
//! for a page section. All of it is pure; persistence lives in `crate::db`.

mod catalog;
mod defaults;
mod merge;

pub use catalog::*;
pub use defaults::*;
pub use merge::*;
