//! Label resolution.
//!
//! This module turns R package names into build labels using a read-only
//! lookup supplied by the caller. Names that no indexed rule provides are
//! treated as external packages.

pub mod errors;
pub mod index;
pub mod resolve;

pub use errors::ResolveError;
pub use index::{Lookup, RuleIndex};
pub use resolve::{external_label, resolve, DepResolver, R_LANG};
