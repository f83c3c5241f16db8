//! High-level operations built on the core parsers and the resolver.

pub mod imports;
pub mod index;
pub mod resolve;

pub use imports::{ImportsError, PackageImports};
pub use index::{index_packages, scan_packages, IndexedPackage};
pub use resolve::{resolve_package, ResolvedPackage};
