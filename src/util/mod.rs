//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod string_set;

pub use config::{Config, Defaults, Directive, RConfig};
pub use diagnostic::Diagnostic;
pub use string_set::StringSet;
