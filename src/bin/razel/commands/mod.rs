//! Command implementations

pub mod deps;
pub mod files;
pub mod parse;
pub mod resolve;
