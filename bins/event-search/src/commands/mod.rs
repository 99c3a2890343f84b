//! CLI command implementations

pub mod catalog;
pub mod interactive;
pub mod suggest;
