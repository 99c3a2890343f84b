//! Configuration loading and schema definitions
//!
//! Shared configuration types for the search tools.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
