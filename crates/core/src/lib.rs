//! Core utilities for Eventsite tools
//!
//! This crate provides shared functionality used by the search library and
//! the command-line tools:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and discovery
//!
//! # Example
//!
//! ```rust,no_run
//! use eventsite_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("showing {} suggestions", config.schema.search.limit);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};
