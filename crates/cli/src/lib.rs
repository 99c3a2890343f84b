//! CLI utilities for Eventsite tools
//!
//! Provides shared CLI functionality:
//! - Terminal output formatting
//! - Status messages
//! - Keyboard-driven search sessions

#![warn(missing_docs)]

pub mod interactive;
pub mod output;
