//! Common utilities for the Petrel CSS object model.
//!
//! This crate provides shared infrastructure used by the Petrel crates:
//! - **Warning System** - deduplicated, colored terminal output for input that
//!   was dropped or could not be represented

pub mod warning;
