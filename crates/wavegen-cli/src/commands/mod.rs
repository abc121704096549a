//! CLI command implementations.

pub mod common;
pub mod console;
pub mod info;
