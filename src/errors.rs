// src/errors.rs

//! Crate-wide error aliases.
//!
//! Thin wrapper around `anyhow`; a single place to grow structured error
//! types later if the shell/process layer ever needs them.

pub use anyhow::{Error, Result};
