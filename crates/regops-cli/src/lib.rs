//! # regops CLI library
//!
//! Command implementations for the `regops` binary. The binary itself
//! (`main.rs`) only parses arguments and dispatches here.

pub mod commands;
