//! Common test utilities for leechup CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated content and home directories plus a binary runner
//! - Assertion macros: `assert_output_contains!`, `assert_exists!`

#![allow(dead_code)]

pub mod assertions;
pub mod env;

pub use env::*;
