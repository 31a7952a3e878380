//! # Chronology - record scanner library
//!
//! Library half of the `chronology` binary, exposed for integration tests.

pub mod cli;
pub mod config;
pub mod scan;
