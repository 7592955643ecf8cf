//! Terminal front end for Sealink
//!
//! The `sealink` binary wraps [`commands`]; the same functions back the
//! integration tests.

pub mod commands;
pub mod config;
