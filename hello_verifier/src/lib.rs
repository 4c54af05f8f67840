//! Hello World verification unit.
//!
//! The crate pairs a constant helper ([`greeting::get_hello_world`]) with a
//! verification case that checks it, and adds the pieces an external harness
//! needs to consume the result: directive parsing, JSON result records,
//! layered configuration, and the `hello-verifier` command line.

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
mod fs;
pub mod greeting;
pub mod logging;
pub mod report;
pub mod verification;
