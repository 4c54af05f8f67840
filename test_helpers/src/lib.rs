//! Test helpers shared across crates in the hello-verifier workspace.
//!
//! This crate currently provides jailed configuration scenarios.

pub mod figment;
