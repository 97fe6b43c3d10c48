//! Domain models for CareVault.
//!
//! These are the core types shared across all crates.

pub mod account;
