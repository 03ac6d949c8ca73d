//! # bracefmt-harness
//!
//! Conformance harness for the bracefmt formatting engine: fixture
//! cases as JSON, a runner that renders each case through the public
//! engine entry point, and machine-readable reports.

#![forbid(unsafe_code)]

pub mod fixtures;
pub mod runner;

pub use fixtures::{ArgSpec, FixtureCase, FixtureError, FixtureSet};
pub use runner::{RunReport, TestRunner, VerificationResult};
