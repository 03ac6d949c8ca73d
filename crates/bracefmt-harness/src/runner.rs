//! Test execution engine.
//!
//! Renders every fixture case through the public engine entry point and
//! compares against the expected output or the expected error-message
//! substring.

use serde::Serialize;

use bracefmt_core::FormatArg;

use crate::fixtures::{FixtureCase, FixtureSet};

/// Result of one verified case.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    pub case_name: String,
    pub passed: bool,
    /// What the case expected, as a display string.
    pub expected: String,
    /// What the engine produced (output or error message).
    pub actual: String,
}

/// Summary of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub suite: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<VerificationResult>,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs fixture sets and collects verification results.
#[derive(Debug, Default)]
pub struct TestRunner;

impl TestRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run all cases in a set.
    pub fn run(&self, set: &FixtureSet) -> RunReport {
        let results: Vec<VerificationResult> =
            set.cases.iter().map(|case| run_case(case)).collect();
        let passed = results.iter().filter(|r| r.passed).count();
        RunReport {
            suite: set.suite.clone(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        }
    }
}

fn run_case(case: &FixtureCase) -> VerificationResult {
    let arg_values: Vec<FormatArg<'_>> = case.args.iter().map(|a| a.as_arg()).collect();
    let outcome = bracefmt_core::render(&case.template, &arg_values);

    let (passed, expected, actual) = match outcome {
        Ok(bytes) => {
            let actual = String::from_utf8_lossy(&bytes).into_owned();
            match (&case.expected, &case.expected_error) {
                (Some(expected), _) => (actual == *expected, expected.clone(), actual),
                (None, Some(message)) => (false, format!("error containing {message:?}"), actual),
                // no expectation recorded: rendering without error passes
                (None, None) => (true, "<any output>".into(), actual),
            }
        }
        Err(err) => {
            let actual = err.to_string();
            match &case.expected_error {
                Some(message) => (
                    actual.contains(message.as_str()),
                    format!("error containing {message:?}"),
                    actual,
                ),
                None => (
                    false,
                    case.expected.clone().unwrap_or_else(|| "<success>".into()),
                    actual,
                ),
            }
        }
    };

    VerificationResult {
        case_name: case.name.clone(),
        passed,
        expected,
        actual,
    }
}
