//! Generic pass/fail classification of command output.
//!
//! Peripheral utility used to annotate individual tool invocations; its
//! verdict is advisory and is not wired into the routing policy. Failure
//! signals are checked before success signals so mixed output such as
//! "3 passed, 2 failed" classifies as failed.

use std::sync::LazyLock;

use serde::Serialize;

/// Advisory verdict over arbitrary command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestVerdict {
    Passed,
    Failed,
    Unknown,
}

impl TestVerdict {
    pub fn label(self) -> &'static str {
        match self {
            TestVerdict::Passed => "passed",
            TestVerdict::Failed => "failed",
            TestVerdict::Unknown => "unknown",
        }
    }
}

/// Nonzero failure count, e.g. "2 failed" or "3 failures".
static FAIL_COUNT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\b[1-9]\d*\s+fail(?:ed|ures?)\b").unwrap());

/// Explicit zero-failure count, e.g. "0 failed".
static ZERO_FAIL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\b0\s+fail(?:ed|ures?)\b").unwrap());

/// Pass count with no failure wording anywhere, e.g. "12 passed".
static PASS_COUNT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\b[1-9]\d*\s+passed\b").unwrap());

const FAIL_PHRASES: &[&str] = &[
    "tests failed",
    "test failed",
    "assertionerror",
    "panicked at",
    "test result: failed",
];

const PASS_PHRASES: &[&str] = &[
    "all tests passed",
    "tests passed",
    "test passed",
    "test result: ok",
];

const TEST_COMMAND_KEYWORDS: &[&str] = &[
    "cargo test",
    "pytest",
    "npm test",
    "yarn test",
    "jest",
    "vitest",
    "go test",
    "mocha",
    "rspec",
    "unittest",
    "phpunit",
];

/// Classify arbitrary command output as passed, failed, or unknown.
pub fn classify(output: &str) -> TestVerdict {
    let text = output.to_lowercase();

    if FAIL_COUNT_RE.is_match(&text) {
        return TestVerdict::Failed;
    }
    if FAIL_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return TestVerdict::Failed;
    }
    if ZERO_FAIL_RE.is_match(&text) {
        return TestVerdict::Passed;
    }
    if PASS_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return TestVerdict::Passed;
    }
    if PASS_COUNT_RE.is_match(&text) {
        return TestVerdict::Passed;
    }
    TestVerdict::Unknown
}

/// Returns true when the command text names a known test runner.
pub fn is_test_command(command: &str) -> bool {
    let text = command.to_lowercase();
    TEST_COMMAND_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_explicit_pass_phrases() {
        assert_eq!(classify("All tests passed!"), TestVerdict::Passed);
        assert_eq!(
            classify("test result: ok. 14 passed; 0 failed"),
            TestVerdict::Passed
        );
    }

    #[test]
    fn classifies_explicit_fail_phrases() {
        assert_eq!(classify("2 tests failed"), TestVerdict::Failed);
        assert_eq!(
            classify("thread 'main' panicked at src/lib.rs:10"),
            TestVerdict::Failed
        );
    }

    /// Mixed counts classify as failed: failure signals outrank pass signals.
    #[test]
    fn mixed_counts_classify_as_failed() {
        assert_eq!(classify("3 passed, 2 failed"), TestVerdict::Failed);
        assert_eq!(classify("===== 1 failed, 9 passed ====="), TestVerdict::Failed);
    }

    #[test]
    fn zero_failures_classify_as_passed() {
        assert_eq!(classify("9 passed, 0 failed"), TestVerdict::Passed);
        assert_eq!(classify("0 failures"), TestVerdict::Passed);
    }

    #[test]
    fn pass_count_alone_classifies_as_passed() {
        assert_eq!(classify("===== 12 passed in 0.41s ====="), TestVerdict::Passed);
    }

    #[test]
    fn unrelated_output_is_unknown() {
        assert_eq!(classify("compiling autodev-hook v0.1.0"), TestVerdict::Unknown);
        assert_eq!(classify(""), TestVerdict::Unknown);
    }

    #[test]
    fn recognizes_test_runner_commands() {
        assert!(is_test_command("cargo test --workspace"));
        assert!(is_test_command("python -m pytest tests/"));
        assert!(is_test_command("NPM TEST"));
        assert!(!is_test_command("cargo build --release"));
        assert!(!is_test_command("ls -la"));
    }
}
