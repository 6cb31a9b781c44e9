//! Final footer line built from the run's counters.

#![allow(missing_docs)]

use serde::Serialize;

use crate::model::result::TestRunResult;
use crate::report::sink::Style;

/// Footer text and the style it should be written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub text: String,
    pub style: Style,
}

/// `"<n> <noun>"`, with an `s` unless `n` is exactly one.
#[must_use]
pub fn pluralize(count: u64, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

/// `", <n> <noun>"` for a nonzero count, empty otherwise.
fn category(count: u64, noun: &str) -> String {
    if count == 0 {
        String::new()
    } else {
        format!(", {}", pluralize(count, noun))
    }
}

/// Build the footer for a finished run.
#[must_use]
pub fn build_footer(result: &TestRunResult) -> Footer {
    let tests = pluralize(result.tests, "test");

    if result.tests == 0 || result.was_clean() {
        return Footer {
            text: format!("{tests}, 0 failures."),
            style: Style::Success,
        };
    }

    if result.successful {
        return Footer {
            text: format!(
                "{tests}{}{}{}, 0 failures.",
                category(result.skipped, "skipped test"),
                category(result.incomplete, "incomplete test"),
                category(result.risky, "risky test"),
            ),
            style: Style::Warning,
        };
    }

    Footer {
        text: format!(
            "{tests}{}{}.",
            category(result.errors, "error"),
            category(result.failures, "failure"),
        ),
        style: Style::Failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(tests: u64) -> TestRunResult {
        TestRunResult {
            tests,
            successful: true,
            all_harmless: true,
            all_completely_implemented: true,
            none_skipped: true,
            ..TestRunResult::default()
        }
    }

    #[test]
    fn pluralize_treats_zero_as_plural() {
        assert_eq!(pluralize(0, "test"), "0 tests");
        assert_eq!(pluralize(1, "test"), "1 test");
        assert_eq!(pluralize(2, "error"), "2 errors");
    }

    #[test]
    fn empty_run_is_green_regardless_of_flags() {
        let footer = build_footer(&TestRunResult::default());
        assert_eq!(footer.text, "0 tests, 0 failures.");
        assert_eq!(footer.style, Style::Success);
    }

    #[test]
    fn clean_run() {
        let footer = build_footer(&clean(5));
        assert_eq!(footer.text, "5 tests, 0 failures.");
        assert_eq!(footer.style, Style::Success);

        let single = build_footer(&clean(1));
        assert_eq!(single.text, "1 test, 0 failures.");
    }

    #[test]
    fn one_skipped() {
        let result = TestRunResult {
            skipped: 1,
            none_skipped: false,
            ..clean(3)
        };
        let footer = build_footer(&result);
        assert_eq!(footer.text, "3 tests, 1 skipped test, 0 failures.");
        assert_eq!(footer.style, Style::Warning);
    }

    #[test]
    fn warning_categories_keep_fixed_order() {
        let result = TestRunResult {
            skipped: 2,
            incomplete: 1,
            risky: 3,
            none_skipped: false,
            all_completely_implemented: false,
            all_harmless: false,
            ..clean(10)
        };
        let footer = build_footer(&result);
        assert_eq!(
            footer.text,
            "10 tests, 2 skipped tests, 1 incomplete test, 3 risky tests, 0 failures."
        );
        assert_eq!(footer.style, Style::Warning);
    }

    #[test]
    fn risky_only_run_lists_risky() {
        let result = TestRunResult {
            risky: 1,
            all_harmless: false,
            ..clean(4)
        };
        assert_eq!(
            build_footer(&result).text,
            "4 tests, 1 risky test, 0 failures."
        );
    }

    #[test]
    fn errors_then_failures() {
        let result = TestRunResult {
            tests: 4,
            errors: 2,
            failures: 1,
            ..TestRunResult::default()
        };
        let footer = build_footer(&result);
        assert_eq!(footer.text, "4 tests, 2 errors, 1 failure.");
        assert_eq!(footer.style, Style::Failure);
    }

    #[test]
    fn failures_hide_warning_categories() {
        let result = TestRunResult {
            tests: 6,
            failures: 2,
            skipped: 1,
            ..TestRunResult::default()
        };
        assert_eq!(build_footer(&result).text, "6 tests, 2 failures.");
    }

    #[test]
    fn unsuccessful_without_counts_ends_after_tests() {
        let result = TestRunResult {
            tests: 2,
            ..TestRunResult::default()
        };
        let footer = build_footer(&result);
        assert_eq!(footer.text, "2 tests.");
        assert_eq!(footer.style, Style::Failure);
    }
}
