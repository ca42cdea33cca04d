//! Property-based tests for the normalizers, standardizer and cleaning pipeline.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p carecheck --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p carecheck --test property_tests
//! ```

use proptest::prelude::*;

use carecheck::schema::{CANONICAL_COLUMNS, standardize_column_name};
use carecheck::transform::{normalize_phone, normalize_text, normalize_zip};
use carecheck::{CleaningPipeline, DataTable};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary printable text, including non-ASCII.
fn any_text() -> impl Strategy<Value = String> {
    "\\PC{0,40}"
}

/// Strings that look like ZIP codes in various states of disrepair.
fn zip_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{5}",
        "[0-9]{5}-[0-9]{4}",
        "[0-9]{1,4}",
        " ?[0-9]{3} [0-9]{2} ?",
        "[A-Za-z ]{0,10}",
    ]
}

/// A digit string of a given length wrapped in phone-style punctuation.
fn formatted_digits(len: std::ops::Range<usize>) -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec(0u8..10, len).prop_map(|digits| {
        let count = digits.len();
        let mut out = String::from("(");
        for (i, d) in digits.iter().enumerate() {
            if i == 3 {
                out.push_str(") ");
            } else if i == 6 {
                out.push('-');
            }
            out.push(char::from(b'0' + d));
        }
        (out, count)
    })
}

/// A raw label for an extra column. Never standardizes onto the whitelist.
fn extra_label() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,8}( [A-Z][a-z]{2,8})?"
        .prop_filter("label must not read as a footnote", |s| {
            !s.to_lowercase().contains("footnote")
        })
}

/// An optional free-text cell.
fn cell() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[ A-Za-z0-9()\\-\\t]{0,20}")
}

fn canonical_table(rows: Vec<Vec<Option<String>>>) -> DataTable {
    DataTable::new(
        CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    )
}

// =============================================================================
// Normalizer Properties
// =============================================================================

mod normalizer_tests {
    use super::*;

    proptest! {
        /// A normalized ZIP is at most five ASCII digits.
        #[test]
        fn zip_is_at_most_five_digits(input in prop_oneof![zip_like(), any_text()]) {
            let zip = normalize_zip(&input);
            prop_assert!(zip.len() <= 5);
            prop_assert!(zip.chars().all(|c| c.is_ascii_digit()));
        }

        /// Inputs carrying at least five digits always yield exactly five.
        #[test]
        fn zip_with_enough_digits_is_full(input in "[0-9]{5}(-[0-9]{4})?") {
            let zip = normalize_zip(&input);
            prop_assert_eq!(zip.len(), 5);
            prop_assert_eq!(zip.as_str(), &input[..5]);
        }

        /// Ten or eleven digits always produce a ten-digit phone.
        #[test]
        fn phone_ten_or_eleven_digits((input, count) in formatted_digits(10..12)) {
            let phone = normalize_phone(&input);
            prop_assert!(phone.is_some(), "{} ({} digits) should normalize", input, count);
            let phone = phone.unwrap();
            prop_assert_eq!(phone.len(), 10);
            let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
            prop_assert_eq!(phone.as_str(), &digits[count - 10..]);
        }

        /// Any other digit count collapses to missing.
        #[test]
        fn phone_other_lengths_are_missing(
            (input, _) in prop_oneof![formatted_digits(0..10), formatted_digits(12..20)]
        ) {
            prop_assert_eq!(normalize_phone(&input), None);
        }

        /// Free-text normalization is idempotent and never has doubled spaces.
        #[test]
        fn text_is_idempotent(input in any_text()) {
            let once = normalize_text(&input);
            prop_assert_eq!(normalize_text(&once), once.clone());
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}

// =============================================================================
// Standardizer Properties
// =============================================================================

mod standardizer_tests {
    use super::*;

    proptest! {
        /// Output uses only [a-z0-9_] and standardizing again changes nothing.
        #[test]
        fn standardize_is_idempotent(label in any_text()) {
            let once = standardize_column_name(&label);
            prop_assert!(once
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            prop_assert_eq!(standardize_column_name(&once), once);
        }
    }
}

// =============================================================================
// Pipeline Properties
// =============================================================================

mod pipeline_tests {
    use super::*;

    proptest! {
        /// Header equals the whitelist regardless of input order and extra columns.
        #[test]
        fn header_is_always_the_whitelist(
            order in Just((0..CANONICAL_COLUMNS.len()).collect::<Vec<_>>()).prop_shuffle(),
            footnotes in prop::collection::vec(extra_label(), 0..4),
            others in prop::collection::vec(extra_label(), 0..4),
            positions in prop::collection::vec(any::<prop::sample::Index>(), 8),
        ) {
            let mut headers: Vec<String> = order
                .iter()
                .map(|&i| CANONICAL_COLUMNS[i].to_uppercase().replace('_', " "))
                .collect();
            let extras = footnotes
                .iter()
                .map(|e| format!("{e} footnote"))
                .chain(others.iter().map(|e| format!("X {e}")));
            for (extra, position) in extras.zip(&positions) {
                let at = position.index(headers.len() + 1);
                headers.insert(at, extra);
            }

            let row: Vec<Option<String>> = headers.iter().map(|_| Some("x".to_string())).collect();
            let table = DataTable::new(headers, vec![row]);
            let cleaned = CleaningPipeline::new().clean(table).unwrap();

            prop_assert_eq!(cleaned.table.headers, CANONICAL_COLUMNS);
            prop_assert_eq!(cleaned.summary.dropped.footnotes.len(), footnotes.len());
            prop_assert_eq!(cleaned.summary.dropped.other.len(), others.len());
        }

        /// Cleaning canonical output again yields the identical table.
        #[test]
        fn cleaning_is_idempotent(
            rows in prop::collection::vec(
                prop::collection::vec(cell(), CANONICAL_COLUMNS.len()),
                1..8,
            )
        ) {
            let pipeline = CleaningPipeline::new();
            let once = pipeline.clean(canonical_table(rows)).unwrap().table;
            let twice = pipeline.clean(once.clone()).unwrap().table;
            prop_assert_eq!(twice, once);
        }
    }
}
