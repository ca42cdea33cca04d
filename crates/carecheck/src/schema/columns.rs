//! Canonical column identifiers and the raw-label standardizer.
//!
//! Cleaning and change reporting both compare raw labels against canonical
//! identifiers, so both go through [`standardize_column_name`].

use once_cell::sync::Lazy;
use regex::Regex;

/// The canonical schema, in output order.
pub const CANONICAL_COLUMNS: [&str; 20] = [
    "provider_id",
    "hospital_name",
    "address",
    "city",
    "state",
    "zip_code",
    "county_name",
    "phone_number",
    "hospital_type",
    "hospital_ownership",
    "emergency_services",
    "meets_criteria_for_meaningful_use_of_ehrs",
    "hospital_overall_rating",
    "mortality_national_comparison",
    "safety_of_care_national_comparison",
    "readmission_national_comparison",
    "patient_experience_national_comparison",
    "effectiveness_of_care_national_comparison",
    "timeliness_of_care_national_comparison",
    "efficient_use_of_medical_imaging_national_comparison",
];

/// Suffix shared by every national comparison column.
pub const NATIONAL_COMPARISON_SUFFIX: &str = "_national_comparison";

/// Substring marking footnote/annotation columns.
pub const FOOTNOTE_MARKER: &str = "footnote";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

/// Map a raw column label to a snake-case identifier.
///
/// Trims, lower-cases, turns each whitespace run into `_`, then drops every
/// character outside `[a-z0-9_]`. Already-canonical identifiers map to themselves.
pub fn standardize_column_name(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    NON_IDENTIFIER.replace_all(&underscored, "").into_owned()
}

/// Standardize a whole header row, preserving length and order.
pub fn standardize_column_names<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    labels
        .iter()
        .map(|label| standardize_column_name(label.as_ref()))
        .collect()
}

/// Whether an identifier is part of the canonical schema.
pub fn is_canonical(identifier: &str) -> bool {
    CANONICAL_COLUMNS.contains(&identifier)
}

/// Whether an identifier names a national comparison column.
pub fn is_national_comparison(identifier: &str) -> bool {
    identifier.ends_with(NATIONAL_COMPARISON_SUFFIX)
}

/// Whether an identifier names a footnote column.
pub fn is_footnote(identifier: &str) -> bool {
    identifier.contains(FOOTNOTE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_cms_labels() {
        assert_eq!(standardize_column_name("Provider ID"), "provider_id");
        assert_eq!(standardize_column_name("  ZIP Code "), "zip_code");
        assert_eq!(
            standardize_column_name("Meets criteria for meaningful use of EHRs"),
            "meets_criteria_for_meaningful_use_of_ehrs"
        );
        assert_eq!(
            standardize_column_name("Mortality national comparison footnote"),
            "mortality_national_comparison_footnote"
        );
    }

    #[test]
    fn test_standardize_strips_punctuation_after_underscoring() {
        assert_eq!(standardize_column_name("Hospital  Type\t(2016)"), "hospital_type_2016");
        assert_eq!(standardize_column_name("Rating - Overall"), "rating__overall");
        assert_eq!(standardize_column_name("Émergency"), "mergency");
        assert_eq!(standardize_column_name("   "), "");
    }

    #[test]
    fn test_canonical_names_are_fixed_points() {
        for name in CANONICAL_COLUMNS {
            assert_eq!(standardize_column_name(name), name);
        }
    }

    #[test]
    fn test_standardize_preserves_length_and_order() {
        let out = standardize_column_names(&["State", "City", "State"]);
        assert_eq!(out, vec!["state", "city", "state"]);
    }

    #[test]
    fn test_column_predicates() {
        assert!(is_canonical("zip_code"));
        assert!(!is_canonical("location"));
        assert!(is_national_comparison("readmission_national_comparison"));
        assert!(!is_national_comparison("readmission_national_comparison_footnote"));
        assert!(is_footnote("readmission_national_comparison_footnote"));
    }

    #[test]
    fn test_whitelist_has_seven_comparison_columns() {
        let count = CANONICAL_COLUMNS
            .iter()
            .filter(|c| is_national_comparison(c))
            .count();
        assert_eq!(count, 7);
    }
}
