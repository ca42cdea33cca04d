//! Column-specific field normalizers.
//!
//! Every normalizer is a pure function of one cell. None of them fail: malformed
//! input degrades deterministically and the validator reports what is left.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Free-text columns that get whitespace normalization.
pub const TEXT_COLUMNS: [&str; 6] = [
    "hospital_name",
    "address",
    "city",
    "county_name",
    "hospital_type",
    "hospital_ownership",
];

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Which normalization a column receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalizer {
    /// Trim and upper-case.
    State,
    /// Keep at most the first five digits.
    ZipCode,
    /// Exactly ten digits or missing.
    Phone,
    /// Trim and collapse internal whitespace.
    FreeText,
}

impl Normalizer {
    /// The normalizer assigned to a canonical column, if any.
    pub fn for_column(column: &str) -> Option<Self> {
        match column {
            "state" => Some(Normalizer::State),
            "zip_code" => Some(Normalizer::ZipCode),
            "phone_number" => Some(Normalizer::Phone),
            c if TEXT_COLUMNS.contains(&c) => Some(Normalizer::FreeText),
            _ => None,
        }
    }

    /// Short label for summaries and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Normalizer::State => "state",
            Normalizer::ZipCode => "zip_code",
            Normalizer::Phone => "phone",
            Normalizer::FreeText => "free_text",
        }
    }

    /// Normalize one cell. Missing input stays missing.
    pub fn apply(&self, value: Option<&str>) -> Option<String> {
        let value = value?;
        match self {
            Normalizer::State => Some(normalize_state(value)),
            Normalizer::ZipCode => Some(normalize_zip(value)),
            Normalizer::Phone => normalize_phone(value),
            Normalizer::FreeText => Some(normalize_text(value)),
        }
    }
}

/// Trim and upper-case. Format is checked by the validator, not here.
pub fn normalize_state(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Keep the first five ASCII digits. Short codes are not padded.
pub fn normalize_zip(value: &str) -> String {
    digits(value).take(5).collect()
}

/// Strip to digits; drop a leading country digit from 11-digit numbers;
/// anything other than ten digits becomes missing.
pub fn normalize_phone(value: &str) -> Option<String> {
    let all: String = digits(value).collect();
    let number = match all.len() {
        11 => &all[1..],
        _ => all.as_str(),
    };
    (number.len() == 10).then(|| number.to_string())
}

/// Trim and collapse each whitespace run to one space. Case is preserved.
pub fn normalize_text(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value.trim(), " ").into_owned()
}

fn digits(value: &str) -> impl Iterator<Item = char> + '_ {
    value.trim().chars().filter(char::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state() {
        assert_eq!(normalize_state(" al "), "AL");
        assert_eq!(normalize_state("Alabama"), "ALABAMA");
    }

    #[test]
    fn test_zip_truncates_and_degrades() {
        assert_eq!(normalize_zip("36301"), "36301");
        assert_eq!(normalize_zip(" 36301-1234 "), "36301");
        assert_eq!(normalize_zip("2115"), "2115");
        assert_eq!(normalize_zip("ZIP 0210"), "0210");
        assert_eq!(normalize_zip("unknown"), "");
    }

    #[test]
    fn test_phone_accepts_ten_or_eleven_digits() {
        assert_eq!(normalize_phone("(334) 793-8701"), Some("3347938701".into()));
        assert_eq!(normalize_phone("1-334-793-8701"), Some("3347938701".into()));
        // the leading digit is dropped whatever it is
        assert_eq!(normalize_phone("93347938701"), Some("3347938701".into()));
    }

    #[test]
    fn test_phone_rejects_other_lengths() {
        assert_eq!(normalize_phone("793-8701"), None);
        assert_eq!(normalize_phone("001 334 793 8701"), None);
        assert_eq!(normalize_phone(""), None);
    }

    #[test]
    fn test_text_collapses_whitespace() {
        assert_eq!(
            normalize_text("  Southeast   Alabama\tMedical  Center "),
            "Southeast Alabama Medical Center"
        );
        assert_eq!(normalize_text("   "), "");
        // NEL from a Latin-1 0x85 byte
        assert_eq!(normalize_text("A\u{85}B\u{85}"), "A B");
    }

    #[test]
    fn test_missing_passes_through() {
        for normalizer in [
            Normalizer::State,
            Normalizer::ZipCode,
            Normalizer::Phone,
            Normalizer::FreeText,
        ] {
            assert_eq!(normalizer.apply(None), None);
        }
    }

    #[test]
    fn test_column_assignment() {
        assert_eq!(Normalizer::for_column("state"), Some(Normalizer::State));
        assert_eq!(Normalizer::for_column("city"), Some(Normalizer::FreeText));
        assert_eq!(Normalizer::for_column("provider_id"), None);
        assert_eq!(Normalizer::for_column("emergency_services"), None);
    }
}
