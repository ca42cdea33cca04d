//! Delimited-file reader with legacy encoding support and a missing-value vocabulary.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::source::{DataTable, SourceMetadata};
use crate::error::{CarecheckError, Result};

/// Phrases the hospital extracts use for "no data".
pub const EXTRACT_NA_VALUES: &[&str] = &["Not Available", "Not Applicable", "N/A", "NA", ""];

/// Strings every read treats as missing unless `keep_default_na` is off.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How raw bytes become text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
    /// Any encoding from the WHATWG registry.
    Whatwg(&'static Encoding),
}

impl TextEncoding {
    /// Name recorded in [`SourceMetadata`].
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes`. Latin-1 cannot fail; other encodings substitute U+FFFD.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            TextEncoding::Latin1 => encoding_rs::mem::decode_latin1(bytes),
            TextEncoding::Whatwg(encoding) => {
                let (text, actual, had_errors) = encoding.decode(bytes);
                if had_errors {
                    warn!(
                        encoding = actual.name(),
                        "input contained malformed sequences; replaced with U+FFFD"
                    );
                }
                text
            }
        }
    }
}

/// Reader configuration.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Text encoding of the file.
    pub encoding: TextEncoding,
    /// Extra literal values mapped to the missing marker.
    pub na_values: Vec<String>,
    /// Whether [`DEFAULT_NA_VALUES`] also apply.
    pub keep_default_na: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: TextEncoding::Whatwg(UTF_8),
            na_values: Vec::new(),
            keep_default_na: true,
        }
    }
}

impl ReaderConfig {
    /// Settings for the raw facility extract: Latin-1 text plus the extract's NA phrases.
    ///
    /// Decoded as true ISO-8859-1, not the WHATWG `latin1` label (windows-1252):
    /// bytes 0x80-0x9F stay C1 controls, so 0x85 is NEL and counts as whitespace.
    pub fn raw_extract() -> Self {
        Self {
            encoding: TextEncoding::Latin1,
            na_values: EXTRACT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Settings for reading a cleaned canonical table back.
    pub fn canonical() -> Self {
        Self {
            na_values: EXTRACT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Whether a raw cell carries the missing marker. Matching is exact.
    pub fn is_missing(&self, value: &str) -> bool {
        (self.keep_default_na && DEFAULT_NA_VALUES.contains(&value))
            || self.na_values.iter().any(|na| na == value)
    }
}

/// Reads delimited files into [`DataTable`]s.
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self {
            config: ReaderConfig::default(),
        }
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Read a file and return the data table and metadata.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| CarecheckError::io(path, e))?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.read_bytes(&contents)?;
        info!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            encoding = self.config.encoding.name(),
            "read table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            self.config.encoding.name().to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Decode and parse raw bytes.
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<DataTable> {
        let text = self.config.encoding.decode(bytes);
        self.read_str(&text)
    }

    fn read_str(&self, text: &str) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(String::is_empty) {
            return Err(CarecheckError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            if record.len() > expected_cols {
                return Err(CarecheckError::Parse {
                    line: record.position().map_or(0, |p| p.line()),
                    expected: expected_cols,
                    found: record.len(),
                });
            }
            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|field| (!self.config.is_missing(field)).then(|| field.to_string()))
                .collect();

            // Short rows are padded with the missing marker
            row.resize(expected_cols, None);
            rows.push(row);
        }

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Reader {
    fn default() -> Self {
        Self::new()
    }
}
