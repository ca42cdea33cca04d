//! Input parsing and data source handling.

mod parser;
mod source;

pub use parser::{DEFAULT_NA_VALUES, EXTRACT_NA_VALUES, Reader, ReaderConfig, TextEncoding};
pub use source::{DataTable, SourceMetadata};
