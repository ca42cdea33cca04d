//! carecheck: normalization and validation of hospital facility extracts.
//!
//! A raw extract goes through three stages:
//!
//! - **Clean**: raw labels are standardized to snake-case identifiers, state,
//!   ZIP, phone and free-text fields are normalized, and the table is locked
//!   to a fixed 20-column canonical schema.
//! - **Validate**: a fixed registry of rules checks formats, uniqueness,
//!   ranges and category labels, accumulating every failure into a report.
//! - **Report**: profile, validation and change reports are rendered as text.
//!
//! # Example
//!
//! ```no_run
//! use carecheck::{Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::from_env(".").unwrap());
//! let cleaned = pipeline.clean().unwrap();
//! println!("Rows, Cols: {:?}", cleaned.cleaned.table.shape());
//!
//! let outcome = pipeline.validate().unwrap();
//! println!("TOTAL FAILURES: {}", outcome.report.failures());
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod report;
pub mod schema;
pub mod transform;
pub mod validation;

mod pipeline;

pub use crate::pipeline::{CleanOutcome, Pipeline, ValidationOutcome};
pub use config::PipelineConfig;
pub use error::{CarecheckError, Result, SchemaError};
pub use input::{DataTable, Reader, ReaderConfig, SourceMetadata, TextEncoding};
pub use report::{ChangeReport, ProfileSummary};
pub use schema::{CANONICAL_COLUMNS, SchemaLock, standardize_column_name};
pub use transform::{CleanedTable, CleaningPipeline, CleaningSummary};
pub use validation::{Report, Rule, ValidationEngine, Verdict};
