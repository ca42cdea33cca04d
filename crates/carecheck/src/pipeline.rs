//! Pipeline facade: each step reads its input, does its work and writes its artifact.

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::input::{DataTable, Reader, ReaderConfig, SourceMetadata};
use crate::output::{write_table, write_text};
use crate::report::{ChangeReport, ProfileSummary, render_validation_report};
use crate::transform::{CleanedTable, CleaningPipeline};
use crate::validation::{Report, ValidationEngine};

/// Result of the cleaning step.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// The raw file that was read.
    pub source: SourceMetadata,
    /// The canonical table and its change summary.
    pub cleaned: CleanedTable,
}

/// Result of the validation step.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// The file that was validated.
    pub source: SourceMetadata,
    /// All verdicts.
    pub report: Report,
    /// The report as written to disk.
    pub text: String,
}

impl ValidationOutcome {
    /// The report plus the metadata of the file it was computed from.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "source": serde_json::to_value(&self.source)?,
            "report": serde_json::to_value(&self.report)?,
        }))
    }
}

/// Runs the profile, clean, validate and change-report steps.
pub struct Pipeline {
    config: PipelineConfig,
    raw_reader: Reader,
    clean_reader: Reader,
    cleaner: CleaningPipeline,
    engine: ValidationEngine,
}

impl Pipeline {
    /// Create a pipeline over the given layout.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            raw_reader: Reader::with_config(ReaderConfig::raw_extract()),
            clean_reader: Reader::with_config(ReaderConfig::canonical()),
            cleaner: CleaningPipeline::new(),
            engine: ValidationEngine::new(),
        }
    }

    /// Replace the validation engine.
    pub fn with_engine(mut self, engine: ValidationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// The active layout.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn read_raw(&self) -> Result<(DataTable, SourceMetadata)> {
        self.raw_reader.read_file(&self.config.raw_path)
    }

    /// Profile the raw extract and write the summary.
    pub fn profile(&self) -> Result<(ProfileSummary, String)> {
        let (raw, _) = self.read_raw()?;
        let summary = ProfileSummary::from_table(&raw);
        let text = summary.render();
        write_text(&text, &self.config.profile_report_path)?;
        info!(path = %self.config.profile_report_path.display(), "wrote profile summary");
        Ok((summary, text))
    }

    /// Clean the raw extract and write the canonical table.
    ///
    /// Nothing is written when the schema lock fails.
    pub fn clean(&self) -> Result<CleanOutcome> {
        let (raw, source) = self.read_raw()?;
        let cleaned = self.cleaner.clean(raw)?;
        write_table(&cleaned.table, &self.config.clean_path)?;
        Ok(CleanOutcome { source, cleaned })
    }

    /// Validate the canonical table and write the report.
    pub fn validate(&self) -> Result<ValidationOutcome> {
        let path = &self.config.validation_input;
        let (table, source) = self.clean_reader.read_file(path)?;
        let report = self.engine.validate(&table);
        let text = render_validation_report(&report, path);
        write_text(&text, &self.config.validation_report_path)?;
        info!(
            path = %self.config.validation_report_path.display(),
            failures = report.failures(),
            "wrote validation report"
        );
        Ok(ValidationOutcome {
            source,
            report,
            text,
        })
    }

    /// Diff raw and clean column sets and write the change report.
    pub fn report_changes(&self) -> Result<(ChangeReport, String)> {
        let (raw, _) = self.read_raw()?;
        let (clean, _) = self.clean_reader.read_file(&self.config.clean_path)?;
        let report = ChangeReport::compare(&raw, &clean);
        let text = report.render(&self.config.raw_path, &self.config.clean_path);
        write_text(&text, &self.config.change_report_path)?;
        info!(path = %self.config.change_report_path.display(), "wrote change report");
        Ok((report, text))
    }
}
