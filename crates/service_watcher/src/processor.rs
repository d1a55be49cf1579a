//! End-to-end processing of one generation report.

use std::path::{Path, PathBuf};

use adapter_xml::{GenerationOutputWriter, GenerationReportParser, ReferenceDataParser};
use fleet_core::prelude::*;
use infra_config::AppConfig;
use tracing::{info, warn};

use crate::error::Result;

/// What happened to a processed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The report held no generators; no output was written
    Skipped,
    /// The output document was written
    Written {
        /// Output document path
        output_path: PathBuf,
        /// Generators read from the report
        generators: usize,
        /// Days with an emission leader
        leader_days: usize,
        /// Coal heat-rate entries
        heat_rates: usize,
    },
}

/// Parses a report, aggregates it and writes the output document.
///
/// Reference factors are resolved once at construction and shared by every
/// report processed afterwards.
#[derive(Debug, Clone)]
pub struct ReportProcessor {
    resolver: ReferenceFactorResolver,
    output_path: PathBuf,
    writer: GenerationOutputWriter,
}

impl ReportProcessor {
    /// Create a processor from an already loaded factor table
    pub fn new(factors: FactorTable, output_path: impl Into<PathBuf>) -> Self {
        Self {
            resolver: ReferenceFactorResolver::new(factors),
            output_path: output_path.into(),
            writer: GenerationOutputWriter::new(),
        }
    }

    /// Load reference factors and output location from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let factors = ReferenceDataParser::load(&config.reference_data_path)?;
        info!(
            path = %config.reference_data_path.display(),
            "Reference factors loaded"
        );
        Ok(Self::new(factors, config.output_path()))
    }

    /// Process one report file.
    ///
    /// A missing file is an error. A report without generators is skipped
    /// and leaves any earlier output untouched.
    pub fn process_file(&self, path: &Path) -> Result<ProcessOutcome> {
        info!(path = %path.display(), "Processing report file");

        let generators = GenerationReportParser::load(path)?;
        if generators.is_empty() {
            warn!(path = %path.display(), "No generator data found");
            return Ok(ProcessOutcome::Skipped);
        }

        let result = aggregate(&generators, &self.resolver)?;
        self.writer.write(&self.output_path, &result)?;

        info!(
            path = %path.display(),
            output = %self.output_path.display(),
            generators = generators.len(),
            "Completed processing"
        );

        Ok(ProcessOutcome::Written {
            output_path: self.output_path.clone(),
            generators: generators.len(),
            leader_days: result.daily_emission_leaders.len(),
            heat_rates: result.heat_rates.len(),
        })
    }
}
