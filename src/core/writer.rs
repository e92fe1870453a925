use crate::core::errors::{Error, Result};
use crate::core::records::{ServiceRecord, SummaryRecord};
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/*-------------------------------------------------------------------------------------------------
  Document Format
-------------------------------------------------------------------------------------------------*/

/// Encoding used for the generated documents.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Format {
    /// YAML with 2-space indentation.
    #[default]
    Yaml,

    /// Pretty-printed JSON with 2-space indentation.
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }

    fn encode<T: Serialize>(&self, document: &T) -> Result<String> {
        match self {
            Format::Yaml => Ok(serde_yaml::to_string(document)?),
            Format::Json => serde_json::to_string_pretty(document)
                .map(|json| json + "\n")
                .map_err(Error::Json),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Writer
-------------------------------------------------------------------------------------------------*/

/// Writes the summary document (`metadata.<ext>`) and one document per service
/// (`<record key>.<ext>`) into an output directory.
#[derive(Debug, Clone)]
pub struct Writer {
    output_dir: PathBuf,
    format: Format,
}

/// Outcome of [Writer::write].
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct WriteSummary {
    pub written: usize,
    pub failed: usize,
}

impl Writer {
    pub fn new<P: AsRef<Path>>(output_dir: P, format: Format) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Write the summary, then every service record.
    ///
    /// Failing to create the output directory or to write the summary is an error. A service
    /// record that fails to write is logged and counted in [WriteSummary::failed]; the remaining
    /// records are still written. Records whose keys collide overwrite each other in order.
    pub fn write(
        &self,
        records: &[ServiceRecord<'_>],
        summary: &SummaryRecord<'_>,
    ) -> Result<WriteSummary> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|error| Error::io(&self.output_dir, error))?;

        info!(
            "Processing services; count: {}, change number: {}, cloud: {}",
            summary.service_count, summary.change_number, summary.cloud
        );

        let path = self.write_summary(summary)?;
        info!("Generated metadata file: {:?}", path);

        let mut result = WriteSummary::default();
        for record in records {
            match self.write_record(record) {
                Ok(path) => {
                    result.written += 1;
                    debug!(
                        "Generated service file: {:?}; prefixes: {}, ipv4: {}, ipv6: {}",
                        path,
                        record.address_prefixes.counts.total,
                        record.address_prefixes.counts.ipv4,
                        record.address_prefixes.counts.ipv6
                    );
                }
                Err(error) => {
                    result.failed += 1;
                    warn!("Failed to write service file for {:?}: {}", record.id, error);
                }
            }
        }

        info!(
            "Generation complete; total services: {}, successful files: {}, output directory: {:?}",
            summary.service_count, result.written, self.output_dir
        );

        Ok(result)
    }

    /// Write the summary document to `metadata.<ext>`.
    pub fn write_summary(&self, summary: &SummaryRecord<'_>) -> Result<PathBuf> {
        let path = self.document_path("metadata");
        self.write_document(&path, summary)?;
        Ok(path)
    }

    /// Write a service record to `<record key>.<ext>`.
    pub fn write_record(&self, record: &ServiceRecord<'_>) -> Result<PathBuf> {
        let path = self.document_path(&record.key());
        self.write_document(&path, record)?;
        Ok(path)
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn document_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", key, self.format.extension()))
    }

    fn write_document<T: Serialize>(&self, path: &Path, document: &T) -> Result<()> {
        let encoded = self.format.encode(document)?;
        fs::write(path, encoded).map_err(|error| Error::io(path, error))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
