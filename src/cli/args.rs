use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about="Generate per-service documents from the Azure IP Ranges and Service Tags.", long_about = None)]
pub struct Args {
    /// Output directory for the generated documents
    #[arg(short = 'o', long, default_value = "data/services")]
    pub output: PathBuf,

    /// Previous Service Tags JSON to compare against; the new JSON is saved here
    /// [default: ~/.azure/ServiceTags_Public.json]
    #[arg(short = 'j', long = "json-input-file")]
    pub json_input_file: Option<PathBuf>,

    /// Read the new Service Tags JSON from this file instead of downloading it
    #[arg(long = "from-file")]
    pub from_file: Option<PathBuf>,

    /// Generate the documents even if no changes are detected
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Output document format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Args {
    /// Path of the saved Service Tags JSON used for change detection.
    pub fn snapshot_path(&self) -> PathBuf {
        self.json_input_file
            .clone()
            .unwrap_or_else(crate::cli::utils::default_snapshot_file)
    }
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML documents (.yaml)
    Yaml,

    /// Pretty-printed JSON documents (.json)
    Json,
}

impl From<OutputFormat> for azureipranges::Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Yaml => azureipranges::Format::Yaml,
            OutputFormat::Json => azureipranges::Format::Json,
        }
    }
}
