/*!
 * Configuration handling for the exporter
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::{ExportError, Result};
use crate::project::ProjectCatalog;
use crate::scanner::DEFAULT_MAX_FILES;
use crate::{bail, ensure};

/// Default destination of the exported document
pub const DEFAULT_OUTPUT_FILE: &str = "custom-codebase.md";

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codebase-exporter",
    version = env!("CARGO_PKG_VERSION"),
    about = "Export selected project files as one Markdown document",
    long_about = "Scans a project directory for the source files of a project type and \
                  concatenates the selected ones into a single Markdown document, \
                  written to a file or copied to the clipboard."
)]
pub struct Args {
    /// Project directory (defaults to the last one used)
    pub directory_path: Option<String>,

    /// Output Markdown file
    #[clap(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: String,

    /// Project type name, e.g. "Rust" or "Web/Node.js" (detected if omitted)
    #[clap(short = 't', long = "type")]
    pub project_type: Option<String>,

    /// List every file regardless of extension
    #[clap(long, conflicts_with = "project_type")]
    pub all_files: bool,

    /// Comma-separated relative paths or file names to leave out
    #[clap(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Maximum number of files a scan keeps
    #[clap(long, default_value_t = DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// Copy the document to the clipboard instead of writing a file
    #[clap(long)]
    pub clip: bool,

    /// Print the file selection and exit without exporting
    #[clap(long)]
    pub list: bool,

    /// Do not remember this directory for the next run
    #[clap(long)]
    pub no_remember: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence all log output
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// How the active project type is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSelection {
    /// A catalog entry by name
    Named(String),
    /// No filter
    AllFiles,
    /// Detect from marker files, falling back to the first entry
    Detect,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project root to scan
    pub target_dir: PathBuf,

    /// Destination file for exports
    pub output_file: PathBuf,

    /// Project type choice
    pub project_type: TypeSelection,

    /// Records to deselect after scanning
    pub exclude: Vec<String>,

    /// Cap on records per scan
    pub max_files: usize,

    /// Export to the clipboard
    pub clip: bool,

    /// Only list the selection
    pub list_only: bool,

    /// Persist the root as the recent directory
    pub remember: bool,
}

impl Config {
    /// Create configuration from command-line arguments and a resolved root
    pub fn from_args(args: Args, target_dir: PathBuf) -> Self {
        let project_type = match (args.project_type, args.all_files) {
            (Some(name), _) => TypeSelection::Named(name),
            (None, true) => TypeSelection::AllFiles,
            (None, false) => TypeSelection::Detect,
        };

        Self {
            target_dir,
            output_file: PathBuf::from(args.output),
            project_type,
            exclude: args.exclude,
            max_files: args.max_files,
            clip: args.clip,
            list_only: args.list,
            remember: !args.no_remember,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            bail!(
                Config,
                "Target directory not found: {}",
                self.target_dir.display()
            );
        }

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                bail!(Config, "Output directory not found: {}", parent.display());
            }
        }

        ensure!(self.max_files > 0, InvalidArgument, "--max-files must be at least 1");

        Ok(())
    }

    /// Resolve the project type index against `catalog`
    pub fn resolve_project_type(&self, catalog: &ProjectCatalog) -> Result<Option<usize>> {
        match &self.project_type {
            TypeSelection::Named(name) => catalog
                .position(name)
                .map(Some)
                .ok_or_else(|| ExportError::UnknownProjectType(name.clone())),
            TypeSelection::AllFiles => Ok(None),
            TypeSelection::Detect => Ok(Some(
                catalog.detect(&self.target_dir).unwrap_or(0),
            )),
        }
    }
}
