/*!
 * Reporting functionality for the exporter
 *
 * Renders the current selection and a summary of the last action as console
 * tables using the tabled library.
 */

use std::fs;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::selection::ScanSession;
use crate::utils::format_file_size;

/// One row of the selection table
#[derive(Debug, Clone)]
pub struct FileReportInfo {
    /// Path relative to the scan root
    pub path: String,
    /// Size on disk, if it could be read
    pub size: Option<u64>,
    /// Whether the file is part of the export
    pub included: bool,
}

/// Snapshot of a session and what was done with it
#[derive(Debug, Clone)]
pub struct SelectionReport {
    /// Scan root
    pub root: String,
    /// Active project type, `None` when every file is listed
    pub project_type: Option<String>,
    /// Rows in discovery order
    pub files: Vec<FileReportInfo>,
    /// Files dropped by the cap
    pub dropped: usize,
    /// Export destination, if an export happened
    pub destination: Option<String>,
    /// Time taken by scan and export
    pub duration: Duration,
    /// Final status text
    pub status: String,
}

impl SelectionReport {
    /// Build the rows for `session`
    pub fn from_session(session: &ScanSession, project_type: Option<&str>) -> Self {
        let files = session
            .records()
            .iter()
            .map(|record| FileReportInfo {
                path: record.relative_path(&session.root),
                size: fs::metadata(&record.path).ok().map(|m| m.len()),
                included: record.included,
            })
            .collect();

        Self {
            root: session.root.display().to_string(),
            project_type: project_type.map(str::to_string),
            files,
            dropped: session.dropped,
            destination: None,
            duration: Duration::default(),
            status: String::new(),
        }
    }

    pub fn selected(&self) -> usize {
        self.files.iter().filter(|f| f.included).count()
    }

    pub fn selected_bytes(&self) -> u64 {
        self.files
            .iter()
            .filter(|f| f.included)
            .filter_map(|f| f.size)
            .sum()
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for selections
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &SelectionReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &SelectionReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Keep the tail of long paths, which carries the file name
    fn format_path(&self, path: &str, max_len: usize) -> String {
        let count = path.chars().count();
        if count <= max_len {
            return path.to_string();
        }
        let tail: String = path.chars().skip(count - (max_len - 3)).collect();
        format!("...{}", tail)
    }

    fn style(table: &mut Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_files_table(&self, report: &SelectionReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "#")]
            index: usize,

            #[tabled(rename = "Export")]
            included: &'static str,

            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Size")]
            size: String,
        }

        let rows: Vec<FileRow> = report
            .files
            .iter()
            .enumerate()
            .map(|(index, info)| FileRow {
                index,
                included: if info.included { "[x]" } else { "[ ]" },
                path: self.format_path(&info.path, 60),
                size: info
                    .size
                    .map(format_file_size)
                    .unwrap_or_else(|| "?".to_string()),
            })
            .collect();

        Self::style(&mut Table::new(rows))
    }

    fn create_summary_table(&self, report: &SelectionReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = vec![
            SummaryRow {
                key: "Project Root",
                value: report.root.clone(),
            },
            SummaryRow {
                key: "Project Type",
                value: report
                    .project_type
                    .clone()
                    .unwrap_or_else(|| "All files".to_string()),
            },
            SummaryRow {
                key: "Files Found",
                value: report.files.len().to_string(),
            },
            SummaryRow {
                key: "Files Selected",
                value: format!(
                    "{} ({})",
                    report.selected(),
                    format_file_size(report.selected_bytes())
                ),
            },
        ];

        if report.dropped > 0 {
            rows.push(SummaryRow {
                key: "Skipped (limit)",
                value: report.dropped.to_string(),
            });
        }

        if let Some(destination) = &report.destination {
            rows.push(SummaryRow {
                key: "Destination",
                value: destination.clone(),
            });
        }

        rows.push(SummaryRow {
            key: "Process Time",
            value: format!("{:.4?}", report.duration),
        });

        if !report.status.is_empty() {
            rows.push(SummaryRow {
                key: "Status",
                value: report.status.clone(),
            });
        }

        Self::style(&mut Table::new(rows))
    }

    fn generate_console_report(&self, report: &SelectionReport) -> String {
        let files_table = self.create_files_table(report);
        let summary_table = self.create_summary_table(report);

        format!(
            "FILES\n{}\n\nSUMMARY\n{}",
            files_table, summary_table
        )
    }
}
