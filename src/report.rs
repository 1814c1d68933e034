/*!
 * Run report for dropcat
 *
 * Summarizes a batch as console tables: one row per dropped path and a
 * summary with the symbol count of the final text.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::engine::BatchOutput;
use crate::types::Processed;
use crate::utils::{count_lines, count_symbols};

/// Information about one dropped path in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReportInfo {
    /// Display path for files, root name for trees, the raw path when skipped
    pub name: String,
    /// "file", "tree" or "skipped"
    pub kind: &'static str,
    /// Lines contributed to the output
    pub lines: usize,
    /// Symbols contributed to the output
    pub symbols: usize,
}

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Time taken to aggregate
    pub duration: Duration,
    /// Paths that contributed text
    pub paths_processed: usize,
    /// Paths skipped as binary, missing or unreadable
    pub paths_skipped: usize,
    /// Directory listing problems
    pub diagnostics: usize,
    /// Symbols in the final text, prompt included
    pub total_symbols: usize,
    /// Details for each path, in input order
    pub path_details: Vec<PathReportInfo>,
}

impl RunReport {
    /// Build a report from a processed batch and the text that was emitted
    pub fn from_batch(batch: &BatchOutput, final_text: &str, duration: Duration) -> Self {
        let path_details = batch
            .items
            .iter()
            .map(|item| match &item.outcome {
                Processed::Block(block) => PathReportInfo {
                    name: block.display_path.clone(),
                    kind: "file",
                    lines: count_lines(&block.text),
                    symbols: count_symbols(&block.text),
                },
                Processed::Tree(tree) => {
                    let text = tree.render();
                    PathReportInfo {
                        name: tree.lines.first().cloned().unwrap_or_default(),
                        kind: "tree",
                        lines: tree.lines.len(),
                        symbols: count_symbols(&text),
                    }
                }
                Processed::Skipped(_) => PathReportInfo {
                    name: item.path.display().to_string(),
                    kind: "skipped",
                    lines: 0,
                    symbols: 0,
                },
            })
            .collect();

        Self {
            duration,
            paths_processed: batch.produced(),
            paths_skipped: batch.skipped().count(),
            diagnostics: batch.diagnostics().count(),
            total_symbols: count_symbols(final_text),
            path_details,
        }
    }

    /// Rough token estimate: four symbols per token
    pub fn estimated_tokens(&self) -> usize {
        self.total_symbols / 4
    }
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for runs
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
        }
    }

    /// Print the report to stderr, keeping stdout for the text itself
    pub fn print_report(&self, report: &RunReport) {
        eprintln!("\n{}", self.generate_report(report));
    }

    fn styled(mut table: Table) -> String {
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table.to_string()
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "Paths Processed",
                value: self.format_number(report.paths_processed),
            },
            SummaryRow {
                key: "Paths Skipped",
                value: self.format_number(report.paths_skipped),
            },
            SummaryRow {
                key: "Diagnostics",
                value: self.format_number(report.diagnostics),
            },
            SummaryRow {
                key: "Symbols",
                value: self.format_number(report.total_symbols),
            },
            SummaryRow {
                key: "LLM Tokens",
                value: format!("{} (estimated)", self.format_number(report.estimated_tokens())),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
        ];

        Self::styled(Table::new(rows))
    }

    fn create_paths_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct PathRow {
            #[tabled(rename = "Path")]
            name: String,

            #[tabled(rename = "Kind")]
            kind: &'static str,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Symbols")]
            symbols: String,
        }

        let rows: Vec<PathRow> = report
            .path_details
            .iter()
            .map(|info| PathRow {
                name: info.name.clone(),
                kind: info.kind,
                lines: self.format_number(info.lines),
                symbols: self.format_number(info.symbols),
            })
            .collect();

        Self::styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &RunReport) -> String {
        format!(
            "DROPPED PATHS\n{}\n\nSUMMARY\n{}",
            self.create_paths_table(report),
            self.create_summary_table(report)
        )
    }
}
