/*!
 * dropcat - Bundle files and directory trees into paste-ready LLM context
 *
 * Files are wrapped as Markdown code fences or Xml tags under a configurable
 * display path, directories are rendered as pruned ASCII trees, and the
 * results of a batch are joined into one text.
 */

pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod engine;
pub mod error;
pub mod formatter;
pub mod language;
pub mod output;
pub mod prefs;
pub mod report;
pub mod tree;
pub mod types;
pub mod utils;


// Re-export main components for easier access
pub use classifier::classify;
pub use config::{Args, Config, HostOptions};
pub use engine::{Aggregator, BatchItem, BatchOutput};
pub use error::{DropcatError, Result};
pub use formatter::{display_path, format_file};
pub use prefs::Preferences;
pub use report::{PathReportInfo, ReportFormat, Reporter, RunReport};
pub use tree::render_tree;
pub use types::{
    Diagnostic, FormattedBlock, OutputFormat, PathKind, PathStyle, Processed, SkipReason,
    TreeText,
};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
