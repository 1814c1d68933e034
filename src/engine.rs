/*!
 * Aggregation engine: dispatch each path to the tree renderer or the formatter
 */

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::classifier::classify;
use crate::config::Config;
use crate::formatter::format_file;
use crate::tree::render_tree;
use crate::types::{Diagnostic, PathKind, Processed, SkipReason};

/// Separator placed between the outputs of consecutive paths
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Outcome of one path within a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    /// Path as given by the caller
    pub path: PathBuf,
    /// What the engine produced for it
    pub outcome: Processed,
}

/// Result of processing a batch of paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutput {
    /// Outputs of all successful paths, in input order
    pub text: String,
    /// Per-path outcomes, in input order
    pub items: Vec<BatchItem>,
}

impl BatchOutput {
    /// Paths that produced nothing, with the reason
    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &SkipReason)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            Processed::Skipped(reason) => Some((item.path.as_path(), reason)),
            _ => None,
        })
    }

    /// Directory listing problems from all rendered trees
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().flat_map(|item| match &item.outcome {
            Processed::Tree(tree) => tree.diagnostics.as_slice(),
            _ => &[][..],
        })
    }

    /// Number of paths that contributed text
    pub fn produced(&self) -> usize {
        self.items
            .iter()
            .filter(|item| !matches!(item.outcome, Processed::Skipped(_)))
            .count()
    }
}

/// Aggregates dropped paths under one configuration snapshot
///
/// The aggregator keeps no state between calls beyond its configuration.
/// Build a new one when the settings or the ignore set change.
#[derive(Debug, Clone)]
pub struct Aggregator {
    config: Config,
}

impl Aggregator {
    /// Create an aggregator for a configuration snapshot
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process a single path
    pub fn process(&self, path: &Path) -> Processed {
        process(path, &self.config)
    }

    /// Process every path independently and join the results
    ///
    /// A skipped path never discards the output of the others; outputs are
    /// separated by a single blank line.
    pub fn process_batch<P: AsRef<Path>>(&self, paths: &[P]) -> BatchOutput {
        let mut texts = Vec::with_capacity(paths.len());
        let mut items = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            let outcome = self.process(path);

            match &outcome {
                Processed::Skipped(reason) => {
                    warn!("Skipping {}: {}", path.display(), reason);
                }
                other => {
                    if let Some(text) = other.text() {
                        texts.push(text);
                    }
                }
            }

            items.push(BatchItem {
                path: path.to_path_buf(),
                outcome,
            });
        }

        BatchOutput {
            text: texts.join(BLOCK_SEPARATOR),
            items,
        }
    }
}

/// Process a single path under `config`
///
/// Directories become trees, text files become formatted blocks, and
/// everything else is skipped with a reason the caller should surface.
pub fn process(path: &Path, config: &Config) -> Processed {
    if !path.exists() {
        return Processed::Skipped(SkipReason::NotFound);
    }

    match classify(path) {
        PathKind::Directory => {
            debug!("Rendering tree for {}", path.display());
            Processed::Tree(render_tree(
                path,
                &config.ignored_dirs,
                config.show_ignored,
                config.max_depth,
            ))
        }
        PathKind::NonText => Processed::Skipped(SkipReason::NonText),
        PathKind::TextFile => match fs::read_to_string(path) {
            Ok(text) => {
                debug!("Formatting {} ({} bytes)", path.display(), text.len());
                Processed::Block(format_file(path, &text, config))
            }
            Err(e) => Processed::Skipped(SkipReason::Unreadable(e.to_string())),
        },
    }
}
