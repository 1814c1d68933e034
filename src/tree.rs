/*!
 * ASCII tree rendering with ignore pruning and a depth bound
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::classifier::is_ignored_name;
use crate::types::{Diagnostic, TreeText};
use crate::utils::normalized_segments;

/// Connector for every entry but the last at a level
const TEE: &str = "├── ";
/// Connector for the last entry at a level
const CORNER: &str = "└── ";
/// Continuation under a non-final entry
const PIPE: &str = "│   ";
/// Continuation under the final entry
const BLANK: &str = "    ";
/// Marker placed under a pruned directory
const PRUNED: &str = "...";

/// Render `root` as an ASCII tree
///
/// Each level lists directories before files, ordered by case-insensitive
/// name. Directories named in `ignored` (or ending in `egg-info`) are never
/// expanded: with `show_ignored` they appear with a `...` child, otherwise
/// not at all. With `max_depth` set, directories at that depth are listed
/// but not expanded. Directories that cannot be listed are reported in
/// [`TreeText::diagnostics`] and rendered without children.
pub fn render_tree(
    root: &Path,
    ignored: &BTreeSet<String>,
    show_ignored: bool,
    max_depth: Option<usize>,
) -> TreeText {
    let renderer = TreeRenderer {
        ignored,
        show_ignored,
        max_depth,
    };
    renderer.render(root)
}

/// One entry of a directory listing
#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Traversal settings shared across the recursion
struct TreeRenderer<'a> {
    ignored: &'a BTreeSet<String>,
    show_ignored: bool,
    max_depth: Option<usize>,
}

impl TreeRenderer<'_> {
    fn render(&self, root: &Path) -> TreeText {
        let mut tree = TreeText::default();
        tree.lines.push(root_name(root));

        // Canonical paths of the directories on the current walk
        let mut ancestors = Vec::new();
        if let Ok(canonical) = fs::canonicalize(root) {
            ancestors.push(canonical);
        }

        self.walk(root, "", 0, &mut ancestors, &mut tree);
        debug!(
            "Rendered {} with {} lines, {} diagnostics",
            root.display(),
            tree.lines.len(),
            tree.diagnostics.len()
        );
        tree
    }

    fn walk(
        &self,
        dir: &Path,
        prefix: &str,
        depth: usize,
        ancestors: &mut Vec<PathBuf>,
        tree: &mut TreeText,
    ) {
        if self.max_depth.map_or(false, |max| depth >= max) {
            return;
        }

        let entries = match list_sorted(dir) {
            Ok(entries) => entries,
            Err(e) => {
                let message = e
                    .io_error()
                    .map(|io| io.to_string())
                    .unwrap_or_else(|| e.to_string());
                warn!("Error accessing folder {}: {}", dir.display(), message);
                tree.diagnostics.push(Diagnostic {
                    path: dir.to_path_buf(),
                    message,
                });
                return;
            }
        };

        let count = entries.len();
        for (index, entry) in entries.iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { CORNER } else { TEE };
            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });

            if entry.is_dir && is_ignored_name(&entry.name, self.ignored) {
                if self.show_ignored {
                    tree.lines.push(format!("{}{}{}", prefix, connector, entry.name));
                    tree.lines.push(format!("{}{}", child_prefix, PRUNED));
                }
                continue;
            }

            tree.lines.push(format!("{}{}{}", prefix, connector, entry.name));

            if !entry.is_dir {
                continue;
            }

            match fs::canonicalize(&entry.path) {
                Ok(canonical) if ancestors.contains(&canonical) => {
                    warn!("Not following {}: it loops back to an ancestor", entry.path.display());
                    tree.diagnostics.push(Diagnostic {
                        path: entry.path.clone(),
                        message: "link loops back to an ancestor directory".to_string(),
                    });
                }
                Ok(canonical) => {
                    ancestors.push(canonical);
                    self.walk(&entry.path, &child_prefix, depth + 1, ancestors, tree);
                    ancestors.pop();
                }
                // Listing will fail too and report the cause
                Err(_) => self.walk(&entry.path, &child_prefix, depth + 1, ancestors, tree),
            }
        }
    }
}

/// Immediate entries of `dir`: directories first, then case-insensitive name
fn list_sorted(dir: &Path) -> Result<Vec<Entry>, walkdir::Error> {
    let mut entries = Vec::new();

    for result in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = result?;
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            // Follows symlinks, so a link to a directory sorts as one
            is_dir: entry.path().is_dir(),
            path: entry.into_path(),
        });
    }

    entries.sort_by_cached_key(|e| (!e.is_dir, e.name.to_lowercase(), e.name.clone()));
    Ok(entries)
}

/// First line of the tree: the last segment of the normalized root path
fn root_name(root: &Path) -> String {
    match normalized_segments(root).pop() {
        Some(name) => name,
        None if root.has_root() => String::new(),
        None => ".".to_string(),
    }
}
