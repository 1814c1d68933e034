/*!
 * Utility functions for dropcat
 */

use std::collections::BTreeSet;
use std::path::{Component, Path};

use once_cell::sync::Lazy;

/// Count Unicode scalar values, shown to the user as "symbols"
pub fn count_symbols(text: &str) -> usize {
    text.chars().count()
}

/// Count lines the way an editor does: a trailing newline opens no new line
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

/// Build an ignore set from any list of names
pub fn name_set<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

/// Lexically normalized named segments of a path
///
/// `.` is dropped and `..` folds into the preceding name. Leading `..` are
/// kept for relative paths and dropped at the root of absolute ones.
pub fn normalized_segments(path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut anchored = false;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchored = true,
            Component::CurDir => {}
            Component::ParentDir => {
                let folds = segments.last().map_or(false, |last| last.as_str() != "..");
                if folds {
                    segments.pop();
                } else if !anchored {
                    segments.push("..".to_string());
                }
            }
            Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
        }
    }

    segments
}

/// Directory names pruned from trees unless the user edits the list
pub static DEFAULT_IGNORED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // IDEs & Editors
        ".idea",
        ".vscode",
        // Python
        ".venv",
        ".env",
        "venv",
        "env",
        "__pycache__",
        ".mypy_cache",
        ".pytest_cache",
        ".coverage",
        // Version Control
        ".git",
        // Dependencies
        "node_modules",
        // Build & Dist
        "dist",
        "build",
        "target",
        "out",
        // JavaScript/TypeScript
        ".next",
        ".expo",
        ".turbo",
        // Caches
        ".cache",
    ]
});
