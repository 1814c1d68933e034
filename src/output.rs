/*!
 * Output sinks owned by the host: final text composition and the save file
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DropcatError, Result};

/// Place the prompt before the aggregated body, separated by a blank line
///
/// An empty or whitespace-only prompt is treated as absent.
pub fn compose(prompt: Option<&str>, body: &str) -> String {
    match prompt {
        Some(prompt) if !prompt.trim().is_empty() => format!("{}\n\n{}", prompt, body),
        _ => body.to_string(),
    }
}

/// Join new output onto what the destination already holds
pub fn append_to(existing: &str, new: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{}\n{}", existing, new)
    }
}

/// Current content of a save file, empty when it does not exist yet
pub fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(DropcatError::Output {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Write `text` verbatim as UTF-8, all or nothing
///
/// The text goes to a temporary file next to the destination which is then
/// renamed over it, so a failed write never leaves a partial file behind.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let output_err = |source: io::Error| DropcatError::Output {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(output_err)?;
    temp.write_all(text.as_bytes()).map_err(output_err)?;
    temp.as_file().sync_all().map_err(output_err)?;
    temp.persist(path).map_err(|e| output_err(e.error))?;

    Ok(())
}
