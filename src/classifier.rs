/*!
 * Path classification: directory test, text probe and the ignore-name rule
 */

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str;

use log::debug;

use crate::types::PathKind;

/// Number of leading bytes inspected by the text probe
pub const PROBE_SIZE: usize = 1024;

/// Suffix that marks Python packaging metadata directories, compared lowercase
const EGG_INFO_SUFFIX: &str = "egg-info";

/// Classify a path as a directory, a text file, or something else
///
/// Directories win regardless of contents. Anything else is probed by
/// decoding its first [`PROBE_SIZE`] bytes as UTF-8. I/O errors while
/// probing are folded into [`PathKind::NonText`] and never returned.
pub fn classify(path: &Path) -> PathKind {
    if path.is_dir() {
        return PathKind::Directory;
    }

    match probe_utf8(path) {
        Ok(true) => PathKind::TextFile,
        Ok(false) => {
            debug!("{} is not UTF-8 in its first {} bytes", path.display(), PROBE_SIZE);
            PathKind::NonText
        }
        Err(e) => {
            debug!("Could not probe {}: {}", path.display(), e);
            PathKind::NonText
        }
    }
}

/// Whether a directory name is pruned from trees
///
/// Exact, case-sensitive membership in `ignored`, or a name ending in
/// `egg-info` in any case.
pub fn is_ignored_name(name: &str, ignored: &BTreeSet<String>) -> bool {
    ignored.contains(name) || name.to_lowercase().ends_with(EGG_INFO_SUFFIX)
}

/// Read up to [`PROBE_SIZE`] bytes and check that they decode as UTF-8
fn probe_utf8(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::with_capacity(PROBE_SIZE);
    file.by_ref()
        .take(PROBE_SIZE as u64)
        .read_to_end(&mut buffer)?;

    Ok(is_utf8_prefix(&buffer, buffer.len() == PROBE_SIZE))
}

/// Decode check for a probe buffer
///
/// When the buffer was cut at the probe boundary, an incomplete multi-byte
/// sequence at its very end is accepted: only bytes inside the window count.
fn is_utf8_prefix(buffer: &[u8], truncated: bool) -> bool {
    match str::from_utf8(buffer) {
        Ok(_) => true,
        // error_len() is None only for a sequence cut off by the end of input
        Err(e) => truncated && e.error_len().is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_directory_is_always_directory() -> io::Result<()> {
        let temp = tempdir()?;
        assert_eq!(classify(temp.path()), PathKind::Directory);
        Ok(())
    }

    #[test]
    fn test_text_and_empty_files() -> io::Result<()> {
        let temp = tempdir()?;
        let text = temp.path().join("hello.txt");
        let empty = temp.path().join("empty.txt");
        fs::write(&text, "héllo wörld")?;
        fs::write(&empty, "")?;

        assert_eq!(classify(&text), PathKind::TextFile);
        assert_eq!(classify(&empty), PathKind::TextFile);
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_is_non_text() -> io::Result<()> {
        let temp = tempdir()?;
        let binary = temp.path().join("image.bin");
        fs::write(&binary, [0x89, b'P', b'N', b'G', 0xff, 0xfe, 0x00])?;

        assert_eq!(classify(&binary), PathKind::NonText);
        Ok(())
    }

    #[test]
    fn test_nul_bytes_are_valid_utf8() -> io::Result<()> {
        // Only the decode probe decides; NUL is valid UTF-8
        let temp = tempdir()?;
        let path = temp.path().join("nul.dat");
        fs::write(&path, [0u8, 1, 2, 3])?;

        assert_eq!(classify(&path), PathKind::TextFile);
        Ok(())
    }

    #[test]
    fn test_invalid_bytes_after_probe_window_are_not_seen() -> io::Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("late.txt");
        let mut bytes = vec![b'a'; PROBE_SIZE];
        bytes.extend_from_slice(&[0xff, 0xfe]);
        fs::write(&path, bytes)?;

        assert_eq!(classify(&path), PathKind::TextFile);
        Ok(())
    }

    #[test]
    fn test_multibyte_char_cut_by_probe_boundary() -> io::Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("boundary.txt");
        // 1023 ASCII bytes then a 3-byte char straddling the boundary
        let mut text = "a".repeat(PROBE_SIZE - 1);
        text.push('€');
        fs::write(&path, text)?;

        assert_eq!(classify(&path), PathKind::TextFile);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_non_text() {
        assert_eq!(
            classify(Path::new("/definitely/not/here.txt")),
            PathKind::NonText
        );
    }

    #[test]
    fn test_is_ignored_name() {
        let ignored: BTreeSet<String> = ["node_modules", ".git"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert!(is_ignored_name("node_modules", &ignored));
        assert!(is_ignored_name(".git", &ignored));
        // Set membership is case-sensitive
        assert!(!is_ignored_name("Node_Modules", &ignored));
        // The egg-info suffix is not
        assert!(is_ignored_name("mypkg.egg-info", &ignored));
        assert!(is_ignored_name("MyPkg.EGG-INFO", &ignored));
        assert!(!is_ignored_name("src", &ignored));
    }
}
