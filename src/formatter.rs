/*!
 * Content formatting: display paths, language tags and block wrapping
 */

use std::path::{Path, MAIN_SEPARATOR_STR};

use crate::config::Config;
use crate::language::language_for;
use crate::types::{FormattedBlock, OutputFormat, PathStyle};
use crate::utils::normalized_segments;

/// Wrap file text for pasting
///
/// Markdown yields `path:` followed by a fenced block, tagged with a language
/// when `add_language` is set and the extension is known. Xml wraps the body
/// in a tag named after the display path. Neither the tag name nor the body
/// is escaped, so a body containing the closing tag is emitted as is.
pub fn format_file(path: &Path, text: &str, config: &Config) -> FormattedBlock {
    let display_path = display_path(path, config);

    let text = match config.format {
        OutputFormat::Markdown => {
            let lang = if config.add_language {
                language_for(path).unwrap_or("")
            } else {
                ""
            };
            format!("{}:\n```{}\n{}\n```", display_path, lang, text)
        }
        OutputFormat::Xml => format!("<{0}>\n{1}\n</{0}>", display_path, text),
    };

    FormattedBlock { display_path, text }
}

/// Path string shown for a file under the configured path style
pub fn display_path(path: &Path, config: &Config) -> String {
    let full = path.to_string_lossy().into_owned();

    match config.path_style {
        PathStyle::FilenameOnly => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(full),
        PathStyle::FullPath => full,
        PathStyle::Relative => match config.project_root.as_deref() {
            Some(root) => relative_to_root(path, root).unwrap_or(full),
            None => full,
        },
    }
}

/// Segments of `path` from the first one equal to `root`, joined with the separator
fn relative_to_root(path: &Path, root: &str) -> Option<String> {
    let segments = normalized_segments(path);
    let start = segments.iter().position(|segment| segment == root)?;
    Some(segments[start..].join(MAIN_SEPARATOR_STR))
}
