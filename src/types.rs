/*!
 * Core types and data structures for dropcat
 */

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

/// Wrapping style for file blocks
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fenced code block under a `path:` header
    #[default]
    Markdown,
    /// Body wrapped in a tag named after the display path
    Xml,
}

impl OutputFormat {
    /// Serde helper: anything other than `markdown` selects Xml
    pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw == "markdown" {
            Self::Markdown
        } else {
            Self::Xml
        })
    }
}

/// How the path shown above a file block is derived
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    ValueEnum,
    Serialize,
    Deserialize,
)]
pub enum PathStyle {
    /// Last path segment only
    #[default]
    #[strum(serialize = "filename")]
    #[serde(rename = "filename")]
    #[value(name = "filename")]
    FilenameOnly,

    /// The path exactly as given
    #[strum(serialize = "full")]
    #[serde(rename = "full")]
    #[value(name = "full")]
    FullPath,

    /// Path starting at the project root segment
    #[strum(serialize = "relative")]
    #[serde(rename = "relative")]
    #[value(name = "relative")]
    Relative,
}

impl PathStyle {
    /// Parse a stored path style, falling back to the default for unknown values
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// Serde helper that never rejects an unknown stored value
    pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lenient(&raw))
    }
}

/// Result of classifying a dropped path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PathKind {
    /// Existing directory, rendered as a tree
    Directory,
    /// File whose first 1024 bytes decode as UTF-8
    TextFile,
    /// Anything else: undecodable, unreadable or missing
    NonText,
}

/// A formatted file block ready to be pasted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBlock {
    /// Path string shown in the header (and used as the Xml tag name)
    pub display_path: String,
    /// Complete wrapped text
    pub text: String,
}

/// A non-fatal problem met while walking a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Path that could not be listed
    pub path: PathBuf,
    /// Human readable cause
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Rendered directory tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeText {
    /// Output lines, root name first
    pub lines: Vec<String>,
    /// Subtrees that could not be listed
    pub diagnostics: Vec<Diagnostic>,
}

impl TreeText {
    /// Join the lines into the final tree string
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Why a path produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Initial chunk is not UTF-8, or the file could not be probed
    NonText,
    /// Path is neither a directory nor a file
    NotFound,
    /// Probe passed but the full read failed
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonText => write!(f, "binary or not UTF-8"),
            Self::NotFound => write!(f, "no such file or directory"),
            Self::Unreadable(cause) => write!(f, "could not be read: {}", cause),
        }
    }
}

/// Outcome of processing a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Processed {
    /// A text file wrapped per the configured format
    Block(FormattedBlock),
    /// A directory rendered as an ASCII tree
    Tree(TreeText),
    /// Nothing produced; the host must warn and move on
    Skipped(SkipReason),
}

impl Processed {
    /// Text contributed to the batch, if any
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Block(block) => Some(block.text.clone()),
            Self::Tree(tree) => Some(tree.render()),
            Self::Skipped(_) => None,
        }
    }
}
