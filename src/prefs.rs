/*!
 * Persisted user preferences
 *
 * Stored as JSON in the platform configuration directory. The engine never
 * reads this file; the host loads it once and hands snapshots to the engine.
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::bail;
use crate::config::{Config, HostOptions};
use crate::error::Result;
use crate::output::write_atomic;
use crate::types::{OutputFormat, PathStyle};
use crate::utils::{name_set, DEFAULT_IGNORED_DIRS};

/// Directory under the platform config dir
const APP_DIR: &str = "dropcat";

/// Preferences file name
const PREFS_FILE: &str = "preferences.json";

/// User preferences restored at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Output wrapping style
    #[serde(deserialize_with = "OutputFormat::deserialize_lenient")]
    pub format: OutputFormat,

    /// How displayed paths are derived
    #[serde(deserialize_with = "PathStyle::deserialize_lenient")]
    pub path_style: PathStyle,

    /// Anchor segment for relative paths
    pub project_root: Option<String>,

    /// Keep pruned directories in trees
    pub show_ignored: bool,

    /// Tag Markdown fences with a language
    pub add_language: bool,

    /// Append to the output file instead of replacing it
    pub append_mode: bool,

    /// Whether the stored prompt is placed before the output
    pub prompt_enabled: bool,

    /// Stored prompt text
    pub prompt: String,

    /// Directory names pruned from trees; an empty list is kept as empty
    pub ignored_folders: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            path_style: PathStyle::FilenameOnly,
            project_root: None,
            show_ignored: true,
            add_language: true,
            append_mode: false,
            prompt_enabled: false,
            prompt: String::new(),
            ignored_folders: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Preferences {
    /// Default location of the preferences file
    pub fn default_path() -> Result<PathBuf> {
        match dirs::config_dir() {
            Some(dir) => Ok(dir.join(APP_DIR).join(PREFS_FILE)),
            None => bail!(Preferences, "could not determine the configuration directory"),
        }
    }

    /// Load preferences, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No preferences at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let prefs = serde_json::from_str(&content)?;
        debug!("Loaded preferences from {}", path.display());
        Ok(prefs)
    }

    /// Save preferences, replacing the file in one step
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        write_atomic(path, &content)?;
        debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Stored ignore list as a set for the engine
    pub fn ignored_set(&self) -> BTreeSet<String> {
        name_set(self.ignored_folders.iter().cloned())
    }

    /// Add names, returning the ones that were not already present
    pub fn add_ignored<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let mut added = Vec::new();
        for name in names.iter().map(|n| n.as_ref().trim()) {
            if name.is_empty() || self.ignored_folders.iter().any(|n| n == name) {
                continue;
            }
            self.ignored_folders.push(name.to_string());
            added.push(name.to_string());
        }
        added
    }

    /// Remove names, returning the ones that were present
    pub fn remove_ignored<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<String> {
        let mut removed = Vec::new();
        for name in names.iter().map(|n| n.as_ref().trim()) {
            let before = self.ignored_folders.len();
            self.ignored_folders.retain(|n| n != name);
            if self.ignored_folders.len() != before {
                removed.push(name.to_string());
            }
        }
        removed
    }

    /// Restore the built-in ignore list
    pub fn reset_ignored(&mut self) {
        self.ignored_folders = Self::default().ignored_folders;
    }

    /// Record the effective settings of a run
    ///
    /// The ignore list is left alone: names passed with `--ignore` only apply
    /// to that run, and the list is edited through its own subcommand.
    pub fn capture(&mut self, config: &Config, host: &HostOptions) {
        self.format = config.format;
        self.path_style = config.path_style;
        self.project_root = config.project_root.clone();
        self.show_ignored = config.show_ignored;
        self.add_language = config.add_language;
        self.append_mode = host.append;
        self.prompt_enabled = host.prompt.is_some();
        if let Some(prompt) = &host.prompt {
            self.prompt = prompt.clone();
        }
    }
}
