/*!
 * Configuration handling for dropcat
 */

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;
use crate::prefs::Preferences;
use crate::types::{OutputFormat, PathStyle};
use crate::utils::{name_set, DEFAULT_IGNORED_DIRS};

/// Command-line arguments for dropcat
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dropcat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bundle files and directory trees into one paste-ready text for LLM prompts",
    long_about = "Concatenates the given files wrapped as Markdown code fences or Xml tags, and renders the given directories as pruned ASCII trees. Settings not given on the command line come from the stored preferences.",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    /// Files and directories to aggregate, in output order
    pub paths: Vec<PathBuf>,

    /// Output wrapping style
    #[clap(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// How the path above each file block is shown
    #[clap(long, value_enum)]
    pub path_style: Option<PathStyle>,

    /// Directory name that starts the path in `relative` style
    #[clap(long, value_name = "NAME")]
    pub project_root: Option<String>,

    /// Keep ignored directories in trees, collapsed to "..."
    #[clap(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub show_ignored: Option<bool>,

    /// Tag Markdown fences with the file's language
    #[clap(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub add_language: Option<bool>,

    /// Comma-separated directory names to ignore in addition to the stored list
    #[clap(long = "ignore", value_name = "NAMES", value_delimiter = ',')]
    pub extra_ignored: Vec<String>,

    /// Stop expanding trees below this depth
    #[clap(long)]
    pub max_depth: Option<usize>,

    /// Text placed before the aggregated output
    #[clap(long)]
    pub prompt: Option<String>,

    /// Save the result to this file
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of replacing it
    #[clap(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub append: Option<bool>,

    /// Copy the result to the system clipboard
    #[clap(long, help = "Copy output to system clipboard")]
    pub clip: bool,

    /// Do not print the result to stdout
    #[clap(short, long)]
    pub quiet: bool,

    /// Print a summary table to stderr
    #[clap(long)]
    pub report: bool,

    /// Store the effective settings as the new preferences
    #[clap(long)]
    pub save_prefs: bool,

    /// Preferences file to use instead of the default location
    #[clap(long, value_name = "FILE", global = true)]
    pub prefs: Option<PathBuf>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,

    /// Log classification and traversal decisions
    #[clap(short, long)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// View or edit the stored list of ignored directory names
    Ignored {
        #[clap(subcommand)]
        action: IgnoredAction,
    },
}

/// Edits to the stored ignore list
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum IgnoredAction {
    /// Print the stored names, one per line
    List,
    /// Add names to the list
    Add {
        #[clap(required = true)]
        names: Vec<String>,
    },
    /// Remove names from the list
    Remove {
        #[clap(required = true)]
        names: Vec<String>,
    },
    /// Restore the built-in list
    Reset,
}

/// Engine configuration, an immutable snapshot per call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Output wrapping style
    pub format: OutputFormat,

    /// How the displayed path is derived
    pub path_style: PathStyle,

    /// Anchor segment for relative paths
    pub project_root: Option<String>,

    /// Whether pruned directories still appear, collapsed
    pub show_ignored: bool,

    /// Whether Markdown fences get a language tag
    pub add_language: bool,

    /// Directory names pruned from trees
    pub ignored_dirs: BTreeSet<String>,

    /// Hard recursion bound for trees
    pub max_depth: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            path_style: PathStyle::FilenameOnly,
            project_root: None,
            show_ignored: true,
            add_language: true,
            ignored_dirs: name_set(DEFAULT_IGNORED_DIRS.iter().copied()),
            max_depth: None,
        }
    }
}

impl Config {
    /// Merge command-line arguments over stored preferences
    pub fn resolve(args: &Args, prefs: &Preferences) -> Self {
        let mut ignored_dirs = prefs.ignored_set();
        ignored_dirs.extend(
            args.extra_ignored
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );

        let project_root = args
            .project_root
            .as_deref()
            .or(prefs.project_root.as_deref())
            .map(str::trim)
            .filter(|root| !root.is_empty())
            .map(str::to_string);

        Self {
            format: args.format.unwrap_or(prefs.format),
            path_style: args.path_style.unwrap_or(prefs.path_style),
            project_root,
            show_ignored: args.show_ignored.unwrap_or(prefs.show_ignored),
            add_language: args.add_language.unwrap_or(prefs.add_language),
            ignored_dirs,
            max_depth: args.max_depth,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.project_root {
            ensure!(
                !root.contains('/') && !root.contains('\\'),
                Config,
                "project root must be a single directory name, got '{}'",
                root
            );
        }

        for name in &self.ignored_dirs {
            ensure!(
                !name.contains('/') && !name.contains('\\'),
                Config,
                "ignored entries are directory names, not paths: '{}'",
                name
            );
        }

        Ok(())
    }
}

/// Settings owned by the host rather than the engine
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostOptions {
    /// Prompt placed before the output, when enabled
    pub prompt: Option<String>,

    /// File the result is saved to
    pub output_file: Option<PathBuf>,

    /// Append to an existing output file
    pub append: bool,

    /// Copy the result to the clipboard
    pub clip: bool,

    /// Suppress stdout
    pub quiet: bool,

    /// Print the summary table
    pub report: bool,
}

impl HostOptions {
    /// Merge command-line arguments over stored preferences
    pub fn resolve(args: &Args, prefs: &Preferences) -> Self {
        let prompt = match &args.prompt {
            Some(prompt) => Some(prompt.clone()),
            None if prefs.prompt_enabled => Some(prefs.prompt.clone()),
            None => None,
        };

        Self {
            prompt,
            output_file: args.output.clone(),
            append: args.append.unwrap_or(prefs.append_mode),
            clip: args.clip,
            quiet: args.quiet,
            report: args.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn test_defaults_come_from_preferences() {
        let args = parse(&["dropcat", "a.txt"]);
        let prefs = Preferences {
            format: OutputFormat::Xml,
            path_style: PathStyle::Relative,
            project_root: Some("proj".to_string()),
            show_ignored: false,
            ..Preferences::default()
        };

        let config = Config::resolve(&args, &prefs);
        assert_eq!(config.format, OutputFormat::Xml);
        assert_eq!(config.path_style, PathStyle::Relative);
        assert_eq!(config.project_root.as_deref(), Some("proj"));
        assert!(!config.show_ignored);
        assert!(config.add_language);
        assert!(config.ignored_dirs.contains("node_modules"));
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_cli_overrides_preferences() {
        let args = parse(&[
            "dropcat",
            "--format",
            "markdown",
            "--path-style",
            "full",
            "--show-ignored=false",
            "--add-language",
            "--ignore",
            "vendor, tmp",
            "--max-depth",
            "2",
            "src",
        ]);
        let prefs = Preferences {
            format: OutputFormat::Xml,
            add_language: false,
            ..Preferences::default()
        };

        let config = Config::resolve(&args, &prefs);
        assert_eq!(config.format, OutputFormat::Markdown);
        assert_eq!(config.path_style, PathStyle::FullPath);
        assert!(!config.show_ignored);
        assert!(config.add_language);
        assert!(config.ignored_dirs.contains("vendor"));
        assert!(config.ignored_dirs.contains("tmp"));
        assert_eq!(config.max_depth, Some(2));
        assert_eq!(args.paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn test_blank_project_root_is_unset() {
        let args = parse(&["dropcat", "--project-root", "  ", "a.txt"]);
        let config = Config::resolve(&args, &Preferences::default());
        assert_eq!(config.project_root, None);
    }

    #[test]
    fn test_validate_rejects_multi_segment_root() {
        let config = Config {
            project_root: Some("a/b".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_host_options_prompt() {
        let prefs = Preferences {
            prompt_enabled: true,
            prompt: "Review this:".to_string(),
            append_mode: true,
            ..Preferences::default()
        };

        let stored = HostOptions::resolve(&parse(&["dropcat", "a.txt"]), &prefs);
        assert_eq!(stored.prompt.as_deref(), Some("Review this:"));
        assert!(stored.append);

        let given = HostOptions::resolve(
            &parse(&["dropcat", "--prompt", "Explain", "--append=false", "a.txt"]),
            &prefs,
        );
        assert_eq!(given.prompt.as_deref(), Some("Explain"));
        assert!(!given.append);
    }

    #[test]
    fn test_ignored_subcommand() {
        let args = parse(&["dropcat", "ignored", "add", "vendor", "tmp"]);
        assert_eq!(
            args.command,
            Some(Command::Ignored {
                action: IgnoredAction::Add {
                    names: vec!["vendor".to_string(), "tmp".to_string()]
                }
            })
        );
        assert!(args.paths.is_empty());
    }
}
