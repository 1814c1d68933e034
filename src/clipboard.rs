/*!
 * Clipboard sink for dropcat
 *
 * Pipes the final text into whichever clipboard command the platform
 * offers. The system clipboard is preferred; inside tmux the tmux buffer is
 * used only when no system mechanism is available.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;
use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// None of the known clipboard commands is installed
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// The clipboard command ran but did not succeed
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Anything that can receive the output text
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// Clipboard commands, each reading the text from stdin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    /// Wayland `wl-copy`
    WlCopy,
    /// X11 `xsel`
    Xsel,
    /// X11 `xclip`
    Xclip,
    /// macOS `pbcopy`
    Pbcopy,
    /// Windows or WSL `clip.exe`
    ClipExe,
    /// Termux on Android
    Termux,
    /// tmux paste buffer
    Tmux,
}

impl ClipboardBackend {
    /// Executable name
    pub fn program(self) -> &'static str {
        match self {
            Self::WlCopy => "wl-copy",
            Self::Xsel => "xsel",
            Self::Xclip => "xclip",
            Self::Pbcopy => "pbcopy",
            Self::ClipExe => "clip.exe",
            Self::Termux => "termux-clipboard-set",
            Self::Tmux => "tmux",
        }
    }

    fn args(self) -> &'static [&'static str] {
        match self {
            Self::Xsel => &["--clipboard", "--input"],
            Self::Xclip => &["-selection", "clipboard", "-in"],
            Self::Tmux => &["load-buffer", "-w", "-"],
            _ => &[],
        }
    }
}

impl Clipboard for ClipboardBackend {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let program = self.program();
        debug!("Copying {} bytes with {}", text.len(), program);

        let mut child = Command::new(program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Scope stdin so it is closed before waiting, or the command never sees EOF
        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                ClipboardError::CommandFailed(format!("could not open stdin of {}", program))
            })?;
            stdin.write_all(text.as_bytes())?;
        }
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with {}",
                program, status
            )))
        }
    }
}

/// What the session looks like, as far as clipboard choice is concerned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Session {
    macos: bool,
    windows_or_wsl: bool,
    android: bool,
    wayland: bool,
    x11: bool,
    tmux: bool,
}

impl Session {
    fn detect() -> Self {
        Self {
            macos: cfg!(target_os = "macos"),
            windows_or_wsl: cfg!(target_os = "windows") || env::var_os("WSL_DISTRO_NAME").is_some(),
            android: cfg!(target_os = "android") || env::var_os("TERMUX_VERSION").is_some(),
            wayland: env::var_os("WAYLAND_DISPLAY").is_some(),
            x11: env::var_os("DISPLAY").is_some(),
            tmux: env::var_os("TMUX").is_some(),
        }
    }

    /// Backends worth trying, most preferred first
    fn candidates(self) -> Vec<ClipboardBackend> {
        let mut backends = Vec::new();

        if self.macos {
            backends.push(ClipboardBackend::Pbcopy);
        }
        if self.windows_or_wsl {
            backends.push(ClipboardBackend::ClipExe);
        }
        if self.android {
            backends.push(ClipboardBackend::Termux);
        }
        if self.wayland {
            backends.push(ClipboardBackend::WlCopy);
        }
        if self.x11 {
            backends.push(ClipboardBackend::Xsel);
            backends.push(ClipboardBackend::Xclip);
        }
        if self.tmux {
            backends.push(ClipboardBackend::Tmux);
        }

        backends
    }
}

/// Pick the first available clipboard backend for this session
pub fn detect_backend() -> Option<ClipboardBackend> {
    Session::detect()
        .candidates()
        .into_iter()
        .find(|backend| command_exists(backend.program()))
}

/// Copy text to the system clipboard
///
/// # Examples
/// ```no_run
/// use dropcat::clipboard::copy_to_clipboard;
///
/// if let Err(e) = copy_to_clipboard("Hello, clipboard!") {
///     eprintln!("Failed to copy to clipboard: {}", e);
/// }
/// ```
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let backend = detect_backend().ok_or(ClipboardError::NoClipboardFound)?;
    backend.copy_to_clipboard(text)
}

/// Check whether an executable is on the PATH
pub fn command_exists(command: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&paths).any(|dir| is_executable(&dir.join(command)))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_candidates_prefer_system_clipboard() {
        let session = Session {
            wayland: true,
            x11: true,
            tmux: true,
            ..Session::default()
        };
        assert_eq!(
            session.candidates(),
            vec![
                ClipboardBackend::WlCopy,
                ClipboardBackend::Xsel,
                ClipboardBackend::Xclip,
                ClipboardBackend::Tmux,
            ]
        );
    }

    #[test]
    fn test_candidates_headless() {
        assert!(Session::default().candidates().is_empty());

        let tmux_only = Session {
            tmux: true,
            ..Session::default()
        };
        assert_eq!(tmux_only.candidates(), vec![ClipboardBackend::Tmux]);
    }

    #[test]
    #[ignore] // Needs a running tmux session
    fn test_tmux_clipboard() {
        if env::var("TMUX").is_err() || !command_exists("tmux") {
            return;
        }

        let text = "dropcat tmux clipboard test";
        ClipboardBackend::Tmux
            .copy_to_clipboard(text)
            .expect("Failed to copy to tmux clipboard");

        let output = Command::new("tmux")
            .args(["show-buffer"])
            .output()
            .expect("Failed to execute tmux show-buffer");
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), text);
    }
}
