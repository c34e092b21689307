/*!
 * System clipboard access through platform copy commands
 *
 * Installed providers are tried in order of preference until one succeeds.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use strum::Display;
use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The command is not available on the system
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Anything that can receive text as the clipboard contents
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Copy commands known to work on common platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClipboardProvider {
    #[strum(to_string = "wl-copy")]
    Wayland,
    #[strum(to_string = "xsel")]
    Xsel,
    #[strum(to_string = "xclip")]
    Xclip,
    #[strum(to_string = "pbcopy")]
    MacOS,
    #[strum(to_string = "clip.exe")]
    Windows,
    #[strum(to_string = "termux-clipboard-set")]
    Termux,
    #[strum(to_string = "tmux")]
    Tmux,
}

impl ClipboardProvider {
    /// Program name and arguments that read the text from stdin
    fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOS => ("pbcopy", &[]),
            Self::Windows => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
        }
    }

    /// Candidates for the current platform, most preferred first
    pub fn candidates() -> Vec<Self> {
        if cfg!(target_os = "macos") {
            vec![Self::MacOS, Self::Tmux]
        } else if cfg!(target_os = "windows") {
            vec![Self::Windows]
        } else if cfg!(target_os = "android") {
            vec![Self::Termux]
        } else if env::var("WSL_DISTRO_NAME").is_ok() {
            vec![Self::Windows, Self::Tmux]
        } else {
            vec![Self::Wayland, Self::Xsel, Self::Xclip, Self::Tmux]
        }
    }

    fn is_available(&self) -> bool {
        let (program, _) = self.command();
        if !command_exists(program) {
            return false;
        }
        match self {
            Self::Tmux => env::var("TMUX").is_ok(),
            Self::Wayland => env::var("WAYLAND_DISPLAY").is_ok(),
            Self::Xsel | Self::Xclip => env::var("DISPLAY").is_ok(),
            _ => true,
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn set_text(&self, text: &str) -> Result<()> {
        let (program, args) = self.command();
        pipe_to_command(program, args, text)
    }
}

/// The desktop clipboard, reached through whichever providers are installed
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    providers: Vec<ClipboardProvider>,
}

impl SystemClipboard {
    /// Detect usable providers for this session
    pub fn detect() -> Result<Self> {
        let providers: Vec<_> = ClipboardProvider::candidates()
            .into_iter()
            .filter(ClipboardProvider::is_available)
            .collect();

        if providers.is_empty() {
            return Err(ClipboardError::NoClipboardFound);
        }
        log::debug!("Clipboard providers: {:?}", providers);
        Ok(Self { providers })
    }

    /// Use an explicit list of providers
    pub fn with_providers(providers: Vec<ClipboardProvider>) -> Self {
        Self { providers }
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut last_error = ClipboardError::NoClipboardFound;
        for provider in &self.providers {
            match provider.set_text(text) {
                Ok(()) => {
                    log::info!("Copied {} bytes with {}", text.len(), provider);
                    return Ok(());
                }
                Err(e) => {
                    log::warn!("Clipboard provider {} failed: {}", provider, e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

/// Check if a command exists on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH").map_or(false, |paths| {
        env::split_paths(&paths).any(|dir| dir.join(command).is_file())
    })
}

/// Spawn `program`, write `text` to its stdin and wait for it to finish
fn pipe_to_command(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ClipboardError::CommandNotFound(program.to_string()),
            _ => ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", program, e)),
        })?;

    // stdin is dropped inside the closure so the program sees end of input
    let written = child
        .stdin
        .take()
        .map(|mut stdin| stdin.write_all(text.as_bytes()));

    // Always reap the child, even when the write failed
    let status = child.wait()?;
    match written {
        None => {
            return Err(ClipboardError::CommandFailed(format!(
                "Failed to open stdin for {}",
                program
            )))
        }
        Some(Err(e)) => return Err(ClipboardError::Io(e)),
        Some(Ok(())) => {}
    }

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            program, status
        )))
    }
}
