//! Launchers used by the launch action

use quickdex_core::{Launcher, QuickdexError, Result};
use std::process::{Command, Stdio};

/// Opens targets with the platform's default handler
pub struct SystemLauncher;

impl SystemLauncher {
    fn opener() -> Command {
        if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]);
            cmd
        } else {
            Command::new("xdg-open")
        }
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, path: &str, args: Option<&str>) -> Result<bool> {
        let args = split_args(args)?;

        // Executables run directly; everything else goes to the opener
        let mut cmd = if is_executable(path) {
            Command::new(path)
        } else {
            let mut cmd = Self::opener();
            cmd.arg(path);
            cmd
        };
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!("Launched {}", path);
        Ok(true)
    }
}

/// Split `launch_args` with shell quoting rules
fn split_args(args: Option<&str>) -> Result<Vec<String>> {
    match args {
        Some(args) => shell_words::split(args)
            .map_err(|e| QuickdexError::InvalidInput(format!("launch arguments '{}': {}", args, e))),
        None => Ok(Vec::new()),
    }
}

#[cfg(unix)]
fn is_executable(path: &str) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &str) -> bool {
    path.to_lowercase().ends_with(".exe")
}

/// Prints what would be launched
pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn launch(&self, path: &str, args: Option<&str>) -> Result<bool> {
        match args {
            Some(args) => println!("Would launch: {} {}", path, args),
            None => println!("Would launch: {}", path),
        }
        Ok(true)
    }
}
