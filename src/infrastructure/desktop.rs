//! Clipboard and URL opener, backed by platform commands.
//!
//! Both operations shell out to the tools the desktop already provides
//! (`pbcopy`, `wl-copy`, `xclip`, `open`, `xdg-open`, ...). Failures are
//! reported as errors for the caller to log; nothing here is fatal.

use crate::domain::error::{Result, VcFinderError};
use std::io::Write;
use std::process::{Command, Stdio};

/// A command line to try, program first.
type Candidate = &'static [&'static str];

fn clipboard_candidates() -> Vec<Candidate> {
    if cfg!(target_os = "macos") {
        vec![&["pbcopy"]]
    } else if cfg!(target_os = "windows") {
        vec![&["clip"]]
    } else {
        let mut candidates: Vec<Candidate> = Vec::new();
        if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            candidates.push(&["wl-copy"]);
        }
        candidates.push(&["xclip", "-selection", "clipboard"]);
        candidates.push(&["xsel", "--clipboard", "--input"]);
        candidates
    }
}

fn opener() -> Candidate {
    if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    }
}

/// Writes `text` to the system clipboard.
///
/// Tries each clipboard tool for the platform in turn; a missing tool moves on
/// to the next one.
///
/// # Errors
///
/// Returns [`VcFinderError::Clipboard`] if no tool accepted the text.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let _span = tracing::debug_span!("copy_to_clipboard", len = text.len()).entered();

    let mut failures = Vec::new();
    for candidate in clipboard_candidates() {
        match pipe_to(candidate, text) {
            Ok(()) => {
                tracing::debug!(tool = candidate[0], "copied to clipboard");
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(tool = candidate[0], error = %e, "clipboard tool failed");
                failures.push(format!("{}: {e}", candidate[0]));
            }
        }
    }

    Err(VcFinderError::Clipboard(failures.join("; ")))
}

/// Runs `command` with `input` on stdin and waits for it to exit successfully.
fn pipe_to(command: Candidate, input: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| VcFinderError::Clipboard("empty command".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        // A tool that exits early closes the pipe; its exit status says why.
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(VcFinderError::Clipboard(format!("{program} exited with {status}")))
    }
}

/// Opens `url` with the platform's default handler.
///
/// The URL is passed through unmodified.
///
/// # Errors
///
/// Returns [`VcFinderError::Launcher`] if the opener cannot be started or
/// reports failure.
pub fn open_url(url: &str) -> Result<()> {
    let _span = tracing::debug_span!("open_url", url = %url).entered();
    run_opener(opener(), url)
}

fn run_opener(command: Candidate, url: &str) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| VcFinderError::Launcher("empty command".to_string()))?;

    let status = Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| VcFinderError::Launcher(format!("failed to start {program}: {e}")))?;

    if status.success() {
        tracing::debug!(opener = %program, "url handed to opener");
        Ok(())
    } else {
        Err(VcFinderError::Launcher(format!("{program} exited with {status}")))
    }
}
