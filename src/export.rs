//! Clipboard export of generated files.
//!
//! Despite the name this produces no archive: files are concatenated, each under a
//! `// <name>` header, separated by `---` lines.
//!
//! On Linux (X11 and Wayland) the copying process owns the selection and serves it to other
//! programs; the text is gone once that process exits. `copy_to_clipboard` therefore blocks
//! there until another program takes ownership, which a clipboard manager does at once and
//! a plain paste target does on the next copy.

use crate::types::GeneratedFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No converted files to export")]
    Empty,
    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Concatenate files into one clipboard-ready text.
pub fn bundle(files: &[GeneratedFile]) -> Result<String, ExportError> {
    if files.is_empty() {
        return Err(ExportError::Empty);
    }
    Ok(files
        .iter()
        .map(|file| format!("// {}\n{}\n\n", file.file_name, file.content))
        .collect::<Vec<_>>()
        .join("---\n\n"))
}

/// Whether `copy_to_clipboard` blocks until the selection is taken over.
pub fn holds_selection() -> bool {
    cfg!(target_os = "linux")
}

pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let mut clipboard = arboard::Clipboard::new()?;
    set_text(&mut clipboard, text)?;
    tracing::debug!(bytes = text.len(), "Copied to clipboard");
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;
    clipboard.set().wait().text(text.to_string())
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text.to_string())
}
