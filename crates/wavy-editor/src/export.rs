//! Export side effects: file download and clipboard.
//!
//! The editor renders the document; an [`ExportTarget`] supplied by the host
//! delivers it. Both actions are fire-and-forget from the editor's point of
//! view.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// No drawing surface or document to export into.
    NoRenderTarget,
    /// The host has no clipboard access.
    ClipboardUnavailable,
    /// The host rejected the operation.
    Host(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRenderTarget => f.write_str("no render target available"),
            Self::ClipboardUnavailable => f.write_str("clipboard unavailable"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Host-side sink for exported content.
pub trait ExportTarget {
    /// Offer `contents` to the user as a file download.
    fn download(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), ExportError>;

    /// Write `text` to the system clipboard.
    fn write_clipboard(&mut self, text: &str) -> Result<(), ExportError>;
}

/// A captured download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: String,
    pub contents: String,
}

/// Export target that keeps everything in memory.
///
/// Used headless and in tests. `clipboard_available = false` simulates a
/// host without clipboard access.
#[derive(Debug, Clone)]
pub struct MemoryExport {
    pub downloads: Vec<Download>,
    pub clipboard: Option<String>,
    pub clipboard_available: bool,
}

impl Default for MemoryExport {
    fn default() -> Self {
        Self {
            downloads: Vec::new(),
            clipboard: None,
            clipboard_available: true,
        }
    }
}

impl ExportTarget for MemoryExport {
    fn download(&mut self, file_name: &str, mime: &str, contents: &str) -> Result<(), ExportError> {
        self.downloads.push(Download {
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            contents: contents.to_string(),
        });
        Ok(())
    }

    fn write_clipboard(&mut self, text: &str) -> Result<(), ExportError> {
        if !self.clipboard_available {
            return Err(ExportError::ClipboardUnavailable);
        }
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}
