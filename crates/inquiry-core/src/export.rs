//! Getting a finished report out of the program: clipboard and text file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;

/// Somewhere a report can be copied to. The UI layer supplies the real one.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// File name offered for a downloaded report. Path separators and control
/// characters in the ID become `_` so the file stays inside its directory.
pub fn download_file_name(inquiry_id: &str) -> String {
    let safe: String = inquiry_id
        .chars()
        .map(|c| {
            if matches!(c, '/' | '\\') || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("inquiry_{safe}.txt")
}

/// Write `report` as plain UTF-8 text into `dir`, creating it if needed.
pub fn write_download(dir: &Path, inquiry_id: &str, report: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(inquiry_id));
    std::fs::write(&path, report)?;
    info!(path = %path.display(), "Report written");
    Ok(path)
}

/// Clipboard that keeps the last copied text in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
