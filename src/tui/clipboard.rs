// System clipboard access for copying the result JSON (arboard)
//
// A fresh Clipboard handle is opened per copy; headless sessions without a
// display server fail here and the caller reports it with a toast.

use anyhow::{Context, Result};
use arboard::Clipboard;

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    Clipboard::new()
        .context("No clipboard available")?
        .set_text(text)
        .context("Clipboard rejected the text")
}
