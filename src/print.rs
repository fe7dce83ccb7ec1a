//! Sending finished PDFs to the system printer.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Print spooler command.
const SPOOLER: &str = "lp";

/// Queue a PDF on the default printer.
pub fn print_pdf(path: &Path) -> Result<()> {
    print_with(SPOOLER, path)
}

fn print_with(spooler: &str, path: &Path) -> Result<()> {
    debug!("{spooler} {}", path.display());
    let output = Command::new(spooler)
        .arg(path)
        .output()
        .map_err(|e| Error::Print(format!("could not run {spooler}: {e}")))?;

    if !output.status.success() {
        return Err(Error::Print(format!(
            "{spooler} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok(())
}
