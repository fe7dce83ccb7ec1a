//! LaTeX → PDF compilation.
//!
//! The renderer's output is handed to an external TeX engine. Compilation
//! runs in a scratch directory that is removed afterwards; only the PDF bytes
//! (or the engine's log on failure) come back.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};

/// Base name of the files written to the scratch directory.
const JOB_NAME: &str = "crossword";

/// Turns LaTeX source into a PDF document.
pub trait Compiler {
    fn compile(&self, tex: &str) -> Result<Vec<u8>>;
}

/// Configuration for [`XelatexCompiler`].
#[derive(Debug, Clone)]
pub struct XelatexConfig {
    /// TeX engine executable.
    pub command: String,
    /// Extra directories searched for classes and packages (`TEXINPUTS`).
    pub resource_dirs: Vec<PathBuf>,
}

impl Default for XelatexConfig {
    fn default() -> Self {
        Self {
            command: "xelatex".to_string(),
            resource_dirs: Vec::new(),
        }
    }
}

/// Compiles with `xelatex` (or a compatible engine).
#[derive(Debug, Clone, Default)]
pub struct XelatexCompiler {
    config: XelatexConfig,
}

impl XelatexCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: XelatexConfig) -> Self {
        Self { config }
    }

    /// Add a directory to the TeX search path.
    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.resource_dirs.push(dir.into());
        self
    }

    /// `TEXINPUTS` value: configured directories followed by an empty entry,
    /// which keeps the engine's default search path.
    fn tex_inputs(&self) -> Result<Option<std::ffi::OsString>> {
        if self.config.resource_dirs.is_empty() {
            return Ok(None);
        }
        let mut dirs = self.config.resource_dirs.clone();
        dirs.push(PathBuf::new());
        env::join_paths(dirs)
            .map(Some)
            .map_err(|e| Error::Config(format!("invalid TeX resource directory: {e}")))
    }
}

impl Compiler for XelatexCompiler {
    fn compile(&self, tex: &str) -> Result<Vec<u8>> {
        let workdir = tempfile::tempdir()?;
        let tex_file = format!("{JOB_NAME}.tex");
        fs::write(workdir.path().join(&tex_file), tex)?;

        let mut command = Command::new(&self.config.command);
        command
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(&tex_file)
            .current_dir(workdir.path());
        if let Some(inputs) = self.tex_inputs()? {
            command.env("TEXINPUTS", inputs);
        }

        debug!("running {} in {}", self.config.command, workdir.path().display());
        let output = command.output().map_err(|e| Error::Compile {
            status: format!("could not run {}", self.config.command),
            log: e.to_string(),
        })?;

        if !output.status.success() {
            let log = fs::read_to_string(workdir.path().join(format!("{JOB_NAME}.log")))
                .unwrap_or_else(|_| String::from_utf8_lossy(&output.stdout).into_owned());
            return Err(Error::Compile {
                status: output.status.to_string(),
                log,
            });
        }

        let pdf = fs::read(workdir.path().join(format!("{JOB_NAME}.pdf")))?;
        info!("compiled {} bytes of PDF", pdf.len());
        Ok(pdf)
    }
}
