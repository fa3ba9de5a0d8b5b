//! Handing programs to scanmem.
//!
//! scanmem usually needs to run as root to attach to another process.

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::ScanmemError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanmemConfig {
    /// Path to the scanmem executable, looked up in `PATH` when relative.
    pub program: PathBuf,
    /// Passed before the standard arguments.
    pub extra_args: Vec<String>,
}

impl Default for ScanmemConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("scanmem"),
            extra_args: Vec::new(),
        }
    }
}

pub struct Scanmem {
    config: ScanmemConfig,
}

impl Scanmem {
    pub fn new(config: ScanmemConfig) -> Self {
        Self { config }
    }

    /// `scanmem <pid> --errexit --command <program>`
    pub fn command(&self, pid: u32, program: &str) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.extra_args)
            .arg(pid.to_string())
            .arg("--errexit")
            .arg("--command")
            .arg(program);
        command
    }

    /// Runs `program` with scanmem's output going to the terminal.
    pub fn run(&self, pid: u32, program: &str) -> Result<(), ScanmemError> {
        log::info!("running scanmem against process {}", pid);
        let status = self
            .command(pid, program)
            .status()
            .map_err(|source| self.spawn_error(source))?;
        check_status(status)
    }

    /// Runs `program` and returns everything scanmem printed, stdout first.
    ///
    /// A failing exit status is not an error here: scanmem reports its failures
    /// as `error: ` lines, which the strict dump parser classifies.
    pub fn capture(&self, pid: u32, program: &str) -> Result<String, ScanmemError> {
        log::info!("capturing scanmem output for process {}", pid);
        let output = self
            .command(pid, program)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            log::warn!("scanmem exited with {}", output.status);
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    fn spawn_error(&self, source: std::io::Error) -> ScanmemError {
        ScanmemError::Spawn {
            program: self.config.program.clone(),
            source,
        }
    }
}

fn check_status(status: ExitStatus) -> Result<(), ScanmemError> {
    if status.success() {
        Ok(())
    } else {
        Err(ScanmemError::Failed(status))
    }
}
