use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::GmcError;
use crate::reading::Reading;

pub const COLUMN_HEADER: &str =
    "# Index,            DateTime,    CPM,    CPS, CPM1st, CPM2nd, CPS1st, CPS2nd";

pub fn runtime_info() -> String {
    format!(
        "Rust, target {}-{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

fn header_lines() -> [String; 3] {
    [
        format!(
            "# Log file created with: '{}', Version: {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
        format!("# Runtime: {}", runtime_info()),
        COLUMN_HEADER.to_string(),
    ]
}

/// Plain text log. The file is opened and closed for every row.
pub struct LogFile {
    path: PathBuf,
}

impl LogFile {
    /// Creates the file, clearing previous content, and writes the header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<LogFile, GmcError> {
        let log_file = LogFile {
            path: path.as_ref().to_path_buf(),
        };
        let mut file = File::create(&log_file.path).map_err(|e| log_file.error(e))?;
        for line in header_lines() {
            writeln!(file, "{}", line).map_err(|e| log_file.error(e))?;
        }
        Ok(log_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, reading: &Reading) -> Result<(), GmcError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.error(e))?;
        file.write_all(reading.to_log_line().as_bytes())
            .map_err(|e| self.error(e))
    }

    fn error(&self, source: std::io::Error) -> GmcError {
        GmcError::LogFile {
            path: self.path.clone(),
            source,
        }
    }
}
