use std::io;
use std::path::PathBuf;

use gmc_signal_parser::VersionError;
use thiserror::Error;

const FIRMWARE_BUG_ALERT: &str = "\
Try restarting the logger. Perhaps the counter needs to be rebooted or even factory reset.

Another reason for the failure could be a firmware bug:
A GMC-500+ with firmware 1.18 reports an empty version on the first connect.
Start the logger again, and it should work. Upgrading the firmware is recommended.

If your counter has a newer firmware that answers with 4 bytes, add its version
string with --four-byte-signature.";

const NO_PORT_HINT: &str = "\
Cannot run without a USB-to-Serial port.
  1. Connect the counter with its USB cable
  2. Check if the device is recognized: ls -la /dev/ttyUSB*
  3. Add your user to the 'dialout' group: sudo usermod -aG dialout $USER";

#[derive(Debug, Error)]
pub enum GmcError {
    #[error("No USB-to-Serial ports found on this system")]
    NoSerialPorts,

    #[error("Serial ports cannot be listed on this platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Failed to open \"{port_name}\": {source}")]
    OpenPort {
        port_name: String,
        source: serialport::Error,
    },

    #[error("{kind} Received {reply:?}")]
    Version { reply: String, kind: VersionError },

    #[error("Serial I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write the log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GmcError {
    /// Guidance printed after a fatal error.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            GmcError::NoSerialPorts => Some(NO_PORT_HINT),
            GmcError::Version { .. } => Some(FIRMWARE_BUG_ALERT),
            _ => None,
        }
    }
}
