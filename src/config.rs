use std::path::PathBuf;
use std::time::Duration;

use gmc_signal_parser::FourByteMask;

use crate::gmc_models::default_four_byte_signatures;

pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 57600;
pub const DEFAULT_LOG_FILE: &str = "simple.log";

/// Settings of one logging session. All of them are fixed before the port is opened.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Serial port path (e.g., /dev/ttyUSB0, COM3)
    pub port_name: String,
    /// Baud rate, typically 57600 or 115200
    pub baud_rate: u32,
    /// Read timeout of the serial port
    pub timeout: Duration,
    /// Time between two poll cycles
    pub cycle_interval: Duration,
    pub log_path: PathBuf,
    /// Version strings of counters answering with 4 bytes
    pub four_byte_signatures: Vec<String>,
    pub four_byte_mask: FourByteMask,
    /// Stop after this many cycles; poll until interrupted if `None`
    pub max_cycles: Option<u64>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            port_name: String::from(DEFAULT_PORT),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_secs(3),
            cycle_interval: Duration::from_secs(1),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            four_byte_signatures: default_four_byte_signatures(),
            four_byte_mask: FourByteMask::Unmasked,
            max_cycles: None,
        }
    }
}

impl LoggerConfig {
    pub fn new(port_name: &str) -> Self {
        Self {
            port_name: port_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cycle_interval(mut self, cycle_interval: Duration) -> Self {
        self.cycle_interval = cycle_interval;
        self
    }

    pub fn with_log_path<P: Into<PathBuf>>(mut self, log_path: P) -> Self {
        self.log_path = log_path.into();
        self
    }

    /// Adds a counter to the 4-byte list, keeping the built-in ones.
    pub fn with_four_byte_signature(mut self, signature: &str) -> Self {
        if !self.four_byte_signatures.iter().any(|s| s == signature) {
            self.four_byte_signatures.push(signature.to_string());
        }
        self
    }

    pub fn with_four_byte_mask(mut self, four_byte_mask: FourByteMask) -> Self {
        self.four_byte_mask = four_byte_mask;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Rows of the settings table printed at startup.
    pub fn settings(&self) -> Vec<(&'static str, String)> {
        vec![
            ("my Serial Port", self.port_name.clone()),
            ("my Serial Baudrate", self.baud_rate.to_string()),
            (
                "my Serial Timeout (sec)",
                self.timeout.as_secs_f64().to_string(),
            ),
            (
                "my Cycle time (sec)",
                self.cycle_interval.as_secs_f64().to_string(),
            ),
            ("my Log file", self.log_path.display().to_string()),
            ("my 4-byte counters", self.four_byte_signatures.join(", ")),
        ]
    }
}
