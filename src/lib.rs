use crossbeam_channel::Receiver;
use log::info;
use serialport::{SerialPort, SerialPortInfo};

mod config;
mod debug;
mod device;
mod device_info;
mod error;
mod gmc_models;
mod logfile;
mod poll;
mod reading;
mod serial;
#[cfg(test)]
mod simulator;
mod system_command;
mod version;

pub use config::LoggerConfig;
pub use device::GmcDevice;
pub use device_info::DeviceVersion;
pub use error::GmcError;
pub use gmc_models::FOUR_BYTE_SIGNATURES;
pub use gmc_signal_parser::{ByteWidth, DecodeError, FourByteMask, VersionError};
pub use logfile::{runtime_info, LogFile};
pub use poll::PollLoop;
pub use reading::{Count, Reading, SENTINEL};
pub use system_command::Measurement;

/// Lists the serial ports of this system.
/// Fails if there is none, since the logger cannot run without one.
pub fn list_ports() -> Result<Vec<SerialPortInfo>, GmcError> {
    let ports = serialport::available_ports()
        .map_err(|e| GmcError::UnsupportedPlatform(e.to_string()))?;
    if ports.is_empty() {
        return Err(GmcError::NoSerialPorts);
    }
    Ok(ports)
}

pub fn open_port(config: &LoggerConfig) -> Result<Box<dyn SerialPort>, GmcError> {
    serialport::new(&config.port_name, config.baud_rate)
        .timeout(config.timeout)
        .open()
        .map_err(|source| GmcError::OpenPort {
            port_name: config.port_name.clone(),
            source,
        })
}

/// Prints one row of the settings table.
pub fn print_setting(name: &str, value: &str) {
    println!("{:50} : {}", name, value);
}

/// Function to run the logger on an open port.
/// # Arguments
///
/// * `port` - Port connected to the counter.
/// * `config` - Settings of the session.
/// * `terminator_rx` - Receives `true` when logging should stop.
pub fn run_logger_on(
    port: Box<dyn SerialPort>,
    config: &LoggerConfig,
    terminator_rx: &Receiver<bool>,
) -> Result<u64, GmcError> {
    let mut device = GmcDevice::connect(port, &config.four_byte_signatures, config.four_byte_mask)?;
    info!(
        "Connected to {} on {}",
        device.version().version,
        device.port_name().unwrap_or_else(|| config.port_name.clone())
    );
    print_setting("my Counter Version", &device.version().version);
    print_setting("@  Byte Counts", &device.byte_width().to_string());
    println!();

    let log_file = LogFile::create(&config.log_path)?;
    info!("Logging to {}", log_file.path().display());

    println!("Now logging:");
    PollLoop::new(&mut device, &log_file, config.cycle_interval)
        .with_max_cycles(config.max_cycles)
        .run(terminator_rx)
}

/// Function to run the logger.
/// # Arguments
///
/// * `config` - Settings of the session.
/// * `terminator_rx` - Receives `true` when logging should stop.
pub fn run_logger(config: &LoggerConfig, terminator_rx: &Receiver<bool>) -> Result<u64, GmcError> {
    let port = open_port(config)?;
    info!("Opened {} at {} baud", config.port_name, config.baud_rate);
    run_logger_on(port, config, terminator_rx)
}
