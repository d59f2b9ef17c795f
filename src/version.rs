use log::debug;
use serialport::SerialPort;

use gmc_signal_parser::{byte_width_for, validate_version, VERSION_SIZE};

use crate::debug::to_string;
use crate::device_info::DeviceVersion;
use crate::error::GmcError;
use crate::serial;
use crate::system_command;

/// Asks the counter for its model and firmware, such as `GMC-500+Re 1.18`,
/// and derives the byte width of the CPM/CPS replies from it.
pub fn probe_version<S: AsRef<str>>(
    port: &mut Box<dyn SerialPort>,
    four_byte_signatures: &[S],
) -> Result<DeviceVersion, GmcError> {
    serial::send_command(port, system_command::GET_VERSION)?;
    let mut reply = serial::read(port, VERSION_SIZE)?;
    // newer counters send a 15th byte
    reply.extend(serial::read_extra_bytes(port)?);
    debug!("Raw version reply = {}", to_string(&reply));

    let version = String::from_utf8_lossy(&reply).trim().to_string();
    if let Err(kind) = validate_version(&version) {
        return Err(GmcError::Version {
            reply: version,
            kind,
        });
    }

    let byte_width = byte_width_for(&version, four_byte_signatures);
    Ok(DeviceVersion {
        version,
        byte_width,
    })
}
