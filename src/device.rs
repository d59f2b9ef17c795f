use log::{debug, warn};
use serialport::SerialPort;

use gmc_signal_parser::{ByteWidth, DecodeError, FourByteMask, FrameDecoder};

use crate::debug::to_string;
use crate::device_info::DeviceVersion;
use crate::error::GmcError;
use crate::reading::{to_value, Count, SENTINEL};
use crate::serial;
use crate::system_command::Measurement;
use crate::version::probe_version;

const BYTE_COUNT_HINT: &str = "Are the port and baud rate set correctly?";

fn decode_warning(command: &[u8], error: &DecodeError) -> String {
    format!(
        "{}: {} The value is logged as {}. {}",
        String::from_utf8_lossy(command),
        error,
        SENTINEL,
        BYTE_COUNT_HINT
    )
}

/// Session with one counter. The byte width is set by the version probe in
/// [`GmcDevice::connect`] and stays fixed for the lifetime of the session.
pub struct GmcDevice {
    port: Box<dyn SerialPort>,
    version: DeviceVersion,
    decoder: FrameDecoder,
}

impl GmcDevice {
    pub fn connect<S: AsRef<str>>(
        mut port: Box<dyn SerialPort>,
        four_byte_signatures: &[S],
        four_byte_mask: FourByteMask,
    ) -> Result<GmcDevice, GmcError> {
        let version = probe_version(&mut port, four_byte_signatures)?;
        let decoder = FrameDecoder::new(version.byte_width).with_four_byte_mask(four_byte_mask);
        Ok(GmcDevice {
            port,
            version,
            decoder,
        })
    }

    pub fn version(&self) -> &DeviceVersion {
        &self.version
    }

    pub fn byte_width(&self) -> ByteWidth {
        self.decoder.width()
    }

    pub fn port_name(&self) -> Option<String> {
        self.port.name()
    }

    #[cfg(test)]
    pub(crate) fn port_mut(&mut self) -> &mut Box<dyn SerialPort> {
        &mut self.port
    }

    /// Drops bytes left in the input buffer so that replies line up with commands.
    pub fn discard_pending(&mut self) -> Result<usize, GmcError> {
        let extra = serial::read_extra_bytes(&mut self.port)?;
        if !extra.is_empty() {
            debug!("Discarded {} pending bytes: {}", extra.len(), to_string(&extra));
        }
        Ok(extra.len())
    }

    /// Sends the command of `measurement` and decodes the reply.
    /// The outer error is an I/O failure, the inner one a malformed reply.
    pub fn measure(&mut self, measurement: Measurement) -> Result<Count, GmcError> {
        let command = measurement.command();
        let n_bytes = self.decoder.width().n_bytes();
        serial::send_command(&mut self.port, command)?;
        let reply = serial::read(&mut self.port, n_bytes)?;

        let count = self
            .decoder
            .decode(&reply, measurement.masks_status_bits());
        if let Err(e) = &count {
            warn!("{}", decode_warning(command, e));
        }
        debug!(
            "Command: {:<14}, Bytes: {:2}, Value: {:6}, Record: {}",
            String::from_utf8_lossy(command),
            n_bytes,
            to_value(&count),
            to_string(&reply)
        );
        Ok(count)
    }

    pub fn get_cpm(&mut self) -> Result<Count, GmcError> {
        self.measure(Measurement::Cpm)
    }

    pub fn get_cps(&mut self) -> Result<Count, GmcError> {
        self.measure(Measurement::Cps)
    }

    /// CPM of the 1st tube
    pub fn get_cpml(&mut self) -> Result<Count, GmcError> {
        self.measure(Measurement::CpmTube1)
    }

    /// CPM of the 2nd tube
    pub fn get_cpmh(&mut self) -> Result<Count, GmcError> {
        self.measure(Measurement::CpmTube2)
    }

    /// CPS of the 1st tube
    pub fn get_cpsl(&mut self) -> Result<Count, GmcError> {
        self.measure(Measurement::CpsTube1)
    }

    /// CPS of the 2nd tube
    pub fn get_cpsh(&mut self) -> Result<Count, GmcError> {
        self.measure(Measurement::CpsTube2)
    }
}
