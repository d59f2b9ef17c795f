use gmc_signal_parser::ByteWidth;

#[derive(Clone, Debug, PartialEq)]
pub struct DeviceVersion {
    pub version: String,
    pub byte_width: ByteWidth,
}
