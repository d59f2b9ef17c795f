#![no_std]

#[cfg(test)]
extern crate alloc;

mod frame;
mod version;

pub use frame::{ByteWidth, DecodeError, FourByteMask, FrameDecoder};
pub use version::{
    byte_width_for, validate_version, VersionError, DEVICE_FAMILY_MARKER, VERSION_SIZE,
};
