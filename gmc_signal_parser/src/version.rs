use core::fmt;

use crate::frame::ByteWidth;

/// Bytes requested for the version reply. Some firmwares send one more.
pub const VERSION_SIZE: usize = 14;
pub const DEVICE_FAMILY_MARKER: &str = "GMC-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionError {
    /// The counter did not answer the version request.
    Empty,
    /// The answer was shorter or longer than a version string.
    UnexpectedLength(usize),
    /// The answer does not look like a GMC counter.
    MissingFamilyMarker,
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::Empty => write!(
                f,
                "The Geiger counter gave no answer to the version request."
            ),
            VersionError::UnexpectedLength(n) => write!(
                f,
                "The Geiger counter gave an incomplete answer to the version request. \
                 Expected 14 or 15 characters but obtained {}.",
                n
            ),
            VersionError::MissingFamilyMarker => write!(
                f,
                "The Geiger counter gave an improper answer to the version request. \
                 \"{}\" was not found.",
                DEVICE_FAMILY_MARKER
            ),
        }
    }
}

/// Checks a trimmed version string such as `GMC-300Re 4.22`.
pub fn validate_version(version: &str) -> Result<(), VersionError> {
    if version.is_empty() {
        return Err(VersionError::Empty);
    }
    let n_chars = version.chars().count();
    if n_chars != VERSION_SIZE && n_chars != VERSION_SIZE + 1 {
        return Err(VersionError::UnexpectedLength(n_chars));
    }
    if !version.contains(DEVICE_FAMILY_MARKER) {
        return Err(VersionError::MissingFamilyMarker);
    }
    Ok(())
}

/// Counters listed in `four_byte_signatures` (exact match) answer with
/// 4 bytes; every other counter answers with 2.
pub fn byte_width_for<S: AsRef<str>>(version: &str, four_byte_signatures: &[S]) -> ByteWidth {
    if four_byte_signatures.iter().any(|s| s.as_ref() == version) {
        return ByteWidth::Four;
    }
    ByteWidth::Two
}
