/// 1541 drive error codes stored in the D64 error information block
///
/// Images of 175,531 bytes carry one code per sector after the sector data,
/// recording the read result the drive reported when the disk was imaged.

use std::fmt;

/// Per-sector error code from the error information block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveError(pub u8);

impl DriveError {
    /// Unused code, treated as no error
    pub const NONE: u8 = 0x00;

    /// No error, sector ok (DOS 00)
    pub const OK: u8 = 0x01;

    /// Header block not found (DOS 20)
    pub const HEADER_NOT_FOUND: u8 = 0x02;

    /// No sync character (DOS 21)
    pub const NO_SYNC: u8 = 0x03;

    /// Data block not present (DOS 22)
    pub const DATA_NOT_FOUND: u8 = 0x04;

    /// Checksum error in data block (DOS 23)
    pub const DATA_CHECKSUM: u8 = 0x05;

    /// Write verify on format (DOS 24)
    pub const FORMAT_VERIFY: u8 = 0x06;

    /// Write verify error (DOS 25)
    pub const WRITE_VERIFY: u8 = 0x07;

    /// Write protect on (DOS 26)
    pub const WRITE_PROTECT: u8 = 0x08;

    /// Checksum error in header block (DOS 27)
    pub const HEADER_CHECKSUM: u8 = 0x09;

    /// Write error (DOS 28)
    pub const WRITE_ERROR: u8 = 0x0A;

    /// Disk sector id mismatch (DOS 29)
    pub const ID_MISMATCH: u8 = 0x0B;

    /// Drive not ready (DOS 74)
    pub const NOT_READY: u8 = 0x0F;

    /// Create a new DriveError from a raw byte
    #[inline]
    pub fn new(value: u8) -> Self {
        DriveError(value)
    }

    /// Check if the code reports a failure
    #[inline]
    pub fn has_error(&self) -> bool {
        !matches!(self.0, Self::NONE | Self::OK)
    }

    /// The error number CBM DOS reports on the error channel
    pub fn dos_error_number(&self) -> Option<u8> {
        match self.0 {
            Self::NONE | Self::OK => Some(0),
            Self::HEADER_NOT_FOUND => Some(20),
            Self::NO_SYNC => Some(21),
            Self::DATA_NOT_FOUND => Some(22),
            Self::DATA_CHECKSUM => Some(23),
            Self::FORMAT_VERIFY => Some(24),
            Self::WRITE_VERIFY => Some(25),
            Self::WRITE_PROTECT => Some(26),
            Self::HEADER_CHECKSUM => Some(27),
            Self::WRITE_ERROR => Some(28),
            Self::ID_MISMATCH => Some(29),
            Self::NOT_READY => Some(74),
            _ => None,
        }
    }

    /// Short description of the code
    pub fn description(&self) -> &'static str {
        match self.0 {
            Self::NONE | Self::OK => "OK",
            Self::HEADER_NOT_FOUND => "Header block not found",
            Self::NO_SYNC => "No sync character",
            Self::DATA_NOT_FOUND => "Data block not present",
            Self::DATA_CHECKSUM => "Checksum error in data block",
            Self::FORMAT_VERIFY => "Write verify (on format)",
            Self::WRITE_VERIFY => "Write verify error",
            Self::WRITE_PROTECT => "Write protect on",
            Self::HEADER_CHECKSUM => "Checksum error in header block",
            Self::WRITE_ERROR => "Write error",
            Self::ID_MISMATCH => "Disk sector ID mismatch",
            Self::NOT_READY => "Drive not ready",
            _ => "Unknown error code",
        }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dos_error_number() {
            Some(0) => write!(f, "OK"),
            Some(number) => write!(f, "{}, {}", number, self.description()),
            None => write!(f, "?? (code {:02X})", self.0),
        }
    }
}
