/// Directory slot decoding
///
/// Layout of a 32-byte slot:
///
/// | Offset    | Contents                                          |
/// |-----------|---------------------------------------------------|
/// | 0x00-0x01 | Next directory sector (first slot of a sector only) |
/// | 0x02      | File status: flags and type                       |
/// | 0x03-0x04 | First track/sector of the file data               |
/// | 0x05-0x14 | Filename, 0xA0 padded                             |
/// | 0x15-0x17 | REL side-sector pointer and record length         |
/// | 0x18-0x1D | GEOS only                                         |
/// | 0x1E-0x1F | Size in blocks, low byte first                    |

use crate::error::{window, Result};
use crate::filesystem::{strip_padding, DirEntry, FileType};
use crate::format::constants::*;
use crate::image::SectorPointer;

/// Directory slot status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatus(pub u8);

impl FileStatus {
    /// Closed (bit 7), clear for a "splat" file left open
    pub const CLOSED: u8 = 0x80;

    /// Locked (bit 6)
    pub const LOCKED: u8 = 0x40;

    /// Save-with-replace in progress (bit 5)
    pub const REPLACE: u8 = 0x20;

    /// File type code (bits 0-2)
    pub const TYPE_MASK: u8 = 0x07;

    /// Create a new FileStatus from a raw byte
    #[inline]
    pub fn new(value: u8) -> Self {
        FileStatus(value)
    }

    /// Check if the closed bit is set
    #[inline]
    pub fn closed(&self) -> bool {
        (self.0 & Self::CLOSED) != 0
    }

    /// Check if the locked bit is set
    #[inline]
    pub fn locked(&self) -> bool {
        (self.0 & Self::LOCKED) != 0
    }

    /// Check if the replace bit is set
    #[inline]
    pub fn replace(&self) -> bool {
        (self.0 & Self::REPLACE) != 0
    }

    /// A status of 0x00 marks a scratched slot, whatever its data pointer
    #[inline]
    pub fn is_scratched(&self) -> bool {
        self.0 == 0
    }

    /// File type from the low three bits
    #[inline]
    pub fn file_type(&self) -> FileType {
        FileType::from_code(self.0 & Self::TYPE_MASK)
    }
}

/// Decode one directory slot
///
/// Returns `Ok(None)` for a slot that holds no file: a status byte of
/// 0x00, a type code of 101, 110 or 111, or a data pointer of 0/0. A slot
/// shorter than 32 bytes is an `OutOfRange` error.
pub fn decode_entry(slot: &[u8]) -> Result<Option<DirEntry>> {
    let slot = window(slot, 0, DIR_ENTRY_SIZE)?;

    let status = FileStatus::new(slot[ENTRY_STATUS_OFFSET]);
    if status.is_scratched() {
        return Ok(None);
    }

    let file_type = status.file_type();
    if !file_type.is_valid() {
        return Ok(None);
    }

    let start = SectorPointer::new(slot[ENTRY_TRACK_OFFSET], slot[ENTRY_SECTOR_OFFSET]);
    if start.is_null() {
        return Ok(None);
    }

    let name = strip_padding(&slot[ENTRY_NAME_OFFSET..ENTRY_NAME_OFFSET + NAME_LENGTH]);
    let size = u16::from_le_bytes([slot[ENTRY_SIZE_OFFSET], slot[ENTRY_SIZE_OFFSET + 1]]);

    Ok(Some(DirEntry {
        name,
        size,
        file_type,
        closed: status.closed(),
        locked: status.locked(),
        start,
    }))
}
