/// Track/sector addressing

use std::fmt;

use crate::format::constants::{sector_offset, DIRECTORY_TRACK};

/// Track/sector pair as stored in directory and file chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectorPointer {
    /// Track number (1-35, 0 in a chain terminator)
    pub track: u8,
    /// Sector number within the track
    pub sector: u8,
}

impl SectorPointer {
    /// Create a new sector pointer
    pub fn new(track: u8, sector: u8) -> Self {
        Self { track, sector }
    }

    /// Read a pointer from the first two bytes of a slice
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [track, sector, ..] => Some(Self::new(*track, *sector)),
            _ => None,
        }
    }

    /// Whether this pointer ends a directory chain
    ///
    /// A chain ends on track 0 or on sector 0xFF, whichever comes first.
    #[inline]
    pub fn is_terminator(&self) -> bool {
        self.track == 0x00 || self.sector == 0xFF
    }

    /// Whether both bytes are zero (an unused directory slot)
    #[inline]
    pub fn is_null(&self) -> bool {
        self.track == 0 && self.sector == 0
    }

    /// Whether the pointer stays on the directory track
    #[inline]
    pub fn is_directory_track(&self) -> bool {
        self.track == DIRECTORY_TRACK
    }

    /// Byte offset of the addressed sector, if the address is on the disk
    pub fn offset(&self) -> Option<usize> {
        sector_offset(self.track, self.sector)
    }
}

impl fmt::Display for SectorPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.track, self.sector)
    }
}
