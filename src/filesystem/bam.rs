/// Block Availability Map (track 18, sector 0)
///
/// Layout of the 256-byte BAM sector:
///
/// | Offset    | Contents                                        |
/// |-----------|-------------------------------------------------|
/// | 0x00-0x01 | First directory sector (always read as 18/1)    |
/// | 0x02      | DOS version type ("A")                          |
/// | 0x04-0x8F | 35 track entries of 4 bytes: free count, bitmap |
/// | 0x90-0x9F | Disk name, 0xA0 padded                          |
/// | 0xA2-0xA3 | Disk id                                         |
/// | 0xA5-0xA6 | DOS type ("2A")                                 |
/// | 0xAB-0xFF | 40-track extensions, not parsed                 |

use crate::error::{window, Result};
use crate::filesystem::{raw_text, strip_padding};
use crate::format::constants::*;

/// Disk-level metadata decoded from the BAM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BamInfo {
    /// DOS version type character
    pub dos_version_type: char,
    /// Raw disk name with 0xA0 padding removed
    pub name: Vec<u8>,
    /// Disk id with 0xA0 padding removed, at most two characters
    pub id: String,
    /// DOS type with 0xA0 padding removed, at most two characters
    pub dostype: String,
    /// Free blocks, as reported in the directory listing
    pub free: u32,
}

impl BamInfo {
    /// Disk name as text, one character per byte
    pub fn name_str(&self) -> String {
        raw_text(&self.name)
    }
}

/// Decode the BAM window of an image buffer
///
/// `free` is the sum of the free-counter bytes of all 35 track entries.
/// It counts track 18 like any other track and does not look at the
/// bitmaps.
pub fn read_bam(data: &[u8]) -> Result<BamInfo> {
    let bam = window(data, BAM_OFFSET, SECTOR_SIZE)?;

    let dos_version_type = char::from(bam[BAM_DOS_VERSION_OFFSET]);
    let name = strip_padding(&bam[BAM_NAME_OFFSET..BAM_NAME_OFFSET + NAME_LENGTH]);
    let id = raw_text(&strip_padding(&bam[BAM_ID_OFFSET..BAM_ID_OFFSET + 2]));
    let dostype = raw_text(&strip_padding(&bam[BAM_DOS_TYPE_OFFSET..BAM_DOS_TYPE_OFFSET + 2]));

    let free = (BAM_ENTRIES_OFFSET..=BAM_ENTRIES_LAST_OFFSET)
        .step_by(BAM_ENTRY_SIZE)
        .map(|offset| u32::from(bam[offset]))
        .sum();

    Ok(BamInfo {
        dos_version_type,
        name,
        id,
        dostype,
        free,
    })
}

/// One track's BAM entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackAllocation {
    /// Track number (1-35)
    pub track: u8,
    /// Free sector counter as stored on disk
    pub free: u8,
    /// Allocation bitmap, bit set means free; sector 0 is bit 0 of byte 0
    pub bitmap: [u8; 3],
}

impl TrackAllocation {
    /// Number of sectors on this track
    pub fn sector_count(&self) -> u8 {
        sectors_in_track(self.track).unwrap_or(0)
    }

    /// Whether the bitmap marks a sector as free
    pub fn is_sector_free(&self, sector: u8) -> bool {
        if sector >= self.sector_count() {
            return false;
        }
        self.bitmap[usize::from(sector / 8)] & (1 << (sector % 8)) != 0
    }

    /// Free sectors according to the bitmap
    pub fn bitmap_free_count(&self) -> u8 {
        (0..self.sector_count())
            .filter(|&s| self.is_sector_free(s))
            .count() as u8
    }

    /// Whether the stored counter agrees with the bitmap
    pub fn is_consistent(&self) -> bool {
        self.free == self.bitmap_free_count()
    }
}

/// Decode the 35 per-track BAM entries
pub fn read_track_allocations(data: &[u8]) -> Result<Vec<TrackAllocation>> {
    let bam = window(data, BAM_OFFSET, SECTOR_SIZE)?;

    Ok((1..=NUM_TRACKS)
        .zip(bam[BAM_ENTRIES_OFFSET..].chunks_exact(BAM_ENTRY_SIZE))
        .map(|(track, entry)| TrackAllocation {
            track,
            free: entry[0],
            bitmap: [entry[1], entry[2], entry[3]],
        })
        .collect())
}
