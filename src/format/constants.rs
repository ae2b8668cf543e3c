/// D64 layout constants

/// Size of a sector (block) in bytes
pub const SECTOR_SIZE: usize = 0x100;

/// Number of tracks on a standard 1541 disk
pub const NUM_TRACKS: u8 = 35;

/// Total number of sectors on a 35-track disk
pub const TOTAL_SECTORS: usize = 683;

/// Size of a 35-track image without error information
pub const D64_SIZE: usize = TOTAL_SECTORS * SECTOR_SIZE;

/// Size of a 35-track image with one trailing error byte per sector
pub const D64_SIZE_WITH_ERRORS: usize = D64_SIZE + TOTAL_SECTORS;

/// Track holding the BAM and the directory
pub const DIRECTORY_TRACK: u8 = 18;

/// Byte offset of the BAM sector (track 18, sector 0); ends at 0x165FF
pub const BAM_OFFSET: usize = 0x16500;

/// Byte offset of the first directory sector (track 18, sector 1)
pub const DIRECTORY_OFFSET: usize = BAM_OFFSET + SECTOR_SIZE;

/// Size of a directory slot
pub const DIR_ENTRY_SIZE: usize = 0x20;

/// Directory slots per sector
pub const DIR_ENTRIES_PER_SECTOR: usize = SECTOR_SIZE / DIR_ENTRY_SIZE;

/// Padding byte used in names and ids
pub const PADDING: u8 = 0xA0;

/// Length of a disk or file name field
pub const NAME_LENGTH: usize = 16;

// BAM sector offsets

/// DOS version type byte ("A" on a 1541 disk)
pub const BAM_DOS_VERSION_OFFSET: usize = 0x02;

/// First per-track BAM entry (4 bytes per track)
pub const BAM_ENTRIES_OFFSET: usize = 0x04;

/// Last per-track BAM entry free-counter byte
pub const BAM_ENTRIES_LAST_OFFSET: usize = 0x8C;

/// Size of one per-track BAM entry
pub const BAM_ENTRY_SIZE: usize = 4;

/// Disk name (16 bytes, 0xA0 padded)
pub const BAM_NAME_OFFSET: usize = 0x90;

/// Disk id (2 bytes)
pub const BAM_ID_OFFSET: usize = 0xA2;

/// DOS type (2 bytes, usually "2A")
pub const BAM_DOS_TYPE_OFFSET: usize = 0xA5;

// Directory slot offsets

/// File type and flags
pub const ENTRY_STATUS_OFFSET: usize = 0x02;

/// First data track of the file
pub const ENTRY_TRACK_OFFSET: usize = 0x03;

/// First data sector of the file
pub const ENTRY_SECTOR_OFFSET: usize = 0x04;

/// File name (16 bytes, 0xA0 padded)
pub const ENTRY_NAME_OFFSET: usize = 0x05;

/// File size in blocks, low byte then high byte
pub const ENTRY_SIZE_OFFSET: usize = 0x1E;

/// Number of sectors on a track, or `None` for tracks outside 1-35
pub fn sectors_in_track(track: u8) -> Option<u8> {
    match track {
        1..=17 => Some(21),
        18..=24 => Some(19),
        25..=30 => Some(18),
        31..=35 => Some(17),
        _ => None,
    }
}

/// Index of the first sector of a track counted from the start of the disk
pub fn track_start_sector(track: u8) -> Option<usize> {
    sectors_in_track(track)?;
    Some(
        (1..track)
            .filter_map(sectors_in_track)
            .map(usize::from)
            .sum(),
    )
}

/// Linear sector index of a track/sector pair
pub fn sector_index(track: u8, sector: u8) -> Option<usize> {
    let count = sectors_in_track(track)?;
    if sector >= count {
        return None;
    }
    Some(track_start_sector(track)? + sector as usize)
}

/// Byte offset of a track/sector pair within the image
#[inline]
pub fn sector_offset(track: u8, sector: u8) -> Option<usize> {
    sector_index(track, sector).map(|index| index * SECTOR_SIZE)
}
