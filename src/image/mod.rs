/// D64 image data structures

/// Track/sector addressing
pub mod sector;

pub use sector::SectorPointer;

use crate::drive::DriveError;
use crate::error::{window, D64Error, Result};
use crate::format::{detect_format, sectors_in_track, D64Format, NUM_TRACKS, SECTOR_SIZE};
use crate::format::constants::{sector_index, sector_offset, D64_SIZE};
use std::path::Path;

/// An immutable, validated D64 image
///
/// The buffer is owned by the image and only lent out as shared slices, so
/// nothing can change it while a directory or BAM decode is running.
#[derive(Debug, Clone)]
pub struct D64Image {
    /// Image layout, detected from the buffer size
    pub(crate) format: D64Format,
    /// Raw image bytes
    pub(crate) data: Vec<u8>,
    /// Original filename if loaded from disk
    pub(crate) filename: Option<String>,
}

impl D64Image {
    /// Open a D64 file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::io::read_d64(path)
    }

    /// Wrap an in-memory buffer, rejecting sizes that are not a 35-track image
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = detect_format(&data).ok_or(D64Error::invalid_size(data.len()))?;
        Ok(Self {
            format,
            data,
            filename: None,
        })
    }

    /// Get the image layout
    pub fn format(&self) -> D64Format {
        self.format
    }

    /// Get the original filename if loaded from disk
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get the raw image bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the image size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a validated image is never empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read the 256 bytes of a sector
    pub fn read_sector(&self, track: u8, sector: u8) -> Result<&[u8]> {
        let offset = self.checked_offset(track, sector)?;
        window(&self.data, offset, SECTOR_SIZE)
    }

    /// Error code recorded for a sector, if the image has an error block
    pub fn sector_error(&self, track: u8, sector: u8) -> Result<Option<DriveError>> {
        self.checked_offset(track, sector)?;
        if !self.format.has_error_info() {
            return Ok(None);
        }

        let index = sector_index(track, sector).unwrap_or_default();
        let code = window(&self.data, D64_SIZE + index, 1)?[0];
        Ok(Some(DriveError::new(code)))
    }

    /// All sectors whose error code reports a failure, in disk order
    pub fn bad_sectors(&self) -> Result<Vec<(SectorPointer, DriveError)>> {
        let mut bad = Vec::new();
        if !self.format.has_error_info() {
            return Ok(bad);
        }

        for track in 1..=NUM_TRACKS {
            for sector in 0..sectors_in_track(track).unwrap_or(0) {
                if let Some(err) = self.sector_error(track, sector)? {
                    if err.has_error() {
                        bad.push((SectorPointer::new(track, sector), err));
                    }
                }
            }
        }

        Ok(bad)
    }

    fn checked_offset(&self, track: u8, sector: u8) -> Result<usize> {
        let count = sectors_in_track(track).ok_or(D64Error::InvalidTrack {
            track,
            max: NUM_TRACKS,
        })?;

        sector_offset(track, sector).ok_or(D64Error::InvalidSector {
            track,
            sector,
            max: count - 1,
        })
    }
}
