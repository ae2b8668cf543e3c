use thiserror::Error;

/// Result type alias for D64 operations
pub type Result<T> = std::result::Result<T, D64Error>;

/// Errors that can occur when working with D64 images
#[derive(Debug, Error)]
pub enum D64Error {
    /// I/O error occurred while loading an image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Buffer length is not one of the accepted 35-track image sizes
    #[error("Invalid image size: {len} bytes (expected 174848 or 175531)")]
    InvalidSize {
        /// Length of the rejected buffer
        len: usize,
    },

    /// Fixed-offset access beyond the end of the buffer
    #[error("Offset out of range: {len} bytes at offset {offset} (buffer is {size} bytes)")]
    OutOfRange {
        /// Start of the attempted access
        offset: usize,
        /// Number of bytes requested
        len: usize,
        /// Size of the buffer
        size: usize,
    },

    /// Directory chain did not reach its terminator within the sector bound
    #[error("Directory chain not terminated after {sectors} sectors")]
    UnterminatedDirectory {
        /// Number of sectors visited before giving up
        sectors: usize,
    },

    /// Invalid track number specified
    #[error("Invalid track {track} (valid: 1-{max})")]
    InvalidTrack {
        /// Track number
        track: u8,
        /// Highest valid track number
        max: u8,
    },

    /// Invalid sector number specified
    #[error("Invalid sector {sector} on track {track} (valid: 0-{max})")]
    InvalidSector {
        /// Track number
        track: u8,
        /// Sector number
        sector: u8,
        /// Highest valid sector number on the track
        max: u8,
    },
}

impl D64Error {
    /// Create an out-of-range error for an access into a buffer
    pub fn out_of_range(offset: usize, len: usize, size: usize) -> Self {
        D64Error::OutOfRange { offset, len, size }
    }

    /// Create an invalid size error
    pub fn invalid_size(len: usize) -> Self {
        D64Error::InvalidSize { len }
    }
}

/// Borrow `len` bytes at `offset`, or fail with [`D64Error::OutOfRange`]
pub(crate) fn window(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| data.get(offset..end))
        .ok_or_else(|| D64Error::out_of_range(offset, len, data.len()))
}
