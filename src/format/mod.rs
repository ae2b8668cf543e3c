/// D64 format constants and image validation

/// Format constants and track layout
pub mod constants;

pub use constants::*;

/// D64 image layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum D64Format {
    /// 35 tracks, sector data only
    Tracks35,
    /// 35 tracks followed by one error byte per sector
    Tracks35WithErrors,
}

impl D64Format {
    /// Get the exact image size for this layout
    pub fn image_size(&self) -> usize {
        match self {
            D64Format::Tracks35 => D64_SIZE,
            D64Format::Tracks35WithErrors => D64_SIZE_WITH_ERRORS,
        }
    }

    /// Get a human-readable name for this layout
    pub fn name(&self) -> &'static str {
        match self {
            D64Format::Tracks35 => "35 track",
            D64Format::Tracks35WithErrors => "35 track with error info",
        }
    }

    /// Whether the image carries a per-sector error block
    pub fn has_error_info(&self) -> bool {
        matches!(self, D64Format::Tracks35WithErrors)
    }
}

/// Detect the D64 layout from the image length
///
/// Only the size is inspected. 40-track images (196,608 and 197,376 bytes)
/// are not accepted.
pub fn detect_format(data: &[u8]) -> Option<D64Format> {
    match data.len() {
        D64_SIZE => Some(D64Format::Tracks35),
        D64_SIZE_WITH_ERRORS => Some(D64Format::Tracks35WithErrors),
        _ => None,
    }
}

/// Check whether a buffer is a well-formed 35-track image
///
/// A `true` result is necessary but not sufficient for safe decoding;
/// structural problems still surface as errors from the decoders.
pub fn validate(data: &[u8]) -> bool {
    detect_format(data).is_some()
}
