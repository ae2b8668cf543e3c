/// D64 file reader
///
/// D64 files are raw sector dumps of a 1541 disk:
/// - 35 tracks, 683 sectors of 256 bytes (174,848 bytes)
/// - optionally followed by 683 error bytes, one per sector (175,531 bytes)

use crate::error::{D64Error, Result};
use crate::format::detect_format;
use crate::image::D64Image;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Check if a file is likely a D64 file based on extension
pub fn is_d64_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("d64"))
        .unwrap_or(false)
}

/// Read the raw bytes of a file without validating them
pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let mut file = File::open(&path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Read a D64 file from disk
pub fn read_d64<P: AsRef<Path>>(path: P) -> Result<D64Image> {
    let filename = path
        .as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string());

    let data = read_bytes(&path)?;
    let format = detect_format(&data).ok_or(D64Error::invalid_size(data.len()))?;

    log::debug!(
        "Loaded {} bytes from {} ({})",
        data.len(),
        path.as_ref().display(),
        format.name()
    );

    Ok(D64Image {
        format,
        data,
        filename,
    })
}
