/// CBM DOS filesystem: BAM, directory chain and directory entries

pub mod bam;
/// Directory chain traversal
pub mod directory;
/// Directory slot decoding
pub mod entry;

pub use bam::{read_bam, read_track_allocations, BamInfo, TrackAllocation};
pub use directory::{read_dir, DirectoryWalker};
pub use entry::{decode_entry, FileStatus};

use crate::error::Result;
use crate::format::PADDING;
use crate::image::{D64Image, SectorPointer};
use std::fmt;

/// CBM DOS file type, from the low three bits of the status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Deleted (000)
    Del,
    /// Sequential (001)
    Seq,
    /// Program (010)
    Prg,
    /// User (011)
    Usr,
    /// Relative (100)
    Rel,
    /// Codes 101, 110 and 111 are not file types
    Invalid,
}

impl FileType {
    /// Map a three-bit type code; higher bits are ignored
    pub fn from_code(code: u8) -> Self {
        match code & 0x07 {
            0b000 => FileType::Del,
            0b001 => FileType::Seq,
            0b010 => FileType::Prg,
            0b011 => FileType::Usr,
            0b100 => FileType::Rel,
            _ => FileType::Invalid,
        }
    }

    /// Three-letter mnemonic shown in listings
    pub fn mnemonic(&self) -> &'static str {
        match self {
            FileType::Del => "DEL",
            FileType::Seq => "SEQ",
            FileType::Prg => "PRG",
            FileType::Usr => "USR",
            FileType::Rel => "REL",
            FileType::Invalid => "???",
        }
    }

    /// Whether the code names a real file type
    pub fn is_valid(&self) -> bool {
        *self != FileType::Invalid
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Raw filename with 0xA0 padding removed
    pub name: Vec<u8>,
    /// File size in blocks
    pub size: u16,
    /// File type
    pub file_type: FileType,
    /// File was closed properly (unclosed files show as "*PRG" on a 1541)
    pub closed: bool,
    /// File is locked against scratching
    pub locked: bool,
    /// First sector of the file data
    pub start: SectorPointer,
}

impl DirEntry {
    /// Filename as text, one character per byte
    pub fn name_str(&self) -> String {
        raw_text(&self.name)
    }
}

/// Remove every padding byte, wherever it appears
pub(crate) fn strip_padding(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().filter(|&b| b != PADDING).collect()
}

/// Map each byte to the character with the same code point
///
/// No PETSCII translation is attempted.
pub fn raw_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// CBM DOS filesystem view over a D64 image
pub struct CbmDosFileSystem<'a> {
    image: &'a D64Image,
    bam: BamInfo,
}

impl<'a> CbmDosFileSystem<'a> {
    /// Mount the filesystem, decoding the BAM up front
    pub fn from_image(image: &'a D64Image) -> Result<Self> {
        let bam = read_bam(image.data())?;
        Ok(Self { image, bam })
    }

    /// Disk-level metadata from the BAM
    pub fn bam(&self) -> &BamInfo {
        &self.bam
    }

    /// Walk the directory chain and decode every valid entry
    pub fn read_dir(&self) -> Result<Vec<DirEntry>> {
        read_dir(self.image.data())
    }

    /// Per-track free counters and bitmaps
    pub fn track_allocations(&self) -> Result<Vec<TrackAllocation>> {
        read_track_allocations(self.image.data())
    }

    /// Directory listing lines, header to footer
    pub fn listing(&self) -> Result<Vec<String>> {
        let entries = self.read_dir()?;
        Ok(crate::listing::format_listing(&self.bam, &entries))
    }
}
