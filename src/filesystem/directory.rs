/// Directory chain traversal
///
/// The directory starts at track 18 sector 1. The first two bytes of every
/// directory sector point at the next one; a track of 0 or a sector of 0xFF
/// ends the chain.
///
/// Only the sector byte of the chain pointer is used to locate the next
/// sector, which is assumed to be on track 18. A chain that really leaves
/// track 18 is read from the wrong place.

use crate::error::{window, D64Error, Result};
use crate::filesystem::{decode_entry, DirEntry};
use crate::format::constants::*;
use crate::image::SectorPointer;

/// Lazy walk over the 32-byte slots of the directory chain
///
/// Yields every slot of every visited sector in chain order, 8 per sector,
/// including empty and scratched slots. Callers run [`decode_entry`] on each
/// slot to keep only real files, as [`read_dir`] does.
///
/// The walk visits at most [`TOTAL_SECTORS`] sectors by default; going past
/// the bound yields a single [`D64Error::UnterminatedDirectory`] and ends.
pub struct DirectoryWalker<'a> {
    data: &'a [u8],
    offset: usize,
    slot: usize,
    visited: usize,
    limit: usize,
    done: bool,
}

impl<'a> DirectoryWalker<'a> {
    /// Start a walk at track 18 sector 1, skipping the BAM
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_limit(data, TOTAL_SECTORS)
    }

    /// Start a walk with an explicit bound on the number of sectors visited
    pub fn with_limit(data: &'a [u8], limit: usize) -> Self {
        Self {
            data,
            offset: DIRECTORY_OFFSET,
            slot: 0,
            visited: 0,
            limit,
            done: false,
        }
    }

    /// Number of sectors entered so far
    pub fn sectors_visited(&self) -> usize {
        self.visited
    }

    fn fail(&mut self, err: D64Error) -> Option<Result<&'a [u8]>> {
        self.done = true;
        Some(Err(err))
    }

    fn advance(&mut self) {
        let next = SectorPointer::from_bytes(&self.data[self.offset..])
            .unwrap_or(SectorPointer::new(0, 0xFF));

        if next.is_terminator() {
            log::debug!("Directory chain ends after {} sectors", self.visited);
            self.done = true;
            return;
        }

        if !next.is_directory_track() {
            log::warn!(
                "Directory chain points to {}, reading sector {} of track {} instead",
                next,
                next.sector,
                DIRECTORY_TRACK
            );
        }

        self.offset = BAM_OFFSET + SECTOR_SIZE * next.sector as usize;
        self.slot = 0;
    }
}

impl<'a> Iterator for DirectoryWalker<'a> {
    type Item = Result<&'a [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.slot == 0 {
            if self.visited >= self.limit {
                log::warn!("Directory chain exceeds {} sectors", self.limit);
                return self.fail(D64Error::UnterminatedDirectory {
                    sectors: self.visited,
                });
            }
            if let Err(err) = window(self.data, self.offset, SECTOR_SIZE) {
                return self.fail(err);
            }
            self.visited += 1;
            log::debug!("Directory sector at offset {:#07X}", self.offset);
        }

        let data = self.data;
        let start = self.offset + self.slot * DIR_ENTRY_SIZE;
        let slot = &data[start..start + DIR_ENTRY_SIZE];

        self.slot += 1;
        if self.slot == DIR_ENTRIES_PER_SECTOR {
            self.advance();
        }

        Some(Ok(slot))
    }
}

/// Decode every valid entry of the directory chain, in chain order
pub fn read_dir(data: &[u8]) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for slot in DirectoryWalker::new(data) {
        match decode_entry(slot?)? {
            Some(entry) => entries.push(entry),
            None => log::trace!("Skipping empty directory slot"),
        }
    }

    Ok(entries)
}
