/*!
# d64manager

A Rust library for reading Commodore 1541 D64 disk images and their CBM DOS
directory.

## Features

- Validate 35-track D64 images, with or without the error information block
- Decode the Block Availability Map: disk name, id, DOS type, free blocks
- Walk the directory chain and decode directory entries
- Render the directory listing the way the drive prints it
- Per-sector access, 1541 error codes and a BAM allocation map

## Quick Start

```rust,no_run
use d64manager::{D64Image, CbmDosFileSystem};

// Open an existing D64 file
let image = D64Image::open("disk.d64")?;

// Disk metadata from the BAM
let fs = CbmDosFileSystem::from_image(&image)?;
println!("{} ({} blocks free)", fs.bam().name_str(), fs.bam().free);

// Directory entries
for entry in fs.read_dir()? {
    println!("{}: {} blocks {}", entry.name_str(), entry.size, entry.file_type);
}

// Or the listing as printed by LOAD"$",8
for line in d64manager::list(&image)? {
    println!("{}", line);
}
# Ok::<(), d64manager::D64Error>(())
```

## Decoding raw buffers

All decoders also work directly on a byte slice. Check the buffer with
[`validate`] first; the decoders report out-of-range access as an error
rather than panicking, but only a validated buffer has the expected layout.

```rust
use d64manager::{validate, read_bam, read_dir, format_listing};

let data = vec![0u8; 174_848];
assert!(validate(&data));

let bam = read_bam(&data)?;
let entries = read_dir(&data)?;
let lines = format_listing(&bam, &entries);
assert_eq!(lines.last().map(String::as_str), Some("0 BLOCKS FREE"));
# Ok::<(), d64manager::D64Error>(())
```

## Modules

- `format`: D64 layout constants, track geometry and validation
- `image`: The immutable image container and sector addressing
- `filesystem`: BAM, directory walker and entry decoder
- `listing`: Directory listing formatting
- `drive`: 1541 error codes from the error information block
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// 1541 drive error codes
pub mod drive;
/// Error types and Result alias
pub mod error;
/// CBM DOS filesystem (BAM and directory)
pub mod filesystem;
/// D64 format constants and validation
pub mod format;
/// Core image data structures
pub mod image;
/// I/O operations for loading D64 files
pub mod io;
/// Directory listing formatting
pub mod listing;
/// BAM allocation map visualization
pub mod map;

// Re-export common types
pub use drive::DriveError;
pub use error::{D64Error, Result};
pub use filesystem::{
    decode_entry, read_bam, read_dir, read_track_allocations, BamInfo, CbmDosFileSystem,
    DirEntry, DirectoryWalker, FileStatus, FileType, TrackAllocation,
};
pub use format::{detect_format, validate, D64Format};
pub use image::{D64Image, SectorPointer};
pub use listing::{format_listing, list};
