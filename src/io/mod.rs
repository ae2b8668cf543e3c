/// I/O operations for loading D64 files

/// Reader implementation for D64 files
pub mod reader;

pub use reader::{is_d64_file, read_bytes, read_d64};
