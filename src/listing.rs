/// Directory listing in the layout a 1541 prints for `LOAD"$",8`

use crate::error::Result;
use crate::filesystem::{BamInfo, CbmDosFileSystem, DirEntry};
use crate::image::D64Image;

/// Header line: `0 "NAME            " ID DT`
pub fn format_header(bam: &BamInfo) -> String {
    format!("0 \"{:<16}\" {} {}", bam.name_str(), bam.id, bam.dostype)
}

/// Entry line: size in a 6-wide field, quoted name in a 19-wide field, type
pub fn format_entry(entry: &DirEntry) -> String {
    let quoted = format!("\"{}\"", entry.name_str());
    format!("{:<6}{:<19} {}", entry.size, quoted, entry.file_type)
}

/// Footer line: `<free> BLOCKS FREE`
pub fn format_footer(bam: &BamInfo) -> String {
    format!("{} BLOCKS FREE", bam.free)
}

/// Render the full listing: header, one line per entry, footer
pub fn format_listing(bam: &BamInfo, entries: &[DirEntry]) -> Vec<String> {
    let mut lines = Vec::with_capacity(entries.len() + 2);
    lines.push(format_header(bam));
    lines.extend(entries.iter().map(format_entry));
    lines.push(format_footer(bam));
    lines
}

/// Decode the BAM and directory of an image and render its listing
pub fn list(image: &D64Image) -> Result<Vec<String>> {
    CbmDosFileSystem::from_image(image)?.listing()
}
