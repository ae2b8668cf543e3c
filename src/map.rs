/// BAM allocation map visualization

use crate::error::Result;
use crate::filesystem::{read_track_allocations, TrackAllocation};
use crate::image::D64Image;

/// ANSI color codes for the allocation map
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
    pub const DARK_WHITE: &str = "\x1b[37m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const DARK_YELLOW: &str = "\x1b[2;33m";
}

const BLOCK_FREE: &str = "\u{2591}"; // ░ - Light shade (free)
const BLOCK_USED: &str = "\u{2593}"; // ▓ - Dark shade (allocated)

/// Render the map as plain rows without color
///
/// One column per track, one row per sector with sector 0 at the bottom,
/// `.` for a free sector, `#` for an allocated one, and a blank where the
/// track has no such sector. The last row is the track axis.
pub fn render_bam_map(tracks: &[TrackAllocation]) -> Vec<String> {
    render(tracks, |track, sector| {
        let cell = if track.is_sector_free(sector) { "." } else { "#" };
        cell.to_string()
    })
}

/// Draw the BAM allocation map of an image to stdout
///
/// Tracks whose free counter disagrees with their bitmap are drawn in
/// yellow.
pub fn draw_bam_map(image: &D64Image) -> Result<()> {
    let tracks = read_track_allocations(image.data())?;

    println!("=== BAM Map ===");
    println!(
        "Legend: {}{} Used{} {}{} Free{} {}Counter mismatch{}",
        colors::BRIGHT_WHITE, BLOCK_USED, colors::RESET,
        colors::DARK_WHITE, BLOCK_FREE, colors::RESET,
        colors::BRIGHT_YELLOW, colors::RESET
    );
    println!();

    let rows = render(&tracks, |track, sector| {
        let free = track.is_sector_free(sector);
        let color = match (track.is_consistent(), free) {
            (true, false) => colors::BRIGHT_WHITE,
            (true, true) => colors::DARK_WHITE,
            (false, false) => colors::BRIGHT_YELLOW,
            (false, true) => colors::DARK_YELLOW,
        };
        let block = if free { BLOCK_FREE } else { BLOCK_USED };
        format!("{}{}{}", color, block, colors::RESET)
    });

    for row in rows {
        println!("{}", row);
    }

    let mismatched: Vec<String> = tracks
        .iter()
        .filter(|t| !t.is_consistent())
        .map(|t| format!("{} ({} vs {})", t.track, t.free, t.bitmap_free_count()))
        .collect();
    if !mismatched.is_empty() {
        println!("Counter mismatch on track(s): {}", mismatched.join(", "));
    }

    Ok(())
}

fn render<F>(tracks: &[TrackAllocation], mut cell: F) -> Vec<String>
where
    F: FnMut(&TrackAllocation, u8) -> String,
{
    let max_sectors = tracks.iter().map(|t| t.sector_count()).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(max_sectors as usize + 1);

    // Sector 0 at the bottom
    for sector in (0..max_sectors).rev() {
        let mut row = format!("{:>2} ", sector);
        for track in tracks {
            if sector < track.sector_count() {
                row.push_str(&cell(track, sector));
            } else {
                row.push(' ');
            }
        }
        rows.push(row.trim_end().to_string());
    }

    // Track axis, numbers printed every 5 tracks starting at track 1
    let mut axis = String::from("   ");
    let mut skip = 0;
    for track in tracks {
        if skip > 0 {
            skip -= 1;
        } else if track.track % 5 == 1 {
            let label = track.track.to_string();
            skip = label.len() - 1;
            axis.push_str(&label);
        } else {
            axis.push(' ');
        }
    }
    rows.push(axis.trim_end().to_string());

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks() -> Vec<TrackAllocation> {
        (1..=35)
            .map(|track| TrackAllocation {
                track,
                free: 0,
                bitmap: [0; 3],
            })
            .collect()
    }

    #[test]
    fn test_map_dimensions() {
        let rows = render_bam_map(&tracks());
        // 21 sector rows plus the axis
        assert_eq!(rows.len(), 22);
        assert_eq!(rows[0], format!("20 {}", "#".repeat(17)));
        assert_eq!(rows[20], format!(" 0 {}", "#".repeat(35)));
    }

    #[test]
    fn test_map_marks_free_sectors() {
        let mut tracks = tracks();
        tracks[0].bitmap = [0x01, 0, 0];
        tracks[0].free = 1;

        let rows = render_bam_map(&tracks);
        assert!(rows[20].starts_with(" 0 .#"));
        assert!(rows[19].starts_with(" 1 ##"));
    }

    #[test]
    fn test_map_axis() {
        let rows = render_bam_map(&tracks());
        let axis = rows.last().unwrap();
        assert!(axis.starts_with("   1    6    11   16"));
        assert!(axis.ends_with("31"));
    }
}
