/// Integration tests for d64manager

use d64manager::format::constants::*;
use d64manager::*;
use proptest::prelude::*;

/// Blank 35-track image with a formatted BAM and an empty first directory sector
fn blank_image(name: &[u8], id: &[u8; 2]) -> Vec<u8> {
    let mut data = vec![0u8; D64_SIZE];

    let bam = &mut data[BAM_OFFSET..BAM_OFFSET + SECTOR_SIZE];
    bam[0x00] = 18;
    bam[0x01] = 1;
    bam[0x02] = b'A';
    bam[0x90..0xAB].fill(0xA0);
    bam[0x90..0x90 + name.len()].copy_from_slice(name);
    bam[0xA2..0xA4].copy_from_slice(id);
    bam[0xA5..0xA7].copy_from_slice(b"2A");

    let dir = &mut data[DIRECTORY_OFFSET..DIRECTORY_OFFSET + SECTOR_SIZE];
    dir[0x00] = 0x00;
    dir[0x01] = 0xFF;

    data
}

fn set_free(data: &mut [u8], track: u8, free: u8) {
    data[BAM_OFFSET + 0x04 + (track as usize - 1) * 4] = free;
}

fn write_entry(
    data: &mut [u8],
    sector: u8,
    slot: usize,
    status: u8,
    start: (u8, u8),
    name: &[u8],
    blocks: u16,
) {
    let offset = BAM_OFFSET + sector as usize * SECTOR_SIZE + slot * DIR_ENTRY_SIZE;
    let entry = &mut data[offset..offset + DIR_ENTRY_SIZE];
    entry[0x02] = status;
    entry[0x03] = start.0;
    entry[0x04] = start.1;
    entry[0x05..0x15].fill(0xA0);
    entry[0x05..0x05 + name.len()].copy_from_slice(name);
    entry[0x1E..0x20].copy_from_slice(&blocks.to_le_bytes());
}

fn link(data: &mut [u8], sector: u8, next: (u8, u8)) {
    let offset = BAM_OFFSET + sector as usize * SECTOR_SIZE;
    data[offset] = next.0;
    data[offset + 1] = next.1;
}

#[test]
fn test_single_entry_listing() {
    let mut data = blank_image(b"TEST DISK", b"01");
    for track in 1..=35 {
        if track != 18 {
            set_free(&mut data, track, 19);
        }
    }
    set_free(&mut data, 1, 20);
    write_entry(&mut data, 1, 0, 0x82, (17, 0), b"HELLO", 5);
    // Slot with an invalid type and a slot with no data pointer
    write_entry(&mut data, 1, 3, 0x85, (17, 1), b"BROKEN", 1);
    write_entry(&mut data, 1, 5, 0x81, (0, 0), b"EMPTY", 1);

    assert!(validate(&data));
    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let lines = list(&image).expect("Failed to list directory");

    assert_eq!(
        lines,
        vec![
            "0 \"TEST DISK       \" 01 2A".to_string(),
            "5     \"HELLO\"             PRG".to_string(),
            "647 BLOCKS FREE".to_string(),
        ]
    );
}

#[test]
fn test_scratched_file_is_not_listed() {
    let mut data = blank_image(b"SCRATCH", b"09");
    write_entry(&mut data, 1, 0, 0x00, (17, 3), b"OLD", 4);
    write_entry(&mut data, 1, 1, 0x80, (17, 4), b"DELETED", 2);

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let lines = list(&image).expect("Failed to list directory");

    assert_eq!(
        lines,
        vec![
            "0 \"SCRATCH         \" 09 2A".to_string(),
            "2     \"DELETED\"           DEL".to_string(),
            "0 BLOCKS FREE".to_string(),
        ]
    );
}

#[test]
fn test_bam_info() {
    let mut data = blank_image(b"GAMES\xA0DISK", b"G1");
    set_free(&mut data, 1, 1);
    set_free(&mut data, 35, 17);

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let fs = CbmDosFileSystem::from_image(&image).expect("Failed to mount");
    let bam = fs.bam();

    assert_eq!(bam.dos_version_type, 'A');
    assert_eq!(bam.name_str(), "GAMESDISK");
    assert_eq!(bam.id, "G1");
    assert_eq!(bam.dostype, "2A");
    assert_eq!(bam.free, 18);
}

#[test]
fn test_multi_sector_directory() {
    let mut data = blank_image(b"CHAIN", b"02");
    link(&mut data, 1, (18, 4));
    link(&mut data, 4, (18, 7));
    link(&mut data, 7, (0, 0xFF));

    for slot in 0..8 {
        let name = format!("FILE{}", slot);
        write_entry(&mut data, 1, slot, 0x82, (1, slot as u8), name.as_bytes(), 1);
    }
    write_entry(&mut data, 4, 0, 0x81, (2, 0), b"NOTES", 3);
    write_entry(&mut data, 4, 1, 0xC3, (2, 1), b"LOCKED", 2);
    write_entry(&mut data, 7, 7, 0x04, (3, 0), b"RELATIVE", 300);

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let fs = CbmDosFileSystem::from_image(&image).expect("Failed to mount");
    let entries = fs.read_dir().expect("Failed to read directory");

    assert_eq!(entries.len(), 11);
    assert_eq!(entries[0].name_str(), "FILE0");
    assert_eq!(entries[7].name_str(), "FILE7");

    assert_eq!(entries[8].file_type, FileType::Seq);
    assert_eq!(entries[9].file_type, FileType::Usr);
    assert!(entries[9].locked);

    let rel = &entries[10];
    assert_eq!(rel.file_type, FileType::Rel);
    assert!(!rel.closed);
    assert_eq!(rel.size, 300);
    assert_eq!(rel.start, SectorPointer::new(3, 0));

    let lines = fs.listing().expect("Failed to list");
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[11], "300   \"RELATIVE\"          REL");
}

#[test]
fn test_cyclic_directory_fails() {
    let mut data = blank_image(b"LOOP", b"03");
    link(&mut data, 1, (18, 2));
    link(&mut data, 2, (18, 1));
    write_entry(&mut data, 1, 0, 0x82, (17, 0), b"A", 1);

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let result = list(&image);
    assert!(matches!(
        result,
        Err(D64Error::UnterminatedDirectory { sectors: TOTAL_SECTORS })
    ));
}

#[test]
fn test_error_info_image() {
    let mut data = blank_image(b"ERRORS", b"04");
    data.extend(std::iter::repeat(DriveError::OK).take(TOTAL_SECTORS));
    data[D64_SIZE + 357 + 1] = DriveError::DATA_NOT_FOUND;

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    assert_eq!(image.format(), D64Format::Tracks35WithErrors);

    let err = image.sector_error(18, 1).unwrap().unwrap();
    assert_eq!(err.dos_error_number(), Some(22));

    let bad = image.bad_sectors().unwrap();
    assert_eq!(bad, vec![(SectorPointer::new(18, 1), err)]);

    // The error block does not affect decoding
    assert_eq!(list(&image).unwrap().len(), 2);
}

#[test]
fn test_read_sector() {
    let mut data = blank_image(b"SECTORS", b"05");
    let offset = sector_offset(25, 3).unwrap();
    data[offset..offset + SECTOR_SIZE].fill(0x42);

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let sector = image.read_sector(25, 3).expect("Failed to read sector");
    assert!(sector.iter().all(|&b| b == 0x42));

    assert!(matches!(
        image.read_sector(36, 0),
        Err(D64Error::InvalidTrack { track: 36, .. })
    ));
    assert!(matches!(
        image.read_sector(31, 17),
        Err(D64Error::InvalidSector { .. })
    ));
}

#[test]
fn test_open_from_file() {
    let mut data = blank_image(b"ON DISK", b"06");
    write_entry(&mut data, 1, 0, 0x82, (17, 0), b"LOADER", 12);

    let path = std::env::temp_dir().join(format!("d64manager-{}.d64", std::process::id()));
    std::fs::write(&path, &data).expect("Failed to write temp file");

    let image = D64Image::open(&path);
    let _ = std::fs::remove_file(&path);
    let image = image.expect("Failed to open image");

    assert!(image.filename().unwrap().ends_with(".d64"));
    let lines = list(&image).unwrap();
    assert_eq!(lines[1], "12    \"LOADER\"            PRG");
}

#[test]
fn test_open_rejects_wrong_size() {
    let path = std::env::temp_dir().join(format!("d64manager-bad-{}.d64", std::process::id()));
    std::fs::write(&path, vec![0u8; 1000]).expect("Failed to write temp file");

    let result = D64Image::open(&path);
    let _ = std::fs::remove_file(&path);
    assert!(matches!(result, Err(D64Error::InvalidSize { len: 1000 })));
}

#[test]
fn test_track_allocations_on_image() {
    let mut data = blank_image(b"BAM", b"07");
    data[BAM_OFFSET + 0x04..BAM_OFFSET + 0x08].copy_from_slice(&[21, 0xFF, 0xFF, 0x1F]);

    let image = D64Image::from_bytes(data).expect("Failed to wrap image");
    let fs = CbmDosFileSystem::from_image(&image).expect("Failed to mount");
    let tracks = fs.track_allocations().unwrap();

    assert_eq!(tracks.len(), 35);
    assert!(tracks[0].is_consistent());
    assert_eq!(tracks[0].bitmap_free_count(), 21);

    let map = d64manager::map::render_bam_map(&tracks);
    assert!(map[20].starts_with(" 0 .#"));
}

proptest! {
    #[test]
    fn prop_only_two_sizes_validate(len in 0usize..200_000) {
        let data = vec![0u8; len];
        prop_assert_eq!(validate(&data), len == 174_848 || len == 175_531);
    }

    #[test]
    fn prop_free_is_sum_of_counters(counters in proptest::collection::vec(any::<u8>(), 35)) {
        let mut data = blank_image(b"PROP", b"08");
        for (i, &free) in counters.iter().enumerate() {
            set_free(&mut data, i as u8 + 1, free);
        }
        let expected: u32 = counters.iter().map(|&c| u32::from(c)).sum();
        prop_assert_eq!(read_bam(&data).unwrap().free, expected);
    }

    #[test]
    fn prop_invalid_type_codes_never_list(status in any::<u8>(), track in 1u8..=35, sector in 0u8..17) {
        let mut slot = [0u8; 32];
        slot[0x02] = status;
        slot[0x03] = track;
        slot[0x04] = sector;
        let decoded = decode_entry(&slot).unwrap();
        prop_assert_eq!(decoded.is_some(), status != 0 && status & 0x07 <= 4);
    }
}
