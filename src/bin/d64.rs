/// Interactive D64 console application

use d64manager::*;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

/// Command completer for the REPL
struct CommandCompleter {
    commands: Vec<&'static str>,
}

impl CommandCompleter {
    fn new() -> Self {
        Self {
            commands: vec![
                "cat",
                "dir",
                "entries",
                "errors",
                "exit",
                "help",
                "info",
                "list",
                "load",
                "ls",
                "map",
                "open",
                "quit",
                "read-sector",
                "tracks",
                "validate",
            ],
        }
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Only complete the first word (command name)
        let line_to_cursor = &line[..pos];
        if line_to_cursor.contains(' ') {
            return Ok((pos, vec![]));
        }

        let prefix = line_to_cursor.to_lowercase();
        let matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(&prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// Logger writing `[LEVEL] message` lines to stderr
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger, taking the level from `D64_LOG` (default: warn)
fn init_logging() {
    let level = std::env::var("D64_LOG")
        .ok()
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Get the path to the history file
fn history_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|mut p| {
        p.push(".d64manager_history");
        p
    })
}

fn open_image(path: &str, image: &mut Option<D64Image>) {
    match D64Image::open(path) {
        Ok(img) => {
            println!("Opened: {} ({})", path, img.format().name());
            *image = Some(img);
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn main() {
    init_logging();

    println!("=== D64Manager ===");
    println!("Interactive console for exploring Commodore 1541 D64 disk images.");
    println!("Type 'help' for available commands\n");

    let mut rl = Editor::new().expect("Failed to create editor");
    rl.set_helper(Some(CommandCompleter::new()));

    // Load history if available
    if let Some(history_path) = history_path() {
        let _ = rl.load_history(&history_path);
    }

    let mut image: Option<D64Image> = None;

    if let Some(path) = std::env::args().nth(1) {
        open_image(&path, &mut image);
    }

    loop {
        let readline = rl.readline("> ");
        let input = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let _ = rl.add_history_entry(input);

        let parts = parse_command_line(input);
        if parts.is_empty() {
            continue;
        }
        let command = parts[0].to_lowercase();

        match command.as_str() {
            "help" => {
                print_help();
            }
            "quit" | "exit" => {
                if let Some(history_path) = history_path() {
                    let _ = rl.save_history(&history_path);
                }
                println!("Goodbye!");
                break;
            }
            "open" | "load" => {
                if parts.len() < 2 {
                    println!("Usage: open <path>");
                    continue;
                }
                open_image(&parts[1], &mut image);
            }
            "validate" => {
                if parts.len() >= 2 {
                    match d64manager::io::read_bytes(&parts[1]) {
                        Ok(data) => println!("disk is valid: {}", validate(&data)),
                        Err(e) => println!("Error: {}", e),
                    }
                } else if let Some(ref img) = image {
                    println!("disk is valid: {}", validate(img.data()));
                } else {
                    println!("Usage: validate <path>");
                }
            }
            "info" => {
                if let Some(ref img) = image {
                    print_info(img);
                } else {
                    println!("No image loaded. Use 'open <path>' first.");
                }
            }
            "dir" | "list" | "ls" | "cat" => {
                if let Some(ref img) = image {
                    match list(img) {
                        Ok(lines) => {
                            for line in lines {
                                println!("{}", line);
                            }
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No image loaded.");
                }
            }
            "entries" => {
                if let Some(ref img) = image {
                    print_entries(img);
                } else {
                    println!("No image loaded.");
                }
            }
            "tracks" => {
                if let Some(ref img) = image {
                    list_tracks(img);
                } else {
                    println!("No image loaded.");
                }
            }
            "read-sector" => {
                if let Some(ref img) = image {
                    if parts.len() < 3 {
                        println!("Usage: read-sector <track> <sector>");
                        continue;
                    }
                    let (track, sector) = match (parse_hex_or_dec(&parts[1]), parse_hex_or_dec(&parts[2])) {
                        (Some(t), Some(s)) => (t, s),
                        _ => {
                            println!("Invalid track or sector: {} {}", parts[1], parts[2]);
                            continue;
                        }
                    };

                    match img.read_sector(track, sector) {
                        Ok(data) => {
                            println!("Sector {}/{} ({} bytes):", track, sector, data.len());
                            print_hex_dump(data, 256);
                            if let Ok(Some(err)) = img.sector_error(track, sector) {
                                println!("Drive status: {}", err);
                            }
                        }
                        Err(e) => println!("Error: {}", e),
                    }
                } else {
                    println!("No image loaded.");
                }
            }
            "map" => {
                if let Some(ref img) = image {
                    if let Err(e) = d64manager::map::draw_bam_map(img) {
                        println!("Error: {}", e);
                    }
                } else {
                    println!("No image loaded.");
                }
            }
            "errors" => {
                if let Some(ref img) = image {
                    print_errors(img);
                } else {
                    println!("No image loaded.");
                }
            }
            _ => {
                println!("Unknown command: {}. Type 'help' for available commands.", command);
            }
        }
    }
}

/// Parse command line input, respecting quoted strings
fn parse_command_line(input: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() {
                    parts.push(current.clone());
                    current.clear();
                }
            }
            _ => {
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn print_help() {
    println!("Available commands:");
    println!("  open <path>                    - Open a D64 image (use quotes for paths with spaces)");
    println!("  validate [path]                - Check whether a file has a valid D64 size");
    println!("  info                           - Show image and BAM information");
    println!("  dir                            - Directory listing (list, ls, cat)");
    println!("  entries                        - Directory entries with flags and start sector");
    println!("  tracks                         - BAM entry for every track");
    println!("  read-sector <track> <sector>   - Read and display a sector");
    println!("  map                            - Visual BAM allocation map");
    println!("  errors                         - Sectors flagged in the error information block");
    println!("  help                           - Show this help");
    println!("  quit, exit                     - Exit");
}

fn print_info(image: &D64Image) {
    if let Some(filename) = image.filename() {
        println!("Filename: {}", filename);
    }
    println!("Format: {}", image.format().name());
    println!("Size: {} bytes", image.len());
    println!("Error info: {}", if image.format().has_error_info() { "Yes" } else { "No" });

    match read_bam(image.data()) {
        Ok(bam) => {
            println!("Disk name: {}", bam.name_str());
            println!("Disk id: {}", bam.id);
            println!("DOS type: {}", bam.dostype);
            println!("DOS version: {}", bam.dos_version_type);
            println!("Free blocks: {}", bam.free);
        }
        Err(e) => println!("Error reading BAM: {}", e),
    }
}

fn print_entries(image: &D64Image) {
    let entries = match read_dir(image.data()) {
        Ok(entries) => entries,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    if entries.is_empty() {
        println!("No files found.");
        return;
    }

    println!(
        "{:<18} {:<4} {:>5} {:<6} {:<6} {:>6}",
        "Name", "Type", "Blks", "Closed", "Locked", "Start"
    );
    println!("{}", "-".repeat(52));

    for entry in entries {
        println!(
            "{:<18} {:<4} {:>5} {:<6} {:<6} {:>6}",
            entry.name_str(),
            entry.file_type,
            entry.size,
            if entry.closed { "Yes" } else { "No" },
            if entry.locked { "Yes" } else { "" },
            entry.start.to_string()
        );
    }
}

fn list_tracks(image: &D64Image) {
    let tracks = match read_track_allocations(image.data()) {
        Ok(tracks) => tracks,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    println!(
        "{:<6} {:<8} {:<6} {:<8} {:<10}",
        "Track", "Sectors", "Free", "Bitmap", "Status"
    );
    println!("{}", "-".repeat(44));

    for track in tracks {
        let status = if track.is_consistent() {
            "OK".to_string()
        } else {
            format!("Bitmap {}", track.bitmap_free_count())
        };
        println!(
            "{:<6} {:<8} {:<6} {:02X}{:02X}{:02X}   {:<10}",
            track.track,
            track.sector_count(),
            track.free,
            track.bitmap[0],
            track.bitmap[1],
            track.bitmap[2],
            status
        );
    }
}

fn print_errors(image: &D64Image) {
    if !image.format().has_error_info() {
        println!("Image has no error information block.");
        return;
    }

    match image.bad_sectors() {
        Ok(bad) if bad.is_empty() => println!("No sector errors recorded."),
        Ok(bad) => {
            for (ptr, err) in bad {
                println!("{:>6}  {}", ptr.to_string(), err);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn print_hex_dump(data: &[u8], max_bytes: usize) {
    let len = data.len().min(max_bytes);

    for (i, chunk) in data[..len].chunks(16).enumerate() {
        print!("{:04X}: ", i * 16);

        for (j, byte) in chunk.iter().enumerate() {
            print!("{:02X} ", byte);
            if j == 7 {
                print!(" ");
            }
        }

        // Pad if less than 16 bytes
        for j in chunk.len()..16 {
            print!("   ");
            if j == 7 {
                print!(" ");
            }
        }

        print!(" |");

        for byte in chunk {
            let c = if *byte >= 32 && *byte < 127 {
                *byte as char
            } else {
                '.'
            };
            print!("{}", c);
        }

        println!("|");
    }

    if data.len() > max_bytes {
        println!("... ({} more bytes)", data.len() - max_bytes);
    }
}

fn parse_hex_or_dec(s: &str) -> Option<u8> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16).ok()
    } else if let Some(hex) = s.strip_prefix('$') {
        u8::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
