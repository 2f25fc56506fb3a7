//! This is the command line tool that loads an input file and compresses it
//! into a raw LZ4 block.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use lzblock::buffer::ByteBuffer;
use lzblock::{Compressor, LiteralCompressor, Lz4Compressor, Lz4HcCompressor};

use std::process::exit;
use std::{fs, time::Instant};

/// The extension added to compressed files.
const FILE_EXTENSION: &str = ".lz4b";

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn compress_file<C: Compressor + std::fmt::Display>(
    compressor: C,
    input: &[u8],
    checked: bool,
) -> lzblock::Result<Vec<u8>> {
    log::info!("Compressing using {}", compressor);
    let compressed = compressor.compress(input)?;
    let bound = compressor.max_compressed_length(input.len());
    log::info!("Compressed from {} to {} bytes.", input.len(), compressed.len());
    log::info!(
        "Compression ratio is {:.4}x.",
        input.len() as f64 / compressed.len() as f64
    );

    if checked {
        // Compress again through the positional interface into a window of
        // exactly the bound, and compare.
        let mut src = ByteBuffer::new(input);
        let mut dest = ByteBuffer::new(vec![0u8; bound]);
        let written = compressor.compress_buffer(&mut src, &mut dest)?;
        dest.flip();
        if written <= bound && dest.chunk() == &compressed[..] {
            log::info!("Correct!");
        } else {
            log::error!("Incorrect! The two encodings differ.");
            exit(1);
        }
    }
    Ok(compressed)
}

fn main() {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Compress twice and compare the results")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file")
                .num_args(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("mode")
                .help("The compressor to use.")
                .value_parser(["fast", "hc", "literal"])
                .num_args(1),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .value_name("LEVEL")
                .help("Compression level of the hc mode (1 to 12)")
                .value_parser(clap::value_parser!(u8))
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let cli_checked_mode = matches.get_flag("checked");
    let cli_mode = matches
        .get_one::<String>("mode")
        .cloned()
        .unwrap_or_else(|| String::from("fast"));
    let cli_level = matches.get_one::<u8>("level").copied();

    let Some(input_path) = matches.get_one::<String>("INPUT") else {
        log::error!("No input file given");
        exit(1);
    };
    let out = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| input_path.clone() + FILE_EXTENSION);

    let input = match fs::read(input_path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("Can't open {}: {}", input_path, err);
            exit(1);
        }
    };

    let timer = Timer::new();
    let result = match cli_mode.as_str() {
        "hc" => {
            let level = cli_level.unwrap_or(lzblock::hc::DEFAULT_LEVEL);
            Lz4HcCompressor::with_level(level).and_then(|compressor| {
                compress_file(compressor, &input, cli_checked_mode)
            })
        }
        "literal" => {
            compress_file(LiteralCompressor::new(), &input, cli_checked_mode)
        }
        _ => compress_file(Lz4Compressor::new(), &input, cli_checked_mode),
    };
    drop(timer);

    match result {
        Ok(compressed) => {
            if let Err(err) = fs::write(&out, compressed) {
                log::error!("Unable to write {}: {}", out, err);
                exit(1);
            }
            log::info!("Wrote {}.", out);
        }
        Err(err) => {
            log::error!("Compression failed: {}", err);
            exit(1);
        }
    }
}
