//! Command-line front end for the gzip/DEFLATE decoder.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

/// A single-member gzip decompressor for dynamic-Huffman DEFLATE streams.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The `.gz` file to decompress.
    input: PathBuf,

    /// Where to write the decompressed output.
    ///
    /// Defaults to the input path with a trailing `.gz` removed, or to the
    /// original file name recorded in the gzip header (FNAME) if the input
    /// has no `.gz` suffix and the header carries one.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("gzrs: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> gzrs::Result<()> {
    let file = File::open(&cli.input)?;
    let decoded = gzrs::decompress(file)?;

    info!(
        "decoded {} ({} bytes)",
        cli.input.display(),
        decoded.data.len()
    );

    let output_path = cli
        .output
        .clone()
        .or_else(|| decoded.header.file_name.clone().map(PathBuf::from))
        .or_else(|| strip_gz_suffix(&cli.input))
        .unwrap_or_else(|| cli.input.with_extension("out"));

    let mut out = File::create(&output_path)?;
    out.write_all(&decoded.data)?;
    info!("wrote {}", output_path.display());
    Ok(())
}

/// Strips a trailing `.gz` extension from `path`, if present.
fn strip_gz_suffix(path: &PathBuf) -> Option<PathBuf> {
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Some(path.with_extension(""))
    } else {
        None
    }
}
