//! gwdat CLI - Command-line tool for inspecting game `.dat` archives.
//!
//! This is the main entry point for the gwdat command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gwdat::prelude::*;

/// gwdat - game .dat archive inspection tool
#[derive(Parser)]
#[command(name = "gwdat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the .dat archive
    #[arg(short, long, env = "GWDAT_ARCHIVE")]
    dat: PathBuf,

    /// Accept archives whose identifier bytes do not match
    #[arg(long)]
    no_identity_check: bool,

    /// Verify chunk checksums when deframing
    #[arg(long)]
    verify_checksums: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show archive header and manifest summary
    Info,

    /// List manifest entries
    List {
        /// First entry to list
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of entries to list
        #[arg(long)]
        limit: Option<usize>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search the id table
    Find {
        /// Numeric id to search for
        query: u32,

        /// Match against file ids instead of base ids
        #[arg(long)]
        file_id: bool,
    },

    /// Export a single entry
    Export {
        /// Manifest entry index
        #[arg(short, long)]
        index: usize,

        /// Strip chunk checksums before writing
        #[arg(long)]
        deframe: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every entry into a directory
    Extract {
        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Strip chunk checksums before writing
        #[arg(long)]
        deframe: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let checksums = if cli.verify_checksums {
        ChecksumPolicy::Verify
    } else {
        ChecksumPolicy::Skip
    };
    let options = ArchiveOptions::default()
        .with_identity_check(!cli.no_identity_check)
        .with_checksums(checksums);

    let start = Instant::now();
    let mut archive = DatArchive::open_with(&cli.dat, options)
        .with_context(|| format!("Failed to open archive {}", cli.dat.display()))?;
    info!(elapsed = ?start.elapsed(), "archive opened");

    match cli.command {
        Commands::Info => cmd_info(&archive),
        Commands::List {
            offset,
            limit,
            json,
        } => cmd_list(&archive, offset, limit, json),
        Commands::Find { query, file_id } => cmd_find(&archive, query, file_id),
        Commands::Export {
            index,
            deframe,
            output,
        } => cmd_export(&mut archive, index, deframe, output),
        Commands::Extract { output, deframe } => cmd_extract(&mut archive, &output, deframe),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_info(archive: &DatArchive) -> Result<()> {
    let header = archive.header();
    let manifest = archive.manifest_header();

    println!("Archive:         {}", archive.name());
    println!("File size:       {} bytes", archive.file_len());
    println!("Version:         {}", header.version);
    println!("Identifier:      {}", header.identifier_display());
    println!("Header size:     {}", header.header_size);
    println!("Chunk size:      {}", header.chunk_size);
    println!("Manifest offset: {:#x}", header.manifest_offset);
    println!("Manifest size:   {}", header.manifest_size);
    println!();
    println!("Manifest identifier: {}", manifest.identifier_display());
    println!("Manifest unknown:    {:#x}", manifest.unknown);
    println!(
        "Entries:             {} ({} slots)",
        archive.entry_count(),
        manifest.raw_entry_count
    );
    println!("Id table records:    {}", archive.id_index().len());

    Ok(())
}

fn cmd_list(archive: &DatArchive, offset: usize, limit: Option<usize>, json: bool) -> Result<()> {
    let rows = archive
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX));

    if json {
        let rows: Vec<_> = rows
            .map(|(index, entry)| serde_json::json!({ "index": index, "entry": entry }))
            .collect();
        let out = serde_json::to_string_pretty(&rows).context("Failed to serialize entries")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{:>8} {:>14} {:>10} {:>6} {:>6} {:>8} {:>10}",
        "index", "offset", "size", "comp", "flag", "counter", "crc"
    );

    let mut count = 0;
    for (index, entry) in rows {
        println!(
            "{:>8} {:>#14x} {:>10} {:>6} {:>6} {:>8} {:>#10x}",
            index,
            entry.offset,
            entry.size,
            entry.compression_flag,
            entry.entry_flag,
            entry.counter,
            entry.crc
        );
        count += 1;
    }

    println!("\nListed: {} of {} entries", count, archive.entry_count());

    Ok(())
}

fn cmd_find(archive: &DatArchive, query: u32, file_id: bool) -> Result<()> {
    let field = if file_id { IdField::FileId } else { IdField::BaseId };
    let matches = archive.find(query, field);

    for base_id in &matches {
        match archive.entry(*base_id as usize) {
            Ok(entry) => println!(
                "{:>10}  entry at {:#x}, {} bytes",
                base_id, entry.offset, entry.size
            ),
            Err(_) => println!("{:>10}", base_id),
        }
    }

    println!("\nFound: {} base ids", matches.len());

    Ok(())
}

fn cmd_export(
    archive: &mut DatArchive,
    index: usize,
    deframe: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let data = read_entry(archive, index, deframe)?;
    let output = output.unwrap_or_else(|| PathBuf::from(export_file_name(index, deframe)));

    fs::write(&output, &data)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote {} bytes to {}", data.len(), output.display());

    Ok(())
}

fn cmd_extract(archive: &mut DatArchive, output: &Path, deframe: bool) -> Result<()> {
    let total = archive.entry_count();
    println!("Extracting {} entries to {}...", total, output.display());

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut exported = 0;
    let mut errors = 0;

    for index in 0..total {
        let result = read_entry(archive, index, deframe).and_then(|data| {
            let path = output.join(export_file_name(index, deframe));
            fs::write(&path, data).with_context(|| format!("Failed to write {}", path.display()))
        });

        match result {
            Ok(()) => exported += 1,
            Err(e) => {
                warn!(index, "skipping entry: {e:#}");
                errors += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Exported {} entries in {:?} ({} errors)",
        exported,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn read_entry(archive: &mut DatArchive, index: usize, deframe: bool) -> Result<Vec<u8>> {
    if deframe {
        archive
            .deframe(index)
            .with_context(|| format!("Failed to deframe entry {index}"))
    } else {
        archive
            .read_raw(index)
            .with_context(|| format!("Failed to read entry {index}"))
    }
}

/// Default file name for an exported entry.
fn export_file_name(index: usize, deframe: bool) -> String {
    if deframe {
        format!("decompressed_{index}.bin")
    } else {
        format!("compressed_{index}.bin")
    }
}
