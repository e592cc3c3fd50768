//! Main entry point for the cbzview CLI application.
//!
//! Given a folder, lists the comic archives in it. Given an archive, lists
//! its pages in reading order or decodes one page.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cbzview::zip::CompressionMethod;
use cbzview::{Cli, Sequencer, SequencerState, Step, list_archives};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.path.is_dir() {
        return list_folder(&cli.path);
    }

    let mut seq = Sequencer::new();
    let state = seq
        .open_archive(&cli.path)
        .with_context(|| format!("cannot open {}", cli.path.display()))?;

    if cli.is_listing() {
        list_pages(&seq, cli.verbose);
    } else if state == SequencerState::EmptyArchive {
        if !cli.quiet {
            eprintln!("{}: no pages", cli.path.display());
        }
    } else {
        show_page(&mut seq, &cli)?;
    }

    seq.close();
    Ok(())
}

/// Print the archives in `dir`, one per line.
fn list_folder(dir: &Path) -> Result<()> {
    let archives =
        list_archives(dir).with_context(|| format!("cannot list {}", dir.display()))?;
    for path in archives {
        println!("{}", path.display());
    }
    Ok(())
}

/// List the page index of the open archive.
///
/// Verbose output adds stored size, compressed size and timestamp of each
/// page, in the layout `unzip -v` uses.
fn list_pages(seq: &Sequencer, verbose: bool) {
    let (Some(index), Some(archive)) = (seq.page_index(), seq.archive()) else {
        return;
    };

    if verbose {
        println!(
            "{:>5}  {:>10}  {:<7}  {:>10}  {:>10}  {:>5}  Name",
            "Page", "Length", "Method", "Size", "Date", "Time"
        );
        println!("{}", "-".repeat(69));
    }

    let total = index.len();
    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;

    for (position, name) in index.iter().enumerate() {
        if !verbose {
            println!("{name}");
            continue;
        }
        let Some(entry) = archive.entry(name) else {
            continue;
        };
        let (year, month, day) = entry.mod_date();
        let (hour, minute, _second) = entry.mod_time();
        println!(
            "{:>5}  {:>10}  {:<7}  {:>10}  {:04}-{:02}-{:02}  {:02}:{:02}  {}",
            total - position,
            entry.uncompressed_size,
            method_label(entry.compression_method),
            entry.compressed_size,
            year,
            month,
            day,
            hour,
            minute,
            name
        );
        total_uncompressed += entry.uncompressed_size;
        total_compressed += entry.compressed_size;
    }

    if verbose {
        println!("{}", "-".repeat(69));
        println!(
            "{:>5}  {:>10}  {:<7}  {:>10}  {:>17}  {} pages",
            "", total_uncompressed, "", total_compressed, "", total
        );
    }
}

/// Method column in the style of `unzip -v`
fn method_label(method: CompressionMethod) -> String {
    match method {
        CompressionMethod::Stored => "Stored".to_string(),
        CompressionMethod::Deflate => "Defl:N".to_string(),
        other => format!("Unk:{:03}", other.as_u16()),
    }
}

/// Step to the requested page, decode it, report it and optionally save it.
fn show_page(seq: &mut Sequencer, cli: &Cli) -> Result<()> {
    for _ in 0..cli.steps() {
        if seq.advance() == Some(Step::AtBound) {
            break;
        }
    }

    let page = seq
        .current_page()?
        .context("archive has no pages")?;

    if !cli.quiet {
        println!(
            "{} - {} ({}x{}, {})",
            page.title,
            page.progress,
            page.image.width(),
            page.image.height(),
            page.entry
        );
    }

    if let Some(output) = &cli.output {
        page.image
            .save(output)
            .with_context(|| format!("cannot write {}", output.display()))?;
        if !cli.quiet {
            println!("  saved: {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_labels() {
        assert_eq!(method_label(CompressionMethod::Stored), "Stored");
        assert_eq!(method_label(CompressionMethod::Deflate), "Defl:N");
        assert_eq!(method_label(CompressionMethod::from_u16(12)), "Unk:012");
    }
}
