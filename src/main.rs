//! Classpatch CLI - hot-patch changed classes into a deployed jar
//!
//! Usage: classpatch <COMMAND>
//!
//! Commands:
//!   patch    Swap changed classes from a fresh build into the destination jar
//!   restore  Put the pristine jar back and discard patch state
//!
//! `patch` reads changed source paths (one per line) from stdin or a file,
//! maps them to compiled artifacts in the source jar, and merges just those
//! artifacts onto the destination jar. The last stdout line of every run is
//! `[SUCCESS]` or `[FAILED]`.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use classpatch::{
    deliver, map_sources, run_merge, run_restore, transport, Config, Destination, OverlayBuilder,
    PatchError,
};

/// Classpatch - selective class hot-patching for deployed jars
#[derive(Parser, Debug)]
#[command(name = "classpatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Swap changed classes from a fresh build into the destination jar
    Patch {
        /// Jar from the fresh build, supplying the new class files
        source_jar: PathBuf,

        /// Destination jar: PATH or [USER@]HOST:PATH
        dest: String,

        /// File with changed source paths, one per line (defaults to stdin)
        #[arg(short, long)]
        sources: Option<PathBuf>,
    },

    /// Put the pristine jar back and discard patch state
    Restore {
        /// Destination jar: PATH or [USER@]HOST:PATH
        dest: String,
    },

    /// Merge a delivered overlay onto the jar (runs at the destination)
    #[command(hide = true)]
    Merge {
        /// Path of the jar to patch
        jar: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    match run(cli.command, verbose) {
        Ok(()) => {
            println!("[SUCCESS]");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(patch_err) = err.downcast_ref::<PatchError>() {
                if patch_err.is_usage_error() {
                    eprintln!("usage: classpatch patch <SOURCE_JAR> <PATH | [USER@]HOST:PATH>");
                }
            }
            println!("[FAILED]");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, verbose: u8) -> Result<()> {
    match command {
        Commands::Patch {
            source_jar,
            dest,
            sources,
        } => cmd_patch(&source_jar, &dest, sources.as_deref(), verbose),
        Commands::Restore { dest } => cmd_restore(&dest, verbose),
        Commands::Merge { jar } => {
            run_merge(&jar, verbose)?;
            Ok(())
        }
    }
}

fn cmd_patch(
    source_jar: &std::path::Path,
    dest: &str,
    sources: Option<&std::path::Path>,
    verbose: u8,
) -> Result<()> {
    let dest = Destination::parse(dest)?;
    if verbose > 0 {
        println!("destination: {dest}");
        println!("source jar: {}", source_jar.display());
    }

    let builder = OverlayBuilder::new()?;
    builder
        .unpack_source(source_jar)
        .with_context(|| format!("unpacking {}", source_jar.display()))?;

    let artifacts = match sources {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening source list {}", path.display()))?;
            map_sources(BufReader::new(file), &builder.classes_root())?
        }
        None => map_sources(io::stdin().lock(), &builder.classes_root())?,
    };
    if verbose > 0 {
        println!("{} artifact(s) staged", artifacts.len());
    }

    let overlay_jar = builder.build(&artifacts)?;
    let config = Config::load_or_default();
    deliver(&overlay_jar, &dest, &config, verbose)?;
    Ok(())
}

fn cmd_restore(dest: &str, verbose: u8) -> Result<()> {
    let dest = Destination::parse(dest)?;
    if verbose > 0 {
        println!("destination: {dest}");
    }

    if dest.is_remote() {
        let config = Config::load_or_default();
        transport::remote_restore(&dest, &config, verbose)?;
    } else {
        run_restore(dest.path())?;
    }
    Ok(())
}
