use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use librepo_mirrors::{fastest_mirror, parse_flat_mirrorlist, sort_internal_mirrorlists, Mirrorlist, Metalink, ProbeConfig};
use std::fs;
use std::path::PathBuf;

/// Demo harness for `librepo-mirrors`. Deliberately small: the full
/// filter/sort/rate front-end that downloaders build on top of this core
/// is out of scope for this crate.
#[derive(Parser, Debug)]
#[command(about, author, version, propagate_version = true)]
struct Cli {
    #[clap(flatten)]
    verbose: Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a mirrorlist from a flat file and/or a Metalink file and
    /// print it, one URL per line.
    Build {
        /// Path to a flat mirrorlist file (one URL per line).
        #[arg(long)]
        flat: Option<PathBuf>,

        /// Path to a Metalink XML file.
        #[arg(long)]
        metalink: Option<PathBuf>,

        /// Suffix to strip from Metalink URLs (e.g. `/repodata/repomd.xml`).
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Probe a list of URLs and print them back out, fastest first.
    Probe {
        /// URLs to probe.
        urls: Vec<String>,
    },

    /// Load two or more flat mirrorlist files as separate lists, run a
    /// single shared probe over their union of hosts, and print each list
    /// back out in its new order.
    Sort {
        /// Flat mirrorlist files, one caller-owned list per file.
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(cli.verbose.tracing_level_filter().into())
                .from_env_lossy(),
        )
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    runtime.block_on(run(cli.command))
}

async fn run(command: Command) -> Result<()> {
    match command {
        Command::Build {
            flat,
            metalink,
            suffix,
        } => build(flat, metalink, suffix.as_deref()),
        Command::Probe { urls } => probe(urls).await,
        Command::Sort { files } => sort(files).await,
    }
}

fn build(flat: Option<PathBuf>, metalink: Option<PathBuf>, suffix: Option<&str>) -> Result<()> {
    let mut list = Mirrorlist::new();

    if let Some(path) = flat {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading flat mirrorlist {}", path.display()))?;
        list.append_flat(&parse_flat_mirrorlist(&text), None);
    }

    if let Some(path) = metalink {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading metalink {}", path.display()))?;
        let metalink = Metalink::from_xml_str(&text)?;
        list.append_metalink(&metalink, suffix, None);
    }

    for entry in list.entries() {
        println!("{}", entry.url);
    }
    Ok(())
}

async fn probe(urls: Vec<String>) -> Result<()> {
    let config = ProbeConfig::default();
    let sorted = fastest_mirror(&config, &urls).await?;
    for url in sorted {
        println!("{url}");
    }
    Ok(())
}

async fn sort(files: Vec<PathBuf>) -> Result<()> {
    let mut lists = Vec::with_capacity(files.len());
    for path in &files {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading flat mirrorlist {}", path.display()))?;
        let mut list = Mirrorlist::new();
        list.append_flat(&parse_flat_mirrorlist(&text), None);
        lists.push(list);
    }

    let config = ProbeConfig::default();
    sort_internal_mirrorlists(&config, &mut lists).await?;

    for (path, list) in files.iter().zip(lists.iter()) {
        println!("# {}", path.display());
        for entry in list.entries() {
            println!("{}", entry.url);
        }
    }
    Ok(())
}
