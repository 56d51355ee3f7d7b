pub mod cli;
pub mod commands;
pub mod config;
pub mod dto;
pub mod error;
pub mod session;
pub mod shell;

use std::io::{self, Write};

use anyhow::Context as _;
use dnabar_render::RenderSink;
use dnabar_store::DocumentState;

use cli::{Cli, Command, GenerateArgs, ListArgs, SaveArgs};
use commands::{barcode, records};
use config::AppConfig;
use dto::BarcodeSummary;

/// Dispatch a parsed command line, writing results to stdout
pub fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, config, &mut out)
}

pub fn execute<W: Write>(cli: Cli, mut config: AppConfig, out: &mut W) -> anyhow::Result<()> {
    if let Some(dir) = cli.store_dir {
        config.store_dir = dir;
    }

    match cli.cmd.unwrap_or(Command::Shell) {
        Command::Generate(args) => cmd_generate(args, &config, out),
        Command::Save(args) => cmd_save(args, &config, out),
        Command::List(args) => cmd_list(args, &config, out),
        Command::Shell => {
            let stdin = io::stdin();
            shell::run_shell(stdin.lock(), out, &config).context("interactive shell")
        }
    }
}

fn cmd_generate<W: Write>(args: GenerateArgs, config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let raw = args.input.read()?;
    let generated = barcode::generate(&raw)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &generated.image)
            .context("write barcode JSON")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", BarcodeSummary::from(&generated))?;
    }

    if let Some(path) = &args.preview {
        config
            .sink()
            .write(&generated.image, path)
            .with_context(|| format!("write preview '{}'", path.display()))?;
        writeln!(out, "Preview written to {}", path.display())?;
    }
    Ok(())
}

fn cmd_save<W: Write>(args: SaveArgs, config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let raw = args.input.read()?;
    let generated = barcode::generate(&raw)?;

    let mut options = match args.out {
        Some(path) => barcode::SaveOptions::explicit(path),
        None => barcode::SaveOptions::auto(&config.store_dir),
    };
    if args.no_sequence_file {
        options = options.without_sequence_file();
    }

    let record = barcode::save(&generated, &options, &config.sink(), &config.store())?;
    writeln!(out, "Barcode saved to {}", record.image.display())?;
    if let Some(path) = &record.sequence_file {
        writeln!(out, "Sequence saved to {}", path.display())?;
    }
    Ok(())
}

fn cmd_list<W: Write>(args: ListArgs, config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let store = config.store();
    // --json output carries records only; load() still logs the corruption to stderr
    let state = store.inspect()?.state;
    if let (DocumentState::Corrupt { reason }, false) = (state, args.json) {
        writeln!(
            out,
            "Warning: {} is unreadable and was treated as empty ({reason})",
            store.path().display()
        )?;
    }

    let rows = records::list(&store, args.limit)?;
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &rows).context("write records JSON")?;
        writeln!(out)?;
    } else if rows.is_empty() {
        writeln!(out, "No barcodes have been saved yet.")?;
    } else {
        for row in &rows {
            writeln!(out, "{row}")?;
        }
    }
    Ok(())
}
