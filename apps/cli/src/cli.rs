use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::file;
use crate::error::CommandError;

#[derive(Parser, Debug)]
#[command(name = "dnabar", version, about = "Render DNA sequences as coloured barcodes")]
pub struct Cli {
    /// Directory for saved images and the record document.
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a sequence and describe its barcode.
    Generate(GenerateArgs),
    /// Generate and save a barcode, recording it in the store.
    Save(SaveArgs),
    /// List saved barcodes, newest first.
    List(ListArgs),
    /// Interactive shell (default when no subcommand is given).
    Shell,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Sequence text.
    #[arg(long)]
    pub sequence: Option<String>,

    /// Plain-text or FASTA-like file holding the sequence.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    pub fn read(&self) -> Result<String, CommandError> {
        match (&self.sequence, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => file::read_sequence_file(path),
            (None, None) => Ok(String::new()),
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also write the barcode to this PNG (not recorded).
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Print the block description as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Image path; defaults to a content-derived name in the store directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Skip writing the `.txt` copy of the sequence.
    #[arg(long)]
    pub no_sequence_file: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show at most this many records.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print records as JSON.
    #[arg(long)]
    pub json: bool,
}
