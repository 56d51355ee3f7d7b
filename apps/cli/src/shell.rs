//! Line-oriented interactive loop mirroring the desktop actions:
//! load, generate, save, clear and view saved barcodes.

use std::io::{self, BufRead, Write};
use std::path::Path;

use dnabar_render::RenderSink;

use crate::commands::barcode::SaveOptions;
use crate::commands::records;
use crate::config::AppConfig;
use crate::dto::BarcodeSummary;
use crate::session::Session;

const PROMPT: &str = "dnabar> ";

const HELP: &str = "\
Commands:
  load <path>         read a sequence from a text or FASTA-like file
  input <sequence>    replace the current input
  generate [sequence] build the barcode for the current (or given) input
  preview <path>      write the generated barcode to a PNG without saving it
  save [path]         save the generated barcode (auto-named if no path)
  list [n]            show saved barcodes, newest first
  clear               reset input and generated barcode
  status              show the status line
  help                show this text
  quit                leave the shell";

/// Run the shell until `quit` or end of input
pub fn run_shell<R: BufRead, W: Write>(input: R, out: &mut W, config: &AppConfig) -> io::Result<()> {
    let store = config.store();
    let sink = config.sink();
    let mut session = Session::new();

    writeln!(out, "DNA barcode shell. Type `help` for commands.")?;
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "status" => writeln!(out, "{}", session.status())?,
            "input" => {
                session.set_input(arg);
                writeln!(out, "Input set ({} characters)", arg.chars().count())?;
            }
            "load" if arg.is_empty() => writeln!(out, "Usage: load <path>")?,
            "load" => match session.load_file(Path::new(arg)) {
                Ok(()) => writeln!(out, "{}", session.status())?,
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            "generate" => {
                if !arg.is_empty() {
                    session.set_input(arg);
                }
                match session.generate() {
                    Ok(generated) => {
                        writeln!(out, "{}", BarcodeSummary::from(generated))?;
                        writeln!(out, "{}", session.status())?;
                    }
                    Err(e) => writeln!(out, "Invalid Input: {e}")?,
                }
            }
            "preview" if arg.is_empty() => writeln!(out, "Usage: preview <path>")?,
            "preview" => match session.generated() {
                Some(generated) => {
                    match sink.write(&generated.image, Path::new(arg)) {
                        Ok(()) => writeln!(out, "Preview written to {arg}")?,
                        Err(e) => writeln!(out, "Error: {e}")?,
                    }
                }
                None => writeln!(out, "Please generate a barcode first.")?,
            },
            "save" => {
                let options = if arg.is_empty() {
                    SaveOptions::auto(&config.store_dir)
                } else {
                    SaveOptions::explicit(arg)
                };
                match session.save(&options, &sink, &store) {
                    Ok(_) => writeln!(out, "{}", session.status())?,
                    Err(e) => writeln!(out, "Save Error: {e}")?,
                }
            }
            "list" => {
                let limit = if arg.is_empty() {
                    None
                } else {
                    match arg.parse::<usize>() {
                        Ok(n) => Some(n),
                        Err(_) => {
                            writeln!(out, "Usage: list [n]")?;
                            write!(out, "{PROMPT}")?;
                            out.flush()?;
                            continue;
                        }
                    }
                };
                match records::list(&store, limit) {
                    Ok(rows) if rows.is_empty() => {
                        writeln!(out, "No barcodes have been saved yet.")?
                    }
                    Ok(rows) => {
                        for row in rows {
                            writeln!(out, "{row}")?;
                        }
                    }
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            "clear" => {
                session.clear();
                writeln!(out, "{}", session.status())?;
            }
            other => writeln!(out, "Unknown command `{other}`. Type `help` for commands.")?,
        }

        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}
