use std::ffi::OsString;
use std::path::{Path, PathBuf};

use dnabar_core::{naming, validate, BarcodeImage, Sequence};
use dnabar_render::RenderSink;
use dnabar_store::{latest_claiming, Record, RecordStore};

use crate::commands::file::write_sequence_file;
use crate::error::CommandError;

/// Result of a generate action, handed explicitly to preview and save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub sequence: Sequence,
    pub image: BarcodeImage,
}

/// Validate raw input and build its barcode description
pub fn generate(raw: &str) -> Result<Generated, CommandError> {
    let sequence = validate(raw)?;
    let image = sequence.encode();
    tracing::debug!("Generated barcode with {} block(s)", image.len());
    Ok(Generated { sequence, image })
}

/// Where a saved image goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// Content-derived name inside `dir`
    Auto { dir: PathBuf },
    /// A path the user picked
    Explicit { image: PathBuf },
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub target: SaveTarget,
    pub write_sequence_file: bool,
}

impl SaveOptions {
    pub fn auto(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: SaveTarget::Auto { dir: dir.into() },
            write_sequence_file: true,
        }
    }

    pub fn explicit(image: impl Into<PathBuf>) -> Self {
        Self {
            target: SaveTarget::Explicit {
                image: image.into(),
            },
            write_sequence_file: true,
        }
    }

    pub fn without_sequence_file(mut self) -> Self {
        self.write_sequence_file = false;
        self
    }
}

/// Final image path for a sequence; explicit paths always end in `.png`
pub fn image_path(target: &SaveTarget, sequence: &Sequence) -> PathBuf {
    match target {
        SaveTarget::Auto { dir } => dir.join(format!("{}.png", naming::file_stem(sequence))),
        SaveTarget::Explicit { image } => {
            let is_png = image
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            if is_png {
                image.clone()
            } else {
                let mut name = image.file_name().map(OsString::from).unwrap_or_default();
                name.push(".png");
                image.with_file_name(name)
            }
        }
    }
}

/// `<stem>.sequence.txt` next to the image; never equal to a `.png` path
pub fn sequence_file_path(image: &Path) -> PathBuf {
    let mut name = image.file_stem().map(OsString::from).unwrap_or_default();
    name.push(".sequence.txt");
    image.with_file_name(name)
}

/// Write the image, then the sequence text, then the record.
///
/// The store is read first: a corrupt document under `CorruptPolicy::Refuse`
/// or a target path already recorded for a different sequence stops the
/// save before anything is written. After that, each step runs only if the
/// previous one succeeded.
pub fn save(
    generated: &Generated,
    options: &SaveOptions,
    sink: &dyn RenderSink,
    store: &RecordStore,
) -> Result<Record, CommandError> {
    let image = image_path(&options.target, &generated.sequence);
    let image = std::path::absolute(&image).map_err(|source| CommandError::FileWrite {
        path: image.clone(),
        source,
    })?;
    let text_path = options
        .write_sequence_file
        .then(|| sequence_file_path(&image));

    let records = store.prepare_append()?;
    for path in std::iter::once(&image).chain(text_path.as_ref()) {
        if let Some(existing) = latest_claiming(&records, path) {
            if existing.sequence != generated.sequence.as_str() {
                return Err(CommandError::PathConflict { path: path.clone() });
            }
        }
    }

    sink.write(&generated.image, &image)
        .map_err(|source| CommandError::ImageWrite {
            path: image.clone(),
            source,
        })?;

    let mut record = Record::new(generated.sequence.as_str(), &image);
    if let Some(text_path) = text_path {
        write_sequence_file(&text_path, &generated.sequence)?;
        record = record.with_sequence_file(text_path);
    }

    store.append(record.clone())?;
    tracing::info!("Barcode saved to {}", image.display());
    Ok(record)
}
