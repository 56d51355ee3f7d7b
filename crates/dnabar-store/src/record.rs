use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved barcode: the sequence, its image and the optional text copy.
///
/// `sequence_file` and `saved_at` are optional so documents written without
/// them still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub sequence: String,
    pub image: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Record {
    pub fn new(sequence: impl Into<String>, image: impl Into<PathBuf>) -> Self {
        Self {
            sequence: sequence.into(),
            image: image.into(),
            sequence_file: None,
            saved_at: Some(Utc::now()),
        }
    }

    pub fn with_sequence_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sequence_file = Some(path.into());
        self
    }

    pub fn image_exists(&self) -> bool {
        self.image.is_file()
    }

    /// Whether `path` is this record's image or sequence file
    pub fn claims(&self, path: &Path) -> bool {
        same_path(&self.image, path)
            || self
                .sequence_file
                .as_deref()
                .is_some_and(|file| same_path(file, path))
    }
}

/// Compare paths after making both absolute, so `./a.png` and `a.png` match
pub fn same_path(a: &Path, b: &Path) -> bool {
    let absolute = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    absolute(a) == absolute(b)
}

/// Whether a record's image is still on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Present,
    Missing,
}

impl std::fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageStatus::Present => write!(f, "present"),
            ImageStatus::Missing => write!(f, "missing"),
        }
    }
}

/// A record as shown in the recent list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listed {
    pub record: Record,
    pub image_status: ImageStatus,
}
