use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::record::{ImageStatus, Listed, Record};
use crate::StoreError;

/// Store directory relative to the working directory
pub const DEFAULT_STORE_DIR: &str = "saved_barcodes";

/// Name of the JSON document inside the store directory
pub const STORE_FILE_NAME: &str = "saved_barcodes.json";

/// What `append` does when the existing document cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// Copy the unreadable document aside, then start a fresh one
    #[default]
    Backup,
    /// Fail the append and leave the document untouched
    Refuse,
}

impl std::str::FromStr for CorruptPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "backup" => Ok(CorruptPolicy::Backup),
            "refuse" => Ok(CorruptPolicy::Refuse),
            other => Err(format!("unknown corrupt policy: {other}")),
        }
    }
}

/// State of the backing document at read time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentState {
    Missing,
    Valid,
    Corrupt { reason: String },
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub records: Vec<Record>,
    pub state: DocumentState,
}

/// JSON-backed catalog of saved barcodes, oldest first on disk.
///
/// Every append rewrites the whole document through a temp file and a
/// rename. There is no locking: two processes appending at the same time
/// can lose each other's entries.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    policy: CorruptPolicy,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, policy: CorruptPolicy) -> Self {
        Self {
            path: path.into(),
            policy,
        }
    }

    /// Store using the standard file name inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(STORE_FILE_NAME), CorruptPolicy::default())
    }

    pub fn with_policy(mut self, policy: CorruptPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> CorruptPolicy {
        self.policy
    }

    /// Fresh, timestamped name for a copy of an unreadable document.
    ///
    /// Never returns a path that already exists, so earlier backups survive.
    pub fn backup_path(&self) -> PathBuf {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
        let mut candidate = sibling_with_suffix(&self.path, &format!("{stamp}.corrupt"));
        let mut n = 1;
        while candidate.exists() {
            candidate = sibling_with_suffix(&self.path, &format!("{stamp}-{n}.corrupt"));
            n += 1;
        }
        candidate
    }

    /// Read the document and report whether it was missing, valid or corrupt.
    ///
    /// Only genuine I/O failures are errors; a corrupt document yields no
    /// records and `DocumentState::Corrupt`.
    pub fn inspect(&self) -> Result<Loaded, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No record store at {}", self.path.display());
                return Ok(Loaded {
                    records: Vec::new(),
                    state: DocumentState::Missing,
                });
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Vec<Record>>(&bytes) {
            Ok(records) => {
                tracing::debug!(
                    "Loaded {} record(s) from {}",
                    records.len(),
                    self.path.display()
                );
                Ok(Loaded {
                    records,
                    state: DocumentState::Valid,
                })
            }
            Err(e) => Ok(Loaded {
                records: Vec::new(),
                state: DocumentState::Corrupt {
                    reason: e.to_string(),
                },
            }),
        }
    }

    /// All records, oldest first. Missing or corrupt documents read as empty.
    pub fn load(&self) -> Result<Vec<Record>, StoreError> {
        let loaded = self.inspect()?;
        if let DocumentState::Corrupt { reason } = &loaded.state {
            tracing::warn!(
                "Record store {} is unreadable, treating as empty: {}",
                self.path.display(),
                reason
            );
        }
        Ok(loaded.records)
    }

    /// Records an `append` would build on, read before any file is written.
    ///
    /// Fails with `StoreError::Corrupt` under `CorruptPolicy::Refuse`, so
    /// callers can stop before producing files that would go unrecorded.
    pub fn prepare_append(&self) -> Result<Vec<Record>, StoreError> {
        let loaded = self.inspect()?;
        match loaded.state {
            DocumentState::Corrupt { reason } if self.policy == CorruptPolicy::Refuse => {
                Err(StoreError::Corrupt {
                    path: self.path.clone(),
                    reason,
                })
            }
            _ => Ok(loaded.records),
        }
    }

    /// Add one record after all existing ones and rewrite the document.
    pub fn append(&self, record: Record) -> Result<(), StoreError> {
        let loaded = self.inspect()?;

        if let DocumentState::Corrupt { reason } = loaded.state {
            match self.policy {
                CorruptPolicy::Refuse => {
                    return Err(StoreError::Corrupt {
                        path: self.path.clone(),
                        reason,
                    });
                }
                CorruptPolicy::Backup => {
                    let backup = self.backup_path();
                    fs::copy(&self.path, &backup).map_err(|source| StoreError::Write {
                        path: backup.clone(),
                        source,
                    })?;
                    tracing::warn!(
                        "Record store {} was unreadable ({}); copied to {} and starting fresh",
                        self.path.display(),
                        reason,
                        backup.display()
                    );
                }
            }
        }

        let mut records = loaded.records;
        records.push(record);
        self.write_all(&records)?;

        tracing::debug!(
            "Record store {} now holds {} record(s)",
            self.path.display(),
            records.len()
        );
        Ok(())
    }

    /// Records newest first, each tagged with whether its image still exists
    pub fn list_recent(&self) -> Result<Vec<Listed>, StoreError> {
        let records = self.load()?;
        Ok(records
            .into_iter()
            .rev()
            .map(|record| {
                let image_status = if record.image_exists() {
                    ImageStatus::Present
                } else {
                    tracing::warn!("Saved image {} is missing", record.image.display());
                    ImageStatus::Missing
                };
                Listed {
                    record,
                    image_status,
                }
            })
            .collect())
    }

    fn write_all(&self, records: &[Record]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(records)?;
        write_atomically(&self.path, json.as_bytes())
    }
}

/// Most recent record in `records` whose image or sequence file is `path`
pub fn latest_claiming<'a>(records: &'a [Record], path: &Path) -> Option<&'a Record> {
    records.iter().rev().find(|r| r.claims(path))
}

/// Write `bytes` to a sibling temp file, fsync, then rename over `path`.
///
/// The temp file is removed again if any step after its creation fails.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let temp_path = sibling_with_suffix(path, "tmp");

    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(source) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Write {
            path: temp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
