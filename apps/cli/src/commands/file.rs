use std::path::Path;

use dnabar_core::Sequence;

use crate::error::CommandError;

/// Read a plain-text or FASTA-like file as raw input. No header stripping.
pub fn read_sequence_file(path: &Path) -> Result<String, CommandError> {
    let content = std::fs::read_to_string(path).map_err(|source| CommandError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Read {} byte(s) from {}", content.len(), path.display());
    Ok(content)
}

/// Write the normalized sequence next to its image
pub fn write_sequence_file(path: &Path, sequence: &Sequence) -> Result<(), CommandError> {
    let map_err = |source| CommandError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(map_err)?;
        }
    }
    std::fs::write(path, format!("{}\n", sequence)).map_err(map_err)
}
