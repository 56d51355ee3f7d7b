//! Content-derived file names for saved barcodes.
//!
//! A stem looks like `barcode_12_GATTACAG_3f9a0c21d4e8b7a6`: the length, a
//! readable prefix, then 64 bits of the SHA-256 of the sequence.

use sha2::{Digest, Sha256};

use crate::sequence::Sequence;

/// Number of leading alphanumeric characters kept for recognition
pub const PREFIX_LEN: usize = 8;

/// Hex digits of the digest kept in the file name
pub const ID_HEX_LEN: usize = 16;

/// Fixed-width identifier derived from the sequence content
pub fn content_id(sequence: &str) -> String {
    let digest = Sha256::digest(sequence.as_bytes());
    digest
        .iter()
        .take(ID_HEX_LEN / 2)
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub fn readable_prefix(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(PREFIX_LEN)
        .collect()
}

/// File stem (no extension) for an automatically named barcode
pub fn file_stem(sequence: &Sequence) -> String {
    format!(
        "barcode_{}_{}_{}",
        sequence.len(),
        readable_prefix(sequence.as_str()),
        content_id(sequence.as_str())
    )
}
