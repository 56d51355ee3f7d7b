//! Flat, printable views of barcodes and saved records.

use dnabar_core::BaseCounts;
use dnabar_store::{ImageStatus, Listed};
use serde::Serialize;

use crate::commands::barcode::Generated;

/// Characters of a sequence shown in listings
pub const PREVIEW_LEN: usize = 60;

#[derive(Debug, Clone, Serialize)]
pub struct BarcodeSummary {
    pub sequence: String,
    pub length: usize,
    pub counts: BaseCounts,
    pub gc_fraction: f64,
    pub colors: Vec<String>,
}

impl From<&Generated> for BarcodeSummary {
    fn from(generated: &Generated) -> Self {
        let counts = generated.sequence.base_counts();
        Self {
            sequence: generated.sequence.to_string(),
            length: generated.sequence.len(),
            counts,
            gc_fraction: counts.gc_fraction(),
            colors: generated.image.colors().iter().map(|c| c.hex()).collect(),
        }
    }
}

impl std::fmt::Display for BarcodeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sequence: {}", preview(&self.sequence))?;
        writeln!(
            f,
            "Length: {} bp (A {}, T {}, G {}, C {}), GC {:.1}%",
            self.length,
            self.counts.a,
            self.counts.t,
            self.counts.g,
            self.counts.c,
            self.gc_fraction * 100.0
        )?;
        write!(f, "Blocks: {}", self.colors.len())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub sequence: String,
    pub length: usize,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    pub image_status: ImageStatus,
}

impl From<&Listed> for RecordRow {
    fn from(listed: &Listed) -> Self {
        let record = &listed.record;
        Self {
            sequence: record.sequence.clone(),
            length: record.sequence.chars().count(),
            image: record.image.display().to_string(),
            sequence_file: record
                .sequence_file
                .as_ref()
                .map(|p| p.display().to_string()),
            saved_at: record
                .saved_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
            image_status: listed.image_status,
        }
    }
}

impl std::fmt::Display for RecordRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sequence: {}", preview(&self.sequence))?;
        match self.image_status {
            ImageStatus::Present => write!(f, "  Image: {}", self.image)?,
            ImageStatus::Missing => write!(f, "  Image: {} [Image Not Found]", self.image)?,
        }
        if let Some(path) = &self.sequence_file {
            write!(f, "\n  Sequence file: {}", path)?;
        }
        if let Some(saved_at) = &self.saved_at {
            write!(f, "\n  Saved: {}", saved_at)?;
        }
        Ok(())
    }
}

/// First `PREVIEW_LEN` characters, with `...` when cut
pub fn preview(sequence: &str) -> String {
    let mut chars = sequence.chars();
    let head: String = chars.by_ref().take(PREVIEW_LEN).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short() {
        assert_eq!(preview("ATGC"), "ATGC");
    }

    #[test]
    fn test_preview_truncates() {
        let long = "A".repeat(PREVIEW_LEN + 5);
        let shown = preview(&long);
        assert_eq!(shown.len(), PREVIEW_LEN + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn test_summary_from_generated() {
        let generated = crate::commands::barcode::generate("GGCA").unwrap();
        let summary = BarcodeSummary::from(&generated);
        assert_eq!(summary.length, 4);
        assert_eq!(summary.colors, vec!["#0000ff", "#0000ff", "#ffff00", "#ff0000"]);
        assert!((summary.gc_fraction - 0.75).abs() < f64::EPSILON);
    }
}
