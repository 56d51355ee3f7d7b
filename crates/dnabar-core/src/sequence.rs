use serde::Serialize;
use thiserror::Error;

use crate::base::Base;
use crate::encode::{encode, BarcodeImage};

/// A symbol that is not part of the recognised alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidBase {
    /// Character offset within the trimmed input
    pub position: usize,
    pub character: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Sequence is empty")]
    EmptySequence,
    #[error(
        "Sequence must contain only A, T, G, C characters (found {})",
        describe_invalid(.invalid)
    )]
    InvalidCharacter { invalid: Vec<InvalidBase> },
}

fn describe_invalid(invalid: &[InvalidBase]) -> String {
    const SHOWN: usize = 5;
    let mut parts: Vec<String> = invalid
        .iter()
        .take(SHOWN)
        .map(|b| format!("{:?} at {}", b.character, b.position))
        .collect();
    if invalid.len() > SHOWN {
        parts.push(format!("and {} more", invalid.len() - SHOWN));
    }
    parts.join(", ")
}

/// A validated, uppercase DNA sequence. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Sequence(String);

impl Sequence {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bases(&self) -> impl Iterator<Item = Base> + '_ {
        self.0.chars().filter_map(Base::from_char)
    }

    pub fn encode(&self) -> BarcodeImage {
        encode(&self.0)
    }

    pub fn base_counts(&self) -> BaseCounts {
        let mut counts = BaseCounts::default();
        for base in self.bases() {
            match base {
                Base::A => counts.a += 1,
                Base::T => counts.t += 1,
                Base::G => counts.g += 1,
                Base::C => counts.c += 1,
            }
        }
        counts
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Sequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Sequence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BaseCounts {
    pub a: usize,
    pub t: usize,
    pub g: usize,
    pub c: usize,
}

impl BaseCounts {
    pub fn total(&self) -> usize {
        self.a + self.t + self.g + self.c
    }

    /// GC content as a fraction (0.0 to 1.0)
    pub fn gc_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.g + self.c) as f64 / total as f64
    }
}

/// Trim, check and uppercase raw user input.
///
/// Every character is inspected, so the error lists all offending positions
/// rather than only the first.
pub fn validate(raw: &str) -> Result<Sequence, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptySequence);
    }

    let invalid: Vec<InvalidBase> = trimmed
        .chars()
        .enumerate()
        .filter(|(_, c)| Base::from_char(*c).is_none())
        .map(|(position, character)| InvalidBase {
            position,
            character,
        })
        .collect();

    if !invalid.is_empty() {
        return Err(ValidationError::InvalidCharacter { invalid });
    }

    // Only ASCII ATGC remains at this point
    Ok(Sequence(trimmed.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_uppercases() {
        let seq = validate("atgc").unwrap();
        assert_eq!(seq.as_str(), "ATGC");
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn test_validate_trims_surrounding_whitespace() {
        let seq = validate("  \n\tGATTACA \r\n").unwrap();
        assert_eq!(seq.as_str(), "GATTACA");
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate(""), Err(ValidationError::EmptySequence));
        assert_eq!(validate("   "), Err(ValidationError::EmptySequence));
        assert_eq!(validate("\n\t"), Err(ValidationError::EmptySequence));
    }

    #[test]
    fn test_validate_reports_last_character() {
        let err = validate("atgcx").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCharacter {
                invalid: vec![InvalidBase {
                    position: 4,
                    character: 'x'
                }]
            }
        );
    }

    #[test]
    fn test_validate_reports_every_position() {
        let err = validate("NAT-GC ").unwrap_err();
        match err {
            ValidationError::InvalidCharacter { invalid } => {
                let positions: Vec<usize> = invalid.iter().map(|b| b.position).collect();
                assert_eq!(positions, vec![0, 3]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_internal_whitespace_is_invalid() {
        assert!(matches!(
            validate("ATG\nCAT"),
            Err(ValidationError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_fasta_header_is_not_stripped() {
        assert!(validate(">seq1\nATGC").is_err());
    }

    #[test]
    fn test_error_message_lists_characters() {
        let err = validate("AXTY").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Sequence must contain only A, T, G, C characters (found 'X' at 1, 'Y' at 3)"
        );
    }

    #[test]
    fn test_base_counts() {
        let counts = validate("GGCCAT").unwrap().base_counts();
        assert_eq!(counts, BaseCounts { a: 1, t: 1, g: 2, c: 2 });
        assert!((counts.gc_fraction() - 4.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let seq: Sequence = "acgt".parse().unwrap();
        assert_eq!(serde_json::to_string(&seq).unwrap(), "\"ACGT\"");
    }
}
