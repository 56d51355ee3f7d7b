use std::path::Path;

use dnabar_render::RenderSink;
use dnabar_store::{Record, RecordStore};

use crate::commands::barcode::{self, Generated, SaveOptions};
use crate::commands::file;
use crate::error::CommandError;

/// Interactive state: the current input text and the last generated barcode.
///
/// Editing or loading input drops the generated barcode, so a save always
/// matches what was generated.
#[derive(Debug, Clone)]
pub struct Session {
    input: String,
    generated: Option<Generated>,
    status: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            generated: None,
            status: "Ready".to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn generated(&self) -> Option<&Generated> {
        self.generated.as_ref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.generated = None;
    }

    pub fn load_file(&mut self, path: &Path) -> Result<(), CommandError> {
        let content = file::read_sequence_file(path)?;
        self.set_input(content.trim());
        self.status = format!("Loaded file: {}", path.display());
        Ok(())
    }

    pub fn generate(&mut self) -> Result<&Generated, CommandError> {
        match barcode::generate(&self.input) {
            Ok(generated) => {
                self.status = "Barcode generated successfully.".to_string();
                Ok(&*self.generated.insert(generated))
            }
            Err(e) => {
                self.generated = None;
                self.status = e.to_string();
                Err(e)
            }
        }
    }

    pub fn save(
        &mut self,
        options: &SaveOptions,
        sink: &dyn RenderSink,
        store: &RecordStore,
    ) -> Result<Record, CommandError> {
        let generated = self
            .generated
            .as_ref()
            .ok_or(CommandError::NothingGenerated)?;
        let record = barcode::save(generated, options, sink, store)?;
        self.status = format!("Barcode saved to {}", record.image.display());
        Ok(record)
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.generated = None;
        self.status = "Cleared.".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnabar_render::PngSink;

    #[test]
    fn test_save_requires_generate() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::in_dir(dir.path());
        let mut session = Session::new();
        session.set_input("ATGC");

        let err = session
            .save(&SaveOptions::auto(dir.path()), &PngSink::default(), &store)
            .unwrap_err();
        assert!(matches!(err, CommandError::NothingGenerated));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_editing_input_drops_generated() {
        let mut session = Session::new();
        session.set_input("ATGC");
        session.generate().unwrap();
        assert!(session.generated().is_some());

        session.set_input("GGGG");
        assert!(session.generated().is_none());
    }

    #[test]
    fn test_failed_generate_clears_previous() {
        let mut session = Session::new();
        session.set_input("ATGC");
        session.generate().unwrap();

        session.set_input("ATGN");
        assert!(session.generate().is_err());
        assert!(session.generated().is_none());
        assert!(session.status().contains("'N' at 3"));
    }

    #[test]
    fn test_load_file_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "  acgt\n").unwrap();

        let mut session = Session::new();
        session.load_file(&path).unwrap();
        assert_eq!(session.input(), "acgt");
        assert!(session.status().starts_with("Loaded file:"));

        session.generate().unwrap();
        session.clear();
        assert_eq!(session.input(), "");
        assert!(session.generated().is_none());
        assert_eq!(session.status(), "Cleared.");
    }
}
