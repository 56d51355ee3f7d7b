use std::path::Path;

use dnabar_cli::commands::barcode::{self, SaveOptions};
use dnabar_cli::error::CommandError;
use dnabar_core::BarcodeImage;
use dnabar_render::{PngSink, RenderError, RenderSink};
use dnabar_store::{CorruptPolicy, Record, RecordStore, StoreError};
use pretty_assertions::assert_eq;

/// Sink that always fails, standing in for a full disk
struct FailingSink;

impl RenderSink for FailingSink {
    fn write(&self, _image: &BarcodeImage, _path: &Path) -> Result<(), RenderError> {
        Err(RenderError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}

#[test]
fn test_auto_save_writes_image_text_and_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let generated = barcode::generate("gattaca").unwrap();

    let record = barcode::save(
        &generated,
        &SaveOptions::auto(dir.path()),
        &PngSink::default(),
        &store,
    )
    .unwrap();

    assert!(record.image.is_file());
    let text_path = record.sequence_file.clone().unwrap();
    assert_eq!(std::fs::read_to_string(&text_path).unwrap(), "GATTACA\n");
    assert_eq!(store.load().unwrap(), vec![record]);
}

#[test]
fn test_failed_image_write_leaves_no_trace() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let generated = barcode::generate("ATGC").unwrap();
    let options = SaveOptions::explicit(dir.path().join("out.png"));

    let err = barcode::save(&generated, &options, &FailingSink, &store).unwrap_err();

    assert!(matches!(err, CommandError::ImageWrite { .. }));
    assert!(!dir.path().join("out.sequence.txt").exists());
    assert!(!store.path().exists());
}

#[test]
fn test_explicit_path_conflict_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let target = dir.path().join("picked.png");
    let sink = PngSink::default();

    let first = barcode::generate("AAAA").unwrap();
    barcode::save(&first, &SaveOptions::explicit(&target), &sink, &store).unwrap();

    let second = barcode::generate("CCCC").unwrap();
    let err = barcode::save(&second, &SaveOptions::explicit(&target), &sink, &store).unwrap_err();
    assert!(matches!(err, CommandError::PathConflict { .. }));
    assert_eq!(store.load().unwrap().len(), 1);

    // Re-saving the same sequence to the same path is allowed
    barcode::save(&first, &SaveOptions::explicit(&target), &sink, &store).unwrap();
    assert_eq!(store.load().unwrap().len(), 2);
}

#[test]
fn test_save_two_then_list_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let sink = PngSink::default();
    let options = SaveOptions::auto(dir.path()).without_sequence_file();

    for raw in ["AAAA", "TTTT"] {
        let generated = barcode::generate(raw).unwrap();
        let record = barcode::save(&generated, &options, &sink, &store).unwrap();
        assert!(record.sequence_file.is_none());
    }

    let loaded: Vec<String> = store.load().unwrap().into_iter().map(|r| r.sequence).collect();
    assert_eq!(loaded, vec!["AAAA", "TTTT"]);

    let rows = dnabar_cli::commands::records::list(&store, None).unwrap();
    assert_eq!(rows[0].sequence, "TTTT");
    assert_eq!(rows[1].sequence, "AAAA");
}

#[test]
fn test_image_deleted_after_save_is_still_listed() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let generated = barcode::generate("CATCAT").unwrap();
    let record = barcode::save(
        &generated,
        &SaveOptions::auto(dir.path()),
        &PngSink::default(),
        &store,
    )
    .unwrap();

    std::fs::remove_file(&record.image).unwrap();

    let rows = dnabar_cli::commands::records::list(&store, None).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].to_string().contains("[Image Not Found]"));
}

#[test]
fn test_explicit_txt_path_keeps_image_and_text_apart() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let generated = barcode::generate("ATGC").unwrap();
    let options = SaveOptions::explicit(dir.path().join("picked.txt"));

    let record = barcode::save(&generated, &options, &PngSink::default(), &store).unwrap();

    let text_path = record.sequence_file.clone().unwrap();
    assert_ne!(record.image, text_path);
    let png = std::fs::read(&record.image).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(std::fs::read_to_string(&text_path).unwrap(), "ATGC\n");
}

#[test]
fn test_shared_text_path_for_other_sequence_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let sink = PngSink::default();

    let first = barcode::generate("AAAA").unwrap();
    let options = SaveOptions::explicit(dir.path().join("a.png"));
    let saved = barcode::save(&first, &options, &sink, &store).unwrap();
    let text_path = saved.sequence_file.unwrap();

    // Different image file, same `a.sequence.txt`
    let second = barcode::generate("CCCC").unwrap();
    let options = SaveOptions::explicit(dir.path().join("a.PNG"));
    let err = barcode::save(&second, &options, &sink, &store).unwrap_err();

    match err {
        CommandError::PathConflict { path } => assert_eq!(path, text_path),
        other => panic!("expected a path conflict, got {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&text_path).unwrap(), "AAAA\n");
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn test_conflict_detected_across_relative_and_absolute_paths() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let name = format!("dnabar-conflict-{}.png", std::process::id());
    store
        .append(Record::new("AAAA", Path::new(".").join(&name)))
        .unwrap();

    let target = std::env::current_dir().unwrap().join(&name);
    let generated = barcode::generate("CCCC").unwrap();
    let options = SaveOptions::explicit(&target).without_sequence_file();
    let err = barcode::save(&generated, &options, &PngSink::default(), &store).unwrap_err();

    assert!(matches!(err, CommandError::PathConflict { .. }));
    assert!(!target.exists());
}

#[test]
fn test_saved_paths_are_absolute() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    let generated = barcode::generate("TTAA").unwrap();
    let options = SaveOptions::explicit(dir.path().join(".").join("p.png"));

    let record = barcode::save(&generated, &options, &PngSink::default(), &store).unwrap();

    assert!(record.image.is_absolute());
    assert!(record.sequence_file.unwrap().is_absolute());
}

#[test]
fn test_failed_sequence_file_write_skips_record() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path());
    // A directory where the text file should go makes the write fail
    std::fs::create_dir(dir.path().join("out.sequence.txt")).unwrap();
    let generated = barcode::generate("GGCC").unwrap();
    let options = SaveOptions::explicit(dir.path().join("out.png"));

    let err = barcode::save(&generated, &options, &PngSink::default(), &store).unwrap_err();

    assert!(matches!(err, CommandError::FileWrite { .. }));
    assert!(!store.path().exists());
}

#[test]
fn test_refuse_policy_checks_store_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::in_dir(dir.path()).with_policy(CorruptPolicy::Refuse);
    std::fs::write(store.path(), "{ broken").unwrap();
    let generated = barcode::generate("ACGT").unwrap();
    let options = SaveOptions::explicit(dir.path().join("out.png"));

    let err = barcode::save(&generated, &options, &PngSink::default(), &store).unwrap_err();

    assert!(matches!(err, CommandError::Store(StoreError::Corrupt { .. })));
    assert!(!dir.path().join("out.png").exists());
    assert!(!dir.path().join("out.sequence.txt").exists());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ broken");
}
