// Tests for the terminal transcript log

use openword_client::view::{is_rtl, TranscriptLog};

#[test]
fn test_log_appends_per_translation() {
    let mut log = TranscriptLog::new(false);

    log.on_translation("Hola");
    log.on_translation("a todos");

    assert_eq!(log.entries().len(), 2);
    assert_eq!(log.entries()[0].translation, "Hola");
    assert_eq!(log.entries()[1].translation, "a todos");
}

#[test]
fn test_source_text_attached_when_enabled() {
    let mut log = TranscriptLog::new(true);

    log.on_transcript("Hello everyone");
    let entry = log.on_translation("Hola a todos");

    assert_eq!(entry.transcript.as_deref(), Some("Hello everyone"));
}

#[test]
fn test_source_text_omitted_when_disabled() {
    let mut log = TranscriptLog::new(false);

    log.on_transcript("Hello everyone");
    let entry = log.on_translation("Hola a todos");

    assert!(entry.transcript.is_none());
}

#[test]
fn test_toggle_source() {
    let mut log = TranscriptLog::new(false);

    assert!(log.toggle_source());
    assert!(log.include_source());
    assert!(!log.toggle_source());
}

#[test]
fn test_clear_resets_log_and_pending_source() {
    let mut log = TranscriptLog::new(true);
    log.on_transcript("Hello");
    log.on_translation("Hola");

    log.clear();

    assert!(log.entries().is_empty());
    let entry = log.on_translation("Bonjour");
    assert!(entry.transcript.is_none(), "source from before clear must not leak");
}

#[test]
fn test_rtl_detection() {
    assert!(is_rtl("ar"));
    assert!(is_rtl("he"));
    assert!(!is_rtl("es"));
    assert!(!is_rtl("en"));
}
