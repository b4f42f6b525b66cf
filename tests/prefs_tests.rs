// Tests for the durable preference store

use openword_client::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
use tempfile::TempDir;

#[test]
fn test_memory_store_roundtrip() {
    let store = MemoryPreferences::new();
    assert!(store.language().is_none());

    store.set_language("es", "Spanish").unwrap();
    store.set_service_code("1234").unwrap();

    assert_eq!(store.language().as_deref(), Some("es"));
    assert_eq!(store.language_name().as_deref(), Some("Spanish"));
    assert_eq!(store.service_code().as_deref(), Some("1234"));
}

#[test]
fn test_file_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");

    {
        let store = FilePreferences::open(&path).unwrap();
        store.set_language("es", "Spanish").unwrap();
        store.set_service_code("1234").unwrap();
    }

    // A new instance reads the values back, like a page reload would
    let store = FilePreferences::open(&path).unwrap();
    assert_eq!(store.language().as_deref(), Some("es"));
    assert_eq!(store.language_name().as_deref(), Some("Spanish"));
    assert_eq!(store.service_code().as_deref(), Some("1234"));
}

#[test]
fn test_file_store_uses_storage_key_names() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");

    let store = FilePreferences::open(&path).unwrap();
    store.set_language("es", "Spanish").unwrap();
    store.set_service_code("1234").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"language\""));
    assert!(raw.contains("\"languageName\""));
    assert!(raw.contains("\"serviceCode\""));
}

#[test]
fn test_missing_file_starts_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.json");

    let store = FilePreferences::open(&path).unwrap();
    assert!(store.language().is_none());
    assert!(store.language_name().is_none());
    assert!(store.service_code().is_none());
}

#[test]
fn test_malformed_file_is_treated_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");
    std::fs::write(&path, "not json at all").unwrap();

    let store = FilePreferences::open(&path).unwrap();
    assert!(store.language().is_none());

    // And writes still go through
    store.set_language("fr", "French").unwrap();
    let store = FilePreferences::open(&path).unwrap();
    assert_eq!(store.language().as_deref(), Some("fr"));
}

#[test]
fn test_last_write_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.json");

    let store = FilePreferences::open(&path).unwrap();
    store.set_language("es", "Spanish").unwrap();
    store.set_language("de", "German").unwrap();

    assert_eq!(store.language().as_deref(), Some("de"));
    assert_eq!(store.language_name().as_deref(), Some("German"));
}

#[test]
fn test_nested_directory_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("prefs.json");

    let store = FilePreferences::open(&path).unwrap();
    store.set_service_code("1234").unwrap();

    assert!(path.exists());
}
