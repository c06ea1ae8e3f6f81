use std::fs;

use signbridge::services::video_index::GlossVideoIndex;

#[test]
fn test_lookup_is_case_insensitive_and_checks_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("videos")).unwrap();
    fs::write(dir.path().join("videos/hola.mp4"), b"").unwrap();

    let json = r#"{
        "HOLA": { "path": "videos/hola.mp4" },
        "CASA": { "path": "videos/casa.mp4" },
        "VACIO": {}
    }"#;
    let index = GlossVideoIndex::from_json(dir.path(), json).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.lookup("hola"), Some(dir.path().join("videos/hola.mp4")));
    assert_eq!(index.lookup("CASA"), None, "indexed but missing on disk");
    assert_eq!(index.lookup("VACIO"), None);
    assert_eq!(index.lookup("PERRO"), None);
    assert!(index.contains("casa"));
}

#[test]
fn test_unreadable_index_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    let missing = GlossVideoIndex::load(dir.path(), &dir.path().join("nope.json"));
    assert!(missing.is_empty());

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "not json").unwrap();
    assert!(GlossVideoIndex::load(dir.path(), &bad).is_empty());
}

#[test]
fn test_load_reads_index_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("gracias.mp4"), b"").unwrap();
    let path = dir.path().join("index.json");
    fs::write(&path, r#"{"GRACIAS": {"path": "gracias.mp4"}}"#).unwrap();

    let index = GlossVideoIndex::load(dir.path(), &path);

    assert_eq!(index.lookup("Gracias"), Some(dir.path().join("gracias.mp4")));
}
