use contactbook_core::{
    Contact, ContactFields, ContactStore, JsonFileStore, LoadSource, StoreConfig, StoreError,
};
use std::fs;

fn contact(name: &str, phone: &str) -> Contact {
    Contact::new(ContactFields {
        name: name.to_string(),
        phone: phone.to_string(),
        ..ContactFields::default()
    })
    .unwrap()
}

#[test]
fn save_then_load_reproduces_collection_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::from_config(StoreConfig::in_dir(dir.path()));
    let contacts = vec![
        contact("Ada", "1"),
        contact("Grace", ""),
        contact("Linus", "3"),
    ];

    store.save(&contacts).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, contacts);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("absent.json"));

    let report = store.load_report().unwrap();
    assert!(report.contacts.is_empty());
    assert_eq!(report.source, LoadSource::Missing);
}

#[test]
fn corrupt_file_loads_empty_and_reports_recovery() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, "{ not json ]").unwrap();
    let store = JsonFileStore::new(&path);

    assert!(store.load().unwrap().is_empty());
    let report = store.load_report().unwrap();
    assert_eq!(report.source, LoadSource::RecoveredFromCorruption);
}

#[test]
fn wrong_shape_and_empty_file_count_as_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let store = JsonFileStore::new(&path);

    fs::write(&path, r#"{"name": "Ada"}"#).unwrap();
    assert_eq!(
        store.load_report().unwrap().source,
        LoadSource::RecoveredFromCorruption
    );

    fs::write(&path, "").unwrap();
    assert_eq!(
        store.load_report().unwrap().source,
        LoadSource::RecoveredFromCorruption
    );

    fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    assert_eq!(
        store.load_report().unwrap().source,
        LoadSource::RecoveredFromCorruption
    );
}

#[test]
fn legacy_four_field_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(
        &path,
        r#"[
    {"name": "John", "phone": "555", "email": "", "address": ""},
    {"name": "Jo Ann", "phone": "", "email": "jo@x.y", "address": "Main St"}
]"#,
    )
    .unwrap();
    let store = JsonFileStore::new(&path);

    let report = store.load_report().unwrap();
    assert_eq!(report.source, LoadSource::Loaded);
    assert_eq!(report.contacts.len(), 2);
    assert_eq!(report.contacts[0].name, "John");
    assert_eq!(report.contacts[1].address, "Main St");
    assert_ne!(report.contacts[0].id, report.contacts[1].id);
}

#[test]
fn save_keeps_empty_fields_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let store = JsonFileStore::new(&path);

    store.save(&[contact("Ada", "")]).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&text).unwrap();
    let record = &raw.as_array().unwrap()[0];
    for key in ["id", "name", "phone", "email", "address"] {
        assert!(record.get(key).is_some(), "missing key `{key}`");
    }
    assert_eq!(record["phone"], "");
}

#[test]
fn save_overwrites_previous_content_completely() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    let store = JsonFileStore::new(&path);

    store
        .save(&[contact("Ada", "1"), contact("Grace", "2")])
        .unwrap();
    let only = vec![contact("Linus", "3")];
    store.save(&only).unwrap();

    assert_eq!(store.load().unwrap(), only);
    assert!(!dir.path().join("contacts.json.tmp").exists());
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("contacts.json");
    let store = JsonFileStore::new(&path);

    store.save(&[contact("Ada", "1")]).unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn pretty_and_compact_output_both_load() {
    let dir = tempfile::tempdir().unwrap();
    let contacts = vec![contact("Ada", "1")];

    let pretty = JsonFileStore::new(dir.path().join("pretty.json"));
    pretty.save(&contacts).unwrap();
    let pretty_text = fs::read_to_string(pretty.path()).unwrap();
    assert!(pretty_text.contains("\n        \"name\": \"Ada\""));

    let mut config = StoreConfig::new(dir.path().join("compact.json"));
    config.pretty = false;
    let compact = JsonFileStore::from_config(config);
    compact.save(&contacts).unwrap();
    assert!(!fs::read_to_string(compact.path()).unwrap().contains('\n'));

    assert_eq!(pretty.load().unwrap(), compact.load().unwrap());
}

#[test]
fn unreadable_path_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory in place of the file is an I/O failure, not corruption.
    let store = JsonFileStore::new(dir.path());

    let err = store.load().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }));
}
