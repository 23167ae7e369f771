fn main() {
    println!("Run `cargo test -p prefs-compat` to execute preference-record compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pocketdrop_preferences::{PreferenceRecord, PreferenceStore};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// A record exactly as earlier PocketDrop builds wrote it.
    fn fixture_path() -> PathBuf {
        fixtures_dir().join("preference_record.json")
    }

    #[test]
    fn loads_record_written_by_earlier_builds() {
        let store = PreferenceStore::new(fixture_path());
        assert_eq!(store.load().as_deref(), Some("192.168.1.9"));
    }

    #[test]
    fn fixture_parses_as_preference_record() {
        let data = std::fs::read_to_string(fixture_path()).unwrap();
        let record: PreferenceRecord = serde_json::from_str(&data).unwrap();
        assert_eq!(record.preferred_ip, "192.168.1.9");
        assert_eq!(record.last_updated, "2024-06-01T12:34:56.789012");
    }

    #[test]
    fn saved_record_keeps_the_fixture_key_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert!(store.save("10.0.0.7"));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        let fixture: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(fixture_path()).unwrap()).unwrap();

        let keys = |v: &serde_json::Value| -> Vec<String> {
            let mut k: Vec<String> = v.as_object().unwrap().keys().cloned().collect();
            k.sort();
            k
        };
        assert_eq!(keys(&saved), keys(&fixture));
    }

    #[test]
    fn saved_record_roundtrips_through_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert!(store.save("10.0.0.7"));
        assert_eq!(store.load().as_deref(), Some("10.0.0.7"));
    }
}
