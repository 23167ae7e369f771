//! Preference-aware reordering of the candidate list.

use pocketdrop_preferences::PreferenceStore;

/// Reorders `candidates` so the stored preferred address (if any, and if
/// still a member) comes first.
///
/// The move is a stable partition: every other candidate keeps its original
/// relative order. Returns the moved address as the second element, or `None`
/// when no stored preference applies, in which case the input is returned
/// unchanged. Idempotent.
pub fn rank(candidates: Vec<String>, store: &PreferenceStore) -> (Vec<String>, Option<String>) {
    let Some(preferred) = store.load() else {
        return (candidates, None);
    };

    if !candidates.contains(&preferred) {
        tracing::debug!(%preferred, "stored preference not among current candidates");
        return (candidates, None);
    }

    let mut ranked = Vec::with_capacity(candidates.len());
    ranked.push(preferred.clone());
    ranked.extend(candidates.into_iter().filter(|ip| *ip != preferred));

    (ranked, Some(preferred))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(preferred: Option<&str>) -> (tempfile::TempDir, PreferenceStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        if let Some(ip) = preferred {
            assert!(store.save(ip));
        }
        (dir, store)
    }

    fn ips(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn moves_preferred_to_front() {
        let (_dir, store) = store_with(Some("192.168.1.9"));
        let (ranked, moved) = rank(ips(&["192.168.1.5", "192.168.1.9"]), &store);
        assert_eq!(ranked, ips(&["192.168.1.9", "192.168.1.5"]));
        assert_eq!(moved.as_deref(), Some("192.168.1.9"));
    }

    #[test]
    fn preserves_relative_order_of_others() {
        let (_dir, store) = store_with(Some("10.0.0.3"));
        let (ranked, _) = rank(ips(&["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]), &store);
        assert_eq!(ranked, ips(&["10.0.0.3", "10.0.0.1", "10.0.0.2", "10.0.0.4"]));
    }

    #[test]
    fn absent_preference_leaves_input_unchanged() {
        let (_dir, store) = store_with(None);
        let input = ips(&["192.168.1.5", "192.168.1.9"]);
        let (ranked, moved) = rank(input.clone(), &store);
        assert_eq!(ranked, input);
        assert_eq!(moved, None);
    }

    #[test]
    fn preference_not_in_list_leaves_input_unchanged() {
        let (_dir, store) = store_with(Some("10.0.0.1"));
        let input = ips(&["192.168.1.5", "192.168.1.9"]);
        let (ranked, moved) = rank(input.clone(), &store);
        assert_eq!(ranked, input);
        assert_eq!(moved, None);
    }

    #[test]
    fn rank_is_idempotent() {
        let (_dir, store) = store_with(Some("192.168.1.9"));
        let (once, _) = rank(ips(&["192.168.1.5", "192.168.1.9", "10.0.0.1"]), &store);
        let (twice, moved) = rank(once.clone(), &store);
        assert_eq!(once, twice);
        assert_eq!(moved.as_deref(), Some("192.168.1.9"));
    }

    #[test]
    fn roundtrip_save_then_rank_puts_saved_first() {
        let (_dir, store) = store_with(None);
        assert!(store.save("172.16.9.9"));
        let (ranked, moved) = rank(ips(&["10.0.0.1", "172.16.9.9", "192.168.1.1"]), &store);
        assert_eq!(ranked[0], "172.16.9.9");
        assert_eq!(moved.as_deref(), Some("172.16.9.9"));
    }
}
