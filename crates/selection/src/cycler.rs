//! Wrap-around cursor over the ranked candidate list.

use pocketdrop_preferences::PreferenceStore;

/// Placeholder used when a cycler is built from an empty list, so the cursor
/// always points at something.
const LOOPBACK_PLACEHOLDER: &str = "127.0.0.1";

/// Cursor-based selection over the ranked candidates.
///
/// Index 0 is "currently advertised" right after ranking. `next`/`previous`
/// wrap modulo the list length and can never fail or go out of bounds. The
/// cycler owns the cursor exclusively; callers that share it across tasks
/// wrap the whole cycler in one mutex.
#[derive(Debug, Clone)]
pub struct Cycler {
    candidates: Vec<String>,
    cursor: usize,
}

impl Cycler {
    /// Builds a cycler with the cursor at index 0.
    ///
    /// An empty candidate list is replaced by the loopback placeholder; the
    /// collector already guarantees non-empty output, this guard only keeps
    /// the invariant local.
    pub fn new(candidates: Vec<String>) -> Self {
        let candidates = if candidates.is_empty() {
            vec![LOOPBACK_PLACEHOLDER.to_string()]
        } else {
            candidates
        };
        Self { candidates, cursor: 0 }
    }

    /// The currently advertised address.
    pub fn current(&self) -> &str {
        &self.candidates[self.cursor]
    }

    /// The cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of candidates (always >= 1).
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false`; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// All candidates in ranked order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Advances to the next candidate, wrapping at the end.
    pub fn next(&mut self) -> &str {
        self.cursor = (self.cursor + 1) % self.candidates.len();
        self.current()
    }

    /// Steps back to the previous candidate, wrapping at the start.
    pub fn previous(&mut self) -> &str {
        self.cursor = (self.cursor + self.candidates.len() - 1) % self.candidates.len();
        self.current()
    }

    /// Persists the current selection as the preferred address.
    ///
    /// Does not move the cursor. Returns `save`'s status; a failed write is
    /// operator feedback, not a crash.
    pub fn mark_current_preferred(&self, store: &PreferenceStore) -> bool {
        let ip = self.current();
        let saved = store.save(ip);
        if saved {
            tracing::info!(%ip, "marked current address as preferred");
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycler3() -> Cycler {
        Cycler::new(vec![
            "10.0.0.1".to_string(),
            "172.16.0.1".to_string(),
            "192.168.1.1".to_string(),
        ])
    }

    #[test]
    fn starts_at_index_zero() {
        let c = cycler3();
        assert_eq!(c.cursor(), 0);
        assert_eq!(c.current(), "10.0.0.1");
    }

    #[test]
    fn next_wraps_around() {
        let mut c = cycler3();
        assert_eq!(c.next(), "172.16.0.1");
        assert_eq!(c.next(), "192.168.1.1");
        assert_eq!(c.next(), "10.0.0.1");
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn previous_from_zero_lands_on_last() {
        let mut c = cycler3();
        assert_eq!(c.previous(), "192.168.1.1");
        assert_eq!(c.cursor(), 2);
    }

    #[test]
    fn single_element_cycling_is_a_noop() {
        let mut c = Cycler::new(vec!["192.168.1.5".to_string()]);
        assert_eq!(c.next(), "192.168.1.5");
        assert_eq!(c.previous(), "192.168.1.5");
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn empty_input_falls_back_to_loopback() {
        let c = Cycler::new(Vec::new());
        assert_eq!(c.len(), 1);
        assert_eq!(c.current(), LOOPBACK_PLACEHOLDER);
    }

    #[test]
    fn mark_current_preferred_saves_without_moving_cursor() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));

        let mut c = cycler3();
        c.next();
        assert!(c.mark_current_preferred(&store));
        assert_eq!(c.cursor(), 1);
        assert_eq!(store.load().as_deref(), Some("172.16.0.1"));
    }

    #[test]
    fn mark_current_preferred_reports_save_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Directory as target path forces the write to fail.
        let store = PreferenceStore::new(dir.path());
        let c = cycler3();
        assert!(!c.mark_current_preferred(&store));
    }

    #[test]
    fn ranked_then_cycled_preference_is_initial_placement_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert!(store.save("192.168.1.1"));

        let (ranked, _) = crate::rank(
            vec![
                "10.0.0.1".to_string(),
                "172.16.0.1".to_string(),
                "192.168.1.1".to_string(),
            ],
            &store,
        );
        let mut c = Cycler::new(ranked);
        assert_eq!(c.current(), "192.168.1.1");
        // Cycling away is allowed; the preference does not pin the cursor.
        assert_eq!(c.next(), "10.0.0.1");
    }
}
