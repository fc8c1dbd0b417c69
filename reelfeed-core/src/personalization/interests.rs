use std::cmp::Reverse;
use std::collections::HashMap;

use parking_lot::RwLock;
use reelfeed_contracts::interest::InterestSource;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, SettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct InterestSettings {
    /// Categories reported by `top_interests`.
    pub max_top: usize,
}

impl Default for InterestSettings {
    fn default() -> Self {
        Self { max_top: 3 }
    }
}

impl InterestSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_top == 0 {
            return Err(SettingsError::Zero { field: "max_top" });
        }
        Ok(())
    }
}

/// One tracked category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterestEntry {
    pub category: String,
    pub weight: u32,
    /// Logical time of the last touch; larger is more recent.
    pub touched: u64,
}

/// Persistable tracker state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterestSnapshot {
    pub entries: Vec<InterestEntry>,
}

#[derive(Debug, Default)]
struct TrackerState {
    weights: HashMap<String, (u32, u64)>,
    clock: u64,
}

impl TrackerState {
    fn touch(&mut self, category: String) {
        self.clock += 1;
        let clock = self.clock;
        let slot = self.weights.entry(category).or_insert((0, clock));
        slot.0 = slot.0.saturating_add(1);
        slot.1 = clock;
    }

    /// Touch an ordered list so its first element ends up most recent.
    fn touch_ranked<I>(&mut self, categories: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let normalized: Vec<String> =
            categories.into_iter().filter_map(|c| normalize(c.as_ref())).collect();
        for category in normalized.into_iter().rev() {
            self.touch(category);
        }
    }

    fn ordered(&self) -> Vec<InterestEntry> {
        let mut entries: Vec<InterestEntry> = self
            .weights
            .iter()
            .map(|(category, &(weight, touched))| InterestEntry {
                category: category.clone(),
                weight,
                touched,
            })
            .collect();
        entries.sort_by_key(|e| (Reverse(e.weight), Reverse(e.touched)));
        entries
    }
}

fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// The user's interest profile.
///
/// Lifecycle: [`load`](Self::load) once on start from local data,
/// [`merge_remote`](Self::merge_remote) when the remote profile arrives,
/// [`record`](Self::record) whenever the user shows a new interest. Reads
/// go through [`InterestSource`].
#[derive(Debug, Default)]
pub struct InterestTracker {
    settings: InterestSettings,
    state: RwLock<TrackerState>,
}

impl InterestTracker {
    pub fn new(settings: InterestSettings) -> Self {
        Self {
            settings,
            state: RwLock::new(TrackerState::default()),
        }
    }

    pub fn from_snapshot(settings: InterestSettings, snapshot: InterestSnapshot) -> Self {
        let tracker = Self::new(settings);
        tracker.restore(snapshot);
        tracker
    }

    /// Replace all state with locally persisted interests, strongest first.
    pub fn load<I>(&self, local: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut state = self.state.write();
        *state = TrackerState::default();
        state.touch_ranked(local);
        trace!(count = state.weights.len(), "loaded local interests");
    }

    /// Fold in interests from the remote profile, strongest first. Known
    /// categories are reinforced.
    pub fn merge_remote<I>(&self, remote: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut state = self.state.write();
        state.touch_ranked(remote);
        trace!(count = state.weights.len(), "merged remote interests");
    }

    /// Register or reinforce one interest. Blank input is ignored.
    pub fn record(&self, category: &str) {
        if let Some(category) = normalize(category) {
            self.state.write().touch(category);
        }
    }

    pub fn len(&self) -> usize {
        self.state.read().weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().weights.is_empty()
    }

    pub fn snapshot(&self) -> InterestSnapshot {
        InterestSnapshot {
            entries: self.state.read().ordered(),
        }
    }

    pub fn restore(&self, snapshot: InterestSnapshot) {
        let mut state = self.state.write();
        *state = TrackerState::default();
        for entry in snapshot.entries {
            let Some(category) = normalize(&entry.category) else {
                continue;
            };
            state.clock = state.clock.max(entry.touched);
            let slot = state.weights.entry(category).or_insert((0, entry.touched));
            slot.0 = slot.0.max(entry.weight);
            slot.1 = slot.1.max(entry.touched);
        }
    }
}

impl InterestSource for InterestTracker {
    fn top_interests(&self) -> Vec<String> {
        self.state
            .read()
            .ordered()
            .into_iter()
            .take(self.settings.max_top)
            .map(|entry| entry.category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_keeps_given_priority() {
        let tracker = InterestTracker::default();
        tracker.load(["Comedy", "music", "  Sports ", "news"]);
        assert_eq!(tracker.top_interests(), vec!["comedy", "music", "sports"]);
    }

    #[test]
    fn weight_beats_recency() {
        let tracker = InterestTracker::default();
        tracker.load(["comedy", "music"]);
        tracker.merge_remote(["music", "travel"]);
        // music: 2, comedy 1 (older), travel 1 (newer than comedy).
        assert_eq!(tracker.top_interests(), vec!["music", "travel", "comedy"]);
    }

    #[test]
    fn ties_broken_by_most_recent_touch() {
        let tracker = InterestTracker::new(InterestSettings { max_top: 2 });
        tracker.record("a");
        tracker.record("b");
        tracker.record("c");
        assert_eq!(tracker.top_interests(), vec!["c", "b"]);
    }

    #[test]
    fn blank_input_is_ignored() {
        let tracker = InterestTracker::default();
        tracker.record("   ");
        tracker.load(["", "x"]);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn snapshot_restores_identical_ordering() {
        let tracker = InterestTracker::default();
        tracker.load(["a", "b"]);
        tracker.record("c");
        tracker.record("b");

        let json = serde_json::to_string(&tracker.snapshot()).unwrap();
        let snapshot: InterestSnapshot = serde_json::from_str(&json).unwrap();
        let restored = InterestTracker::from_snapshot(InterestSettings::default(), snapshot);

        assert_eq!(restored.top_interests(), tracker.top_interests());
        restored.record("d");
        assert_eq!(restored.top_interests()[0], "b");
        assert_eq!(restored.top_interests()[1], "d");
    }
}
