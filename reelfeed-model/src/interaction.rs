//! Mirror of the user's interaction state.
//!
//! The engine only reads this; the persisted local store owns mutation. The
//! mutators here exist so that store (and tests) can build snapshots.

use crate::ids::VideoId;
use std::collections::HashSet;

/// One watch-progress observation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchEntry {
    pub id: VideoId,
    pub progress: f32,
}

/// Ordered mapping of video id to playback progress in `[0, 1]`.
///
/// Iteration order is most-recent-update last: recording progress for an id
/// that is already present moves it to the end.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<WatchEntry>", into = "Vec<WatchEntry>")
)]
pub struct WatchHistory {
    entries: Vec<WatchEntry>,
}

impl WatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: VideoId, progress: f32) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.entries.retain(|entry| entry.id != id);
        self.entries.push(WatchEntry { id, progress });
    }

    pub fn progress(&self, id: &VideoId) -> Option<f32> {
        self.entries
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.progress)
    }

    /// Entries from least to most recently updated.
    pub fn iter(&self) -> impl Iterator<Item = (&VideoId, f32)> {
        self.entries.iter().map(|entry| (&entry.id, entry.progress))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<WatchEntry>> for WatchHistory {
    fn from(entries: Vec<WatchEntry>) -> Self {
        let mut history = WatchHistory::new();
        for entry in entries {
            history.record(entry.id, entry.progress);
        }
        history
    }
}

impl From<WatchHistory> for Vec<WatchEntry> {
    fn from(history: WatchHistory) -> Self {
        history.entries
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InteractionState {
    pub liked_ids: HashSet<VideoId>,
    pub disliked_ids: HashSet<VideoId>,
    pub saved_ids: HashSet<VideoId>,
    pub watch_history: WatchHistory,
    pub downloaded_ids: HashSet<VideoId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn like(&mut self, id: VideoId) {
        self.disliked_ids.remove(&id);
        self.liked_ids.insert(id);
    }

    pub fn dislike(&mut self, id: VideoId) {
        self.liked_ids.remove(&id);
        self.disliked_ids.insert(id);
    }

    pub fn save(&mut self, id: VideoId) {
        self.saved_ids.insert(id);
    }

    pub fn mark_downloaded(&mut self, id: VideoId) {
        self.downloaded_ids.insert(id);
    }

    pub fn record_progress(&mut self, id: VideoId, progress: f32) {
        self.watch_history.record(id, progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> VideoId {
        VideoId::new(raw).unwrap()
    }

    #[test]
    fn re_recording_moves_entry_to_most_recent() {
        let mut history = WatchHistory::new();
        history.record(id("a"), 0.2);
        history.record(id("b"), 0.4);
        history.record(id("a"), 0.9);

        let order: Vec<&str> = history.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(history.progress(&id("a")), Some(0.9));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn progress_is_clamped() {
        let mut history = WatchHistory::new();
        history.record(id("a"), 4.0);
        history.record(id("b"), -1.0);
        history.record(id("c"), f32::NAN);
        assert_eq!(history.progress(&id("a")), Some(1.0));
        assert_eq!(history.progress(&id("b")), Some(0.0));
        assert_eq!(history.progress(&id("c")), Some(0.0));
    }

    #[test]
    fn like_and_dislike_are_exclusive() {
        let mut state = InteractionState::new();
        state.like(id("a"));
        state.dislike(id("a"));
        assert!(!state.liked_ids.contains(&id("a")));
        assert!(state.disliked_ids.contains(&id("a")));
    }
}
