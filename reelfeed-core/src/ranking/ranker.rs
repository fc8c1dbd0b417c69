use std::cmp::Reverse;
use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use ordered_float::OrderedFloat;
use rand::Rng;
use rand::seq::SliceRandom;
use reelfeed_contracts::interest::InterestSource;
use reelfeed_model::{InteractionState, VideoId, VideoRecord};
use tracing::trace;

use super::settings::RankerSettings;

/// Per-pass ranking switches.
///
/// The tie-breaker is keyed on the video id and the ranker's session seed, so
/// passes without a refresh reproduce the previous order. A refresh draws a
/// new session seed from the caller's rng.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankOptions {
    /// Permute the unseen partition before scoring. Only set this on an
    /// explicit user refresh; otherwise the feed must stay stable across
    /// re-renders.
    pub shuffle_unseen: bool,
}

impl RankOptions {
    pub fn refresh() -> Self {
        Self {
            shuffle_unseen: true,
        }
    }
}

/// A video with its transient score for one ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<'a> {
    pub video: &'a VideoRecord,
    pub score: f32,
    pub seen: bool,
}

/// Orders a video pool into a personalized feed.
///
/// Output is always `unseen ++ seen`, each half sorted by descending score
/// with ties keeping their pre-sort order. Duplicate ids in the pool are
/// collapsed to their first occurrence.
#[derive(Debug)]
pub struct Ranker<I> {
    settings: RankerSettings,
    interests: I,
    session: AtomicU64,
}

impl<I: Clone> Clone for Ranker<I> {
    fn clone(&self) -> Self {
        Self {
            settings: self.settings,
            interests: self.interests.clone(),
            session: AtomicU64::new(self.session_seed()),
        }
    }
}

impl<I> Ranker<I> {
    /// Seed of the current tie-break session.
    pub fn session_seed(&self) -> u64 {
        self.session.load(Ordering::Relaxed)
    }
}

impl<I: InterestSource> Ranker<I> {
    pub fn new(settings: RankerSettings, interests: I) -> Self {
        Self::with_session_seed(settings, interests, 0)
    }

    pub fn with_session_seed(settings: RankerSettings, interests: I, seed: u64) -> Self {
        Self {
            settings,
            interests,
            session: AtomicU64::new(seed),
        }
    }

    pub fn settings(&self) -> &RankerSettings {
        &self.settings
    }

    /// Whether the user has liked, disliked, or meaningfully watched `id`.
    pub fn is_seen(&self, id: &VideoId, interactions: &InteractionState) -> bool {
        interactions.liked_ids.contains(id)
            || interactions.disliked_ids.contains(id)
            || interactions
                .watch_history
                .progress(id)
                .is_some_and(|p| p > self.settings.seen_progress_threshold)
    }

    pub fn rank<R: Rng + ?Sized>(
        &self,
        pool: &[VideoRecord],
        interactions: &InteractionState,
        rng: &mut R,
        options: RankOptions,
    ) -> Vec<VideoRecord> {
        self.rank_entries(pool, interactions, rng, options)
            .into_iter()
            .map(|entry| entry.video.clone())
            .collect()
    }

    pub fn rank_entries<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a [VideoRecord],
        interactions: &InteractionState,
        rng: &mut R,
        options: RankOptions,
    ) -> Vec<RankedEntry<'a>> {
        if pool.is_empty() {
            return Vec::new();
        }

        let mut identities: HashSet<&VideoId> = HashSet::with_capacity(pool.len());
        let mut unseen: Vec<&VideoRecord> = Vec::with_capacity(pool.len());
        let mut seen: Vec<&VideoRecord> = Vec::new();
        for video in pool {
            if !identities.insert(&video.id) {
                continue;
            }
            if self.is_seen(&video.id, interactions) {
                seen.push(video);
            } else {
                unseen.push(video);
            }
        }

        if options.shuffle_unseen {
            unseen.shuffle(rng);
            self.session.store(rng.random(), Ordering::Relaxed);
        }

        let interests = normalized_interests(&self.interests);
        let session = self.session_seed();
        let unseen_len = unseen.len();
        let seen_len = seen.len();

        let mut ranked = self.score_partition(unseen, false, &interests, session);
        ranked.extend(self.score_partition(seen, true, &interests, session));

        trace!(
            unseen = unseen_len,
            seen = seen_len,
            interests = interests.len(),
            shuffled = options.shuffle_unseen,
            "ranked video pool"
        );

        ranked
    }

    fn score_partition<'a>(
        &self,
        videos: Vec<&'a VideoRecord>,
        seen: bool,
        interests: &HashSet<String>,
        session: u64,
    ) -> Vec<RankedEntry<'a>> {
        let mut entries: Vec<RankedEntry<'a>> = videos
            .into_iter()
            .map(|video| RankedEntry {
                video,
                score: self.score(video, interests, session),
                seen,
            })
            .collect();
        // `sort_by_key` is stable, so equal scores keep pool order.
        entries.sort_by_key(|entry| Reverse(OrderedFloat(entry.score)));
        entries
    }

    fn score(&self, video: &VideoRecord, interests: &HashSet<String>, session: u64) -> f32 {
        let mut score = 0.0;
        let category = normalize(&video.category);
        if !category.is_empty() && interests.contains(&category) {
            score += self.settings.interest_bonus;
        }
        if video.trending {
            score += self.settings.trending_bonus;
        }
        if self.settings.tie_break_jitter > 0.0 {
            score += tie_break(&video.id, session) * self.settings.tie_break_jitter;
        }
        score
    }
}

/// Uniform value in `[0, 1)` fixed by `(id, session)`.
fn tie_break(id: &VideoId, session: u64) -> f32 {
    let mut hasher = DefaultHasher::new();
    session.hash(&mut hasher);
    id.hash(&mut hasher);
    // Top 24 bits fit an f32 mantissa exactly.
    (hasher.finish() >> 40) as f32 / (1u64 << 24) as f32
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn normalized_interests<I: InterestSource>(source: &I) -> HashSet<String> {
    source
        .top_interests()
        .iter()
        .map(|interest| normalize(interest))
        .filter(|interest| !interest.is_empty())
        .collect()
}
