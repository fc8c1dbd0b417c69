use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use bytes::Bytes;
use dashmap::DashMap;
use futures::future::join_all;
use reelfeed_contracts::fetch::{ChunkFetcher, ChunkRequest};
use reelfeed_model::VideoRecord;
use tokio::task::JoinHandle;
use tracing::{debug, trace};
use url::Url;

use super::settings::PrefetchSettings;
use super::store::ChunkStore;

/// What one warm pass did. Produced for logging and tests; callers are not
/// expected to act on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmReport {
    /// Head entries without a fetchable http(s) media URL.
    pub unresolvable: usize,
    /// Head entries already present in the store.
    pub skipped_hits: usize,
    /// Head entries another warm pass is already fetching.
    pub in_flight: usize,
    /// Requests sent to the fetcher.
    pub dispatched: usize,
    /// Requests whose chunk landed in the store.
    pub cached: usize,
    /// Requests that failed and were dropped.
    pub failed: usize,
    /// Entries removed by the maintenance pass that followed.
    pub evicted: usize,
}

struct Inner<F> {
    fetcher: F,
    store: ChunkStore,
    in_flight: DashMap<String, ()>,
    settings: PrefetchSettings,
}

/// Releases the in-flight claims of one warm pass when dropped, including
/// when the pass is cancelled.
struct Claims<'a> {
    in_flight: &'a DashMap<String, ()>,
    urls: Vec<String>,
}

impl Drop for Claims<'_> {
    fn drop(&mut self) {
        for url in &self.urls {
            self.in_flight.remove(url);
        }
    }
}

/// Best-effort leading-chunk cache for the head of a prioritized list.
///
/// Cheap to clone; clones share the store. `warm` never blocks and never
/// fails.
pub struct PrefetchCache<F> {
    inner: Arc<Inner<F>>,
}

impl<F> Clone for PrefetchCache<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F> fmt::Debug for PrefetchCache<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefetchCache")
            .field("fetcher", &std::any::type_name::<F>())
            .field("entries", &self.inner.store.len())
            .field("settings", &self.inner.settings)
            .finish()
    }
}

impl<F> PrefetchCache<F>
where
    F: ChunkFetcher + 'static,
{
    pub fn new(fetcher: F, settings: PrefetchSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                store: ChunkStore::new(),
                in_flight: DashMap::new(),
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &PrefetchSettings {
        &self.inner.settings
    }

    pub fn store(&self) -> &ChunkStore {
        &self.inner.store
    }

    /// Cached leading chunk for `url`, if any.
    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.inner.store.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.inner.store.contains(url)
    }

    /// Warm the head of `videos` in the background. Must be called from
    /// within a tokio runtime.
    pub fn warm(&self, videos: &[VideoRecord]) -> JoinHandle<WarmReport> {
        let (requests, report) = self.inner.plan(videos);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run(requests, report).await })
    }

    /// Same work as [`PrefetchCache::warm`], awaited inline.
    pub async fn warm_now(&self, videos: &[VideoRecord]) -> WarmReport {
        let (requests, report) = self.inner.plan(videos);
        self.inner.run(requests, report).await
    }

    /// Run one maintenance pass now. Returns the number of evicted entries.
    pub fn run_maintenance(&self) -> usize {
        self.inner.maintain()
    }

    /// Start the periodic maintenance task when an interval is configured.
    /// The task stops on its own once every handle to the cache is dropped.
    pub fn spawn_maintenance(&self) -> Option<JoinHandle<()>> {
        let period = Duration::from_millis(self.inner.settings.maintenance_interval_ms?);
        let weak: Weak<Inner<F>> = Arc::downgrade(&self.inner);
        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                inner.maintain();
            }
        }))
    }
}

impl<F> Inner<F>
where
    F: ChunkFetcher,
{
    fn plan(&self, videos: &[VideoRecord]) -> (Vec<ChunkRequest>, WarmReport) {
        let mut report = WarmReport::default();
        if !self.settings.enabled {
            return (Vec::new(), report);
        }

        let mut seen = HashSet::new();
        let mut requests = Vec::new();
        for video in videos.iter().take(self.settings.head_count) {
            let Some(request) = ChunkRequest::for_video(video, self.settings.chunk_size)
            else {
                report.unresolvable += 1;
                continue;
            };
            if !is_fetchable(&request.url) {
                trace!(id = %video.id, url = %request.url, "media url not fetchable");
                report.unresolvable += 1;
                continue;
            }
            if !seen.insert(request.url.clone()) {
                continue;
            }
            if self.store.contains(&request.url) {
                report.skipped_hits += 1;
                continue;
            }
            if self.in_flight.insert(request.url.clone(), ()).is_some() {
                report.in_flight += 1;
                continue;
            }
            requests.push(request);
        }
        (requests, report)
    }

    async fn run(&self, requests: Vec<ChunkRequest>, mut report: WarmReport) -> WarmReport {
        report.dispatched = requests.len();
        let _claims = Claims {
            in_flight: &self.in_flight,
            urls: requests.iter().map(|request| request.url.clone()).collect(),
        };

        let results = join_all(requests.iter().map(|request| async move {
            (request, self.fetcher.fetch_leading(request).await)
        }))
        .await;

        for (request, result) in results {
            match result {
                Ok(chunk) => {
                    self.store.insert(request.url.clone(), chunk);
                    report.cached += 1;
                }
                Err(err) => {
                    debug!(url = %request.url, error = %err, "prefetch failed, skipping");
                    report.failed += 1;
                }
            }
        }

        report.evicted = self.maintain();
        report
    }

    fn maintain(&self) -> usize {
        self.store
            .run_maintenance(self.settings.max_entries, self.settings.low_watermark)
    }
}

fn is_fetchable(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
