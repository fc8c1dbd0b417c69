use std::sync::Arc;

use rand::Rng;
use reelfeed_contracts::fetch::ChunkFetcher;
use reelfeed_contracts::interest::InterestSource;
use reelfeed_model::{InteractionState, SectionDescriptor, VideoRecord};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::allocation::{AllocationResult, allocate};
use crate::prefetch::{PrefetchCache, WarmReport};
use crate::ranking::{RankOptions, Ranker};

/// Output of one feed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPlan {
    /// Full ranked pool. Shared so carousels can identity-compare it.
    pub ranked: Arc<[VideoRecord]>,
    pub allocation: AllocationResult,
}

impl FeedPlan {
    /// Hand the ranked feed to the prefetch cache, which warms its head.
    pub fn warm_head<F>(&self, cache: &PrefetchCache<F>) -> JoinHandle<WarmReport>
    where
        F: ChunkFetcher + 'static,
    {
        debug!(ranked = self.ranked.len(), "warming feed head");
        cache.warm(&self.ranked)
    }
}

#[derive(Debug, Clone)]
pub struct FeedPlanner<I> {
    ranker: Ranker<I>,
}

impl<I: InterestSource> FeedPlanner<I> {
    pub fn new(ranker: Ranker<I>) -> Self {
        Self { ranker }
    }

    pub fn ranker(&self) -> &Ranker<I> {
        &self.ranker
    }

    /// Rank `pool` and distribute it over `layout`. A single rng drives both
    /// the optional unseen shuffle and the allocator's backfill.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        pool: &[VideoRecord],
        interactions: &InteractionState,
        layout: &[SectionDescriptor],
        rng: &mut R,
        shuffle: bool,
    ) -> FeedPlan {
        let options = RankOptions {
            shuffle_unseen: shuffle,
        };
        let ranked: Arc<[VideoRecord]> =
            self.ranker.rank(pool, interactions, rng, options).into();
        let allocation = allocate(&ranked, layout, rng);
        debug!(
            pool = pool.len(),
            ranked = ranked.len(),
            sections = allocation.len(),
            shuffle,
            "planned feed"
        );
        FeedPlan { ranked, allocation }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::RankerSettings;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reelfeed_contracts::interest::NoInterests;
    use crate::prefetch::PrefetchSettings;
    use async_trait::async_trait;
    use bytes::Bytes;
    use reelfeed_contracts::fetch::{ChunkFetchError, ChunkRequest};
    use reelfeed_model::{SectionId, SectionKind, VideoId, VideoKind};

    struct EchoFetcher;

    #[async_trait]
    impl ChunkFetcher for EchoFetcher {
        async fn fetch_leading(&self, request: &ChunkRequest) -> Result<Bytes, ChunkFetchError> {
            Ok(Bytes::from(request.url.clone()))
        }
    }

    fn pool() -> Vec<VideoRecord> {
        let mut pool = Vec::new();
        for i in 0..6 {
            pool.push(VideoRecord::new(
                VideoId::new(format!("s{i}")).unwrap(),
                VideoKind::ShortForm,
            ));
        }
        for i in 0..3 {
            pool.push(VideoRecord::new(
                VideoId::new(format!("l{i}")).unwrap(),
                VideoKind::LongForm,
            ));
        }
        pool
    }

    fn layout() -> Vec<SectionDescriptor> {
        vec![
            SectionDescriptor::new(SectionId::new("hero").unwrap(), SectionKind::SingleLong),
            SectionDescriptor::new(SectionId::new("grid").unwrap(), SectionKind::ShortsGrid),
        ]
    }

    #[test]
    fn plan_ranks_then_allocates() {
        let planner = FeedPlanner::new(Ranker::new(RankerSettings::deterministic(), NoInterests));
        let mut rng = StdRng::seed_from_u64(3);
        let plan = planner.plan(&pool(), &InteractionState::default(), &layout(), &mut rng, false);

        assert_eq!(plan.ranked.len(), 9);
        let hero = SectionId::new("hero").unwrap();
        let grid = SectionId::new("grid").unwrap();
        assert_eq!(plan.allocation.videos(&hero)[0].id.as_str(), "l0");
        let grid_ids: Vec<&str> =
            plan.allocation.videos(&grid).iter().map(|v| v.id.as_str()).collect();
        assert_eq!(grid_ids, vec!["s0", "s1", "s2", "s3"]);
    }

    #[tokio::test]
    async fn warm_head_prefetches_the_top_of_the_ranked_feed() {
        let planner = FeedPlanner::new(Ranker::new(RankerSettings::deterministic(), NoInterests));
        let pool: Vec<VideoRecord> = pool()
            .into_iter()
            .map(|video| {
                let url = format!("https://cdn.example/{}.mp4", video.id);
                video.with_media_url(url)
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let plan = planner.plan(&pool, &InteractionState::default(), &layout(), &mut rng, false);

        let cache = PrefetchCache::new(EchoFetcher, PrefetchSettings::default());
        let report = plan.warm_head(&cache).await.unwrap();

        assert_eq!(report.cached, 4);
        assert!(cache.contains("https://cdn.example/s3.mp4"));
        assert!(!cache.contains("https://cdn.example/s4.mp4"));
    }

    #[test]
    fn same_seed_same_plan() {
        let planner = FeedPlanner::new(Ranker::new(RankerSettings::default(), NoInterests));
        let plan = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            planner.plan(&pool(), &InteractionState::default(), &layout(), &mut rng, true)
        };
        assert_eq!(plan(11), plan(11));
    }
}
