use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reelfeed_config::{Config, ConfigLoad, ConfigLoader};
use reelfeed_contracts::interest::InterestSource;
use reelfeed_core::carousel::CarouselBuffer;
use reelfeed_core::feed::{FeedPlan, FeedPlanner};
use reelfeed_core::personalization::InterestTracker;
use reelfeed_core::prefetch::{HttpChunkFetcher, PrefetchCache};
use reelfeed_core::ranking::{RankOptions, Ranker};
use reelfeed_model::{CarouselDirection, VideoRecord};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::FeedInput;
use crate::fixtures::{load_interactions, load_pool};

pub fn load_config(path: Option<&Path>) -> Result<ConfigLoad> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let load = loader.load().context("configuration rejected")?;
    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => warn!(hint = %hint, "{}", warning.message),
            None => warn!("{}", warning.message),
        }
    }
    Ok(load)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ids(videos: &[VideoRecord]) -> Vec<&str> {
    videos.iter().map(|video| video.id.as_str()).collect()
}

fn planner(config: &Config, input: &FeedInput) -> FeedPlanner<InterestTracker> {
    let tracker = InterestTracker::new(config.interests);
    tracker.load(&input.interests);
    info!(top = ?tracker.top_interests(), "interests loaded");
    FeedPlanner::new(Ranker::new(config.ranking, tracker))
}

fn run_plan(config: &Config, input: &FeedInput) -> Result<FeedPlan> {
    let pool = load_pool(&input.pool)?;
    let interactions = load_interactions(input.interactions.as_deref())?;
    let mut rng = StdRng::seed_from_u64(input.seed);
    let shuffle = input.shuffle || config.shuffle_on_start;
    Ok(planner(config, input).plan(&pool, &interactions, &config.layout, &mut rng, shuffle))
}

pub fn rank(config: &Config, input: &FeedInput, scores: bool) -> Result<()> {
    let pool = load_pool(&input.pool)?;
    let interactions = load_interactions(input.interactions.as_deref())?;
    let mut rng = StdRng::seed_from_u64(input.seed);
    let options = RankOptions {
        shuffle_unseen: input.shuffle || config.shuffle_on_start,
    };
    let planner = planner(config, input);

    if scores {
        let entries = planner
            .ranker()
            .rank_entries(&pool, &interactions, &mut rng, options);
        let rows: Vec<Value> = entries
            .iter()
            .map(|entry| {
                json!({
                    "id": entry.video.id.as_str(),
                    "score": entry.score,
                    "seen": entry.seen,
                })
            })
            .collect();
        return print_json(&Value::Array(rows));
    }

    let ranked = planner.ranker().rank(&pool, &interactions, &mut rng, options);
    print_json(&json!(ids(&ranked)))
}

pub fn plan(config: &Config, input: &FeedInput) -> Result<()> {
    let plan = run_plan(config, input)?;
    let sections: Vec<Value> = plan
        .allocation
        .iter()
        .map(|batch| {
            json!({
                "id": batch.section.id.as_str(),
                "kind": batch.section.kind,
                "videos": ids(&batch.videos),
                "recycled": batch.recycled,
            })
        })
        .collect();
    print_json(&json!({
        "ranked": ids(&plan.ranked),
        "sections": sections,
    }))
}

pub async fn warm(config: &Config, input: &FeedInput) -> Result<()> {
    let plan = run_plan(config, input)?;
    let cache = PrefetchCache::new(HttpChunkFetcher::new(), config.prefetch.clone());
    let report = plan
        .warm_head(&cache)
        .await
        .context("prefetch task panicked")?;

    let cached: Vec<Value> = cache
        .store()
        .keys()
        .into_iter()
        .map(|url| {
            let bytes = cache.get(&url).map(|chunk| chunk.len()).unwrap_or(0);
            json!({ "url": url, "bytes": bytes })
        })
        .collect();
    print_json(&json!({
        "dispatched": report.dispatched,
        "cached": report.cached,
        "failed": report.failed,
        "skipped_hits": report.skipped_hits,
        "in_flight": report.in_flight,
        "unresolvable": report.unresolvable,
        "entries": cached,
    }))
}

pub fn carousel(
    config: &Config,
    pool: &Path,
    frames: usize,
    direction: CarouselDirection,
    viewport: Option<f32>,
) -> Result<()> {
    let source: Arc<[VideoRecord]> = load_pool(pool)?.into();
    let settings = config.carousel.with_direction(direction);
    let viewport = viewport.unwrap_or(settings.item_stride * 3.0);
    let mut buffer = CarouselBuffer::new(source, settings);
    let start = buffer.scroll_offset();

    let now = Instant::now();
    let mut wraps = 0usize;
    for _ in 0..frames {
        if buffer.frame(now).wrapped() {
            wraps += 1;
        }
    }

    print_json(&json!({
        "items": buffer.source_list().len(),
        "replicas": buffer.replicas(),
        "surface": buffer.tripled_list().len(),
        "replica_width": buffer.replica_width(),
        "start_offset": start,
        "offset": buffer.scroll_offset(),
        "wraps": wraps,
        "visible": ids(buffer.visible_items(viewport)),
    }))
}

pub fn show_config(load: &ConfigLoad) -> Result<()> {
    info!(source = ?load.source, "effective configuration");
    let rendered = toml::to_string_pretty(&load.config).context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
