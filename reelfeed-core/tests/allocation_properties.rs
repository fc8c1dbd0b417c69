//! Uniqueness and completeness of section allocation.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reelfeed_core::allocation::allocate;
use reelfeed_model::{
    SectionDescriptor, SectionId, SectionKind, VideoId, VideoKind, VideoRecord,
};

fn pool(shorts: usize, longs: usize) -> Vec<VideoRecord> {
    let shorts = (0..shorts).map(|i| {
        VideoRecord::new(VideoId::new(format!("s{i}")).unwrap(), VideoKind::ShortForm)
    });
    let longs = (0..longs).map(|i| {
        VideoRecord::new(VideoId::new(format!("l{i}")).unwrap(), VideoKind::LongForm)
    });
    shorts.chain(longs).collect()
}

fn home_layout() -> Vec<SectionDescriptor> {
    [
        SectionKind::SingleLong,
        SectionKind::ShortsGrid,
        SectionKind::ShortsSliderLeft,
        SectionKind::LongSlider,
        SectionKind::ShortsGrid,
        SectionKind::ShortsSliderRight,
    ]
    .into_iter()
    .enumerate()
    .map(|(i, kind)| SectionDescriptor::new(SectionId::new(format!("section-{i}")).unwrap(), kind))
    .collect()
}

#[test]
fn no_id_in_two_sections_when_supply_covers_demand() {
    // Demand: 28 shorts, 11 longs.
    let ranked = pool(28, 11);
    for seed in 0..20 {
        let result = allocate(&ranked, &home_layout(), &mut StdRng::seed_from_u64(seed));
        let mut owners: HashMap<&str, &SectionId> = HashMap::new();
        for batch in result.iter() {
            assert_eq!(batch.recycled, 0);
            for video in &batch.videos {
                if let Some(previous) = owners.insert(video.id.as_str(), &batch.section.id) {
                    panic!("{} in {} and {}", video.id, previous, batch.section.id);
                }
            }
        }
    }
}

#[test]
fn every_section_filled_when_kind_has_enough_items() {
    // Not enough for uniqueness across sections, enough for every single one.
    let ranked = pool(10, 10);
    let result = allocate(&ranked, &home_layout(), &mut StdRng::seed_from_u64(4));
    for batch in result.iter() {
        assert_eq!(batch.videos.len(), batch.section.demand().count);
        let mut ids: Vec<&str> = batch.videos.iter().map(|v| v.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), batch.videos.len(), "repeat inside {}", batch.section.id);
        assert!(batch.videos.iter().all(|v| v.kind == batch.section.demand().kind));
    }
}

#[test]
fn unique_portion_ignores_the_rng() {
    let ranked = pool(12, 4);
    let a = allocate(&ranked, &home_layout(), &mut StdRng::seed_from_u64(1));
    let b = allocate(&ranked, &home_layout(), &mut StdRng::seed_from_u64(2));
    for (left, right) in a.iter().zip(b.iter()) {
        assert_eq!(left.unique(), right.unique());
        assert_eq!(left.videos.len(), right.videos.len());
    }
}
