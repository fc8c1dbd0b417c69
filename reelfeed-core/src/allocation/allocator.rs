use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use reelfeed_model::{SectionDescriptor, SectionId, VideoId, VideoRecord};
use tracing::{debug, trace};

/// Videos assigned to one section, split into first-pass picks and
/// recycled backfill.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBatch {
    pub section: SectionDescriptor,
    pub videos: Vec<VideoRecord>,
    /// Number of trailing entries in `videos` that came from the recycling
    /// fallback rather than from unused content.
    pub recycled: usize,
}

impl SectionBatch {
    pub fn unique(&self) -> &[VideoRecord] {
        &self.videos[..self.videos.len() - self.recycled]
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Section id to batch mapping, iterable in descriptor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationResult {
    batches: Vec<SectionBatch>,
}

impl AllocationResult {
    pub fn get(&self, id: &SectionId) -> Option<&SectionBatch> {
        self.batches.iter().find(|batch| &batch.section.id == id)
    }

    pub fn videos(&self, id: &SectionId) -> &[VideoRecord] {
        self.get(id).map(|batch| batch.videos.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionBatch> {
        self.batches.iter()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Assigns ranked videos to sections in descriptor order.
///
/// Earlier sections get first claim on top-ranked content. The "used" set
/// lives for this call only. When a section's kind runs out of unused
/// videos, the remainder is backfilled from the kind's full pool in random
/// order; backfilled picks are not marked used and never repeat within the
/// same batch.
pub fn allocate<R: Rng + ?Sized>(
    ranked: &[VideoRecord],
    sections: &[SectionDescriptor],
    rng: &mut R,
) -> AllocationResult {
    let mut used: HashSet<&VideoId> = HashSet::new();
    let mut batches = Vec::with_capacity(sections.len());

    for section in sections {
        let demand = section.demand();
        let kind_pool: Vec<&VideoRecord> =
            ranked.iter().filter(|video| video.kind == demand.kind).collect();

        let mut picked: Vec<&VideoRecord> = Vec::with_capacity(demand.count);
        for &video in &kind_pool {
            if picked.len() == demand.count {
                break;
            }
            if used.insert(&video.id) {
                picked.push(video);
            }
        }
        let unique = picked.len();

        if unique < demand.count && !kind_pool.is_empty() {
            let in_batch: HashSet<&VideoId> =
                picked.iter().map(|video| &video.id).collect();
            let mut candidates: Vec<&VideoRecord> = Vec::new();
            let mut offered: HashSet<&VideoId> = HashSet::new();
            for &video in &kind_pool {
                if !in_batch.contains(&video.id) && offered.insert(&video.id) {
                    candidates.push(video);
                }
            }
            candidates.shuffle(rng);
            picked.extend(candidates.into_iter().take(demand.count - unique));
            debug!(
                section = %section.id,
                kind = %demand.kind,
                unique,
                recycled = picked.len() - unique,
                wanted = demand.count,
                "section pool exhausted, recycled content"
            );
        }

        trace!(section = %section.id, assigned = picked.len(), "allocated section");
        batches.push(SectionBatch {
            section: section.clone(),
            recycled: picked.len() - unique,
            videos: picked.into_iter().cloned().collect(),
        });
    }

    AllocationResult { batches }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use reelfeed_model::{SectionKind, VideoKind};

    fn video(raw: &str, kind: VideoKind) -> VideoRecord {
        VideoRecord::new(VideoId::new(raw).unwrap(), kind)
    }

    fn section(raw: &str, kind: SectionKind) -> SectionDescriptor {
        SectionDescriptor::new(SectionId::new(raw).unwrap(), kind)
    }

    fn ids(videos: &[VideoRecord]) -> Vec<&str> {
        videos.iter().map(|v| v.id.as_str()).collect()
    }

    #[test]
    fn second_grid_recycles_once_shorts_run_out() {
        let ranked: Vec<_> = ["s1", "s2", "s3", "s4", "s5", "s6"]
            .into_iter()
            .map(|id| video(id, VideoKind::ShortForm))
            .collect();
        let sections = vec![
            section("grid-a", SectionKind::ShortsGrid),
            section("grid-b", SectionKind::ShortsGrid),
        ];

        let result = allocate(&ranked, &sections, &mut StdRng::seed_from_u64(9));
        let first = result.get(&SectionId::new("grid-a").unwrap()).unwrap();
        let second = result.get(&SectionId::new("grid-b").unwrap()).unwrap();

        assert_eq!(ids(&first.videos), vec!["s1", "s2", "s3", "s4"]);
        assert_eq!(first.recycled, 0);

        assert_eq!(second.videos.len(), 4);
        assert_eq!(ids(second.unique()), vec!["s5", "s6"]);
        assert_eq!(second.recycled, 2);
        let recycled = &second.videos[2..];
        assert!(
            recycled
                .iter()
                .all(|v| ["s1", "s2", "s3", "s4"].contains(&v.id.as_str()))
        );
        assert_ne!(recycled[0].id, recycled[1].id);
    }

    #[test]
    fn kinds_do_not_compete() {
        let ranked = vec![
            video("l1", VideoKind::LongForm),
            video("s1", VideoKind::ShortForm),
            video("l2", VideoKind::LongForm),
        ];
        let sections = vec![
            section("hero", SectionKind::SingleLong),
            section("grid", SectionKind::ShortsGrid),
            section("hero-2", SectionKind::SingleLong),
        ];
        let result = allocate(&ranked, &sections, &mut StdRng::seed_from_u64(0));
        assert_eq!(ids(result.videos(&SectionId::new("hero").unwrap())), vec!["l1"]);
        assert_eq!(ids(result.videos(&SectionId::new("hero-2").unwrap())), vec!["l2"]);
        // Only one short exists, so the grid cannot be completed.
        assert_eq!(ids(result.videos(&SectionId::new("grid").unwrap())), vec!["s1"]);
    }

    #[test]
    fn starved_kind_yields_empty_batch() {
        let ranked = vec![video("s1", VideoKind::ShortForm)];
        let sections = vec![section("slider", SectionKind::LongSlider)];
        let result = allocate(&ranked, &sections, &mut StdRng::seed_from_u64(0));
        let batch = result.iter().next().unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.recycled, 0);
    }

    #[test]
    fn empty_layout_yields_empty_result() {
        let ranked = vec![video("s1", VideoKind::ShortForm)];
        let result = allocate(&ranked, &[], &mut StdRng::seed_from_u64(0));
        assert!(result.is_empty());
    }

    #[test]
    fn unique_portion_is_deterministic() {
        let ranked: Vec<_> = (0..30)
            .map(|i| video(&format!("s{i}"), VideoKind::ShortForm))
            .collect();
        let sections = vec![
            section("left", SectionKind::ShortsSliderLeft),
            section("grid", SectionKind::ShortsGrid),
            section("right", SectionKind::ShortsSliderRight),
        ];
        let a = allocate(&ranked, &sections, &mut StdRng::seed_from_u64(1));
        let b = allocate(&ranked, &sections, &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
    }
}
