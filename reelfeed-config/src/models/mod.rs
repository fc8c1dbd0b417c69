use std::path::PathBuf;

use reelfeed_core::carousel::CarouselConfig;
use reelfeed_core::personalization::InterestSettings;
use reelfeed_core::prefetch::PrefetchSettings;
use reelfeed_core::ranking::RankerSettings;
use reelfeed_model::{SectionDescriptor, SectionId, SectionKind};
use serde::{Deserialize, Serialize};

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

const DEFAULT_LAYOUT: &[(&str, SectionKind)] = &[
    ("hero", SectionKind::SingleLong),
    ("shorts-grid", SectionKind::ShortsGrid),
    ("shorts-left", SectionKind::ShortsSliderLeft),
    ("long-slider", SectionKind::LongSlider),
    ("shorts-grid-2", SectionKind::ShortsGrid),
    ("shorts-right", SectionKind::ShortsSliderRight),
];

/// Home screen used when no layout is configured.
pub fn default_layout() -> Vec<SectionDescriptor> {
    DEFAULT_LAYOUT
        .iter()
        .filter_map(|(id, kind)| {
            SectionId::new(*id)
                .ok()
                .map(|id| SectionDescriptor::new(id, *kind))
        })
        .collect()
}

/// Complete engine configuration. Every field has a default, so partial
/// files only need to name what they change.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Shuffle the unseen partition on the first ranking pass.
    pub shuffle_on_start: bool,
    /// Score bonuses, tie-break jitter and the watched-progress threshold.
    pub ranking: RankerSettings,
    /// Stride, speed and drag tuning shared by every carousel. Slider
    /// sections override `direction` from their kind.
    pub carousel: CarouselConfig,
    /// Head size, chunk size and store bounds for leading-chunk warming.
    pub prefetch: PrefetchSettings,
    /// How many interest categories feed the ranker.
    pub interests: InterestSettings,
    /// Ordered home sections.
    pub layout: Vec<SectionDescriptor>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shuffle_on_start: false,
            ranking: RankerSettings::default(),
            carousel: CarouselConfig::default(),
            prefetch: PrefetchSettings::default(),
            interests: InterestSettings::default(),
            layout: default_layout(),
        }
    }
}

impl Config {
    /// Carousel tuning for one section, with the section's own autoplay
    /// direction applied. `None` for sections that do not autoplay.
    pub fn carousel_for(&self, section: &SectionDescriptor) -> Option<CarouselConfig> {
        section
            .kind
            .carousel_direction()
            .map(|direction| self.carousel.with_direction(direction))
    }
}
