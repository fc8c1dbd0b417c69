//! Declarative home-screen layout.
//!
//! A layout is an ordered list of [`SectionDescriptor`]s. Each section kind
//! fixes the type and number of videos it renders, so the allocator never
//! needs to inspect renderer-specific configuration.

use crate::ids::SectionId;
use crate::video::VideoKind;

/// Autoplay direction of a horizontal carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CarouselDirection {
    /// Scroll offset grows; content travels leftwards on screen.
    #[default]
    Forward,
    /// Scroll offset shrinks; content travels rightwards on screen.
    Backward,
}

impl CarouselDirection {
    pub fn sign(self) -> f32 {
        match self {
            CarouselDirection::Forward => 1.0,
            CarouselDirection::Backward => -1.0,
        }
    }
}

/// What a section needs from the ranked pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionDemand {
    pub kind: VideoKind,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SectionKind {
    /// A single featured long-form video.
    SingleLong,
    /// 2x2 grid of shorts.
    ShortsGrid,
    /// Horizontal slider of long-form videos.
    LongSlider,
    /// Auto-scrolling shorts carousel moving towards the left edge.
    ShortsSliderLeft,
    /// Auto-scrolling shorts carousel moving towards the right edge.
    ShortsSliderRight,
}

impl SectionKind {
    pub const fn demand(self) -> SectionDemand {
        match self {
            SectionKind::SingleLong => SectionDemand {
                kind: VideoKind::LongForm,
                count: 1,
            },
            SectionKind::ShortsGrid => SectionDemand {
                kind: VideoKind::ShortForm,
                count: 4,
            },
            SectionKind::LongSlider => SectionDemand {
                kind: VideoKind::LongForm,
                count: 10,
            },
            SectionKind::ShortsSliderLeft | SectionKind::ShortsSliderRight => {
                SectionDemand {
                    kind: VideoKind::ShortForm,
                    count: 10,
                }
            }
        }
    }

    /// Carousel direction for auto-scrolling sliders, `None` for static
    /// sections.
    pub const fn carousel_direction(self) -> Option<CarouselDirection> {
        match self {
            SectionKind::ShortsSliderLeft => Some(CarouselDirection::Forward),
            SectionKind::ShortsSliderRight => Some(CarouselDirection::Backward),
            SectionKind::LongSlider => Some(CarouselDirection::Forward),
            SectionKind::SingleLong | SectionKind::ShortsGrid => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub kind: SectionKind,
}

impl SectionDescriptor {
    pub fn new(id: SectionId, kind: SectionKind) -> Self {
        Self { id, kind }
    }

    pub fn demand(&self) -> SectionDemand {
        self.kind.demand()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demands_match_section_shapes() {
        assert_eq!(SectionKind::SingleLong.demand().count, 1);
        assert_eq!(SectionKind::ShortsGrid.demand().count, 4);
        assert_eq!(SectionKind::LongSlider.demand().kind, VideoKind::LongForm);
        assert_eq!(
            SectionKind::ShortsSliderRight.demand(),
            SectionDemand {
                kind: VideoKind::ShortForm,
                count: 10
            }
        );
    }

    #[test]
    fn only_sliders_scroll() {
        assert_eq!(SectionKind::ShortsGrid.carousel_direction(), None);
        assert_eq!(
            SectionKind::ShortsSliderRight.carousel_direction(),
            Some(CarouselDirection::Backward)
        );
    }
}
