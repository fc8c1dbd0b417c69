//! CarouselBuffer: replicated surface, autoplay and drag for one carousel

use std::ops::Range;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reelfeed_model::{CarouselDirection, VideoRecord};
use tracing::trace;

use super::config::{
    CarouselConfig, LARGE_SOURCE_MIN_LEN, LARGE_SOURCE_REPLICAS,
    SMALL_SOURCE_REPLICAS,
};
use super::state::{DragPhase, DragState, PointerEvent, Transition};

/// How many copies of a source of `len` items make up the surface.
pub fn replication_factor(len: usize) -> usize {
    if len >= LARGE_SOURCE_MIN_LEN {
        LARGE_SOURCE_REPLICAS
    } else {
        SMALL_SOURCE_REPLICAS
    }
}

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub offset: f32,
    /// Signed amount the offset was snapped by, zero when no wrap happened.
    pub wrap_delta: f32,
}

impl Frame {
    pub fn wrapped(&self) -> bool {
        self.wrap_delta != 0.0
    }
}

/// Per-instance carousel state. Created on mount, dropped on unmount.
///
/// The offset is kept inside the home replica `[home * W, (home + 1) * W)`
/// where `W` is one replica width. Every replica is an identical copy of the
/// source, so snapping by `W` never changes what is on screen.
#[derive(Debug, Clone)]
pub struct CarouselBuffer {
    config: CarouselConfig,
    source: Arc<[VideoRecord]>,
    tripled: Vec<VideoRecord>,
    replicas: usize,
    scroll_offset: f32,
    velocity: f32,
    drag_state: DragState,
}

impl CarouselBuffer {
    pub fn new(source: Arc<[VideoRecord]>, config: CarouselConfig) -> Self {
        let mut buffer = Self {
            config,
            source: Arc::from(Vec::new()),
            tripled: Vec::new(),
            replicas: 0,
            scroll_offset: 0.0,
            velocity: 0.0,
            drag_state: DragState::Idle,
        };
        buffer.rebuild(source);
        buffer
    }

    /// Swap in a new source list. A list with a different identity (new
    /// ranking pass) rebuilds the surface and restarts from the home
    /// replica; the same `Arc` is a no-op. Returns whether a rebuild
    /// happened.
    pub fn set_source(&mut self, source: Arc<[VideoRecord]>) -> bool {
        if Arc::ptr_eq(&self.source, &source) {
            return false;
        }
        self.rebuild(source);
        true
    }

    fn rebuild(&mut self, source: Arc<[VideoRecord]>) {
        self.replicas = replication_factor(source.len());
        self.tripled = Vec::with_capacity(source.len() * self.replicas);
        for _ in 0..self.replicas {
            self.tripled.extend(source.iter().cloned());
        }
        self.source = source;
        self.drag_state = DragState::Idle;
        self.velocity = self.config.autoplay_velocity();
        self.scroll_offset = self.home_start();
        trace!(
            items = self.source.len(),
            replicas = self.replicas,
            offset = self.scroll_offset,
            "rebuilt carousel surface"
        );
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn source_list(&self) -> &Arc<[VideoRecord]> {
        &self.source
    }

    pub fn tripled_list(&self) -> &[VideoRecord] {
        &self.tripled
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag_state
    }

    pub fn phase(&self) -> DragPhase {
        self.drag_state.phase()
    }

    /// Width of one copy of the source.
    pub fn replica_width(&self) -> f32 {
        self.source.len() as f32 * self.config.item_stride
    }

    /// Offset of the first item of the home (middle) replica.
    pub fn home_start(&self) -> f32 {
        (self.replicas / 2) as f32 * self.replica_width()
    }

    /// Change the autoplay direction. Takes effect immediately when idle,
    /// otherwise when autoplay resumes.
    pub fn set_direction(&mut self, direction: CarouselDirection) {
        self.config.direction = direction;
        if self.drag_state.is_idle() {
            self.velocity = self.config.autoplay_velocity();
        }
    }

    /// Advance one animation frame.
    pub fn frame(&mut self, now: Instant) -> Frame {
        if let DragState::Releasing { resume_at } = self.drag_state
            && now >= resume_at
        {
            self.drag_state = DragState::Idle;
            self.velocity = self.config.autoplay_velocity();
            trace!(velocity = self.velocity, "carousel autoplay resumed");
        }

        if !self.drag_state.is_idle() || self.source.is_empty() {
            return Frame {
                offset: self.scroll_offset,
                wrap_delta: 0.0,
            };
        }

        let before = self.scroll_offset + self.velocity;
        self.scroll_offset = self.wrap_into_home(before);
        let wrap_delta = self.scroll_offset - before;
        if wrap_delta != 0.0 {
            trace!(offset = self.scroll_offset, wrap_delta, "carousel wrapped");
        }
        Frame {
            offset: self.scroll_offset,
            wrap_delta,
        }
    }

    /// Feed a pointer event through the drag state machine.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) -> Transition {
        let from = self.drag_state.phase();
        let resume_at = now + Duration::from_millis(self.config.release_cooldown_ms);
        let next = match self.drag_state.next(event, self.scroll_offset, resume_at) {
            Ok(next) => next,
            Err(ignored) => {
                trace!(?ignored, "carousel pointer event ignored");
                return ignored;
            }
        };

        if let (
            DragState::Dragging {
                pointer_origin,
                offset_origin,
            },
            PointerEvent::Move { x },
        ) = (next, event)
        {
            let raw = offset_origin - (x - pointer_origin) * self.config.drag_gain;
            self.scroll_offset = self.wrap_into_home(raw);
        }

        self.drag_state = next;
        if !self.drag_state.is_idle() {
            self.velocity = 0.0;
        }
        Transition::Applied {
            from,
            to: self.drag_state.phase(),
        }
    }

    /// Fold `offset` back into the home replica by whole replica widths.
    /// A non-finite offset is rejected and the current one kept.
    fn wrap_into_home(&self, offset: f32) -> f32 {
        if !offset.is_finite() {
            trace!(offset, "carousel rejected non-finite offset");
            return self.scroll_offset;
        }
        let width = self.replica_width();
        if width <= 0.0 {
            return offset;
        }
        let home = self.home_start();
        let wrapped = home + (offset - home).rem_euclid(width);
        // `rem_euclid` may round up to `width` itself.
        if wrapped >= home + width { home } else { wrapped }
    }

    /// Indices of `tripled_list` intersecting a viewport of the given width
    /// at the current offset.
    pub fn visible_range(&self, viewport_width: f32) -> Range<usize> {
        let stride = self.config.item_stride;
        if self.tripled.is_empty() || stride <= 0.0 {
            return 0..0;
        }
        let first = (self.scroll_offset / stride).floor().max(0.0) as usize;
        let end = ((self.scroll_offset + viewport_width.max(0.0)) / stride).ceil()
            as usize;
        first.min(self.tripled.len())..end.min(self.tripled.len())
    }

    pub fn visible_items(&self, viewport_width: f32) -> &[VideoRecord] {
        &self.tripled[self.visible_range(viewport_width)]
    }
}
