//! Autoplay / drag hand-off state machine

use std::time::Instant;

/// Authoritative interaction state of one carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Autoplay is running.
    Idle,

    /// The pointer is down; the offset follows it.
    Dragging {
        pointer_origin: f32,
        offset_origin: f32,
    },

    /// The pointer was released; autoplay resumes at `resume_at` unless a
    /// new drag starts first.
    Releasing { resume_at: Instant },
}

/// Discriminant of [`DragState`] for reporting and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    Dragging,
    Releasing,
}

impl DragState {
    pub fn phase(&self) -> DragPhase {
        match self {
            DragState::Idle => DragPhase::Idle,
            DragState::Dragging { .. } => DragPhase::Dragging,
            DragState::Releasing { .. } => DragPhase::Releasing,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

/// Pointer input routed to a carousel. Positions are horizontal, in the
/// same units as the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32 },
    Move { x: f32 },
    Up,
}

impl PointerEvent {
    fn name(&self) -> &'static str {
        match self {
            PointerEvent::Down { .. } => "down",
            PointerEvent::Move { .. } => "move",
            PointerEvent::Up => "up",
        }
    }
}

/// Result of feeding an event to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The event was applied. `from == to` for in-state updates such as a
    /// pointer move while dragging.
    Applied { from: DragPhase, to: DragPhase },

    /// The event has no meaning in the current state and was dropped.
    Ignored { state: DragPhase, event: &'static str },
}

impl DragState {
    /// Next state for `event`, or the `Ignored` transition to report. Offset
    /// arithmetic stays with the buffer; this only decides the phase.
    pub(crate) fn next(
        &self,
        event: PointerEvent,
        current_offset: f32,
        resume_at: Instant,
    ) -> Result<DragState, Transition> {
        match (self, event) {
            (
                DragState::Idle | DragState::Releasing { .. },
                PointerEvent::Down { x },
            ) => Ok(DragState::Dragging {
                pointer_origin: x,
                offset_origin: current_offset,
            }),
            (DragState::Dragging { .. }, PointerEvent::Move { .. }) => Ok(*self),
            (DragState::Dragging { .. }, PointerEvent::Up) => {
                Ok(DragState::Releasing { resume_at })
            }
            (state, event) => Err(Transition::Ignored {
                state: state.phase(),
                event: event.name(),
            }),
        }
    }
}
