//! Gesture tracker: unified touch/mouse drag state machine
//!
//! ```text
//! Idle --Down--> Tracking --Up/Cancel--> Committed(dir) | Cancelled
//!   ^                                          |
//!   +---------------- finish() ----------------+
//! ```
//!
//! The tracker only decides; it never moves the strip. Displacement is
//! `start.x - current.x`, so dragging leftwards is positive and means
//! "advance". Velocity is the displacement over the time elapsed since the
//! press, recomputed on every sample (the latest sample wins, no averaging).

use std::time::Instant;

use crate::types::{Direction, Point, PointerKind};

/// Closed set of pointer inputs the tracker understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press.
    Down {
        /// Input stream.
        pointer: PointerKind,
        /// Coordinate.
        point: Point,
    },
    /// Movement.
    Move {
        /// Input stream.
        pointer: PointerKind,
        /// Coordinate.
        point: Point,
    },
    /// Release.
    Up {
        /// Input stream.
        pointer: PointerKind,
        /// Coordinate.
        point: Point,
    },
    /// Treated as an `Up` at the last known coordinate.
    Cancel {
        /// Input stream.
        pointer: PointerKind,
    },
}

/// One press, from down to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Stream that owns the session.
    pub pointer: PointerKind,
    /// Press coordinate.
    pub start: Point,
    /// Press time.
    pub started_at: Instant,
    /// Track position when the press began (rebased by wrap corrections).
    pub start_position: usize,
    /// Most recent coordinate from the owning stream.
    pub last: Point,
    /// Latest displacement / elapsed sample (px/ms).
    pub velocity: f32,
}

impl GestureSession {
    fn displacement_to(&self, point: Point) -> f32 {
        self.start.x - point.x
    }

    fn velocity_at(&self, displacement: f32, now: Instant) -> f32 {
        let elapsed_ms = now
            .saturating_duration_since(self.started_at)
            .as_secs_f32()
            * 1000.0;
        // a release in the same millisecond as the press is not a flick
        displacement / elapsed_ms.max(1.0)
    }

    /// `start.x - last.x`: positive when dragged leftwards.
    pub fn displacement(&self) -> f32 {
        self.displacement_to(self.last)
    }
}

/// Where the tracker is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No press in progress.
    #[default]
    Idle,
    /// A press is being followed.
    Tracking(GestureSession),
    /// Released past a threshold; the caller navigates.
    Committed(Direction),
    /// Released short of both thresholds; the caller snaps back.
    Cancelled,
}

/// What the tracker wants done in response to an input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    /// Session opened; the caller stops animation and suspends autoplay.
    Began {
        /// Position the press began on.
        start_position: usize,
    },
    /// Follow the finger.
    Dragged {
        /// Position the press began on.
        start_position: usize,
        /// Current `start.x - x`.
        displacement: f32,
    },
    /// Session closed with a verdict.
    Released(Release),
    /// Input did not belong to a session (or arrived for a second pointer).
    Ignored,
}

/// Verdict for a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Navigate one slide in this direction.
    Commit(Direction),
    /// Animate back to where the press began.
    SnapBack {
        /// Position to return to.
        start_position: usize,
    },
}

/// Release thresholds; exceeding either one commits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitThresholds {
    /// Minimum |displacement| (px).
    pub distance_px: f32,
    /// Minimum |velocity| (px/ms).
    pub velocity_px_per_ms: f32,
}

/// Commit when either the distance or the flick velocity clears its
/// threshold. Direction follows the sign of the displacement (or of the
/// velocity when there is no displacement to speak of).
pub fn decide(
    displacement: f32,
    velocity: f32,
    thresholds: CommitThresholds,
) -> Option<Direction> {
    let far_enough = displacement.abs() > thresholds.distance_px;
    let fast_enough = velocity.abs() > thresholds.velocity_px_per_ms;
    if !far_enough && !fast_enough {
        return None;
    }
    let sign = if displacement != 0.0 {
        displacement
    } else {
        velocity
    };
    if sign > 0.0 {
        Some(Direction::Forward)
    } else if sign < 0.0 {
        Some(Direction::Backward)
    } else {
        None
    }
}

/// Pointer state machine shared by touch and mouse.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    state: GestureState,
    thresholds: CommitThresholds,
}

impl GestureTracker {
    /// Idle tracker.
    pub fn new(thresholds: CommitThresholds) -> Self {
        Self {
            state: GestureState::Idle,
            thresholds,
        }
    }

    /// Current state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Whether a session is open.
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, GestureState::Tracking(_))
    }

    /// The open session, if any.
    pub fn session(&self) -> Option<&GestureSession> {
        match &self.state {
            GestureState::Tracking(session) => Some(session),
            _ => None,
        }
    }

    /// Drag to render while a session is open: `(start_position,
    /// displacement)`.
    pub fn live_drag(&self) -> Option<(usize, f32)> {
        self.session()
            .map(|s| (s.start_position, s.displacement()))
    }

    /// Shift the open session's start position after a wrap correction
    /// re-seated the track underneath it.
    pub fn rebase(&mut self, shift: isize) {
        if let GestureState::Tracking(session) = &mut self.state {
            let rebased = session.start_position as isize + shift;
            session.start_position = rebased.max(0) as usize;
            log::debug!(
                "Gesture rebased by {}: start_position={}",
                shift,
                session.start_position
            );
        }
    }

    /// Return to `Idle` once the caller has acted on a release.
    pub fn finish(&mut self) {
        if !self.is_tracking() {
            self.state = GestureState::Idle;
        }
    }

    /// Feed one input. `position` is the live track position, recorded as
    /// the start position on a press.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        position: usize,
        now: Instant,
    ) -> GestureStep {
        // A verdict nobody collected is dropped on the next input.
        if matches!(
            self.state,
            GestureState::Committed(_) | GestureState::Cancelled
        ) {
            self.state = GestureState::Idle;
        }

        match (self.state, event) {
            (GestureState::Idle, PointerEvent::Down { pointer, point }) => {
                self.state = GestureState::Tracking(GestureSession {
                    pointer,
                    start: point,
                    started_at: now,
                    start_position: position,
                    last: point,
                    velocity: 0.0,
                });
                log::debug!(
                    "Gesture began ({:?}) at x={} position={}",
                    pointer,
                    point.x,
                    position
                );
                GestureStep::Began {
                    start_position: position,
                }
            }
            (
                GestureState::Tracking(mut session),
                PointerEvent::Move { pointer, point },
            ) if pointer == session.pointer => {
                let displacement = session.displacement_to(point);
                session.last = point;
                session.velocity = session.velocity_at(displacement, now);
                self.state = GestureState::Tracking(session);
                log::trace!(
                    "Gesture drag: displacement={} velocity={}",
                    displacement,
                    session.velocity
                );
                GestureStep::Dragged {
                    start_position: session.start_position,
                    displacement,
                }
            }
            (
                GestureState::Tracking(mut session),
                PointerEvent::Up { pointer, point },
            ) if pointer == session.pointer => {
                session.last = point;
                self.release(session, now)
            }
            (GestureState::Tracking(session), PointerEvent::Cancel { pointer })
                if pointer == session.pointer =>
            {
                self.release(session, now)
            }
            (GestureState::Tracking(_), PointerEvent::Down { pointer, .. }) => {
                log::debug!(
                    "Ignoring {:?} press while a gesture is tracking",
                    pointer
                );
                GestureStep::Ignored
            }
            // the pointer that pressed owns the session until release
            (GestureState::Tracking(session), other) => {
                log::debug!(
                    "Ignoring {:?} input during a {:?} gesture",
                    other,
                    session.pointer
                );
                GestureStep::Ignored
            }
            (
                GestureState::Idle,
                PointerEvent::Move { .. }
                | PointerEvent::Up { .. }
                | PointerEvent::Cancel { .. },
            ) => GestureStep::Ignored,
            (GestureState::Committed(_) | GestureState::Cancelled, _) => {
                GestureStep::Ignored
            }
        }
    }

    fn release(&mut self, session: GestureSession, now: Instant) -> GestureStep {
        let displacement = session.displacement();
        let velocity = session.velocity_at(displacement, now);
        match decide(displacement, velocity, self.thresholds) {
            Some(direction) => {
                log::debug!(
                    "Gesture committed {:?}: displacement={} velocity={}",
                    direction,
                    displacement,
                    velocity
                );
                self.state = GestureState::Committed(direction);
                GestureStep::Released(Release::Commit(direction))
            }
            None => {
                log::debug!(
                    "Gesture snapped back: displacement={} velocity={}",
                    displacement,
                    velocity
                );
                self.state = GestureState::Cancelled;
                GestureStep::Released(Release::SnapBack {
                    start_position: session.start_position,
                })
            }
        }
    }
}
