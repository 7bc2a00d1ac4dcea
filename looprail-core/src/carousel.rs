//! Carousel: one instance of the interaction engine
//!
//! Owns every piece of mutable state for a single strip, so any number of
//! carousels can live on one page. All handlers run to completion on the
//! caller's thread; the only deferred work is what sits in the timer queue.

use std::time::Instant;

use crate::autoplay::{AutoplayScheduler, Suspension};
use crate::config::CarouselConfig;
use crate::error::Result;
use crate::gesture::{
    CommitThresholds, GestureState, GestureStep, GestureTracker, PointerEvent,
    Release,
};
use crate::layout::Layout;
use crate::link_guard::{ClickVerdict, LinkGuard};
use crate::messages::{CarouselEvent, Effect};
use crate::timers::{TimerQueue, TimerTask};
use crate::track::Track;
use crate::transport::{Transport, WrapOutcome};
use crate::types::{Direction, Point, PointerKind, PointerTarget, Slide};

/// A mounted carousel over a host [`Layout`].
#[derive(Debug)]
pub struct Carousel<L> {
    config: CarouselConfig,
    layout: L,
    transport: Transport,
    gesture: GestureTracker,
    autoplay: AutoplayScheduler,
    links: LinkGuard,
    timers: TimerQueue,
}

impl<L: Layout> Carousel<L> {
    /// Build a carousel over `slides`.
    ///
    /// Returns `Ok(None)` when there are no slides: such a carousel has no
    /// behavior at all and the host should not wire anything up. Call
    /// [`Carousel::start`] afterwards to get the first frame and arm
    /// autoplay.
    pub fn mount(
        slides: Vec<Slide>,
        layout: L,
        config: CarouselConfig,
    ) -> Result<Option<Self>> {
        config.validate()?;
        let Some(track) = Track::new(slides) else {
            log::debug!("Carousel has no slides; not mounting");
            return Ok(None);
        };
        log::debug!(
            "Carousel mounted with {} slides ({} including clones)",
            track.len(),
            track.extended_len()
        );

        Ok(Some(Self {
            transport: Transport::new(
                track,
                config.slide_gap_px,
                config.transition_duration,
            ),
            gesture: GestureTracker::new(CommitThresholds {
                distance_px: config.commit_distance_px,
                velocity_px_per_ms: config.commit_velocity_px_per_ms,
            }),
            autoplay: AutoplayScheduler::new(
                config.autoplay_interval,
                config.autoplay_enabled,
            ),
            links: LinkGuard::new(config.link_drag_threshold_px),
            timers: TimerQueue::new(),
            config,
            layout,
        }))
    }

    /// Initial non-animated frame on the first real slide, plus autoplay.
    pub fn start(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = vec![self.transport.render(&self.layout, None, false)];
        if self.autoplay.start(&mut self.timers, now) {
            effects.push(Effect::AutoplayChanged { running: true });
        }
        effects
    }

    /// Validated tuning this carousel runs with.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Host layout the stride is measured from.
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable access for hosts that update measurements before sending
    /// [`CarouselEvent::Resize`].
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Slides, clones included, and the current position.
    pub fn track(&self) -> &Track {
        self.transport.track()
    }

    /// Current position in the extended sequence.
    pub fn position(&self) -> usize {
        self.transport.position()
    }

    /// Zero-based index of the visible real slide.
    pub fn logical_index(&self) -> usize {
        self.transport.logical_index()
    }

    /// Pointer gesture state.
    pub fn gesture_state(&self) -> &GestureState {
        self.gesture.state()
    }

    /// Whether an autoplay tick is scheduled.
    pub fn is_autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Autoplay state, including active suspensions.
    pub fn autoplay(&self) -> &AutoplayScheduler {
        &self.autoplay
    }

    /// Pending timers.
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Earliest pending timer; the host should call [`Carousel::poll`] no
    /// later than this.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Fire every timer due at or before `now`, in deadline order. Each task
    /// runs as if at its own deadline, so late polling still yields the
    /// same sequence of effects.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Some((id, due, task)) = self.timers.pop_due(now) {
            match task {
                TimerTask::AutoplayTick => {
                    if self.autoplay.on_tick(id, due, now, &mut self.timers) {
                        log::debug!("Autoplay tick");
                        self.navigate(Direction::Forward, due, &mut effects);
                    }
                }
                TimerTask::WrapCorrection { generation } => {
                    self.wrap_correction(generation, &mut effects);
                }
            }
        }
        effects
    }

    /// Apply one host input observed at `now` and return what to render.
    pub fn handle(&mut self, event: CarouselEvent, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            CarouselEvent::PointerDown {
                pointer,
                point,
                target,
            } => self.pointer_down(pointer, point, target, now, &mut effects),
            CarouselEvent::PointerMove { pointer, point } => {
                self.links.pointer_move(pointer, point);
                self.pointer(PointerEvent::Move { pointer, point }, now, &mut effects);
            }
            CarouselEvent::PointerUp { pointer, point } => {
                self.links.pointer_up(pointer);
                self.pointer(PointerEvent::Up { pointer, point }, now, &mut effects);
            }
            CarouselEvent::PointerCancel { pointer } => {
                self.links.pointer_up(pointer);
                self.pointer(PointerEvent::Cancel { pointer }, now, &mut effects);
            }
            CarouselEvent::LinkClick { slide } => self.link_click(slide, &mut effects),
            CarouselEvent::HoverEnter { slide } => {
                if self.is_hover_sensitive(slide)
                    && self
                        .autoplay
                        .suspend(Suspension::Hover(slide), &mut self.timers)
                {
                    effects.push(Effect::AutoplayChanged { running: false });
                }
            }
            CarouselEvent::HoverLeave { slide } => {
                if self.is_hover_sensitive(slide) {
                    self.resume_autoplay(Suspension::Hover(slide), now, &mut effects);
                }
            }
            CarouselEvent::IndicatorClick { index } => {
                self.jump(index, &mut effects)
            }
            CarouselEvent::Previous => {
                self.navigate(Direction::Backward, now, &mut effects)
            }
            CarouselEvent::Next => {
                self.navigate(Direction::Forward, now, &mut effects)
            }
            CarouselEvent::Resize => {
                log::debug!("Carousel resize; re-measuring stride");
                effects.push(self.current_frame(false));
            }
        }
        effects
    }

    /// Programmatic advance (next button, autoplay).
    pub fn advance(&mut self, now: Instant) -> Vec<Effect> {
        self.handle(CarouselEvent::Next, now)
    }

    /// Programmatic retreat (previous button).
    pub fn retreat(&mut self, now: Instant) -> Vec<Effect> {
        self.handle(CarouselEvent::Previous, now)
    }

    /// Jump to a real slide (indicator click).
    pub fn seek(&mut self, index: usize, now: Instant) -> Vec<Effect> {
        self.handle(CarouselEvent::IndicatorClick { index }, now)
    }

    fn jump(&mut self, index: usize, effects: &mut Vec<Effect>) {
        // any pending sentinel is superseded; seek writes an in-range position
        match self.transport.seek(index, &self.layout) {
            Some(frame) => effects.push(frame),
            None => log::warn!(
                "Ignoring indicator {} for a carousel of {} slides",
                index,
                self.transport.track().len()
            ),
        }
    }

    fn pointer_down(
        &mut self,
        pointer: PointerKind,
        point: Point,
        target: PointerTarget,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        match target {
            PointerTarget::Control => return,
            PointerTarget::Link { slide } => {
                if self.track().slide(slide).is_some_and(Slide::has_link) {
                    self.links.pointer_down(slide, pointer, point);
                } else {
                    log::warn!("Press on slide {} which has no link", slide);
                }
            }
            PointerTarget::Track => {}
        }
        self.pointer(PointerEvent::Down { pointer, point }, now, effects);
    }

    fn pointer(
        &mut self,
        event: PointerEvent,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        let position = self.transport.position();
        match self.gesture.handle(event, position, now) {
            GestureStep::Began { .. } => {
                // cut any in-flight transition; a pending wrap correction
                // stays queued and re-checks live state when it fires
                effects.push(self.transport.render(&self.layout, None, false));
                if self.autoplay.suspend(Suspension::Drag, &mut self.timers) {
                    effects.push(Effect::AutoplayChanged { running: false });
                }
            }
            GestureStep::Dragged {
                start_position,
                displacement,
            } => {
                effects.push(self.transport.render_drag(
                    &self.layout,
                    start_position,
                    displacement,
                ));
            }
            GestureStep::Released(release) => {
                match release {
                    Release::Commit(direction) => {
                        self.navigate(direction, now, effects)
                    }
                    Release::SnapBack { .. } => {
                        effects.push(self.transport.render(&self.layout, None, true))
                    }
                }
                self.gesture.finish();
                self.resume_autoplay(Suspension::Drag, now, effects);
            }
            GestureStep::Ignored => {}
        }
    }

    fn navigate(
        &mut self,
        direction: Direction,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(shift) = self.transport.settle() {
            self.gesture.rebase(shift);
            effects.push(self.current_frame(false));
        }
        effects.push(self.transport.step(
            direction,
            &self.layout,
            &mut self.timers,
            now,
        ));
    }

    fn wrap_correction(&mut self, generation: u64, effects: &mut Vec<Effect>) {
        if let WrapOutcome::Corrected { shift } =
            self.transport.apply_wrap_correction(generation)
        {
            self.gesture.rebase(shift);
            effects.push(self.current_frame(false));
        }
    }

    fn link_click(&mut self, slide: usize, effects: &mut Vec<Effect>) {
        if !self.track().slide(slide).is_some_and(Slide::has_link) {
            log::warn!("Click on slide {} which has no link", slide);
            return;
        }
        effects.push(match self.links.click(slide) {
            ClickVerdict::Follow => Effect::FollowLink { slide },
            ClickVerdict::Suppress => Effect::SuppressClick { slide },
        });
    }

    fn resume_autoplay(
        &mut self,
        source: Suspension,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        if self.autoplay.resume(source, &mut self.timers, now) {
            effects.push(Effect::AutoplayChanged { running: true });
        }
    }

    fn is_hover_sensitive(&self, slide: usize) -> bool {
        self.track().slide(slide).is_some_and(|s| s.hover_sensitive)
    }

    /// Frame for the current state: follows the finger during a drag,
    /// otherwise sits on the current position.
    fn current_frame(&self, animate: bool) -> Effect {
        match self.gesture.live_drag() {
            Some((start_position, displacement)) => self
                .transport
                .render_drag(&self.layout, start_position, displacement),
            None => self.transport.render(&self.layout, None, animate),
        }
    }
}
