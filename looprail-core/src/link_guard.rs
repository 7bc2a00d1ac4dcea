//! Link guard: tell a tap on a slide link from a drag that started on it
//!
//! Each linked slide keeps its own press record, separate from the carousel
//! gesture. Moves are observed document-wide, so a press that wanders off
//! the link is still measured. Once a press has moved past the threshold it
//! is a drag for good; the click the platform fires after the release is
//! then swallowed.

use std::collections::{HashMap, HashSet};

use crate::types::{Point, PointerKind};

/// What to do with a link click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickVerdict {
    /// Let the browser navigate.
    Follow,
    /// Swallow it; the press was a drag.
    Suppress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LinkPress {
    pointer: PointerKind,
    start: Point,
    dragging: bool,
}

/// Per-slide press tracking for slide links.
#[derive(Debug, Clone, Default)]
pub struct LinkGuard {
    threshold: f32,
    presses: HashMap<usize, LinkPress>,
    // Released as drags, waiting for their click.
    armed: HashSet<usize>,
}

impl LinkGuard {
    /// Guard that treats movement beyond `threshold` px as a drag.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            presses: HashMap::new(),
            armed: HashSet::new(),
        }
    }

    /// Open a press on the link of `slide`.
    pub fn pointer_down(
        &mut self,
        slide: usize,
        pointer: PointerKind,
        point: Point,
    ) {
        self.armed.remove(&slide);
        self.presses.insert(
            slide,
            LinkPress {
                pointer,
                start: point,
                dragging: false,
            },
        );
    }

    /// Feed a move to every open press from the same pointer stream.
    ///
    /// Mouse presses only count horizontal travel. Touch presses count either
    /// axis, since a vertical swipe on a touch screen scrolls the page and
    /// must not open the link either.
    pub fn pointer_move(&mut self, pointer: PointerKind, point: Point) {
        let threshold = self.threshold;
        for (slide, press) in self
            .presses
            .iter_mut()
            .filter(|(_, p)| p.pointer == pointer && !p.dragging)
        {
            let dx = (point.x - press.start.x).abs();
            let dy = (point.y - press.start.y).abs();
            let moved = match pointer {
                PointerKind::Mouse => dx > threshold,
                PointerKind::Touch => dx > threshold || dy > threshold,
            };
            if moved {
                press.dragging = true;
                log::debug!("Link press on slide {} became a drag", slide);
            }
        }
    }

    /// Close every open press from this pointer stream. Presses that turned
    /// into drags arm click suppression for their slide.
    pub fn pointer_up(&mut self, pointer: PointerKind) {
        let armed = &mut self.armed;
        self.presses.retain(|slide, press| {
            if press.pointer != pointer {
                return true;
            }
            if press.dragging {
                armed.insert(*slide);
            }
            false
        });
    }

    /// Verdict for a click on the link of `slide`. Consumes the armed state.
    pub fn click(&mut self, slide: usize) -> ClickVerdict {
        if self.armed.remove(&slide) {
            log::debug!("Suppressing click on slide {} after drag", slide);
            ClickVerdict::Suppress
        } else {
            ClickVerdict::Follow
        }
    }

    /// Whether the open press on `slide` has become a drag.
    pub fn is_dragging(&self, slide: usize) -> bool {
        self.presses.get(&slide).is_some_and(|p| p.dragging)
    }
}
