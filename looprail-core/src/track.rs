//! Track model: the slide list bracketed by boundary clones
//!
//! For `n` slides the extended sequence is
//! `[clone(last), s0, s1, .., s(n-1), clone(first)]`, indices `0..=n+1`.
//! Positions `0` and `n+1` are sentinels: valid animation targets, but only
//! ever transient. The transport re-seats them into `1..=n` once the
//! animation that reached them has finished.

use crate::types::{Direction, Slide};

/// Extended slide sequence plus the current position in it.
#[derive(Debug, Clone)]
pub struct Track {
    extended: Vec<Slide>,
    len: usize,
    position: usize,
}

impl Track {
    /// Build the extended sequence. Returns `None` for an empty slide list;
    /// there is nothing to loop over.
    pub fn new(slides: Vec<Slide>) -> Option<Self> {
        let len = slides.len();
        let first = slides.first()?.clone();
        let last = slides.last()?.clone();

        let mut extended = Vec::with_capacity(len + 2);
        extended.push(last);
        extended.extend(slides);
        extended.push(first);

        Some(Self {
            extended,
            len,
            position: 1,
        })
    }

    /// Number of real (non-cloned) slides.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: an empty track cannot be built.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `len() + 2`.
    pub fn extended_len(&self) -> usize {
        self.extended.len()
    }

    /// Slide at an extended index, clones included.
    pub fn slide(&self, extended_index: usize) -> Option<&Slide> {
        self.extended.get(extended_index)
    }

    /// Current index into the extended sequence.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move one step forward. No clamping: `n+1` is a legal target.
    pub fn advance(&mut self) {
        debug_assert!(self.position <= self.len, "advance from a sentinel");
        self.position += 1;
    }

    /// Move one step backward. No clamping: `0` is a legal target.
    pub fn retreat(&mut self) {
        debug_assert!(self.position >= 1, "retreat from a sentinel");
        self.position = self.position.saturating_sub(1);
    }

    /// [`Track::advance`] or [`Track::retreat`].
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Forward => self.advance(),
            Direction::Backward => self.retreat(),
        }
    }

    /// Zero-based index of the visible slide within the real sequence:
    /// `(position - 1) mod n`.
    pub fn logical_index(&self) -> usize {
        logical_index(self.position, self.len)
    }

    /// Jump to a real slide. Returns false (and leaves the position alone)
    /// when `logical` is out of range.
    pub fn seek(&mut self, logical: usize) -> bool {
        if logical >= self.len {
            return false;
        }
        self.position = logical + 1;
        true
    }

    /// Whether the position is `0` or `n+1`.
    pub fn is_at_sentinel(&self) -> bool {
        self.position == 0 || self.position == self.len + 1
    }

    /// Real position a sentinel stands in for: `0 -> n`, `n+1 -> 1`.
    pub fn wrap_target(&self) -> Option<usize> {
        if self.position == 0 {
            Some(self.len)
        } else if self.position == self.len + 1 {
            Some(1)
        } else {
            None
        }
    }

    /// Re-seat a sentinel into the real range. Returns the signed shift that
    /// was applied (`+n` or `-n`), or `None` when already in range.
    pub(crate) fn unwrap_sentinel(&mut self) -> Option<isize> {
        let target = self.wrap_target()?;
        let shift = target as isize - self.position as isize;
        self.position = target;
        Some(shift)
    }
}

/// `(position - 1) mod n`, always in `0..n`.
pub fn logical_index(position: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (position as isize - 1).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(n: usize) -> Track {
        Track::new(vec![Slide::plain(); n]).expect("non-empty")
    }

    #[test]
    fn empty_slide_list_builds_nothing() {
        assert!(Track::new(Vec::new()).is_none());
    }

    #[test]
    fn clones_bracket_the_real_sequence() {
        let slides = vec![
            Slide::with_link("/a"),
            Slide::plain(),
            Slide::with_link("/c"),
        ];
        let t = Track::new(slides).expect("non-empty");
        assert_eq!(t.extended_len(), 5);
        assert_eq!(t.slide(0).and_then(|s| s.link.as_deref()), Some("/c"));
        assert_eq!(t.slide(4).and_then(|s| s.link.as_deref()), Some("/a"));
        assert_eq!(t.position(), 1);
        assert_eq!(t.logical_index(), 0);
    }

    #[test]
    fn sentinels_map_to_opposite_ends() {
        let mut t = track(4);
        t.retreat();
        assert_eq!(t.position(), 0);
        assert_eq!(t.logical_index(), 3);
        assert_eq!(t.wrap_target(), Some(4));
        assert_eq!(t.unwrap_sentinel(), Some(4));
        assert_eq!(t.position(), 4);

        t.advance();
        assert_eq!(t.position(), 5);
        assert_eq!(t.logical_index(), 0);
        assert_eq!(t.unwrap_sentinel(), Some(-4));
        assert_eq!(t.position(), 1);
        assert_eq!(t.unwrap_sentinel(), None);
    }

    #[test]
    fn seek_uses_one_based_positions() {
        let mut t = track(4);
        assert!(t.seek(2));
        assert_eq!(t.position(), 3);
        assert_eq!(t.logical_index(), 2);
        assert!(!t.seek(4));
        assert_eq!(t.position(), 3);
    }

    #[test]
    fn single_slide_loops_onto_itself() {
        let mut t = track(1);
        t.advance();
        assert_eq!(t.position(), 2);
        assert_eq!(t.logical_index(), 0);
        assert_eq!(t.unwrap_sentinel(), Some(-1));
        assert_eq!(t.position(), 1);
    }
}
