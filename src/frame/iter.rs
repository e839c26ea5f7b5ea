//! Frameset iterators
//!
//! A [`FramesetIterator`] is a cursor over the history of one frameset.
//! It does not borrow the set: every operation takes the set explicitly,
//! so several cursors can live next to each other and next to mutations
//! of the set. A cursor remembers the set it was created for and the
//! layout generation it saw; using it with another set, or after the set
//! was structurally modified, is an error instead of a silent misread.
//!
//! The cursor has a single sentinel position past the stored frames. The
//! [`Direction`] records whether the sentinel was reached moving forward
//! (after the last frame) or backward (before the first frame), which
//! decides where motion resumes from.

use crate::error::CoreError;
use crate::frame::{Frame, FrameId, Frameset};

/// How the cursor arrived at the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// On a frame, or never moved past an edge.
    #[default]
    None,
    /// Past the last frame.
    Forward,
    /// Before the first frame.
    Backward,
}

/// Detached cursor over a frameset's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramesetIterator {
    set: u64,
    generation: u64,
    position: usize,
    direction: Direction,
}

impl FramesetIterator {
    /// Create a cursor on the first frame of `set` (on the sentinel if the
    /// set is empty).
    pub fn new(set: &Frameset) -> Self {
        FramesetIterator {
            set: set.set_id(),
            generation: set.generation(),
            position: 0,
            direction: Direction::None,
        }
    }

    /// Copy of this cursor: same set, position and direction.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn check(&self, set: &Frameset) -> Result<(), CoreError> {
        if set.set_id() != self.set {
            return Err(CoreError::IllegalInput(
                "Iterator used with a frameset it is not bound to".to_string(),
            ));
        }
        if set.generation() != self.generation {
            return Err(CoreError::StaleIterator {
                expected: self.generation,
                actual: set.generation(),
            });
        }
        Ok(())
    }

    /// Position as a signed index: -1 before the first frame, `len` after
    /// the last one.
    fn logical(&self, len: usize) -> isize {
        if self.position >= len {
            match self.direction {
                Direction::Backward => -1,
                _ => len as isize,
            }
        } else {
            self.position as isize
        }
    }

    fn place(&mut self, logical: isize, len: usize) {
        if logical < 0 {
            self.position = len;
            self.direction = Direction::Backward;
        } else if logical as usize >= len {
            self.position = len;
            self.direction = Direction::Forward;
        } else {
            self.position = logical as usize;
            self.direction = Direction::None;
        }
    }

    /// Move the cursor by `distance` frames (negative moves backward).
    ///
    /// Landing on the sentinel is allowed from either side; a move that
    /// would go past it fails and leaves the cursor where it was.
    pub fn advance(&mut self, set: &Frameset, distance: isize) -> Result<(), CoreError> {
        self.check(set)?;
        let len = set.len();
        let current = self.logical(len);
        let out_of_range = || {
            CoreError::AccessOutOfRange(format!(
                "Cannot move by {} from position {} in a frameset of size {}",
                distance, current, len
            ))
        };
        let target = current.checked_add(distance).ok_or_else(out_of_range)?;
        if target < -1 || target > len as isize {
            return Err(out_of_range());
        }
        self.place(target, len);
        Ok(())
    }

    /// Rewind to the first frame and adopt the set's current layout.
    pub fn reset(&mut self, set: &Frameset) -> Result<(), CoreError> {
        if set.set_id() != self.set {
            return Err(CoreError::IllegalInput(
                "Iterator reset against a frameset it is not bound to".to_string(),
            ));
        }
        self.generation = set.generation();
        self.position = 0;
        self.direction = Direction::None;
        Ok(())
    }

    /// Frame under the cursor, `None` on the sentinel.
    pub fn get<'a>(&self, set: &'a Frameset) -> Result<Option<&'a Frame>, CoreError> {
        Ok(self.frame_id(set)?.and_then(|id| set.frame(id)))
    }

    /// Id of the frame under the cursor, for use with
    /// [`Frameset::update_frame`] or [`Frameset::erase_frame`].
    pub fn frame_id(&self, set: &Frameset) -> Result<Option<FrameId>, CoreError> {
        self.check(set)?;
        Ok(set.history().get(self.position).copied())
    }

    /// History index under the cursor, `None` on the sentinel.
    pub fn index(&self, set: &Frameset) -> Result<Option<usize>, CoreError> {
        self.check(set)?;
        Ok((self.position < set.len()).then_some(self.position))
    }

    /// Signed number of steps from `from` to `to`.
    pub fn distance(
        from: &FramesetIterator,
        to: &FramesetIterator,
        set: &Frameset,
    ) -> Result<isize, CoreError> {
        if from.set != to.set {
            return Err(CoreError::IllegalInput(
                "Iterators are bound to different framesets".to_string(),
            ));
        }
        from.check(set)?;
        to.check(set)?;
        let len = set.len();
        Ok(to.logical(len) - from.logical(len))
    }
}
