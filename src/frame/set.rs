//! Framesets
//!
//! An ordered, tag-indexed collection of owned frames. Frames are stored
//! in an arena addressed by [`FrameId`]; a tag multimap gives O(log n)
//! tag lookups and a separate history sequence records the traversal
//! order (insertion order until [`Frameset::sort`] replaces it).
//!
//! Every structural mutation bumps the set's generation so that detached
//! [`FramesetIterator`](crate::frame::FramesetIterator)s bound to an
//! older layout fail instead of reading a shifted sequence.

use crate::error::CoreError;
use crate::frame::Frame;
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tracing::debug;

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

fn allocate_set_id() -> u64 {
    NEXT_SET_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Identity of a frame owned by a specific frameset.
///
/// Ids are never reused within a set and never match a frame of another set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId {
    set: u64,
    serial: u64,
}

/// Ordered multimap of frames keyed by tag
#[derive(Debug)]
pub struct Frameset {
    id: u64,
    generation: u64,
    next_serial: u64,
    frames: HashMap<FrameId, Frame>,
    by_tag: BTreeMap<String, Vec<FrameId>>,
    history: Vec<FrameId>,
}

impl Default for Frameset {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Frameset {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl Frameset {
    /// Create an empty frameset.
    pub fn new() -> Self {
        Frameset {
            id: allocate_set_id(),
            generation: 0,
            next_serial: 0,
            frames: HashMap::new(),
            by_tag: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    /// Build a frameset by inserting every frame in order.
    pub fn try_from_frames<I>(frames: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut set = Frameset::new();
        for frame in frames {
            set.insert(frame)?;
        }
        Ok(set)
    }

    /// Deep copy. The copy is a distinct set: it shares no frames with
    /// `self`, its ids are its own, and both the history order and the
    /// per-tag order are reproduced.
    pub fn duplicate(&self) -> Self {
        let mut copy = Frameset::new();
        let mut remap: HashMap<FrameId, FrameId> = HashMap::with_capacity(self.frames.len());
        for old_id in &self.history {
            let new_id = copy.allocate_id();
            remap.insert(*old_id, new_id);
            copy.frames.insert(new_id, self.frames[old_id].clone());
            copy.history.push(new_id);
        }
        for (tag, ids) in &self.by_tag {
            copy.by_tag
                .insert(tag.clone(), ids.iter().map(|id| remap[id]).collect());
        }
        copy
    }

    fn allocate_id(&mut self) -> FrameId {
        let id = FrameId {
            set: self.id,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        id
    }

    fn bump_generation(&mut self) {
        self.generation += 1;
    }

    pub(crate) fn set_id(&self) -> u64 {
        self.id
    }

    /// Layout generation; changes on every structural mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Number of frames carrying `tag`.
    pub fn count_tags(&self, tag: &str) -> usize {
        self.by_tag.get(tag).map_or(0, Vec::len)
    }

    /// Distinct tags present, in lexical order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    pub fn contains(&self, id: FrameId) -> bool {
        self.frames.contains_key(&id)
    }

    pub fn frame(&self, id: FrameId) -> Option<&Frame> {
        self.frames.get(&id)
    }

    /// Take ownership of `frame` and append it to the history.
    ///
    /// The frame must carry a tag.
    pub fn insert(&mut self, frame: Frame) -> Result<FrameId, CoreError> {
        let tag = match frame.tag() {
            Some(tag) => tag.to_string(),
            None => {
                return Err(CoreError::IllegalInput(format!(
                    "Frame without tag cannot be inserted: {}",
                    frame
                )))
            }
        };

        let id = self.allocate_id();
        self.frames.insert(id, frame);
        self.by_tag.entry(tag).or_default().push(id);
        self.history.push(id);
        self.bump_generation();
        Ok(id)
    }

    /// Re-insert a frame already owned by this set: it moves to the end of
    /// the history (and of its tag's run) instead of being duplicated.
    pub fn move_to_back(&mut self, id: FrameId) -> Result<(), CoreError> {
        let tag = self
            .frames
            .get(&id)
            .and_then(|f| f.tag().map(str::to_string))
            .ok_or_else(|| CoreError::DataNotFound(format!("Frame {:?} not in set", id)))?;

        self.history.retain(|other| *other != id);
        self.history.push(id);
        if let Some(ids) = self.by_tag.get_mut(&tag) {
            ids.retain(|other| *other != id);
            ids.push(id);
        }
        self.bump_generation();
        Ok(())
    }

    /// Remove and drop every frame tagged `tag`. Returns how many went.
    pub fn erase(&mut self, tag: &str) -> usize {
        let removed: HashSet<FrameId> = match self.by_tag.remove(tag) {
            Some(ids) => ids.into_iter().collect(),
            None => return 0,
        };

        self.history.retain(|id| !removed.contains(id));
        for id in &removed {
            self.frames.remove(id);
        }
        self.bump_generation();
        debug!(tag, removed = removed.len(), "Erased frames by tag");
        removed.len()
    }

    /// Remove and drop one frame by identity.
    ///
    /// An id that is not (or no longer) in this set is ignored; the return
    /// value tells whether a frame was removed.
    pub fn erase_frame(&mut self, id: FrameId) -> bool {
        let frame = match self.frames.remove(&id) {
            Some(frame) => frame,
            None => return false,
        };

        if let Some(tag) = frame.tag() {
            if let Some(ids) = self.by_tag.get_mut(tag) {
                ids.retain(|other| *other != id);
                if ids.is_empty() {
                    self.by_tag.remove(tag);
                }
            }
        }
        self.history.retain(|other| *other != id);
        self.bump_generation();
        true
    }

    /// Insert deep copies of every frame of `other`, in its history order.
    ///
    /// Each copy goes through [`Frameset::insert`]; if one fails the
    /// copies inserted before it stay in place.
    pub fn join(&mut self, other: &Frameset) -> Result<(), CoreError> {
        for frame in other.iter() {
            self.insert(frame.clone())?;
        }
        Ok(())
    }

    /// Reorder the history with a three-way comparison (stable merge sort).
    ///
    /// The tag index keeps its own order.
    pub fn sort<F>(&mut self, mut compare: F)
    where
        F: FnMut(&Frame, &Frame) -> Ordering,
    {
        let frames = &self.frames;
        self.history
            .sort_by(|a, b| compare(&frames[a], &frames[b]));
        self.bump_generation();
    }

    /// Frames carrying `tag`, in the order they joined that tag.
    ///
    /// Each call returns an independent cursor, so searches for different
    /// tags may be interleaved freely.
    pub fn find<'a>(&'a self, tag: &str) -> TagMatches<'a> {
        let ids = self.by_tag.get(tag).map(Vec::as_slice).unwrap_or(&[]);
        TagMatches {
            frames: &self.frames,
            ids: ids.iter(),
        }
    }

    /// Ids of the frames carrying `tag`, in tag order.
    pub fn find_ids(&self, tag: &str) -> Vec<FrameId> {
        self.by_tag.get(tag).cloned().unwrap_or_default()
    }

    /// Frame at `index` in history order.
    pub fn get_position(&self, index: usize) -> Result<&Frame, CoreError> {
        self.history
            .get(index)
            .map(|id| &self.frames[id])
            .ok_or_else(|| {
                CoreError::IllegalInput(format!(
                    "Position {} outside frameset of size {}",
                    index,
                    self.len()
                ))
            })
    }

    /// Id of the frame at `index` in history order.
    pub fn id_at(&self, index: usize) -> Option<FrameId> {
        self.history.get(index).copied()
    }

    /// Mutate a frame in place, keeping the tag index consistent.
    ///
    /// The history is untouched, so live iterators stay valid. Clearing the
    /// tag is rejected and rolled back.
    pub fn update_frame<F>(&mut self, id: FrameId, update: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Frame),
    {
        let frame = self
            .frames
            .get_mut(&id)
            .ok_or_else(|| CoreError::DataNotFound(format!("Frame {:?} not in set", id)))?;

        let old_tag = frame.tag().map(str::to_string);
        update(frame);
        let new_tag = frame.tag().map(str::to_string);

        match (old_tag, new_tag) {
            (old, None) => {
                frame.set_tag(old);
                Err(CoreError::IllegalInput(
                    "Frames in a frameset must keep a tag".to_string(),
                ))
            }
            (Some(old), Some(new)) if old != new => {
                if let Some(ids) = self.by_tag.get_mut(&old) {
                    ids.retain(|other| *other != id);
                    if ids.is_empty() {
                        self.by_tag.remove(&old);
                    }
                }
                self.by_tag.entry(new).or_default().push(id);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// [`update_frame`](Self::update_frame) addressed by history position.
    pub fn update_position<F>(&mut self, index: usize, update: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Frame),
    {
        let id = self.id_at(index).ok_or_else(|| {
            CoreError::IllegalInput(format!(
                "Position {} outside frameset of size {}",
                index,
                self.len()
            ))
        })?;
        self.update_frame(id, update)
    }

    /// Frames in history order.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> + '_ {
        self.history.iter().map(move |id| &self.frames[id])
    }

    /// `(id, frame)` pairs in history order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (FrameId, &Frame)> + '_ {
        self.history.iter().map(move |id| (*id, &self.frames[id]))
    }

    pub(crate) fn history(&self) -> &[FrameId] {
        &self.history
    }

    /// Write a human-readable listing of the set.
    pub fn dump<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Frameset with {} frame(s)", self.len())?;
        for (index, frame) in self.iter().enumerate() {
            writeln!(out, "  [{:>3}] {}", index, frame)?;
        }
        Ok(())
    }
}

impl fmt::Display for Frameset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frameset with {} frame(s)", self.len())?;
        for (index, frame) in self.iter().enumerate() {
            writeln!(f, "  [{:>3}] {}", index, frame)?;
        }
        Ok(())
    }
}

impl Serialize for Frameset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Cursor over the frames of one tag, see [`Frameset::find`].
pub struct TagMatches<'a> {
    frames: &'a HashMap<FrameId, Frame>,
    ids: std::slice::Iter<'a, FrameId>,
}

impl<'a> Iterator for TagMatches<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|id| &self.frames[id])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for TagMatches<'_> {}
