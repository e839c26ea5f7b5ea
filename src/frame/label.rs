//! Labelling and extraction
//!
//! Partition a frameset into equivalence classes with a caller-supplied
//! predicate, then pull the members of one class out as a new set.

use crate::error::CoreError;
use crate::frame::{Frame, Frameset};
use serde::Serialize;
use tracing::debug;

/// Result of [`Frameset::labelise`]: one label per frame, in history order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labelling {
    pub labels: Vec<usize>,
    pub nlabels: usize,
}

impl Labelling {
    /// Number of frames that received `label`.
    pub fn count(&self, label: usize) -> usize {
        self.labels.iter().filter(|l| **l == label).count()
    }
}

impl Frameset {
    /// Group the frames into equivalence classes.
    ///
    /// `same_class` answers whether two frames belong together; an error
    /// aborts the labelling and is returned as-is. Labels are numbered in
    /// order of first appearance. Each frame is compared against one
    /// representative per known label, starting from the label matched
    /// last, so runs of same-class frames cost a single comparison each.
    pub fn labelise<F>(&self, mut same_class: F) -> Result<Labelling, CoreError>
    where
        F: FnMut(&Frame, &Frame) -> Result<bool, CoreError>,
    {
        let mut representatives: Vec<&Frame> = Vec::new();
        let mut labels = Vec::with_capacity(self.len());
        let mut start = 0usize;

        for frame in self.iter() {
            let known = representatives.len();
            let mut assigned = None;
            for offset in 0..known {
                let candidate = (start + offset) % known;
                if same_class(frame, representatives[candidate])? {
                    assigned = Some(candidate);
                    break;
                }
            }

            let label = match assigned {
                Some(label) => label,
                None => {
                    representatives.push(frame);
                    known
                }
            };
            start = label;
            labels.push(label);
        }

        debug!(
            frames = labels.len(),
            nlabels = representatives.len(),
            "Labelled frameset"
        );
        Ok(Labelling {
            labels,
            nlabels: representatives.len(),
        })
    }

    /// Deep copies of the frames labelled `desired`, in history order.
    ///
    /// Returns `Ok(None)`, not an empty set, when no frame carries the
    /// label. `labels` must hold exactly one entry per frame.
    pub fn extract(
        &self,
        labels: &[usize],
        desired: usize,
    ) -> Result<Option<Frameset>, CoreError> {
        if labels.len() != self.len() {
            return Err(CoreError::IllegalInput(format!(
                "Label array has {} entries for a frameset of {} frames",
                labels.len(),
                self.len()
            )));
        }

        let mut selected: Option<Frameset> = None;
        for (frame, label) in self.iter().zip(labels) {
            if *label == desired {
                selected
                    .get_or_insert_with(Frameset::new)
                    .insert(frame.clone())?;
            }
        }
        Ok(selected)
    }
}
