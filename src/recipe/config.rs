//! Frame configuration of version 2 recipes
//!
//! For each tag a recipe can be triggered with, the configuration records
//! how many frames of that tag it accepts, which other tags it takes as
//! inputs (with their own counts) and which product tags it writes.

use crate::error::CoreError;
use crate::frame::Frameset;
use serde::Serialize;
use std::fmt;

/// Accepted number of frames; `None` leaves a side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountRange {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl CountRange {
    pub fn new(min: Option<usize>, max: Option<usize>) -> Result<Self, CoreError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(CoreError::IllegalInput(format!(
                    "Minimum count {} exceeds maximum {}",
                    min, max
                )));
            }
        }
        Ok(CountRange { min, max })
    }

    pub fn admits(&self, count: usize) -> bool {
        self.min.map_or(true, |min| count >= min) && self.max.map_or(true, |max| count <= max)
    }

    /// At least one frame is required.
    pub fn is_required(&self) -> bool {
        self.min.map_or(false, |min| min > 0)
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "exactly {}", min),
            (Some(min), Some(max)) => write!(f, "{}..={}", min, max),
            (Some(min), None) => write!(f, "at least {}", min),
            (None, Some(max)) => write!(f, "at most {}", max),
            (None, None) => f.write_str("any number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct InputRule {
    tag: String,
    counts: CountRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct TagRule {
    tag: String,
    counts: CountRange,
    inputs: Vec<InputRule>,
    outputs: Vec<String>,
}

/// Per-tag frame requirements, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecipeConfig {
    rules: Vec<TagRule>,
}

impl RecipeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `tag` as a trigger tag, or update its counts.
    pub fn set_tag(
        &mut self,
        tag: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), CoreError> {
        if tag.is_empty() {
            return Err(CoreError::IllegalInput("empty tag".into()));
        }
        let counts = CountRange::new(min, max)?;
        match self.rule_mut(tag) {
            Ok(rule) => rule.counts = counts,
            Err(_) => self.rules.push(TagRule {
                tag: tag.to_string(),
                counts,
                inputs: Vec::new(),
                outputs: Vec::new(),
            }),
        }
        Ok(())
    }

    /// Declare `input` as an input of `tag`, or update its counts.
    pub fn set_input(
        &mut self,
        tag: &str,
        input: &str,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Result<(), CoreError> {
        if input.is_empty() {
            return Err(CoreError::IllegalInput("empty input tag".into()));
        }
        if input == tag {
            return Err(CoreError::IllegalInput(format!(
                "Tag '{}' cannot be its own input",
                tag
            )));
        }
        let counts = CountRange::new(min, max)?;
        let rule = self.rule_mut(tag)?;
        match rule.inputs.iter_mut().find(|i| i.tag == input) {
            Some(existing) => existing.counts = counts,
            None => rule.inputs.push(InputRule {
                tag: input.to_string(),
                counts,
            }),
        }
        Ok(())
    }

    pub fn set_output(&mut self, tag: &str, output: &str) -> Result<(), CoreError> {
        if output.is_empty() {
            return Err(CoreError::IllegalInput("empty output tag".into()));
        }
        let rule = self.rule_mut(tag)?;
        if !rule.outputs.iter().any(|o| o == output) {
            rule.outputs.push(output.to_string());
        }
        Ok(())
    }

    pub fn tags(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.tag.as_str()).collect()
    }

    pub fn inputs(&self, tag: &str) -> Result<Vec<&str>, CoreError> {
        Ok(self.rule(tag)?.inputs.iter().map(|i| i.tag.as_str()).collect())
    }

    pub fn outputs(&self, tag: &str) -> Result<Vec<&str>, CoreError> {
        Ok(self.rule(tag)?.outputs.iter().map(String::as_str).collect())
    }

    /// Counts for `input` under `tag`; `input == tag` gives the trigger
    /// tag's own counts.
    pub fn counts(&self, tag: &str, input: &str) -> Result<CountRange, CoreError> {
        let rule = self.rule(tag)?;
        if input == tag {
            return Ok(rule.counts);
        }
        rule.inputs
            .iter()
            .find(|i| i.tag == input)
            .map(|i| i.counts)
            .ok_or_else(|| {
                CoreError::DataNotFound(format!("Tag '{}' has no input '{}'", tag, input))
            })
    }

    pub fn min_count(&self, tag: &str, input: &str) -> Result<Option<usize>, CoreError> {
        Ok(self.counts(tag, input)?.min)
    }

    pub fn max_count(&self, tag: &str, input: &str) -> Result<Option<usize>, CoreError> {
        Ok(self.counts(tag, input)?.max)
    }

    /// Check the frame counts of `frames` against the rule for `tag`.
    ///
    /// Every violated count is listed in the returned `IllegalInput`.
    pub fn validate_frames(&self, frames: &Frameset, tag: &str) -> Result<(), CoreError> {
        let rule = self.rule(tag)?;
        let mut problems = Vec::new();

        let found = frames.count_tags(tag);
        if !rule.counts.admits(found) {
            problems.push(format!("{}: found {}, expected {}", tag, found, rule.counts));
        }
        for input in &rule.inputs {
            let found = frames.count_tags(&input.tag);
            if !input.counts.admits(found) {
                problems.push(format!(
                    "{}: found {}, expected {}",
                    input.tag, found, input.counts
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::IllegalInput(format!(
                "Frames do not match configuration for '{}': {}",
                tag,
                problems.join("; ")
            )))
        }
    }

    fn rule(&self, tag: &str) -> Result<&TagRule, CoreError> {
        self.rules
            .iter()
            .find(|r| r.tag == tag)
            .ok_or_else(|| CoreError::DataNotFound(format!("Tag '{}' is not configured", tag)))
    }

    fn rule_mut(&mut self, tag: &str) -> Result<&mut TagRule, CoreError> {
        self.rules
            .iter_mut()
            .find(|r| r.tag == tag)
            .ok_or_else(|| CoreError::DataNotFound(format!("Tag '{}' is not configured", tag)))
    }
}
