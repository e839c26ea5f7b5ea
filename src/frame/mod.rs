//! Frames
//!
//! A frame is the pipeline bookkeeping record of one data file: where it
//! lives, what category (tag) it belongs to and which role it plays.
//! Frames are grouped into [`Frameset`]s, which own them.

pub mod iter;
pub mod label;
pub mod set;
pub mod sof;

pub use iter::{Direction, FramesetIterator};
pub use label::Labelling;
pub use set::{FrameId, Frameset, TagMatches};

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of data a frame's file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FrameType {
    #[default]
    None,
    Image,
    Matrix,
    Table,
}

/// Role of a frame in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FrameGroup {
    #[default]
    None,
    Raw,
    Calib,
    Product,
}

/// Processing level of a product frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FrameLevel {
    #[default]
    None,
    Temporary,
    Intermediate,
    Final,
}

impl FrameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameType::None => "NONE",
            FrameType::Image => "IMAGE",
            FrameType::Matrix => "MATRIX",
            FrameType::Table => "TABLE",
        }
    }
}

impl FrameGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameGroup::None => "NONE",
            FrameGroup::Raw => "RAW",
            FrameGroup::Calib => "CALIB",
            FrameGroup::Product => "PRODUCT",
        }
    }
}

impl FrameLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameLevel::None => "NONE",
            FrameLevel::Temporary => "TEMPORARY",
            FrameLevel::Intermediate => "INTERMEDIATE",
            FrameLevel::Final => "FINAL",
        }
    }
}

impl FromStr for FrameType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(FrameType::None),
            "IMAGE" => Ok(FrameType::Image),
            "MATRIX" => Ok(FrameType::Matrix),
            "TABLE" => Ok(FrameType::Table),
            other => Err(CoreError::IllegalInput(format!("Unknown frame type: {}", other))),
        }
    }
}

impl FromStr for FrameGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(FrameGroup::None),
            "RAW" => Ok(FrameGroup::Raw),
            "CALIB" => Ok(FrameGroup::Calib),
            "PRODUCT" => Ok(FrameGroup::Product),
            other => Err(CoreError::IllegalInput(format!("Unknown frame group: {}", other))),
        }
    }
}

impl FromStr for FrameLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(FrameLevel::None),
            "TEMPORARY" => Ok(FrameLevel::Temporary),
            "INTERMEDIATE" => Ok(FrameLevel::Intermediate),
            "FINAL" => Ok(FrameLevel::Final),
            other => Err(CoreError::IllegalInput(format!("Unknown frame level: {}", other))),
        }
    }
}

/// Pipeline metadata of one data file
///
/// Cloning a frame yields an independent copy; a frame handed to
/// [`Frameset::insert`] is owned by that set from then on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    filename: Option<String>,
    tag: Option<String>,
    #[serde(rename = "type")]
    frame_type: FrameType,
    group: FrameGroup,
    level: FrameLevel,
}

impl Frame {
    /// Create an empty frame: no file, no tag, every enum at `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame for `filename` categorised as `tag`.
    pub fn tagged(filename: impl Into<String>, tag: impl Into<String>) -> Self {
        Frame {
            filename: Some(filename.into()),
            tag: Some(tag.into()),
            ..Self::default()
        }
    }

    pub fn with_group(mut self, group: FrameGroup) -> Self {
        self.group = group;
        self
    }

    pub fn with_type(mut self, frame_type: FrameType) -> Self {
        self.frame_type = frame_type;
        self
    }

    pub fn with_level(mut self, level: FrameLevel) -> Self {
        self.level = level;
        self
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn frame_type(&self) -> FrameType {
        self.frame_type
    }

    pub fn group(&self) -> FrameGroup {
        self.group
    }

    pub fn level(&self) -> FrameLevel {
        self.level
    }

    pub fn set_filename(&mut self, filename: Option<String>) {
        self.filename = filename;
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn set_type(&mut self, frame_type: FrameType) {
        self.frame_type = frame_type;
    }

    pub fn set_group(&mut self, group: FrameGroup) {
        self.group = group;
    }

    pub fn set_level(&mut self, level: FrameLevel) {
        self.level = level;
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [tag={}, type={}, group={}, level={}]",
            self.filename.as_deref().unwrap_or("(no file)"),
            self.tag.as_deref().unwrap_or("(untagged)"),
            self.frame_type.as_str(),
            self.group.as_str(),
            self.level.as_str()
        )
    }
}
