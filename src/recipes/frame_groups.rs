//! `frame_groups`: one product per class of raw frames
//!
//! Raw frames are partitioned by tag (optionally tag and frame type). For
//! every class with enough members a JSON member list is written to the
//! output directory and registered as a PRODUCT frame tagged
//! `<TAG>_GROUP`.

use crate::error::CoreError;
use crate::frame::{Frame, FrameGroup, FrameLevel, FrameType, Frameset};
use crate::parameter::{Parameter, ParameterList, ParameterMode};
use crate::plugin::Version;
use crate::recipe::{RecipeContext, RecipeDefinition, RecipeInfo};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

pub const NAME: &str = "frame_groups";
pub const PARAM_MIN_MEMBERS: &str = "framekit.frame_groups.min_members";
pub const PARAM_GROUP_BY: &str = "framekit.frame_groups.group_by";

const CONTEXT: &str = "framekit.frame_groups";

#[derive(Serialize)]
struct GroupManifest<'a> {
    tag: &'a str,
    frame_type: &'a str,
    label: usize,
    members: Vec<&'a Frame>,
}

/// Groups raw frames and writes one member list per group.
#[derive(Debug, Default)]
pub struct FrameGroups;

impl FrameGroups {
    /// Lowercase file stem for a group; anything but ASCII alphanumerics,
    /// `-`, `_` and `+` becomes `_` so the file stays in the output directory.
    fn file_stem(tag: &str, frame_type: Option<FrameType>) -> String {
        let raw = match frame_type {
            Some(frame_type) => format!("{}_{}", tag, frame_type.as_str()),
            None => tag.to_string(),
        };
        raw.chars()
            .map(|c| match c {
                c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
                '-' | '_' | '+' => c,
                _ => '_',
            })
            .collect()
    }

    /// Unused product path for `label`. A stem already taken in this run
    /// (tags differing only in case or punctuation) gets the label appended.
    fn product_path(
        context: &RecipeContext,
        taken: &mut HashSet<PathBuf>,
        tag: &str,
        frame_type: Option<FrameType>,
        label: usize,
    ) -> Result<PathBuf, CoreError> {
        let stem = Self::file_stem(tag, frame_type);
        let candidates = [
            format!("{}_group.json", stem),
            format!("{}_{}_group.json", stem, label),
        ];
        for candidate in candidates {
            let path = context.output_dir().join(candidate);
            if taken.insert(path.clone()) {
                return Ok(path);
            }
        }
        Err(CoreError::IllegalInput(format!(
            "Group '{}' (label {}) has no free product file name",
            tag, label
        )))
    }
}

impl RecipeDefinition for FrameGroups {
    fn info(&self) -> RecipeInfo {
        RecipeInfo {
            name: NAME.to_string(),
            version: Version::current(),
            synopsis: "Group raw frames by tag".to_string(),
            description: "Partitions the RAW frames of the input set into classes of \
                          equal tag (and optionally frame type) and writes one JSON \
                          member list per class as a product."
                .to_string(),
            author: "Framekit Contributors".to_string(),
            email: "framekit@example.org".to_string(),
            copyright: "MIT OR Apache-2.0".to_string(),
        }
    }

    fn fill_parameterlist(&self, parameters: &mut ParameterList) -> Result<(), CoreError> {
        let mut min_members = Parameter::range_int(
            PARAM_MIN_MEMBERS,
            "Smallest group that produces a product",
            Some(CONTEXT),
            1,
            1,
            10_000,
        );
        min_members.set_alias(ParameterMode::Cli, Some("min-members"));
        min_members.set_alias(ParameterMode::Env, Some("MIN_MEMBERS"));
        min_members.set_alias(ParameterMode::Cfg, Some(PARAM_MIN_MEMBERS));
        parameters.append(min_members)?;

        let mut group_by = Parameter::enum_string(
            PARAM_GROUP_BY,
            "Frame attributes that must agree within a group",
            Some(CONTEXT),
            "tag",
            vec!["tag".to_string(), "tag+type".to_string()],
        )?;
        group_by.set_alias(ParameterMode::Cli, Some("group-by"));
        group_by.set_alias(ParameterMode::Env, Some("GROUP_BY"));
        group_by.set_alias(ParameterMode::Cfg, Some(PARAM_GROUP_BY));
        parameters.append(group_by)?;

        Ok(())
    }

    fn run(
        &self,
        frames: &mut Frameset,
        parameters: &ParameterList,
        context: &mut RecipeContext,
    ) -> Result<(), CoreError> {
        let lookup = |name: &str| {
            parameters
                .find(name)
                .ok_or_else(|| CoreError::DataNotFound(format!("parameter {}", name)))
        };
        let min_members = lookup(PARAM_MIN_MEMBERS)?.get_int()?.max(1) as usize;
        let by_type = lookup(PARAM_GROUP_BY)?.get_string()? == "tag+type";

        let raw = Frameset::try_from_frames(
            frames
                .iter()
                .filter(|f| f.group() == FrameGroup::Raw)
                .cloned(),
        )?;
        if raw.is_empty() {
            return Err(context.record(
                NAME,
                CoreError::DataNotFound("No RAW frames in the input set".into()),
            ));
        }

        let labelling = raw.labelise(|a, b| {
            Ok(a.tag() == b.tag() && (!by_type || a.frame_type() == b.frame_type()))
        })?;

        std::fs::create_dir_all(context.output_dir())?;

        let mut products = Vec::new();
        let mut taken = HashSet::new();
        for label in 0..labelling.nlabels {
            let Some(members) = raw.extract(&labelling.labels, label)? else {
                continue;
            };
            let Some(first) = members.get_position(0).ok().cloned() else {
                continue;
            };
            let tag = first.tag().unwrap_or_default();
            if members.len() < min_members {
                warn!(
                    tag,
                    members = members.len(),
                    min_members,
                    "Group too small, no product written"
                );
                continue;
            }

            let path = Self::product_path(
                context,
                &mut taken,
                tag,
                by_type.then(|| first.frame_type()),
                label,
            )?;
            let manifest = GroupManifest {
                tag,
                frame_type: first.frame_type().as_str(),
                label,
                members: members.iter().collect(),
            };
            let json = serde_json::to_string_pretty(&manifest).map_err(|e| {
                CoreError::IllegalInput(format!("Cannot encode group manifest: {}", e))
            })?;
            std::fs::write(&path, json)?;

            info!(tag, members = members.len(), product = %path.display(), "Wrote group");
            products.push(
                Frame::tagged(path.to_string_lossy(), format!("{}_GROUP", tag))
                    .with_group(FrameGroup::Product)
                    .with_level(FrameLevel::Final)
                    .with_type(FrameType::Table),
            );
        }

        for product in products {
            frames.insert(product)?;
        }
        Ok(())
    }
}
