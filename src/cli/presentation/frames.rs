//! Frameset presentation.

use super::shared::{format_section_heading, to_json};
use crate::error::CoreError;
use crate::frame::Frameset;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_frames_text(frames: &Frameset, color: bool) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("Frames ({})", frames.len()), color)
    );
    if frames.is_empty() {
        out.push_str("Set of frames is empty.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "File", "Tag", "Group", "Type", "Level"]);
    for (index, frame) in frames.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            frame.filename().unwrap_or("-").to_string(),
            frame.tag().unwrap_or("-").to_string(),
            frame.group().as_str().to_string(),
            frame.frame_type().as_str().to_string(),
            frame.level().as_str().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_tag_counts_text(frames: &Frameset, color: bool) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Frames by tag", color));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Tag", "Frames"]);
    for tag in frames.tags() {
        table.add_row(vec![tag.to_string(), frames.count_tags(tag).to_string()]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_frames_json(frames: &Frameset, by_tag: bool) -> Result<String, CoreError> {
    if by_tag {
        let counts: serde_json::Map<String, serde_json::Value> = frames
            .tags()
            .map(|tag| (tag.to_string(), json!(frames.count_tags(tag))))
            .collect();
        return to_json(&json!({ "total": frames.len(), "tags": counts }));
    }
    to_json(&json!({ "total": frames.len(), "frames": frames }))
}
