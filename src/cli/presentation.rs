//! CLI presentation: text and json formatters per command family.

mod frames;
mod recipe;
mod run;
mod shared;

pub use frames::{format_frames_json, format_frames_text, format_tag_counts_text};
pub use recipe::{
    format_parameters_json, format_parameters_text, format_recipe_list_json,
    format_recipe_list_text,
};
pub use run::{format_run_report_json, format_run_report_text};
pub use shared::to_json;
