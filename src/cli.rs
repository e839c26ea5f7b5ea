//! CLI domain: parse, route, help, output, and presentation only.
//! No recipe logic; the single route table dispatches to the host.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_frames_json, format_frames_text, format_parameters_json, format_parameters_text,
    format_recipe_list_json, format_recipe_list_text, format_run_report_json,
    format_run_report_text, format_tag_counts_text,
};
pub use route::{parse_overrides, RunContext};
