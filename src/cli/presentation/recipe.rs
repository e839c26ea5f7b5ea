//! Recipe presentation: recipe list and parameter tables.

use super::shared::{format_section_heading, to_json, yes_no};
use crate::error::CoreError;
use crate::parameter::{ParameterList, ParameterMode};
use crate::plugin::{PluginInfo, Version};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

pub fn format_recipe_list_text(recipes: &[PluginInfo], color: bool) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Recipes", color));
    if recipes.is_empty() {
        out.push_str("No recipes available.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Recipe", "Type", "Version", "Synopsis"]);
    for info in recipes {
        table.add_row(vec![
            info.name.clone(),
            info.plugin_type.to_string(),
            Version::from_code(info.version).to_string(),
            info.synopsis.clone(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_recipe_list_json(recipes: &[PluginInfo]) -> Result<String, CoreError> {
    let rows: Vec<_> = recipes
        .iter()
        .map(|info| {
            json!({
                "name": info.name,
                "type": info.plugin_type.as_str(),
                "version": Version::from_code(info.version).to_string(),
                "synopsis": info.synopsis,
                "description": info.description,
                "author": info.author,
                "email": info.email,
                "copyright": info.copyright,
            })
        })
        .collect();
    to_json(&json!({ "recipes": rows, "total": recipes.len() }))
}

pub fn format_parameters_text(
    recipe: &str,
    parameters: &ParameterList,
    color: bool,
) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("Parameters of {}", recipe), color)
    );
    if parameters.is_empty() {
        out.push_str("Recipe takes no parameters.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "Name", "Alias", "Type", "Value", "Default", "Allowed", "Env", "Description",
    ]);
    for p in parameters {
        table.add_row(vec![
            p.name().to_string(),
            p.alias(ParameterMode::Cli).unwrap_or("-").to_string(),
            format!("{} {}", p.class().as_str(), p.param_type().as_str()),
            p.value().to_string(),
            p.default_value().to_string(),
            p.constraint_summary().unwrap_or_else(|| "-".to_string()),
            yes_no(p.is_enabled(ParameterMode::Env)).to_string(),
            p.description().to_string(),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_parameters_json(
    recipe: &str,
    parameters: &ParameterList,
) -> Result<String, CoreError> {
    to_json(&json!({ "recipe": recipe, "parameters": parameters }))
}
