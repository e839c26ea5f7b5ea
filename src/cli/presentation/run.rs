//! Run report presentation.

use super::shared::{format_section_heading, to_json, yes_no};
use crate::error::CoreError;
use crate::host::RunReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_run_report_text(report: &RunReport, dump_headers: bool, color: bool) -> String {
    let mut out = format!(
        "{}\n\n",
        format_section_heading(&format!("Run: {}", report.recipe), color)
    );
    let status = if color {
        "ok".green().to_string()
    } else {
        "ok".to_string()
    };
    out.push_str(&format!(
        "  Status: {}\n  Frames: {}\n  Products: {}\n  Time: {} ms\n\n",
        status,
        report.frames.len(),
        report.products.len(),
        report.elapsed_ms
    ));

    if !report.parameters.is_empty() {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Parameter", "Value", "Set by user"]);
        for p in &report.parameters {
            table.add_row(vec![
                p.name().to_string(),
                p.value().to_string(),
                yes_no(p.default_flag()).to_string(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }

    if report.products.is_empty() {
        out.push_str("No products written.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Product", "Category", "Type"]);
        for product in &report.products {
            table.add_row(vec![
                product.frame.filename().unwrap_or("-").to_string(),
                product.frame.tag().unwrap_or("-").to_string(),
                product
                    .header
                    .get_string("ESO PRO TYPE")
                    .unwrap_or("-")
                    .to_string(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }

    if !report.errors.is_empty() {
        let heading = format!("Recorded errors ({}):", report.errors.len());
        if color {
            out.push_str(&format!("\n{}\n", heading.yellow()));
        } else {
            out.push_str(&format!("\n{}\n", heading));
        }
        for entry in &report.errors {
            out.push_str(&format!("  - [{}] {}: {}\n", entry.kind, entry.location, entry.message));
        }
    }

    if dump_headers {
        for product in &report.products {
            out.push_str(&format!(
                "\n{}\n",
                format_section_heading(product.frame.filename().unwrap_or("product"), color)
            ));
            out.push_str(&product.header.to_string());
        }
    }
    out
}

pub fn format_run_report_json(report: &RunReport) -> Result<String, CoreError> {
    to_json(report)
}
