//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! ## Generate
//!
//! ```text
//! warning: icon source is 512x512, below the recommended 1024x1024; outputs will be upscaled
//! assets/AppIcon.appiconset
//!     logo-16.png (16x16)
//!     logo-32.png (32x32)
//!     Contents.json
//! Generated 10 files
//! ```
//!
//! ## Templates
//!
//! ```text
//! ios/icon (18 variants)
//!     20x20 @2x (iphone)
//!     ...
//! ```

use crate::generate::GenerateReport;
use crate::templates::{ALL_COMBINATIONS, template_for};
use serde_json::Value;
use std::path::Path;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Format a generation report: warnings first, then the set directory with
/// one indented line per produced file.
pub fn format_report(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for warning in &report.warnings {
        lines.push(format!("warning: {warning}"));
    }

    lines.push(report.set_dir.display().to_string());
    for file in &report.files {
        lines.push(format!(
            "    {} ({}x{})",
            file.filename, file.width, file.height
        ));
    }
    lines.push(format!("    {}", file_name(&report.manifest_path)));
    if let Some(link_tags) = &report.link_tags_path {
        lines.push(format!("    {}", file_name(link_tags)));
    }

    let artifact_count =
        report.files.len() + 1 + usize::from(report.link_tags_path.is_some());
    lines.push(format!("Generated {artifact_count} files"));
    lines
}

pub fn print_report(report: &GenerateReport) {
    for line in format_report(report) {
        println!("{line}");
    }
}

/// Format the embedded template catalog, one block per `(platform, kind)`.
pub fn format_template_listing() -> Vec<String> {
    let mut lines = Vec::new();
    for &(platform, kind) in ALL_COMBINATIONS {
        let Ok(template) = template_for(platform, kind) else {
            continue;
        };
        lines.push(format!(
            "{platform}/{kind} ({} variants)",
            template.images.len()
        ));
        for variant in &template.images {
            let size = variant.size.as_deref().unwrap_or("auto");
            let idiom = variant
                .extra
                .get("idiom")
                .and_then(Value::as_str)
                .unwrap_or("-");
            lines.push(format!("    {size} @{} ({idiom})", variant.scale));
        }
    }
    lines
}

pub fn print_template_listing() {
    for line in format_template_listing() {
        println!("{line}");
    }
}
