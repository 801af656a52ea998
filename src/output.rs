//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity leads
//! with its identity (section name, image label) and filesystem paths show
//! up as indented `Source:` context lines. Scan, process and generate use
//! the same labels for the same entities, so the three stages read as one
//! inventory.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Avery Park (Full Stack Developer)
//!
//! Sections
//!     hero
//!     about
//!     projects (3)
//!     contact
//!
//! Images
//!     Portrait
//!         Source: assets/portrait.jpg
//!     Taskboard
//!         Source: assets/board.png
//!
//! Assets
//!     assets/favicon.svg
//! ```
//!
//! ## Process
//!
//! ```text
//! Processing 2 images
//! Portrait
//!     Source: assets/portrait.jpg
//!     320px avif: cached
//!     320px webp: encoded
//! ```
//!
//! ## Generate
//!
//! ```text
//! index.html (hero, about, projects, contact)
//! Copied 12 image files, 2 assets
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::process::{ProcessEvent, VariantStatus};
use crate::sections;
use crate::types::Manifest;

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered site structure.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} ({})",
        manifest.profile.name, manifest.profile.headline
    ));

    lines.push(String::new());
    lines.push("Sections".to_string());
    for section in sections::present_sections(manifest) {
        let count = match section {
            "experience" => manifest.experience.as_ref().map(|e| e.roles.len()),
            "projects" => Some(manifest.projects.len()),
            "skills" => manifest.skills.as_ref().map(|s| s.categories.len()),
            _ => None,
        };
        match count {
            Some(n) => lines.push(format!("    {} ({})", section, n)),
            None => lines.push(format!("    {}", section)),
        }
    }

    if !manifest.images.is_empty() {
        lines.push(String::new());
        lines.push("Images".to_string());
        if let Some(portrait) = &manifest.images.portrait {
            lines.push("    Portrait".to_string());
            lines.push(format!("        Source: {}", portrait.source));
        }
        for (slug, set) in &manifest.images.screenshots {
            let title = manifest
                .projects
                .iter()
                .find(|p| p.slug == *slug)
                .map(|p| p.title.as_str())
                .unwrap_or(slug);
            lines.push(format!("    {}", title));
            lines.push(format!("        Source: {}", set.source));
        }
    }

    if !manifest.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        for asset in &manifest.assets {
            lines.push(format!("    {}", asset));
        }
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Process output
// ============================================================================

/// Format a single process progress event as display lines.
///
/// Each image leads with its label (the label scan used); source path and
/// per-variant cache status follow as indented context.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started { image_count } => {
            vec![format!("Processing {} images", image_count)]
        }
        ProcessEvent::ImageProcessed {
            label,
            source_path,
            variants,
        } => {
            let mut lines = vec![label.clone()];
            lines.push(format!("    Source: {}", source_path));
            for variant in variants {
                let status_str = match &variant.status {
                    VariantStatus::Cached => "cached",
                    VariantStatus::Copied => "copied",
                    VariantStatus::Encoded => "encoded",
                };
                lines.push(format!("    {}: {}", variant.label, status_str));
            }
            lines
        }
    }
}

/// Print a process event to stdout.
pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Generate output
// ============================================================================

/// Format generate stage output: the page and what was copied next to it.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    vec![
        format!("index.html ({})", summary.sections.join(", ")),
        format!(
            "Copied {} image files, {} assets",
            summary.image_count, summary.asset_count
        ),
    ]
}

/// Print generate output to stdout.
pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the check report: conditions that won't fail a build but change
/// what renders.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    let placeholders = manifest.config.relay.placeholder_fields();
    if placeholders.is_empty() {
        lines.push("Contact relay: configured".to_string());
    } else {
        lines.push(format!(
            "Contact relay: not configured ({} still placeholder)",
            placeholders.join(", ")
        ));
        lines.push("    The form will refuse to submit until these are set.".to_string());
    }

    if manifest.profile.portrait.is_none() {
        lines.push("Portrait: none (hero shows a monogram tile)".to_string());
    }

    let missing = manifest
        .projects
        .iter()
        .filter(|p| p.screenshot.is_none())
        .count();
    if missing > 0 {
        lines.push(format!(
            "Screenshots: {} projects without one (cards show monogram banners)",
            missing
        ));
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
