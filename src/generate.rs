//! HTML generation.
//!
//! Stage 3 of the build pipeline. Takes the processed manifest and renders
//! the complete single-page site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html            # The whole site: markup, CSS and JS inlined
//! ├── img/
//! │   ├── portrait-320.avif # Processed variants (copied)
//! │   ├── portrait-320.webp
//! │   └── ...
//! └── assets/
//!     └── favicon.svg       # Content assets (copied verbatim)
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into the page:
//! - `static/style.css`: layout and component styles; config-derived custom
//!   properties (colors, theme, reveal timing) are prepended
//! - `static/theme.js`: light/dark toggle
//! - `static/reveal.js`: scroll-reveal observer (omitted when `[reveal]`
//!   is disabled)
//! - `static/contact.js`: contact form validation and relay submission
//!
//! Runtime settings the scripts need (relay credentials, reveal tuning,
//! form messages) ride along in a JSON `<script id="site-config">` island.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; the
//! section renderers live in [`crate::sections`].

use crate::config::{self, SiteConfig};
use crate::contact;
use crate::sections;
use crate::types::Manifest;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS_THEME: &str = include_str!("../static/theme.js");
const JS_REVEAL: &str = include_str!("../static/reveal.js");
const JS_CONTACT: &str = include_str!("../static/contact.js");

/// What generate wrote, for the build summary.
#[derive(Debug)]
pub struct GenerateSummary {
    /// Sections rendered into the page, in order.
    pub sections: Vec<&'static str>,
    /// Processed image files copied into the output.
    pub image_count: usize,
    /// Asset files copied verbatim.
    pub asset_count: usize,
}

/// Generate the site from a manifest.
///
/// Renders `index.html`, copies the processed images from `processed_dir`
/// (everything except the manifests) and the `assets/` files from the
/// content root. Works on a scan-only manifest too: empty variant lists
/// fall back to monogram tiles and no image files are copied.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    processed_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let manifest: Manifest = serde_json::from_str(&fs::read_to_string(manifest_path)?)?;

    fs::create_dir_all(output_dir)?;
    fs::write(
        output_dir.join("index.html"),
        render_page(&manifest).into_string(),
    )?;

    let image_count = if processed_dir.is_dir() {
        copy_dir_recursive(processed_dir, output_dir)?
    } else {
        0
    };
    let asset_count = copy_assets(source_root, output_dir, &manifest.assets)?;

    Ok(GenerateSummary {
        sections: sections::present_sections(&manifest),
        image_count,
        asset_count,
    })
}

/// Render the complete HTML document for a manifest.
pub fn render_page(manifest: &Manifest) -> Markup {
    let site = &manifest.config.site;
    let title = site
        .title
        .clone()
        .unwrap_or_else(|| manifest.profile.name.clone());
    let css = page_css(&manifest.config);
    let favicon = find_favicon(&manifest.assets);
    let config_json = page_config_json(manifest);

    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if !site.description.is_empty() {
                    meta name="description" content=(site.description);
                }
                meta property="og:title" content=(title);
                meta property="og:type" content="website";
                @if !site.description.is_empty() {
                    meta property="og:description" content=(site.description);
                }
                @if let Some(url) = &site.base_url {
                    meta property="og:url" content=(url);
                }
                @if let Some(icon) = favicon {
                    link rel="icon" href=(icon);
                }
                style { (PreEscaped(css)) }
                @if manifest.config.reveal.enabled {
                    // Keep reveal-hidden blocks visible when scripts never run.
                    noscript {
                        style { (PreEscaped("[data-reveal] { opacity: 1; transform: none; }")) }
                    }
                }
            }
            body {
                (sections::render_header(manifest))
                main {
                    (sections::render_hero(manifest))
                    @if sections::has_about(manifest) {
                        (sections::render_about(manifest))
                    }
                    @if sections::has_experience(manifest) {
                        (sections::render_experience(manifest))
                    }
                    @if sections::has_projects(manifest) {
                        (sections::render_projects(manifest))
                    }
                    @if sections::has_skills(manifest) {
                        (sections::render_skills(manifest))
                    }
                    (sections::render_contact(manifest))
                }
                footer.site-footer {
                    p { (manifest.profile.name) " · " (manifest.profile.headline) }
                }
                script id="site-config" type="application/json" {
                    (PreEscaped(config_json))
                }
                script { (PreEscaped(JS_THEME)) }
                @if manifest.config.reveal.enabled {
                    script { (PreEscaped(JS_REVEAL)) }
                }
                script { (PreEscaped(JS_CONTACT)) }
            }
        }
    }
}

/// Full page stylesheet: config-derived custom properties first, then the
/// static styles that consume them.
fn page_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        config::generate_reveal_css(&config.reveal),
        CSS_STATIC,
    )
}

/// The `#site-config` JSON island read by the inline scripts.
///
/// `to_email` is resolved here (relay override or profile email) so the
/// scripts never re-derive it. `<` is escaped to keep the inline block
/// safe regardless of the config values.
fn page_config_json(manifest: &Manifest) -> String {
    let relay = &manifest.config.relay;
    let reveal = &manifest.config.reveal;
    let to_email = if relay.to_email.is_empty() {
        &manifest.profile.email
    } else {
        &relay.to_email
    };
    let value = serde_json::json!({
        "relay": {
            "service_id": relay.service_id,
            "template_id": relay.template_id,
            "public_key": relay.public_key,
            "endpoint": relay.endpoint,
            "to_email": to_email,
            "configured": relay.is_configured(),
        },
        "reveal": {
            "enabled": reveal.enabled,
            "threshold": reveal.threshold,
            "margin": reveal.margin,
        },
        "form": {
            "min_message_len": contact::MIN_MESSAGE_LEN,
            "success_reset_ms": contact::SUCCESS_RESET.as_millis() as u64,
            "messages": {
                "name_required": contact::NAME_REQUIRED,
                "email_required": contact::EMAIL_REQUIRED,
                "email_invalid": contact::EMAIL_INVALID,
                "message_required": contact::MESSAGE_REQUIRED,
                "message_too_short": contact::MESSAGE_TOO_SHORT,
                "not_configured": contact::NOT_CONFIGURED,
                "send_failed": contact::SEND_FAILED,
                "send_success": contact::SEND_SUCCESS,
            },
        },
    });
    value.to_string().replace('<', "\\u003c")
}

/// First asset named `favicon.*`, if any, for the `<link rel="icon">`.
fn find_favicon(assets: &[String]) -> Option<&str> {
    assets.iter().map(String::as_str).find(|rel| {
        Path::new(rel)
            .file_stem()
            .is_some_and(|stem| stem.eq_ignore_ascii_case("favicon"))
    })
}

/// Copy a directory tree, skipping `.json` files (the image manifests
/// don't belong in the published site). Returns the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            copied += copy_dir_recursive(&entry.path(), &dst.join(entry.file_name()))?;
        } else {
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            fs::copy(entry.path(), dst.join(entry.file_name()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn copy_assets(source_root: &Path, output_dir: &Path, assets: &[String]) -> io::Result<usize> {
    for rel in assets {
        let dst = output_dir.join(rel);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source_root.join(rel), &dst)?;
    }
    Ok(assets.len())
}
