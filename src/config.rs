//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are overridden by an optional `config.toml` at the content root; config
//! files are sparse, so authors only write the keys they want to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! description = ""          # Meta description / OG description
//! lang = "en"               # <html lang>
//! # title = "..."           # Page title (defaults to the profile name)
//! # base_url = "https://…"  # Absolute URL base for OG tags
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f6f8fb"       # Cards, badges, form fields
//! text = "#111827"
//! text_muted = "#6b7280"
//! border = "#e5e7eb"
//! accent = "#4f46e5"
//! accent_hover = "#4338ca"
//!
//! [colors.dark]
//! background = "#0b1120"
//! surface = "#161e31"
//! text = "#e5e7eb"
//! text_muted = "#9ca3af"
//! border = "#273043"
//! accent = "#818cf8"
//! accent_hover = "#a5b4fc"
//!
//! [theme]
//! max_width = "72rem"       # Content column width
//! radius = "0.75rem"        # Corner radius for cards and buttons
//! section_gap = "6rem"      # Vertical rhythm between sections
//! font_body = "system-ui, -apple-system, 'Segoe UI', sans-serif"
//! font_mono = "ui-monospace, 'Cascadia Code', monospace"
//!
//! [images]
//! portrait_sizes = [320, 640, 960]
//! screenshot_sizes = [640, 1280]
//! portrait_aspect = [1, 1]  # Crop ratio for the hero portrait
//! quality = 90              # AVIF/WebP quality (0-100)
//!
//! [reveal]
//! enabled = true            # Scroll-reveal entrance animations
//! threshold = 0.1           # Fraction of the element that must be visible
//! margin = -100             # Viewport inset in px before reveal fires
//! duration_ms = 600
//! distance = 50             # Initial downward offset in px
//! scale = 0.95              # Initial scale
//! stagger_ms = 100          # Extra delay per sibling in grids
//! delay_ms = 200            # Base delay before the first reveal
//!
//! [relay]
//! # Email relay credentials. The stock values are placeholders; the
//! # contact form refuses to submit until all three are replaced.
//! service_id = "service_xxxxxxx"
//! template_id = "template_xxxxxxx"
//! public_key = "public_key_xxxxxxx"
//! endpoint = "https://api.emailjs.com/api/v1.0/email/send"
//! timeout_secs = 10
//! # to_email = "..."        # Recipient (defaults to the profile email)
//!
//! [processing]
//! # max_processes = 4       # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Stock relay identifiers meaning "the owner has not set this up yet".
pub const PLACEHOLDER_SERVICE_ID: &str = "service_xxxxxxx";
pub const PLACEHOLDER_TEMPLATE_ID: &str = "template_xxxxxxx";
pub const PLACEHOLDER_PUBLIC_KEY: &str = "public_key_xxxxxxx";

/// Default relay endpoint (an EmailJS-compatible REST API).
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page metadata (title, description, base URL).
    pub site: SiteMeta,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Layout tokens (column width, radius, fonts).
    pub theme: ThemeConfig,
    /// Responsive image generation settings (sizes, quality, crop).
    pub images: ImagesConfig,
    /// Scroll-reveal animation settings.
    pub reveal: RevealConfig,
    /// Email relay credentials for the contact form.
    pub relay: RelayConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 0-100".into(),
            ));
        }
        if self.images.portrait_sizes.is_empty() {
            return Err(ConfigError::Validation(
                "images.portrait_sizes must not be empty".into(),
            ));
        }
        if self.images.screenshot_sizes.is_empty() {
            return Err(ConfigError::Validation(
                "images.screenshot_sizes must not be empty".into(),
            ));
        }
        if self.images.portrait_aspect[0] == 0 || self.images.portrait_aspect[1] == 0 {
            return Err(ConfigError::Validation(
                "images.portrait_aspect values must be non-zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.scale) || self.reveal.scale == 0.0 {
            return Err(ConfigError::Validation(
                "reveal.scale must be greater than 0.0 and at most 1.0".into(),
            ));
        }
        if self.relay.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "relay.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Page `<title>`. When unset, the profile name is used.
    pub title: Option<String>,
    /// Meta/OG description.
    pub description: String,
    /// Absolute URL base for open-graph tags (no trailing slash).
    pub base_url: Option<String>,
    /// `<html lang>` attribute.
    pub lang: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            base_url: None,
            lang: "en".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Responsive image generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Pixel widths to encode for the hero portrait `<picture>`.
    pub portrait_sizes: Vec<u32>,
    /// Pixel widths to encode for project screenshots.
    pub screenshot_sizes: Vec<u32>,
    /// Crop ratio `[width, height]` applied to the portrait.
    pub portrait_aspect: [u32; 2],
    /// AVIF/WebP encoding quality (0 = worst, 100 = best).
    pub quality: u32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            portrait_sizes: vec![320, 640, 960],
            screenshot_sizes: vec![640, 1280],
            portrait_aspect: [1, 1],
            quality: 90,
        }
    }
}

/// Layout tokens emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Content column width (CSS value).
    pub max_width: String,
    /// Corner radius for cards, buttons, and form fields (CSS value).
    pub radius: String,
    /// Vertical rhythm between sections (CSS value).
    pub section_gap: String,
    /// Body font stack.
    pub font_body: String,
    /// Monospace stack (badges, period labels).
    pub font_mono: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            max_width: "72rem".to_string(),
            radius: "0.75rem".to_string(),
            section_gap: "6rem".to_string(),
            font_body: "system-ui, -apple-system, 'Segoe UI', sans-serif".to_string(),
            font_mono: "ui-monospace, 'Cascadia Code', monospace".to_string(),
        }
    }
}

/// Scroll-reveal animation settings.
///
/// Elements carrying `data-reveal` start hidden (shifted down by
/// `distance` px at `scale`) and transition to visible the first time
/// they intersect the viewport. The transition fires once per element
/// and never reverts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Master switch. When false the page renders fully visible and no
    /// observer script is emitted.
    pub enabled: bool,
    /// Fraction of the element that must be visible to count as an
    /// intersection (0.0 - 1.0).
    pub threshold: f64,
    /// Root margin in px. Negative values inset the viewport, so the
    /// element must scroll further in before revealing.
    pub margin: i32,
    /// Transition duration in ms.
    pub duration_ms: u32,
    /// Initial downward offset in px.
    pub distance: u32,
    /// Initial scale (1.0 disables the scale-up effect).
    pub scale: f64,
    /// Extra delay per sibling in card grids, in ms.
    pub stagger_ms: u32,
    /// Base delay before the first reveal, in ms.
    pub delay_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.1,
            margin: -100,
            duration_ms: 600,
            distance: 50,
            scale: 0.95,
            stagger_ms: 100,
            delay_ms: 200,
        }
    }
}

/// Email relay credentials and transport settings for the contact form.
///
/// The stock identifiers are placeholders; until all three are replaced
/// the form (and `send-test`) short-circuits with a "not configured"
/// error instead of calling the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Relay REST endpoint. Override to self-host or to point tests at a
    /// local server.
    pub endpoint: String,
    /// Recipient address. When empty, the profile email is used.
    pub to_email: String,
    /// HTTP timeout for a submission attempt.
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: PLACEHOLDER_SERVICE_ID.to_string(),
            template_id: PLACEHOLDER_TEMPLATE_ID.to_string(),
            public_key: PLACEHOLDER_PUBLIC_KEY.to_string(),
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            to_email: String::new(),
            timeout_secs: 10,
        }
    }
}

impl RelayConfig {
    /// True when every credential is set to a real (non-placeholder,
    /// non-empty) value.
    pub fn is_configured(&self) -> bool {
        self.placeholder_fields().is_empty()
    }

    /// Names of credential fields still empty or carrying placeholder
    /// values, for check output and error messages.
    pub fn placeholder_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.service_id.is_empty() || self.service_id == PLACEHOLDER_SERVICE_ID {
            fields.push("service_id");
        }
        if self.template_id.is_empty() || self.template_id == PLACEHOLDER_TEMPLATE_ID {
            fields.push("template_id");
        }
        if self.public_key.is_empty() || self.public_key == PLACEHOLDER_PUBLIC_KEY {
            fields.push("public_key");
        }
        fields
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background color.
    pub background: String,
    /// Raised-element background (cards, badges, form fields).
    pub surface: String,
    /// Primary text color.
    pub text: String,
    /// Muted/secondary text color (period labels, captions, nav).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Accent color (links, buttons, highlights).
    pub accent: String,
    /// Accent hover color.
    pub accent_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f6f8fb".to_string(),
            text: "#111827".to_string(),
            text_muted: "#6b7280".to_string(),
            border: "#e5e7eb".to_string(),
            accent: "#4f46e5".to_string(),
            accent_hover: "#4338ca".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0b1120".to_string(),
            surface: "#161e31".to_string(),
            text: "#e5e7eb".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#273043".to_string(),
            accent: "#818cf8".to_string(),
            accent_hover: "#a5b4fc".to_string(),
        }
    }

    fn css_vars(&self, indent: &str) -> String {
        format!(
            "{i}--color-bg: {};\n\
             {i}--color-surface: {};\n\
             {i}--color-text: {};\n\
             {i}--color-text-muted: {};\n\
             {i}--color-border: {};\n\
             {i}--color-accent: {};\n\
             {i}--color-accent-hover: {};",
            self.background,
            self.surface,
            self.text,
            self.text_muted,
            self.border,
            self.accent,
            self.accent_hover,
            i = indent,
        )
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command and by `init`.
pub fn stock_config_toml() -> &'static str {
    r##"# Monofolio Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Page metadata
# ---------------------------------------------------------------------------
[site]
# Page <title>. When unset, the profile name is used.
# title = "Jane Doe - Full Stack Developer"

# Meta/OG description shown in search results and link previews.
description = ""

# Absolute URL base for open-graph tags (no trailing slash).
# base_url = "https://example.com"

# <html lang> attribute.
lang = "en"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f6f8fb"       # Cards, badges, form fields
text = "#111827"
text_muted = "#6b7280"    # Period labels, captions, nav
border = "#e5e7eb"
accent = "#4f46e5"        # Links, buttons, highlights
accent_hover = "#4338ca"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark, or the theme toggle)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0b1120"
surface = "#161e31"
text = "#e5e7eb"
text_muted = "#9ca3af"
border = "#273043"
accent = "#818cf8"
accent_hover = "#a5b4fc"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[theme]
# Content column width (CSS value).
max_width = "72rem"

# Corner radius for cards, buttons, and form fields (CSS value).
radius = "0.75rem"

# Vertical rhythm between sections (CSS value).
section_gap = "6rem"

# Font stacks.
font_body = "system-ui, -apple-system, 'Segoe UI', sans-serif"
font_mono = "ui-monospace, 'Cascadia Code', monospace"

# ---------------------------------------------------------------------------
# Responsive image generation
# ---------------------------------------------------------------------------
[images]
# Pixel widths to encode for the hero portrait <picture>.
portrait_sizes = [320, 640, 960]

# Pixel widths to encode for project screenshots.
screenshot_sizes = [640, 1280]

# Crop ratio [width, height] applied to the portrait.
# [1, 1] for square, [4, 5] for a tall portrait.
portrait_aspect = [1, 1]

# AVIF/WebP encoding quality (0 = worst, 100 = best).
quality = 90

# ---------------------------------------------------------------------------
# Scroll-reveal animations
# ---------------------------------------------------------------------------
[reveal]
# Master switch. When false the page renders fully visible and no
# observer script is emitted.
enabled = true

# Fraction of an element that must be visible to trigger its reveal.
threshold = 0.1

# Root margin in px. Negative values inset the viewport, so elements
# must scroll further in before revealing.
margin = -100

# Transition duration in ms.
duration_ms = 600

# Initial downward offset in px, and initial scale.
distance = 50
scale = 0.95

# Extra delay per sibling card in grids, and base delay, in ms.
stagger_ms = 100
delay_ms = 200

# ---------------------------------------------------------------------------
# Contact form email relay
# ---------------------------------------------------------------------------
[relay]
# Credentials from your relay dashboard. The values below are
# placeholders; the form refuses to submit until all three are replaced.
service_id = "service_xxxxxxx"
template_id = "template_xxxxxxx"
public_key = "public_key_xxxxxxx"

# Relay REST endpoint. Override to self-host.
endpoint = "https://api.emailjs.com/api/v1.0/email/send"

# Recipient address. When empty, the profile email is used.
to_email = ""

# HTTP timeout for a submission attempt, in seconds.
timeout_secs = 10

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel image-processing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from color config.
///
/// Light values live on `:root`; dark values apply under an explicit
/// `data-theme="dark"` (set by the toggle) and, for visitors who never
/// touch the toggle, under `prefers-color-scheme: dark`.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{light}\n}}\n\n\
         :root[data-theme=\"dark\"] {{\n{dark}\n}}\n\n\
         @media (prefers-color-scheme: dark) {{\n    :root:not([data-theme=\"light\"]) {{\n{dark_auto}\n    }}\n}}",
        light = colors.light.css_vars("    "),
        dark = colors.dark.css_vars("    "),
        dark_auto = colors.dark.css_vars("        "),
    )
}

/// Generate CSS custom properties from layout config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --max-width: {max_width};
    --radius: {radius};
    --section-gap: {section_gap};
    --font-body: {font_body};
    --font-mono: {font_mono};
}}"#,
        max_width = theme.max_width,
        radius = theme.radius,
        section_gap = theme.section_gap,
        font_body = theme.font_body,
        font_mono = theme.font_mono,
    )
}

/// Generate CSS custom properties and overrides from reveal config.
///
/// The transition rules themselves live in the static stylesheet; this
/// emits the tunable values, plus a neutralizing override when reveals
/// are disabled.
pub fn generate_reveal_css(reveal: &RevealConfig) -> String {
    let mut css = format!(
        r#":root {{
    --reveal-duration: {duration}ms;
    --reveal-distance: {distance}px;
    --reveal-scale: {scale};
}}"#,
        duration = reveal.duration_ms,
        distance = reveal.distance,
        scale = reveal.scale,
    );
    if !reveal.enabled {
        css.push_str("\n\n[data-reveal] {\n    opacity: 1;\n    transform: none;\n}");
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_colors() {
        let config = SiteConfig::default();
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0b1120");
    }

    #[test]
    fn default_config_has_image_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.images.portrait_sizes, vec![320, 640, 960]);
        assert_eq!(config.images.screenshot_sizes, vec![640, 1280]);
        assert_eq!(config.images.portrait_aspect, [1, 1]);
        assert_eq!(config.images.quality, 90);
    }

    #[test]
    fn default_relay_is_unconfigured() {
        let config = SiteConfig::default();
        assert!(!config.relay.is_configured());
        assert_eq!(
            config.relay.placeholder_fields(),
            vec!["service_id", "template_id", "public_key"]
        );
    }

    #[test]
    fn relay_configured_when_all_credentials_set() {
        let relay = RelayConfig {
            service_id: "service_k81ru2p".to_string(),
            template_id: "template_w0q3j5n".to_string(),
            public_key: "Xy12AbCd34EfGh56".to_string(),
            ..RelayConfig::default()
        };
        assert!(relay.is_configured());
        assert!(relay.placeholder_fields().is_empty());
    }

    #[test]
    fn relay_partial_placeholder_names_remaining_fields() {
        let relay = RelayConfig {
            service_id: "service_k81ru2p".to_string(),
            ..RelayConfig::default()
        };
        assert!(!relay.is_configured());
        assert_eq!(relay.placeholder_fields(), vec!["template_id", "public_key"]);
    }

    #[test]
    fn relay_empty_credential_counts_as_placeholder() {
        let relay = RelayConfig {
            service_id: String::new(),
            template_id: "template_w0q3j5n".to_string(),
            public_key: "Xy12AbCd34EfGh56".to_string(),
            ..RelayConfig::default()
        };
        assert_eq!(relay.placeholder_fields(), vec!["service_id"]);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
background = "#fafafa"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.colors.light.background, "#fafafa");
        // Default values preserved
        assert_eq!(config.colors.light.text, "#111827");
        assert_eq!(config.colors.dark.background, "#0b1120");
        assert_eq!(config.images.quality, 90);
    }

    #[test]
    fn parse_image_settings() {
        let toml = r#"
[images]
portrait_sizes = [400, 800]
quality = 85
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.images.portrait_sizes, vec![400, 800]);
        assert_eq!(config.images.quality, 85);
        // Unspecified defaults preserved
        assert_eq!(config.images.screenshot_sizes, vec![640, 1280]);
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn parse_reveal_settings() {
        let toml = r#"
[reveal]
enabled = false
duration_ms = 300
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert!(!config.reveal.enabled);
        assert_eq!(config.reveal.duration_ms, 300);
        // Unspecified defaults preserved
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.margin, -100);
    }

    #[test]
    fn parse_relay_settings() {
        let toml = r#"
[relay]
service_id = "service_k81ru2p"
template_id = "template_w0q3j5n"
public_key = "Xy12AbCd34EfGh56"
to_email = "owner@example.com"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert!(config.relay.is_configured());
        assert_eq!(config.relay.to_email, "owner@example.com");
        assert_eq!(config.relay.endpoint, DEFAULT_RELAY_ENDPOINT);
        assert_eq!(config.relay.timeout_secs, 10);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();

        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0b1120");
        assert!(!config.relay.is_configured());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        fs::write(
            &config_path,
            r##"
[colors.light]
background = "#123456"
text = "#abcdef"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.colors.light.background, "#123456");
        assert_eq!(config.colors.light.text, "#abcdef");
        // Unspecified values should be defaults
        assert_eq!(config.colors.dark.background, "#0b1120");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    // =========================================================================
    // CSS generation tests
    // =========================================================================

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-bg: #1a1a1a"));
    }

    #[test]
    fn generate_css_includes_all_variables() {
        let colors = ColorConfig::default();
        let css = generate_color_css(&colors);

        assert!(css.contains("--color-bg:"));
        assert!(css.contains("--color-surface:"));
        assert!(css.contains("--color-text:"));
        assert!(css.contains("--color-text-muted:"));
        assert!(css.contains("--color-border:"));
        assert!(css.contains("--color-accent:"));
        assert!(css.contains("--color-accent-hover:"));
    }

    #[test]
    fn generate_css_covers_toggle_and_os_preference() {
        let colors = ColorConfig::default();
        let css = generate_color_css(&colors);

        // Explicit toggle override
        assert!(css.contains(":root[data-theme=\"dark\"]"));
        // OS preference for visitors who never touch the toggle
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
        // An explicit light choice beats a dark OS preference
        assert!(css.contains(":root:not([data-theme=\"light\"])"));
    }

    #[test]
    fn color_scheme_default_is_light() {
        let scheme = ColorScheme::default();
        assert_eq!(scheme.background, "#ffffff");
    }

    #[test]
    fn generate_theme_css_includes_layout_variables() {
        let theme = ThemeConfig::default();
        let css = generate_theme_css(&theme);
        assert!(css.contains("--max-width: 72rem"));
        assert!(css.contains("--radius: 0.75rem"));
        assert!(css.contains("--section-gap: 6rem"));
        assert!(css.contains("--font-body: system-ui"));
    }

    #[test]
    fn generate_reveal_css_includes_motion_variables() {
        let reveal = RevealConfig::default();
        let css = generate_reveal_css(&reveal);
        assert!(css.contains("--reveal-duration: 600ms"));
        assert!(css.contains("--reveal-distance: 50px"));
        assert!(css.contains("--reveal-scale: 0.95"));
        assert!(!css.contains("transform: none"));
    }

    #[test]
    fn generate_reveal_css_disabled_neutralizes_hidden_state() {
        let reveal = RevealConfig {
            enabled: false,
            ..RevealConfig::default()
        };
        let css = generate_reveal_css(&reveal);
        assert!(css.contains("opacity: 1"));
        assert!(css.contains("transform: none"));
    }

    // =========================================================================
    // Processing config tests
    // =========================================================================

    #[test]
    fn default_processing_config() {
        let config = ProcessingConfig::default();
        assert_eq!(config.max_processes, None);
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let threads = effective_threads(&config);
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let threads = effective_threads(&config);
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(threads, cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str(r#"quality = 90"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"quality = 70"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("quality").unwrap().as_integer(), Some(70));
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str(
            r#"
[images]
portrait_sizes = [320, 640]
quality = 90
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r#"
[images]
quality = 70
"#,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let images = merged.get("images").unwrap();
        assert_eq!(images.get("quality").unwrap().as_integer(), Some(70));
        // portrait_sizes preserved from base
        assert_eq!(
            images.get("portrait_sizes").unwrap().as_array().unwrap().len(),
            2
        );
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
a = 1
b = 2
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(r#"a = 10"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").unwrap().as_integer(), Some(10));
        assert_eq!(merged.get("b").unwrap().as_integer(), Some(2));
    }

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fff"
text = "#000"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let light = merged.get("colors").unwrap().get("light").unwrap();
        assert_eq!(light.get("background").unwrap().as_str(), Some("#fafafa"));
        assert_eq!(light.get("text").unwrap().as_str(), Some("#000"));
    }

    // =========================================================================
    // Unknown key rejection tests
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let toml_str = r#"
[images]
qualty = 90
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_section_rejected() {
        let toml_str = r#"
[imagez]
quality = 90
"#;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml_str = r##"
[colors.light]
bg = "#fff"
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[relay]
servce_id = "service_k81ru2p"
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_quality_boundary_ok() {
        let mut config = SiteConfig::default();
        config.images.quality = 100;
        assert!(config.validate().is_ok());

        config.images.quality = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_quality_too_high() {
        let mut config = SiteConfig::default();
        config.images.quality = 101;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn validate_sizes_empty() {
        let mut config = SiteConfig::default();
        config.images.portrait_sizes = vec![];
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.images.screenshot_sizes = vec![];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_aspect_zero() {
        let mut config = SiteConfig::default();
        config.images.portrait_aspect = [0, 1];
        assert!(config.validate().is_err());

        config.images.portrait_aspect = [1, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_threshold_out_of_range() {
        let mut config = SiteConfig::default();
        config.reveal.threshold = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("threshold"));

        config.reveal.threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_scale_bounds() {
        let mut config = SiteConfig::default();
        config.reveal.scale = 0.0;
        assert!(config.validate().is_err());

        config.reveal.scale = 1.0;
        assert!(config.validate().is_ok());

        config.reveal.scale = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_relay_timeout_zero() {
        let mut config = SiteConfig::default();
        config.relay.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn validate_default_config_passes() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[images]
quality = 200
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // resolve_config / load_raw_config tests
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let result = load_raw_config(tmp.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_raw_config_returns_value_when_file_exists() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
[images]
quality = 85
"#,
        )
        .unwrap();

        let result = load_raw_config(tmp.path()).unwrap();
        assert!(result.is_some());
        let val = result.unwrap();
        assert_eq!(
            val.get("images")
                .unwrap()
                .get("quality")
                .unwrap()
                .as_integer(),
            Some(85)
        );
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let base = stock_defaults_value();
        let config = resolve_config(base, None).unwrap();
        assert_eq!(config.images.quality, 90);
        assert_eq!(config.colors.light.background, "#ffffff");
    }

    #[test]
    fn resolve_config_with_overlay() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[images]
quality = 70
"#,
        )
        .unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.images.quality, 70);
        // Other fields preserved from defaults
        assert_eq!(config.images.portrait_sizes, vec![320, 640, 960]);
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str(
            r#"
[reveal]
threshold = 2.0
"#,
        )
        .unwrap();
        let result = resolve_config(base, Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let content = stock_config_toml();
        let _: toml::Value = toml::from_str(content).expect("stock config must be valid TOML");
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let content = stock_config_toml();
        let config: SiteConfig = toml::from_str(content).unwrap();
        assert_eq!(config.images.quality, 90);
        assert_eq!(config.images.portrait_sizes, vec![320, 640, 960]);
        assert_eq!(config.colors.light.background, "#ffffff");
        assert_eq!(config.colors.dark.background, "#0b1120");
        assert_eq!(config.theme.max_width, "72rem");
        assert_eq!(config.reveal.threshold, 0.1);
        assert!(!config.relay.is_configured());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[site]"));
        assert!(content.contains("[colors.light]"));
        assert!(content.contains("[colors.dark]"));
        assert!(content.contains("[theme]"));
        assert!(content.contains("[images]"));
        assert!(content.contains("[reveal]"));
        assert!(content.contains("[relay]"));
        assert!(content.contains("[processing]"));
    }

    // =========================================================================
    // stock_defaults_value tests
    // =========================================================================

    #[test]
    fn stock_defaults_value_is_table() {
        let val = stock_defaults_value();
        assert!(val.is_table());
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.get("site").is_some());
        assert!(val.get("colors").is_some());
        assert!(val.get("theme").is_some());
        assert!(val.get("images").is_some());
        assert!(val.get("reveal").is_some());
        assert!(val.get("relay").is_some());
        assert!(val.get("processing").is_some());
    }
}
