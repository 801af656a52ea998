//! Shared types used across all pipeline stages.
//!
//! The content model is parsed from TOML during scan, serialized to JSON
//! between stages (scan → process → generate), and consumed by the
//! section renderers. One definition serves all three stages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

/// The complete site manifest: everything generate needs to render the page.
///
/// Scan writes it with empty `images` variant lists; process fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub profile: Profile,
    /// Raw markdown for the about section body, converted to HTML at
    /// generate time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Experience>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactContent>,
    /// Files under `assets/`, relative to the content root, copied verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
    #[serde(default)]
    pub images: ImageSets,
    /// Resolved site configuration, embedded so later stages read one file.
    #[serde(default)]
    pub config: SiteConfig,
}

/// Identity and hero/about data from `profile.toml`. The only required
/// content file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// One-line role description shown under the name ("Full Stack Developer").
    pub headline: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Portrait image path, relative to the content root. Optional; the
    /// hero falls back to an initials monogram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<SocialLink>,
    #[serde(default)]
    pub hero: HeroCopy,
    /// Short claims rendered as a checklist in the about section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    /// Stat cards for the about section ("15+ projects", "8.5 GPA", ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// Hero call-to-action copy. All fields have stock defaults so a minimal
/// profile renders a complete hero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroCopy {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_primary_cta")]
    pub primary_cta: String,
    #[serde(default = "default_secondary_cta")]
    pub secondary_cta: String,
}

impl Default for HeroCopy {
    fn default() -> Self {
        HeroCopy {
            greeting: default_greeting(),
            primary_cta: default_primary_cta(),
            secondary_cta: default_secondary_cta(),
        }
    }
}

fn default_greeting() -> String {
    "Hi, I'm".to_string()
}

fn default_primary_cta() -> String {
    "Get In Touch".to_string()
}

fn default_secondary_cta() -> String {
    "View My Work".to_string()
}

/// `experience.toml`: `[[role]]` entries plus an optional `[education]` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    #[serde(rename = "role", default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Education>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Role {
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form date range ("Jan 2025 – Present").
    pub period: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub period: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// `projects.toml`: `[[project]]` entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Screenshot path relative to the content root. Optional; the card
    /// falls back to a monogram banner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Derived from `title` at scan time; also the screenshot file stem.
    #[serde(default)]
    pub slug: String,
}

/// `skills.toml`: `[[category]]` entries plus flat strength/interest lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skills {
    #[serde(rename = "category", default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<SkillCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillCategory {
    pub title: String,
    pub items: Vec<String>,
}

/// `contact.toml`: intro copy, direct channels, availability notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactContent {
    #[serde(default)]
    pub pitch: String,
    #[serde(rename = "channel", default, skip_serializing_if = "Vec::is_empty")]
    pub channels: Vec<Channel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub availability: Vec<String>,
}

/// A direct contact channel (email, phone, profile link). Rendered as a
/// link when `href` is set, plain text otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Channel {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Processed-image index, filled by the process stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<ImageSet>,
    /// Keyed by project slug.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub screenshots: BTreeMap<String, ImageSet>,
}

/// One source image and the responsive variants encoded from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSet {
    /// Source path relative to the content root.
    pub source: String,
    /// Empty until the process stage has run.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// One encoded size: an AVIF/WebP pair sharing identical pixel dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// The configured target size this variant was encoded for.
    pub target: u32,
    /// Output filenames relative to the image output directory.
    pub avif: String,
    pub webp: String,
    pub width: u32,
    pub height: u32,
}

impl ImageSets {
    pub fn is_empty(&self) -> bool {
        self.portrait.is_none() && self.screenshots.is_empty()
    }

    /// Number of source images awaiting processing.
    pub fn source_count(&self) -> usize {
        usize::from(self.portrait.is_some()) + self.screenshots.len()
    }
}
