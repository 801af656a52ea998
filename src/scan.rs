//! Content loading and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the content directory, validates
//! it, and produces the structured manifest that subsequent stages consume.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Site configuration (optional)
//! ├── profile.toml                 # Identity, hero and about data (required)
//! ├── about.md                     # About section prose (optional)
//! ├── experience.toml              # [[role]] entries + [education] (optional)
//! ├── projects.toml                # [[project]] entries (optional)
//! ├── skills.toml                  # [[category]] entries (optional)
//! ├── contact.toml                 # [[channel]] entries + pitch (optional)
//! └── assets/                      # Copied verbatim into the output
//!     ├── portrait.jpg
//!     └── favicon.svg
//! ```
//!
//! Only `profile.toml` is required; a section whose file is absent is
//! simply omitted from the page. Array order in the TOML files is the
//! display order on the page.
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - `profile.toml` present, with non-empty name, headline, and email
//! - No unknown keys in any content file (typo protection)
//! - Portrait and screenshot paths resolve to existing files
//! - Project titles produce unique, non-empty slugs
//! - Contact channels carry a label and a value

use crate::config::{self, SiteConfig};
use crate::slug::slugify;
use crate::types::{ContactContent, Experience, ImageSet, ImageSets, Manifest, Profile, Project, Skills};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: Box<toml::de::Error>,
    },
    #[error("profile.toml not found in {0} (run `monofolio init` to scaffold one)")]
    MissingProfile(PathBuf),
    #[error("{file}: {field} must not be empty")]
    EmptyField { file: &'static str, field: String },
    #[error("image not found: {path} (referenced in {referenced_in})")]
    MissingImage { referenced_in: &'static str, path: String },
    #[error(
        "unsupported image format: {path} (referenced in {referenced_in}; supported: {supported})"
    )]
    UnsupportedImage {
        referenced_in: &'static str,
        path: String,
        supported: String,
    },
    #[error("projects.toml: duplicate project slug `{0}` (titles must be distinct)")]
    DuplicateProject(String),
    #[error("projects.toml: title `{0}` contains no usable characters for a slug")]
    EmptySlug(String),
}

/// Scan the content root and build the site manifest.
///
/// Image variant lists are left empty; the process stage fills them in.
pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let profile = load_profile(root)?;
    let about_md = load_about(root)?;
    let experience: Option<Experience> = load_section(root, "experience.toml")?;
    let projects = load_projects(root)?;
    let skills: Option<Skills> = load_section(root, "skills.toml")?;
    let contact = load_contact(root)?;
    let assets = collect_assets(root)?;
    let images = collect_images(root, &profile, &projects)?;

    Ok(Manifest {
        profile,
        about_md,
        experience,
        projects,
        skills,
        contact,
        assets,
        images,
        config,
    })
}

/// Parse one optional TOML section file. `Ok(None)` when the file is absent.
fn load_section<T: DeserializeOwned>(root: &Path, name: &str) -> Result<Option<T>, ScanError> {
    let path = root.join(name);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let parsed = toml::from_str(&content).map_err(|e| ScanError::Parse {
        file: name.to_string(),
        source: Box::new(e),
    })?;
    Ok(Some(parsed))
}

fn load_profile(root: &Path) -> Result<Profile, ScanError> {
    let profile: Profile = load_section(root, "profile.toml")?
        .ok_or_else(|| ScanError::MissingProfile(root.to_path_buf()))?;

    require_non_empty("profile.toml", "name", &profile.name)?;
    require_non_empty("profile.toml", "headline", &profile.headline)?;
    require_non_empty("profile.toml", "email", &profile.email)?;
    for link in &profile.links {
        require_non_empty("profile.toml", "links.label", &link.label)?;
        require_non_empty("profile.toml", "links.url", &link.url)?;
    }
    Ok(profile)
}

fn load_about(root: &Path) -> Result<Option<String>, ScanError> {
    let path = root.join("about.md");
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(content))
}

/// Wrapper for the `[[project]]` array shape of `projects.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectsFile {
    #[serde(rename = "project", default)]
    projects: Vec<Project>,
}

fn load_projects(root: &Path) -> Result<Vec<Project>, ScanError> {
    let Some(file): Option<ProjectsFile> = load_section(root, "projects.toml")? else {
        return Ok(Vec::new());
    };

    let mut projects = file.projects;
    let mut seen = BTreeMap::new();
    for project in &mut projects {
        require_non_empty("projects.toml", "title", &project.title)?;
        let slug = slugify(&project.title);
        if slug.is_empty() {
            return Err(ScanError::EmptySlug(project.title.clone()));
        }
        if seen.insert(slug.clone(), ()).is_some() {
            return Err(ScanError::DuplicateProject(slug));
        }
        project.slug = slug;
    }
    Ok(projects)
}

fn load_contact(root: &Path) -> Result<Option<ContactContent>, ScanError> {
    let Some(contact): Option<ContactContent> = load_section(root, "contact.toml")? else {
        return Ok(None);
    };
    for channel in &contact.channels {
        require_non_empty("contact.toml", "channel.label", &channel.label)?;
        require_non_empty(
            "contact.toml",
            &format!("channel `{}` value", channel.label),
            &channel.value,
        )?;
    }
    Ok(Some(contact))
}

fn require_non_empty(file: &'static str, field: &str, value: &str) -> Result<(), ScanError> {
    if value.trim().is_empty() {
        return Err(ScanError::EmptyField {
            file,
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Collect files under `assets/` as content-root-relative paths.
/// Hidden files are skipped; order is deterministic.
fn collect_assets(root: &Path) -> Result<Vec<String>, ScanError> {
    let assets_dir = root.join("assets");
    if !assets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut assets = Vec::new();
    for entry in WalkDir::new(&assets_dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            assets.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
    Ok(assets)
}

/// Record the portrait and screenshot sources, verifying each file exists.
fn collect_images(
    root: &Path,
    profile: &Profile,
    projects: &[Project],
) -> Result<ImageSets, ScanError> {
    let mut images = ImageSets::default();

    if let Some(portrait) = &profile.portrait {
        verify_image(root, portrait, "profile.toml")?;
        images.portrait = Some(ImageSet {
            source: portrait.clone(),
            variants: Vec::new(),
        });
    }

    for project in projects {
        if let Some(screenshot) = &project.screenshot {
            verify_image(root, screenshot, "projects.toml")?;
            images.screenshots.insert(
                project.slug.clone(),
                ImageSet {
                    source: screenshot.clone(),
                    variants: Vec::new(),
                },
            );
        }
    }

    Ok(images)
}

/// Check that an image reference points to a real file in a decodable format.
///
/// Catching a stray `.heic` or `.bmp` here gives a file-and-field error at
/// scan time instead of a decoder failure mid-build.
fn verify_image(root: &Path, rel: &str, referenced_in: &'static str) -> Result<(), ScanError> {
    if !root.join(rel).is_file() {
        return Err(ScanError::MissingImage {
            referenced_in,
            path: rel.to_string(),
        });
    }

    let supported = crate::imaging::supported_input_extensions();
    let ext = Path::new(rel)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext {
        Some(ext) if supported.iter().any(|s| *s == ext) => Ok(()),
        _ => Err(ScanError::UnsupportedImage {
            referenced_in,
            path: rel.to_string(),
            supported: supported.join(", "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MIN_PROFILE: &str = r#"
name = "Avery Park"
headline = "Full Stack Developer"
email = "avery@example.com"
"#;

    fn setup_root(profile: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("profile.toml"), profile).unwrap();
        tmp
    }

    #[test]
    fn scan_minimal_content() {
        let tmp = setup_root(MIN_PROFILE);
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.profile.name, "Avery Park");
        assert_eq!(manifest.profile.headline, "Full Stack Developer");
        assert!(manifest.about_md.is_none());
        assert!(manifest.experience.is_none());
        assert!(manifest.projects.is_empty());
        assert!(manifest.skills.is_none());
        assert!(manifest.contact.is_none());
        assert!(manifest.assets.is_empty());
        assert!(manifest.images.is_empty());
    }

    #[test]
    fn missing_profile_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::MissingProfile(_))));
    }

    #[test]
    fn parse_error_names_offending_file() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(tmp.path().join("projects.toml"), "not valid toml [[[").unwrap();

        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("projects.toml"));
    }

    #[test]
    fn empty_name_is_error() {
        let tmp = setup_root(
            r#"
name = "  "
headline = "Developer"
email = "a@example.com"
"#,
        );
        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn empty_email_is_error() {
        let tmp = setup_root(
            r#"
name = "Avery Park"
headline = "Developer"
email = ""
"#,
        );
        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("email"));
    }

    #[test]
    fn unknown_key_in_content_rejected() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("skills.toml"),
            r#"
[[category]]
title = "Languages"
items = ["Rust"]
extra = "nope"
"#,
        )
        .unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::Parse { .. })));
    }

    #[test]
    fn hero_copy_defaults_applied() {
        let tmp = setup_root(MIN_PROFILE);
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.profile.hero.greeting, "Hi, I'm");
        assert_eq!(manifest.profile.hero.primary_cta, "Get In Touch");
        assert_eq!(manifest.profile.hero.secondary_cta, "View My Work");
    }

    #[test]
    fn experience_roles_parsed_in_order() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("experience.toml"),
            r#"
[[role]]
title = "Web Development Intern"
company = "Skill Forge"
period = "Jan 2025 - Mar 2025"
summary = "Built dashboards."
achievements = ["Shipped four dashboards", "Cut page load by 40%"]
tags = ["React", "Node.js"]

[[role]]
title = "Open Source Contributor"
company = "Various"
period = "2024 - Present"

[education]
degree = "B.Tech in Computer Science"
institution = "Example Institute of Technology"
period = "2021 - 2025"
details = ["GPA 8.5/10"]
"#,
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let experience = manifest.experience.unwrap();
        assert_eq!(experience.roles.len(), 2);
        assert_eq!(experience.roles[0].company, "Skill Forge");
        assert_eq!(experience.roles[0].achievements.len(), 2);
        assert_eq!(
            experience.education.unwrap().degree,
            "B.Tech in Computer Science"
        );
    }

    #[test]
    fn project_slugs_derived_from_titles() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
title = "Upadhi - Job Board"
summary = "Full stack job platform."

[[project]]
title = "Task Manager"
summary = "Kanban board with offline sync."
"#,
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let slugs: Vec<&str> = manifest.projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["upadhi-job-board", "task-manager"]);
    }

    #[test]
    fn duplicate_project_titles_error() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
title = "Task Manager"
summary = "one"

[[project]]
title = "task manager!"
summary = "two"
"#,
        )
        .unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::DuplicateProject(_))));
    }

    #[test]
    fn unslugable_project_title_error() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
title = "!!!"
summary = "no letters"
"#,
        )
        .unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::EmptySlug(_))));
    }

    #[test]
    fn portrait_missing_file_is_error() {
        let tmp = setup_root(
            r#"
name = "Avery Park"
headline = "Developer"
email = "a@example.com"
portrait = "assets/portrait.jpg"
"#,
        );

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::MissingImage { .. })));
    }

    #[test]
    fn portrait_recorded_when_present() {
        let tmp = setup_root(
            r#"
name = "Avery Park"
headline = "Developer"
email = "a@example.com"
portrait = "assets/portrait.jpg"
"#,
        );
        fs::create_dir_all(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/portrait.jpg"), "fake image").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let portrait = manifest.images.portrait.unwrap();
        assert_eq!(portrait.source, "assets/portrait.jpg");
        assert!(portrait.variants.is_empty());
    }

    #[test]
    fn screenshots_keyed_by_project_slug() {
        let tmp = setup_root(MIN_PROFILE);
        fs::create_dir_all(tmp.path().join("shots")).unwrap();
        fs::write(tmp.path().join("shots/board.png"), "fake image").unwrap();
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
title = "Task Manager"
summary = "Kanban board."
screenshot = "shots/board.png"
"#,
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let set = manifest.images.screenshots.get("task-manager").unwrap();
        assert_eq!(set.source, "shots/board.png");
        assert_eq!(manifest.images.source_count(), 1);
        assert_eq!(
            crate::test_helpers::screenshot_slugs(&manifest),
            vec!["task-manager"]
        );
    }

    #[test]
    fn missing_screenshot_is_error() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
title = "Task Manager"
summary = "Kanban board."
screenshot = "shots/board.png"
"#,
        )
        .unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::MissingImage { .. })));
    }

    #[test]
    fn unsupported_image_format_is_error() {
        let tmp = setup_root(&format!(
            "{}portrait = \"assets/portrait.heic\"\n",
            MIN_PROFILE
        ));
        fs::create_dir_all(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/portrait.heic"), "fake image").unwrap();

        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedImage { .. }));
        assert!(err.to_string().contains("portrait.heic"));
        assert!(err.to_string().contains("jpg"));
    }

    #[test]
    fn image_extension_check_is_case_insensitive() {
        let tmp = setup_root(&format!(
            "{}portrait = \"assets/Portrait.JPG\"\n",
            MIN_PROFILE
        ));
        fs::create_dir_all(tmp.path().join("assets")).unwrap();
        fs::write(tmp.path().join("assets/Portrait.JPG"), "fake image").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.images.portrait.is_some());
    }

    #[test]
    fn contact_channels_parsed() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("contact.toml"),
            r#"
pitch = "Open to internships and junior roles."
availability = ["Replies within 24h"]

[[channel]]
label = "Email"
value = "avery@example.com"
href = "mailto:avery@example.com"

[[channel]]
label = "Location"
value = "Portland, OR"
"#,
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let contact = manifest.contact.unwrap();
        assert_eq!(contact.channels.len(), 2);
        assert_eq!(contact.channels[0].label, "Email");
        assert!(contact.channels[1].href.is_none());
        assert_eq!(contact.availability, vec!["Replies within 24h"]);
    }

    #[test]
    fn empty_channel_value_is_error() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("contact.toml"),
            r#"
[[channel]]
label = "Email"
value = ""
"#,
        )
        .unwrap();

        let err = scan(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("Email"));
    }

    #[test]
    fn about_md_loaded() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("about.md"),
            "I build **web apps** end to end.",
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.about_md.unwrap().contains("**web apps**"));
    }

    #[test]
    fn blank_about_md_treated_as_absent() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(tmp.path().join("about.md"), "  \n\n").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.about_md.is_none());
    }

    #[test]
    fn assets_collected_recursively_and_relative() {
        let tmp = setup_root(MIN_PROFILE);
        fs::create_dir_all(tmp.path().join("assets/icons")).unwrap();
        fs::write(tmp.path().join("assets/favicon.svg"), "<svg/>").unwrap();
        fs::write(tmp.path().join("assets/icons/gh.svg"), "<svg/>").unwrap();
        fs::write(tmp.path().join("assets/.hidden"), "skip me").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            manifest.assets,
            vec!["assets/favicon.svg", "assets/icons/gh.svg"]
        );
    }

    #[test]
    fn config_loaded_from_content_root() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[colors.light]
background = "#fafafa"
"##,
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.colors.light.background, "#fafafa");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_root(MIN_PROFILE);
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
title = "Task Manager"
summary = "Kanban board."
tags = ["React", "MongoDB"]
"#,
        )
        .unwrap();

        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.profile.name, "Avery Park");
        assert_eq!(back.projects[0].slug, "task-manager");
        assert_eq!(back.projects[0].tags, vec!["React", "MongoDB"]);
    }

    #[test]
    fn fixture_content_scans_clean() {
        use crate::test_helpers::{find_category, find_project, find_role, setup_fixtures};

        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(manifest.profile.name, "Avery Park");
        assert_eq!(find_project(&manifest, "Taskboard").slug, "taskboard");
        assert_eq!(
            find_role(&manifest, "Fernwood Labs").title,
            "Software Engineering Intern"
        );
        assert_eq!(find_category(&manifest, "Languages").items.len(), 4);
        assert_eq!(
            manifest.config.site.base_url.as_deref(),
            Some("https://avery.example.com")
        );
        assert!(manifest.assets.contains(&"assets/favicon.svg".to_string()));
    }
}
