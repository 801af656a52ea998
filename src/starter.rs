//! Starter content for `init`.
//!
//! Embedded sample files a new site starts from: enough structure that
//! `build` works immediately, with placeholder copy that is obviously
//! meant to be replaced. Image paths ship commented out, so the first
//! build renders monogram tiles instead of failing on missing files.

use crate::config;
use std::fs;
use std::io;
use std::path::Path;

const PROFILE_TOML: &str = r#"# Who you are. The only required file; everything else layers on top.
name = "Your Name"
headline = "Full Stack Developer"
tagline = "I build fast, accessible web apps."
location = "Portland, OR"
email = "you@example.com"
# portrait = "assets/portrait.jpg"
# resume_url = "https://example.com/resume.pdf"

# Short claims for the about section checklist.
highlights = [
    "Comfortable across the stack, from schema design to CSS",
    "Ship early and iterate in the open",
]

[hero]
greeting = "Hi, I'm"
primary_cta = "Get In Touch"
secondary_cta = "View My Work"

[[links]]
label = "GitHub"
url = "https://github.com/your-handle"

[[links]]
label = "LinkedIn"
url = "https://www.linkedin.com/in/your-handle"

[[stats]]
value = "15+"
label = "Projects built"

[[stats]]
value = "3"
label = "Years coding"
"#;

const ABOUT_MD: &str = "\
I'm a developer who likes building small, sharp tools for the web. Most of
my recent work pairs a Rust or Node backend with a TypeScript frontend.

Away from the keyboard I climb and take far too many photos.
";

const EXPERIENCE_TOML: &str = r#"# Work history, newest first. Delete this file to drop the section.

[[role]]
title = "Software Engineering Intern"
company = "Acme Cloud"
location = "Remote"
period = "Jun 2025 - Sep 2025"
summary = "Worked on the billing team's invoice pipeline."
achievements = [
    "Cut invoice generation latency by 40%",
    "Added integration tests around currency rounding",
]
tags = ["TypeScript", "PostgreSQL"]

[education]
degree = "BSc Computer Science"
institution = "State University"
period = "2022 - 2026"
details = ["Coursework: distributed systems, databases, HCI"]
"#;

const PROJECTS_TOML: &str = r#"# One [[project]] block per card, newest first.
# Screenshots are optional; cards without one show a monogram banner.

[[project]]
title = "Taskboard"
summary = "A realtime kanban board with optimistic drag-and-drop."
period = "2025"
tags = ["React", "WebSockets"]
features = [
    "Live multi-user editing",
    "Offline queue with replay",
]
demo_url = "https://taskboard.example.com"
source_url = "https://github.com/your-handle/taskboard"
# screenshot = "assets/taskboard.png"

[[project]]
title = "Trail Atlas"
summary = "Maps and elevation profiles for local hiking trails."
tags = ["SvelteKit", "PostGIS"]
features = [
    "Vector tiles rendered client side",
    "GPX import",
]
source_url = "https://github.com/your-handle/trail-atlas"
"#;

const SKILLS_TOML: &str = r#"# Skill categories plus two optional flat lists.

strengths = ["Debugging", "Code review", "Writing docs"]
interests = ["Systems programming", "Data visualization"]

[[category]]
title = "Languages"
items = ["TypeScript", "Rust", "SQL"]

[[category]]
title = "Frontend"
items = ["React", "Svelte", "CSS"]

[[category]]
title = "Backend"
items = ["Node", "PostgreSQL", "Redis"]
"#;

const CONTACT_TOML: &str = r#"# Contact section copy. The form itself always renders; this file adds
# the pitch and the direct channels next to it.

pitch = "I'm looking for a junior role on a product team. If that's you, let's talk."

availability = [
    "Open to remote or Portland-based roles",
    "Replies within a day",
]

[[channel]]
label = "Email"
value = "you@example.com"
href = "mailto:you@example.com"

[[channel]]
label = "GitHub"
value = "github.com/your-handle"
href = "https://github.com/your-handle"
"#;

const FAVICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><rect width="32" height="32" rx="8" fill="#4f46e5"/><path d="M10 21v-8l6 6 6-6v8" stroke="#ffffff" stroke-width="2.5" fill="none" stroke-linecap="round" stroke-linejoin="round"/></svg>
"##;

/// Files written by `init`, as content-root-relative path + contents pairs.
pub fn starter_files() -> Vec<(&'static str, &'static str)> {
    vec![
        ("config.toml", config::stock_config_toml()),
        ("profile.toml", PROFILE_TOML),
        ("about.md", ABOUT_MD),
        ("experience.toml", EXPERIENCE_TOML),
        ("projects.toml", PROJECTS_TOML),
        ("skills.toml", SKILLS_TOML),
        ("contact.toml", CONTACT_TOML),
        ("assets/favicon.svg", FAVICON_SVG),
    ]
}

/// Scaffold a starter content directory.
///
/// Without `force`, the whole run is refused if any starter file already
/// exists; the check happens before anything is written, so a failed init
/// leaves the directory untouched. Returns the relative paths written.
pub fn write_starter(root: &Path, force: bool) -> io::Result<Vec<&'static str>> {
    let files = starter_files();

    if !force {
        for (rel, _) in &files {
            if root.join(rel).exists() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "{} already exists (use --force to overwrite)",
                        root.join(rel).display()
                    ),
                ));
            }
        }
    }

    fs::create_dir_all(root.join("assets"))?;
    let mut written = Vec::new();
    for (rel, contents) in files {
        fs::write(root.join(rel), contents)?;
        written.push(rel);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn starter_content_scans_clean() {
        let temp = TempDir::new().unwrap();
        write_starter(temp.path(), false).unwrap();

        let manifest = crate::scan::scan(temp.path()).unwrap();
        assert_eq!(manifest.profile.name, "Your Name");
        assert!(manifest.about_md.is_some());
        assert!(manifest.experience.is_some());
        assert_eq!(manifest.projects.len(), 2);
        assert!(manifest.skills.is_some());
        assert!(manifest.contact.is_some());
        assert!(manifest.assets.contains(&"assets/favicon.svg".to_string()));
        // No image paths uncommented, so nothing queued for processing
        assert!(manifest.images.is_empty());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        write_starter(temp.path(), false).unwrap();

        let err = write_starter(temp.path(), false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn partial_collision_writes_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("about.md"), "mine").unwrap();

        let err = write_starter(temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("about.md"));
        assert!(!temp.path().join("profile.toml").exists());
        assert_eq!(
            fs::read_to_string(temp.path().join("about.md")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn force_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        write_starter(temp.path(), false).unwrap();
        fs::write(temp.path().join("profile.toml"), "scratch").unwrap();

        let written = write_starter(temp.path(), true).unwrap();
        assert!(written.contains(&"profile.toml"));
        let profile = fs::read_to_string(temp.path().join("profile.toml")).unwrap();
        assert!(profile.contains("Your Name"));
    }
}
