//! Shared test utilities for the monofolio test suite.
//!
//! Fixture setup plus lookup helpers over the scanned [`Manifest`]. The
//! lookups panic with the available names on a miss, so a failing test
//! says what the manifest actually held.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let project = find_project(&manifest, "Taskboard");
//! assert_eq!(project.slug, "taskboard");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Manifest, Project, Role, SkillCategory};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups — panics with a clear message on miss
// =========================================================================

/// Find a project by title. Panics if not found.
pub fn find_project<'a>(manifest: &'a Manifest, title: &str) -> &'a Project {
    manifest
        .projects
        .iter()
        .find(|p| p.title == title)
        .unwrap_or_else(|| {
            let titles = project_titles(manifest);
            panic!("project '{title}' not found. Available: {titles:?}")
        })
}

/// Find an experience role by company. Panics if not found.
pub fn find_role<'a>(manifest: &'a Manifest, company: &str) -> &'a Role {
    let roles = manifest
        .experience
        .as_ref()
        .map(|e| e.roles.as_slice())
        .unwrap_or_default();
    roles.iter().find(|r| r.company == company).unwrap_or_else(|| {
        let companies: Vec<&str> = roles.iter().map(|r| r.company.as_str()).collect();
        panic!("role at '{company}' not found. Available: {companies:?}")
    })
}

/// Find a skill category by title. Panics if not found.
pub fn find_category<'a>(manifest: &'a Manifest, title: &str) -> &'a SkillCategory {
    let categories = manifest
        .skills
        .as_ref()
        .map(|s| s.categories.as_slice())
        .unwrap_or_default();
    categories
        .iter()
        .find(|c| c.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
            panic!("skill category '{title}' not found. Available: {titles:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All project titles in manifest order.
pub fn project_titles(manifest: &Manifest) -> Vec<&str> {
    manifest.projects.iter().map(|p| p.title.as_str()).collect()
}

/// All screenshot slugs in map (= slug) order.
pub fn screenshot_slugs(manifest: &Manifest) -> Vec<&str> {
    manifest
        .images
        .screenshots
        .keys()
        .map(String::as_str)
        .collect()
}
