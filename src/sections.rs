//! Section renderers for the single-page layout.
//!
//! Each `render_*` function is a pure function of the manifest returning a
//! maud [`Markup`] block. Section order on the page is fixed (hero, about,
//! experience, projects, skills, contact); `generate` skips sections whose
//! content is absent, using the `has_*` predicates here so the nav and the
//! body always agree.
//!
//! ## Reveal decoration
//!
//! Every revealable block carries a bare `data-reveal` attribute plus an
//! inline `--reveal-delay` custom property. Solo blocks get the base delay;
//! cards in a grid get the base delay plus a per-index stagger, both from
//! `[reveal]` config. The static stylesheet turns the property into a
//! transition delay and `reveal.js` adds the `revealed` class.
//!
//! All user-authored strings render through maud, so they are escaped;
//! markdown conversion in the about section is the only path that emits
//! raw HTML.

use crate::config::RevealConfig;
use crate::slug;
use crate::types::{ImageSet, Manifest};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};

/// `sizes` attribute for the hero portrait (a fixed-width column on
/// desktop, near full width on phones).
const PORTRAIT_SIZES: &str = "(max-width: 640px) 90vw, 24rem";
/// `sizes` attribute for project screenshots (half-width cards on desktop).
const SCREENSHOT_SIZES: &str = "(max-width: 800px) 100vw, 50vw";

// ============================================================================
// Section presence
// ============================================================================

pub fn has_about(manifest: &Manifest) -> bool {
    manifest.about_md.is_some()
        || !manifest.profile.highlights.is_empty()
        || !manifest.profile.stats.is_empty()
}

pub fn has_experience(manifest: &Manifest) -> bool {
    manifest
        .experience
        .as_ref()
        .is_some_and(|e| !e.roles.is_empty() || e.education.is_some())
}

pub fn has_projects(manifest: &Manifest) -> bool {
    !manifest.projects.is_empty()
}

pub fn has_skills(manifest: &Manifest) -> bool {
    manifest.skills.as_ref().is_some_and(|s| {
        !s.categories.is_empty() || !s.strengths.is_empty() || !s.interests.is_empty()
    })
}

/// Anchor id and nav label for every section present on the page.
///
/// Hero is not listed (the monogram links to the top). Contact always
/// renders: the form needs only the profile email, `contact.toml` just
/// enriches it.
pub fn nav_sections(manifest: &Manifest) -> Vec<(&'static str, &'static str)> {
    let mut sections = Vec::new();
    if has_about(manifest) {
        sections.push(("about", "About"));
    }
    if has_experience(manifest) {
        sections.push(("experience", "Experience"));
    }
    if has_projects(manifest) {
        sections.push(("projects", "Projects"));
    }
    if has_skills(manifest) {
        sections.push(("skills", "Skills"));
    }
    sections.push(("contact", "Contact"));
    sections
}

/// Section names rendered into the page, in order, for the build summary.
pub fn present_sections(manifest: &Manifest) -> Vec<&'static str> {
    let mut sections = vec!["hero"];
    sections.extend(nav_sections(manifest).iter().map(|(id, _)| *id));
    sections
}

// ============================================================================
// Reveal decoration
// ============================================================================

/// Delay in ms for the `index`-th card of a staggered grid (index 0 for
/// solo blocks).
pub fn stagger_delay(reveal: &RevealConfig, index: usize) -> u32 {
    reveal.delay_ms + reveal.stagger_ms * index as u32
}

fn reveal_style(reveal: &RevealConfig, index: usize) -> String {
    format!("--reveal-delay: {}ms", stagger_delay(reveal, index))
}

fn section_heading(reveal: &RevealConfig, title: &str) -> Markup {
    html! {
        header.section-heading data-reveal style=(reveal_style(reveal, 0)) {
            h2 { (title) }
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

/// `<picture>` with AVIF and WebP srcsets over every encoded variant.
///
/// The `img` fallback uses the middle WebP; width/height come from the
/// largest variant so the browser reserves the right aspect box.
fn render_picture(set: &ImageSet, alt: &str, sizes: &str, lazy: bool) -> Markup {
    let srcset_avif: String = set
        .variants
        .iter()
        .map(|v| format!("{} {}w", v.avif, v.width))
        .collect::<Vec<_>>()
        .join(", ");
    let srcset_webp: String = set
        .variants
        .iter()
        .map(|v| format!("{} {}w", v.webp, v.width))
        .collect::<Vec<_>>()
        .join(", ");
    let fallback = set
        .variants
        .get(set.variants.len() / 2)
        .map(|v| v.webp.as_str())
        .unwrap_or_default();
    let (width, height) = set
        .variants
        .last()
        .map(|v| (v.width, v.height))
        .unwrap_or((0, 0));

    html! {
        picture {
            source type="image/avif" srcset=(srcset_avif) sizes=(sizes);
            source type="image/webp" srcset=(srcset_webp) sizes=(sizes);
            img src=(fallback) alt=(alt) width=(width) height=(height)
                loading=[lazy.then_some("lazy")] decoding="async";
        }
    }
}

fn tag_list(tags: &[String]) -> Markup {
    html! {
        ul.tag-list {
            @for tag in tags {
                li.tag { (tag) }
            }
        }
    }
}

// ============================================================================
// Header
// ============================================================================

/// Sticky header: monogram link to the top, in-page nav, theme toggle.
pub fn render_header(manifest: &Manifest) -> Markup {
    let monogram = slug::initials(&manifest.profile.name);
    html! {
        header.site-header {
            a.monogram href="#top" aria-label="Back to top" { (monogram) }
            nav.site-nav aria-label="Sections" {
                @for (id, label) in nav_sections(manifest) {
                    a href={ "#" (id) } { (label) }
                }
            }
            button.theme-toggle id="theme-toggle" type="button"
                aria-label="Switch color theme" aria-pressed="false" {
                span.icon-light aria-hidden="true" { "☀" }
                span.icon-dark aria-hidden="true" { "☾" }
            }
        }
    }
}

// ============================================================================
// Hero
// ============================================================================

pub fn render_hero(manifest: &Manifest) -> Markup {
    let profile = &manifest.profile;
    let reveal = &manifest.config.reveal;
    let portrait = manifest
        .images
        .portrait
        .as_ref()
        .filter(|set| !set.variants.is_empty());
    let alt = format!("Portrait of {}", profile.name);

    html! {
        section.hero id="top" {
            div.hero-inner data-reveal style=(reveal_style(reveal, 0)) {
                div.hero-copy {
                    p.hero-greeting { (profile.hero.greeting) }
                    h1.hero-name { (profile.name) }
                    p.hero-headline { (profile.headline) }
                    @if !profile.tagline.is_empty() {
                        p.hero-tagline { (profile.tagline) }
                    }
                    div.hero-actions {
                        a.button.primary href="#contact" { (profile.hero.primary_cta) }
                        @if has_projects(manifest) {
                            a.button.ghost href="#projects" { (profile.hero.secondary_cta) }
                        }
                        @if let Some(resume) = &profile.resume_url {
                            a.button.ghost href=(resume) target="_blank" rel="noopener" { "Resume" }
                        }
                    }
                    @if !profile.links.is_empty() {
                        ul.social-links {
                            @for link in &profile.links {
                                li {
                                    a href=(link.url) target="_blank" rel="noopener" { (link.label) }
                                }
                            }
                        }
                    }
                }
                div.hero-portrait {
                    @if let Some(set) = portrait {
                        (render_picture(set, &alt, PORTRAIT_SIZES, false))
                    } @else {
                        div.monogram-tile aria-hidden="true" {
                            (slug::initials(&profile.name))
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// About
// ============================================================================

pub fn render_about(manifest: &Manifest) -> Markup {
    let profile = &manifest.profile;
    let reveal = &manifest.config.reveal;
    let body_html = manifest.about_md.as_ref().map(|md| {
        let parser = Parser::new(md);
        let mut out = String::new();
        md_html::push_html(&mut out, parser);
        out
    });

    html! {
        section.about id="about" {
            (section_heading(reveal, "About"))
            div.about-grid {
                div.about-prose data-reveal style=(reveal_style(reveal, 0)) {
                    @if let Some(body) = body_html {
                        (PreEscaped(body))
                    }
                    @if !profile.highlights.is_empty() {
                        ul.highlights {
                            @for highlight in &profile.highlights {
                                li { (highlight) }
                            }
                        }
                    }
                }
                @if !profile.stats.is_empty() {
                    div.stat-grid {
                        @for (idx, stat) in profile.stats.iter().enumerate() {
                            div.stat-card data-reveal style=(reveal_style(reveal, idx)) {
                                span.stat-value { (stat.value) }
                                span.stat-label { (stat.label) }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Experience
// ============================================================================

pub fn render_experience(manifest: &Manifest) -> Markup {
    let reveal = &manifest.config.reveal;
    let Some(experience) = &manifest.experience else {
        return html! {};
    };

    html! {
        section.experience id="experience" {
            (section_heading(reveal, "Experience"))
            div.role-list {
                @for (idx, role) in experience.roles.iter().enumerate() {
                    article.role-card data-reveal style=(reveal_style(reveal, idx)) {
                        header.role-header {
                            div {
                                h3.role-title { (role.title) }
                                p.role-company {
                                    (role.company)
                                    @if let Some(location) = &role.location {
                                        " · " (location)
                                    }
                                }
                            }
                            span.period { (role.period) }
                        }
                        @if !role.summary.is_empty() {
                            p.role-summary { (role.summary) }
                        }
                        @if !role.achievements.is_empty() {
                            ul.achievements {
                                @for achievement in &role.achievements {
                                    li { (achievement) }
                                }
                            }
                        }
                        @if !role.tags.is_empty() {
                            (tag_list(&role.tags))
                        }
                    }
                }
            }
            @if let Some(education) = &experience.education {
                article.education-card data-reveal
                    style=(reveal_style(reveal, experience.roles.len())) {
                    header.role-header {
                        div {
                            h3.role-title { (education.degree) }
                            p.role-company { (education.institution) }
                        }
                        span.period { (education.period) }
                    }
                    @if !education.details.is_empty() {
                        ul.achievements {
                            @for detail in &education.details {
                                li { (detail) }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

pub fn render_projects(manifest: &Manifest) -> Markup {
    let reveal = &manifest.config.reveal;

    html! {
        section.projects id="projects" {
            (section_heading(reveal, "Projects"))
            div.project-grid {
                @for (idx, project) in manifest.projects.iter().enumerate() {
                    @let shot = manifest
                        .images
                        .screenshots
                        .get(&project.slug)
                        .filter(|set| !set.variants.is_empty());
                    @let alt = format!("Screenshot of {}", project.title);
                    article.project-card id=(project.slug) data-reveal
                        style=(reveal_style(reveal, idx)) {
                        @if let Some(set) = shot {
                            div.project-media {
                                (render_picture(set, &alt, SCREENSHOT_SIZES, true))
                            }
                        } @else {
                            div.project-media.project-monogram aria-hidden="true" {
                                span { (slug::initials(&project.title)) }
                            }
                        }
                        div.project-body {
                            header.project-header {
                                h3 { (project.title) }
                                @if let Some(period) = &project.period {
                                    span.period { (period) }
                                }
                            }
                            p.project-summary { (project.summary) }
                            @if !project.features.is_empty() {
                                ul.feature-list {
                                    @for feature in &project.features {
                                        li { (feature) }
                                    }
                                }
                            }
                            @if !project.tags.is_empty() {
                                (tag_list(&project.tags))
                            }
                            @if project.demo_url.is_some() || project.source_url.is_some() {
                                div.project-links {
                                    @if let Some(demo) = &project.demo_url {
                                        a.button.small href=(demo) target="_blank" rel="noopener" {
                                            "Live Demo"
                                        }
                                    }
                                    @if let Some(source) = &project.source_url {
                                        a.button.small.ghost href=(source) target="_blank" rel="noopener" {
                                            "Source"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

pub fn render_skills(manifest: &Manifest) -> Markup {
    let reveal = &manifest.config.reveal;
    let Some(skills) = &manifest.skills else {
        return html! {};
    };

    html! {
        section.skills id="skills" {
            (section_heading(reveal, "Skills"))
            div.skill-grid {
                @for (idx, category) in skills.categories.iter().enumerate() {
                    div.skill-card data-reveal style=(reveal_style(reveal, idx)) {
                        h3 { (category.title) }
                        ul.skill-items {
                            @for item in &category.items {
                                li { (item) }
                            }
                        }
                    }
                }
            }
            @if !skills.strengths.is_empty() {
                div.skill-extra data-reveal style=(reveal_style(reveal, 0)) {
                    h3 { "Strengths" }
                    ul.pill-list {
                        @for strength in &skills.strengths {
                            li.pill { (strength) }
                        }
                    }
                }
            }
            @if !skills.interests.is_empty() {
                div.skill-extra data-reveal style=(reveal_style(reveal, 1)) {
                    h3 { "Interests" }
                    ul.pill-list {
                        @for interest in &skills.interests {
                            li.pill { (interest) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

pub fn render_contact(manifest: &Manifest) -> Markup {
    let profile = &manifest.profile;
    let reveal = &manifest.config.reveal;

    html! {
        section.contact id="contact" {
            (section_heading(reveal, "Get In Touch"))
            div.contact-grid {
                div.contact-info data-reveal style=(reveal_style(reveal, 0)) {
                    @if let Some(content) = &manifest.contact {
                        @if !content.pitch.is_empty() {
                            p.contact-pitch { (content.pitch) }
                        }
                        ul.channel-list {
                            @for channel in &content.channels {
                                li.channel {
                                    span.channel-label { (channel.label) }
                                    @if let Some(href) = &channel.href {
                                        a.channel-value href=(href) { (channel.value) }
                                    } @else {
                                        span.channel-value { (channel.value) }
                                    }
                                }
                            }
                        }
                        @if !content.availability.is_empty() {
                            ul.availability {
                                @for note in &content.availability {
                                    li { (note) }
                                }
                            }
                        }
                    } @else {
                        ul.channel-list {
                            li.channel {
                                span.channel-label { "Email" }
                                a.channel-value href={ "mailto:" (profile.email) } {
                                    (profile.email)
                                }
                            }
                            @if let Some(phone) = &profile.phone {
                                li.channel {
                                    span.channel-label { "Phone" }
                                    span.channel-value { (phone) }
                                }
                            }
                            @if let Some(location) = &profile.location {
                                li.channel {
                                    span.channel-label { "Location" }
                                    span.channel-value { (location) }
                                }
                            }
                        }
                    }
                }
                div.contact-form-wrap data-reveal style=(reveal_style(reveal, 1)) {
                    (render_contact_form())
                }
            }
        }
    }
}

/// The form markup `contact.js` binds to.
///
/// Inline error slots and the status banner start hidden; the script fills
/// and shows them. `novalidate` keeps the browser's own validation UI out
/// of the way so the shared messages are the only ones shown.
fn render_contact_form() -> Markup {
    html! {
        form.contact-form id="contact-form" novalidate {
            div.form-field {
                label for="cf-name" { "Name" }
                input id="cf-name" name="name" type="text" autocomplete="name"
                    aria-describedby="cf-name-error";
                p.field-error id="cf-name-error" hidden {}
            }
            div.form-field {
                label for="cf-email" { "Email" }
                input id="cf-email" name="email" type="email" autocomplete="email"
                    aria-describedby="cf-email-error";
                p.field-error id="cf-email-error" hidden {}
            }
            div.form-field {
                label for="cf-message" { "Message" }
                textarea id="cf-message" name="message" rows="6"
                    aria-describedby="cf-message-error" {}
                p.field-error id="cf-message-error" hidden {}
            }
            p.form-status id="form-status" role="status" aria-live="polite" hidden {}
            button.button.primary id="form-submit" type="submit" { "Send Message" }
        }
    }
}
