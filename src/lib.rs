//! # Monofolio
//!
//! A static site generator for single-page developer portfolios. Your
//! content directory is the data source: a handful of TOML files become
//! page sections, a markdown file becomes the about text, and referenced
//! images are encoded into responsive variants.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! Monofolio processes content through three independent stages, each
//! reading and writing a JSON manifest:
//!
//! ```text
//! 1. Scan      content/  →  manifest.json   (TOML + markdown → structured data)
//! 2. Process   manifest  →  temp/img/       (responsive AVIF/WebP variants)
//! 3. Generate  manifest  →  dist/           (single index.html + copied files)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect.
//! - **Incremental builds**: skip stages whose inputs haven't changed; image
//!   encoding is cached content-addressed.
//! - **Testability**: each stage is a function from manifest to manifest, so
//!   tests can exercise pipeline logic without encoding a single image.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: parses and validates the content files, produces the manifest |
//! | [`process`] | Stage 2: encodes responsive image variants, cache-aware and parallel |
//! | [`generate`] | Stage 3: renders `index.html` from the processed manifest using Maud |
//! | [`sections`] | Maud renderers for the page sections (hero, about, projects, ...) |
//! | [`config`] | Layered `config.toml` loading, validation, CSS variable generation |
//! | [`types`] | Shared manifest types serialized between stages |
//! | [`slug`] | Title slugs for anchors and file stems, initials for monograms |
//! | [`imaging`] | Pure-Rust image backend: identify, cover crop, fit resize |
//! | [`cache`] | Content-addressed variant cache keyed on source bytes + parameters |
//! | [`contact`] | Contact form state machine, shared by the page script contract and `send-test` |
//! | [`relay`] | Blocking HTTP client for the mail relay, behind a transport trait |
//! | [`starter`] | Embedded starter content for `init` |
//! | [`output`] | CLI output formatting for all stages |
//!
//! # Design Decisions
//!
//! ## AVIF + WebP `<picture>`
//!
//! Every image is encoded twice per size: AVIF for compression, WebP as the
//! universally-decodable fallback and the plain `<img>` source. AVIF has had
//! broad browser support since late 2023, but portfolio visitors include
//! recruiters on old corporate builds of everything; two formats in a
//! `<picture>` costs one extra `<source>` line and removes the risk.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions, not stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate for decoding, Lanczos3
//! resampling and AVIF/WebP encoding. No ImageMagick, no system libraries:
//! the binary is fully self-contained and behaves the same on any machine.
//!
//! ## One Config Island, Two Consumers
//!
//! The generated page embeds a JSON `<script id="site-config">` island with
//! the relay credentials, reveal tuning and every contact-form message. The
//! inline scripts read it at load; the `send-test` command uses the same
//! values through [`contact`]. There is exactly one place where a validation
//! message or a timing constant is defined.
//!
//! ## No Theme Persistence
//!
//! The theme toggle flips a `data-theme` attribute for the current visit and
//! nothing else. The default comes from `prefers-color-scheme`, which is
//! already the visitor's stated preference; storing an override adds a
//! storage prompt surface for marginal value on a one-page site.
//!
//! # Output Philosophy
//!
//! The generated site is one HTML file with its CSS and JavaScript inlined,
//! plus the processed images and copied assets beside it. No bundler, no
//! framework runtime. It can be dropped on any static file host, and the
//! page stays readable with JavaScript disabled.

pub mod cache;
pub mod config;
pub mod contact;
pub mod generate;
pub mod imaging;
pub mod output;
pub mod process;
pub mod relay;
pub mod scan;
pub mod sections;
pub mod slug;
pub mod starter;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
