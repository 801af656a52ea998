//! Stage 2 — responsive image processing.
//!
//! Reads the scan manifest, encodes the hero portrait and project screenshots
//! into responsive AVIF + WebP variants, and returns the manifest with the
//! variant lists filled in. The caller writes the updated manifest to
//! `<output_dir>/manifest.json`.
//!
//! ## Variant disciplines
//!
//! - **Portrait**: cover crop to `images.portrait_aspect` at each width in
//!   `images.portrait_sizes`, with light sharpening. The hero layout needs an
//!   exact aspect ratio regardless of how the source was framed.
//! - **Screenshots**: aspect-preserving resize at each width in
//!   `images.screenshot_sizes`. Project cards show the full capture.
//!
//! Widths the source cannot supply without upscaling are skipped (see
//! [`calculate_fit_sizes`] and [`calculate_cover_sizes`]).
//!
//! ## Output layout
//!
//! ```text
//! processed/
//! ├── manifest.json          # scan manifest + variant lists (written by caller)
//! ├── .cache-manifest.json   # encoding cache (see `cache`)
//! └── img/
//!     ├── portrait-320.avif
//!     ├── portrait-320.webp
//!     ├── taskboard-640.avif
//!     └── ...
//! ```
//!
//! ## Parallelism
//!
//! Source images are processed in parallel with rayon; AVIF encoding is CPU
//! bound and dominates the run. Progress events stream through an optional
//! mpsc `Sender` so the caller can print them as they complete (order follows
//! completion, not manifest order).

use crate::cache::{self, CacheManifest, CacheStats};
use crate::imaging::{
    BackendError, CoverParams, ImageBackend, Quality, ResizeParams, RustBackend, Sharpening,
    VariantSize, calculate_cover_sizes, calculate_fit_sizes,
};
use crate::types::{ImageSet, Manifest, Variant};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Subdirectory of the output dir that holds encoded variants.
pub const IMAGE_SUBDIR: &str = "img";

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("processing {path}: {source}")]
    Backend { path: String, source: BackendError },
}

/// Cache status of a single output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStatus {
    Cached,
    Copied,
    Encoded,
}

/// One output file with its display label ("640px avif").
#[derive(Debug, Clone)]
pub struct VariantInfo {
    pub label: String,
    pub status: VariantStatus,
}

/// Progress events sent while processing.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Started {
        image_count: usize,
    },
    ImageProcessed {
        label: String,
        source_path: String,
        variants: Vec<VariantInfo>,
    },
}

/// What a completed process run produced.
#[derive(Debug)]
pub struct ProcessResult {
    pub manifest: Manifest,
    pub cache_stats: CacheStats,
}

/// Which crop discipline a source image gets.
#[derive(Clone, Copy)]
enum JobKind {
    /// Center-crop to the configured aspect ratio (the portrait).
    Cover { aspect: (u32, u32) },
    /// Aspect-preserving resize (screenshots).
    Fit,
}

/// Where a finished variant set goes back into the manifest.
enum JobKey {
    Portrait,
    Screenshot(String),
}

/// One source image to process into a set of variants.
struct ImageJob {
    key: JobKey,
    /// Display label for progress output (project title or "Portrait").
    label: String,
    /// Source path relative to the content root.
    source: String,
    /// Output filename stem ("portrait" or the project slug).
    stem: String,
    widths: Vec<u32>,
    quality: u32,
    sharpening: Option<Sharpening>,
    kind: JobKind,
}

/// Process all images referenced by the scan manifest.
pub fn process(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(
        &backend,
        manifest_path,
        source_root,
        output_dir,
        use_cache,
        events,
    )
}

/// Process with a caller-supplied backend.
///
/// Split out so tests can run the full stage against a mock backend without
/// encoding a single pixel.
pub fn process_with_backend(
    backend: &impl ImageBackend,
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let manifest_content = std::fs::read_to_string(manifest_path)?;
    let mut manifest: Manifest = serde_json::from_str(&manifest_content)?;

    std::fs::create_dir_all(output_dir.join(IMAGE_SUBDIR))?;

    let cache_manifest = Mutex::new(if use_cache {
        CacheManifest::load(output_dir)
    } else {
        CacheManifest::empty()
    });

    let jobs = build_jobs(&manifest);

    if let Some(tx) = &events {
        tx.send(ProcessEvent::Started {
            image_count: jobs.len(),
        })
        .ok();
    }

    let results: Vec<Result<(ImageSet, Vec<VariantInfo>), ProcessError>> = jobs
        .par_iter()
        .map(|job| {
            let (set, infos) =
                process_image(backend, job, source_root, output_dir, &cache_manifest)?;
            if let Some(tx) = &events {
                tx.send(ProcessEvent::ImageProcessed {
                    label: job.label.clone(),
                    source_path: job.source.clone(),
                    variants: infos.clone(),
                })
                .ok();
            }
            Ok((set, infos))
        })
        .collect();

    let mut stats = CacheStats::default();
    for (job, result) in jobs.iter().zip(results) {
        let (set, infos) = result?;
        for info in &infos {
            match info.status {
                VariantStatus::Cached => stats.hit(),
                VariantStatus::Copied => stats.copy(),
                VariantStatus::Encoded => stats.miss(),
            }
        }
        match &job.key {
            JobKey::Portrait => manifest.images.portrait = Some(set),
            JobKey::Screenshot(slug) => {
                manifest.images.screenshots.insert(slug.clone(), set);
            }
        }
    }

    // Saved even on --no-cache runs so the next cached run benefits
    let cache_manifest = cache_manifest.into_inner().unwrap();
    cache_manifest.save(output_dir)?;

    Ok(ProcessResult {
        manifest,
        cache_stats: stats,
    })
}

/// Flatten the manifest's image references into a work list.
///
/// The portrait comes first, then screenshots in slug order. rayon's
/// `collect` preserves this order, so manifest rebuilds are deterministic.
fn build_jobs(manifest: &Manifest) -> Vec<ImageJob> {
    let images_cfg = &manifest.config.images;
    let aspect = (
        images_cfg.portrait_aspect[0],
        images_cfg.portrait_aspect[1],
    );
    let mut jobs = Vec::new();

    if let Some(set) = &manifest.images.portrait {
        jobs.push(ImageJob {
            key: JobKey::Portrait,
            label: "Portrait".to_string(),
            source: set.source.clone(),
            stem: "portrait".to_string(),
            widths: images_cfg.portrait_sizes.clone(),
            quality: images_cfg.quality,
            sharpening: Some(Sharpening::light()),
            kind: JobKind::Cover { aspect },
        });
    }

    for (slug, set) in &manifest.images.screenshots {
        let label = manifest
            .projects
            .iter()
            .find(|p| p.slug == *slug)
            .map(|p| p.title.clone())
            .unwrap_or_else(|| slug.clone());
        jobs.push(ImageJob {
            key: JobKey::Screenshot(slug.clone()),
            label,
            source: set.source.clone(),
            stem: slug.clone(),
            widths: images_cfg.screenshot_sizes.clone(),
            quality: images_cfg.quality,
            sharpening: None,
            kind: JobKind::Fit,
        });
    }

    jobs
}

/// Produce every variant for one source image.
fn process_image(
    backend: &impl ImageBackend,
    job: &ImageJob,
    source_root: &Path,
    output_dir: &Path,
    cache_manifest: &Mutex<CacheManifest>,
) -> Result<(ImageSet, Vec<VariantInfo>), ProcessError> {
    let source_abs = source_root.join(&job.source);
    let dims = backend
        .identify(&source_abs)
        .map_err(|e| ProcessError::Backend {
            path: job.source.clone(),
            source: e,
        })?;

    let sizes = match job.kind {
        JobKind::Cover { aspect } => {
            calculate_cover_sizes((dims.width, dims.height), aspect, &job.widths)
        }
        JobKind::Fit => calculate_fit_sizes((dims.width, dims.height), &job.widths),
    };

    let source_hash = cache::hash_file(&source_abs)?;

    let mut variants = Vec::with_capacity(sizes.len());
    let mut infos = Vec::new();

    for size in &sizes {
        let (avif, avif_info) = produce_variant(
            backend,
            job,
            &source_abs,
            output_dir,
            size,
            "avif",
            &source_hash,
            cache_manifest,
        )?;
        let (webp, webp_info) = produce_variant(
            backend,
            job,
            &source_abs,
            output_dir,
            size,
            "webp",
            &source_hash,
            cache_manifest,
        )?;
        infos.push(avif_info);
        infos.push(webp_info);
        variants.push(Variant {
            target: size.target,
            avif,
            webp,
            width: size.width,
            height: size.height,
        });
    }

    Ok((
        ImageSet {
            source: job.source.clone(),
            variants,
        },
        infos,
    ))
}

/// Produce a single output file, consulting the cache first.
///
/// Returns the output path relative to the output dir plus its status line.
#[allow(clippy::too_many_arguments)]
fn produce_variant(
    backend: &impl ImageBackend,
    job: &ImageJob,
    source_abs: &Path,
    output_dir: &Path,
    size: &VariantSize,
    format: &str,
    source_hash: &str,
    cache_manifest: &Mutex<CacheManifest>,
) -> Result<(String, VariantInfo), ProcessError> {
    let rel_path = format!("{}/{}-{}.{}", IMAGE_SUBDIR, job.stem, size.target, format);
    let abs_path = output_dir.join(&rel_path);

    let params_hash = match job.kind {
        JobKind::Cover { aspect } => cache::hash_cover_params(
            aspect,
            size.target,
            job.quality,
            job.sharpening.map(|s| (s.sigma, s.threshold)),
            format,
        ),
        JobKind::Fit => cache::hash_fit_params(size.target, job.quality, format),
    };

    let cached = cache_manifest
        .lock()
        .unwrap()
        .find_cached(source_hash, &params_hash, output_dir);

    let status = match cached {
        Some(stored) if stored == rel_path => VariantStatus::Cached,
        Some(stored) => {
            // Content unchanged but the slug moved; copy instead of re-encoding
            std::fs::copy(output_dir.join(&stored), &abs_path)?;
            VariantStatus::Copied
        }
        None => {
            encode_variant(backend, job, source_abs, &abs_path, size).map_err(|e| {
                ProcessError::Backend {
                    path: job.source.clone(),
                    source: e,
                }
            })?;
            VariantStatus::Encoded
        }
    };

    cache_manifest.lock().unwrap().insert(
        rel_path.clone(),
        source_hash.to_string(),
        params_hash,
    );

    let label = format!("{}px {}", size.target, format);
    Ok((rel_path, VariantInfo { label, status }))
}

fn encode_variant(
    backend: &impl ImageBackend,
    job: &ImageJob,
    source_abs: &Path,
    output: &Path,
    size: &VariantSize,
) -> Result<(), BackendError> {
    match job.kind {
        JobKind::Cover { .. } => backend.cover(&CoverParams {
            source: source_abs.to_path_buf(),
            output: output.to_path_buf(),
            width: size.width,
            height: size.height,
            quality: Quality::new(job.quality),
            sharpening: job.sharpening,
        }),
        JobKind::Fit => backend.resize(&ResizeParams {
            source: source_abs.to_path_buf(),
            output: output.to_path_buf(),
            width: size.width,
            height: size.height,
            quality: Quality::new(job.quality),
        }),
    }
}
