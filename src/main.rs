use clap::{Parser, Subcommand};
use monofolio::{config, contact, generate, output, process, relay, scan, starter};
use std::path::PathBuf;

/// Shared flags for commands that process images.
#[derive(clap::Args, Clone)]
struct CacheArgs {
    /// Disable the processing cache — force re-encoding of all images
    #[arg(long)]
    no_cache: bool,
}

#[derive(clap::Args)]
struct InitArgs {
    /// Overwrite starter files that already exist
    #[arg(long)]
    force: bool,
}

#[derive(clap::Args)]
struct SendTestArgs {
    /// Sender name for the test message
    #[arg(long, default_value = "Test Sender")]
    name: String,

    /// Sender address for the test message
    #[arg(long, default_value = "test@example.com")]
    email: String,

    /// Message body
    #[arg(long, default_value = "Test message from the monofolio send-test command.")]
    message: String,

    /// Override the recipient address from the config
    #[arg(long)]
    to: Option<String>,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "monofolio")]
#[command(about = "Static site generator for single-page developer portfolios")]
#[command(long_about = "\
Static site generator for single-page developer portfolios

Your content directory is the data source. TOML files become page
sections, about.md becomes the about text, and referenced images are
encoded into responsive AVIF/WebP variants.

Content structure:

  content/
  ├── config.toml          # Colors, reveal tuning, contact relay (optional)
  ├── profile.toml         # Name, headline, links, hero content (required)
  ├── about.md             # About section, markdown (optional)
  ├── experience.toml      # Roles and education (optional)
  ├── projects.toml        # Project cards (optional)
  ├── skills.toml          # Skill categories (optional)
  ├── contact.toml         # Contact channels and pitch (optional)
  └── assets/              # Favicon, resume PDF → copied to output root

Sections render only when their file exists; the hero and the contact
form are always present. The portrait referenced from profile.toml and
the screenshots referenced from projects.toml are resolved relative to
the content directory.

Run 'monofolio init' for a starter content directory, or
'monofolio gen-config' for a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest, processed images)
    #[arg(long, default_value = ".monofolio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Encode responsive image variants from the manifest
    Process(CacheArgs),
    /// Produce the final HTML site from the processed manifest
    Generate,
    /// Run the full pipeline: scan → process → generate
    Build(CacheArgs),
    /// Validate content and report relay/image status without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Write a starter content directory to build on
    Init(InitArgs),
    /// Submit a message through the configured relay, like the live form
    SendTest(SendTestArgs),
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest);
        }
        Command::Process(cache_args) => {
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&scan_manifest_path)?;
            let input_manifest: serde_json::Value = serde_json::from_str(&manifest_content)?;
            let site_config: config::SiteConfig =
                serde_json::from_value(input_manifest.get("config").cloned().unwrap_or_default())?;
            init_thread_pool(&site_config.processing);
            let processed_dir = cli.temp_dir.join("processed");
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(
                &scan_manifest_path,
                &cli.source,
                &processed_dir,
                !cache_args.no_cache,
                Some(tx),
            )?;
            printer.join().unwrap();
            let output_manifest = processed_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&result.manifest)?;
            std::fs::write(&output_manifest, &json)?;
            println!("Cache: {}", result.cache_stats);
        }
        Command::Generate => {
            let processed_dir = cli.temp_dir.join("processed");
            let processed_manifest_path = processed_dir.join("manifest.json");
            let summary = generate::generate(
                &processed_manifest_path,
                &cli.source,
                &processed_dir,
                &cli.output,
            )?;
            output::print_generate_output(&summary);
        }
        Command::Build(cache_args) => {
            std::fs::create_dir_all(&cli.temp_dir)?;

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let scan_manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&scan_manifest_path, json)?;
            output::print_scan_output(&manifest);

            println!("==> Stage 2: Processing images");
            init_thread_pool(&manifest.config.processing);
            let processed_dir = cli.temp_dir.join("processed");
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(
                &scan_manifest_path,
                &cli.source,
                &processed_dir,
                !cache_args.no_cache,
                Some(tx),
            )?;
            printer.join().unwrap();
            let processed_manifest_path = processed_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&result.manifest)?;
            std::fs::write(&processed_manifest_path, &json)?;
            println!("Cache: {}", result.cache_stats);

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(
                &processed_manifest_path,
                &cli.source,
                &processed_dir,
                &cli.output,
            )?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest);
            output::print_check_output(&manifest);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Init(init_args) => {
            let written = starter::write_starter(&cli.source, init_args.force)?;
            println!(
                "Created {} ({} files)",
                cli.source.display(),
                written.len()
            );
            for path in written {
                println!("    {}", path);
            }
            println!("Edit profile.toml, then run 'monofolio build'.");
        }
        Command::SendTest(args) => {
            let manifest = scan::scan(&cli.source)?;
            let mut relay_config = manifest.config.relay.clone();
            if let Some(to) = args.to {
                relay_config.to_email = to;
            }
            let recipient = if relay_config.to_email.is_empty() {
                manifest.profile.email.clone()
            } else {
                relay_config.to_email.clone()
            };
            println!("==> Sending test message to {}", recipient);

            let transport = relay::HttpRelay::new(&relay_config)?;
            let mut form = contact::ContactForm::new(relay_config, &manifest.profile.email);
            form.update_field(contact::Field::Name, &args.name);
            form.update_field(contact::Field::Email, &args.email);
            form.update_field(contact::Field::Message, &args.message);
            form.submit(&transport);

            let errors = form.errors();
            if !errors.is_empty() {
                for field in [
                    contact::Field::Name,
                    contact::Field::Email,
                    contact::Field::Message,
                ] {
                    if let Some(message) = errors.get(field) {
                        eprintln!("{}", message);
                    }
                }
                std::process::exit(1);
            }
            match form.status() {
                contact::Status::Success => println!("{}", contact::SEND_SUCCESS),
                contact::Status::Error(message) => {
                    eprintln!("{}", message);
                    std::process::exit(1);
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
