//! releasekit Android App Bundle binary

use clap::{Parser, Subcommand};
use releasekit::api::{self, BuildOptions, ConfigOptions};
use releasekit::exit_codes::*;
use releasekit::{ConfigVariant, ReleaseConfig, ReleaseError};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = releasekit::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Assemble Android App Bundles and their BundleConfig.pb")]
struct Args {
    /// Path to release.json (defaults to ./release.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the bundle source tree
    Scaffold {
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Write BundleConfig.pb into the source tree
    Config {
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Record variant (ultra-minimal, bundletool, android-studio, optimizations, unity, proper)
        #[arg(long)]
        variant: Option<ConfigVariant>,

        /// Also write BundleConfig-<variant>.pb for every variant
        #[arg(long)]
        all: bool,

        #[arg(long)]
        bundletool_version: Option<String>,
    },
    /// Zip the source tree into a bundle
    Build {
        #[arg(short, long)]
        source: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(long)]
        variant: Option<ConfigVariant>,

        /// Archive the tree's BundleConfig.pb unchanged
        #[arg(long, conflicts_with_all = ["variant", "no_config"])]
        keep_config: bool,

        /// Leave BundleConfig.pb out of the archive
        #[arg(long)]
        no_config: bool,

        #[arg(long)]
        skip_verification: bool,
    },
    /// One bundle per record variant
    BuildAll {
        #[arg(short, long)]
        source: Option<PathBuf>,

        #[arg(long)]
        skip_verification: bool,
    },
    /// Bundle with manifests, strings, launcher icons and a placeholder dex
    Minimal {
        #[arg(short, long)]
        source: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate the BundleConfig.pb of bundles or raw .pb files
    Validate {
        /// Files to check (defaults to bundle.validate from the config)
        paths: Vec<PathBuf>,
    },
}

fn main() {
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in bundle tool");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("releasekit-aab {}", releasekit::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    if let Some(ref level) = args.log_level {
        releasekit::logger::JsonLogger::init_with_level(level, "CLI --log-level");
    } else {
        releasekit::logger::JsonLogger::init();
    }

    let config = match ReleaseConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return exit_code_for(&e);
        }
    };

    match execute(&config, args.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Bundle error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn execute(config: &ReleaseConfig, command: Command) -> Result<i32, ReleaseError> {
    match command {
        Command::Scaffold { dir } => {
            let report = api::scaffold_bundle(config, dir.as_deref())?;
            for name in &report.written {
                println!("📄 {name}");
            }
            if !report.missing_icons.is_empty() {
                println!(
                    "⚠️ No launcher icon for: {}",
                    report.missing_icons.join(", ")
                );
            }
            println!("🏗️ Scaffolded {} files", report.written.len());
        }
        Command::Config {
            dir,
            variant,
            all,
            bundletool_version,
        } => {
            let options = ConfigOptions {
                dir,
                variant,
                all_variants: all,
                bundletool_version,
            };
            for (variant, path, bytes) in api::write_config_records(config, options)? {
                println!(
                    "🧾 {variant}: {} ({} bytes, {})",
                    path.display(),
                    bytes.len(),
                    hex::encode(&bytes)
                );
            }
        }
        Command::Build {
            source,
            output,
            variant,
            keep_config,
            no_config,
            skip_verification,
        } => {
            let options = BuildOptions {
                source_dir: source,
                output,
                variant,
                keep_config,
                omit_config: no_config,
                skip_verification,
            };
            api::build_bundle(config, options)?.print();
        }
        Command::BuildAll {
            source,
            skip_verification,
        } => {
            let built = api::build_all_variants(config, source.as_deref(), skip_verification)?;
            for (variant, summary) in &built {
                println!("🧪 {variant}: {}", variant.description());
                summary.print();
            }
            println!("🎉 Built {} variant bundles", built.len());
        }
        Command::Minimal { source, output } => {
            api::build_minimal(config, source.as_deref(), output.as_deref())?.print();
        }
        Command::Validate { paths } => {
            if paths.is_empty() && config.bundle.validate.is_empty() {
                eprintln!("No bundles to validate");
                return Ok(EXIT_INVALID_ARGS);
            }
            let summary = api::validate_bundles(config, &paths);
            println!(
                "📊 {} passed, {} failed, {} missing",
                summary.passed, summary.failed, summary.missing
            );
            if !summary.all_passed() {
                return Ok(EXIT_VALIDATION_FAILED);
            }
        }
    }
    Ok(EXIT_SUCCESS)
}
