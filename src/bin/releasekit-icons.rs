//! releasekit icon generator binary

use clap::{Parser, Subcommand};
use releasekit::api::{self, AndroidIconOptions};
use releasekit::exit_codes::*;
use releasekit::{AppStoreStyle, ReleaseConfig, ReleaseError};
use std::{env, panic, path::PathBuf, process};

const VERSION: &str = releasekit::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Generate iOS and Android app icons")]
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
    /// Write the whistle AppIcon set and Contents.json
    Ios {
        /// AppIcon.appiconset directory
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Write the 1024 px App Store icon
    AppStore {
        #[arg(short, long, value_enum, default_value = "badge")]
        style: AppStoreStyle,

        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Write launcher, round and foreground icons for every density
    Android {
        /// Android res directory
        #[arg(short, long)]
        res_dir: Option<PathBuf>,

        /// Use the whistle design instead of the logo
        #[arg(long)]
        whistle: bool,
    },
    /// Check sizes and alpha channels of generated icons
    Check {
        #[arg(long)]
        ios_dir: Option<PathBuf>,

        #[arg(long)]
        res_dir: Option<PathBuf>,
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
            eprintln!("Fatal: Unhandled panic in icon generator");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("releasekit-icons {}", releasekit::version::full_version());
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
            eprintln!("Icon error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn execute(config: &ReleaseConfig, command: Command) -> Result<i32, ReleaseError> {
    match command {
        Command::Ios { dir } => {
            let written = api::generate_ios_icons(config, dir.as_deref())?;
            for icon in &written {
                println!("✅ {} ({}x{})", icon.path.display(), icon.size, icon.size);
            }
            println!("🎯 {} iOS icons generated", written.len());
        }
        Command::AppStore { style, dir } => {
            let icon = api::generate_app_store_icon(config, style, dir.as_deref())?;
            println!("🏪 App Store icon: {}", icon.path.display());
        }
        Command::Android { res_dir, whistle } => {
            let written =
                api::generate_android_icons(config, AndroidIconOptions { res_dir, whistle })?;
            println!("🤖 {} Android icons generated", written.len());
        }
        Command::Check { ios_dir, res_dir } => {
            let result = api::check_icons(config, ios_dir.as_deref(), res_dir.as_deref());
            for check in &result.checks {
                check.print();
            }
            if !result.passed() {
                println!("❌ {} of {} icons failed", result.failures(), result.checks.len());
                return Ok(EXIT_VALIDATION_FAILED);
            }
            println!("🎉 All {} icons passed", result.checks.len());
        }
    }
    Ok(EXIT_SUCCESS)
}
