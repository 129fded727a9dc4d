//! releasekit - mobile release assets
//!
//! Generates iOS and Android app icons, assembles Android App Bundle zips
//! and encodes or validates their `BundleConfig.pb` record.

// Enforce strict code quality and reliability
#![deny(
    // Safety
    unsafe_code,

    // Correctness
    missing_debug_implementations,
    unreachable_pub,

    // Future compatibility
    future_incompatible,

    // Rust 2018 idioms
    rust_2018_idioms,
)]
#![warn(
    // Error handling best practices
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unimplemented,
    clippy::todo,

    // Performance
    clippy::inefficient_to_string,
    clippy::large_enum_variant,

    // Code clarity and maintainability
    clippy::cognitive_complexity,
    clippy::too_many_arguments,
    clippy::type_complexity,

    // Best practices
    clippy::clone_on_ref_ptr,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::if_not_else,
    clippy::single_match_else,
    clippy::needless_continue,
    clippy::explicit_iter_loop,
    clippy::explicit_into_iter_loop,
)]

pub mod api;
pub mod bundle;
pub mod config;
pub mod exceptions;
pub mod exit_codes;
pub mod icons;
pub mod logger;
pub mod utils;
pub mod version;

// Re-export main API functions
pub use api::{
    AndroidIconOptions, BuildOptions, ConfigOptions, build_all_variants, build_bundle,
    build_minimal, check_icons, generate_android_icons, generate_app_store_icon,
    generate_ios_icons, scaffold_bundle, validate_bundles, write_config_records,
};
pub use bundle::record::{BundleConfig, ConfigVariant, decode_record};
pub use config::ReleaseConfig;
pub use exceptions::{ReleaseError, Result};
pub use icons::AppStoreStyle;
