//! Android App Bundle assembly and BundleConfig records

pub mod assemble;
pub mod constants;
pub mod layout;
pub mod record;
pub mod templates;
pub mod validate;
pub mod writer;

pub use assemble::{AssembleOptions, ConfigEntry, assemble};
pub use record::{BundleConfig, ConfigVariant, RecordError, RecordReport, decode_record, encode_version};
pub use validate::{Validation, ValidationSummary, validate_many, validate_path};
pub use writer::{BundleSummary, BundleWriter};
