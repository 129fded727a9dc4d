//! BundleConfig.pb record encoding and decoding
//!
//! The record is written as literal (tag, length, payload) triples:
//! tag = field_number << 3 | wire_type, and every length is a single byte.
//! Field 1 always carries the bundletool version string; fields 2-4 are
//! short fixed sub-messages that some tooling expects to be present.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Varint wire type (value follows the tag)
pub const WIRE_VARINT: u8 = 0;

/// Length-delimited wire type (length byte + payload follow the tag)
pub const WIRE_LENGTH_DELIMITED: u8 = 2;

/// Field number of the bundletool version string
pub const FIELD_BUNDLETOOL_VERSION: u8 = 1;
/// Field number of the optimizations sub-message
pub const FIELD_OPTIMIZATIONS: u8 = 2;
/// Field number of the compression sub-message
pub const FIELD_COMPRESSION: u8 = 3;
/// Field number of the master resources sub-message
pub const FIELD_MASTER_RESOURCES: u8 = 4;

/// Largest payload whose length still fits one byte without the varint continuation bit
pub const MAX_SINGLE_BYTE_LENGTH: usize = 0x7f;

/// Largest field number whose tag fits in one byte
pub const MAX_SINGLE_BYTE_FIELD: u8 = 15;

/// Malformed or unencodable configuration record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Fewer than the two bytes needed for a tag and a length
    TooShort { len: usize },
    /// The first field is not the bundletool version
    UnexpectedFirstField { field_number: u8 },
    /// The first field is not length-delimited
    UnexpectedWireType { field_number: u8, wire_type: u8 },
    /// Declared payload length runs past the end of the record
    LengthOverrun {
        field_number: u8,
        declared: usize,
        available: usize,
    },
    /// A trailing length-delimited field has no length byte
    MissingLength { field_number: u8, offset: usize },
    /// A trailing varint field has no value byte
    MissingValue { field_number: u8, offset: usize },
    /// Trailing field uses a wire type the checker does not handle
    UnsupportedWireType { field_number: u8, wire_type: u8 },
    /// Version payload is not UTF-8
    InvalidUtf8,
    /// Version payload is not made of digits and dots
    InvalidVersion(String),
    /// Payload too long for a single-byte length
    PayloadTooLong { field_number: u8, len: usize },
    /// Field number outside 1..=15
    InvalidFieldNumber(u8),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::TooShort { len } => {
                write!(f, "config too short ({len} bytes, need at least 2)")
            }
            RecordError::UnexpectedFirstField { field_number } => write!(
                f,
                "first field should be field 1 (bundletool_version), found field {field_number}"
            ),
            RecordError::UnexpectedWireType {
                field_number,
                wire_type,
            } => write!(
                f,
                "field {field_number} should be length-delimited (wire type 2), found wire type {wire_type}"
            ),
            RecordError::LengthOverrun {
                field_number,
                declared,
                available,
            } => write!(
                f,
                "field {field_number} declares {declared} bytes but only {available} remain"
            ),
            RecordError::MissingLength {
                field_number,
                offset,
            } => write!(
                f,
                "missing length for additional field {field_number} at offset {offset}"
            ),
            RecordError::MissingValue {
                field_number,
                offset,
            } => write!(
                f,
                "missing varint value for additional field {field_number} at offset {offset}"
            ),
            RecordError::UnsupportedWireType {
                field_number,
                wire_type,
            } => write!(
                f,
                "unsupported wire type {wire_type} for field {field_number}"
            ),
            RecordError::InvalidUtf8 => write!(f, "version string is not valid UTF-8"),
            RecordError::InvalidVersion(v) => write!(f, "invalid version format '{v}'"),
            RecordError::PayloadTooLong { field_number, len } => write!(
                f,
                "field {field_number} payload is {len} bytes, single-byte lengths stop at {MAX_SINGLE_BYTE_LENGTH}"
            ),
            RecordError::InvalidFieldNumber(n) => {
                write!(f, "field number {n} does not fit a single tag byte")
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Build a tag byte from field number and wire type
pub fn tag(field_number: u8, wire_type: u8) -> u8 {
    (field_number << 3) | (wire_type & 0x07)
}

/// Split a tag byte into (field number, wire type)
pub fn split_tag(tag: u8) -> (u8, u8) {
    (tag >> 3, tag & 0x07)
}

/// One (field number, wire type, payload) triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigField {
    pub number: u8,
    pub wire_type: u8,
    pub payload: Vec<u8>,
}

impl ConfigField {
    /// Length-delimited field
    pub fn message(number: u8, payload: &[u8]) -> Result<Self, RecordError> {
        if number == 0 || number > MAX_SINGLE_BYTE_FIELD {
            return Err(RecordError::InvalidFieldNumber(number));
        }
        if payload.len() > MAX_SINGLE_BYTE_LENGTH {
            return Err(RecordError::PayloadTooLong {
                field_number: number,
                len: payload.len(),
            });
        }
        Ok(Self {
            number,
            wire_type: WIRE_LENGTH_DELIMITED,
            payload: payload.to_vec(),
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(tag(self.number, self.wire_type));
        if self.wire_type == WIRE_LENGTH_DELIMITED {
            // Lengths are capped at MAX_SINGLE_BYTE_LENGTH on construction
            out.push(self.payload.len() as u8);
        }
        out.extend_from_slice(&self.payload);
    }
}

/// A BundleConfig record: the version field followed by optional sub-messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    fields: Vec<ConfigField>,
}

impl BundleConfig {
    /// Record holding only the bundletool version
    pub fn new(bundletool_version: &str) -> Result<Self, RecordError> {
        let field = ConfigField::message(FIELD_BUNDLETOOL_VERSION, bundletool_version.as_bytes())?;
        Ok(Self {
            fields: vec![field],
        })
    }

    /// Append a length-delimited sub-message
    pub fn with_message(mut self, number: u8, body: &[u8]) -> Result<Self, RecordError> {
        self.fields.push(ConfigField::message(number, body)?);
        Ok(self)
    }

    pub fn fields(&self) -> &[ConfigField] {
        &self.fields
    }

    /// Serialize fields in order
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.fields.iter().map(|f| f.payload.len() + 2).sum::<usize>(),
        );
        for field in &self.fields {
            field.encode_into(&mut out);
        }
        trace!("Encoded BundleConfig: {}", hex::encode(&out));
        out
    }
}

/// Encode a version string as field 1: `0x0a, len(v), v`
pub fn encode_version(version: &str) -> Result<Vec<u8>, RecordError> {
    Ok(BundleConfig::new(version)?.encode())
}

/// The record layouts the release process has shipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigVariant {
    /// Version field only
    UltraMinimal,
    /// Version + empty optimizations message (bundletool output)
    Bundletool,
    /// Same bytes as `Bundletool`, as produced by Android Studio builds
    AndroidStudio,
    /// Version + optimizations message with one zero flag
    Optimizations,
    /// Version + optimizations message with two enabled flags
    Unity,
    /// Version + optimizations, compression and master resources messages
    Proper,
}

impl ConfigVariant {
    pub const ALL: [ConfigVariant; 6] = [
        ConfigVariant::UltraMinimal,
        ConfigVariant::Bundletool,
        ConfigVariant::AndroidStudio,
        ConfigVariant::Optimizations,
        ConfigVariant::Unity,
        ConfigVariant::Proper,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfigVariant::UltraMinimal => "ultra-minimal",
            ConfigVariant::Bundletool => "bundletool",
            ConfigVariant::AndroidStudio => "android-studio",
            ConfigVariant::Optimizations => "optimizations",
            ConfigVariant::Unity => "unity",
            ConfigVariant::Proper => "proper",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConfigVariant::UltraMinimal => "bundletool version only",
            ConfigVariant::Bundletool => "version + empty optimizations",
            ConfigVariant::AndroidStudio => "Android Studio layout (version + empty optimizations)",
            ConfigVariant::Optimizations => "version + optimizations {0}",
            ConfigVariant::Unity => "version + optimizations {1, 1}",
            ConfigVariant::Proper => "version + optimizations, compression, master resources",
        }
    }

    /// File name used when the variant is stored next to the bundle sources
    pub fn file_name(&self) -> String {
        format!("BundleConfig-{}.pb", self.name())
    }

    /// Build the record for this variant
    pub fn build(&self, bundletool_version: &str) -> Result<BundleConfig, RecordError> {
        let base = BundleConfig::new(bundletool_version)?;
        let config = match self {
            ConfigVariant::UltraMinimal => base,
            ConfigVariant::Bundletool | ConfigVariant::AndroidStudio => {
                base.with_message(FIELD_OPTIMIZATIONS, &[])?
            }
            ConfigVariant::Optimizations => {
                base.with_message(FIELD_OPTIMIZATIONS, &[0x08, 0x00])?
            }
            ConfigVariant::Unity => {
                base.with_message(FIELD_OPTIMIZATIONS, &[0x08, 0x01, 0x10, 0x01])?
            }
            ConfigVariant::Proper => base
                .with_message(FIELD_OPTIMIZATIONS, &[0x08, 0x01])?
                .with_message(FIELD_COMPRESSION, &[0x08, 0x00])?
                .with_message(FIELD_MASTER_RESOURCES, &[0x08, 0x01])?,
        };
        debug!(
            "Built {} BundleConfig ({} fields)",
            self.name(),
            config.fields().len()
        );
        Ok(config)
    }

    /// Encoded bytes for this variant
    pub fn encode(&self, bundletool_version: &str) -> Result<Vec<u8>, RecordError> {
        Ok(self.build(bundletool_version)?.encode())
    }
}

impl fmt::Display for ConfigVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigVariant::ALL
            .iter()
            .copied()
            .find(|v| v.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = ConfigVariant::ALL.iter().map(|v| v.name()).collect();
                format!("unknown config variant '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// A trailing field seen after the version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHeader {
    pub number: u8,
    pub wire_type: u8,
    /// Offset of the tag byte
    pub offset: usize,
    /// Payload length for length-delimited fields
    pub length: Option<usize>,
}

/// Structure found by [`decode_record`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordReport {
    pub size: usize,
    pub field_number: u8,
    pub wire_type: u8,
    pub length: usize,
    pub version: String,
    pub extra_fields: Vec<FieldHeader>,
}

impl RecordReport {
    /// Bytes following the version field
    pub fn trailing_len(&self) -> usize {
        self.size - 2 - self.length
    }
}

fn is_version_string(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit()) && s.chars().all(|c| c == '.' || c.is_ascii_digit())
}

/// Check the bare structural shape of a BundleConfig record
///
/// Only the first field is interpreted; trailing bytes must parse as further
/// (tag, length, payload) triples or single-byte varints.
pub fn decode_record(bytes: &[u8]) -> Result<RecordReport, RecordError> {
    if bytes.len() < 2 {
        return Err(RecordError::TooShort { len: bytes.len() });
    }

    let (field_number, wire_type) = split_tag(bytes[0]);
    trace!("First field: number={field_number}, wire_type={wire_type}");
    if field_number != FIELD_BUNDLETOOL_VERSION {
        return Err(RecordError::UnexpectedFirstField { field_number });
    }
    if wire_type != WIRE_LENGTH_DELIMITED {
        return Err(RecordError::UnexpectedWireType {
            field_number,
            wire_type,
        });
    }

    let length = bytes[1] as usize;
    if bytes.len() < 2 + length {
        return Err(RecordError::LengthOverrun {
            field_number,
            declared: length,
            available: bytes.len() - 2,
        });
    }

    let version = std::str::from_utf8(&bytes[2..2 + length])
        .map_err(|_| RecordError::InvalidUtf8)?
        .to_string();
    if !is_version_string(&version) {
        return Err(RecordError::InvalidVersion(version));
    }

    let mut extra_fields = Vec::new();
    let mut pos = 2 + length;
    while pos < bytes.len() {
        let offset = pos;
        let (number, wire) = split_tag(bytes[pos]);
        pos += 1;

        match wire {
            WIRE_LENGTH_DELIMITED => {
                let Some(&len_byte) = bytes.get(pos) else {
                    return Err(RecordError::MissingLength {
                        field_number: number,
                        offset,
                    });
                };
                let field_len = len_byte as usize;
                pos += 1;
                if pos + field_len > bytes.len() {
                    return Err(RecordError::LengthOverrun {
                        field_number: number,
                        declared: field_len,
                        available: bytes.len() - pos,
                    });
                }
                pos += field_len;
                extra_fields.push(FieldHeader {
                    number,
                    wire_type: wire,
                    offset,
                    length: Some(field_len),
                });
            }
            WIRE_VARINT => {
                if pos >= bytes.len() {
                    return Err(RecordError::MissingValue {
                        field_number: number,
                        offset,
                    });
                }
                pos += 1;
                extra_fields.push(FieldHeader {
                    number,
                    wire_type: wire,
                    offset,
                    length: None,
                });
            }
            other => {
                return Err(RecordError::UnsupportedWireType {
                    field_number: number,
                    wire_type: other,
                });
            }
        }
    }

    Ok(RecordReport {
        size: bytes.len(),
        field_number,
        wire_type,
        length,
        version,
        extra_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: [u8; 8] = [0x0a, 0x06, 0x31, 0x2e, 0x31, 0x35, 0x2e, 0x34];

    #[test]
    fn test_decode_shipped_record() {
        let report = decode_record(&SHIPPED).unwrap();
        assert_eq!(report.field_number, 1);
        assert_eq!(report.wire_type, 2);
        assert_eq!(report.length, 6);
        assert_eq!(report.version, "1.15.4");
        assert!(report.extra_fields.is_empty());
        assert_eq!(report.trailing_len(), 0);
    }

    #[test]
    fn test_encode_version_layout() {
        assert_eq!(encode_version("1.15.4").unwrap(), SHIPPED.to_vec());

        let bytes = encode_version("2.0").unwrap();
        assert_eq!(bytes, vec![0x0a, 3, b'2', b'.', b'0']);
        assert_eq!(decode_record(&bytes).unwrap().version, "2.0");
    }

    #[test]
    fn test_version_survives_encode_and_decode() {
        let longest = "1.".repeat(63) + "9";
        assert_eq!(longest.len(), MAX_SINGLE_BYTE_LENGTH);
        for version in ["1", "0.0.1", "1.15.4", "1.18.1", "10.200.3000", "..7", longest.as_str()] {
            let bytes = encode_version(version).unwrap();
            assert_eq!(bytes.len(), version.len() + 2, "{version}");
            let report = decode_record(&bytes).unwrap();
            assert_eq!(report.version, version);
            assert_eq!(report.length, version.len());
            assert!(report.extra_fields.is_empty());
        }
    }

    #[test]
    fn test_encode_rejects_long_version() {
        let long = "1".repeat(MAX_SINGLE_BYTE_LENGTH + 1);
        assert_eq!(
            encode_version(&long),
            Err(RecordError::PayloadTooLong {
                field_number: 1,
                len: MAX_SINGLE_BYTE_LENGTH + 1
            })
        );
        assert!(encode_version(&"1".repeat(MAX_SINGLE_BYTE_LENGTH)).is_ok());
    }

    #[test]
    fn test_variant_bytes() {
        let v = "1.15.4";
        assert_eq!(
            hex::encode(ConfigVariant::UltraMinimal.encode(v).unwrap()),
            "0a06312e31352e34"
        );
        assert_eq!(
            hex::encode(ConfigVariant::Bundletool.encode(v).unwrap()),
            "0a06312e31352e341200"
        );
        assert_eq!(
            ConfigVariant::AndroidStudio.encode(v).unwrap(),
            ConfigVariant::Bundletool.encode(v).unwrap()
        );
        assert_eq!(
            hex::encode(ConfigVariant::Optimizations.encode(v).unwrap()),
            "0a06312e31352e3412020800"
        );
        assert_eq!(
            hex::encode(ConfigVariant::Unity.encode(v).unwrap()),
            "0a06312e31352e34120408011001"
        );
        assert_eq!(
            hex::encode(ConfigVariant::Proper.encode(v).unwrap()),
            "0a06312e31352e34120208011a02080022020801"
        );
    }

    #[test]
    fn test_every_variant_decodes() {
        for variant in ConfigVariant::ALL {
            let bytes = variant.encode("1.15.4").unwrap();
            let report = decode_record(&bytes).unwrap();
            assert_eq!(report.version, "1.15.4", "variant {variant}");
        }

        let proper = decode_record(&ConfigVariant::Proper.encode("1.15.4").unwrap()).unwrap();
        let numbers: Vec<u8> = proper.extra_fields.iter().map(|f| f.number).collect();
        assert_eq!(numbers, vec![2, 3, 4]);
        assert!(proper.extra_fields.iter().all(|f| f.length == Some(2)));
    }

    #[test]
    fn test_variant_names_round_trip() {
        for variant in ConfigVariant::ALL {
            assert_eq!(variant.name().parse::<ConfigVariant>().unwrap(), variant);
        }
        assert!("android15".parse::<ConfigVariant>().is_err());
        assert_eq!(
            ConfigVariant::Unity.file_name(),
            "BundleConfig-unity.pb"
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode_record(&[0x0a]), Err(RecordError::TooShort { len: 1 }));
        // The old android15 placeholder: field 1 as a varint
        assert_eq!(
            decode_record(&[0x08, 0x01]),
            Err(RecordError::UnexpectedWireType {
                field_number: 1,
                wire_type: 0
            })
        );
        assert_eq!(
            decode_record(&[0x12, 0x00]),
            Err(RecordError::UnexpectedFirstField { field_number: 2 })
        );
        assert_eq!(
            decode_record(&[0x0a, 0x06, b'1', b'.']),
            Err(RecordError::LengthOverrun {
                field_number: 1,
                declared: 6,
                available: 2
            })
        );
        assert_eq!(
            decode_record(&[0x0a, 0x03, b'a', b'.', b'b']),
            Err(RecordError::InvalidVersion("a.b".to_string()))
        );
        assert_eq!(
            decode_record(&[0x0a, 0x01, b'.']),
            Err(RecordError::InvalidVersion(".".to_string()))
        );
        assert_eq!(
            decode_record(&[0x0a, 0x02, 0xff, 0xfe]),
            Err(RecordError::InvalidUtf8)
        );
    }

    #[test]
    fn test_decode_trailing_fields() {
        let mut bytes = SHIPPED.to_vec();
        bytes.extend_from_slice(&[0x10, 0x01]); // field 2 varint
        let report = decode_record(&bytes).unwrap();
        assert_eq!(report.extra_fields.len(), 1);
        assert_eq!(report.extra_fields[0].wire_type, WIRE_VARINT);
        assert_eq!(report.extra_fields[0].offset, 8);

        let mut missing_len = SHIPPED.to_vec();
        missing_len.push(0x12);
        assert_eq!(
            decode_record(&missing_len),
            Err(RecordError::MissingLength {
                field_number: 2,
                offset: 8
            })
        );

        let mut truncated = SHIPPED.to_vec();
        truncated.extend_from_slice(&[0x12, 0x04, 0x08]);
        assert!(matches!(
            decode_record(&truncated),
            Err(RecordError::LengthOverrun { field_number: 2, .. })
        ));

        let mut fixed64 = SHIPPED.to_vec();
        fixed64.extend_from_slice(&[0x11, 0x00]);
        assert_eq!(
            decode_record(&fixed64),
            Err(RecordError::UnsupportedWireType {
                field_number: 2,
                wire_type: 1
            })
        );
    }

    #[test]
    fn test_tag_helpers() {
        assert_eq!(tag(1, WIRE_LENGTH_DELIMITED), 0x0a);
        assert_eq!(tag(4, WIRE_LENGTH_DELIMITED), 0x22);
        assert_eq!(split_tag(0x1a), (3, 2));
        assert_eq!(
            ConfigField::message(16, &[]),
            Err(RecordError::InvalidFieldNumber(16))
        );
    }
}
