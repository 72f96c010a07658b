//! Error types for template patching.
//!
//! Errors fall into two groups. Configuration errors mean the template asset
//! and the patch logic disagree (a broken or skewed template); retrying or
//! changing user input cannot fix them. Input errors come from values the
//! form layer let through, such as a symbol that cannot be a Move identifier.

use std::fmt;

/// The user-facing field a constant patch rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchField {
    Decimals,
    Symbol,
    Name,
    Description,
}

impl PatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchField::Decimals => "decimals",
            PatchField::Symbol => "symbol",
            PatchField::Name => "name",
            PatchField::Description => "description",
        }
    }
}

impl fmt::Display for PatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage that called into an external encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStage {
    /// Decoding the hex template asset.
    DecodeHex,
    /// Deserializing module bytes.
    Deserialize,
    /// BCS-encoding a constant value.
    EncodeConstant,
    /// Serializing the patched module.
    Serialize,
    /// Re-reading the serialized output as a structural check.
    Verify,
}

impl fmt::Display for PatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatchStage::DecodeHex => "decode-hex",
            PatchStage::Deserialize => "deserialize",
            PatchStage::EncodeConstant => "encode-constant",
            PatchStage::Serialize => "serialize",
            PatchStage::Verify => "verify",
        };
        f.write_str(s)
    }
}

/// Errors produced while loading a template or patching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The template bytes do not decode as a Move module.
    InvalidTemplate { stage: PatchStage, reason: String },

    /// A placeholder identifier is missing from the template's identifier table.
    IdentifierNotFound { placeholder: String },

    /// A replacement identifier is not a valid Move identifier.
    InvalidIdentifier {
        placeholder: String,
        replacement: String,
    },

    /// A replacement identifier is already used elsewhere in the module.
    IdentifierCollision { replacement: String },

    /// No constant of the declared kind holds the placeholder value.
    ConstantNotFound { field: PatchField, kind: String },

    /// Decimals outside `0..=255` reached the parameter constructor.
    DecimalsOutOfRange { value: i64 },

    /// An external encoding call failed.
    Encoding { stage: PatchStage, reason: String },
}

impl PatchError {
    /// True for errors caused by the template asset rather than user input.
    ///
    /// Callers surface these as "service unavailable".
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PatchError::InvalidTemplate { .. }
                | PatchError::IdentifierNotFound { .. }
                | PatchError::ConstantNotFound { .. }
                | PatchError::Encoding { .. }
        )
    }

    /// The field a failed constant patch was rewriting, if any.
    pub fn field(&self) -> Option<PatchField> {
        match self {
            PatchError::ConstantNotFound { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::InvalidTemplate { stage, reason } => {
                write!(f, "template module is invalid ({}): {}", stage, reason)
            }
            PatchError::IdentifierNotFound { placeholder } => write!(
                f,
                "placeholder identifier '{}' not found in template",
                placeholder
            ),
            PatchError::InvalidIdentifier {
                placeholder,
                replacement,
            } => write!(
                f,
                "'{}' is not a valid Move identifier (replacing '{}')",
                replacement, placeholder
            ),
            PatchError::IdentifierCollision { replacement } => write!(
                f,
                "identifier '{}' is already used by the template module",
                replacement
            ),
            PatchError::ConstantNotFound { field, kind } => write!(
                f,
                "cannot patch {}: no {} constant holds the placeholder value",
                field, kind
            ),
            PatchError::DecimalsOutOfRange { value } => {
                write!(f, "decimals must be between 0 and 255, got {}", value)
            }
            PatchError::Encoding { stage, reason } => {
                write!(f, "{} failed: {}", stage, reason)
            }
        }
    }
}

impl std::error::Error for PatchError {}
