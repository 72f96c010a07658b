//! The generic coin module and its placeholder values.
//!
//! The embedded template is the compiled form of:
//!
//! ```move
//! module 0x0::template {
//!     public struct TEMPLATE has drop {}
//!
//!     const DECIMALS: u8 = 2;
//!     const SYMBOL: vector<u8> = b"MY";
//!     const NAME: vector<u8> = b"My Coin";
//!     const DESCRIPTION: vector<u8> = b"My coi description";
//!
//!     fun init(witness: TEMPLATE, ctx: &mut TxContext) {
//!         let (treasury, metadata) = coin::create_currency(
//!             witness, DECIMALS, SYMBOL, NAME, DESCRIPTION, option::none(), ctx,
//!         );
//!         transfer::public_freeze_object(metadata);
//!         transfer::public_transfer(treasury, tx_context::sender(ctx));
//!     }
//! }
//! ```
//!
//! It is decoded and checked once per process; see [`Template::embedded`].

use crate::constants::{constant_table, ConstantEntry};
use crate::error::{PatchError, PatchStage};
use move_binary_format::CompiledModule;
use std::sync::OnceLock;
use tracing::debug;

/// Move binary (format version 6) of the generic coin module.
pub const TEMPLATE_HEX: &str = concat!(
    "a11ceb0b060000000a01000c020c1e032a22044c08055449069d012a07c701b60108fd02600add03050ce20320000002",
    "0101020203020402050006020001070c01000101080c010001020907010000050a0700040b0200000c010000010d0203",
    "0102020e00040100030f0500010c03100600010c04110708000209010a030b040c00020800070805070900020a020a02",
    "0a020b03010804070805020b010109000b02010900010b0301090001090002090005010608050105010804010800010b",
    "02010800010b010108000201020a0203024d590a0208074d7920436f696e0a0213124d7920636f692064657363726970",
    "74696f6e0874656d706c61746504636f696e066f7074696f6e087472616e736665720a74785f636f6e74657874037572",
    "6c0854454d504c4154450b54726561737572794361700c436f696e4d65746164617461064f7074696f6e0355726c0954",
    "78436f6e7465787404696e69740f6372656174655f63757272656e6379046e6f6e65147075626c69635f667265657a65",
    "5f6f626a6563740f7075626c69635f7472616e736665720673656e6465720b64756d6d795f6669656c64000000000000",
    "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
    "000000000000000000010000000000000000000000000000000000000000000000000000000000000002000201120100",
    "000000000e0b00070007010702070338000a01380138020b012e110538030200",
);

/// Values baked into the template that patching replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    /// One-time-witness type name; becomes the upper-cased symbol.
    pub type_identifier: String,
    /// Module name; becomes the lower-cased symbol.
    pub module_identifier: String,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub decimals: u8,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            type_identifier: "TEMPLATE".to_string(),
            module_identifier: "template".to_string(),
            name: "My Coin".to_string(),
            symbol: "MY".to_string(),
            description: "My coi description".to_string(),
            decimals: 2,
        }
    }
}

/// A decoded template module.
///
/// Construction deserializes the bytes, so a `Template` value always holds a
/// structurally valid module.
#[derive(Debug, Clone)]
pub struct Template {
    bytes: Vec<u8>,
    module: CompiledModule,
    placeholders: Placeholders,
}

static EMBEDDED: OnceLock<Result<Template, PatchError>> = OnceLock::new();

impl Template {
    /// Decode a template from raw module bytes with the default placeholders.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, PatchError> {
        let module = CompiledModule::deserialize_with_defaults(&bytes).map_err(|e| {
            PatchError::InvalidTemplate {
                stage: PatchStage::Deserialize,
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            bytes,
            module,
            placeholders: Placeholders::default(),
        })
    }

    /// Decode a template from a hex string (an optional `0x` prefix is accepted).
    pub fn from_hex(hex_str: &str) -> Result<Self, PatchError> {
        let trimmed = hex_str.trim();
        let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(trimmed).map_err(|e| PatchError::InvalidTemplate {
            stage: PatchStage::DecodeHex,
            reason: e.to_string(),
        })?;
        Self::from_bytes(bytes)
    }

    /// The embedded coin template.
    ///
    /// The first caller decodes and checks [`TEMPLATE_HEX`]; concurrent first
    /// callers block on the same initialization and every later call returns
    /// the cached result.
    pub fn embedded() -> Result<&'static Template, PatchError> {
        EMBEDDED
            .get_or_init(|| {
                debug!(len = TEMPLATE_HEX.len() / 2, "decoding embedded coin template");
                Template::from_hex(TEMPLATE_HEX)
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Replace the placeholder set, for templates compiled with other values.
    pub fn with_placeholders(mut self, placeholders: Placeholders) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn module(&self) -> &CompiledModule {
        &self.module
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Name of the template module (`template` for the embedded one).
    pub fn module_name(&self) -> String {
        self.module.self_id().name().to_string()
    }

    /// The template's constant table.
    pub fn constants(&self) -> Vec<ConstantEntry> {
        constant_table(&self.module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ConstantValue;

    #[test]
    fn test_embedded_template_decodes() {
        let template = Template::embedded().expect("embedded template");
        assert_eq!(template.module_name(), "template");
        assert_eq!(template.bytes().len(), TEMPLATE_HEX.len() / 2);
        assert_eq!(&template.bytes()[..4], &[0xa1, 0x1c, 0xeb, 0x0b]);
    }

    #[test]
    fn test_embedded_template_holds_placeholder_constants() {
        let template = Template::embedded().unwrap();
        let constants = template.constants();
        assert_eq!(constants.len(), 4);
        assert_eq!(constants[0].value, ConstantValue::U8(2));
        assert_eq!(constants[1].value.as_text(), Some("MY"));
        assert_eq!(constants[2].value.as_text(), Some("My Coin"));
        assert_eq!(constants[3].value.as_text(), Some("My coi description"));
    }

    #[test]
    fn test_embedded_template_has_placeholder_identifiers() {
        let template = Template::embedded().unwrap();
        let names: Vec<&str> = template
            .module()
            .identifiers
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert!(names.contains(&"TEMPLATE"));
        assert!(names.contains(&"template"));
    }

    #[test]
    fn test_embedded_is_initialized_once_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| Template::embedded().map(|t| t as *const Template as usize))
            })
            .collect();
        let addrs: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_corrupt_bytes_are_rejected() {
        let err = Template::from_bytes(vec![0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(
            err,
            PatchError::InvalidTemplate {
                stage: PatchStage::Deserialize,
                ..
            }
        ));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_bad_hex_is_rejected() {
        let err = Template::from_hex("zz").unwrap_err();
        assert!(matches!(
            err,
            PatchError::InvalidTemplate {
                stage: PatchStage::DecodeHex,
                ..
            }
        ));
    }

    #[test]
    fn test_from_hex_accepts_prefix() {
        let prefixed = format!("0x{}", TEMPLATE_HEX);
        let template = Template::from_hex(&prefixed).unwrap();
        assert_eq!(template.module_name(), "template");
    }
}
