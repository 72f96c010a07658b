//! The patch pipeline: template + parameters -> publishable module bytes.

use crate::constants::{
    apply_constant_patches, constant_table, merge_duplicate_constants, token_patches,
    ConstantEntry,
};
use crate::error::{PatchError, PatchStage};
use crate::identifiers::IdentifierRenameMap;
use crate::params::TokenParameters;
use crate::publish::PublishPayload;
use crate::template::Template;
use base64::Engine;
use move_binary_format::CompiledModule;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Serialized module bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBytes(Vec<u8>);

impl ModuleBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Standard base64, the encoding publish transactions expect.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.0)
    }

    pub fn sha256_hex(&self) -> String {
        hex::encode(Sha256::digest(&self.0))
    }
}

impl From<Vec<u8>> for ModuleBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ModuleBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for ModuleBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

/// Result of a successful patch.
#[derive(Debug, Clone)]
pub struct PatchedModule {
    bytes: ModuleBytes,
    module: CompiledModule,
    constants: Vec<ConstantEntry>,
}

impl PatchedModule {
    pub fn bytes(&self) -> &ModuleBytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> ModuleBytes {
        self.bytes
    }

    pub fn module(&self) -> &CompiledModule {
        &self.module
    }

    /// Constant table decoded from the output bytes.
    pub fn constants(&self) -> &[ConstantEntry] {
        &self.constants
    }

    pub fn module_name(&self) -> String {
        self.module.self_id().name().to_string()
    }

    /// Name of the one-time-witness type, i.e. the coin type's struct name.
    pub fn type_name(&self) -> Option<String> {
        self.module
            .struct_defs
            .first()
            .map(|def| {
                let handle = self.module.datatype_handle_at(def.struct_handle);
                self.module.identifier_at(handle.name).to_string()
            })
    }

    pub fn publish_payload(&self) -> PublishPayload {
        PublishPayload::for_module(&self.bytes, &self.module)
    }
}

/// Rewrites a [`Template`] for a set of [`TokenParameters`].
///
/// The patcher never mutates its template; each call works on a clone, so one
/// patcher can serve concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePatcher<'a> {
    template: &'a Template,
}

impl<'a> TemplatePatcher<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    /// Produce module bytes for `params`.
    ///
    /// Steps: rename the witness type and module identifiers, patch the four
    /// metadata constants (merging any that end up identical), serialize at the template's own format version,
    /// then deserialize the result once more as a structural check. Any
    /// failure aborts the whole call; nothing partial is returned.
    pub fn patch(&self, params: &TokenParameters) -> Result<PatchedModule, PatchError> {
        let placeholders = self.template.placeholders();
        let mut module = self.template.module().clone();

        let renames = IdentifierRenameMap::for_symbol(placeholders, &params.symbol);
        module.identifiers = renames.apply(&module.identifiers)?;

        let patches = token_patches(placeholders, params)?;
        module.constant_pool = apply_constant_patches(&module.constant_pool, &patches)?;
        merge_duplicate_constants(&mut module);

        let mut bytes = Vec::with_capacity(self.template.bytes().len());
        module
            .serialize_with_version(module.version, &mut bytes)
            .map_err(|e| PatchError::Encoding {
                stage: PatchStage::Serialize,
                reason: e.to_string(),
            })?;

        let verified = CompiledModule::deserialize_with_defaults(&bytes).map_err(|e| {
            PatchError::Encoding {
                stage: PatchStage::Verify,
                reason: e.to_string(),
            }
        })?;
        debug!(len = bytes.len(), version = verified.version, "patched module verified");

        let patched = PatchedModule {
            bytes: ModuleBytes::from(bytes),
            constants: constant_table(&verified),
            module: verified,
        };
        info!(
            module = %patched.module_name(),
            symbol = %params.symbol,
            decimals = params.decimals,
            len = patched.bytes.len(),
            "patched coin template"
        );
        Ok(patched)
    }
}

impl TemplatePatcher<'static> {
    /// Patcher over the embedded template.
    pub fn embedded() -> Result<Self, PatchError> {
        Template::embedded().map(TemplatePatcher::new)
    }
}

/// Patch raw template bytes using the default placeholders.
pub fn patch_bytes(
    template_bytes: &[u8],
    params: &TokenParameters,
) -> Result<PatchedModule, PatchError> {
    let template = Template::from_bytes(template_bytes.to_vec())?;
    TemplatePatcher::new(&template).patch(params)
}
