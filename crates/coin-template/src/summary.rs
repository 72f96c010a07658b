//! Read-only view of a compiled module, used to inspect templates and patch
//! output.

use crate::constants::{constant_table, ConstantEntry};
use crate::error::{PatchError, PatchStage};
use crate::patcher::ModuleBytes;
use crate::publish::module_dependencies;
use move_binary_format::CompiledModule;
use serde::Serialize;
use sui_wizard_types::address::address_to_string;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub name: String,
    pub address: String,
    pub version: u32,
    pub len: usize,
    pub sha256: String,
    pub identifiers: Vec<String>,
    pub constants: Vec<ConstantEntry>,
    pub dependencies: Vec<String>,
}

impl ModuleSummary {
    pub fn from_module(bytes: &ModuleBytes, module: &CompiledModule) -> Self {
        let self_id = module.self_id();
        Self {
            name: self_id.name().to_string(),
            address: address_to_string(self_id.address()),
            version: module.version,
            len: bytes.len(),
            sha256: bytes.sha256_hex(),
            identifiers: module.identifiers.iter().map(|id| id.to_string()).collect(),
            constants: constant_table(module),
            dependencies: module_dependencies(module),
        }
    }
}

/// Deserialize `bytes` and summarize the module.
pub fn inspect(bytes: &[u8]) -> Result<ModuleSummary, PatchError> {
    let module = CompiledModule::deserialize_with_defaults(bytes).map_err(|e| {
        PatchError::InvalidTemplate {
            stage: PatchStage::Deserialize,
            reason: e.to_string(),
        }
    })?;
    Ok(ModuleSummary::from_module(
        &ModuleBytes::from(bytes.to_vec()),
        &module,
    ))
}
