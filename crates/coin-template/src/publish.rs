//! Publish-transaction inputs for a patched module.

use crate::patcher::ModuleBytes;
use move_binary_format::CompiledModule;
use serde::Serialize;
use std::collections::BTreeSet;
use sui_wizard_types::address::address_to_string;

/// The `modules` and `dependencies` arguments of a publish command.
///
/// Module bytes are standard base64. Dependencies are the package addresses
/// of every module the coin module imports, excluding its own address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPayload {
    pub modules: Vec<String>,
    pub dependencies: Vec<String>,
}

impl PublishPayload {
    pub fn for_module(bytes: &ModuleBytes, module: &CompiledModule) -> Self {
        Self {
            modules: vec![bytes.to_base64()],
            dependencies: module_dependencies(module),
        }
    }
}

/// Sorted, de-duplicated package addresses a module imports from.
pub fn module_dependencies(module: &CompiledModule) -> Vec<String> {
    let self_address = *module.self_id().address();
    module
        .module_handles
        .iter()
        .map(|handle| *module.address_identifier_at(handle.address))
        .filter(|address| *address != self_address)
        .map(|address| address_to_string(&address))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
