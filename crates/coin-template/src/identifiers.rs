//! Identifier-table renaming.
//!
//! A Move module stores every name it uses (its own name, struct names,
//! function names, names of imported modules) in one identifier table that
//! the rest of the binary references by index. Renaming the coin therefore
//! means swapping two entries of that table; every handle pointing at them
//! follows automatically.

use crate::error::PatchError;
use crate::template::Placeholders;
use move_core_types::identifier::Identifier;
use std::collections::BTreeMap;
use tracing::debug;

/// Placeholder identifier to replacement identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierRenameMap {
    entries: BTreeMap<String, String>,
}

impl IdentifierRenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename map for a coin symbol: the type placeholder becomes the
    /// upper-cased symbol and the module placeholder the lower-cased one.
    pub fn for_symbol(placeholders: &Placeholders, symbol: &str) -> Self {
        Self::new()
            .with(&placeholders.type_identifier, &symbol.to_uppercase())
            .with(&placeholders.module_identifier, &symbol.to_lowercase())
    }

    pub fn with(mut self, placeholder: &str, replacement: &str) -> Self {
        self.entries
            .insert(placeholder.to_string(), replacement.to_string());
        self
    }

    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries.get(placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Produce a renamed copy of `identifiers`.
    ///
    /// All renames are validated before the table is touched: each
    /// replacement must be a valid identifier, each placeholder must be
    /// present, and no replaced entry may equal any other entry of the
    /// resulting table. The input slice is never modified.
    pub fn apply(&self, identifiers: &[Identifier]) -> Result<Vec<Identifier>, PatchError> {
        let mut resolved = Vec::with_capacity(self.entries.len());
        for (placeholder, replacement) in &self.entries {
            let ident = Identifier::new(replacement.as_str()).map_err(|_| {
                PatchError::InvalidIdentifier {
                    placeholder: placeholder.clone(),
                    replacement: replacement.clone(),
                }
            })?;
            let index = identifiers
                .iter()
                .position(|id| id.as_str() == placeholder)
                .ok_or_else(|| PatchError::IdentifierNotFound {
                    placeholder: placeholder.clone(),
                })?;
            resolved.push((index, ident));
        }

        let mut renamed = identifiers.to_vec();
        for (index, ident) in &resolved {
            renamed[*index] = ident.clone();
        }

        for (index, ident) in &resolved {
            let clash = renamed
                .iter()
                .enumerate()
                .any(|(other, id)| other != *index && id == ident);
            if clash {
                return Err(PatchError::IdentifierCollision {
                    replacement: ident.to_string(),
                });
            }
        }

        debug!(renames = resolved.len(), "renamed template identifiers");
        Ok(renamed)
    }
}
