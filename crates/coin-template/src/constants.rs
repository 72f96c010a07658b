//! Constant-pool patching and decoding.
//!
//! Constants are stored as `(type, BCS bytes)` pairs. A patch locates a
//! constant by its declared type and its exact BCS encoding, then swaps the
//! bytes. Pool entries are length-prefixed blobs, so the replacement may be
//! longer or shorter than the placeholder.

use crate::error::{PatchError, PatchField, PatchStage};
use crate::params::TokenParameters;
use crate::template::Placeholders;
use move_binary_format::file_format::{
    Bytecode, Constant, ConstantPoolIndex, SignatureToken, TableIndex,
};
use move_binary_format::CompiledModule;
use move_core_types::account_address::AccountAddress;
use serde::Serialize;
use sui_wizard_types::address::address_to_string;
use tracing::debug;

/// The constant types the coin template declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    U8,
    Bytes,
}

impl ConstantKind {
    pub fn matches(&self, token: &SignatureToken) -> bool {
        match (self, token) {
            (ConstantKind::U8, SignatureToken::U8) => true,
            (ConstantKind::Bytes, SignatureToken::Vector(inner)) => {
                matches!(inner.as_ref(), SignatureToken::U8)
            }
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ConstantKind::U8 => "u8",
            ConstantKind::Bytes => "vector<u8>",
        }
    }
}

/// A single `old -> new` rewrite of a constant's BCS bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantPatch {
    pub field: PatchField,
    pub kind: ConstantKind,
    pub old: Vec<u8>,
    pub new: Vec<u8>,
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, PatchError> {
    bcs::to_bytes(value).map_err(|e| PatchError::Encoding {
        stage: PatchStage::EncodeConstant,
        reason: e.to_string(),
    })
}

impl ConstantPatch {
    pub fn u8(field: PatchField, old: u8, new: u8) -> Result<Self, PatchError> {
        Ok(Self {
            field,
            kind: ConstantKind::U8,
            old: encode(&old)?,
            new: encode(&new)?,
        })
    }

    pub fn bytes(field: PatchField, old: &str, new: &str) -> Result<Self, PatchError> {
        Ok(Self {
            field,
            kind: ConstantKind::Bytes,
            old: encode(old.as_bytes())?,
            new: encode(new.as_bytes())?,
        })
    }

    fn matching_indices(&self, pool: &[Constant]) -> Vec<usize> {
        pool.iter()
            .enumerate()
            .filter(|(_, c)| self.kind.matches(&c.type_) && c.data == self.old)
            .map(|(i, _)| i)
            .collect()
    }
}

/// The four metadata patches, in pool order of the embedded template.
pub fn token_patches(
    placeholders: &Placeholders,
    params: &TokenParameters,
) -> Result<Vec<ConstantPatch>, PatchError> {
    Ok(vec![
        ConstantPatch::u8(PatchField::Decimals, placeholders.decimals, params.decimals)?,
        ConstantPatch::bytes(PatchField::Symbol, &placeholders.symbol, &params.symbol)?,
        ConstantPatch::bytes(PatchField::Name, &placeholders.name, &params.name)?,
        ConstantPatch::bytes(
            PatchField::Description,
            &placeholders.description,
            &params.description,
        )?,
    ])
}

/// Apply `patches` to a copy of `pool`.
///
/// Every patch is resolved against the original pool before any bytes are
/// written, so a replacement value can never be picked up by a later patch.
/// Every entry matching a patch is rewritten; a patch matching nothing fails
/// the whole call with [`PatchError::ConstantNotFound`].
pub fn apply_constant_patches(
    pool: &[Constant],
    patches: &[ConstantPatch],
) -> Result<Vec<Constant>, PatchError> {
    let resolved = patches.iter().try_fold(Vec::new(), |mut acc, patch| {
        let hits = patch.matching_indices(pool);
        if hits.is_empty() {
            return Err(PatchError::ConstantNotFound {
                field: patch.field,
                kind: patch.kind.type_name().to_string(),
            });
        }
        debug!(field = %patch.field, matches = hits.len(), "resolved constant patch");
        acc.extend(hits.into_iter().map(|index| (index, patch)));
        Ok(acc)
    })?;

    let mut patched = pool.to_vec();
    for (index, patch) in resolved {
        patched[index].data = patch.new.clone();
    }
    Ok(patched)
}

/// Merge identical `(type, value)` pool entries and repoint every `LdConst`.
///
/// The bytecode verifier rejects a module whose pool holds the same constant
/// twice, which happens whenever two metadata fields are patched to the same
/// value (a name equal to the symbol, an empty name and description). The
/// first occurrence keeps its position. Returns the number of entries removed.
pub fn merge_duplicate_constants(module: &mut CompiledModule) -> usize {
    let pool = std::mem::take(&mut module.constant_pool);
    let original_len = pool.len();
    let mut remap: Vec<TableIndex> = Vec::with_capacity(original_len);
    for constant in pool {
        let index = match module.constant_pool.iter().position(|c| *c == constant) {
            Some(existing) => existing,
            None => {
                module.constant_pool.push(constant);
                module.constant_pool.len() - 1
            }
        };
        // bounded by the original pool, which was already indexable by TableIndex
        remap.push(index as TableIndex);
    }

    let merged = original_len - module.constant_pool.len();
    if merged == 0 {
        return 0;
    }
    for code in module
        .function_defs
        .iter_mut()
        .filter_map(|def| def.code.as_mut())
    {
        for instruction in code.code.iter_mut() {
            if let Bytecode::LdConst(index) = instruction {
                *index = ConstantPoolIndex(remap[index.0 as usize]);
            }
        }
    }
    debug!(merged, remaining = module.constant_pool.len(), "merged duplicate constants");
    merged
}

/// A decoded constant value, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConstantValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Address(String),
    /// `vector<u8>`; `text` is set when the bytes are valid UTF-8.
    Bytes { text: Option<String>, hex: String },
    /// Any type not decoded above.
    Other,
}

impl ConstantValue {
    pub fn decode(token: &SignatureToken, data: &[u8]) -> Self {
        let decoded = match token {
            SignatureToken::Bool => bcs::from_bytes(data).ok().map(ConstantValue::Bool),
            SignatureToken::U8 => bcs::from_bytes(data).ok().map(ConstantValue::U8),
            SignatureToken::U16 => bcs::from_bytes(data).ok().map(ConstantValue::U16),
            SignatureToken::U32 => bcs::from_bytes(data).ok().map(ConstantValue::U32),
            SignatureToken::U64 => bcs::from_bytes(data).ok().map(ConstantValue::U64),
            SignatureToken::Address => bcs::from_bytes::<AccountAddress>(data)
                .ok()
                .map(|a| ConstantValue::Address(address_to_string(&a))),
            SignatureToken::Vector(inner) if matches!(inner.as_ref(), SignatureToken::U8) => {
                bcs::from_bytes::<Vec<u8>>(data)
                    .ok()
                    .map(|bytes| ConstantValue::Bytes {
                        hex: hex::encode(&bytes),
                        text: String::from_utf8(bytes).ok(),
                    })
            }
            _ => None,
        };
        decoded.unwrap_or(ConstantValue::Other)
    }

    /// The value as text, for UTF-8 byte vectors.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConstantValue::Bytes { text, .. } => text.as_deref(),
            _ => None,
        }
    }
}

/// One row of a module's constant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub index: usize,
    pub type_name: String,
    pub bcs_hex: String,
    pub value: ConstantValue,
}

/// Move source spelling of a signature token.
pub fn signature_token_name(token: &SignatureToken) -> String {
    match token {
        SignatureToken::Bool => "bool".to_string(),
        SignatureToken::U8 => "u8".to_string(),
        SignatureToken::U16 => "u16".to_string(),
        SignatureToken::U32 => "u32".to_string(),
        SignatureToken::U64 => "u64".to_string(),
        SignatureToken::U128 => "u128".to_string(),
        SignatureToken::U256 => "u256".to_string(),
        SignatureToken::Address => "address".to_string(),
        SignatureToken::Vector(inner) => format!("vector<{}>", signature_token_name(inner)),
        other => format!("{:?}", other),
    }
}

/// Decode every entry of a module's constant pool.
pub fn constant_table(module: &CompiledModule) -> Vec<ConstantEntry> {
    module
        .constant_pool
        .iter()
        .enumerate()
        .map(|(index, constant)| ConstantEntry {
            index,
            type_name: signature_token_name(&constant.type_),
            bcs_hex: hex::encode(&constant.data),
            value: ConstantValue::decode(&constant.type_, &constant.data),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_const(s: &str) -> Constant {
        Constant {
            type_: SignatureToken::Vector(Box::new(SignatureToken::U8)),
            data: bcs::to_bytes(s.as_bytes()).unwrap(),
        }
    }

    fn u8_const(v: u8) -> Constant {
        Constant {
            type_: SignatureToken::U8,
            data: vec![v],
        }
    }

    #[test]
    fn test_bcs_encoding_of_patches() {
        let patch = ConstantPatch::bytes(PatchField::Symbol, "MY", "DMT").unwrap();
        assert_eq!(hex::encode(&patch.old), "024d59");
        assert_eq!(hex::encode(&patch.new), "03444d54");

        let patch = ConstantPatch::u8(PatchField::Decimals, 2, 9).unwrap();
        assert_eq!(patch.old, vec![2]);
        assert_eq!(patch.new, vec![9]);
    }

    #[test]
    fn test_patch_changes_length() {
        let pool = vec![bytes_const("MY")];
        let long = "x".repeat(200);
        let patches = vec![ConstantPatch::bytes(PatchField::Name, "MY", &long).unwrap()];
        let patched = apply_constant_patches(&pool, &patches).unwrap();
        // 200 needs a two-byte ULEB128 length prefix
        assert_eq!(&patched[0].data[..2], &[0xc8, 0x01]);
        assert_eq!(patched[0].data.len(), 202);
    }

    #[test]
    fn test_type_must_match() {
        // a u8 constant holding 0x02 must not match a vector patch with the same bytes
        let pool = vec![u8_const(2)];
        let patch = ConstantPatch {
            field: PatchField::Name,
            kind: ConstantKind::Bytes,
            old: vec![2],
            new: vec![0],
        };
        assert_eq!(
            apply_constant_patches(&pool, &[patch]).unwrap_err(),
            PatchError::ConstantNotFound {
                field: PatchField::Name,
                kind: "vector<u8>".to_string()
            }
        );
    }

    #[test]
    fn test_patches_resolve_against_original_pool() {
        // rewriting A -> B then B -> C must not chain into A -> C
        let pool = vec![bytes_const("A"), bytes_const("B")];
        let patches = vec![
            ConstantPatch::bytes(PatchField::Name, "A", "B").unwrap(),
            ConstantPatch::bytes(PatchField::Description, "B", "C").unwrap(),
        ];
        let patched = apply_constant_patches(&pool, &patches).unwrap();
        assert_eq!(patched[0].data, bcs::to_bytes("B".as_bytes()).unwrap());
        assert_eq!(patched[1].data, bcs::to_bytes("C".as_bytes()).unwrap());
    }

    #[test]
    fn test_failed_patch_leaves_pool_untouched() {
        let pool = vec![bytes_const("MY")];
        let patches = vec![
            ConstantPatch::bytes(PatchField::Symbol, "MY", "DMT").unwrap(),
            ConstantPatch::bytes(PatchField::Name, "missing", "x").unwrap(),
        ];
        assert!(apply_constant_patches(&pool, &patches).is_err());
        assert_eq!(pool[0], bytes_const("MY"));
    }

    #[test]
    fn test_merge_duplicate_constants_repoints_loads() {
        let mut module = crate::template::Template::embedded()
            .unwrap()
            .module()
            .clone();
        module.constant_pool[3] = module.constant_pool[2].clone();
        let name = module.constant_pool[2].clone();

        assert_eq!(merge_duplicate_constants(&mut module), 1);
        assert_eq!(module.constant_pool.len(), 3);

        let loads: Vec<u16> = module
            .function_defs
            .iter()
            .filter_map(|def| def.code.as_ref())
            .flat_map(|code| code.code.iter())
            .filter_map(|op| match op {
                Bytecode::LdConst(idx) => Some(idx.0),
                _ => None,
            })
            .collect();
        assert!(loads.iter().all(|&idx| (idx as usize) < 3));
        assert_eq!(module.constant_pool[2], name);
    }

    #[test]
    fn test_merge_without_duplicates_is_noop() {
        let mut module = crate::template::Template::embedded()
            .unwrap()
            .module()
            .clone();
        let before = module.clone();
        assert_eq!(merge_duplicate_constants(&mut module), 0);
        assert_eq!(module, before);
    }

    #[test]
    fn test_decode_values() {
        assert_eq!(
            ConstantValue::decode(&SignatureToken::U8, &[9]),
            ConstantValue::U8(9)
        );
        let vec_u8 = SignatureToken::Vector(Box::new(SignatureToken::U8));
        let value = ConstantValue::decode(&vec_u8, &[0x02, 0xff, 0xfe]);
        assert_eq!(
            value,
            ConstantValue::Bytes {
                text: None,
                hex: "fffe".to_string()
            }
        );
        assert_eq!(
            ConstantValue::decode(&SignatureToken::U64, &[1]),
            ConstantValue::Other
        );
    }

    #[test]
    fn test_signature_token_name() {
        let nested = SignatureToken::Vector(Box::new(SignatureToken::Vector(Box::new(
            SignatureToken::U8,
        ))));
        assert_eq!(signature_token_name(&nested), "vector<vector<u8>>");
        assert_eq!(signature_token_name(&SignatureToken::Address), "address");
    }
}
