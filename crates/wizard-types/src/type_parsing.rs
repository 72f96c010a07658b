//! Type string parsing utilities.
//!
//! RPC responses report object types as strings such as
//! `0x2::coin::Coin<0xabc::dmt::DMT>`. The helpers here parse those strings,
//! pull the type argument out of a known wrapper, and produce the canonical
//! type name Move's `type_name` module uses as a key (full-width address,
//! no `0x` prefix).

use crate::address::same_address;
use move_core_types::account_address::AccountAddress;
use move_core_types::identifier::Identifier;
use move_core_types::language_storage::{StructTag, TypeTag};

/// Parse a Move type string into a TypeTag.
///
/// Supports primitives, `vector<T>` and struct types with type arguments.
///
/// ```
/// use sui_wizard_types::parse_type_tag;
///
/// assert!(parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").is_some());
/// assert!(parse_type_tag("not a type").is_none());
/// ```
pub fn parse_type_tag(type_str: &str) -> Option<TypeTag> {
    let type_str = type_str.trim();

    match type_str {
        "bool" => return Some(TypeTag::Bool),
        "u8" => return Some(TypeTag::U8),
        "u16" => return Some(TypeTag::U16),
        "u32" => return Some(TypeTag::U32),
        "u64" => return Some(TypeTag::U64),
        "u128" => return Some(TypeTag::U128),
        "u256" => return Some(TypeTag::U256),
        "address" => return Some(TypeTag::Address),
        "signer" => return Some(TypeTag::Signer),
        _ => {}
    }

    if let Some(inner) = type_str
        .strip_prefix("vector<")
        .and_then(|s| s.strip_suffix('>'))
    {
        let inner_tag = parse_type_tag(inner)?;
        return Some(TypeTag::Vector(Box::new(inner_tag)));
    }

    let (base_type, type_args_str) = match type_str.find('<') {
        Some(angle_pos) => (&type_str[..angle_pos], Some(&type_str[angle_pos..])),
        None => (type_str, None),
    };

    let parts: Vec<&str> = base_type.split("::").collect();
    if parts.len() != 3 {
        return None;
    }

    let address = AccountAddress::from_hex_literal(parts[0].trim()).ok()?;
    let module = Identifier::new(parts[1].trim()).ok()?;
    let name = Identifier::new(parts[2].trim()).ok()?;

    let type_params = match type_args_str {
        Some(args_str) => {
            let inner = args_str.strip_prefix('<')?.strip_suffix('>')?;
            split_type_params(inner)
                .into_iter()
                .map(parse_type_tag)
                .collect::<Option<Vec<_>>>()?
        }
        None => vec![],
    };

    Some(TypeTag::Struct(Box::new(StructTag {
        address,
        module,
        name,
        type_params,
    })))
}

/// Split type parameters respecting nested angle brackets.
///
/// Given "A, B<C, D>, E", returns ["A", "B<C, D>", "E"].
pub fn split_type_params(s: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                result.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() && !s[start..].trim().is_empty() {
        result.push(s[start..].trim());
    }

    result
}

/// Extract `T` from `<address>::<module>::<name><T>` when the wrapper matches.
///
/// The wrapper address is compared in normalized form, so `0x2::coin::Coin`
/// matches both short and full-width framework addresses. Returns `None` for
/// other types or when the wrapper does not carry exactly one type argument.
///
/// ```
/// use sui_wizard_types::wrapped_type_argument;
///
/// assert_eq!(
///     wrapped_type_argument("0x2::coin::Coin<0xabc::dmt::DMT>", "0x2", "coin", "Coin").as_deref(),
///     Some("0xabc::dmt::DMT")
/// );
/// assert_eq!(wrapped_type_argument("0x2::coin::CoinMetadata<0xabc::dmt::DMT>", "0x2", "coin", "Coin"), None);
/// ```
pub fn wrapped_type_argument(
    type_str: &str,
    address: &str,
    module: &str,
    name: &str,
) -> Option<String> {
    let type_str = type_str.trim();
    let angle_pos = type_str.find('<')?;
    let inner = type_str[angle_pos..]
        .strip_prefix('<')?
        .strip_suffix('>')?
        .trim();

    let parts: Vec<&str> = type_str[..angle_pos].split("::").collect();
    if parts.len() != 3 {
        return None;
    }
    if !same_address(parts[0], address) || parts[1] != module || parts[2] != name {
        return None;
    }

    match split_type_params(inner).as_slice() {
        [single] => Some(single.to_string()),
        _ => None,
    }
}

/// Canonical type name as produced by Move's `std::type_name`.
///
/// Addresses are rendered full width without the `0x` prefix, e.g.
/// `0000...0002::sui::SUI`. Returns `None` if the type string does not parse.
pub fn canonical_type_name(type_str: &str) -> Option<String> {
    parse_type_tag(type_str).map(|tag| tag.to_canonical_string(false))
}

/// Whether two type strings name the same type, whatever address width
/// each uses. Strings that do not parse are compared as written.
pub fn same_type(a: &str, b: &str) -> bool {
    match (canonical_type_name(a), canonical_type_name(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert!(matches!(parse_type_tag("bool"), Some(TypeTag::Bool)));
        assert!(matches!(parse_type_tag("u64"), Some(TypeTag::U64)));
        assert!(matches!(parse_type_tag("vector<u8>"), Some(TypeTag::Vector(_))));
    }

    #[test]
    fn test_parse_struct() {
        let tag = parse_type_tag("0x2::coin::Coin<0x2::sui::SUI>").unwrap();
        if let TypeTag::Struct(s) = tag {
            assert_eq!(s.module.as_str(), "coin");
            assert_eq!(s.name.as_str(), "Coin");
            assert_eq!(s.type_params.len(), 1);
        } else {
            panic!("Expected struct type");
        }
    }

    #[test]
    fn test_split_type_params() {
        let params = split_type_params("u64, 0x2::coin::Coin<0x2::sui::SUI>, bool");
        assert_eq!(params, vec!["u64", "0x2::coin::Coin<0x2::sui::SUI>", "bool"]);
        assert!(split_type_params("").is_empty());
    }

    #[test]
    fn test_wrapped_type_argument_full_width_wrapper() {
        let full = "0x0000000000000000000000000000000000000000000000000000000000000002::coin::TreasuryCap<0xabc::dmt::DMT>";
        assert_eq!(
            wrapped_type_argument(full, "0x2", "coin", "TreasuryCap").as_deref(),
            Some("0xabc::dmt::DMT")
        );
    }

    #[test]
    fn test_wrapped_type_argument_nested() {
        let ty = "0x2::coin::Coin<0xabc::lp::LP<0x2::sui::SUI, 0xdef::usdc::USDC>>";
        assert_eq!(
            wrapped_type_argument(ty, "0x2", "coin", "Coin").as_deref(),
            Some("0xabc::lp::LP<0x2::sui::SUI, 0xdef::usdc::USDC>")
        );
    }

    #[test]
    fn test_wrapped_type_argument_rejects_other_packages() {
        assert_eq!(
            wrapped_type_argument("0x3::coin::Coin<0x2::sui::SUI>", "0x2", "coin", "Coin"),
            None
        );
        assert_eq!(wrapped_type_argument("0x2::sui::SUI", "0x2", "coin", "Coin"), None);
    }

    #[test]
    fn test_same_type_ignores_address_width() {
        assert!(same_type(
            "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
            "0x2::sui::SUI"
        ));
        assert!(!same_type("0x2::sui::SUI", "0x3::sui::SUI"));
        assert!(same_type("::broken", "::broken"));
    }

    #[test]
    fn test_canonical_type_name() {
        assert_eq!(
            canonical_type_name("0x2::sui::SUI").as_deref(),
            Some("0000000000000000000000000000000000000000000000000000000000000002::sui::SUI")
        );
        assert_eq!(canonical_type_name("::broken"), None);
    }
}
