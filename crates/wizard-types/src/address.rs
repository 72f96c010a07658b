//! Address normalization utilities.
//!
//! Sui addresses and object IDs are 32-byte values with several textual forms:
//! - Short form: "0x2"
//! - Full form: "0x0000000000000000000000000000000000000000000000000000000000000002"
//! - Without prefix: "2"
//!
//! RPC responses mix these forms, so every comparison in the workspace goes
//! through [`normalize_address`].

use move_core_types::account_address::AccountAddress;

/// Normalize an address to lowercase with 0x prefix and full 64 hex characters.
///
/// Input that is not an address (non-hex characters, more than 64 digits) is
/// returned lower-cased with a `0x` prefix but otherwise as given, so
/// [`normalize_address_checked`] can reject it.
///
/// # Examples
///
/// ```
/// use sui_wizard_types::address::normalize_address;
///
/// assert_eq!(
///     normalize_address("0x2"),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// ```
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    if hex.len() <= 64 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        format!("0x{:0>64}", hex)
    } else {
        format!("0x{}", hex)
    }
}

/// Normalize an address, returning None if it's not a valid hex address.
pub fn normalize_address_checked(addr: &str) -> Option<String> {
    let normalized = normalize_address(addr);
    AccountAddress::from_hex_literal(&normalized).ok()?;
    Some(normalized)
}

/// Normalize an address to short form (minimal hex digits), for display.
///
/// ```
/// use sui_wizard_types::address::normalize_address_short;
///
/// assert_eq!(normalize_address_short("0x0000000000000000000000000000000000000000000000000000000000000403"), "0x403");
/// ```
pub fn normalize_address_short(addr: &str) -> String {
    let normalized = normalize_address(addr);
    let hex = normalized.strip_prefix("0x").unwrap_or(&normalized);
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// Convert an AccountAddress to its normalized full-form string.
pub fn address_to_string(addr: &AccountAddress) -> String {
    format!("0x{}", hex::encode(addr.as_ref()))
}

/// Compare two addresses regardless of their textual form.
pub fn same_address(a: &str, b: &str) -> bool {
    normalize_address(a) == normalize_address(b)
}
