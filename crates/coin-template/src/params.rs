//! User-supplied coin parameters.

use crate::error::PatchError;
use serde::{Deserialize, Serialize};

/// The four values a wizard user fills in.
///
/// Text fields are taken as-is; the form layer owns trimming and length
/// limits. `decimals` is a `u8`, so out-of-range values are rejected by
/// [`TokenParameters::new`] or by deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenParameters {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub decimals: u8,
}

impl TokenParameters {
    /// Build parameters from unchecked form input.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        description: impl Into<String>,
        decimals: i64,
    ) -> Result<Self, PatchError> {
        let decimals =
            u8::try_from(decimals).map_err(|_| PatchError::DecimalsOutOfRange { value: decimals })?;
        Ok(Self {
            name: name.into(),
            symbol: symbol.into(),
            description: description.into(),
            decimals,
        })
    }

    /// Name of the coin's one-time-witness type (`DMT` for symbol `dmt`).
    pub fn type_identifier(&self) -> String {
        self.symbol.to_uppercase()
    }

    /// Name of the coin's module (`dmt` for symbol `DMT`).
    pub fn module_identifier(&self) -> String {
        self.symbol.to_lowercase()
    }
}
