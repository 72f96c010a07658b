//! Coin template patching for the Sui token wizard.
//!
//! A Sui coin is published as its own Move module whose one-time-witness
//! type names the coin. Rather than compiling Move source per request, the
//! wizard ships one compiled generic coin module (the [`Template`]) and
//! rewrites it:
//!
//! - the `TEMPLATE` / `template` identifiers become the upper- and
//!   lower-cased symbol,
//! - the decimals, symbol, name and description constants are replaced,
//! - the module is re-serialized at its original format version and read
//!   back as a structural check.
//!
//! ```
//! use sui_coin_template::{patch, TokenParameters};
//!
//! let params = TokenParameters::new("Demo Token", "DMT", "A demo", 9).unwrap();
//! let patched = patch(&params).unwrap();
//! assert_eq!(patched.module_name(), "dmt");
//! ```

pub mod constants;
pub mod error;
pub mod identifiers;
pub mod params;
pub mod patcher;
pub mod publish;
pub mod summary;
pub mod template;

pub use constants::{ConstantEntry, ConstantValue};
pub use error::{PatchError, PatchField, PatchStage};
pub use params::TokenParameters;
pub use patcher::{patch_bytes, ModuleBytes, PatchedModule, TemplatePatcher};
pub use publish::PublishPayload;
pub use summary::{inspect, ModuleSummary};
pub use template::{Placeholders, Template, TEMPLATE_HEX};

/// Patch the embedded template.
pub fn patch(params: &TokenParameters) -> Result<PatchedModule, PatchError> {
    TemplatePatcher::embedded()?.patch(params)
}
