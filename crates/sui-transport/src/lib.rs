//! Sui Transport Layer
//!
//! Blocking JSON-RPC transport used by the token wizard's query services.
//!
//! This crate provides:
//! - [`jsonrpc`]: `ureq`-based client for the fullnode read methods
//! - [`types`]: typed pages, objects and dynamic-field entries
//! - [`pagination`]: cursor paginator shared by all list calls
//! - [`network`]: endpoint defaults and `SUI_RPC_URL` resolution
//!
//! # Example
//!
//! ```ignore
//! use sui_transport::{JsonRpcClient, Paginator};
//!
//! let client = JsonRpcClient::mainnet();
//! let fields = Paginator::new(usize::MAX, |cursor, limit| {
//!     client.get_dynamic_fields("0xparent", cursor, limit).map(|p| p.into_parts())
//! })
//! .collect_all()?;
//! ```

pub mod jsonrpc;
pub mod network;
pub mod pagination;
pub mod types;

// Re-export main types for convenience
pub use jsonrpc::JsonRpcClient;
pub use network::resolve_rpc_endpoint;
pub use pagination::{PageInfo, Paginator, MAX_PAGE_SIZE};
pub use types::{DynamicFieldInfo, DynamicFieldName, ObjectData, ObjectResponse, Page};
