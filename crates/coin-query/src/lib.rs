//! Read-only coin queries over a Sui fullnode.
//!
//! - [`CoinAggregator`]: an owner's coins grouped by type, and the treasury
//!   caps they hold
//! - [`DenyListReader`]: addresses denied for a regulated coin type
//!
//! Both go through an [`ObjectSource`] (the JSON-RPC client in production),
//! retry transient failures and cache results for a short freshness window.

pub mod cache;
pub mod coins;
pub mod deny_list;
pub mod retry;
pub mod source;

#[cfg(test)]
mod fixtures;

pub use cache::QueryCache;
pub use coins::{CoinAggregator, CoinBalance, CoinObject, TreasuryCapInfo};
pub use deny_list::{DenyListReader, DENY_LIST_OBJECT_ID};
pub use retry::{should_retry_error, with_retries};
pub use source::ObjectSource;
