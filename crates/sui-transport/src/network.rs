use sui_wizard_types::env_utils::env_string;

const MAINNET_RPC: &str = "https://fullnode.mainnet.sui.io:443";
const TESTNET_RPC: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_RPC: &str = "https://fullnode.devnet.sui.io:443";
const LOCALNET_RPC: &str = "http://127.0.0.1:9000";

/// Networks with a well-known public fullnode.
pub const NETWORKS: &[&str] = &["mainnet", "testnet", "devnet", "localnet"];

pub fn infer_network_from_url(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    if lower.contains("testnet") {
        Some("testnet")
    } else if lower.contains("devnet") {
        Some("devnet")
    } else if lower.contains("mainnet") {
        Some("mainnet")
    } else if lower.contains("127.0.0.1") || lower.contains("localhost") {
        Some("localnet")
    } else {
        None
    }
}

/// Fullnode endpoint for a network name. Unknown names fall back to mainnet.
pub fn default_rpc_endpoint(network: &str) -> String {
    match network {
        "testnet" => TESTNET_RPC.to_string(),
        "devnet" => DEVNET_RPC.to_string(),
        "localnet" => LOCALNET_RPC.to_string(),
        _ => MAINNET_RPC.to_string(),
    }
}

/// Resolve the RPC endpoint: `SUI_RPC_URL` wins, then the network default.
pub fn resolve_rpc_endpoint(network: Option<&str>) -> String {
    if let Some(url) = env_string("SUI_RPC_URL") {
        return url;
    }
    default_rpc_endpoint(network.unwrap_or("mainnet"))
}
