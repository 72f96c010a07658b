//! CLI subcommand implementations for token-wizard

pub mod coins;
pub mod deny_list;
pub mod output;
pub mod patch;
pub mod template;

use clap::ValueEnum;

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum Network {
    Mainnet,
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Localnet => "localnet",
        }
    }
}
