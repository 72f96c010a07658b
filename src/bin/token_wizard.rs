//! token-wizard: create Sui coins without writing Move
//!
//! ## Commands
//!
//! - **patch**: Patch the coin template into a publishable module (offline)
//! - **template**: Inspect the embedded template or any compiled module
//! - **coins**: List an owner's coin balances grouped by type
//! - **treasury-caps**: List the coins an owner can mint
//! - **deny-list**: Show addresses denied for a regulated coin
//!
//! ## Example Usage
//!
//! ```bash
//! # Patch the template and write the module bytes
//! token-wizard patch --name "Demo Token" --symbol DMT --description "A demo" --decimals 9 --out dmt.mv
//!
//! # Same, as JSON with the publish payload
//! token-wizard --json patch --name "Demo Token" --symbol DMT --decimals 9
//!
//! # Coin balances on testnet
//! token-wizard --network testnet coins 0xa11ce
//!
//! # Is an address denied for a regulated coin?
//! token-wizard deny-list 0xabc::dmt::DMT --address 0xb0b
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use sui_token_wizard::logging::init_logging;
use sui_token_wizard::{TokenWizard, WizardConfig};

mod wizard_cli;

use wizard_cli::{
    coins::{CoinsCmd, TreasuryCapsCmd},
    deny_list::DenyListCmd,
    output::format_error,
    patch::PatchCmd,
    template::TemplateCmd,
    Network,
};

#[derive(Parser)]
#[command(
    name = "token-wizard",
    author,
    version,
    about = "Create Sui coins from the generic coin template",
    long_about = "Patches the precompiled Sui coin module with your coin's name, symbol,\n\
                  description and decimals, and queries coin balances and deny lists."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network whose public fullnode to query (overrides SUI_RPC_URL)
    #[arg(long, global = true, value_enum)]
    network: Option<Network>,

    /// JSON-RPC endpoint (overrides --network and SUI_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (info-level logs on stderr)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Patch the coin template into a publishable module
    Patch(PatchCmd),

    /// Inspect the embedded template or a compiled module file
    Template(TemplateCmd),

    /// List an owner's coin balances grouped by coin type
    Coins(CoinsCmd),

    /// List the treasury caps an owner holds
    TreasuryCaps(TreasuryCapsCmd),

    /// Show the addresses denied for a regulated coin
    DenyList(DenyListCmd),
}

fn build_config(network: Option<Network>, rpc_url: Option<String>) -> Result<WizardConfig> {
    let mut config = WizardConfig::from_env();
    if let Some(network) = network {
        config = config.with_network(network.as_str())?;
    }
    if let Some(url) = rpc_url {
        config = config.with_rpc_url(url);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let Cli {
        command,
        network,
        rpc_url,
        json,
        verbose,
    } = Cli::parse();
    init_logging(verbose);

    let result = build_config(network, rpc_url).and_then(|config| {
        let wizard = TokenWizard::new(config);
        match command {
            Commands::Patch(cmd) => cmd.execute(&wizard, json),
            Commands::Template(cmd) => cmd.execute(json),
            Commands::Coins(cmd) => cmd.execute(&wizard, json),
            Commands::TreasuryCaps(cmd) => cmd.execute(&wizard, json),
            Commands::DenyList(cmd) => cmd.execute(&wizard, json),
        }
    });

    if let Err(err) = &result {
        eprint!("{}", format_error(err, json));
        std::process::exit(1);
    }
    result
}
