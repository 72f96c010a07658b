//! Coins and treasury-caps commands

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use sui_token_wizard::{CoinBalance, TokenWizard, TreasuryCapInfo};
use sui_wizard_types::same_type;

use super::output::print_json;

#[derive(Parser, Debug)]
#[command(about = "List an owner's coin balances grouped by coin type")]
pub struct CoinsCmd {
    /// Owner address
    pub owner: String,

    /// Only show this coin type (short or full-width addresses)
    #[arg(long)]
    pub coin_type: Option<String>,

    /// Also list the individual coin objects
    #[arg(long)]
    pub objects: bool,
}

#[derive(Serialize)]
struct CoinsOutput<'a> {
    owner: &'a str,
    balances: &'a [CoinBalance],
}

impl CoinsCmd {
    pub fn execute(&self, wizard: &TokenWizard, json_output: bool) -> Result<()> {
        let mut balances = wizard.coin_balances(&self.owner)?;
        if let Some(coin_type) = &self.coin_type {
            balances.retain(|b| same_type(&b.coin_type, coin_type));
        }

        if json_output {
            return print_json(&CoinsOutput {
                owner: &self.owner,
                balances: &balances,
            });
        }

        if balances.is_empty() {
            println!("No coins found for {}", self.owner);
            return Ok(());
        }
        println!("\x1b[1mCoins owned by {}:\x1b[0m\n", self.owner);
        for balance in &balances {
            println!(
                "  {}  {} ({} object{})",
                balance.coin_type,
                balance.total_balance,
                balance.coin_count(),
                if balance.coin_count() == 1 { "" } else { "s" }
            );
            if self.objects {
                for coin in &balance.coins {
                    println!("      {}  {}", coin.object_id, coin.balance);
                }
            }
        }
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(about = "List the treasury caps an owner holds")]
pub struct TreasuryCapsCmd {
    /// Owner address
    pub owner: String,
}

#[derive(Serialize)]
struct CapsOutput<'a> {
    owner: &'a str,
    treasury_caps: &'a [TreasuryCapInfo],
}

impl TreasuryCapsCmd {
    pub fn execute(&self, wizard: &TokenWizard, json_output: bool) -> Result<()> {
        let caps = wizard.treasury_caps(&self.owner)?;

        if json_output {
            return print_json(&CapsOutput {
                owner: &self.owner,
                treasury_caps: &caps,
            });
        }

        if caps.is_empty() {
            println!("No treasury caps found for {}", self.owner);
            return Ok(());
        }
        println!("\x1b[1mTreasury caps owned by {}:\x1b[0m\n", self.owner);
        for cap in &caps {
            println!("  {}", cap.coin_type);
            println!("      cap:          {}", cap.object_id);
            println!("      total supply: {}", cap.total_supply);
        }
        Ok(())
    }
}
