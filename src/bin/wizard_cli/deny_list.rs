//! Deny-list command - addresses blocked from using a regulated coin

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use sui_token_wizard::TokenWizard;

use super::output::print_json;

#[derive(Parser, Debug)]
#[command(about = "Show the addresses denied for a regulated coin")]
pub struct DenyListCmd {
    /// Coin type, e.g. 0xabc::dmt::DMT
    pub coin_type: String,

    /// Only report whether this address is denied
    #[arg(long)]
    pub address: Option<String>,
}

#[derive(Serialize)]
struct DenyListOutput<'a> {
    coin_type: &'a str,
    denied_addresses: &'a [String],
}

#[derive(Serialize)]
struct DeniedOutput<'a> {
    coin_type: &'a str,
    address: &'a str,
    denied: bool,
}

impl DenyListCmd {
    pub fn execute(&self, wizard: &TokenWizard, json_output: bool) -> Result<()> {
        if let Some(address) = &self.address {
            let denied = wizard.is_denied(&self.coin_type, address)?;
            if json_output {
                return print_json(&DeniedOutput {
                    coin_type: &self.coin_type,
                    address,
                    denied,
                });
            }
            if denied {
                println!("\x1b[31m{} is denied\x1b[0m for {}", address, self.coin_type);
            } else {
                println!("\x1b[32m{} is not denied\x1b[0m for {}", address, self.coin_type);
            }
            return Ok(());
        }

        let denied = wizard.denied_addresses(&self.coin_type)?;
        if json_output {
            return print_json(&DenyListOutput {
                coin_type: &self.coin_type,
                denied_addresses: &denied,
            });
        }
        if denied.is_empty() {
            println!("No addresses denied for {}", self.coin_type);
        } else {
            println!("\x1b[1mDenied for {}:\x1b[0m\n", self.coin_type);
            for address in &denied {
                println!("  {}", address);
            }
        }
        Ok(())
    }
}
