//! Patch command - produce a user-specific coin module from the template

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use sui_coin_template::{ConstantEntry, PatchedModule, PublishPayload, TokenParameters};
use sui_token_wizard::TokenWizard;

use super::output::{format_constants, print_json};

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum BytesFormat {
    /// Raw module bytes (a `.mv` file)
    Raw,
    /// Lower-case hex
    Hex,
    /// Standard base64, as used in publish transactions
    Base64,
}

#[derive(Parser, Debug)]
#[command(about = "Patch the coin template into a publishable module")]
pub struct PatchCmd {
    /// Coin name, e.g. "Demo Token"
    #[arg(long, required_unless_present = "params")]
    pub name: Option<String>,

    /// Coin symbol; also names the module (lower case) and witness type (upper case)
    #[arg(long, required_unless_present = "params")]
    pub symbol: Option<String>,

    /// Coin description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Decimal places (0-255)
    #[arg(long, default_value_t = 9, allow_negative_numbers = true)]
    pub decimals: i64,

    /// Read parameters from a JSON file ({"name", "symbol", "description", "decimals"})
    #[arg(long, value_name = "PATH", conflicts_with_all = ["name", "symbol"])]
    pub params: Option<PathBuf>,

    /// Write the module bytes to a file
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Encoding of the --out file
    #[arg(long, value_enum, default_value_t = BytesFormat::Raw)]
    pub format: BytesFormat,
}

#[derive(Debug, Serialize)]
struct PatchOutput<'a> {
    module_name: String,
    type_name: Option<String>,
    parameters: &'a TokenParameters,
    len: usize,
    sha256: String,
    constants: &'a [ConstantEntry],
    publish: PublishPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<String>,
    created_at: String,
}

impl PatchCmd {
    fn parameters(&self) -> Result<TokenParameters> {
        if let Some(path) = &self.params {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading parameters from {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("parsing parameters in {}", path.display()));
        }
        let name = self.name.clone().ok_or_else(|| anyhow!("--name is required"))?;
        let symbol = self
            .symbol
            .clone()
            .ok_or_else(|| anyhow!("--symbol is required"))?;
        Ok(TokenParameters::new(
            name,
            symbol,
            self.description.clone(),
            self.decimals,
        )?)
    }

    fn write_output(&self, patched: &PatchedModule) -> Result<Option<String>> {
        let Some(path) = &self.out else {
            return Ok(None);
        };
        let bytes = patched.bytes();
        let contents = match self.format {
            BytesFormat::Raw => bytes.as_bytes().to_vec(),
            BytesFormat::Hex => bytes.to_hex().into_bytes(),
            BytesFormat::Base64 => bytes.to_base64().into_bytes(),
        };
        std::fs::write(path, contents)
            .with_context(|| format!("writing module to {}", path.display()))?;
        Ok(Some(path.display().to_string()))
    }

    pub fn execute(&self, wizard: &TokenWizard, json_output: bool) -> Result<()> {
        let params = self.parameters()?;
        let patched = wizard.create_coin(&params)?;
        let out = self.write_output(&patched)?;

        let output = PatchOutput {
            module_name: patched.module_name(),
            type_name: patched.type_name(),
            parameters: &params,
            len: patched.bytes().len(),
            sha256: patched.bytes().sha256_hex(),
            constants: patched.constants(),
            publish: patched.publish_payload(),
            out,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        if json_output {
            print_json(&output)
        } else {
            output.print_human();
            Ok(())
        }
    }
}

impl PatchOutput<'_> {
    fn print_human(&self) {
        println!(
            "\x1b[32m✓ Patched coin module\x1b[0m {}::{}\n",
            self.module_name,
            self.type_name.as_deref().unwrap_or("?")
        );
        println!("Size:    {} bytes", self.len);
        println!("SHA-256: {}", self.sha256);
        if let Some(out) = &self.out {
            println!("Written: {}", out);
        }
        println!();
        print!("{}", format_constants(self.constants));
        println!();
        println!("\x1b[1mPublish dependencies:\x1b[0m");
        for dep in &self.publish.dependencies {
            println!("  {}", dep);
        }
    }
}
