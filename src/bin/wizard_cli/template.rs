//! Template command - inspect the embedded template or a compiled module

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use sui_coin_template::{inspect, ModuleSummary, Template};

use super::output::{format_constants, print_json};

#[derive(Parser, Debug)]
#[command(about = "Inspect the embedded template or a compiled module file")]
pub struct TemplateCmd {
    /// Compiled module to inspect instead of the embedded template
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Also list the identifier table
    #[arg(long)]
    pub identifiers: bool,
}

impl TemplateCmd {
    pub fn execute(&self, json_output: bool) -> Result<()> {
        let summary = match &self.file {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("reading module {}", path.display()))?;
                inspect(&bytes).with_context(|| format!("inspecting {}", path.display()))?
            }
            None => inspect(Template::embedded()?.bytes())?,
        };

        if json_output {
            print_json(&summary)
        } else {
            print_human(&summary, self.identifiers);
            Ok(())
        }
    }
}

fn print_human(summary: &ModuleSummary, identifiers: bool) {
    println!("\x1b[1mModule:\x1b[0m  {}::{}", summary.address, summary.name);
    println!("Version: {}", summary.version);
    println!("Size:    {} bytes", summary.len);
    println!("SHA-256: {}", summary.sha256);
    println!("Depends: {}", summary.dependencies.join(", "));
    println!();
    print!("{}", format_constants(&summary.constants));
    if identifiers {
        println!();
        println!("\x1b[1mIdentifiers:\x1b[0m");
        for (i, id) in summary.identifiers.iter().enumerate() {
            println!("  [{}] {}", i, id);
        }
    }
}
