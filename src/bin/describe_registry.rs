//! Print the built-in capabilities and adapter registrations as JSON.

use anyhow::{Context, Result};
use capadapt::interfaces::builtin_capabilities;
use capadapt::{
    CapabilitySnapshot, RegistrationInfo, global_registry, initialize_global,
    install_builtin_adapters, settings,
};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct Description {
    capabilities: Vec<CapabilitySnapshot>,
    registrations: Vec<RegistrationInfo>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    settings::init_logging();
    if let Some(arg) = std::env::args().nth(1) {
        if arg == "--help" || arg == "-h" {
            eprintln!("Usage: describe-registry\n\nPrints built-in capabilities and adapter registrations as JSON.");
            return Ok(());
        }
        anyhow::bail!("describe-registry takes no arguments (got '{arg}')");
    }

    initialize_global(install_builtin_adapters);
    let description = Description {
        capabilities: builtin_capabilities()
            .iter()
            .map(|cap| cap.snapshot())
            .collect(),
        registrations: global_registry().registrations(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &description).context("serializing registry")?;
    writeln!(out)?;
    Ok(())
}
