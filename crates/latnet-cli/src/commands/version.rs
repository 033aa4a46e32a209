use std::error::Error;

use clap::Args;
use latnet_core::SchemaVersion;
use latnet_net::serde::NET_SCHEMA_VERSION;
use latnet_net::{Explicit, NetConstruction, PolynomialLattice, Sobol};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub net_schema: SchemaVersion,
    pub constructions: Vec<String>,
    pub functors: Vec<String>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&gather_info())?);
    Ok(())
}

pub fn gather_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        net_schema: NET_SCHEMA_VERSION,
        constructions: vec![
            Sobol::NAME.into(),
            PolynomialLattice::NAME.into(),
            Explicit::NAME.into(),
        ],
        functors: vec!["B-IDN".into()],
    }
}
