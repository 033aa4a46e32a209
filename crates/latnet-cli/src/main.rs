use std::error::Error;

use clap::{Parser, Subcommand};
use latnet_cli::commands::{
    bidn::{self, BidnArgs},
    combine::{self, CombineArgs},
    net::{self, NetArgs},
    version::{self, VersionArgs},
};

#[derive(Parser, Debug)]
#[command(name = "latnet", about = "Digital net construction CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a net, optionally extend it, and print it.
    Net(NetArgs),
    /// Reduce per-level merit values with a combiner.
    Combine(CombineArgs),
    /// Tabulate the B-IDN weight function.
    Bidn(BidnArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Net(args) => net::run(&args),
        Command::Combine(args) => combine::run(&args),
        Command::Bidn(args) => bidn::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
