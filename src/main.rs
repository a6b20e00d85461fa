//! Binary for the ATPG toolkit

#![warn(missing_docs)]

mod cmd;
mod error;

pub mod circuit;
pub mod eval;
pub mod fault;
pub mod io;
pub mod logic;
pub mod podem;

use clap::Parser;

pub use circuit::{Circuit, CircuitBuilder, Gate, GateKind, NetId};
pub use error::Error;
pub use logic::Value;

#[doc(hidden)]
fn main() {
    let cli = cmd::Cli::parse();

    match cli.command {
        cmd::Commands::Simulate(a) => a.run(),
        cmd::Commands::Faults(a) => a.run(),
        cmd::Commands::Generate(a) => a.run(),
    }
}
