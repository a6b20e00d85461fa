//! Command line interface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::fault::detect_faults;
use crate::io::{
    fault_set_to_string, parse_binary_vector, parse_fault, read_netlist_file, read_patterns,
    write_patterns,
};
use crate::podem::generate_test;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fault-free simulation of a primary-input vector
    ///
    /// Prints the primary-output value string for each vector given.
    #[clap(alias = "sim")]
    Simulate(SimulateArgs),

    /// Deductive fault simulation: faults detected by a vector
    ///
    /// Prints the set of stuck-at faults detected at a primary output,
    /// sorted by (net label, stuck-at value).
    Faults(FaultsArgs),

    /// PODEM test generation for a single stuck-at fault
    ///
    /// Prints a primary-input vector that excites and propagates the fault
    /// to a primary output, or UNDETECTABLE if no such vector exists.
    #[clap(alias = "gen")]
    Generate(GenerateArgs),
}

/// Shared shape for "one inline argument, or a `-f` batch file" subcommands
#[derive(Args)]
struct InlineOrFile {
    /// Inline argument (a vector or fault specification, depending on the subcommand)
    argument: Option<String>,

    /// File with one argument per line, instead of a single inline argument
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,
}

impl InlineOrFile {
    fn resolve(&self) -> Result<Vec<String>, String> {
        match (&self.argument, &self.file) {
            (Some(_), Some(_)) => {
                Err("specify either an inline argument or -f, not both".to_string())
            }
            (None, None) => Err("specify either an inline argument or -f".to_string()),
            (Some(a), None) => Ok(vec![a.clone()]),
            (None, Some(path)) => {
                read_patterns(path).map_err(|e| format!("could not read {}: {e}", path.display()))
            }
        }
    }
}

/// Command arguments for fault-free simulation
#[derive(Args)]
pub struct SimulateArgs {
    /// Netlist to simulate
    netlist: PathBuf,

    #[command(flatten)]
    input: InlineOrFile,
}

impl SimulateArgs {
    pub fn run(&self) {
        let circuit = match read_netlist_file(&self.netlist) {
            Ok(c) => c,
            Err(e) => fail(&e.to_string()),
        };
        let vectors = match self.input.resolve() {
            Ok(v) => v,
            Err(e) => fail(&e),
        };
        let mut outputs = Vec::new();
        for v in vectors.iter() {
            let bits = match parse_binary_vector(&circuit, v) {
                Ok(b) => b,
                Err(e) => fail(&e.to_string()),
            };
            let assignment = match crate::eval::simulate_input(&circuit, &bits) {
                Ok(a) => a,
                Err(e) => fail(&e.to_string()),
            };
            let s: String = assignment
                .primary_output_values(&circuit)
                .iter()
                .map(|v| format!("{v}"))
                .collect();
            outputs.push(s);
        }
        if outputs.len() == 1 {
            println!("{}", outputs[0]);
        } else {
            let mut stdout = std::io::stdout();
            write_patterns(&mut stdout, &outputs).expect("writing to stdout should not fail");
        }
    }
}

/// Command arguments for deductive fault simulation
#[derive(Args)]
pub struct FaultsArgs {
    /// Netlist to simulate
    netlist: PathBuf,

    #[command(flatten)]
    input: InlineOrFile,
}

impl FaultsArgs {
    pub fn run(&self) {
        let circuit = match read_netlist_file(&self.netlist) {
            Ok(c) => c,
            Err(e) => fail(&e.to_string()),
        };
        let vectors = match self.input.resolve() {
            Ok(v) => v,
            Err(e) => fail(&e),
        };
        for v in vectors.iter() {
            let bits = match parse_binary_vector(&circuit, v) {
                Ok(b) => b,
                Err(e) => fail(&e.to_string()),
            };
            let faults = match detect_faults(&circuit, &bits) {
                Ok(f) => f,
                Err(e) => fail(&e.to_string()),
            };
            println!("{}", fault_set_to_string(&circuit, &faults));
        }
    }
}

/// Command arguments for PODEM test generation
#[derive(Args)]
pub struct GenerateArgs {
    /// Netlist to generate a test for
    netlist: PathBuf,

    #[command(flatten)]
    input: InlineOrFile,

    /// Seed a randomized backtrace-choice strategy instead of the
    /// deterministic first-X-input one
    #[arg(long)]
    seed: Option<u64>,
}

impl GenerateArgs {
    pub fn run(&self) {
        let circuit = match read_netlist_file(&self.netlist) {
            Ok(c) => c,
            Err(e) => fail(&e.to_string()),
        };
        let fault_specs = match self.input.resolve() {
            Ok(v) => v,
            Err(e) => fail(&e),
        };
        let mut results = Vec::new();
        for spec in fault_specs.iter() {
            let fault = match parse_fault(&circuit, spec) {
                Ok(f) => f,
                Err(e) => fail(&e.to_string()),
            };
            let result = match self.seed {
                Some(seed) => crate::podem::generate_test_seeded(&circuit, fault, seed),
                None => generate_test(&circuit, fault),
            };
            let result = match result {
                Ok(r) => r,
                Err(e) => fail(&e.to_string()),
            };
            results.push(format!("{result}"));
        }
        if results.len() == 1 {
            println!("{}", results[0]);
        } else {
            let mut stdout = std::io::stdout();
            write_patterns(&mut stdout, &results).expect("writing to stdout should not fail");
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
