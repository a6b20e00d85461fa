//! Core of an Automatic Test Pattern Generation (ATPG) toolkit for
//! combinational logic under the single-stuck-at fault model.
//!
//! This crate answers three questions about a parsed combinational netlist:
//!   * fault-free evaluation of a primary-input vector ([`eval`]);
//!   * deductive fault simulation, the set of stuck-at faults a vector
//!     detects at a primary output ([`fault`]);
//!   * PODEM-based test generation, a vector that excites and propagates a
//!     given stuck-at fault, or a proof that none exists ([`podem`]).
//!
//! Sequential circuits, multiple simultaneous faults, gate types beyond
//! two-input AND/NAND/OR/NOR and one-input BUF/INV, timing analysis and
//! test-set minimization are out of scope.

mod error;

pub mod circuit;
pub mod eval;
pub mod fault;
pub mod io;
pub mod logic;
pub mod podem;

pub use circuit::{Circuit, CircuitBuilder, Gate, GateKind, NetId};
pub use error::Error;
pub use eval::{evaluate, simulate_input, Assignment};
pub use fault::{detect_faults, Fault};
pub use logic::Value;
pub use podem::{generate_test, PodemResult};
