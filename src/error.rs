//! Error types returned by the core

use std::fmt;

/// Errors that can occur while parsing, building or querying a circuit
///
/// Construction-time errors ([`Error::NetlistParse`], [`Error::CircuitStructure`])
/// are fatal: they prevent a [`crate::Circuit`] from being built at all.
/// Runtime errors ([`Error::InvalidVector`], [`Error::UnknownFaultSite`]) fail a
/// single operation without touching the circuit. Search exhaustion in PODEM
/// is not an error: see [`crate::podem::PodemResult::Undetectable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed netlist line, unknown gate kind, or missing INPUT/OUTPUT terminator
    NetlistParse(String),
    /// Duplicate driver, undefined net reference, cycle, or arity mismatch
    CircuitStructure(String),
    /// Vector length mismatch, illegal character, or X/D/D' where only 0/1 is allowed
    InvalidVector(String),
    /// A fault references a net that is not part of the circuit
    UnknownFaultSite(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NetlistParse(msg) => write!(f, "netlist parse error: {msg}"),
            Error::CircuitStructure(msg) => write!(f, "circuit structure error: {msg}"),
            Error::InvalidVector(msg) => write!(f, "invalid vector: {msg}"),
            Error::UnknownFaultSite(msg) => write!(f, "unknown fault site: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
