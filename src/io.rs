//! Read and write netlists, vectors, faults and pattern files

mod netlist;
mod vector;

pub use netlist::{
    fault_set_to_string, fault_to_string, parse_binary_vector, parse_fault, parse_vector,
    read_netlist, write_netlist,
};
pub use vector::{read_patterns, write_patterns};

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::{Circuit, Error};

/// Read a netlist from a file path
///
/// Only the line-oriented `.net` ASCII format of the specification is
/// supported.
pub fn read_netlist_file<P: AsRef<Path>>(path: P) -> Result<Circuit, Error> {
    let f = File::open(path.as_ref()).map_err(|e| {
        Error::NetlistParse(format!("could not open {}: {}", path.as_ref().display(), e))
    })?;
    read_netlist(BufReader::new(f))
}

/// Write a netlist to a file path
pub fn write_netlist_file<P: AsRef<Path>>(path: P, circuit: &Circuit) -> Result<(), Error> {
    let f = File::create(path.as_ref()).map_err(|e| {
        Error::NetlistParse(format!("could not create {}: {}", path.as_ref().display(), e))
    })?;
    let mut w = BufWriter::new(f);
    write_netlist(&mut w, circuit)
        .map_err(|e| Error::NetlistParse(format!("could not write netlist: {e}")))
}
