//! Parsing and rendering of the line-oriented ASCII netlist format, plus
//! the fault and vector text syntaxes
//!
//! Each line is one of:
//!   * `KIND a b out` for two-input gates, or `KIND in out` for BUF/INV
//!   * `INPUT label1 label2 … -1`, the ordered primary-input list
//!   * `OUTPUT label1 label2 … -1`, the primary-output set
//! Comments start with `#`; multiple INPUT/OUTPUT lines concatenate in order.

use std::io::{BufRead, Read, Write};

use fxhash::FxHashSet;

use crate::circuit::{CircuitBuilder, GateKind};
use crate::fault::Fault;
use crate::logic::Value;
use crate::{Circuit, Error};

/// Read a netlist in the line-oriented `.net` ASCII format
///
/// # Example
///
/// ```text
/// INPUT a b c -1
/// OUTPUT out -1
/// AND a b g0
/// OR g0 c out
/// ```
pub fn read_netlist<R: Read>(r: R) -> Result<Circuit, Error> {
    let mut builder = CircuitBuilder::new();
    for (lineno, line) in std::io::BufReader::new(r).lines().enumerate() {
        let line = line.map_err(|e| Error::NetlistParse(format!("line {}: {e}", lineno + 1)))?;
        let without_comment = line.split('#').next().unwrap_or("");
        let tokens: Vec<&str> = without_comment.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        let keyword = tokens[0].to_ascii_uppercase();
        if keyword == "INPUT" || keyword == "OUTPUT" {
            let rest = &tokens[1..];
            let term = rest.iter().position(|&t| t == "-1").ok_or_else(|| {
                Error::NetlistParse(format!(
                    "line {}: {} list is missing its -1 terminator",
                    lineno + 1,
                    keyword
                ))
            })?;
            let labels = &rest[..term];
            if keyword == "INPUT" {
                for l in labels {
                    builder.add_primary_input(l);
                }
            } else {
                for l in labels {
                    builder.add_primary_output(l);
                }
            }
        } else {
            let kind = GateKind::from_keyword(&keyword).ok_or_else(|| {
                Error::NetlistParse(format!(
                    "line {}: unknown gate kind {}",
                    lineno + 1,
                    tokens[0]
                ))
            })?;
            if tokens.len() < 3 {
                return Err(Error::NetlistParse(format!(
                    "line {}: gate declaration needs at least an input and an output",
                    lineno + 1
                )));
            }
            let output = tokens[tokens.len() - 1];
            let inputs = &tokens[1..tokens.len() - 1];
            builder.add_gate(kind, inputs, output);
        }
    }
    builder.build()
}

/// Write a netlist in the line-oriented `.net` ASCII format
pub fn write_netlist<W: Write>(w: &mut W, circuit: &Circuit) -> std::io::Result<()> {
    write!(w, "INPUT")?;
    for pi in circuit.primary_inputs() {
        write!(w, " {}", circuit.label(*pi))?;
    }
    writeln!(w, " -1")?;
    write!(w, "OUTPUT")?;
    for po in circuit.primary_outputs() {
        write!(w, " {}", circuit.label(*po))?;
    }
    writeln!(w, " -1")?;
    for g in circuit.gates() {
        write!(w, "{}", g.kind)?;
        for i in &g.inputs {
            write!(w, " {}", circuit.label(*i))?;
        }
        writeln!(w, " {}", circuit.label(g.output))?;
    }
    Ok(())
}

/// Parse a fault specification: `<label>-sa-<v>` or `<label> <v>`
/// (optionally with the value quoted, as in `<label> '<v>'`)
pub fn parse_fault(circuit: &Circuit, s: &str) -> Result<Fault, Error> {
    let s = s.trim();
    let (label, raw_value) = if let Some(idx) = s.find("-sa-") {
        (&s[..idx], &s[idx + 4..])
    } else {
        let mut parts = s.split_whitespace();
        let label = parts
            .next()
            .ok_or_else(|| Error::NetlistParse("empty fault specification".to_string()))?;
        let value = parts
            .next()
            .ok_or_else(|| Error::NetlistParse(format!("missing stuck-at value in '{s}'")))?;
        (label, value)
    };
    let label = label.trim();
    let raw_value = raw_value.trim().trim_matches(['\'', '"']);
    let value = match raw_value {
        "0" => Value::Zero,
        "1" => Value::One,
        other => {
            return Err(Error::NetlistParse(format!(
                "invalid stuck-at value '{other}', expected 0 or 1"
            )))
        }
    };
    let net = circuit
        .net_by_label(label)
        .ok_or_else(|| Error::UnknownFaultSite(label.to_string()))?;
    Fault::new(net, value)
}

/// Render a fault back to its `<label>-sa-<v>` text form
pub fn fault_to_string(circuit: &Circuit, fault: &Fault) -> String {
    let v = match fault.stuck_at {
        Value::Zero => '0',
        Value::One => '1',
        _ => unreachable!("Fault::new rejects non-binary stuck values"),
    };
    format!("{}-sa-{}", circuit.label(fault.net), v)
}

/// Render a fault set sorted by (net label, stuck-at value), one per line
pub fn fault_set_to_string(circuit: &Circuit, faults: &FxHashSet<Fault>) -> String {
    let mut sorted: Vec<&Fault> = faults.iter().collect();
    sorted.sort_by(|a, b| {
        circuit
            .label(a.net)
            .cmp(circuit.label(b.net))
            .then(format!("{}", a.stuck_at).cmp(&format!("{}", b.stuck_at)))
    });
    sorted
        .iter()
        .map(|f| fault_to_string(circuit, f))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a vector over `{0,1,X}`, one character per primary input in
/// declared order
pub fn parse_vector(circuit: &Circuit, s: &str) -> Result<Vec<Value>, Error> {
    let s = s.trim();
    let nb = circuit.primary_inputs().len();
    if s.chars().count() != nb {
        return Err(Error::InvalidVector(format!(
            "expected {nb} character(s), got {}",
            s.chars().count()
        )));
    }
    s.chars()
        .map(|c| match c.to_ascii_uppercase() {
            '0' => Ok(Value::Zero),
            '1' => Ok(Value::One),
            'X' => Ok(Value::X),
            other => Err(Error::InvalidVector(format!(
                "illegal character '{other}' in vector, expected 0, 1 or X"
            ))),
        })
        .collect()
}

/// Parse a bare binary vector (no `X` allowed), for fault-free and
/// deductive-fault simulation
pub fn parse_binary_vector(circuit: &Circuit, s: &str) -> Result<Vec<bool>, Error> {
    let s = s.trim();
    let nb = circuit.primary_inputs().len();
    if s.chars().count() != nb {
        return Err(Error::InvalidVector(format!(
            "expected {nb} character(s), got {}",
            s.chars().count()
        )));
    }
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(Error::InvalidVector(format!(
                "illegal character '{other}' in vector, expected 0 or 1"
            ))),
        })
        .collect()
}
