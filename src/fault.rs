//! Deductive fault simulation: the set of single-stuck-at faults a vector
//! detects at some primary output

use fxhash::{FxHashMap, FxHashSet};
use std::fmt;

use crate::circuit::{Circuit, NetId};
use crate::eval::simulate_input;
use crate::logic::Value;
use crate::Error;

/// A single-stuck-at fault: a net tied permanently to 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fault {
    /// The net whose driver or input is stuck
    pub net: NetId,
    /// The value it is stuck at
    pub stuck_at: Value,
}

impl Fault {
    /// Construct a fault, checking that the stuck value is 0 or 1
    pub fn new(net: NetId, stuck_at: Value) -> Result<Fault, Error> {
        if !stuck_at.is_binary() {
            return Err(Error::InvalidVector(format!(
                "a stuck-at fault must be stuck at 0 or 1, got {stuck_at}"
            )));
        }
        Ok(Fault { net, stuck_at })
    }

    /// The value the fault-free circuit must produce at the site to excite
    /// the fault: the opposite of the stuck value
    pub fn excite_value(&self) -> Value {
        crate::logic::not(self.stuck_at)
    }

    /// The D/D' value that represents this fault once excited: D if sa-0
    /// (fault-free wants 1), D' if sa-1 (fault-free wants 0)
    pub fn faulty_marker(&self) -> Value {
        match self.stuck_at {
            Value::Zero => Value::D,
            Value::One => Value::DBar,
            _ => unreachable!("Fault::new rejects non-binary stuck values"),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.stuck_at {
            Value::Zero => '0',
            Value::One => '1',
            _ => unreachable!(),
        };
        write!(f, "{}-sa-{}", self.net, v)
    }
}

/// Deductive fault simulation over a total binary vector
///
/// Evaluates the fault-free circuit, then walks nets in topological order
/// building a per-net fault list by set union/intersection/difference of
/// its inputs' fault lists, per the controlling-value rule. The result is
/// the union of the fault lists at the primary outputs.
pub fn detect_faults(circuit: &Circuit, bits: &[bool]) -> Result<FxHashSet<Fault>, Error> {
    let good = simulate_input(circuit, bits)?;

    let mut fault_list: FxHashMap<NetId, FxHashSet<Fault>> = FxHashMap::default();
    for &pi in circuit.primary_inputs() {
        let v = good.get(pi);
        let mut s = FxHashSet::default();
        s.insert(Fault::new(pi, crate::logic::not(v))?);
        fault_list.insert(pi, s);
    }

    for gate in circuit.gates() {
        let out = gate.output;
        let out_value = good.get(out);
        let own_fault = Fault::new(out, crate::logic::not(out_value))?;

        let list = match gate.kind.controlling_value() {
            None => {
                // BUF/INV: single input, fault list passes through
                let j = gate.inputs[0];
                let mut s = fault_list[&j].clone();
                s.insert(own_fault);
                s
            }
            Some(c) => {
                let controlling: Vec<NetId> = gate
                    .inputs
                    .iter()
                    .copied()
                    .filter(|&j| good.get(j) == c)
                    .collect();
                if controlling.is_empty() {
                    // No input is controlling: union of all input fault lists
                    let mut s = FxHashSet::default();
                    for j in &gate.inputs {
                        s.extend(fault_list[j].iter().copied());
                    }
                    s.insert(own_fault);
                    s
                } else {
                    // Intersection of controlling inputs' fault lists, minus
                    // the union of non-controlling inputs' fault lists
                    let mut s: FxHashSet<Fault> = fault_list[&controlling[0]].clone();
                    for j in &controlling[1..] {
                        s = s.intersection(&fault_list[j]).copied().collect();
                    }
                    let non_controlling: Vec<NetId> = gate
                        .inputs
                        .iter()
                        .copied()
                        .filter(|j| !controlling.contains(j))
                        .collect();
                    for j in &non_controlling {
                        s = s.difference(&fault_list[j]).copied().collect();
                    }
                    s.insert(own_fault);
                    s
                }
            }
        };
        fault_list.insert(out, list);
    }

    let mut result = FxHashSet::default();
    for &po in circuit.primary_outputs() {
        result.extend(fault_list[&po].iter().copied());
    }
    Ok(result)
}
