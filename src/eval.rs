//! Five-valued evaluation of a circuit over a partial or total input assignment

use fxhash::FxHashMap;

use crate::circuit::{Circuit, GateKind, NetId};
use crate::logic::{and2, not, or2, Value};
use crate::Error;

/// A total mapping from every net of a circuit to a value
///
/// Returned by value from [`evaluate`]; never mutated by callers. Freshly
/// allocated on each call, so repeated evaluation of the same circuit and
/// input never observes state left behind by a previous call.
#[derive(Debug, Clone)]
pub struct Assignment {
    values: FxHashMap<NetId, Value>,
}

impl Assignment {
    /// Value of a given net, or `X` if the net is absent (should not happen
    /// for a complete assignment produced by [`evaluate`])
    pub fn get(&self, net: NetId) -> Value {
        *self.values.get(&net).unwrap_or(&Value::X)
    }

    /// Values of the primary outputs, in declared order
    pub fn primary_output_values(&self, circuit: &Circuit) -> Vec<Value> {
        circuit
            .primary_outputs()
            .iter()
            .map(|&n| self.get(n))
            .collect()
    }

    /// Whether any primary output currently carries a fault effect (D or D')
    pub fn any_output_faulty(&self, circuit: &Circuit) -> bool {
        circuit
            .primary_outputs()
            .iter()
            .any(|&n| self.get(n).is_faulty())
    }
}

/// Evaluate a circuit for a partial (or total) mapping of primary inputs
///
/// Gates are visited in the circuit's stored topological order; each gate's
/// output is computed from its inputs (already written, by construction of
/// the order) using the five-valued AND/OR/NOT primitives. Primary inputs
/// missing from `inputs` default to `X`. D/D' may appear in `inputs`: PODEM
/// relies on this to override the fault site.
pub fn evaluate(circuit: &Circuit, inputs: &FxHashMap<NetId, Value>) -> Assignment {
    let mut values: FxHashMap<NetId, Value> = FxHashMap::default();
    for &pi in circuit.primary_inputs() {
        let v = inputs.get(&pi).copied().unwrap_or(Value::X);
        values.insert(pi, v);
    }
    for gate in circuit.gates() {
        // An override on the gate's own output (as PODEM uses to force D/D')
        // takes precedence over the gate's natural function.
        if let Some(&forced) = inputs.get(&gate.output) {
            values.insert(gate.output, forced);
            continue;
        }
        let ins: Vec<Value> = gate.inputs.iter().map(|&n| values[&n]).collect();
        let out = eval_gate(gate.kind, &ins);
        values.insert(gate.output, out);
    }
    Assignment { values }
}

/// Apply a single gate's function to its (already-resolved) input values
fn eval_gate(kind: GateKind, ins: &[Value]) -> Value {
    match kind {
        GateKind::And => and2(ins[0], ins[1]),
        GateKind::Nand => not(and2(ins[0], ins[1])),
        GateKind::Or => or2(ins[0], ins[1]),
        GateKind::Nor => not(or2(ins[0], ins[1])),
        GateKind::Buf => ins[0],
        GateKind::Inv => not(ins[0]),
    }
}

/// Fault-free simulation of a total binary vector
///
/// Rejects vectors containing anything but 0/1 (X, D and D' are not valid
/// here; PODEM uses [`evaluate`] directly for those). Returns the full
/// per-net assignment.
pub fn simulate_input(circuit: &Circuit, bits: &[bool]) -> Result<Assignment, Error> {
    if bits.len() != circuit.primary_inputs().len() {
        return Err(Error::InvalidVector(format!(
            "expected {} primary input(s), got {}",
            circuit.primary_inputs().len(),
            bits.len()
        )));
    }
    let mut inputs: FxHashMap<NetId, Value> = FxHashMap::default();
    for (&pi, &b) in circuit.primary_inputs().iter().zip(bits) {
        inputs.insert(pi, Value::from_bool(b));
    }
    let assignment = evaluate(circuit, &inputs);
    for &net in circuit.primary_inputs() {
        debug_assert!(assignment.get(net).is_binary());
    }
    for gate in circuit.gates() {
        if assignment.get(gate.output).is_faulty() {
            return Err(Error::InvalidVector(
                "fault-free simulation produced a faulty value; this indicates a bug, not a caller error"
                    .to_string(),
            ));
        }
    }
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{CircuitBuilder, GateKind};

    fn xor_like() -> Circuit {
        // out = OR(AND(a, !b)-like via NAND/AND combo), simple chain to exercise all kinds
        let mut b = CircuitBuilder::new();
        b.add_primary_input("a");
        b.add_primary_input("b");
        b.add_gate(GateKind::And, &["a", "b"], "g0");
        b.add_gate(GateKind::Nand, &["a", "b"], "g1");
        b.add_gate(GateKind::Or, &["g0", "g1"], "g2");
        b.add_gate(GateKind::Nor, &["g0", "g1"], "g3");
        b.add_gate(GateKind::Inv, &["g2"], "g4");
        b.add_gate(GateKind::Buf, &["g3"], "g5");
        b.add_primary_output("g4");
        b.add_primary_output("g5");
        b.build().unwrap()
    }

    #[test]
    fn test_simulate_all_kinds() {
        let c = xor_like();
        // a=1, b=1: g0=1, g1=0, g2=1, g3=0, g4=0, g5=0
        let out = simulate_input(&c, &[true, true]).unwrap();
        assert_eq!(out.primary_output_values(&c), vec![Value::Zero, Value::Zero]);
        // a=0, b=0: g0=0, g1=1, g2=1, g3=0, g4=0, g5=0
        let out = simulate_input(&c, &[false, false]).unwrap();
        assert_eq!(out.primary_output_values(&c), vec![Value::Zero, Value::Zero]);
        // a=1, b=0: g0=0, g1=1, g2=1, g3=0, g4=0, g5=0
        let out = simulate_input(&c, &[true, false]).unwrap();
        assert_eq!(out.primary_output_values(&c), vec![Value::Zero, Value::Zero]);
    }

    #[test]
    fn test_wrong_length() {
        let c = xor_like();
        assert!(simulate_input(&c, &[true]).is_err());
        assert!(simulate_input(&c, &[true, true, true]).is_err());
    }

    #[test]
    fn test_evaluate_with_x() {
        let c = xor_like();
        let mut inputs = FxHashMap::default();
        inputs.insert(c.primary_inputs()[0], Value::One);
        // b left unassigned: defaults to X
        let a = evaluate(&c, &inputs);
        assert_eq!(a.get(c.primary_inputs()[1]), Value::X);
    }

    #[test]
    fn test_evaluate_idempotent() {
        let c = xor_like();
        let mut inputs = FxHashMap::default();
        inputs.insert(c.primary_inputs()[0], Value::One);
        inputs.insert(c.primary_inputs()[1], Value::Zero);
        let a1 = evaluate(&c, &inputs);
        let a2 = evaluate(&c, &inputs);
        assert_eq!(a1.primary_output_values(&c), a2.primary_output_values(&c));
    }

    #[test]
    fn test_forced_value_override() {
        let c = xor_like();
        let mut inputs = FxHashMap::default();
        inputs.insert(c.primary_inputs()[0], Value::One);
        inputs.insert(c.primary_inputs()[1], Value::Zero);
        // Force g0's output to D as PODEM would when activating a fault there
        let g0 = c.gates()[0].output;
        inputs.insert(g0, Value::D);
        let a = evaluate(&c, &inputs);
        assert_eq!(a.get(g0), Value::D);
    }
}
