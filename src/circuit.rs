//! Combinational circuit representation: gates, nets, connectivity and
//! topological order
//!
//! Nets are identified by a dense index ([`NetId`]); an external label map
//! is kept on [`Circuit`] for I/O and error reporting. Gates are a tagged
//! enum with a per-kind table of controlling value, inversion and arity,
//! so the evaluator can stay a flat iteration with no dynamic dispatch.

use std::collections::HashMap;
use std::fmt;

use crate::logic::Value;
use crate::Error;

/// Dense index identifying a net within a [`Circuit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetId(pub u32);

impl NetId {
    /// Raw index, for use as a Vec/array subscript
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Kind of logic gate
///
/// Arity is 2 for AND/NAND/OR/NOR, 1 for BUF/INV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Two-input AND
    And,
    /// Two-input NAND
    Nand,
    /// Two-input OR
    Or,
    /// Two-input NOR
    Nor,
    /// One-input buffer
    Buf,
    /// One-input inverter
    Inv,
}

impl GateKind {
    /// Number of inputs this gate kind takes
    pub fn arity(&self) -> usize {
        match self {
            GateKind::And | GateKind::Nand | GateKind::Or | GateKind::Nor => 2,
            GateKind::Buf | GateKind::Inv => 1,
        }
    }

    /// Controlling value: the input value that forces the output regardless
    /// of other inputs. BUF/INV have no controlling value.
    pub fn controlling_value(&self) -> Option<Value> {
        match self {
            GateKind::And | GateKind::Nand => Some(Value::Zero),
            GateKind::Or | GateKind::Nor => Some(Value::One),
            GateKind::Buf | GateKind::Inv => None,
        }
    }

    /// Whether this gate kind inverts its output relative to the base AND/OR function
    pub fn inverts(&self) -> bool {
        matches!(self, GateKind::Nand | GateKind::Nor | GateKind::Inv)
    }

    /// Parse a gate kind from its netlist keyword (case-insensitive)
    pub fn from_keyword(s: &str) -> Option<GateKind> {
        match s.to_ascii_uppercase().as_str() {
            "AND" => Some(GateKind::And),
            "NAND" => Some(GateKind::Nand),
            "OR" => Some(GateKind::Or),
            "NOR" => Some(GateKind::Nor),
            "BUF" => Some(GateKind::Buf),
            "INV" | "NOT" => Some(GateKind::Inv),
            _ => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GateKind::And => "AND",
            GateKind::Nand => "NAND",
            GateKind::Or => "OR",
            GateKind::Nor => "NOR",
            GateKind::Buf => "BUF",
            GateKind::Inv => "INV",
        };
        write!(f, "{s}")
    }
}

/// A single gate: kind, ordered input nets, output net
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// Gate kind
    pub kind: GateKind,
    /// Ordered input nets
    pub inputs: Vec<NetId>,
    /// Output net, driven by this gate
    pub output: NetId,
}

/// A combinational circuit: nets, gates in topological order, and the
/// primary-input/output sets
///
/// Immutable once built by [`CircuitBuilder::build`]. Every non-primary-input
/// net is driven by exactly one gate; primary inputs have no driver.
#[derive(Debug, Clone)]
pub struct Circuit {
    nb_nets: usize,
    gates: Vec<Gate>,
    primary_inputs: Vec<NetId>,
    primary_outputs: Vec<NetId>,
    driver: Vec<Option<usize>>,
    label_to_net: HashMap<String, NetId>,
    net_to_label: Vec<String>,
}

impl Circuit {
    /// Number of nets in the circuit (primary inputs + internal + primary outputs)
    pub fn nb_nets(&self) -> usize {
        self.nb_nets
    }

    /// Gates, in a valid topological order (primary inputs to outputs)
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Primary-input nets, in declared order
    pub fn primary_inputs(&self) -> &[NetId] {
        &self.primary_inputs
    }

    /// Primary-output nets
    pub fn primary_outputs(&self) -> &[NetId] {
        &self.primary_outputs
    }

    /// Returns true if the net is a primary input
    pub fn is_primary_input(&self, net: NetId) -> bool {
        self.driver[net.index()].is_none()
    }

    /// The gate driving a net, if any (`None` for primary inputs)
    pub fn driver(&self, net: NetId) -> Option<&Gate> {
        self.driver[net.index()].map(|i| &self.gates[i])
    }

    /// Gates that consume the given net as an input, in gate order
    pub fn fanout(&self, net: NetId) -> Vec<&Gate> {
        self.gates
            .iter()
            .filter(|g| g.inputs.contains(&net))
            .collect()
    }

    /// Resolve a net label to its id
    pub fn net_by_label(&self, label: &str) -> Option<NetId> {
        self.label_to_net.get(label).copied()
    }

    /// Label of a net, as declared in the netlist
    pub fn label(&self, net: NetId) -> &str {
        &self.net_to_label[net.index()]
    }
}

/// Incremental builder for a [`Circuit`]
///
/// Accumulates gate declarations plus a primary-input order and primary-
/// output set, then validates and topologically sorts on [`build`](Self::build).
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    label_to_net: HashMap<String, NetId>,
    net_to_label: Vec<String>,
    primary_inputs: Vec<NetId>,
    primary_input_set: std::collections::HashSet<NetId>,
    primary_outputs: Vec<NetId>,
    // (kind, input labels, output label), declaration order preserved
    declarations: Vec<(GateKind, Vec<String>, String)>,
}

impl CircuitBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    fn net_id_for(&mut self, label: &str) -> NetId {
        if let Some(id) = self.label_to_net.get(label) {
            return *id;
        }
        let id = NetId(self.net_to_label.len() as u32);
        self.net_to_label.push(label.to_string());
        self.label_to_net.insert(label.to_string(), id);
        id
    }

    /// Declare a primary input, in order. Returns its net id.
    pub fn add_primary_input(&mut self, label: &str) -> NetId {
        let id = self.net_id_for(label);
        self.primary_inputs.push(id);
        self.primary_input_set.insert(id);
        id
    }

    /// Declare a primary output by label
    pub fn add_primary_output(&mut self, label: &str) {
        let id = self.net_id_for(label);
        self.primary_outputs.push(id);
    }

    /// Declare a gate: kind, ordered input labels, output label
    pub fn add_gate(&mut self, kind: GateKind, inputs: &[&str], output: &str) {
        self.declarations.push((
            kind,
            inputs.iter().map(|s| s.to_string()).collect(),
            output.to_string(),
        ));
        self.net_id_for(output);
        for i in inputs {
            self.net_id_for(i);
        }
    }

    /// Validate and topologically sort the declared gates, producing a [`Circuit`]
    pub fn build(self) -> Result<Circuit, Error> {
        let nb_nets = self.net_to_label.len();

        // Resolve gate declarations to net ids, checking arity
        let mut gates = Vec::with_capacity(self.declarations.len());
        for (kind, input_labels, output_label) in &self.declarations {
            if input_labels.len() != kind.arity() {
                return Err(Error::CircuitStructure(format!(
                    "gate {} driving {} expects {} input(s), got {}",
                    kind,
                    output_label,
                    kind.arity(),
                    input_labels.len()
                )));
            }
            let inputs: Vec<NetId> = input_labels
                .iter()
                .map(|l| self.label_to_net[l])
                .collect();
            let output = self.label_to_net[output_label];
            gates.push(Gate {
                kind: *kind,
                inputs,
                output,
            });
        }

        // Duplicate-driver check; primary inputs must not be driven
        let mut driver: Vec<Option<usize>> = vec![None; nb_nets];
        for (i, g) in gates.iter().enumerate() {
            if self.primary_input_set.contains(&g.output) {
                return Err(Error::CircuitStructure(format!(
                    "net {} is both a primary input and a gate output",
                    self.net_to_label[g.output.index()]
                )));
            }
            if let Some(prev) = driver[g.output.index()] {
                return Err(Error::CircuitStructure(format!(
                    "net {} has multiple drivers (gates {} and {})",
                    self.net_to_label[g.output.index()],
                    prev,
                    i
                )));
            }
            driver[g.output.index()] = Some(i);
        }

        // Every non-primary-input net must have a driver (undeclared-net
        // references surface here: a label only ever used as a gate input,
        // never declared as a primary input nor as any gate's output)
        for (idx, label) in self.net_to_label.iter().enumerate() {
            let id = NetId(idx as u32);
            if driver[idx].is_none() && !self.primary_input_set.contains(&id) {
                return Err(Error::CircuitStructure(format!(
                    "net {label} is referenced but never declared as a primary input or gate output"
                )));
            }
        }
        // Topological sort (Kahn's algorithm), ties broken by declaration order
        let order = topo_sort(&gates, nb_nets, &driver)?;
        let sorted_gates: Vec<Gate> = order.iter().map(|&i| gates[i].clone()).collect();
        let mut sorted_driver: Vec<Option<usize>> = vec![None; nb_nets];
        for (new_i, g) in sorted_gates.iter().enumerate() {
            sorted_driver[g.output.index()] = Some(new_i);
        }

        Ok(Circuit {
            nb_nets,
            gates: sorted_gates,
            primary_inputs: self.primary_inputs,
            primary_outputs: self.primary_outputs,
            driver: sorted_driver,
            label_to_net: self.label_to_net,
            net_to_label: self.net_to_label,
        })
    }
}

/// Kahn's algorithm over the gate dependency graph, declaration order as tiebreak
fn topo_sort(
    gates: &[Gate],
    nb_nets: usize,
    driver: &[Option<usize>],
) -> Result<Vec<usize>, Error> {
    // in_degree[g] = number of gate inputs whose driver has not been emitted yet
    let mut in_degree = vec![0usize; gates.len()];
    // consumers[net] = gate indices that read this net as an input
    let mut consumers: Vec<Vec<usize>> = vec![Vec::new(); nb_nets];
    for (i, g) in gates.iter().enumerate() {
        for input in &g.inputs {
            consumers[input.index()].push(i);
            if driver[input.index()].is_some() {
                in_degree[i] += 1;
            }
        }
    }

    // Use a simple ready list, declaration order as tiebreak (pushed in order,
    // popped from the front) for deterministic output.
    let mut ready: std::collections::VecDeque<usize> = (0..gates.len())
        .filter(|&i| in_degree[i] == 0)
        .collect();
    let mut order = Vec::with_capacity(gates.len());
    while let Some(i) = ready.pop_front() {
        order.push(i);
        for &consumer in &consumers[gates[i].output.index()] {
            in_degree[consumer] -= 1;
            if in_degree[consumer] == 0 {
                ready.push_back(consumer);
            }
        }
    }

    if order.len() != gates.len() {
        return Err(Error::CircuitStructure(
            "cyclic connectivity: the circuit is not combinational".to_string(),
        ));
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_and_or() -> Circuit {
        // out = NOR(AND(a, b), c)
        let mut b = CircuitBuilder::new();
        b.add_primary_input("a");
        b.add_primary_input("b");
        b.add_primary_input("c");
        b.add_gate(GateKind::And, &["a", "b"], "t");
        b.add_gate(GateKind::Nor, &["t", "c"], "out");
        b.add_primary_output("out");
        b.build().unwrap()
    }

    #[test]
    fn test_basic_build() {
        let c = small_and_or();
        assert_eq!(c.primary_inputs().len(), 3);
        assert_eq!(c.primary_outputs().len(), 1);
        assert_eq!(c.gates().len(), 2);
        // Topological order: the AND gate (driving t) must precede the NOR gate
        let and_pos = c.gates().iter().position(|g| g.kind == GateKind::And).unwrap();
        let nor_pos = c.gates().iter().position(|g| g.kind == GateKind::Nor).unwrap();
        assert!(and_pos < nor_pos);
    }

    #[test]
    fn test_duplicate_driver() {
        let mut b = CircuitBuilder::new();
        b.add_primary_input("a");
        b.add_primary_input("b");
        b.add_gate(GateKind::Buf, &["a"], "x");
        b.add_gate(GateKind::Buf, &["b"], "x");
        b.add_primary_output("x");
        assert!(matches!(b.build(), Err(Error::CircuitStructure(_))));
    }

    #[test]
    fn test_undeclared_net() {
        let mut b = CircuitBuilder::new();
        b.add_primary_input("a");
        b.add_gate(GateKind::Buf, &["undeclared"], "x");
        b.add_primary_output("x");
        assert!(matches!(b.build(), Err(Error::CircuitStructure(_))));
    }

    #[test]
    fn test_arity_mismatch() {
        let mut b = CircuitBuilder::new();
        b.add_primary_input("a");
        b.add_primary_input("b");
        b.add_gate(GateKind::And, &["a", "b", "a"], "x");
        b.add_primary_output("x");
        assert!(matches!(b.build(), Err(Error::CircuitStructure(_))));
    }

    #[test]
    fn test_cycle() {
        let mut b = CircuitBuilder::new();
        b.add_primary_input("a");
        b.add_gate(GateKind::Buf, &["y"], "x");
        b.add_gate(GateKind::Buf, &["x"], "y");
        b.add_primary_output("x");
        assert!(matches!(b.build(), Err(Error::CircuitStructure(_))));
    }

    #[test]
    fn test_gate_kind_table() {
        assert_eq!(GateKind::And.arity(), 2);
        assert_eq!(GateKind::Buf.arity(), 1);
        assert_eq!(GateKind::And.controlling_value(), Some(Value::Zero));
        assert_eq!(GateKind::Or.controlling_value(), Some(Value::One));
        assert_eq!(GateKind::Buf.controlling_value(), None);
        assert!(GateKind::Nand.inverts());
        assert!(!GateKind::And.inverts());
        assert!(GateKind::Inv.inverts());
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(GateKind::from_keyword("and"), Some(GateKind::And));
        assert_eq!(GateKind::from_keyword("NAND"), Some(GateKind::Nand));
        assert_eq!(GateKind::from_keyword("nope"), None);
    }
}
