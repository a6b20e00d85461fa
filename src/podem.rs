//! PODEM (Path-Oriented DEcision Making) test generation
//!
//! Recursive branch-and-bound search over primary-input assignments: excite
//! the target fault, then backtrace from a D-frontier gate toward a primary
//! input, trying both polarities before backtracking. See module-level
//! comments on [`search`] for the per-node algorithm.

use fxhash::FxHashMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::circuit::{Circuit, Gate, NetId};
use crate::eval::{evaluate, Assignment};
use crate::fault::Fault;
use crate::logic::{not, Value};
use crate::Error;

/// Result of a PODEM run: a test vector, or a proof that none exists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodemResult {
    /// A primary-input vector that detects the fault; unassigned inputs are `X`
    Vector(Vec<Value>),
    /// The fault cannot be detected by any vector
    Undetectable,
}

impl fmt::Display for PodemResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PodemResult::Vector(v) => {
                for value in v {
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            PodemResult::Undetectable => write!(f, "UNDETECTABLE"),
        }
    }
}

/// Strategy used to pick among several X-valued gate inputs during backtrace
///
/// The first-X strategy is deterministic and is the default; a seeded random
/// strategy is offered for average-case search-time experiments, per the
/// specification's allowance for a randomized, seedable backtrace choice.
#[derive(Debug, Clone, Copy)]
enum BacktraceStrategy {
    FirstX,
    RandomSeeded(u64),
}

/// Generate a test for a single stuck-at fault using the deterministic
/// first-X-input backtrace strategy
pub fn generate_test(circuit: &Circuit, fault: Fault) -> Result<PodemResult, Error> {
    generate_test_inner(circuit, fault, BacktraceStrategy::FirstX)
}

/// Generate a test for a single stuck-at fault, breaking backtrace ties with
/// a seeded random choice instead of always taking the first X input
pub fn generate_test_seeded(circuit: &Circuit, fault: Fault, seed: u64) -> Result<PodemResult, Error> {
    generate_test_inner(circuit, fault, BacktraceStrategy::RandomSeeded(seed))
}

fn generate_test_inner(
    circuit: &Circuit,
    fault: Fault,
    strategy: BacktraceStrategy,
) -> Result<PodemResult, Error> {
    if fault.net.index() >= circuit.nb_nets() {
        return Err(Error::UnknownFaultSite(format!(
            "net {} is not part of the circuit",
            fault.net
        )));
    }

    let mut rng = match strategy {
        BacktraceStrategy::RandomSeeded(seed) => Some(SmallRng::seed_from_u64(seed)),
        BacktraceStrategy::FirstX => None,
    };

    let mut pi_assignment: FxHashMap<NetId, Value> = FxHashMap::default();
    let found = search(circuit, fault, &mut pi_assignment, &mut rng);

    if !found {
        return Ok(PodemResult::Undetectable);
    }
    let vector = circuit
        .primary_inputs()
        .iter()
        .map(|pi| pi_assignment.get(pi).copied().unwrap_or(Value::X))
        .collect();
    Ok(PodemResult::Vector(vector))
}

/// Evaluate the circuit under the current primary-input assignment, then
/// activate the fault by overriding its site with D/D' once the fault-free
/// circuit would produce the opposite polarity there
fn run_evaluation(circuit: &Circuit, fault: Fault, pi_assignment: &FxHashMap<NetId, Value>) -> Assignment {
    let good = evaluate(circuit, pi_assignment);
    if good.get(fault.net) == fault.excite_value() {
        let mut forced = pi_assignment.clone();
        forced.insert(fault.net, fault.faulty_marker());
        evaluate(circuit, &forced)
    } else {
        good
    }
}

/// One node of the PODEM decision tree
///
/// Implements spec steps 2a-2g: implication via the evaluator (with fault
/// activation), success/failure/X-path checks, objective selection,
/// backtrace to a primary input, and recursion trying both polarities.
fn search(
    circuit: &Circuit,
    fault: Fault,
    pi_assignment: &mut FxHashMap<NetId, Value>,
    rng: &mut Option<SmallRng>,
) -> bool {
    let assignment = run_evaluation(circuit, fault, pi_assignment);

    if assignment.any_output_faulty(circuit) {
        return true;
    }

    // Before the fault site has a determined value, the only objective is
    // to excite it: the D-frontier is necessarily still empty at this point
    // and must not be read as a dead end.
    let (obj_net, obj_value) = if assignment.get(fault.net) == Value::X {
        (fault.net, fault.excite_value())
    } else {
        let frontier = d_frontier(circuit, &assignment);
        if frontier.is_empty() {
            return false;
        }
        let frontier_outputs: Vec<NetId> = frontier.iter().map(|g| g.output).collect();
        if !x_path_exists(circuit, &assignment, &frontier_outputs) {
            return false;
        }
        match objective(&assignment, &frontier) {
            Some(o) => o,
            None => return false,
        }
    };
    let (pi_net, dv) = backtrace(circuit, &assignment, obj_net, obj_value, rng);

    for try_value in [dv, not(dv)] {
        pi_assignment.insert(pi_net, try_value);
        if search(circuit, fault, pi_assignment, rng) {
            return true;
        }
    }
    pi_assignment.remove(&pi_net);
    false
}

/// Gates whose output is still `X` and at least one input is `D` or `D'`
fn d_frontier<'a>(circuit: &'a Circuit, assignment: &Assignment) -> Vec<&'a Gate> {
    circuit
        .gates()
        .iter()
        .filter(|g| {
            assignment.get(g.output) == Value::X
                && g.inputs.iter().any(|&i| assignment.get(i).is_faulty())
        })
        .collect()
}

/// Whether a path of currently-X nets leads from any D-frontier gate's
/// output to some primary output
fn x_path_exists(circuit: &Circuit, assignment: &Assignment, frontier_outputs: &[NetId]) -> bool {
    let mut visited: std::collections::HashSet<NetId> = std::collections::HashSet::new();
    let mut queue: Vec<NetId> = frontier_outputs.to_vec();
    let outputs: std::collections::HashSet<NetId> =
        circuit.primary_outputs().iter().copied().collect();

    while let Some(net) = queue.pop() {
        if !visited.insert(net) {
            continue;
        }
        if outputs.contains(&net) {
            return true;
        }
        for gate in circuit.fanout(net) {
            if assignment.get(gate.output) == Value::X {
                queue.push(gate.output);
            }
        }
    }
    false
}

/// Pick the next (net, desired-value) objective once the fault site itself
/// is already determined
///
/// Picks the first D-frontier gate (topological order) and pushes the
/// fault effect through its first X-valued input, requesting that input's
/// non-controlling value.
fn objective(assignment: &Assignment, frontier: &[&Gate]) -> Option<(NetId, Value)> {
    let gate = frontier.first()?;
    let c = gate.kind.controlling_value()?;
    let j = gate
        .inputs
        .iter()
        .find(|&&i| assignment.get(i) == Value::X)
        .copied()?;
    Some((j, not(c)))
}

/// Walk backward from an objective net to a primary input
///
/// At each gate, flips the desired value through inverting gates and picks
/// an X-valued input to continue through (deterministically the first one,
/// unless a seeded RNG is supplied, in which case the choice is randomized
/// among the X-valued inputs for reproducible average-case experiments).
fn backtrace(
    circuit: &Circuit,
    assignment: &Assignment,
    mut net: NetId,
    mut value: Value,
    rng: &mut Option<SmallRng>,
) -> (NetId, Value) {
    loop {
        if circuit.is_primary_input(net) {
            return (net, value);
        }
        let gate = circuit
            .driver(net)
            .expect("non-primary-input net must have a driver");
        if gate.kind.inverts() {
            value = not(value);
        }
        let x_inputs: Vec<NetId> = gate
            .inputs
            .iter()
            .copied()
            .filter(|&i| assignment.get(i) == Value::X)
            .collect();
        let next = match rng {
            Some(r) => x_inputs[r.gen_range(0..x_inputs.len())],
            None => x_inputs[0],
        };
        net = next;
    }
}
