//! End-to-end exercise of the public API across the netlist/vector/fault
//! text formats, the evaluator, deductive fault simulation and PODEM.
//!
//! The specification's worked examples reference ISCAS-85-style benchmark
//! circuits (`s27.net`, `s349f_2.net`) by name, but their netlist contents
//! are not available here; these tests build small hand-constructed
//! circuits instead and cross-check the three core operations against
//! each other.

use atpg::fault::{detect_faults, Fault};
use atpg::io::{parse_binary_vector, parse_fault, parse_vector, read_netlist};
use atpg::podem::{generate_test, PodemResult};
use atpg::{simulate_input, Value};

fn full_adder_netlist() -> &'static str {
    "\
# a full adder built from NAND-only XOR gadgets plus the standard
# majority-function carry, since the gate set has no native XOR
INPUT a b cin -1
OUTPUT sum cout -1
NAND a b n1
NAND a n1 n2
NAND b n1 n3
NAND n2 n3 xab
NAND xab cin m1
NAND xab m1 m2
NAND cin m1 m3
NAND m2 m3 sum
AND a b g0
AND xab cin g1
OR g0 g1 cout
"
}

#[test]
fn test_netlist_roundtrip_through_text_format() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    assert_eq!(circuit.primary_inputs().len(), 3);
    assert_eq!(circuit.primary_outputs().len(), 2);

    let mut buf = Vec::new();
    atpg::io::write_netlist(&mut buf, &circuit).unwrap();
    let reparsed = read_netlist(&buf[..]).unwrap();
    assert_eq!(reparsed.gates().len(), circuit.gates().len());
}

#[test]
fn test_fault_free_evaluation_matches_truth_table() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    // a=1, b=1, cin=0: sum=0, cout=1
    let bits = parse_binary_vector(&circuit, "110").unwrap();
    let assignment = simulate_input(&circuit, &bits).unwrap();
    assert_eq!(
        assignment.primary_output_values(&circuit),
        vec![Value::Zero, Value::One]
    );
    // a=1, b=1, cin=1: sum=1, cout=1
    let bits = parse_binary_vector(&circuit, "111").unwrap();
    let assignment = simulate_input(&circuit, &bits).unwrap();
    assert_eq!(
        assignment.primary_output_values(&circuit),
        vec![Value::One, Value::One]
    );
    // a=0, b=0, cin=0: sum=0, cout=0
    let bits = parse_binary_vector(&circuit, "000").unwrap();
    let assignment = simulate_input(&circuit, &bits).unwrap();
    assert_eq!(
        assignment.primary_output_values(&circuit),
        vec![Value::Zero, Value::Zero]
    );
}

#[test]
fn test_vector_length_mismatch_rejected() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    assert!(parse_binary_vector(&circuit, "11").is_err());
    assert!(parse_vector(&circuit, "11").is_err());
}

#[test]
fn test_fault_on_undeclared_net_rejected() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    assert!(parse_fault(&circuit, "nosuchnet-sa-0").is_err());
}

#[test]
fn test_detect_faults_then_podem_cross_check() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    let bits = parse_binary_vector(&circuit, "101").unwrap();
    let detected = detect_faults(&circuit, &bits).unwrap();
    assert!(!detected.is_empty());

    // Every fault this vector detects must also be reachable by PODEM: it
    // must not answer UNDETECTABLE, since `bits` is itself a witness.
    for fault in &detected {
        let result = generate_test(&circuit, *fault).unwrap();
        assert_ne!(result, PodemResult::Undetectable);
    }
}

#[test]
fn test_podem_generated_vector_is_confirmed_by_fault_simulation() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    let cout = circuit.net_by_label("cout").unwrap();
    let fault = Fault::new(cout, Value::Zero).unwrap();

    let result = generate_test(&circuit, fault).unwrap();
    let vector = match result {
        PodemResult::Vector(v) => v,
        PodemResult::Undetectable => panic!("cout-sa-0 should be testable"),
    };

    // Pad any remaining X with 0 to get a concrete witness vector, then
    // confirm the fault shows up in the deductive fault list for it.
    let bits: Vec<bool> = vector
        .iter()
        .map(|v| matches!(v, Value::One))
        .collect();
    let detected = detect_faults(&circuit, &bits).unwrap();
    assert!(detected.contains(&fault));
}

#[test]
fn test_unreachable_net_is_undetectable() {
    // g0's output never reaches a primary output: only b and cin feed cout.
    let netlist = "\
INPUT a b cin -1
OUTPUT cout -1
AND a b g0
OR b cin cout
";
    let circuit = read_netlist(netlist.as_bytes()).unwrap();
    let g0 = circuit.net_by_label("g0").unwrap();
    let fault = Fault::new(g0, Value::Zero).unwrap();
    assert_eq!(
        generate_test(&circuit, fault).unwrap(),
        PodemResult::Undetectable
    );
}

#[test]
fn test_random_vectors_detect_faults_podem_can_reach() {
    let circuit = read_netlist(full_adder_netlist().as_bytes()).unwrap();
    // Exhaustive over 3 primary inputs stands in for "a random set of
    // vectors": every fault any vector detects must be generatable.
    for a in [false, true] {
        for b in [false, true] {
            for cin in [false, true] {
                let bits = [a, b, cin];
                let detected = detect_faults(&circuit, &bits).unwrap();
                for fault in detected {
                    assert_ne!(generate_test(&circuit, fault).unwrap(), PodemResult::Undetectable);
                }
            }
        }
    }
}
