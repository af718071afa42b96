//! Example: Deutsch-Jozsa step by step.
//! Builds the circuit by hand for a balanced oracle given as an explicit truth
//! table, simulates it, and checks the verdict against the closed form.

use deutsch_jozsa::core::{bitstring, QubitId};
use deutsch_jozsa::operations::Operation;
use deutsch_jozsa::{classify, evaluate, CircuitBuilder, Oracle, Simulator};
use std::sync::Arc;

fn qid(id: u64) -> QubitId {
    QubitId(id)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Deutsch-Jozsa walkthrough (n=3, arbitrary balanced table) ---");

    // --- Setup ---
    let n: usize = 3;
    // f(x) = 1 for x in {000, 001, 100, 110}: balanced, and not of the form parity(x AND m) ^ c
    let table = vec![true, true, false, false, true, false, true, false];
    let oracle = Oracle::from_truth_table(n, table)?.with_label("Balanced (Hand-written)");
    let inputs: Vec<QubitId> = (0..n).map(|i| qid(i as u64)).collect();
    let ancilla = qid(n as u64);

    // --- Build the circuit ---
    let mut builder = CircuitBuilder::new();
    builder = builder.add_op(Operation::PauliX { target: ancilla });
    println!("  Step 1: Prepared ancilla in |1>.");
    for q in inputs.iter().chain(std::iter::once(&ancilla)) {
        builder = builder.add_op(Operation::Hadamard { target: *q });
    }
    println!("  Step 2: Applied H to every wire.");
    builder = builder.add_op(Operation::Oracle {
        inputs: inputs.clone(),
        ancilla,
        oracle: Arc::new(oracle.clone()),
    });
    println!("  Step 3: Queried the oracle once.");
    for q in &inputs {
        builder = builder.add_op(Operation::Hadamard { target: *q });
    }
    println!("  Step 4: Applied H to the inputs again.");
    builder = builder.add_op(Operation::Measure { targets: inputs.clone() });
    let circuit = builder.build();

    println!("\n{}", circuit);

    // --- Run ---
    let result = Simulator::new().with_shots(1000).with_seed(7).run(&circuit)?;
    println!("{}", result);

    // --- Analyze ---
    let register = result.register_state().ok_or("ancilla did not factor out")?;
    let analytic = evaluate(n, &oracle)?;
    println!("Analysis:");
    for k in 0..register.dim() {
        println!(
            "  |{}⟩ simulated {:+.4}  closed form {:+.4}",
            bitstring(k, n),
            register.vector()[k].re,
            analytic.vector()[k].re
        );
    }
    println!("- Verdict: {}", classify(register));
    assert_eq!(classify(register), classify(&analytic));
    assert_eq!(result.counts().get(&0), None, "a balanced oracle never yields |000>");
    Ok(())
}
