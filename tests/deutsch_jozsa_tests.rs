// tests/deutsch_jozsa_tests.rs

use deutsch_jozsa::{
    build_balanced, build_oracle, classify, evaluate, BalancedPattern, Classification, DjError, Oracle,
    OracleKind, QueryComparison, Report,
};

const TEST_TOLERANCE: f64 = 1e-9;

fn balanced_variants(n: usize) -> Result<Vec<Oracle>, DjError> {
    let mut oracles = vec![
        build_balanced(n, BalancedPattern::Parity)?,
        build_balanced(n, BalancedPattern::FirstHalf)?,
        build_balanced(n, BalancedPattern::Mask(1))?,
    ];
    for seed in 0..4 {
        oracles.push(build_balanced(n, BalancedPattern::Random { seed })?);
    }
    Ok(oracles)
}

#[test]
fn test_constant_oracles_classify_constant() -> Result<(), DjError> {
    for n in 1..=10 {
        for kind in [OracleKind::Const0, OracleKind::Const1] {
            let oracle = build_oracle(n, kind)?;
            let state = evaluate(n, &oracle)?;
            assert!(
                (state.zero_state_probability() - 1.0).abs() < TEST_TOLERANCE,
                "n={} {:?}",
                n,
                kind
            );
            assert_eq!(classify(&state), Classification::Constant);
        }
    }
    Ok(())
}

#[test]
fn test_balanced_oracles_classify_balanced() -> Result<(), DjError> {
    for n in 1..=10 {
        for oracle in balanced_variants(n)? {
            let state = evaluate(n, &oracle)?;
            assert!(
                state.zero_state_probability() < TEST_TOLERANCE,
                "n={} {}",
                n,
                oracle.label()
            );
            assert_eq!(classify(&state), Classification::Balanced);
        }
    }
    Ok(())
}

#[test]
fn test_unitarity_for_every_kind() -> Result<(), DjError> {
    for n in 1..=12 {
        let mut oracles = vec![
            build_oracle(n, OracleKind::Const0)?,
            build_oracle(n, OracleKind::Const1)?,
        ];
        oracles.extend(balanced_variants(n)?);
        for oracle in oracles {
            let state = evaluate(n, &oracle)?;
            assert!(
                (state.norm_sqr() - 1.0).abs() < TEST_TOLERANCE,
                "n={} {} norm={}",
                n,
                oracle.label(),
                state.norm_sqr()
            );
        }
    }
    Ok(())
}

#[test]
fn test_evaluate_is_idempotent() -> Result<(), DjError> {
    let oracle = build_balanced(6, BalancedPattern::Random { seed: 99 })?;
    let first = evaluate(6, &oracle)?;
    let second = evaluate(6, &oracle)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_scenario_three_qubits_constant_one() -> Result<(), DjError> {
    let oracle = build_oracle(3, OracleKind::Const1)?;
    let state = evaluate(3, &oracle)?;

    assert!((state.probability(0) - 1.0).abs() < TEST_TOLERANCE);
    for k in 1..8 {
        assert!(state.probability(k) < TEST_TOLERANCE, "index {}", k);
    }
    let classification = classify(&state);
    assert_eq!(classification, Classification::Constant);

    let queries = QueryComparison::for_inputs(3);
    assert_eq!(queries.classical_worst_case, 5);
    assert_eq!(queries.quantum, 1);

    let text = Report::new(3, &oracle, &state, classification).to_string();
    assert!(text.contains("Classical queries needed (worst case): 5"));
    Ok(())
}

#[test]
fn test_scenario_two_qubits_parity() -> Result<(), DjError> {
    let oracle = build_oracle(2, OracleKind::Balanced)?;
    // f(x) = parity(x)
    assert_eq!(oracle.truth_table(), &[false, true, true, false]);
    let state = evaluate(2, &oracle)?;

    assert!(state.amplitude(0).unwrap_or_default().norm() < TEST_TOLERANCE);
    assert!((state.probability(0b11) - 1.0).abs() < TEST_TOLERANCE);
    assert_eq!(classify(&state), Classification::Balanced);
    assert_eq!(QueryComparison::for_inputs(2).classical_worst_case, 3);
    Ok(())
}

#[test]
fn test_single_bit_boundary() -> Result<(), DjError> {
    let constant = build_oracle(1, OracleKind::Const0)?;
    assert_eq!(classify(&evaluate(1, &constant)?), Classification::Constant);

    let identity = build_oracle(1, OracleKind::Balanced)?;
    assert_eq!(classify(&evaluate(1, &identity)?), Classification::Balanced);

    let negation = Oracle::from_truth_table(1, vec![true, false])?;
    assert!(negation.is_balanced());
    assert_eq!(classify(&evaluate(1, &negation)?), Classification::Balanced);
    Ok(())
}

#[test]
fn test_mask_oracle_peaks_at_mask() -> Result<(), DjError> {
    let oracle = build_balanced(4, BalancedPattern::Mask(0b1010))?;
    let state = evaluate(4, &oracle)?;
    assert!((state.probability(0b1010) - 1.0).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_invalid_arguments() {
    assert!(matches!(build_oracle(0, OracleKind::Const1), Err(DjError::InvalidArgument { .. })));
    assert!(matches!("half".parse::<OracleKind>(), Err(DjError::InvalidArgument { .. })));
    let err = build_oracle(0, OracleKind::Const1).unwrap_err();
    assert!(err.to_string().starts_with("Invalid Argument:"));
}
