//! Applying incentive transactions through an evaluator


use incentive_consensus::evaluation::{apply_incentive, apply_incentive_with_config};
use incentive_consensus::config::DebugConfig;
use incentive_consensus::incentive::generate_incentive_transaction;
use incentive_consensus::*;
use test_helpers::*;

#[test]
fn test_results_follow_operation_order() {
    let state = create_snapshot(
        10,
        100,
        vec![
            create_position(1, 100, 10, 0),
            create_position(2, 200, 20, 1),
            create_position(3, 300, 500, 2),
        ],
    );
    let tx = generate_incentive_transaction(&state).unwrap();
    let mut evaluator = RecordingEvaluator::default();
    let processed = apply_incentive(&mut evaluator, &tx).unwrap();

    assert_eq!(processed.transaction, tx);
    assert_eq!(processed.operation_results.len(), tx.operations.len());
    assert_eq!(
        processed.operation_results,
        vec![
            OperationResult::Amount(100),
            OperationResult::Amount(200),
            OperationResult::Amount(300),
            OperationResult::Amount(300),
            OperationResult::Amount(200),
        ]
    );

    let indices: Vec<usize> = evaluator.seen.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    let seen_ops: Vec<Operation> = evaluator.seen.into_iter().map(|(_, op)| op).collect();
    assert_eq!(seen_ops, tx.operations);
}

#[test]
fn test_rejection_stops_application() {
    let state = create_snapshot(10, 100, (1..=5).map(|i| create_position(i, i, 0, 0)).collect());
    let tx = generate_incentive_transaction(&state).unwrap();
    let mut evaluator = RecordingEvaluator::failing_at(2);

    let result = apply_incentive(&mut evaluator, &tx);

    assert!(matches!(
        result,
        Err(ConsensusError::OperationRejected { index: 2, .. })
    ));
    assert_eq!(evaluator.seen.len(), 3);
}

#[test]
fn test_rejection_on_first_operation() {
    let state = create_snapshot(10, 100, vec![create_position(1, 10, 0, 3)]);
    let tx = generate_incentive_transaction(&state).unwrap();
    let mut evaluator = RecordingEvaluator::failing_at(0);

    let quiet = DebugConfig {
        log_rejections: false,
        ..DebugConfig::default()
    };
    assert!(apply_incentive_with_config(&mut evaluator, &tx, &quiet).is_err());
    assert_eq!(evaluator.seen.len(), 1);
}

#[test]
fn test_empty_transaction_applies_cleanly() {
    let state = create_snapshot(10, 0, vec![]);
    let tx = generate_incentive_transaction(&state).unwrap();
    let mut evaluator = RecordingEvaluator::default();

    let processed = apply_incentive(&mut evaluator, &tx).unwrap();
    assert!(processed.operation_results.is_empty());
    assert!(evaluator.seen.is_empty());
}

#[test]
fn test_facade_round_trip() {
    let consensus = IncentiveConsensus::new();
    let state = create_snapshot(2, 1_000, (1..=3).map(|i| create_position(i, i * 100, i, 0)).collect());
    let tx = consensus.generate_incentive_transaction(&state).unwrap();
    assert_eq!(
        consensus.check_incentive_transaction(&tx, &state.parameters).unwrap(),
        ValidationResult::Valid
    );

    let mut evaluator = RecordingEvaluator::default();
    let processed = consensus.apply_incentive(&mut evaluator, &tx).unwrap();
    assert_eq!(
        processed.operation_results,
        vec![OperationResult::Amount(100), OperationResult::Amount(200)]
    );
    assert_eq!(consensus.transaction_id(&tx), consensus.transaction_id(&processed.transaction));
}
