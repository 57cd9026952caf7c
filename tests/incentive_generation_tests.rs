//! Incentive transaction generation scenarios


use incentive_consensus::config::{GeneratorConfig, IncentiveConfig};
use incentive_consensus::constants::SECONDS_PER_YEAR;
use incentive_consensus::incentive::{
    check_incentive_transaction, generate_incentive_transaction,
    generate_incentive_transaction_with_config,
};
use incentive_consensus::*;
use test_helpers::*;

fn summary(tx: &Transaction) -> Vec<(u64, Amount, IncentiveReason)> {
    tx.incentive_operations()
        .map(|op| (op.position_id.0, op.amount, op.reason))
        .collect()
}

#[test]
fn test_cap_two_of_three_maturities() {
    let state = create_snapshot(
        2,
        1_000,
        vec![
            create_position(1, 100, 1, 0),
            create_position(2, 200, 2, 0),
            create_position(3, 300, 3, 0),
        ],
    );
    let tx = generate_incentive_transaction(&state).unwrap();

    assert_eq!(
        summary(&tx),
        vec![
            (1, 100, IncentiveReason::PeriodMaturity),
            (2, 200, IncentiveReason::PeriodMaturity),
        ]
    );
}

#[test]
fn test_ten_over_three_floors_to_three() {
    let mut position = create_position(1, 10, 0, 0);
    position.total_periods = 3;
    let state = create_snapshot(10, 0, vec![position]);
    let tx = generate_incentive_transaction(&state).unwrap();

    assert_eq!(summary(&tx), vec![(1, 3, IncentiveReason::PeriodMaturity)]);
}

#[test]
fn test_maturity_boundary_is_inclusive() {
    let state = create_snapshot(
        10,
        500,
        vec![
            create_position(1, 10, 499, 0),
            create_position(2, 20, 500, 0),
            create_position(3, 30, 501, 0),
        ],
    );
    let tx = generate_incentive_transaction(&state).unwrap();
    let ids: Vec<u64> = summary(&tx).iter().map(|(id, _, _)| *id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_matured_position_with_votes_appears_in_both_groups() {
    let state = create_snapshot(10, 100, vec![create_position(7, 70, 50, 2)]);
    let tx = generate_incentive_transaction(&state).unwrap();

    assert_eq!(
        summary(&tx),
        vec![
            (7, 70, IncentiveReason::PeriodMaturity),
            (7, 70, IncentiveReason::VotePayout),
            (7, 70, IncentiveReason::VotePayout),
        ]
    );
}

#[test]
fn test_vote_payouts_ordered_by_pending_then_reverse_creation() {
    let state = create_snapshot(
        20,
        0,
        vec![
            create_position(1, 10, 1_000, 1),
            create_position(2, 20, 1_000, 3),
            create_position(3, 30, 1_000, 1),
            create_position(4, 40, 1_000, 0),
        ],
    );
    let tx = generate_incentive_transaction(&state).unwrap();
    let ids: Vec<u64> = summary(&tx).iter().map(|(id, _, _)| *id).collect();

    assert_eq!(ids, vec![2, 2, 2, 3, 1]);
    assert!(tx
        .incentive_operations()
        .all(|op| op.reason == IncentiveReason::VotePayout));
}

#[test]
fn test_vote_payout_includes_interest() {
    let mut position = create_position(1, 1_000_000, 10_000, 1);
    position.total_periods = 10;
    position.period = SECONDS_PER_YEAR as u32;
    let state = ChainSnapshot::new(
        create_parameters(10, 1_000), // 10% a year
        create_dynamic_properties(0),
        vec![position].into_iter().collect(),
    );
    let tx = generate_incentive_transaction(&state).unwrap();

    assert_eq!(summary(&tx), vec![(1, 200_000, IncentiveReason::VotePayout)]);
}

#[test]
fn test_nothing_due_yields_empty_transaction() {
    let state = create_snapshot(10, 0, vec![create_position(1, 10, 100, 0)]);
    let tx = generate_incentive_transaction(&state).unwrap();

    assert!(tx.operations.is_empty());
    assert_eq!(tx.expiration, 30);
    assert!(tx.references_block(&state.dynamic_properties.head_block_id));
}

#[test]
fn test_generation_is_deterministic() {
    let positions: Vec<LockedPosition> = (1..=50)
        .map(|i| create_position(i, i * 13, i % 7, (i % 4) as u16))
        .collect();
    let a = create_snapshot(40, 5, positions.clone());
    let b = create_snapshot(40, 5, positions.into_iter().rev().collect());

    assert_eq!(
        generate_incentive_transaction(&a).unwrap(),
        generate_incentive_transaction(&b).unwrap()
    );
}

#[test]
fn test_invalid_parameters_abort() {
    let mut state = create_snapshot(10, 0, vec![]);
    state.parameters.issuance_rate_scale = 0;
    assert!(matches!(
        generate_incentive_transaction(&state),
        Err(ConsensusError::InvalidParameters(_))
    ));
}

#[test]
fn test_config_override_caps_operations() {
    let state = create_snapshot(100, 10, (1..=10).map(|i| create_position(i, 1, 0, 0)).collect());
    let config = IncentiveConfig {
        generator: GeneratorConfig {
            max_operations_override: 4,
            ..GeneratorConfig::default()
        },
        ..IncentiveConfig::default()
    };
    let tx = generate_incentive_transaction_with_config(&state, &config).unwrap();
    assert_eq!(tx.operations.len(), 4);
}

#[test]
fn test_generated_transaction_passes_check() {
    let state = create_snapshot(3, 10, (1..=10).map(|i| create_position(i, 5, 0, 2)).collect());
    let tx = generate_incentive_transaction(&state).unwrap();
    assert_eq!(
        check_incentive_transaction(&tx, &state.parameters).unwrap(),
        ValidationResult::Valid
    );
}

#[test]
fn test_snapshot_reflects_index_updates() {
    let mut state = create_snapshot(10, 100, vec![create_position(1, 10, 50, 0)]);
    state
        .positions
        .modify(PositionId(1), |p| {
            p.next_slot = 150;
            p.pending = 1;
        })
        .unwrap();
    let tx = generate_incentive_transaction(&state).unwrap();
    assert_eq!(summary(&tx), vec![(1, 10, IncentiveReason::VotePayout)]);
}
