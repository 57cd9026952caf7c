#![no_main]
use incentive_consensus::incentive::generate_incentive_transaction;
use incentive_consensus::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let cap = data[0] as u32 + 1;
    let head_time = data[1] as u64;

    // 4 bytes per position: amount, total_periods, next_slot, pending
    let positions: PositionIndex = data[2..]
        .chunks_exact(4)
        .enumerate()
        .map(|(i, chunk)| LockedPosition {
            id: PositionId(i as u64),
            owner: AccountId(i as u64),
            amount: chunk[0] as u64 * 1_000,
            total_periods: chunk[1] as u16 + 1,
            period: 0,
            achieved: 0,
            next_slot: chunk[2] as u64,
            pending: (chunk[3] % 8) as u16,
        })
        .collect();
    let state = ChainSnapshot::new(
        ChainParameters {
            max_incentive_operations_per_block: cap,
            ..ChainParameters::default()
        },
        DynamicProperties {
            time: head_time,
            ..DynamicProperties::default()
        },
        positions,
    );

    let tx = match generate_incentive_transaction(&state) {
        Ok(tx) => tx,
        Err(e) => panic!("generation failed on valid state: {e}"),
    };
    assert!(tx.operations.len() <= cap as usize);

    let reasons: Vec<IncentiveReason> = tx.incentive_operations().map(|op| op.reason).collect();
    let first_vote = reasons
        .iter()
        .position(|r| *r == IncentiveReason::VotePayout)
        .unwrap_or(reasons.len());
    assert!(reasons[first_vote..]
        .iter()
        .all(|r| *r == IncentiveReason::VotePayout));
});
