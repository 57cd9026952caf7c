#![no_main]
use incentive_consensus::economic::calculate_incentive_amount;
use incentive_consensus::{AccountId, ChainParameters, LockedPosition, PositionId};
use libfuzzer_sys::fuzz_target;

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = data.get(offset + i).copied().unwrap_or(0);
    }
    u64::from_le_bytes(bytes)
}

fuzz_target!(|data: &[u8]| {
    let amount = read_u64(data, 0);
    let total_periods = read_u64(data, 8) as u16;
    let period = read_u64(data, 10) as u32;
    let issuance_rate = read_u64(data, 14);
    let issuance_rate_scale = read_u64(data, 22);

    let position = LockedPosition {
        id: PositionId(1),
        owner: AccountId(1),
        amount,
        total_periods,
        period,
        achieved: 0,
        next_slot: 0,
        pending: 0,
    };
    let params = ChainParameters {
        max_incentive_operations_per_block: 1,
        issuance_rate,
        issuance_rate_scale,
    };

    // Never panics: bad inputs are reported as errors
    match calculate_incentive_amount(&position, &params) {
        Ok(payout) => {
            if issuance_rate == 0 {
                assert_eq!(payout, amount / total_periods as u64);
            }
        }
        Err(_) => {
            assert!(total_periods == 0 || issuance_rate_scale == 0 || issuance_rate > 0);
        }
    }
});
