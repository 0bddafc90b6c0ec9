//! Property tests for the coin bank.
//!
//! Whatever sequence of credits and debits is attempted, the pool plus every
//! balance always adds up to 20, and a failed operation changes nothing.

use proptest::prelude::*;

use eriantys_core::core::config::MAX_COINS;
use eriantys_core::core::PlayerId;
use eriantys_core::supply::Bank;

#[derive(Clone, Debug)]
enum Op {
    Add(u8, u8),
    Remove(u8, u8),
    Pay(u8, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..5, 0u8..25).prop_map(|(p, n)| Op::Add(p, n)),
        (0u8..5, 0u8..25).prop_map(|(p, n)| Op::Remove(p, n)),
        (0u8..5, 0u8..5).prop_map(|(p, n)| Op::Pay(p, n)),
    ]
}

proptest! {
    /// Test that coin moves never create or destroy coins.
    #[test]
    fn test_bank_is_zero_sum(players in 2u8..=4, ops in prop::collection::vec(op(), 0..64)) {
        let mut bank = Bank::new();
        for id in 0..players {
            bank.register(PlayerId::new(id)).unwrap();
        }

        for op in ops {
            let before = bank.clone();
            let outcome = match op {
                Op::Add(p, n) => bank.add_coin(PlayerId::new(p), n),
                Op::Remove(p, n) => bank.remove_coin(PlayerId::new(p), n),
                Op::Pay(p, n) => bank.pay(PlayerId::new(p), n),
            };

            prop_assert_eq!(bank.total(), MAX_COINS as u32);
            prop_assert!(bank.pool() <= MAX_COINS);
            if outcome.is_err() {
                prop_assert_eq!(&bank, &before);
            }
            for id in 0..players {
                prop_assert!(bank.balance(PlayerId::new(id)) <= MAX_COINS);
            }
        }
    }
}
