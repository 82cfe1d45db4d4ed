#![allow(clippy::arithmetic_side_effects)]
//! Property-based tests driving random operation sequences against a live
//! contract.
//!
//! Invariants tested:
//! - The pool accumulators never decrease
//! - Pool weight always equals the sum of position weights
//! - Paid plus pending never exceeds what the schedule emitted
//! - A sole staker collects the whole emission

extern crate std;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{testutils::Ledger as _, Address};
use std::vec::Vec as StdVec;

use crate::test::{nft_batch, setup, POINT_RATE, TOKEN_RATE};
use crate::Withdrawal;

const USERS: usize = 3;
const IDS_PER_USER: u128 = 8;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Deposit {
        #[proptest(strategy = "0usize..3")]
        user: usize,
        #[proptest(strategy = "1usize..4")]
        units: usize,
    },
    Withdraw {
        #[proptest(strategy = "0usize..3")]
        user: usize,
    },
    Claim {
        #[proptest(strategy = "0usize..3")]
        user: usize,
    },
    Advance {
        #[proptest(strategy = "1u64..60")]
        secs: u64,
    },
}

fn ids_of(user: usize) -> StdVec<u128> {
    let base = (user as u128) * 100;
    (0..IDS_PER_USER).map(|i| base + i).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_accounting_is_conservative(ops in proptest::collection::vec(any::<Op>(), 1..24)) {
        let s = setup();
        let users: StdVec<Address> = (0..USERS).map(|u| s.holder_of(&ids_of(u))).collect();
        let mut wallet: StdVec<StdVec<u128>> = (0..USERS).map(ids_of).collect();
        let mut staked: StdVec<StdVec<u128>> = (0..USERS).map(|_| StdVec::new()).collect();

        let mut now = 0u64;
        let mut paid_tokens = 0i128;
        let mut paid_points = 0i128;
        let mut last_tokens_acc = 0i128;
        let mut last_points_acc = 0i128;

        for op in ops {
            match op {
                Op::Deposit { user, units } => {
                    let n = units.min(wallet[user].len());
                    if n == 0 {
                        continue;
                    }
                    let ids: StdVec<u128> = wallet[user].drain(..n).collect();
                    s.client.deposit(
                        &users[user],
                        &s.pool_id,
                        &nft_batch(&s.env, &s.collection, &ids),
                        &0,
                    );
                    staked[user].extend(ids);
                }
                Op::Withdraw { user } => {
                    if let Some(id) = staked[user].pop() {
                        let paid = s.client.withdraw(
                            &users[user],
                            &s.pool_id,
                            &Withdrawal::Assets(nft_batch(&s.env, &s.collection, &[id])),
                        );
                        paid_tokens += paid.tokens;
                        paid_points += paid.points;
                        wallet[user].push(id);
                    }
                }
                Op::Claim { user } => {
                    let paid = s.client.claim(&users[user], &s.pool_id);
                    paid_tokens += paid.tokens;
                    paid_points += paid.points;
                }
                Op::Advance { secs } => {
                    now += secs;
                    s.env.ledger().set_timestamp(now);
                }
            }

            let pool = s.client.get_pool(&s.pool_id);
            prop_assert!(pool.tokens_per_share >= last_tokens_acc);
            prop_assert!(pool.points_per_share >= last_points_acc);
            last_tokens_acc = pool.tokens_per_share;
            last_points_acc = pool.points_per_share;

            let mut weight = 0i128;
            let mut pending_tokens = 0i128;
            let mut pending_points = 0i128;
            for user in users.iter() {
                weight += s.client.get_position(user, &s.pool_id).share_weight;
                let pending = s.client.get_pending_rewards(user, &s.pool_id);
                pending_tokens += pending.tokens;
                pending_points += pending.points;
            }
            prop_assert_eq!(weight, pool.total_share_weight);
            prop_assert!(paid_tokens + pending_tokens <= TOKEN_RATE * now as i128);
            prop_assert!(paid_points + pending_points <= POINT_RATE * now as i128);
        }
    }

    #[test]
    fn prop_sole_staker_collects_everything(
        steps in proptest::collection::vec((1u64..100, any::<bool>()), 1..10)
    ) {
        let s = setup();
        let alice = s.holder_of(&[1]);
        s.client.deposit(&alice, &s.pool_id, &nft_batch(&s.env, &s.collection, &[1]), &0);

        let mut now = 0u64;
        let mut paid = 0i128;
        for (secs, claim) in steps {
            now += secs;
            s.env.ledger().set_timestamp(now);
            if claim {
                paid += s.client.claim(&alice, &s.pool_id).tokens;
            }
        }
        let pending = s.client.get_pending_rewards(&alice, &s.pool_id).tokens;
        prop_assert_eq!(paid + pending, TOKEN_RATE * now as i128);
    }
}
