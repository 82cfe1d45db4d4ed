#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env, Vec,
};
use staker::testutils::{fake_signature, MockAssetLedger, MockAssetLedgerClient, MockAttestor};
use staker::{
    AssetBatch, AssetKind, BoostInfo, Checkpoint, Currency, EmissionEvent, StakerContract,
    StakerContractClient, Withdrawal,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { id: u8, boosted: bool },
    Withdraw { id: u8 },
    Redeem { iou: u8 },
    Claim,
    TransferIou { iou: u8, to: u8 },
    Advance { secs: u16 },
    SetTokenRate { rate: u32 },
    Checkpoint { end: u16, balance: u64 },
}

fn batch(env: &Env, asset: &Address, ids: &[u128]) -> AssetBatch {
    let mut id_vec = Vec::new(env);
    let mut amounts = Vec::new(env);
    for id in ids {
        id_vec.push_back(*id);
        amounts.push_back(1i128);
    }
    AssetBatch {
        asset: asset.clone(),
        kind: AssetKind::NftSingle,
        ids: id_vec,
        amounts,
    }
}

fuzz_target!(|actions: std::vec::Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let collection = env.register(MockAssetLedger, ());
    let gear = env.register(MockAssetLedger, ());
    let attestor = env.register(MockAttestor, ());

    let contract_id = env.register(StakerContract, ());
    let client = StakerContractClient::new(&env, &contract_id);
    client.initialize(&admin, &reward_token, &attestor);
    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &(i64::MAX as i128));

    let flat = |rate: i128| {
        vec![
            &env,
            EmissionEvent {
                effective_time: 0,
                rate_per_second: rate,
            },
        ]
    };
    client.set_emissions(&admin, &Currency::Tokens, &flat(1_000));
    client.set_emissions(&admin, &Currency::Points, &flat(10));
    client.configure_boosters(
        &admin,
        &vec![&env, 1u32],
        &vec![
            &env,
            BoostInfo {
                multiplier_bps: 25_000,
                amount_required: 1,
                group_required: 0,
                contract_required: gear.clone(),
                asset_kind_required: AssetKind::NftSingle,
            },
        ],
    );
    let pool_id = client.add_pool(
        &admin,
        &collection,
        &AssetKind::NftSingle,
        &1,
        &1,
        &vec![&env, 1u32],
    );

    let mut users = std::vec::Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        for id in 0..16u128 {
            MockAssetLedgerClient::new(&env, &collection).mint(&user, &id, &1);
            MockAssetLedgerClient::new(&env, &gear).mint(&user, &id, &1);
        }
        users.push(user);
    }

    // Looking for panics and broken bookkeeping, not for specific payouts.
    let mut now = 0u64;
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { id, boosted } => {
                let id = (id % 16) as u128;
                let (asset, booster) = if boosted { (&gear, 1u32) } else { (&collection, 0u32) };
                let _ = client.try_deposit(caller, &pool_id, &batch(&env, asset, &[id]), &booster);
            }
            FuzzAction::Withdraw { id } => {
                let ids = [(id % 16) as u128];
                let w = Withdrawal::Assets(batch(&env, &collection, &ids));
                let _ = client.try_withdraw(caller, &pool_id, &w);
            }
            FuzzAction::Redeem { iou } => {
                let w = Withdrawal::Ious(vec![&env, iou as u64]);
                let _ = client.try_withdraw(caller, &pool_id, &w);
            }
            FuzzAction::Claim => {
                let _ = client.try_claim(caller, &pool_id);
            }
            FuzzAction::TransferIou { iou, to } => {
                let to = &users[to as usize % users.len()];
                let _ = client.try_transfer_iou(caller, to, &(iou as u64));
            }
            FuzzAction::Advance { secs } => {
                now = now.saturating_add(secs as u64);
                env.ledger().set_timestamp(now);
            }
            FuzzAction::SetTokenRate { rate } => {
                let _ = client.try_set_emissions(&admin, &Currency::Tokens, &flat(rate as i128));
            }
            FuzzAction::Checkpoint { end, balance } => {
                let cp = Checkpoint {
                    start_times: vec![&env, 0u64],
                    end_times: vec![&env, end as u64],
                    balances: vec![&env, (balance % 1_000_000_000_001) as i128],
                };
                if let Ok(Ok(digest)) = client.try_checkpoint_digest(caller, &pool_id, &cp) {
                    let sig = fake_signature(&env, &digest);
                    let _ = client.try_claim_checkpoint(caller, &pool_id, &cp, &digest, &sig);
                }
            }
        }

        let pool = client.get_pool(&pool_id);
        let total: i128 = users
            .iter()
            .map(|u| client.get_position(u, &pool_id).share_weight)
            .sum();
        assert_eq!(total, pool.total_share_weight);
        assert!(pool.total_share_weight >= 0);
    }
});
