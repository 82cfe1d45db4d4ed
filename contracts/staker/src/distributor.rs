//! Reward distributor.
//!
//! Every payout is split between registered developers and the claimant.
//! Tokens leave the contract through the reward token; points are credited
//! to the internal, non-transferable points ledger.

use soroban_sdk::{contracttype, token, Address, Env, Vec};

use crate::rewards::{self, RewardAmounts, BPS_DENOMINATOR};
use crate::storage::{self, DataKey, DEVELOPERS, REWARD_TOKEN};
use crate::ContractError;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Developer {
    pub address: Address,
    pub share_bps: u32,
}

pub fn developers(env: &Env) -> Vec<Developer> {
    env.storage()
        .instance()
        .get(&DEVELOPERS)
        .unwrap_or(Vec::new(env))
}

/// Inserts or replaces `address`'s share. The sum of all shares stays at or
/// below 10 000 bps.
pub fn set_developer(env: &Env, address: &Address, share_bps: u32) -> Result<(), ContractError> {
    let mut devs = developers(env);
    let mut total: i128 = share_bps as i128;
    let mut existing: Option<u32> = None;
    for (i, dev) in devs.iter().enumerate() {
        if dev.address == *address {
            existing = Some(i as u32);
        } else {
            total = total.saturating_add(dev.share_bps as i128);
        }
    }
    if total > BPS_DENOMINATOR {
        return Err(ContractError::DeveloperShareTooHigh);
    }
    let entry = Developer {
        address: address.clone(),
        share_bps,
    };
    match existing {
        Some(i) => devs.set(i, entry),
        None => devs.push_back(entry),
    }
    env.storage().instance().set(&DEVELOPERS, &devs);
    Ok(())
}

pub fn remove_developer(env: &Env, address: &Address) -> Result<(), ContractError> {
    let mut devs = developers(env);
    let index = devs
        .iter()
        .position(|dev| dev.address == *address)
        .ok_or(ContractError::DeveloperNotFound)?;
    devs.remove(index as u32);
    env.storage().instance().set(&DEVELOPERS, &devs);
    Ok(())
}

// ── Points ledger ────────────────────────────────────────────────────────────

pub fn points_of(env: &Env, user: &Address) -> i128 {
    storage::read(env, &DataKey::Points(user.clone())).unwrap_or(0)
}

fn credit_points(env: &Env, user: &Address, amount: i128) {
    if amount <= 0 {
        return;
    }
    let balance = points_of(env, user).saturating_add(amount);
    storage::write(env, &DataKey::Points(user.clone()), &balance);
}

pub fn debit_points(env: &Env, user: &Address, amount: i128) -> Result<i128, ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }
    let balance = points_of(env, user);
    if balance < amount {
        return Err(ContractError::InsufficientPoints);
    }
    let remaining = balance.saturating_sub(amount);
    storage::write(env, &DataKey::Points(user.clone()), &remaining);
    Ok(remaining)
}

pub fn is_point_spender(env: &Env, spender: &Address) -> bool {
    storage::read(env, &DataKey::PointSpender(spender.clone())).unwrap_or(false)
}

pub fn set_point_spender(env: &Env, spender: &Address, approved: bool) {
    let key = DataKey::PointSpender(spender.clone());
    if approved {
        storage::write(env, &key, &true);
    } else {
        storage::remove(env, &key);
    }
}

// ── Payout ───────────────────────────────────────────────────────────────────

/// Developer cuts of `gross`, and what is left for the claimant.
pub fn split(env: &Env, gross: i128) -> (i128, Vec<(Address, i128)>) {
    let mut cuts = Vec::new(env);
    let mut net = gross;
    if gross <= 0 {
        return (0, cuts);
    }
    for dev in developers(env).iter() {
        let cut = rewards::bps_of(gross, dev.share_bps);
        if cut > 0 {
            net = net.saturating_sub(cut);
            cuts.push_back((dev.address, cut));
        }
    }
    (net, cuts)
}

/// Pays `gross` of both currencies to `recipient` after developer cuts.
/// Returns the net amounts the recipient received.
///
/// Callers finish all bookkeeping before calling this.
pub fn pay(
    env: &Env,
    recipient: &Address,
    gross: &RewardAmounts,
) -> Result<RewardAmounts, ContractError> {
    let (net_tokens, token_cuts) = split(env, gross.tokens);
    let (net_points, point_cuts) = split(env, gross.points);

    for (dev, cut) in point_cuts.iter() {
        credit_points(env, &dev, cut);
    }
    credit_points(env, recipient, net_points);

    if gross.tokens > 0 {
        let reward_token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let client = token::Client::new(env, &reward_token);
        let contract = env.current_contract_address();
        for (dev, cut) in token_cuts.iter() {
            client.transfer(&contract, &dev, &cut);
        }
        if net_tokens > 0 {
            client.transfer(&contract, recipient, &net_tokens);
        }
    }

    Ok(RewardAmounts {
        tokens: net_tokens,
        points: net_points,
    })
}
