//! Signed checkpoint claims.
//!
//! An off-chain authority attests `(start, end, balance)` intervals for a
//! claimant who was not yet part of on-chain pool accounting. The reward is
//! integrated straight from the emission schedules; the live accumulators
//! and pool strengths are never read or written on this path.

use soroban_sdk::{contractclient, contracttype, xdr::ToXdr, Address, Bytes, BytesN, Env, Vec};

use crate::emission::{self, Currency};
use crate::rewards::{self, RewardAmounts, PRECISION};
use crate::storage::ATTESTOR;
use crate::ContractError;

const DOMAIN_TAG: &[u8] = b"staker.checkpoint";

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub start_times: Vec<u64>,
    pub end_times: Vec<u64>,
    /// Attested share of the global emission, scaled by `PRECISION`.
    pub balances: Vec<i128>,
}

/// Interface of the attestation authority.
///
/// `verify` returns `true` only for a signature by the recognised signer
/// over `digest`; implementations may also trap on a bad signature.
#[contractclient(name = "AttestorClient")]
pub trait AttestationVerifier {
    fn verify(env: Env, digest: BytesN<32>, signature: BytesN<64>) -> bool;
}

/// Shape checks that must pass before anything is hashed.
pub fn validate_shape(checkpoint: &Checkpoint) -> Result<(), ContractError> {
    let n = checkpoint.start_times.len();
    if n == 0 {
        return Err(ContractError::EmptyCheckpoint);
    }
    if checkpoint.end_times.len() != n || checkpoint.balances.len() != n {
        return Err(ContractError::InputLengthsMismatch);
    }
    Ok(())
}

pub fn validate_entries(checkpoint: &Checkpoint, now: u64) -> Result<(), ContractError> {
    for i in 0..checkpoint.start_times.len() {
        let start = checkpoint.start_times.get_unchecked(i);
        let end = checkpoint.end_times.get_unchecked(i);
        let balance = checkpoint.balances.get_unchecked(i);
        if start > end || end > now {
            return Err(ContractError::InvalidCheckpointInterval);
        }
        if !(0..=PRECISION).contains(&balance) {
            return Err(ContractError::InvalidCheckpointBalance);
        }
    }
    Ok(())
}

/// Canonical digest of a checkpoint payload.
///
/// ```text
/// sha256("staker.checkpoint" ‖ xdr(contract) ‖ xdr(claimant) ‖ pool_id(4 BE)
///        ‖ n(4 BE) ‖ start_i(8 BE)… ‖ end_i(8 BE)… ‖ balance_i(16 BE)…)
/// ```
pub fn digest(env: &Env, claimant: &Address, pool_id: u32, checkpoint: &Checkpoint) -> BytesN<32> {
    let mut msg = Bytes::from_slice(env, DOMAIN_TAG);
    msg.append(&env.current_contract_address().to_xdr(env));
    msg.append(&claimant.clone().to_xdr(env));
    msg.extend_from_array(&pool_id.to_be_bytes());
    msg.extend_from_array(&checkpoint.start_times.len().to_be_bytes());
    for start in checkpoint.start_times.iter() {
        msg.extend_from_array(&start.to_be_bytes());
    }
    for end in checkpoint.end_times.iter() {
        msg.extend_from_array(&end.to_be_bytes());
    }
    for balance in checkpoint.balances.iter() {
        msg.extend_from_array(&balance.to_be_bytes());
    }
    env.crypto().sha256(&msg).to_bytes()
}

/// Asks the configured attestor whether `signature` covers `digest`.
pub fn verify_signature(
    env: &Env,
    digest: &BytesN<32>,
    signature: &BytesN<64>,
) -> Result<(), ContractError> {
    let attestor: Address = env
        .storage()
        .instance()
        .get(&ATTESTOR)
        .ok_or(ContractError::AttestorNotSet)?;
    match AttestorClient::new(env, &attestor).try_verify(digest, signature) {
        Ok(Ok(true)) => Ok(()),
        // `false`, a typed error, or a trap inside the verifier.
        _ => Err(ContractError::NotAnAdmin),
    }
}

/// Reward for every attested interval, integrated from the schedules.
///
/// Each entry earns `emitted(start, end) × balance / PRECISION` of the global
/// emission. Pool strengths are not read, so configuration changed after
/// signing does not alter what a payload is worth.
pub fn reward(env: &Env, checkpoint: &Checkpoint) -> RewardAmounts {
    let tokens = emission::schedule(env, Currency::Tokens);
    let points = emission::schedule(env, Currency::Points);
    let mut total = RewardAmounts::default();
    for i in 0..checkpoint.start_times.len() {
        let start = checkpoint.start_times.get_unchecked(i);
        let end = checkpoint.end_times.get_unchecked(i);
        let balance = checkpoint.balances.get_unchecked(i);

        total.tokens = total.tokens.saturating_add(rewards::mul_div(
            emission::emitted_between(&tokens, start, end),
            balance,
            PRECISION,
        ));
        total.points = total.points.saturating_add(rewards::mul_div(
            emission::emitted_between(&points, start, end),
            balance,
            PRECISION,
        ));
    }
    total
}

/// Attested intervals must end before the claimant's live stake began.
pub fn ensure_no_live_overlap(
    checkpoint: &Checkpoint,
    joined: Option<u64>,
) -> Result<(), ContractError> {
    if let Some(joined_at) = joined {
        if checkpoint.end_times.iter().any(|end| end > joined_at) {
            return Err(ContractError::CheckpointOverlapsLiveStake);
        }
    }
    Ok(())
}
