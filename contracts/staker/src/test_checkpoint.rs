extern crate std;

use ed25519_dalek::{Signer, SigningKey};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, BytesN, Env, Vec,
};

use attestor::{AttestorContract, AttestorContractClient};

use crate::rewards::PRECISION;
use crate::test::{ev, nft_batch, setup, Setup, POINT_RATE, TOKEN_RATE};
use crate::testutils::{fake_signature, MockAssetLedger};
use crate::{AssetKind, Checkpoint, ContractError, Currency, RewardAmounts};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn checkpoint(env: &Env, entries: &[(u64, u64, i128)]) -> Checkpoint {
    let mut cp = Checkpoint {
        start_times: Vec::new(env),
        end_times: Vec::new(env),
        balances: Vec::new(env),
    };
    for (start, end, balance) in entries {
        cp.start_times.push_back(*start);
        cp.end_times.push_back(*end);
        cp.balances.push_back(*balance);
    }
    cp
}

/// Signed hash and mock signature for `claimant`'s checkpoint.
fn attest(s: &Setup, claimant: &Address, cp: &Checkpoint) -> (BytesN<32>, BytesN<64>) {
    let digest = s.client.checkpoint_digest(claimant, &s.pool_id, cp);
    let signature = fake_signature(&s.env, &digest);
    (digest, signature)
}

fn expect_err(result: Result<ContractError, ()>, expected: ContractError) {
    match result {
        Ok(e) => assert_eq!(e, expected),
        Err(()) => unreachable!("Expected {:?} error", expected),
    }
}

macro_rules! claim_err {
    ($s:expr, $claimant:expr, $cp:expr, $hash:expr, $sig:expr) => {
        match $s
            .client
            .try_claim_checkpoint($claimant, &$s.pool_id, $cp, $hash, $sig)
        {
            Err(Ok(e)) => Ok(e),
            _ => Err(()),
        }
    };
}

// ── Happy path ────────────────────────────────────────────────────────────────

#[test]
fn test_checkpoint_pays_attested_share() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);

    let cp = checkpoint(&s.env, &[(0, 10, PRECISION / 2)]);
    let (hash, sig) = attest(&s, &claimant, &cp);

    let paid = s
        .client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &hash, &sig);
    assert_eq!(
        paid,
        RewardAmounts {
            tokens: TOKEN_RATE * 10 / 2,
            points: POINT_RATE * 10 / 2,
        }
    );
    assert_eq!(s.token_balance(&claimant), TOKEN_RATE * 10 / 2);
    assert!(s.client.is_hash_used(&hash));
}

#[test]
fn test_checkpoint_sums_intervals() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);

    let cp = checkpoint(&s.env, &[(0, 10, PRECISION), (10, 20, PRECISION / 4)]);
    let (hash, sig) = attest(&s, &claimant, &cp);

    let paid = s
        .client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &hash, &sig);
    assert_eq!(paid.tokens, TOKEN_RATE * 10 + TOKEN_RATE * 10 / 4);
}

#[test]
fn test_checkpoint_leaves_live_accumulator_alone() {
    let s = setup();
    let env = &s.env;
    let alice = s.holder_of(&[1]);
    s.client
        .deposit(&alice, &s.pool_id, &nft_batch(env, &s.collection, &[1]), &0);

    env.ledger().set_timestamp(20);
    let before = s.client.get_pool(&s.pool_id);
    let claimant = Address::generate(env);
    let cp = checkpoint(env, &[(0, 20, PRECISION)]);
    let (hash, sig) = attest(&s, &claimant, &cp);
    s.client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &hash, &sig);

    assert_eq!(s.client.get_pool(&s.pool_id), before);
    assert_eq!(
        s.client.get_pending_rewards(&alice, &s.pool_id).tokens,
        TOKEN_RATE * 20
    );
}

#[test]
fn test_checkpoint_value_fixed_at_signing() {
    let s = setup();
    let env = &s.env;
    env.ledger().set_timestamp(100);
    let claimant = Address::generate(env);
    let cp = checkpoint(env, &[(0, 10, PRECISION)]);
    let (hash, sig) = attest(&s, &claimant, &cp);

    // Re-weighting after signing must not rescale the attested past.
    s.client.add_pool(
        &s.admin,
        &env.register(MockAssetLedger, ()),
        &AssetKind::NftSingle,
        &1,
        &1,
        &Vec::new(env),
    );
    s.client
        .update_pool(&s.admin, &s.pool_id, &5, &5, &Vec::new(env));

    let paid = s
        .client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &hash, &sig);
    assert_eq!(paid.tokens, TOKEN_RATE * 10);
    assert_eq!(paid.points, POINT_RATE * 10);
}

#[test]
fn test_checkpoint_large_emission_is_exact() {
    let s = setup();
    let env = &s.env;
    let rate: i128 = 1_000_000_000_000_000_000_000;
    let span: u64 = 1_000_000;
    s.client
        .set_emissions(&s.admin, &Currency::Tokens, &vec![env, ev(0, rate)]);
    let expected = rate * span as i128 / 4;
    StellarAssetClient::new(env, &s.reward_token)
        .mock_all_auths()
        .mint(&s.client.address, &expected);

    env.ledger().set_timestamp(span);
    let claimant = Address::generate(env);
    let cp = checkpoint(env, &[(0, span, PRECISION / 4)]);
    let (hash, sig) = attest(&s, &claimant, &cp);

    let paid = s
        .client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &hash, &sig);
    assert_eq!(paid.tokens, expected);
    assert_eq!(s.token_balance(&claimant), expected);
}

// ── Replay & integrity ────────────────────────────────────────────────────────

#[test]
fn test_checkpoint_is_single_use() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(0, 10, PRECISION)]);
    let (hash, sig) = attest(&s, &claimant, &cp);

    s.client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &hash, &sig);
    let err = claim_err!(s, &claimant, &cp, &hash, &sig);
    expect_err(err, ContractError::HashUsed);
    assert_eq!(s.token_balance(&claimant), TOKEN_RATE * 10);
}

#[test]
fn test_tampered_balance_fails_before_payout() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(0, 10, PRECISION / 2)]);
    let (hash, sig) = attest(&s, &claimant, &cp);

    let tampered = checkpoint(&s.env, &[(0, 10, PRECISION)]);
    let err = claim_err!(s, &claimant, &tampered, &hash, &sig);
    expect_err(err, ContractError::MismatchArgumentsAndHash);
    assert_eq!(s.token_balance(&claimant), 0);
    assert!(!s.client.is_hash_used(&hash));
}

#[test]
fn test_payload_is_bound_to_claimant() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let alice = Address::generate(&s.env);
    let bob = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(0, 10, PRECISION)]);
    let (hash, sig) = attest(&s, &alice, &cp);

    let err = claim_err!(s, &bob, &cp, &hash, &sig);
    expect_err(err, ContractError::MismatchArgumentsAndHash);
}

#[test]
fn test_bad_signature() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(0, 10, PRECISION)]);
    let (hash, _sig) = attest(&s, &claimant, &cp);
    let forged = BytesN::from_array(&s.env, &[0xAB; 64]);

    let err = claim_err!(s, &claimant, &cp, &hash, &forged);
    expect_err(err, ContractError::NotAnAdmin);
}

// ── Payload validation ────────────────────────────────────────────────────────

#[test]
fn test_malformed_payloads() {
    let s = setup();
    let env = &s.env;
    env.ledger().set_timestamp(100);
    let claimant = Address::generate(env);
    let hash = BytesN::from_array(env, &[0u8; 32]);
    let sig = BytesN::from_array(env, &[0u8; 64]);

    let empty = checkpoint(env, &[]);
    expect_err(
        claim_err!(s, &claimant, &empty, &hash, &sig),
        ContractError::EmptyCheckpoint,
    );

    let mut ragged = checkpoint(env, &[(0, 10, 1)]);
    ragged.balances = vec![env, 1, 1];
    expect_err(
        claim_err!(s, &claimant, &ragged, &hash, &sig),
        ContractError::InputLengthsMismatch,
    );

    let future = checkpoint(env, &[(0, 200, 1)]);
    expect_err(
        claim_err!(s, &claimant, &future, &hash, &sig),
        ContractError::InvalidCheckpointInterval,
    );

    let inverted = checkpoint(env, &[(50, 10, 1)]);
    expect_err(
        claim_err!(s, &claimant, &inverted, &hash, &sig),
        ContractError::InvalidCheckpointInterval,
    );

    let oversized = checkpoint(env, &[(0, 10, PRECISION + 1)]);
    expect_err(
        claim_err!(s, &claimant, &oversized, &hash, &sig),
        ContractError::InvalidCheckpointBalance,
    );
}

#[test]
fn test_checkpoint_cannot_overlap_live_stake() {
    let s = setup();
    let env = &s.env;
    let alice = s.holder_of(&[1]);
    env.ledger().set_timestamp(5);
    s.client
        .deposit(&alice, &s.pool_id, &nft_batch(env, &s.collection, &[1]), &0);
    env.ledger().set_timestamp(100);

    let overlapping = checkpoint(env, &[(0, 10, PRECISION)]);
    let (hash, sig) = attest(&s, &alice, &overlapping);
    expect_err(
        claim_err!(s, &alice, &overlapping, &hash, &sig),
        ContractError::CheckpointOverlapsLiveStake,
    );

    let before_join = checkpoint(env, &[(0, 5, PRECISION)]);
    let (hash, sig) = attest(&s, &alice, &before_join);
    let paid = s
        .client
        .claim_checkpoint(&alice, &s.pool_id, &before_join, &hash, &sig);
    assert_eq!(paid.tokens, TOKEN_RATE * 5);
}

#[test]
fn test_checkpoint_blocked_while_paused() {
    let s = setup();
    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(0, 10, PRECISION)]);
    let (hash, sig) = attest(&s, &claimant, &cp);
    s.client.pause(&s.admin);

    expect_err(
        claim_err!(s, &claimant, &cp, &hash, &sig),
        ContractError::Paused,
    );
}

// ── Real attestor ─────────────────────────────────────────────────────────────

fn deploy_attestor(s: &Setup, key: &SigningKey) -> Address {
    let id = s.env.register(AttestorContract, ());
    AttestorContractClient::new(&s.env, &id).initialize(
        &s.admin,
        &BytesN::from_array(&s.env, &key.verifying_key().to_bytes()),
    );
    s.client.set_attestor(&s.admin, &id);
    id
}

#[test]
fn test_ed25519_attested_checkpoint() {
    let s = setup();
    let key = SigningKey::from_bytes(&[5u8; 32]);
    let attestor = deploy_attestor(&s, &key);
    assert_eq!(s.client.get_attestor(), Some(attestor));

    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(20, 40, PRECISION)]);
    let digest = s.client.checkpoint_digest(&claimant, &s.pool_id, &cp);
    let sig = BytesN::from_array(&s.env, &key.sign(&digest.to_array()).to_bytes());

    let paid = s
        .client
        .claim_checkpoint(&claimant, &s.pool_id, &cp, &digest, &sig);
    assert_eq!(paid.tokens, TOKEN_RATE * 20);

    let err = claim_err!(s, &claimant, &cp, &digest, &sig);
    expect_err(err, ContractError::HashUsed);
}

#[test]
fn test_ed25519_wrong_signer() {
    let s = setup();
    deploy_attestor(&s, &SigningKey::from_bytes(&[5u8; 32]));
    let intruder = SigningKey::from_bytes(&[6u8; 32]);

    s.env.ledger().set_timestamp(100);
    let claimant = Address::generate(&s.env);
    let cp = checkpoint(&s.env, &[(0, 10, PRECISION)]);
    let digest = s.client.checkpoint_digest(&claimant, &s.pool_id, &cp);
    let sig = BytesN::from_array(&s.env, &intruder.sign(&digest.to_array()).to_bytes());

    let err = claim_err!(s, &claimant, &cp, &digest, &sig);
    expect_err(err, ContractError::NotAnAdmin);
    assert!(!s.client.is_hash_used(&digest));
}
