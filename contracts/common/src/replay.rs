//! # Consumed-digest registry
//!
//! Single-use signed payloads are identified by the 32-byte digest the
//! signer attested. Once a payload has taken effect its digest is recorded
//! here permanently; there is no transition back.
//!
//! ```ignore
//! if replay::is_consumed(&env, &digest) {
//!     return Err(ContractError::HashUsed);
//! }
//! // ... verify, compute, pay
//! replay::consume(&env, &digest)?;
//! ```

use soroban_sdk::{contracttype, BytesN, Env};

use crate::{CommonError, TTL_EXTEND_TO, TTL_THRESHOLD};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum ReplayKey {
    Consumed(BytesN<32>),
}

pub fn is_consumed(env: &Env, digest: &BytesN<32>) -> bool {
    let key = ReplayKey::Consumed(digest.clone());
    let used = env
        .storage()
        .persistent()
        .get::<_, bool>(&key)
        .unwrap_or(false);
    if used {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    used
}

/// Marks `digest` as consumed.
///
/// # Errors
/// [`CommonError::AlreadyConsumed`] if the digest was recorded before.
pub fn consume(env: &Env, digest: &BytesN<32>) -> Result<(), CommonError> {
    if is_consumed(env, digest) {
        return Err(CommonError::AlreadyConsumed);
    }
    let key = ReplayKey::Consumed(digest.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(())
}
