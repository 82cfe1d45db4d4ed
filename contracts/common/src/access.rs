use soroban_sdk::{contracttype, Address, Env};

use crate::{CommonError, TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Tier enum ────────────────────────────────────────────────────────────────

/// Administrative tiers, ordered by reach.
///
/// - `Operator`     – may pause and unpause user-facing operations.
/// - `Configurator` – may change emissions, pools, boosters, developer
///                    shares, point spenders and the attestor.
/// - `SuperAdmin`   – everything above, plus granting and revoking tiers.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    Operator = 1,
    Configurator = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        *self as u32
    }

    /// Returns true if this tier is at least as high as `min_tier`.
    pub fn covers(&self, min_tier: AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum AccessKey {
    Tier(Address),
}

fn tier_key(admin: &Address) -> AccessKey {
    AccessKey::Tier(admin.clone())
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn tier_of(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = tier_key(admin);
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    tier
}

/// Guard used at the top of privileged entry points.
///
/// The caller must already have passed `require_auth()`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: AdminTier) -> Result<(), CommonError> {
    match tier_of(env, caller) {
        Some(tier) if tier.covers(min_tier) => Ok(()),
        _ => Err(CommonError::AccessDenied),
    }
}

// ── Writes ───────────────────────────────────────────────────────────────────

/// Seeds the very first `SuperAdmin`. Only call from `initialize`.
pub fn bootstrap(env: &Env, admin: &Address) {
    write_tier(env, admin, AdminTier::SuperAdmin);
}

pub fn grant(
    env: &Env,
    caller: &Address,
    target: &Address,
    tier: AdminTier,
) -> Result<(), CommonError> {
    require_tier(env, caller, AdminTier::SuperAdmin)?;
    write_tier(env, target, tier);
    Ok(())
}

/// Removes `target` from the registry. A super admin cannot revoke itself,
/// which keeps at least one `SuperAdmin` reachable.
pub fn revoke(env: &Env, caller: &Address, target: &Address) -> Result<(), CommonError> {
    require_tier(env, caller, AdminTier::SuperAdmin)?;
    if caller == target {
        return Err(CommonError::InvalidInput);
    }
    env.storage().persistent().remove(&tier_key(target));
    Ok(())
}

fn write_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
