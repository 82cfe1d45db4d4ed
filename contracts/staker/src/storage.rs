use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, IntoVal, Symbol, TryFromVal, Val};

use crate::emission::Currency;

// ── Instance keys ────────────────────────────────────────────────────────────

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const INITIALIZED: Symbol = symbol_short!("INIT");
pub const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
pub const ATTESTOR: Symbol = symbol_short!("ATTESTOR");
pub const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
pub const IOU_COUNT: Symbol = symbol_short!("IOU_CNT");
pub const DEVELOPERS: Symbol = symbol_short!("DEVS");

// ── Keyed entries ────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Emissions(Currency),
    EmissionsLocked(Currency),
    TotalStrength(Currency),
    Pool(u32),
    PoolByAsset(Address),
    Booster(u32),
    Position(u32, Address),
    Iou(u64),
    IouHoldings(Address),
    Points(Address),
    PointSpender(Address),
}

/// Reads a persistent entry, refreshing its TTL when present.
pub fn read<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: TryFromVal<Env, Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    value
}

pub fn write<V>(env: &Env, key: &DataKey, value: &V)
where
    V: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn remove(env: &Env, key: &DataKey) {
    env.storage().persistent().remove(key);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Hands out the next id from an instance counter, starting at 1.
pub fn next_id_u32(env: &Env, counter: &Symbol) -> u32 {
    let next = env
        .storage()
        .instance()
        .get::<_, u32>(counter)
        .unwrap_or(0)
        .saturating_add(1);
    env.storage().instance().set(counter, &next);
    next
}

pub fn next_id_u64(env: &Env, counter: &Symbol) -> u64 {
    let next = env
        .storage()
        .instance()
        .get::<_, u64>(counter)
        .unwrap_or(0)
        .saturating_add(1);
    env.storage().instance().set(counter, &next);
    next
}
