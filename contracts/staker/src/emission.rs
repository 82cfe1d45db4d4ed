//! Piecewise-constant emission schedules.
//!
//! A schedule is an ordered list of [`EmissionEvent`]s. The rate of an event
//! holds from its `effective_time` up to (exclusive) the next event's time;
//! the last event's rate holds forever. Before the first event nothing is
//! emitted.

use soroban_sdk::{contracttype, Env, Vec};

use crate::storage::{self, DataKey};
use crate::ContractError;

/// The two independent reward currencies.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Currency {
    Tokens,
    Points,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionEvent {
    pub effective_time: u64,
    pub rate_per_second: i128,
}

// ── Pure math ────────────────────────────────────────────────────────────────

/// Checks ordering and sign of a proposed schedule.
pub fn validate(events: &Vec<EmissionEvent>) -> Result<(), ContractError> {
    if events.is_empty() {
        return Err(ContractError::EmptySchedule);
    }
    let mut previous: Option<u64> = None;
    for event in events.iter() {
        if event.rate_per_second < 0 {
            return Err(ContractError::InvalidInput);
        }
        if let Some(prev) = previous {
            if event.effective_time < prev {
                return Err(ContractError::UnsortedSchedule);
            }
        }
        previous = Some(event.effective_time);
    }
    Ok(())
}

/// Integrates the schedule's rate over `[t0, t1)`.
///
/// Returns zero for an empty or inverted window and for any part of the
/// window that lies before the first event.
#[allow(clippy::arithmetic_side_effects)]
pub fn emitted_between(events: &Vec<EmissionEvent>, t0: u64, t1: u64) -> i128 {
    if t1 <= t0 {
        return 0;
    }
    let len = events.len();
    let mut total: i128 = 0;
    for i in 0..len {
        let event = events.get_unchecked(i);
        let segment_start = event.effective_time;
        let segment_end = if i + 1 < len {
            events.get_unchecked(i + 1).effective_time
        } else {
            u64::MAX
        };

        let from = segment_start.max(t0);
        let to = segment_end.min(t1);
        if to > from {
            let duration = (to - from) as i128;
            total = total.saturating_add(event.rate_per_second.saturating_mul(duration));
        }
        if segment_end >= t1 {
            break;
        }
    }
    total
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn schedule(env: &Env, currency: Currency) -> Vec<EmissionEvent> {
    storage::read(env, &DataKey::Emissions(currency)).unwrap_or(Vec::new(env))
}

pub fn store_schedule(env: &Env, currency: Currency, events: &Vec<EmissionEvent>) {
    storage::write(env, &DataKey::Emissions(currency), events);
}

pub fn is_locked(env: &Env, currency: Currency) -> bool {
    storage::read(env, &DataKey::EmissionsLocked(currency)).unwrap_or(false)
}

pub fn lock(env: &Env, currency: Currency) {
    storage::write(env, &DataKey::EmissionsLocked(currency), &true);
}

pub fn is_configured(env: &Env) -> bool {
    !schedule(env, Currency::Tokens).is_empty() && !schedule(env, Currency::Points).is_empty()
}
