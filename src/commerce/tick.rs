//! Once-per-second simulation step: event ends, random events, staff sales.

use super::catalog::{EventKind, ProductKind};
use super::events;
use super::logic::sell_unit;
use super::state::Game;

/// Milliseconds per tick.
pub const TICK_MS: u64 = 1_000;

/// Chance per tick that a random event starts.
pub const EVENT_CHANCE: f64 = 0.02;

// ── RNG (LCG) ───────────────────────────────────────────────

fn next_rng(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// Uniform value in [0, 1).
fn rng_unit(seed: &mut u64) -> f64 {
    *seed = next_rng(*seed);
    (*seed >> 11) as f64 / (1u64 << 53) as f64
}

fn rng_range(seed: &mut u64, max: u32) -> u32 {
    *seed = next_rng(*seed);
    ((*seed >> 33) % max as u64) as u32
}

/// Roll for this tick's random event.
pub fn roll_event(state: &mut Game) -> Option<EventKind> {
    if rng_unit(&mut state.rng_seed) >= EVENT_CHANCE {
        return None;
    }
    let all = EventKind::all();
    let idx = rng_range(&mut state.rng_seed, all.len() as u32) as usize;
    Some(all[idx])
}

/// Advance the store by `delta_ticks` whole ticks.
pub fn tick(state: &mut Game, delta_ticks: u32) {
    for _ in 0..delta_ticks {
        let event = roll_event(state);
        run_tick(state, event);
    }
}

/// One tick with a predetermined event roll.
pub fn run_tick(state: &mut Game, event: Option<EventKind>) {
    state.ticks += 1;
    events::expire_due(state);
    if let Some(kind) = event {
        events::activate(state, kind);
    }
    staff_sales(state);
}

/// In-stock products ranked by margin, best first. Ties keep catalog order.
pub fn ranked_in_stock(state: &Game) -> Vec<ProductKind> {
    let mut ranked: Vec<ProductKind> = ProductKind::all()
        .iter()
        .copied()
        .filter(|&k| state.stock(k) > 0)
        .collect();
    ranked.sort_by(|a, b| b.margin().total_cmp(&a.margin()));
    ranked
}

/// Every hire sells up to its productivity from the ranked shelf.
/// The ranking is computed once per tick; a product is skipped only when
/// it runs out. Returns units sold.
pub fn staff_sales(state: &mut Game) -> u32 {
    if state.employees.is_empty() {
        return 0;
    }
    let ranked = ranked_in_stock(state);
    if ranked.is_empty() {
        return 0;
    }
    let staff_bonus = 1.0 + state.prestige_bonus_employee;
    let mut cursor = 0;
    let mut sold = 0;

    for i in 0..state.employees.len() {
        let kind = state.employees[i].kind;
        let mut sells = (kind.productivity() * staff_bonus).floor() as u32;
        while sells > 0 {
            while cursor < ranked.len() && state.stock(ranked[cursor]) == 0 {
                cursor += 1;
            }
            let Some(&product) = ranked.get(cursor) else {
                return sold;
            };
            sell_unit(state, product);
            sells -= 1;
            sold += 1;
        }
    }
    sold
}
