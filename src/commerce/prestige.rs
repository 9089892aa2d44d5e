//! Prestige: trade lifetime earnings for prestige points and start over.

use super::catalog::PrestigeUpgradeKind;
use super::logic::{apply_prestige_effect, format_number};
use super::state::Game;

/// Lifetime earnings per prestige point.
pub const PRESTIGE_DIVISOR: f64 = 10_000.0;

/// Prestige points a reset would grant right now.
pub fn eligible_gain(state: &Game) -> u64 {
    if state.total_earned.is_nan() || state.total_earned <= 0.0 {
        return 0;
    }
    (state.total_earned / PRESTIGE_DIVISOR).floor() as u64
}

/// Reset the store for prestige points. Returns the points gained, or 0
/// without touching the state when nothing would be gained.
///
/// The new store keeps only the name, the points and the owned perks.
/// Perk bonuses are rebuilt by replaying every owned perk once, in catalog
/// order, on top of creation defaults. Running events are dropped.
pub fn perform_prestige(state: &mut Game) -> u64 {
    let gain = eligible_gain(state);
    if gain == 0 {
        return 0;
    }

    let mut next = Game::new(&state.store_name);
    next.prestige_points = state.prestige_points + gain;
    next.prestige_upgrades = state.prestige_upgrades.clone();
    replay_prestige_effects(&mut next);

    // Session-only data carries over
    next.log = std::mem::take(&mut state.log);
    next.event_history = std::mem::take(&mut state.event_history);
    next.rng_seed = state.rng_seed;

    next.add_log(
        &format!(
            "🔥 Prestige! +{} point(s) from {} coins earned",
            gain,
            format_number(state.total_earned)
        ),
        true,
    );
    *state = next;
    gain
}

/// Rebuild the permanent bonus fields from the owned perk set.
pub fn replay_prestige_effects(state: &mut Game) {
    state.prestige_bonus_profit = 0.0;
    state.prestige_bonus_employee = 0.0;
    state.prestige_cpc_flat = 0.0;
    for &kind in PrestigeUpgradeKind::all() {
        if state.owns_prestige(kind) {
            apply_prestige_effect(state, &kind.effect());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commerce::catalog::{EmployeeKind, EventKind, ShopUpgradeKind};
    use crate::commerce::events;
    use crate::commerce::state::Hire;

    fn veteran() -> Game {
        let mut state = Game::new("Old Shop");
        state.coins = 4_321.0;
        state.cpc = 5.0;
        state.cps = 12.0;
        state.sales = 900;
        state.total_earned = 25_000.0;
        state.products = vec![3, 2, 1];
        state.employees.push(Hire { kind: EmployeeKind::Manager, hired_at: 5.0 });
        state.shop_upgrades.push(ShopUpgradeKind::Automation);
        state.missions[0].done = true;
        state
    }

    #[test]
    fn gain_is_floor_of_earnings_over_divisor() {
        let mut state = Game::new("s");
        state.total_earned = 25_000.0;
        assert_eq!(eligible_gain(&state), 2);
        state.total_earned = 9_999.0;
        assert_eq!(eligible_gain(&state), 0);
        state.total_earned = 10_000.0;
        assert_eq!(eligible_gain(&state), 1);
    }

    #[test]
    fn gain_ignores_nan_earnings() {
        let mut state = Game::new("s");
        state.total_earned = f64::NAN;
        assert_eq!(eligible_gain(&state), 0);
    }

    #[test]
    fn prestige_below_threshold_is_noop() {
        let mut state = veteran();
        state.total_earned = 9_999.0;
        let before = state.clone();
        assert_eq!(perform_prestige(&mut state), 0);
        assert_eq!(state, before);
    }

    #[test]
    fn prestige_resets_progress() {
        let mut state = veteran();
        state.prestige_points = 1;
        assert_eq!(perform_prestige(&mut state), 2);
        assert_eq!(state.store_name, "Old Shop");
        assert_eq!(state.prestige_points, 3);
        assert_eq!(state.coins, 0.0);
        assert_eq!(state.cpc, 1.0);
        assert_eq!(state.cps, 0.0);
        assert_eq!(state.sales, 0);
        assert_eq!(state.total_earned, 0.0);
        assert_eq!(state.products, vec![0, 0, 0]);
        assert!(state.employees.is_empty());
        assert!(state.shop_upgrades.is_empty());
        assert!(state.missions.iter().all(|m| !m.done));
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn prestige_keeps_perks_and_replays_effects() {
        let mut state = veteran();
        state.prestige_upgrades = vec![PrestigeUpgradeKind::FlatClick, PrestigeUpgradeKind::Profit];
        // Stale derived values must not survive
        state.prestige_bonus_profit = 7.0;
        state.prestige_cpc_flat = 9.0;
        perform_prestige(&mut state);
        assert_eq!(
            state.prestige_upgrades,
            vec![PrestigeUpgradeKind::FlatClick, PrestigeUpgradeKind::Profit]
        );
        assert!((state.prestige_bonus_profit - 0.10).abs() < 1e-9);
        assert_eq!(state.prestige_bonus_employee, 0.0);
        assert_eq!(state.prestige_cpc_flat, 1.0);
    }

    #[test]
    fn prestige_drops_running_events() {
        let mut state = veteran();
        events::activate(&mut state, EventKind::DemandBoom);
        perform_prestige(&mut state);
        assert_eq!(state.event_cps_multiplier, 1.0);
        assert!(state.pending_event_ends.is_empty());
        assert_eq!(state.active_event, None);
        // History is display-only and survives
        assert_eq!(state.event_history.front(), Some(&EventKind::DemandBoom));
    }

    #[test]
    fn prestige_keeps_log_and_announces() {
        let mut state = veteran();
        state.add_log("before", false);
        perform_prestige(&mut state);
        assert_eq!(state.log[0].text, "before");
        assert!(state.log.last().is_some_and(|e| e.is_important));
    }
}
