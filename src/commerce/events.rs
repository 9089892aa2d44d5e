//! Random store events: start effects, timed ends and the recent-event history.
//!
//! An event end is not a callback. Activation records `(event, due_tick)` in
//! `Game::pending_event_ends` and the tick engine drains due entries in
//! scheduling order. Overlapping booms stack multiplicatively until the first
//! one ends and resets the multiplier.

use super::catalog::{EventEffect, EventEnd, EventKind};
use super::state::{Game, PendingEventEnd, EVENT_HISTORY_CAP};
use super::tick::TICK_MS;

/// Whole ticks an event stays active, rounded up.
pub fn duration_ticks(kind: EventKind) -> u64 {
    kind.duration_ms().div_ceil(TICK_MS)
}

/// Start an event: apply its effect now and schedule its end.
pub fn activate(state: &mut Game, kind: EventKind) {
    apply_event_effect(state, &kind.start_effect());

    state.event_history.push_front(kind);
    state.event_history.truncate(EVENT_HISTORY_CAP);
    state.active_event = Some(kind);
    state.pending_event_ends.push(PendingEventEnd {
        event: kind,
        due_tick: state.ticks + duration_ticks(kind),
    });
    state.add_log(kind.text(), true);
}

fn apply_event_effect(state: &mut Game, effect: &EventEffect) {
    match effect {
        EventEffect::CpsMultiplier(m) => state.event_cps_multiplier *= m,
        EventEffect::Restock(units) => {
            for count in state.products.iter_mut() {
                *count += units;
            }
        }
        EventEffect::CoinTax(rate) => {
            let loss = (state.coins * rate).floor();
            state.coins = (state.coins - loss).max(0.0);
        }
    }
}

/// Apply every scheduled end whose tick has come. Returns how many ended.
pub fn expire_due(state: &mut Game) -> usize {
    let now = state.ticks;
    let (due, waiting): (Vec<PendingEventEnd>, Vec<PendingEventEnd>) = state
        .pending_event_ends
        .iter()
        .copied()
        .partition(|p| p.due_tick <= now);
    if due.is_empty() {
        return 0;
    }
    state.pending_event_ends = waiting;
    for end in &due {
        deactivate(state, end.event);
    }
    due.len()
}

/// End an event. Its schedule entry must already be removed.
pub fn deactivate(state: &mut Game, kind: EventKind) {
    match kind.end_effect() {
        EventEnd::ResetCpsMultiplier => state.event_cps_multiplier = 1.0,
        EventEnd::Nothing => {}
    }
    // The box shows the newest event still running, if any
    state.active_event = state.pending_event_ends.last().map(|p| p.event);
    if state.active_event.is_none() {
        state.add_log("  Event over", false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_in_ticks() {
        assert_eq!(duration_ticks(EventKind::DemandBoom), 12);
        assert_eq!(duration_ticks(EventKind::Supply), 5);
        assert_eq!(duration_ticks(EventKind::Tax), 5);
    }

    #[test]
    fn boom_multiplies_and_schedules_end() {
        let mut state = Game::new("s");
        state.ticks = 3;
        activate(&mut state, EventKind::DemandBoom);
        assert_eq!(state.event_cps_multiplier, 1.5);
        assert_eq!(state.active_event, Some(EventKind::DemandBoom));
        assert_eq!(
            state.pending_event_ends,
            vec![PendingEventEnd {
                event: EventKind::DemandBoom,
                due_tick: 15
            }]
        );
    }

    #[test]
    fn boom_reverts_when_due() {
        let mut state = Game::new("s");
        activate(&mut state, EventKind::DemandBoom);
        state.ticks = 11;
        assert_eq!(expire_due(&mut state), 0);
        assert_eq!(state.event_cps_multiplier, 1.5);
        state.ticks = 12;
        assert_eq!(expire_due(&mut state), 1);
        assert_eq!(state.event_cps_multiplier, 1.0);
        assert_eq!(state.active_event, None);
        assert!(state.pending_event_ends.is_empty());
    }

    #[test]
    fn overlapping_booms_stack_until_first_end() {
        let mut state = Game::new("s");
        activate(&mut state, EventKind::DemandBoom);
        state.ticks = 4;
        activate(&mut state, EventKind::DemandBoom);
        assert!((state.event_cps_multiplier - 2.25).abs() < 1e-9);

        // First boom ends at tick 12 and resets to 1 although the second runs
        state.ticks = 12;
        expire_due(&mut state);
        assert_eq!(state.event_cps_multiplier, 1.0);
        assert_eq!(state.active_event, Some(EventKind::DemandBoom));

        state.ticks = 16;
        expire_due(&mut state);
        assert_eq!(state.event_cps_multiplier, 1.0);
        assert_eq!(state.active_event, None);
    }

    #[test]
    fn supply_adds_stock_to_every_product() {
        let mut state = Game::new("s");
        state.products = vec![1, 0, 2];
        activate(&mut state, EventKind::Supply);
        assert_eq!(state.products, vec![6, 5, 7]);
    }

    #[test]
    fn tax_takes_floor_of_eight_percent() {
        let mut state = Game::new("s");
        state.coins = 1_010.0;
        activate(&mut state, EventKind::Tax);
        // floor(80.8) = 80
        assert_eq!(state.coins, 930.0);
    }

    #[test]
    fn tax_on_small_balance_takes_nothing() {
        let mut state = Game::new("s");
        state.coins = 12.0;
        activate(&mut state, EventKind::Tax);
        assert_eq!(state.coins, 12.0);
    }

    #[test]
    fn tax_end_is_noop() {
        let mut state = Game::new("s");
        state.coins = 100.0;
        activate(&mut state, EventKind::Tax);
        let coins = state.coins;
        state.ticks = 5;
        expire_due(&mut state);
        assert_eq!(state.coins, coins);
    }

    #[test]
    fn history_keeps_five_most_recent() {
        let mut state = Game::new("s");
        let sequence = [
            EventKind::Tax,
            EventKind::Supply,
            EventKind::Tax,
            EventKind::Supply,
            EventKind::Tax,
            EventKind::DemandBoom,
        ];
        for kind in sequence {
            activate(&mut state, kind);
        }
        assert_eq!(state.event_history.len(), EVENT_HISTORY_CAP);
        assert_eq!(state.event_history[0], EventKind::DemandBoom);
        // The first Tax was evicted
        assert_eq!(state.event_history[4], EventKind::Supply);
    }

    #[test]
    fn ends_drain_in_scheduling_order() {
        let mut state = Game::new("s");
        activate(&mut state, EventKind::Supply); // due 5
        activate(&mut state, EventKind::DemandBoom); // due 12
        activate(&mut state, EventKind::Tax); // due 5
        state.ticks = 5;
        assert_eq!(expire_due(&mut state), 2);
        assert_eq!(state.pending_event_ends.len(), 1);
        assert_eq!(state.active_event, Some(EventKind::DemandBoom));
        assert_eq!(state.event_cps_multiplier, 1.5);
    }
}
