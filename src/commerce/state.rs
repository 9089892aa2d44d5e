//! Idle Commerce game state definitions.

use std::collections::VecDeque;

use super::catalog::{
    EmployeeKind, EventKind, MissionKind, PrestigeUpgradeKind, ProductKind, ShopUpgradeKind,
};

/// Maximum number of log entries kept on screen.
pub const LOG_CAP: usize = 50;

/// Number of recent events remembered for display.
pub const EVENT_HISTORY_CAP: usize = 5;

/// Event RNG seed of `Game::new`. `new_game` mixes the clock into it.
const DEFAULT_RNG_SEED: u64 = 42;

/// One discrete hire. Duplicates by kind each sell independently.
#[derive(Clone, Debug, PartialEq)]
pub struct Hire {
    pub kind: EmployeeKind,
    /// Wall-clock milliseconds at hiring time.
    pub hired_at: f64,
}

/// Progress mirror of a catalog mission.
#[derive(Clone, Debug, PartialEq)]
pub struct MissionProgress {
    pub kind: MissionKind,
    pub done: bool,
}

/// A scheduled event end, drained by the tick engine once `due_tick` is reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingEventEnd {
    pub event: EventKind,
    pub due_tick: u64,
}

/// Log entry shown in the message panel.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of one store.
///
/// Fields above `event_history` are persisted by `save`; the rest only live
/// for the current browser session.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    /// Set once at creation.
    pub store_name: String,
    pub coins: f64,
    /// Base coins per manual action when nothing is in stock.
    pub cpc: f64,
    /// Displayed passive rate. Real income still flows through staff sales.
    pub cps: f64,
    pub sales: u64,
    pub total_earned: f64,
    /// Stock per product, indexed by `ProductKind::index()`.
    pub products: Vec<u32>,
    pub employees: Vec<Hire>,
    /// Append-only purchase log; repeatable ids appear once per purchase.
    pub shop_upgrades: Vec<ShopUpgradeKind>,
    pub prestige_points: u64,
    /// Owned perks, no duplicates. Survives prestige.
    pub prestige_upgrades: Vec<PrestigeUpgradeKind>,
    pub missions: Vec<MissionProgress>,
    /// 1.0 unless a demand boom is running.
    pub event_cps_multiplier: f64,
    pub prestige_bonus_profit: f64,
    pub prestige_bonus_employee: f64,
    pub prestige_cpc_flat: f64,
    /// Ticks elapsed since this store (or its last prestige) started.
    pub ticks: u64,
    /// Event ends not yet applied, in scheduling order.
    pub pending_event_ends: Vec<PendingEventEnd>,
    /// Event RNG state, advanced by every roll.
    pub rng_seed: u64,

    /// Most recent first.
    pub event_history: VecDeque<EventKind>,
    /// Event shown in the event box.
    pub active_event: Option<EventKind>,
    pub log: Vec<LogEntry>,
}

impl Game {
    /// Fresh store with creation defaults. Callers validate the name
    /// (see `new_game`).
    pub fn new(store_name: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            coins: 0.0,
            cpc: 1.0,
            cps: 0.0,
            sales: 0,
            total_earned: 0.0,
            products: vec![0; ProductKind::all().len()],
            employees: Vec::new(),
            shop_upgrades: Vec::new(),
            prestige_points: 0,
            prestige_upgrades: Vec::new(),
            missions: Self::create_missions(),
            event_cps_multiplier: 1.0,
            prestige_bonus_profit: 0.0,
            prestige_bonus_employee: 0.0,
            prestige_cpc_flat: 0.0,
            ticks: 0,
            pending_event_ends: Vec::new(),
            rng_seed: DEFAULT_RNG_SEED,
            event_history: VecDeque::new(),
            active_event: None,
            log: Vec::new(),
        }
    }

    /// Every catalog mission, not done.
    pub fn create_missions() -> Vec<MissionProgress> {
        MissionKind::all()
            .iter()
            .map(|&kind| MissionProgress { kind, done: false })
            .collect()
    }

    /// Coins granted by a manual action with nothing in stock.
    pub fn effective_cpc(&self) -> f64 {
        self.cpc + self.prestige_cpc_flat
    }

    /// Displayed passive rate including the event and staff bonuses.
    pub fn effective_cps(&self) -> f64 {
        self.cps * self.event_cps_multiplier * (1.0 + self.prestige_bonus_employee)
    }

    pub fn profit_multiplier(&self) -> f64 {
        1.0 + self.prestige_bonus_profit
    }

    /// Coins realized by selling one unit of `kind`.
    pub fn sale_value(&self, kind: ProductKind) -> f64 {
        kind.sell_price() * self.profit_multiplier()
    }

    pub fn stock(&self, kind: ProductKind) -> u32 {
        self.products.get(kind.index()).copied().unwrap_or(0)
    }

    pub fn total_stock(&self) -> u32 {
        self.products.iter().sum()
    }

    pub fn hires_of(&self, kind: EmployeeKind) -> usize {
        self.employees.iter().filter(|h| h.kind == kind).count()
    }

    pub fn shop_purchases_of(&self, kind: ShopUpgradeKind) -> usize {
        self.shop_upgrades.iter().filter(|&&k| k == kind).count()
    }

    pub fn owns_prestige(&self, kind: PrestigeUpgradeKind) -> bool {
        self.prestige_upgrades.contains(&kind)
    }

    pub fn mission_done(&self, kind: MissionKind) -> bool {
        self.missions.iter().any(|m| m.kind == kind && m.done)
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > LOG_CAP {
            self.log.remove(0);
        }
    }
}

/// Start a new store. A blank name is rejected. `now_ms` seeds the event
/// RNG so stores opened at different times roll different events.
pub fn new_game(name: &str, now_ms: f64) -> Option<Game> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let mut game = Game::new(name);
    game.rng_seed = DEFAULT_RNG_SEED ^ now_ms.max(0.0) as u64;
    game.add_log(&format!("Welcome to {}!", name), true);
    Some(game)
}
