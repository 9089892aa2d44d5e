//! Idle Commerce transactions: pure functions on the store state.
//!
//! Every operation either applies completely or returns `false` without
//! touching the state. Rejections never log; the caller decides what to say.

use super::catalog::{
    scaled_cost, EmployeeKind, PrestigeEffect, PrestigeUpgradeKind, ProductKind,
    ShopUpgradeKind, UpgradeEffect,
};
use super::state::{Game, Hire};

/// Credit one unit sold (manual or automated) for `gain` coins.
pub(super) fn record_sale(state: &mut Game, gain: f64) {
    state.coins += gain;
    state.total_earned += gain;
    state.sales += 1;
}

/// Remove one unit of `kind` from stock and credit its sale value.
/// Callers check stock first.
pub(super) fn sell_unit(state: &mut Game, kind: ProductKind) -> f64 {
    state.products[kind.index()] -= 1;
    let gain = state.sale_value(kind);
    record_sale(state, gain);
    gain
}

/// Buy one unit of stock at the product's buy price.
pub fn buy_product(state: &mut Game, kind: ProductKind) -> bool {
    let price = kind.buy_price();
    if state.coins < price {
        return false;
    }
    state.coins -= price;
    state.products[kind.index()] += 1;
    true
}

/// Sell one unit of stock. Returns false when out of stock.
pub fn sell_product(state: &mut Game, kind: ProductKind) -> bool {
    if state.stock(kind) == 0 {
        return false;
    }
    sell_unit(state, kind);
    true
}

/// Price of the next purchase of a shop upgrade.
pub fn shop_upgrade_cost(state: &Game, kind: ShopUpgradeKind) -> f64 {
    scaled_cost(kind.base_cost(), state.shop_purchases_of(kind))
}

/// A non-repeatable upgrade is blocked once bought.
pub fn shop_upgrade_owned(state: &Game, kind: ShopUpgradeKind) -> bool {
    !kind.repeatable() && state.shop_purchases_of(kind) > 0
}

/// Try to buy a shop upgrade. Returns true if successful.
pub fn buy_shop_upgrade(state: &mut Game, kind: ShopUpgradeKind) -> bool {
    if shop_upgrade_owned(state, kind) {
        return false;
    }
    let cost = shop_upgrade_cost(state, kind);
    if state.coins < cost {
        return false;
    }
    state.coins -= cost;
    apply_upgrade_effect(state, &kind.effect());
    state.shop_upgrades.push(kind);
    state.add_log(
        &format!("Bought {} ({})", kind.name(), kind.effect().description()),
        false,
    );
    true
}

fn apply_upgrade_effect(state: &mut Game, effect: &UpgradeEffect) {
    match effect {
        UpgradeEffect::AddCpc(amount) => state.cpc += amount,
        UpgradeEffect::AddCps(amount) => state.cps += amount,
    }
}

/// Price of the next hire of `kind`.
pub fn hire_cost(state: &Game, kind: EmployeeKind) -> f64 {
    scaled_cost(kind.base_cost(), state.hires_of(kind))
}

/// Try to hire one employee. `now_ms` stamps the hire record.
pub fn hire_employee(state: &mut Game, kind: EmployeeKind, now_ms: f64) -> bool {
    let cost = hire_cost(state, kind);
    if state.coins < cost {
        return false;
    }
    state.coins -= cost;
    state.employees.push(Hire {
        kind,
        hired_at: now_ms,
    });
    state.cps += kind.productivity();
    state.add_log(
        &format!("Hired {} (#{})", kind.name(), state.hires_of(kind)),
        false,
    );
    true
}

/// In-stock product with the highest margin. Ties go to catalog order.
pub fn best_margin_in_stock(state: &Game) -> Option<ProductKind> {
    let mut best: Option<ProductKind> = None;
    for &kind in ProductKind::all() {
        if state.stock(kind) == 0 {
            continue;
        }
        let better = best.map_or(true, |b| kind.margin() > b.margin());
        if better {
            best = Some(kind);
        }
    }
    best
}

/// Manual action: sell the best-margin unit in stock, or earn the
/// effective CPC when the shelves are empty. Returns the coins gained.
pub fn manual_sale(state: &mut Game) -> f64 {
    match best_margin_in_stock(state) {
        Some(kind) => sell_unit(state, kind),
        None => {
            let gain = state.effective_cpc();
            record_sale(state, gain);
            gain
        }
    }
}

/// Try to buy a prestige perk with prestige points. Each perk is bought once.
pub fn buy_prestige_upgrade(state: &mut Game, kind: PrestigeUpgradeKind) -> bool {
    if state.owns_prestige(kind) {
        return false;
    }
    if state.prestige_points < kind.cost() {
        return false;
    }
    state.prestige_points -= kind.cost();
    state.prestige_upgrades.push(kind);
    apply_prestige_effect(state, &kind.effect());
    state.add_log(&format!("👼 {} unlocked!", kind.name()), true);
    true
}

pub(super) fn apply_prestige_effect(state: &mut Game, effect: &PrestigeEffect) {
    match effect {
        PrestigeEffect::ProfitBonus(f) => state.prestige_bonus_profit += f,
        PrestigeEffect::EmployeeBonus(f) => state.prestige_bonus_employee += f,
        PrestigeEffect::FlatCpc(n) => state.prestige_cpc_flat += n,
    }
}

/// Format a coin amount with thousands separators (e.g. 1234567 → "1,234,567").
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let s = (n.floor() as u64).to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_product() -> impl Strategy<Value = ProductKind> {
        prop_oneof![
            Just(ProductKind::Burger),
            Just(ProductKind::Pizza),
            Just(ProductKind::Phone),
        ]
    }

    fn arb_repeatable_upgrade() -> impl Strategy<Value = ShopUpgradeKind> {
        prop_oneof![
            Just(ShopUpgradeKind::ClickBoost),
            Just(ShopUpgradeKind::CpsBoost),
        ]
    }

    fn arb_employee() -> impl Strategy<Value = EmployeeKind> {
        prop_oneof![
            Just(EmployeeKind::Attendant),
            Just(EmployeeKind::Salesperson),
            Just(EmployeeKind::Manager),
        ]
    }

    /// A random mix of transactions on a random starting state.
    #[derive(Clone, Debug)]
    enum Op {
        Buy(ProductKind),
        Sell(ProductKind),
        Manual,
        Hire(EmployeeKind),
        Upgrade(ShopUpgradeKind),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            arb_product().prop_map(Op::Buy),
            arb_product().prop_map(Op::Sell),
            Just(Op::Manual),
            arb_employee().prop_map(Op::Hire),
            arb_repeatable_upgrade().prop_map(Op::Upgrade),
            Just(Op::Upgrade(ShopUpgradeKind::Automation)),
        ]
    }

    proptest! {
        #[test]
        fn prop_buy_product_rejection_leaves_state_unchanged(
            kind in arb_product(),
            coins_q in 0u32..40,
        ) {
            let mut state = Game::new("s");
            // Always strictly below the buy price
            state.coins = kind.buy_price() * coins_q as f64 / 40.0;
            let before = state.clone();
            prop_assert!(!buy_product(&mut state, kind));
            prop_assert_eq!(state, before);
        }

        #[test]
        fn prop_shop_cost_is_geometric(
            kind in arb_repeatable_upgrade(),
            n in 1usize..12,
        ) {
            let mut state = Game::new("s");
            state.coins = 1e12;
            for i in 0..n {
                let before = state.coins;
                prop_assert!(buy_shop_upgrade(&mut state, kind));
                let expected = (kind.base_cost() * 1.25_f64.powi(i as i32)).ceil();
                prop_assert_eq!(before - state.coins, expected);
            }
        }

        #[test]
        fn prop_hire_cost_strictly_increases(
            kind in arb_employee(),
            count in 0usize..30,
        ) {
            let mut state = Game::new("s");
            for _ in 0..count {
                state.employees.push(Hire { kind, hired_at: 0.0 });
            }
            let before = hire_cost(&state, kind);
            state.employees.push(Hire { kind, hired_at: 0.0 });
            prop_assert!(hire_cost(&state, kind) > before);
        }

        #[test]
        fn prop_transactions_keep_balances_nonnegative(
            start_coins in 0u32..5_000,
            stock in proptest::collection::vec(0u32..10, 3),
            ops in proptest::collection::vec(arb_op(), 0..60),
        ) {
            let mut state = Game::new("s");
            state.coins = start_coins as f64;
            state.products = stock;
            for op in ops {
                match op {
                    Op::Buy(k) => { buy_product(&mut state, k); }
                    Op::Sell(k) => { sell_product(&mut state, k); }
                    Op::Manual => { manual_sale(&mut state); }
                    Op::Hire(k) => { hire_employee(&mut state, k, 0.0); }
                    Op::Upgrade(k) => { buy_shop_upgrade(&mut state, k); }
                }
                prop_assert!(state.coins >= 0.0, "coins went negative: {}", state.coins);
                prop_assert!(state.total_earned >= 0.0);
            }
        }

        #[test]
        fn prop_manual_sale_never_loses_money(
            stock in proptest::collection::vec(0u32..5, 3),
            bonus_q in 0u32..20,
        ) {
            let mut state = Game::new("s");
            state.products = stock;
            state.prestige_bonus_profit = bonus_q as f64 / 10.0;
            let before = state.coins;
            let gain = manual_sale(&mut state);
            prop_assert!(gain > 0.0);
            prop_assert!((state.coins - before - gain).abs() < 1e-9);
        }
    }
}
