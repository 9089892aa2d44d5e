//! Missions: condition checks and reward claims.
//!
//! Completion is never automatic. A met condition makes the mission
//! claimable and the player claims it.

use super::catalog::{MissionCondition, MissionKind, MissionReward};
use super::state::{Game, MissionProgress};

pub fn condition_met(state: &Game, condition: &MissionCondition) -> bool {
    match condition {
        MissionCondition::SalesAtLeast(n) => state.sales >= *n,
        MissionCondition::EmployeesAtLeast(n) => state.employees.len() >= *n,
        MissionCondition::TotalEarnedAtLeast(n) => state.total_earned >= *n,
        MissionCondition::StockAtLeast(n) => state.total_stock() >= *n,
    }
}

pub fn is_claimable(state: &Game, kind: MissionKind) -> bool {
    !state.mission_done(kind) && condition_met(state, &kind.condition())
}

/// Claimable missions in catalog order.
pub fn claimable_missions(state: &Game) -> Vec<MissionKind> {
    MissionKind::all()
        .iter()
        .copied()
        .filter(|&k| is_claimable(state, k))
        .collect()
}

/// Claim a mission's reward. The condition is not re-checked; only an
/// already-done mission is refused.
pub fn claim_mission(state: &mut Game, kind: MissionKind) -> bool {
    if state.mission_done(kind) {
        return false;
    }
    let reward = kind.reward();
    apply_reward(state, &reward);
    match state.missions.iter_mut().find(|m| m.kind == kind) {
        Some(progress) => progress.done = true,
        None => state.missions.push(MissionProgress { kind, done: true }),
    }
    state.add_log(
        &format!("🏆 Mission complete: {} ({})", kind.title(), reward.description()),
        true,
    );
    true
}

/// Claim every claimable mission. Returns how many were claimed.
pub fn claim_all_missions(state: &mut Game) -> usize {
    let ready = claimable_missions(state);
    for &kind in &ready {
        claim_mission(state, kind);
    }
    ready.len()
}

fn apply_reward(state: &mut Game, reward: &MissionReward) {
    state.coins += reward.coins;
    state.cpc += reward.cpc;
    state.cps += reward.cps;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commerce::catalog::EmployeeKind;
    use crate::commerce::state::Hire;

    #[test]
    fn nothing_claimable_on_new_game() {
        let state = Game::new("s");
        assert!(claimable_missions(&state).is_empty());
    }

    #[test]
    fn sales_mission_becomes_claimable() {
        let mut state = Game::new("s");
        state.sales = 9;
        assert!(!is_claimable(&state, MissionKind::FirstSales));
        state.sales = 10;
        assert!(is_claimable(&state, MissionKind::FirstSales));
    }

    #[test]
    fn claim_applies_reward_and_marks_done() {
        let mut state = Game::new("s");
        state.sales = 10;
        assert!(claim_mission(&mut state, MissionKind::FirstSales));
        assert_eq!(state.coins, 200.0);
        assert!(state.mission_done(MissionKind::FirstSales));
        assert!(!is_claimable(&state, MissionKind::FirstSales));
    }

    #[test]
    fn claim_twice_is_refused() {
        let mut state = Game::new("s");
        state.total_earned = 2_000.0;
        assert!(claim_mission(&mut state, MissionKind::Accumulator));
        assert!(!claim_mission(&mut state, MissionKind::Accumulator));
        assert_eq!(state.coins, 500.0);
        assert_eq!(state.cps, 1.0);
    }

    #[test]
    fn team_mission_rewards_cpc() {
        let mut state = Game::new("s");
        state.employees.push(Hire { kind: EmployeeKind::Attendant, hired_at: 0.0 });
        assert!(!is_claimable(&state, MissionKind::SmallTeam));
        state.employees.push(Hire { kind: EmployeeKind::Manager, hired_at: 0.0 });
        assert!(claim_mission(&mut state, MissionKind::SmallTeam));
        assert_eq!(state.cpc, 2.0);
    }

    #[test]
    fn stock_mission_counts_all_products() {
        let mut state = Game::new("s");
        state.products = vec![10, 5, 4];
        assert!(!is_claimable(&state, MissionKind::HealthyStock));
        state.products[2] = 5;
        assert!(is_claimable(&state, MissionKind::HealthyStock));
    }

    #[test]
    fn claim_restores_missing_progress_entry() {
        let mut state = Game::new("s");
        state.missions.clear();
        state.sales = 10;
        assert!(claim_mission(&mut state, MissionKind::FirstSales));
        assert_eq!(state.missions.len(), 1);
        assert!(state.mission_done(MissionKind::FirstSales));
    }

    #[test]
    fn claim_all_claims_every_ready_mission() {
        let mut state = Game::new("s");
        state.sales = 50;
        state.total_earned = 5_000.0;
        assert_eq!(claim_all_missions(&mut state), 2);
        assert_eq!(state.coins, 700.0);
        assert!(claimable_missions(&state).is_empty());
        assert_eq!(claim_all_missions(&mut state), 0);
    }
}
