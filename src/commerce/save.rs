//! Save, load, export and import for Idle Commerce.
//!
//! ## Format
//!
//! One flat JSON object with camelCase keys. Version 1 blobs carry no
//! `version`, `ticks` or `pendingEventEnds` and store missions by title
//! only; they still load.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: bump whenever fields are added.
//! - `MIN_COMPATIBLE_VERSION`: bump only on breaking changes (a field changes
//!   meaning or disappears). Anything at or above it loads with missing
//!   fields filled from creation defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::{
    EmployeeKind, EventKind, MissionKind, PrestigeUpgradeKind, ProductKind, ShopUpgradeKind,
};
use super::state::{Game, Hire, PendingEventEnd};

/// Current save format version.
pub const SAVE_VERSION: u32 = 3;

/// Oldest version that still loads.
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Version assumed for blobs that predate the `version` field.
const LEGACY_VERSION: u32 = 1;

/// localStorage key. Unchanged since version 1.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "idle-commerce-save";

/// Ticks between autosaves. One tick per second.
pub const AUTOSAVE_INTERVAL: u64 = 10;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save has no store name")]
    MissingStoreName,
    #[error("save version {version} is too old (minimum {min})")]
    Incompatible { version: u32, min: u32 },
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default, rename_all = "camelCase")]
struct GameSave {
    version: u32,
    store_name: String,
    coins: f64,
    cpc: f64,
    cps: f64,
    sales: u64,
    total_earned: f64,
    /// Stock keyed by product id. Old blobs may hold `null`.
    products: BTreeMap<u32, Option<u32>>,
    employees: Vec<HireSave>,
    shop_upgrades: Vec<u32>,
    prestige_points: u64,
    prestige_upgrades: Vec<u32>,
    /// `None` when absent or not a list; rebuilt from the catalog.
    #[serde(deserialize_with = "missions_or_none")]
    missions: Option<Vec<MissionSave>>,
    #[serde(rename = "_eventCpsMul")]
    event_cps_multiplier: f64,
    prestige_bonus_profit: f64,
    prestige_bonus_employee: f64,
    prestige_cpc_flat: f64,
    ticks: u64,
    pending_event_ends: Vec<PendingEndSave>,
    rng_seed: u64,
}

/// Anything other than a list (`null`, `{}`, a number) means "no progress".
fn missions_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<MissionSave>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        list @ serde_json::Value::Array(_) => serde_json::from_value(list)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl Default for GameSave {
    fn default() -> Self {
        let mut save = extract_save(&Game::new(""));
        save.version = LEGACY_VERSION;
        save.missions = None;
        save
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct HireSave {
    id: u32,
    hired_at: f64,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default)]
struct MissionSave {
    id: Option<u32>,
    title: String,
    done: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct PendingEndSave {
    event: String,
    due_tick: u64,
}

fn extract_save(state: &Game) -> GameSave {
    GameSave {
        version: SAVE_VERSION,
        store_name: state.store_name.clone(),
        coins: state.coins,
        cpc: state.cpc,
        cps: state.cps,
        sales: state.sales,
        total_earned: state.total_earned,
        products: ProductKind::all()
            .iter()
            .map(|&k| (k.id(), Some(state.stock(k))))
            .collect(),
        employees: state
            .employees
            .iter()
            .map(|h| HireSave {
                id: h.kind.id(),
                hired_at: h.hired_at,
            })
            .collect(),
        shop_upgrades: state.shop_upgrades.iter().map(|k| k.id()).collect(),
        prestige_points: state.prestige_points,
        prestige_upgrades: state.prestige_upgrades.iter().map(|k| k.id()).collect(),
        missions: Some(
            state
                .missions
                .iter()
                .map(|m| MissionSave {
                    id: Some(m.kind.id()),
                    title: m.kind.title().to_string(),
                    done: m.done,
                })
                .collect(),
        ),
        event_cps_multiplier: state.event_cps_multiplier,
        prestige_bonus_profit: state.prestige_bonus_profit,
        prestige_bonus_employee: state.prestige_bonus_employee,
        prestige_cpc_flat: state.prestige_cpc_flat,
        ticks: state.ticks,
        pending_event_ends: state
            .pending_event_ends
            .iter()
            .map(|p| PendingEndSave {
                event: p.event.id().to_string(),
                due_tick: p.due_tick,
            })
            .collect(),
        rng_seed: state.rng_seed,
    }
}

/// NaN and negative balances load as zero.
fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

fn apply_save(save: GameSave) -> Result<Game, SaveError> {
    if save.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::Incompatible {
            version: save.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    let name = save.store_name.trim();
    if name.is_empty() {
        return Err(SaveError::MissingStoreName);
    }

    let mut state = Game::new(name);
    state.coins = non_negative(save.coins);
    state.cpc = save.cpc;
    state.cps = save.cps;
    state.sales = save.sales;
    state.total_earned = non_negative(save.total_earned);

    for &kind in ProductKind::all() {
        let count = save.products.get(&kind.id()).copied().flatten();
        state.products[kind.index()] = count.unwrap_or(0);
    }

    state.employees = save
        .employees
        .iter()
        .filter_map(|h| {
            Some(Hire {
                kind: EmployeeKind::from_id(h.id)?,
                hired_at: h.hired_at,
            })
        })
        .collect();
    state.shop_upgrades = save
        .shop_upgrades
        .iter()
        .filter_map(|&id| ShopUpgradeKind::from_id(id))
        .collect();

    state.prestige_points = save.prestige_points;
    for &id in &save.prestige_upgrades {
        let Some(kind) = PrestigeUpgradeKind::from_id(id) else {
            continue;
        };
        if !state.owns_prestige(kind) {
            state.prestige_upgrades.push(kind);
        }
    }

    // Every catalog mission is present; saved entries only flip `done`
    for saved in save.missions.iter().flatten() {
        let kind = saved
            .id
            .and_then(MissionKind::from_id)
            .or_else(|| MissionKind::from_title(&saved.title));
        if let Some(progress) = kind.and_then(|k| state.missions.iter_mut().find(|m| m.kind == k)) {
            progress.done |= saved.done;
        }
    }

    state.event_cps_multiplier = save.event_cps_multiplier;
    state.prestige_bonus_profit = save.prestige_bonus_profit;
    state.prestige_bonus_employee = save.prestige_bonus_employee;
    state.prestige_cpc_flat = save.prestige_cpc_flat;
    state.ticks = save.ticks;
    state.rng_seed = save.rng_seed;
    state.pending_event_ends = save
        .pending_event_ends
        .iter()
        .filter_map(|p| {
            Some(PendingEventEnd {
                event: EventKind::from_id(&p.event)?,
                due_tick: p.due_tick,
            })
        })
        .collect();
    state.active_event = state.pending_event_ends.last().map(|p| p.event);

    Ok(state)
}

pub fn to_json(state: &Game) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// Indented form used for exported files.
pub fn to_json_pretty(state: &Game) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(&extract_save(state))?)
}

/// Parse a save blob into a fresh state. Session-only data (log, event
/// history) starts empty.
pub fn from_json(json: &str) -> Result<Game, SaveError> {
    let save: GameSave = serde_json::from_str(json)?;
    apply_save(save)
}

/// Download name for an exported save, e.g. `idle-commerce-mega_mart.json`.
pub fn export_file_name(store_name: &str) -> String {
    let safe: String = store_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { '_' })
        .collect();
    let safe = if safe.is_empty() { "idle-commerce".to_string() } else { safe };
    format!("idle-commerce-{}.json", safe)
}

#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Write the state to localStorage. Failures only reach the console.
#[cfg(target_arch = "wasm32")]
pub fn save_game(state: &Game) {
    let json = match to_json(state) {
        Ok(j) => j,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Idle Commerce: could not serialize save: {e}").into(),
            );
            return;
        }
    };
    if let Some(storage) = get_storage() {
        if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
            web_sys::console::warn_1(
                &format!("Idle Commerce: could not write localStorage: {e:?}").into(),
            );
        }
    }
}

/// Read the stored save, if any. A blob that cannot load is discarded.
#[cfg(target_arch = "wasm32")]
pub fn load_game() -> Option<Game> {
    let storage = get_storage()?;
    let json = storage.get_item(STORAGE_KEY).ok()??;
    match from_json(&json) {
        Ok(state) => {
            web_sys::console::log_1(
                &format!("Idle Commerce: loaded save for {}", state.store_name).into(),
            );
            Some(state)
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("Idle Commerce: discarding save: {e}").into());
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn delete_save() {
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}

/// Offer the save as a JSON file download.
#[cfg(target_arch = "wasm32")]
pub fn download_export(state: &Game) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let json = to_json_pretty(state).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(&json));
    let blob = web_sys::Blob::new_with_str_sequence(&parts)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&export_file_name(&state.store_name));
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}

/// Ask the player to paste an exported save. `None` on cancel.
#[cfg(target_arch = "wasm32")]
pub fn prompt_import_text() -> Option<String> {
    let window = web_sys::window()?;
    window
        .prompt_with_message("Paste an exported Idle Commerce save:")
        .ok()?
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn busy_store() -> Game {
        let mut state = Game::new("Mega Mart");
        state.coins = 1_234.5;
        state.cpc = 3.0;
        state.cps = 11.0;
        state.sales = 321;
        state.total_earned = 45_678.25;
        state.products = vec![4, 0, 2];
        state.employees = vec![
            Hire { kind: EmployeeKind::Attendant, hired_at: 1_700_000_000_000.0 },
            Hire { kind: EmployeeKind::Manager, hired_at: 1_700_000_100_000.0 },
        ];
        state.shop_upgrades = vec![
            ShopUpgradeKind::ClickBoost,
            ShopUpgradeKind::ClickBoost,
            ShopUpgradeKind::Automation,
        ];
        state.prestige_points = 3;
        state.prestige_upgrades = vec![PrestigeUpgradeKind::StaffTraining];
        state.missions[1].done = true;
        state.event_cps_multiplier = 1.5;
        state.prestige_bonus_employee = 0.125;
        state.ticks = 77;
        state.rng_seed = 7;
        state.pending_event_ends = vec![PendingEventEnd {
            event: EventKind::DemandBoom,
            due_tick: 80,
        }];
        state.active_event = Some(EventKind::DemandBoom);
        state
    }

    #[test]
    fn roundtrip_restores_persisted_state() {
        let original = busy_store();
        let json = to_json(&original).unwrap();
        let restored = from_json(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn json_uses_legacy_key_names() {
        let json = to_json(&busy_store()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["storeName"], "Mega Mart");
        assert_eq!(value["_eventCpsMul"], 1.5);
        assert_eq!(value["products"]["3"], 2);
        assert_eq!(value["employees"][1]["id"], 3);
        assert_eq!(value["missions"][0]["title"], "First 10 sales");
        assert_eq!(value["pendingEventEnds"][0]["event"], "boom");
        assert_eq!(value["version"], SAVE_VERSION);
        assert_eq!(value["rngSeed"], 7);
    }

    #[test]
    fn event_seed_survives_reload() {
        let mut state = Game::new("S");
        state.rng_seed = 0xDEAD_BEEF;
        let restored = from_json(&to_json(&state).unwrap()).unwrap();
        assert_eq!(restored.rng_seed, 0xDEAD_BEEF);

        // Blobs without a seed fall back to the creation default
        let old = from_json(r#"{"storeName": "S"}"#).unwrap();
        assert_eq!(old.rng_seed, Game::new("S").rng_seed);
    }

    #[test]
    fn missing_fields_are_backfilled() {
        let mut value: serde_json::Value =
            serde_json::from_str(&to_json(&busy_store()).unwrap()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("missions");
        obj.remove("products");
        obj.remove("_eventCpsMul");
        let restored = from_json(&value.to_string()).unwrap();
        assert_eq!(restored.products, vec![0, 0, 0]);
        assert_eq!(restored.missions, Game::create_missions());
        assert_eq!(restored.event_cps_multiplier, 1.0);
    }

    #[test]
    fn first_version_blob_loads() {
        let json = r#"{
            "storeName": "Lojinha",
            "coins": 250.5, "cpc": 2, "cps": 3, "sales": 12, "totalEarned": 900,
            "products": {"1": 5, "2": null},
            "employees": [{"id": 1, "hiredAt": 1700000000000}, {"id": 9, "hiredAt": 0}],
            "shopUpgrades": [1, 7],
            "prestigePoints": 0,
            "prestigeUpgrades": [1, 1],
            "missions": [{"title": "Small team", "done": true}, {"title": "Gone", "done": true}],
            "_eventCpsMul": 1,
            "prestigeBonusProfit": 0.1, "prestigeBonusEmployee": 0, "prestigeCpcFlat": 0
        }"#;
        let state = from_json(json).unwrap();
        assert_eq!(state.store_name, "Lojinha");
        assert_eq!(state.products, vec![5, 0, 0]);
        assert_eq!(state.employees.len(), 1);
        assert_eq!(state.shop_upgrades, vec![ShopUpgradeKind::ClickBoost]);
        assert_eq!(state.prestige_upgrades, vec![PrestigeUpgradeKind::Profit]);
        assert!(state.mission_done(MissionKind::SmallTeam));
        assert_eq!(state.missions.iter().filter(|m| m.done).count(), 1);
        assert_eq!(state.ticks, 0);
        assert!(state.pending_event_ends.is_empty());
    }

    #[test]
    fn null_missions_rebuild_from_catalog() {
        let json = r#"{"storeName": "S", "missions": null}"#;
        let state = from_json(json).unwrap();
        assert_eq!(state.missions.len(), MissionKind::all().len());
        assert!(state.missions.iter().all(|m| !m.done));
    }

    #[test]
    fn non_list_missions_rebuild_from_catalog() {
        for missions in [r#"{}"#, r#"{"1": true}"#, "7", r#""done""#] {
            let json = format!(r#"{{"storeName": "S", "missions": {}}}"#, missions);
            let state = from_json(&json).unwrap();
            assert_eq!(state.missions, Game::create_missions(), "missions = {}", missions);
        }
    }

    #[test]
    fn mission_id_wins_over_title() {
        let json = r#"{"storeName": "S", "missions": [{"id": 4, "title": "Small team", "done": true}]}"#;
        let state = from_json(json).unwrap();
        assert!(state.mission_done(MissionKind::HealthyStock));
        assert!(!state.mission_done(MissionKind::SmallTeam));
    }

    #[test]
    fn negative_coins_clamp_to_zero() {
        let json = r#"{"storeName": "S", "coins": -50, "totalEarned": -1}"#;
        let state = from_json(json).unwrap();
        assert_eq!(state.coins, 0.0);
        assert_eq!(state.total_earned, 0.0);
    }

    #[test]
    fn unknown_pending_event_is_dropped() {
        let json = r#"{"storeName": "S", "ticks": 3,
            "pendingEventEnds": [{"event": "flood", "dueTick": 5}, {"event": "tax", "dueTick": 6}]}"#;
        let state = from_json(json).unwrap();
        assert_eq!(state.pending_event_ends.len(), 1);
        assert_eq!(state.active_event, Some(EventKind::Tax));
    }

    #[test]
    fn blank_store_name_rejected() {
        assert!(matches!(from_json(r#"{"coins": 5}"#), Err(SaveError::MissingStoreName)));
        assert!(matches!(
            from_json(r#"{"storeName": "   "}"#),
            Err(SaveError::MissingStoreName)
        ));
    }

    #[test]
    fn garbage_is_parse_error() {
        assert!(matches!(from_json("not json"), Err(SaveError::Parse(_))));
        assert!(matches!(from_json(r#"{"storeName": 5}"#), Err(SaveError::Parse(_))));
    }

    #[test]
    fn version_below_minimum_rejected() {
        let err = from_json(r#"{"storeName": "S", "version": 0}"#).unwrap_err();
        assert!(matches!(err, SaveError::Incompatible { version: 0, min: MIN_COMPATIBLE_VERSION }));
        assert!(err.to_string().contains("too old"));
    }

    #[test]
    fn export_name_is_sanitized() {
        assert_eq!(export_file_name("Mega Mart"), "idle-commerce-mega_mart.json");
        assert_eq!(export_file_name("Café #1"), "idle-commerce-caf___1.json");
        assert_eq!(export_file_name(""), "idle-commerce-idle-commerce.json");
    }

    #[test]
    fn pretty_export_loads_back() {
        let original = busy_store();
        let json = to_json_pretty(&original).unwrap();
        assert!(json.contains('\n'));
        assert_eq!(from_json(&json).unwrap(), original);
    }
}
