//! Idle Commerce: stock products, hire staff, sell, and prestige for
//! permanent bonuses.
//!
//! `CommerceGame` owns the one active `Game`. New game, continue, import and
//! prestige all replace it whole; nothing is merged into a running store.

pub mod actions;
pub mod catalog;
pub mod events;
pub mod logic;
pub mod missions;
pub mod prestige;
pub mod render;
pub mod save;
pub mod state;
pub mod tick;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{EmployeeKind, MissionKind, PrestigeUpgradeKind, ProductKind, ShopUpgradeKind};
use logic::format_number;
use state::Game;

/// Longest store name the start screen accepts.
pub const MAX_NAME_LEN: usize = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Shop,
    Products,
    Staff,
    Missions,
    Prestige,
    Info,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Home,
            Tab::Shop,
            Tab::Products,
            Tab::Staff,
            Tab::Missions,
            Tab::Prestige,
            Tab::Info,
        ]
    }

    pub fn index(self) -> usize {
        Tab::all().iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::all().get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Shop => "Shop",
            Tab::Products => "Products",
            Tab::Staff => "Staff",
            Tab::Missions => "Missions",
            Tab::Prestige => "Prestige",
            Tab::Info => "Info",
        }
    }

    pub fn next(self) -> Tab {
        let all = Tab::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn prev(self) -> Tab {
        let all = Tab::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// An action waiting for a yes/no answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirm {
    Prestige,
    Reset,
}

pub struct StartMenu {
    pub name_input: String,
    /// Store found in localStorage, offered as "continue".
    pub saved: Option<Game>,
    pub message: Option<String>,
}

pub struct Session {
    pub game: Game,
    pub tab: Tab,
    pub confirm: Option<Confirm>,
    /// Ticks since the last autosave.
    ticks_since_save: u64,
}

impl Session {
    fn new(game: Game) -> Self {
        Self {
            game,
            tab: Tab::Home,
            confirm: None,
            ticks_since_save: 0,
        }
    }
}

pub enum Screen {
    Start(StartMenu),
    Playing(Session),
}

/// Screen change requested by an input handler, applied once the handler
/// has released its borrow of the current screen.
enum Transition {
    Install(Game),
    ToStart(Option<String>),
    PromptImport,
}

pub struct CommerceGame {
    pub screen: Screen,
}

impl CommerceGame {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let saved = save::load_game();
        #[cfg(not(target_arch = "wasm32"))]
        let saved = None;

        Self::with_saved(saved)
    }

    pub fn with_saved(saved: Option<Game>) -> Self {
        Self {
            screen: Screen::Start(StartMenu {
                name_input: String::new(),
                saved,
                message: None,
            }),
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.screen {
            Screen::Playing(session) => Some(&session.game),
            Screen::Start(_) => None,
        }
    }

    /// Make `game` the active store and persist it.
    pub fn install(&mut self, game: Game) {
        #[cfg(target_arch = "wasm32")]
        save::save_game(&game);
        self.screen = Screen::Playing(Session::new(game));
    }

    /// Replace the active store with a pasted save blob. A bad blob leaves
    /// everything as it was and reports why.
    pub fn import_text(&mut self, text: &str) -> bool {
        match save::from_json(text) {
            Ok(mut game) => {
                game.add_log(&format!("Imported save for {}", game.store_name), true);
                self.install(game);
                true
            }
            Err(e) => {
                let message = format!("Import failed: {}", e);
                match &mut self.screen {
                    Screen::Start(menu) => menu.message = Some(message),
                    Screen::Playing(session) => session.game.add_log(&message, true),
                }
                false
            }
        }
    }

    /// Handle one input. `now_ms` is the wall clock used to stamp hires
    /// and seed new stores.
    /// Returns true if the input was consumed.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> bool {
        let (consumed, transition) = match &mut self.screen {
            Screen::Start(menu) => handle_start(menu, event, now_ms),
            Screen::Playing(session) => handle_playing(session, event, now_ms),
        };

        match transition {
            Some(Transition::Install(game)) => self.install(game),
            Some(Transition::ToStart(message)) => {
                self.screen = Screen::Start(StartMenu {
                    name_input: String::new(),
                    saved: None,
                    message,
                });
            }
            Some(Transition::PromptImport) => {
                #[cfg(target_arch = "wasm32")]
                if let Some(text) = save::prompt_import_text() {
                    self.import_text(&text);
                }
            }
            None => {
                #[cfg(target_arch = "wasm32")]
                if consumed {
                    if let Screen::Playing(session) = &self.screen {
                        save::save_game(&session.game);
                    }
                }
            }
        }
        consumed
    }

    /// Advance the active store. Autosaves every `AUTOSAVE_INTERVAL` ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        let Screen::Playing(session) = &mut self.screen else {
            return;
        };
        if delta_ticks == 0 {
            return;
        }
        tick::tick(&mut session.game, delta_ticks);
        session.ticks_since_save += delta_ticks as u64;
        if session.ticks_since_save >= save::AUTOSAVE_INTERVAL {
            session.ticks_since_save = 0;
            #[cfg(target_arch = "wasm32")]
            save::save_game(&session.game);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

// ── Start screen ───────────────────────────────────────────────

fn handle_start(
    menu: &mut StartMenu,
    event: &InputEvent,
    now_ms: f64,
) -> (bool, Option<Transition>) {
    match event {
        InputEvent::Key(c) if !c.is_control() => {
            if menu.name_input.chars().count() < MAX_NAME_LEN {
                menu.name_input.push(*c);
            }
            (true, None)
        }
        InputEvent::Backspace => (menu.name_input.pop().is_some(), None),
        InputEvent::Enter | InputEvent::Click(START_NEW) => {
            if menu.name_input.trim().is_empty() && menu.saved.is_some() {
                return (true, continue_saved(menu));
            }
            match state::new_game(&menu.name_input, now_ms) {
                Some(game) => (true, Some(Transition::Install(game))),
                None => {
                    menu.message = Some("Type a name for your store first.".to_string());
                    (true, None)
                }
            }
        }
        InputEvent::Click(CONTINUE_SAVE) => (true, continue_saved(menu)),
        InputEvent::Click(IMPORT_SAVE) => (true, Some(Transition::PromptImport)),
        _ => (false, None),
    }
}

fn continue_saved(menu: &mut StartMenu) -> Option<Transition> {
    match menu.saved.take() {
        Some(mut game) => {
            game.add_log(&format!("Welcome back to {}!", game.store_name), true);
            Some(Transition::Install(game))
        }
        None => {
            menu.message = Some("No saved store found.".to_string());
            None
        }
    }
}

// ── Playing ────────────────────────────────────────────────────

fn handle_playing(
    session: &mut Session,
    event: &InputEvent,
    now_ms: f64,
) -> (bool, Option<Transition>) {
    if let Some(pending) = session.confirm {
        return handle_confirm(session, pending, event);
    }

    match event {
        InputEvent::NextTab => {
            session.tab = session.tab.next();
            return (true, None);
        }
        InputEvent::PrevTab => {
            session.tab = session.tab.prev();
            return (true, None);
        }
        InputEvent::Key(' ') | InputEvent::Click(MANUAL_SALE) => {
            logic::manual_sale(&mut session.game);
            return (true, None);
        }
        InputEvent::Click(id) if (TAB_BASE..TAB_BASE + Tab::all().len() as u16).contains(id) => {
            if let Some(tab) = Tab::from_index((id - TAB_BASE) as usize) {
                session.tab = tab;
            }
            return (true, None);
        }
        _ => {}
    }

    match event {
        InputEvent::Key(c) => handle_tab_key(session, *c, now_ms),
        InputEvent::Click(id) => handle_click(session, *id, now_ms),
        _ => (false, None),
    }
}

fn handle_tab_key(session: &mut Session, key: char, now_ms: f64) -> (bool, Option<Transition>) {
    let game = &mut session.game;
    let digit = digit_index(key);
    let consumed = match (session.tab, key, digit) {
        (Tab::Shop, _, Some(i)) => buy_shop_upgrade_at(game, i),
        (Tab::Products, _, Some(i)) => buy_product_at(game, i),
        (Tab::Products, k, None) if SELL_KEYS.contains(&k) => {
            let index = SELL_KEYS.iter().position(|&s| s == k).unwrap_or(0);
            sell_product_at(game, index)
        }
        (Tab::Staff, _, Some(i)) => hire_at(game, i, now_ms),
        (Tab::Missions, 'a', _) => claim_all(game),
        (Tab::Missions, _, Some(i)) => claim_mission_at(game, i),
        (Tab::Prestige, 'p', _) => request_prestige(session),
        (Tab::Prestige, _, Some(i)) => buy_perk_at(game, i),
        (Tab::Info, 'x', _) => export(game),
        (Tab::Info, 'i', _) => return (true, Some(Transition::PromptImport)),
        (Tab::Info, 'r', _) => {
            session.confirm = Some(Confirm::Reset);
            true
        }
        _ => false,
    };
    (consumed, None)
}

fn handle_click(session: &mut Session, id: u16, now_ms: f64) -> (bool, Option<Transition>) {
    let game = &mut session.game;
    let consumed = match id {
        id if in_range(id, BUY_SHOP_UPGRADE_BASE, ShopUpgradeKind::all().len()) => {
            buy_shop_upgrade_at(game, (id - BUY_SHOP_UPGRADE_BASE) as usize)
        }
        id if in_range(id, BUY_PRODUCT_BASE, ProductKind::all().len()) => {
            buy_product_at(game, (id - BUY_PRODUCT_BASE) as usize)
        }
        id if in_range(id, SELL_PRODUCT_BASE, ProductKind::all().len()) => {
            sell_product_at(game, (id - SELL_PRODUCT_BASE) as usize)
        }
        id if in_range(id, HIRE_BASE, EmployeeKind::all().len()) => {
            hire_at(game, (id - HIRE_BASE) as usize, now_ms)
        }
        CLAIM_ALL_MISSIONS => claim_all(game),
        id if in_range(id, CLAIM_MISSION_BASE, MissionKind::all().len()) => {
            claim_mission_at(game, (id - CLAIM_MISSION_BASE) as usize)
        }
        id if in_range(id, BUY_PERK_BASE, PrestigeUpgradeKind::all().len()) => {
            buy_perk_at(game, (id - BUY_PERK_BASE) as usize)
        }
        PRESTIGE_RESET => request_prestige(session),
        EXPORT_SAVE => export(game),
        IMPORT_FROM_INFO => return (true, Some(Transition::PromptImport)),
        RESET_GAME => {
            session.confirm = Some(Confirm::Reset);
            true
        }
        _ => false,
    };
    (consumed, None)
}

fn handle_confirm(
    session: &mut Session,
    pending: Confirm,
    event: &InputEvent,
) -> (bool, Option<Transition>) {
    let accepted = match event {
        InputEvent::Key('y') | InputEvent::Click(CONFIRM_YES) => true,
        InputEvent::Key('n') | InputEvent::Cancel | InputEvent::Click(CONFIRM_NO) => false,
        // Everything else waits for an answer
        _ => return (true, None),
    };
    session.confirm = None;
    if !accepted {
        session.game.add_log("Cancelled.", false);
        return (true, None);
    }

    match pending {
        Confirm::Prestige => {
            if prestige::perform_prestige(&mut session.game) == 0 {
                reject(&mut session.game, &prestige_hint());
            }
            (true, None)
        }
        Confirm::Reset => {
            #[cfg(target_arch = "wasm32")]
            save::delete_save();
            (
                true,
                Some(Transition::ToStart(Some(
                    "Save deleted. Start a new store.".to_string(),
                ))),
            )
        }
    }
}

fn in_range(id: u16, base: u16, len: usize) -> bool {
    id >= base && id < base + len as u16
}

// ── Store actions with player-facing rejections ────────────────

fn reject(game: &mut Game, message: &str) {
    game.add_log(message, false);
}

fn buy_shop_upgrade_at(game: &mut Game, index: usize) -> bool {
    let Some(&kind) = ShopUpgradeKind::all().get(index) else {
        return false;
    };
    if logic::shop_upgrade_owned(game, kind) {
        reject(game, &format!("{} is already owned.", kind.name()));
    } else if !logic::buy_shop_upgrade(game, kind) {
        let cost = logic::shop_upgrade_cost(game, kind);
        reject(game, &format!("{} costs {} coins.", kind.name(), format_number(cost)));
    }
    true
}

fn buy_product_at(game: &mut Game, index: usize) -> bool {
    let Some(&kind) = ProductKind::all().get(index) else {
        return false;
    };
    if !logic::buy_product(game, kind) {
        reject(
            game,
            &format!("A {} costs {} coins.", kind.name(), format_number(kind.buy_price())),
        );
    }
    true
}

fn sell_product_at(game: &mut Game, index: usize) -> bool {
    let Some(&kind) = ProductKind::all().get(index) else {
        return false;
    };
    if !logic::sell_product(game, kind) {
        reject(game, &format!("No {} in stock.", kind.name()));
    }
    true
}

fn hire_at(game: &mut Game, index: usize, now_ms: f64) -> bool {
    let Some(&kind) = EmployeeKind::all().get(index) else {
        return false;
    };
    if !logic::hire_employee(game, kind, now_ms) {
        let cost = logic::hire_cost(game, kind);
        reject(
            game,
            &format!("{} costs {} coins to hire.", kind.name(), format_number(cost)),
        );
    }
    true
}

fn claim_mission_at(game: &mut Game, index: usize) -> bool {
    let Some(&kind) = MissionKind::all().get(index) else {
        return false;
    };
    if game.mission_done(kind) {
        reject(game, &format!("\"{}\" was already claimed.", kind.title()));
    } else if !missions::is_claimable(game, kind) {
        reject(game, &format!("\"{}\" is not complete yet.", kind.title()));
    } else {
        missions::claim_mission(game, kind);
    }
    true
}

fn claim_all(game: &mut Game) -> bool {
    if missions::claim_all_missions(game) == 0 {
        reject(game, "No missions ready to claim.");
    }
    true
}

fn buy_perk_at(game: &mut Game, index: usize) -> bool {
    let Some(&kind) = PrestigeUpgradeKind::all().get(index) else {
        return false;
    };
    if game.owns_prestige(kind) {
        reject(game, &format!("{} is already unlocked.", kind.name()));
    } else if !logic::buy_prestige_upgrade(game, kind) {
        reject(
            game,
            &format!("{} needs {} prestige point(s).", kind.name(), kind.cost()),
        );
    }
    true
}

fn prestige_hint() -> String {
    format!(
        "Earn more first: 1 prestige point per {} lifetime coins.",
        format_number(prestige::PRESTIGE_DIVISOR)
    )
}

fn request_prestige(session: &mut Session) -> bool {
    if prestige::eligible_gain(&session.game) == 0 {
        reject(&mut session.game, &prestige_hint());
    } else {
        session.confirm = Some(Confirm::Prestige);
    }
    true
}

fn export(game: &mut Game) -> bool {
    #[cfg(target_arch = "wasm32")]
    match save::download_export(game) {
        Ok(()) => game.add_log(
            &format!("Exported {}", save::export_file_name(&game.store_name)),
            false,
        ),
        Err(e) => {
            web_sys::console::warn_1(&e);
            game.add_log("Export failed.", true);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = game;
    true
}
