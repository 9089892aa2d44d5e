//! Idle Commerce rendering.
//!
//! Layout: HUD + event box + tab bar + tab content, with the log on the
//! right when the screen is wide and at the bottom otherwise. Every `[x]`
//! hint is drawn through `push_clickable`, so taps work the same as keys.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::{
    EmployeeKind, MissionCondition, MissionKind, PrestigeUpgradeKind, ProductKind,
    ShopUpgradeKind,
};
use super::logic::{best_margin_in_stock, format_number, hire_cost, shop_upgrade_cost, shop_upgrade_owned};
use super::missions::{claimable_missions, is_claimable};
use super::prestige::{eligible_gain, PRESTIGE_DIVISOR};
use super::state::Game;
use super::{CommerceGame, Confirm, Screen, Session, StartMenu, Tab, MAX_NAME_LEN};

pub fn render(
    cg: &CommerceGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    match &cg.screen {
        Screen::Start(menu) => render_start(menu, f, area, click_state),
        Screen::Playing(session) => render_playing(session, f, area, click_state),
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn key_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn text_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(Color::DarkGray)))
}

fn heading(text: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// `[k] label` with the key highlighted when the action is available.
fn hint(key: &str, label: String, enabled: bool) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" [{}] ", key), key_style(enabled)),
        Span::styled(label, text_style(enabled)),
    ])
}

/// Draw a bordered list and register its clickable rows.
fn render_list(
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
    cl: ClickableList<'static>,
    title: String,
    color: Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, area.width.saturating_sub(2));
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

// ── Start screen ────────────────────────────────────────────────

fn render_start(
    menu: &StartMenu,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(""));
    cl.push(heading("  🏪 Idle Commerce", Color::Yellow));
    cl.push(dim("  Stock shelves, hire staff, grow your store."));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        format!("  Store name (max {}):", MAX_NAME_LEN),
        Style::default().fg(Color::White),
    )));
    cl.push(Line::from(vec![
        Span::styled("  > ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{}_", menu.name_input),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(""));

    let has_name = !menu.name_input.trim().is_empty();
    cl.push_clickable(
        hint("Enter", "Open a new store".to_string(), has_name),
        START_NEW,
    );
    if let Some(saved) = &menu.saved {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(
                    "  ▸ Continue {} ({} coins)",
                    saved.store_name,
                    format_number(saved.coins)
                ),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            CONTINUE_SAVE,
        );
    }
    cl.push_clickable(
        Line::from(Span::styled(
            "  ▸ Import a save",
            Style::default().fg(Color::Cyan),
        )),
        IMPORT_SAVE,
    );

    if let Some(message) = &menu.message {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(
            format!("  {}", message),
            Style::default().fg(Color::Red),
        )));
    }

    render_list(f, area, click_state, cl, " Idle Commerce ".to_string(), Color::Yellow);
}

// ── Playing ─────────────────────────────────────────────────────

fn render_playing(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let game = &session.game;
    let narrow = is_narrow_layout(area.width);

    let (main_area, side_log) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };
    let bottom_log_height = if side_log.is_some() { 0 } else { 6 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // HUD
            Constraint::Length(3), // event
            Constraint::Length(2), // tab bar
            Constraint::Min(5),    // content
            Constraint::Length(bottom_log_height),
        ])
        .split(main_area);

    render_hud(game, f, chunks[0], click_state);
    render_event(game, f, chunks[1]);
    render_tab_bar(session, f, chunks[2], narrow, click_state);

    match session.confirm {
        Some(confirm) => render_confirm(game, confirm, f, chunks[3], click_state),
        None => {
            let (cl, title, color) = match session.tab {
                Tab::Home => (build_home(game), " Overview ", Color::Green),
                Tab::Shop => (build_shop(game), " Shop upgrades ", Color::Magenta),
                Tab::Products => (build_products(game), " Products ", Color::Yellow),
                Tab::Staff => (build_staff(game), " Staff ", Color::Cyan),
                Tab::Missions => (build_missions(game), " Missions ", Color::Green),
                Tab::Prestige => (build_prestige(game), " Prestige ", Color::Red),
                Tab::Info => (build_info(), " Info ", Color::Blue),
            };
            render_list(f, chunks[3], click_state, cl, title.to_string(), color);
        }
    }

    match side_log {
        Some(log_area) => render_log(game, f, log_area),
        None => render_log(game, f, chunks[4]),
    }
}

fn render_hud(
    game: &Game,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled(
            format!(" 💰 {}", format_number(game.coins)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  ⭐ {}", game.prestige_points),
            Style::default().fg(Color::Magenta),
        ),
    ]));

    let boosted = game.event_cps_multiplier > 1.0;
    let cps_style = if boosted {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    cl.push(Line::from(vec![
        Span::styled(
            format!(" CPC {}", format_number(game.effective_cpc())),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("  CPS {:.1}", game.effective_cps()), cps_style),
        Span::styled(if boosted { " 📈" } else { "" }, cps_style),
    ]));

    let sale_label = match best_margin_in_stock(game) {
        Some(kind) => format!(
            "Sell a {} (+{})",
            kind.name(),
            format_number(game.sale_value(kind))
        ),
        None => format!("Sell by hand (+{})", format_number(game.effective_cpc())),
    };
    cl.push_clickable(hint("Space", sale_label, true), MANUAL_SALE);

    render_list(
        f,
        area,
        click_state,
        cl,
        format!(" 🏪 {} ", game.store_name),
        Color::Yellow,
    );
}

fn render_event(game: &Game, f: &mut Frame, area: Rect) {
    let line = match game.active_event {
        Some(event) => Line::from(Span::styled(
            format!(" {}", event.text()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        None => dim(" Business as usual."),
    };
    let border = if game.active_event.is_some() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Event "),
    );
    f.render_widget(widget, area);
}

fn tab_label(tab: Tab, game: &Game, narrow: bool) -> String {
    let ready = claimable_missions(game).len();
    match (tab, narrow) {
        (Tab::Missions, false) if ready > 0 => format!("Missions ({})", ready),
        (Tab::Missions, true) if ready > 0 => format!("🎯{}", ready),
        (_, false) => tab.label().to_string(),
        (Tab::Home, true) => "🏠".to_string(),
        (Tab::Shop, true) => "🛒".to_string(),
        (Tab::Products, true) => "📦".to_string(),
        (Tab::Staff, true) => "👥".to_string(),
        (Tab::Missions, true) => "🎯".to_string(),
        (Tab::Prestige, true) => "🔥".to_string(),
        (Tab::Info, true) => "📜".to_string(),
    }
}

fn render_tab_bar(
    session: &Session,
    f: &mut Frame,
    area: Rect,
    narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut bar = TabBar::new("│");
    for &tab in Tab::all() {
        let style = if tab == session.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        bar = bar.tab(
            tab_label(tab, &session.game, narrow),
            style,
            TAB_BASE + tab.index() as u16,
        );
    }
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let mut cs = click_state.borrow_mut();
    bar.block(block).render(f, area, &mut cs);
}

// ── Tabs ────────────────────────────────────────────────────────

fn build_home(game: &Game) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    cl.push(Line::from(format!(" Sales: {}", game.sales)));
    cl.push(Line::from(format!(
        " Earned this run: {}",
        format_number(game.total_earned)
    )));
    cl.push(Line::from(format!(
        " Stock: {} units   Staff: {}",
        game.total_stock(),
        game.employees.len()
    )));
    let ready = claimable_missions(game).len();
    if ready > 0 {
        cl.push(Line::from(Span::styled(
            format!(" 🎯 {} mission(s) ready to claim", ready),
            Style::default().fg(Color::Green),
        )));
    }
    if game.prestige_bonus_profit > 0.0 || game.prestige_bonus_employee > 0.0 {
        cl.push(Line::from(Span::styled(
            format!(
                " Perks: +{:.0}% profit, +{:.0}% staff",
                game.prestige_bonus_profit * 100.0,
                game.prestige_bonus_employee * 100.0
            ),
            Style::default().fg(Color::Magenta),
        )));
    }

    cl.push(Line::from(""));
    cl.push(heading(" Recent events", Color::Yellow));
    if game.event_history.is_empty() {
        cl.push(dim("   none yet"));
    }
    for event in &game.event_history {
        cl.push(dim(format!("   {}", event.text())));
    }

    cl.push(Line::from(""));
    cl.push(dim(" Tab / ← → to switch tabs"));
    cl
}

fn build_shop(game: &Game) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    for (i, &kind) in ShopUpgradeKind::all().iter().enumerate() {
        if shop_upgrade_owned(game, kind) {
            cl.push(dim(format!("  ✔  {} (owned)", kind.name())));
            continue;
        }
        let cost = shop_upgrade_cost(game, kind);
        let bought = game.shop_purchases_of(kind);
        let count = if bought > 0 {
            format!(" x{}", bought)
        } else {
            String::new()
        };
        cl.push_clickable(
            hint(
                &digit_key(i).to_string(),
                format!(
                    "{}{}  {} coins  {}",
                    kind.name(),
                    count,
                    format_number(cost),
                    kind.effect().description()
                ),
                game.coins >= cost,
            ),
            BUY_SHOP_UPGRADE_BASE + i as u16,
        );
    }
    cl
}

fn build_products(game: &Game) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    for (i, &kind) in ProductKind::all().iter().enumerate() {
        let stock = game.stock(kind);
        cl.push(Line::from(vec![
            Span::styled(
                format!(" {} ", kind.name()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("stock {}  margin {}", stock, format_number(kind.margin())),
                Style::default().fg(Color::Cyan),
            ),
        ]));
        cl.push_clickable(
            hint(
                &digit_key(i).to_string(),
                format!("Buy 1 for {}", format_number(kind.buy_price())),
                game.coins >= kind.buy_price(),
            ),
            BUY_PRODUCT_BASE + i as u16,
        );
        let sell_key = SELL_KEYS.get(i).map_or(String::new(), |k| k.to_string());
        cl.push_clickable(
            hint(
                &sell_key,
                format!("Sell 1 for {}", format_number(game.sale_value(kind))),
                stock > 0,
            ),
            SELL_PRODUCT_BASE + i as u16,
        );
    }
    cl
}

fn build_staff(game: &Game) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    let staff_bonus = 1.0 + game.prestige_bonus_employee;
    for (i, &kind) in EmployeeKind::all().iter().enumerate() {
        let cost = hire_cost(game, kind);
        cl.push_clickable(
            hint(
                &digit_key(i).to_string(),
                format!(
                    "Hire {} ({})  {} coins  {}/s each",
                    kind.name(),
                    game.hires_of(kind),
                    format_number(cost),
                    kind.productivity() * staff_bonus
                ),
                game.coins >= cost,
            ),
            HIRE_BASE + i as u16,
        );
    }
    cl.push(Line::from(""));
    if game.employees.is_empty() {
        cl.push(dim(" Nobody on the floor yet. Staff sell stock for you."));
    } else {
        cl.push(Line::from(Span::styled(
            format!(
                " {} staff selling up to {:.1} units/s",
                game.employees.len(),
                game.effective_cps()
            ),
            Style::default().fg(Color::Green),
        )));
        if game.total_stock() == 0 {
            cl.push(Line::from(Span::styled(
                " Shelves are empty: staff have nothing to sell!",
                Style::default().fg(Color::Red),
            )));
        }
    }
    cl
}

fn condition_text(game: &Game, condition: MissionCondition) -> String {
    match condition {
        MissionCondition::SalesAtLeast(n) => {
            format!("{} sales ({}/{})", n, game.sales.min(n), n)
        }
        MissionCondition::EmployeesAtLeast(n) => {
            format!("{} staff ({}/{})", n, game.employees.len().min(n), n)
        }
        MissionCondition::TotalEarnedAtLeast(x) => format!(
            "earn {} ({}/{})",
            format_number(x),
            format_number(game.total_earned.min(x)),
            format_number(x)
        ),
        MissionCondition::StockAtLeast(n) => {
            format!("{} in stock ({}/{})", n, game.total_stock().min(n), n)
        }
    }
}

fn build_missions(game: &Game) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    for (i, &kind) in MissionKind::all().iter().enumerate() {
        let reward = kind.reward().description();
        if game.mission_done(kind) {
            cl.push(dim(format!("  ✔  {} ({})", kind.title(), reward)));
            continue;
        }
        let ready = is_claimable(game, kind);
        let mut line = hint(
            &digit_key(i).to_string(),
            format!("{}: {}", kind.title(), condition_text(game, kind.condition())),
            ready,
        );
        line.spans.push(Span::styled(
            format!(" → {}", reward),
            Style::default().fg(if ready { Color::Green } else { Color::DarkGray }),
        ));
        cl.push_clickable(line, CLAIM_MISSION_BASE + i as u16);
    }
    cl.push(Line::from(""));
    let ready = claimable_missions(game).len();
    cl.push_clickable(
        hint("a", format!("Claim all ready ({})", ready), ready > 0),
        CLAIM_ALL_MISSIONS,
    );
    cl
}

fn build_prestige(game: &Game) -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    let gain = eligible_gain(game);
    cl.push(Line::from(format!(
        " Points: {}   Earned this run: {}",
        game.prestige_points,
        format_number(game.total_earned)
    )));
    cl.push(dim(format!(
        " 1 point per {} coins earned. Resets coins, stock, staff and upgrades.",
        format_number(PRESTIGE_DIVISOR)
    )));
    cl.push_clickable(
        hint("p", format!("Prestige now (+{} points)", gain), gain > 0),
        PRESTIGE_RESET,
    );

    cl.push(Line::from(""));
    cl.push(heading(" Permanent perks", Color::Magenta));
    for (i, &kind) in PrestigeUpgradeKind::all().iter().enumerate() {
        if game.owns_prestige(kind) {
            cl.push(dim(format!("  ✔  {}", kind.name())));
            continue;
        }
        cl.push_clickable(
            hint(
                &digit_key(i).to_string(),
                format!("{}  {} pt", kind.name(), kind.cost()),
                game.prestige_points >= kind.cost(),
            ),
            BUY_PERK_BASE + i as u16,
        );
    }
    cl
}

fn build_info() -> ClickableList<'static> {
    let mut cl = ClickableList::new();
    cl.push(heading(" How to play", Color::Blue));
    cl.push(Line::from(" Space sells your best stock, or earns CPC with empty shelves."));
    cl.push(Line::from(" Buy stock cheap, sell dear. Staff sell automatically each second."));
    cl.push(Line::from(" Random events can boost demand, restock you, or tax you."));
    cl.push(Line::from(""));
    cl.push(heading(" Save data", Color::Blue));
    cl.push(dim(" Saved automatically in this browser."));
    cl.push_clickable(hint("x", "Export save file".to_string(), true), EXPORT_SAVE);
    cl.push_clickable(hint("i", "Import save".to_string(), true), IMPORT_FROM_INFO);
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" [r] ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Delete save and start over", Style::default().fg(Color::Red)),
        ]),
        RESET_GAME,
    );
    cl
}

fn render_confirm(
    game: &Game,
    confirm: Confirm,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    match confirm {
        Confirm::Prestige => {
            cl.push(heading(
                format!(" Prestige for +{} point(s)?", eligible_gain(game)),
                Color::Yellow,
            ));
            cl.push(dim(" Coins, stock, staff, upgrades and missions reset."));
            cl.push(dim(" Points and perks are kept."));
        }
        Confirm::Reset => {
            cl.push(heading(" Delete this store for good?", Color::Red));
            cl.push(dim(" The saved game is removed. Export first to keep a copy."));
        }
    }
    cl.push(Line::from(""));
    cl.push_clickable(hint("y", "Yes".to_string(), true), CONFIRM_YES);
    cl.push_clickable(hint("n", "No".to_string(), true), CONFIRM_NO);
    render_list(f, area, click_state, cl, " Confirm ".to_string(), Color::Red);
}

fn render_log(game: &Game, f: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest first
    let log_lines: Vec<Line> = game
        .log
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, entry)| {
            let style = match (entry.is_important, i < 3) {
                (true, true) => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::Yellow),
                (false, true) => Style::default().fg(Color::White),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            Line::from(Span::styled(entry.text.as_str(), style))
        })
        .collect();

    let widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use ratzilla::ratatui::backend::TestBackend;
    use ratzilla::ratatui::Terminal;

    fn draw(cg: &CommerceGame, width: u16, height: u16) -> (String, Rc<RefCell<ClickState>>) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let cs = Rc::new(RefCell::new(ClickState::new()));
        terminal
            .draw(|f| {
                let area = f.area();
                render(cg, f, area, &cs);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        (text, cs)
    }

    fn playing() -> CommerceGame {
        let mut cg = CommerceGame::with_saved(None);
        let mut game = Game::new("Corner Shop");
        game.coins = 1_000.0;
        cg.install(game);
        cg
    }

    fn has_target(cs: &Rc<RefCell<ClickState>>, action: u16) -> bool {
        cs.borrow().targets.iter().any(|t| t.action_id == action)
    }

    #[test]
    fn start_screen_registers_new_and_import() {
        let cg = CommerceGame::with_saved(Some(Game::new("Old Shop")));
        let (text, cs) = draw(&cg, 80, 30);
        assert!(text.contains("Idle Commerce"));
        assert!(text.contains("Old Shop"));
        assert!(has_target(&cs, START_NEW));
        assert!(has_target(&cs, CONTINUE_SAVE));
        assert!(has_target(&cs, IMPORT_SAVE));
    }

    #[test]
    fn playing_screen_shows_hud_and_tabs() {
        let cg = playing();
        let (text, cs) = draw(&cg, 100, 40);
        assert!(text.contains("Corner Shop"));
        assert!(text.contains("1,000"));
        assert!(has_target(&cs, MANUAL_SALE));
        for &tab in Tab::all() {
            assert!(has_target(&cs, TAB_BASE + tab.index() as u16));
        }
    }

    #[test]
    fn every_tab_renders_on_narrow_screen() {
        let mut cg = playing();
        for _ in Tab::all() {
            cg.handle_input(&InputEvent::NextTab, 0.0);
            let (_, cs) = draw(&cg, 40, 50);
            assert!(has_target(&cs, MANUAL_SALE));
        }
    }

    #[test]
    fn products_tab_targets_buy_and_sell() {
        let mut cg = playing();
        cg.handle_input(&InputEvent::Click(TAB_BASE + Tab::Products.index() as u16), 0.0);
        let (_, cs) = draw(&cg, 100, 40);
        for i in 0..ProductKind::all().len() as u16 {
            assert!(has_target(&cs, BUY_PRODUCT_BASE + i));
            assert!(has_target(&cs, SELL_PRODUCT_BASE + i));
        }
    }

    #[test]
    fn confirm_prompt_replaces_tab_content() {
        let mut cg = playing();
        if let Screen::Playing(s) = &mut cg.screen {
            s.confirm = Some(Confirm::Reset);
        }
        let (text, cs) = draw(&cg, 100, 40);
        assert!(text.contains("Delete this store"));
        assert!(has_target(&cs, CONFIRM_YES));
        assert!(has_target(&cs, CONFIRM_NO));
    }
}
