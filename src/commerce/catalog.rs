//! Static catalog: products, staff, shop upgrades, prestige perks,
//! missions and random events.
//!
//! Every entry is an enum variant and every effect is plain data. The
//! engines in `logic`, `missions`, `events` and `prestige` interpret them.

/// Cost growth ratio per repeat purchase of the same shop upgrade or staff type.
pub const COST_GROWTH: f64 = 1.25;

/// Price of the next purchase after `times_purchased` earlier ones,
/// rounded up to a whole coin.
pub fn scaled_cost(base_cost: f64, times_purchased: usize) -> f64 {
    (base_cost * COST_GROWTH.powi(times_purchased as i32)).ceil()
}

// ── Products ────────────────────────────────────────────────────

/// Goods the store can stock and sell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductKind {
    Burger,
    Pizza,
    Phone,
}

impl ProductKind {
    /// All products in catalog order.
    pub fn all() -> &'static [ProductKind] {
        &[ProductKind::Burger, ProductKind::Pizza, ProductKind::Phone]
    }

    pub fn index(self) -> usize {
        match self {
            ProductKind::Burger => 0,
            ProductKind::Pizza => 1,
            ProductKind::Phone => 2,
        }
    }

    /// Stable id used in save blobs.
    pub fn id(self) -> u32 {
        self.index() as u32 + 1
    }

    pub fn from_id(id: u32) -> Option<ProductKind> {
        ProductKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            ProductKind::Burger => "Burger",
            ProductKind::Pizza => "Pizza",
            ProductKind::Phone => "Phone",
        }
    }

    pub fn buy_price(self) -> f64 {
        match self {
            ProductKind::Burger => 10.0,
            ProductKind::Pizza => 30.0,
            ProductKind::Phone => 300.0,
        }
    }

    pub fn sell_price(self) -> f64 {
        match self {
            ProductKind::Burger => 18.0,
            ProductKind::Pizza => 55.0,
            ProductKind::Phone => 550.0,
        }
    }

    /// Profit per unit; drives manual and automated sale priority.
    pub fn margin(self) -> f64 {
        self.sell_price() - self.buy_price()
    }
}

// ── Staff ───────────────────────────────────────────────────────

/// Hireable staff. Each hire sells on its own every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmployeeKind {
    Attendant,
    Salesperson,
    Manager,
}

impl EmployeeKind {
    pub fn all() -> &'static [EmployeeKind] {
        &[
            EmployeeKind::Attendant,
            EmployeeKind::Salesperson,
            EmployeeKind::Manager,
        ]
    }

    pub fn id(self) -> u32 {
        match self {
            EmployeeKind::Attendant => 1,
            EmployeeKind::Salesperson => 2,
            EmployeeKind::Manager => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<EmployeeKind> {
        EmployeeKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            EmployeeKind::Attendant => "Attendant",
            EmployeeKind::Salesperson => "Salesperson",
            EmployeeKind::Manager => "Manager",
        }
    }

    /// Cost of the first hire of this type.
    pub fn base_cost(self) -> f64 {
        match self {
            EmployeeKind::Attendant => 100.0,
            EmployeeKind::Salesperson => 350.0,
            EmployeeKind::Manager => 900.0,
        }
    }

    /// Units sold per second by one hire, before prestige bonuses.
    pub fn productivity(self) -> f64 {
        match self {
            EmployeeKind::Attendant => 1.0,
            EmployeeKind::Salesperson => 2.0,
            EmployeeKind::Manager => 4.0,
        }
    }
}

// ── Shop upgrades ───────────────────────────────────────────────

/// What a shop upgrade does when bought.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeEffect {
    AddCpc(f64),
    AddCps(f64),
}

impl UpgradeEffect {
    pub fn description(&self) -> String {
        match self {
            UpgradeEffect::AddCpc(n) => format!("+{} CPC", n),
            UpgradeEffect::AddCps(n) => format!("+{} CPS", n),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShopUpgradeKind {
    ClickBoost,
    CpsBoost,
    Automation,
}

impl ShopUpgradeKind {
    pub fn all() -> &'static [ShopUpgradeKind] {
        &[
            ShopUpgradeKind::ClickBoost,
            ShopUpgradeKind::CpsBoost,
            ShopUpgradeKind::Automation,
        ]
    }

    pub fn id(self) -> u32 {
        match self {
            ShopUpgradeKind::ClickBoost => 1,
            ShopUpgradeKind::CpsBoost => 2,
            ShopUpgradeKind::Automation => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<ShopUpgradeKind> {
        ShopUpgradeKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            ShopUpgradeKind::ClickBoost => "+1 CPC",
            ShopUpgradeKind::CpsBoost => "+2 CPS",
            ShopUpgradeKind::Automation => "Automation",
        }
    }

    pub fn base_cost(self) -> f64 {
        match self {
            ShopUpgradeKind::ClickBoost => 200.0,
            ShopUpgradeKind::CpsBoost => 500.0,
            ShopUpgradeKind::Automation => 1_200.0,
        }
    }

    pub fn effect(self) -> UpgradeEffect {
        match self {
            ShopUpgradeKind::ClickBoost => UpgradeEffect::AddCpc(1.0),
            ShopUpgradeKind::CpsBoost => UpgradeEffect::AddCps(2.0),
            ShopUpgradeKind::Automation => UpgradeEffect::AddCps(5.0),
        }
    }

    /// Repeatable upgrades can be bought again at a scaled price.
    /// The others are blocked once owned.
    pub fn repeatable(self) -> bool {
        match self {
            ShopUpgradeKind::ClickBoost | ShopUpgradeKind::CpsBoost => true,
            ShopUpgradeKind::Automation => false,
        }
    }
}

// ── Prestige perks ──────────────────────────────────────────────

/// Permanent bonus granted by a prestige perk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrestigeEffect {
    /// Additive fraction applied to every sale price.
    ProfitBonus(f64),
    /// Additive fraction applied to staff productivity.
    EmployeeBonus(f64),
    /// Flat coins added to each manual action without stock.
    FlatCpc(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrestigeUpgradeKind {
    Profit,
    StaffTraining,
    FlatClick,
}

impl PrestigeUpgradeKind {
    pub fn all() -> &'static [PrestigeUpgradeKind] {
        &[
            PrestigeUpgradeKind::Profit,
            PrestigeUpgradeKind::StaffTraining,
            PrestigeUpgradeKind::FlatClick,
        ]
    }

    pub fn id(self) -> u32 {
        match self {
            PrestigeUpgradeKind::Profit => 1,
            PrestigeUpgradeKind::StaffTraining => 2,
            PrestigeUpgradeKind::FlatClick => 3,
        }
    }

    pub fn from_id(id: u32) -> Option<PrestigeUpgradeKind> {
        PrestigeUpgradeKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrestigeUpgradeKind::Profit => "+10% profit (permanent)",
            PrestigeUpgradeKind::StaffTraining => "+10% staff productivity",
            PrestigeUpgradeKind::FlatClick => "+1 flat CPC",
        }
    }

    /// Price in prestige points.
    pub fn cost(self) -> u64 {
        match self {
            PrestigeUpgradeKind::Profit => 1,
            PrestigeUpgradeKind::StaffTraining => 2,
            PrestigeUpgradeKind::FlatClick => 3,
        }
    }

    pub fn effect(self) -> PrestigeEffect {
        match self {
            PrestigeUpgradeKind::Profit => PrestigeEffect::ProfitBonus(0.10),
            PrestigeUpgradeKind::StaffTraining => PrestigeEffect::EmployeeBonus(0.10),
            PrestigeUpgradeKind::FlatClick => PrestigeEffect::FlatCpc(1.0),
        }
    }
}

// ── Missions ────────────────────────────────────────────────────

/// Completion predicate of a mission.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MissionCondition {
    SalesAtLeast(u64),
    EmployeesAtLeast(usize),
    TotalEarnedAtLeast(f64),
    StockAtLeast(u32),
}

/// Reward applied on claim. Zero fields are left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct MissionReward {
    pub coins: f64,
    pub cpc: f64,
    pub cps: f64,
}

impl MissionReward {
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if self.coins > 0.0 {
            parts.push(format!("+{} coins", self.coins));
        }
        if self.cpc > 0.0 {
            parts.push(format!("+{} CPC", self.cpc));
        }
        if self.cps > 0.0 {
            parts.push(format!("+{} CPS", self.cps));
        }
        parts.join(", ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MissionKind {
    FirstSales,
    SmallTeam,
    Accumulator,
    HealthyStock,
}

impl MissionKind {
    pub fn all() -> &'static [MissionKind] {
        &[
            MissionKind::FirstSales,
            MissionKind::SmallTeam,
            MissionKind::Accumulator,
            MissionKind::HealthyStock,
        ]
    }

    pub fn id(self) -> u32 {
        match self {
            MissionKind::FirstSales => 1,
            MissionKind::SmallTeam => 2,
            MissionKind::Accumulator => 3,
            MissionKind::HealthyStock => 4,
        }
    }

    pub fn from_id(id: u32) -> Option<MissionKind> {
        MissionKind::all().iter().copied().find(|k| k.id() == id)
    }

    /// Old save blobs only carry the title.
    pub fn from_title(title: &str) -> Option<MissionKind> {
        MissionKind::all().iter().copied().find(|k| k.title() == title)
    }

    pub fn title(self) -> &'static str {
        match self {
            MissionKind::FirstSales => "First 10 sales",
            MissionKind::SmallTeam => "Small team",
            MissionKind::Accumulator => "Accumulator",
            MissionKind::HealthyStock => "Healthy stock",
        }
    }

    pub fn condition(self) -> MissionCondition {
        match self {
            MissionKind::FirstSales => MissionCondition::SalesAtLeast(10),
            MissionKind::SmallTeam => MissionCondition::EmployeesAtLeast(2),
            MissionKind::Accumulator => MissionCondition::TotalEarnedAtLeast(2_000.0),
            MissionKind::HealthyStock => MissionCondition::StockAtLeast(20),
        }
    }

    pub fn reward(self) -> MissionReward {
        match self {
            MissionKind::FirstSales => MissionReward {
                coins: 200.0,
                ..Default::default()
            },
            MissionKind::SmallTeam => MissionReward {
                cpc: 1.0,
                ..Default::default()
            },
            MissionKind::Accumulator => MissionReward {
                coins: 500.0,
                cps: 1.0,
                ..Default::default()
            },
            MissionKind::HealthyStock => MissionReward {
                coins: 400.0,
                ..Default::default()
            },
        }
    }
}

// ── Random events ───────────────────────────────────────────────

/// Immediate effect when an event starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventEffect {
    /// Multiply the event CPS multiplier.
    CpsMultiplier(f64),
    /// Add this many units of every product.
    Restock(u32),
    /// Lose this fraction of current coins, rounded down.
    CoinTax(f64),
}

/// What happens when an event's timer runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventEnd {
    ResetCpsMultiplier,
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    DemandBoom,
    Supply,
    Tax,
}

impl EventKind {
    pub fn all() -> &'static [EventKind] {
        &[EventKind::DemandBoom, EventKind::Supply, EventKind::Tax]
    }

    pub fn id(self) -> &'static str {
        match self {
            EventKind::DemandBoom => "boom",
            EventKind::Supply => "supply",
            EventKind::Tax => "tax",
        }
    }

    pub fn from_id(id: &str) -> Option<EventKind> {
        EventKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn text(self) -> &'static str {
        match self {
            EventKind::DemandBoom => "📈 Demand spike (x1.5 CPS for 12s)",
            EventKind::Supply => "🚚 Supplier delivery: +5 of every product",
            EventKind::Tax => "📉 Tax: lose 8% of your coins",
        }
    }

    /// How long the event stays active, in milliseconds.
    pub fn duration_ms(self) -> u64 {
        match self {
            EventKind::DemandBoom => 12_000,
            EventKind::Supply | EventKind::Tax => 5_000,
        }
    }

    pub fn start_effect(self) -> EventEffect {
        match self {
            EventKind::DemandBoom => EventEffect::CpsMultiplier(1.5),
            EventKind::Supply => EventEffect::Restock(5),
            EventKind::Tax => EventEffect::CoinTax(0.08),
        }
    }

    pub fn end_effect(self) -> EventEnd {
        match self {
            EventKind::DemandBoom => EventEnd::ResetCpsMultiplier,
            EventKind::Supply | EventKind::Tax => EventEnd::Nothing,
        }
    }
}
