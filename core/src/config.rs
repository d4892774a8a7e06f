use crate::{
    error::{SimError, SimResult},
    types::{DayNumber, ItemId, Money},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Menu catalog ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItemConfig {
    pub id: ItemId,
    pub display_name: String,
    /// Short tag the presentation layer maps to an icon.
    pub icon: String,
    pub base_price: Money,
    pub demand_weight: f64,
}

impl MenuItemConfig {
    fn new(id: &str, display_name: &str, icon: &str, base_price: Money, demand_weight: f64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            icon: icon.into(),
            base_price,
            demand_weight,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MenuCatalogFile {
    items: Vec<MenuItemConfig>,
}

// ── Game rules ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdvertisingConfig {
    pub cost: Money,
    pub popularity_boost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRules {
    pub starting_money: Money,
    pub starting_popularity: f64,
    pub max_days: DayNumber,
    pub open_hour: u32,
    pub close_hour: u32,
    /// Simulated hour at which the player may skip to closing.
    pub skip_unlock_hour: u32,
    pub minutes_per_tick: u32,
    /// Real-time pacing between ticks when driven by a wall clock.
    pub tick_interval_ms: u64,
    pub advertising: AdvertisingConfig,
    pub customer_log_capacity: usize,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            starting_money: 1000.0,
            starting_popularity: 50.0,
            max_days: 7,
            open_hour: 8,
            close_hour: 16,
            skip_unlock_hour: 9,
            minutes_per_tick: 10,
            tick_interval_ms: 1000,
            advertising: AdvertisingConfig {
                cost: 120.0,
                popularity_boost: 15.0,
            },
            customer_log_capacity: 25,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    pub menu: Vec<MenuItemConfig>,
    pub rules: GameRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            menu: vec![
                MenuItemConfig::new("burger", "Burger", "burger", 19.99, 1.2),
                MenuItemConfig::new("fries", "Fries", "fries", 2.99, 0.8),
                MenuItemConfig::new("pizza", "Pizza", "pizza", 14.99, 1.3),
                MenuItemConfig::new("chicken", "Chicken", "chicken", 12.99, 1.4),
                MenuItemConfig::new("hotdog", "Hotdog", "hotdog", 4.99, 1.0),
                MenuItemConfig::new("soda", "Soda", "soda", 1.99, 0.5),
            ],
            rules: GameRules::default(),
        }
    }
}

impl SimConfig {
    /// Load from the data/ directory.
    /// In tests, use SimConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let menu_path = format!("{data_dir}/menu/menu_catalog.json");
        let menu_content = std::fs::read_to_string(&menu_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {menu_path}: {e}"))?;
        let menu_file: MenuCatalogFile = serde_json::from_str(&menu_content)?;

        let rules_path = format!("{data_dir}/game/game_rules.json");
        let rules_content = std::fs::read_to_string(&rules_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {rules_path}: {e}"))?;
        let rules: GameRules = serde_json::from_str(&rules_content)?;

        let config = Self {
            menu: menu_file.items,
            rules,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a single JSON document holding both the menu and the rules.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.menu.is_empty() {
            return Err(config_error("menu must contain at least one item"));
        }

        let mut seen = HashSet::new();
        for item in &self.menu {
            if !seen.insert(item.id.as_str()) {
                return Err(config_error(format!("duplicate menu item id '{}'", item.id)));
            }
            if !(item.base_price.is_finite() && item.base_price > 0.0) {
                return Err(config_error(format!(
                    "base price of '{}' must be positive, got {}",
                    item.id, item.base_price
                )));
            }
            if !(item.demand_weight.is_finite() && item.demand_weight >= 0.0) {
                return Err(config_error(format!(
                    "demand weight of '{}' must be non-negative, got {}",
                    item.id, item.demand_weight
                )));
            }
        }

        let rules = &self.rules;
        if rules.max_days == 0 {
            return Err(config_error("max_days must be at least 1"));
        }
        if rules.close_hour <= rules.open_hour || rules.close_hour > 24 {
            return Err(config_error(format!(
                "trading window {}:00-{}:00 is empty or out of range",
                rules.open_hour, rules.close_hour
            )));
        }
        if !(1..=60).contains(&rules.minutes_per_tick) {
            return Err(config_error(format!(
                "minutes_per_tick must be within 1..=60, got {}",
                rules.minutes_per_tick
            )));
        }
        if !(0.0..=100.0).contains(&rules.starting_popularity) {
            return Err(config_error("starting_popularity must be within [0, 100]"));
        }
        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> SimError {
    SimError::Config { reason: reason.into() }
}
