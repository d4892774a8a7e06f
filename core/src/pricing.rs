//! Pricing model — the menu and its current prices.
//!
//! All price inputs are sanitized, never rejected:
//!   - set_price() with a non-positive or non-finite value resets the
//!     item to its base price.
//!   - adjust_price() floors the result at PRICE_FLOOR.

use crate::{
    config::MenuItemConfig,
    error::{SimError, SimResult},
    types::{ItemId, Money},
};
use serde::{Deserialize, Serialize};

/// No item may be priced below this.
pub const PRICE_FLOOR: Money = 0.5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id:            ItemId,
    pub display_name:  String,
    pub icon:          String,
    pub base_price:    Money,
    pub current_price: Money,
    pub demand_weight: f64,
}

impl MenuItem {
    pub fn from_config(config: &MenuItemConfig) -> Self {
        Self {
            id:            config.id.clone(),
            display_name:  config.display_name.clone(),
            icon:          config.icon.clone(),
            base_price:    config.base_price,
            current_price: config.base_price,
            demand_weight: config.demand_weight,
        }
    }

    /// current_price / base_price. 1.0 means "priced at base".
    pub fn price_ratio(&self) -> f64 {
        self.current_price / self.base_price
    }

    pub fn set_price(&mut self, value: Money) {
        self.current_price = if value.is_finite() && value > 0.0 {
            value.max(PRICE_FLOOR)
        } else {
            self.base_price
        };
    }

    pub fn adjust_price(&mut self, delta: Money) {
        let target = self.current_price + if delta.is_finite() { delta } else { 0.0 };
        self.current_price = target.max(PRICE_FLOOR);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn from_config(items: &[MenuItemConfig]) -> Self {
        Self {
            items: items.iter().map(MenuItem::from_config).collect(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, item_id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|m| m.id == item_id)
    }

    fn get_mut(&mut self, item_id: &str) -> SimResult<&mut MenuItem> {
        self.items
            .iter_mut()
            .find(|m| m.id == item_id)
            .ok_or_else(|| SimError::UnknownItem { item_id: item_id.to_string() })
    }

    /// Set one item's price. Returns the price actually applied.
    pub fn set_price(&mut self, item_id: &str, value: Money) -> SimResult<Money> {
        let item = self.get_mut(item_id)?;
        item.set_price(value);
        Ok(item.current_price)
    }

    /// Move one item's price by `delta`. Returns the price actually applied.
    pub fn adjust_price(&mut self, item_id: &str, delta: Money) -> SimResult<Money> {
        let item = self.get_mut(item_id)?;
        item.adjust_price(delta);
        Ok(item.current_price)
    }

    pub fn adjust_all(&mut self, delta: Money) {
        for item in &mut self.items {
            item.adjust_price(delta);
        }
    }

    pub fn reset_prices(&mut self) {
        for item in &mut self.items {
            item.current_price = item.base_price;
        }
    }

    /// Unweighted mean of current prices.
    pub fn average_price(&self) -> Money {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|m| m.current_price).sum::<Money>() / self.items.len() as f64
    }

    /// Unweighted mean of base prices. Constant for the life of the menu.
    pub fn average_base_price(&self) -> Money {
        if self.items.is_empty() {
            return 0.0;
        }
        self.items.iter().map(|m| m.base_price).sum::<Money>() / self.items.len() as f64
    }
}
