//! Demand and spawn model.
//!
//! Turns popularity and pricing into:
//!   - a planned customer count for the day,
//!   - a per-tick spawn probability shaped by the time of day,
//!   - per-item demand weights used to pick what each customer orders.

use crate::{pricing::MenuItem, rng::RandomSource};

pub const MIN_PLANNED_CUSTOMERS: u32 = 6;
pub const MAX_PLANNED_CUSTOMERS: u32 = 40;

/// Ticks in an 8-hour trading window at 10 simulated minutes per tick.
pub const TICKS_PER_TRADING_DAY: f64 = 48.0;

pub const MIN_SPAWN_CHANCE: f64 = 0.05;
pub const MAX_SPAWN_CHANCE: f64 = 0.7;

/// Lunch rush runs from 12:00 up to (not including) 14:00.
pub fn is_lunch_hour(hour: u32) -> bool {
    (12..14).contains(&hour)
}

/// Early morning and late afternoon are slow.
pub fn is_quiet_hour(hour: u32) -> bool {
    hour < 10 || hour >= 15
}

pub fn planned_customers(popularity: f64, avg_price: f64, avg_base_price: f64) -> u32 {
    let mut base = 10.0 + popularity / 4.0;

    let price_ratio = if avg_base_price > 0.0 { avg_price / avg_base_price } else { 1.0 };
    if price_ratio > 1.2 {
        base *= 0.7;
    } else if price_ratio < 0.8 {
        base *= 1.2;
    }

    let clamped = base.clamp(MIN_PLANNED_CUSTOMERS as f64, MAX_PLANNED_CUSTOMERS as f64);
    clamped.round() as u32
}

pub fn spawn_chance(planned_customers: u32, hour: u32) -> f64 {
    let mut chance = planned_customers as f64 / TICKS_PER_TRADING_DAY;

    if is_lunch_hour(hour) {
        chance *= 1.7;
    } else if is_quiet_hour(hour) {
        chance *= 0.7;
    }

    chance.clamp(MIN_SPAWN_CHANCE, MAX_SPAWN_CHANCE)
}

/// Relative likelihood that a customer orders `item`. Never negative.
pub fn demand_weight(item: &MenuItem, popularity: f64) -> f64 {
    let price_factor = (1.5 - item.price_ratio()).clamp(0.2, 1.5);
    let pop_factor = 0.5 + popularity / 100.0;
    (item.demand_weight * price_factor * pop_factor).max(0.0)
}

/// Cumulative-weight roulette over the menu. Falls back to a uniform pick
/// when every weight is zero. Returns an index into `items`, or None for
/// an empty menu.
pub fn pick_item(items: &[MenuItem], popularity: f64, rng: &mut dyn RandomSource) -> Option<usize> {
    let weights: Vec<f64> = items.iter().map(|m| demand_weight(m, popularity)).collect();
    pick_weighted(&weights, rng)
}

pub fn pick_weighted(weights: &[f64], rng: &mut dyn RandomSource) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Some(rng.index_below(weights.len()));
    }

    let mut r = rng.next_f64() * total;
    for (i, w) in weights.iter().enumerate() {
        if r < *w {
            return Some(i);
        }
        r -= w;
    }
    // Float drift can leave r marginally above the last bucket.
    weights.iter().rposition(|w| *w > 0.0)
}
