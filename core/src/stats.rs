//! Day and game aggregation, end-of-game scoring and ranks.
//!
//! DayStats lives for one trading day. close_day() folds it into
//! GameTotals, which only a full reset clears.

use crate::types::{DayNumber, Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayStats {
    pub customers: u32,
    pub income:    Money,
    pub meals:     u32,
    pub good:      u32,
    pub bad:       u32,
    pub planned:   u32,
    pub spawned:   u32,
}

impl DayStats {
    pub fn open(planned: u32) -> Self {
        Self { planned, ..Self::default() }
    }

    pub fn remaining(&self) -> u32 {
        self.planned.saturating_sub(self.spawned)
    }

    pub fn record_sale(&mut self, quantity: u32, sale: Money, good: bool) {
        self.customers += 1;
        self.meals += quantity;
        self.income += sale;
        if good {
            self.good += 1;
        } else {
            self.bad += 1;
        }
    }

    /// Share of good reactions as a whole percent. 0 with no reactions.
    pub fn satisfaction_pct(&self) -> u32 {
        satisfaction_pct(self.good, self.bad)
    }
}

pub fn satisfaction_pct(good: u32, bad: u32) -> u32 {
    let total = good + bad;
    if total == 0 {
        return 0;
    }
    (good as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GameTotals {
    pub customers:        u32,
    pub income:           Money,
    pub meals:            u32,
    pub best_day_income:  Money,
    pub daily_income:     Vec<Money>,
    pub daily_popularity: Vec<f64>,
}

impl GameTotals {
    /// Customers and income are booked live as each sale happens.
    pub fn record_sale(&mut self, sale: Money) {
        self.customers += 1;
        self.income += sale;
    }

    /// Fold a finished day in. Meals and the per-day series are only
    /// booked here.
    pub fn fold_day(&mut self, day: &DayStats, closing_popularity: f64) {
        self.daily_income.push(day.income);
        self.daily_popularity.push(closing_popularity);
        self.best_day_income = self.best_day_income.max(day.income);
        self.meals += day.meals;
    }

    pub fn days_recorded(&self) -> usize {
        self.daily_income.len()
    }

    /// Mean closing popularity, or `current` when no day has closed yet.
    pub fn average_popularity(&self, current: f64) -> f64 {
        if self.daily_popularity.is_empty() {
            return current;
        }
        self.daily_popularity.iter().sum::<f64>() / self.daily_popularity.len() as f64
    }

    /// Last day's income relative to the first.
    ///
    /// Neutral (1.0) with fewer than two days, and also when the first
    /// day earned nothing, so the score never sees NaN or infinity.
    pub fn income_trend(&self) -> f64 {
        match (self.daily_income.first(), self.daily_income.last()) {
            (Some(first), Some(last)) if self.daily_income.len() > 1 => {
                if *first > 0.0 {
                    last / first
                } else {
                    1.0
                }
            }
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Rank {
    S,
    A,
    B,
    C,
}

impl Rank {
    pub fn from_score(score: u32) -> Self {
        if score >= 85 {
            Self::S
        } else if score >= 70 {
            Self::A
        } else if score >= 55 {
            Self::B
        } else {
            Self::C
        }
    }
}

/// Weighted end-of-game score in [0, 100], before rounding.
///   40% money, 25% average popularity, 20% meals, 15% income trend.
pub fn final_score(money: Money, avg_popularity: f64, total_meals: u32, income_trend: f64) -> f64 {
    let money_part = (money / 3000.0).clamp(0.0, 1.0) * 40.0;
    let popularity_part = (avg_popularity / 100.0).clamp(0.0, 1.0) * 25.0;
    let meals_part = (total_meals as f64 / 200.0).clamp(0.0, 1.0) * 20.0;
    let trend_part = income_trend.clamp(0.0, 2.0) / 2.0 * 15.0;
    money_part + popularity_part + meals_part + trend_part
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    pub day:              DayNumber,
    pub customers:        u32,
    pub planned:          u32,
    pub income:           Money,
    pub meals:            u32,
    pub satisfaction_pct: u32,
    pub popularity:       f64,
    pub skipped:          bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalSummary {
    pub money:            Money,
    pub total_customers:  u32,
    pub total_income:     Money,
    pub total_meals:      u32,
    pub avg_popularity:   f64,
    pub best_day_income:  Money,
    pub income_trend:     f64,
    pub daily_income:     Vec<Money>,
    pub daily_popularity: Vec<f64>,
    pub score:            u32,
    pub rank:             Rank,
}

impl FinalSummary {
    pub fn compute(money: Money, current_popularity: f64, totals: &GameTotals) -> Self {
        let avg_popularity = totals.average_popularity(current_popularity);
        let income_trend = totals.income_trend();
        let score = final_score(money, avg_popularity, totals.meals, income_trend).round() as u32;

        Self {
            money,
            total_customers: totals.customers,
            total_income: totals.income,
            total_meals: totals.meals,
            avg_popularity,
            best_day_income: totals.best_day_income,
            income_trend,
            daily_income: totals.daily_income.clone(),
            daily_popularity: totals.daily_popularity.clone(),
            score,
            rank: Rank::from_score(score),
        }
    }
}
