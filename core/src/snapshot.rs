//! Live read model of the simulation for the presentation layer.

use crate::{
    clock::DayPhase,
    types::{DayNumber, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatSnapshot {
    pub day:                DayNumber,
    pub max_days:           DayNumber,
    pub money:              Money,
    pub popularity:         f64,
    pub clock:              String,
    pub phase:              DayPhase,
    pub skip_available:     bool,
    pub average_price:      Money,
    pub customers_today:    u32,
    pub income_today:       Money,
    pub meals_today:        u32,
    pub satisfaction_pct:   u32,
    pub planned_customers:  u32,
    pub spawned_customers:  u32,
}
