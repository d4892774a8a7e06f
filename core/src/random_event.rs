//! Random event model — one-off shocks the player can trigger between days.
//!
//! A single roll picks one of four equal-width bands:
//!   [0.00, 0.25)  blogger visit     +80..=160 money, +3 popularity
//!   [0.25, 0.50)  viral bad review  -60..=140 money, -4 popularity
//!   [0.50, 0.75)  food festival     +8 popularity only
//!   [0.75, 1.00)  kitchen repair    -50..=120 money only

use crate::{rng::RandomSource, types::Money};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RandomEventKind {
    BloggerVisit,
    ViralBadReview,
    FoodFestival,
    KitchenRepair,
}

impl RandomEventKind {
    pub fn for_roll(roll: f64) -> Self {
        if roll < 0.25 {
            Self::BloggerVisit
        } else if roll < 0.5 {
            Self::ViralBadReview
        } else if roll < 0.75 {
            Self::FoodFestival
        } else {
            Self::KitchenRepair
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventOutcome {
    pub kind:             RandomEventKind,
    pub money_delta:      Money,
    /// Unclamped. The engine clamps when applying it.
    pub popularity_delta: f64,
}

impl EventOutcome {
    pub fn description(&self) -> String {
        match self.kind {
            RandomEventKind::BloggerVisit => format!(
                "Local blogger loved your place! +${:.0}, +{:.0}% popularity",
                self.money_delta, self.popularity_delta
            ),
            RandomEventKind::ViralBadReview => format!(
                "Bad review went viral... -${:.0}, {:.0}% popularity",
                -self.money_delta, self.popularity_delta
            ),
            RandomEventKind::FoodFestival => format!(
                "Food festival nearby! Popularity +{:.0}%",
                self.popularity_delta
            ),
            RandomEventKind::KitchenRepair => {
                format!("Kitchen repair needed. -${:.0}", -self.money_delta)
            }
        }
    }
}

pub fn roll_event(rng: &mut dyn RandomSource) -> EventOutcome {
    let kind = RandomEventKind::for_roll(rng.next_f64());
    let (money_delta, popularity_delta) = match kind {
        RandomEventKind::BloggerVisit   => (rng.int_inclusive(80, 160) as Money, 3.0),
        RandomEventKind::ViralBadReview => (-(rng.int_inclusive(60, 140) as Money), -4.0),
        RandomEventKind::FoodFestival   => (0.0, 8.0),
        RandomEventKind::KitchenRepair  => (-(rng.int_inclusive(50, 120) as Money), 0.0),
    };
    EventOutcome { kind, money_delta, popularity_delta }
}
