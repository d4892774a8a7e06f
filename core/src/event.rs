//! Everything the engine tells the outside world.
//!
//! RULE: The engine never calls into a UI. Each command and tick
//! returns the events it produced, in order; a Presenter consumes them.

use crate::{
    random_event::EventOutcome,
    reaction::Reaction,
    snapshot::StatSnapshot,
    stats::{DaySummary, FinalSummary},
    types::{DayNumber, ItemId, Money},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Day flow ───────────────────────────────────
    DayOpened {
        day:     DayNumber,
        planned: u32,
    },
    SkipUnlocked {
        day: DayNumber,
    },
    DayClosed {
        summary: DaySummary,
    },
    GameOver {
        summary: FinalSummary,
    },
    GameReset,

    // ── Customers ──────────────────────────────────
    CustomerServed {
        day:      DayNumber,
        item_id:  ItemId,
        quantity: u32,
        sale:     Money,
        reaction: Reaction,
        good:     bool,
        message:  String,
        icon:     String,
    },

    // ── Player actions ─────────────────────────────
    PriceChanged {
        item_id:   ItemId,
        old_price: Money,
        new_price: Money,
    },
    AdvertisementRan {
        cost:             Money,
        popularity_boost: f64,
    },
    RandomEventApplied {
        outcome: EventOutcome,
    },
    CommandRejected {
        command: String,
        reason:  String,
    },

    // ── Presentation ───────────────────────────────
    Toast {
        message: String,
    },
    StatsUpdated {
        snapshot: StatSnapshot,
    },
}

impl SimEvent {
    /// Stable string name for the variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::DayOpened { .. }          => "day_opened",
            Self::SkipUnlocked { .. }       => "skip_unlocked",
            Self::DayClosed { .. }          => "day_closed",
            Self::GameOver { .. }           => "game_over",
            Self::GameReset                 => "game_reset",
            Self::CustomerServed { .. }     => "customer_served",
            Self::PriceChanged { .. }       => "price_changed",
            Self::AdvertisementRan { .. }   => "advertisement_ran",
            Self::RandomEventApplied { .. } => "random_event_applied",
            Self::CommandRejected { .. }    => "command_rejected",
            Self::Toast { .. }              => "toast",
            Self::StatsUpdated { .. }       => "stats_updated",
        }
    }

    pub fn toast(message: impl Into<String>) -> Self {
        Self::Toast { message: message.into() }
    }
}
