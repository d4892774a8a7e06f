use crate::types::{ItemId, Money};
use serde::{Deserialize, Serialize};

/// All player-issued commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Day flow ──────────────────────────────────
    OpenDay,
    SkipDay,

    // ── Menu pricing ──────────────────────────────
    SetPrice {
        item_id: ItemId,
        value:   Money,
    },
    AdjustPrice {
        item_id: ItemId,
        delta:   Money,
    },
    AdjustAllPrices {
        delta: Money,
    },

    // ── Between-day actions ───────────────────────
    TriggerEvent,
    RunAdvertisement,

    ResetGame,
}

impl PlayerCommand {
    /// Stable snake_case name, used in logs and rejection events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenDay              => "open_day",
            Self::SkipDay              => "skip_day",
            Self::SetPrice { .. }      => "set_price",
            Self::AdjustPrice { .. }   => "adjust_price",
            Self::AdjustAllPrices { .. } => "adjust_all_prices",
            Self::TriggerEvent         => "trigger_event",
            Self::RunAdvertisement     => "run_advertisement",
            Self::ResetGame            => "reset_game",
        }
    }
}
