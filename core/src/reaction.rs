//! Customer reaction engine.
//!
//! serve_customer() is pure: it reads the chosen item, the hour and two
//! samples from the customer stream, and reports what happened. The
//! caller books the sale and applies the popularity delta (clamped).

use crate::{demand::is_lunch_hour, pricing::MenuItem, rng::RandomSource, types::Money};
use serde::{Deserialize, Serialize};

/// Price-ratio band that decides how a customer feels about the price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReactionTier {
    /// ratio <= 1.2
    Positive,
    /// 1.2 < ratio <= 1.8
    Neutral,
    /// ratio > 1.8
    Negative,
}

impl ReactionTier {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio <= 1.2 {
            Self::Positive
        } else if ratio <= 1.8 {
            Self::Neutral
        } else {
            Self::Negative
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    LovedFood,
    TastedGreat,
    MildComplaint,
    OkayWithPrice,
    TooExpensive,
    Resigned,
}

impl Reaction {
    pub fn message(&self) -> &'static str {
        match self {
            Self::LovedFood     => "loved the food!",
            Self::TastedGreat   => "said everything tasted great.",
            Self::MildComplaint => "complained a bit about the price...",
            Self::OkayWithPrice => "was okay with the price.",
            Self::TooExpensive  => "complained that it's too expensive!",
            Self::Resigned      => "bought it but is not satisfied.",
        }
    }

    /// Presentation hint for the customer log.
    pub fn icon_tag(&self) -> &'static str {
        match self {
            Self::LovedFood     => "thumbs_up",
            Self::TastedGreat   => "smile",
            Self::MildComplaint => "meh",
            Self::OkayWithPrice => "slight_smile",
            Self::TooExpensive  => "thumbs_down",
            Self::Resigned      => "sweat",
        }
    }

    pub fn is_good(&self) -> bool {
        matches!(self, Self::LovedFood | Self::TastedGreat | Self::OkayWithPrice)
    }

    pub fn popularity_delta(&self) -> f64 {
        match self {
            Self::LovedFood | Self::TastedGreat => 0.5,
            Self::OkayWithPrice                 => 0.0,
            Self::MildComplaint                 => -0.3,
            Self::TooExpensive                  => -0.8,
            Self::Resigned                      => -0.5,
        }
    }

    pub fn tier(&self) -> ReactionTier {
        match self {
            Self::LovedFood | Self::TastedGreat     => ReactionTier::Positive,
            Self::MildComplaint | Self::OkayWithPrice => ReactionTier::Neutral,
            Self::TooExpensive | Self::Resigned     => ReactionTier::Negative,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReactionResult {
    pub item_id:          String,
    pub quantity:         u32,
    pub sale:             Money,
    pub reaction:         Reaction,
    pub good:             bool,
    /// Unclamped delta. The caller clamps when applying it.
    pub popularity_delta: f64,
}

/// How many portions the customer buys. Lunch shifts the odds upward.
pub fn roll_quantity(hour: u32, sample: f64) -> u32 {
    let (triple, double) = if is_lunch_hour(hour) { (0.15, 0.45) } else { (0.10, 0.35) };
    if sample < triple {
        3
    } else if sample < double {
        2
    } else {
        1
    }
}

pub fn roll_reaction(tier: ReactionTier, sample: f64) -> Reaction {
    match tier {
        ReactionTier::Positive if sample < 0.5 => Reaction::LovedFood,
        ReactionTier::Positive                 => Reaction::TastedGreat,
        ReactionTier::Neutral if sample < 0.3  => Reaction::MildComplaint,
        ReactionTier::Neutral                  => Reaction::OkayWithPrice,
        ReactionTier::Negative if sample < 0.7 => Reaction::TooExpensive,
        ReactionTier::Negative                 => Reaction::Resigned,
    }
}

pub fn serve_customer(item: &MenuItem, hour: u32, rng: &mut dyn RandomSource) -> ReactionResult {
    let quantity = roll_quantity(hour, rng.next_f64());
    let sale = item.current_price * quantity as f64;

    let tier = ReactionTier::for_ratio(item.price_ratio());
    let reaction = roll_reaction(tier, rng.next_f64());

    ReactionResult {
        item_id: item.id.clone(),
        quantity,
        sale,
        reaction,
        good: reaction.is_good(),
        popularity_delta: reaction.popularity_delta(),
    }
}
