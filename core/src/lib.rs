//! Core simulation for a single-player food stand tycoon game.
//!
//! The player prices a menu, opens the stand for a trading day, and a
//! randomized stream of customers reacts to those prices. After a fixed
//! number of days the run is scored and ranked.
//!
//! Everything here is deterministic given the master seed. A UI talks to
//! SimEngine through PlayerCommand and renders the returned SimEvents.

pub mod clock;
pub mod command;
pub mod config;
pub mod demand;
pub mod engine;
pub mod error;
pub mod event;
pub mod presenter;
pub mod pricing;
pub mod random_event;
pub mod reaction;
pub mod rng;
pub mod snapshot;
pub mod stats;
pub mod types;
