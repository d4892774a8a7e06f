//! The simulation engine — owns every piece of game state.
//!
//! FLOW:
//!   1. The player issues commands through handle(). Single-item price
//!      edits apply at any time before game over. Bulk price moves,
//!      events and advertising only apply between days.
//!   2. open_day() plans the day's customers and starts the tick source.
//!   3. Each tick() advances the clock 10 simulated minutes, may unlock
//!      skipping, rolls for at most one customer, and closes the day at
//!      closing time.
//!   4. close_day() stops the tick source, serves any skipped customers
//!      silently, folds the day into the totals, and either opens the
//!      way to the next day or ends the game.
//!
//! RULES:
//!   - Every public operation returns the events it produced, in order.
//!   - Invalid player input is sanitized or rejected with an event,
//!     never with an error.
//!   - All randomness flows through RngStreams.
//!   - The tick source is stopped before any day opens or the game
//!     resets. A tick that arrives while no day runs is ignored.

use crate::{
    clock::{DayClock, DayPhase, ManualTickSource, TickSource},
    command::PlayerCommand,
    config::SimConfig,
    demand,
    error::{SimError, SimResult},
    event::SimEvent,
    pricing::Menu,
    random_event,
    reaction,
    rng::RngStreams,
    snapshot::StatSnapshot,
    stats::{DayStats, DaySummary, FinalSummary, GameTotals},
    types::{clamp_popularity, is_large_popularity_drop, DayNumber, Money, RunId},
};
use std::collections::VecDeque;
use std::time::Duration;

pub struct SimEngine {
    pub run_id:    RunId,
    pub config:    SimConfig,
    pub clock:     DayClock,
    menu:          Menu,
    money:         Money,
    day:           DayNumber,
    popularity:    f64,
    day_stats:     DayStats,
    totals:        GameTotals,
    final_summary: Option<FinalSummary>,
    customer_log:  VecDeque<String>,
    rng:           RngStreams,
    tick_source:   Box<dyn TickSource>,
}

impl SimEngine {
    pub fn new(
        run_id:      RunId,
        config:      SimConfig,
        rng:         RngStreams,
        tick_source: Box<dyn TickSource>,
    ) -> SimResult<Self> {
        config.validate()?;
        let rules = &config.rules;
        Ok(Self {
            run_id,
            clock: DayClock::new(
                rules.open_hour,
                rules.close_hour,
                rules.skip_unlock_hour,
                rules.minutes_per_tick,
            ),
            menu: Menu::from_config(&config.menu),
            money: rules.starting_money,
            day: 1,
            popularity: rules.starting_popularity,
            day_stats: DayStats::default(),
            totals: GameTotals::default(),
            final_summary: None,
            customer_log: VecDeque::with_capacity(rules.customer_log_capacity),
            rng,
            tick_source,
            config,
        })
    }

    /// Seeded engine with a caller-supplied tick source.
    pub fn build(
        run_id:      RunId,
        seed:        u64,
        config:      SimConfig,
        tick_source: Box<dyn TickSource>,
    ) -> SimResult<Self> {
        Self::new(run_id, config, RngStreams::from_seed(seed), tick_source)
    }

    /// Default config, seeded streams, manual ticks.
    pub fn build_test(run_id: RunId, seed: u64) -> SimResult<Self> {
        Self::build(run_id, seed, SimConfig::default(), Box::new(ManualTickSource::new()))
    }

    /// Caller-supplied streams, manual ticks.
    pub fn with_streams(run_id: RunId, config: SimConfig, rng: RngStreams) -> SimResult<Self> {
        Self::new(run_id, config, rng, Box::new(ManualTickSource::new()))
    }

    // ── Read access ────────────────────────────────────────────

    pub fn money(&self) -> Money {
        self.money
    }

    pub fn popularity(&self) -> f64 {
        self.popularity
    }

    pub fn day(&self) -> DayNumber {
        self.day
    }

    pub fn phase(&self) -> DayPhase {
        self.clock.phase
    }

    pub fn is_day_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_game_over(&self) -> bool {
        self.clock.phase == DayPhase::GameOver
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Stats of the running day, or of the last closed day until the
    /// next one opens.
    pub fn day_stats(&self) -> &DayStats {
        &self.day_stats
    }

    pub fn totals(&self) -> &GameTotals {
        &self.totals
    }

    /// Computed exactly once, when the final day closes.
    pub fn final_summary(&self) -> Option<&FinalSummary> {
        self.final_summary.as_ref()
    }

    /// Most recent customer messages, oldest first.
    pub fn customer_log(&self) -> impl Iterator<Item = &str> + '_ {
        self.customer_log.iter().map(String::as_str)
    }

    pub fn tick_source_active(&self) -> bool {
        self.tick_source.is_active()
    }

    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            day:               self.day,
            max_days:          self.config.rules.max_days,
            money:             self.money,
            popularity:        self.popularity,
            clock:             self.clock.label(),
            phase:             self.clock.phase,
            skip_available:    self.clock.skip_available,
            average_price:     self.menu.average_price(),
            customers_today:   self.day_stats.customers,
            income_today:      self.day_stats.income,
            meals_today:       self.day_stats.meals,
            satisfaction_pct:  self.day_stats.satisfaction_pct(),
            planned_customers: self.day_stats.planned,
            spawned_customers: self.day_stats.spawned,
        }
    }

    fn stats_event(&self) -> SimEvent {
        SimEvent::StatsUpdated { snapshot: self.snapshot() }
    }

    /// Events a UI shows once, right after construction.
    pub fn welcome(&self) -> Vec<SimEvent> {
        vec![
            SimEvent::toast("Welcome to the food stand! Edit your menu, then press Open Day."),
            self.stats_event(),
        ]
    }

    // ── Commands ───────────────────────────────────────────────

    /// Apply one player command.
    pub fn handle(&mut self, command: PlayerCommand) -> SimResult<Vec<SimEvent>> {
        log::debug!("day={} time={} command: {}", self.day, self.clock.label(), command.name());
        match command {
            PlayerCommand::OpenDay => self.open_day(),
            PlayerCommand::SkipDay => self.skip_day(),
            PlayerCommand::SetPrice { item_id, value } => self.set_price(&item_id, value),
            PlayerCommand::AdjustPrice { item_id, delta } => self.adjust_price(&item_id, delta),
            PlayerCommand::AdjustAllPrices { delta } => self.adjust_all_prices(delta),
            PlayerCommand::TriggerEvent => self.trigger_event(),
            PlayerCommand::RunAdvertisement => self.run_advertisement(),
            PlayerCommand::ResetGame => self.reset_game(),
        }
    }

    fn reject(&self, command: &str, reason: impl Into<String>) -> Vec<SimEvent> {
        let reason = reason.into();
        log::warn!("day={} time={} {command} rejected: {reason}", self.day, self.clock.label());
        vec![SimEvent::CommandRejected {
            command: command.to_string(),
            reason,
        }]
    }

    fn game_over_block(&self) -> Option<&'static str> {
        self.is_game_over().then_some("the game is over")
    }

    fn warn_on_popularity_drop(&self, before: f64, cause: &str) {
        if is_large_popularity_drop(before, self.popularity) {
            log::warn!(
                "day={} time={} popularity fell {before:.1} -> {:.1} after {cause}",
                self.day,
                self.clock.label(),
                self.popularity
            );
        }
    }

    /// Reason a between-days action is not allowed right now, if any.
    fn between_days_block(&self) -> Option<&'static str> {
        if self.is_game_over() {
            Some("the game is over")
        } else if self.is_day_running() {
            Some("a day is in progress")
        } else {
            None
        }
    }

    pub fn open_day(&mut self) -> SimResult<Vec<SimEvent>> {
        if self.is_game_over() {
            return Ok(self.reject("open_day", "the game is over"));
        }
        if self.is_day_running() {
            return Ok(self.reject("open_day", "a day is already running"));
        }

        self.tick_source.stop();

        let planned = demand::planned_customers(
            self.popularity,
            self.menu.average_price(),
            self.menu.average_base_price(),
        );
        self.day_stats = DayStats::open(planned);

        self.clock.rewind();
        self.clock.phase = DayPhase::Running;
        self.tick_source
            .start(Duration::from_millis(self.config.rules.tick_interval_ms));

        log::info!(
            "day={} opened: planned={planned} popularity={:.1} avg_price={:.2}",
            self.day,
            self.popularity,
            self.menu.average_price()
        );

        Ok(vec![
            SimEvent::toast(format!("Day {} started!", self.day)),
            SimEvent::DayOpened { day: self.day, planned },
            self.stats_event(),
        ])
    }

    pub fn skip_day(&mut self) -> SimResult<Vec<SimEvent>> {
        if !self.is_day_running() {
            return Ok(self.reject("skip_day", "no day is running"));
        }
        if !self.clock.skip_available {
            return Ok(self.reject(
                "skip_day",
                format!("skipping unlocks at {:02}:00", self.config.rules.skip_unlock_hour),
            ));
        }

        let mut events = vec![SimEvent::toast("Skipping to end of day...")];
        self.clock.jump_to_close();
        events.extend(self.close_day(true)?);
        Ok(events)
    }

    /// Advance one tick of simulated time.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        if !self.is_day_running() || !self.tick_source.is_active() {
            log::debug!("day={} ignoring tick outside a running day", self.day);
            return Ok(vec![]);
        }

        let mut events = Vec::new();

        if self.clock.advance() {
            log::debug!("day={} time={} skip unlocked", self.day, self.clock.label());
            events.push(SimEvent::SkipUnlocked { day: self.day });
            events.push(SimEvent::toast("Skip Day is now available!"));
        }

        events.extend(self.maybe_spawn_customer()?);

        if self.clock.is_closing_time() {
            events.extend(self.close_day(false)?);
        } else {
            events.push(self.stats_event());
        }

        Ok(events)
    }

    /// Pull ticks from the tick source until the day closes.
    pub fn run_until_closed(&mut self) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        while self.is_day_running() && self.tick_source.wait_for_tick() {
            events.extend(self.tick()?);
        }
        Ok(events)
    }

    /// Finish the running day. A no-op when no day is running.
    pub fn close_day(&mut self, skipped: bool) -> SimResult<Vec<SimEvent>> {
        if !self.is_day_running() {
            return Ok(vec![]);
        }

        self.tick_source.stop();
        self.clock.phase = DayPhase::Idle;

        if skipped {
            let remaining = self.day_stats.remaining();
            log::debug!("day={} serving {remaining} skipped customers", self.day);
            for _ in 0..remaining {
                self.spawn_customer(true)?;
            }
        }

        self.totals.fold_day(&self.day_stats, self.popularity);

        let summary = DaySummary {
            day:              self.day,
            customers:        self.day_stats.customers,
            planned:          self.day_stats.planned,
            income:           self.day_stats.income,
            meals:            self.day_stats.meals,
            satisfaction_pct: self.day_stats.satisfaction_pct(),
            popularity:       self.popularity,
            skipped,
        };
        log::info!(
            "day={} closed: customers={}/{} income={:.2} satisfaction={}% popularity={:.1}",
            summary.day,
            summary.customers,
            summary.planned,
            summary.income,
            summary.satisfaction_pct,
            summary.popularity
        );

        let mut events = vec![SimEvent::DayClosed { summary }];

        if self.day >= self.config.rules.max_days {
            self.clock.phase = DayPhase::GameOver;
            let final_summary = FinalSummary::compute(self.money, self.popularity, &self.totals);
            log::info!(
                "game over: money={:.2} score={} rank={:?}",
                final_summary.money,
                final_summary.score,
                final_summary.rank
            );
            self.final_summary = Some(final_summary.clone());
            events.push(SimEvent::GameOver { summary: final_summary });
        } else {
            self.day += 1;
        }

        self.clock.skip_available = false;
        events.push(self.stats_event());
        Ok(events)
    }

    fn maybe_spawn_customer(&mut self) -> SimResult<Vec<SimEvent>> {
        if self.day_stats.spawned >= self.day_stats.planned {
            return Ok(vec![]);
        }

        let chance = demand::spawn_chance(self.day_stats.planned, self.clock.hour);
        if self.rng.spawn.chance(chance) {
            return self.spawn_customer(false);
        }
        Ok(vec![])
    }

    /// Serve one customer. Silent spawns skip the customer log and event.
    fn spawn_customer(&mut self, silent: bool) -> SimResult<Vec<SimEvent>> {
        let Some(index) = demand::pick_item(self.menu.items(), self.popularity, self.rng.customer.as_mut())
        else {
            return Err(SimError::Config { reason: "menu is empty".into() });
        };
        self.day_stats.spawned += 1;
        let item = &self.menu.items()[index];
        let result = reaction::serve_customer(item, self.clock.hour, self.rng.customer.as_mut());

        self.money += result.sale;
        self.day_stats.record_sale(result.quantity, result.sale, result.good);
        self.totals.record_sale(result.sale);

        let before = self.popularity;
        self.popularity = clamp_popularity(self.popularity + result.popularity_delta);
        self.warn_on_popularity_drop(before, "customer reaction");

        if silent {
            return Ok(vec![]);
        }

        let message = format!(
            "{} Customer bought {}× {} ({}) - {}",
            result.reaction.icon_tag(),
            result.quantity,
            item.display_name,
            item.icon,
            result.reaction.message()
        );
        log::debug!(
            "day={} time={} {message} (popularity {before:.1} -> {:.1})",
            self.day,
            self.clock.label(),
            self.popularity
        );

        if self.customer_log.len() >= self.config.rules.customer_log_capacity {
            self.customer_log.pop_front();
        }
        if self.config.rules.customer_log_capacity > 0 {
            self.customer_log.push_back(message.clone());
        }

        Ok(vec![SimEvent::CustomerServed {
            day:      self.day,
            item_id:  result.item_id,
            quantity: result.quantity,
            sale:     result.sale,
            reaction: result.reaction,
            good:     result.good,
            message,
            icon:     result.reaction.icon_tag().to_string(),
        }])
    }

    // ── Pricing and between-day actions ────────────────────────

    pub fn set_price(&mut self, item_id: &str, value: Money) -> SimResult<Vec<SimEvent>> {
        if let Some(reason) = self.game_over_block() {
            return Ok(self.reject("set_price", reason));
        }
        let Some(old_price) = self.menu.get(item_id).map(|m| m.current_price) else {
            return Ok(self.reject("set_price", format!("unknown menu item '{item_id}'")));
        };
        let new_price = self.menu.set_price(item_id, value)?;
        Ok(self.price_events(item_id, old_price, new_price))
    }

    pub fn adjust_price(&mut self, item_id: &str, delta: Money) -> SimResult<Vec<SimEvent>> {
        if let Some(reason) = self.game_over_block() {
            return Ok(self.reject("adjust_price", reason));
        }
        let Some(old_price) = self.menu.get(item_id).map(|m| m.current_price) else {
            return Ok(self.reject("adjust_price", format!("unknown menu item '{item_id}'")));
        };
        let new_price = self.menu.adjust_price(item_id, delta)?;
        Ok(self.price_events(item_id, old_price, new_price))
    }

    pub fn adjust_all_prices(&mut self, delta: Money) -> SimResult<Vec<SimEvent>> {
        if let Some(reason) = self.between_days_block() {
            return Ok(self.reject("adjust_all_prices", reason));
        }
        let before: Vec<Money> = self.menu.items().iter().map(|m| m.current_price).collect();
        self.menu.adjust_all(delta);

        let mut events: Vec<SimEvent> = self
            .menu
            .items()
            .iter()
            .zip(before)
            .map(|(item, old_price)| SimEvent::PriceChanged {
                item_id:   item.id.clone(),
                old_price,
                new_price: item.current_price,
            })
            .collect();
        events.push(self.stats_event());
        Ok(events)
    }

    fn price_events(&self, item_id: &str, old_price: Money, new_price: Money) -> Vec<SimEvent> {
        log::debug!("price {item_id}: {old_price:.2} -> {new_price:.2}");
        vec![
            SimEvent::PriceChanged {
                item_id: item_id.to_string(),
                old_price,
                new_price,
            },
            self.stats_event(),
        ]
    }

    pub fn trigger_event(&mut self) -> SimResult<Vec<SimEvent>> {
        if let Some(reason) = self.between_days_block() {
            return Ok(self.reject("trigger_event", reason));
        }

        let outcome = random_event::roll_event(self.rng.events.as_mut());
        let before = self.popularity;
        self.money += outcome.money_delta;
        self.popularity = clamp_popularity(self.popularity + outcome.popularity_delta);
        self.warn_on_popularity_drop(before, &format!("{:?}", outcome.kind));

        log::info!(
            "day={} random event {:?}: money {:+.0}, popularity now {:.1}",
            self.day,
            outcome.kind,
            outcome.money_delta,
            self.popularity
        );

        Ok(vec![
            SimEvent::toast(outcome.description()),
            SimEvent::RandomEventApplied { outcome },
            self.stats_event(),
        ])
    }

    pub fn run_advertisement(&mut self) -> SimResult<Vec<SimEvent>> {
        if let Some(reason) = self.between_days_block() {
            return Ok(self.reject("run_advertisement", reason));
        }

        let cost = self.config.rules.advertising.cost;
        let boost = self.config.rules.advertising.popularity_boost;
        if self.money < cost {
            let mut events = self.reject("run_advertisement", "not enough money");
            events.push(SimEvent::toast("Not enough money to advertise."));
            return Ok(events);
        }

        self.money -= cost;
        self.popularity = clamp_popularity(self.popularity + boost);
        log::info!("day={} advertisement: -{cost:.0}, popularity now {:.1}", self.day, self.popularity);

        Ok(vec![
            SimEvent::toast(format!("Ad campaign ran! Popularity +{boost:.0}%, Money -${cost:.0}")),
            SimEvent::AdvertisementRan { cost, popularity_boost: boost },
            self.stats_event(),
        ])
    }

    /// Wipe everything back to a fresh game. Allowed at any time.
    pub fn reset_game(&mut self) -> SimResult<Vec<SimEvent>> {
        self.tick_source.stop();

        let rules = &self.config.rules;
        self.money = rules.starting_money;
        self.popularity = rules.starting_popularity;
        self.day = 1;
        self.clock = DayClock::new(
            rules.open_hour,
            rules.close_hour,
            rules.skip_unlock_hour,
            rules.minutes_per_tick,
        );
        self.day_stats = DayStats::default();
        self.totals = GameTotals::default();
        self.final_summary = None;
        self.customer_log.clear();
        self.menu.reset_prices();

        log::info!("run={} game reset", self.run_id);

        Ok(vec![
            SimEvent::GameReset,
            SimEvent::toast("Game reset! Try a new menu strategy."),
            self.stats_event(),
        ])
    }
}
