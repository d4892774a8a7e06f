//! Day clock and full game flow tests.

use tycoon_core::{
    clock::DayPhase,
    command::PlayerCommand,
    config::SimConfig,
    engine::SimEngine,
    event::SimEvent,
    rng::{FixedRng, RngStreams, ScriptedRng},
    stats::Rank,
};

/// Every stream returns 0.0: every tick spawns, every customer buys
/// three of the first item and loves it.
fn always_spawning(run_id: &str) -> SimEngine {
    SimEngine::with_streams(run_id.into(), SimConfig::default(), RngStreams::fixed(0.0))
        .expect("build engine")
}

fn count<F: Fn(&SimEvent) -> bool>(events: &[SimEvent], pred: F) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

fn run_full_day(engine: &mut SimEngine) -> Vec<SimEvent> {
    let mut events = engine.open_day().unwrap();
    events.extend(engine.run_until_closed().unwrap());
    events
}

#[test]
fn forty_eight_ticks_serve_every_planned_customer() {
    let mut engine = always_spawning("e2e-48");
    assert_eq!(engine.money(), 1000.0);
    assert_eq!(engine.popularity(), 50.0);
    assert_eq!(engine.day(), 1);

    let opened = engine.open_day().unwrap();
    let planned = engine.day_stats().planned;
    assert_eq!(planned, 23);
    assert!(opened.contains(&SimEvent::DayOpened { day: 1, planned }));

    let mut events = Vec::new();
    for _ in 0..48 {
        events.extend(engine.tick().unwrap());
    }

    let stats = engine.day_stats();
    assert_eq!(stats.customers, planned);
    assert_eq!(stats.spawned, planned);
    assert_eq!(stats.meals, planned * 3);

    let sales: f64 = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::CustomerServed { sale, .. } => Some(*sale),
            _ => None,
        })
        .sum();
    assert!((engine.money() - 1000.0 - sales).abs() < 1e-6);
    assert!((stats.income - sales).abs() < 1e-6);

    assert!((0.0..=100.0).contains(&engine.popularity()));
    assert!((engine.popularity() - 61.5).abs() < 1e-9);

    // 16:00 closes the day on the 48th tick
    assert_eq!(engine.phase(), DayPhase::Idle);
    assert_eq!(engine.day(), 2);
    assert_eq!(count(&events, |e| matches!(e, SimEvent::DayClosed { .. })), 1);
    assert!(!engine.tick_source_active());
}

#[test]
fn at_most_one_customer_per_tick() {
    let mut engine = always_spawning("one-per-tick");
    engine.open_day().unwrap();
    for n in 1..=10 {
        let events = engine.tick().unwrap();
        assert_eq!(
            count(&events, |e| matches!(e, SimEvent::CustomerServed { .. })),
            1
        );
        assert_eq!(engine.day_stats().spawned, n);
    }
}

#[test]
fn spawned_never_exceeds_planned() {
    let mut engine = SimEngine::build_test("spawn-cap".into(), 0x5EED).unwrap();
    for _ in 0..7 {
        engine.open_day().unwrap();
        while engine.is_day_running() {
            engine.tick().unwrap();
            let stats = engine.day_stats();
            assert!(stats.spawned <= stats.planned);
        }
    }
}

#[test]
fn skip_unlocks_at_nine_exactly_once() {
    let mut engine = always_spawning("skip-unlock");
    engine.open_day().unwrap();

    let mut unlocks = 0;
    for tick in 1..=12 {
        let events = engine.tick().unwrap();
        let unlocked = count(&events, |e| matches!(e, SimEvent::SkipUnlocked { .. }));
        if tick == 6 {
            assert_eq!(unlocked, 1, "09:00 is the sixth tick");
            assert_eq!(engine.clock.label(), "09:00");
        }
        unlocks += unlocked;
    }
    assert_eq!(unlocks, 1);
    assert!(engine.clock.skip_available);
}

#[test]
fn skip_rejected_before_nine() {
    let mut engine = always_spawning("skip-early");
    engine.open_day().unwrap();
    engine.tick().unwrap();

    let events = engine.skip_day().unwrap();
    assert!(matches!(events.as_slice(), [SimEvent::CommandRejected { command, .. }] if command == "skip_day"));
    assert!(engine.is_day_running());
}

#[test]
fn skip_rejected_when_idle() {
    let mut engine = always_spawning("skip-idle");
    let events = engine.skip_day().unwrap();
    assert!(matches!(events.as_slice(), [SimEvent::CommandRejected { .. }]));
}

#[test]
fn skipping_serves_the_rest_silently() {
    let mut config = SimConfig::default();
    config.rules.starting_popularity = 40.0; // 10 + 40/4 = 20 planned
    let streams = RngStreams {
        spawn: Box::new(ScriptedRng::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.99])),
        customer: Box::new(FixedRng::new(0.0)),
        events: Box::new(FixedRng::new(0.5)),
    };
    let mut engine = SimEngine::with_streams("skip-rest".into(), config, streams).unwrap();

    engine.open_day().unwrap();
    assert_eq!(engine.day_stats().planned, 20);

    for _ in 0..6 {
        engine.tick().unwrap();
    }
    assert_eq!(engine.day_stats().spawned, 5);
    assert!(engine.clock.skip_available);
    let logged_before = engine.customer_log().count();

    let events = engine.handle(PlayerCommand::SkipDay).unwrap();

    let stats = engine.day_stats();
    assert_eq!(stats.spawned, 20);
    assert_eq!(stats.customers, 20);
    assert_eq!(count(&events, |e| matches!(e, SimEvent::CustomerServed { .. })), 0);
    assert_eq!(engine.customer_log().count(), logged_before);

    match events.iter().find(|e| matches!(e, SimEvent::DayClosed { .. })) {
        Some(SimEvent::DayClosed { summary }) => {
            assert!(summary.skipped);
            assert_eq!(summary.customers, 20);
            assert_eq!(summary.day, 1);
        }
        _ => panic!("skip should close the day"),
    }
    assert_eq!(engine.clock.label(), "16:00");
    assert!(!engine.clock.skip_available);
    assert_eq!(engine.day(), 2);
}

#[test]
fn close_day_is_a_noop_when_not_running() {
    let mut engine = always_spawning("close-idempotent");
    assert!(engine.close_day(false).unwrap().is_empty());

    run_full_day(&mut engine);
    let totals_before = engine.totals().clone();
    let day_before = engine.day();

    assert!(engine.close_day(false).unwrap().is_empty());
    assert!(engine.close_day(true).unwrap().is_empty());
    assert_eq!(engine.totals(), &totals_before);
    assert_eq!(engine.day(), day_before);
}

#[test]
fn opening_a_day_resets_day_stats() {
    let mut engine = always_spawning("open-resets");
    run_full_day(&mut engine);
    assert!(engine.day_stats().income > 0.0);

    engine.open_day().unwrap();
    let stats = engine.day_stats();
    assert_eq!(stats.spawned, 0);
    assert_eq!(stats.income, 0.0);
    assert_eq!(stats.customers, 0);
    assert_eq!(engine.clock.label(), "08:00");

    // A second open while running must not reset again.
    engine.tick().unwrap();
    let rejected = engine.open_day().unwrap();
    assert!(matches!(rejected.as_slice(), [SimEvent::CommandRejected { .. }]));
    assert_eq!(engine.day_stats().spawned, 1);
}

#[test]
fn ticks_outside_a_running_day_are_ignored() {
    let mut engine = always_spawning("ghost-ticks");
    assert!(engine.tick().unwrap().is_empty());

    run_full_day(&mut engine);
    let money = engine.money();
    let label = engine.clock.label();
    for _ in 0..5 {
        assert!(engine.tick().unwrap().is_empty());
    }
    assert_eq!(engine.money(), money);
    assert_eq!(engine.clock.label(), label);
}

#[test]
fn reset_stops_the_tick_source_mid_day() {
    let mut engine = always_spawning("reset-mid-day");
    engine.handle(PlayerCommand::AdjustAllPrices { delta: 2.0 }).unwrap();
    engine.open_day().unwrap();
    for _ in 0..10 {
        engine.tick().unwrap();
    }
    assert!(engine.tick_source_active());

    let events = engine.handle(PlayerCommand::ResetGame).unwrap();
    assert!(events.contains(&SimEvent::GameReset));
    assert!(!engine.tick_source_active());
    assert!(!engine.is_day_running());

    // A stale tick must not touch the fresh state.
    assert!(engine.tick().unwrap().is_empty());
    assert_eq!(engine.money(), 1000.0);
    assert_eq!(engine.popularity(), 50.0);
    assert_eq!(engine.day(), 1);
    assert_eq!(engine.clock.label(), "08:00");
    assert_eq!(engine.customer_log().count(), 0);
    assert!(engine.menu().items().iter().all(|m| m.current_price == m.base_price));
    assert_eq!(engine.totals().days_recorded(), 0);
}

#[test]
fn seven_days_end_the_game() {
    let mut engine = SimEngine::build_test("seven-days".into(), 0xC0FFEE).unwrap();

    let mut events = Vec::new();
    for day in 1..=7 {
        assert_eq!(engine.day(), day);
        events.extend(run_full_day(&mut engine));
    }

    assert!(engine.is_game_over());
    assert_eq!(engine.day(), 7, "day never exceeds max_days");
    assert_eq!(engine.totals().days_recorded(), 7);
    assert_eq!(count(&events, |e| matches!(e, SimEvent::GameOver { .. })), 1);

    let summary = engine.final_summary().cloned().expect("final summary");
    assert!(summary.score <= 100);
    assert_eq!(summary.rank, Rank::from_score(summary.score));
    assert_eq!(summary.daily_income, engine.totals().daily_income);

    // Terminal: nothing reopens, nothing rescored.
    for command in [
        PlayerCommand::OpenDay,
        PlayerCommand::TriggerEvent,
        PlayerCommand::RunAdvertisement,
        PlayerCommand::AdjustPrice { item_id: "burger".into(), delta: 1.0 },
    ] {
        let out = engine.handle(command).unwrap();
        assert!(matches!(out.as_slice(), [SimEvent::CommandRejected { .. }]));
    }
    assert!(engine.close_day(false).unwrap().is_empty());
    assert_eq!(engine.final_summary(), Some(&summary));
    assert_eq!(engine.phase(), DayPhase::GameOver);

    // Reset is the only way out.
    engine.handle(PlayerCommand::ResetGame).unwrap();
    assert!(!engine.is_game_over());
    assert!(engine.final_summary().is_none());
    assert!(!engine.open_day().unwrap().is_empty());
    assert!(engine.is_day_running());
}

#[test]
fn advertisement_costs_and_boosts() {
    let mut engine = always_spawning("ads");
    let events = engine.handle(PlayerCommand::RunAdvertisement).unwrap();
    assert!(events.iter().any(|e| matches!(e, SimEvent::AdvertisementRan { .. })));
    assert_eq!(engine.money(), 880.0);
    assert_eq!(engine.popularity(), 65.0);

    for _ in 0..5 {
        engine.run_advertisement().unwrap();
    }
    assert_eq!(engine.popularity(), 100.0, "popularity clamps at 100");
}

#[test]
fn advertisement_rejected_without_funds() {
    let mut config = SimConfig::default();
    config.rules.starting_money = 119.0;
    let mut engine =
        SimEngine::with_streams("ads-broke".into(), config, RngStreams::fixed(0.0)).unwrap();

    let events = engine.run_advertisement().unwrap();
    assert!(matches!(events[0], SimEvent::CommandRejected { .. }));
    assert_eq!(engine.money(), 119.0);
    assert_eq!(engine.popularity(), 50.0);
}

#[test]
fn customer_log_keeps_the_latest_entries() {
    let mut engine = always_spawning("customer-log");
    run_full_day(&mut engine);

    let log: Vec<&str> = engine.customer_log().collect();
    assert_eq!(log.len(), 23.min(engine.config.rules.customer_log_capacity));
    assert!(log
        .iter()
        .all(|line| line == &"thumbs_up Customer bought 3× Burger (burger) - loved the food!"));
}

#[test]
fn expensive_menu_shrinks_the_day() {
    let mut engine = always_spawning("pricey");
    engine.adjust_all_prices(20.0).unwrap();
    engine.open_day().unwrap();
    // 22.5 * 0.7 = 15.75
    assert_eq!(engine.day_stats().planned, 16);
}
