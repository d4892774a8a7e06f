//! Presentation boundary tests — events route to the right hooks.

use tycoon_core::{
    command::PlayerCommand,
    event::SimEvent,
    config::SimConfig,
    engine::SimEngine,
    presenter::{LogPresenter, Presenter},
    rng::RngStreams,
    snapshot::StatSnapshot,
    stats::{DaySummary, FinalSummary},
    types::DayNumber,
};

#[derive(Default)]
struct Recorder {
    stats:     usize,
    customers: Vec<(String, String)>,
    opened:    Vec<(DayNumber, u32)>,
    closed:    Vec<DaySummary>,
    finals:    usize,
    toasts:    Vec<String>,
}

impl Presenter for Recorder {
    fn on_stat_update(&mut self, _snapshot: &StatSnapshot) {
        self.stats += 1;
    }
    fn on_customer_event(&mut self, message: &str, icon: &str) {
        self.customers.push((message.to_string(), icon.to_string()));
    }
    fn on_day_opened(&mut self, day: DayNumber, planned: u32) {
        self.opened.push((day, planned));
    }
    fn on_day_closed(&mut self, summary: &DaySummary) {
        self.closed.push(summary.clone());
    }
    fn on_game_over(&mut self, _summary: &FinalSummary) {
        self.finals += 1;
    }
    fn on_toast(&mut self, message: &str) {
        self.toasts.push(message.to_string());
    }
}

#[test]
fn a_full_day_reaches_every_hook() {
    let mut config = SimConfig::default();
    config.rules.max_days = 1;
    let mut engine =
        SimEngine::with_streams("presenter".into(), config, RngStreams::fixed(0.0)).unwrap();
    let mut ui = Recorder::default();

    ui.present_all(&engine.welcome());
    ui.present_all(&engine.handle(PlayerCommand::OpenDay).unwrap());
    ui.present_all(&engine.run_until_closed().unwrap());

    assert!(ui.toasts[0].starts_with("Welcome"));
    assert!(ui.toasts.iter().any(|t| t == "Day 1 started!"));
    assert!(ui.toasts.iter().any(|t| t == "Skip Day is now available!"));
    assert_eq!(ui.opened, vec![(1, 23)]);
    assert_eq!(ui.customers.len(), 23);
    assert_eq!(ui.customers[0].1, "thumbs_up");
    assert_eq!(ui.closed.len(), 1);
    assert_eq!(ui.closed[0].satisfaction_pct, 100);
    assert_eq!(ui.finals, 1);
    assert!(ui.stats >= 47, "a stats update per tick, got {}", ui.stats);
}

#[test]
fn log_presenter_accepts_everything() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut engine = SimEngine::build_test("log-presenter".into(), 11).unwrap();
    let mut presenter = LogPresenter;

    presenter.present_all(&engine.welcome());
    presenter.present_all(&engine.handle(PlayerCommand::SkipDay).unwrap());
    presenter.present_all(&engine.handle(PlayerCommand::OpenDay).unwrap());
    presenter.present_all(&engine.run_until_closed().unwrap());
    assert_eq!(engine.day(), 2);
}

#[test]
fn type_names_match_the_wire_tag() {
    let mut engine = SimEngine::build_test("type-names".into(), 5).unwrap();
    let mut events: Vec<SimEvent> = engine.welcome();
    events.extend(engine.handle(PlayerCommand::TriggerEvent).unwrap());
    events.extend(engine.handle(PlayerCommand::RunAdvertisement).unwrap());
    events.extend(engine.handle(PlayerCommand::AdjustAllPrices { delta: 0.5 }).unwrap());
    events.extend(engine.handle(PlayerCommand::SkipDay).unwrap());
    events.extend(engine.handle(PlayerCommand::OpenDay).unwrap());
    events.extend(engine.run_until_closed().unwrap());
    events.extend(engine.handle(PlayerCommand::ResetGame).unwrap());

    for event in &events {
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], event.type_name(), "tag mismatch for {event:?}");
    }
    for expected in ["random_event_applied", "advertisement_ran", "price_changed", "command_rejected", "day_closed", "game_reset"] {
        assert!(events.iter().any(|e| e.type_name() == expected), "no {expected} event");
    }
}
