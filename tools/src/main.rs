//! stand-runner: headless runner for the food stand simulation.
//!
//! Usage:
//!   stand-runner --seed 12345 --days 7 --price-factor 1.1
//!   stand-runner --seed 12345 --realtime
//!   stand-runner --seed 12345 --ipc-mode

use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use tycoon_core::{
    clock::{IntervalTickSource, ManualTickSource, TickSource},
    command::PlayerCommand,
    config::SimConfig,
    engine::SimEngine,
    event::SimEvent,
    presenter::Presenter,
    snapshot::StatSnapshot,
    stats::{DaySummary, FinalSummary},
    types::DayNumber,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Command { command: PlayerCommand },
    Quit,
}

#[derive(serde::Serialize)]
struct IpcReply<'a> {
    events: &'a [SimEvent],
    state:  StatSnapshot,
}

/// Prints day results and the final summary to stdout.
struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn on_customer_event(&mut self, message: &str, icon: &str) {
        log::debug!("[{icon}] {message}");
    }

    fn on_day_opened(&mut self, day: DayNumber, planned: u32) {
        println!("Day {day}: target around {planned} customers");
    }

    fn on_day_closed(&mut self, summary: &DaySummary) {
        println!(
            "  customers: {:>3} | income: ${:>8.2} | meals: {:>3} | satisfaction: {:>3}% | popularity: {:.0}%{}",
            summary.customers,
            summary.income,
            summary.meals,
            summary.satisfaction_pct,
            summary.popularity,
            if summary.skipped { " (skipped)" } else { "" }
        );
    }

    fn on_game_over(&mut self, summary: &FinalSummary) {
        println!();
        println!("=== FINAL RESULTS ===");
        println!("  money:           ${:.2}", summary.money);
        println!("  customers:       {}", summary.total_customers);
        println!("  meals:           {}", summary.total_meals);
        println!("  avg popularity:  {:.0}%", summary.avg_popularity);
        println!("  best day income: ${:.2}", summary.best_day_income);
        println!("  income trend:    {:.2}", summary.income_trend);
        println!("  score:           {}", summary.score);
        println!("  rank:            {:?}", summary.rank);
    }

    fn on_toast(&mut self, message: &str) {
        log::info!("{message}");
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let price_factor = parse_arg(&args, "--price-factor", 1.0f64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let realtime = args.iter().any(|a| a == "--realtime");
    let data_dir = args
        .windows(2)
        .find(|w| w[0] == "--data-dir")
        .map(|w| w[1].as_str());

    let config = match data_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::default(),
    };
    let days = parse_arg(&args, "--days", config.rules.max_days);

    let tick_source: Box<dyn TickSource> = if realtime {
        Box::new(IntervalTickSource::new())
    } else {
        Box::new(ManualTickSource::new())
    };

    let run_id = format!("run-{seed}-{}", uuid::Uuid::new_v4());
    let mut engine = SimEngine::build(run_id.clone(), seed, config, tick_source)?;

    if ipc_mode {
        return run_ipc_loop(&mut engine);
    }

    println!("Food stand: stand-runner");
    println!("  run_id:       {run_id}");
    println!("  seed:         {seed}");
    println!("  days:         {days}");
    println!("  price factor: {price_factor:.2}");
    println!("  realtime:     {realtime}");
    println!();

    run_autoplay(&mut engine, days, price_factor)
}

/// Fixed strategy: scale every price once, then run each day to closing.
fn run_autoplay(engine: &mut SimEngine, days: DayNumber, price_factor: f64) -> Result<()> {
    let mut presenter = ConsolePresenter;
    presenter.present_all(&engine.welcome());

    let targets: Vec<(String, f64)> = engine
        .menu()
        .items()
        .iter()
        .map(|m| (m.id.clone(), m.base_price * price_factor))
        .collect();
    for (item_id, price) in targets {
        let events = engine.handle(PlayerCommand::SetPrice { item_id, value: price })?;
        presenter.present_all(&events);
    }

    for _ in 0..days {
        if engine.is_game_over() {
            break;
        }
        let events = engine.handle(PlayerCommand::OpenDay)?;
        presenter.present_all(&events);

        let events = engine.run_until_closed()?;
        presenter.present_all(&events);
    }

    if !engine.is_game_over() {
        let snapshot = engine.snapshot();
        println!();
        println!("Stopped before the final day: money ${:.2}, popularity {:.0}%", snapshot.money, snapshot.popularity);
    }
    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    let welcome = engine.welcome();
    write_reply(&mut stdout, &welcome, engine)?;

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let events = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => Vec::new(),
            IpcCommand::Tick { count } => {
                let mut events = Vec::new();
                for _ in 0..count {
                    if !engine.is_day_running() {
                        break;
                    }
                    events.extend(engine.tick()?);
                }
                events
            }
            IpcCommand::Command { command } => engine.handle(command)?,
        };
        write_reply(&mut stdout, &events, engine)?;
    }
    Ok(())
}

fn write_reply(stdout: &mut io::Stdout, events: &[SimEvent], engine: &SimEngine) -> Result<()> {
    let reply = IpcReply { events, state: engine.snapshot() };
    writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
    stdout.flush()?;
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
