//! Presentation boundary.
//!
//! A UI implements Presenter and feeds it the events returned by
//! SimEngine. Every hook defaults to a no-op so a presenter only
//! overrides what it renders.

use crate::{
    event::SimEvent,
    snapshot::StatSnapshot,
    stats::{DaySummary, FinalSummary},
    types::DayNumber,
};

pub trait Presenter {
    fn on_stat_update(&mut self, _snapshot: &StatSnapshot) {}
    fn on_customer_event(&mut self, _message: &str, _icon: &str) {}
    fn on_day_opened(&mut self, _day: DayNumber, _planned: u32) {}
    fn on_day_closed(&mut self, _summary: &DaySummary) {}
    fn on_game_over(&mut self, _summary: &FinalSummary) {}
    fn on_toast(&mut self, _message: &str) {}

    /// Route one engine event to the matching hook.
    fn present(&mut self, event: &SimEvent) {
        match event {
            SimEvent::StatsUpdated { snapshot }            => self.on_stat_update(snapshot),
            SimEvent::CustomerServed { message, icon, .. } => self.on_customer_event(message, icon),
            SimEvent::DayOpened { day, planned }           => self.on_day_opened(*day, *planned),
            SimEvent::DayClosed { summary }                => self.on_day_closed(summary),
            SimEvent::GameOver { summary }                 => self.on_game_over(summary),
            SimEvent::Toast { message }                    => self.on_toast(message),
            SimEvent::CommandRejected { command, reason } => {
                log::debug!("presenter: {command} rejected: {reason}");
            }
            other => log::trace!("presenter: no hook for {}", other.type_name()),
        }
    }

    fn present_all(&mut self, events: &[SimEvent]) {
        for event in events {
            self.present(event);
        }
    }
}

/// Writes every presentation hook to the log. Useful headless.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn on_customer_event(&mut self, message: &str, _icon: &str) {
        log::info!("{message}");
    }

    fn on_day_opened(&mut self, day: DayNumber, planned: u32) {
        log::info!("day={day} opened, target around {planned} customers");
    }

    fn on_day_closed(&mut self, summary: &DaySummary) {
        log::info!(
            "day={} closed: customers={} income={:.2} satisfaction={}% popularity={:.0}%",
            summary.day,
            summary.customers,
            summary.income,
            summary.satisfaction_pct,
            summary.popularity
        );
    }

    fn on_game_over(&mut self, summary: &FinalSummary) {
        log::info!("game over: score={} rank={:?}", summary.score, summary.rank);
    }

    fn on_toast(&mut self, message: &str) {
        log::info!("toast: {message}");
    }
}
