use std::{
    thread,
    time::{Duration, Instant},
};

use crate::{command::RunOptions, config::PruneConfig, prune::PruneContext};

/// Periodic trigger with ticks on a fixed grid `start + k * interval`
///
/// Ticks missed while a cycle was still running collapse into a single
/// immediate tick. A tick beyond the range of `Instant` never fires.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start.checked_add(interval),
        }
    }

    /// Time to wait at `now` before the next tick, then advances the grid.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let Some(next) = self.next else {
            return self.interval;
        };
        let wait = next.saturating_duration_since(now);
        if self.interval.is_zero() {
            return wait;
        }
        let fired = next.max(now);
        let behind = fired.duration_since(next);
        // skip every grid point already behind the one firing now
        let missed = behind.as_nanos() / self.interval.as_nanos();
        let steps = u32::try_from(missed).unwrap_or(u32::MAX).saturating_add(1);
        self.next = self
            .interval
            .checked_mul(steps)
            .and_then(|step| next.checked_add(step));
        wait
    }

    pub fn wait(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

#[derive(Debug)]
pub struct Scheduler {
    config: PruneConfig,
    options: RunOptions,
}

impl Scheduler {
    pub fn new(config: PruneConfig, options: RunOptions) -> Self {
        Self { config, options }
    }

    /// Run a cycle immediately, then one per tick, `limit` cycles in total.
    ///
    /// `None` runs forever.
    pub fn run(&self, limit: Option<usize>) {
        if self.config.check_frequency.is_zero() {
            log::warn!("check frequency is zero, cycles will run back-to-back");
        }
        let mut ticker = Ticker::new(self.config.check_frequency, Instant::now());
        let mut number = 1;
        loop {
            self.cycle(number);
            if limit.is_some_and(|limit| number >= limit) {
                break;
            }
            ticker.wait();
            number += 1;
        }
    }

    /// Files first, emptied directories are then removed in the same cycle.
    pub fn cycle(&self, number: usize) {
        let start = Instant::now();
        let root = &self.config.watch_path;
        log::debug!("cycle {number} started on {root:?}");
        let context = PruneContext::new(self.options.dry_run);
        context.prune_old_files(root, self.config.modified_expiration);
        context.prune_empty_dirs(root);
        if !self.options.no_statistic {
            log::info!(
                "cycle {number} finished in {}: {}",
                humantime::format_duration(start.elapsed()),
                context.statistic().summary(context.dry_run())
            );
        }
    }
}

/// Prune `config.watch_path` forever.
pub fn run(config: PruneConfig) {
    Scheduler::new(config, RunOptions::default()).run(None);
}
