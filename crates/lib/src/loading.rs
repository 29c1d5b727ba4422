//! Loading dialog: a cosmetic progress bar that climbs from 0 to its maximum, one step
//! per timer tick, then closes itself with `Accepted`. It does not track real work.

use std::time::Duration;

use crate::dialog::{DialogResult, DialogSize};
use crate::messages;
use crate::timer::PeriodicTimer;

pub const TICK_MS: u64 = 30;
pub const MAX_PROGRESS: u32 = 100;

pub const LOADING_DIALOG_SIZE: DialogSize = DialogSize::new(400.0, 150.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    /// Timer active, progress below the maximum.
    Loading,
    /// Terminal: dialog closed with `Accepted`.
    Done,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress moved to the contained value.
    Advanced(u32),
    /// Progress reached the maximum on this tick; the dialog accepted.
    Finished,
    /// The dialog was already done.
    Idle,
}

#[derive(Debug, Clone)]
pub struct LoadingDialog {
    progress: u32,
    max: u32,
    timer: PeriodicTimer,
    result: Option<DialogResult>,
}

impl Default for LoadingDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingDialog {
    pub fn new() -> Self {
        Self::with_timing(Duration::from_millis(TICK_MS), MAX_PROGRESS)
    }

    /// Custom tick period and maximum. A zero maximum is raised to one so that at least one
    /// tick happens before the dialog accepts.
    pub fn with_timing(tick: Duration, max: u32) -> Self {
        Self {
            progress: 0,
            max: max.max(1),
            timer: PeriodicTimer::start(tick),
            result: None,
        }
    }

    pub fn title(&self) -> &'static str {
        messages::LOADING_TITLE
    }

    pub fn label(&self) -> &'static str {
        messages::LOADING_LABEL
    }

    pub fn size(&self) -> DialogSize {
        LOADING_DIALOG_SIZE
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn max_progress(&self) -> u32 {
        self.max
    }

    /// Progress as a fraction in [0, 1] for progress bar widgets.
    pub fn fraction(&self) -> f32 {
        self.progress as f32 / self.max as f32
    }

    pub fn state(&self) -> LoadingState {
        if self.result.is_some() {
            LoadingState::Done
        } else {
            LoadingState::Loading
        }
    }

    pub fn result(&self) -> Option<DialogResult> {
        self.result
    }

    pub fn tick_period(&self) -> Duration {
        self.timer.period()
    }

    /// Time until the next tick is due, or None once done.
    pub fn until_next_tick(&self) -> Option<Duration> {
        self.timer.until_next()
    }

    /// One timer firing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.result.is_some() {
            return TickOutcome::Idle;
        }
        self.progress += 1;
        if self.progress >= self.max {
            self.timer.stop();
            self.result = Some(DialogResult::Accepted);
            log::debug!("loading finished after {} ticks", self.progress);
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced(self.progress)
        }
    }

    /// Feed elapsed wall-clock time and apply every tick that became due. Returns the
    /// number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.timer.advance(elapsed);
        let mut applied = 0;
        for _ in 0..due {
            if self.tick() == TickOutcome::Idle {
                break;
            }
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let d = LoadingDialog::new();
        assert_eq!(d.progress(), 0);
        assert_eq!(d.title(), "遊戲加載中");
        assert_eq!(d.label(), "正在加載遊戲...");
        assert_eq!(d.size(), DialogSize::new(400.0, 150.0));
        assert_eq!(d.tick_period(), Duration::from_millis(30));
        assert_eq!(d.state(), LoadingState::Loading);
    }

    #[test]
    fn ninety_nine_ticks_stay_open() {
        let mut d = LoadingDialog::new();
        for _ in 0..99 {
            assert!(matches!(d.tick(), TickOutcome::Advanced(_)));
        }
        assert_eq!(d.progress(), 99);
        assert_eq!(d.result(), None);
    }

    #[test]
    fn hundredth_tick_accepts() {
        let mut d = LoadingDialog::new();
        let mut seen = vec![d.progress()];
        let mut finished = 0;
        for _ in 0..100 {
            if d.tick() == TickOutcome::Finished {
                finished += 1;
            }
            seen.push(d.progress());
        }
        assert_eq!(finished, 1);
        assert_eq!(d.progress(), 100);
        assert_eq!(d.result(), Some(DialogResult::Accepted));
        assert!(seen.windows(2).all(|w| w[1] == w[0] + 1));
        assert_eq!(d.tick(), TickOutcome::Idle);
        assert_eq!(d.progress(), 100);
    }

    #[test]
    fn advance_by_simulated_time() {
        let mut d = LoadingDialog::new();
        assert_eq!(d.advance(Duration::from_millis(29)), 0);
        assert_eq!(d.advance(Duration::from_millis(1)), 1);
        assert_eq!(d.advance(Duration::from_millis(30 * 98)), 98);
        assert_eq!(d.progress(), 99);
        assert_eq!(d.result(), None);
        assert_eq!(d.advance(Duration::from_secs(10)), 1);
        assert_eq!(d.progress(), 100);
        assert_eq!(d.result(), Some(DialogResult::Accepted));
        assert_eq!(d.until_next_tick(), None);
    }

    #[test]
    fn fraction_tracks_progress() {
        let mut d = LoadingDialog::with_timing(Duration::from_millis(5), 4);
        d.tick();
        assert!((d.fraction() - 0.25).abs() < f32::EPSILON);
    }
}
