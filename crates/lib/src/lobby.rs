//! Lobby flow around the two dialogs: the casino entry gate, then the loading dialog, then
//! the betting dialog once loading accepts, then back to the lobby with a refreshed balance.
//! Entering the casino and showing the loading dialog are one path here.

use std::time::Duration;

use crate::betting::{BetRules, BettingDialog};
use crate::config::Config;
use crate::dialog::{DialogResult, Notice};
use crate::loading::{LoadingDialog, MAX_PROGRESS, TICK_MS};
use crate::messages;
use crate::outcome::OutcomeSource;
use crate::wallet::{SharedUser, Wallet};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LobbyError {
    #[error("a dialog is already open")]
    Busy,
}

/// Result of pressing the enter-casino button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// The loading dialog is now showing.
    Loading,
    /// Balance below one stake; a warning is showing.
    Refused { credits: u64 },
}

pub enum Stage<O> {
    Lobby,
    Loading(LoadingDialog),
    Casino(BettingDialog<SharedUser, O>),
}

pub struct Lobby<O> {
    user: SharedUser,
    rules: BetRules,
    tick: Duration,
    max_progress: u32,
    // Parked here while no betting dialog holds it.
    outcomes: Option<O>,
    stage: Stage<O>,
    label: String,
    notice: Option<Notice>,
}

impl<O: OutcomeSource> Lobby<O> {
    pub fn new(user: SharedUser, outcomes: O) -> Self {
        Self::with_settings(
            user,
            outcomes,
            BetRules::default(),
            Duration::from_millis(TICK_MS),
            MAX_PROGRESS,
        )
    }

    pub fn with_settings(
        user: SharedUser,
        outcomes: O,
        rules: BetRules,
        tick: Duration,
        max_progress: u32,
    ) -> Self {
        let label = messages::lobby_credit_label(user.read_balance());
        Self {
            user,
            rules,
            tick,
            max_progress,
            outcomes: Some(outcomes),
            stage: Stage::Lobby,
            label,
            notice: None,
        }
    }

    /// Lobby using stake, payout and loading timing from config.
    pub fn from_config(config: &Config, user: SharedUser, outcomes: O) -> anyhow::Result<Self> {
        Ok(Self::with_settings(
            user,
            outcomes,
            config.game.rules()?,
            config.loading.tick(),
            config.loading.max_progress,
        ))
    }

    pub fn user(&self) -> &SharedUser {
        &self.user
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stage(&self) -> &Stage<O> {
        &self.stage
    }

    /// Lobby-level message box (entry refused), if open.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn loading(&self) -> Option<&LoadingDialog> {
        match &self.stage {
            Stage::Loading(d) => Some(d),
            _ => None,
        }
    }

    pub fn casino(&self) -> Option<&BettingDialog<SharedUser, O>> {
        match &self.stage {
            Stage::Casino(d) => Some(d),
            _ => None,
        }
    }

    pub fn casino_mut(&mut self) -> Option<&mut BettingDialog<SharedUser, O>> {
        match &mut self.stage {
            Stage::Casino(d) => Some(d),
            _ => None,
        }
    }

    /// Handle the enter-casino button.
    pub fn enter_casino(&mut self) -> Result<Entry, LobbyError> {
        if !matches!(self.stage, Stage::Lobby) || self.notice.is_some() {
            return Err(LobbyError::Busy);
        }
        let credits = self.user.read_balance();
        if credits < self.rules.stake() {
            log::info!("casino entry refused for {}: balance {}", self.user.name(), credits);
            self.notice = Some(Notice::warning(
                messages::ERROR_TITLE,
                messages::CASINO_ENTRY_REFUSED_BODY,
            ));
            return Ok(Entry::Refused { credits });
        }
        self.stage = Stage::Loading(LoadingDialog::with_timing(self.tick, self.max_progress));
        Ok(Entry::Loading)
    }

    /// Feed elapsed time to the loading dialog. When it accepts, the betting dialog opens.
    /// Returns true if the stage changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let Stage::Loading(loading) = &mut self.stage else {
            return false;
        };
        loading.advance(elapsed);
        if loading.result() != Some(DialogResult::Accepted) {
            return false;
        }
        match self.outcomes.take() {
            Some(outcomes) => {
                let dialog = BettingDialog::with_rules(self.user.clone(), outcomes, self.rules);
                self.stage = Stage::Casino(dialog);
                true
            }
            None => {
                log::error!("outcome source missing after loading; returning to lobby");
                self.stage = Stage::Lobby;
                true
            }
        }
    }

    /// Close the betting dialog and refresh the lobby balance.
    pub fn close_casino(&mut self) -> Option<DialogResult> {
        if !matches!(self.stage, Stage::Casino(_)) {
            return None;
        }
        let Stage::Casino(mut dialog) = std::mem::replace(&mut self.stage, Stage::Lobby) else {
            return None;
        };
        let result = dialog.close();
        let (_, outcomes) = dialog.into_parts();
        self.outcomes = Some(outcomes);
        self.refresh_label();
        Some(result)
    }

    pub fn refresh_label(&mut self) {
        self.label = messages::lobby_credit_label(self.user.read_balance());
    }
}
