//! Betting dialog: shows the balance, takes a fixed stake per click and settles it
//! with a single coin flip.
//!
//! State machine:
//!
//! ```text
//! Idle --place_bet--> Settling --dismiss_notice--> Idle
//! ```
//!
//! While `Settling` a message box is up and further clicks are rejected, so settlements
//! never interleave regardless of whether the host toolkit enforces modality.

use crate::dialog::{DialogResult, DialogSize, Notice};
use crate::messages;
use crate::outcome::{Outcome, OutcomeSource};
use crate::wallet::{checked_apply, Wallet};

/// Amount deducted per bet.
pub const STAKE: u64 = 100;
/// Gross amount credited on a win (net +100).
pub const PAYOUT_ON_WIN: u64 = 200;

pub const BETTING_DIALOG_SIZE: DialogSize = DialogSize::new(600.0, 400.0);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("stake must be greater than zero")]
    ZeroStake,
    #[error("amount {0} is too large")]
    TooLarge(u64),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BetError {
    #[error("a bet is already being settled")]
    Settling,
    #[error("dialog is closed")]
    Closed,
    #[error("wallet refused a settlement of {0}")]
    WalletRefused(i64),
}

/// Stake and payout for one bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetRules {
    stake: u64,
    payout: u64,
}

impl Default for BetRules {
    fn default() -> Self {
        Self {
            stake: STAKE,
            payout: PAYOUT_ON_WIN,
        }
    }
}

impl BetRules {
    pub fn new(stake: u64, payout: u64) -> Result<Self, RulesError> {
        if stake == 0 {
            return Err(RulesError::ZeroStake);
        }
        for amount in [stake, payout] {
            if i64::try_from(amount).is_err() {
                return Err(RulesError::TooLarge(amount));
            }
        }
        Ok(Self { stake, payout })
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn payout(&self) -> u64 {
        self.payout
    }

    // Both fit in i64 by construction, so neither net delta overflows.
    fn lose_delta(&self) -> i64 {
        -(self.stake as i64)
    }

    fn win_delta(&self) -> i64 {
        self.payout as i64 - self.stake as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BettingState {
    /// Awaiting a click.
    Idle,
    /// A message box is open.
    Settling,
    /// The dialog has been closed.
    Closed,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetResult {
    Won { credits: u64 },
    Lost { credits: u64 },
    Insufficient { credits: u64 },
    /// A win could not be credited without overflowing the balance.
    AtLimit { credits: u64 },
}

impl BetResult {
    pub fn credits(&self) -> u64 {
        match *self {
            BetResult::Won { credits }
            | BetResult::Lost { credits }
            | BetResult::Insufficient { credits }
            | BetResult::AtLimit { credits } => credits,
        }
    }
}

pub struct BettingDialog<W, O> {
    wallet: W,
    outcomes: O,
    rules: BetRules,
    state: BettingState,
    label: String,
    notice: Option<Notice>,
    result: Option<DialogResult>,
}

impl<W: Wallet, O: OutcomeSource> BettingDialog<W, O> {
    pub fn new(wallet: W, outcomes: O) -> Self {
        Self::with_rules(wallet, outcomes, BetRules::default())
    }

    pub fn with_rules(wallet: W, outcomes: O, rules: BetRules) -> Self {
        let label = messages::credit_label(wallet.read_balance());
        Self {
            wallet,
            outcomes,
            rules,
            state: BettingState::Idle,
            label,
            notice: None,
            result: None,
        }
    }

    pub fn title(&self) -> &'static str {
        messages::BETTING_TITLE
    }

    pub fn size(&self) -> DialogSize {
        BETTING_DIALOG_SIZE
    }

    pub fn button_text(&self) -> &'static str {
        messages::BET_BUTTON
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> BettingState {
        self.state
    }

    pub fn rules(&self) -> BetRules {
        self.rules
    }

    /// The message box currently open, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// True when a click would be accepted.
    pub fn can_bet(&self) -> bool {
        self.state == BettingState::Idle
    }

    pub fn result(&self) -> Option<DialogResult> {
        self.result
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn outcomes(&self) -> &O {
        &self.outcomes
    }

    /// Handle a click on the bet button.
    ///
    /// Opens exactly one message box per accepted click. Both possible settlements are
    /// checked before the draw: no outcome is drawn, and nothing changes, when the balance
    /// does not cover the stake or could not hold the payout.
    pub fn place_bet(&mut self) -> Result<BetResult, BetError> {
        match self.state {
            BettingState::Idle => {}
            BettingState::Settling => return Err(BetError::Settling),
            BettingState::Closed => return Err(BetError::Closed),
        }

        let credits = self.wallet.read_balance();
        if checked_apply(credits, self.rules.lose_delta()).is_none() {
            log::warn!(
                "bet refused: balance {} below stake {}",
                credits,
                self.rules.stake
            );
            self.open_notice(Notice::warning(
                messages::INSUFFICIENT_TITLE,
                messages::INSUFFICIENT_BODY,
            ));
            return Ok(BetResult::Insufficient { credits });
        }
        if checked_apply(credits, self.rules.win_delta()).is_none() {
            log::warn!("bet refused: balance {} cannot take a payout", credits);
            self.open_notice(Notice::warning(
                messages::AT_LIMIT_TITLE,
                messages::AT_LIMIT_BODY,
            ));
            return Ok(BetResult::AtLimit { credits });
        }

        let outcome = self.outcomes.sample_outcome();
        let delta = match outcome {
            Outcome::Win => self.rules.win_delta(),
            Outcome::Lose => self.rules.lose_delta(),
        };
        if !self.wallet.apply_delta(delta) {
            return Err(BetError::WalletRefused(delta));
        }
        let credits = self.wallet.read_balance();
        let (result, body) = match outcome {
            Outcome::Win => (BetResult::Won { credits }, messages::win_body(self.rules.payout)),
            Outcome::Lose => (BetResult::Lost { credits }, messages::LOSE_BODY.to_string()),
        };
        self.open_notice(Notice::information(messages::RESULT_TITLE, body));
        log::info!("bet settled: {:?}, balance now {}", outcome, result.credits());
        self.refresh_label();
        Ok(result)
    }

    /// Close the open message box and return to `Idle`.
    pub fn dismiss_notice(&mut self) -> Option<Notice> {
        let notice = self.notice.take();
        if self.state == BettingState::Settling {
            self.state = BettingState::Idle;
        }
        notice
    }

    /// Re-read the balance into the label. Not called automatically when the wallet is
    /// changed from outside the dialog.
    pub fn refresh_label(&mut self) {
        self.label = messages::credit_label(self.wallet.read_balance());
    }

    /// Close the dialog from the window manager. Any open message box is discarded;
    /// settled credits stay with the wallet.
    pub fn close(&mut self) -> DialogResult {
        self.notice = None;
        self.state = BettingState::Closed;
        *self.result.get_or_insert(DialogResult::Rejected)
    }

    /// Give the wallet handle and outcome source back to the host.
    pub fn into_parts(self) -> (W, O) {
        (self.wallet, self.outcomes)
    }

    fn open_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.state = BettingState::Settling;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::NoticeKind;
    use crate::outcome::{RandomOutcomes, ScriptedOutcomes};
    use crate::wallet::User;

    fn dialog(credits: u64, script: &[Outcome]) -> BettingDialog<User, ScriptedOutcomes> {
        BettingDialog::new(
            User::new("tester", credits),
            ScriptedOutcomes::new(script.iter().copied()),
        )
    }

    #[test]
    fn construction_shows_balance() {
        let d = dialog(150, &[]);
        assert_eq!(d.title(), "賭場遊戲");
        assert_eq!(d.button_text(), "下注");
        assert_eq!(d.label(), "當前積分：150");
        assert_eq!(d.size(), DialogSize::new(600.0, 400.0));
        assert!(d.can_bet());
    }

    #[test]
    fn win_from_150_gives_250() {
        let mut d = dialog(150, &[Outcome::Win]);
        assert_eq!(d.place_bet(), Ok(BetResult::Won { credits: 250 }));
        assert_eq!(d.wallet().credits, 250);
        assert_eq!(d.label(), "當前積分：250");
        let notice = d.notice().expect("win notice");
        assert_eq!(notice.kind, NoticeKind::Information);
        assert_eq!(notice.title, "結果");
        assert_eq!(notice.body, "恭喜你贏了！獲得200積分。");
    }

    #[test]
    fn lose_from_150_gives_50() {
        let mut d = dialog(150, &[Outcome::Lose]);
        assert_eq!(d.place_bet(), Ok(BetResult::Lost { credits: 50 }));
        assert_eq!(d.label(), "當前積分：50");
        let notice = d.dismiss_notice().expect("lose notice");
        assert_eq!(notice.body, "很遺憾，你輸了。");
        assert_eq!(d.state(), BettingState::Idle);
    }

    #[test]
    fn insufficient_balance_is_unchanged_and_warned() {
        let mut d = dialog(50, &[Outcome::Win]);
        assert_eq!(d.place_bet(), Ok(BetResult::Insufficient { credits: 50 }));
        assert_eq!(d.wallet().credits, 50);
        assert_eq!(d.label(), "當前積分：50");
        let notice = d.notice().expect("warning");
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.title, "積分不足");
        assert_eq!(notice.body, "積分不足，無法下注！");
    }

    #[test]
    fn exact_stake_can_lose_to_zero_then_is_gated() {
        let mut d = dialog(100, &[Outcome::Lose, Outcome::Win]);
        assert_eq!(d.place_bet(), Ok(BetResult::Lost { credits: 0 }));
        d.dismiss_notice();
        assert_eq!(d.place_bet(), Ok(BetResult::Insufficient { credits: 0 }));
        assert_eq!(d.wallet().credits, 0);
        assert_eq!(d.notice().map(|n| n.kind), Some(NoticeKind::Warning));
        assert_eq!(d.outcomes().draws(), 1);
    }

    #[test]
    fn zero_balance_draws_nothing() {
        let mut d = dialog(0, &[Outcome::Win]);
        assert_eq!(d.place_bet(), Ok(BetResult::Insufficient { credits: 0 }));
        assert_eq!(d.outcomes().draws(), 0);
    }

    #[test]
    fn clicks_while_settling_are_rejected() {
        let mut d = dialog(500, &[Outcome::Win, Outcome::Win]);
        d.place_bet().expect("first bet");
        assert_eq!(d.place_bet(), Err(BetError::Settling));
        assert_eq!(d.wallet().credits, 600);
        assert_eq!(d.outcomes().draws(), 1);
        d.dismiss_notice();
        assert_eq!(d.place_bet(), Ok(BetResult::Won { credits: 700 }));
    }

    #[test]
    fn label_is_not_refreshed_on_external_change() {
        let host = crate::wallet::SharedUser::new(User::new("amy", 300));
        let mut d = BettingDialog::new(host.clone(), ScriptedOutcomes::default());
        host.set_credits(900);
        assert_eq!(d.label(), "當前積分：300");
        d.refresh_label();
        assert_eq!(d.label(), "當前積分：900");
    }

    #[test]
    fn close_rejects_and_blocks_further_bets() {
        let mut d = dialog(300, &[Outcome::Lose]);
        d.place_bet().expect("bet");
        assert_eq!(d.close(), DialogResult::Rejected);
        assert!(d.notice().is_none());
        assert_eq!(d.place_bet(), Err(BetError::Closed));
        let (user, _) = d.into_parts();
        assert_eq!(user.credits, 200);
    }

    #[test]
    fn custom_rules_apply() {
        let rules = BetRules::new(10, 50).expect("valid rules");
        let mut d = BettingDialog::with_rules(
            User::new("amy", 10),
            ScriptedOutcomes::new([Outcome::Win]),
            rules,
        );
        assert_eq!(d.place_bet(), Ok(BetResult::Won { credits: 50 }));
        assert_eq!(
            d.notice().map(|n| n.body.as_str()),
            Some("恭喜你贏了！獲得50積分。")
        );
    }

    #[test]
    fn invalid_rules_are_rejected() {
        assert_eq!(BetRules::new(0, 200), Err(RulesError::ZeroStake));
        assert_eq!(
            BetRules::new(100, u64::MAX),
            Err(RulesError::TooLarge(u64::MAX))
        );
    }

    #[test]
    fn balance_never_negative_and_deltas_conserved() {
        for seed in 0..20u64 {
            let mut d = BettingDialog::new(
                User::new("amy", seed * 37),
                RandomOutcomes::seeded(seed),
            );
            for _ in 0..200 {
                let before = d.wallet().credits;
                match d.place_bet().expect("idle dialog") {
                    BetResult::Won { credits } => assert_eq!(credits, before + 100),
                    BetResult::Lost { credits } => assert_eq!(credits, before - 100),
                    BetResult::Insufficient { credits } => {
                        assert!(before < STAKE);
                        assert_eq!(credits, before);
                    }
                    BetResult::AtLimit { .. } => panic!("small balances never hit the limit"),
                }
                d.dismiss_notice();
            }
        }
    }

    #[test]
    fn win_that_would_overflow_is_refused_before_debit() {
        let mut d = dialog(u64::MAX - 50, &[Outcome::Win]);
        assert_eq!(d.place_bet(), Ok(BetResult::AtLimit { credits: u64::MAX - 50 }));
        assert_eq!(d.wallet().credits, u64::MAX - 50);
        assert_eq!(d.outcomes().draws(), 0);
        let notice = d.dismiss_notice().expect("limit warning");
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.title, "無法下注");
    }

    #[test]
    fn win_just_below_the_limit_is_credited_in_full() {
        let mut d = dialog(u64::MAX - 100, &[Outcome::Win]);
        assert_eq!(d.place_bet(), Ok(BetResult::Won { credits: u64::MAX }));
        assert_eq!(d.wallet().credits, u64::MAX);
    }

    #[test]
    fn payout_below_stake_still_settles() {
        let rules = BetRules::new(100, 30).expect("valid rules");
        let mut d = BettingDialog::with_rules(
            User::new("amy", 100),
            ScriptedOutcomes::new([Outcome::Win]),
            rules,
        );
        assert_eq!(d.place_bet(), Ok(BetResult::Won { credits: 30 }));
    }
}
