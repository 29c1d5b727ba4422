//! Credit balance capability used by the dialogs.
//!
//! Dialogs never touch a raw credits field: they read the balance and request signed
//! deltas. A delta that would drive the balance below zero (or overflow it) is refused
//! without mutation, so `credits >= 0` holds everywhere outside a settlement.

use std::cell::RefCell;
use std::rc::Rc;

/// Read and adjust an external credit balance.
pub trait Wallet {
    /// Current spendable balance.
    fn read_balance(&self) -> u64;

    /// Apply a signed change. Returns false (and leaves the balance untouched) when the
    /// result would be negative or not representable.
    fn apply_delta(&mut self, delta: i64) -> bool;
}

impl<W: Wallet + ?Sized> Wallet for &mut W {
    fn read_balance(&self) -> u64 {
        (**self).read_balance()
    }

    fn apply_delta(&mut self, delta: i64) -> bool {
        (**self).apply_delta(delta)
    }
}

/// Checked `balance + delta`; None when negative or overflowing.
pub fn checked_apply(balance: u64, delta: i64) -> Option<u64> {
    if delta >= 0 {
        balance.checked_add(delta as u64)
    } else {
        balance.checked_sub(delta.unsigned_abs())
    }
}

/// A player and their credit balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub credits: u64,
}

impl User {
    pub fn new(name: impl Into<String>, credits: u64) -> Self {
        Self {
            name: name.into(),
            credits,
        }
    }
}

impl Wallet for User {
    fn read_balance(&self) -> u64 {
        self.credits
    }

    fn apply_delta(&mut self, delta: i64) -> bool {
        match checked_apply(self.credits, delta) {
            Some(next) => {
                self.credits = next;
                true
            }
            None => false,
        }
    }
}

/// Cloneable handle to a user owned by the host. The host keeps one clone and hands
/// another to a dialog; settlements made through the dialog are visible to the host
/// once it closes. UI-thread only.
#[derive(Debug, Clone)]
pub struct SharedUser {
    inner: Rc<RefCell<User>>,
}

impl SharedUser {
    pub fn new(user: User) -> Self {
        Self {
            inner: Rc::new(RefCell::new(user)),
        }
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    /// Overwrite the balance from outside a dialog (e.g. a recharge).
    pub fn set_credits(&self, credits: u64) {
        self.inner.borrow_mut().credits = credits;
    }
}

impl Wallet for SharedUser {
    fn read_balance(&self) -> u64 {
        self.inner.borrow().read_balance()
    }

    fn apply_delta(&mut self, delta: i64) -> bool {
        self.inner.borrow_mut().apply_delta(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_below_zero_is_refused() {
        let mut user = User::new("amy", 50);
        assert!(!user.apply_delta(-100));
        assert_eq!(user.credits, 50);
        assert!(user.apply_delta(-50));
        assert_eq!(user.credits, 0);
    }

    #[test]
    fn overflow_is_refused() {
        let mut user = User::new("amy", u64::MAX);
        assert!(!user.apply_delta(1));
        assert_eq!(user.credits, u64::MAX);
    }

    #[test]
    fn checked_apply_handles_min_delta() {
        assert_eq!(checked_apply(u64::MAX, i64::MIN), Some(u64::MAX - (1u64 << 63)));
        assert_eq!(checked_apply(0, i64::MIN), None);
    }

    #[test]
    fn shared_user_clones_see_the_same_balance() {
        let host = SharedUser::new(User::new("amy", 300));
        let mut dialog_handle = host.clone();
        assert!(dialog_handle.apply_delta(-100));
        assert_eq!(host.read_balance(), 200);
        host.set_credits(10);
        assert_eq!(dialog_handle.read_balance(), 10);
        assert_eq!(host.name(), "amy");
    }

    #[test]
    fn mut_ref_forwards_to_the_wallet() {
        fn bump<W: Wallet>(mut w: W) -> u64 {
            assert!(w.apply_delta(25));
            w.read_balance()
        }
        let mut user = User::new("amy", 100);
        assert_eq!(bump(&mut user), 125);
        assert_eq!(user.credits, 125);
    }
}
