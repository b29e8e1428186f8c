//! # Wallet
//!
//! Balances for the single session user.
//!
//! All balances are unsigned integers, so "never negative" holds by
//! construction; the interesting invariant is that every debit is checked
//! against the available balance *before* anything is subtracted. USD is
//! carried as fixed-point cents - no floating point touches money.
//!
//! The follower/like counters ride along here because they belong to the same
//! user record, but they are display data only and never participate in an
//! economic check.

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};

/// The three balance currencies tracked by the wallet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Soft currency earned and spent inside the session.
    Coins,
    /// Premium currency, only won on the wheel.
    Diamonds,
    /// Real-money balance in fixed-point cents.
    UsdCents,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coins => write!(f, "coins"),
            Self::Diamonds => write!(f, "diamonds"),
            Self::UsdCents => write!(f, "USD cents"),
        }
    }
}

/// Seed record for the session user, as loaded from the catalog config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Stable user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Follower counter (display only).
    pub followers: u64,
    /// Following counter (display only).
    pub following: u64,
    /// Like counter (display only).
    pub likes: u64,
    /// Visitor counter, pre-formatted for display (e.g. "1.5K").
    pub visitors: String,
    /// Starting coin balance.
    pub coins: u64,
    /// Starting diamond balance.
    pub diamonds: u64,
    /// Starting USD balance in cents.
    pub balance_usd_cents: u64,
}

impl Default for UserProfile {
    /// The built-in seed user.
    fn default() -> Self {
        Self {
            id: "user_01".to_owned(),
            name: "KHAN_07\u{2122}".to_owned(),
            followers: 286,
            following: 12,
            likes: 526,
            visitors: "1.5K".to_owned(),
            coins: 681,
            diamonds: 3,
            balance_usd_cents: 0,
        }
    }
}

/// Immutable copy of the wallet for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletSnapshot {
    /// Stable user identifier.
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Follower counter.
    pub followers: u64,
    /// Following counter.
    pub following: u64,
    /// Like counter.
    pub likes: u64,
    /// Visitor counter, pre-formatted.
    pub visitors: String,
    /// Current coin balance.
    pub coins: u64,
    /// Current diamond balance.
    pub diamonds: u64,
    /// Current USD balance in cents.
    pub balance_usd_cents: u64,
}

/// The session user's wallet.
///
/// Mutated only through [`Wallet::credit`] and [`Wallet::debit`], both of
/// which are all-or-nothing.
#[derive(Clone, Debug)]
pub struct Wallet {
    /// Stable user identifier.
    user_id: String,
    /// Display name.
    name: String,
    /// Display counters.
    followers: u64,
    following: u64,
    likes: u64,
    visitors: String,
    /// Economic balances.
    coins: u64,
    diamonds: u64,
    balance_usd_cents: u64,
}

impl Wallet {
    /// Creates a wallet from a seed profile.
    #[must_use]
    pub fn new(profile: UserProfile) -> Self {
        Self {
            user_id: profile.id,
            name: profile.name,
            followers: profile.followers,
            following: profile.following,
            likes: profile.likes,
            visitors: profile.visitors,
            coins: profile.coins,
            diamonds: profile.diamonds,
            balance_usd_cents: profile.balance_usd_cents,
        }
    }

    /// The user this wallet belongs to.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Current balance for a currency.
    #[inline]
    #[must_use]
    pub fn balance(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Coins => self.coins,
            Currency::Diamonds => self.diamonds,
            Currency::UsdCents => self.balance_usd_cents,
        }
    }

    /// Current coin balance.
    #[inline]
    #[must_use]
    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Current diamond balance.
    #[inline]
    #[must_use]
    pub fn diamonds(&self) -> u64 {
        self.diamonds
    }

    /// Adds a non-negative amount to a balance.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::ArithmeticOverflow`] if the balance would
    /// exceed `u64::MAX`. The balance is untouched on error.
    pub fn credit(&mut self, currency: Currency, amount: u64) -> EconomyResult<()> {
        let slot = self.slot_mut(currency);
        *slot = slot
            .checked_add(amount)
            .ok_or(EconomyError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Subtracts an amount from a balance.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InsufficientFunds`] if the balance is smaller
    /// than `amount`. The balance is untouched on error - callers rely on
    /// this to keep every operation all-or-nothing.
    pub fn debit(&mut self, currency: Currency, amount: u64) -> EconomyResult<()> {
        let available = self.balance(currency);
        if available < amount {
            return Err(EconomyError::InsufficientFunds {
                currency,
                required: amount,
                available,
            });
        }
        *self.slot_mut(currency) = available - amount;
        Ok(())
    }

    /// Returns an immutable copy of the wallet for display. No side effects.
    #[must_use]
    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            followers: self.followers,
            following: self.following,
            likes: self.likes,
            visitors: self.visitors.clone(),
            coins: self.coins,
            diamonds: self.diamonds,
            balance_usd_cents: self.balance_usd_cents,
        }
    }

    fn slot_mut(&mut self, currency: Currency) -> &mut u64 {
        match currency {
            Currency::Coins => &mut self.coins,
            Currency::Diamonds => &mut self.diamonds,
            Currency::UsdCents => &mut self.balance_usd_cents,
        }
    }
}
