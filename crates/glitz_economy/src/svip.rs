//! # SVIP Subscription
//!
//! Tier lifecycle for the purchasable SVIP subscription (levels 1..=11).
//!
//! A purchase is all-or-nothing: the coin debit is the affordability check,
//! and no status field changes unless it succeeds. Re-purchasing while a tier
//! is active overwrites the level and resets the expiry to 30 days from the
//! purchase moment - there is no stacking and no pro-rating of unused time.
//!
//! Expiry is informational. The engine never reverts an expired tier on its
//! own; [`SvipStatus::is_expired`] exists so a listing surface can render the
//! lapsed state without the engine mutating anything.

use crate::error::{EconomyError, EconomyResult};
use crate::wallet::{Currency, Wallet};

/// Lowest purchasable SVIP tier.
pub const SVIP_MIN_LEVEL: u8 = 1;

/// Highest purchasable SVIP tier.
pub const SVIP_MAX_LEVEL: u8 = 11;

/// Coin cost per tier level.
pub const SVIP_COST_PER_LEVEL: u64 = 100;

/// Duration of a granted tier: 30 days in milliseconds.
pub const SVIP_DURATION_MS: u64 = 30 * 24 * 60 * 60 * 1000;

/// Coin cost of a tier.
///
/// # Errors
///
/// Returns [`EconomyError::InvalidTier`] for levels outside 1..=11.
pub fn tier_cost(level: u8) -> EconomyResult<u64> {
    if !(SVIP_MIN_LEVEL..=SVIP_MAX_LEVEL).contains(&level) {
        return Err(EconomyError::InvalidTier(level));
    }
    Ok(u64::from(level) * SVIP_COST_PER_LEVEL)
}

/// Current subscription state of the session user.
///
/// Invariant: `level == 0` exactly when `expires_at_ms` is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvipStatus {
    /// Active tier, 0 meaning none.
    level: u8,
    /// Expiry in epoch milliseconds; absent when no tier is active.
    expires_at_ms: Option<u64>,
}

impl SvipStatus {
    /// No active subscription.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            level: 0,
            expires_at_ms: None,
        }
    }

    /// Active tier, 0 meaning none.
    #[inline]
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// Expiry in epoch milliseconds, if a tier is active.
    #[inline]
    #[must_use]
    pub const fn expires_at_ms(&self) -> Option<u64> {
        self.expires_at_ms
    }

    /// True if any tier is currently held (expired or not).
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.level > 0
    }

    /// True if a held tier's expiry has passed.
    ///
    /// Read-only: the engine never auto-reverts an expired tier.
    #[must_use]
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.expires_at_ms.is_some_and(|expiry| expiry <= now_ms)
    }

    /// Purchases a tier by debiting `level * 100` coins from the wallet.
    ///
    /// On success sets the level and resets the expiry to `now_ms + 30 days`,
    /// returning the new expiry.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidTier`] for an out-of-range level and
    /// [`EconomyError::InsufficientFunds`] if the wallet cannot cover the
    /// cost. No state changes on error.
    pub fn purchase(&mut self, wallet: &mut Wallet, level: u8, now_ms: u64) -> EconomyResult<u64> {
        let cost = tier_cost(level)?;
        wallet.debit(Currency::Coins, cost)?;
        Ok(self.set_tier(level, now_ms))
    }

    /// Grants a tier without cost. Administrator action - unconditional,
    /// no affordability check.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidTier`] for an out-of-range level.
    pub fn admin_grant(&mut self, level: u8, now_ms: u64) -> EconomyResult<u64> {
        tier_cost(level)?;
        Ok(self.set_tier(level, now_ms))
    }

    fn set_tier(&mut self, level: u8, now_ms: u64) -> u64 {
        let expires = now_ms.saturating_add(SVIP_DURATION_MS);
        self.level = level;
        self.expires_at_ms = Some(expires);
        expires
    }
}

impl Default for SvipStatus {
    fn default() -> Self {
        Self::none()
    }
}
