//! # Reward Wheel
//!
//! Weighted prize table with a fixed spin cost.
//!
//! A spin debits [`SPIN_COST`] coins unconditionally - the cost is the price
//! of playing, not of winning - then draws one entry by weight and credits
//! the prize, if any. The affordability check happens before the debit, so a
//! spin that fails with `InsufficientFunds` has touched nothing.
//!
//! The stock table has five equally weighted entries (20% each):
//! 20 coins, 50 coins, 1 diamond, 100 coins, nothing. Custom catalogs may
//! use any weights; the total weight is precomputed once, so a draw is a
//! single range roll plus a short scan.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::wallet::{Currency, Wallet};

/// Coin cost of one spin.
pub const SPIN_COST: u64 = 10;

/// A prize the wheel can award.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpinPrize {
    /// A coin credit.
    Coins {
        /// Coins awarded.
        amount: u64,
    },
    /// A diamond credit.
    Diamonds {
        /// Diamonds awarded.
        amount: u64,
    },
    /// No prize. The spin cost is still charged.
    Nothing,
}

impl SpinPrize {
    /// Ledger-style description of the outcome.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Coins { amount } => format!("Won {amount} coins"),
            Self::Diamonds { amount: 1 } => "Won 1 diamond".to_owned(),
            Self::Diamonds { amount } => format!("Won {amount} diamonds"),
            Self::Nothing => "No prize".to_owned(),
        }
    }
}

/// A single weighted entry in the wheel table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelEntry {
    /// The prize this entry awards.
    pub prize: SpinPrize,
    /// Draw weight (higher = more likely). Zero-weight entries never draw.
    pub weight: u32,
}

/// Result of a completed spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinOutcome {
    /// The prize that was drawn (and already credited).
    pub prize: SpinPrize,
    /// Coins charged for the spin.
    pub cost: u64,
}

/// The complete prize table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelTable {
    /// All possible prizes.
    pub entries: Vec<WheelEntry>,
    /// Total weight of all entries (pre-calculated).
    #[serde(skip)]
    total_weight: u32,
}

impl WheelTable {
    /// Builds a table from entries, precomputing the total weight.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidConfig`] if no entry has a positive
    /// weight.
    pub fn new(entries: Vec<WheelEntry>) -> EconomyResult<Self> {
        let mut table = Self {
            entries,
            total_weight: 0,
        };
        table.recalculate_total_weight()?;
        Ok(table)
    }

    /// Recomputes the cached total weight.
    ///
    /// Must be called after deserializing a table, since the cached value is
    /// not part of the serialized form.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidConfig`] if no entry has a positive
    /// weight.
    pub fn recalculate_total_weight(&mut self) -> EconomyResult<()> {
        self.total_weight = self.entries.iter().map(|e| e.weight).sum();
        if self.total_weight == 0 {
            return Err(EconomyError::InvalidConfig(
                "wheel table has no weighted entries".to_owned(),
            ));
        }
        Ok(())
    }

    /// Total weight of all entries.
    #[inline]
    #[must_use]
    pub const fn total_weight(&self) -> u32 {
        self.total_weight
    }

    /// Spins the wheel: debits the fixed cost, draws a prize by weight, and
    /// credits it.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InsufficientFunds`] if the wallet holds fewer
    /// than [`SPIN_COST`] coins, and [`EconomyError::InvalidConfig`] if the
    /// table was deserialized without recalculating its weight. Nothing is
    /// charged or credited on error.
    pub fn spin<R: Rng>(&self, wallet: &mut Wallet, rng: &mut R) -> EconomyResult<SpinOutcome> {
        if self.total_weight == 0 {
            return Err(EconomyError::InvalidConfig(
                "wheel table weight not calculated".to_owned(),
            ));
        }

        wallet.debit(Currency::Coins, SPIN_COST)?;

        let mut roll = rng.gen_range(0..self.total_weight);
        let mut prize = SpinPrize::Nothing;
        for entry in &self.entries {
            if roll < entry.weight {
                prize = entry.prize;
                break;
            }
            roll -= entry.weight;
        }

        match prize {
            SpinPrize::Coins { amount } => wallet.credit(Currency::Coins, amount)?,
            SpinPrize::Diamonds { amount } => wallet.credit(Currency::Diamonds, amount)?,
            SpinPrize::Nothing => {}
        }

        Ok(SpinOutcome {
            prize,
            cost: SPIN_COST,
        })
    }
}

impl Default for WheelTable {
    /// The stock table: five equally likely outcomes.
    fn default() -> Self {
        let entries = vec![
            WheelEntry {
                prize: SpinPrize::Coins { amount: 20 },
                weight: 1,
            },
            WheelEntry {
                prize: SpinPrize::Coins { amount: 50 },
                weight: 1,
            },
            WheelEntry {
                prize: SpinPrize::Diamonds { amount: 1 },
                weight: 1,
            },
            WheelEntry {
                prize: SpinPrize::Coins { amount: 100 },
                weight: 1,
            },
            WheelEntry {
                prize: SpinPrize::Nothing,
                weight: 1,
            },
        ];
        Self {
            total_weight: entries.iter().map(|e| e.weight).sum(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::UserProfile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn wallet_with_coins(coins: u64) -> Wallet {
        Wallet::new(UserProfile {
            coins,
            diamonds: 0,
            ..UserProfile::default()
        })
    }

    #[test]
    fn test_spin_charges_exactly_the_cost() {
        let table = WheelTable::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut wallet = wallet_with_coins(1_000);

        for _ in 0..20 {
            let before_coins = wallet.coins();
            let before_diamonds = wallet.diamonds();
            let outcome = table.spin(&mut wallet, &mut rng).unwrap();
            assert_eq!(outcome.cost, SPIN_COST);

            let credited = match outcome.prize {
                SpinPrize::Coins { amount } => amount,
                SpinPrize::Diamonds { amount } => {
                    assert_eq!(wallet.diamonds(), before_diamonds + amount);
                    0
                }
                SpinPrize::Nothing => 0,
            };
            assert_eq!(wallet.coins(), before_coins - SPIN_COST + credited);
        }
    }

    #[test]
    fn test_spin_with_insufficient_coins_touches_nothing() {
        let table = WheelTable::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut wallet = wallet_with_coins(5);

        let err = table.spin(&mut wallet, &mut rng).unwrap_err();

        assert!(matches!(err, EconomyError::InsufficientFunds { .. }));
        assert_eq!(wallet.coins(), 5);
        assert_eq!(wallet.diamonds(), 0);
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        let table = WheelTable::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut wallet = wallet_with_coins(10_000_000);

        let trials = 5_000u32;
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..trials {
            let outcome = table.spin(&mut wallet, &mut rng).unwrap();
            *counts.entry(outcome.prize.describe()).or_default() += 1;
        }

        // Five outcome categories at 20% each; allow a generous band.
        assert_eq!(counts.len(), 5);
        for (prize, count) in &counts {
            let share = f64::from(*count) / f64::from(trials);
            assert!(
                (0.15..=0.25).contains(&share),
                "prize {prize} drawn {share:.3} of the time"
            );
        }
    }

    #[test]
    fn test_zero_weight_entries_never_draw() {
        let table = WheelTable::new(vec![
            WheelEntry {
                prize: SpinPrize::Coins { amount: 999 },
                weight: 0,
            },
            WheelEntry {
                prize: SpinPrize::Nothing,
                weight: 1,
            },
        ])
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut wallet = wallet_with_coins(10_000);

        for _ in 0..100 {
            let outcome = table.spin(&mut wallet, &mut rng).unwrap();
            assert_eq!(outcome.prize, SpinPrize::Nothing);
        }
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let err = WheelTable::new(vec![]).unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(_)));
    }

    #[test]
    fn test_prize_descriptions() {
        assert_eq!(SpinPrize::Coins { amount: 50 }.describe(), "Won 50 coins");
        assert_eq!(SpinPrize::Diamonds { amount: 1 }.describe(), "Won 1 diamond");
        assert_eq!(SpinPrize::Nothing.describe(), "No prize");
    }
}
