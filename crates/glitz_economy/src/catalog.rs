//! # Static Catalog
//!
//! Recharge packs and the purchasable SVIP level range.
//!
//! Pack prices are display-only: no payment is enforced anywhere in the
//! engine, buying a pack simply credits its coins. The catalog is fixed for
//! the lifetime of a session.

use serde::{Deserialize, Serialize};

use crate::error::{EconomyError, EconomyResult};
use crate::svip::{SVIP_MAX_LEVEL, SVIP_MIN_LEVEL};

/// A purchasable coin pack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargePack {
    /// Catalog identifier.
    pub id: String,
    /// Coins credited on purchase.
    pub coins: u64,
    /// Display price in fixed-point USD cents. Not enforced.
    pub price_cents: u64,
}

/// The session's static purchase catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    /// Available recharge packs.
    packs: Vec<RechargePack>,
}

impl Catalog {
    /// Creates a catalog from a pack list.
    #[must_use]
    pub fn new(packs: Vec<RechargePack>) -> Self {
        Self { packs }
    }

    /// All recharge packs, in catalog order.
    #[must_use]
    pub fn packs(&self) -> &[RechargePack] {
        &self.packs
    }

    /// Looks up a pack by id.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::UnknownPack`] if no pack has that id.
    pub fn pack(&self, pack_id: &str) -> EconomyResult<&RechargePack> {
        self.packs
            .iter()
            .find(|p| p.id == pack_id)
            .ok_or_else(|| EconomyError::UnknownPack(pack_id.to_owned()))
    }

    /// The ordered set of purchasable SVIP levels.
    #[must_use]
    pub fn svip_levels() -> std::ops::RangeInclusive<u8> {
        SVIP_MIN_LEVEL..=SVIP_MAX_LEVEL
    }
}

impl Default for Catalog {
    /// The built-in pack set.
    fn default() -> Self {
        Self::new(vec![
            RechargePack {
                id: "p1".to_owned(),
                coins: 50,
                price_cents: 500,
            },
            RechargePack {
                id: "p2".to_owned(),
                coins: 200,
                price_cents: 1_800,
            },
            RechargePack {
                id: "p3".to_owned(),
                coins: 500,
                price_cents: 4_000,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_packs() {
        let catalog = Catalog::default();
        assert_eq!(catalog.packs().len(), 3);

        let p2 = catalog.pack("p2").unwrap();
        assert_eq!(p2.coins, 200);
        assert_eq!(p2.price_cents, 1_800);
    }

    #[test]
    fn test_unknown_pack_is_an_error() {
        let catalog = Catalog::default();
        assert_eq!(
            catalog.pack("p9").unwrap_err(),
            EconomyError::UnknownPack("p9".to_owned())
        );
    }

    #[test]
    fn test_svip_levels_cover_one_through_eleven() {
        let levels: Vec<u8> = Catalog::svip_levels().collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }
}
