//! # Session Configuration
//!
//! Everything a session needs at startup, in one deserializable record:
//! the seed user profile, the recharge pack catalog, the room set, the wheel
//! prize table, and the drift parameters. Loaded once; the engine never
//! re-reads configuration.
//!
//! `Default` mirrors the built-in data set, so a session can start with no
//! file at all.

use serde::Deserialize;

use glitz_economy::{Catalog, EconomyError, EconomyResult, RechargePack, UserProfile, WheelTable};
use glitz_rooms::{default_rooms, DriftConfig, RoomSpec};

/// Complete session configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seed user profile.
    pub profile: UserProfile,
    /// Recharge pack catalog.
    pub packs: Vec<RechargePack>,
    /// Fixed room set.
    pub rooms: Vec<RoomSpec>,
    /// Wheel prize table.
    pub wheel: WheelTable,
    /// Occupancy drift parameters.
    pub drift: DriftConfig,
    /// Seed for the wheel's deterministic RNG.
    pub wheel_seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            profile: UserProfile::default(),
            packs: Catalog::default().packs().to_vec(),
            rooms: default_rooms(),
            wheel: WheelTable::default(),
            drift: DriftConfig::default(),
            wheel_seed: 0x57A2_11FE_57A2_11FE,
        }
    }
}

impl SessionConfig {
    /// Parses a configuration from TOML text.
    ///
    /// The wheel table's cached total weight is recomputed here, since it is
    /// not part of the serialized form.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidConfig`] if the TOML does not parse or
    /// the wheel table has no weighted entries.
    pub fn from_toml_str(raw: &str) -> EconomyResult<Self> {
        let mut config: Self =
            toml::from_str(raw).map_err(|e| EconomyError::InvalidConfig(e.to_string()))?;
        config.wheel.recalculate_total_weight()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glitz_economy::SpinPrize;

    #[test]
    fn test_default_data_set() {
        let config = SessionConfig::default();

        assert_eq!(config.profile.name, "KHAN_07\u{2122}");
        assert_eq!(config.profile.coins, 681);
        assert_eq!(config.packs.len(), 3);
        assert_eq!(config.rooms.len(), 4);
        assert_eq!(config.wheel.entries.len(), 5);
        assert_eq!(config.drift.interval_ms, 2_000);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = SessionConfig::from_toml_str(
            r#"
            [profile]
            id = "user_02"
            name = "TESTER"
            coins = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.profile.name, "TESTER");
        assert_eq!(config.profile.coins, 50);
        // Unspecified sections keep the built-in defaults.
        assert_eq!(config.rooms.len(), 4);
        assert!(config.wheel.total_weight() > 0);
    }

    #[test]
    fn test_custom_wheel_table_parses_and_reweights() {
        let config = SessionConfig::from_toml_str(
            r#"
            [[wheel.entries]]
            prize = { kind = "coins", amount = 500 }
            weight = 1

            [[wheel.entries]]
            prize = { kind = "nothing" }
            weight = 9
            "#,
        )
        .unwrap();

        assert_eq!(config.wheel.entries.len(), 2);
        assert_eq!(config.wheel.total_weight(), 10);
        assert_eq!(
            config.wheel.entries[0].prize,
            SpinPrize::Coins { amount: 500 }
        );
    }

    #[test]
    fn test_unparseable_toml_is_an_invalid_config() {
        let err = SessionConfig::from_toml_str("packs = 3").unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(_)));
    }

    #[test]
    fn test_weightless_wheel_is_an_invalid_config() {
        let err = SessionConfig::from_toml_str(
            r#"
            [[wheel.entries]]
            prize = { kind = "nothing" }
            weight = 0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EconomyError::InvalidConfig(_)));
    }
}
