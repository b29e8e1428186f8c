//! # Room Registry
//!
//! Fixed set of rooms with bounded occupancy.
//!
//! Rooms are created once at session start and never destroyed. Occupancy
//! changes through exactly two paths: a user join and the autonomous drift
//! tick. Both serialize on the same per-room lock, so a join racing a tick
//! cannot lose an update, and `0 <= players <= max` holds at every instant.
//!
//! A join against a full (or unknown) room is a soft failure: no state
//! change, no ledger entry, and *not* an error. This asymmetry with the
//! wallet's hard-fail debits is deliberate; [`JoinOutcome`] merely makes the
//! cases distinguishable to the caller.

use parking_lot::Mutex;
use rand::Rng;
use serde::{Deserialize, Serialize};

use glitz_economy::{EconomyError, EconomyResult};

/// Catalog record for one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    /// Stable room identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Starting occupancy.
    pub players: u32,
    /// Capacity. Constant for the room's lifetime.
    pub max: u32,
}

/// The built-in room set.
#[must_use]
pub fn default_rooms() -> Vec<RoomSpec> {
    vec![
        RoomSpec {
            id: "r1".to_owned(),
            name: "Room 1".to_owned(),
            players: 1,
            max: 12,
        },
        RoomSpec {
            id: "r2".to_owned(),
            name: "Room 2".to_owned(),
            players: 2,
            max: 12,
        },
        RoomSpec {
            id: "r3".to_owned(),
            name: "Room 3".to_owned(),
            players: 0,
            max: 12,
        },
        RoomSpec {
            id: "r4".to_owned(),
            name: "Treasure Room".to_owned(),
            players: 8,
            max: 12,
        },
    ]
}

/// Immutable copy of one room's state for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Stable room identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current occupancy.
    pub players: u32,
    /// Capacity.
    pub max: u32,
}

/// Outcome of a join attempt.
///
/// `Full` and `UnknownRoom` are soft no-ops, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum JoinOutcome {
    /// The user joined; carries the new occupancy.
    Joined {
        /// Occupancy after the join.
        players: u32,
    },
    /// The room is at capacity; nothing changed.
    Full,
    /// No room with that id exists; nothing changed.
    UnknownRoom,
}

/// One room: immutable identity plus locked occupancy.
#[derive(Debug)]
struct RoomSlot {
    id: String,
    name: String,
    max: u32,
    players: Mutex<u32>,
}

/// The fixed room set.
#[derive(Debug)]
pub struct RoomRegistry {
    rooms: Vec<RoomSlot>,
}

impl RoomRegistry {
    /// Builds the registry from catalog specs.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidConfig`] if a spec starts above its
    /// capacity or two specs share an id.
    pub fn new(specs: Vec<RoomSpec>) -> EconomyResult<Self> {
        let mut rooms: Vec<RoomSlot> = Vec::with_capacity(specs.len());
        for spec in specs {
            if spec.players > spec.max {
                return Err(EconomyError::InvalidConfig(format!(
                    "room {} starts at {} players with capacity {}",
                    spec.id, spec.players, spec.max
                )));
            }
            if rooms.iter().any(|r| r.id == spec.id) {
                return Err(EconomyError::InvalidConfig(format!(
                    "duplicate room id: {}",
                    spec.id
                )));
            }
            rooms.push(RoomSlot {
                id: spec.id,
                name: spec.name,
                max: spec.max,
                players: Mutex::new(spec.players),
            });
        }
        Ok(Self { rooms })
    }

    /// Attempts to join a room, incrementing its occupancy by exactly 1.
    pub fn join(&self, room_id: &str) -> JoinOutcome {
        let Some(slot) = self.rooms.iter().find(|r| r.id == room_id) else {
            return JoinOutcome::UnknownRoom;
        };
        let mut players = slot.players.lock();
        if *players >= slot.max {
            return JoinOutcome::Full;
        }
        *players += 1;
        JoinOutcome::Joined { players: *players }
    }

    /// One autonomous drift step.
    ///
    /// Each room independently mutates with probability
    /// `mutation_chance_bp / 10_000`; a triggered room moves by a uniformly
    /// random +/-1, clamped to `[0, max]`. Returns how many rooms mutated.
    ///
    /// Deliberately unaudited: drift appends nothing to the ledger.
    pub fn drift_tick<R: Rng>(&self, rng: &mut R, mutation_chance_bp: u32) -> u32 {
        let mut mutated = 0;
        for slot in &self.rooms {
            if rng.gen_range(0..10_000) >= mutation_chance_bp {
                continue;
            }
            let mut players = slot.players.lock();
            if rng.gen_bool(0.5) {
                *players = (*players + 1).min(slot.max);
            } else {
                *players = players.saturating_sub(1);
            }
            mutated += 1;
        }
        mutated
    }

    /// Current occupancy of a room, if it exists.
    #[must_use]
    pub fn players(&self, room_id: &str) -> Option<u32> {
        self.rooms
            .iter()
            .find(|r| r.id == room_id)
            .map(|r| *r.players.lock())
    }

    /// Immutable copy of every room's state, in catalog order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<RoomSnapshot> {
        self.rooms
            .iter()
            .map(|slot| RoomSnapshot {
                id: slot.id.clone(),
                name: slot.name.clone(),
                players: *slot.players.lock(),
                max: slot.max,
            })
            .collect()
    }

    /// Number of rooms in the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True if the registry holds no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
