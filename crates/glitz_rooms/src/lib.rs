//! # GLITZ Rooms
//!
//! Room occupancy for the GLITZ session simulator: a fixed registry of
//! rooms mutated by user joins and by an autonomous, unaudited drift tick
//! running on its own thread.
//!
//! ## Concurrency Model
//!
//! User intents are serialized by the session orchestrator, but the drift
//! ticker runs concurrently with them. Both paths go through the same
//! per-room lock inside [`RoomRegistry`], which is the entire
//! synchronization story: there is nothing else to race on.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod drift;
pub mod registry;

pub use drift::{DriftConfig, DriftTicker};
pub use registry::{default_rooms, JoinOutcome, RoomRegistry, RoomSnapshot, RoomSpec};
