//! # GLITZ
//!
//! Session orchestration for the GLITZ mock-economy simulator.
//!
//! The presentation layer sees exactly three things: intent operations on
//! [`SessionEngine`], the [`SessionSnapshot`] refreshed after every call,
//! and a drainable buffer of [`SessionNotice`]s. Everything else - wallet
//! accounting, subscription lifecycle, the reward wheel, the withdrawal
//! queue, room occupancy and its ambient drift - lives in the component
//! crates and is reached only through the engine.
//!
//! ## Example
//!
//! ```rust,ignore
//! use glitz::{SessionConfig, SessionEngine};
//!
//! let engine = SessionEngine::new(SessionConfig::default())?;
//! let _drift = engine.start_drift();
//!
//! engine.buy_coins("p2")?;
//! engine.buy_svip(3)?;
//! let snapshot = engine.snapshot();
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod notices;
pub mod session;

pub use config::SessionConfig;
pub use notices::{NoticeBuffer, SessionNotice};
pub use session::{Intent, IntentOutcome, SessionEngine, SessionSnapshot, UserSnapshot};
