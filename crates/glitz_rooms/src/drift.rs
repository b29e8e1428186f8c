//! # Occupancy Drift Ticker
//!
//! Background thread that fires [`RoomRegistry::drift_tick`] on a fixed
//! interval, simulating ambient join/leave churn independent of any user
//! intent.
//!
//! Lifecycle mirrors the session: start once, stop (or drop) once. Stopping
//! sends a shutdown signal and joins the thread, so no tick is ever left
//! half-applied - each tick completes its registry mutation before the loop
//! re-checks for shutdown.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::registry::RoomRegistry;

/// Configuration for the drift ticker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Milliseconds between ticks.
    pub interval_ms: u64,
    /// Per-room mutation probability per tick, in basis points
    /// (10_000 = 100%).
    pub mutation_chance_bp: u32,
    /// Seed for the ticker's deterministic RNG.
    pub seed: u64,
}

impl Default for DriftConfig {
    /// Stock behavior: every 2 seconds, each room mutates with 30%
    /// probability.
    fn default() -> Self {
        Self {
            interval_ms: 2_000,
            mutation_chance_bp: 3_000,
            seed: 0xBADD_CAFE_F00D_D00D,
        }
    }
}

/// Handle to the running drift thread.
///
/// Dropping the handle stops the thread; [`DriftTicker::stop`] does the same
/// explicitly.
pub struct DriftTicker {
    /// Shutdown signal to the ticker thread.
    shutdown: Sender<()>,
    /// Ticker thread handle, taken on stop.
    handle: Option<JoinHandle<()>>,
}

impl DriftTicker {
    /// Spawns the ticker thread against a shared registry.
    #[must_use]
    pub fn start(registry: Arc<RoomRegistry>, config: DriftConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);

        let handle = thread::spawn(move || {
            let ticker = tick(Duration::from_millis(config.interval_ms));
            let mut rng = StdRng::seed_from_u64(config.seed);
            tracing::info!(
                interval_ms = config.interval_ms,
                mutation_chance_bp = config.mutation_chance_bp,
                "occupancy drift started"
            );

            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(ticker) -> _ => {
                        let mutated = registry.drift_tick(&mut rng, config.mutation_chance_bp);
                        tracing::debug!(mutated, "drift tick");
                    }
                }
            }

            tracing::info!("occupancy drift stopped");
        });

        Self {
            shutdown: shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Stops the ticker and joins the thread.
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.shutdown.send(());
            let _ = handle.join();
        }
    }
}

impl Drop for DriftTicker {
    fn drop(&mut self) {
        self.halt();
    }
}
