//! # GLITZ Session Demo
//!
//! Drives a scripted session end-to-end against a live drift ticker:
//! recharge, SVIP purchase, room joins, wheel spins, and a withdrawal
//! round-trip, then prints the closing snapshot.
//!
//! Run with: cargo run --bin session_demo

use std::thread;
use std::time::Duration;

use glitz::{Intent, SessionConfig, SessionEngine};
use glitz_rooms::DriftConfig;

/// Drift interval for the demo - fast enough to watch occupancy move.
const DEMO_DRIFT_INTERVAL_MS: u64 = 250;

/// How long the demo lets ambient drift run before the closing snapshot.
const DEMO_DRIFT_WINDOW: Duration = Duration::from_millis(1_200);

fn main() {
    let mut config = SessionConfig::default();
    config.drift = DriftConfig {
        interval_ms: DEMO_DRIFT_INTERVAL_MS,
        ..DriftConfig::default()
    };

    let engine = SessionEngine::new(config).expect("default config is valid");
    let drift = engine.start_drift();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║                  GLITZ SESSION DEMO                      ║");
    println!("╚══════════════════════════════════════════════════════════╝");

    let opening = engine.snapshot();
    println!();
    println!(
        "User: {}  ({} coins, {} diamonds)",
        opening.user.wallet.name, opening.user.wallet.coins, opening.user.wallet.diamonds
    );
    println!("Catalog packs:");
    for pack in engine.catalog().packs() {
        println!(
            "  {} -> {} coins  (${}.{:02})",
            pack.id,
            pack.coins,
            pack.price_cents / 100,
            pack.price_cents % 100
        );
    }

    // The scripted session.
    let script = vec![
        Intent::BuyCoins {
            pack_id: "p2".to_owned(),
        },
        Intent::BuySvip { level: 3 },
        Intent::JoinRoom {
            room_id: "r1".to_owned(),
        },
        Intent::JoinRoom {
            room_id: "r4".to_owned(),
        },
        Intent::PlayWheel,
        Intent::PlayWheel,
        Intent::PlayWheel,
        Intent::RequestWithdraw { amount: 50 },
    ];

    println!();
    println!("Applying {} intents...", script.len());
    for intent in script {
        match engine.apply(intent.clone()) {
            Ok(outcome) => println!("  {intent:?} -> {outcome:?}"),
            Err(err) => println!("  {intent:?} -> ERROR: {err}"),
        }
    }

    // Approve whatever the script filed.
    let pending: Vec<u64> = engine
        .snapshot()
        .withdraw_requests
        .iter()
        .map(|r| r.id)
        .collect();
    for request_id in pending {
        let outcome = engine.admin_approve_withdraw(request_id);
        println!("  admin approve #{request_id} -> {outcome:?}");
    }

    println!();
    println!("UI notices:");
    for notice in engine.drain_notices() {
        println!("  * {notice}");
    }

    // Let ambient occupancy churn for a moment.
    thread::sleep(DEMO_DRIFT_WINDOW);
    drift.stop();

    let closing = engine.snapshot();
    println!();
    println!("┌─ CLOSING SNAPSHOT ─────────────────────────────────────────┐");
    println!(
        "│ Coins: {:>6}   Diamonds: {:>3}   SVIP: {}",
        closing.user.wallet.coins, closing.user.wallet.diamonds, closing.user.svip_level
    );
    println!("│ Rooms:");
    for room in &closing.rooms {
        println!("│   {:<14} {:>2}/{:<2}", room.name, room.players, room.max);
    }
    println!("│ Withdrawals:");
    for request in &closing.withdraw_requests {
        println!(
            "│   #{} -{} coins [{}]",
            request.id, request.amount, request.status
        );
    }
    println!("│ Ledger ({} entries, newest first):", closing.history.len());
    for entry in engine.recent_history(10) {
        println!("│   [{:>3}] {:<8} {}", entry.seq, entry.kind.to_string(), entry.text);
    }
    println!("└────────────────────────────────────────────────────────────┘");
}
